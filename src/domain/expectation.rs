// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Expected shapes for rendered resources.
//!
//! Expectations are parameterized by the scenario, so expected values that
//! depend on the inputs (names, hosts, init scripts) are derived rather
//! than spelled out as literals, and stay correct when a scenario runs
//! under a randomized namespace.

use crate::domain::comparator::{DiffList, FieldDiff};
use crate::domain::scenario::ScenarioInput;
use crate::infrastructure::constants::{
    ANNOTATION_RELEASE_NAME, ANNOTATION_RELEASE_NAMESPACE, CHART_NAME, CHART_VERSION,
    LABEL_CHART, LABEL_COMPONENT, LABEL_INSTANCE, LABEL_MANAGED_BY, LABEL_NAME, MANAGED_BY_VALUE,
};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{
    Container, EnvVar, PodSecurityContext, Probe, SecurityContext, Service,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use std::collections::BTreeMap;

/// `<registry>/<repository>:<tag>`
pub fn image_ref(registry: &str, repository: &str, tag: &str) -> String {
    format!("{registry}/{repository}:{tag}")
}

/// Milli-quantity in decimal-SI formatting, e.g. `250m`.
pub fn milli_cpu(millis: i64) -> Quantity {
    Quantity(format!("{millis}m"))
}

/// Selector-level labels for one component (no chart/managed-by keys).
pub fn selector_labels(scenario: &ScenarioInput, component: &str) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    labels.insert(LABEL_NAME.to_string(), CHART_NAME.to_string());
    labels.insert(LABEL_INSTANCE.to_string(), scenario.release.clone());
    labels.insert(LABEL_COMPONENT.to_string(), component.to_string());
    labels
}

/// Full metadata label set for one component.
pub fn standard_labels(scenario: &ScenarioInput, component: &str) -> BTreeMap<String, String> {
    let mut labels = selector_labels(scenario, component);
    labels.insert(LABEL_MANAGED_BY.to_string(), MANAGED_BY_VALUE.to_string());
    labels.insert(
        LABEL_CHART.to_string(),
        format!("{CHART_NAME}-{CHART_VERSION}"),
    );
    labels
}

/// Release annotations stamped on every rendered resource.
pub fn release_annotations(scenario: &ScenarioInput) -> BTreeMap<String, String> {
    let mut annotations = BTreeMap::new();
    annotations.insert(
        ANNOTATION_RELEASE_NAME.to_string(),
        scenario.release.clone(),
    );
    annotations.insert(
        ANNOTATION_RELEASE_NAMESPACE.to_string(),
        scenario.namespace.clone(),
    );
    annotations
}

/// Expected value of one environment variable, either literal or resolved
/// through a secret key reference.
#[derive(Debug, Clone)]
pub enum EnvValue {
    Literal(String),
    SecretKeyRef { secret: String, key: String },
}

#[derive(Debug, Clone)]
pub struct EnvVarExpectation {
    pub name: String,
    pub value: EnvValue,
}

impl EnvVarExpectation {
    pub fn literal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: EnvValue::Literal(value.into()),
        }
    }

    pub fn secret_ref(
        name: impl Into<String>,
        secret: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: EnvValue::SecretKeyRef {
                secret: secret.into(),
                key: key.into(),
            },
        }
    }

    fn collect(&self, path: &str, actual: &EnvVar, diffs: &mut DiffList) {
        diffs.check(&format!("{path}.name"), &self.name, &actual.name);
        match &self.value {
            EnvValue::Literal(value) => {
                diffs.check_opt(&format!("{path}.value"), value, actual.value.as_ref());
            }
            EnvValue::SecretKeyRef { secret, key } => {
                match actual
                    .value_from
                    .as_ref()
                    .and_then(|source| source.secret_key_ref.as_ref())
                {
                    Some(selector) => {
                        diffs.check_opt(
                            &format!("{path}.valueFrom.secretKeyRef.name"),
                            secret,
                            Some(&selector.name),
                        );
                        diffs.check(
                            &format!("{path}.valueFrom.secretKeyRef.key"),
                            key,
                            &selector.key,
                        );
                    }
                    None => diffs.push(FieldDiff::missing(format!(
                        "{path}.valueFrom.secretKeyRef"
                    ))),
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProbeExpectation {
    pub period_seconds: i32,
    pub timeout_seconds: i32,
    pub path: String,
    /// Named container port the probe targets.
    pub port: String,
}

impl ProbeExpectation {
    fn collect(&self, path: &str, actual: Option<&Probe>, diffs: &mut DiffList) {
        let Some(probe) = actual else {
            diffs.push(FieldDiff::missing(path));
            return;
        };

        diffs.check_opt(
            &format!("{path}.periodSeconds"),
            &self.period_seconds,
            probe.period_seconds.as_ref(),
        );
        diffs.check_opt(
            &format!("{path}.timeoutSeconds"),
            &self.timeout_seconds,
            probe.timeout_seconds.as_ref(),
        );
        match probe.http_get.as_ref() {
            Some(http_get) => {
                diffs.check_opt(
                    &format!("{path}.httpGet.path"),
                    &self.path,
                    http_get.path.as_ref(),
                );
                diffs.check(
                    &format!("{path}.httpGet.port"),
                    &IntOrString::String(self.port.clone()),
                    &http_get.port,
                );
            }
            None => diffs.push(FieldDiff::missing(format!("{path}.httpGet"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VolumeMountExpectation {
    pub name: String,
    pub mount_path: String,
    pub sub_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct VolumeExpectation {
    pub name: String,
    pub config_map: String,
    /// File mode bits on the projected config data.
    pub default_mode: i32,
}

#[derive(Debug, Clone)]
pub struct InitContainerExpectation {
    pub name: String,
    pub image: String,
    pub command: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ContainerExpectation {
    pub name: String,
    pub image: String,
    pub image_pull_policy: String,
    /// Only asserted when set; most containers run the image entrypoint.
    pub command: Option<Vec<String>>,
    /// Named ports: `(name, containerPort)`.
    pub ports: Vec<(String, i32)>,
    pub liveness: ProbeExpectation,
    pub readiness: ProbeExpectation,
    pub cpu_request_milli: i64,
    /// Declared order is significant; entries are compared by index.
    pub env: Vec<EnvVarExpectation>,
    pub volume_mounts: Vec<VolumeMountExpectation>,
}

impl ContainerExpectation {
    fn collect(&self, path: &str, actual: &Container, diffs: &mut DiffList) {
        diffs.check(&format!("{path}.name"), &self.name, &actual.name);
        diffs.check_opt(&format!("{path}.image"), &self.image, actual.image.as_ref());
        diffs.check_opt(
            &format!("{path}.imagePullPolicy"),
            &self.image_pull_policy,
            actual.image_pull_policy.as_ref(),
        );
        // Container security context defaults to empty, not absent.
        diffs.check_opt(
            &format!("{path}.securityContext"),
            &SecurityContext::default(),
            actual.security_context.as_ref(),
        );
        if let Some(command) = &self.command {
            diffs.check_opt(&format!("{path}.command"), command, actual.command.as_ref());
        }

        let ports = actual.ports.as_deref().unwrap_or_default();
        diffs.check(&format!("{path}.ports.length"), &self.ports.len(), &ports.len());
        for (i, (name, container_port)) in self.ports.iter().enumerate() {
            let Some(port) = ports.get(i) else { break };
            diffs.check_opt(&format!("{path}.ports[{i}].name"), name, port.name.as_ref());
            diffs.check(
                &format!("{path}.ports[{i}].containerPort"),
                container_port,
                &port.container_port,
            );
        }

        self.liveness.collect(
            &format!("{path}.livenessProbe"),
            actual.liveness_probe.as_ref(),
            diffs,
        );
        self.readiness.collect(
            &format!("{path}.readinessProbe"),
            actual.readiness_probe.as_ref(),
            diffs,
        );

        let cpu_request = actual
            .resources
            .as_ref()
            .and_then(|resources| resources.requests.as_ref())
            .and_then(|requests| requests.get("cpu"));
        diffs.check_opt(
            &format!("{path}.resources.requests.cpu"),
            &milli_cpu(self.cpu_request_milli),
            cpu_request,
        );

        let env = actual.env.as_deref().unwrap_or_default();
        diffs.check(&format!("{path}.env.length"), &self.env.len(), &env.len());
        for (i, expected) in self.env.iter().enumerate() {
            let Some(actual_var) = env.get(i) else { break };
            expected.collect(&format!("{path}.env[{i}]"), actual_var, diffs);
        }

        let mounts = actual.volume_mounts.as_deref().unwrap_or_default();
        diffs.check(
            &format!("{path}.volumeMounts.length"),
            &self.volume_mounts.len(),
            &mounts.len(),
        );
        for (i, expected) in self.volume_mounts.iter().enumerate() {
            let Some(mount) = mounts.get(i) else { break };
            let mount_path = format!("{path}.volumeMounts[{i}]");
            diffs.check(&format!("{mount_path}.name"), &expected.name, &mount.name);
            diffs.check(
                &format!("{mount_path}.mountPath"),
                &expected.mount_path,
                &mount.mount_path,
            );
            diffs.check(
                &format!("{mount_path}.subPath"),
                &expected.sub_path,
                &mount.sub_path,
            );
        }
    }
}

/// Field-by-field expected shape of a rendered Deployment.
#[derive(Debug, Clone)]
pub struct DeploymentExpectation {
    pub name: String,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
    pub replicas: i32,
    pub max_surge: IntOrString,
    pub max_unavailable: IntOrString,
    pub selector: BTreeMap<String, String>,
    pub pod_labels: BTreeMap<String, String>,
    pub service_account: String,
    pub init_containers: Vec<InitContainerExpectation>,
    /// The templates under test run a single main container.
    pub container: ContainerExpectation,
    pub volumes: Vec<VolumeExpectation>,
}

impl DeploymentExpectation {
    pub fn diffs(&self, deployment: &Deployment) -> Vec<FieldDiff> {
        let mut diffs = DiffList::new();

        let meta = &deployment.metadata;
        diffs.check_opt("metadata.name", &self.name, meta.name.as_ref());
        diffs.check_opt("metadata.namespace", &self.namespace, meta.namespace.as_ref());
        diffs.check_opt("metadata.labels", &self.labels, meta.labels.as_ref());
        diffs.check_opt(
            "metadata.annotations",
            &self.annotations,
            meta.annotations.as_ref(),
        );

        let Some(spec) = deployment.spec.as_ref() else {
            diffs.push(FieldDiff::missing("spec"));
            return diffs.into_diffs();
        };

        diffs.check_opt("spec.replicas", &self.replicas, spec.replicas.as_ref());
        match spec
            .strategy
            .as_ref()
            .and_then(|strategy| strategy.rolling_update.as_ref())
        {
            Some(rolling_update) => {
                diffs.check_opt(
                    "spec.strategy.rollingUpdate.maxSurge",
                    &self.max_surge,
                    rolling_update.max_surge.as_ref(),
                );
                diffs.check_opt(
                    "spec.strategy.rollingUpdate.maxUnavailable",
                    &self.max_unavailable,
                    rolling_update.max_unavailable.as_ref(),
                );
            }
            None => diffs.push(FieldDiff::missing("spec.strategy.rollingUpdate")),
        }
        diffs.check_opt(
            "spec.selector.matchLabels",
            &self.selector,
            spec.selector.match_labels.as_ref(),
        );

        diffs.check_opt(
            "spec.template.metadata.labels",
            &self.pod_labels,
            spec.template
                .metadata
                .as_ref()
                .and_then(|meta| meta.labels.as_ref()),
        );

        let Some(pod) = spec.template.spec.as_ref() else {
            diffs.push(FieldDiff::missing("spec.template.spec"));
            return diffs.into_diffs();
        };

        diffs.check_opt(
            "spec.template.spec.serviceAccountName",
            &self.service_account,
            pod.service_account_name.as_ref(),
        );
        // Pod security context defaults to empty, not absent.
        diffs.check_opt(
            "spec.template.spec.securityContext",
            &PodSecurityContext::default(),
            pod.security_context.as_ref(),
        );

        let init_containers = pod.init_containers.as_deref().unwrap_or_default();
        diffs.check(
            "spec.template.spec.initContainers.length",
            &self.init_containers.len(),
            &init_containers.len(),
        );
        for (i, expected) in self.init_containers.iter().enumerate() {
            let Some(actual) = init_containers.get(i) else { break };
            let path = format!("spec.template.spec.initContainers[{i}]");
            diffs.check(&format!("{path}.name"), &expected.name, &actual.name);
            diffs.check_opt(&format!("{path}.image"), &expected.image, actual.image.as_ref());
            diffs.check_opt(
                &format!("{path}.command"),
                &expected.command,
                actual.command.as_ref(),
            );
        }

        diffs.check(
            "spec.template.spec.containers.length",
            &1usize,
            &pod.containers.len(),
        );
        if let Some(container) = pod.containers.first() {
            self.container
                .collect("spec.template.spec.containers[0]", container, &mut diffs);
        }

        let volumes = pod.volumes.as_deref().unwrap_or_default();
        diffs.check(
            "spec.template.spec.volumes.length",
            &self.volumes.len(),
            &volumes.len(),
        );
        for (i, expected) in self.volumes.iter().enumerate() {
            let Some(volume) = volumes.get(i) else { break };
            let path = format!("spec.template.spec.volumes[{i}]");
            diffs.check(&format!("{path}.name"), &expected.name, &volume.name);
            match volume.config_map.as_ref() {
                Some(config_map) => {
                    diffs.check_opt(
                        &format!("{path}.configMap.name"),
                        &expected.config_map,
                        Some(&config_map.name),
                    );
                    diffs.check_opt(
                        &format!("{path}.configMap.defaultMode"),
                        &expected.default_mode,
                        config_map.default_mode.as_ref(),
                    );
                }
                None => diffs.push(FieldDiff::missing(format!("{path}.configMap"))),
            }
        }

        diffs.into_diffs()
    }
}

/// Field-by-field expected shape of a rendered Service.
#[derive(Debug, Clone)]
pub struct ServiceExpectation {
    pub name: String,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
    pub type_: String,
    /// Externally declared port; may differ from the target port.
    pub port: i32,
    pub target_port: IntOrString,
    pub protocol: String,
    pub selector: BTreeMap<String, String>,
}

impl ServiceExpectation {
    pub fn diffs(&self, service: &Service) -> Vec<FieldDiff> {
        let mut diffs = DiffList::new();

        let meta = &service.metadata;
        diffs.check_opt("metadata.name", &self.name, meta.name.as_ref());
        diffs.check_opt("metadata.namespace", &self.namespace, meta.namespace.as_ref());
        diffs.check_opt("metadata.labels", &self.labels, meta.labels.as_ref());
        diffs.check_opt(
            "metadata.annotations",
            &self.annotations,
            meta.annotations.as_ref(),
        );

        let Some(spec) = service.spec.as_ref() else {
            diffs.push(FieldDiff::missing("spec"));
            return diffs.into_diffs();
        };

        diffs.check_opt("spec.type", &self.type_, spec.type_.as_ref());
        diffs.check_opt("spec.selector", &self.selector, spec.selector.as_ref());

        let ports = spec.ports.as_deref().unwrap_or_default();
        diffs.check("spec.ports.length", &1usize, &ports.len());
        if let Some(port) = ports.first() {
            diffs.check("spec.ports[0].port", &self.port, &port.port);
            diffs.check_opt(
                "spec.ports[0].targetPort",
                &self.target_port,
                port.target_port.as_ref(),
            );
            diffs.check_opt(
                "spec.ports[0].protocol",
                &self.protocol,
                port.protocol.as_ref(),
            );
        }

        diffs.into_diffs()
    }
}
