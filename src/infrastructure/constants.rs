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

/// Chart identity
pub const CHART_NAME: &str = "featbit";
pub const CHART_VERSION: &str = "0.0.2";

/// Components
pub const COMPONENT_API: &str = "api";
pub const COMPONENT_ELS: &str = "els";
pub const COMPONENT_DAS: &str = "das";
pub const COMPONENT_UI: &str = "ui";

/// Default component service ports
pub const API_PORT: u16 = 5000;
pub const ELS_PORT: u16 = 5100;
pub const DAS_PORT: u16 = 8200;
pub const UI_PORT: u16 = 80;

/// Infrastructure dependency ports
pub const REDIS_PORT: u16 = 6379;
pub const MONGODB_PORT: u16 = 27017;

/// Init container settings
pub const INIT_CONTAINER_IMAGE: &str = "docker.io/busybox:1.34";
pub const INIT_WAIT_FOR_INFRA: &str = "wait-for-infrastructure-dependencies";
pub const INIT_WAIT_FOR_COMPONENTS: &str = "wait-for-other-components";

/// Well-known resource labels
pub const LABEL_NAME: &str = "app.kubernetes.io/name";
pub const LABEL_INSTANCE: &str = "app.kubernetes.io/instance";
pub const LABEL_COMPONENT: &str = "app.kubernetes.io/component";
pub const LABEL_MANAGED_BY: &str = "app.kubernetes.io/managed-by";
pub const LABEL_CHART: &str = "helm.sh/chart";
pub const MANAGED_BY_VALUE: &str = "Helm";

/// Release annotations stamped on every rendered resource
pub const ANNOTATION_RELEASE_NAME: &str = "meta.helm.sh/release-name";
pub const ANNOTATION_RELEASE_NAMESPACE: &str = "meta.helm.sh/release-namespace";

/// Rolling update settings
pub const MAX_UNAVAILABLE: &str = "25%";
pub const MAX_SURGE: &str = "25%";

/// Health check configuration
pub const LIVENESS_PERIOD: i32 = 5;
pub const LIVENESS_TIMEOUT: i32 = 2;
pub const READINESS_PERIOD: i32 = 10;
pub const READINESS_TIMEOUT: i32 = 5;

/// Default CPU request (millicores, decimal-SI)
pub const DEFAULT_CPU_REQUEST_MILLI: i64 = 250;

/// Cluster DNS suffix for statically-addressed services
pub const CLUSTER_DNS_SUFFIX: &str = "svc.cluster.local";

/// Namespace lookup performed inside a running container, used where the
/// namespace is not known at render time
pub const RUNTIME_NAMESPACE_LOOKUP: &str =
    "$(cat /var/run/secrets/kubernetes.io/serviceaccount/namespace)";
