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

//! Typed view over rendered template output.
//!
//! Each supported resource kind decodes into its versioned schema struct;
//! the variant is picked from the document's `kind` field, never from the
//! scenario's assumptions.

use crate::shared::error::{Result, VerifyError};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Service;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub enum RenderedResource {
    Deployment(Box<Deployment>),
    Service(Box<Service>),
}

#[derive(Debug, Deserialize)]
struct KindTag {
    kind: String,
}

impl RenderedResource {
    /// Decode the first YAML document in `rendered` into its typed form.
    ///
    /// `helm template --show-only` emits a single document, but the output
    /// may lead with separators and `# Source:` comments, so empty documents
    /// are skipped.
    pub fn from_yaml(rendered: &str) -> Result<Self> {
        let doc = first_document(rendered)?;
        let tag: KindTag = serde_yaml::from_value(doc.clone())
            .map_err(|e| VerifyError::decode_failure("unknown", e))?;

        match tag.kind.as_str() {
            "Deployment" => {
                let deployment: Deployment = serde_yaml::from_value(doc)
                    .map_err(|e| VerifyError::decode_failure("Deployment", e))?;
                Ok(Self::Deployment(Box::new(deployment)))
            }
            "Service" => {
                let service: Service = serde_yaml::from_value(doc)
                    .map_err(|e| VerifyError::decode_failure("Service", e))?;
                Ok(Self::Service(Box::new(service)))
            }
            other => Err(VerifyError::decode_failure(
                other,
                "unsupported resource kind",
            )),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Deployment(_) => "Deployment",
            Self::Service(_) => "Service",
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Deployment(d) => d.metadata.name.as_deref(),
            Self::Service(s) => s.metadata.name.as_deref(),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::Deployment(d) => d.metadata.namespace.as_deref(),
            Self::Service(s) => s.metadata.namespace.as_deref(),
        }
    }

    pub fn as_deployment(&self) -> Result<&Deployment> {
        match self {
            Self::Deployment(d) => Ok(d),
            other => Err(VerifyError::decode_failure(
                "Deployment",
                format!("rendered resource is a {}", other.kind()),
            )),
        }
    }

    pub fn as_service(&self) -> Result<&Service> {
        match self {
            Self::Service(s) => Ok(s),
            other => Err(VerifyError::decode_failure(
                "Service",
                format!("rendered resource is a {}", other.kind()),
            )),
        }
    }
}

fn first_document(rendered: &str) -> Result<serde_yaml::Value> {
    for document in serde_yaml::Deserializer::from_str(rendered) {
        let value = serde_yaml::Value::deserialize(document)?;
        if value.is_mapping() {
            return Ok(value);
        }
    }
    Err(VerifyError::decode_failure(
        "unknown",
        "rendered output contains no YAML document",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_by_kind() {
        let rendered = "---\n# Source: featbit/templates/x.yaml\napiVersion: v1\nkind: Service\nmetadata:\n  name: featbit-das\nspec:\n  type: ClusterIp\n";
        let resource = RenderedResource::from_yaml(rendered).unwrap();
        assert_eq!(resource.kind(), "Service");
        assert_eq!(resource.name(), Some("featbit-das"));
        assert!(resource.as_deployment().is_err());
    }

    #[test]
    fn rejects_unsupported_kind() {
        let rendered = "kind: ConfigMap\nmetadata:\n  name: x\n";
        assert!(matches!(
            RenderedResource::from_yaml(rendered),
            Err(VerifyError::DecodeFailure { .. })
        ));
    }

    #[test]
    fn rejects_empty_output() {
        assert!(RenderedResource::from_yaml("---\n# nothing here\n").is_err());
    }
}
