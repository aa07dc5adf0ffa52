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

//! Scenario inputs and chart naming rules.

use crate::infrastructure::constants::CHART_NAME;
use rand::Rng;
use std::collections::BTreeMap;

const NAMESPACE_PREFIX: &str = "fbv";
const NAMESPACE_TOKEN_LEN: usize = 12;
const NAMESPACE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// One rendering scenario: a release, a target namespace, and the value
/// overrides handed to the renderer. Constructed per test case and
/// discarded at test end; nothing is shared between scenarios.
#[derive(Debug, Clone)]
pub struct ScenarioInput {
    /// Must be a valid DNS-1123 label; see [`is_valid_dns_label`].
    pub namespace: String,
    pub release: String,
    pub fullname_override: Option<String>,
    /// Dotted-key overrides, in deterministic order.
    pub set_values: BTreeMap<String, String>,
}

impl ScenarioInput {
    pub fn new(namespace: impl Into<String>, release: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            release: release.into(),
            fullname_override: None,
            set_values: BTreeMap::new(),
        }
    }

    /// Scenario with a freshly minted random namespace, so concurrent
    /// scenarios never collide on expected names or labels.
    pub fn isolated(release: impl Into<String>) -> Self {
        Self::new(random_namespace(), release)
    }

    /// Add one dotted-key override. `fullnameOverride` is also tracked as a
    /// field so name composition sees it.
    pub fn with_set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        if key == "fullnameOverride" {
            self.fullname_override = Some(value.clone());
        }
        self.set_values.insert(key, value);
        self
    }

    pub fn with_fullname_override(self, name: impl Into<String>) -> Self {
        self.with_set("fullnameOverride", name.into())
    }

    /// The chart's full-name rule: an explicit override wins; otherwise the
    /// chart name alone when the release already is the chart name, else
    /// `<release>-<chart>`.
    pub fn full_name(&self) -> String {
        if let Some(name) = &self.fullname_override {
            name.clone()
        } else if self.release == CHART_NAME {
            CHART_NAME.to_string()
        } else {
            format!("{}-{}", self.release, CHART_NAME)
        }
    }

    /// Resource name for one chart component, e.g. `featbit-api`.
    pub fn component_name(&self, component: &str) -> String {
        format!("{}-{}", self.full_name(), component)
    }
}

/// Mint a randomized, lowercase namespace token.
pub fn random_namespace() -> String {
    let mut rng = rand::rng();
    let token: String = (0..NAMESPACE_TOKEN_LEN)
        .map(|_| NAMESPACE_ALPHABET[rng.random_range(0..NAMESPACE_ALPHABET.len())] as char)
        .collect();
    format!("{NAMESPACE_PREFIX}-{token}")
}

/// DNS-1123 label check: lowercase alphanumerics and hyphens, alphanumeric
/// at both ends, at most 63 characters.
pub fn is_valid_dns_label(name: &str) -> bool {
    if name.is_empty() || name.len() > 63 {
        return false;
    }

    if !name.chars().next().unwrap_or(' ').is_ascii_alphanumeric() {
        return false;
    }
    if !name.chars().last().unwrap_or(' ').is_ascii_alphanumeric() {
        return false;
    }

    name.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
