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

//! Suite files: a TOML list of rendering scenarios for the CLI.
//!
//! ```toml
//! chart = "../charts/featbit"
//!
//! [[scenario]]
//! name = "api-deployment"
//! template = "templates/api-deployment.yaml"
//! release = "helm-basic"
//!
//! [scenario.set]
//! "fullnameOverride" = "featbit"
//! "api.image.tag" = "2.4.1"
//! ```

use crate::domain::scenario::{random_namespace, ScenarioInput};
use crate::infrastructure::constants::CHART_NAME;
use crate::shared::error::{Result, VerifyError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct SuiteConfig {
    /// Chart source location; may be overridden from the command line.
    pub chart: Option<PathBuf>,
    #[serde(default, rename = "scenario")]
    pub scenarios: Vec<ScenarioSpec>,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioSpec {
    pub name: String,
    /// Chart-relative template path.
    pub template: String,
    #[serde(default = "default_release")]
    pub release: String,
    /// Randomized per run when absent, for isolation.
    pub namespace: Option<String>,
    /// Negative scenario: the renderer must reject the input.
    #[serde(default)]
    pub expect_render_failure: bool,
    #[serde(default)]
    pub set: BTreeMap<String, String>,
}

fn default_release() -> String {
    CHART_NAME.to_string()
}

impl SuiteConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let suite: SuiteConfig = toml::from_str(&raw)?;
        if suite.scenarios.is_empty() {
            return Err(VerifyError::config_error(format!(
                "suite file '{}' declares no scenarios",
                path.display()
            )));
        }
        Ok(suite)
    }
}

impl ScenarioSpec {
    pub fn to_input(&self) -> ScenarioInput {
        let namespace = self
            .namespace
            .clone()
            .unwrap_or_else(random_namespace);
        let mut input = ScenarioInput::new(namespace, self.release.clone());
        for (key, value) in &self.set {
            input = input.with_set(key.clone(), value.clone());
        }
        input
    }
}

/// Parse one `key=value` command line override.
pub fn parse_set_pair(raw: &str) -> Result<(String, String)> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| {
            VerifyError::config_error(format!("invalid set value '{raw}', expected key=value"))
        })
}
