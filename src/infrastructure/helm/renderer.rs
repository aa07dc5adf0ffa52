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

//! External template renderer boundary.
//!
//! Rendering is a local, synchronous, offline computation: a scenario
//! either gets text back or a render error, and re-running with the same
//! inputs cannot change the outcome, so nothing here retries.

use crate::domain::scenario::ScenarioInput;
use crate::shared::error::{Result, VerifyError};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Renders one chart template for a scenario. The harness only depends on
/// this contract; tests substitute canned implementations.
pub trait TemplateRenderer {
    /// Render `template` (a chart-relative path such as
    /// `templates/api-deployment.yaml`) with the scenario's release,
    /// namespace and value overrides.
    fn render(&self, scenario: &ScenarioInput, template: &str) -> Result<String>;
}

/// Renderer backed by the `helm template` CLI.
pub struct HelmCli {
    chart_path: PathBuf,
    helm_binary: PathBuf,
}

impl HelmCli {
    pub fn new(chart_path: impl Into<PathBuf>) -> Self {
        Self {
            chart_path: chart_path.into(),
            helm_binary: PathBuf::from("helm"),
        }
    }

    /// Override the helm binary (e.g. a pinned build on CI).
    pub fn with_binary(mut self, helm_binary: impl Into<PathBuf>) -> Self {
        self.helm_binary = helm_binary.into();
        self
    }

    pub fn chart_path(&self) -> &Path {
        &self.chart_path
    }
}

impl TemplateRenderer for HelmCli {
    fn render(&self, scenario: &ScenarioInput, template: &str) -> Result<String> {
        let mut cmd = Command::new(&self.helm_binary);
        cmd.arg("template")
            .arg(&scenario.release)
            .arg(&self.chart_path)
            .arg("--namespace")
            .arg(&scenario.namespace)
            .arg("--show-only")
            .arg(template);
        for (key, value) in &scenario.set_values {
            cmd.arg("--set").arg(format!("{key}={value}"));
        }

        tracing::debug!(
            release = %scenario.release,
            namespace = %scenario.namespace,
            template,
            "invoking helm template"
        );

        let output = cmd.output().map_err(|e| {
            VerifyError::render_failure(format!(
                "failed to invoke '{}': {e}",
                self.helm_binary.display()
            ))
        })?;

        if !output.status.success() {
            return Err(VerifyError::RenderFailure(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
