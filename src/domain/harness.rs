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

//! Render-and-verify scenario driver.

use crate::domain::comparator::DiffList;
use crate::domain::expectation::{DeploymentExpectation, ServiceExpectation};
use crate::domain::scenario::ScenarioInput;
use crate::infrastructure::helm::{RenderedResource, TemplateRenderer};
use crate::shared::error::{Result, VerifyError};

/// Per-scenario output level, passed explicitly instead of toggling any
/// process-wide logger state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

/// Drives one scenario at a time: render, decode, compare. Holds the
/// renderer immutably, so scenarios are free to run concurrently over a
/// shared runner.
pub struct ScenarioRunner<'a, R> {
    renderer: &'a R,
    verbosity: Verbosity,
}

impl<'a, R: TemplateRenderer> ScenarioRunner<'a, R> {
    pub fn new(renderer: &'a R) -> Self {
        Self {
            renderer,
            verbosity: Verbosity::default(),
        }
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Render and decode one template for the scenario.
    pub fn render_resource(
        &self,
        scenario: &ScenarioInput,
        template: &str,
    ) -> Result<RenderedResource> {
        if self.verbosity != Verbosity::Quiet {
            tracing::info!(
                namespace = %scenario.namespace,
                release = %scenario.release,
                template,
                "rendering template"
            );
        }

        let rendered = self.renderer.render(scenario, template)?;
        if self.verbosity == Verbosity::Verbose {
            tracing::debug!(output = %rendered, "renderer output");
        }

        RenderedResource::from_yaml(&rendered)
    }

    /// Positive Deployment scenario: render must succeed and every expected
    /// field must match; all mismatches are reported together.
    pub fn run_deployment(
        &self,
        name: &str,
        scenario: &ScenarioInput,
        template: &str,
        expectation: &DeploymentExpectation,
    ) -> Result<()> {
        let resource = self.render_resource(scenario, template)?;
        let deployment = resource.as_deployment()?;

        let mut diffs = DiffList::new();
        diffs.extend(expectation.diffs(deployment));
        diffs.into_result(name)
    }

    /// Positive Service scenario.
    pub fn run_service(
        &self,
        name: &str,
        scenario: &ScenarioInput,
        template: &str,
        expectation: &ServiceExpectation,
    ) -> Result<()> {
        let resource = self.render_resource(scenario, template)?;
        let service = resource.as_service()?;

        let mut diffs = DiffList::new();
        diffs.extend(expectation.diffs(service));
        diffs.into_result(name)
    }

    /// Negative scenario: the renderer must reject the input. A successful
    /// render, or any non-render error, fails the scenario.
    pub fn run_expecting_failure(
        &self,
        name: &str,
        scenario: &ScenarioInput,
        template: &str,
    ) -> Result<()> {
        match self.renderer.render(scenario, template) {
            Err(VerifyError::RenderFailure(reason)) => {
                if self.verbosity != Verbosity::Quiet {
                    tracing::info!(scenario = name, %reason, "renderer rejected the input");
                }
                Ok(())
            }
            Err(other) => Err(other),
            Ok(_) => Err(VerifyError::AssertionMismatch {
                scenario: name.to_string(),
                count: 1,
                diffs: "  render: expected a render failure, got rendered output".to_string(),
            }),
        }
    }
}
