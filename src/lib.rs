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

// Core modules
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export commonly used types
pub use domain::comparator::{DiffList, FieldDiff};
pub use domain::expectation::{
    image_ref, milli_cpu, release_annotations, selector_labels, standard_labels,
    ContainerExpectation, DeploymentExpectation, EnvValue, EnvVarExpectation,
    InitContainerExpectation, ProbeExpectation, ServiceExpectation, VolumeExpectation,
    VolumeMountExpectation,
};
pub use domain::harness::{ScenarioRunner, Verbosity};
pub use domain::scenario::{is_valid_dns_label, random_namespace, ScenarioInput};
pub use domain::suite::{ScenarioSpec, SuiteConfig};
pub use infrastructure::helm::{HelmCli, RenderedResource, TemplateRenderer};
pub use infrastructure::readiness::{infra_readiness_script, service_readiness_script};
pub use shared::{Result, VerifyError};
