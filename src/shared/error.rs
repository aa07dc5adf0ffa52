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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, VerifyError>;

#[derive(Error, Debug)]
pub enum VerifyError {
    /// The external renderer rejected the input. Fatal for positive
    /// scenarios; negative scenarios assert on it as the expected outcome.
    #[error("template render failed: {0}")]
    RenderFailure(String),

    /// Rendered text did not conform to the expected resource kind. Always
    /// fatal: either the template is broken or the scenario targets the
    /// wrong kind.
    #[error("failed to decode rendered output as {kind}: {reason}")]
    DecodeFailure { kind: String, reason: String },

    /// One or more decoded fields differed from the expectation. Mismatches
    /// are collected per scenario and reported together.
    #[error("scenario '{scenario}' failed {count} field assertion(s):\n{diffs}")]
    AssertionMismatch {
        scenario: String,
        count: usize,
        diffs: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl VerifyError {
    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }

    pub fn render_failure(context: impl Into<String>) -> Self {
        Self::RenderFailure(context.into())
    }

    pub fn decode_failure(kind: impl Into<String>, reason: impl ToString) -> Self {
        Self::DecodeFailure {
            kind: kind.into(),
            reason: reason.to_string(),
        }
    }
}
