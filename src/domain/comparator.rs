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

//! Field-level comparison with batched reporting.
//!
//! A scenario collects every mismatch before failing, so one run surfaces
//! all discrepancies instead of stopping at the first.

use crate::shared::error::{Result, VerifyError};
use std::fmt;

/// One field-level discrepancy between expectation and rendered output.
#[derive(Debug, Clone)]
pub struct FieldDiff {
    pub path: String,
    pub expected: String,
    pub actual: String,
}

impl FieldDiff {
    pub fn new(path: impl Into<String>, expected: String, actual: String) -> Self {
        Self {
            path: path.into(),
            expected,
            actual,
        }
    }

    /// A field the expectation requires but the rendered output lacks.
    pub fn missing(path: impl Into<String>) -> Self {
        Self::new(path, "present".to_string(), "absent".to_string())
    }
}

impl fmt::Display for FieldDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  {}: expected {}, got {}",
            self.path, self.expected, self.actual
        )
    }
}

/// Accumulator for field diffs across one scenario.
#[derive(Debug, Default)]
pub struct DiffList {
    diffs: Vec<FieldDiff>,
}

impl DiffList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diff: FieldDiff) {
        self.diffs.push(diff);
    }

    pub fn extend(&mut self, diffs: Vec<FieldDiff>) {
        self.diffs.extend(diffs);
    }

    /// Record a diff when `expected != actual`.
    pub fn check<T: PartialEq + fmt::Debug>(&mut self, path: &str, expected: &T, actual: &T) {
        if expected != actual {
            self.push(FieldDiff::new(
                path,
                format!("{expected:?}"),
                format!("{actual:?}"),
            ));
        }
    }

    /// Like [`check`](Self::check), for fields the schema keeps optional but
    /// the expectation requires.
    pub fn check_opt<T: PartialEq + fmt::Debug>(
        &mut self,
        path: &str,
        expected: &T,
        actual: Option<&T>,
    ) {
        match actual {
            Some(actual) if actual == expected => {}
            Some(actual) => self.push(FieldDiff::new(
                path,
                format!("{expected:?}"),
                format!("{actual:?}"),
            )),
            None => self.push(FieldDiff::new(
                path,
                format!("{expected:?}"),
                "absent".to_string(),
            )),
        }
    }

    /// Element-wise, order-significant sequence comparison. Two sequences
    /// with the same members in a different order do not pass.
    pub fn check_seq<T: PartialEq + fmt::Debug>(
        &mut self,
        path: &str,
        expected: &[T],
        actual: &[T],
    ) {
        self.check(&format!("{path}.length"), &expected.len(), &actual.len());
        for (i, (e, a)) in expected.iter().zip(actual.iter()).enumerate() {
            self.check(&format!("{path}[{i}]"), e, a);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diffs.len()
    }

    pub fn into_diffs(self) -> Vec<FieldDiff> {
        self.diffs
    }

    /// Fail the scenario with every collected mismatch, or pass.
    pub fn into_result(self, scenario: &str) -> Result<()> {
        if self.diffs.is_empty() {
            return Ok(());
        }

        let report = self
            .diffs
            .iter()
            .map(FieldDiff::to_string)
            .collect::<Vec<_>>()
            .join("\n");

        Err(VerifyError::AssertionMismatch {
            scenario: scenario.to_string(),
            count: self.diffs.len(),
            diffs: report,
        })
    }
}
