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

use featbit_chart_verify::{DiffList, VerifyError};
use k8s_openapi::api::core::v1::EnvVar;
use std::collections::BTreeMap;

fn env_var(name: &str, value: &str) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value: Some(value.to_string()),
        ..Default::default()
    }
}

// ============================================================================
// Tests for batched mismatch reporting
// ============================================================================

#[test]
fn all_mismatches_are_collected_before_failing() {
    let mut diffs = DiffList::new();
    diffs.check("metadata.name", &"expected-name", &"actual-name");
    diffs.check("spec.replicas", &1, &3);
    diffs.check("spec.type", &"ClusterIp", &"ClusterIp");

    match diffs.into_result("example") {
        Err(VerifyError::AssertionMismatch {
            scenario,
            count,
            diffs,
        }) => {
            assert_eq!(scenario, "example");
            assert_eq!(count, 2);
            assert!(diffs.contains("metadata.name"));
            assert!(diffs.contains("spec.replicas"));
        }
        other => panic!("expected an assertion mismatch, got {other:?}"),
    }
}

#[test]
fn empty_diff_list_passes() {
    let mut diffs = DiffList::new();
    diffs.check("metadata.name", &"same", &"same");
    assert!(diffs.into_result("example").is_ok());
}

#[test]
fn absent_optional_field_is_a_mismatch() {
    let mut diffs = DiffList::new();
    diffs.check_opt::<String>("metadata.name", &"expected".to_string(), None);
    assert_eq!(diffs.len(), 1);
}

// ============================================================================
// Tests for order-significant sequence comparison
// ============================================================================

#[test]
fn swapped_adjacent_env_entries_fail() {
    let expected = vec![
        env_var("REDIS_HOST", "redis-master"),
        env_var("REDIS_PORT", "6379"),
        env_var("REDIS_SSL", "false"),
    ];
    let mut swapped = expected.clone();
    swapped.swap(1, 2);

    let mut diffs = DiffList::new();
    diffs.check_seq("env", &expected, &swapped);
    assert!(
        !diffs.is_empty(),
        "swapped entries must not pass even though both are present"
    );
}

#[test]
fn identical_env_sequences_pass() {
    let expected = vec![
        env_var("REDIS_HOST", "redis-master"),
        env_var("REDIS_PORT", "6379"),
    ];
    let mut diffs = DiffList::new();
    diffs.check_seq("env", &expected, &expected.clone());
    assert!(diffs.is_empty());
}

#[test]
fn sequence_length_mismatch_is_reported() {
    let expected = vec![env_var("A", "1"), env_var("B", "2")];
    let actual = vec![env_var("A", "1")];

    let mut diffs = DiffList::new();
    diffs.check_seq("env", &expected, &actual);
    let report = diffs.into_result("example").unwrap_err().to_string();
    assert!(report.contains("env.length"));
}

// ============================================================================
// Tests for exact mapping equality
// ============================================================================

#[test]
fn extra_label_key_is_a_mismatch() {
    let mut expected = BTreeMap::new();
    expected.insert("app.kubernetes.io/name".to_string(), "featbit".to_string());

    let mut actual = expected.clone();
    actual.insert("unexpected".to_string(), "key".to_string());

    let mut diffs = DiffList::new();
    diffs.check("metadata.labels", &expected, &actual);
    assert_eq!(diffs.len(), 1);
}

#[test]
fn missing_label_key_is_a_mismatch() {
    let mut expected = BTreeMap::new();
    expected.insert("app.kubernetes.io/name".to_string(), "featbit".to_string());
    expected.insert(
        "app.kubernetes.io/component".to_string(),
        "api".to_string(),
    );

    let mut actual = expected.clone();
    actual.remove("app.kubernetes.io/component");

    let mut diffs = DiffList::new();
    diffs.check("metadata.labels", &expected, &actual);
    assert_eq!(diffs.len(), 1);
}
