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

use featbit_chart_verify::domain::suite::parse_set_pair;
use featbit_chart_verify::{
    is_valid_dns_label, random_namespace, ScenarioInput, SuiteConfig, VerifyError,
};
use std::path::Path;

// ============================================================================
// Tests for namespace isolation tokens
// ============================================================================

#[test]
fn random_namespace_is_a_valid_dns_label() {
    let namespace = random_namespace();
    assert!(namespace.starts_with("fbv-"));
    assert!(
        is_valid_dns_label(&namespace),
        "generated namespace '{namespace}' is not a valid DNS label"
    );
}

#[test]
fn random_namespaces_do_not_collide() {
    let first = random_namespace();
    let second = random_namespace();
    assert_ne!(first, second);
}

#[test]
fn isolated_scenarios_get_distinct_namespaces() {
    let a = ScenarioInput::isolated("helm-basic");
    let b = ScenarioInput::isolated("helm-basic");
    assert_ne!(a.namespace, b.namespace);
}

#[test]
fn dns_label_validation() {
    assert!(is_valid_dns_label("abc"));
    assert!(is_valid_dns_label("a1-b2"));
    assert!(!is_valid_dns_label(""));
    assert!(!is_valid_dns_label("Abc"));
    assert!(!is_valid_dns_label("-abc"));
    assert!(!is_valid_dns_label("abc-"));
    assert!(!is_valid_dns_label("a.b"));
    assert!(!is_valid_dns_label(&"a".repeat(64)));
    assert!(is_valid_dns_label(&"a".repeat(63)));
}

// ============================================================================
// Tests for the name composition rule
// ============================================================================

#[test]
fn chart_name_alone_when_release_matches_chart() {
    let scenario = ScenarioInput::new("ns", "featbit");
    assert_eq!(scenario.full_name(), "featbit");
    assert_eq!(scenario.component_name("api"), "featbit-api");
}

#[test]
fn release_prefix_when_release_differs_from_chart() {
    let scenario = ScenarioInput::new("ns", "notsame");
    assert_eq!(scenario.full_name(), "notsame-featbit");
    assert_eq!(scenario.component_name("api"), "notsame-featbit-api");
}

#[test]
fn fullname_override_wins() {
    let scenario = ScenarioInput::new("ns", "helm-basic").with_fullname_override("featbit");
    assert_eq!(scenario.full_name(), "featbit");
    assert_eq!(scenario.component_name("das"), "featbit-das");
    // The override also reaches the renderer as a value override.
    assert_eq!(
        scenario.set_values.get("fullnameOverride").map(String::as_str),
        Some("featbit")
    );
}

#[test]
fn set_values_keep_deterministic_order() {
    let scenario = ScenarioInput::new("ns", "rel")
        .with_set("b.key", "2")
        .with_set("a.key", "1");
    let keys: Vec<_> = scenario.set_values.keys().cloned().collect();
    assert_eq!(keys, vec!["a.key".to_string(), "b.key".to_string()]);
}

// ============================================================================
// Tests for suite files
// ============================================================================

#[test]
fn suite_file_parses_scenarios() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("verify.toml");
    std::fs::write(
        &path,
        r#"
chart = "../charts/featbit"

[[scenario]]
name = "api-deployment"
template = "templates/api-deployment.yaml"
release = "helm-basic"

[scenario.set]
fullnameOverride = "featbit"
"api.image.tag" = "2.4.1"

[[scenario]]
name = "missing-values"
template = "templates/api-deployment.yaml"
expect_render_failure = true
"#,
    )
    .unwrap();

    let suite = SuiteConfig::from_file(&path).unwrap();
    assert_eq!(suite.chart.as_deref(), Some(Path::new("../charts/featbit")));
    assert_eq!(suite.scenarios.len(), 2);

    let input = suite.scenarios[0].to_input();
    assert_eq!(input.release, "helm-basic");
    assert_eq!(input.full_name(), "featbit");
    assert_eq!(
        input.set_values.get("api.image.tag").map(String::as_str),
        Some("2.4.1")
    );

    // Release defaults to the chart name; namespaces are minted per run.
    assert_eq!(suite.scenarios[1].release, "featbit");
    assert!(suite.scenarios[1].expect_render_failure);
    let a = suite.scenarios[1].to_input();
    let b = suite.scenarios[1].to_input();
    assert_ne!(a.namespace, b.namespace);
}

#[test]
fn suite_file_without_scenarios_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("verify.toml");
    std::fs::write(&path, "chart = \"../charts/featbit\"\n").unwrap();

    assert!(matches!(
        SuiteConfig::from_file(&path),
        Err(VerifyError::ConfigError(_))
    ));
}

#[test]
fn set_pair_parsing() {
    assert_eq!(
        parse_set_pair("api.image.tag=2.4.1").unwrap(),
        ("api.image.tag".to_string(), "2.4.1".to_string())
    );
    // Values may themselves contain '='.
    assert_eq!(
        parse_set_pair("key=a=b").unwrap(),
        ("key".to_string(), "a=b".to_string())
    );
    assert!(parse_set_pair("no-separator").is_err());
}
