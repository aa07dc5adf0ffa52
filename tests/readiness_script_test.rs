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

use featbit_chart_verify::{infra_readiness_script, service_readiness_script};

// ============================================================================
// Tests for the service wait script (API / Evaluation Server / DA Server)
// ============================================================================

// The chart embeds this text in its init containers; the builder must
// reproduce it byte-for-byte, including the blank line between stanzas and
// the two-space echo indent in the last stanza.
const SERVICE_SCRIPT: &str = concat!(
    "\n",
    "until (nc -vz rel1-api.ns1.svc.cluster.local 5000); do\n",
    "    echo \"waiting for API\"; sleep 1;\n",
    "done\n",
    "\n\n",
    "until (nc -vz rel1-els.ns1.svc.cluster.local 5100); do\n",
    "    echo \"waiting for Evaluation Server\"; sleep 1;\n",
    "done\n",
    "\n\n",
    "until (nc -vz rel1-das.ns1.svc.cluster.local 8200); do\n",
    "  echo \"waiting for DA Server\"; sleep 1;\n",
    "done\n",
);

const INFRA_SCRIPT: &str = concat!(
    "\n",
    "until (nc -vz \"rel1-full1-redis-master.$(cat /var/run/secrets/kubernetes.io/serviceaccount/namespace).svc.cluster.local\" 6379); do\n",
    "    echo \"waiting for Redis\"; sleep 1;\n",
    "done\n",
    "\n\n",
    "until (nc -vz \"rel1-full1-mongodb.$(cat /var/run/secrets/kubernetes.io/serviceaccount/namespace).svc.cluster.local\" 27017); do\n",
    "    echo \"waiting for Mongodb\"; sleep 1;\n",
    "done\n",
);

#[test]
fn service_script_matches_embedded_text() {
    let script = service_readiness_script("ns1", "rel1", 5000, 5100, 8200);
    assert_eq!(script, SERVICE_SCRIPT);
}

#[test]
fn service_script_stanza_order_is_api_els_das() {
    let script = service_readiness_script("ns1", "rel1", 5000, 5100, 8200);

    let api = script
        .find("rel1-api.ns1.svc.cluster.local 5000")
        .expect("API stanza missing");
    let els = script
        .find("rel1-els.ns1.svc.cluster.local 5100")
        .expect("Evaluation Server stanza missing");
    let das = script
        .find("rel1-das.ns1.svc.cluster.local 8200")
        .expect("DA Server stanza missing");

    assert!(api < els, "API stanza must precede the Evaluation Server stanza");
    assert!(els < das, "Evaluation Server stanza must precede the DA Server stanza");
}

#[test]
fn service_script_repeated_calls_are_byte_identical() {
    let first = service_readiness_script("some-ns", "some-rel", 1, 2, 3);
    let second = service_readiness_script("some-ns", "some-rel", 1, 2, 3);
    assert_eq!(first, second);
}

// ============================================================================
// Tests for the infrastructure wait script (Redis / MongoDB)
// ============================================================================

#[test]
fn infra_script_matches_embedded_text() {
    let script = infra_readiness_script("ns1", "rel1", "full1");
    assert_eq!(script, INFRA_SCRIPT);
}

#[test]
fn infra_script_has_exactly_two_stanzas() {
    let script = infra_readiness_script("ns1", "rel1", "full1");
    assert_eq!(script.matches("until (nc -vz").count(), 2);
    assert!(script.contains("rel1-full1-redis-master"));
    assert!(script.contains(" 6379)"));
    assert!(script.contains("rel1-full1-mongodb"));
    assert!(script.contains(" 27017)"));
}

#[test]
fn infra_script_resolves_namespace_at_container_start() {
    // The namespace comes from the service account mount, never from the
    // render-time namespace argument.
    let script = infra_readiness_script("ns1", "rel1", "full1");
    assert_eq!(
        script
            .matches("$(cat /var/run/secrets/kubernetes.io/serviceaccount/namespace)")
            .count(),
        2
    );
    assert!(!script.contains("ns1"));
}

#[test]
fn infra_script_repeated_calls_are_byte_identical() {
    let first = infra_readiness_script("a", "b", "c");
    let second = infra_readiness_script("a", "b", "c");
    assert_eq!(first, second);
}
