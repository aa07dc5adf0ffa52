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

//! Readiness wait scripts embedded as init container commands.
//!
//! The chart templates carry these scripts verbatim, so the generated text
//! must match them byte-for-byte, whitespace included. Both builders are
//! pure string assembly: malformed identifiers flow through unchanged and
//! there are no failure modes.

use crate::infrastructure::constants::{
    CLUSTER_DNS_SUFFIX, COMPONENT_API, COMPONENT_DAS, COMPONENT_ELS, MONGODB_PORT, REDIS_PORT,
    RUNTIME_NAMESPACE_LOOKUP,
};

/// One `until nc` polling loop. `echo_indent` is caller-supplied because the
/// chart does not indent every stanza the same way.
fn wait_stanza(host: &str, port: u16, label: &str, echo_indent: &str) -> String {
    format!(
        "until (nc -vz {host} {port}); do\n{echo_indent}echo \"waiting for {label}\"; sleep 1;\ndone\n"
    )
}

/// Script waiting on the platform services (API, Evaluation Server, DA
/// Server) before a dependent component starts.
///
/// Stanza order is significant: it is the startup ordering the init
/// container imposes. Targets are addressed statically, with the namespace
/// known at render time. The third stanza's two-space echo indent (against
/// four spaces in the first two) is what the chart ships; it is kept as-is
/// so the generated text stays interchangeable with the embedded script.
pub fn service_readiness_script(
    namespace: &str,
    release: &str,
    api_port: u16,
    els_port: u16,
    das_port: u16,
) -> String {
    let mut script = String::from("\n");
    script.push_str(&wait_stanza(
        &format!("{release}-{COMPONENT_API}.{namespace}.{CLUSTER_DNS_SUFFIX}"),
        api_port,
        "API",
        "    ",
    ));
    script.push('\n');
    script.push('\n');
    script.push_str(&wait_stanza(
        &format!("{release}-{COMPONENT_ELS}.{namespace}.{CLUSTER_DNS_SUFFIX}"),
        els_port,
        "Evaluation Server",
        "    ",
    ));
    script.push('\n');
    script.push('\n');
    script.push_str(&wait_stanza(
        &format!("{release}-{COMPONENT_DAS}.{namespace}.{CLUSTER_DNS_SUFFIX}"),
        das_port,
        "DA Server",
        "  ",
    ));
    script
}

/// Script waiting on the backing stores (Redis, MongoDB) before a component
/// starts.
///
/// Unlike [`service_readiness_script`], the hosts resolve their namespace at
/// container start from the service account mount: this script runs inside
/// the cluster, where the namespace is not known at render time. The
/// `namespace` argument mirrors the other builder's signature and does not
/// appear in the output; callers still pass the scenario namespace.
pub fn infra_readiness_script(_namespace: &str, release: &str, full_name: &str) -> String {
    let mut script = String::from("\n");
    script.push_str(&wait_stanza(
        &format!(
            "\"{release}-{full_name}-redis-master.{RUNTIME_NAMESPACE_LOOKUP}.{CLUSTER_DNS_SUFFIX}\""
        ),
        REDIS_PORT,
        "Redis",
        "    ",
    ));
    script.push('\n');
    script.push('\n');
    script.push_str(&wait_stanza(
        &format!(
            "\"{release}-{full_name}-mongodb.{RUNTIME_NAMESPACE_LOOKUP}.{CLUSTER_DNS_SUFFIX}\""
        ),
        MONGODB_PORT,
        "Mongodb",
        "    ",
    ));
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_script_is_deterministic() {
        let a = service_readiness_script("ns1", "rel1", 5000, 5100, 8200);
        let b = service_readiness_script("ns1", "rel1", 5000, 5100, 8200);
        assert_eq!(a, b);
    }

    #[test]
    fn infra_script_is_deterministic() {
        let a = infra_readiness_script("ns1", "rel1", "full1");
        let b = infra_readiness_script("ns1", "rel1", "full1");
        assert_eq!(a, b);
    }

    #[test]
    fn malformed_identifiers_flow_through_verbatim() {
        let script = service_readiness_script("Not A Namespace!", "rel", 1, 2, 3);
        assert!(script.contains("rel-api.Not A Namespace!.svc.cluster.local 1"));
    }
}
