//! Service routing definitions.
//!
//! These types mirror the wire shape of a reconfigure request (camelCase
//! field names). A spec is built once per request, validated, and then only
//! read.

use serde::{Deserialize, Serialize};

/// A routing intent submitted for reconfiguration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    /// Service identifier, also used to name rendered frontend/backend blocks.
    pub service_name: String,

    /// Destination rules, in order. The first entry drives validation.
    #[serde(default)]
    pub service_dest: Vec<ServiceDestination>,
}

/// One routing rule (path/domain/port/mode) within a service.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceDestination {
    /// Request mode; empty means "http". Compared case-insensitively.
    pub req_mode: String,

    /// Path pattern requests must match to be routed here.
    pub service_path: Option<String>,

    /// Domain pattern requests must match to be routed here.
    pub service_domain: Option<String>,

    /// Listen port on the proxy side (non-http modes).
    pub src_port: Option<u16>,

    /// Port of the destination service.
    pub port: Option<String>,
}

impl ServiceDestination {
    /// Effective request mode, defaulting to "http" when unset.
    pub fn effective_req_mode(&self) -> &str {
        if self.req_mode.is_empty() {
            "http"
        } else {
            &self.req_mode
        }
    }

    /// Whether this destination routes by HTTP semantics.
    pub fn is_http(&self) -> bool {
        self.effective_req_mode().eq_ignore_ascii_case("http")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_req_mode_defaults_to_http() {
        let dest = ServiceDestination::default();
        assert_eq!(dest.effective_req_mode(), "http");
        assert!(dest.is_http());
    }

    #[test]
    fn test_req_mode_case_insensitive() {
        let dest = ServiceDestination {
            req_mode: "HTTP".to_string(),
            ..Default::default()
        };
        assert!(dest.is_http());

        let dest = ServiceDestination {
            req_mode: "tcp".to_string(),
            ..Default::default()
        };
        assert!(!dest.is_http());
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let spec: ServiceSpec = serde_json::from_str(
            r#"{
                "serviceName": "go-demo",
                "serviceDest": [
                    {"reqMode": "http", "servicePath": "/demo", "port": "8080"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(spec.service_name, "go-demo");
        assert_eq!(spec.service_dest[0].service_path.as_deref(), Some("/demo"));
        assert_eq!(spec.service_dest[0].port.as_deref(), Some("8080"));
    }
}
