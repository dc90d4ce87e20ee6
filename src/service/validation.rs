//! Service definition validation.
//!
//! # Responsibilities
//! - Gate a reconfigure request before any engine invocation
//! - Classify rejections so callers can report them appropriately
//!
//! # Design Decisions
//! - Only the first destination is consulted for the completeness rule;
//!   additional destinations pass through unchecked (documented contract)
//! - Rejection messages are fixed text relied on by existing callers

use thiserror::Error;

use crate::service::spec::{ServiceDestination, ServiceSpec};

/// How a rejected definition should be reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A mandatory field is missing.
    BadRequest,
    /// The definition conflicts with its declared request mode.
    Conflict,
}

/// Why a service definition was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("serviceName parameter is mandatory.")]
    MissingServiceName,

    #[error("When using reqMode http, servicePath or serviceDomain are mandatory")]
    HttpDestinationIncomplete,

    #[error("When NOT using reqMode http (e.g. tcp), srcPort and port parameters are mandatory.")]
    TcpDestinationIncomplete,
}

impl ValidationError {
    /// The classification callers use to shape their response.
    pub fn rejection(&self) -> Rejection {
        match self {
            ValidationError::MissingServiceName | ValidationError::TcpDestinationIncomplete => {
                Rejection::BadRequest
            }
            ValidationError::HttpDestinationIncomplete => Rejection::Conflict,
        }
    }
}

/// Validate a service definition before any engine invocation.
///
/// An empty destination list is treated as a single destination with every
/// field unset, so it falls through the same rule ladder instead of being a
/// separate case.
pub fn validate(spec: &ServiceSpec) -> Result<(), ValidationError> {
    if spec.service_name.is_empty() {
        return Err(ValidationError::MissingServiceName);
    }

    let unset = ServiceDestination::default();
    let first = spec.service_dest.first().unwrap_or(&unset);

    if first.is_http() {
        let has_path = first.service_path.as_deref().is_some_and(|p| !p.is_empty());
        let has_domain = first.service_domain.as_deref().is_some_and(|d| !d.is_empty());
        if !has_path && !has_domain {
            return Err(ValidationError::HttpDestinationIncomplete);
        }
    } else {
        let has_src_port = first.src_port.is_some_and(|p| p > 0);
        let has_port = first.port.as_deref().is_some_and(|p| !p.is_empty());
        if !has_src_port || !has_port {
            return Err(ValidationError::TcpDestinationIncomplete);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, dest: ServiceDestination) -> ServiceSpec {
        ServiceSpec {
            service_name: name.to_string(),
            service_dest: vec![dest],
        }
    }

    #[test]
    fn test_missing_name_is_bad_request() {
        let err = validate(&spec("", ServiceDestination::default())).unwrap_err();
        assert_eq!(err, ValidationError::MissingServiceName);
        assert_eq!(err.rejection(), Rejection::BadRequest);
        assert_eq!(err.to_string(), "serviceName parameter is mandatory.");
    }

    #[test]
    fn test_http_without_path_or_domain_is_conflict() {
        let err = validate(&spec("web", ServiceDestination::default())).unwrap_err();
        assert_eq!(err, ValidationError::HttpDestinationIncomplete);
        assert_eq!(err.rejection(), Rejection::Conflict);
        assert_eq!(
            err.to_string(),
            "When using reqMode http, servicePath or serviceDomain are mandatory"
        );
    }

    #[test]
    fn test_http_with_only_domain_is_valid() {
        let dest = ServiceDestination {
            service_domain: Some("example.com".to_string()),
            ..Default::default()
        };
        assert!(validate(&spec("web", dest)).is_ok());
    }

    #[test]
    fn test_http_with_only_path_is_valid() {
        let dest = ServiceDestination {
            service_path: Some("/api".to_string()),
            ..Default::default()
        };
        assert!(validate(&spec("web", dest)).is_ok());
    }

    #[test]
    fn test_tcp_requires_both_ports() {
        let base = ServiceDestination {
            req_mode: "tcp".to_string(),
            ..Default::default()
        };

        let err = validate(&spec("db", base.clone())).unwrap_err();
        assert_eq!(err, ValidationError::TcpDestinationIncomplete);
        assert_eq!(err.rejection(), Rejection::BadRequest);
        assert_eq!(
            err.to_string(),
            "When NOT using reqMode http (e.g. tcp), srcPort and port parameters are mandatory."
        );

        let missing_port = ServiceDestination {
            src_port: Some(5432),
            ..base.clone()
        };
        assert!(validate(&spec("db", missing_port)).is_err());

        let missing_src_port = ServiceDestination {
            port: Some("5432".to_string()),
            ..base.clone()
        };
        assert!(validate(&spec("db", missing_src_port)).is_err());

        let complete = ServiceDestination {
            src_port: Some(5432),
            port: Some("5432".to_string()),
            ..base
        };
        assert!(validate(&spec("db", complete)).is_ok());
    }

    #[test]
    fn test_mode_comparison_ignores_case() {
        let dest = ServiceDestination {
            req_mode: "HTTP".to_string(),
            service_domain: Some("example.com".to_string()),
            ..Default::default()
        };
        assert!(validate(&spec("web", dest)).is_ok());
    }

    #[test]
    fn test_empty_destination_list_rejected_not_panicking() {
        let spec = ServiceSpec {
            service_name: "web".to_string(),
            service_dest: Vec::new(),
        };
        assert_eq!(
            validate(&spec).unwrap_err(),
            ValidationError::HttpDestinationIncomplete
        );
    }

    #[test]
    fn test_only_first_destination_is_consulted() {
        // The second destination is incomplete for its mode, but the
        // completeness rule only looks at the first entry.
        let spec = ServiceSpec {
            service_name: "web".to_string(),
            service_dest: vec![
                ServiceDestination {
                    service_path: Some("/api".to_string()),
                    ..Default::default()
                },
                ServiceDestination {
                    req_mode: "tcp".to_string(),
                    ..Default::default()
                },
            ],
        };
        assert!(validate(&spec).is_ok());
    }
}
