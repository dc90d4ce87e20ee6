//! Candidate configuration rendering.
//!
//! # Responsibilities
//! - Turn a validated service definition into the engine configuration file
//!   the check and reload invocations run against
//!
//! # Design Decisions
//! - The orchestrator depends on the [`ConfigRenderer`] trait only; the
//!   template-backed implementation is one choice of collaborator
//! - The rendered file is written to a temp path and renamed into place, so
//!   the engine never sees a half-written config
//! - Skeleton markers ({{EXTRA_GLOBAL}}, {{EXTRA_FRONTEND}}, {{SERVICES}})
//!   are resolved through the secret/env resolver, which is how operators
//!   inject site-specific lines without a controller rebuild

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::config::resolver::Resolver;
use crate::service::spec::{ServiceDestination, ServiceSpec};

/// Capability to produce the candidate configuration for a service.
pub trait ConfigRenderer: Send + Sync {
    /// Render the configuration and return the path the engine should load.
    fn render(&self, spec: &ServiceSpec) -> io::Result<PathBuf>;
}

/// Renders the engine configuration from a skeleton template plus one
/// routing block per destination.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    template_path: PathBuf,
    output_path: PathBuf,
    resolver: Resolver,
}

impl TemplateRenderer {
    pub fn new(template_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
            output_path: output_path.into(),
            resolver: Resolver::default(),
        }
    }

    /// Use a non-default resolver (tests point this at a temp secrets dir).
    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    fn frontend_rules(spec: &ServiceSpec) -> String {
        let mut rules = String::new();
        for (i, dest) in spec.service_dest.iter().enumerate() {
            if !dest.is_http() {
                continue;
            }
            let acl_base = format!("{}{}", sanitize(&spec.service_name), i);
            let backend = backend_name(&spec.service_name, i);
            let mut conditions = Vec::new();

            if let Some(path) = dest.service_path.as_deref().filter(|p| !p.is_empty()) {
                rules.push_str(&format!("    acl url_{} path_beg {}\n", acl_base, path));
                conditions.push(format!("url_{}", acl_base));
            }
            if let Some(domain) = dest.service_domain.as_deref().filter(|d| !d.is_empty()) {
                rules.push_str(&format!("    acl domain_{} hdr(host) -i {}\n", acl_base, domain));
                conditions.push(format!("domain_{}", acl_base));
            }
            if !conditions.is_empty() {
                rules.push_str(&format!(
                    "    use_backend {} if {}\n",
                    backend,
                    conditions.join(" ")
                ));
            }
        }
        rules
    }

    fn backend_blocks(spec: &ServiceSpec) -> String {
        let mut blocks = String::new();
        for (i, dest) in spec.service_dest.iter().enumerate() {
            let backend = backend_name(&spec.service_name, i);
            let port = dest.port.as_deref().unwrap_or("80");

            if dest.is_http() {
                blocks.push_str(&format!(
                    "\nbackend {}\n    mode http\n    server {} {}:{}\n",
                    backend, spec.service_name, spec.service_name, port
                ));
            } else if let Some(src_port) = dest.src_port {
                blocks.push_str(&format!(
                    "\nlisten tcp_{}_{}\n    bind *:{}\n    mode tcp\n    server {} {}:{}\n",
                    sanitize(&spec.service_name),
                    src_port,
                    src_port,
                    spec.service_name,
                    spec.service_name,
                    port
                ));
            }
        }
        blocks
    }
}

impl ConfigRenderer for TemplateRenderer {
    fn render(&self, spec: &ServiceSpec) -> io::Result<PathBuf> {
        let skeleton = fs::read_to_string(&self.template_path)?;

        let mut rendered = skeleton
            .replace(
                "{{EXTRA_GLOBAL}}",
                &self.resolver.secret_or_env_split("EXTRA_GLOBAL", ""),
            )
            .replace(
                "{{EXTRA_FRONTEND}}",
                &self.resolver.secret_or_env_split("EXTRA_FRONTEND", ""),
            );

        let frontend_rules = Self::frontend_rules(spec);
        if rendered.contains("{{SERVICES}}") {
            rendered = rendered.replace("{{SERVICES}}", &frontend_rules);
        } else {
            rendered.push('\n');
            rendered.push_str(&frontend_rules);
        }
        rendered.push_str(&Self::backend_blocks(spec));

        // Temp-write then rename keeps the swap atomic on the same filesystem.
        let tmp_path = self.output_path.with_extension("tmp");
        fs::write(&tmp_path, &rendered)?;
        fs::rename(&tmp_path, &self.output_path)?;

        tracing::debug!(
            service = %spec.service_name,
            path = %self.output_path.display(),
            "Rendered candidate configuration"
        );
        Ok(self.output_path.clone())
    }
}

fn backend_name(service_name: &str, index: usize) -> String {
    format!("{}-be{}", service_name, index)
}

/// Collapse every run of non-alphanumeric characters into one underscore,
/// producing identifiers the engine config syntax accepts.
fn sanitize(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_separator = false;
    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            in_separator = false;
        } else if !in_separator {
            out.push('_');
            in_separator = true;
        }
    }
    out
}
