//! Route matching logic.
//!
//! # Responsibilities
//! - Match host header against a domain pattern (case-insensitive)
//! - Match request path against a path pattern (case-sensitive)
//! - Combine conditions with AND semantics

use crate::routing::glob;
use crate::service::spec::ServiceDestination;

/// The request attributes a routing rule is matched against.
#[derive(Debug, Clone, Copy)]
pub struct RouteRequest<'a> {
    pub host: &'a str,
    pub path: &'a str,
}

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, req: &RouteRequest<'_>) -> bool;
}

/// Matches the request host against a domain pattern.
#[derive(Debug, Clone)]
pub struct DomainMatcher {
    pattern: String,
}

impl DomainMatcher {
    /// Create a new domain matcher.
    /// The pattern is normalized to lowercase for case-insensitive matching.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into().to_lowercase(),
        }
    }
}

impl Matcher for DomainMatcher {
    fn matches(&self, req: &RouteRequest<'_>) -> bool {
        glob::matches(&self.pattern, &req.host.to_lowercase())
    }
}

/// Matches the request path against a path pattern.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    pattern: String,
}

impl PathMatcher {
    /// Create a new path matcher.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl Matcher for PathMatcher {
    fn matches(&self, req: &RouteRequest<'_>) -> bool {
        glob::matches(&self.pattern, req.path)
    }
}

/// Combines multiple matchers with AND semantics.
///
/// An empty condition list always matches, so a destination without path or
/// domain constraints acts as a catch-all.
#[derive(Debug)]
pub struct AndMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AndMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AndMatcher {
    fn matches(&self, req: &RouteRequest<'_>) -> bool {
        self.matchers.iter().all(|m| m.matches(req))
    }
}

/// Build the matcher for one destination rule from its optional conditions.
pub fn destination_matcher(dest: &ServiceDestination) -> AndMatcher {
    let mut matchers: Vec<Box<dyn Matcher>> = Vec::new();
    if let Some(domain) = dest.service_domain.as_deref().filter(|d| !d.is_empty()) {
        matchers.push(Box::new(DomainMatcher::new(domain)));
    }
    if let Some(path) = dest.service_path.as_deref().filter(|p| !p.is_empty()) {
        matchers.push(Box::new(PathMatcher::new(path)));
    }
    AndMatcher::new(matchers)
}
