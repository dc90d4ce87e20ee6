//! Route matching subsystem.
//!
//! # Design Decisions
//! - Wildcard patterns use a greedy segment scan, not a regex engine
//! - Host matching is case-insensitive (per HTTP spec)
//! - Path matching is case-sensitive
//! - Empty condition = always matches (wildcard)

pub mod glob;
pub mod matcher;

pub use matcher::{destination_matcher, Matcher, RouteRequest};
