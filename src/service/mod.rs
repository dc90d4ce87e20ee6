//! Service definitions submitted for reconfiguration.

pub mod spec;
pub mod validation;

pub use spec::{ServiceDestination, ServiceSpec};
pub use validation::{validate, Rejection, ValidationError};
