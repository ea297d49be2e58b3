//! Reverse routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     add_route(.., name) → registry.rs (name → pattern + constraints)
//!
//! Generation:
//!     generate(name, params)
//!     → registry.rs lookup
//!     → generator.rs (validate, substitute, strip, normalize)
//!     → "/users/42"
//! ```
//!
//! # Design Decisions
//! - Supplied values are validated by the same constraints the matcher uses
//! - Values are rendered in canonical form, not echoed verbatim
//! - Unused optional placeholders disappear; unused required ones are errors

pub mod generator;
pub mod registry;

use thiserror::Error;

pub use generator::generate;
pub use registry::{NamedRoute, NamedRoutes};

/// Errors that can occur while generating a URL.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    /// No route was registered under the name.
    #[error("no route named {0}")]
    RouteNotFound(String),

    /// A required placeholder received no value.
    #[error("missing parameter {param} for route {route}")]
    MissingParameter { route: String, param: String },

    /// A supplied value was rejected by the placeholder's constraint.
    #[error("parameter {param} for route {route} violates its constraint")]
    ConstraintViolation { route: String, param: String },
}

/// Result type for URL generation.
pub type UrlResult<T> = Result<T, UrlError>;
