//! HTTP route resolution and reverse URL generation.
//!
//! Routes are registered with a method set, a path pattern and an action.
//! Patterns are folded into a prefix tree that resolves a request to its
//! action and typed parameters, and named routes can be turned back into
//! URLs. A built tree can be dumped to a JSON cache and loaded later.

// Core subsystems
pub mod cache;
pub mod constraints;
pub mod routing;
pub mod urls;

// Outer surfaces
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod observability;

pub use constraints::{Constraint, ConstraintRef, ConstraintSet, Native, TypedValue};
pub use http::HttpServer;
pub use routing::{Method, RouteMatch, RouteOptions, Router, RoutingError};
pub use urls::UrlError;
