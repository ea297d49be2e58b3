//! Router metrics.
//!
//! # Metrics
//! - `router_tree_builds_total` (counter): route trees built
//! - `router_match_total` (counter): match attempts by outcome
//! - `router_url_generation_total` (counter): URL generations by outcome
//!
//! # Design Decisions
//! - Outcome labels are static strings (no per-path cardinality)

use crate::routing::RoutingError;
use crate::urls::UrlError;

/// Record one tree build.
pub fn record_tree_build() {
    ::metrics::counter!("router_tree_builds_total").increment(1);
}

/// Record the outcome of a match call.
pub fn record_match<T>(result: &Result<T, RoutingError>) {
    let outcome = match result {
        Ok(_) => "matched",
        Err(RoutingError::NotFound { .. }) => "not_found",
        Err(RoutingError::MethodNotAllowed { .. }) => "method_not_allowed",
        Err(RoutingError::MisconfiguredConstraint { .. }) => "misconfigured",
    };
    ::metrics::counter!("router_match_total", "outcome" => outcome).increment(1);
}

/// Record the outcome of a URL generation call.
pub fn record_generation<T>(result: &Result<T, UrlError>) {
    let outcome = match result {
        Ok(_) => "generated",
        Err(UrlError::RouteNotFound(_)) => "route_not_found",
        Err(UrlError::MissingParameter { .. }) => "missing_parameter",
        Err(UrlError::ConstraintViolation { .. }) => "constraint_violation",
    };
    ::metrics::counter!("router_url_generation_total", "outcome" => outcome).increment(1);
}
