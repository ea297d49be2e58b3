//! Routing error definitions.

use thiserror::Error;

use crate::routing::method::AllowedMethods;

/// Errors returned while resolving a request.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// No tree path exists for the requested URI.
    #[error("no route matches the requested path")]
    NotFound { path: String },

    /// The path resolved but the requested method is not registered on it.
    #[error("method not allowed, allowed methods: {allowed}")]
    MethodNotAllowed { allowed: AllowedMethods },

    /// A placeholder has no usable constraint. This is a route definition bug.
    #[error("placeholder {param} has no registered constraint")]
    MisconfiguredConstraint { param: String },
}

impl RoutingError {
    /// HTTP status code the surrounding server should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            RoutingError::NotFound { .. } => 404,
            RoutingError::MethodNotAllowed { .. } => 405,
            RoutingError::MisconfiguredConstraint { .. } => 500,
        }
    }
}

/// Errors returned while registering routes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    /// The method is not one of the canonical verbs or `ANY`.
    #[error("unknown HTTP method: {0}")]
    InvalidMethod(String),

    /// The router was loaded from a cache and no longer accepts routes.
    #[error("router was loaded from a cache and cannot accept new routes")]
    RegistrationClosed,
}

/// Result type for registration calls.
pub type RouteResult<T> = Result<T, RouteError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::method::Method;

    #[test]
    fn test_error_display() {
        let err = RoutingError::MethodNotAllowed {
            allowed: AllowedMethods::new(vec![Method::Get, Method::Post]),
        };
        assert_eq!(err.to_string(), "method not allowed, allowed methods: GET, POST");
        assert_eq!(err.status_code(), 405);

        let err = RoutingError::MisconfiguredConstraint { param: "id".into() };
        assert!(err.to_string().contains("id"));
        assert_eq!(err.status_code(), 500);

        let err = RouteError::InvalidMethod("BREW".into());
        assert_eq!(err.to_string(), "unknown HTTP method: BREW");
    }
}
