//! Response construction.
//!
//! # Responsibilities
//! - Render a resolved match as JSON
//! - Map routing errors to HTTP status codes
//!
//! # Design Decisions
//! - 405 responses carry an `Allow` header listing the registered verbs
//! - Error bodies never echo request values

use std::collections::BTreeMap;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::constraints::Native;
use crate::routing::{RouteMatch, RoutingError};

/// JSON body describing a resolved request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResponse {
    pub pattern: String,
    pub method: String,
    pub action: String,
    pub params: BTreeMap<String, Native>,
}

impl From<&RouteMatch<'_, String>> for MatchResponse {
    fn from(found: &RouteMatch<'_, String>) -> Self {
        Self {
            pattern: found.pattern.to_string(),
            method: found.method.clone(),
            action: found.action.clone(),
            params: found.params.to_native_map(),
        }
    }
}

impl IntoResponse for MatchResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for RoutingError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = match &self {
            // Logged by the matcher; the body stays generic.
            RoutingError::MisconfiguredConstraint { .. } => "internal server error".to_string(),
            other => other.to_string(),
        };

        let mut response = (status, Json(ErrorBody { error: body })).into_response();
        if let RoutingError::MethodNotAllowed { allowed } = &self {
            if let Ok(value) = HeaderValue::from_str(&allowed.header_value()) {
                response.headers_mut().insert(header::ALLOW, value);
            }
        }
        response
    }
}
