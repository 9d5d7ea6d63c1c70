//! Response building
//!
//! Maps a handler outcome to a status code and response envelope:
//!
//! - success → 200 `{"message": ..., "<resource>": <echoed value>}`
//! - validation failure → 400 `{"errors": {field: [message, ...]}}`
//! - parse failure → 400 `{"error": string}`
//! - lookup miss → 404; route errors → 404/405/400
//! - internal fault → 500 with no detail leaked

use super::error::{ParseError, RouteError};
use super::validation::ValidationResult;
use axum::http::StatusCode;
use serde_json::{Value, json};

/// Terminal result of running a matched handler
#[derive(Debug)]
pub enum Outcome {
    /// Validation passed; echo the validated value under its resource key
    Success {
        message: String,
        resource: Option<(&'static str, Value)>,
    },

    /// Validation produced a non-empty error map
    Invalid(ValidationResult),

    /// The body could not be decoded
    ParseFailed(ParseError),

    /// Lookup-by-id miss (no persistence layer backs this service)
    NotFound { resource: &'static str, id: i64 },

    /// Unexpected fault inside the handler; detail is logged, never leaked
    Fault(String),
}

/// A transport-agnostic response: status, JSON body, and an optional
/// `Allow` header value for 405 replies
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
    pub allow: Option<String>,
}

impl ApiResponse {
    fn new(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body,
            allow: None,
        }
    }
}

/// Maps outcomes and route errors to the response envelope
pub struct ResponseBuilder;

impl ResponseBuilder {
    /// Build the response for a handler outcome
    pub fn respond(outcome: Outcome) -> ApiResponse {
        match outcome {
            Outcome::Success { message, resource } => {
                let mut body = json!({ "message": message });
                if let (Some((key, value)), Some(map)) = (resource, body.as_object_mut()) {
                    map.insert(key.to_string(), value);
                }
                ApiResponse::new(StatusCode::OK, body)
            }
            Outcome::Invalid(result) => ApiResponse::new(
                StatusCode::BAD_REQUEST,
                json!({ "errors": result.errors }),
            ),
            Outcome::ParseFailed(e) => {
                ApiResponse::new(StatusCode::BAD_REQUEST, json!({ "error": e.to_string() }))
            }
            Outcome::NotFound { resource, id } => ApiResponse::new(
                StatusCode::NOT_FOUND,
                json!({ "error": format!("{} with id '{}' not found", resource, id) }),
            ),
            Outcome::Fault(detail) => {
                tracing::error!(detail, "handler fault");
                Self::internal()
            }
        }
    }

    /// Build the response for a route selection failure
    pub fn route_error(err: &RouteError) -> ApiResponse {
        let mut response = ApiResponse::new(err.status_code(), json!({ "error": err.to_string() }));
        if let RouteError::MethodNotAllowed { allowed, .. } = err {
            let methods: Vec<&str> = allowed.iter().map(|m| m.as_str()).collect();
            response.allow = Some(methods.join(", "));
        }
        response
    }

    /// Build the generic 500 response for an uncaught fault
    pub fn internal() -> ApiResponse {
        ApiResponse::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": "Internal server error." }),
        )
    }
}
