//! Typed error handling for the request pipeline
//!
//! The taxonomy mirrors the three ways a request can fail before its
//! handler runs:
//!
//! - [`ParseError`]: the body could not be decoded into a shape
//! - [`RouteError`]: no handler could be selected for the method + path
//! - [`ApiError`]: top-level wrapper, including internal faults
//!
//! Parse and validation failures are expected and recoverable; they are
//! always translated into a structured 400 response. Internal faults map to
//! a generic 500 with no detail leaked.

use axum::http::{Method, StatusCode};
use std::fmt;
use thiserror::Error;

/// Errors raised while decoding a request body into a typed shape
///
/// Decoding is atomic: on error, no partially-populated shape exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The body was absent, blank, or decoded to nothing
    #[error("Request body is empty.")]
    EmptyBody,

    /// The body could not be decoded as a JSON object of the expected shape
    #[error("Request body is not valid JSON: {0}")]
    InvalidSyntax(String),
}

/// Errors raised while selecting a route for an inbound request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No registered pattern matches the path at all
    #[error("No route matches '{path}'")]
    NotFound { path: String },

    /// A pattern matches the path shape, but not with this method
    #[error("Method not allowed for '{path}'")]
    MethodNotAllowed { path: String, allowed: Vec<Method> },

    /// A path segment matched positionally but failed to parse as its
    /// declared type (e.g. a non-numeric id)
    #[error("Path segment '{segment}' expects an integer, got '{value}'")]
    ParamTypeMismatch { segment: String, value: String },
}

/// The top-level error type for the billing API
///
/// Each variant carries a more specific error for that category. Handlers
/// never let a fault escape uncaught; anything unexpected becomes
/// [`ApiError::Internal`].
#[derive(Debug)]
pub enum ApiError {
    /// Request body decoding errors
    Parse(ParseError),

    /// Route selection errors
    Route(RouteError),

    /// Internal faults (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Parse(e) => write!(f, "{}", e),
            ApiError::Route(e) => write!(f, "{}", e),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Parse(e) => Some(e),
            ApiError::Route(e) => Some(e),
            ApiError::Internal(_) => None,
        }
    }
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Parse(_) => StatusCode::BAD_REQUEST,
            ApiError::Route(e) => e.status_code(),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Parse(ParseError::EmptyBody) => "EMPTY_BODY",
            ApiError::Parse(ParseError::InvalidSyntax(_)) => "INVALID_SYNTAX",
            ApiError::Route(e) => e.error_code(),
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl RouteError {
    /// Get the HTTP status code for this route error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RouteError::NotFound { .. } => StatusCode::NOT_FOUND,
            RouteError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            RouteError::ParamTypeMismatch { .. } => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this route error
    pub fn error_code(&self) -> &'static str {
        match self {
            RouteError::NotFound { .. } => "ROUTE_NOT_FOUND",
            RouteError::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
            RouteError::ParamTypeMismatch { .. } => "PARAM_TYPE_MISMATCH",
        }
    }
}

impl From<ParseError> for ApiError {
    fn from(e: ParseError) -> Self {
        ApiError::Parse(e)
    }
}

impl From<RouteError> for ApiError {
    fn from(e: RouteError) -> Self {
        ApiError::Route(e)
    }
}
