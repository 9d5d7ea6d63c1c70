//! The static route table and request lifecycle driver
//!
//! The table is assembled once at process start and never mutated; lookups
//! are pure reads, safe to share across requests behind an `Arc`.
//!
//! Lookup precedence: routes whose shape matches the path are considered
//! first; among those, routes with the right method; a capture that fails
//! its typed parse reports `ParamTypeMismatch` rather than falling through
//! to not-found.

use super::pattern::{PathParams, RoutePattern, split_path};
use crate::core::error::RouteError;
use crate::core::response::{ApiResponse, Outcome, ResponseBuilder};
use axum::http::Method;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Per-request data handed to a matched handler
#[derive(Debug)]
pub struct RequestContext {
    pub params: PathParams,
    pub body: Vec<u8>,
}

/// A bound request handler: parse, validate, and produce an outcome.
/// Handlers are synchronous, CPU-bound, and free of shared mutable state.
pub type Handler = Arc<dyn Fn(&RequestContext) -> Outcome + Send + Sync>;

/// One entry of the route table
pub struct Route {
    pub method: Method,
    pub pattern: RoutePattern,
    pub handler: Handler,
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("handler", &"<handler>")
            .finish()
    }
}

/// The immutable method + path pattern → handler table
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder { routes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Select the route for a method + path
    ///
    /// Distinguishes the three failure modes precisely:
    /// `NotFound` when no pattern matches the path shape,
    /// `MethodNotAllowed` when a pattern matches the shape but not the
    /// method, and `ParamTypeMismatch` when a segment matches positionally
    /// but fails its typed parse.
    pub fn lookup(&self, method: &Method, path: &str) -> Result<(&Route, PathParams), RouteError> {
        let parts = split_path(path);
        let mut shape_matched = false;
        let mut allowed: Vec<Method> = Vec::new();
        let mut mismatch: Option<RouteError> = None;

        for route in &self.routes {
            if !route.pattern.shape_matches(&parts) {
                continue;
            }
            shape_matched = true;
            if route.method != *method {
                if !allowed.contains(&route.method) {
                    allowed.push(route.method.clone());
                }
                continue;
            }
            match route.pattern.captures(&parts) {
                Ok(params) => return Ok((route, params)),
                Err(e) => {
                    mismatch.get_or_insert(e);
                }
            }
        }

        if let Some(e) = mismatch {
            return Err(e);
        }
        if shape_matched && !allowed.is_empty() {
            return Err(RouteError::MethodNotAllowed {
                path: path.to_string(),
                allowed,
            });
        }
        Err(RouteError::NotFound {
            path: path.to_string(),
        })
    }

    /// Drive one request through lookup → handler → response
    ///
    /// A fault escaping the handler is caught here and reported as a
    /// generic 500; the core never propagates an uncaught fault to its
    /// host.
    pub fn dispatch(&self, method: &Method, path: &str, body: &[u8]) -> ApiResponse {
        let (route, params) = match self.lookup(method, path) {
            Ok(hit) => hit,
            Err(e) => {
                tracing::debug!(%method, path, error = %e, "route selection failed");
                return ResponseBuilder::route_error(&e);
            }
        };

        let ctx = RequestContext {
            params,
            body: body.to_vec(),
        };
        let handler = Arc::clone(&route.handler);
        match panic::catch_unwind(AssertUnwindSafe(move || handler(&ctx))) {
            Ok(outcome) => ResponseBuilder::respond(outcome),
            Err(_) => {
                tracing::error!(%method, path, "handler panicked");
                ResponseBuilder::internal()
            }
        }
    }
}

/// Consuming builder for the route table
pub struct RouteTableBuilder {
    routes: Vec<Route>,
}

impl RouteTableBuilder {
    /// Register a route
    pub fn route(mut self, method: Method, pattern: &'static str, handler: Handler) -> Self {
        self.routes.push(Route {
            method,
            pattern: RoutePattern::parse(pattern),
            handler,
        });
        self
    }

    pub fn build(self) -> RouteTable {
        RouteTable {
            routes: self.routes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    fn ok_handler(message: &'static str) -> Handler {
        Arc::new(move |_ctx| Outcome::Success {
            message: message.to_string(),
            resource: None,
        })
    }

    fn echo_id_handler() -> Handler {
        Arc::new(|ctx| Outcome::Success {
            message: format!("id={}", ctx.params.int("id").unwrap_or(-1)),
            resource: None,
        })
    }

    fn table() -> RouteTable {
        RouteTable::builder()
            .route(Method::POST, "/customers", ok_handler("created"))
            .route(Method::GET, "/customers", ok_handler("listed"))
            .route(Method::PUT, "/customers/{id:int}", echo_id_handler())
            .route(Method::GET, "/customers/{id:int}", echo_id_handler())
            .route(Method::POST, "/customers-alt", ok_handler("alt created"))
            .build()
    }

    #[test]
    fn test_lookup_matches_method_and_path() {
        let table = table();
        let (route, _) = table.lookup(&Method::POST, "/customers").unwrap();
        assert_eq!(route.method, Method::POST);
    }

    #[test]
    fn test_lookup_extracts_typed_params() {
        let table = table();
        let (_, params) = table.lookup(&Method::PUT, "/customers/9").unwrap();
        assert_eq!(params.int("id"), Some(9));
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let table = table();
        let err = table.lookup(&Method::GET, "/unknown").unwrap_err();
        assert!(matches!(err, RouteError::NotFound { .. }));
    }

    #[test]
    fn test_wrong_method_is_method_not_allowed() {
        let table = table();
        let err = table.lookup(&Method::PATCH, "/customers").unwrap_err();
        let RouteError::MethodNotAllowed { allowed, .. } = err else {
            panic!("expected MethodNotAllowed");
        };
        assert_eq!(allowed, vec![Method::POST, Method::GET]);
    }

    #[test]
    fn test_bad_param_is_type_mismatch_not_not_found() {
        let table = table();
        let err = table.lookup(&Method::PUT, "/customers/abc").unwrap_err();
        assert!(matches!(err, RouteError::ParamTypeMismatch { .. }));
    }

    #[test]
    fn test_alt_prefix_is_an_independent_route() {
        let table = table();
        let (route, _) = table.lookup(&Method::POST, "/customers-alt").unwrap();
        assert_eq!(route.pattern, RoutePattern::parse("/customers-alt"));
        // The alt prefix registers no PUT route in this table
        let err = table.lookup(&Method::PUT, "/customers-alt").unwrap_err();
        assert!(matches!(err, RouteError::MethodNotAllowed { .. }));
    }

    #[test]
    fn test_dispatch_success_builds_envelope() {
        let table = table();
        let response = table.dispatch(&Method::PUT, "/customers/5", b"");
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({ "message": "id=5" }));
    }

    #[test]
    fn test_dispatch_maps_route_errors_to_statuses() {
        let table = table();
        assert_eq!(
            table.dispatch(&Method::GET, "/unknown", b"").status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            table.dispatch(&Method::PATCH, "/customers", b"").status,
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            table.dispatch(&Method::PUT, "/customers/abc", b"").status,
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_dispatch_catches_handler_panic() {
        let table = RouteTable::builder()
            .route(
                Method::GET,
                "/boom",
                Arc::new(|_ctx| panic!("handler exploded")),
            )
            .build();
        let response = table.dispatch(&Method::GET, "/boom", b"");
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body, json!({ "error": "Internal server error." }));
    }
}
