//! # Billing API
//!
//! A stateless request-validation and dispatch layer for a small CRUD
//! service managing customers, invoices, and telephone numbers.
//!
//! ## Features
//!
//! - **Typed Shapes**: plain serde payload definitions with a canonical
//!   field list per resource
//! - **Dual Validation Strategies**: a declarative per-field constraint
//!   table and a composable rule-chain engine, interchangeable behind one
//!   [`core::validation::ValidationStrategy`] trait
//! - **Ordered Error Contract**: violations aggregate into a field → messages
//!   map that preserves evaluation order
//! - **Deterministic Dispatch**: a static route table with typed path
//!   captures that distinguishes unknown paths, disallowed methods, and
//!   malformed path parameters
//! - **Echo Handlers**: no persistence — handlers validate and echo input
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use billing::prelude::*;
//!
//! let config = ServiceConfig::default_config();
//! let table = Arc::new(build_routes(&config));
//! let app = build_router(table);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod dispatch;
pub mod handlers;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ApiError, ParseError, RouteError},
        parse::parse_body,
        response::{ApiResponse, Outcome, ResponseBuilder},
        shape::{
            CustomerCreateRequest, CustomerUpdateRequest, Field, InvoiceCreateRequest, Shape,
            TelephoneCreateRequest, TelephoneType,
        },
        validation::{
            CompositionValidator, DeclarativeValidator, ValidationResult, ValidationStrategy,
            ViolationLog,
        },
    };

    // === Dispatch ===
    pub use crate::dispatch::{Handler, PathParams, RequestContext, Route, RoutePattern, RouteTable};

    // === Composition root ===
    pub use crate::handlers::build_routes;

    // === Config ===
    pub use crate::config::ServiceConfig;

    // === Server ===
    pub use crate::server::build_router;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use chrono::NaiveDate;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;

    // === Axum ===
    pub use axum::http::{Method, StatusCode};
}
