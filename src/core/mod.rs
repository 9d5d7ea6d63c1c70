//! Core module containing the transport-independent request pipeline
//!
//! Everything in here is synchronous and free of shared mutable state:
//! parsing, validation, and response building are pure functions of the
//! request data and the fixed rule definitions.

pub mod error;
pub mod parse;
pub mod response;
pub mod shape;
pub mod validation;

pub use error::{ApiError, ParseError, RouteError};
pub use parse::parse_body;
pub use response::{ApiResponse, Outcome, ResponseBuilder};
pub use shape::{Field, Shape};
pub use validation::{ValidationResult, ValidationStrategy, ViolationLog};
