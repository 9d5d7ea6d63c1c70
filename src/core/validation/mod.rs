//! Validation system
//!
//! Two interchangeable strategies converge on one output contract:
//!
//! - [`DeclarativeValidator`]: a static table of per-field constraints,
//!   evaluated uniformly in declaration order
//! - [`CompositionValidator`]: explicit per-field rule chains with
//!   conditionals, cross-field rules, and named rule sets
//!
//! Both produce a [`ValidationResult`] whose `errors` map preserves
//! first-seen field order and per-field message order. Strategies are pure
//! functions of the value and their fixed rule definitions, safe to share
//! across requests without synchronization.

pub mod composition;
pub mod constraints;
pub mod declarative;
pub mod result;

pub use composition::CompositionValidator;
pub use declarative::DeclarativeValidator;
pub use result::{ValidationResult, ViolationLog};

/// A validation strategy for payloads of type `T`
///
/// Implementations must be side-effect-free: `validate` called twice on
/// identical input yields identical results.
pub trait ValidationStrategy<T>: Send + Sync {
    fn validate(&self, value: &T) -> ValidationResult;
}
