//! Validation outcome and violation aggregation
//!
//! Raw `(field, message)` violations accumulate in evaluation order in a
//! [`ViolationLog`] scoped to one validation call, then fold into the
//! [`ValidationResult`] error map. The aggregator never drops or reorders
//! entries: field order is first-seen order, message order within a field is
//! rule-evaluation order.

use indexmap::IndexMap;
use serde::Serialize;

/// Outcome of one validation call
///
/// The empty string is the object-level field key. Map emptiness is the
/// authoritative success signal; `is_valid` can never be `true` alongside a
/// non-empty map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: IndexMap<String, Vec<String>>,
}

impl ValidationResult {
    /// A result with no violations
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: IndexMap::new(),
        }
    }

    /// Whether validation passed, judged from the error map alone
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Ordered accumulator for rule violations, local to one validation call
#[derive(Debug, Default)]
pub struct ViolationLog {
    entries: Vec<(String, String)>,
}

impl ViolationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one violation in evaluation order
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.entries.push((field.into(), message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Group the raw violations into the final error map
    pub fn into_result(self) -> ValidationResult {
        let mut errors: IndexMap<String, Vec<String>> = IndexMap::new();
        for (field, message) in self.entries {
            errors.entry(field).or_default().push(message);
        }
        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}
