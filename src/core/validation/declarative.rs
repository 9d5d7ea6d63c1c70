//! Declarative validation strategy
//!
//! A fixed table of per-field constraints bound to a shape. Every constraint
//! on a field is evaluated — failure of one does not suppress the others —
//! so a single field can carry several messages. Evaluation order follows
//! the table's declaration order.

use super::constraints::Constraint;
use super::result::{ValidationResult, ViolationLog};
use super::ValidationStrategy;
use crate::core::shape::Shape;
use serde_json::Value;
use std::marker::PhantomData;

/// Static per-field constraint table for payloads of type `T`
pub struct DeclarativeValidator<T: Shape> {
    table: Vec<(&'static str, Vec<Constraint>)>,
    _shape: PhantomData<fn(T)>,
}

impl<T: Shape> DeclarativeValidator<T> {
    pub fn new() -> Self {
        Self {
            table: Vec::new(),
            _shape: PhantomData,
        }
    }

    /// Bind a list of constraints to a field, identified by its wire name
    ///
    /// Entries are evaluated in the order they are declared here.
    pub fn field(mut self, wire: &'static str, constraints: Vec<Constraint>) -> Self {
        self.table.push((wire, constraints));
        self
    }

    fn label_for(wire: &str) -> &'static str {
        T::FIELDS
            .iter()
            .find(|f| f.wire == wire)
            .map(|f| f.label)
            .unwrap_or("")
    }
}

impl<T: Shape> Default for DeclarativeValidator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Shape> ValidationStrategy<T> for DeclarativeValidator<T> {
    fn validate(&self, value: &T) -> ValidationResult {
        let mut log = ViolationLog::new();

        let json = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                log.push("", format!("Payload could not be inspected: {}", e));
                return log.into_result();
            }
        };

        for (wire, constraints) in &self.table {
            let label = Self::label_for(wire);
            let field_value = json.get(*wire).cloned().unwrap_or(Value::Null);
            for constraint in constraints {
                if let Err(message) = constraint(label, &field_value) {
                    log.push(label, message);
                }
            }
        }

        log.into_result()
    }
}
