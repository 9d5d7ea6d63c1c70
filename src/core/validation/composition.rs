//! Composition validation strategy
//!
//! Validation expressed as an explicit ordered chain of rules per field.
//! Rules are predicates over the whole payload, so cross-field checks read
//! sibling fields directly. Supports:
//!
//! - conditional rules gated by a predicate (skipped, not failed, when the
//!   gate is false)
//! - custom predicate rules with custom messages
//! - named rule sets activated in addition to the default chain (the
//!   default chain always runs)

use super::ValidationStrategy;
use super::result::{ValidationResult, ViolationLog};
use std::sync::Arc;

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

struct Rule<T> {
    field: &'static str,
    message: &'static str,
    check: Predicate<T>,
    gate: Option<Predicate<T>>,
}

impl<T> Rule<T> {
    fn evaluate(&self, value: &T, log: &mut ViolationLog) {
        if let Some(gate) = &self.gate {
            if !gate(value) {
                return;
            }
        }
        if !(self.check)(value) {
            log.push(self.field, self.message);
        }
    }
}

/// Ordered rule chains for payloads of type `T`
///
/// Built fluently at composition time and shared read-only afterwards:
///
/// ```rust,ignore
/// let validator = CompositionValidator::new()
///     .must("Name", |c: &CustomerCreateRequest| !c.name.is_empty(), "Name is required.")
///     .when(
///         |c| !c.name.is_empty(),
///         |v| v.must("Name", |c| c.name.len() >= 2, "Name is too short."),
///     );
/// ```
pub struct CompositionValidator<T> {
    default_chain: Vec<Rule<T>>,
    rule_sets: Vec<(&'static str, Vec<Rule<T>>)>,
    active_sets: Vec<&'static str>,
}

impl<T: 'static> CompositionValidator<T> {
    pub fn new() -> Self {
        Self {
            default_chain: Vec::new(),
            rule_sets: Vec::new(),
            active_sets: Vec::new(),
        }
    }

    /// Append a rule: `check` must hold or `message` is reported on `field`
    pub fn must(
        mut self,
        field: &'static str,
        check: impl Fn(&T) -> bool + Send + Sync + 'static,
        message: &'static str,
    ) -> Self {
        self.default_chain.push(Rule {
            field,
            message,
            check: Arc::new(check),
            gate: None,
        });
        self
    }

    /// Append an object-level rule, reported under the empty field key
    pub fn object_must(
        self,
        check: impl Fn(&T) -> bool + Send + Sync + 'static,
        message: &'static str,
    ) -> Self {
        self.must("", check, message)
    }

    /// Gate every rule declared inside `build` on a predicate
    ///
    /// When the gate is false the rules are skipped, not failed. Nested
    /// gates conjoin.
    pub fn when(
        self,
        gate: impl Fn(&T) -> bool + Send + Sync + 'static,
        build: impl FnOnce(Self) -> Self,
    ) -> Self {
        let start = self.default_chain.len();
        let mut built = build(self);
        let gate: Predicate<T> = Arc::new(gate);
        for rule in &mut built.default_chain[start..] {
            rule.gate = Some(match rule.gate.take() {
                Some(inner) => {
                    let outer = gate.clone();
                    Arc::new(move |value: &T| outer(value) && inner(value))
                }
                None => gate.clone(),
            });
        }
        built
    }

    /// Collect the rules declared inside `build` into a named set
    ///
    /// Named sets only run when activated; the default chain always runs.
    pub fn rule_set(self, name: &'static str, build: impl FnOnce(Self) -> Self) -> Self {
        let start = self.default_chain.len();
        let mut built = build(self);
        let rules = built.default_chain.split_off(start);
        built.rule_sets.push((name, rules));
        built
    }

    /// Activate a named rule set in addition to the default chain
    pub fn activate(mut self, name: &'static str) -> Self {
        self.active_sets.push(name);
        self
    }
}

impl<T: 'static> Default for CompositionValidator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ValidationStrategy<T> for CompositionValidator<T> {
    fn validate(&self, value: &T) -> ValidationResult {
        let mut log = ViolationLog::new();

        for rule in &self.default_chain {
            rule.evaluate(value, &mut log);
        }
        for name in &self.active_sets {
            for (set_name, rules) in &self.rule_sets {
                if set_name == name {
                    for rule in rules {
                        rule.evaluate(value, &mut log);
                    }
                }
            }
        }

        log.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shape::InvoiceCreateRequest;
    use chrono::NaiveDate;

    fn invoice(days_until_due: i64) -> InvoiceCreateRequest {
        let issued = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        InvoiceCreateRequest {
            invoice_number: "INV-100".to_string(),
            invoice_date: Some(issued),
            due_date: Some(issued + chrono::Duration::days(days_until_due)),
            customer_id: 1,
            total_amount: 10.0,
        }
    }

    fn due_date_chain() -> CompositionValidator<InvoiceCreateRequest> {
        CompositionValidator::new()
            .must(
                "DueDate",
                |i: &InvoiceCreateRequest| i.due_date.is_some(),
                "DueDate is required.",
            )
            .when(
                |i| i.invoice_date.is_some() && i.due_date.is_some(),
                |v| {
                    v.must(
                        "DueDate",
                        |i| i.due_date > i.invoice_date,
                        "DueDate must be later than InvoiceDate.",
                    )
                },
            )
    }

    #[test]
    fn test_cross_field_rule_passes_when_due_later() {
        let result = due_date_chain().validate(&invoice(30));
        assert!(result.is_valid);
    }

    #[test]
    fn test_cross_field_rule_fails_when_due_same_day() {
        let result = due_date_chain().validate(&invoice(0));
        assert_eq!(
            result.errors["DueDate"],
            vec!["DueDate must be later than InvoiceDate."]
        );
    }

    #[test]
    fn test_gated_rule_is_skipped_not_failed() {
        let mut value = invoice(30);
        value.due_date = None;
        let result = due_date_chain().validate(&value);
        // The ordering rule is skipped; only the presence rule reports
        assert_eq!(result.errors["DueDate"], vec!["DueDate is required."]);
    }

    #[test]
    fn test_rules_report_in_declaration_order() {
        let validator = CompositionValidator::new()
            .must("Number", |_: &InvoiceCreateRequest| false, "first")
            .must("Number", |_| false, "second");
        let result = validator.validate(&invoice(30));
        assert_eq!(result.errors["Number"], vec!["first", "second"]);
    }

    #[test]
    fn test_nested_when_gates_conjoin() {
        let validator: CompositionValidator<InvoiceCreateRequest> = CompositionValidator::new()
            .when(
                |i: &InvoiceCreateRequest| i.customer_id > 0,
                |v| {
                    v.when(
                        |i| i.total_amount > 0.0,
                        |v| v.must("TotalAmount", |_| false, "inner rule ran"),
                    )
                },
            );

        let mut value = invoice(30);
        value.total_amount = 0.0;
        assert!(validator.validate(&value).is_valid);

        value.total_amount = 5.0;
        assert!(!validator.validate(&value).is_valid);
    }

    #[test]
    fn test_named_set_runs_only_when_activated() {
        let build = || {
            CompositionValidator::new()
                .must(
                    "InvoiceNumber",
                    |i: &InvoiceCreateRequest| !i.invoice_number.is_empty(),
                    "InvoiceNumber is required.",
                )
                .rule_set("strict", |v| {
                    v.must(
                        "InvoiceNumber",
                        |i| i.invoice_number.starts_with("INV-"),
                        "InvoiceNumber must start with INV-.",
                    )
                })
        };

        let mut value = invoice(30);
        value.invoice_number = "100".to_string();

        // Default chain alone: prefix rule does not run
        assert!(build().validate(&value).is_valid);

        // Activated: default chain still runs, plus the named set
        let result = build().activate("strict").validate(&value);
        assert_eq!(
            result.errors["InvoiceNumber"],
            vec!["InvoiceNumber must start with INV-."]
        );
    }

    #[test]
    fn test_default_chain_always_runs_alongside_sets() {
        let validator = CompositionValidator::new()
            .must(
                "InvoiceNumber",
                |i: &InvoiceCreateRequest| !i.invoice_number.is_empty(),
                "InvoiceNumber is required.",
            )
            .rule_set("strict", |v| {
                v.must(
                    "InvoiceNumber",
                    |i| i.invoice_number.starts_with("INV-"),
                    "InvoiceNumber must start with INV-.",
                )
            })
            .activate("strict");

        let mut value = invoice(30);
        value.invoice_number = String::new();
        let result = validator.validate(&value);
        assert_eq!(
            result.errors["InvoiceNumber"],
            vec![
                "InvoiceNumber is required.",
                "InvoiceNumber must start with INV-."
            ]
        );
    }

    #[test]
    fn test_object_level_rule_uses_empty_key() {
        let validator = CompositionValidator::new().object_must(
            |i: &InvoiceCreateRequest| i.customer_id != 0 || i.total_amount == 0.0,
            "Unattributed invoices must have a zero total.",
        );
        let mut value = invoice(30);
        value.customer_id = 0;
        let result = validator.validate(&value);
        assert_eq!(
            result.errors[""],
            vec!["Unattributed invoices must have a zero total."]
        );
    }

    #[test]
    fn test_unknown_activated_set_is_a_no_op() {
        let validator = CompositionValidator::new()
            .must("Number", |_: &InvoiceCreateRequest| true, "never")
            .activate("missing");
        assert!(validator.validate(&invoice(30)).is_valid);
    }
}
