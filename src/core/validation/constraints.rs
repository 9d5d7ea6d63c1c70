//! Reusable field constraints
//!
//! Constraints power the declarative validation tables. Each constructor
//! returns a boxed closure over `(display label, field value)`. String
//! constraints other than [`required`] pass on absent or empty values:
//! emptiness belongs to `required`, so an empty field reports exactly one
//! violation.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// A single per-field constraint over the serialized payload
pub type Constraint = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;

pub(crate) fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
    })
}

pub(crate) fn person_name_regex() -> &'static Regex {
    static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    // Letters, spaces, hyphens, and periods only
    NAME_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z .\-]+$").unwrap())
}

/// Constraint: field must be present and non-blank
pub fn required() -> Constraint {
    Box::new(|field: &str, value: &Value| match value {
        Value::Null => Err(format!("{} is required.", field)),
        Value::String(s) if s.trim().is_empty() => Err(format!("{} is required.", field)),
        _ => Ok(()),
    })
}

/// Constraint: string length must be within range
pub fn length_between(min: usize, max: usize) -> Constraint {
    Box::new(move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if s.is_empty() {
                return Ok(());
            }
            let len = s.len();
            if len < min || len > max {
                return Err(format!(
                    "{} must be between {} and {} characters.",
                    field, min, max
                ));
            }
        }
        Ok(())
    })
}

/// Constraint: string must not exceed a maximum length
pub fn max_length(max: usize) -> Constraint {
    Box::new(move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if s.len() > max {
                return Err(format!("{} must not exceed {} characters.", field, max));
            }
        }
        Ok(())
    })
}

/// Constraint: string must match a pattern
///
/// The message suffix completes "`{field} {suffix}`".
pub fn matches(pattern: Regex, suffix: &'static str) -> Constraint {
    Box::new(move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if !s.is_empty() && !pattern.is_match(s) {
                return Err(format!("{} {}", field, suffix));
            }
        }
        Ok(())
    })
}

/// Constraint: string must be a well-formed email address
pub fn email_format() -> Constraint {
    Box::new(|_: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if !s.is_empty() && !email_regex().is_match(s) {
                return Err("Invalid email address format.".to_string());
            }
        }
        Ok(())
    })
}

/// Constraint: integer must be strictly greater than zero
pub fn positive_int() -> Constraint {
    Box::new(|field: &str, value: &Value| {
        if let Some(n) = value.as_i64() {
            if n <= 0 {
                return Err(format!("{} must be greater than zero.", field));
            }
        }
        Ok(())
    })
}

/// Constraint: number must be zero or greater
pub fn non_negative() -> Constraint {
    Box::new(|field: &str, value: &Value| {
        if let Some(n) = value.as_f64() {
            if n < 0.0 {
                return Err(format!("{} must be zero or greater.", field));
            }
        }
        Ok(())
    })
}

/// Constraint: string must be one of the allowed values
pub fn one_of(allowed: &'static [&'static str]) -> Constraint {
    Box::new(move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if !allowed.contains(&s) {
                return Err(format!("{} must be one of: {}.", field, allowed.join(", ")));
            }
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === required() ===

    #[test]
    fn test_required_null_fails() {
        let c = required();
        let result = c("Name", &json!(null));
        assert_eq!(result.unwrap_err(), "Name is required.");
    }

    #[test]
    fn test_required_empty_string_fails() {
        let c = required();
        assert!(c("Name", &json!("")).is_err());
    }

    #[test]
    fn test_required_blank_string_fails() {
        let c = required();
        assert!(c("Name", &json!("   ")).is_err());
    }

    #[test]
    fn test_required_value_passes() {
        let c = required();
        assert!(c("Name", &json!("John")).is_ok());
        assert!(c("CustomerId", &json!(0)).is_ok());
        assert!(c("Type", &json!("Mobile")).is_ok());
    }

    // === length_between() ===

    #[test]
    fn test_length_between_too_short_fails() {
        let c = length_between(2, 200);
        let result = c("Name", &json!("a"));
        assert_eq!(
            result.unwrap_err(),
            "Name must be between 2 and 200 characters."
        );
    }

    #[test]
    fn test_length_between_too_long_fails() {
        let c = length_between(2, 5);
        assert!(c("Name", &json!("abcdef")).is_err());
    }

    #[test]
    fn test_length_between_bounds_pass() {
        let c = length_between(2, 5);
        assert!(c("Name", &json!("ab")).is_ok());
        assert!(c("Name", &json!("abcde")).is_ok());
    }

    #[test]
    fn test_length_between_empty_passthrough() {
        // Emptiness is owned by required()
        let c = length_between(2, 200);
        assert!(c("Name", &json!("")).is_ok());
    }

    #[test]
    fn test_length_between_non_string_passthrough() {
        let c = length_between(2, 200);
        assert!(c("Name", &json!(42)).is_ok());
        assert!(c("Name", &json!(null)).is_ok());
    }

    // === max_length() ===

    #[test]
    fn test_max_length_over_fails() {
        let c = max_length(5);
        let result = c("Number", &json!("123456"));
        assert_eq!(result.unwrap_err(), "Number must not exceed 5 characters.");
    }

    #[test]
    fn test_max_length_at_limit_passes() {
        let c = max_length(5);
        assert!(c("Number", &json!("12345")).is_ok());
    }

    // === matches() ===

    #[test]
    fn test_matches_rejects_nonconforming() {
        let c = matches(
            person_name_regex().clone(),
            "contains invalid characters.",
        );
        let result = c("Name", &json!("John7"));
        assert_eq!(result.unwrap_err(), "Name contains invalid characters.");
    }

    #[test]
    fn test_matches_accepts_letters_spaces_hyphens_periods() {
        let c = matches(
            person_name_regex().clone(),
            "contains invalid characters.",
        );
        assert!(c("Name", &json!("Mary-Jane St. Clair")).is_ok());
    }

    #[test]
    fn test_matches_empty_passthrough() {
        let c = matches(
            person_name_regex().clone(),
            "contains invalid characters.",
        );
        assert!(c("Name", &json!("")).is_ok());
    }

    // === email_format() ===

    #[test]
    fn test_email_format_valid_passes() {
        let c = email_format();
        assert!(c("Email", &json!("john@example.com")).is_ok());
        assert!(c("Email", &json!("user.name+tag@example.co.uk")).is_ok());
    }

    #[test]
    fn test_email_format_invalid_fails() {
        let c = email_format();
        let result = c("Email", &json!("not-an-email"));
        assert_eq!(result.unwrap_err(), "Invalid email address format.");
    }

    #[test]
    fn test_email_format_missing_local_part_fails() {
        let c = email_format();
        assert!(c("Email", &json!("@example.com")).is_err());
    }

    #[test]
    fn test_email_format_empty_passthrough() {
        let c = email_format();
        assert!(c("Email", &json!("")).is_ok());
    }

    // === positive_int() ===

    #[test]
    fn test_positive_int_zero_fails() {
        let c = positive_int();
        let result = c("CustomerId", &json!(0));
        assert_eq!(result.unwrap_err(), "CustomerId must be greater than zero.");
    }

    #[test]
    fn test_positive_int_negative_fails() {
        let c = positive_int();
        assert!(c("CustomerId", &json!(-3)).is_err());
    }

    #[test]
    fn test_positive_int_positive_passes() {
        let c = positive_int();
        assert!(c("CustomerId", &json!(1)).is_ok());
    }

    #[test]
    fn test_positive_int_non_number_passthrough() {
        let c = positive_int();
        assert!(c("CustomerId", &json!(null)).is_ok());
    }

    // === non_negative() ===

    #[test]
    fn test_non_negative_below_zero_fails() {
        let c = non_negative();
        let result = c("TotalAmount", &json!(-0.01));
        assert_eq!(result.unwrap_err(), "TotalAmount must be zero or greater.");
    }

    #[test]
    fn test_non_negative_zero_passes() {
        let c = non_negative();
        assert!(c("TotalAmount", &json!(0.0)).is_ok());
    }

    #[test]
    fn test_non_negative_positive_passes() {
        let c = non_negative();
        assert!(c("TotalAmount", &json!(99.5)).is_ok());
    }

    // === one_of() ===

    #[test]
    fn test_one_of_member_passes() {
        let c = one_of(&["Mobile", "Work", "DirectDial"]);
        assert!(c("Type", &json!("Work")).is_ok());
    }

    #[test]
    fn test_one_of_non_member_fails() {
        let c = one_of(&["Mobile", "Work", "DirectDial"]);
        let result = c("Type", &json!("Fax"));
        assert_eq!(
            result.unwrap_err(),
            "Type must be one of: Mobile, Work, DirectDial."
        );
    }

    #[test]
    fn test_one_of_null_passthrough() {
        let c = one_of(&["Mobile", "Work"]);
        assert!(c("Type", &json!(null)).is_ok());
    }
}
