//! Request body parsing
//!
//! Decodes raw request bytes into a typed shape. Field-name matching is
//! case-insensitive: every top-level key of the decoded object is rewritten
//! to the canonical wire spelling from the shape's field list before the
//! typed decode runs. Decoding is atomic — either a fully-populated shape is
//! returned or a [`ParseError`], never a partial result.

use super::error::ParseError;
use super::shape::Shape;
use serde_json::Value;

/// Parse a raw request body into the shape `T`
///
/// Fails with [`ParseError::EmptyBody`] when the body is absent, blank, or
/// decodes to JSON `null`; fails with [`ParseError::InvalidSyntax`] when the
/// body is not a JSON object of the expected shape.
pub fn parse_body<T: Shape>(raw: &[u8]) -> Result<T, ParseError> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| ParseError::InvalidSyntax(format!("invalid UTF-8: {}", e)))?;
    if text.trim().is_empty() {
        return Err(ParseError::EmptyBody);
    }

    let value: Value =
        serde_json::from_str(text).map_err(|e| ParseError::InvalidSyntax(e.to_string()))?;
    if value.is_null() {
        return Err(ParseError::EmptyBody);
    }

    let Value::Object(fields) = value else {
        return Err(ParseError::InvalidSyntax(
            "expected a JSON object".to_string(),
        ));
    };

    let mut canonical = serde_json::Map::with_capacity(fields.len());
    for (key, field_value) in fields {
        let name = T::FIELDS
            .iter()
            .find(|f| f.wire.eq_ignore_ascii_case(&key))
            .map_or(key, |f| f.wire.to_string());
        canonical.insert(name, field_value);
    }

    serde_json::from_value(Value::Object(canonical))
        .map_err(|e| ParseError::InvalidSyntax(e.to_string()))
}
