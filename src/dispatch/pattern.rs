//! Path patterns with typed parameter captures
//!
//! A pattern like `/customers/{id:int}` matches a path in two steps: shape
//! matching (literal segments and arity) and typed capture extraction. The
//! split lets the dispatcher tell "wrong path" apart from "right path,
//! malformed parameter".

use crate::core::error::RouteError;
use std::collections::HashMap;

/// Declared type of a path capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    Int,
}

/// One segment of a route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(&'static str),
    Param { name: &'static str, capture: Capture },
}

/// A parsed route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern string such as `/customers/{id:int}`
    ///
    /// `{name}` and `{name:int}` both declare an integer capture; integers
    /// are the only capture type this service routes on.
    pub fn parse(pattern: &'static str) -> Self {
        let segments = pattern
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|segment| {
                match segment
                    .strip_prefix('{')
                    .and_then(|s| s.strip_suffix('}'))
                {
                    Some(inner) => {
                        let (name, _ty) = inner.split_once(':').unwrap_or((inner, "int"));
                        Segment::Param {
                            name,
                            capture: Capture::Int,
                        }
                    }
                    None => Segment::Literal(segment),
                }
            })
            .collect();
        Self { segments }
    }

    /// Whether the path matches this pattern's shape: same arity, equal
    /// literal segments. Capture segments match any value positionally.
    pub fn shape_matches(&self, parts: &[&str]) -> bool {
        self.segments.len() == parts.len()
            && self
                .segments
                .iter()
                .zip(parts)
                .all(|(segment, part)| match segment {
                    Segment::Literal(lit) => lit == part,
                    Segment::Param { .. } => true,
                })
    }

    /// Extract typed captures from a shape-matching path
    pub fn captures(&self, parts: &[&str]) -> Result<PathParams, RouteError> {
        let mut params = PathParams::default();
        for (segment, part) in self.segments.iter().zip(parts) {
            if let Segment::Param { name, capture } = segment {
                match capture {
                    Capture::Int => match part.parse::<i64>() {
                        Ok(n) => params.insert(*name, n),
                        Err(_) => {
                            return Err(RouteError::ParamTypeMismatch {
                                segment: (*name).to_string(),
                                value: (*part).to_string(),
                            });
                        }
                    },
                }
            }
        }
        Ok(params)
    }
}

/// Typed path parameters extracted by a successful match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    values: HashMap<&'static str, i64>,
}

impl PathParams {
    pub fn insert(&mut self, name: &'static str, value: i64) {
        self.values.insert(name, value);
    }

    /// Get an integer capture by name
    pub fn int(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }
}

/// Split a request path into segments, ignoring leading/trailing slashes
pub fn split_path(path: &str) -> Vec<&str> {
    path.trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect()
}
