//
//  appveyor-client
//  compare/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Structural JSON Comparison
//!
//! This module compares two decoded JSON trees for equivalence, independent
//! of any statically-typed model. It is the backbone of the round-trip
//! checks in [`lossless`] and of model assertions in the integration tests.
//!
//! ## Modes
//!
//! - **Strict**: every property in `expected` must be present and equal in
//!   `actual`, and vice versa. Used to validate lossless round-trips and
//!   full model equality.
//! - **Agrees**: only properties present in `expected` are checked;
//!   properties present only in `actual` are ignored. Used where an
//!   endpoint returns a subset of fields (e.g. list endpoints that omit
//!   heavy sub-objects).
//!
//! In both modes arrays must match element-wise at the same index, and a
//! length mismatch always fails.
//!
//! ## Date tolerance
//!
//! Two strings that both parse as RFC 3339 date-times compare equal when
//! they differ by at most one millisecond. This accommodates independent
//! formatting and fractional-second precision of date serializers on the
//! two sides of a round-trip.
//!
//! ## Failure reporting
//!
//! Comparison stops at the first mismatch and reports the full path from
//! the root (e.g. `$.jobs[0].status`) together with both values, so a
//! failure in a large payload is diagnosable at a glance.
//!
//! ## Example
//!
//! ```rust
//! use appveyor_client::compare::{compare_strict, Comparison};
//! use serde_json::json;
//!
//! let expected = json!({"name": "Admin", "updated": "2018-04-08T21:35:21Z"});
//! let actual = json!({"name": "Admin", "updated": "2018-04-08T21:35:21.000Z"});
//!
//! // Date strings differing only in precision are equal.
//! assert!(compare_strict(&expected, &actual).is_ok());
//!
//! // Fields can be excluded from comparison per-assertion.
//! let other = json!({"name": "Admin", "updated": "2019-01-01T00:00:00Z"});
//! assert!(Comparison::strict().exclude("updated").compare(&expected, &other).is_ok());
//! ```

use std::collections::BTreeSet;
use std::fmt;

use chrono::DateTime;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

mod lossless;

pub use lossless::{decode_lossless, LosslessError};

/// Error raised by [`parse_tree`] when the input is not valid JSON text.
#[derive(Debug, Error)]
#[error("malformed JSON: {source}")]
pub struct MalformedJson {
    #[from]
    source: serde_json::Error,
}

/// Structural mismatch between two JSON trees.
///
/// Carries the path of the first divergence (dotted for object keys,
/// bracketed for array indices, rooted at `$`) and the two values found
/// there. A property missing from one side is reported as `null`.
#[derive(Debug, Error)]
#[error("JSON differs at {path}: expected `{expected}`, actual `{actual}`")]
pub struct ComparisonFailure {
    /// Path from the root to the first divergence, e.g. `$.jobs[0].status`.
    pub path: String,

    /// Value found at `path` in the expected tree.
    pub expected: Value,

    /// Value found at `path` in the actual tree.
    pub actual: Value,
}

/// Comparison mode; see the module documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Exact key/element correspondence in both directions.
    Strict,

    /// Only keys present in `expected` are checked; extra actual keys are
    /// ignored.
    Agrees,
}

/// One step of the path accumulated during recursive descent.
#[derive(Debug, Clone)]
enum Segment {
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, ".{key}"),
            Segment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

fn render_path(segments: &[Segment]) -> String {
    let mut rendered = String::from("$");
    for segment in segments {
        rendered.push_str(&segment.to_string());
    }
    rendered
}

/// A configured structural comparison.
///
/// Built with [`Comparison::strict`] or [`Comparison::agrees`], optionally
/// narrowed with [`Comparison::exclude`], then run with
/// [`Comparison::compare`]. The exclusion set applies to object keys at
/// every depth, as though the key were absent from both sides.
///
/// # Example
///
/// ```rust
/// use appveyor_client::compare::Comparison;
/// use serde_json::json;
///
/// let expected = json!({"slug": "my-project", "updated": "2018-01-01T00:00:00Z"});
/// let actual = json!({"slug": "my-project", "updated": "2020-06-15T12:30:00Z"});
///
/// let comparison = Comparison::strict().exclude("updated");
/// assert!(comparison.compare(&expected, &actual).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Comparison {
    mode: Mode,
    excluded: BTreeSet<String>,
}

impl Comparison {
    /// Creates a strict comparison (exact correspondence in both directions).
    pub fn strict() -> Self {
        Self {
            mode: Mode::Strict,
            excluded: BTreeSet::new(),
        }
    }

    /// Creates an agrees comparison (extra actual keys are ignored).
    pub fn agrees() -> Self {
        Self {
            mode: Mode::Agrees,
            excluded: BTreeSet::new(),
        }
    }

    /// Excludes a field name from comparison at every object depth.
    pub fn exclude(mut self, field: impl Into<String>) -> Self {
        self.excluded.insert(field.into());
        self
    }

    /// Compares `actual` against `expected` under this configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ComparisonFailure`] describing the first divergence.
    /// First-failure-wins: remaining mismatches are not collected.
    pub fn compare(&self, expected: &Value, actual: &Value) -> Result<(), ComparisonFailure> {
        let mut path = Vec::new();
        self.compare_at(expected, actual, &mut path)
    }

    fn fail(
        path: &[Segment],
        expected: &Value,
        actual: &Value,
    ) -> Result<(), ComparisonFailure> {
        Err(ComparisonFailure {
            path: render_path(path),
            expected: expected.clone(),
            actual: actual.clone(),
        })
    }

    fn compare_at(
        &self,
        expected: &Value,
        actual: &Value,
        path: &mut Vec<Segment>,
    ) -> Result<(), ComparisonFailure> {
        match (expected, actual) {
            (Value::Null, Value::Null) => Ok(()),
            (Value::Bool(e), Value::Bool(a)) if e == a => Ok(()),
            (Value::Number(e), Value::Number(a)) if e == a => Ok(()),
            (Value::String(e), Value::String(a)) if e == a || dates_agree(e, a) => Ok(()),
            (Value::Array(expected_items), Value::Array(actual_items)) => {
                if expected_items.len() != actual_items.len() {
                    return Self::fail(path, expected, actual);
                }
                for (index, (e, a)) in expected_items.iter().zip(actual_items).enumerate() {
                    path.push(Segment::Index(index));
                    self.compare_at(e, a, path)?;
                    path.pop();
                }
                Ok(())
            }
            (Value::Object(expected_map), Value::Object(actual_map)) => {
                for (key, expected_value) in expected_map {
                    if self.excluded.contains(key) {
                        continue;
                    }
                    path.push(Segment::Key(key.clone()));
                    match actual_map.get(key) {
                        Some(actual_value) => {
                            self.compare_at(expected_value, actual_value, path)?
                        }
                        None => Self::fail(path, expected_value, &Value::Null)?,
                    }
                    path.pop();
                }
                if self.mode == Mode::Strict {
                    for (key, actual_value) in actual_map {
                        if self.excluded.contains(key) || expected_map.contains_key(key) {
                            continue;
                        }
                        path.push(Segment::Key(key.clone()));
                        return Self::fail(path, &Value::Null, actual_value);
                    }
                }
                Ok(())
            }
            _ => Self::fail(path, expected, actual),
        }
    }
}

/// Checks whether two strings are date-times equal to within one millisecond.
///
/// Both values must parse as RFC 3339 date-times; anything else compares as
/// an ordinary string. The one-millisecond window tolerates differences in
/// fractional-second precision between independent serializers.
fn dates_agree(expected: &str, actual: &str) -> bool {
    let (Ok(e), Ok(a)) = (
        DateTime::parse_from_rfc3339(expected),
        DateTime::parse_from_rfc3339(actual),
    ) else {
        return false;
    };
    e.signed_duration_since(a)
        .num_microseconds()
        .is_some_and(|us| us.abs() <= 1_000)
}

/// Serializes any model to a generic JSON tree for structural comparison.
///
/// Every model in this crate derives `Serialize`, so what this produces is
/// exactly what the wire serializer would send, including explicit nulls
/// for unset optional fields.
pub fn to_tree<T: Serialize>(value: &T) -> Result<Value, serde_json::Error> {
    serde_json::to_value(value)
}

/// Parses raw JSON text into a generic tree.
///
/// # Errors
///
/// Returns [`MalformedJson`] if `raw` is not valid JSON text.
pub fn parse_tree(raw: &str) -> Result<Value, MalformedJson> {
    Ok(serde_json::from_str(raw)?)
}

/// Shorthand for [`Comparison::strict`] with no exclusions.
pub fn compare_strict(expected: &Value, actual: &Value) -> Result<(), ComparisonFailure> {
    Comparison::strict().compare(expected, actual)
}

/// Shorthand for [`Comparison::agrees`] with no exclusions.
pub fn compare_agrees(expected: &Value, actual: &Value) -> Result<(), ComparisonFailure> {
    Comparison::agrees().compare(expected, actual)
}
