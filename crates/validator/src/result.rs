//! Validation results
//!
//! A [`ValidationResult`] is what a collaborator receives: the ordered list
//! of [`Failure`]s, plus conversions into the shapes callers usually want
//! (an error payload keyed by field, JSON, or a `Result`).

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::foundation::{ValidationError, ValidationErrors};

/// One failed step: the field it belongs to and its rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Failure {
    /// Field name the failing chain is declared for.
    pub field: String,
    /// Stable machine-readable code of the failed check.
    pub code: Cow<'static, str>,
    /// Rendered, human-readable message.
    pub message: String,
}

impl Failure {
    /// Creates a failure.
    pub fn new(
        field: impl Into<String>,
        code: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl From<Failure> for ValidationError {
    fn from(failure: Failure) -> Self {
        ValidationError::new(failure.code, failure.message).with_field(failure.field)
    }
}

/// Outcome of validating one instance against a rule set.
///
/// Failures are ordered by declared field order, then step order within a
/// field. The result is valid exactly when there are no failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    failures: Vec<Failure>,
}

impl ValidationResult {
    /// Creates a result from failures already in declared order.
    pub fn new(failures: Vec<Failure>) -> Self {
        Self { failures }
    }

    /// Returns true if no step failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// All failures, in order.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Takes ownership of the failures.
    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }

    /// Failures for one field, in step order.
    pub fn failures_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Failure> + 'a {
        self.failures.iter().filter(move |f| f.field == field)
    }

    /// Messages grouped by field, fields in declared order.
    ///
    /// Fields without failures are omitted.
    pub fn by_field(&self) -> IndexMap<String, Vec<String>> {
        let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
        for failure in &self.failures {
            grouped
                .entry(failure.field.clone())
                .or_default()
                .push(failure.message.clone());
        }
        grouped
    }

    /// JSON form: `{"is_valid": bool, "failures": [...]}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "is_valid": self.is_valid(),
            "failures": self.failures,
        })
    }

    /// `Ok(())` when valid, otherwise every failure as a [`ValidationError`].
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_valid() {
            return Ok(());
        }
        Err(self.failures.into_iter().map(ValidationError::from).collect())
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 2)?;
        state.serialize_field("is_valid", &self.is_valid())?;
        state.serialize_field("failures", &self.failures)?;
        state.end()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return f.write_str("Validation succeeded");
        }
        write!(f, "Validation failed:")?;
        for failure in &self.failures {
            write!(f, "\n -- {failure}")?;
        }
        Ok(())
    }
}

impl FromIterator<Failure> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = Failure>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
