//! Error types
//!
//! Two classes of error live here and they never mix:
//!
//! - [`ValidationError`] / [`ValidationErrors`]: a data-dependent check
//!   failure. Produced by [`Validate`](crate::foundation::Validate)
//!   implementations and folded into a
//!   [`ValidationResult`](crate::result::ValidationResult) by the engine.
//! - [`ConfigError`]: a programmer mistake detected while constructing a
//!   check or a rule set. Returned from constructors and
//!   [`RuleSetBuilder::build`](crate::rules::RuleSetBuilder::build), never
//!   from `validate`.
//!
//! Code and message fields use `Cow<'static, str>` so the common case of
//! static codes and templates does not allocate.

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

/// Inline storage for check params; built-in checks carry at most three.
pub type Params = SmallVec<[(Cow<'static, str>, Cow<'static, str>); 3]>;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A structured check failure.
///
/// `message` is a template: it may reference `{field}` and any key in
/// `params`. The chain renders it into the final
/// [`Failure`](crate::result::Failure) message.
///
/// # Examples
///
/// ```
/// use cascade_validator::foundation::ValidationError;
///
/// let error = ValidationError::new("max_length", "'{field}' is too long")
///     .with_param("max", "100")
///     .with_param("actual", "150");
///
/// assert_eq!(error.param("max"), Some("100"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Stable identifier of the failing check, e.g. `"not_null"`.
    pub code: Cow<'static, str>,

    /// Message template.
    pub message: Cow<'static, str>,

    /// Field the error was raised for, once known.
    pub field: Option<Cow<'static, str>>,

    /// Named values substituted into the message template.
    pub params: Params,

    /// Errors this one aggregates (rule sets used as a single check).
    pub nested: Vec<ValidationError>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message template.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: Params::new(),
            nested: Vec::new(),
        }
    }

    /// Sets the field this error belongs to.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a template parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Replaces the nested errors.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_nested(mut self, errors: Vec<ValidationError>) -> Self {
        self.nested = errors;
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| &**v)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{field}] {}: {}", self.code, self.message)?;
        } else {
            write!(f, "{}: {}", self.code, self.message)?;
        }

        if !self.params.is_empty() {
            write!(f, " (params: [")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, "])")?;
        }

        for (i, error) in self.nested.iter().enumerate() {
            write!(f, "\n  {}. {error}", i + 1)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// An ordered collection of validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns all errors.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Converts to a single error with nested errors.
    pub fn into_single_error(self, message: impl Into<Cow<'static, str>>) -> ValidationError {
        ValidationError::new("validation_errors", message).with_nested(self.errors)
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}. {error}", i + 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// CONFIGURATION ERROR
// ============================================================================

/// A misconfigured check or rule set, detected before any `validate` call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Two chains were registered for the same field of one shape.
    #[error("rule set '{shape}' registers field '{field}' more than once")]
    DuplicateField { shape: String, field: String },

    /// A chain was registered with an empty field name.
    #[error("rule set '{shape}' has a chain with an empty field name")]
    EmptyFieldName { shape: String },

    /// Range bounds are reversed or incomparable.
    #[error("invalid range for {check}: lower bound {lower} is not below upper bound {upper}")]
    InvalidRange {
        check: &'static str,
        lower: String,
        upper: String,
    },

    /// A single bound is not comparable with itself, such as NaN.
    #[error("invalid bound for {check}: {bound} is not comparable")]
    InvalidBound { check: &'static str, bound: String },

    /// Length bounds are reversed.
    #[error("invalid length range: min {min} is greater than max {max}")]
    InvalidLengthRange { min: usize, max: usize },

    /// A regular expression failed to compile.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A second gate was attached to a step that already has one.
    #[error("field '{field}': step {step} already has a condition")]
    GateAlreadySet { field: String, step: usize },

    /// A modifier was applied with no step to attach to.
    #[error("field '{field}': `{modifier}` must follow a check")]
    DanglingModifier {
        field: String,
        modifier: &'static str,
    },

    /// Engine configuration could not be parsed.
    #[error("invalid validator config: {0}")]
    InvalidConfig(String),
}
