//! Regular expression check

use regex::Regex;

use crate::foundation::{ConfigError, Validate, ValidationError};

/// Validates that a string matches a regular expression.
///
/// The pattern is compiled once at construction; a pattern that fails to
/// compile is a configuration error.
///
/// # Examples
///
/// ```
/// use cascade_validator::foundation::Validate;
/// use cascade_validator::validators::matches;
///
/// let zip = matches(r"^\d{5}$").unwrap();
/// assert!(zip.validate("12345").is_ok());
/// assert!(zip.validate("1234a").is_err());
/// assert!(matches("(").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Matches {
    regex: Regex,
}

impl Matches {
    /// Stable code reported when this check fails.
    pub const CODE: &'static str = "matches";

    /// Compiles the pattern.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        Regex::new(pattern)
            .map(|regex| Self { regex })
            .map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.to_owned(),
                reason: e.to_string(),
            })
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Validate for Matches {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        if self.regex.is_match(input) {
            return Ok(());
        }
        Err(
            ValidationError::new(Self::CODE, "'{field}' is not in the correct format.")
                .with_param("pattern", self.regex.as_str().to_owned()),
        )
    }

    fn name(&self) -> &str {
        "Matches"
    }
}

/// Creates a [`Matches`] check.
pub fn matches(pattern: &str) -> Result<Matches, ConfigError> {
    Matches::new(pattern)
}
