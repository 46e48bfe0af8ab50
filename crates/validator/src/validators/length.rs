//! String length validators
//!
//! Length is measured in Unicode scalar values (chars) by default. Use the
//! `bytes` constructors for byte-length counting when the input is known to
//! be ASCII.

use crate::foundation::{ConfigError, Validate, ValidationError};

// ============================================================================
// LENGTH MODE
// ============================================================================

/// How to count string length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthMode {
    /// Count bytes.
    Bytes,
    /// Count Unicode scalar values.
    #[default]
    Chars,
}

impl LengthMode {
    /// Measures the length of a string according to this mode.
    #[inline]
    pub fn measure(self, input: &str) -> usize {
        match self {
            LengthMode::Bytes => input.len(),
            LengthMode::Chars => input.chars().count(),
        }
    }
}

// ============================================================================
// NOT EMPTY
// ============================================================================

crate::validator! {
    /// Validates that a string is not empty.
    ///
    /// Presence is not checked here; pair with `not_null` for optional
    /// fields that are also required.
    pub NotEmpty for str;
    code = "not_empty", message = "'{field}' must not be empty.";
    rule(input) { !input.is_empty() }
    fn not_empty();
}

// ============================================================================
// MIN LENGTH
// ============================================================================

crate::validator! {
    /// Validates that a string has at least a minimum length.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MinLength { min: usize, mode: LengthMode } for str;
    code = "min_length",
    message = "The length of '{field}' must be at least {min} characters. You entered {actual} characters.";
    rule(self, input) { self.mode.measure(input) >= self.min }
    params(self, input) { "min" => self.min, "actual" => self.mode.measure(input) }
    new(min: usize) { Self { min, mode: LengthMode::Chars } }
    fn min_length(min: usize);
}

impl MinLength {
    /// Creates a minimum length check that counts bytes.
    #[must_use]
    pub fn bytes(min: usize) -> Self {
        Self {
            min,
            mode: LengthMode::Bytes,
        }
    }
}

// ============================================================================
// MAX LENGTH
// ============================================================================

crate::validator! {
    /// Validates that a string does not exceed a maximum length.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MaxLength { max: usize, mode: LengthMode } for str;
    code = "max_length",
    message = "The length of '{field}' must be {max} characters or fewer. You entered {actual} characters.";
    rule(self, input) { self.mode.measure(input) <= self.max }
    params(self, input) { "max" => self.max, "actual" => self.mode.measure(input) }
    new(max: usize) { Self { max, mode: LengthMode::Chars } }
    fn max_length(max: usize);
}

impl MaxLength {
    /// Creates a maximum length check that counts bytes.
    #[must_use]
    pub fn bytes(max: usize) -> Self {
        Self {
            max,
            mode: LengthMode::Bytes,
        }
    }
}

// ============================================================================
// LENGTH RANGE
// ============================================================================

/// Validates that a string length is within an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LengthRange {
    /// Minimum length (inclusive).
    pub min: usize,
    /// Maximum length (inclusive).
    pub max: usize,
    /// How to count length.
    pub mode: LengthMode,
}

impl LengthRange {
    /// Stable code reported when this check fails.
    pub const CODE: &'static str = "length_range";

    /// Creates a length range check counting chars.
    ///
    /// Returns an error if `min > max`.
    pub fn new(min: usize, max: usize) -> Result<Self, ConfigError> {
        Self::with_mode(min, max, LengthMode::Chars)
    }

    /// Creates a length range check counting bytes.
    pub fn bytes(min: usize, max: usize) -> Result<Self, ConfigError> {
        Self::with_mode(min, max, LengthMode::Bytes)
    }

    fn with_mode(min: usize, max: usize, mode: LengthMode) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvalidLengthRange { min, max });
        }
        Ok(Self { min, max, mode })
    }
}

impl Validate for LengthRange {
    type Input = str;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        let len = self.mode.measure(input);
        if (self.min..=self.max).contains(&len) {
            return Ok(());
        }
        Err(ValidationError::new(
            Self::CODE,
            "'{field}' must be between {min} and {max} characters. You entered {actual} characters.",
        )
        .with_param("min", self.min.to_string())
        .with_param("max", self.max.to_string())
        .with_param("actual", len.to_string()))
    }

    fn name(&self) -> &str {
        "LengthRange"
    }
}

/// Creates a [`LengthRange`] check.
pub fn length_range(min: usize, max: usize) -> Result<LengthRange, ConfigError> {
    LengthRange::new(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_not_empty() {
        assert!(not_empty().validate("a").is_ok());
        assert!(not_empty().validate(" ").is_ok());
        assert_eq!(not_empty().validate("").unwrap_err().code, NotEmpty::CODE);
    }

    #[rstest]
    #[case("", true)]
    #[case("abc", true)]
    #[case("abcd", false)]
    fn test_max_length(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(max_length(3).validate(input).is_ok(), ok);
    }

    #[test]
    fn test_max_length_params() {
        let err = max_length(100).validate(&"x".repeat(150)).unwrap_err();
        assert_eq!(err.code, "max_length");
        assert_eq!(err.param("max"), Some("100"));
        assert_eq!(err.param("actual"), Some("150"));
    }

    #[test]
    fn test_chars_vs_bytes() {
        let s = "héllo";
        assert!(max_length(5).validate(s).is_ok());
        assert!(MaxLength::bytes(5).validate(s).is_err());
        assert!(MinLength::bytes(6).validate(s).is_ok());
    }

    #[test]
    fn test_min_length() {
        assert!(min_length(2).validate("ab").is_ok());
        assert_eq!(min_length(2).validate("a").unwrap_err().param("min"), Some("2"));
    }

    #[test]
    fn test_length_range() {
        let v = length_range(2, 4).unwrap();
        assert!(v.validate("ab").is_ok());
        assert!(v.validate("abcd").is_ok());
        assert!(v.validate("a").is_err());
        assert!(v.validate("abcde").is_err());
    }

    #[test]
    fn test_length_range_rejects_reversed_bounds() {
        assert_eq!(
            LengthRange::new(5, 1).unwrap_err(),
            ConfigError::InvalidLengthRange { min: 5, max: 1 }
        );
        assert!(LengthRange::bytes(3, 3).is_ok());
    }
}
