//! Range validators for ordered values
//!
//! Work for any `PartialOrd + Display` type: integers, floats and `chrono`
//! dates alike. Bounds are checked once, at construction.

use std::cmp::Ordering;
use std::fmt::Display;

use crate::foundation::{ConfigError, Validate, ValidationError};

fn check_bounds<T: PartialOrd + Display>(
    check: &'static str,
    lower: &T,
    upper: &T,
    allow_equal: bool,
) -> Result<(), ConfigError> {
    match lower.partial_cmp(upper) {
        Some(Ordering::Less) => Ok(()),
        Some(Ordering::Equal) if allow_equal => Ok(()),
        _ => Err(ConfigError::InvalidRange {
            check,
            lower: lower.to_string(),
            upper: upper.to_string(),
        }),
    }
}

fn check_bound<T: PartialOrd + Display>(
    check: &'static str,
    bound: &T,
) -> Result<(), ConfigError> {
    match bound.partial_cmp(bound) {
        Some(_) => Ok(()),
        None => Err(ConfigError::InvalidBound {
            check,
            bound: bound.to_string(),
        }),
    }
}

// ============================================================================
// INCLUSIVE BETWEEN
// ============================================================================

/// Validates that `from <= value <= to`.
///
/// # Examples
///
/// ```
/// use cascade_validator::foundation::Validate;
/// use cascade_validator::validators::inclusive_between;
///
/// let v = inclusive_between(1, 100).unwrap();
/// assert!(v.validate(&1).is_ok());
/// assert!(v.validate(&100).is_ok());
/// assert!(v.validate(&0).is_err());
/// assert!(inclusive_between(10, 1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InclusiveBetween<T> {
    from: T,
    to: T,
}

impl<T: PartialOrd + Display> InclusiveBetween<T> {
    /// Stable code reported when this check fails.
    pub const CODE: &'static str = "inclusive_between";

    /// Creates the check; `from > to` (or incomparable bounds) is rejected.
    pub fn new(from: T, to: T) -> Result<Self, ConfigError> {
        check_bounds("InclusiveBetween", &from, &to, true)?;
        Ok(Self { from, to })
    }

    /// Lower bound.
    pub fn lower(&self) -> &T {
        &self.from
    }

    /// Upper bound.
    pub fn upper(&self) -> &T {
        &self.to
    }
}

impl<T: PartialOrd + Display> Validate for InclusiveBetween<T> {
    type Input = T;

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        if *input >= self.from && *input <= self.to {
            return Ok(());
        }
        Err(ValidationError::new(
            Self::CODE,
            "'{field}' must be between {from} and {to}. You entered {value}.",
        )
        .with_param("from", self.from.to_string())
        .with_param("to", self.to.to_string())
        .with_param("value", input.to_string()))
    }

    fn name(&self) -> &str {
        "InclusiveBetween"
    }
}

/// Creates an [`InclusiveBetween`] check.
pub fn inclusive_between<T: PartialOrd + Display>(
    from: T,
    to: T,
) -> Result<InclusiveBetween<T>, ConfigError> {
    InclusiveBetween::new(from, to)
}

// ============================================================================
// EXCLUSIVE BETWEEN
// ============================================================================

/// Validates that `from < value < to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExclusiveBetween<T> {
    from: T,
    to: T,
}

impl<T: PartialOrd + Display> ExclusiveBetween<T> {
    /// Stable code reported when this check fails.
    pub const CODE: &'static str = "exclusive_between";

    /// Creates the check; requires `from < to`.
    pub fn new(from: T, to: T) -> Result<Self, ConfigError> {
        check_bounds("ExclusiveBetween", &from, &to, false)?;
        Ok(Self { from, to })
    }
}

impl<T: PartialOrd + Display> Validate for ExclusiveBetween<T> {
    type Input = T;

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        if *input > self.from && *input < self.to {
            return Ok(());
        }
        Err(ValidationError::new(
            Self::CODE,
            "'{field}' must be between {from} and {to} (exclusive). You entered {value}.",
        )
        .with_param("from", self.from.to_string())
        .with_param("to", self.to.to_string())
        .with_param("value", input.to_string()))
    }

    fn name(&self) -> &str {
        "ExclusiveBetween"
    }
}

/// Creates an [`ExclusiveBetween`] check.
pub fn exclusive_between<T: PartialOrd + Display>(
    from: T,
    to: T,
) -> Result<ExclusiveBetween<T>, ConfigError> {
    ExclusiveBetween::new(from, to)
}

// ============================================================================
// SINGLE BOUND
// ============================================================================

/// Validates that `value >= bound`.
///
/// ```
/// use cascade_validator::foundation::Validate;
/// use cascade_validator::validators::greater_than_or_equal;
///
/// let adult = greater_than_or_equal(18).unwrap();
/// assert!(adult.validate(&18).is_ok());
/// assert!(greater_than_or_equal(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GreaterThanOrEqual<T> {
    bound: T,
}

impl<T: PartialOrd + Display> GreaterThanOrEqual<T> {
    /// Creates the check; a bound not comparable with itself is rejected.
    pub fn new(bound: T) -> Result<Self, ConfigError> {
        check_bound("GreaterThanOrEqual", &bound)?;
        Ok(Self { bound })
    }
}

impl<T: PartialOrd + Display> Validate for GreaterThanOrEqual<T> {
    type Input = T;

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        if *input >= self.bound {
            return Ok(());
        }
        Err(ValidationError::new(
            "greater_than_or_equal",
            "'{field}' must be greater than or equal to '{bound}'.",
        )
        .with_param("bound", self.bound.to_string())
        .with_param("value", input.to_string()))
    }

    fn name(&self) -> &str {
        "GreaterThanOrEqual"
    }
}

/// Creates a [`GreaterThanOrEqual`] check.
pub fn greater_than_or_equal<T: PartialOrd + Display>(
    bound: T,
) -> Result<GreaterThanOrEqual<T>, ConfigError> {
    GreaterThanOrEqual::new(bound)
}

/// Validates that `value <= bound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LessThanOrEqual<T> {
    bound: T,
}

impl<T: PartialOrd + Display> LessThanOrEqual<T> {
    /// Creates the check; a bound not comparable with itself is rejected.
    pub fn new(bound: T) -> Result<Self, ConfigError> {
        check_bound("LessThanOrEqual", &bound)?;
        Ok(Self { bound })
    }
}

impl<T: PartialOrd + Display> Validate for LessThanOrEqual<T> {
    type Input = T;

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        if *input <= self.bound {
            return Ok(());
        }
        Err(ValidationError::new(
            "less_than_or_equal",
            "'{field}' must be less than or equal to '{bound}'.",
        )
        .with_param("bound", self.bound.to_string())
        .with_param("value", input.to_string()))
    }

    fn name(&self) -> &str {
        "LessThanOrEqual"
    }
}

/// Creates a [`LessThanOrEqual`] check.
pub fn less_than_or_equal<T: PartialOrd + Display>(
    bound: T,
) -> Result<LessThanOrEqual<T>, ConfigError> {
    LessThanOrEqual::new(bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(50, true)]
    #[case(100, true)]
    #[case(101, false)]
    fn test_inclusive_between_ints(#[case] value: i32, #[case] ok: bool) {
        let v = inclusive_between(1, 100).unwrap();
        assert_eq!(v.validate(&value).is_ok(), ok);
    }

    #[test]
    fn test_inclusive_between_dates() {
        let lo = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let hi = NaiveDate::from_ymd_opt(3000, 1, 1).unwrap();
        let v = inclusive_between(lo, hi).unwrap();

        assert!(v.validate(&NaiveDate::from_ymd_opt(2020, 6, 1).unwrap()).is_ok());

        let err = v
            .validate(&NaiveDate::from_ymd_opt(1999, 12, 31).unwrap())
            .unwrap_err();
        assert_eq!(err.param("from"), Some("2000-01-01"));
        assert_eq!(err.param("to"), Some("3000-01-01"));
        assert_eq!(err.param("value"), Some("1999-12-31"));
    }

    #[test]
    fn test_reversed_bounds_are_config_errors() {
        assert_eq!(
            inclusive_between(10, 1).unwrap_err(),
            ConfigError::InvalidRange {
                check: "InclusiveBetween",
                lower: "10".into(),
                upper: "1".into(),
            }
        );
        assert!(inclusive_between(5, 5).is_ok());
        assert!(exclusive_between(5, 5).is_err());
    }

    #[test]
    fn test_nan_bounds_are_rejected() {
        assert!(inclusive_between(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_exclusive_between() {
        let v = exclusive_between(0, 10).unwrap();
        assert!(v.validate(&5).is_ok());
        assert!(v.validate(&0).is_err());
        assert!(v.validate(&10).is_err());
    }

    #[test]
    fn test_single_bounds() {
        let adult = greater_than_or_equal(18).unwrap();
        assert!(adult.validate(&18).is_ok());
        assert!(adult.validate(&17).is_err());

        let cap = less_than_or_equal(1.5).unwrap();
        assert!(cap.validate(&1.5).is_ok());
        assert_eq!(cap.validate(&2.0).unwrap_err().param("bound"), Some("1.5"));
    }

    #[test]
    fn test_nan_single_bound_is_rejected() {
        assert_eq!(
            greater_than_or_equal(f64::NAN).unwrap_err(),
            ConfigError::InvalidBound {
                check: "GreaterThanOrEqual",
                bound: "NaN".into(),
            }
        );
        assert!(matches!(
            less_than_or_equal(f64::NAN),
            Err(ConfigError::InvalidBound { check: "LessThanOrEqual", .. })
        ));
        assert!(less_than_or_equal(f64::INFINITY).is_ok());
    }
}
