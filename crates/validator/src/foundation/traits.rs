//! The atomic check trait

use std::sync::Arc;

use crate::foundation::ValidationError;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// A single pure check over one value.
///
/// Implementations are stateless after construction: the same input always
/// yields the same outcome, and validating never mutates the check. Failures
/// are returned as values; a check never panics on ordinary input.
///
/// The returned [`ValidationError`] carries a stable `code`, a default
/// message template and the params the template refers to. A rule chain may
/// replace the template with a step-specific one.
///
/// # Examples
///
/// ```
/// use cascade_validator::foundation::{Validate, ValidationError};
///
/// struct Even;
///
/// impl Validate for Even {
///     type Input = i64;
///
///     fn validate(&self, input: &i64) -> Result<(), ValidationError> {
///         if input % 2 == 0 {
///             Ok(())
///         } else {
///             Err(ValidationError::new("even", "'{field}' must be even")
///                 .with_param("value", input.to_string()))
///         }
///     }
/// }
///
/// assert!(Even.validate(&4).is_ok());
/// assert!(Even.validate(&3).is_err());
/// ```
pub trait Validate {
    /// The type of input being validated.
    ///
    /// Use `?Sized` to allow validation of unsized types like `str`.
    type Input: ?Sized;

    /// Validates the input value.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;

    /// Returns the name of this check, used in trace output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<V: Validate + ?Sized> Validate for &V {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<V: Validate + ?Sized> Validate for Box<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<V: Validate + ?Sized> Validate for Arc<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
