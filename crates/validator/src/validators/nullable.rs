//! Presence check
//!
//! [`NotNull`] is the only check that sees a field before presence is
//! resolved; every other check is applied to the present value.

use std::fmt;
use std::marker::PhantomData;

use crate::foundation::{FieldValue, Validate, ValidationError};

/// Validates that a field is present.
///
/// Fails for `None`; passes for any present value, including a field type
/// that can never be absent.
///
/// # Examples
///
/// ```
/// use cascade_validator::foundation::Validate;
/// use cascade_validator::validators::not_null;
///
/// assert!(not_null::<Option<i32>>().validate(&Some(42)).is_ok());
/// assert!(not_null::<Option<i32>>().validate(&None).is_err());
/// assert!(not_null::<i32>().validate(&0).is_ok());
/// ```
pub struct NotNull<F: ?Sized> {
    _phantom: PhantomData<fn(&F)>,
}

impl<F: ?Sized> NotNull<F> {
    /// Stable code reported when this check fails.
    pub const CODE: &'static str = "not_null";

    /// Creates a `NotNull` check.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<F: ?Sized> Default for NotNull<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> Clone for NotNull<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: ?Sized> Copy for NotNull<F> {}

impl<F: ?Sized> fmt::Debug for NotNull<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NotNull")
    }
}

impl<F: FieldValue + ?Sized> Validate for NotNull<F> {
    type Input = F;

    fn validate(&self, input: &F) -> Result<(), ValidationError> {
        if input.present().is_some() {
            Ok(())
        } else {
            Err(ValidationError::new(Self::CODE, "'{field}' must not be null."))
        }
    }

    fn name(&self) -> &str {
        "NotNull"
    }
}

/// Creates a [`NotNull`] check for a field of type `F`.
#[must_use]
pub const fn not_null<F: ?Sized>() -> NotNull<F> {
    NotNull::new()
}
