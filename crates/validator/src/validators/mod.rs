//! Built-in atomic checks
//!
//! - **Presence**: [`NotNull`]
//! - **String**: [`NotEmpty`], [`MinLength`], [`MaxLength`], [`LengthRange`],
//!   [`Matches`]
//! - **Ordered values**: [`InclusiveBetween`], [`ExclusiveBetween`],
//!   [`GreaterThanOrEqual`], [`LessThanOrEqual`]
//!
//! Checks with parameters that can be invalid (`lo > hi`, a bad regex)
//! return `Result<_, ConfigError>` from their constructors.

pub mod length;
pub mod nullable;
pub mod pattern;
pub mod range;

pub use length::{
    LengthMode, LengthRange, MaxLength, MinLength, NotEmpty, length_range, max_length,
    min_length, not_empty,
};
pub use nullable::{NotNull, not_null};
pub use pattern::{Matches, matches};
pub use range::{
    ExclusiveBetween, GreaterThanOrEqual, InclusiveBetween, LessThanOrEqual, exclusive_between,
    greater_than_or_equal, inclusive_between, less_than_or_equal,
};
