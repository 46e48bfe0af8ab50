//! # cascade-validator
//!
//! Declarative per-field validation. Declare an ordered rule chain for each
//! field of a data shape, then validate instances against the resulting
//! rule set to get every failure, in declared order.
//!
//! ## Quick Start
//!
//! ```rust
//! use cascade_validator::prelude::*;
//!
//! struct SignUp {
//!     username: Option<String>,
//!     age: Option<i32>,
//! }
//!
//! let rules = RuleSet::builder("SignUp")
//!     .rule_for("username", |s: &SignUp| &s.username, |c| {
//!         c.not_null().check(not_empty()).check(max_length(20))
//!     })
//!     .rule_for("age", |s: &SignUp| &s.age, |c| {
//!         c.try_check(inclusive_between(18, 130))
//!             .with_message("{field} must be between {from} and {to}")
//!     })
//!     .build()?;
//!
//! let result = rules.validate(&SignUp { username: None, age: Some(12) });
//! assert_eq!(
//!     result.by_field()["age"],
//!     vec!["age must be between 18 and 130".to_owned()]
//! );
//! # Ok::<(), ConfigError>(())
//! ```
//!
//! ## Chains
//!
//! Steps run in declared order. Under [`CascadeMode::StopOnFirstFailure`]
//! (the default) a chain stops at its first failure; under
//! [`CascadeMode::ContinueAll`] every step runs. A step guarded by a false
//! condition is skipped: it neither passes nor fails.
//!
//! ## Creating Checks
//!
//! Use the [`validator!`] macro for zero-boilerplate checks, or implement
//! [`Validate`](foundation::Validate) by hand.
//!
//! [`CascadeMode::StopOnFirstFailure`]: rules::CascadeMode::StopOnFirstFailure
//! [`CascadeMode::ContinueAll`]: rules::CascadeMode::ContinueAll

// ValidationError is returned by value from every check; boxing it would add
// an allocation per failure.
#![allow(clippy::result_large_err)]
// Boxed step closures over generic root and field types.
#![allow(clippy::type_complexity)]
// Message templates carry `{field}` placeholders rendered at failure time.
#![allow(clippy::literal_string_with_formatting_args)]

pub mod config;
pub mod engine;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod result;
pub mod rules;
pub mod validators;
