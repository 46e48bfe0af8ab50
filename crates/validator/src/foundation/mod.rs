//! Core validation types and traits
//!
//! The building blocks every other module is written against:
//!
//! - **Traits**: [`Validate`] (an atomic check), [`FieldValue`] (field
//!   presence)
//! - **Fields**: [`FieldRef`], a named accessor into a root type
//! - **Errors**: [`ValidationError`], [`ValidationErrors`], [`ConfigError`]
//! - **Messages**: [`render_message`] for `{field}` / `{param}` templates

pub mod error;
pub mod field;
pub mod message;
pub mod traits;

pub use error::{ConfigError, Params, ValidationError, ValidationErrors};
pub use field::{FieldRef, FieldValue};
pub use message::render_message;
pub use traits::Validate;
