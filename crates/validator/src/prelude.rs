//! Prelude module for convenient imports.
//!
//! `use cascade_validator::prelude::*;` brings in the rule builders, the
//! built-in checks and the result types.

// ============================================================================
// FOUNDATION: Core traits and errors
// ============================================================================

pub use crate::foundation::{
    ConfigError, FieldRef, FieldValue, Validate, ValidationError, ValidationErrors,
};

// ============================================================================
// RULES: Chains, gates and rule sets
// ============================================================================

pub use crate::rules::{
    CascadeMode, ChainBuilder, ChainState, Gate, GateScope, Nested, RuleChain, RuleSet,
    RuleSetBuilder, StepOutcome,
};

// ============================================================================
// ENGINE AND RESULTS
// ============================================================================

pub use crate::config::ValidatorConfig;
pub use crate::engine::{Engine, validate};
pub use crate::result::{Failure, ValidationResult};

// ============================================================================
// VALIDATORS: All built-in checks
// ============================================================================

pub use crate::validators::*;
