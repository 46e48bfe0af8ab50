//! Rule chains and rule sets
//!
//! - [`Gate`]: a predicate over the root object deciding whether a step runs
//! - [`RuleChain`]: ordered steps for one field under a [`CascadeMode`]
//! - [`RuleSet`]: every chain for one shape, in declared order
//! - [`Nested`]: a rule set used as one check on a nested field

pub mod chain;
pub mod gate;
pub mod rule_set;

pub use chain::{CascadeMode, ChainBuilder, ChainState, RuleChain, StepOutcome};
pub use gate::{Gate, GateScope};
pub use rule_set::{Nested, RuleSet, RuleSetBuilder};
