//! Validation engine
//!
//! Runs a [`RuleSet`] against an instance. Validation reads the instance
//! only; the same inputs always give the same failures in the same order.

use crate::config::ValidatorConfig;
use crate::result::{Failure, ValidationResult};
use crate::rules::RuleSet;

/// Validates `instance` against `rule_set`, running chains in declared
/// order.
///
/// ```
/// use cascade_validator::engine;
/// use cascade_validator::rules::RuleSet;
///
/// struct Dto {
///     fizz: Option<i32>,
/// }
///
/// let rules = RuleSet::builder("Dto")
///     .rule_for("Fizz", |d: &Dto| &d.fizz, |c| c.not_null())
///     .build()
///     .unwrap();
///
/// assert!(engine::validate(&rules, &Dto { fizz: Some(1) }).is_valid());
/// assert!(!engine::validate(&rules, &Dto { fizz: None }).is_valid());
/// ```
pub fn validate<T>(rule_set: &RuleSet<T>, instance: &T) -> ValidationResult {
    rule_set.validate(instance)
}

/// Runs rule sets under a [`ValidatorConfig`].
///
/// With the `parallel` feature and `parallel_chains` set, the chains of one
/// call run on the rayon pool. Failures are still reported in declared
/// field order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engine {
    config: ValidatorConfig,
}

impl Engine {
    /// Creates an engine.
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates `instance` against `rule_set`.
    pub fn validate<T: Sync>(&self, rule_set: &RuleSet<T>, instance: &T) -> ValidationResult {
        #[cfg(feature = "parallel")]
        if self.config.parallel_chains {
            return complete(rule_set.shape(), rule_set.run_parallel(instance));
        }

        complete(rule_set.shape(), rule_set.run_sequential(instance))
    }

    /// Validates each instance in turn.
    pub fn validate_all<'a, T, I>(&self, rule_set: &RuleSet<T>, instances: I) -> Vec<ValidationResult>
    where
        T: Sync + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        instances
            .into_iter()
            .map(|instance| self.validate(rule_set, instance))
            .collect()
    }
}

pub(crate) fn complete(shape: &str, failures: Vec<Failure>) -> ValidationResult {
    let result = ValidationResult::new(failures);
    tracing::debug!(
        shape = %shape,
        failures = result.failures().len(),
        valid = result.is_valid(),
        "Validation completed"
    );
    result
}
