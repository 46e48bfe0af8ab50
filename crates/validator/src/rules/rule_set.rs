//! Rule sets
//!
//! A [`RuleSet`] maps field names of one shape to their chains, in declared
//! order. Chains are independent: none gates another, and the failures of
//! one call are the concatenation of each chain's failures.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::config::ValidatorConfig;
use crate::foundation::{ConfigError, Validate, ValidationError, ValidationErrors};
use crate::result::{Failure, ValidationResult};
use crate::rules::chain::{ChainBuilder, ChainState, RuleChain};

const NESTED_MESSAGE: &str = "'{field}' is not valid: {count} rule(s) failed.";

/// A chain with its field type erased, so chains over differently typed
/// fields can share one map.
pub(crate) trait FieldRule<T>: Send + Sync {
    fn step_count(&self) -> usize;

    fn run(&self, root: &T, failures: &mut Vec<Failure>) -> ChainState;
}

impl<T, F: ?Sized> FieldRule<T> for RuleChain<T, F> {
    fn step_count(&self) -> usize {
        self.len()
    }

    fn run(&self, root: &T, failures: &mut Vec<Failure>) -> ChainState {
        RuleChain::run(self, root, failures)
    }
}

// ============================================================================
// RULE SET
// ============================================================================

/// Every rule chain declared for one shape `T`.
///
/// Immutable once built; safe to share across threads and reuse for any
/// number of `validate` calls.
///
/// # Examples
///
/// ```
/// use cascade_validator::rules::RuleSet;
/// use cascade_validator::validators::{inclusive_between, max_length, not_empty};
///
/// struct Dto {
///     foo: Option<String>,
///     fizz: Option<i32>,
/// }
///
/// let rules = RuleSet::builder("Dto")
///     .rule_for("Foo", |d: &Dto| &d.foo, |c| {
///         c.not_null()
///             .with_message("Foo should not be null")
///             .check(not_empty())
///             .check(max_length(100))
///     })
///     .rule_for("Fizz", |d: &Dto| &d.fizz, |c| c.try_check(inclusive_between(1, 100)))
///     .build()
///     .unwrap();
///
/// let result = rules.validate(&Dto { foo: None, fizz: Some(7) });
/// assert!(!result.is_valid());
/// assert_eq!(result.failures()[0].message, "Foo should not be null");
/// ```
pub struct RuleSet<T> {
    shape: Cow<'static, str>,
    chains: IndexMap<String, Box<dyn FieldRule<T>>>,
    config: ValidatorConfig,
}

impl<T: 'static> RuleSet<T> {
    /// Starts a rule set for `shape` with the default configuration.
    pub fn builder(shape: impl Into<Cow<'static, str>>) -> RuleSetBuilder<T> {
        Self::builder_with_config(shape, ValidatorConfig::default())
    }

    /// Starts a rule set for `shape` with `config`.
    pub fn builder_with_config(
        shape: impl Into<Cow<'static, str>>,
        config: ValidatorConfig,
    ) -> RuleSetBuilder<T> {
        RuleSetBuilder {
            shape: shape.into(),
            config,
            chains: IndexMap::new(),
            errors: Vec::new(),
        }
    }
}

impl<T> RuleSet<T> {
    /// Name of the validated shape.
    pub fn shape(&self) -> &str {
        &self.shape
    }

    /// Configuration the rule set was built with.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Number of chains.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Returns true if no chains were declared.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Field names in declared order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.chains.keys().map(String::as_str)
    }

    /// Number of steps declared for `field`, if it has a chain.
    pub fn step_count(&self, field: &str) -> Option<usize> {
        self.chains.get(field).map(|chain| chain.step_count())
    }

    /// Turns the rule set into a check for a nested field.
    pub fn into_check(self) -> Nested<T> {
        Nested::new(self)
    }

    /// Validates `instance`, running every chain in declared order.
    pub fn validate(&self, instance: &T) -> ValidationResult {
        crate::engine::complete(&self.shape, self.run_sequential(instance))
    }

    pub(crate) fn run_sequential(&self, instance: &T) -> Vec<Failure> {
        let mut failures = Vec::new();
        for chain in self.chains.values() {
            chain.run(instance, &mut failures);
        }
        failures
    }

    #[cfg(feature = "parallel")]
    pub(crate) fn run_parallel(&self, instance: &T) -> Vec<Failure>
    where
        T: Sync,
    {
        use rayon::prelude::*;

        let per_chain: Vec<Vec<Failure>> = self
            .chains
            .par_values()
            .map(|chain| {
                let mut failures = Vec::new();
                chain.run(instance, &mut failures);
                failures
            })
            .collect();
        per_chain.into_iter().flatten().collect()
    }
}

impl<T> fmt::Debug for RuleSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("shape", &self.shape)
            .field("fields", &self.chains.keys().collect::<Vec<_>>())
            .field("config", &self.config)
            .finish()
    }
}

// ============================================================================
// NESTED
// ============================================================================

/// A rule set used as one check on a field of another shape.
///
/// Fails with code `validation_errors` and a `count` param; the failures of
/// the inner rule set are carried in [`ValidationError::nested`].
pub struct Nested<T> {
    rules: Arc<RuleSet<T>>,
}

impl<T> Nested<T> {
    /// Wraps a rule set, owned or shared.
    pub fn new(rules: impl Into<Arc<RuleSet<T>>>) -> Self {
        Self {
            rules: rules.into(),
        }
    }

    /// The wrapped rule set.
    pub fn rules(&self) -> &RuleSet<T> {
        &self.rules
    }
}

impl<T> Clone for Nested<T> {
    fn clone(&self) -> Self {
        Self {
            rules: Arc::clone(&self.rules),
        }
    }
}

impl<T> fmt::Debug for Nested<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nested")
            .field("shape", &self.rules.shape())
            .finish_non_exhaustive()
    }
}

impl<T> Validate for Nested<T> {
    type Input = T;

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        let failures = self.rules.run_sequential(input);
        if failures.is_empty() {
            return Ok(());
        }

        let count = failures.len();
        let errors: ValidationErrors = failures.into_iter().map(ValidationError::from).collect();
        Err(errors
            .into_single_error(NESTED_MESSAGE)
            .with_param("count", count.to_string()))
    }

    fn name(&self) -> &str {
        self.rules.shape()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Collects chains for a [`RuleSet`].
///
/// Configuration errors are collected as chains are added; [`build`]
/// returns the first one, so a misconfigured rule set never exists.
///
/// [`build`]: RuleSetBuilder::build
pub struct RuleSetBuilder<T> {
    shape: Cow<'static, str>,
    config: ValidatorConfig,
    chains: IndexMap<String, Box<dyn FieldRule<T>>>,
    errors: Vec<ConfigError>,
}

impl<T: 'static> RuleSetBuilder<T> {
    /// Declares the chain for field `name`, read through `accessor`.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule_for<F, A, D>(self, name: impl Into<Cow<'static, str>>, accessor: A, declare: D) -> Self
    where
        F: ?Sized + 'static,
        A: Fn(&T) -> &F + Send + Sync + 'static,
        D: FnOnce(ChainBuilder<T, F>) -> ChainBuilder<T, F>,
    {
        let chain = declare(RuleChain::builder(name, accessor));
        self.chain(chain)
    }

    /// Adds a chain declared elsewhere.
    #[must_use = "builder methods must be chained or built"]
    pub fn chain<F: ?Sized + 'static>(mut self, chain: ChainBuilder<T, F>) -> Self {
        let name = chain.field_name().to_owned();
        if name.trim().is_empty() {
            self.errors.push(ConfigError::EmptyFieldName {
                shape: self.shape.to_string(),
            });
            return self;
        }

        match self.chains.entry(name) {
            Entry::Occupied(entry) => {
                self.errors.push(ConfigError::DuplicateField {
                    shape: self.shape.to_string(),
                    field: entry.key().clone(),
                });
            }
            Entry::Vacant(entry) => match chain.build(self.config.default_cascade) {
                Ok(chain) => {
                    entry.insert(Box::new(chain));
                }
                Err(error) => self.errors.push(error),
            },
        }
        self
    }

    /// Finishes the rule set.
    pub fn build(self) -> Result<RuleSet<T>, ConfigError> {
        if let Some(error) = self.errors.into_iter().next() {
            tracing::debug!(shape = %self.shape, error = %error, "Rule set rejected");
            return Err(error);
        }

        tracing::debug!(
            shape = %self.shape,
            chains = self.chains.len(),
            default_cascade = ?self.config.default_cascade,
            "Rule set built"
        );
        Ok(RuleSet {
            shape: self.shape,
            chains: self.chains,
            config: self.config,
        })
    }
}

impl<T> fmt::Debug for RuleSetBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSetBuilder")
            .field("shape", &self.shape)
            .field("fields", &self.chains.keys().collect::<Vec<_>>())
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::CascadeMode;
    use crate::validators::{greater_than_or_equal, max_length, not_empty};
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Address {
        street: String,
        number: i32,
    }

    #[derive(Default)]
    struct Order {
        reference: Option<String>,
        address: Address,
    }

    fn address_rules() -> RuleSet<Address> {
        RuleSet::builder("Address")
            .rule_for("street", |a: &Address| &a.street, |c| c.check(not_empty()))
            .rule_for("number", |a: &Address| &a.number, |c| {
                c.try_check(greater_than_or_equal(1))
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_declared_order() {
        let rules = RuleSet::builder("Order")
            .rule_for("reference", |o: &Order| &o.reference, |c| c.not_null())
            .rule_for("street", |o: &Order| &o.address.street, |c| {
                c.check(not_empty())
            })
            .build()
            .unwrap();

        assert_eq!(rules.fields().collect::<Vec<_>>(), vec!["reference", "street"]);
        assert_eq!(rules.step_count("reference"), Some(1));
        assert_eq!(rules.step_count("missing"), None);

        let result = rules.validate(&Order::default());
        let fields: Vec<_> = result.failures().iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["reference", "street"]);
    }

    #[test]
    fn test_duplicate_field() {
        let err = RuleSet::builder("Order")
            .rule_for("reference", |o: &Order| &o.reference, |c| c.not_null())
            .rule_for("reference", |o: &Order| &o.reference, |c| {
                c.check(max_length(5))
            })
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            ConfigError::DuplicateField {
                shape: "Order".into(),
                field: "reference".into()
            }
        );
    }

    #[test]
    fn test_empty_field_name() {
        let err = RuleSet::builder("Order")
            .rule_for("", |o: &Order| &o.reference, |c| c.not_null())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::EmptyFieldName {
                shape: "Order".into()
            }
        );
    }

    #[test]
    fn test_first_error_wins() {
        let err = RuleSet::builder("Order")
            .rule_for("reference", |o: &Order| &o.reference, |c| {
                c.with_code("too_early")
            })
            .rule_for("", |o: &Order| &o.reference, |c| c.not_null())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::DanglingModifier { .. }));
    }

    #[test]
    fn test_config_default_cascade() {
        let config = ValidatorConfig::new().with_default_cascade(CascadeMode::ContinueAll);
        let rules = RuleSet::builder_with_config("Order", config)
            .rule_for("reference", |o: &Order| &o.reference, |c| {
                c.check(max_length(1)).check(max_length(2))
            })
            .build()
            .unwrap();

        let order = Order {
            reference: Some("abc".into()),
            ..Order::default()
        };
        assert_eq!(rules.validate(&order).failures().len(), 2);
        assert_eq!(rules.config().default_cascade, CascadeMode::ContinueAll);
    }

    #[test]
    fn test_nested_rule_set() {
        let rules = RuleSet::builder("Order")
            .rule_for("address", |o: &Order| &o.address, |c| {
                c.check_field(address_rules().into_check())
                    .with_message("Address has {count} problem(s)")
            })
            .build()
            .unwrap();

        let result = rules.validate(&Order::default());
        assert_eq!(result.failures().len(), 1);
        assert_eq!(result.failures()[0].code, "validation_errors");
        assert_eq!(result.failures()[0].message, "Address has 2 problem(s)");

        let nested = address_rules()
            .into_check()
            .validate(&Address::default())
            .unwrap_err();
        assert_eq!(nested.nested.len(), 2);
        assert_eq!(nested.nested[0].field.as_deref(), Some("street"));
    }
}
