//! Rule chains
//!
//! A [`RuleChain`] is the ordered list of steps declared for one field. It is
//! plain data: the chain is interpreted step by step against a root object,
//! one [`StepOutcome`] per step, and stops early only when its
//! [`CascadeMode`] says so.
//!
//! Chains are declared through [`ChainBuilder`]. Modifiers such as
//! [`when`](ChainBuilder::when) or [`with_message`](ChainBuilder::with_message)
//! apply to the most recently declared step.

use std::borrow::{Borrow, Cow};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::{
    ConfigError, FieldRef, FieldValue, Validate, ValidationError, render_message,
};
use crate::result::Failure;
use crate::rules::gate::{Gate, GateScope};
use crate::validators::NotNull;

// ============================================================================
// POLICY AND OUTCOMES
// ============================================================================

/// What a chain does after one of its steps fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadeMode {
    /// Stop at the first failing step; later steps are not evaluated.
    #[default]
    StopOnFirstFailure,
    /// Evaluate every step and record every failure.
    ContinueAll,
}

/// Outcome of a single step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The check accepted the value.
    Passed,
    /// The check rejected the value.
    Failed(Box<ValidationError>),
    /// The step did not run: its gate was closed, or the field was absent
    /// for a value check.
    Skipped,
}

impl StepOutcome {
    /// Maps a check result to an outcome.
    #[inline]
    pub fn from_result(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self::Passed,
            Err(error) => Self::Failed(Box::new(error)),
        }
    }

    /// Returns true for [`StepOutcome::Failed`].
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns true for [`StepOutcome::Skipped`].
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}

/// Execution state of a chain.
///
/// Every run starts in `Running`. `StoppedByCascade` and `Completed` are
/// both terminal; a run reports the one it ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainState {
    /// Steps are still being evaluated.
    Running,
    /// A step failed under [`CascadeMode::StopOnFirstFailure`].
    StoppedByCascade,
    /// Every step was evaluated or skipped.
    Completed,
}

// ============================================================================
// STEP
// ============================================================================

type CheckFn<T, F> = Box<dyn Fn(&F, &T) -> StepOutcome + Send + Sync>;

struct Step<T, F: ?Sized> {
    name: String,
    check: CheckFn<T, F>,
    gate: Option<Gate<T>>,
    message: Option<Cow<'static, str>>,
    code: Option<Cow<'static, str>>,
}

impl<T, F: ?Sized> fmt::Debug for Step<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("gate", &self.gate)
            .field("message", &self.message)
            .field("code", &self.code)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// RULE CHAIN
// ============================================================================

/// The ordered steps for one field, with the cascade policy that governs
/// them.
pub struct RuleChain<T, F: ?Sized> {
    field: FieldRef<T, F>,
    steps: Vec<Step<T, F>>,
    cascade: CascadeMode,
}

impl<T: 'static, F: ?Sized + 'static> RuleChain<T, F> {
    /// Starts declaring a chain for the field `name`, read through `accessor`.
    pub fn builder<A>(name: impl Into<Cow<'static, str>>, accessor: A) -> ChainBuilder<T, F>
    where
        A: Fn(&T) -> &F + Send + Sync + 'static,
    {
        ChainBuilder::new(FieldRef::new(name, accessor))
    }
}

impl<T, F: ?Sized> RuleChain<T, F> {
    /// The field this chain validates.
    pub fn field(&self) -> &FieldRef<T, F> {
        &self.field
    }

    /// The chain's cascade policy.
    pub fn cascade(&self) -> CascadeMode {
        self.cascade
    }

    /// Number of declared steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if no steps were declared.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs the chain against `root`, appending one [`Failure`] per failed
    /// step to `failures`. Returns the terminal state.
    pub fn run(&self, root: &T, failures: &mut Vec<Failure>) -> ChainState {
        self.drive(root, |step, outcome| {
            if let StepOutcome::Failed(error) = outcome {
                failures.push(self.failure(step, *error));
            }
        })
    }

    /// Runs the chain and returns the outcome of every step it reached.
    ///
    /// Steps after a cascade stop are not reached and have no entry.
    pub fn outcomes(&self, root: &T) -> Vec<StepOutcome> {
        let mut outcomes = Vec::with_capacity(self.steps.len());
        self.drive(root, |_, outcome| outcomes.push(outcome));
        outcomes
    }

    fn drive(&self, root: &T, mut visit: impl FnMut(&Step<T, F>, StepOutcome)) -> ChainState {
        let value = self.field.get(root);
        let mut state = ChainState::Running;

        for (index, step) in self.steps.iter().enumerate() {
            if let Some(gate) = &step.gate
                && !gate.is_open(root)
            {
                tracing::trace!(
                    field = %self.field.name(),
                    step = index,
                    check = %step.name,
                    scope = ?gate.scope(),
                    "Step skipped by condition"
                );
                visit(step, StepOutcome::Skipped);

                if gate.scope() == GateScope::RestOfChain {
                    for rest in &self.steps[index + 1..] {
                        visit(rest, StepOutcome::Skipped);
                    }
                    state = ChainState::Completed;
                    break;
                }
                continue;
            }

            let outcome = (step.check)(value, root);
            let failed = outcome.is_failed();
            if failed {
                tracing::trace!(
                    field = %self.field.name(),
                    step = index,
                    check = %step.name,
                    "Step failed"
                );
            }
            visit(step, outcome);

            if failed && self.cascade == CascadeMode::StopOnFirstFailure {
                tracing::trace!(
                    field = %self.field.name(),
                    step = index,
                    remaining = self.steps.len() - index - 1,
                    "Chain stopped by cascade"
                );
                state = ChainState::StoppedByCascade;
                break;
            }
        }

        if state == ChainState::Running {
            state = ChainState::Completed;
        }
        state
    }

    fn failure(&self, step: &Step<T, F>, error: ValidationError) -> Failure {
        let template = step.message.as_deref().unwrap_or(&error.message);
        let message = render_message(template, self.field.display_name(), &error.params);
        let code = step.code.clone().unwrap_or(error.code);
        Failure::new(self.field.name().to_owned(), code, message)
    }
}

impl<T, F: ?Sized> fmt::Debug for RuleChain<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleChain")
            .field("field", &self.field)
            .field("steps", &self.steps)
            .field("cascade", &self.cascade)
            .finish()
    }
}

// ============================================================================
// CHAIN BUILDER
// ============================================================================

/// Declares the steps of a [`RuleChain`].
///
/// Misuse (a modifier with no step before it, two gates on one step) is
/// recorded and reported when the chain is built.
///
/// # Examples
///
/// ```
/// use cascade_validator::rules::{CascadeMode, RuleChain};
/// use cascade_validator::validators::{max_length, not_empty};
///
/// struct Dto {
///     foo: Option<String>,
/// }
///
/// let chain = RuleChain::builder("Foo", |d: &Dto| &d.foo)
///     .not_null()
///     .with_message("Foo should not be null")
///     .check(not_empty())
///     .check(max_length(100))
///     .build(CascadeMode::StopOnFirstFailure)
///     .unwrap();
///
/// let mut failures = Vec::new();
/// chain.run(&Dto { foo: None }, &mut failures);
/// assert_eq!(failures[0].message, "Foo should not be null");
/// ```
pub struct ChainBuilder<T, F: ?Sized> {
    field: FieldRef<T, F>,
    steps: Vec<Step<T, F>>,
    cascade: Option<CascadeMode>,
    pending_gate: Option<(Gate<T>, &'static str)>,
    errors: Vec<ConfigError>,
}

impl<T: 'static, F: ?Sized + 'static> ChainBuilder<T, F> {
    /// Starts a chain for `field`.
    pub fn new(field: FieldRef<T, F>) -> Self {
        Self {
            field,
            steps: Vec::new(),
            cascade: None,
            pending_gate: None,
            errors: Vec::new(),
        }
    }

    /// Sets the cascade policy for this chain, overriding the rule set
    /// default.
    #[must_use = "builder methods must be chained or built"]
    pub fn cascade(mut self, mode: CascadeMode) -> Self {
        self.cascade = Some(mode);
        self
    }

    /// Sets the name substituted for `{field}` in messages.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_name(mut self, display_name: impl Into<Cow<'static, str>>) -> Self {
        self.field = self.field.with_display_name(display_name);
        self
    }

    /// Adds a presence step: fails when the field is absent.
    #[must_use = "builder methods must be chained or built"]
    pub fn not_null(self) -> Self
    where
        F: FieldValue,
    {
        self.check_field(NotNull::<F>::new())
    }

    /// Adds a value check. The step is skipped when the field is absent.
    #[must_use = "builder methods must be chained or built"]
    pub fn check<V>(self, validator: V) -> Self
    where
        F: FieldValue,
        F::Value: Borrow<V::Input>,
        V: Validate + Send + Sync + 'static,
    {
        let name = validator.name().to_owned();
        self.push_step(
            name,
            Box::new(move |field: &F, _root: &T| match field.present() {
                Some(value) => {
                    StepOutcome::from_result(validator.validate(Borrow::<V::Input>::borrow(value)))
                }
                None => StepOutcome::Skipped,
            }),
        )
    }

    /// Adds a value check from a fallible constructor.
    ///
    /// A constructor error is recorded and returned from `build`.
    #[must_use = "builder methods must be chained or built"]
    pub fn try_check<V>(mut self, validator: Result<V, ConfigError>) -> Self
    where
        F: FieldValue,
        F::Value: Borrow<V::Input>,
        V: Validate + Send + Sync + 'static,
    {
        match validator {
            Ok(validator) => self.check(validator),
            Err(error) => {
                self.errors.push(error);
                self
            }
        }
    }

    /// Adds a check applied to the field itself, present or not.
    #[must_use = "builder methods must be chained or built"]
    pub fn check_field<V>(self, validator: V) -> Self
    where
        V: Validate<Input = F> + Send + Sync + 'static,
    {
        let name = validator.name().to_owned();
        self.push_step(
            name,
            Box::new(move |field: &F, _root: &T| StepOutcome::from_result(validator.validate(field))),
        )
    }

    /// Adds a predicate step over the present value and the root object.
    ///
    /// Use it for cross-field rules. Skipped when the field is absent.
    #[must_use = "builder methods must be chained or built"]
    pub fn must<P>(self, predicate: P) -> Self
    where
        F: FieldValue,
        P: Fn(&F::Value, &T) -> bool + Send + Sync + 'static,
    {
        self.push_step(
            "Must".to_owned(),
            Box::new(move |field: &F, root: &T| match field.present() {
                Some(value) if predicate(value, root) => StepOutcome::Passed,
                Some(_) => StepOutcome::Failed(Box::new(ValidationError::new(
                    "predicate",
                    "The specified condition was not met for '{field}'.",
                ))),
                None => StepOutcome::Skipped,
            }),
        )
    }

    /// Runs the last step only when `predicate` holds for the root object.
    #[must_use = "builder methods must be chained or built"]
    pub fn when<P>(self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.gate_last(Gate::when(predicate), "when")
    }

    /// Runs the last step only when `predicate` does not hold.
    #[must_use = "builder methods must be chained or built"]
    pub fn unless<P>(self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.gate_last(Gate::unless(predicate), "unless")
    }

    /// Gates the next declared step and every step after it on `predicate`.
    #[must_use = "builder methods must be chained or built"]
    pub fn when_rest<P>(self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.gate_next(
            Gate::when(predicate).with_scope(GateScope::RestOfChain),
            "when_rest",
        )
    }

    /// Skips the next declared step and every step after it when
    /// `predicate` holds.
    #[must_use = "builder methods must be chained or built"]
    pub fn unless_rest<P>(self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.gate_next(
            Gate::unless(predicate).with_scope(GateScope::RestOfChain),
            "unless_rest",
        )
    }

    /// Replaces the message template of the last step.
    ///
    /// The template may use `{field}` and the check's params.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        match self.steps.last_mut() {
            Some(step) => step.message = Some(template.into()),
            None => self.dangling("with_message"),
        }
        self
    }

    /// Replaces the failure code of the last step.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        match self.steps.last_mut() {
            Some(step) => step.code = Some(code.into()),
            None => self.dangling("with_code"),
        }
        self
    }

    /// Finishes the chain. `default_cascade` applies unless
    /// [`cascade`](Self::cascade) was set.
    pub fn build(mut self, default_cascade: CascadeMode) -> Result<RuleChain<T, F>, ConfigError> {
        if let Some((_, modifier)) = self.pending_gate.take() {
            self.dangling(modifier);
        }
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }
        Ok(RuleChain {
            field: self.field,
            steps: self.steps,
            cascade: self.cascade.unwrap_or(default_cascade),
        })
    }

    /// Name of the field this chain is declared for.
    pub fn field_name(&self) -> &str {
        self.field.name()
    }

    fn push_step(mut self, name: String, check: CheckFn<T, F>) -> Self {
        let gate = self.pending_gate.take().map(|(gate, _)| gate);
        self.steps.push(Step {
            name,
            check,
            gate,
            message: None,
            code: None,
        });
        self
    }

    fn gate_last(mut self, gate: Gate<T>, modifier: &'static str) -> Self {
        let len = self.steps.len();
        match self.steps.last_mut() {
            None => self.dangling(modifier),
            Some(step) if step.gate.is_some() => {
                self.errors.push(ConfigError::GateAlreadySet {
                    field: self.field.name().to_owned(),
                    step: len - 1,
                });
            }
            Some(step) => step.gate = Some(gate),
        }
        self
    }

    fn gate_next(mut self, gate: Gate<T>, modifier: &'static str) -> Self {
        if self.pending_gate.is_some() {
            self.errors.push(ConfigError::GateAlreadySet {
                field: self.field.name().to_owned(),
                step: self.steps.len(),
            });
        } else {
            self.pending_gate = Some((gate, modifier));
        }
        self
    }

    fn dangling(&mut self, modifier: &'static str) {
        self.errors.push(ConfigError::DanglingModifier {
            field: self.field.name().to_owned(),
            modifier,
        });
    }
}

impl<T, F: ?Sized> fmt::Debug for ChainBuilder<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainBuilder")
            .field("field", &self.field)
            .field("steps", &self.steps.len())
            .field("cascade", &self.cascade)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{inclusive_between, max_length, not_empty};
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Dto {
        foo: Option<String>,
        fizz: Option<i32>,
        count: i32,
    }

    fn foo_chain(mode: CascadeMode) -> RuleChain<Dto, Option<String>> {
        RuleChain::builder("Foo", |d: &Dto| &d.foo)
            .not_null()
            .with_message("Foo should not be null")
            .check(not_empty())
            .with_message("Foo should not be empty")
            .check(max_length(3))
            .with_message("Foo should have a max length of {max}")
            .build(mode)
            .unwrap()
    }

    fn messages(chain: &RuleChain<Dto, Option<String>>, dto: &Dto) -> Vec<String> {
        let mut failures = Vec::new();
        chain.run(dto, &mut failures);
        failures.into_iter().map(|f| f.message).collect()
    }

    #[test]
    fn test_stop_on_first_failure() {
        let chain = foo_chain(CascadeMode::StopOnFirstFailure);
        let dto = Dto {
            foo: Some(String::new()),
            ..Dto::default()
        };

        let mut failures = Vec::new();
        let state = chain.run(&dto, &mut failures);

        assert_eq!(state, ChainState::StoppedByCascade);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].field, "Foo");
        assert_eq!(failures[0].code, "not_empty");
        assert_eq!(failures[0].message, "Foo should not be empty");
    }

    #[test]
    fn test_absent_value_skips_value_checks() {
        let chain = foo_chain(CascadeMode::ContinueAll);
        let dto = Dto::default();

        assert_eq!(messages(&chain, &dto), vec!["Foo should not be null"]);
        assert_eq!(
            chain.outcomes(&dto)[1..].to_vec(),
            vec![StepOutcome::Skipped, StepOutcome::Skipped]
        );
    }

    #[test]
    fn test_continue_all_records_each_failure() {
        let chain = RuleChain::builder("Foo", |d: &Dto| &d.foo)
            .check(max_length(1))
            .check(max_length(2))
            .must(|value: &String, _| value.starts_with('a'))
            .build(CascadeMode::ContinueAll)
            .unwrap();

        let dto = Dto {
            foo: Some("xyz".into()),
            ..Dto::default()
        };
        let mut failures = Vec::new();
        assert_eq!(chain.run(&dto, &mut failures), ChainState::Completed);

        let codes: Vec<&str> = failures.iter().map(|f| &*f.code).collect();
        assert_eq!(codes, vec!["max_length", "max_length", "predicate"]);
    }

    #[test]
    fn test_default_messages_use_display_name() {
        let chain = RuleChain::builder("start_date", |d: &Dto| &d.fizz)
            .with_name("Start date")
            .not_null()
            .build(CascadeMode::default())
            .unwrap();

        let mut failures = Vec::new();
        chain.run(&Dto::default(), &mut failures);
        assert_eq!(failures[0].field, "start_date");
        assert_eq!(failures[0].message, "'Start date' must not be null.");
    }

    #[test]
    fn test_current_check_gate() {
        let chain = RuleChain::builder("Fizz", |d: &Dto| &d.fizz)
            .try_check(inclusive_between(1, 100))
            .when(|d: &Dto| d.count > 0)
            .with_code("fizz_range")
            .build(CascadeMode::StopOnFirstFailure)
            .unwrap();

        let closed = Dto {
            fizz: Some(500),
            ..Dto::default()
        };
        assert_eq!(chain.outcomes(&closed), vec![StepOutcome::Skipped]);

        let open = Dto {
            fizz: Some(500),
            count: 1,
            ..Dto::default()
        };
        let mut failures = Vec::new();
        chain.run(&open, &mut failures);
        assert_eq!(failures[0].code, "fizz_range");
        assert_eq!(
            failures[0].message,
            "'Fizz' must be between 1 and 100. You entered 500."
        );
    }

    #[test]
    fn test_rest_of_chain_gate_skips_remaining_steps() {
        let chain = RuleChain::builder("Foo", |d: &Dto| &d.foo)
            .not_null()
            .when_rest(|d: &Dto| d.count > 0)
            .check(not_empty())
            .check(max_length(1))
            .build(CascadeMode::ContinueAll)
            .unwrap();

        let dto = Dto {
            foo: Some(String::new()),
            ..Dto::default()
        };
        assert_eq!(
            chain.outcomes(&dto),
            vec![
                StepOutcome::Passed,
                StepOutcome::Skipped,
                StepOutcome::Skipped
            ]
        );
    }

    #[test]
    fn test_cascade_override() {
        let chain = RuleChain::builder("Foo", |d: &Dto| &d.foo)
            .cascade(CascadeMode::ContinueAll)
            .check(max_length(0))
            .build(CascadeMode::StopOnFirstFailure)
            .unwrap();
        assert_eq!(chain.cascade(), CascadeMode::ContinueAll);
    }

    #[test]
    fn test_builder_misuse() {
        let err = RuleChain::builder("Foo", |d: &Dto| &d.foo)
            .with_message("nothing to attach to")
            .build(CascadeMode::default())
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DanglingModifier {
                field: "Foo".into(),
                modifier: "with_message"
            }
        );

        let err = RuleChain::builder("Foo", |d: &Dto| &d.foo)
            .not_null()
            .when(|_: &Dto| true)
            .unless(|_: &Dto| false)
            .build(CascadeMode::default())
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::GateAlreadySet {
                field: "Foo".into(),
                step: 0
            }
        );

        let err = RuleChain::builder("Foo", |d: &Dto| &d.foo)
            .not_null()
            .when_rest(|_: &Dto| true)
            .build(CascadeMode::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DanglingModifier {
                modifier: "when_rest",
                ..
            }
        ));
    }

    #[test]
    fn test_try_check_records_constructor_error() {
        let err = RuleChain::builder("Fizz", |d: &Dto| &d.fizz)
            .try_check(inclusive_between(100, 1))
            .build(CascadeMode::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRange { .. }));
    }
}
