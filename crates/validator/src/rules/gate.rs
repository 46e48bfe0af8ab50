//! Condition gates
//!
//! A gate decides whether a step runs at all. A closed gate produces
//! [`StepOutcome::Skipped`](crate::rules::StepOutcome::Skipped), never a
//! pass and never a failure.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// How far a gate reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateScope {
    /// Only the step the gate is attached to.
    CurrentCheck,
    /// The step the gate is attached to and every later step of the chain.
    RestOfChain,
}

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A predicate over the root object plus the scope it applies to.
///
/// Gates only ever see the root object, never intermediate chain state, so
/// their outcome does not depend on step order.
pub struct Gate<T> {
    predicate: Predicate<T>,
    scope: GateScope,
}

impl<T> Gate<T> {
    /// Creates a gate.
    pub fn new<P>(scope: GateScope, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            scope,
        }
    }

    /// Gate that opens when `predicate` holds, for the current check only.
    pub fn when<P>(predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::new(GateScope::CurrentCheck, predicate)
    }

    /// Gate that opens when `predicate` does not hold, for the current check only.
    pub fn unless<P>(predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::new(GateScope::CurrentCheck, move |root: &T| !predicate(root))
    }

    /// The gate's scope.
    pub fn scope(&self) -> GateScope {
        self.scope
    }

    /// Returns true if the guarded step should run for `root`.
    #[inline]
    pub fn is_open(&self, root: &T) -> bool {
        (self.predicate)(root)
    }

    pub(crate) fn with_scope(mut self, scope: GateScope) -> Self {
        self.scope = scope;
        self
    }
}

impl<T> Clone for Gate<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            scope: self.scope,
        }
    }
}

impl<T> fmt::Debug for Gate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dto {
        bar: Option<String>,
    }

    #[test]
    fn test_when_and_unless() {
        let present = Gate::when(|d: &Dto| d.bar.is_some());
        let absent = Gate::unless(|d: &Dto| d.bar.is_some());

        let some = Dto {
            bar: Some("ok".into()),
        };
        let none = Dto { bar: None };

        assert!(present.is_open(&some));
        assert!(!present.is_open(&none));
        assert!(!absent.is_open(&some));
        assert!(absent.is_open(&none));
        assert_eq!(present.scope(), GateScope::CurrentCheck);
    }

    #[test]
    fn test_with_scope() {
        let gate = Gate::when(|_: &Dto| true).with_scope(GateScope::RestOfChain);
        assert_eq!(gate.clone().scope(), GateScope::RestOfChain);
    }
}
