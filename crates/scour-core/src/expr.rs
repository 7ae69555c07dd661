use crate::{
    predicate::{Combinator, Predicate},
    target::QueryTarget,
    value::Value,
};
use serde::Serialize;
use std::{cmp::Ordering, collections::BTreeMap};

///
/// ClauseExpr
///
/// Ordered clause tree — the crate's own query-target implementation.
/// Each scope records its children together with the connective each child
/// merged in with, so the tree is a faithful transcript of the compiler's
/// calls: structural equality of two trees means the compilations were
/// identical, clause for clause.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ClauseExpr {
    Clause {
        attribute: String,
        predicate: Predicate,
        value: Value,
    },
    Scope(Vec<(Combinator, ClauseExpr)>),
}

///
/// ExprTarget
///
/// Accumulator building a `ClauseExpr` from compiler calls. `scope` runs
/// the body against a fresh accumulator and merges it as one unit; a body
/// that contributed nothing merges nothing, so dropped conditions leave no
/// empty scope artifacts behind.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExprTarget {
    children: Vec<(Combinator, ClauseExpr)>,
}

impl ExprTarget {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    /// True when no clause has been applied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Finish accumulation, yielding the root scope.
    #[must_use]
    pub fn into_expr(self) -> ClauseExpr {
        ClauseExpr::Scope(self.children)
    }
}

impl QueryTarget for ExprTarget {
    fn apply_predicate(&mut self, attribute: &str, predicate: Predicate, value: &Value) {
        self.children.push((
            Combinator::And,
            ClauseExpr::Clause {
                attribute: attribute.to_string(),
                predicate,
                value: value.clone(),
            },
        ));
    }

    fn scope<F>(&mut self, combinator: Combinator, body: F)
    where
        F: FnOnce(&mut Self),
    {
        let mut nested = Self::new();
        body(&mut nested);

        if !nested.children.is_empty() {
            self.children
                .push((combinator, ClauseExpr::Scope(nested.children)));
        }
    }
}

///
/// Record
///
/// Row-like value exposing attributes by name, decoupling evaluation from
/// concrete record types. `None` means the attribute is absent; every
/// predicate evaluates an absent attribute as a non-match.
///

pub trait Record {
    fn attribute(&self, name: &str) -> Option<Value>;
}

impl Record for BTreeMap<String, Value> {
    fn attribute(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl ClauseExpr {
    /// Evaluate against a single record.
    ///
    /// Connectives inside a scope bind the way SQL binds them — AND
    /// tighter than OR — so grouping is carried by the scope structure
    /// alone, exactly as a relational target would read the compiled
    /// clauses. An empty scope matches everything (the no-op filter).
    #[must_use]
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        match self {
            Self::Clause {
                attribute,
                predicate,
                value,
            } => match record.attribute(attribute) {
                Some(actual) => eval_clause(&actual, *predicate, value),
                None => false,
            },
            Self::Scope(children) => eval_scope(children, record),
        }
    }
}

/// Fold a scope's children with AND binding tighter than OR: an OR
/// connective closes the current conjunctive run and starts the next; the
/// scope matches when any run matches.
fn eval_scope<R: Record + ?Sized>(children: &[(Combinator, ClauseExpr)], record: &R) -> bool {
    let Some(((_, first), rest)) = children.split_first() else {
        return true;
    };

    let mut any_run = false;
    let mut run = first.matches(record);

    for (combinator, child) in rest {
        match combinator {
            Combinator::And => run = run && child.matches(record),
            Combinator::Or => {
                any_run = any_run || run;
                run = child.matches(record);
            }
        }
    }

    any_run || run
}

/// Evaluate one comparison clause against a present attribute value.
///
/// Undefined comparisons are non-matches on both polarities: `not_eq`
/// matches only when equality is defined and false, mirroring how a
/// relational target treats incomparable operands.
fn eval_clause(actual: &Value, predicate: Predicate, expected: &Value) -> bool {
    match predicate {
        Predicate::Eq => actual.value_eq(expected).unwrap_or(false),
        Predicate::NotEq => actual.value_eq(expected).is_some_and(|eq| !eq),
        Predicate::Cont => actual.text_contains(expected).unwrap_or(false),
        Predicate::In => in_sequence(actual, expected).unwrap_or(false),
        Predicate::NotIn => in_sequence(actual, expected).is_some_and(|found| !found),
        Predicate::Lt => actual.value_order(expected).is_some_and(Ordering::is_lt),
        Predicate::Lte => actual.value_order(expected).is_some_and(Ordering::is_le),
        Predicate::Gt => actual.value_order(expected).is_some_and(Ordering::is_gt),
        Predicate::Gte => actual.value_order(expected).is_some_and(Ordering::is_ge),
    }
}

/// Membership against a sequence (scalar expected values coerce to a
/// one-element sequence). `Some(false)` requires at least one defined
/// comparison; a sequence of incomparable items stays undefined.
fn in_sequence(actual: &Value, expected: &Value) -> Option<bool> {
    let mut saw_valid = false;

    for item in expected.as_sequence() {
        match actual.value_eq(item) {
            Some(true) => return Some(true),
            Some(false) => saw_valid = true,
            None => {}
        }
    }

    saw_valid.then_some(false)
}

///
/// TESTS
///
