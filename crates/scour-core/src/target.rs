use crate::{
    predicate::{Combinator, Predicate},
    value::Value,
};

///
/// QueryTarget
///
/// The abstract, mutable accumulator compiled clauses are written into.
/// Any concrete engine — relational builder, in-memory evaluator, search
/// index — satisfies the contract with these two primitives; the compiler
/// calls nothing else.
///
/// Merge semantics expected of implementations:
/// - `apply_predicate` appends one unscoped comparison clause, joined to
///   any preceding sibling with AND.
/// - `scope` runs `body` against a fresh nested accumulator and merges the
///   result into the parent as a single parenthesized unit, joined with
///   `combinator`. The first clause inside a fresh scope seeds it and
///   carries no leading connective.
///
/// Boolean precedence is carried entirely by explicit scoping; targets must
/// not rely on their own operator precedence to reconstruct grouping.
///

pub trait QueryTarget {
    /// Apply one comparison as an unscoped clause.
    fn apply_predicate(&mut self, attribute: &str, predicate: Predicate, value: &Value);

    /// Open a nested boolean scope and merge it as one unit.
    fn scope<F>(&mut self, combinator: Combinator, body: F)
    where
        F: FnOnce(&mut Self),
        Self: Sized;
}
