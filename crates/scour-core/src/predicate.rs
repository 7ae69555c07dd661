use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Predicate
///
/// Closed catalog of comparison predicates recognized from encoded key
/// suffixes. Each variant owns exactly one token spelling and one
/// comparison semantic; dispatch is a match over this enum, so an
/// out-of-catalog predicate cannot be represented at all.
///
/// Tokens overlap by substring (`in` ⊂ `not_in`, `eq` ⊂ `not_eq`,
/// `lt` ⊂ `lte`). Resolving that ambiguity is the tokenizer's job, not
/// the catalog's.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Predicate {
    Cont,
    Eq,
    NotEq,
    In,
    NotIn,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl Predicate {
    /// Every catalog entry, in registration order. Tokenizer tie-breaks
    /// (equal-length tokens) resolve to the earliest entry here.
    pub const ALL: [Self; 9] = [
        Self::Cont,
        Self::Eq,
        Self::NotEq,
        Self::In,
        Self::NotIn,
        Self::Lt,
        Self::Lte,
        Self::Gt,
        Self::Gte,
    ];

    /// Textual token recognized in input keys.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Cont => "cont",
            Self::Eq => "eq",
            Self::NotEq => "not_eq",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

///
/// Combinator
///
/// Boolean connective for groups and scopes. Anything that is not
/// recognizably OR is AND; group input never errors on an unknown
/// operator spelling.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Combinator {
    #[default]
    And,
    Or,
}

impl Combinator {
    #[must_use]
    pub(crate) fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("or") {
            Self::Or
        } else {
            Self::And
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("AND"),
            Self::Or => f.write_str("OR"),
        }
    }
}

///
/// Condition
///
/// One parsed search condition: attribute(s), predicate, value. Produced
/// once per recognized input key and immutable afterwards. More than one
/// attribute means the attributes are OR'd together around the shared
/// predicate and value.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Condition {
    attributes: Vec<String>,
    predicate: Predicate,
    value: Value,
}

impl Condition {
    /// `attributes` must be non-empty; the tokenizer is the only producer.
    #[must_use]
    pub fn new(attributes: Vec<String>, predicate: Predicate, value: Value) -> Self {
        debug_assert!(!attributes.is_empty(), "condition without attributes");

        Self {
            attributes,
            predicate,
            value,
        }
    }

    #[must_use]
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    #[must_use]
    pub const fn predicate(&self) -> Predicate {
        self.predicate
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// True when the condition spans multiple OR'd attributes.
    #[must_use]
    pub fn is_cross_attribute(&self) -> bool {
        self.attributes.len() > 1
    }
}

///
/// TESTS
///
