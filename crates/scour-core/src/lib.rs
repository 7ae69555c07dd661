//! Core runtime for scour: map-driven search parameters compiled into
//! boolean filter expressions against abstract query targets.
//!
//! The pipeline: an ordered [`input::InputMap`] resolves at the boundary
//! into flat or grouped mode, keys tokenize into conditions against the
//! [`predicate::Predicate`] catalog, [`query::SearchQuery`] validates
//! attributes against the caller-supplied [`schema::AttributeSet`], and
//! the compiler lowers the surviving tree onto any
//! [`target::QueryTarget`] with precedence carried by explicit scopes.
//! [`expr`] ships the built-in in-memory target.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod error;
pub mod expr;
pub mod input;
pub mod predicate;
pub mod query;
pub mod schema;
pub mod target;
pub mod value;

mod compile;

///
/// Prelude
///
/// Domain vocabulary only; helpers stay at their module paths.
///

pub mod prelude {
    pub use crate::{
        error::Error,
        expr::{ClauseExpr, ExprTarget, Record},
        input::{Group, GroupChild, InputMap},
        predicate::{Combinator, Condition, Predicate},
        query::SearchQuery,
        schema::AttributeSet,
        target::QueryTarget,
        value::Value,
    };
}
