//! ## Crate layout
//! - `core`: input intake, predicate catalog, group trees, compilation,
//!   and the built-in in-memory clause-expression target.
//!
//! The `prelude` module mirrors the surface a caller needs to compile a
//! search: build an `AttributeSet`, deserialize or assemble an `InputMap`,
//! and `SearchQuery::apply` it onto any `QueryTarget`.

pub use scour_core as core;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use scour_core::{error::Error, query::SearchQuery};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
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
