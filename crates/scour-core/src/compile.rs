//! Module: compile
//! Responsibility: lowering conditions and group trees onto a query target.
//! Grouping is carried by explicit scopes so logical precedence never
//! depends on the target language's own operator precedence.

use crate::{
    input::{Group, GroupChild},
    predicate::{Combinator, Condition},
    target::QueryTarget,
};

/// Compile one condition.
///
/// Single attribute: one unscoped clause. Cross-attribute OR: one
/// AND-merged scope seeded by the first attribute, with every further
/// attribute an OR-scoped single-clause unit — `(a OP v) OR (b OP v) …`
/// regardless of attribute count.
pub(crate) fn compile_condition<T: QueryTarget>(target: &mut T, condition: &Condition) {
    match condition.attributes() {
        [attribute] => target.apply_predicate(attribute, condition.predicate(), condition.value()),
        attributes => target.scope(Combinator::And, |scoped| {
            for (index, attribute) in attributes.iter().enumerate() {
                if index == 0 {
                    scoped.apply_predicate(attribute, condition.predicate(), condition.value());
                } else {
                    scoped.scope(Combinator::Or, |alternative| {
                        alternative.apply_predicate(
                            attribute,
                            condition.predicate(),
                            condition.value(),
                        );
                    });
                }
            }
        }),
    }
}

/// Compile one group as a single nested scope, merged into its parent with
/// `merge`.
///
/// Children fold in order: the first child seeds the scope with no leading
/// connective, every later child merges with the group's own combinator.
/// A child group recurses into exactly one nested scope, so the compiled
/// scope tree mirrors the group tree.
pub(crate) fn compile_group<T: QueryTarget>(target: &mut T, group: &Group, merge: Combinator) {
    target.scope(merge, |scoped| {
        for (index, child) in group.children().iter().enumerate() {
            let connective = if index == 0 {
                None
            } else {
                Some(group.combinator())
            };

            match child {
                GroupChild::Condition(condition) => match connective {
                    None => compile_condition(scoped, condition),
                    Some(combinator) => scoped.scope(combinator, |nested| {
                        compile_condition(nested, condition);
                    }),
                },
                GroupChild::Group(sub) => {
                    compile_group(scoped, sub, connective.unwrap_or_default());
                }
            }
        }
    });
}

///
/// TESTS
///
