use crate::{
    compile::{compile_condition, compile_group},
    error::Error,
    input::{Group, GroupChild, InputMap, SearchInput},
    predicate::{Combinator, Condition},
    schema::AttributeSet,
    target::QueryTarget,
};

///
/// SearchQuery
///
/// Top-level entry point. Holds the attribute whitelist and drives one
/// compilation per `apply` call: resolve the input mode, validate
/// attributes, then lower the surviving conditions onto the target.
///
/// Conditions are processed in input order. That order decides which
/// condition seeds each compiled scope, so it is observable in the clause
/// stream even where the boolean result would not change.
///

#[derive(Clone, Debug, Default)]
pub struct SearchQuery {
    attributes: AttributeSet,
}

impl SearchQuery {
    #[must_use]
    pub const fn new(attributes: AttributeSet) -> Self {
        Self { attributes }
    }

    #[must_use]
    pub const fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Compile `input` onto `target`.
    ///
    /// Empty input — or input whose every condition is dropped — leaves
    /// the target untouched. The only error is a malformed `_groups`
    /// control value, which is a caller bug rather than user input.
    pub fn apply<T: QueryTarget>(&self, input: &InputMap, target: &mut T) -> Result<(), Error> {
        match SearchInput::resolve(input)? {
            SearchInput::Flat {
                conditions,
                or_requested,
            } => self.apply_flat(conditions, or_requested, target),
            SearchInput::Grouped(groups) => self.apply_grouped(&groups, target),
        }

        Ok(())
    }

    /// Flat mode: drop unauthorized conditions, then either chain bare AND
    /// clauses (the default) or, when OR was requested and more than one
    /// condition survived, compile a single OR group in one outer scope.
    fn apply_flat<T: QueryTarget>(
        &self,
        conditions: Vec<Condition>,
        or_requested: bool,
        target: &mut T,
    ) {
        let survivors: Vec<Condition> = conditions
            .into_iter()
            .filter(|condition| self.permits(condition))
            .collect();

        if survivors.is_empty() {
            return;
        }

        if or_requested && survivors.len() > 1 {
            let group = Group::new(
                Combinator::Or,
                survivors.into_iter().map(GroupChild::Condition).collect(),
            );
            compile_group(target, &group, Combinator::And);
        } else {
            for condition in &survivors {
                compile_condition(target, condition);
            }
        }
    }

    /// Grouped mode: prune unauthorized leaves (and any group left empty),
    /// then compile every surviving group AND-merged inside one outer
    /// scope.
    fn apply_grouped<T: QueryTarget>(&self, groups: &[Group], target: &mut T) {
        let survivors: Vec<Group> = groups.iter().filter_map(|group| self.prune(group)).collect();

        if survivors.is_empty() {
            return;
        }

        target.scope(Combinator::And, |scoped| {
            for group in &survivors {
                compile_group(scoped, group, Combinator::And);
            }
        });
    }

    /// Whether every attribute of a condition is in the whitelist. A
    /// cross-attribute condition is all-or-nothing; partial application is
    /// never attempted.
    fn permits(&self, condition: &Condition) -> bool {
        let permitted = condition
            .attributes()
            .iter()
            .all(|attribute| self.attributes.contains(attribute));

        if !permitted {
            tracing::debug!(
                attributes = ?condition.attributes(),
                "condition references unknown attribute; dropping"
            );
        }

        permitted
    }

    /// Rebuild a group keeping only authorized leaves. Dropping happens
    /// before the compile fold, so a surviving sibling still seeds its
    /// scope and no empty scopes are emitted.
    fn prune(&self, group: &Group) -> Option<Group> {
        let children: Vec<GroupChild> = group
            .children()
            .iter()
            .filter_map(|child| match child {
                GroupChild::Condition(condition) => self
                    .permits(condition)
                    .then(|| GroupChild::Condition(condition.clone())),
                GroupChild::Group(sub) => self.prune(sub).map(GroupChild::Group),
            })
            .collect();

        if children.is_empty() {
            None
        } else {
            Some(Group::new(group.combinator(), children))
        }
    }
}

///
/// TESTS
///
