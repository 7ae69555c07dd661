use crate::{
    error::Error,
    input::key::split_key,
    predicate::{Combinator, Condition},
    value::Value,
};

const OPERATOR_KEY: &str = "operator";
const CONDITIONS_KEY: &str = "conditions";

///
/// Group
///
/// One boolean group: a connective plus an ordered list of children, each
/// either a leaf condition or a nested group. Built per compilation from
/// the `_groups` control structure and discarded afterwards; nesting depth
/// is arbitrary.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    combinator: Combinator,
    children: Vec<GroupChild>,
}

///
/// GroupChild
///

#[derive(Clone, Debug, PartialEq)]
pub enum GroupChild {
    Condition(Condition),
    Group(Group),
}

impl Group {
    #[must_use]
    pub fn new(combinator: Combinator, children: Vec<GroupChild>) -> Self {
        Self {
            combinator,
            children,
        }
    }

    #[must_use]
    pub const fn combinator(&self) -> Combinator {
        self.combinator
    }

    #[must_use]
    pub fn children(&self) -> &[GroupChild] {
        &self.children
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Parse the `_groups` control value.
    ///
    /// The root must be a sequence — anything else is a caller bug, not
    /// user input, and fails fast. Inside the sequence the parser is
    /// permissive: entries that are not maps are skipped, unknown operator
    /// spellings fall back to AND, and a missing `conditions` list means
    /// an empty group.
    pub(crate) fn parse_all(value: &Value) -> Result<Vec<Self>, Error> {
        let Value::List(items) = value else {
            return Err(Error::InvalidGroups);
        };

        let groups = items
            .iter()
            .filter_map(|item| match item {
                Value::Map(entries) => Some(Self::parse(entries)),
                other => {
                    tracing::debug!(entry = ?other, "group entry is not a map; skipping");
                    None
                }
            })
            .collect();

        Ok(groups)
    }

    /// Parse one group object from its map entries.
    fn parse(entries: &[(String, Value)]) -> Self {
        let combinator = entries
            .iter()
            .find(|(key, _)| key == OPERATOR_KEY)
            .and_then(|(_, value)| match value {
                Value::Text(token) => Some(Combinator::from_token(token)),
                _ => None,
            })
            .unwrap_or_default();

        let mut children = Vec::new();
        if let Some((_, Value::List(items))) = entries.iter().find(|(key, _)| key == CONDITIONS_KEY)
        {
            for item in items {
                Self::parse_child(item, &mut children);
            }
        }

        Self::new(combinator, children)
    }

    /// Parse one entry of a `conditions` list.
    ///
    /// A map carrying `conditions` or `operator` is a nested group; any
    /// other map is a condition-map whose entries each tokenize into a
    /// leaf. Entries of any other shape are skipped.
    fn parse_child(item: &Value, children: &mut Vec<GroupChild>) {
        let Value::Map(entries) = item else {
            tracing::debug!(entry = ?item, "condition entry is not a map; skipping");
            return;
        };

        let is_group = entries
            .iter()
            .any(|(key, _)| key == CONDITIONS_KEY || key == OPERATOR_KEY);
        if is_group {
            children.push(GroupChild::Group(Self::parse(entries)));
            return;
        }

        for (key, value) in entries {
            if let Some(condition) = split_key(key, value.clone()) {
                children.push(GroupChild::Condition(condition));
            }
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Predicate;

    fn groups_from(json: &str) -> Vec<Group> {
        let value: Value = serde_json::from_str(json).expect("fixture should deserialize");
        Group::parse_all(&value).expect("groups should parse")
    }

    #[test]
    fn parses_operator_and_conditions() {
        let groups = groups_from(
            r#"[{"operator": "OR", "conditions": [{"name_eq": "First Post"}, {"name_eq": "Third Post"}]}]"#,
        );

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].combinator(), Combinator::Or);
        assert_eq!(groups[0].children().len(), 2);

        let GroupChild::Condition(first) = &groups[0].children()[0] else {
            panic!("expected a leaf condition");
        };
        assert_eq!(first.attributes(), ["name".to_string()]);
        assert_eq!(first.predicate(), Predicate::Eq);
        assert_eq!(first.value(), &Value::from("First Post"));
    }

    #[test]
    fn missing_or_unknown_operator_defaults_to_and() {
        let groups = groups_from(
            r#"[{"conditions": [{"name_eq": "x"}]}, {"operator": "XOR", "conditions": [{"name_eq": "y"}]}]"#,
        );

        assert_eq!(groups[0].combinator(), Combinator::And);
        assert_eq!(groups[1].combinator(), Combinator::And);
    }

    #[test]
    fn nested_groups_are_detected_inside_conditions() {
        let groups = groups_from(
            r#"[{"operator": "AND", "conditions": [
                {"operator": "OR", "conditions": [{"name_eq": "a"}, {"name_eq": "b"}]},
                {"published_eq": true}
            ]}]"#,
        );

        assert_eq!(groups[0].children().len(), 2);
        assert!(matches!(groups[0].children()[0], GroupChild::Group(_)));
        assert!(matches!(groups[0].children()[1], GroupChild::Condition(_)));
    }

    #[test]
    fn malformed_entries_are_skipped_not_fatal() {
        let groups = groups_from(
            r#"[
                "not a group",
                {"operator": "OR", "conditions": [42, {"name_eq": "x"}, {"mystery": "y"}]},
                {"operator": "AND"}
            ]"#,
        );

        // Scalar group entry dropped; scalar condition entry dropped; the
        // condition-map without a predicate token contributes nothing.
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].children().len(), 1);
        assert!(groups[1].is_empty());
    }

    #[test]
    fn non_sequence_root_is_a_contract_violation() {
        let value: Value = serde_json::from_str(r#"{"operator": "OR"}"#).expect("fixture");
        assert!(matches!(
            Group::parse_all(&value),
            Err(Error::InvalidGroups)
        ));
    }
}
