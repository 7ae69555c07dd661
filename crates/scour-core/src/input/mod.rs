//! Module: input
//! Responsibility: intake of raw key/value search parameters — ordered map
//! deserialization, control-key handling, blank pruning, and resolution
//! into the flat/grouped compilation mode.
//! Does not own: attribute validation or compilation.

pub(crate) mod key;

mod group;

pub use group::{Group, GroupChild};

use crate::{error::Error, predicate::Condition, value::Value};
use derive_more::Deref;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};
use std::fmt;

/// Control key carrying an explicit nested group structure.
pub const GROUPS_KEY: &str = "_groups";

/// Control key switching flat-mode combination from AND to OR.
pub const OR_KEY: &str = "_or";

/// The only value that enables `_or`; anything else leaves AND in place.
const OR_ENABLED: &str = "true";

///
/// InputMap
///
/// Raw search input: string keys mapped to values, in insertion order.
/// Order matters — in flat mode the first surviving condition seeds the
/// compiled group — so the map is a pair vector behind a map-shaped wire
/// format, not a sorted container.
///

#[derive(Clone, Debug, Default, Deref, PartialEq)]
pub struct InputMap(Vec<(String, Value)>);

impl InputMap {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append one entry. Duplicate keys are kept; lookup sees the first.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.push((key.into(), value.into()));
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|(entry, _)| entry == key)
            .map(|(_, value)| value)
    }

    fn is_control(key: &str) -> bool {
        key == GROUPS_KEY || key == OR_KEY
    }
}

impl From<Vec<(String, Value)>> for InputMap {
    fn from(entries: Vec<(String, Value)>) -> Self {
        Self(entries)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for InputMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl Serialize for InputMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct InputMapVisitor;

impl<'de> Visitor<'de> for InputMapVisitor {
    type Value = InputMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of search parameters")
    }

    fn visit_map<A>(self, mut access: A) -> Result<InputMap, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            entries.push((key, value));
        }
        Ok(InputMap(entries))
    }
}

impl<'de> Deserialize<'de> for InputMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(InputMapVisitor)
    }
}

///
/// SearchInput
///
/// The input map resolved once at the boundary into its compilation mode,
/// instead of re-checking control keys throughout the pipeline. `_groups`
/// wins over everything: when present, all non-control keys are ignored.
///

#[derive(Debug)]
pub(crate) enum SearchInput {
    Flat {
        conditions: Vec<Condition>,
        or_requested: bool,
    },
    Grouped(Vec<Group>),
}

impl SearchInput {
    pub(crate) fn resolve(input: &InputMap) -> Result<Self, Error> {
        if let Some(groups) = input.get(GROUPS_KEY) {
            return Ok(Self::Grouped(Group::parse_all(groups)?));
        }

        let mut conditions = Vec::new();
        for (key, value) in input.iter() {
            if InputMap::is_control(key) {
                continue;
            }
            if value.is_blank() {
                tracing::debug!(%key, "blank value; skipping");
                continue;
            }
            if let Some(condition) = key::split_key(key, value.clone()) {
                conditions.push(condition);
            }
        }

        let or_requested =
            matches!(input.get(OR_KEY), Some(Value::Text(token)) if token == OR_ENABLED);

        Ok(Self::Flat {
            conditions,
            or_requested,
        })
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Predicate;

    fn input_from(json: &str) -> InputMap {
        serde_json::from_str(json).expect("fixture should deserialize")
    }

    #[test]
    fn deserialization_preserves_key_order() {
        let input = input_from(r#"{"z_eq": 1, "a_eq": 2, "m_eq": 3}"#);

        let keys: Vec<&str> = input.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, ["z_eq", "a_eq", "m_eq"]);
    }

    #[test]
    fn flat_mode_tokenizes_in_order_and_skips_unrecognized_keys() {
        let input = input_from(r#"{"name_cont": "First", "mystery": 1, "published_eq": true}"#);

        let SearchInput::Flat {
            conditions,
            or_requested,
        } = SearchInput::resolve(&input).expect("input should resolve")
        else {
            panic!("expected flat mode");
        };

        assert!(!or_requested);
        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[0].predicate(), Predicate::Cont);
        assert_eq!(conditions[1].attributes(), ["published".to_string()]);
    }

    #[test]
    fn blank_values_are_pruned_typed_falsy_values_are_not() {
        let input = input_from(r#"{"name_eq": "", "note_eq": null, "published_eq": false, "age_eq": 0}"#);

        let SearchInput::Flat { conditions, .. } =
            SearchInput::resolve(&input).expect("input should resolve")
        else {
            panic!("expected flat mode");
        };

        let attributes: Vec<&str> = conditions
            .iter()
            .map(|c| c.attributes()[0].as_str())
            .collect();
        assert_eq!(attributes, ["published", "age"]);
    }

    #[test]
    fn or_key_requires_the_literal_true_string() {
        let enabled = input_from(r#"{"_or": "true", "name_eq": "x"}"#);
        let SearchInput::Flat { or_requested, .. } =
            SearchInput::resolve(&enabled).expect("input should resolve")
        else {
            panic!("expected flat mode");
        };
        assert!(or_requested);

        for fixture in [r#"{"_or": true}"#, r#"{"_or": "TRUE"}"#, r#"{"_or": "1"}"#] {
            let input = input_from(fixture);
            let SearchInput::Flat { or_requested, .. } =
                SearchInput::resolve(&input).expect("input should resolve")
            else {
                panic!("expected flat mode");
            };
            assert!(!or_requested, "fixture {fixture} should not enable OR");
        }
    }

    #[test]
    fn groups_key_switches_mode_and_shadows_flat_keys() {
        let input = input_from(
            r#"{"name_eq": "ignored", "_groups": [{"operator": "OR", "conditions": [{"name_eq": "x"}]}]}"#,
        );

        let SearchInput::Grouped(groups) =
            SearchInput::resolve(&input).expect("input should resolve")
        else {
            panic!("expected grouped mode");
        };
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn malformed_groups_root_fails_fast() {
        let input = input_from(r#"{"_groups": "oops"}"#);
        assert!(matches!(
            SearchInput::resolve(&input),
            Err(Error::InvalidGroups)
        ));
    }
}
