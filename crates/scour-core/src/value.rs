use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, SeqAccess, Visitor},
    ser::{SerializeMap, SerializeSeq},
};
use std::{cmp::Ordering, fmt, slice};

///
/// Value
///
/// Closed value model for search parameters. Everything a caller can put on
/// the right-hand side of a condition — or inside the `_groups` control
/// structure — is one of these variants.
///
/// `Map` preserves entry order; group parsing depends on walking entries in
/// document order, so maps are backed by a pair vector rather than a
/// sorted/hashed container.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    Map(Vec<(String, Value)>),
}

///
/// Numeric
///
/// Internal numeric representation used for cross-variant comparisons.
/// Signed and unsigned integers widen to `i128`; anything involving a
/// float compares as `f64`.
///

enum Numeric {
    Int(i128),
    Float(f64),
}

impl Value {
    /// Whether this value counts as an empty form field at intake.
    ///
    /// Blank values never reach the tokenizer; typed `false`/`0` are real
    /// values and pass through.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    const fn numeric(&self) -> Option<Numeric> {
        match self {
            Self::Int(v) => Some(Numeric::Int(*v as i128)),
            Self::Uint(v) => Some(Numeric::Int(*v as i128)),
            Self::Float(v) => Some(Numeric::Float(*v)),
            _ => None,
        }
    }

    /// Equality across variants.
    ///
    /// Returns `None` when the comparison is not defined (mismatched
    /// families, or either side `Null`); callers treat `None` as a
    /// non-match, never as inequality.
    #[must_use]
    pub fn value_eq(&self, other: &Self) -> Option<bool> {
        match (self, other) {
            (Self::Null, _) | (_, Self::Null) => None,
            (Self::Bool(a), Self::Bool(b)) => Some(a == b),
            (Self::Text(a), Self::Text(b)) => Some(a == b),
            (Self::List(a), Self::List(b)) => Some(a == b),
            (Self::Map(a), Self::Map(b)) => Some(a == b),
            _ => match (self.numeric(), other.numeric()) {
                (Some(a), Some(b)) => Some(numeric_eq(&a, &b)),
                _ => None,
            },
        }
    }

    /// Ordering across variants: numeric families compare numerically,
    /// text compares lexicographically. `None` for everything else
    /// (including NaN), evaluated as a non-match.
    #[must_use]
    pub fn value_order(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            _ => match (self.numeric(), other.numeric()) {
                (Some(a), Some(b)) => numeric_order(&a, &b),
                _ => None,
            },
        }
    }

    /// Case-sensitive substring containment on text values.
    #[must_use]
    pub fn text_contains(&self, needle: &Self) -> Option<bool> {
        match (self, needle) {
            (Self::Text(haystack), Self::Text(needle)) => Some(haystack.contains(needle.as_str())),
            _ => None,
        }
    }

    /// View this value as a sequence, coercing a scalar to a one-element
    /// slice. Membership predicates accept both spellings.
    #[must_use]
    pub fn as_sequence(&self) -> &[Self] {
        match self {
            Self::List(items) => items,
            other => slice::from_ref(other),
        }
    }
}

fn numeric_eq(left: &Numeric, right: &Numeric) -> bool {
    match (left, right) {
        (Numeric::Int(a), Numeric::Int(b)) => a == b,
        (Numeric::Int(a), Numeric::Float(b)) => (*a as f64) == *b,
        (Numeric::Float(a), Numeric::Int(b)) => *a == (*b as f64),
        (Numeric::Float(a), Numeric::Float(b)) => a == b,
    }
}

fn numeric_order(left: &Numeric, right: &Numeric) -> Option<Ordering> {
    match (left, right) {
        (Numeric::Int(a), Numeric::Int(b)) => Some(a.cmp(b)),
        (Numeric::Int(a), Numeric::Float(b)) => (*a as f64).partial_cmp(b),
        (Numeric::Float(a), Numeric::Int(b)) => a.partial_cmp(&(*b as f64)),
        (Numeric::Float(a), Numeric::Float(b)) => a.partial_cmp(b),
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Uint(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<V: Into<Self>> From<Vec<V>> for Value {
    fn from(items: Vec<V>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

///
/// Wire format
///
/// The wire shape is the plain JSON-style shape, not the derive shape:
/// scalars as themselves, lists as sequences, maps as maps in entry order.
/// Hand-written on both sides because derive would tag variants and route
/// maps through an unordered container.
///

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Uint(v) => serializer.serialize_u64(*v),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::Text(v) => serializer.serialize_str(v),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a search parameter value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Int(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Uint(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Float(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Text(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Text(v))
    }

    fn visit_unit<E>(self) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            entries.push((key, value));
        }
        Ok(Value::Map(entries))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_equality_crosses_variants() {
        assert_eq!(Value::Int(1).value_eq(&Value::Uint(1)), Some(true));
        assert_eq!(Value::Uint(2).value_eq(&Value::Float(2.0)), Some(true));
        assert_eq!(Value::Int(-1).value_eq(&Value::Uint(1)), Some(false));
    }

    #[test]
    fn null_comparisons_are_undefined() {
        assert_eq!(Value::Null.value_eq(&Value::Null), None);
        assert_eq!(Value::Int(0).value_eq(&Value::Null), None);
        assert_eq!(Value::Null.value_order(&Value::Int(0)), None);
    }

    #[test]
    fn mismatched_families_are_undefined() {
        assert_eq!(Value::Bool(true).value_eq(&Value::Int(1)), None);
        assert_eq!(Value::Text("1".into()).value_eq(&Value::Int(1)), None);
        assert_eq!(Value::Bool(true).value_order(&Value::Bool(false)), None);
    }

    #[test]
    fn text_orders_lexicographically() {
        assert_eq!(
            Value::from("apple").value_order(&Value::from("banana")),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn text_containment_is_case_sensitive() {
        let haystack = Value::from("Contains target word");
        assert_eq!(haystack.text_contains(&Value::from("target")), Some(true));
        assert_eq!(haystack.text_contains(&Value::from("TARGET")), Some(false));
        assert_eq!(Value::Int(1).text_contains(&Value::from("1")), None);
    }

    #[test]
    fn scalars_coerce_to_singleton_sequences() {
        let scalar = Value::from("a");
        assert_eq!(scalar.as_sequence(), &[Value::from("a")]);

        let list = Value::from(vec!["a", "b"]);
        assert_eq!(list.as_sequence().len(), 2);
    }

    #[test]
    fn blank_detection_covers_null_and_empty_text() {
        assert!(Value::Null.is_blank());
        assert!(Value::from("").is_blank());
        assert!(!Value::Bool(false).is_blank());
        assert!(!Value::Int(0).is_blank());
    }

    #[test]
    fn deserializes_json_shapes() {
        let value: Value = serde_json::from_str(r#"{"a": [1, -2, "x"], "b": true}"#)
            .expect("value should deserialize");

        assert_eq!(
            value,
            Value::Map(vec![
                (
                    "a".to_string(),
                    Value::List(vec![Value::Uint(1), Value::Int(-2), Value::from("x")])
                ),
                ("b".to_string(), Value::Bool(true)),
            ])
        );
    }

    #[test]
    fn serializes_back_to_plain_json() {
        let value = Value::Map(vec![
            ("z".to_string(), Value::Uint(1)),
            ("a".to_string(), Value::Null),
        ]);

        let json = serde_json::to_string(&value).expect("value should serialize");
        // Entry order is preserved, not sorted.
        assert_eq!(json, r#"{"z":1,"a":null}"#);
    }
}
