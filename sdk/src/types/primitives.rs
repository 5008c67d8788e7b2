//! Primitive types shared by the API models.
//!
//! The API is loose about scalar encodings: flags arrive as booleans,
//! numbers or strings, and some identifiers arrive as quoted numbers.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// A boolean that accepts `true`, `"true"`, `1`, `"1"` and `false`,
/// `"false"`, `0`, `"0"`, `""` on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FlexBool(pub bool);

impl FlexBool {
    /// Returns the wrapped value.
    #[must_use]
    pub const fn value(self) -> bool {
        self.0
    }
}

impl From<bool> for FlexBool {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl From<FlexBool> for bool {
    fn from(value: FlexBool) -> Self {
        value.0
    }
}

impl Deref for FlexBool {
    type Target = bool;

    fn deref(&self) -> &bool {
        &self.0
    }
}

struct FlexBoolVisitor;

impl Visitor<'_> for FlexBoolVisitor {
    type Value = FlexBool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, 0, 1 or one of \"true\", \"false\", \"1\", \"0\", \"\"")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(FlexBool(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        match v {
            0 => Ok(FlexBool(false)),
            1 => Ok(FlexBool(true)),
            _ => Err(E::invalid_value(de::Unexpected::Unsigned(v), &self)),
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        match v {
            0 => Ok(FlexBool(false)),
            1 => Ok(FlexBool(true)),
            _ => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        match v {
            "true" | "1" => Ok(FlexBool(true)),
            "false" | "0" | "" => Ok(FlexBool(false)),
            _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for FlexBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FlexBoolVisitor)
    }
}

/// Allowed or blocked sub values of an advertiser or offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubAccount {
    /// Comma separated sub values.
    pub value: String,
    /// Whether the values are excluded rather than allowed.
    pub except: FlexBool,
}

/// Deserializes an unsigned integer sent either as a number or as a
/// quoted number.
///
/// # Errors
///
/// Fails on anything but a non-negative integer or its decimal text.
pub fn u64_from_str_or_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    struct U64Visitor;

    impl Visitor<'_> for U64Visitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an unsigned integer or a string holding one")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            if v.is_empty() {
                return Ok(0);
            }
            v.parse()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }

    deserializer.deserialize_any(U64Visitor)
}

/// Deserializes a collection the API sends either as a JSON object keyed
/// by ID or as an array, keeping the values in document order.
///
/// Object keys are discarded. Only use this where every value repeats its
/// key in its own ID field, so nothing is lost. `null` yields an empty list.
///
/// # Errors
///
/// Fails if an element does not deserialize into `T`.
pub fn keyed_values<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct KeyedValuesVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for KeyedValuesVisitor<T> {
        type Value = Vec<T>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object or an array")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Vec<T>, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Vec<T>, E> {
            Ok(Vec::new())
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<T>, A::Error> {
            let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(value) = seq.next_element()? {
                values.push(value);
            }
            Ok(values)
        }

        fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Vec<T>, A::Error> {
            let mut values = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((_, value)) = map.next_entry::<de::IgnoredAny, T>()? {
                values.push(value);
            }
            Ok(values)
        }
    }

    deserializer.deserialize_any(KeyedValuesVisitor(PhantomData))
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_flex_bool_accepts_true_forms() {
        for raw in [r#"true"#, r#""true""#, r#"1"#, r#""1""#] {
            let value: FlexBool = serde_json::from_str(raw).expect(raw);
            assert!(value.value(), "{raw}");
        }
    }

    #[test]
    fn test_flex_bool_accepts_false_forms() {
        for raw in [r#"false"#, r#""false""#, r#"0"#, r#""0""#, r#""""#] {
            let value: FlexBool = serde_json::from_str(raw).expect(raw);
            assert!(!*value, "{raw}");
        }
    }

    #[test]
    fn test_flex_bool_rejects_unknown() {
        for raw in [r#""yes""#, r#"2"#, r#"null"#, r#"[]"#] {
            assert!(serde_json::from_str::<FlexBool>(raw).is_err(), "{raw}");
        }
    }

    #[test]
    fn test_sub_account() {
        let sub: SubAccount =
            serde_json::from_str(r#"{"value":"a,b","except":"1"}"#).expect("sub account");
        assert_eq!(sub.value, "a,b");
        assert!(sub.except.value());
    }

    #[test]
    fn test_u64_from_str_or_int() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(deserialize_with = "u64_from_str_or_int")]
            pid: u64,
        }

        let quoted: Wrapper = serde_json::from_str(r#"{"pid":"610"}"#).expect("quoted");
        assert_eq!(quoted.pid, 610);
        let plain: Wrapper = serde_json::from_str(r#"{"pid":610}"#).expect("plain");
        assert_eq!(plain.pid, 610);
        assert!(serde_json::from_str::<Wrapper>(r#"{"pid":"x"}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"pid":-1}"#).is_err());
    }

    #[test]
    fn test_keyed_values() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default, deserialize_with = "keyed_values")]
            items: Vec<u32>,
        }

        let keyed: Wrapper =
            serde_json::from_str(r#"{"items":{"b":2,"a":1,"c":3}}"#).expect("object");
        assert_eq!(keyed.items, vec![2, 1, 3]);

        let listed: Wrapper = serde_json::from_str(r#"{"items":[4,5]}"#).expect("array");
        assert_eq!(listed.items, vec![4, 5]);

        let null: Wrapper = serde_json::from_str(r#"{"items":null}"#).expect("null");
        assert!(null.items.is_empty());

        let missing: Wrapper = serde_json::from_str("{}").expect("missing");
        assert!(missing.items.is_empty());
    }

    #[test]
    fn test_keyed_values_discards_keys() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Entry {
            id: u64,
        }

        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(deserialize_with = "keyed_values")]
            items: Vec<Entry>,
        }

        let keyed: Wrapper =
            serde_json::from_str(r#"{"items":{"7":{"id":7},"x":{"id":8}}}"#).expect("object");
        assert_eq!(keyed.items, vec![Entry { id: 7 }, Entry { id: 8 }]);
    }
}
