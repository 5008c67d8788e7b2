//! Encoded request parameters.
//!
//! Provides [`EncodedParams`], a multi-valued key/value set that becomes a
//! query string or a form-encoded request body.

use std::collections::BTreeMap;

use super::error::EncodeError;

/// A multi-valued parameter set.
///
/// Keys are unique and kept in sorted order; each key carries one or more
/// values in insertion order. Combining sets never replaces a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedParams {
    values: BTreeMap<String, Vec<String>>,
}

impl EncodedParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value under `key`, keeping any values already present.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// Replaces every value under `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), vec![value.into()]);
    }

    /// Removes `key` and returns its values.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.values.remove(key)
    }

    /// Returns the first value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns every value stored under `key`.
    #[must_use]
    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map_or(&[], Vec::as_slice)
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the distinct keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterates over every `(key, value)` pair, repeating keys that hold
    /// several values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| (key.as_str(), value.as_str()))
        })
    }

    /// Appends every value of `other` into this set.
    pub fn merge(&mut self, other: EncodedParams) {
        for (key, values) in other.values {
            self.values.entry(key).or_default().extend(values);
        }
    }

    /// Consuming variant of [`merge`](Self::merge).
    #[must_use]
    pub fn merged(mut self, other: EncodedParams) -> Self {
        self.merge(other);
        self
    }

    /// Moves every key under `prefix` using bracket notation.
    ///
    /// `field` becomes `prefix[field]` and `goals[]` becomes
    /// `prefix[goals][]`.
    #[must_use]
    pub fn nest(self, prefix: &str) -> Self {
        let values = self
            .values
            .into_iter()
            .map(|(key, values)| (nest_key(prefix, &key), values))
            .collect();
        Self { values }
    }

    /// Serializes the set as `application/x-www-form-urlencoded` text.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying form serializer rejects a pair.
    pub fn to_query_string(&self) -> Result<String, EncodeError> {
        let pairs: Vec<(&str, &str)> = self.iter().collect();
        serde_urlencoded::to_string(pairs).map_err(|e| EncodeError::Custom(e.to_string()))
    }
}

impl<K, V> FromIterator<(K, V)> for EncodedParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<K, V> Extend<(K, V)> for EncodedParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.append(key, value);
        }
    }
}

fn nest_key(prefix: &str, key: &str) -> String {
    match key.find('[') {
        Some(pos) => {
            let (head, rest) = key.split_at(pos);
            format!("{prefix}[{head}]{rest}")
        }
        None => format!("{prefix}[{key}]"),
    }
}
