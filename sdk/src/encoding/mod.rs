//! Request parameter encoding.
//!
//! Option values are plain structs deriving [`serde::Serialize`]. The
//! [`ParamEncoder`] flattens them into [`EncodedParams`]:
//!
//! - scalar fields map to `name=value`, `None` fields are omitted;
//! - lists of scalars repeat the key (`ids=1&ids=2`);
//! - [`ParamEncoder::encode_slice`] writes lists of structs as `alias[i][field]`;
//! - [`ParamEncoder::encode_map`] writes string-keyed maps as `alias[key]`.
//!
//! Types that need more than the generic rules override
//! [`ToParams::to_params`] and merge their manual values into the
//! generated ones.
//!
//! # Example
//!
//! ```rust
//! use affise_sdk::encoding::{ParamEncoder, ToParams};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct ListOpts {
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     limit: Option<u32>,
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     order: Option<String>,
//! }
//!
//! impl ToParams for ListOpts {}
//!
//! let opts = ListOpts { limit: Some(1), order: None };
//! let params = opts.to_params(&ParamEncoder::new()).unwrap();
//! assert_eq!(params.get("limit"), Some("1"));
//! assert!(!params.contains_key("order"));
//! ```

pub mod error;
pub mod params;
mod ser;

use std::fmt::Display;

use serde::Serialize;

pub use error::EncodeError;
pub use params::EncodedParams;

use ser::{MapSerializer, ParamsSerializer, SliceSerializer};

/// Flattens option values into request parameters.
///
/// The encoder holds no per-call state; one instance lives inside each
/// client and is shared by every request it builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamEncoder {
    _private: (),
}

impl ParamEncoder {
    /// Creates a new encoder.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Encodes a struct or string-keyed map.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::NotStruct`] if `src` is neither a struct nor
    /// a map, and [`EncodeError::UnsupportedField`] if a field holds a
    /// nested struct, map or list of non-scalars.
    pub fn encode<T: ?Sized + Serialize>(&self, src: &T) -> Result<EncodedParams, EncodeError> {
        src.serialize(ParamsSerializer)
    }

    /// Encodes a list of structs under `alias` as `alias[i][field]`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::NilValue`] for `None`, [`EncodeError::NotSequence`]
    /// if `src` is not a list, or any error from encoding an element.
    pub fn encode_slice<T: ?Sized + Serialize>(
        &self,
        alias: &str,
        src: &T,
    ) -> Result<EncodedParams, EncodeError> {
        src.serialize(SliceSerializer { alias })
    }

    /// Encodes a map under `alias` as `alias[key]`.
    ///
    /// `None` produces an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::NotMap`] if `src` is not a map.
    pub fn encode_map<T: ?Sized + Serialize>(
        &self,
        alias: &str,
        src: &T,
    ) -> Result<EncodedParams, EncodeError> {
        src.serialize(MapSerializer { alias })
    }
}

/// Conversion of an options value into request parameters.
///
/// The default implementation runs the generic [`ParamEncoder::encode`].
/// Options with fields marked `#[serde(skip)]` override it to encode those
/// fields by hand and merge them in.
pub trait ToParams: Serialize {
    /// Produces the parameters for this value.
    ///
    /// # Errors
    ///
    /// Returns an error if any field cannot be encoded.
    fn to_params(&self, encoder: &ParamEncoder) -> Result<EncodedParams, EncodeError> {
        encoder.encode(self)
    }
}

/// Joins integers with commas: `[1, 2, 3]` becomes `"1,2,3"`.
#[must_use]
pub fn comma_separated_ints<T: Display>(src: &[T]) -> String {
    src.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Joins strings with commas: `["DE", "UA"]` becomes `"DE,UA"`.
#[must_use]
pub fn comma_separated_strings<S: AsRef<str>>(src: &[S]) -> String {
    src.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use serde::Serialize;

    use super::*;

    #[derive(Debug, Default, Serialize)]
    struct ListOpts {
        #[serde(skip_serializing_if = "Option::is_none")]
        page: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        order: Option<String>,
        #[serde(rename = "orderType", skip_serializing_if = "Option::is_none")]
        order_type: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        ids: Vec<String>,
    }

    impl ToParams for ListOpts {}

    #[derive(Debug, Serialize)]
    struct Item {
        field1: i32,
        field2: String,
    }

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "lowercase")]
    enum Status {
        Active,
    }

    #[derive(Debug, Serialize)]
    struct Filter {
        #[serde(rename = "filter[date_from]")]
        date_from: String,
    }

    #[derive(Debug, Serialize)]
    struct Flattened {
        #[serde(flatten)]
        filter: Filter,
        status: Status,
        enabled: bool,
        ratio: f64,
    }

    #[derive(Debug, Serialize)]
    struct Nested {
        item: Item,
    }

    #[derive(Debug, Serialize)]
    struct WithManual {
        pid: u64,
        #[serde(skip)]
        offer_ids: Vec<u64>,
    }

    impl ToParams for WithManual {
        fn to_params(&self, encoder: &ParamEncoder) -> Result<EncodedParams, EncodeError> {
            let mut params = encoder.encode(self)?;
            for (i, id) in self.offer_ids.iter().enumerate() {
                params.append(format!("offer_id[{i}]"), id.to_string());
            }
            Ok(params)
        }
    }

    #[test]
    fn test_encode_omits_empty_fields() {
        let opts = ListOpts {
            limit: Some(1),
            order: Some("title".to_string()),
            ..Default::default()
        };
        let params = opts.to_params(&ParamEncoder::new()).expect("encode");

        let keys: Vec<&str> = params.keys().collect();
        assert_eq!(keys, vec!["limit", "order"]);
        assert_eq!(
            params.to_query_string().expect("query"),
            "limit=1&order=title"
        );
    }

    #[test]
    fn test_encode_default_is_empty() {
        let params = ParamEncoder::new()
            .encode(&ListOpts::default())
            .expect("encode");
        assert!(params.is_empty());
    }

    #[test]
    fn test_encode_repeats_list_values() {
        let opts = ListOpts {
            ids: vec!["a".to_string(), "b".to_string()],
            ..Default::default()
        };
        let params = ParamEncoder::new().encode(&opts).expect("encode");
        assert_eq!(params.get_all("ids"), ["a", "b"]);
    }

    #[test]
    fn test_encode_flatten_enum_bool_float() {
        let value = Flattened {
            filter: Filter {
                date_from: "2024-01-01".to_string(),
            },
            status: Status::Active,
            enabled: true,
            ratio: 1.5,
        };
        let params = ParamEncoder::new().encode(&value).expect("encode");
        assert_eq!(params.get("filter[date_from]"), Some("2024-01-01"));
        assert_eq!(params.get("status"), Some("active"));
        assert_eq!(params.get("enabled"), Some("true"));
        assert_eq!(params.get("ratio"), Some("1.5"));
    }

    #[test]
    fn test_encode_nested_struct_is_structural_error() {
        let value = Nested {
            item: Item {
                field1: 1,
                field2: "x".to_string(),
            },
        };
        let err = ParamEncoder::new().encode(&value).expect_err("nested");
        assert!(matches!(err, EncodeError::UnsupportedField { ref field, .. } if field == "item"));
        assert!(!err.is_caller_error());
    }

    #[test]
    fn test_encode_rejects_scalar_root() {
        let err = ParamEncoder::new().encode(&42).expect_err("scalar");
        assert_eq!(err, EncodeError::NotStruct("i32"));
    }

    #[test]
    fn test_encode_slice() {
        let items = vec![
            Item {
                field1: 1,
                field2: "x".to_string(),
            },
            Item {
                field1: 2,
                field2: "y".to_string(),
            },
        ];
        let params = ParamEncoder::new()
            .encode_slice("list", &items)
            .expect("encode");

        let keys: Vec<&str> = params.keys().collect();
        assert_eq!(
            keys,
            vec!["list[0][field1]", "list[0][field2]", "list[1][field1]", "list[1][field2]"]
        );
        assert_eq!(params.get("list[0][field1]"), Some("1"));
        assert_eq!(params.get("list[0][field2]"), Some("x"));
        assert_eq!(params.get("list[1][field1]"), Some("2"));
        assert_eq!(params.get("list[1][field2]"), Some("y"));
    }

    #[test]
    fn test_encode_slice_of_references() {
        let item = Item {
            field1: 1,
            field2: "x".to_string(),
        };
        let items = vec![&item];
        let params = ParamEncoder::new()
            .encode_slice("list", &items)
            .expect("encode");
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("list[0][field2]"), Some("x"));
    }

    #[test]
    fn test_encode_slice_errors() {
        let encoder = ParamEncoder::new();

        let nil: Option<Vec<Item>> = None;
        assert_eq!(encoder.encode_slice("bar", &nil), Err(EncodeError::NilValue));
        assert_eq!(
            encoder.encode_slice("bar", &42),
            Err(EncodeError::NotSequence("i32"))
        );
        assert_eq!(
            encoder.encode_slice("bar", "foo"),
            Err(EncodeError::NotSequence("str"))
        );

        let err = encoder.encode_slice("bar", &vec![1, 2]).expect_err("scalars");
        assert_eq!(err, EncodeError::NotStruct("i32"));
        assert!(!err.is_caller_error());
    }

    #[test]
    fn test_encode_map() {
        let mut titles = BTreeMap::new();
        titles.insert("en", "Source");
        titles.insert("ru", "Источник");

        let params = ParamEncoder::new()
            .encode_map("title_lang", &titles)
            .expect("encode");
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("title_lang[en]"), Some("Source"));
        assert_eq!(params.get("title_lang[ru]"), Some("Источник"));
    }

    #[test]
    fn test_encode_map_none_is_empty() {
        let none: Option<HashMap<String, String>> = None;
        let params = ParamEncoder::new()
            .encode_map("title_lang", &none)
            .expect("encode");
        assert!(params.is_empty());
    }

    #[test]
    fn test_encode_map_rejects_list() {
        let err = ParamEncoder::new()
            .encode_map("title_lang", &vec!["en"])
            .expect_err("list");
        assert_eq!(err, EncodeError::NotMap("sequence"));
        assert!(err.is_caller_error());
    }

    #[test]
    fn test_custom_to_params_merges_manual_values() {
        let opts = WithManual {
            pid: 610,
            offer_ids: vec![936, 937],
        };
        let params = opts.to_params(&ParamEncoder::new()).expect("encode");
        assert_eq!(params.get("pid"), Some("610"));
        assert_eq!(params.get("offer_id[0]"), Some("936"));
        assert_eq!(params.get("offer_id[1]"), Some("937"));
        assert!(!params.contains_key("offer_ids"));
    }

    #[test]
    fn test_comma_separated_ints() {
        assert_eq!(comma_separated_ints(&[1, 2, 3]), "1,2,3");
        assert_eq!(comma_separated_ints(&[1]), "1");
        assert_eq!(comma_separated_ints::<i32>(&[]), "");
    }

    #[test]
    fn test_comma_separated_strings() {
        assert_eq!(comma_separated_strings(&["DE", "UA"]), "DE,UA");
        assert_eq!(comma_separated_strings(&["DE"]), "DE");
        assert_eq!(comma_separated_strings::<&str>(&[]), "");
    }
}
