//! Serde serializers that flatten values into [`EncodedParams`].
//!
//! Four entry points share the same scalar rules:
//!
//! - [`ParamsSerializer`] flattens a struct or string-keyed map.
//! - [`SliceSerializer`] flattens a sequence of structs into `alias[i][field]`.
//! - [`MapSerializer`] flattens a map into `alias[key]`.
//! - [`FieldSerializer`] turns one field into zero or more wire values.

use serde::ser::{self, Impossible, Serialize, Serializer as _};

use super::error::EncodeError;
use super::params::EncodedParams;

/// Generates methods that fail with `self.reject(kind)`.
macro_rules! reject {
    ($($method:ident($($arg:ty),*) => $kind:literal;)*) => {
        $(
            fn $method(self, $(_: $arg),*) -> Result<Self::Ok, Self::Error> {
                Err(self.reject($kind))
            }
        )*
    };
}

/// Same as `reject!` for methods returning a compound serializer.
macro_rules! reject_compound {
    ($($method:ident($($arg:ty),*) -> $ret:ident => $kind:literal;)*) => {
        $(
            fn $method(self, $(_: $arg),*) -> Result<Self::$ret, Self::Error> {
                Err(self.reject($kind))
            }
        )*
    };
}

/// Forwards scalar methods to [`ScalarSerializer`].
macro_rules! forward_scalars {
    ($($method:ident($ty:ty);)*) => {
        $(
            fn $method(self, v: $ty) -> Result<Self::Ok, Self::Error> {
                ScalarSerializer { field: self.field }
                    .$method(v)
                    .map(|value| value.into_iter().collect())
            }
        )*
    };
}

/// Formats scalar methods with `ToString`.
macro_rules! display_scalars {
    ($($method:ident($ty:ty);)*) => {
        $(
            fn $method(self, v: $ty) -> Result<Self::Ok, Self::Error> {
                Ok(Some(v.to_string()))
            }
        )*
    };
}

/// Serializes one scalar into its wire text; absent values yield `None`.
struct ScalarSerializer<'a> {
    field: &'a str,
}

impl ScalarSerializer<'_> {
    fn reject(&self, kind: &'static str) -> EncodeError {
        EncodeError::UnsupportedField {
            field: self.field.to_owned(),
            kind,
        }
    }
}

impl ser::Serializer for ScalarSerializer<'_> {
    type Ok = Option<String>;
    type Error = EncodeError;
    type SerializeSeq = Impossible<Self::Ok, Self::Error>;
    type SerializeTuple = Impossible<Self::Ok, Self::Error>;
    type SerializeTupleStruct = Impossible<Self::Ok, Self::Error>;
    type SerializeTupleVariant = Impossible<Self::Ok, Self::Error>;
    type SerializeMap = Impossible<Self::Ok, Self::Error>;
    type SerializeStruct = Impossible<Self::Ok, Self::Error>;
    type SerializeStructVariant = Impossible<Self::Ok, Self::Error>;

    display_scalars! {
        serialize_bool(bool);
        serialize_i8(i8);
        serialize_i16(i16);
        serialize_i32(i32);
        serialize_i64(i64);
        serialize_i128(i128);
        serialize_u8(u8);
        serialize_u16(u16);
        serialize_u32(u32);
        serialize_u64(u64);
        serialize_u128(u128);
        serialize_f32(f32);
        serialize_f64(f64);
        serialize_char(char);
        serialize_str(&str);
    }

    reject! {
        serialize_bytes(&[u8]) => "bytes";
    }

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        Ok(None)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _: &'static str) -> Result<Self::Ok, Self::Error> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
    ) -> Result<Self::Ok, Self::Error> {
        Ok(Some(variant.to_owned()))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: &T,
    ) -> Result<Self::Ok, Self::Error> {
        Err(self.reject("newtype variant"))
    }

    reject_compound! {
        serialize_seq(Option<usize>) -> SerializeSeq => "sequence";
        serialize_tuple(usize) -> SerializeTuple => "tuple";
        serialize_tuple_struct(&'static str, usize) -> SerializeTupleStruct => "tuple struct";
        serialize_tuple_variant(&'static str, u32, &'static str, usize) -> SerializeTupleVariant => "tuple variant";
        serialize_map(Option<usize>) -> SerializeMap => "map";
        serialize_struct(&'static str, usize) -> SerializeStruct => "struct";
        serialize_struct_variant(&'static str, u32, &'static str, usize) -> SerializeStructVariant => "struct variant";
    }
}

/// Serializes one field into zero or more wire values.
///
/// Sequences of scalars become repeated values under the same key.
pub(crate) struct FieldSerializer<'a> {
    pub(crate) field: &'a str,
}

impl FieldSerializer<'_> {
    fn reject(&self, kind: &'static str) -> EncodeError {
        EncodeError::UnsupportedField {
            field: self.field.to_owned(),
            kind,
        }
    }
}

impl<'a> ser::Serializer for FieldSerializer<'a> {
    type Ok = Vec<String>;
    type Error = EncodeError;
    type SerializeSeq = FieldValues<'a>;
    type SerializeTuple = FieldValues<'a>;
    type SerializeTupleStruct = Impossible<Self::Ok, Self::Error>;
    type SerializeTupleVariant = Impossible<Self::Ok, Self::Error>;
    type SerializeMap = Impossible<Self::Ok, Self::Error>;
    type SerializeStruct = Impossible<Self::Ok, Self::Error>;
    type SerializeStructVariant = Impossible<Self::Ok, Self::Error>;

    forward_scalars! {
        serialize_bool(bool);
        serialize_i8(i8);
        serialize_i16(i16);
        serialize_i32(i32);
        serialize_i64(i64);
        serialize_i128(i128);
        serialize_u8(u8);
        serialize_u16(u16);
        serialize_u32(u32);
        serialize_u64(u64);
        serialize_u128(u128);
        serialize_f32(f32);
        serialize_f64(f64);
        serialize_char(char);
        serialize_str(&str);
    }

    reject! {
        serialize_bytes(&[u8]) => "bytes";
    }

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        Ok(Vec::new())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        Ok(Vec::new())
    }

    fn serialize_unit_struct(self, _: &'static str) -> Result<Self::Ok, Self::Error> {
        Ok(Vec::new())
    }

    fn serialize_unit_variant(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
    ) -> Result<Self::Ok, Self::Error> {
        Ok(vec![variant.to_owned()])
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: &T,
    ) -> Result<Self::Ok, Self::Error> {
        Err(self.reject("newtype variant"))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        Ok(FieldValues {
            field: self.field,
            values: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        self.serialize_seq(Some(len))
    }

    reject_compound! {
        serialize_tuple_struct(&'static str, usize) -> SerializeTupleStruct => "tuple struct";
        serialize_tuple_variant(&'static str, u32, &'static str, usize) -> SerializeTupleVariant => "tuple variant";
        serialize_map(Option<usize>) -> SerializeMap => "map";
        serialize_struct(&'static str, usize) -> SerializeStruct => "struct";
        serialize_struct_variant(&'static str, u32, &'static str, usize) -> SerializeStructVariant => "struct variant";
    }
}

/// Collects the scalar elements of a list field.
pub(crate) struct FieldValues<'a> {
    field: &'a str,
    values: Vec<String>,
}

impl ser::SerializeSeq for FieldValues<'_> {
    type Ok = Vec<String>;
    type Error = EncodeError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Self::Error> {
        if let Some(text) = value.serialize(ScalarSerializer { field: self.field })? {
            self.values.push(text);
        }
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(self.values)
    }
}

impl ser::SerializeTuple for FieldValues<'_> {
    type Ok = Vec<String>;
    type Error = EncodeError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Self::Error> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        ser::SerializeSeq::end(self)
    }
}

/// Serializes a map key into text.
struct KeySerializer;

impl KeySerializer {
    fn reject(&self, kind: &'static str) -> EncodeError {
        EncodeError::UnsupportedKey(kind)
    }
}

/// Formats key methods with `ToString`.
macro_rules! display_keys {
    ($($method:ident($ty:ty);)*) => {
        $(
            fn $method(self, v: $ty) -> Result<Self::Ok, Self::Error> {
                Ok(v.to_string())
            }
        )*
    };
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = EncodeError;
    type SerializeSeq = Impossible<Self::Ok, Self::Error>;
    type SerializeTuple = Impossible<Self::Ok, Self::Error>;
    type SerializeTupleStruct = Impossible<Self::Ok, Self::Error>;
    type SerializeTupleVariant = Impossible<Self::Ok, Self::Error>;
    type SerializeMap = Impossible<Self::Ok, Self::Error>;
    type SerializeStruct = Impossible<Self::Ok, Self::Error>;
    type SerializeStructVariant = Impossible<Self::Ok, Self::Error>;

    display_keys! {
        serialize_i8(i8);
        serialize_i16(i16);
        serialize_i32(i32);
        serialize_i64(i64);
        serialize_u8(u8);
        serialize_u16(u16);
        serialize_u32(u32);
        serialize_u64(u64);
        serialize_char(char);
        serialize_str(&str);
    }

    reject! {
        serialize_bool(bool) => "bool";
        serialize_f32(f32) => "f32";
        serialize_f64(f64) => "f64";
        serialize_bytes(&[u8]) => "bytes";
        serialize_unit() => "unit";
        serialize_none() => "none";
        serialize_unit_struct(&'static str) => "unit struct";
    }

    fn serialize_some<T: ?Sized + Serialize>(self, _: &T) -> Result<Self::Ok, Self::Error> {
        Err(self.reject("option"))
    }

    fn serialize_unit_variant(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
    ) -> Result<Self::Ok, Self::Error> {
        Ok(variant.to_owned())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: &T,
    ) -> Result<Self::Ok, Self::Error> {
        Err(self.reject("newtype variant"))
    }

    reject_compound! {
        serialize_seq(Option<usize>) -> SerializeSeq => "sequence";
        serialize_tuple(usize) -> SerializeTuple => "tuple";
        serialize_tuple_struct(&'static str, usize) -> SerializeTupleStruct => "tuple struct";
        serialize_tuple_variant(&'static str, u32, &'static str, usize) -> SerializeTupleVariant => "tuple variant";
        serialize_map(Option<usize>) -> SerializeMap => "map";
        serialize_struct(&'static str, usize) -> SerializeStruct => "struct";
        serialize_struct_variant(&'static str, u32, &'static str, usize) -> SerializeStructVariant => "struct variant";
    }
}

/// Flattens a struct or string-keyed map into [`EncodedParams`].
pub(crate) struct ParamsSerializer;

impl ParamsSerializer {
    fn reject(&self, kind: &'static str) -> EncodeError {
        EncodeError::NotStruct(kind)
    }
}

impl ser::Serializer for ParamsSerializer {
    type Ok = EncodedParams;
    type Error = EncodeError;
    type SerializeSeq = Impossible<Self::Ok, Self::Error>;
    type SerializeTuple = Impossible<Self::Ok, Self::Error>;
    type SerializeTupleStruct = Impossible<Self::Ok, Self::Error>;
    type SerializeTupleVariant = Impossible<Self::Ok, Self::Error>;
    type SerializeMap = MapFields;
    type SerializeStruct = StructFields;
    type SerializeStructVariant = Impossible<Self::Ok, Self::Error>;

    reject! {
        serialize_bool(bool) => "bool";
        serialize_i8(i8) => "i8";
        serialize_i16(i16) => "i16";
        serialize_i32(i32) => "i32";
        serialize_i64(i64) => "i64";
        serialize_u8(u8) => "u8";
        serialize_u16(u16) => "u16";
        serialize_u32(u32) => "u32";
        serialize_u64(u64) => "u64";
        serialize_f32(f32) => "f32";
        serialize_f64(f64) => "f64";
        serialize_char(char) => "char";
        serialize_str(&str) => "str";
        serialize_bytes(&[u8]) => "bytes";
        serialize_unit_variant(&'static str, u32, &'static str) => "unit variant";
    }

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        Ok(EncodedParams::new())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        Ok(EncodedParams::new())
    }

    fn serialize_unit_struct(self, _: &'static str) -> Result<Self::Ok, Self::Error> {
        Ok(EncodedParams::new())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: &T,
    ) -> Result<Self::Ok, Self::Error> {
        Err(self.reject("newtype variant"))
    }

    fn serialize_map(self, _: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Ok(MapFields {
            params: EncodedParams::new(),
            key: None,
        })
    }

    fn serialize_struct(self, _: &'static str, _: usize) -> Result<Self::SerializeStruct, Self::Error> {
        Ok(StructFields {
            params: EncodedParams::new(),
        })
    }

    reject_compound! {
        serialize_seq(Option<usize>) -> SerializeSeq => "sequence";
        serialize_tuple(usize) -> SerializeTuple => "tuple";
        serialize_tuple_struct(&'static str, usize) -> SerializeTupleStruct => "tuple struct";
        serialize_tuple_variant(&'static str, u32, &'static str, usize) -> SerializeTupleVariant => "tuple variant";
        serialize_struct_variant(&'static str, u32, &'static str, usize) -> SerializeStructVariant => "struct variant";
    }
}

/// Struct fields being flattened.
pub(crate) struct StructFields {
    params: EncodedParams,
}

impl ser::SerializeStruct for StructFields {
    type Ok = EncodedParams;
    type Error = EncodeError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        for text in value.serialize(FieldSerializer { field: key })? {
            self.params.append(key, text);
        }
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(self.params)
    }
}

/// Map entries being flattened; also receives `#[serde(flatten)]` fields.
pub(crate) struct MapFields {
    params: EncodedParams,
    key: Option<String>,
}

impl ser::SerializeMap for MapFields {
    type Ok = EncodedParams;
    type Error = EncodeError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), Self::Error> {
        self.key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Self::Error> {
        let key = self
            .key
            .take()
            .ok_or_else(|| EncodeError::Custom("map value serialized before its key".to_string()))?;
        for text in value.serialize(FieldSerializer { field: &key })? {
            self.params.append(key.as_str(), text);
        }
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(self.params)
    }
}

/// Flattens a sequence of structs into `alias[i][field]` keys.
pub(crate) struct SliceSerializer<'a> {
    pub(crate) alias: &'a str,
}

impl SliceSerializer<'_> {
    fn reject(&self, kind: &'static str) -> EncodeError {
        EncodeError::NotSequence(kind)
    }
}

impl<'a> ser::Serializer for SliceSerializer<'a> {
    type Ok = EncodedParams;
    type Error = EncodeError;
    type SerializeSeq = SliceElements<'a>;
    type SerializeTuple = SliceElements<'a>;
    type SerializeTupleStruct = Impossible<Self::Ok, Self::Error>;
    type SerializeTupleVariant = Impossible<Self::Ok, Self::Error>;
    type SerializeMap = Impossible<Self::Ok, Self::Error>;
    type SerializeStruct = Impossible<Self::Ok, Self::Error>;
    type SerializeStructVariant = Impossible<Self::Ok, Self::Error>;

    reject! {
        serialize_bool(bool) => "bool";
        serialize_i8(i8) => "i8";
        serialize_i16(i16) => "i16";
        serialize_i32(i32) => "i32";
        serialize_i64(i64) => "i64";
        serialize_u8(u8) => "u8";
        serialize_u16(u16) => "u16";
        serialize_u32(u32) => "u32";
        serialize_u64(u64) => "u64";
        serialize_f32(f32) => "f32";
        serialize_f64(f64) => "f64";
        serialize_char(char) => "char";
        serialize_str(&str) => "str";
        serialize_bytes(&[u8]) => "bytes";
        serialize_unit_struct(&'static str) => "unit struct";
        serialize_unit_variant(&'static str, u32, &'static str) => "unit variant";
    }

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        Err(EncodeError::NilValue)
    }

    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        Err(EncodeError::NilValue)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: &T,
    ) -> Result<Self::Ok, Self::Error> {
        Err(self.reject("newtype variant"))
    }

    fn serialize_seq(self, _: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        Ok(SliceElements {
            alias: self.alias,
            index: 0,
            params: EncodedParams::new(),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        self.serialize_seq(Some(len))
    }

    reject_compound! {
        serialize_tuple_struct(&'static str, usize) -> SerializeTupleStruct => "tuple struct";
        serialize_tuple_variant(&'static str, u32, &'static str, usize) -> SerializeTupleVariant => "tuple variant";
        serialize_map(Option<usize>) -> SerializeMap => "map";
        serialize_struct(&'static str, usize) -> SerializeStruct => "struct";
        serialize_struct_variant(&'static str, u32, &'static str, usize) -> SerializeStructVariant => "struct variant";
    }
}

/// Elements of a list being flattened; each one is prefixed with its index.
pub(crate) struct SliceElements<'a> {
    alias: &'a str,
    index: usize,
    params: EncodedParams,
}

impl ser::SerializeSeq for SliceElements<'_> {
    type Ok = EncodedParams;
    type Error = EncodeError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Self::Error> {
        let element = value.serialize(ParamsSerializer)?;
        let prefix = format!("{}[{}]", self.alias, self.index);
        self.params.merge(element.nest(&prefix));
        self.index += 1;
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(self.params)
    }
}

impl ser::SerializeTuple for SliceElements<'_> {
    type Ok = EncodedParams;
    type Error = EncodeError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Self::Error> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        ser::SerializeSeq::end(self)
    }
}

/// Flattens a string-keyed map into `alias[key]` keys.
pub(crate) struct MapSerializer<'a> {
    pub(crate) alias: &'a str,
}

impl MapSerializer<'_> {
    fn reject(&self, kind: &'static str) -> EncodeError {
        EncodeError::NotMap(kind)
    }
}

impl<'a> ser::Serializer for MapSerializer<'a> {
    type Ok = EncodedParams;
    type Error = EncodeError;
    type SerializeSeq = Impossible<Self::Ok, Self::Error>;
    type SerializeTuple = Impossible<Self::Ok, Self::Error>;
    type SerializeTupleStruct = Impossible<Self::Ok, Self::Error>;
    type SerializeTupleVariant = Impossible<Self::Ok, Self::Error>;
    type SerializeMap = AliasedEntries<'a>;
    type SerializeStruct = Impossible<Self::Ok, Self::Error>;
    type SerializeStructVariant = Impossible<Self::Ok, Self::Error>;

    reject! {
        serialize_bool(bool) => "bool";
        serialize_i8(i8) => "i8";
        serialize_i16(i16) => "i16";
        serialize_i32(i32) => "i32";
        serialize_i64(i64) => "i64";
        serialize_u8(u8) => "u8";
        serialize_u16(u16) => "u16";
        serialize_u32(u32) => "u32";
        serialize_u64(u64) => "u64";
        serialize_f32(f32) => "f32";
        serialize_f64(f64) => "f64";
        serialize_char(char) => "char";
        serialize_str(&str) => "str";
        serialize_bytes(&[u8]) => "bytes";
        serialize_unit_struct(&'static str) => "unit struct";
        serialize_unit_variant(&'static str, u32, &'static str) => "unit variant";
    }

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        Ok(EncodedParams::new())
    }

    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        Ok(EncodedParams::new())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: &T,
    ) -> Result<Self::Ok, Self::Error> {
        Err(self.reject("newtype variant"))
    }

    fn serialize_map(self, _: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Ok(AliasedEntries {
            alias: self.alias,
            params: EncodedParams::new(),
            key: None,
        })
    }

    reject_compound! {
        serialize_seq(Option<usize>) -> SerializeSeq => "sequence";
        serialize_tuple(usize) -> SerializeTuple => "tuple";
        serialize_tuple_struct(&'static str, usize) -> SerializeTupleStruct => "tuple struct";
        serialize_tuple_variant(&'static str, u32, &'static str, usize) -> SerializeTupleVariant => "tuple variant";
        serialize_struct(&'static str, usize) -> SerializeStruct => "struct";
        serialize_struct_variant(&'static str, u32, &'static str, usize) -> SerializeStructVariant => "struct variant";
    }
}

/// Map entries being written under an alias.
pub(crate) struct AliasedEntries<'a> {
    alias: &'a str,
    params: EncodedParams,
    key: Option<String>,
}

impl ser::SerializeMap for AliasedEntries<'_> {
    type Ok = EncodedParams;
    type Error = EncodeError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), Self::Error> {
        self.key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Self::Error> {
        let key = self
            .key
            .take()
            .ok_or_else(|| EncodeError::Custom("map value serialized before its key".to_string()))?;
        let wire_key = format!("{}[{}]", self.alias, key);
        for text in value.serialize(FieldSerializer { field: &wire_key })? {
            self.params.append(wire_key.as_str(), text);
        }
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(self.params)
    }
}
