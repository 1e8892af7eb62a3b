//! Serde encoding of flat records into config text

use serde::Serialize;
use serde::ser::{self, Impossible, SerializeMap, SerializeStruct};

use crate::{Map, encode, options::Options};

pub fn to_map<T: ?Sized + Serialize>(value: &T) -> crate::Result<Map> {
    value
        .serialize(RecordSerializer)
        .map_err(|e| crate::error::Error::Message(e.msg))
}

pub fn to_string<T: ?Sized + Serialize>(value: &T, options: &Options) -> crate::Result<String> {
    encode::to_string(&to_map(value)?, options)
}

pub fn to_writer<W: std::io::Write, T: ?Sized + Serialize>(
    writer: W,
    value: &T,
    options: &Options,
) -> crate::Result<()> {
    encode::to_writer(writer, &to_map(value)?, options)
}

#[derive(Debug)]
pub struct SerError {
    msg: String,
}

impl core::fmt::Display for SerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl ser::Error for SerError {
    fn custom<T: core::fmt::Display>(t: T) -> Self {
        SerError { msg: t.to_string() }
    }
}

impl core::error::Error for SerError {}

fn not_a_record() -> SerError {
    SerError {
        msg: "config must be serialized from a struct or a map".into(),
    }
}

fn nested(what: &str) -> SerError {
    SerError {
        msg: format!("{what} values cannot be written to a flat config"),
    }
}

/// Top level: accepts structs and maps, produces the entry map.
struct RecordSerializer;

impl ser::Serializer for RecordSerializer {
    type Ok = Map;
    type Error = SerError;

    type SerializeSeq = Impossible<Map, SerError>;
    type SerializeTuple = Impossible<Map, SerError>;
    type SerializeTupleStruct = Impossible<Map, SerError>;
    type SerializeTupleVariant = Impossible<Map, SerError>;
    type SerializeMap = Entries;
    type SerializeStruct = Entries;
    type SerializeStructVariant = Impossible<Map, SerError>;

    fn serialize_bool(self, _v: bool) -> Result<Map, SerError> { Err(not_a_record()) }
    fn serialize_i8(self, _v: i8) -> Result<Map, SerError> { Err(not_a_record()) }
    fn serialize_i16(self, _v: i16) -> Result<Map, SerError> { Err(not_a_record()) }
    fn serialize_i32(self, _v: i32) -> Result<Map, SerError> { Err(not_a_record()) }
    fn serialize_i64(self, _v: i64) -> Result<Map, SerError> { Err(not_a_record()) }
    fn serialize_u8(self, _v: u8) -> Result<Map, SerError> { Err(not_a_record()) }
    fn serialize_u16(self, _v: u16) -> Result<Map, SerError> { Err(not_a_record()) }
    fn serialize_u32(self, _v: u32) -> Result<Map, SerError> { Err(not_a_record()) }
    fn serialize_u64(self, _v: u64) -> Result<Map, SerError> { Err(not_a_record()) }
    fn serialize_f32(self, _v: f32) -> Result<Map, SerError> { Err(not_a_record()) }
    fn serialize_f64(self, _v: f64) -> Result<Map, SerError> { Err(not_a_record()) }
    fn serialize_char(self, _v: char) -> Result<Map, SerError> { Err(not_a_record()) }
    fn serialize_str(self, _v: &str) -> Result<Map, SerError> { Err(not_a_record()) }
    fn serialize_bytes(self, _v: &[u8]) -> Result<Map, SerError> { Err(not_a_record()) }
    fn serialize_none(self) -> Result<Map, SerError> { Ok(Map::new()) }
    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Map, SerError> { value.serialize(self) }
    fn serialize_unit(self) -> Result<Map, SerError> { Ok(Map::new()) }
    fn serialize_unit_struct(self, _name: &'static str) -> Result<Map, SerError> { Ok(Map::new()) }
    fn serialize_unit_variant(self, _name: &'static str, _variant_index: u32, _variant: &'static str) -> Result<Map, SerError> { Err(not_a_record()) }
    fn serialize_newtype_struct<T: ?Sized + Serialize>(self, _name: &'static str, value: &T) -> Result<Map, SerError> { value.serialize(self) }
    fn serialize_newtype_variant<T: ?Sized + Serialize>(self, _name: &'static str, _variant_index: u32, _variant: &'static str, _value: &T) -> Result<Map, SerError> { Err(not_a_record()) }
    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, SerError> { Err(not_a_record()) }
    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, SerError> { Err(not_a_record()) }
    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeTupleStruct, SerError> { Err(not_a_record()) }
    fn serialize_tuple_variant(self, _name: &'static str, _variant_index: u32, _variant: &'static str, _len: usize) -> Result<Self::SerializeTupleVariant, SerError> { Err(not_a_record()) }
    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, SerError> { Ok(Entries { map: Map::new(), next_key: None }) }
    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct, SerError> { Ok(Entries { map: Map::new(), next_key: None }) }
    fn serialize_struct_variant(self, _name: &'static str, _variant_index: u32, _variant: &'static str, _len: usize) -> Result<Self::SerializeStructVariant, SerError> { Err(not_a_record()) }
}

struct Entries {
    map: Map,
    next_key: Option<String>,
}

impl Entries {
    fn put<T: ?Sized + Serialize>(&mut self, key: String, value: &T) -> Result<(), SerError> {
        if let Some(v) = value.serialize(ScalarSerializer).map_err(|e| SerError {
            msg: format!("{key}: {}", e.msg),
        })? {
            self.map.insert(key, v);
        }
        Ok(())
    }
}

impl SerializeMap for Entries {
    type Ok = Map;
    type Error = SerError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), SerError> {
        match key.serialize(ScalarSerializer)? {
            Some(k) => {
                self.next_key = Some(k);
                Ok(())
            }
            None => Err(SerError {
                msg: "map keys must not be None".into(),
            }),
        }
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), SerError> {
        let key = self.next_key.take().ok_or_else(|| SerError {
            msg: "value serialized before key".into(),
        })?;
        self.put(key, value)
    }

    fn end(self) -> Result<Map, SerError> {
        Ok(self.map)
    }
}

impl SerializeStruct for Entries {
    type Ok = Map;
    type Error = SerError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<(), SerError> {
        self.put(key.to_string(), value)
    }

    fn end(self) -> Result<Map, SerError> {
        Ok(self.map)
    }
}

/// One field value. `None` means the field is left out of the config.
struct ScalarSerializer;

type Scalar = Option<String>;

impl ser::Serializer for ScalarSerializer {
    type Ok = Scalar;
    type Error = SerError;

    type SerializeSeq = Impossible<Scalar, SerError>;
    type SerializeTuple = Impossible<Scalar, SerError>;
    type SerializeTupleStruct = Impossible<Scalar, SerError>;
    type SerializeTupleVariant = Impossible<Scalar, SerError>;
    type SerializeMap = Impossible<Scalar, SerError>;
    type SerializeStruct = Impossible<Scalar, SerError>;
    type SerializeStructVariant = Impossible<Scalar, SerError>;

    fn serialize_bool(self, v: bool) -> Result<Scalar, SerError> { Ok(Some(v.to_string())) }
    fn serialize_i8(self, v: i8) -> Result<Scalar, SerError> { Ok(Some(v.to_string())) }
    fn serialize_i16(self, v: i16) -> Result<Scalar, SerError> { Ok(Some(v.to_string())) }
    fn serialize_i32(self, v: i32) -> Result<Scalar, SerError> { Ok(Some(v.to_string())) }
    fn serialize_i64(self, v: i64) -> Result<Scalar, SerError> { Ok(Some(v.to_string())) }
    fn serialize_i128(self, v: i128) -> Result<Scalar, SerError> { Ok(Some(v.to_string())) }
    fn serialize_u8(self, v: u8) -> Result<Scalar, SerError> { Ok(Some(v.to_string())) }
    fn serialize_u16(self, v: u16) -> Result<Scalar, SerError> { Ok(Some(v.to_string())) }
    fn serialize_u32(self, v: u32) -> Result<Scalar, SerError> { Ok(Some(v.to_string())) }
    fn serialize_u64(self, v: u64) -> Result<Scalar, SerError> { Ok(Some(v.to_string())) }
    fn serialize_u128(self, v: u128) -> Result<Scalar, SerError> { Ok(Some(v.to_string())) }
    fn serialize_f32(self, v: f32) -> Result<Scalar, SerError> {
        if v.is_finite() { Ok(Some(ryu::Buffer::new().format_finite(v).to_string())) }
        else { Ok(Some(v.to_string())) }
    }
    fn serialize_f64(self, v: f64) -> Result<Scalar, SerError> {
        if v.is_finite() { Ok(Some(ryu::Buffer::new().format_finite(v).to_string())) }
        else { Ok(Some(v.to_string())) }
    }
    fn serialize_char(self, v: char) -> Result<Scalar, SerError> { Ok(Some(v.to_string())) }
    fn serialize_str(self, v: &str) -> Result<Scalar, SerError> { Ok(Some(v.to_string())) }
    fn serialize_bytes(self, v: &[u8]) -> Result<Scalar, SerError> {
        match core::str::from_utf8(v) {
            Ok(s) => Ok(Some(s.to_string())),
            Err(_) => Err(SerError { msg: "byte values must be UTF-8".into() }),
        }
    }
    fn serialize_none(self) -> Result<Scalar, SerError> { Ok(None) }
    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Scalar, SerError> { value.serialize(self) }
    fn serialize_unit(self) -> Result<Scalar, SerError> { Ok(Some(String::new())) }
    fn serialize_unit_struct(self, _name: &'static str) -> Result<Scalar, SerError> { Ok(Some(String::new())) }
    fn serialize_unit_variant(self, _name: &'static str, _variant_index: u32, variant: &'static str) -> Result<Scalar, SerError> { Ok(Some(variant.to_string())) }
    fn serialize_newtype_struct<T: ?Sized + Serialize>(self, _name: &'static str, value: &T) -> Result<Scalar, SerError> { value.serialize(self) }
    fn serialize_newtype_variant<T: ?Sized + Serialize>(self, _name: &'static str, _variant_index: u32, _variant: &'static str, _value: &T) -> Result<Scalar, SerError> { Err(nested("enum variant")) }
    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, SerError> { Err(nested("sequence")) }
    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, SerError> { Err(nested("tuple")) }
    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeTupleStruct, SerError> { Err(nested("tuple")) }
    fn serialize_tuple_variant(self, _name: &'static str, _variant_index: u32, _variant: &'static str, _len: usize) -> Result<Self::SerializeTupleVariant, SerError> { Err(nested("enum variant")) }
    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, SerError> { Err(nested("map")) }
    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct, SerError> { Err(nested("struct")) }
    fn serialize_struct_variant(self, _name: &'static str, _variant_index: u32, _variant: &'static str, _len: usize) -> Result<Self::SerializeStructVariant, SerError> { Err(nested("enum variant")) }
}
