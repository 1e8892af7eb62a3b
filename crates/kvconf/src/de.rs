//! serde::Deserializer over a parsed key/value map.
//!
//! The top level deserializes as a map of string keys, so any struct with named
//! fields (or a string-keyed map) can be filled from a config. Each value is the
//! raw string from the source; scalar targets parse it with `FromStr` after
//! trimming surrounding whitespace, string targets get it verbatim. An empty
//! value (`port =`) binds to `None` for any `Option` field, `Option<String>`
//! included.

use std::collections::btree_map;
use std::io::{BufReader, Read};

use serde::de::value::BorrowedStrDeserializer;
use serde::de::{self, DeserializeOwned, DeserializeSeed, MapAccess, Unexpected, Visitor};
use serde::Deserialize;

use crate::{Map, Result, error::Error, options::Options, reader};

#[derive(Debug)]
pub struct DeError {
    key: Option<String>,
    msg: String,
}

impl DeError {
    fn at_key(mut self, key: &str) -> Self {
        if self.key.is_none() {
            self.key = Some(key.to_string());
        }
        self
    }
}

impl core::fmt::Display for DeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{key}: {}", self.msg),
            None => f.write_str(&self.msg),
        }
    }
}

impl de::Error for DeError {
    fn custom<T: core::fmt::Display>(t: T) -> Self {
        DeError {
            key: None,
            msg: t.to_string(),
        }
    }
}

impl core::error::Error for DeError {}

impl From<DeError> for Error {
    fn from(e: DeError) -> Self {
        Error::Bind {
            key: e.key,
            message: e.msg,
        }
    }
}

/// Deserializes a whole [`Map`] as a record.
pub struct Deserializer<'de> {
    map: &'de Map,
}

impl<'de> Deserializer<'de> {
    pub fn from_map(map: &'de Map) -> Self {
        Self { map }
    }
}

impl<'de> de::Deserializer<'de> for Deserializer<'de> {
    type Error = DeError;

    fn deserialize_any<V>(self, visitor: V) -> core::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_map(Entries {
            iter: self.map.iter(),
            value: None,
        })
    }

    fn deserialize_option<V>(self, visitor: V) -> core::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> core::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string bytes
        byte_buf unit unit_struct seq tuple tuple_struct map struct enum identifier
        ignored_any
    }
}

struct Entries<'de> {
    iter: btree_map::Iter<'de, String, String>,
    value: Option<(&'de str, &'de str)>,
}

impl<'de> MapAccess<'de> for Entries<'de> {
    type Error = DeError;

    fn next_key_seed<K>(&mut self, seed: K) -> core::result::Result<Option<K::Value>, Self::Error>
    where
        K: DeserializeSeed<'de>,
    {
        let Some((key, value)) = self.iter.next() else {
            return Ok(None);
        };
        self.value = Some((key.as_str(), value.as_str()));
        seed.deserialize(BorrowedStrDeserializer::new(key.as_str()))
            .map(Some)
            .map_err(|e: DeError| e.at_key(key))
    }

    fn next_value_seed<V>(&mut self, seed: V) -> core::result::Result<V::Value, Self::Error>
    where
        V: DeserializeSeed<'de>,
    {
        let (key, raw) = self
            .value
            .take()
            .ok_or_else(|| <DeError as de::Error>::custom("value requested before key"))?;
        seed.deserialize(ValueDeserializer { raw })
            .map_err(|e| e.at_key(key))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// Deserializes one raw config value.
struct ValueDeserializer<'de> {
    raw: &'de str,
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident,)*) => {$(
        fn $method<V>(self, visitor: V) -> core::result::Result<V::Value, Self::Error>
        where
            V: Visitor<'de>,
        {
            match self.raw.trim().parse() {
                Ok(v) => visitor.$visit(v),
                Err(_) => Err(de::Error::invalid_value(Unexpected::Str(self.raw), &visitor)),
            }
        }
    )*};
}

impl<'de> de::Deserializer<'de> for ValueDeserializer<'de> {
    type Error = DeError;

    fn deserialize_any<V>(self, visitor: V) -> core::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.raw)
    }

    deserialize_parsed! {
        deserialize_bool => visit_bool,
        deserialize_i8 => visit_i8,
        deserialize_i16 => visit_i16,
        deserialize_i32 => visit_i32,
        deserialize_i64 => visit_i64,
        deserialize_i128 => visit_i128,
        deserialize_u8 => visit_u8,
        deserialize_u16 => visit_u16,
        deserialize_u32 => visit_u32,
        deserialize_u64 => visit_u64,
        deserialize_u128 => visit_u128,
        deserialize_f32 => visit_f32,
        deserialize_f64 => visit_f64,
    }

    fn deserialize_char<V>(self, visitor: V) -> core::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        let mut chars = self.raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(de::Error::invalid_value(Unexpected::Str(self.raw), &visitor)),
        }
    }

    fn deserialize_bytes<V>(self, visitor: V) -> core::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_borrowed_bytes(self.raw.as_bytes())
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> core::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_bytes(self, visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> core::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        if self.raw.trim().is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> core::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        if self.raw.trim().is_empty() {
            visitor.visit_unit()
        } else {
            Err(de::Error::invalid_value(Unexpected::Str(self.raw), &visitor))
        }
    }

    fn deserialize_unit_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> core::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_unit(self, visitor)
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> core::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> core::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_enum(BorrowedStrDeserializer::new(self.raw.trim()))
    }

    serde::forward_to_deserialize_any! {
        str string seq tuple tuple_struct map struct identifier ignored_any
    }
}

pub fn from_map<'de, T: Deserialize<'de>>(map: &'de Map) -> Result<T> {
    Ok(T::deserialize(Deserializer::from_map(map))?)
}

pub fn from_str<T: DeserializeOwned>(s: &str, options: &Options) -> Result<T> {
    let map = crate::scan::parse_str(s, options)?;
    from_map(&map)
}

pub fn from_reader<R: Read, T: DeserializeOwned>(reader: R, options: &Options) -> Result<T> {
    let config = reader::read_config(BufReader::new(reader), options)?;
    config.bind()
}
