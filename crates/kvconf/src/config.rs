use std::collections::btree_map;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::options::Options;
use crate::{Map, reader};

#[cfg(feature = "serde")]
use serde::de::DeserializeOwned;

/// A parsed configuration: the key/value entries of one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    map: Map,
}

impl Config {
    pub fn from_path<P: AsRef<Path>>(path: P, options: &Options) -> Result<Self> {
        reader::read_config_from_file(path, options)
    }

    /// A copy of the entries.
    pub fn to_map(&self) -> Map {
        self.map.clone()
    }

    pub fn as_map(&self) -> &Map {
        &self.map
    }

    pub fn into_map(self) -> Map {
        self.map
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    /// Parse the value under `key` with [`FromStr`]. A missing key is `Ok(None)`.
    pub fn get_parsed<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: core::fmt::Display,
    {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        raw.parse::<T>().map(Some).map_err(|e: T::Err| Error::Bind {
            key: Some(key.to_string()),
            message: format!("{e} (value {raw:?})"),
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.map.iter()
    }

    /// Fill a typed record from the entries.
    #[cfg(feature = "serde")]
    pub fn bind<T: DeserializeOwned>(&self) -> Result<T> {
        crate::de::from_map(&self.map)
    }
}

impl From<Map> for Config {
    fn from(map: Map) -> Self {
        Self { map }
    }
}

impl From<Config> for Map {
    fn from(config: Config) -> Self {
        config.map
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        reader::read_config_from_str(s, &Options::default())
    }
}

impl IntoIterator for Config {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl<'a> IntoIterator for &'a Config {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}
