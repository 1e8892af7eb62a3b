#![doc = include_str!("../README.md")]

pub mod config;
pub mod encode;
pub mod error;
pub mod options;
pub mod reader;
pub mod scan;

#[cfg(feature = "serde")]
pub mod de;
#[cfg(feature = "serde")]
pub mod ser;

pub use crate::config::Config;
pub use crate::error::{Error, ParseErrorKind, Result};
pub use crate::options::Options;
pub use crate::reader::{
    read_config, read_config_from_file, read_config_from_str, read_file_into, read_into,
};

use std::collections::BTreeMap;
use std::io::{BufReader, Read};

#[cfg(feature = "serde")]
use serde::{Serialize, de::DeserializeOwned};

/// Key to value entries of one parsed config.
pub type Map = BTreeMap<String, String>;

pub fn parse_str(s: &str, options: &Options) -> Result<Map> {
    crate::scan::parse_str(s, options)
}

pub fn parse_reader<R: Read>(reader: R, options: &Options) -> Result<Map> {
    read_config(BufReader::new(reader), options).map(Config::into_map)
}

#[cfg(feature = "serde")]
pub fn from_str<T: DeserializeOwned>(s: &str, options: &Options) -> Result<T> {
    crate::de::from_str(s, options)
}

#[cfg(feature = "serde")]
pub fn from_reader<R: Read, T: DeserializeOwned>(reader: R, options: &Options) -> Result<T> {
    crate::de::from_reader(reader, options)
}

#[cfg(feature = "serde")]
pub fn to_string<T: Serialize>(value: &T, options: &Options) -> Result<String> {
    crate::ser::to_string(value, options)
}
