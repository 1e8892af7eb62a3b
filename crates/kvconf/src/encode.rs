//! Canonical text form of a key/value map.
//!
//! Output is one `key = value` line per entry in map order. Anything the scanner
//! would read back differently is rejected instead of written.

use std::io::Write;

use crate::error::{Error, Result};
use crate::options::Options;
use crate::Map;

pub(crate) struct LineWriter {
    out: String,
}

impl LineWriter {
    pub(crate) fn new() -> Self {
        Self { out: String::new() }
    }

    pub(crate) fn entry(&mut self, key: &str, value: &str) {
        self.out.push_str(key);
        if value.is_empty() {
            self.out.push_str(" =\n");
        } else {
            self.out.push_str(" = ");
            self.out.push_str(value);
            self.out.push('\n');
        }
    }

    pub(crate) fn into_string(self) -> String {
        self.out
    }
}

pub fn is_valid_key(key: &str, options: &Options) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if options.is_key_start(c) => chars.all(|c| options.is_key_char(c)),
        _ => false,
    }
}

/// Check that `value` survives a write/read cycle unchanged.
pub fn check_value(value: &str) -> core::result::Result<(), &'static str> {
    if value.contains('\n') {
        return Err("contains a newline");
    }
    if value.starts_with(char::is_whitespace) {
        return Err("starts with whitespace");
    }
    if value.ends_with('\r') {
        return Err("ends with a carriage return");
    }
    Ok(())
}

pub fn to_string(map: &Map, options: &Options) -> Result<String> {
    let mut w = LineWriter::new();
    for (key, value) in map {
        if !is_valid_key(key, options) {
            return Err(Error::Message(format!("cannot encode key {key:?}: not a valid key")));
        }
        if let Err(why) = check_value(value) {
            return Err(Error::Message(format!("cannot encode value of {key}: {why}")));
        }
        w.entry(key, value);
    }
    Ok(w.into_string())
}

pub fn to_writer<W: Write>(mut writer: W, map: &Map, options: &Options) -> Result<()> {
    let s = to_string(map, options)?;
    writer.write_all(s.as_bytes())?;
    Ok(())
}
