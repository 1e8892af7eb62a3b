//! Opening configuration sources and decoding them into code points.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::options::Options;
use crate::{Map, Result, scan};

/// Decodes UTF-8 from a buffered reader one code point at a time.
///
/// Malformed or truncated sequences surface as [`io::ErrorKind::InvalidData`].
pub struct CharReader<R> {
    inner: R,
}

impl<R: BufRead> CharReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = loop {
            match self.inner.fill_buf() {
                Ok(buf) => break buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        if byte.is_some() {
            self.inner.consume(1);
        }
        Ok(byte)
    }

    fn read_char(&mut self) -> io::Result<Option<char>> {
        let Some(first) = self.read_byte()? else {
            return Ok(None);
        };
        let width = utf8_width(first);
        if width == 0 {
            return Err(invalid_utf8(format!("invalid UTF-8 lead byte 0x{first:02x}")));
        }
        let mut buf = [first, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            match self.read_byte()? {
                Some(b) => *slot = b,
                None => return Err(invalid_utf8("truncated UTF-8 sequence at end of input".into())),
            }
        }
        core::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(|| invalid_utf8(format!("invalid UTF-8 sequence {:02x?}", &buf[..width])))
    }
}

impl<R: BufRead> Iterator for CharReader<R> {
    type Item = io::Result<char>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_char().transpose()
    }
}

fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7f => 1,
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => 0,
    }
}

fn invalid_utf8(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

/// Read a config from the file at `path`. The file is closed on every exit path.
pub fn read_config_from_file<P: AsRef<Path>>(path: P, options: &Options) -> Result<Config> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading config file");
    let file = File::open(path)?;
    read_config(BufReader::new(file), options)
}

pub fn read_config<R: BufRead>(reader: R, options: &Options) -> Result<Config> {
    let map = scan::parse_fallible(CharReader::new(reader), options)?;
    Ok(Config::from(map))
}

pub fn read_config_from_str(input: &str, options: &Options) -> Result<Config> {
    let map = scan::parse_str(input, options)?;
    Ok(Config::from(map))
}

/// Parse `reader` and merge its entries into `dest`, replacing keys `dest`
/// already holds. On error `dest` is left as it was.
pub fn read_into<R: BufRead>(reader: R, dest: &mut Map, options: &Options) -> Result<()> {
    let map = scan::parse_fallible(CharReader::new(reader), options)?;
    debug!(entries = map.len(), "merging config");
    dest.extend(map);
    Ok(())
}

pub fn read_file_into<P: AsRef<Path>>(path: P, dest: &mut Map, options: &Options) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading config file");
    let file = File::open(path)?;
    read_into(BufReader::new(file), dest, options)
}
