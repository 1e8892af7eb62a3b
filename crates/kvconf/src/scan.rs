//! Character-level scanner for `key = value` configuration text.
//!
//! The scanner is a finite-state machine fed one [`Symbol`] at a time. Each call
//! to [`Scanner::step`] performs exactly one transition and its side effect
//! (append to the key or value buffer, commit an entry, or fail).

use tracing::{debug, trace};

use crate::Map;
use crate::error::{Error, ParseErrorKind, Result};
use crate::options::Options;

/// One unit of scanner input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Char(char),
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Between entries.
    Initial,
    InKey,
    /// Key ended by whitespace, waiting for `=`.
    PostKey,
    /// `=` consumed, skipping whitespace before the value.
    EqSeen,
    InValue,
    InComment,
    Done,
}

pub struct Scanner {
    state: State,
    key: String,
    value: String,
    dest: Map,
    options: Options,
    line: usize,
    column: usize,
}

impl Scanner {
    pub fn new(options: &Options) -> Self {
        Self {
            state: State::Initial,
            key: String::new(),
            value: String::new(),
            dest: Map::new(),
            options: options.clone(),
            line: 1,
            column: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Feed one symbol. Errors carry the position of the offending symbol.
    pub fn step(&mut self, symbol: Symbol) -> Result<()> {
        let (line, column) = (self.line, self.column + 1);
        if let Err(kind) = self.transition(symbol) {
            debug!(line, column, %kind, "config parse failed");
            return Err(Error::Parse { line, column, kind });
        }
        if let Symbol::Char(c) = symbol {
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        Ok(())
    }

    /// Feed end-of-input if needed and hand back the collected entries.
    pub fn finish(mut self) -> Result<Map> {
        if !self.is_done() {
            self.step(Symbol::Eof)?;
        }
        debug!(entries = self.dest.len(), "config parsed");
        Ok(self.dest)
    }

    fn transition(&mut self, symbol: Symbol) -> core::result::Result<(), ParseErrorKind> {
        use State::*;
        use Symbol::*;

        self.state = match (self.state, symbol) {
            (Initial, Eof) => Done,
            (Initial, Char('#')) => InComment,
            (Initial, Char(c)) if c.is_whitespace() => Initial,
            (Initial, Char(c)) if self.options.is_key_start(c) => {
                self.key.push(c);
                InKey
            }

            (InKey | PostKey, Eof) => return Err(ParseErrorKind::UnexpectedEndOfInput),
            (InKey | PostKey, Char('=')) => EqSeen,
            (InKey | PostKey, Char(c)) if c.is_whitespace() => PostKey,
            (InKey, Char(c)) if self.options.is_key_char(c) => {
                self.key.push(c);
                InKey
            }

            // A `\r` right before the line end or end of input is part of the terminator.
            (EqSeen | InValue, symbol @ (Eof | Char('\n'))) => {
                if self.value.ends_with('\r') {
                    self.value.pop();
                }
                self.commit();
                if symbol == Eof { Done } else { Initial }
            }
            (EqSeen, Char(c)) if c.is_whitespace() => EqSeen,
            (EqSeen | InValue, Char(c)) => {
                self.value.push(c);
                InValue
            }

            (InComment, Eof) => Done,
            (InComment, Char('\n')) => Initial,
            (InComment, Char(_)) => InComment,

            (Done, _) => return Err(ParseErrorKind::InvalidState),

            (Initial | InKey | PostKey, Char(found)) => {
                return Err(ParseErrorKind::InvalidInput { found });
            }
        };
        Ok(())
    }

    fn commit(&mut self) {
        let key = core::mem::take(&mut self.key);
        let value = core::mem::take(&mut self.value);
        if !key.is_empty() {
            trace!(%key, "config entry");
            self.dest.insert(key, value);
        }
    }
}

pub fn parse_str(input: &str, options: &Options) -> Result<Map> {
    parse_chars(input.chars(), options)
}

pub fn parse_chars<I>(chars: I, options: &Options) -> Result<Map>
where
    I: IntoIterator<Item = char>,
{
    parse_fallible(chars.into_iter().map(Ok::<char, Error>), options)
}

/// Drive a scanner from a source whose reads can fail. Source errors are
/// returned as-is, before the scanner sees anything further.
pub fn parse_fallible<I, E>(mut input: I, options: &Options) -> Result<Map>
where
    I: Iterator<Item = core::result::Result<char, E>>,
    Error: From<E>,
{
    let mut scanner = Scanner::new(options);
    while !scanner.is_done() {
        let symbol = match input.next().transpose()? {
            Some(c) => Symbol::Char(c),
            None => Symbol::Eof,
        };
        scanner.step(symbol)?;
    }
    scanner.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(scanner: &mut Scanner, s: &str) {
        for c in s.chars() {
            scanner.step(Symbol::Char(c)).unwrap();
        }
    }

    #[test]
    fn states_follow_a_line() {
        let mut sc = Scanner::new(&Options::default());
        assert_eq!(sc.state(), State::Initial);
        feed(&mut sc, "  ab");
        assert_eq!(sc.state(), State::InKey);
        feed(&mut sc, " ");
        assert_eq!(sc.state(), State::PostKey);
        feed(&mut sc, "=");
        assert_eq!(sc.state(), State::EqSeen);
        feed(&mut sc, "  ");
        assert_eq!(sc.state(), State::EqSeen);
        feed(&mut sc, "x y");
        assert_eq!(sc.state(), State::InValue);
        feed(&mut sc, "\n#");
        assert_eq!(sc.state(), State::InComment);
        feed(&mut sc, " k = v\n");
        assert_eq!(sc.state(), State::Initial);
        let map = sc.finish().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["ab"], "x y");
    }

    #[test]
    fn stepping_after_done_is_invalid_state() {
        let mut sc = Scanner::new(&Options::default());
        sc.step(Symbol::Eof).unwrap();
        assert!(sc.is_done());
        let err = sc.step(Symbol::Char('a')).unwrap_err();
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::InvalidState));
        let err = sc.step(Symbol::Eof).unwrap_err();
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::InvalidState));
    }

    #[test]
    fn finish_feeds_eof() {
        let mut sc = Scanner::new(&Options::default());
        feed(&mut sc, "a = 1");
        let map = sc.finish().unwrap();
        assert_eq!(map["a"], "1");
    }
}
