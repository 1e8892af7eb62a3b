#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Accept Unicode letters in keys, not just `[A-Za-z_][A-Za-z0-9_]*`.
    /// Digits stay ASCII decimal digits either way.
    pub unicode_keys: bool,
}

impl Options {
    pub(crate) fn is_key_start(&self, c: char) -> bool {
        c == '_' || c.is_ascii_alphabetic() || (self.unicode_keys && is_letter(c))
    }

    pub(crate) fn is_key_char(&self, c: char) -> bool {
        self.is_key_start(c) || c.is_ascii_digit()
    }
}

// `is_alphabetic` also covers letter numbers such as 'Ⅻ'.
fn is_letter(c: char) -> bool {
    c.is_alphabetic() && !c.is_numeric()
}
