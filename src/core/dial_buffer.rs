//! # Dial Buffer
//!
//! The in-progress USSD code, one keystroke at a time. The buffer does not
//! care whether the code makes sense; that's the interpreter's job.

/// Accumulates keypad characters until the code is submitted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DialBuffer {
    chars: String,
}

impl DialBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true for characters found on a phone keypad.
    pub fn accepts(c: char) -> bool {
        c.is_ascii_digit() || c == '*' || c == '#'
    }

    /// Appends one keypad character. Anything that isn't a digit, `*` or `#`
    /// is ignored and `false` is returned.
    pub fn append(&mut self, c: char) -> bool {
        if !Self::accepts(c) {
            return false;
        }
        self.chars.push(c);
        true
    }

    /// Removes the last character. No-op on an empty buffer.
    pub fn delete(&mut self) {
        self.chars.pop();
    }

    pub fn clear(&mut self) {
        self.chars.clear();
    }

    /// Takes the current contents, leaving the buffer empty.
    pub fn submit(&mut self) -> String {
        std::mem::take(&mut self.chars)
    }

    pub fn as_str(&self) -> &str {
        &self.chars
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}
