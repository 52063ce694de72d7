//! Single-line text input editing (pure state transitions).
//!
//! All functions take the input by value and return the edited input, so
//! they are testable without a terminal. The cursor is a char index, never a
//! byte index, so multi-byte place names edit correctly.

/// Text buffer with a cursor.
///
/// Invariant: `cursor <= text.chars().count()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    /// Create an input holding `text` with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte offset of the char at `char_idx` (or the end of the text).
    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

/// Insert a character at the cursor and advance the cursor.
pub fn insert_char(mut input: TextInput, ch: char) -> TextInput {
    let at = input.byte_offset(input.cursor);
    input.text.insert(at, ch);
    input.cursor += 1;
    input
}

/// Delete the character before the cursor. No-op at position 0.
pub fn backspace(mut input: TextInput) -> TextInput {
    if input.cursor == 0 {
        return input;
    }
    let at = input.byte_offset(input.cursor - 1);
    input.text.remove(at);
    input.cursor -= 1;
    input
}

/// Move cursor left by one position. Saturates at 0.
pub fn cursor_left(mut input: TextInput) -> TextInput {
    input.cursor = input.cursor.saturating_sub(1);
    input
}

/// Move cursor right by one position. Saturates at the text length.
pub fn cursor_right(mut input: TextInput) -> TextInput {
    input.cursor = (input.cursor + 1).min(input.char_count());
    input
}

pub fn cursor_home(mut input: TextInput) -> TextInput {
    input.cursor = 0;
    input
}

pub fn cursor_end(mut input: TextInput) -> TextInput {
    input.cursor = input.char_count();
    input
}

#[cfg(test)]
#[path = "text_input_tests.rs"]
mod tests;
