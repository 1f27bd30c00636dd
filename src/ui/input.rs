use crossterm::event::KeyCode;

/// Single-line text buffer with a cursor, measured in chars.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
    placeholder: &'static str,
}

impl TextInput {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            placeholder,
            ..Self::default()
        }
    }

    /// Start with `value`, cursor at the end.
    pub fn with_value(placeholder: &'static str, value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            placeholder,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    /// Cursor position in chars from the start of the buffer.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Apply an editing key. Returns whether the key was understood.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(ch) => self.insert(ch),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.remove_at_cursor();
                }
                true
            }
            KeyCode::Delete => {
                self.remove_at_cursor();
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.len());
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.len();
                true
            }
            _ => false,
        }
    }

    fn insert(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
        true
    }

    fn remove_at_cursor(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(idx, _)| idx)
            .unwrap_or(self.value.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextInput {
        let mut input = TextInput::new("Name");
        for ch in text.chars() {
            input.handle_key(KeyCode::Char(ch));
        }
        input
    }

    #[test]
    fn typing_appends_at_cursor() {
        let input = typed("exa");
        assert_eq!(input.value(), "exa");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn editing_in_the_middle() {
        let mut input = typed("lsd");
        input.handle_key(KeyCode::Left);
        input.handle_key(KeyCode::Left);
        input.handle_key(KeyCode::Char('x'));
        assert_eq!(input.value(), "lxsd");
        input.handle_key(KeyCode::Backspace);
        assert_eq!(input.value(), "lsd");
        input.handle_key(KeyCode::Delete);
        assert_eq!(input.value(), "ld");
        input.handle_key(KeyCode::Home);
        input.handle_key(KeyCode::Delete);
        assert_eq!(input.value(), "d");
        input.handle_key(KeyCode::End);
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn cursor_is_clamped() {
        let mut input = typed("a");
        input.handle_key(KeyCode::Right);
        input.handle_key(KeyCode::Right);
        assert_eq!(input.cursor(), 1);
        input.handle_key(KeyCode::Backspace);
        input.handle_key(KeyCode::Backspace);
        input.handle_key(KeyCode::Left);
        assert_eq!(input.cursor(), 0);
        assert_eq!(input.value(), "");
    }

    #[test]
    fn multibyte_chars_are_handled_per_char() {
        let mut input = TextInput::with_value("Path", "/tmp/ünï");
        input.handle_key(KeyCode::Backspace);
        input.handle_key(KeyCode::Left);
        input.handle_key(KeyCode::Char('é'));
        assert_eq!(input.value(), "/tmp/üén");
    }

    #[test]
    fn control_chars_and_unknown_keys_are_rejected() {
        let mut input = typed("x");
        assert!(!input.handle_key(KeyCode::Char('\u{7}')));
        assert!(!input.handle_key(KeyCode::F(1)));
        assert_eq!(input.value(), "x");
    }
}
