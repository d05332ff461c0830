use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Clear,
}

impl InputEdit {
    /// Editing keys for a focused single-line input. Enter, Esc and Tab are
    /// left to the caller.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('u') => Some(InputEdit::Clear),
                KeyCode::Char('a') => Some(InputEdit::Home),
                KeyCode::Char('e') => Some(InputEdit::End),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(ch) => Some(InputEdit::Insert(ch)),
            KeyCode::Backspace => Some(InputEdit::Backspace),
            KeyCode::Delete => Some(InputEdit::Delete),
            KeyCode::Left => Some(InputEdit::Left),
            KeyCode::Right => Some(InputEdit::Right),
            KeyCode::Home => Some(InputEdit::Home),
            KeyCode::End => Some(InputEdit::End),
            _ => None,
        }
    }
}

/// Single-line text buffer. The cursor counts chars, not bytes.
#[derive(Debug, Clone, Default)]
pub struct InputLine {
    value: String,
    cursor: usize,
}

impl InputLine {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn apply(&mut self, edit: InputEdit) {
        let len = self.value.chars().count();
        match edit {
            InputEdit::Insert(ch) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, ch);
                self.cursor += 1;
            }
            InputEdit::Backspace => {
                if self.cursor > 0 {
                    let at = self.byte_index(self.cursor - 1);
                    self.value.remove(at);
                    self.cursor -= 1;
                }
            }
            InputEdit::Delete => {
                if self.cursor < len {
                    let at = self.byte_index(self.cursor);
                    self.value.remove(at);
                }
            }
            InputEdit::Left => self.cursor = self.cursor.saturating_sub(1),
            InputEdit::Right => self.cursor = (self.cursor + 1).min(len),
            InputEdit::Home => self.cursor = 0,
            InputEdit::End => self.cursor = len,
            InputEdit::Clear => self.clear(),
        }
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map(|(idx, _)| idx)
            .unwrap_or(self.value.len())
    }
}
