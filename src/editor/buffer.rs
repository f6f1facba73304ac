// src/editor/buffer.rs
// Single-line text buffer behind the path field. `cursor` counts chars.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    content: String,
    cursor: usize,
    pub is_modified: bool,
}

impl LineBuffer {
    pub fn new() -> Self {
        LineBuffer::default()
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces the content and puts the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.content = text.to_string();
        self.cursor = self.len();
        self.is_modified = false;
    }

    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, ch);
        self.cursor += 1;
        self.is_modified = true;
    }

    pub fn insert_str(&mut self, s: &str) {
        for ch in s.chars().filter(|c| !c.is_control()) {
            self.insert_char(ch);
        }
    }

    /// Backspace.
    pub fn delete_char(&mut self) {
        if self.cursor == 0 { return; }
        let at = self.byte_index(self.cursor - 1);
        self.content.remove(at);
        self.cursor -= 1;
        self.is_modified = true;
    }

    /// Delete key: removes the char under the cursor.
    pub fn delete_forward(&mut self) {
        if self.cursor >= self.len() { return; }
        let at = self.byte_index(self.cursor);
        self.content.remove(at);
        self.is_modified = true;
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let target = self.cursor as isize + delta;
        self.cursor = target.clamp(0, self.len() as isize) as usize;
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }
}
