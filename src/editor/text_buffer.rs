// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Multi-line code-point buffer used by Insert, Edit and the command line.

/// Code points plus an insertion cursor.
///
/// `line` and `col` are derived from `cursor` and refreshed after every mutation or motion, so
/// they always count the newlines (and the code points since the last newline) in
/// `chars[..cursor]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    chars: Vec<char>,
    cursor: usize,
    line: usize,
    col: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut buffer = Self::new();
        buffer.set_from_lines(lines);
        buffer
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
        self.refresh_position();
    }

    /// Replaces the contents with `lines` joined by `\n`; the cursor lands at the end.
    pub fn set_from_lines<S: AsRef<str>>(&mut self, lines: &[S]) {
        self.chars.clear();
        for (index, line) in lines.iter().enumerate() {
            if index > 0 {
                self.chars.push('\n');
            }
            self.chars.extend(line.as_ref().chars());
        }
        self.cursor = self.chars.len();
        self.refresh_position();
    }

    /// Splits on `\n`. A trailing empty line is dropped, so an empty buffer yields no lines.
    pub fn to_lines(&self) -> Vec<String> {
        let text = self.text();
        let mut lines = text.split('\n').map(str::to_owned).collect::<Vec<_>>();
        if lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        lines
    }

    pub fn insert_char(&mut self, ch: char) {
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
        self.refresh_position();
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Removes the code point before the cursor; no-op at position 0.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        self.refresh_position();
    }

    /// Removes the code point under the cursor; no-op at the end.
    pub fn delete_forward(&mut self) {
        if self.cursor >= self.chars.len() {
            return;
        }
        self.chars.remove(self.cursor);
        self.refresh_position();
    }

    pub fn move_left(&mut self) {
        self.set_cursor(self.cursor.saturating_sub(1));
    }

    pub fn move_right(&mut self) {
        self.set_cursor(self.cursor + 1);
    }

    pub fn move_line_home(&mut self) {
        self.set_cursor(self.line_start(self.cursor));
    }

    pub fn move_line_end(&mut self) {
        self.set_cursor(self.line_end(self.cursor));
    }

    /// Moves to the previous line, keeping the column when that line is long enough.
    pub fn move_up(&mut self) {
        let start = self.line_start(self.cursor);
        if start == 0 {
            return;
        }
        let prev_start = self.line_start(start - 1);
        let target = (prev_start + self.col).min(start - 1);
        self.set_cursor(target);
    }

    pub fn move_down(&mut self) {
        let end = self.line_end(self.cursor);
        if end >= self.chars.len() {
            return;
        }
        let next_start = end + 1;
        let next_end = self.line_end(next_start);
        let target = (next_start + self.col).min(next_end);
        self.set_cursor(target);
    }

    /// Skips the rest of the current word, then any whitespace.
    pub fn move_word_forward(&mut self) {
        let mut pos = self.cursor;
        while pos < self.chars.len() && !self.chars[pos].is_whitespace() {
            pos += 1;
        }
        while pos < self.chars.len() && self.chars[pos].is_whitespace() {
            pos += 1;
        }
        self.set_cursor(pos);
    }

    /// Skips whitespace before the cursor, then lands on the start of the preceding word.
    pub fn move_word_backward(&mut self) {
        let mut pos = self.cursor;
        while pos > 0 && self.chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !self.chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        self.set_cursor(pos);
    }

    fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.chars.len());
        self.refresh_position();
    }

    fn line_start(&self, pos: usize) -> usize {
        self.chars[..pos].iter().rposition(|&ch| ch == '\n').map_or(0, |nl| nl + 1)
    }

    fn line_end(&self, pos: usize) -> usize {
        self.chars[pos..]
            .iter()
            .position(|&ch| ch == '\n')
            .map_or(self.chars.len(), |offset| pos + offset)
    }

    fn refresh_position(&mut self) {
        let before = &self.chars[..self.cursor];
        self.line = before.iter().filter(|&&ch| ch == '\n').count();
        self.col = self.cursor - self.line_start(self.cursor);
    }
}
