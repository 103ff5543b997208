// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{Editor, Key, Mode};
use crate::format;

fn line_count(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    memchr::memchr_iter(b'\n', text.as_bytes()).count() + usize::from(!text.ends_with('\n'))
}

impl Editor {
    /// Pretty JSON of the current diagram, as shown in the JSON view.
    pub fn json_text(&self) -> String {
        format::to_json_pretty(&self.diagram).unwrap_or_else(|err| format!("<{err}>"))
    }

    pub(super) fn json_max_scroll(&self) -> usize {
        let lines = line_count(&self.json_text());
        lines.saturating_sub(usize::from(self.viewport.height.max(1)))
    }

    pub(super) fn handle_json_key(&mut self, key: Key, scroll: usize) {
        let page = usize::from(self.viewport.height.saturating_sub(1).max(1));
        let next = match key {
            Key::Char('j') | Key::Char('q') | Key::Esc => {
                self.set_mode(Mode::Normal);
                return;
            }
            Key::Down => scroll.saturating_add(1),
            Key::Char('k') | Key::Up => scroll.saturating_sub(1),
            Key::Char('J') | Key::PageDown => scroll.saturating_add(page),
            Key::Char('K') | Key::PageUp => scroll.saturating_sub(page),
            Key::Char('g') | Key::Home => 0,
            Key::Char('G') | Key::End => usize::MAX,
            _ => return,
        };
        self.mode = Mode::Json { scroll: next.min(self.json_max_scroll()) };
    }
}

#[cfg(test)]
mod tests {
    use super::line_count;

    #[test]
    fn counts_lines_with_and_without_trailing_newline() {
        assert_eq!(line_count(""), 0);
        assert_eq!(line_count("{}"), 1);
        assert_eq!(line_count("{\n}"), 2);
        assert_eq!(line_count("{\n}\n"), 2);
    }
}
