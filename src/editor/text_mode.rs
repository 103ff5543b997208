// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{Editor, Key, Mode, Selection};

impl Editor {
    /// Preloads the text buffer from `target` and enters Edit.
    pub(super) fn begin_edit(&mut self, target: Selection) {
        match target {
            Selection::Node(id) => {
                let Some(node) = self.diagram.node(id) else {
                    self.selection = None;
                    self.set_status(format!("node {id} no longer exists"));
                    return;
                };
                self.text.set_from_lines(node.text());
            }
            Selection::Connection(index) => {
                let Some(connection) = self.diagram.connection(index) else {
                    self.selection = None;
                    self.set_status(format!("connection {index} no longer exists"));
                    return;
                };
                let lines = connection.label().split('\n').collect::<Vec<_>>();
                self.text.set_from_lines(&lines);
            }
        }
        self.set_mode(Mode::Edit(target));
    }

    pub(super) fn handle_text_key(&mut self, key: Key) {
        match key {
            Key::Esc => self.set_mode(Mode::Normal),
            Key::Enter => self.commit_text(),
            Key::Newline => self.text.insert_newline(),
            Key::Char(ch) if !ch.is_control() => self.text.insert_char(ch),
            Key::Backspace => self.text.backspace(),
            Key::Delete => self.text.delete_forward(),
            Key::Left => self.text.move_left(),
            Key::Right => self.text.move_right(),
            Key::Up => self.text.move_up(),
            Key::Down => self.text.move_down(),
            Key::Home => self.text.move_line_home(),
            Key::End => self.text.move_line_end(),
            Key::WordForward => self.text.move_word_forward(),
            Key::WordBackward => self.text.move_word_backward(),
            _ => {}
        }
    }

    fn commit_text(&mut self) {
        let lines = self.text.to_lines();
        let mode = self.mode;
        self.set_mode(Mode::Normal);

        match mode {
            Mode::Insert => {
                if lines.is_empty() {
                    self.set_status("empty node discarded");
                    return;
                }
                match self.diagram.add_node(lines) {
                    Ok(id) => {
                        self.selection = Some(Selection::Node(id));
                        self.commit();
                    }
                    Err(err) => self.set_status(err.to_string()),
                }
            }
            Mode::Edit(Selection::Node(id)) => match self.diagram.set_node_text(id, lines) {
                Ok(true) => self.commit(),
                Ok(false) => {}
                Err(err) => self.set_status(err.to_string()),
            },
            Mode::Edit(Selection::Connection(index)) => {
                match self.diagram.set_connection_label(index, lines.join("\n")) {
                    Ok(true) => self.commit(),
                    Ok(false) => {}
                    Err(err) => self.set_status(err.to_string()),
                }
            }
            _ => {}
        }
    }
}
