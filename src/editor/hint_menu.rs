// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{Editor, Key, Mode};
use crate::model::{ConnectionColor, ConnectionStyle, COLOR_KEY, STYLE_KEY};

/// One hint-menu action: set `key` to `value`, or delete it when `value` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintEdit {
    pub key: &'static str,
    pub value: &'static str,
}

impl HintEdit {
    const fn style(style: ConnectionStyle) -> Self {
        let value = match style {
            ConnectionStyle::Solid => "",
            ConnectionStyle::Dashed => "dashed",
            ConnectionStyle::Dotted => "dotted",
            ConnectionStyle::Double => "double",
        };
        Self { key: STYLE_KEY, value }
    }

    const fn color(color: Option<ConnectionColor>) -> Self {
        let value = match color {
            None => "",
            Some(ConnectionColor::Red) => "red",
            Some(ConnectionColor::Green) => "green",
            Some(ConnectionColor::Yellow) => "yellow",
            Some(ConnectionColor::Blue) => "blue",
            Some(ConnectionColor::Magenta) => "magenta",
            Some(ConnectionColor::Cyan) => "cyan",
        };
        Self { key: COLOR_KEY, value }
    }
}

/// Menu keys in display order.
pub const HINT_MENU_ENTRIES: [(char, HintEdit); 11] = [
    ('a', HintEdit::style(ConnectionStyle::Solid)),
    ('b', HintEdit::style(ConnectionStyle::Dashed)),
    ('c', HintEdit::style(ConnectionStyle::Dotted)),
    ('d', HintEdit::style(ConnectionStyle::Double)),
    ('r', HintEdit::color(Some(ConnectionColor::Red))),
    ('g', HintEdit::color(Some(ConnectionColor::Green))),
    ('y', HintEdit::color(Some(ConnectionColor::Yellow))),
    ('u', HintEdit::color(Some(ConnectionColor::Blue))),
    ('m', HintEdit::color(Some(ConnectionColor::Magenta))),
    ('n', HintEdit::color(Some(ConnectionColor::Cyan))),
    ('w', HintEdit::color(None)),
];

pub fn hint_for_key(ch: char) -> Option<HintEdit> {
    HINT_MENU_ENTRIES.iter().find(|(key, _)| *key == ch).map(|(_, edit)| *edit)
}

impl Editor {
    pub(super) fn handle_hint_menu_key(&mut self, key: Key, connection: usize) {
        let edit = match key {
            Key::Esc | Key::Enter => {
                self.set_mode(Mode::Normal);
                return;
            }
            Key::Char(ch) => match hint_for_key(ch) {
                Some(edit) => edit,
                None => return,
            },
            _ => return,
        };

        match self.diagram.set_connection_hint(connection, edit.key, edit.value) {
            Ok(true) => self.commit(),
            Ok(false) => {}
            Err(err) => {
                self.set_status(err.to_string());
                self.set_mode(Mode::Normal);
            }
        }
    }
}
