// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Logical key alphabet understood by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Esc,
    Enter,
    Backspace,
    Delete,
    /// Ctrl+N: newline inside the text buffer.
    Newline,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    WordForward,
    WordBackward,
}

impl Key {
    /// Decodes a crossterm key event. Releases, repeats of unsupported keys and other control
    /// chords yield `None`.
    pub fn from_event(event: KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let key = match event.code {
            KeyCode::Char('n') | KeyCode::Char('N') if ctrl => Self::Newline,
            KeyCode::Char('[') if ctrl => Self::Esc,
            KeyCode::Char(_) if ctrl => return None,
            KeyCode::Char(ch) => Self::Char(ch),
            KeyCode::Esc => Self::Esc,
            KeyCode::Enter => Self::Enter,
            KeyCode::Backspace => Self::Backspace,
            KeyCode::Delete => Self::Delete,
            KeyCode::Left if ctrl => Self::WordBackward,
            KeyCode::Right if ctrl => Self::WordForward,
            KeyCode::Up => Self::Up,
            KeyCode::Down => Self::Down,
            KeyCode::Left => Self::Left,
            KeyCode::Right => Self::Right,
            KeyCode::Home => Self::Home,
            KeyCode::End => Self::End,
            KeyCode::PageUp => Self::PageUp,
            KeyCode::PageDown => Self::PageDown,
            _ => return None,
        };
        Some(key)
    }

    pub fn char(self) -> Option<char> {
        match self {
            Self::Char(ch) => Some(ch),
            _ => None,
        }
    }
}

impl From<char> for Key {
    fn from(ch: char) -> Self {
        Self::Char(ch)
    }
}
