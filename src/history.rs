// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Snapshot-based undo/redo.

use std::collections::VecDeque;

use crate::model::Diagram;

pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// Bounded list of full diagram snapshots with a cursor.
///
/// The entry under the cursor always equals the live diagram after a committed mutation. Saving
/// discards everything past the cursor; once `depth` entries exist the oldest is dropped.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Diagram>,
    cursor: usize,
    depth: usize,
}

impl History {
    pub fn new(initial: &Diagram, depth: usize) -> Self {
        let depth = depth.max(1);
        let mut entries = VecDeque::with_capacity(depth.min(DEFAULT_HISTORY_DEPTH));
        entries.push_back(initial.clone());
        Self { entries, cursor: 0, depth }
    }

    pub fn save(&mut self, diagram: &Diagram) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(diagram.clone());
        while self.entries.len() > self.depth {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Steps back one snapshot; `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&Diagram> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Steps forward one snapshot; `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&Diagram> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    /// Drops all entries and starts over from `diagram` (used after loading a file).
    pub fn reset(&mut self, diagram: &Diagram) {
        self.entries.clear();
        self.entries.push_back(diagram.clone());
        self.cursor = 0;
    }

    pub fn current(&self) -> Option<&Diagram> {
        self.entries.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}
