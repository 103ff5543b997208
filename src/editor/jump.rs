// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smallvec::SmallVec;

use crate::model::{Diagram, NodeId};

/// Label characters in assignment order: home row first, then the remaining lowercase letters.
pub const JUMP_ALPHABET: &str = "asdfjklghqwertyuiopzxcvbnm";

/// An entity that can carry a jump label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JumpTarget {
    Node(NodeId),
    Connection(usize),
    /// Insertion slot `p`: before the participant currently at position `p` (`p == len` is the
    /// end).
    Slot(usize),
}

impl JumpTarget {
    /// Flat integer form: node IDs are positive, slot `p` is `-(p + 1)`, connection `i` is `i`.
    pub fn encoded_id(self) -> i64 {
        match self {
            Self::Node(id) => i64::from(id.get()),
            Self::Connection(index) => index as i64,
            Self::Slot(position) => -(position as i64 + 1),
        }
    }

    pub fn node(self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(id),
            _ => None,
        }
    }
}

/// Which family of entities a jump labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSet {
    Nodes,
    Connections,
    Slots,
}

impl TargetSet {
    pub fn collect(self, diagram: &Diagram) -> Vec<JumpTarget> {
        match self {
            Self::Nodes => diagram.nodes().iter().map(|node| JumpTarget::Node(node.id())).collect(),
            Self::Connections => {
                (0..diagram.connections().len()).map(JumpTarget::Connection).collect()
            }
            Self::Slots => (0..=diagram.nodes().len()).map(JumpTarget::Slot).collect(),
        }
    }
}

/// Ordered `target → label` assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpLabels {
    entries: SmallVec<[(JumpTarget, char); 16]>,
}

impl JumpLabels {
    /// Labels `targets` in order; anything past the alphabet stays unlabeled.
    pub fn assign<I>(targets: I) -> Self
    where
        I: IntoIterator<Item = JumpTarget>,
    {
        let entries = targets.into_iter().zip(JUMP_ALPHABET.chars()).collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn target_for(&self, label: char) -> Option<JumpTarget> {
        self.entries.iter().find(|(_, ch)| *ch == label).map(|(target, _)| *target)
    }

    pub fn label_for(&self, target: JumpTarget) -> Option<char> {
        self.entries.iter().find(|(t, _)| *t == target).map(|(_, ch)| *ch)
    }

    pub fn iter(&self) -> impl Iterator<Item = (JumpTarget, char)> + '_ {
        self.entries.iter().copied()
    }
}
