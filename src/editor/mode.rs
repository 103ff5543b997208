// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use crate::model::NodeId;

/// A selected entity: a node by ID or a connection by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    Node(NodeId),
    Connection(usize),
}

impl Selection {
    pub fn node(self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(id),
            Self::Connection(_) => None,
        }
    }

    pub fn connection(self) -> Option<usize> {
        match self {
            Self::Connection(index) => Some(index),
            Self::Node(_) => None,
        }
    }
}

/// What a labeled key press does while jumping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JumpAction {
    #[default]
    Select,
    Edit,
    Delete,
    ConnectFrom,
    ConnectTo,
    Hint,
    ReorderFrom,
    ReorderTo { source: NodeId },
}

impl JumpAction {
    pub fn describe(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::ConnectFrom => "connect from",
            Self::ConnectTo => "connect to",
            Self::Hint => "style connection",
            Self::ReorderFrom => "move participant",
            Self::ReorderTo { .. } => "move before",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Edit(Selection),
    Command,
    Jump {
        action: JumpAction,
        continuous: bool,
    },
    Json {
        scroll: usize,
    },
    HintMenu {
        connection: usize,
    },
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Self::Normal => ModeKind::Normal,
            Self::Insert => ModeKind::Insert,
            Self::Edit(_) => ModeKind::Edit,
            Self::Command => ModeKind::Command,
            Self::Jump { .. } => ModeKind::Jump,
            Self::Json { .. } => ModeKind::Json,
            Self::HintMenu { .. } => ModeKind::HintMenu,
        }
    }

    /// Insert and Edit share the text buffer.
    pub fn is_text_entry(&self) -> bool {
        matches!(self, Self::Insert | Self::Edit(_))
    }
}

/// Payload-free mode tag for display and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
    Normal,
    Insert,
    Edit,
    Command,
    Jump,
    Json,
    HintMenu,
}

impl ModeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
            Self::Edit => "EDIT",
            Self::Command => "COMMAND",
            Self::Jump => "JUMP",
            Self::Json => "JSON",
            Self::HintMenu => "HINT",
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
