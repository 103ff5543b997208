// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use super::error::ModelError;
use super::ids::NodeId;

/// The type of diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DiagramKind {
    #[default]
    Box,
    Sequence,
}

impl DiagramKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Sequence => "sequence",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiagramKind {
    type Err = ParseDiagramKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "box" => Ok(Self::Box),
            "sequence" => Ok(Self::Sequence),
            other => Err(ParseDiagramKindError(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown diagram type {0:?} (expected box or sequence)")]
pub struct ParseDiagramKindError(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    text: Vec<String>,
    x: Option<i32>,
    y: Option<i32>,
}

impl Node {
    pub fn new(id: NodeId, text: Vec<String>) -> Self {
        Self { id, text, x: None, y: None }
    }

    pub fn with_position(mut self, x: Option<i32>, y: Option<i32>) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn text(&self) -> &[String] {
        &self.text
    }

    /// Layout hints; the editor never depends on them for correctness.
    pub fn x(&self) -> Option<i32> {
        self.x
    }

    pub fn y(&self) -> Option<i32> {
        self.y
    }

    /// The first line of text, or an empty string.
    pub fn title(&self) -> &str {
        self.text.first().map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    from: NodeId,
    to: NodeId,
    label: String,
    hints: BTreeMap<String, String>,
}

impl Connection {
    pub fn new(from: NodeId, to: NodeId, label: impl Into<String>) -> Self {
        Self { from, to, label: label.into(), hints: BTreeMap::new() }
    }

    pub fn with_hints(mut self, hints: BTreeMap<String, String>) -> Self {
        self.hints = hints;
        self
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn hints(&self) -> &BTreeMap<String, String> {
        &self.hints
    }

    pub fn hint(&self, key: &str) -> Option<&str> {
        self.hints.get(key).map(String::as_str)
    }

    pub fn touches(&self, id: NodeId) -> bool {
        self.from == id || self.to == id
    }
}

/// A diagram: ordered nodes plus ordered connections between them.
///
/// Mutating methods keep two invariants: node IDs are unique, and every connection endpoint
/// resolves to a node. [`Diagram::from_parts`] skips those checks for loaders, which must call
/// [`Diagram::validate`] before handing the diagram to the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagram {
    kind: DiagramKind,
    nodes: Vec<Node>,
    connections: Vec<Connection>,
}

impl Diagram {
    pub fn new(kind: DiagramKind) -> Self {
        Self { kind, nodes: Vec::new(), connections: Vec::new() }
    }

    pub fn from_parts(kind: DiagramKind, nodes: Vec<Node>, connections: Vec<Connection>) -> Self {
        Self { kind, nodes, connections }
    }

    pub fn kind(&self) -> DiagramKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: DiagramKind) {
        self.kind = kind;
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.connections.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn node_index(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_index(id).is_some()
    }

    pub fn connection(&self, index: usize) -> Option<&Connection> {
        self.connections.get(index)
    }

    /// `max(existing) + 1`, or `1` for an empty diagram. `None` once `u32::MAX` is taken.
    pub fn next_node_id(&self) -> Option<NodeId> {
        match self.nodes.iter().map(|node| node.id).max() {
            Some(last) => last.checked_next(),
            None => Some(NodeId::default()),
        }
    }

    pub fn add_node(&mut self, text: Vec<String>) -> Result<NodeId, ModelError> {
        let id = match self.nodes.iter().map(|node| node.id).max() {
            Some(last) => last.checked_next().ok_or(ModelError::IdExhausted { last })?,
            None => NodeId::default(),
        };
        self.nodes.push(Node::new(id, text));
        Ok(id)
    }

    pub fn add_connection(
        &mut self,
        from: NodeId,
        to: NodeId,
        label: impl Into<String>,
    ) -> Result<usize, ModelError> {
        if !self.contains_node(from) || !self.contains_node(to) {
            return Err(ModelError::Reference { from, to });
        }
        self.connections.push(Connection::new(from, to, label));
        Ok(self.connections.len() - 1)
    }

    /// Removes the node and every connection touching it.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node, ModelError> {
        let Some(index) = self.node_index(id) else {
            return Err(ModelError::NodeNotFound { id });
        };
        self.connections.retain(|connection| !connection.touches(id));
        Ok(self.nodes.remove(index))
    }

    pub fn remove_connection(&mut self, index: usize) -> Result<Connection, ModelError> {
        if index >= self.connections.len() {
            return Err(ModelError::OutOfRange { index, len: self.connections.len() });
        }
        Ok(self.connections.remove(index))
    }

    /// Moves a node to `new_index` in node order. Connections refer to IDs and are untouched.
    pub fn reorder_node(&mut self, id: NodeId, new_index: usize) -> Result<(), ModelError> {
        let Some(index) = self.node_index(id) else {
            return Err(ModelError::NodeNotFound { id });
        };
        if new_index >= self.nodes.len() {
            return Err(ModelError::OutOfRange { index: new_index, len: self.nodes.len() });
        }
        let node = self.nodes.remove(index);
        self.nodes.insert(new_index, node);
        Ok(())
    }

    pub fn set_node_text(&mut self, id: NodeId, text: Vec<String>) -> Result<bool, ModelError> {
        let Some(node) = self.nodes.iter_mut().find(|node| node.id == id) else {
            return Err(ModelError::NodeNotFound { id });
        };
        if node.text == text {
            return Ok(false);
        }
        node.text = text;
        Ok(true)
    }

    pub fn set_connection_label(
        &mut self,
        index: usize,
        label: impl Into<String>,
    ) -> Result<bool, ModelError> {
        let len = self.connections.len();
        let Some(connection) = self.connections.get_mut(index) else {
            return Err(ModelError::OutOfRange { index, len });
        };
        let label = label.into();
        if connection.label == label {
            return Ok(false);
        }
        connection.label = label;
        Ok(true)
    }

    /// Inserts or overwrites a hint; an empty `value` deletes the key.
    ///
    /// Returns whether the hints changed.
    pub fn set_connection_hint(
        &mut self,
        index: usize,
        key: &str,
        value: &str,
    ) -> Result<bool, ModelError> {
        let len = self.connections.len();
        let Some(connection) = self.connections.get_mut(index) else {
            return Err(ModelError::OutOfRange { index, len });
        };

        if value.is_empty() {
            return Ok(connection.hints.remove(key).is_some());
        }
        if connection.hint(key) == Some(value) {
            return Ok(false);
        }
        connection.hints.insert(key.to_owned(), value.to_owned());
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = BTreeSet::new();
        for node in &self.nodes {
            if !seen.insert(node.id) {
                return Err(ModelError::DuplicateId { id: node.id });
            }
        }

        for (index, connection) in self.connections.iter().enumerate() {
            for node in [connection.from, connection.to] {
                if !seen.contains(&node) {
                    return Err(ModelError::DanglingReference { index, node });
                }
            }
        }

        Ok(())
    }
}
