// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canonical JSON form of a diagram.
//!
//! Field order is fixed by the DTO declarations below: `type`, `nodes`, `connections`; nodes as
//! `id`, `text`, `x`, `y`; connections as `from`, `to`, `label`, `hints`. Absent coordinates and
//! empty hint maps are omitted so that serialize → deserialize is the identity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Connection, Diagram, DiagramKind, IdError, ModelError, Node, NodeId};

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid node id {value}: {source}")]
    InvalidNodeId { value: i64, source: IdError },
    #[error(transparent)]
    Invalid(#[from] ModelError),
}

impl FormatError {
    /// The model-level violation behind this error, if any.
    pub fn model_error(&self) -> Option<&ModelError> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DiagramKindJson {
    #[default]
    Box,
    Sequence,
}

impl From<DiagramKind> for DiagramKindJson {
    fn from(kind: DiagramKind) -> Self {
        match kind {
            DiagramKind::Box => Self::Box,
            DiagramKind::Sequence => Self::Sequence,
        }
    }
}

impl From<DiagramKindJson> for DiagramKind {
    fn from(kind: DiagramKindJson) -> Self {
        match kind {
            DiagramKindJson::Box => Self::Box,
            DiagramKindJson::Sequence => Self::Sequence,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct DiagramJson {
    #[serde(rename = "type", default)]
    kind: DiagramKindJson,
    #[serde(default)]
    nodes: Vec<NodeJson>,
    #[serde(default)]
    connections: Vec<ConnectionJson>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeJson {
    id: i64,
    #[serde(default)]
    text: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    y: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ConnectionJson {
    from: i64,
    to: i64,
    #[serde(default)]
    label: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    hints: BTreeMap<String, String>,
}

fn diagram_to_json(diagram: &Diagram) -> DiagramJson {
    DiagramJson {
        kind: diagram.kind().into(),
        nodes: diagram
            .nodes()
            .iter()
            .map(|node| NodeJson {
                id: i64::from(node.id().get()),
                text: node.text().to_vec(),
                x: node.x(),
                y: node.y(),
            })
            .collect(),
        connections: diagram
            .connections()
            .iter()
            .map(|connection| ConnectionJson {
                from: i64::from(connection.from().get()),
                to: i64::from(connection.to().get()),
                label: connection.label().to_owned(),
                hints: connection.hints().clone(),
            })
            .collect(),
    }
}

fn node_id(value: i64) -> Result<NodeId, FormatError> {
    NodeId::try_from(value).map_err(|source| FormatError::InvalidNodeId { value, source })
}

fn diagram_from_json(json: DiagramJson) -> Result<Diagram, FormatError> {
    let nodes = json
        .nodes
        .into_iter()
        .map(|node| Ok(Node::new(node_id(node.id)?, node.text).with_position(node.x, node.y)))
        .collect::<Result<Vec<_>, FormatError>>()?;
    let connections = json
        .connections
        .into_iter()
        .map(|connection| {
            Ok(Connection::new(node_id(connection.from)?, node_id(connection.to)?, connection.label)
                .with_hints(connection.hints))
        })
        .collect::<Result<Vec<_>, FormatError>>()?;

    let diagram = Diagram::from_parts(json.kind.into(), nodes, connections);
    diagram.validate()?;
    Ok(diagram)
}

/// Serializes with two-space indentation, as shown in the JSON view and the external editor.
pub fn to_json_pretty(diagram: &Diagram) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(&diagram_to_json(diagram))?)
}

pub fn to_json_compact(diagram: &Diagram) -> Result<String, FormatError> {
    Ok(serde_json::to_string(&diagram_to_json(diagram))?)
}

/// Parses and validates a diagram (`DuplicateId`, `DanglingReference`).
pub fn from_json_str(source: &str) -> Result<Diagram, FormatError> {
    let json: DiagramJson = serde_json::from_str(source)?;
    diagram_from_json(json)
}
