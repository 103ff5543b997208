// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::NodeId;

/// Errors raised by diagram mutations and validation.
///
/// Every operation that returns one of these leaves the diagram exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("connection {from} -> {to} references a missing node")]
    Reference { from: NodeId, to: NodeId },
    #[error("duplicate node id {id}")]
    DuplicateId { id: NodeId },
    #[error("connection #{index} references missing node {node}")]
    DanglingReference { index: usize, node: NodeId },
    #[error("index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },
    #[error("node {id} not found")]
    NodeNotFound { id: NodeId },
    #[error("no node id left after {last}")]
    IdExhausted { last: NodeId },
}
