// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A diagram is an ordered list of nodes plus an ordered list of connections that refer to nodes
//! by ID.

pub mod diagram;
pub mod error;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod hints;
pub mod ids;

pub use diagram::{Connection, Diagram, DiagramKind, Node, ParseDiagramKindError};
pub use error::ModelError;
pub use hints::{ConnectionColor, ConnectionStyle, COLOR_KEY, STYLE_KEY};
pub use ids::{IdError, NodeId};
