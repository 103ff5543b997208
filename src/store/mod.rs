// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for diagram files on disk.
//!
//! A diagram file is the pretty-printed JSON form from [`crate::format::json`]. Writes go through
//! a temp file in the target directory and are renamed into place, so readers never observe a
//! half-written file.

mod atomic;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::format::{self, FormatError};
use crate::model::Diagram;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Temp file plus atomic rename, without fsync.
    #[default]
    BestEffort,

    /// Additionally syncs the written file and its parent directory where the platform allows.
    Durable,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("{}: {source}", path.display())]
    Format { path: PathBuf, source: FormatError },
    #[error("refusing to write through symlink {}", path.display())]
    SymlinkRefused { path: PathBuf },
}

impl StoreError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Format { path, .. } | Self::SymlinkRefused { path } => {
                path
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Reads, parses and validates a diagram file.
pub fn load_diagram(path: &Path) -> Result<Diagram, StoreError> {
    let source = fs::read_to_string(path)
        .map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;
    let diagram = format::from_json_str(&source)
        .map_err(|source| StoreError::Format { path: path.to_path_buf(), source })?;
    tracing::info!(
        path = %path.display(),
        nodes = diagram.nodes().len(),
        connections = diagram.connections().len(),
        "loaded diagram"
    );
    Ok(diagram)
}

/// Writes `diagram` as pretty JSON (with a trailing newline), replacing `path` atomically.
pub fn save_diagram(
    path: &Path,
    diagram: &Diagram,
    durability: WriteDurability,
) -> Result<(), StoreError> {
    let mut json = format::to_json_pretty(diagram)
        .map_err(|source| StoreError::Format { path: path.to_path_buf(), source })?;
    json.push('\n');
    atomic::write_atomic(path, json.as_bytes(), durability)?;
    tracing::info!(path = %path.display(), ?durability, "saved diagram");
    Ok(())
}
