// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Round trip of the diagram JSON through an external text editor.
//!
//! The caller is responsible for handing the terminal over (see [`crate::tui`]); this module only
//! writes the temp file, runs the editor and parses the result.

use std::env;
use std::fs;
use std::io::{self, Write as _};
use std::path::Path;
use std::process::{Command, ExitStatus};

use crate::format::{self, FormatError};
use crate::model::Diagram;

const FALLBACK_EDITOR: &str = "vi";

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("failed to create temporary file: {0}")]
    TempFile(#[source] io::Error),
    #[error("failed to run editor command `{command}`: {source}")]
    Launch { command: String, source: io::Error },
    #[error("editor command `{command}` failed with {status}")]
    EditorFailed { command: String, status: ExitStatus },
    #[error("failed to read edited file: {0}")]
    Read(#[source] io::Error),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// `explicit` if set and non-blank, else `$VISUAL`, else `$EDITOR`, else `vi`.
pub fn resolve_editor_command(explicit: Option<&str>) -> String {
    let non_blank = |value: String| (!value.trim().is_empty()).then_some(value);
    explicit
        .map(str::to_owned)
        .and_then(non_blank)
        .or_else(|| env::var("VISUAL").ok().and_then(non_blank))
        .or_else(|| env::var("EDITOR").ok().and_then(non_blank))
        .unwrap_or_else(|| FALLBACK_EDITOR.to_owned())
}

/// Opens `diagram` as indented JSON in `editor_command` and parses the saved file.
///
/// Returns `Ok(None)` when the file comes back byte-identical. The parsed diagram has passed
/// validation; the temporary file is removed on every path.
pub fn edit_diagram(
    diagram: &Diagram,
    editor_command: &str,
) -> Result<Option<Diagram>, BridgeError> {
    let mut original = format::to_json_pretty(diagram)?;
    original.push('\n');

    let mut file = tempfile::Builder::new()
        .prefix("jumpbox-")
        .suffix(".json")
        .tempfile()
        .map_err(BridgeError::TempFile)?;
    file.write_all(original.as_bytes()).map_err(BridgeError::TempFile)?;
    file.flush().map_err(BridgeError::TempFile)?;

    tracing::info!(command = %editor_command, path = %file.path().display(), "launching editor");
    launch_editor(editor_command, file.path())?;

    let edited = fs::read_to_string(file.path()).map_err(BridgeError::Read)?;
    if edited == original {
        return Ok(None);
    }
    Ok(Some(format::from_json_str(&edited)?))
}

fn launch_editor(command: &str, path: &Path) -> Result<(), BridgeError> {
    let status = Command::new("sh")
        .arg("-lc")
        .arg(format!("{command} {}", shell_single_quote(&path.to_string_lossy())))
        .status()
        .map_err(|source| BridgeError::Launch { command: command.to_owned(), source })?;
    if !status.success() {
        return Err(BridgeError::EditorFailed { command: command.to_owned(), status });
    }
    Ok(())
}

fn shell_single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}
