// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime settings resolved from the command line.

use std::path::PathBuf;

use crate::editor::EditorOptions;
use crate::history::DEFAULT_HISTORY_DEPTH;
use crate::store::WriteDurability;

/// Environment variable holding a `tracing` filter directive; overrides `-v`.
pub const LOG_ENV: &str = "JUMPBOX_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Diagram file to open; also the default target of `:w`.
    pub file: Option<PathBuf>,
    /// Overrides `$VISUAL` / `$EDITOR` for the external edit.
    pub editor_command: Option<String>,
    pub history_depth: usize,
    pub durability: WriteDurability,
    /// Log destination. Logging is off without one.
    pub log_file: Option<PathBuf>,
    /// Count of `-v` flags.
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: None,
            editor_command: None,
            history_depth: DEFAULT_HISTORY_DEPTH,
            durability: WriteDurability::BestEffort,
            log_file: None,
            verbosity: 0,
        }
    }
}

impl Config {
    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            history_depth: self.history_depth,
            durability: self.durability,
            file_path: self.file.clone(),
        }
    }

    /// Filter directive used when [`LOG_ENV`] is unset.
    pub fn default_log_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
