// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! jumpbox CLI entrypoint.
//!
//! Opens `FILE` when it exists; otherwise starts with an empty diagram bound to `FILE` so `:w`
//! creates it. Logs go to `--log-file` only, since the terminal belongs to the TUI.

use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use jumpbox::config::{Config, LOG_ENV};
use jumpbox::editor::Editor;
use jumpbox::history::DEFAULT_HISTORY_DEPTH;
use jumpbox::model::Diagram;
use jumpbox::store::{self, WriteDurability};

#[derive(Debug, Parser)]
#[command(name = "jumpbox", version, about = "Modal terminal editor for diagrams")]
struct Cli {
    /// Diagram JSON file to open (created on first `:w` if missing)
    file: Option<PathBuf>,

    /// Command used for the external edit (`x`); defaults to $VISUAL, $EDITOR, then vi
    #[arg(long, value_name = "CMD")]
    editor: Option<String>,

    /// Number of undo snapshots to keep
    #[arg(long, value_name = "N", default_value_t = DEFAULT_HISTORY_DEPTH)]
    history_depth: usize,

    /// fsync the file and its directory on every write
    #[arg(long)]
    durable_writes: bool,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            file: cli.file,
            editor_command: cli.editor,
            history_depth: cli.history_depth,
            durability: if cli.durable_writes {
                WriteDurability::Durable
            } else {
                WriteDurability::BestEffort
            },
            log_file: cli.log_file,
            verbosity: cli.verbose,
        }
    }
}

fn init_tracing(config: &Config) -> Result<(), Box<dyn Error>> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn initial_diagram(config: &Config) -> Result<Diagram, Box<dyn Error>> {
    match &config.file {
        Some(path) if path.exists() => Ok(store::load_diagram(path)?),
        Some(path) => {
            tracing::info!(path = %path.display(), "starting new diagram");
            Ok(Diagram::default())
        }
        None => Ok(Diagram::default()),
    }
}

fn main() {
    let config = Config::from(Cli::parse());

    let result = (|| -> Result<(), Box<dyn Error>> {
        init_tracing(&config)?;
        let diagram = initial_diagram(&config)?;
        let editor = Editor::with_options(diagram, config.editor_options());
        jumpbox::tui::run(&config, editor)
    })();

    if let Err(err) = result {
        tracing::error!(error = %err, "exiting");
        eprintln!("jumpbox: {err}");
        std::process::exit(1);
    }
}
