// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ex-style command line: parsing plus execution against the editor.

use std::path::PathBuf;

use super::{Editor, Mode};
use crate::model::{DiagramKind, ParseDiagramKindError};
use crate::store::{self, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Write(Option<PathBuf>),
    Open(PathBuf),
    Quit,
    WriteQuit(Option<PathBuf>),
    SetType(DiagramKind),
    Clear,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("{command}: missing {what}")]
    MissingArgument { command: &'static str, what: &'static str },
    #[error("{command}: {reason}")]
    InvalidArgument { command: &'static str, reason: String },
    #[error("no file name")]
    NoFileName,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ParseDiagramKindError> for CommandError {
    fn from(err: ParseDiagramKindError) -> Self {
        Self::InvalidArgument { command: "type", reason: err.to_string() }
    }
}

fn optional_path(command: &'static str, args: &[&str]) -> Result<Option<PathBuf>, CommandError> {
    match args {
        [] => Ok(None),
        [path] => Ok(Some(PathBuf::from(path))),
        _ => Err(CommandError::InvalidArgument {
            command,
            reason: "expected at most one path".to_owned(),
        }),
    }
}

fn no_args(command: &'static str, args: &[&str]) -> Result<(), CommandError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(CommandError::InvalidArgument { command, reason: "takes no arguments".to_owned() })
    }
}

/// Parses one command line (without the leading `:`). Arguments are whitespace-separated.
pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    let mut words = input.split_whitespace();
    let Some(name) = words.next() else {
        return Err(CommandError::Unknown(String::new()));
    };
    let args = words.collect::<Vec<_>>();

    match name {
        "w" => Ok(Command::Write(optional_path("w", &args)?)),
        "wq" | "x" => Ok(Command::WriteQuit(optional_path("wq", &args)?)),
        "e" => match args.as_slice() {
            [] => Err(CommandError::MissingArgument { command: "e", what: "path" }),
            [path] => Ok(Command::Open(PathBuf::from(path))),
            _ => Err(CommandError::InvalidArgument {
                command: "e",
                reason: "expected exactly one path".to_owned(),
            }),
        },
        "q" => no_args("q", &args).map(|()| Command::Quit),
        "clear" => no_args("clear", &args).map(|()| Command::Clear),
        "type" => match args.as_slice() {
            [] => Err(CommandError::MissingArgument { command: "type", what: "box|sequence" }),
            [kind] => Ok(Command::SetType(kind.parse()?)),
            _ => Err(CommandError::InvalidArgument {
                command: "type",
                reason: "expected box or sequence".to_owned(),
            }),
        },
        other => Err(CommandError::Unknown(other.to_owned())),
    }
}

impl Editor {
    /// Runs a parsed command. On error nothing observable changes.
    pub(super) fn execute_command(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::Write(path) => {
                self.write_to(path)?;
            }
            Command::WriteQuit(path) => {
                self.write_to(path)?;
                self.should_quit = true;
            }
            Command::Quit => self.should_quit = true,
            Command::Open(path) => {
                let diagram = store::load_diagram(&path).map_err(|err| {
                    tracing::warn!(error = %err, "rejected load");
                    err
                })?;
                self.replace_diagram_from_load(diagram);
                self.set_status(format!("opened {}", path.display()));
                self.file_path = Some(path);
            }
            Command::SetType(kind) => {
                if self.diagram.kind() != kind {
                    self.diagram.set_kind(kind);
                    self.commit();
                }
            }
            Command::Clear => {
                if !self.diagram.is_empty() {
                    self.diagram.clear();
                    self.selection = None;
                    self.commit();
                }
            }
        }
        Ok(())
    }

    fn write_to(&mut self, path: Option<PathBuf>) -> Result<(), CommandError> {
        let path = match path {
            Some(path) => path,
            None => self.file_path.clone().ok_or(CommandError::NoFileName)?,
        };
        store::save_diagram(&path, &self.diagram, self.durability)?;
        self.set_status(format!("wrote {}", path.display()));
        self.file_path = Some(path);
        Ok(())
    }

    pub(super) fn handle_command_key(&mut self, key: super::Key) {
        use super::Key;

        match key {
            Key::Esc => {
                self.command_line.clear();
                self.command_error = None;
                self.set_mode(Mode::Normal);
            }
            Key::Enter => self.submit_command_line(),
            Key::Char(ch) if !ch.is_control() => {
                self.command_error = None;
                self.command_line.insert_char(ch);
            }
            Key::Backspace => {
                self.command_error = None;
                self.command_line.backspace();
            }
            Key::Delete => {
                self.command_error = None;
                self.command_line.delete_forward();
            }
            Key::Left => self.command_line.move_left(),
            Key::Right => self.command_line.move_right(),
            Key::Home => self.command_line.move_line_home(),
            Key::End => self.command_line.move_line_end(),
            Key::WordForward => self.command_line.move_word_forward(),
            Key::WordBackward => self.command_line.move_word_backward(),
            _ => {}
        }
    }

    fn submit_command_line(&mut self) {
        let input = self.command_line.text();
        if input.trim().is_empty() {
            self.command_line.clear();
            self.command_error = None;
            self.set_mode(Mode::Normal);
            return;
        }

        match parse_command(&input).and_then(|command| self.execute_command(command)) {
            Ok(()) => {
                tracing::debug!(command = %input.trim(), "command executed");
                self.command_line.clear();
                self.command_error = None;
                self.set_mode(Mode::Normal);
            }
            Err(err) => {
                tracing::warn!(command = %input.trim(), error = %err, "command failed");
                self.command_error = Some(err.to_string());
            }
        }
    }
}
