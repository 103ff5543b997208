// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The modal editor core.
//!
//! [`Editor`] owns the diagram, its undo history and all input state. Every key goes through
//! [`Editor::handle_key`], which dispatches on the current [`Mode`]. Committed mutations push a
//! snapshot onto the history before the next key is handled. Rendering and process control live
//! outside this module; the only side channels are [`Editor::take_external_action`] for the
//! external editor and [`Editor::should_quit`].

mod command;
mod hint_menu;
mod jump;
mod json_view;
mod key;
mod mode;
mod text_buffer;
mod text_mode;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub use command::{parse_command, Command, CommandError};
pub use hint_menu::{hint_for_key, HintEdit, HINT_MENU_ENTRIES};
pub use jump::{JumpLabels, JumpTarget, TargetSet, JUMP_ALPHABET};
pub use key::Key;
pub use mode::{JumpAction, Mode, ModeKind, Selection};
pub use text_buffer::TextBuffer;

use crate::history::{History, DEFAULT_HISTORY_DEPTH};
use crate::model::{Diagram, DiagramKind, NodeId};
use crate::store::WriteDurability;
use crate::view::{ScrollOffset, Viewport};

const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

/// Work the editor cannot do itself and hands to the terminal shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalAction {
    /// Suspend the TUI and open the diagram JSON in `$EDITOR`.
    EditDiagram,
}

#[derive(Debug, Clone)]
pub struct EditorOptions {
    pub history_depth: usize,
    pub durability: WriteDurability,
    /// File bound to `:w` without an argument.
    pub file_path: Option<PathBuf>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            history_depth: DEFAULT_HISTORY_DEPTH,
            durability: WriteDurability::default(),
            file_path: None,
        }
    }
}

#[derive(Debug)]
pub struct Editor {
    diagram: Diagram,
    history: History,
    mode: Mode,
    labels: JumpLabels,
    selection: Option<Selection>,
    text: TextBuffer,
    command_line: TextBuffer,
    command_error: Option<String>,
    viewport: Viewport,
    content_width: u16,
    content_height: u16,
    scroll: ScrollOffset,
    file_path: Option<PathBuf>,
    durability: WriteDurability,
    status: Option<Toast>,
    pending_external_action: Option<ExternalAction>,
    should_quit: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Diagram::default())
    }
}

impl Editor {
    pub fn new(diagram: Diagram) -> Self {
        Self::with_options(diagram, EditorOptions::default())
    }

    pub fn with_options(diagram: Diagram, options: EditorOptions) -> Self {
        let history = History::new(&diagram, options.history_depth);
        Self {
            diagram,
            history,
            mode: Mode::Normal,
            labels: JumpLabels::default(),
            selection: None,
            text: TextBuffer::new(),
            command_line: TextBuffer::new(),
            command_error: None,
            viewport: Viewport::default(),
            content_width: 0,
            content_height: 0,
            scroll: ScrollOffset::default(),
            file_path: options.file_path,
            durability: options.durability,
            status: None,
            pending_external_action: None,
            should_quit: false,
        }
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The pending jump action, or [`JumpAction::Select`] outside Jump.
    pub fn jump_action(&self) -> JumpAction {
        match self.mode {
            Mode::Jump { action, .. } => action,
            _ => JumpAction::Select,
        }
    }

    pub fn continuous_connect(&self) -> bool {
        matches!(self.mode, Mode::Jump { continuous: true, .. })
    }

    pub fn jump_labels(&self) -> &JumpLabels {
        &self.labels
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn selected_node(&self) -> Option<NodeId> {
        self.selection.and_then(Selection::node)
    }

    pub fn selected_connection(&self) -> Option<usize> {
        self.selection.and_then(Selection::connection)
    }

    pub fn editing_hint_connection(&self) -> Option<usize> {
        match self.mode {
            Mode::HintMenu { connection } => Some(connection),
            _ => None,
        }
    }

    pub fn json_scroll(&self) -> Option<usize> {
        match self.mode {
            Mode::Json { scroll } => Some(scroll),
            _ => None,
        }
    }

    pub fn text_buffer(&self) -> &TextBuffer {
        &self.text
    }

    pub fn command_line(&self) -> &TextBuffer {
        &self.command_line
    }

    pub fn command_error(&self) -> Option<&str> {
        self.command_error.as_deref()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll(&self) -> ScrollOffset {
        self.scroll
    }

    /// Size of the diagram pane, as last drawn.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.clamp_scroll();
        if let Mode::Json { scroll } = self.mode {
            self.mode = Mode::Json { scroll: scroll.min(self.json_max_scroll()) };
        }
    }

    /// Extent of the laid-out diagram, used to bound scrolling.
    pub fn set_content_size(&mut self, width: u16, height: u16) {
        self.content_width = width;
        self.content_height = height;
        self.clamp_scroll();
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status.as_ref().map(|toast| toast.message.as_str())
    }

    /// Drops the status message once its display time has passed.
    pub fn expire_status(&mut self, now: Instant) {
        if self.status.as_ref().is_some_and(|toast| toast.expires_at <= now) {
            self.status = None;
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn take_external_action(&mut self) -> Option<ExternalAction> {
        self.pending_external_action.take()
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status =
            Some(Toast { message: message.into(), expires_at: Instant::now() + STATUS_TTL });
    }

    pub fn handle_key(&mut self, key: Key) {
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Insert | Mode::Edit(_) => self.handle_text_key(key),
            Mode::Command => self.handle_command_key(key),
            Mode::Jump { action, continuous } => self.handle_jump_key(key, action, continuous),
            Mode::Json { scroll } => self.handle_json_key(key, scroll),
            Mode::HintMenu { connection } => self.handle_hint_menu_key(key, connection),
        }
    }

    /// Switches mode, clearing the state that belongs to the mode being left.
    fn set_mode(&mut self, mode: Mode) {
        let previous = self.mode;
        if matches!(previous, Mode::Jump { .. }) && !matches!(mode, Mode::Jump { .. }) {
            self.labels.clear();
        }
        if previous.is_text_entry() && !mode.is_text_entry() {
            self.text.clear();
        }
        if previous.kind() != mode.kind() {
            tracing::debug!(from = %previous.kind(), to = %mode.kind(), "mode change");
        }
        self.mode = mode;
    }

    /// Records the current diagram as a new history entry.
    fn commit(&mut self) {
        self.history.save(&self.diagram);
        tracing::debug!(
            cursor = self.history.cursor(),
            nodes = self.diagram.nodes().len(),
            connections = self.diagram.connections().len(),
            "commit"
        );
    }

    fn handle_normal_key(&mut self, key: Key) {
        match key {
            Key::Char('i') => {
                self.text.clear();
                self.set_mode(Mode::Insert);
            }
            Key::Char('e') => match self.selection {
                Some(selection) => self.begin_edit(selection),
                None => self.enter_jump(JumpAction::Edit, TargetSet::Nodes, false),
            },
            Key::Char('E') => self.enter_jump(JumpAction::Edit, TargetSet::Connections, false),
            Key::Char('c') => self.enter_jump(JumpAction::ConnectFrom, TargetSet::Nodes, false),
            Key::Char('C') => self.enter_jump(JumpAction::ConnectFrom, TargetSet::Nodes, true),
            Key::Char('d') => self.enter_jump(JumpAction::Delete, TargetSet::Nodes, false),
            Key::Char('D') => self.enter_jump(JumpAction::Delete, TargetSet::Connections, false),
            Key::Char('f') => self.enter_jump(JumpAction::Select, TargetSet::Nodes, false),
            Key::Char('F') => self.enter_jump(JumpAction::Select, TargetSet::Connections, false),
            Key::Char('h') => self.enter_jump(JumpAction::Hint, TargetSet::Connections, false),
            Key::Char('r') => {
                if self.diagram.kind() == DiagramKind::Sequence {
                    self.enter_jump(JumpAction::ReorderFrom, TargetSet::Nodes, false);
                } else {
                    self.set_status("reorder needs a sequence diagram");
                }
            }
            Key::Char(':') => {
                self.command_line.clear();
                self.command_error = None;
                self.set_mode(Mode::Command);
            }
            Key::Char('j') => self.set_mode(Mode::Json { scroll: 0 }),
            Key::Char('u') => self.undo(),
            Key::Char('R') => self.redo(),
            Key::Char('x') => self.pending_external_action = Some(ExternalAction::EditDiagram),
            Key::Char('q') => self.should_quit = true,
            Key::Esc => self.selection = None,
            Key::Up => self.scroll_by(0, -1),
            Key::Down => self.scroll_by(0, 1),
            Key::Left => self.scroll_by(-1, 0),
            Key::Right => self.scroll_by(1, 0),
            Key::PageUp => self.scroll_by(0, -self.page_rows()),
            Key::PageDown => self.scroll_by(0, self.page_rows()),
            Key::Home => self.scroll = ScrollOffset::default(),
            _ => {}
        }
    }

    fn enter_jump(&mut self, action: JumpAction, targets: TargetSet, continuous: bool) {
        let labels = JumpLabels::assign(targets.collect(&self.diagram));
        if labels.is_empty() {
            let what = match targets {
                TargetSet::Nodes | TargetSet::Slots => "nodes",
                TargetSet::Connections => "connections",
            };
            self.set_status(format!("no {what} to {}", action.describe()));
            return;
        }
        self.labels = labels;
        self.set_mode(Mode::Jump { action, continuous });
    }

    fn cancel_jump(&mut self) {
        self.set_mode(Mode::Normal);
    }

    fn handle_jump_key(&mut self, key: Key, action: JumpAction, continuous: bool) {
        if key == Key::Esc {
            self.cancel_jump();
            return;
        }

        let Some(target) = key.char().and_then(|ch| self.labels.target_for(ch)) else {
            if !continuous {
                self.cancel_jump();
            }
            return;
        };

        match (action, target) {
            (JumpAction::Select, JumpTarget::Node(id)) => {
                self.selection = Some(Selection::Node(id));
                self.set_mode(Mode::Normal);
            }
            (JumpAction::Select, JumpTarget::Connection(index)) => {
                self.selection = Some(Selection::Connection(index));
                self.set_mode(Mode::Normal);
            }
            (JumpAction::Edit, JumpTarget::Node(id)) => {
                self.selection = Some(Selection::Node(id));
                self.set_mode(Mode::Normal);
                self.begin_edit(Selection::Node(id));
            }
            (JumpAction::Edit, JumpTarget::Connection(index)) => {
                self.selection = Some(Selection::Connection(index));
                self.set_mode(Mode::Normal);
                self.begin_edit(Selection::Connection(index));
            }
            (JumpAction::Delete, JumpTarget::Node(id)) => {
                self.set_mode(Mode::Normal);
                self.delete_node(id);
            }
            (JumpAction::Delete, JumpTarget::Connection(index)) => {
                self.set_mode(Mode::Normal);
                self.delete_connection(index);
            }
            (JumpAction::ConnectFrom, JumpTarget::Node(id)) => {
                self.selection = Some(Selection::Node(id));
                self.mode = Mode::Jump { action: JumpAction::ConnectTo, continuous };
            }
            (JumpAction::ConnectTo, JumpTarget::Node(to)) => self.connect_to(to, continuous),
            (JumpAction::Hint, JumpTarget::Connection(index)) => {
                self.selection = Some(Selection::Connection(index));
                self.set_mode(Mode::HintMenu { connection: index });
            }
            (JumpAction::ReorderFrom, JumpTarget::Node(source)) => {
                self.selection = Some(Selection::Node(source));
                self.labels = JumpLabels::assign(TargetSet::Slots.collect(&self.diagram));
                self.mode = Mode::Jump { action: JumpAction::ReorderTo { source }, continuous };
            }
            (JumpAction::ReorderTo { source }, JumpTarget::Slot(slot)) => {
                self.set_mode(Mode::Normal);
                self.move_to_slot(source, slot);
            }
            _ => self.cancel_jump(),
        }
    }

    fn connect_to(&mut self, to: NodeId, continuous: bool) {
        let Some(from) = self.selected_node() else {
            self.cancel_jump();
            return;
        };

        match self.diagram.add_connection(from, to, "") {
            Ok(index) => {
                self.commit();
                tracing::debug!(%from, %to, index, "connected");
                if continuous {
                    self.selection = Some(Selection::Node(to));
                } else {
                    self.set_mode(Mode::Normal);
                }
            }
            Err(err) => {
                self.set_status(err.to_string());
                self.cancel_jump();
            }
        }
    }

    fn delete_node(&mut self, id: NodeId) {
        match self.diagram.remove_node(id) {
            Ok(_) => {
                self.commit();
                self.retain_valid_selection();
                if let Some(Selection::Connection(_)) = self.selection {
                    self.selection = None;
                }
            }
            Err(err) => self.set_status(err.to_string()),
        }
    }

    fn delete_connection(&mut self, index: usize) {
        match self.diagram.remove_connection(index) {
            Ok(_) => {
                self.commit();
                if let Some(Selection::Connection(_)) = self.selection {
                    self.selection = None;
                }
            }
            Err(err) => self.set_status(err.to_string()),
        }
    }

    /// Moves `source` so it ends up before the participant currently at `slot`.
    fn move_to_slot(&mut self, source: NodeId, slot: usize) {
        let Some(index) = self.diagram.node_index(source) else {
            self.set_status(format!("node {source} no longer exists"));
            return;
        };
        if slot == index || slot == index + 1 {
            return;
        }

        let new_index = if slot > index { slot - 1 } else { slot };
        match self.diagram.reorder_node(source, new_index) {
            Ok(()) => self.commit(),
            Err(err) => self.set_status(err.to_string()),
        }
    }

    fn undo(&mut self) {
        match self.history.undo() {
            Some(snapshot) => {
                self.diagram = snapshot.clone();
                self.retain_valid_selection();
            }
            None => self.set_status("already at oldest change"),
        }
    }

    fn redo(&mut self) {
        match self.history.redo() {
            Some(snapshot) => {
                self.diagram = snapshot.clone();
                self.retain_valid_selection();
            }
            None => self.set_status("already at newest change"),
        }
    }

    /// Drops a selection that no longer resolves in the current diagram.
    fn retain_valid_selection(&mut self) {
        let valid = match self.selection {
            Some(Selection::Node(id)) => self.diagram.contains_node(id),
            Some(Selection::Connection(index)) => index < self.diagram.connections().len(),
            None => true,
        };
        if !valid {
            self.selection = None;
        }
    }

    /// Replaces the diagram after `:e`; history restarts at the loaded state.
    fn replace_diagram_from_load(&mut self, diagram: Diagram) {
        self.diagram = diagram;
        self.history.reset(&self.diagram);
        self.selection = None;
        self.scroll = ScrollOffset::default();
    }

    /// Applies the outcome of an external edit session.
    pub fn apply_external_edit<E: std::fmt::Display>(
        &mut self,
        outcome: Result<Option<Diagram>, E>,
    ) {
        match outcome {
            Ok(Some(diagram)) if diagram == self.diagram => self.set_status("no changes"),
            Ok(Some(diagram)) => {
                self.diagram = diagram;
                self.retain_valid_selection();
                self.commit();
                tracing::info!("applied external edit");
                self.set_status("applied external edit");
            }
            Ok(None) => self.set_status("no changes"),
            Err(err) => {
                tracing::warn!(error = %err, "external edit rejected");
                self.set_status(format!("external edit failed: {err}"));
            }
        }
    }

    fn page_rows(&self) -> i32 {
        i32::from(self.viewport.height.saturating_sub(1).max(1))
    }

    fn scroll_by(&mut self, dx: i32, dy: i32) {
        let x = (i32::from(self.scroll.x) + dx).clamp(0, i32::from(u16::MAX));
        let y = (i32::from(self.scroll.y) + dy).clamp(0, i32::from(u16::MAX));
        self.scroll = ScrollOffset { x: x as u16, y: y as u16 };
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        let max_x = self.content_width.saturating_sub(self.viewport.width);
        let max_y = self.content_height.saturating_sub(self.viewport.height);
        self.scroll.x = self.scroll.x.min(max_x);
        self.scroll.y = self.scroll.y.min(max_y);
    }
}
