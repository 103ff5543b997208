// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Diagram geometry: layout, drawing onto a character canvas, and jump-label projection.
//!
//! Everything here is a pure function of the diagram and editor state; the terminal shell in
//! [`crate::tui`] only copies the results into ratatui buffers.

pub mod canvas;
pub mod layout;
pub mod projection;
pub mod render;

pub use canvas::{Canvas, CanvasError, Paint};
pub use layout::{layout_diagram, Layout, NodeBox, Point, SEQUENCE_PARTICIPANT_ROW};
pub use projection::{project_labels, LabelPosition, ProjectionRequest};
pub use render::render_diagram;

/// Size of the diagram pane in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Top-left model cell shown in the diagram pane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollOffset {
    pub x: u16,
    pub y: u16,
}
