// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Screen positions for jump labels.

use super::layout::{Layout, Point, SEQUENCE_PARTICIPANT_ROW};
use super::{ScrollOffset, Viewport};
use crate::editor::{JumpAction, JumpLabels, JumpTarget, Selection};

/// Distance of the outer insertion slots from the first/last participant box.
const SLOT_MARGIN: usize = 2;

#[derive(Debug, Clone, Copy)]
pub struct ProjectionRequest<'a> {
    pub layout: &'a Layout,
    pub viewport: Viewport,
    pub scroll: ScrollOffset,
    /// The top row of the pane shows a scroll indicator and is not part of the body.
    pub scroll_indicator: bool,
    pub labels: &'a JumpLabels,
    pub action: JumpAction,
    pub selection: Option<Selection>,
}

/// A label placed in pane coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelPosition {
    pub target: JumpTarget,
    pub label: char,
    pub x: u16,
    pub y: u16,
    /// The node chosen as the origin of a pending connection.
    pub is_from: bool,
}

fn model_position(layout: &Layout, target: JumpTarget) -> Option<Point> {
    match target {
        JumpTarget::Node(id) => layout.node_box(id).map(|node| node.anchor()),
        JumpTarget::Connection(index) => layout.connection_anchor(index),
        JumpTarget::Slot(slot) => slot_position(layout, slot),
    }
}

/// Slot `0` sits left of the first participant, slot `len` right of the last, and every other
/// slot halfway between the centers of its neighbours.
fn slot_position(layout: &Layout, slot: usize) -> Option<Point> {
    let nodes = layout.nodes();
    let first = nodes.first()?;
    let last = nodes.last()?;
    let x = if slot == 0 {
        first.x().saturating_sub(SLOT_MARGIN)
    } else if slot == nodes.len() {
        last.right() + SLOT_MARGIN
    } else {
        let left = nodes.get(slot - 1)?;
        let right = nodes.get(slot)?;
        (left.center_x() + right.center_x()) / 2
    };
    Some(Point::new(x, SEQUENCE_PARTICIPANT_ROW))
}

/// Projects every labeled target into the pane. Targets whose row falls outside the body are
/// dropped; columns are clamped to the pane width.
pub fn project_labels(request: &ProjectionRequest<'_>) -> Vec<LabelPosition> {
    let width = usize::from(request.viewport.width);
    let height = usize::from(request.viewport.height);
    let body_top = usize::from(request.scroll_indicator);
    if width == 0 || height <= body_top {
        return Vec::new();
    }

    let from_node = match request.action {
        JumpAction::ConnectTo => request.selection.and_then(Selection::node),
        _ => None,
    };

    request
        .labels
        .iter()
        .filter_map(|(target, label)| {
            let point = model_position(request.layout, target)?;
            let y = (point.y + body_top).checked_sub(usize::from(request.scroll.y))?;
            if y < body_top || y >= height {
                return None;
            }
            let x = point.x.saturating_sub(usize::from(request.scroll.x)).min(width - 1);
            Some(LabelPosition {
                target,
                label,
                x: x as u16,
                y: y as u16,
                is_from: from_node.is_some() && target.node() == from_node,
            })
        })
        .collect()
}
