// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::canvas::{stroke_chars, Canvas, CanvasError, Paint};
use super::layout::{Layout, Point, Route};
use crate::editor::Selection;
use crate::model::{Connection, ConnectionColor, ConnectionStyle, Diagram};

const LIFELINE: char = '┆';

fn arrow_head(from: Point, to: Point) -> char {
    if to.x > from.x {
        '▶'
    } else if to.x < from.x {
        '◀'
    } else if to.y > from.y {
        '▼'
    } else {
        '▲'
    }
}

fn connection_paint(connection: &Connection, selected: bool) -> Paint {
    if selected {
        return Paint::Selected;
    }
    ConnectionColor::of(connection).map_or(Paint::Plain, Paint::Color)
}

/// Draws `diagram` as laid out by `layout`. The selected entity is painted
/// [`Paint::Selected`].
pub fn render_diagram(
    diagram: &Diagram,
    layout: &Layout,
    selection: Option<Selection>,
) -> Result<Canvas, CanvasError> {
    let mut canvas = Canvas::new(layout.width(), layout.height())?;

    if let Some((top, bottom)) = layout.lifelines() {
        for node in layout.nodes() {
            canvas.draw_vline(node.center_x(), top, bottom, LIFELINE, Paint::Plain)?;
        }
    }

    for placed in layout.connections() {
        let Some(connection) = diagram.connection(placed.index()) else {
            continue;
        };
        let selected = selection == Some(Selection::Connection(placed.index()));
        let paint = connection_paint(connection, selected);
        let (h, v) = stroke_chars(ConnectionStyle::of(connection));

        match placed.route() {
            Route::Path(points) => {
                for pair in points.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    if a.y == b.y {
                        canvas.draw_hline(a.x, b.x, a.y, h, paint)?;
                    } else {
                        canvas.draw_vline(a.x, a.y, b.y, v, paint)?;
                    }
                }
                if let [.., before, last] = points.as_slice() {
                    canvas.set_painted(last.x, last.y, arrow_head(*before, *last), paint)?;
                }
            }
            Route::SelfLoop { start } => {
                let Point { x, y } = *start;
                canvas.draw_hline(x, x + 1, y, h, paint)?;
                canvas.set_painted(x + 2, y, '┐', paint)?;
                canvas.set_painted(x, y + 1, '◀', paint)?;
                canvas.draw_hline(x + 1, x + 1, y + 1, h, paint)?;
                canvas.set_painted(x + 2, y + 1, '┘', paint)?;
            }
        }

        if let Some(first_line) = connection.label().lines().next() {
            let at = placed.label_at();
            canvas.write_str(at.x, at.y, first_line, paint)?;
        }
    }

    for (node, placed) in diagram.nodes().iter().zip(layout.nodes()) {
        let paint = if selection == Some(Selection::Node(node.id())) {
            Paint::Selected
        } else {
            Paint::Plain
        };
        canvas.draw_box(placed.x(), placed.y(), placed.right(), placed.bottom(), paint)?;
        for (row, line) in node.text().iter().enumerate() {
            canvas.write_str(placed.x() + 2, placed.y() + 1 + row, line, paint)?;
        }
    }

    Ok(canvas)
}
