// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Deterministic placement of nodes and connection routes in model cells.
//!
//! Box diagrams use a fixed-width grid unless a node carries `x`/`y`, in which case the node is
//! placed at that cell. Sequence diagrams put every participant on one row and give each message
//! its own row below.

use std::collections::BTreeMap;

use crate::model::{Diagram, DiagramKind, Node, NodeId};

/// Row of the participant boxes' top border in sequence diagrams.
pub const SEQUENCE_PARTICIPANT_ROW: usize = 1;

const GRID_COLUMNS: usize = 3;
const MARGIN_X: usize = 3;
const MARGIN_Y: usize = 1;
const GRID_GAP_X: usize = 8;
const GRID_GAP_Y: usize = 3;
const MIN_BOX_WIDTH: usize = 5;
const MIN_PARTICIPANT_GAP: usize = 6;
const SELF_LOOP_WIDTH: usize = 4;

/// A cell position in model space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeBox {
    id: NodeId,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

impl NodeBox {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn right(&self) -> usize {
        self.x + self.width - 1
    }

    pub fn bottom(&self) -> usize {
        self.y + self.height - 1
    }

    pub fn center_x(&self) -> usize {
        self.x + self.width / 2
    }

    pub fn center_y(&self) -> usize {
        self.y + self.height / 2
    }

    /// Where a jump label for this node is drawn: the middle of the top border.
    pub fn anchor(&self) -> Point {
        Point::new(self.center_x(), self.y)
    }
}

/// Geometry of one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Orthogonal polyline; the arrowhead sits on the last point.
    Path(Vec<Point>),
    /// A connection from a node to itself, drawn as a small hook starting at `start`.
    SelfLoop { start: Point },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionLayout {
    index: usize,
    route: Route,
    label_at: Point,
    anchor: Point,
}

impl ConnectionLayout {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Start of the label text.
    pub fn label_at(&self) -> Point {
        self.label_at
    }

    /// Where a jump label for this connection is drawn: the midpoint of its endpoints.
    pub fn anchor(&self) -> Point {
        self.anchor
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    kind: DiagramKind,
    nodes: Vec<NodeBox>,
    connections: Vec<ConnectionLayout>,
    /// First and last row of sequence lifelines.
    lifelines: Option<(usize, usize)>,
    width: usize,
    height: usize,
}

impl Layout {
    pub fn kind(&self) -> DiagramKind {
        self.kind
    }

    /// Node boxes in node order.
    pub fn nodes(&self) -> &[NodeBox] {
        &self.nodes
    }

    pub fn connections(&self) -> &[ConnectionLayout] {
        &self.connections
    }

    pub fn lifelines(&self) -> Option<(usize, usize)> {
        self.lifelines
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn node_box(&self, id: NodeId) -> Option<&NodeBox> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// `NodeId → anchor` for label projection.
    pub fn placements(&self) -> BTreeMap<NodeId, Point> {
        self.nodes.iter().map(|node| (node.id, node.anchor())).collect()
    }

    pub fn connection_anchor(&self, index: usize) -> Option<Point> {
        self.connections
            .iter()
            .find(|placed| placed.index == index)
            .map(ConnectionLayout::anchor)
    }
}

fn text_width(text: &str) -> usize {
    text.chars().count()
}

fn box_size(node: &Node) -> (usize, usize) {
    let widest = node.text().iter().map(|line| text_width(line)).max().unwrap_or(0);
    ((widest + 4).max(MIN_BOX_WIDTH), node.text().len().max(1) + 2)
}

pub fn layout_diagram(diagram: &Diagram) -> Layout {
    match diagram.kind() {
        DiagramKind::Box => layout_box(diagram),
        DiagramKind::Sequence => layout_sequence(diagram),
    }
}

/// Tracks the extent of everything placed so far.
#[derive(Default)]
struct Extent {
    right: usize,
    bottom: usize,
}

impl Extent {
    fn include(&mut self, x: usize, y: usize) {
        self.right = self.right.max(x);
        self.bottom = self.bottom.max(y);
    }

    fn include_text(&mut self, at: Point, text: &str) {
        let width = text.lines().map(text_width).max().unwrap_or(0);
        self.include(at.x + width, at.y + text.lines().count().saturating_sub(1));
    }
}

fn layout_box(diagram: &Diagram) -> Layout {
    let sizes = diagram.nodes().iter().map(box_size).collect::<Vec<_>>();

    let grid_slots = diagram
        .nodes()
        .iter()
        .enumerate()
        .filter(|(_, node)| node.x().is_none() && node.y().is_none())
        .map(|(index, _)| index)
        .collect::<Vec<_>>();

    let mut col_widths = [0usize; GRID_COLUMNS];
    let rows = grid_slots.len().div_ceil(GRID_COLUMNS);
    let mut row_heights = vec![0usize; rows];
    for (slot, &index) in grid_slots.iter().enumerate() {
        let (w, h) = sizes[index];
        col_widths[slot % GRID_COLUMNS] = col_widths[slot % GRID_COLUMNS].max(w);
        row_heights[slot / GRID_COLUMNS] = row_heights[slot / GRID_COLUMNS].max(h);
    }

    let mut col_x = [MARGIN_X; GRID_COLUMNS];
    for col in 1..GRID_COLUMNS {
        col_x[col] = col_x[col - 1] + col_widths[col - 1] + GRID_GAP_X;
    }
    let mut row_y = vec![MARGIN_Y; rows];
    for row in 1..rows {
        row_y[row] = row_y[row - 1] + row_heights[row - 1] + GRID_GAP_Y;
    }

    let mut positions = vec![(0usize, 0usize); diagram.nodes().len()];
    for (slot, &index) in grid_slots.iter().enumerate() {
        let col = slot % GRID_COLUMNS;
        let (w, _) = sizes[index];
        positions[index] = (col_x[col] + (col_widths[col] - w) / 2, row_y[slot / GRID_COLUMNS]);
    }
    for (index, node) in diagram.nodes().iter().enumerate() {
        if node.x().is_some() || node.y().is_some() {
            let x = node.x().unwrap_or(0).max(0) as usize;
            let y = node.y().unwrap_or(0).max(0) as usize;
            positions[index] = (x, y);
        }
    }

    let mut extent = Extent::default();
    let nodes = diagram
        .nodes()
        .iter()
        .zip(sizes.iter().zip(&positions))
        .map(|(node, (&(width, height), &(x, y)))| {
            let placed = NodeBox { id: node.id(), x, y, width, height };
            extent.include(placed.right(), placed.bottom());
            placed
        })
        .collect::<Vec<_>>();

    let connections = diagram
        .connections()
        .iter()
        .enumerate()
        .filter_map(|(index, connection)| {
            let from = nodes.iter().find(|node| node.id == connection.from())?;
            let to = nodes.iter().find(|node| node.id == connection.to())?;
            let placed = route_box_connection(index, from, to);
            include_route(&mut extent, &placed, connection.label());
            Some(placed)
        })
        .collect();

    Layout {
        kind: DiagramKind::Box,
        nodes,
        connections,
        lifelines: None,
        width: extent.right + 1 + MARGIN_X,
        height: extent.bottom + 1 + MARGIN_Y,
    }
}

fn include_route(extent: &mut Extent, placed: &ConnectionLayout, label: &str) {
    match &placed.route {
        Route::Path(points) => {
            for point in points {
                extent.include(point.x, point.y);
            }
        }
        Route::SelfLoop { start } => extent.include(start.x + SELF_LOOP_WIDTH, start.y + 1),
    }
    extent.include_text(placed.label_at, label);
}

fn route_box_connection(index: usize, from: &NodeBox, to: &NodeBox) -> ConnectionLayout {
    if from.id == to.id {
        let start = Point::new(from.right() + 1, from.y + 1);
        return ConnectionLayout {
            index,
            route: Route::SelfLoop { start },
            label_at: Point::new(start.x + SELF_LOOP_WIDTH, start.y),
            anchor: Point::new(start.x + 1, start.y),
        };
    }

    let shared_top = from.y.max(to.y) + 1;
    let shared_bottom = (from.bottom().min(to.bottom())).saturating_sub(1);
    let side_by_side = shared_top <= shared_bottom;

    let points = if to.y > from.bottom() + 1 && !side_by_side {
        // Down: leave the bottom border, turn on the middle row of the gap.
        let mid = (from.bottom() + to.y) / 2;
        elbow(
            Point::new(from.center_x(), from.bottom() + 1),
            mid,
            Point::new(to.center_x(), to.y - 1),
        )
    } else if from.y > to.bottom() + 1 && !side_by_side {
        let mid = (to.bottom() + from.y) / 2;
        elbow(
            Point::new(from.center_x(), from.y - 1),
            mid,
            Point::new(to.center_x(), to.bottom() + 1),
        )
    } else {
        let y = if side_by_side { shared_top } else { from.center_y() };
        if to.x > from.right() {
            vec![Point::new(from.right() + 1, y), Point::new(to.x.saturating_sub(1), y)]
        } else {
            vec![Point::new(from.x.saturating_sub(1), y), Point::new(to.right() + 1, y)]
        }
    };

    let start = points[0];
    let end = points[points.len() - 1];
    let label_at = if start.y == end.y {
        Point::new(start.x.min(end.x) + 1, start.y.saturating_sub(1))
    } else {
        Point::new(start.x + 2, start.y)
    };

    ConnectionLayout { index, route: Route::Path(points), label_at, anchor: start.midpoint(end) }
}

/// Vertical, horizontal on row `mid`, vertical. Collapses to a straight line when aligned.
fn elbow(start: Point, mid: usize, end: Point) -> Vec<Point> {
    if start.x == end.x {
        return vec![start, end];
    }
    vec![start, Point::new(start.x, mid), Point::new(end.x, mid), end]
}

fn layout_sequence(diagram: &Diagram) -> Layout {
    let sizes = diagram.nodes().iter().map(box_size).collect::<Vec<_>>();
    let header_height = sizes.iter().map(|&(_, h)| h).max().unwrap_or(3);
    let widest_label = diagram
        .connections()
        .iter()
        .flat_map(|connection| connection.label().lines())
        .map(text_width)
        .max()
        .unwrap_or(0);
    let gap = (widest_label + 4).max(MIN_PARTICIPANT_GAP);

    let mut extent = Extent::default();
    let mut x = MARGIN_X;
    let nodes = diagram
        .nodes()
        .iter()
        .zip(&sizes)
        .map(|(node, &(width, _))| {
            let placed = NodeBox {
                id: node.id(),
                x,
                y: SEQUENCE_PARTICIPANT_ROW,
                width,
                height: header_height,
            };
            x += width + gap;
            extent.include(placed.right(), placed.bottom());
            placed
        })
        .collect::<Vec<_>>();

    let header_bottom = SEQUENCE_PARTICIPANT_ROW + header_height - 1;
    let centers =
        nodes.iter().map(|node| (node.id, node.center_x())).collect::<BTreeMap<NodeId, usize>>();

    let connections = diagram
        .connections()
        .iter()
        .enumerate()
        .filter_map(|(index, connection)| {
            let from_x = *centers.get(&connection.from())?;
            let to_x = *centers.get(&connection.to())?;
            let label_row = header_bottom + 1 + 2 * index;
            let row = label_row + 1;

            let placed = if from_x == to_x {
                let start = Point::new(from_x + 1, label_row);
                ConnectionLayout {
                    index,
                    route: Route::SelfLoop { start },
                    label_at: Point::new(start.x + SELF_LOOP_WIDTH, label_row),
                    anchor: Point::new(start.x + 1, row),
                }
            } else {
                let (start, end) = if to_x > from_x {
                    (Point::new(from_x + 1, row), Point::new(to_x - 1, row))
                } else {
                    (Point::new(from_x - 1, row), Point::new(to_x + 1, row))
                };
                ConnectionLayout {
                    index,
                    route: Route::Path(vec![start, end]),
                    label_at: Point::new(from_x.min(to_x) + 2, label_row),
                    anchor: start.midpoint(end),
                }
            };
            include_route(&mut extent, &placed, connection.label().lines().next().unwrap_or(""));
            Some(placed)
        })
        .collect::<Vec<_>>();

    let lifeline_end = header_bottom + 2 * connections.len() + 1;
    extent.include(extent.right, lifeline_end);
    let lifelines = (!nodes.is_empty()).then_some((header_bottom + 1, lifeline_end));

    Layout {
        kind: DiagramKind::Sequence,
        nodes,
        connections,
        lifelines,
        width: extent.right + 1 + MARGIN_X,
        height: extent.bottom + 1 + MARGIN_Y,
    }
}

#[cfg(test)]
mod tests {
    use super::{layout_diagram, Point, Route, SEQUENCE_PARTICIPANT_ROW};
    use crate::model::fixtures::{box_pipeline, id, sequence_abc, text};
    use crate::model::{Diagram, DiagramKind, Node};

    #[test]
    fn box_grid_places_three_per_row() {
        let mut diagram = Diagram::new(DiagramKind::Box);
        for name in ["a", "b", "c", "d"] {
            diagram.add_node(text(name)).expect("add node");
        }
        let layout = layout_diagram(&diagram);
        let tops = layout.nodes().iter().map(|node| node.y()).collect::<Vec<_>>();
        assert_eq!(tops[0], tops[1]);
        assert_eq!(tops[1], tops[2]);
        assert!(tops[3] > tops[0]);
        assert_eq!(layout.nodes()[3].x(), layout.nodes()[0].x());
        assert!(layout.nodes()[1].x() > layout.nodes()[0].right());
    }

    #[test]
    fn explicit_coordinates_are_honoured() {
        let diagram = Diagram::from_parts(
            DiagramKind::Box,
            vec![Node::new(id(1), text("pinned")).with_position(Some(20), Some(-3))],
            Vec::new(),
        );
        let layout = layout_diagram(&diagram);
        assert_eq!((layout.nodes()[0].x(), layout.nodes()[0].y()), (20, 0));
        assert!(layout.width() > 20 + layout.nodes()[0].width());
    }

    #[test]
    fn side_by_side_boxes_get_a_straight_route() {
        let layout = layout_diagram(&box_pipeline());
        let client = layout.node_box(id(1)).expect("client");
        let server = layout.node_box(id(2)).expect("server");
        let Route::Path(points) = layout.connections()[0].route() else {
            panic!("expected path");
        };
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].x, client.right() + 1);
        assert_eq!(points[1].x, server.x() - 1);
        assert_eq!(points[0].y, points[1].y);
    }

    #[test]
    fn stacked_boxes_route_through_the_gap() {
        let mut diagram = Diagram::new(DiagramKind::Box);
        let a = diagram.add_node(text("a")).expect("add node");
        for name in ["b", "c"] {
            diagram.add_node(text(name)).expect("add node");
        }
        let d = diagram.add_node(text("wide node d")).expect("add node");
        diagram.add_connection(a, d, "").expect("connect");

        let layout = layout_diagram(&diagram);
        let from = layout.node_box(a).expect("a");
        let to = layout.node_box(d).expect("d");
        let Route::Path(points) = layout.connections()[0].route() else {
            panic!("expected path");
        };
        assert_eq!(points.first(), Some(&Point::new(from.center_x(), from.bottom() + 1)));
        assert_eq!(points.last(), Some(&Point::new(to.center_x(), to.y() - 1)));
    }

    #[test]
    fn sequence_participants_share_one_row() {
        let mut diagram = sequence_abc();
        diagram.add_connection(id(1), id(3), "hello").expect("connect");
        diagram.add_connection(id(2), id(2), "self").expect("connect");

        let layout = layout_diagram(&diagram);
        assert!(layout.nodes().iter().all(|node| node.y() == SEQUENCE_PARTICIPANT_ROW));
        let xs = layout.nodes().iter().map(|node| node.x()).collect::<Vec<_>>();
        assert!(xs.windows(2).all(|pair| pair[0] < pair[1]));

        let first = layout.connections()[0].anchor();
        let second = layout.connections()[1].anchor();
        assert!(second.y > first.y);
        assert!(matches!(layout.connections()[1].route(), Route::SelfLoop { .. }));

        let (top, bottom) = layout.lifelines().expect("lifelines");
        assert!(top > SEQUENCE_PARTICIPANT_ROW);
        assert!(bottom >= second.y);
        assert!(layout.height() > bottom);
    }

    #[test]
    fn empty_diagram_has_margin_only_extent() {
        let layout = layout_diagram(&Diagram::new(DiagramKind::Sequence));
        assert!(layout.nodes().is_empty());
        assert_eq!(layout.lifelines(), None);
        assert!(layout.width() > 0 && layout.height() > 0);
    }
}
