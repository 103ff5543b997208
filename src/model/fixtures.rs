// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{Diagram, DiagramKind, NodeId};

pub(crate) fn id(value: u32) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn text(line: &str) -> Vec<String> {
    vec![line.to_owned()]
}

/// Sequence diagram with participants A, B, C (ids 1, 2, 3) and no messages.
pub(crate) fn sequence_abc() -> Diagram {
    let mut diagram = Diagram::new(DiagramKind::Sequence);
    for name in ["A", "B", "C"] {
        diagram.add_node(text(name)).expect("add node");
    }
    diagram
}

/// Box diagram `Client -> Server -> Store` with one styled connection.
pub(crate) fn box_pipeline() -> Diagram {
    let mut diagram = Diagram::new(DiagramKind::Box);
    let client = diagram.add_node(text("Client")).expect("add node");
    let server =
        diagram.add_node(vec!["Server".to_owned(), "(api)".to_owned()]).expect("add node");
    let store = diagram.add_node(text("Store")).expect("add node");
    diagram.add_connection(client, server, "request").expect("client -> server");
    let idx = diagram.add_connection(server, store, "write").expect("server -> store");
    diagram.set_connection_hint(idx, "style", "dashed").expect("style hint");
    diagram.set_connection_hint(idx, "color", "cyan").expect("color hint");
    diagram
}
