// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end editing sessions driven through `Editor::handle_key`.

use jumpbox::editor::{Editor, JumpAction, JumpTarget, Key, Mode, ModeKind};
use jumpbox::format::{from_json_str, to_json_pretty};
use jumpbox::model::{Diagram, DiagramKind, ModelError, NodeId};
use jumpbox::store;

fn id(value: u32) -> NodeId {
    NodeId::new(value).expect("node id")
}

fn sequence_abc() -> Diagram {
    let mut diagram = Diagram::new(DiagramKind::Sequence);
    for name in ["A", "B", "C"] {
        diagram.add_node(vec![name.to_owned()]).expect("add node");
    }
    diagram
}

fn press_label(editor: &mut Editor, node: u32) {
    let label = editor
        .jump_labels()
        .label_for(JumpTarget::Node(id(node)))
        .expect("node is labeled");
    editor.handle_key(Key::Char(label));
}

fn connections(editor: &Editor) -> Vec<(u32, u32)> {
    editor
        .diagram()
        .connections()
        .iter()
        .map(|connection| (connection.from().get(), connection.to().get()))
        .collect()
}

#[test]
fn continuous_connect_chain() {
    let mut editor = Editor::new(sequence_abc());
    editor.handle_key(Key::Char('C'));
    press_label(&mut editor, 1);
    press_label(&mut editor, 2);
    press_label(&mut editor, 3);

    assert_eq!(connections(&editor), vec![(1, 2), (2, 3)]);
    assert_eq!(editor.mode().kind(), ModeKind::Jump);
    assert!(editor.continuous_connect());
}

#[test]
fn invalid_key_under_continuous_connect() {
    let mut editor = Editor::new(sequence_abc());
    editor.handle_key(Key::Char('C'));
    press_label(&mut editor, 1);
    editor.handle_key(Key::Char('z'));
    press_label(&mut editor, 2);

    assert_eq!(connections(&editor), vec![(1, 2)]);
    assert_eq!(editor.mode().kind(), ModeKind::Jump);
}

#[test]
fn invalid_key_under_single_connect() {
    let mut editor = Editor::new(sequence_abc());
    editor.handle_key(Key::Char('c'));
    press_label(&mut editor, 1);
    editor.handle_key(Key::Char('z'));

    assert!(connections(&editor).is_empty());
    assert_eq!(editor.mode(), Mode::Normal);
    assert_eq!(editor.jump_action(), JumpAction::Select);
}

#[test]
fn hint_round_trip() {
    let mut diagram = Diagram::new(DiagramKind::Box);
    let a = diagram.add_node(vec!["a".to_owned()]).expect("add node");
    let b = diagram.add_node(vec!["b".to_owned()]).expect("add node");
    diagram.add_connection(a, b, "").expect("connect");
    let mut editor = Editor::new(diagram);

    editor.handle_key(Key::Char('h'));
    let label = editor
        .jump_labels()
        .label_for(JumpTarget::Connection(0))
        .expect("connection is labeled");
    editor.handle_key(Key::Char(label));
    assert_eq!(editor.mode(), Mode::HintMenu { connection: 0 });
    editor.handle_key(Key::Char('b'));
    editor.handle_key(Key::Char('r'));

    let json = to_json_pretty(editor.diagram()).expect("serialize");
    let parsed = from_json_str(&json).expect("parse");
    let hints = parsed.connections()[0]
        .hints()
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(hints, vec![("color", "red"), ("style", "dashed")]);
}

#[test]
fn undo_across_edit() {
    let mut editor = Editor::default();
    editor.handle_key(Key::Char('i'));
    editor.handle_key(Key::Char('X'));
    editor.handle_key(Key::Enter);

    editor.handle_key(Key::Char('e'));
    editor.handle_key(Key::Backspace);
    editor.handle_key(Key::Char('Y'));
    editor.handle_key(Key::Enter);

    let text = |editor: &Editor| editor.diagram().nodes()[0].text().to_vec();
    editor.handle_key(Key::Char('u'));
    assert_eq!(text(&editor), vec!["X".to_owned()]);
    editor.handle_key(Key::Char('R'));
    assert_eq!(text(&editor), vec!["Y".to_owned()]);
}

#[test]
fn validation_rejects_duplicate_ids() {
    let source = r#"{"type":"box","nodes":[{"id":1,"text":["a"]},{"id":1,"text":["b"]}],
        "connections":[]}"#;
    let err = from_json_str(source).unwrap_err();
    assert_eq!(err.model_error(), Some(&ModelError::DuplicateId { id: id(1) }));

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("dup.json");
    std::fs::write(&path, source).expect("write");

    let mut editor = Editor::new(sequence_abc());
    for ch in format!(":e {}", path.display()).chars() {
        editor.handle_key(Key::Char(ch));
    }
    editor.handle_key(Key::Enter);

    assert!(store::load_diagram(&path).is_err());
    assert_eq!(editor.diagram(), &sequence_abc());
    assert!(editor.command_error().is_some());
}
