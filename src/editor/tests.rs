// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{
    Editor, EditorOptions, ExternalAction, JumpAction, JumpTarget, Key, Mode, ModeKind, Selection,
};
use crate::format::{from_json_str, to_json_pretty};
use crate::model::fixtures::{box_pipeline, id, sequence_abc, text};
use crate::model::{Diagram, DiagramKind, ModelError, Node, NodeId};
use crate::view::Viewport;
use std::time::{Duration, Instant};

fn press(editor: &mut Editor, keys: &str) {
    for ch in keys.chars() {
        editor.handle_key(Key::Char(ch));
    }
}

fn label_of(editor: &Editor, target: JumpTarget) -> char {
    editor.jump_labels().label_for(target).expect("target is labeled")
}

fn press_label(editor: &mut Editor, target: JumpTarget) {
    let label = label_of(editor, target);
    editor.handle_key(Key::Char(label));
}

fn node_texts(editor: &Editor) -> Vec<Vec<String>> {
    editor.diagram().nodes().iter().map(|node| node.text().to_vec()).collect()
}

fn edges(editor: &Editor) -> Vec<(NodeId, NodeId)> {
    editor.diagram().connections().iter().map(|c| (c.from(), c.to())).collect()
}

fn two_nodes_one_connection() -> Diagram {
    let mut diagram = Diagram::new(DiagramKind::Box);
    let a = diagram.add_node(text("A")).expect("add node");
    let b = diagram.add_node(text("B")).expect("add node");
    diagram.add_connection(a, b, "").expect("connect");
    diagram
}

#[test]
fn continuous_connect_chains_one_keystroke_per_node() {
    let mut editor = Editor::new(sequence_abc());
    press(&mut editor, "C");
    press_label(&mut editor, JumpTarget::Node(id(1)));
    press_label(&mut editor, JumpTarget::Node(id(2)));
    press_label(&mut editor, JumpTarget::Node(id(3)));

    assert_eq!(edges(&editor), vec![(id(1), id(2)), (id(2), id(3))]);
    assert_eq!(editor.mode(), Mode::Jump { action: JumpAction::ConnectTo, continuous: true });
    assert!(editor.continuous_connect());
    assert_eq!(editor.selection(), Some(Selection::Node(id(3))));
    assert_eq!(editor.history().cursor(), 2);
}

#[test]
fn continuous_connect_absorbs_unlabeled_keys() {
    let mut editor = Editor::new(sequence_abc());
    press(&mut editor, "C");
    press_label(&mut editor, JumpTarget::Node(id(1)));
    press(&mut editor, "z");
    press_label(&mut editor, JumpTarget::Node(id(2)));

    assert_eq!(edges(&editor), vec![(id(1), id(2))]);
    assert_eq!(editor.mode().kind(), ModeKind::Jump);
}

#[test]
fn single_connect_cancels_on_unlabeled_key() {
    let mut editor = Editor::new(sequence_abc());
    press(&mut editor, "c");
    press_label(&mut editor, JumpTarget::Node(id(1)));
    press(&mut editor, "z");

    assert!(edges(&editor).is_empty());
    assert_eq!(editor.mode(), Mode::Normal);
    assert_eq!(editor.jump_action(), JumpAction::Select);
    assert!(!editor.continuous_connect());
    assert!(editor.jump_labels().is_empty());
}

#[test]
fn single_connect_returns_to_normal_after_one_connection() {
    let mut editor = Editor::new(sequence_abc());
    press(&mut editor, "c");
    press_label(&mut editor, JumpTarget::Node(id(3)));
    press_label(&mut editor, JumpTarget::Node(id(1)));

    assert_eq!(edges(&editor), vec![(id(3), id(1))]);
    assert_eq!(editor.mode(), Mode::Normal);
    assert!(editor.jump_labels().is_empty());
}

#[test]
fn escape_leaves_continuous_connect() {
    let mut editor = Editor::new(sequence_abc());
    press(&mut editor, "C");
    press_label(&mut editor, JumpTarget::Node(id(1)));
    editor.handle_key(Key::Esc);

    assert_eq!(editor.mode(), Mode::Normal);
    assert!(!editor.continuous_connect());
    assert!(editor.jump_labels().is_empty());
}

#[test]
fn jump_without_targets_stays_in_normal() {
    let mut editor = Editor::default();
    press(&mut editor, "c");
    assert_eq!(editor.mode(), Mode::Normal);
    assert_eq!(editor.status_message(), Some("no nodes to connect from"));

    let mut editor = Editor::new(sequence_abc());
    press(&mut editor, "h");
    assert_eq!(editor.mode(), Mode::Normal);
    assert_eq!(editor.status_message(), Some("no connections to style connection"));
}

#[test]
fn insert_creates_and_selects_a_multi_line_node() {
    let mut editor = Editor::default();
    press(&mut editor, "iab");
    editor.handle_key(Key::Newline);
    press(&mut editor, "c");
    assert_eq!(editor.text_buffer().text(), "ab\nc");
    editor.handle_key(Key::Enter);

    assert_eq!(node_texts(&editor), vec![vec!["ab".to_owned(), "c".to_owned()]]);
    assert_eq!(editor.selected_node(), Some(id(1)));
    assert_eq!(editor.mode(), Mode::Normal);
    assert!(editor.text_buffer().is_empty());
    assert_eq!(editor.history().cursor(), 1);
}

#[test]
fn empty_insert_creates_nothing() {
    let mut editor = Editor::default();
    press(&mut editor, "i");
    editor.handle_key(Key::Enter);

    assert!(editor.diagram().is_empty());
    assert_eq!(editor.history().cursor(), 0);
    assert_eq!(editor.status_message(), Some("empty node discarded"));
}

#[test]
fn insert_after_the_largest_id_is_refused() {
    let last = id(u32::MAX);
    let diagram =
        Diagram::from_parts(DiagramKind::Box, vec![Node::new(last, text("a"))], Vec::new());
    let mut editor = Editor::new(diagram.clone());
    press(&mut editor, "ib");
    editor.handle_key(Key::Enter);

    assert_eq!(editor.diagram(), &diagram);
    assert_eq!(editor.diagram().validate(), Ok(()));
    assert_eq!(editor.history().cursor(), 0);
    assert_eq!(editor.mode(), Mode::Normal);
    let expected = ModelError::IdExhausted { last }.to_string();
    assert_eq!(editor.status_message(), Some(expected.as_str()));
}

#[test]
fn escape_discards_insert_buffer() {
    let mut editor = Editor::default();
    press(&mut editor, "ihello");
    editor.handle_key(Key::Esc);

    assert!(editor.diagram().is_empty());
    assert!(editor.text_buffer().is_empty());
    assert_eq!(editor.mode(), Mode::Normal);
}

#[test]
fn undo_and_redo_across_an_edit() {
    let mut editor = Editor::default();
    press(&mut editor, "iX");
    editor.handle_key(Key::Enter);
    press(&mut editor, "e");
    assert_eq!(editor.mode(), Mode::Edit(Selection::Node(id(1))));
    assert_eq!(editor.text_buffer().text(), "X");
    editor.handle_key(Key::Backspace);
    press(&mut editor, "Y");
    editor.handle_key(Key::Enter);
    assert_eq!(node_texts(&editor), vec![text("Y")]);

    press(&mut editor, "u");
    assert_eq!(node_texts(&editor), vec![text("X")]);
    press(&mut editor, "R");
    assert_eq!(node_texts(&editor), vec![text("Y")]);
}

#[test]
fn unchanged_edit_does_not_record_history() {
    let mut editor = Editor::new(sequence_abc());
    press(&mut editor, "e");
    press_label(&mut editor, JumpTarget::Node(id(2)));
    assert_eq!(editor.mode(), Mode::Edit(Selection::Node(id(2))));
    editor.handle_key(Key::Enter);

    assert_eq!(editor.history().cursor(), 0);
    assert_eq!(editor.selected_node(), Some(id(2)));
}

#[test]
fn edits_connection_labels_across_lines() {
    let mut editor = Editor::new(box_pipeline());
    press(&mut editor, "E");
    press_label(&mut editor, JumpTarget::Connection(0));
    assert_eq!(editor.text_buffer().text(), "request");
    editor.handle_key(Key::Newline);
    press(&mut editor, "v2");
    editor.handle_key(Key::Enter);

    assert_eq!(editor.diagram().connections()[0].label(), "request\nv2");
    assert_eq!(editor.history().cursor(), 1);
}

#[test]
fn undo_at_oldest_reports_status() {
    let mut editor = Editor::new(sequence_abc());
    press(&mut editor, "u");
    assert_eq!(editor.status_message(), Some("already at oldest change"));
    press(&mut editor, "R");
    assert_eq!(editor.status_message(), Some("already at newest change"));
}

#[test]
fn deleting_a_node_drops_its_connections() {
    let mut diagram = sequence_abc();
    diagram.add_connection(id(1), id(2), "one").expect("connect");
    diagram.add_connection(id(2), id(3), "two").expect("connect");
    let mut editor = Editor::new(diagram);

    press(&mut editor, "d");
    press_label(&mut editor, JumpTarget::Node(id(1)));

    assert_eq!(editor.diagram().nodes().len(), 2);
    assert_eq!(edges(&editor), vec![(id(2), id(3))]);
    assert_eq!(editor.history().cursor(), 1);

    press(&mut editor, "u");
    assert_eq!(editor.diagram().nodes().len(), 3);
    assert_eq!(editor.diagram().connections().len(), 2);
}

#[test]
fn deleting_a_connection_keeps_nodes() {
    let mut editor = Editor::new(box_pipeline());
    press(&mut editor, "F");
    press_label(&mut editor, JumpTarget::Connection(1));
    assert_eq!(editor.selected_connection(), Some(1));

    press(&mut editor, "D");
    press_label(&mut editor, JumpTarget::Connection(1));

    assert_eq!(editor.diagram().connections().len(), 1);
    assert_eq!(editor.diagram().nodes().len(), 3);
    assert_eq!(editor.selection(), None);
}

#[test]
fn reorder_moves_participant_before_the_chosen_slot() {
    let mut editor = Editor::new(sequence_abc());
    press(&mut editor, "r");
    press_label(&mut editor, JumpTarget::Node(id(1)));
    assert_eq!(editor.jump_action(), JumpAction::ReorderTo { source: id(1) });
    assert_eq!(editor.jump_labels().len(), 4);

    press_label(&mut editor, JumpTarget::Slot(3));
    assert_eq!(node_texts(&editor), vec![text("B"), text("C"), text("A")]);
    assert_eq!(editor.mode(), Mode::Normal);

    press(&mut editor, "r");
    press_label(&mut editor, JumpTarget::Node(id(3)));
    press_label(&mut editor, JumpTarget::Slot(1));
    assert_eq!(node_texts(&editor), vec![text("B"), text("A"), text("C")]);
    assert_eq!(editor.history().cursor(), 2);
}

#[test]
fn reorder_to_adjacent_slot_is_a_no_op() {
    let mut editor = Editor::new(sequence_abc());
    for slot in [1, 2] {
        press(&mut editor, "r");
        press_label(&mut editor, JumpTarget::Node(id(2)));
        press_label(&mut editor, JumpTarget::Slot(slot));
    }
    assert_eq!(node_texts(&editor), vec![text("A"), text("B"), text("C")]);
    assert_eq!(editor.history().cursor(), 0);
}

#[test]
fn reorder_requires_sequence_diagram() {
    let mut editor = Editor::new(box_pipeline());
    press(&mut editor, "r");
    assert_eq!(editor.mode(), Mode::Normal);
    assert_eq!(editor.status_message(), Some("reorder needs a sequence diagram"));
}

#[test]
fn hint_menu_edits_survive_json_round_trip() {
    let mut editor = Editor::new(two_nodes_one_connection());
    press(&mut editor, "h");
    press_label(&mut editor, JumpTarget::Connection(0));
    assert_eq!(editor.editing_hint_connection(), Some(0));

    press(&mut editor, "br");
    assert_eq!(editor.mode(), Mode::HintMenu { connection: 0 });
    assert_eq!(editor.history().cursor(), 2);

    let json = to_json_pretty(editor.diagram()).expect("serialize");
    let parsed = from_json_str(&json).expect("parse");
    let hints = parsed.connections()[0].hints();
    assert_eq!(hints.len(), 2);
    assert_eq!(hints.get("style").map(String::as_str), Some("dashed"));
    assert_eq!(hints.get("color").map(String::as_str), Some("red"));

    press(&mut editor, "aw");
    assert!(editor.diagram().connections()[0].hints().is_empty());
    press(&mut editor, "a");
    assert_eq!(editor.history().cursor(), 4);

    editor.handle_key(Key::Esc);
    assert_eq!(editor.mode(), Mode::Normal);
}

#[test]
fn failed_command_keeps_error_until_next_edit() {
    let mut editor = Editor::default();
    press(&mut editor, ":bogus");
    editor.handle_key(Key::Enter);

    assert_eq!(editor.mode(), Mode::Command);
    assert_eq!(editor.command_error(), Some("unknown command: bogus"));

    editor.handle_key(Key::Backspace);
    assert_eq!(editor.command_error(), None);
    assert_eq!(editor.command_line().text(), "bogu");

    editor.handle_key(Key::Esc);
    assert_eq!(editor.mode(), Mode::Normal);
    assert!(editor.command_line().is_empty());
}

#[test]
fn empty_command_line_returns_to_normal() {
    let mut editor = Editor::default();
    press(&mut editor, ":");
    editor.handle_key(Key::Enter);
    assert_eq!(editor.mode(), Mode::Normal);
}

#[test]
fn type_and_clear_record_history_only_on_change() {
    let mut editor = Editor::new(box_pipeline());
    for _ in 0..2 {
        press(&mut editor, ":type sequence");
        editor.handle_key(Key::Enter);
    }
    assert_eq!(editor.diagram().kind(), DiagramKind::Sequence);
    assert_eq!(editor.history().cursor(), 1);

    for _ in 0..2 {
        press(&mut editor, ":clear");
        editor.handle_key(Key::Enter);
    }
    assert!(editor.diagram().is_empty());
    assert_eq!(editor.history().cursor(), 2);
}

#[test]
fn write_without_a_bound_file_fails() {
    let mut editor = Editor::new(box_pipeline());
    press(&mut editor, ":w");
    editor.handle_key(Key::Enter);

    assert_eq!(editor.mode(), Mode::Command);
    assert!(editor.command_error().is_some());
}

#[test]
fn write_then_open_binds_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("pipeline.json");

    let mut editor = Editor::new(box_pipeline());
    press(&mut editor, &format!(":w {}", path.display()));
    editor.handle_key(Key::Enter);
    assert_eq!(editor.mode(), Mode::Normal);
    assert_eq!(editor.file_path(), Some(path.as_path()));

    let mut other = Editor::new(sequence_abc());
    press(&mut other, "iextra");
    other.handle_key(Key::Enter);
    press(&mut other, &format!(":e {}", path.display()));
    other.handle_key(Key::Enter);

    assert_eq!(other.diagram(), &box_pipeline());
    assert_eq!(other.history().cursor(), 0);
    assert!(!other.history().can_undo());
    assert_eq!(other.selection(), None);
    assert_eq!(other.file_path(), Some(path.as_path()));
}

#[test]
fn rejected_open_leaves_the_diagram_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("dup.json");
    std::fs::write(&path, r#"{"nodes":[{"id":1,"text":["a"]},{"id":1,"text":["b"]}]}"#)
        .expect("write fixture");

    let mut editor = Editor::new(sequence_abc());
    press(&mut editor, &format!(":e {}", path.display()));
    editor.handle_key(Key::Enter);

    assert_eq!(editor.diagram(), &sequence_abc());
    assert_eq!(editor.mode(), Mode::Command);
    assert!(editor.command_error().is_some_and(|err| err.contains("duplicate node id 1")));
    assert_eq!(editor.file_path(), None);
}

#[test]
fn write_quit_with_bound_file_requests_quit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bound.json");
    let options = EditorOptions { file_path: Some(path.clone()), ..EditorOptions::default() };
    let mut editor = Editor::with_options(sequence_abc(), options);

    press(&mut editor, ":x");
    editor.handle_key(Key::Enter);

    assert!(editor.should_quit());
    assert!(path.exists());
}

#[test]
fn json_view_scroll_is_clamped() {
    let mut editor = Editor::new(box_pipeline());
    editor.set_viewport(Viewport::new(80, 10));
    let lines = editor.json_text().lines().count();
    let max = lines - 10;

    press(&mut editor, "j");
    assert_eq!(editor.json_scroll(), Some(0));
    press(&mut editor, "k");
    assert_eq!(editor.json_scroll(), Some(0));
    editor.handle_key(Key::Down);
    assert_eq!(editor.json_scroll(), Some(1));
    press(&mut editor, "G");
    assert_eq!(editor.json_scroll(), Some(max));
    editor.handle_key(Key::Down);
    editor.handle_key(Key::PageDown);
    assert_eq!(editor.json_scroll(), Some(max));
    press(&mut editor, "K");
    assert_eq!(editor.json_scroll(), Some(max.saturating_sub(9)));
    press(&mut editor, "g");
    assert_eq!(editor.json_scroll(), Some(0));

    press(&mut editor, "j");
    assert_eq!(editor.mode(), Mode::Normal);
    assert_eq!(editor.json_scroll(), None);
}

#[test]
fn diagram_scroll_stays_within_content() {
    let mut editor = Editor::new(box_pipeline());
    editor.set_viewport(Viewport::new(20, 5));
    editor.set_content_size(30, 8);

    for _ in 0..20 {
        editor.handle_key(Key::Right);
        editor.handle_key(Key::Down);
    }
    assert_eq!((editor.scroll().x, editor.scroll().y), (10, 3));

    editor.handle_key(Key::Home);
    assert_eq!((editor.scroll().x, editor.scroll().y), (0, 0));
    editor.handle_key(Key::Up);
    assert_eq!((editor.scroll().x, editor.scroll().y), (0, 0));
}

#[test]
fn labels_exist_only_in_jump_mode() {
    let mut editor = Editor::new(sequence_abc());
    let script = ["f", "a", "c", "s", "d", ":", "\u{1b}", "j", "j", "r", "a", "x"];
    for step in script {
        match step {
            "\u{1b}" => editor.handle_key(Key::Esc),
            keys => press(&mut editor, keys),
        }
        let in_jump = editor.mode().kind() == ModeKind::Jump;
        assert_eq!(!editor.jump_labels().is_empty(), in_jump, "after {step:?}");
    }
}

#[test]
fn external_edit_outcomes() {
    let mut editor = Editor::new(sequence_abc());
    press(&mut editor, "x");
    assert_eq!(editor.take_external_action(), Some(ExternalAction::EditDiagram));
    assert_eq!(editor.take_external_action(), None);

    editor.apply_external_edit::<String>(Ok(None));
    assert_eq!(editor.status_message(), Some("no changes"));
    assert_eq!(editor.history().cursor(), 0);

    editor.apply_external_edit(Err("invalid JSON"));
    assert_eq!(editor.status_message(), Some("external edit failed: invalid JSON"));
    assert_eq!(editor.diagram(), &sequence_abc());

    editor.apply_external_edit::<String>(Ok(Some(box_pipeline())));
    assert_eq!(editor.diagram(), &box_pipeline());
    assert_eq!(editor.history().cursor(), 1);
    press(&mut editor, "u");
    assert_eq!(editor.diagram(), &sequence_abc());
}

#[test]
fn external_edit_that_parses_to_the_same_diagram_is_not_recorded() {
    let mut editor = Editor::new(sequence_abc());
    editor.apply_external_edit::<String>(Ok(Some(sequence_abc())));

    assert_eq!(editor.status_message(), Some("no changes"));
    assert_eq!(editor.history().cursor(), 0);
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn status_messages_expire() {
    let mut editor = Editor::new(sequence_abc());
    press(&mut editor, "u");
    editor.expire_status(Instant::now());
    assert!(editor.status_message().is_some());
    editor.expire_status(Instant::now() + Duration::from_secs(10));
    assert_eq!(editor.status_message(), None);
}

#[test]
fn quit_is_a_request() {
    let mut editor = Editor::new(sequence_abc());
    assert!(!editor.should_quit());
    press(&mut editor, "q");
    assert!(editor.should_quit());
}
