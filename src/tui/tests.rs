// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkdown-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkdown and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::gateway::NativeFileGateway;
use crate::session::SessionController;
use crate::store::{MemoryPrefs, RecentFilesRegistry};

use super::{App, EditorState, Overlay, PendingAction};

// None of these tests press a key that would reach a native file dialog.
fn app() -> App {
    let registry = RecentFilesRegistry::new(Box::new(MemoryPrefs::default()));
    App::new(SessionController::new(Box::new(NativeFileGateway), registry))
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
}

fn type_str(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.handle_key(key(KeyCode::Char(ch)));
    }
}

#[test]
fn starts_with_a_fresh_untitled_document() {
    let app = app();
    let document = app.controller.current().expect("current document");
    assert_eq!(document.title(), "Untitled");
    assert!(document.saved());
    assert_eq!(app.editor.content(), "");
}

#[test]
fn typing_flows_into_the_controller() {
    let mut app = app();
    type_str(&mut app, "# Hi");

    assert_eq!(app.editor.content(), "# Hi");
    assert_eq!(app.controller.current().unwrap().content(), "# Hi");
    assert!(app.controller.has_unsaved_changes());
}

#[test]
fn enter_splits_the_line_at_the_cursor() {
    let mut app = app();
    type_str(&mut app, "ab");
    app.handle_key(key(KeyCode::Left));
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.controller.current().unwrap().content(), "a\nb");
    assert_eq!(app.editor.cursor_row, 1);
    assert_eq!(app.editor.cursor_col, 0);
}

#[test]
fn backspace_at_line_start_joins_with_the_previous_line() {
    let mut app = app();
    type_str(&mut app, "a");
    app.handle_key(key(KeyCode::Enter));
    type_str(&mut app, "b");
    app.handle_key(key(KeyCode::Home));
    app.handle_key(key(KeyCode::Backspace));

    assert_eq!(app.controller.current().unwrap().content(), "ab");
    assert_eq!(app.editor.cursor_row, 0);
    assert_eq!(app.editor.cursor_col, 1);
}

#[test]
fn tab_inserts_four_spaces() {
    let mut app = app();
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.editor.content(), "    ");
    assert_eq!(app.editor.cursor_col, 4);
}

#[test]
fn cursor_moves_stay_within_bounds_and_do_not_dirty() {
    let mut app = app();
    app.handle_key(key(KeyCode::Left));
    app.handle_key(key(KeyCode::Up));
    app.handle_key(key(KeyCode::Right));
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::End));

    assert_eq!(app.editor.cursor_row, 0);
    assert_eq!(app.editor.cursor_col, 0);
    assert!(!app.controller.has_unsaved_changes());
}

#[test]
fn preview_toggles_with_ctrl_p() {
    let mut app = app();
    assert!(app.show_preview);
    app.handle_key(ctrl('p'));
    assert!(!app.show_preview);
    app.handle_key(ctrl('p'));
    assert!(app.show_preview);
}

#[test]
fn title_prompt_is_prefilled_and_commits_on_enter() {
    let mut app = app();
    app.handle_key(key(KeyCode::F(2)));
    assert_eq!(app.overlay, Overlay::TitlePrompt { input: "Untitled".to_owned() });

    for _ in 0.."Untitled".len() {
        app.handle_key(key(KeyCode::Backspace));
    }
    type_str(&mut app, "Plan");
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.overlay, Overlay::None);
    assert_eq!(app.controller.current().unwrap().title(), "Plan");
}

#[test]
fn title_prompt_escape_discards_the_edit() {
    let mut app = app();
    app.handle_key(key(KeyCode::F(2)));
    type_str(&mut app, "xyz");
    app.handle_key(key(KeyCode::Esc));

    assert_eq!(app.overlay, Overlay::None);
    assert_eq!(app.controller.current().unwrap().title(), "Untitled");
}

#[test]
fn new_document_on_a_clean_session_needs_no_confirmation() {
    let mut app = app();
    app.handle_key(ctrl('n'));

    assert_eq!(app.overlay, Overlay::None);
    assert_eq!(app.controller.current().unwrap().content(), "");
}

#[test]
fn new_document_over_unsaved_changes_asks_first() {
    let mut app = app();
    type_str(&mut app, "draft");
    app.handle_key(ctrl('n'));

    assert_eq!(app.overlay, Overlay::Confirm { action: PendingAction::NewDocument });
    // Declining keeps the draft.
    app.handle_key(key(KeyCode::Char('n')));
    assert_eq!(app.overlay, Overlay::None);
    assert_eq!(app.controller.current().unwrap().content(), "draft");

    app.handle_key(ctrl('n'));
    app.handle_key(key(KeyCode::Char('y')));
    assert_eq!(app.controller.current().unwrap().content(), "");
    assert_eq!(app.editor.content(), "");
}

#[test]
fn quit_over_unsaved_changes_asks_first() {
    let mut app = app();
    type_str(&mut app, "draft");
    app.handle_key(ctrl('q'));

    assert!(!app.should_quit);
    assert_eq!(app.overlay, Overlay::Confirm { action: PendingAction::Quit });
    app.handle_key(key(KeyCode::Enter));
    assert!(app.should_quit);
}

#[test]
fn quit_on_a_clean_session_is_immediate() {
    let mut app = app();
    app.handle_key(ctrl('q'));
    assert!(app.should_quit);
}

#[test]
fn recent_overlay_opens_and_closes() {
    let mut app = app();
    app.handle_key(ctrl('r'));
    assert_eq!(app.overlay, Overlay::Recent { selected: 0 });

    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.overlay, Overlay::None);
}

#[test]
fn recent_overlay_clears_the_list_with_x() {
    let mut app = app();
    app.handle_key(ctrl('r'));
    app.handle_key(key(KeyCode::Char('x')));

    assert_eq!(app.overlay, Overlay::None);
    assert!(app.controller.recent_files().is_empty());
    assert_eq!(app.toast.as_deref(), Some("Recent files cleared"));
}

#[test]
fn closing_the_document_leaves_an_empty_editor() {
    let mut app = app();
    app.handle_key(ctrl('w'));

    assert!(app.controller.current().is_none());
    assert_eq!(app.editor.content(), "");
    // Editing keys are ignored without a document.
    type_str(&mut app, "ignored");
    assert!(app.controller.current().is_none());
    assert_eq!(app.editor.content(), "");
}

#[test]
fn editor_round_trips_multiline_content() {
    let editor = EditorState::from_content("a\n\nb");
    assert_eq!(editor.lines, vec!["a", "", "b"]);
    assert_eq!(editor.content(), "a\n\nb");
}

#[test]
fn editor_edits_are_char_based_not_byte_based() {
    let mut editor = EditorState::from_content("héllo");
    editor.cursor_col = 2;
    editor.insert_char('x');
    assert_eq!(editor.content(), "héxllo");

    editor.backspace();
    assert_eq!(editor.content(), "héllo");
    assert_eq!(editor.cursor_col, 2);
}

#[test]
fn editor_delete_at_line_end_joins_the_next_line() {
    let mut editor = EditorState::from_content("ab\ncd");
    editor.move_end();
    editor.delete();
    assert_eq!(editor.content(), "abcd");
}

#[test]
fn editor_scroll_follows_the_cursor() {
    let mut editor = EditorState::from_content(&vec!["x"; 30].join("\n"));
    editor.cursor_row = 25;
    editor.ensure_cursor_visible(10);
    assert_eq!(editor.scroll, 16);

    editor.cursor_row = 3;
    editor.ensure_cursor_visible(10);
    assert_eq!(editor.scroll, 3);
}
