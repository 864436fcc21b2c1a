// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkdown-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkdown and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The interactive shell (ratatui + crossterm): editor pane on the left,
//! live rendered preview on the right, plus overlays for the recent-files
//! list, the title prompt, and the unsaved-changes confirmation. All
//! document state lives in the [`SessionController`]; this module only
//! translates key presses into controller operations and draws the result.

use std::cell::Cell;
use std::error::Error;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::render;
use crate::session::SessionController;

const PANE_BORDER_COLOR: Color = Color::DarkGray;
const PANE_TITLE_COLOR: Color = Color::White;
const DIRTY_MARKER_COLOR: Color = Color::Yellow;
const OVERLAY_BORDER_COLOR: Color = Color::LightGreen;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const TOAST_COLOR: Color = Color::LightYellow;
const RECENT_SELECTED_COLOR: Color = Color::LightGreen;

const TAB_SPACES: &str = "    ";

/// Runs the interactive terminal UI until the user quits.
pub fn run(controller: SessionController) -> Result<(), Box<dyn Error>> {
    // Declared before the terminal so errors below still restore the screen.
    let _guard = RawModeGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let mut app = App::new(controller);
    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    terminal.show_cursor()?;
    Ok(())
}

/// Holds the terminal in raw alternate-screen mode until dropped.
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(err) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Action deferred behind the unsaved-changes confirmation overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingAction {
    NewDocument,
    OpenPicker,
    CloseDocument,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Overlay {
    None,
    Recent { selected: usize },
    Confirm { action: PendingAction },
    TitlePrompt { input: String },
}

/// Line/column edit buffer mirroring the current document's content.
///
/// The buffer is the editing surface; after every change its joined content
/// is pushed into the controller, which owns the document of record.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EditorState {
    lines: Vec<String>,
    cursor_row: usize,
    /// Char (not byte) index within the cursor row.
    cursor_col: usize,
    scroll: u16,
}

impl EditorState {
    fn from_content(content: &str) -> Self {
        let mut lines: Vec<String> = content.split('\n').map(str::to_owned).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self { lines, cursor_row: 0, cursor_col: 0, scroll: 0 }
    }

    fn content(&self) -> String {
        self.lines.join("\n")
    }

    fn line_len(&self) -> usize {
        self.lines[self.cursor_row].chars().count()
    }

    fn byte_col(&self) -> usize {
        let line = &self.lines[self.cursor_row];
        line.char_indices()
            .nth(self.cursor_col)
            .map(|(index, _)| index)
            .unwrap_or(line.len())
    }

    fn insert_char(&mut self, ch: char) {
        let at = self.byte_col();
        self.lines[self.cursor_row].insert(at, ch);
        self.cursor_col += 1;
    }

    fn insert_str(&mut self, text: &str) {
        let at = self.byte_col();
        self.lines[self.cursor_row].insert_str(at, text);
        self.cursor_col += text.chars().count();
    }

    fn insert_newline(&mut self) {
        let at = self.byte_col();
        let rest = self.lines[self.cursor_row].split_off(at);
        self.lines.insert(self.cursor_row + 1, rest);
        self.cursor_row += 1;
        self.cursor_col = 0;
    }

    fn backspace(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
            let at = self.byte_col();
            self.lines[self.cursor_row].remove(at);
        } else if self.cursor_row > 0 {
            let removed = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = self.line_len();
            self.lines[self.cursor_row].push_str(&removed);
        }
    }

    fn delete(&mut self) {
        if self.cursor_col < self.line_len() {
            let at = self.byte_col();
            self.lines[self.cursor_row].remove(at);
        } else if self.cursor_row + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_row + 1);
            self.lines[self.cursor_row].push_str(&next);
        }
    }

    fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.line_len();
        }
    }

    fn move_right(&mut self) {
        if self.cursor_col < self.line_len() {
            self.cursor_col += 1;
        } else if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
    }

    fn move_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.cursor_col.min(self.line_len());
        }
    }

    fn move_down(&mut self) {
        if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = self.cursor_col.min(self.line_len());
        }
    }

    fn move_home(&mut self) {
        self.cursor_col = 0;
    }

    fn move_end(&mut self) {
        self.cursor_col = self.line_len();
    }

    fn page_up(&mut self, height: usize) {
        self.cursor_row = self.cursor_row.saturating_sub(height.max(1));
        self.cursor_col = self.cursor_col.min(self.line_len());
    }

    fn page_down(&mut self, height: usize) {
        self.cursor_row = (self.cursor_row + height.max(1)).min(self.lines.len() - 1);
        self.cursor_col = self.cursor_col.min(self.line_len());
    }

    fn ensure_cursor_visible(&mut self, height: u16) {
        let row = self.cursor_row as u16;
        if row < self.scroll {
            self.scroll = row;
        } else if height > 0 && row >= self.scroll + height {
            self.scroll = row + 1 - height;
        }
    }
}

struct App {
    controller: SessionController,
    editor: EditorState,
    show_preview: bool,
    preview_scroll: u16,
    /// Rebuilt lazily; the controller's change notification invalidates it.
    preview_cache: Text<'static>,
    overlay: Overlay,
    toast: Option<String>,
    should_quit: bool,
    state_changed: Rc<Cell<bool>>,
}

impl App {
    fn new(mut controller: SessionController) -> Self {
        let state_changed = Rc::new(Cell::new(true));
        let flag = Rc::clone(&state_changed);
        controller.subscribe(Box::new(move || flag.set(true)));

        controller.load_recent_files();
        if controller.current().is_none() {
            controller.create_new();
        }

        let editor = EditorState::from_content(
            controller.current().map(|document| document.content()).unwrap_or_default(),
        );

        Self {
            controller,
            editor,
            show_preview: true,
            preview_scroll: 0,
            preview_cache: Text::default(),
            overlay: Overlay::None,
            toast: None,
            should_quit: false,
            state_changed,
        }
    }

    fn preview_text(&mut self) -> Text<'static> {
        if self.state_changed.replace(false) {
            let content =
                self.controller.current().map(|document| document.content()).unwrap_or_default();
            self.preview_cache = render::markdown_to_text(content);
        }
        self.preview_cache.clone()
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(message.into());
    }

    fn sync_editor_from_document(&mut self) {
        self.editor = EditorState::from_content(
            self.controller.current().map(|document| document.content()).unwrap_or_default(),
        );
        self.preview_scroll = 0;
    }

    fn push_content(&mut self) {
        self.controller.update_content(self.editor.content());
    }

    fn request(&mut self, action: PendingAction) {
        if self.controller.has_unsaved_changes() {
            self.overlay = Overlay::Confirm { action };
        } else {
            self.perform(action);
        }
    }

    fn perform(&mut self, action: PendingAction) {
        match action {
            PendingAction::NewDocument => {
                self.controller.create_new();
                self.sync_editor_from_document();
            }
            PendingAction::OpenPicker => {
                if self.controller.open_from_picker() {
                    self.sync_editor_from_document();
                } else {
                    self.set_toast("Open cancelled or failed");
                }
            }
            PendingAction::CloseDocument => {
                self.controller.close();
                self.sync_editor_from_document();
            }
            PendingAction::Quit => self.should_quit = true,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.toast = None;

        match self.overlay.clone() {
            Overlay::Recent { selected } => self.handle_recent_key(key, selected),
            Overlay::Confirm { action } => self.handle_confirm_key(key, action),
            Overlay::TitlePrompt { input } => self.handle_title_key(key, input),
            Overlay::None => self.handle_main_key(key),
        }
    }

    fn handle_recent_key(&mut self, key: KeyEvent, selected: usize) {
        let count = self.controller.recent_files().len();
        match key.code {
            KeyCode::Esc => self.overlay = Overlay::None,
            KeyCode::Up if count > 0 => {
                self.overlay = Overlay::Recent { selected: selected.saturating_sub(1) };
            }
            KeyCode::Down if count > 0 => {
                self.overlay = Overlay::Recent { selected: (selected + 1).min(count - 1) };
            }
            KeyCode::Char('x') => {
                self.controller.clear_recent_files();
                self.overlay = Overlay::None;
                self.set_toast("Recent files cleared");
            }
            KeyCode::Enter if count > 0 => {
                let Some(path) =
                    self.controller.recent_files().get(selected).and_then(|entry| {
                        entry.file_path.clone()
                    })
                else {
                    return;
                };
                self.overlay = Overlay::None;
                if self.controller.open_path(&path) {
                    self.sync_editor_from_document();
                } else {
                    self.set_toast(format!("Cannot open {}", path.display()));
                }
            }
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, action: PendingAction) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.overlay = Overlay::None;
                self.perform(action);
            }
            KeyCode::Char('n') | KeyCode::Esc => self.overlay = Overlay::None,
            _ => {}
        }
    }

    fn handle_title_key(&mut self, key: KeyEvent, mut input: String) {
        match key.code {
            KeyCode::Esc => self.overlay = Overlay::None,
            KeyCode::Enter => {
                self.overlay = Overlay::None;
                if !input.is_empty() {
                    self.controller.update_title(input);
                }
            }
            KeyCode::Backspace => {
                input.pop();
                self.overlay = Overlay::TitlePrompt { input };
            }
            KeyCode::Char(ch) => {
                input.push(ch);
                self.overlay = Overlay::TitlePrompt { input };
            }
            _ => {}
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') => self.request(PendingAction::Quit),
                KeyCode::Char('n') => self.request(PendingAction::NewDocument),
                KeyCode::Char('o') => self.request(PendingAction::OpenPicker),
                KeyCode::Char('w') => self.request(PendingAction::CloseDocument),
                KeyCode::Char('s') => {
                    if self.controller.save() {
                        self.set_toast("Saved");
                    } else {
                        self.set_toast("Not saved");
                    }
                }
                KeyCode::Char('a') => match self.controller.save_as() {
                    Some(path) => self.set_toast(format!("Saved to {}", path.display())),
                    None => self.set_toast("Not saved"),
                },
                KeyCode::Char('e') => {
                    let Some(document) = self.controller.current() else {
                        return;
                    };
                    let body = render::markdown_to_html(document.content());
                    match self.controller.export_html(&body) {
                        Some(path) => self.set_toast(format!("Exported {}", path.display())),
                        None => self.set_toast("Export cancelled or failed"),
                    }
                }
                KeyCode::Char('r') => {
                    self.controller.load_recent_files();
                    self.overlay = Overlay::Recent { selected: 0 };
                }
                KeyCode::Char('p') => self.show_preview = !self.show_preview,
                _ => {}
            }
            return;
        }

        if self.controller.current().is_none() {
            return;
        }

        match key.code {
            KeyCode::F(2) => {
                let input = self
                    .controller
                    .current()
                    .map(|document| document.title().to_owned())
                    .unwrap_or_default();
                self.overlay = Overlay::TitlePrompt { input };
            }
            KeyCode::Char(ch) => {
                self.editor.insert_char(ch);
                self.push_content();
            }
            KeyCode::Tab => {
                self.editor.insert_str(TAB_SPACES);
                self.push_content();
            }
            KeyCode::Enter => {
                self.editor.insert_newline();
                self.push_content();
            }
            KeyCode::Backspace => {
                self.editor.backspace();
                self.push_content();
            }
            KeyCode::Delete => {
                self.editor.delete();
                self.push_content();
            }
            KeyCode::Left => self.editor.move_left(),
            KeyCode::Right => self.editor.move_right(),
            KeyCode::Up => self.editor.move_up(),
            KeyCode::Down => self.editor.move_down(),
            KeyCode::Home => self.editor.move_home(),
            KeyCode::End => self.editor.move_end(),
            KeyCode::PageUp => self.editor.page_up(10),
            KeyCode::PageDown => self.editor.page_down(10),
            _ => {}
        }
    }

    fn pane_title(&self) -> Line<'static> {
        let Some(document) = self.controller.current() else {
            return Line::from(Span::styled(
                " no document ".to_owned(),
                Style::default().fg(PANE_TITLE_COLOR),
            ));
        };

        let mut spans = vec![Span::styled(
            format!(" {} ", document.display_name()),
            Style::default().fg(PANE_TITLE_COLOR),
        )];
        if !document.saved() {
            spans.push(Span::styled("*".to_owned(), Style::default().fg(DIRTY_MARKER_COLOR)));
        }
        if self.controller.is_loading() {
            spans.push(Span::styled(
                " [loading]".to_owned(),
                Style::default().fg(FOOTER_LABEL_COLOR),
            ));
        }
        Line::from(spans)
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.size());

    draw_panes(frame, app, chunks[0]);
    draw_footer(frame, app, chunks[1]);

    match app.overlay.clone() {
        Overlay::Recent { selected } => draw_recent_overlay(frame, app, selected),
        Overlay::Confirm { .. } => draw_confirm_overlay(frame),
        Overlay::TitlePrompt { input } => draw_title_overlay(frame, &input),
        Overlay::None => {}
    }
}

fn draw_panes(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let panes = if app.show_preview {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(100)])
            .split(area)
    };

    let editor_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(PANE_BORDER_COLOR))
        .title(app.pane_title());
    let editor_area = editor_block.inner(panes[0]);
    app.editor.ensure_cursor_visible(editor_area.height);

    let editor_lines: Vec<Line<'_>> =
        app.editor.lines.iter().map(|line| Line::from(line.as_str())).collect();
    frame.render_widget(
        Paragraph::new(editor_lines).block(editor_block).scroll((app.editor.scroll, 0)),
        panes[0],
    );

    if app.controller.current().is_some() && matches!(app.overlay, Overlay::None) {
        let cursor_x = editor_area.x + app.editor.cursor_col as u16;
        let cursor_y =
            editor_area.y + app.editor.cursor_row as u16 - app.editor.scroll;
        if cursor_x < editor_area.x + editor_area.width && cursor_y < editor_area.y + editor_area.height {
            frame.set_cursor(cursor_x, cursor_y);
        }
    }

    if app.show_preview {
        let preview = app.preview_text();
        frame.render_widget(
            Paragraph::new(preview)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(PANE_BORDER_COLOR))
                        .title(" preview "),
                )
                .wrap(Wrap { trim: false })
                .scroll((app.preview_scroll, 0)),
            panes[1],
        );
    }
}

fn draw_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    if let Some(toast) = &app.toast {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                toast.clone(),
                Style::default().fg(TOAST_COLOR),
            ))),
            area,
        );
        return;
    }

    let mut spans = Vec::new();
    for (key, label) in [
        ("^N", "New"),
        ("^O", "Open"),
        ("^S", "Save"),
        ("^A", "Save As"),
        ("^E", "Export"),
        ("^R", "Recent"),
        ("^P", "Preview"),
        ("F2", "Title"),
        ("^Q", "Quit"),
    ] {
        spans.push(Span::styled(key, Style::default().fg(FOOTER_KEY_COLOR)));
        spans.push(Span::styled(format!(" {label}  "), Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_recent_overlay(frame: &mut Frame<'_>, app: &App, selected: usize) {
    let area = centered_rect(frame.size(), 60, 14);
    frame.render_widget(Clear, area);

    let items: Vec<ListItem<'_>> = if app.controller.recent_files().is_empty() {
        vec![ListItem::new("  (no recent files)")]
    } else {
        app.controller
            .recent_files()
            .iter()
            .map(|entry| {
                let path = entry
                    .file_path
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_default();
                ListItem::new(format!("  {}  {path}", entry.title))
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(OVERLAY_BORDER_COLOR))
                .title(" recent files (Enter open, x clear, Esc close) "),
        )
        .highlight_style(Style::default().fg(RECENT_SELECTED_COLOR).add_modifier(Modifier::BOLD));

    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_confirm_overlay(frame: &mut Frame<'_>) {
    let area = centered_rect(frame.size(), 46, 5);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new("Discard unsaved changes? (y/n)")
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(OVERLAY_BORDER_COLOR))
                    .title(" unsaved changes "),
            ),
        area,
    );
}

fn draw_title_overlay(frame: &mut Frame<'_>, input: &str) {
    let area = centered_rect(frame.size(), 46, 3);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(format!("{input}▏")).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(OVERLAY_BORDER_COLOR))
                .title(" title "),
        ),
        area,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests;
