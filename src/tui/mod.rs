// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Owns the terminal (ratatui + crossterm), feeds decoded keys to the [`Editor`] and draws its
//! state after every key. The only blocking step is the external editor, which runs while the
//! terminal is suspended.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::bridge;
use crate::config::Config;
use crate::editor::{Editor, ExternalAction, Key, Mode, ModeKind, Selection, HINT_MENU_ENTRIES};
use crate::model::{ConnectionColor, Diagram};
use crate::view::{self, Canvas, LabelPosition, Paint, ProjectionRequest, ScrollOffset, Viewport};

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const SELECTED_COLOR: Color = Color::LightGreen;
const LABEL_BG: Color = Color::Yellow;
const FROM_LABEL_BG: Color = Color::LightGreen;
const INDICATOR_COLOR: Color = Color::DarkGray;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const ERROR_COLOR: Color = Color::LightRed;
const TEXT_POPUP_WIDTH: u16 = 48;
const TEXT_POPUP_HEIGHT: u16 = 8;
const HINT_POPUP_WIDTH: u16 = 36;

/// Runs the editor until it requests quit.
pub fn run(config: &Config, mut editor: Editor) -> Result<(), Box<dyn Error>> {
    let editor_command = bridge::resolve_editor_command(config.editor_command.as_deref());
    let mut terminal = TerminalSession::new()?;
    tracing::info!(editor = %editor_command, "terminal session started");

    while !editor.should_quit() {
        editor.expire_status(Instant::now());
        terminal.draw(|frame| draw(frame, &mut editor))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if let Some(key) = Key::from_event(key) {
                    editor.handle_key(key);
                }
                if let Some(action) = editor.take_external_action() {
                    run_external_action(&mut terminal, &mut editor, action, &editor_command);
                }
            }
        }
    }

    tracing::info!("terminal session finished");
    Ok(())
}

fn run_external_action(
    terminal: &mut TerminalSession,
    editor: &mut Editor,
    action: ExternalAction,
    editor_command: &str,
) {
    match action {
        ExternalAction::EditDiagram => {
            let diagram = editor.diagram();
            let outcome: Result<Option<Diagram>, String> = terminal
                .suspended(|| bridge::edit_diagram(diagram, editor_command))
                .map_err(|err| format!("terminal suspend failed: {err}"))
                .and_then(|result| result.map_err(|err| err.to_string()));
            editor.apply_external_edit(outcome);
        }
    }
}

fn draw(frame: &mut Frame<'_>, editor: &mut Editor) {
    let area = frame.size();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = rows[0];
    let footer_area = rows[1];

    match editor.mode() {
        Mode::Json { .. } => draw_json_pane(frame, editor, main_area),
        _ => draw_diagram_pane(frame, editor, main_area),
    }

    match editor.mode() {
        Mode::Insert | Mode::Edit(_) => draw_text_popup(frame, editor, main_area),
        Mode::HintMenu { connection } => draw_hint_menu(frame, editor, main_area, connection),
        _ => {}
    }

    draw_footer(frame, editor, footer_area);
}

fn draw_diagram_pane(frame: &mut Frame<'_>, editor: &mut Editor, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(diagram_pane_title(editor));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = view::layout_diagram(editor.diagram());
    let canvas = match view::render_diagram(editor.diagram(), &layout, editor.selection()) {
        Ok(canvas) => canvas,
        Err(err) => {
            tracing::warn!(error = %err, "diagram render failed");
            let message = Paragraph::new(format!("render failed: {err}"))
                .style(Style::default().fg(ERROR_COLOR));
            frame.render_widget(message, inner);
            return;
        }
    };

    let content_width = clamp_usize_to_u16(canvas.width());
    let content_height = clamp_usize_to_u16(canvas.height());
    let indicator = content_width > inner.width || content_height > inner.height;
    let body = if indicator {
        Rect { y: inner.y.saturating_add(1), height: inner.height.saturating_sub(1), ..inner }
    } else {
        inner
    };
    editor.set_viewport(Viewport::new(body.width, body.height));
    editor.set_content_size(content_width, content_height);
    let scroll = editor.scroll();

    if indicator && inner.height > 0 {
        let line = scroll_indicator_line(scroll, body, content_width, content_height);
        frame.render_widget(Paragraph::new(line), Rect { height: 1, ..inner });
    }
    frame.render_widget(Paragraph::new(canvas_text(&canvas)).scroll((scroll.y, scroll.x)), body);

    if editor.mode().kind() == ModeKind::Jump {
        let request = ProjectionRequest {
            layout: &layout,
            viewport: Viewport::new(inner.width, inner.height),
            scroll,
            scroll_indicator: indicator,
            labels: editor.jump_labels(),
            action: editor.jump_action(),
            selection: editor.selection(),
        };
        let buf = frame.buffer_mut();
        for label in view::project_labels(&request) {
            draw_jump_label(buf, inner, label);
        }
    }
}

fn draw_json_pane(frame: &mut Frame<'_>, editor: &mut Editor, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" JSON ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    editor.set_viewport(Viewport::new(inner.width, inner.height));
    let scroll = clamp_usize_to_u16(editor.json_scroll().unwrap_or(0));
    frame.render_widget(Paragraph::new(editor.json_text()).scroll((scroll, 0)), inner);
}

fn draw_text_popup(frame: &mut Frame<'_>, editor: &Editor, area: Rect) {
    let title = match editor.mode() {
        Mode::Edit(Selection::Node(id)) => format!(" Edit node {id} "),
        Mode::Edit(Selection::Connection(index)) => format!(" Edit label #{index} "),
        _ => " New node ".to_owned(),
    };
    let popup = fixed_centered_rect(TEXT_POPUP_WIDTH, TEXT_POPUP_HEIGHT, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(SELECTED_COLOR));
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let buffer = editor.text_buffer();
    let line = clamp_usize_to_u16(buffer.line());
    let col = clamp_usize_to_u16(buffer.col());
    let scroll_y = line.saturating_sub(inner.height - 1);
    let scroll_x = col.saturating_sub(inner.width - 1);
    frame.render_widget(Paragraph::new(buffer.text()).scroll((scroll_y, scroll_x)), inner);
    frame.set_cursor(inner.x + (col - scroll_x), inner.y + (line - scroll_y));
}

fn draw_hint_menu(frame: &mut Frame<'_>, editor: &Editor, area: Rect, connection: usize) {
    let current = editor
        .diagram()
        .connection(connection)
        .map(|connection| {
            connection
                .hints()
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default();

    let mut lines = vec![Line::from(vec![
        Span::styled("now: ", Style::default().fg(FOOTER_LABEL_COLOR)),
        Span::raw(if current.is_empty() { "-".to_owned() } else { current }),
    ])];
    lines.extend(HINT_MENU_ENTRIES.iter().map(|(key, edit)| {
        let action = if edit.value.is_empty() {
            format!("clear {}", edit.key)
        } else {
            format!("{} {}", edit.key, edit.value)
        };
        help_kv(&key.to_string(), &action, 1, help_key_style())
    }));

    let height = clamp_usize_to_u16(lines.len() + 2);
    let popup = fixed_centered_rect(HINT_POPUP_WIDTH, height, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Hints #{connection} "))
        .border_style(Style::default().fg(SELECTED_COLOR));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), popup);
}

fn draw_footer(frame: &mut Frame<'_>, editor: &Editor, area: Rect) {
    frame.render_widget(Paragraph::new(footer_line(editor)), area);

    if editor.mode() == Mode::Command && area.width > 0 {
        let offset = mode_badge(editor.mode().kind()).chars().count() + COMMAND_PREFIX.len();
        let cursor_x = area
            .x
            .saturating_add(clamp_usize_to_u16(offset + editor.command_line().cursor()))
            .min(area.x.saturating_add(area.width - 1));
        frame.set_cursor(cursor_x, area.y);
    }
}

fn draw_jump_label(buf: &mut Buffer, pane: Rect, label: LabelPosition) {
    let background = if label.is_from { FROM_LABEL_BG } else { LABEL_BG };
    let style = Style::default().fg(Color::Black).bg(background).add_modifier(Modifier::BOLD);
    buf.get_mut(pane.x + label.x, pane.y + label.y).set_char(label.label).set_style(style);
}

fn diagram_pane_title(editor: &Editor) -> String {
    let file = editor
        .file_path()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "[no file]".to_owned());
    format!(" {} · {file} ", editor.diagram().kind())
}

fn scroll_indicator_line(
    scroll: ScrollOffset,
    body: Rect,
    content_width: u16,
    content_height: u16,
) -> Line<'static> {
    let last_row = scroll.y.saturating_add(body.height).min(content_height);
    let last_col = scroll.x.saturating_add(body.width).min(content_width);
    Line::from(Span::styled(
        format!(
            "rows {}-{last_row}/{content_height}  cols {}-{last_col}/{content_width}",
            scroll.y + 1,
            scroll.x + 1,
        ),
        Style::default().fg(INDICATOR_COLOR),
    ))
}

/// Converts the canvas into styled lines, one span per run of equal paint.
fn canvas_text(canvas: &Canvas) -> Text<'static> {
    let lines = canvas
        .rows()
        .map(|row| {
            let mut spans = Vec::new();
            let mut run = String::new();
            let mut run_paint = Paint::Plain;
            for (ch, paint) in row {
                if paint != run_paint && !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), paint_style(run_paint)));
                }
                run_paint = paint;
                run.push(ch);
            }
            if !run.is_empty() {
                spans.push(Span::styled(run, paint_style(run_paint)));
            }
            Line::from(spans)
        })
        .collect::<Vec<_>>();
    Text::from(lines)
}

fn paint_style(paint: Paint) -> Style {
    match paint {
        Paint::Plain => Style::default(),
        Paint::Selected => Style::default().fg(SELECTED_COLOR).add_modifier(Modifier::BOLD),
        Paint::Color(color) => Style::default().fg(terminal_color(color)),
    }
}

fn terminal_color(color: ConnectionColor) -> Color {
    match color {
        ConnectionColor::Red => Color::Red,
        ConnectionColor::Green => Color::Green,
        ConnectionColor::Yellow => Color::Yellow,
        ConnectionColor::Blue => Color::Blue,
        ConnectionColor::Magenta => Color::Magenta,
        ConnectionColor::Cyan => Color::Cyan,
    }
}

fn clamp_usize_to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

// Footer and popup helpers.
include!("chrome.rs");

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }

    /// Hands the terminal to `action` and takes it back afterwards, even on panic unwind.
    fn suspended<T>(&mut self, action: impl FnOnce() -> T) -> io::Result<T> {
        let _suspend = TerminalSuspendGuard::new(&mut self.terminal)?;
        Ok(action())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

struct TerminalSuspendGuard<'a> {
    terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>,
}

impl<'a> TerminalSuspendGuard<'a> {
    fn new(terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<Self> {
        terminal.show_cursor()?;
        disable_raw_mode()?;

        if let Err(err) = execute!(terminal.backend_mut(), LeaveAlternateScreen) {
            let _ = enable_raw_mode();
            let _ = execute!(terminal.backend_mut(), EnterAlternateScreen);
            let _ = terminal.hide_cursor();
            let _ = ratatui::backend::Backend::flush(terminal.backend_mut());
            return Err(err);
        }

        ratatui::backend::Backend::flush(terminal.backend_mut())?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSuspendGuard<'_> {
    fn drop(&mut self) {
        let _ = enable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), EnterAlternateScreen);
        let _ = self.terminal.clear();
        let _ = self.terminal.hide_cursor();
        let _ = ratatui::backend::Backend::flush(self.terminal.backend_mut());
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
