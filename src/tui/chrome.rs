// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Jumpbox-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jumpbox and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Footer, mode badge, and popup helpers used by TUI rendering.
const COMMAND_PREFIX: &str = " :";

fn mode_badge(kind: ModeKind) -> String {
    format!(" {kind} ")
}

fn mode_color(kind: ModeKind) -> Color {
    match kind {
        ModeKind::Normal => Color::Blue,
        ModeKind::Insert | ModeKind::Edit => Color::Green,
        ModeKind::Command => Color::Magenta,
        ModeKind::Jump => Color::Yellow,
        ModeKind::Json => Color::Cyan,
        ModeKind::HintMenu => Color::LightRed,
    }
}

fn footer_line(editor: &Editor) -> Line<'static> {
    let kind = editor.mode().kind();
    let mut spans = vec![Span::styled(
        mode_badge(kind),
        Style::default().fg(Color::Black).bg(mode_color(kind)).add_modifier(Modifier::BOLD),
    )];

    if editor.mode() == Mode::Command {
        spans.push(Span::raw(COMMAND_PREFIX.to_owned()));
        spans.push(Span::raw(editor.command_line().text()));
        if let Some(error) = editor.command_error() {
            spans.push(Span::styled(format!("  {error}"), Style::default().fg(ERROR_COLOR)));
        }
        return Line::from(spans);
    }

    let mut entries = Vec::<Span<'static>>::new();
    match editor.mode() {
        Mode::Normal => {
            push_footer_entry(&mut entries, "NEW", "i");
            push_footer_entry(&mut entries, "EDIT", "e/E");
            push_footer_entry(&mut entries, "CONNECT", "c/C");
            push_footer_entry(&mut entries, "DELETE", "d/D");
            push_footer_entry(&mut entries, "SELECT", "f/F");
            push_footer_entry(&mut entries, "HINT", "h");
            push_footer_entry(&mut entries, "MOVE", "r");
            push_footer_entry(&mut entries, "JSON", "j");
            push_footer_entry(&mut entries, "UNDO", "u/R");
            push_footer_entry(&mut entries, "EXTERNAL", "x");
            push_footer_entry(&mut entries, "QUIT", "q");
        }
        Mode::Insert | Mode::Edit(_) => {
            push_footer_entry(&mut entries, "SAVE", "⏎");
            push_footer_entry(&mut entries, "NEWLINE", "^N");
            push_footer_entry(&mut entries, "CANCEL", "Esc");
        }
        Mode::Jump { action, continuous } => {
            let what = if continuous {
                format!("{} (chain)", action.describe())
            } else {
                action.describe().to_owned()
            };
            push_footer_entry(&mut entries, "LABEL", &what);
            push_footer_entry(&mut entries, if continuous { "DONE" } else { "CANCEL" }, "Esc");
        }
        Mode::Json { .. } => {
            push_footer_entry(&mut entries, "SCROLL", "↓/k");
            push_footer_entry(&mut entries, "PAGE", "J/K");
            push_footer_entry(&mut entries, "TOP", "g/G");
            push_footer_entry(&mut entries, "CLOSE", "j");
        }
        Mode::HintMenu { .. } => {
            push_footer_entry(&mut entries, "PICK", "key");
            push_footer_entry(&mut entries, "CLOSE", "Esc");
        }
        Mode::Command => {}
    }
    spans.push(Span::raw(" "));
    spans.extend(entries);

    if let Some(message) = editor.status_message() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::raw(message.to_owned()));
    }

    Line::from(spans)
}

fn help_key_style() -> Style {
    Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD)
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
fn fixed_centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(value.to_owned(), help_key_style()));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}
