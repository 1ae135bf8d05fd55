//! Login screen view.
//!
//! Pure rendering: reads `AppState`, never mutates it.

use doorway_core::{Field, Strings};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::common::{mask, truncate_start_with_ellipsis};
use crate::state::{AppState, Focus};

const FORM_WIDTH: u16 = 60;
const ACCENT: Color = Color::Cyan;
const CURSOR: &str = "█";

pub fn render(app: &AppState, frame: &mut Frame) {
    let strings = app.strings();
    let area = frame.area();

    let width = FORM_WIDTH.min(area.width.saturating_sub(4));
    let inner_width = width.saturating_sub(4);
    let lines = form_lines(app, inner_width);
    let body_rows: u16 = lines
        .iter()
        .map(|line| wrapped_rows(line.width(), inner_width))
        .sum();
    // Border top/bottom plus the hints row.
    let height = body_rows.saturating_add(3);

    let popup = calculate_form_area(area, width, height);
    render_container(frame, popup, strings.heading);

    let inner = Rect::new(
        popup.x + 2,
        popup.y + 1,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(2),
    );
    let body = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body);

    let footer = Rect::new(inner.x, inner.y + body.height, inner.width, 1);
    render_hints(frame, footer, strings);
}

/// Centers the form in `area`, clamped to the available space.
fn calculate_form_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn render_container(frame: &mut Frame, area: Rect, title: &str) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(format!(" {title} "))
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    frame.render_widget(block, area);
}

fn wrapped_rows(line_width: usize, inner_width: u16) -> u16 {
    let inner = usize::from(inner_width.max(1));
    u16::try_from(line_width.div_ceil(inner).max(1)).unwrap_or(u16::MAX)
}

fn form_lines(app: &AppState, inner_width: u16) -> Vec<Line<'static>> {
    let strings = app.strings();
    let form = &app.form;
    let mut lines = Vec::new();

    if let Some(notice) = &form.expired_notice {
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(""));
    }

    for field in [Field::Email, Field::Password] {
        let focused = form.focus.field() == Some(field);
        lines.push(label_line(field_label(strings, field), focused));
        lines.push(input_line(app, field, focused, inner_width));
        for error in form.field_errors.get(field) {
            lines.push(error_line(error.message(strings)));
        }
        lines.push(Line::from(""));
    }

    lines.push(submit_line(app));
    if let Some(error) = &form.submit_error {
        lines.push(Line::from(""));
        lines.push(error_line(error));
    }
    lines
}

fn field_label(strings: &Strings, field: Field) -> &'static str {
    match field {
        Field::Email => strings.email_label,
        Field::Password => strings.password_label,
    }
}

fn label_line(label: &'static str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(Span::styled(label, style))
}

/// Prompt-style input: "> <text>█" when focused.
fn input_line(app: &AppState, field: Field, focused: bool, inner_width: u16) -> Line<'static> {
    let raw = app.form.value(field);
    let shown = match field {
        Field::Email => raw.to_string(),
        Field::Password => mask(raw),
    };
    let prompt = if focused { "> " } else { "  " };
    let max_text_width = usize::from(inner_width.saturating_sub(3));
    let text = truncate_start_with_ellipsis(&shown, max_text_width);

    let mut spans = vec![
        Span::styled(prompt, Style::default().fg(ACCENT)),
        Span::styled(text, Style::default().fg(Color::White)),
    ];
    if focused {
        spans.push(Span::styled(CURSOR, Style::default().fg(ACCENT)));
    }
    Line::from(spans)
}

fn error_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(Color::Red),
    ))
}

fn submit_line(app: &AppState) -> Line<'static> {
    let strings = app.strings();
    if app.form.is_submitting() {
        return Line::from(Span::styled(
            format!("[ {} ]", strings.submit_busy_label),
            Style::default().fg(Color::Yellow),
        ));
    }
    let style = if app.form.focus == Focus::Submit {
        Style::default()
            .fg(Color::Black)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT)
    };
    Line::from(Span::styled(format!("[ {} ]", strings.submit_label), style))
}

fn render_hints(frame: &mut Frame, area: Rect, strings: &Strings) {
    let mut spans = Vec::new();
    for (i, (key, action)) in strings.key_hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*key, Style::default().fg(ACCENT)));
        spans.push(Span::styled(
            format!(" {action}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
