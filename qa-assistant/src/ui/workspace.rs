//! Workspace screen: header, input panel, and the output panel frame.
//!
//! At 100 columns and wider the input and output panels sit side by side;
//! narrower terminals stack them vertically.

use qa_assistant_core::types::{InputMethod, Language};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect, Spacing},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::app::{App, KeyStatus, Mode, Pane, Workspace};
use crate::forms::{InputField, TextField};
use crate::theme::Theme;
use super::layout::{panel_block, spinner};
use super::output;

/// Terminal width at which the panels go side by side.
const WIDE_LAYOUT_MIN_COLS: u16 = 100;

pub fn render_workspace(frame: &mut Frame, area: Rect, app: &App) {
    let Some(ws) = app.workspace.as_ref() else {
        return;
    };
    let [header, body] =
        area.layout(&Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]));
    render_header(frame, header, app);

    let split = if area.width >= WIDE_LAYOUT_MIN_COLS {
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
    } else {
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
    };
    let [input, out] = body.layout(&split.spacing(Spacing::Overlap(1)));

    render_input(frame, input, app, ws);
    output::render_output(frame, out, app, ws);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let accent = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
    let mut right = Vec::new();
    if let Some(session) = app.nav.session() {
        if let Some(role) = session.role {
            right.push(Span::styled(format!("{} ", role.label()), accent));
        }
        right.push(Span::raw(format!("{}  ", session.email)));
    }
    right.push(Span::styled(
        format!("[t] {} theme  [R] change role  [X] sign out", app.theme.name),
        Style::default().fg(theme.muted),
    ));

    let [left_area, right_area] =
        area.layout(&Layout::horizontal([Constraint::Length(44), Constraint::Fill(1)]));
    let block = panel_block("", false, theme);
    frame.render_widget(block, area);
    let inner_left = left_area.inner(ratatui::layout::Margin { vertical: 1, horizontal: 1 });
    let inner_right = right_area.inner(ratatui::layout::Margin { vertical: 1, horizontal: 1 });
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("QA Assistant", accent),
            Span::styled("  AI-Powered Testing Platform", Style::default().fg(theme.muted)),
        ])),
        inner_left,
    );
    frame.render_widget(Paragraph::new(Line::from(right)).right_aligned(), inner_right);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App, ws: &Workspace) {
    let theme = &app.theme;
    let focused = ws.pane == Pane::Input;
    let block = panel_block("Input Panel", focused, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [selectors, source, prompt, api_key, status] = inner.layout(&Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Length(3),
        Constraint::Length(2),
    ]));

    frame.render_widget(
        Paragraph::new(vec![
            method_line(ws.form.method, theme),
            language_line(ws.form.language, theme),
        ]),
        selectors,
    );

    let editing = |field: InputField| focused && ws.form.focus == field;
    let insert = app.mode == Mode::Insert;
    let (source_title, source_placeholder) = match ws.form.method {
        InputMethod::Paste => ("Code", "Paste your code here..."),
        InputMethod::Github => ("GitHub URL", "https://github.com/user/repo"),
        InputMethod::Upload => ("Upload File", "Path to a source file"),
    };
    render_text_field(
        frame,
        source,
        source_title,
        source_placeholder,
        ws.form.source(),
        editing(InputField::Source),
        insert,
        theme,
    );
    render_text_field(
        frame,
        prompt,
        "Describe what your code should do",
        "Explain the expected functionality, business logic, or specific requirements...",
        &ws.form.prompt,
        editing(InputField::Prompt),
        insert,
        theme,
    );
    render_text_field(
        frame,
        api_key,
        "API Key (Optional)",
        "Enter API key",
        &ws.form.api_key,
        editing(InputField::ApiKey),
        insert,
        theme,
    );

    frame.render_widget(
        Paragraph::new(status_lines(app, ws)).wrap(Wrap { trim: true }),
        status,
    );
}

fn method_line(current: InputMethod, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::styled("[m] ", Style::default().fg(theme.muted))];
    for method in InputMethod::ALL {
        let style = if method == current {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(theme.muted)
        };
        spans.push(Span::styled(format!(" {} ", method.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn language_line(language: Language, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("[L] ", Style::default().fg(theme.muted)),
        Span::raw("Programming Language: "),
        Span::styled(language.label(), Style::default().fg(theme.accent)),
    ])
}

#[allow(clippy::too_many_arguments)]
fn render_text_field(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    placeholder: &str,
    field: &TextField,
    focused: bool,
    insert: bool,
    theme: &Theme,
) {
    let block = panel_block(title, focused, theme);
    let inner_height = block.inner(area).height;
    let paragraph = if field.value.is_empty() {
        Paragraph::new(Span::styled(placeholder.to_owned(), Style::default().fg(theme.muted)))
            .wrap(Wrap { trim: true })
    } else {
        let mut text = field.display();
        if focused && insert {
            text.push('▏');
        }
        let line_count = text.lines().count() as u16 + u16::from(text.ends_with('\n'));
        // Keep the end of the buffer visible while typing.
        let scroll = if focused { line_count.saturating_sub(inner_height) } else { 0 };
        Paragraph::new(text).scroll((scroll, 0))
    };
    frame.render_widget(paragraph.block(block), area);
}

fn status_lines(app: &App, ws: &Workspace) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let key = Style::default().fg(theme.accent);
    let mut lines = Vec::new();

    let analyze = if ws.gate.is_busy() {
        Line::from(vec![
            Span::styled(format!("{} ", spinner(app.spinner_frame)), key),
            Span::raw("Analyzing..."),
        ])
    } else {
        let key_check = match ws.key_status {
            KeyStatus::Untested => Span::styled("[a] test key", Style::default().fg(theme.muted)),
            KeyStatus::Checking => {
                Span::styled(format!("{} checking key", spinner(app.spinner_frame)), key)
            }
            KeyStatus::Valid => {
                Span::styled("✓ API Key Valid", Style::default().fg(theme.status_pass))
            }
            KeyStatus::Invalid => {
                Span::styled("✗ API Key Invalid", Style::default().fg(theme.status_fail))
            }
        };
        Line::from(vec![
            Span::styled("[s] ", key),
            Span::raw("Analyze   "),
            Span::styled("[i] ", key),
            Span::raw("edit   "),
            key_check,
        ])
    };
    lines.push(analyze);

    if let Some(err) = ws.gate.error() {
        lines.push(Line::from(Span::styled(err.to_owned(), Style::default().fg(theme.error))));
    }
    lines
}
