//! Sign-in / sign-up form.

use qa_assistant_core::nav::Screen;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Clear, Paragraph},
};

use crate::app::App;
use crate::forms::{LoginField, TextField};
use super::layout::{centered, panel_block};

pub fn render_login(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let is_login = app.screen() == Screen::Login;
    let card = centered(area, 56, 16);
    frame.render_widget(Clear, card);
    let title = if is_login { " Sign In " } else { " Sign Up " };
    let block = panel_block(title, true, theme);
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let [header, email, password, notice, footer] = inner.layout(&Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Fill(1),
    ]));

    let header_text = Text::from(vec![
        Line::from(Span::styled(
            "QA Assistant",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "AI-powered testing platform for modern teams",
            Style::default().fg(theme.muted),
        )),
    ])
    .centered();
    frame.render_widget(Paragraph::new(header_text), header);

    let focus = app.login.focus;
    render_field(frame, email, "Email", "Enter your email", &app.login.email, focus == LoginField::Email, app);
    render_field(
        frame,
        password,
        "Password",
        "Enter your password",
        &app.login.password,
        focus == LoginField::Password,
        app,
    );

    if let Some(msg) = app.notice.as_deref() {
        frame.render_widget(
            Paragraph::new(Span::styled(msg, Style::default().fg(theme.error))).centered(),
            notice,
        );
    }

    let (submit, switch) = if is_login {
        ("Sign In", "Don't have an account? Sign up")
    } else {
        ("Sign Up", "Already have an account? Sign in")
    };
    let key = Style::default().fg(theme.accent);
    let footer_text = Text::from(vec![
        Line::from(vec![
            Span::styled("Enter ", key),
            Span::raw(format!("{submit}   ")),
            Span::styled("Tab ", key),
            Span::raw("next field   "),
            Span::styled("Esc ", key),
            Span::raw("back"),
        ]),
        Line::from(vec![Span::styled("Ctrl-t ", key), Span::raw(switch)]),
    ])
    .centered();
    frame.render_widget(Paragraph::new(footer_text), footer);
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    placeholder: &str,
    field: &TextField,
    focused: bool,
    app: &App,
) {
    let theme = &app.theme;
    let content = if field.value.is_empty() {
        Line::from(Span::styled(placeholder.to_owned(), Style::default().fg(theme.muted)))
    } else if focused {
        Line::from(format!("{}▏", field.display()))
    } else {
        Line::from(field.display())
    };
    frame.render_widget(Paragraph::new(content).block(panel_block(label, focused, theme)), area);
}
