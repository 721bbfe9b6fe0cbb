//! Role selector: three cards, one per role.

use qa_assistant_core::types::Role;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use super::layout::panel_block;

pub fn render_role_select(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let [header, cards, footer] = area.layout(&Layout::vertical([
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ]));

    let header_text = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Choose Your Role",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Select your primary role to customize your QA experience",
            Style::default().fg(theme.muted),
        )),
    ])
    .centered();
    frame.render_widget(Paragraph::new(header_text), header);

    let cells = Layout::horizontal([Constraint::Fill(1); Role::ALL.len()]).split(cards);
    let current = app.nav.role();
    for (idx, (role, cell)) in Role::ALL.iter().zip(cells.iter()).enumerate() {
        let selected = idx == app.role_cursor;
        let mut lines = vec![
            Line::from(Span::styled(role.description(), Style::default().fg(theme.text))),
            Line::from(""),
        ];
        lines.extend(role.features().iter().map(|f| {
            Line::from(vec![Span::styled("• ", Style::default().fg(theme.accent)), Span::raw(*f)])
        }));
        if current == Some(*role) {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("(current)", Style::default().fg(theme.muted))));
        }
        let title = format!(" {} {} ", idx + 1, role.label());
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(panel_block(&title, selected, theme)),
            *cell,
        );
    }

    let hint = if app.nav.is_changing_role() {
        "1-3 select  ←/→ move  Enter confirm  Esc keep current role  X sign out"
    } else {
        "1-3 select  ←/→ move  Enter confirm  X sign out"
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(theme.muted))).centered(),
        footer,
    );
}
