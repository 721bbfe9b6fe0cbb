//! Landing screen shown when nobody is signed in.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

use crate::theme::Theme;
use super::layout::panel_block;

const FEATURES: [(&str, &str); 3] = [
    (
        "Smart Test Generation",
        "AI-powered test case generation that covers edge cases and critical paths automatically.",
    ),
    (
        "Security Analysis",
        "Comprehensive security testing with vulnerability detection and remediation suggestions.",
    ),
    (
        "Performance Insights",
        "Real-time performance monitoring with detailed analytics and optimization recommendations.",
    ),
];

const STATS: [(&str, &str); 4] = [
    ("99%", "Bug Detection Rate"),
    ("10x", "Faster Testing"),
    ("500+", "Happy Teams"),
    ("24/7", "AI Support"),
];

pub fn render_home(frame: &mut Frame, area: Rect, theme: &Theme) {
    let [hero, stats, features] = area.layout(&Layout::vertical([
        Constraint::Length(9),
        Constraint::Length(4),
        Constraint::Fill(1),
    ]));

    let accent = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
    let hero_text = Text::from(vec![
        Line::from(Span::styled("QA Assistant", accent)),
        Line::from(Span::styled("AI-Powered Testing Platform", Style::default().fg(theme.muted))),
        Line::from(""),
        Line::from(Span::styled("Revolutionary QA Testing", Style::default().fg(theme.text).add_modifier(Modifier::BOLD))),
        Line::from(
            "Generate comprehensive test cases, detect bugs, and optimize your code \
             with AI-assisted analysis.",
        ),
        Line::from(""),
        Line::from(vec![
            Span::styled("[l] ", accent),
            Span::raw("Sign In    "),
            Span::styled("[s] ", accent),
            Span::raw("Get Started    "),
            Span::styled("[q] ", accent),
            Span::raw("Quit"),
        ]),
    ])
    .centered();
    frame.render_widget(
        Paragraph::new(hero_text).wrap(Wrap { trim: true }).block(panel_block("", true, theme)),
        hero,
    );

    let stat_cells = Layout::horizontal([Constraint::Fill(1); STATS.len()]).split(stats);
    for ((value, label), cell) in STATS.iter().zip(stat_cells.iter()) {
        let text = Text::from(vec![
            Line::from(Span::styled(*value, accent)),
            Line::from(Span::styled(*label, Style::default().fg(theme.muted))),
        ])
        .centered();
        frame.render_widget(Paragraph::new(text), *cell);
    }

    let feature_cells = Layout::horizontal([Constraint::Fill(1); FEATURES.len()]).split(features);
    for ((title, body), cell) in FEATURES.iter().zip(feature_cells.iter()) {
        frame.render_widget(
            Paragraph::new(*body)
                .style(Style::default().fg(theme.text))
                .wrap(Wrap { trim: true })
                .block(panel_block(title, false, theme)),
            *cell,
        );
    }
}
