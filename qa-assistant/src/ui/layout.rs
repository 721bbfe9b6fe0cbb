//! Shared layout helpers for qa-assistant.
//!
//! Pure layout arithmetic and reusable chrome (panel borders, status bar). No
//! mutable application state lives here; every frame recomputes its layout
//! from `frame.area()` so resizes need no bookkeeping.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{App, Mode};
use crate::theme::Theme;

/// Braille spinner shown while an analysis or key check is running.
const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub fn spinner(frame: usize) -> &'static str {
    SPINNER[frame % SPINNER.len()]
}

/// Splits the frame into `[main, status_bar]`.
pub fn split_status(area: Rect) -> [Rect; 2] {
    area.layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]))
}

/// Builds a bordered `Block` for a panel.
///
/// Thick borders mark the focused panel. `MergeStrategy::Fuzzy` keeps the
/// junctions correct when thick and plain borders meet.
pub fn panel_block<'a>(title: &'a str, is_focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// A `width` x `height` rect centred in `area`, clamped to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    area.centered(
        Constraint::Length(width.min(area.width)),
        Constraint::Length(height.min(area.height)),
    )
}

/// Renders the 1-row status bar at the bottom of the terminal.
///
/// Shows the mode indicator, the current screen, the signed-in user and role,
/// and the screen notice if one is set. The help overlay reports `NORMAL`
/// because it is a transient layer, not an editing mode.
pub fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let (mode_text, mode_fg) = match app.mode {
        Mode::Insert => (" INSERT ", theme.status_mode_insert),
        Mode::Normal | Mode::HelpOverlay => (" NORMAL ", theme.status_mode_normal),
    };

    let mut spans = vec![
        Span::styled(mode_text, Style::default().fg(mode_fg).add_modifier(Modifier::BOLD)),
        Span::raw(format!(" {} ", app.screen().label())),
    ];
    if let Some(session) = app.nav.session() {
        spans.push(Span::raw(format!("│ {} ", session.email)));
        if let Some(role) = session.role {
            spans.push(Span::raw(format!("│ {} ", role.label())));
        }
    }
    if let Some(ws) = app.workspace.as_ref() {
        if ws.gate.is_busy() {
            spans.push(Span::raw(format!("│ {} analyzing ", spinner(app.spinner_frame))));
        }
    }
    if let Some(notice) = app.notice.as_deref() {
        spans.push(Span::styled(format!("│ {notice} "), Style::default().fg(theme.error)));
    }
    spans.push(Span::raw("│ ? help"));

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
