//! Help overlay renderer for qa-assistant.
//!
//! Draws a centred modal over the current screen. `Clear` erases the area first
//! so the overlay is rendered in the same `terminal.draw()` pass as everything
//! else.

use ratatui::{
    Frame,
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay, scrolled by `help_scroll` rows.
///
/// Skipped on terminals narrower than 60 columns.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 60 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(80), Constraint::Percentage(80));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help: j/k scroll, ? or Esc to dismiss ")
        .border_style(Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text(theme))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn build_help_text(theme: &Theme) -> Text<'static> {
    let heading = |s: &'static str| {
        Line::from(Span::styled(s, Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)))
    };
    Text::from(vec![
        heading("Home"),
        Line::from("  l / Enter     Sign in"),
        Line::from("  s             Sign up"),
        Line::from(""),
        heading("Sign In / Sign Up"),
        Line::from("  Tab           Switch between email and password"),
        Line::from("  Enter         Submit"),
        Line::from("  Ctrl-t        Toggle between sign in and sign up"),
        Line::from("  Esc           Back to home"),
        Line::from(""),
        heading("Role Selection"),
        Line::from("  1 / 2 / 3     Developer / Tester / Product Owner"),
        Line::from("  ← / →         Move selection"),
        Line::from("  Enter         Confirm selection"),
        Line::from("  Esc           Keep current role (when changing role)"),
        Line::from(""),
        heading("Workspace"),
        Line::from("  i / Enter     Edit the focused field (INSERT mode)"),
        Line::from("  Tab / S-Tab   Next / previous input field"),
        Line::from("  m             Cycle input method: Paste / GitHub / Upload"),
        Line::from("  L             Cycle programming language"),
        Line::from("  s             Analyze"),
        Line::from("  a             Test API key"),
        Line::from("  o             Switch focus between input and output"),
        Line::from("  J / K         Next / previous result section"),
        Line::from("  Space         Expand / collapse the selected section"),
        Line::from("  j / k, g      Scroll output, jump to top"),
        Line::from("  Esc           Dismiss error message"),
        Line::from("  R             Change role"),
        Line::from("  X             Sign out"),
        Line::from(""),
        heading("INSERT mode"),
        Line::from("  Esc           Back to NORMAL mode"),
        Line::from("  Enter         New line (code and description), done (other fields)"),
        Line::from("  Ctrl-s        Analyze"),
        Line::from(""),
        heading("General"),
        Line::from("  t             Toggle dark / light theme"),
        Line::from("  ?             Open / close this help overlay"),
        Line::from("  q / Ctrl-c    Quit"),
    ])
}
