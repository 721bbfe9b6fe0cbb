//! UI rendering module for qa-assistant.
//!
//! `render()` is the single entry point called by the event loop's
//! `terminal.draw()` closure. It dispatches on the navigator's current screen;
//! shared chrome lives in `layout.rs`.

mod home;
mod layout;
mod login;
mod output;
mod role_select;
mod workspace;
pub mod help;
pub mod highlight;
pub mod keybindings;

use qa_assistant_core::nav::Screen;
use ratatui::{
    Frame,
    style::Style,
    widgets::Block,
};

use crate::app::{App, Mode};
use layout::{render_status_bar, split_status};

/// Renders one complete frame: the current screen, status bar, and help overlay.
///
/// Called exactly once per `AppEvent::Render`. Never call `terminal.draw()`
/// from anywhere else.
pub fn render(frame: &mut Frame, app: &App) {
    let [main, status_bar] = split_status(frame.area());

    frame.render_widget(
        Block::new().style(Style::default().bg(app.theme.background).fg(app.theme.text)),
        frame.area(),
    );

    match app.screen() {
        Screen::Home => home::render_home(frame, main, &app.theme),
        Screen::Login | Screen::Signup => login::render_login(frame, main, app),
        Screen::RoleSelect => role_select::render_role_select(frame, main, app),
        Screen::Workspace => workspace::render_workspace(frame, main, app),
    }

    render_status_bar(frame, status_bar, app);

    // Rendered last so it sits on top.
    if app.mode == Mode::HelpOverlay {
        help::render_help_overlay(frame, &app.theme, app.help_scroll);
    }
}
