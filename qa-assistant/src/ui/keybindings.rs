//! Keybinding dispatcher for qa-assistant.
//!
//! Translates raw crossterm `KeyEvent`s into `App` mutations and returns a
//! `KeyAction` telling the event loop whether to continue or quit. The help
//! overlay takes precedence; otherwise the dispatcher branches on the current
//! screen, and inside the workspace on `app.mode`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use qa_assistant_core::nav::Screen;
use qa_assistant_core::types::Role;

use crate::app::{App, Mode, Pane};

/// Control-flow signal returned from the key dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Continue the event loop normally.
    Continue,
    /// Exit cleanly.
    Quit,
}

/// Lines scrolled per mouse wheel notch.
const WHEEL_STEP: u16 = 3;

/// Dispatches a key event to the handler for the current mode and screen.
pub fn handle_key(key: KeyEvent, app: &mut App) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    if app.mode == Mode::HelpOverlay {
        return handle_help(key, app);
    }
    match app.screen() {
        Screen::Home => handle_home(key, app),
        Screen::Login | Screen::Signup => handle_credentials(key, app),
        Screen::RoleSelect => handle_role_select(key, app),
        Screen::Workspace => match app.mode {
            Mode::Insert => handle_insert(key, app),
            _ => handle_workspace_normal(key, app),
        },
    }
}

/// Keys available on every non-editing screen. Returns `None` when unhandled.
fn handle_global(key: KeyEvent, app: &mut App) -> Option<KeyAction> {
    match key.code {
        KeyCode::Char('q') => Some(KeyAction::Quit),
        KeyCode::Char('?') => {
            app.help_scroll = 0;
            app.mode = Mode::HelpOverlay;
            Some(KeyAction::Continue)
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
            Some(KeyAction::Continue)
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

fn handle_home(key: KeyEvent, app: &mut App) -> KeyAction {
    if let Some(action) = handle_global(key, app) {
        return action;
    }
    match key.code {
        KeyCode::Char('l') | KeyCode::Enter => app.request_login(),
        KeyCode::Char('s') => app.request_signup(),
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Login / Signup
// ---------------------------------------------------------------------------

/// Credentials forms are always in editing mode: every printable key is text.
fn handle_credentials(key: KeyEvent, app: &mut App) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.cancel(),
        KeyCode::Char('t') if ctrl => app.toggle_credentials_mode(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => app.login.next_field(),
        KeyCode::Enter => app.submit_credentials(),
        KeyCode::Backspace => app.login.focused_mut().backspace(),
        KeyCode::Char(c) if !ctrl => app.login.focused_mut().push(c),
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Role selector
// ---------------------------------------------------------------------------

fn handle_role_select(key: KeyEvent, app: &mut App) -> KeyAction {
    if let Some(action) = handle_global(key, app) {
        return action;
    }
    let last = Role::ALL.len() - 1;
    match key.code {
        KeyCode::Char(c @ '1'..='3') => {
            let idx = (c as usize) - ('1' as usize);
            app.role_cursor = idx;
            app.select_role(Role::ALL[idx]);
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
            app.role_cursor = app.role_cursor.saturating_sub(1);
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
            app.role_cursor = (app.role_cursor + 1).min(last);
        }
        KeyCode::Enter => app.confirm_role_cursor(),
        KeyCode::Esc => app.cancel(),
        KeyCode::Char('X') => app.logout(),
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Workspace: Normal mode
// ---------------------------------------------------------------------------

fn handle_workspace_normal(key: KeyEvent, app: &mut App) -> KeyAction {
    if let Some(action) = handle_global(key, app) {
        return action;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('R') => app.change_role(),
        KeyCode::Char('X') => app.logout(),
        KeyCode::Char('s') => app.submit_analysis(),
        KeyCode::Char('a') => app.test_api_key(),
        _ => {
            let Some(ws) = app.workspace.as_mut() else {
                return KeyAction::Continue;
            };
            match key.code {
                KeyCode::Char('m') => ws.form.method = ws.form.method.next(),
                KeyCode::Char('L') => ws.form.language = ws.form.language.next(),
                KeyCode::Char('o') => ws.pane = ws.pane.other(),
                KeyCode::Tab => {
                    ws.pane = Pane::Input;
                    ws.form.focus = ws.form.focus.next();
                }
                KeyCode::BackTab => {
                    ws.pane = Pane::Input;
                    ws.form.focus = ws.form.focus.prev();
                }
                KeyCode::Esc => ws.gate.clear_error(),
                KeyCode::Char('i') => {
                    let field = ws.form.focus;
                    app.edit_field(field);
                }
                KeyCode::Enter if ws.pane == Pane::Input => {
                    let field = ws.form.focus;
                    app.edit_field(field);
                }
                KeyCode::Enter | KeyCode::Char(' ') if ws.pane == Pane::Output => {
                    ws.sections.toggle_selected();
                }
                KeyCode::Char('J') => ws.sections.select_next(),
                KeyCode::Char('K') => ws.sections.select_prev(),
                KeyCode::Char('j') | KeyCode::Down => {
                    ws.output_scroll = ws.output_scroll.saturating_add(1);
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    ws.output_scroll = ws.output_scroll.saturating_sub(1);
                }
                KeyCode::Char('g') => ws.output_scroll = 0,
                KeyCode::Char('d') if ctrl => {
                    ws.output_scroll = ws.output_scroll.saturating_add(10);
                }
                KeyCode::Char('u') if ctrl => {
                    ws.output_scroll = ws.output_scroll.saturating_sub(10);
                }
                _ => {}
            }
        }
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Workspace: Insert mode
// ---------------------------------------------------------------------------

/// Typed characters go into the focused input field.
///
/// `Esc` returns to Normal mode. `Enter` inserts a newline in the code and
/// prompt editors and leaves Insert mode in single-line fields. `Ctrl-s`
/// submits without leaving the keyboard.
fn handle_insert(key: KeyEvent, app: &mut App) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('s') {
        app.submit_analysis();
        return KeyAction::Continue;
    }
    let Some(ws) = app.workspace.as_mut() else {
        app.mode = Mode::Normal;
        return KeyAction::Continue;
    };
    match key.code {
        KeyCode::Esc => app.mode = Mode::Normal,
        KeyCode::Tab => ws.form.focus = ws.form.focus.next(),
        KeyCode::BackTab => ws.form.focus = ws.form.focus.prev(),
        KeyCode::Enter => {
            if !ws.form.focused_mut().newline() {
                app.mode = Mode::Normal;
            }
        }
        KeyCode::Backspace => ws.form.focused_mut().backspace(),
        KeyCode::Char(c) if !ctrl => ws.form.focused_mut().push(c),
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

/// Any of `?`, `Esc`, or `q` dismisses the overlay; `j`/`k`/`g`/`G` scroll it.
fn handle_help(key: KeyEvent, app: &mut App) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll = app.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll = app.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => app.help_scroll = 0,
        KeyCode::Char('G') => app.help_scroll = u16::MAX,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => app.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Scroll wheel moves the help overlay when visible, otherwise the output panel.
pub fn handle_mouse(mouse: MouseEvent, app: &mut App) -> KeyAction {
    let down = match mouse.kind {
        MouseEventKind::ScrollDown => true,
        MouseEventKind::ScrollUp => false,
        _ => return KeyAction::Continue,
    };
    let offset = if app.mode == Mode::HelpOverlay {
        &mut app.help_scroll
    } else if let Some(ws) = app.workspace.as_mut() {
        &mut ws.output_scroll
    } else {
        return KeyAction::Continue;
    };
    *offset = if down {
        offset.saturating_add(WHEEL_STEP)
    } else {
        offset.saturating_sub(WHEEL_STEP)
    };
    KeyAction::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers, MouseEventKind};
    use qa_assistant_core::nav::Navigator;
    use qa_assistant_core::sections::Section;
    use qa_assistant_core::store::{KeyValueStore, MemoryStore};
    use qa_assistant_core::types::{InputMethod, Language};

    use crate::analysis::types::AnalysisJob;
    use crate::analysis::AnalysisClient;
    use crate::forms::InputField;
    use crate::theme::Theme;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent { modifiers: KeyModifiers::CONTROL, ..key(KeyCode::Char(c)) }
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            handle_key(key(KeyCode::Char(c)), app);
        }
    }

    fn new_app() -> (App, crossbeam_channel::Receiver<AnalysisJob>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let nav = Navigator::restore(Box::new(MemoryStore::new()) as Box<dyn KeyValueStore>);
        let app = App::new(nav, AnalysisClient::new(tx), Theme::dark(), Duration::from_secs(30));
        (app, rx)
    }

    /// Drives the UI from Home to a Tester workspace.
    fn sign_in_as_tester(app: &mut App) {
        handle_key(key(KeyCode::Char('s')), app);
        assert_eq!(app.screen(), Screen::Signup);
        type_str(app, "qa@example.com");
        handle_key(key(KeyCode::Tab), app);
        type_str(app, "hunter2");
        handle_key(key(KeyCode::Enter), app);
        assert_eq!(app.screen(), Screen::RoleSelect);
        handle_key(key(KeyCode::Char('2')), app);
        assert_eq!(app.screen(), Screen::Workspace);
    }

    #[test]
    fn keyboard_flow_reaches_workspace() {
        let (mut app, _rx) = new_app();
        sign_in_as_tester(&mut app);
        assert_eq!(app.nav.session().unwrap().email, "qa@example.com");
        assert_eq!(app.nav.role(), Some(Role::Tester));
    }

    #[test]
    fn credentials_screen_types_q_and_esc_goes_home() {
        let (mut app, _rx) = new_app();
        handle_key(key(KeyCode::Enter), &mut app);
        assert_eq!(app.screen(), Screen::Login);
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut app), KeyAction::Continue);
        assert_eq!(app.login.email.value, "q");

        handle_key(ctrl('t'), &mut app);
        assert_eq!(app.screen(), Screen::Signup);

        handle_key(key(KeyCode::Esc), &mut app);
        assert_eq!(app.screen(), Screen::Home);
    }

    #[test]
    fn insert_mode_edits_and_submits() {
        let (mut app, rx) = new_app();
        sign_in_as_tester(&mut app);

        handle_key(key(KeyCode::Char('i')), &mut app);
        assert_eq!(app.mode, Mode::Insert);
        type_str(&mut app, "let a = 1;");
        handle_key(key(KeyCode::Enter), &mut app);
        type_str(&mut app, "q");
        assert_eq!(app.mode, Mode::Insert, "q is text in insert mode");
        handle_key(key(KeyCode::Tab), &mut app);
        type_str(&mut app, "sum");
        handle_key(ctrl('s'), &mut app);

        match rx.try_recv().unwrap() {
            AnalysisJob::Analyze { request, .. } => {
                assert_eq!(request.code, "let a = 1;\nq");
                assert_eq!(request.prompt, "sum");
            }
            other => panic!("unexpected job {other:?}"),
        }
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.workspace.as_ref().unwrap().gate.is_busy());
    }

    #[test]
    fn enter_in_single_line_field_leaves_insert_mode() {
        let (mut app, _rx) = new_app();
        sign_in_as_tester(&mut app);
        handle_key(key(KeyCode::BackTab), &mut app);
        assert_eq!(app.workspace.as_ref().unwrap().form.focus, InputField::ApiKey);
        handle_key(key(KeyCode::Enter), &mut app);
        type_str(&mut app, "sk");
        handle_key(key(KeyCode::Enter), &mut app);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.workspace.as_ref().unwrap().form.api_key.value, "sk");
    }

    #[test]
    fn method_and_language_cycle() {
        let (mut app, _rx) = new_app();
        sign_in_as_tester(&mut app);
        handle_key(key(KeyCode::Char('m')), &mut app);
        handle_key(key(KeyCode::Char('L')), &mut app);
        let ws = app.workspace.as_ref().unwrap();
        assert_eq!(ws.form.method, InputMethod::Github);
        assert_eq!(ws.form.language, Language::Python);
    }

    #[test]
    fn output_pane_toggles_sections() {
        let (mut app, _rx) = new_app();
        sign_in_as_tester(&mut app);
        handle_key(key(KeyCode::Char('o')), &mut app);
        handle_key(key(KeyCode::Char('J')), &mut app);
        handle_key(key(KeyCode::Char(' ')), &mut app);
        let sections = &app.workspace.as_ref().unwrap().sections;
        assert!(sections.is_open(Section::Functional));
        assert!(sections.is_open(Section::Security));
    }

    #[test]
    fn role_change_and_logout() {
        let (mut app, _rx) = new_app();
        sign_in_as_tester(&mut app);
        handle_key(key(KeyCode::Char('R')), &mut app);
        assert_eq!(app.screen(), Screen::RoleSelect);
        handle_key(key(KeyCode::Right), &mut app);
        handle_key(key(KeyCode::Enter), &mut app);
        assert_eq!(app.nav.role(), Some(Role::ProductOwner));

        handle_key(key(KeyCode::Char('X')), &mut app);
        assert_eq!(app.screen(), Screen::Home);
        assert!(app.nav.session().is_none());
    }

    #[test]
    fn help_overlay_and_quit() {
        let (mut app, _rx) = new_app();
        handle_key(key(KeyCode::Char('?')), &mut app);
        assert_eq!(app.mode, Mode::HelpOverlay);
        handle_key(key(KeyCode::Char('j')), &mut app);
        assert_eq!(app.help_scroll, 1);
        handle_key(key(KeyCode::Char('q')), &mut app);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut app), KeyAction::Quit);
        assert_eq!(handle_key(ctrl('c'), &mut app), KeyAction::Quit);
    }

    #[test]
    fn mouse_wheel_scrolls_output() {
        let (mut app, _rx) = new_app();
        sign_in_as_tester(&mut app);
        let wheel = |kind| MouseEvent { kind, column: 0, row: 0, modifiers: KeyModifiers::NONE };
        handle_mouse(wheel(MouseEventKind::ScrollDown), &mut app);
        handle_mouse(wheel(MouseEventKind::ScrollDown), &mut app);
        handle_mouse(wheel(MouseEventKind::ScrollUp), &mut app);
        assert_eq!(app.workspace.as_ref().unwrap().output_scroll, 3);
    }
}
