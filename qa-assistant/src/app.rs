//! Central application state for qa-assistant.
//!
//! `App` owns the navigator (session + screen), the per-screen form state, and
//! the workspace instance. The render module reads `App` and the keybinding
//! dispatcher mutates it. The only rendering work done here is caching the
//! highlighted corrected code, so drawing a frame never runs syntect.
//!
//! A `Workspace` exists exactly while the navigator says `Screen::Workspace`.
//! Leaving the screen drops it, which discards the current result and cancels
//! any in-flight analysis (its completion no longer matches a ticket).

use std::time::{Duration, Instant};

use qa_assistant_core::gate::{SubmissionGate, Ticket};
use qa_assistant_core::nav::{NavError, Navigator, Screen};
use qa_assistant_core::sections::SectionSet;
use qa_assistant_core::store::KeyValueStore;
use qa_assistant_core::types::{AnalysisResult, Findings, Role};
use ratatui::text::Line;

use crate::analysis::types::AnalysisEvent;
use crate::analysis::AnalysisClient;
use crate::forms::{InputField, InputForm, LoginForm};
use crate::theme::Theme;
use crate::ui::highlight::highlight;

/// Editor mode controlling which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Navigation keys (default).
    #[default]
    Normal,
    /// Typed characters go into the focused text field.
    Insert,
    /// Full-screen help overlay is shown above everything.
    HelpOverlay,
}

/// Which workspace pane receives navigation keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    #[default]
    Input,
    Output,
}

impl Pane {
    pub fn other(self) -> Self {
        match self {
            Pane::Input => Pane::Output,
            Pane::Output => Pane::Input,
        }
    }
}

/// Result of the most recent API key test.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    #[default]
    Untested,
    Checking,
    Valid,
    Invalid,
}

/// One workspace instance: input form, submission gate, and result view state.
#[derive(Debug)]
pub struct Workspace {
    pub role: Role,
    pub form: InputForm,
    pub gate: SubmissionGate,
    pub sections: SectionSet,
    pub pane: Pane,
    pub key_status: KeyStatus,
    key_ticket: Option<Ticket>,
    /// Vertical scroll offset of the output panel.
    pub output_scroll: u16,
    /// Highlighted corrected code of the current developer result. Rebuilt
    /// when a result lands or the theme changes, never while drawing.
    pub code_lines: Vec<Line<'static>>,
}

impl Workspace {
    pub fn new(role: Role, timeout: Duration) -> Self {
        Self {
            role,
            form: InputForm::default(),
            gate: SubmissionGate::new(timeout),
            sections: SectionSet::for_role(role),
            pane: Pane::default(),
            key_status: KeyStatus::default(),
            key_ticket: None,
            output_scroll: 0,
            code_lines: Vec::new(),
        }
    }

    /// Re-highlights the current result's corrected code with `code_theme`.
    pub fn rehighlight(&mut self, code_theme: &str) {
        self.code_lines = match self.gate.result() {
            Some(AnalysisResult {
                summary,
                findings: Findings::Developer { corrected_code, .. },
            }) => highlight(corrected_code, summary.language, code_theme),
            _ => Vec::new(),
        };
    }
}

/// All mutable UI state passed through every render cycle.
pub struct App {
    pub nav: Navigator<Box<dyn KeyValueStore>>,
    pub mode: Mode,
    pub theme: Theme,
    pub login: LoginForm,
    /// Highlighted card on the role selector.
    pub role_cursor: usize,
    pub workspace: Option<Workspace>,
    /// Screen-level message (credential validation, storage failures).
    pub notice: Option<String>,
    pub help_scroll: u16,
    /// Advances on every tick while something is in flight; drives the spinner.
    pub spinner_frame: usize,
    client: AnalysisClient,
    analysis_timeout: Duration,
}

impl App {
    pub fn new(
        nav: Navigator<Box<dyn KeyValueStore>>,
        client: AnalysisClient,
        theme: Theme,
        analysis_timeout: Duration,
    ) -> Self {
        let mut app = Self {
            nav,
            mode: Mode::default(),
            theme,
            login: LoginForm::default(),
            role_cursor: 0,
            workspace: None,
            notice: None,
            help_scroll: 0,
            spinner_frame: 0,
            client,
            analysis_timeout,
        };
        app.sync_workspace();
        app
    }

    pub fn screen(&self) -> Screen {
        self.nav.screen()
    }

    /// Creates or drops the workspace so it exists exactly on `Screen::Workspace`.
    ///
    /// Called after every navigation transition.
    fn sync_workspace(&mut self) {
        match (self.nav.screen(), self.nav.role()) {
            (Screen::Workspace, Some(role)) => {
                if self.workspace.as_ref().is_none_or(|ws| ws.role != role) {
                    self.workspace = Some(Workspace::new(role, self.analysis_timeout));
                }
            }
            _ => {
                if let Some(mut ws) = self.workspace.take() {
                    ws.gate.cancel();
                }
            }
        }
        if self.nav.screen() != Screen::Workspace && self.mode == Mode::Insert {
            self.mode = Mode::Normal;
        }
    }

    /// Records a navigation error as the screen notice.
    fn report(&mut self, result: Result<(), NavError>) -> bool {
        match result {
            Ok(()) => {
                self.notice = None;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "navigation action failed");
                self.notice = Some(e.to_string());
                false
            }
        }
    }

    // ---------------------------------------------------------------------
    // Navigation intents
    // ---------------------------------------------------------------------

    pub fn request_login(&mut self) {
        self.login.reset();
        self.notice = None;
        self.nav.request_login();
        self.mode = Mode::Insert;
    }

    pub fn request_signup(&mut self) {
        self.login.reset();
        self.notice = None;
        self.nav.request_signup();
        self.mode = Mode::Insert;
    }

    pub fn toggle_credentials_mode(&mut self) {
        self.nav.toggle_credentials_mode();
    }

    /// Back out of Login/Signup or an in-progress role change.
    pub fn cancel(&mut self) {
        self.notice = None;
        self.mode = Mode::Normal;
        self.nav.cancel();
        self.sync_workspace();
    }

    pub fn submit_credentials(&mut self) {
        let result = self
            .nav
            .submit_credentials(&self.login.email.value, &self.login.password.value);
        if self.report(result) {
            self.login.reset();
            self.mode = Mode::Normal;
            self.role_cursor = 0;
        }
        self.sync_workspace();
    }

    pub fn select_role(&mut self, role: Role) {
        let result = self.nav.select_role(role);
        self.report(result);
        self.sync_workspace();
    }

    /// Selects the role under the selector cursor.
    pub fn confirm_role_cursor(&mut self) {
        let role = Role::ALL[self.role_cursor.min(Role::ALL.len() - 1)];
        self.select_role(role);
    }

    pub fn change_role(&mut self) {
        let current = self.nav.role();
        let result = self.nav.change_role();
        if self.report(result) {
            self.role_cursor = current
                .and_then(|r| Role::ALL.iter().position(|x| *x == r))
                .unwrap_or(0);
        }
        self.sync_workspace();
    }

    pub fn logout(&mut self) {
        let result = self.nav.logout();
        self.report(result);
        self.login.reset();
        self.mode = Mode::Normal;
        self.sync_workspace();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        if let Some(ws) = self.workspace.as_mut() {
            ws.rehighlight(self.theme.code_theme);
        }
        tracing::debug!(theme = self.theme.name, "theme toggled");
    }

    // ---------------------------------------------------------------------
    // Workspace actions
    // ---------------------------------------------------------------------

    /// Builds a request from the input form and hands it to the gate.
    ///
    /// Busy submissions are silently ignored; validation and upload errors
    /// show inline in the workspace.
    pub fn submit_analysis(&mut self) {
        let Some(ws) = self.workspace.as_mut() else {
            return;
        };
        if ws.gate.is_busy() {
            return;
        }
        let request = match ws.form.build_request() {
            Ok(request) => request,
            Err(e) => {
                ws.gate.reject(format!("Could not read upload: {e}"));
                return;
            }
        };
        if ws.gate.submit(ws.role, request, &mut self.client).is_ok() {
            ws.output_scroll = 0;
            self.mode = Mode::Normal;
        }
    }

    /// Sends the API key for a (simulated) round-trip check.
    pub fn test_api_key(&mut self) {
        let Some(ws) = self.workspace.as_mut() else {
            return;
        };
        let key = ws.form.api_key.value.trim().to_owned();
        if key.is_empty() {
            ws.gate.reject("Please enter an API key to test");
            return;
        }
        let ticket = Ticket::new();
        ws.key_ticket = Some(ticket);
        ws.key_status = KeyStatus::Checking;
        ws.gate.clear_error();
        self.client.check_key(ticket, key);
    }

    /// Applies a worker result. Results for a workspace that no longer exists,
    /// or for a superseded ticket, are dropped.
    pub fn apply_analysis_event(&mut self, event: AnalysisEvent) {
        let Some(ws) = self.workspace.as_mut() else {
            tracing::debug!("dropping analysis event: no workspace");
            return;
        };
        match event {
            AnalysisEvent::Completed { ticket, outcome } => {
                let succeeded = outcome.is_ok();
                if ws.gate.complete(ticket, outcome) && succeeded {
                    ws.sections = SectionSet::for_role(ws.role);
                    ws.output_scroll = 0;
                    ws.rehighlight(self.theme.code_theme);
                }
            }
            AnalysisEvent::KeyChecked { ticket, valid } => {
                if ws.key_ticket == Some(ticket) {
                    ws.key_ticket = None;
                    ws.key_status = if valid { KeyStatus::Valid } else { KeyStatus::Invalid };
                }
            }
        }
    }

    /// Logic tick: advances the spinner and enforces the analysis timeout.
    pub fn on_tick(&mut self, now: Instant) {
        if let Some(ws) = self.workspace.as_mut() {
            if ws.gate.is_busy() || ws.key_status == KeyStatus::Checking {
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
            }
            ws.gate.poll_timeout(now);
        }
    }

    /// Inserts pasted text into whichever field is being edited.
    pub fn paste(&mut self, text: &str) {
        match self.screen() {
            Screen::Login | Screen::Signup => {
                // Credentials are single-line.
                let line = text.lines().next().unwrap_or_default();
                self.login.focused_mut().value.push_str(line);
            }
            Screen::Workspace => {
                if let Some(ws) = self.workspace.as_mut() {
                    let field = ws.form.focused_mut();
                    if field.multiline {
                        field.value.push_str(&text.replace("\r\n", "\n"));
                    } else {
                        field.value.push_str(text.lines().next().unwrap_or_default());
                    }
                    ws.pane = Pane::Input;
                }
            }
            _ => {}
        }
    }

    /// Focuses `field` in the input pane and enters Insert mode.
    pub fn edit_field(&mut self, field: InputField) {
        if let Some(ws) = self.workspace.as_mut() {
            ws.pane = Pane::Input;
            ws.form.focus = field;
            self.mode = Mode::Insert;
        }
    }
}
