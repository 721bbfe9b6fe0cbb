//! Screen/session navigation state machine.
//!
//! The visible [`Screen`] is never stored; it is derived on demand from the
//! current session and three intent flags. Every transition that changes the
//! session persists it first and only then mutates in-memory state, so a
//! storage failure leaves the navigator where it was.

use thiserror::Error;

use crate::session::{SessionError, SessionStore};
use crate::store::KeyValueStore;
use crate::types::{Role, UserSession};

/// Which top-level screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Login,
    Signup,
    RoleSelect,
    Workspace,
}

impl Screen {
    pub fn label(self) -> &'static str {
        match self {
            Screen::Home => "HOME",
            Screen::Login => "SIGN IN",
            Screen::Signup => "SIGN UP",
            Screen::RoleSelect => "ROLE",
            Screen::Workspace => "WORKSPACE",
        }
    }
}

#[derive(Error, Debug)]
pub enum NavError {
    #[error("email and password are required")]
    EmptyCredentials,

    #[error("no user is signed in")]
    NoSession,

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Owns the session and every screen transition.
pub struct Navigator<S> {
    store: SessionStore<S>,
    session: Option<UserSession>,
    wants_login: bool,
    wants_signup: bool,
    wants_role_change: bool,
}

impl<S: KeyValueStore> Navigator<S> {
    /// Builds a navigator from whatever the backend currently holds.
    ///
    /// A stored session with a role resumes at `Workspace`, one without a role
    /// at `RoleSelect`. Nothing stored, a malformed record, or a failing
    /// backend all start at `Home`.
    pub fn restore(backend: S) -> Self {
        let store = SessionStore::new(backend);
        let session = match store.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored session; starting signed out");
                None
            }
        };
        let nav = Self {
            store,
            session,
            wants_login: false,
            wants_signup: false,
            wants_role_change: false,
        };
        tracing::info!(screen = ?nav.screen(), "navigation restored");
        nav
    }

    /// Derives the current screen.
    pub fn screen(&self) -> Screen {
        match &self.session {
            None if self.wants_login => Screen::Login,
            None if self.wants_signup => Screen::Signup,
            None => Screen::Home,
            Some(s) if s.role.is_none() || self.wants_role_change => Screen::RoleSelect,
            Some(_) => Screen::Workspace,
        }
    }

    pub fn session(&self) -> Option<&UserSession> {
        self.session.as_ref()
    }

    /// The chosen role, if signed in and a role has been picked.
    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().and_then(|s| s.role)
    }

    /// True while an already-roled user is revisiting the role selector.
    pub fn is_changing_role(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.role.is_some()) && self.wants_role_change
    }

    /// Home → Login.
    pub fn request_login(&mut self) {
        self.wants_login = true;
        self.wants_signup = false;
    }

    /// Home → Signup.
    pub fn request_signup(&mut self) {
        self.wants_signup = true;
        self.wants_login = false;
    }

    /// Flips between the sign-in and sign-up variants of the credentials form.
    pub fn toggle_credentials_mode(&mut self) {
        match self.screen() {
            Screen::Login => self.request_signup(),
            Screen::Signup => self.request_login(),
            _ => {}
        }
    }

    /// Backs out of the current screen.
    ///
    /// Login/Signup return to Home; a role change returns to Workspace with the
    /// old role. Elsewhere this is a no-op.
    pub fn cancel(&mut self) {
        self.wants_login = false;
        self.wants_signup = false;
        self.wants_role_change = false;
    }

    /// Accepts any non-empty credentials and creates a role-less session.
    ///
    /// No account store exists; the password is checked for presence only and
    /// is never persisted. Login and signup behave identically.
    ///
    /// # Errors
    ///
    /// `EmptyCredentials` if either field is blank; `Session` if the record
    /// cannot be written (state is left unchanged).
    pub fn submit_credentials(&mut self, email: &str, password: &str) -> Result<(), NavError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(NavError::EmptyCredentials);
        }
        let session = UserSession {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_owned(),
            role: None,
        };
        self.store.save(&session)?;
        tracing::info!(session_id = %session.id, "signed in");
        self.session = Some(session);
        self.wants_login = false;
        self.wants_signup = false;
        self.wants_role_change = false;
        Ok(())
    }

    /// Workspace → RoleSelect without dropping the current role.
    pub fn change_role(&mut self) -> Result<(), NavError> {
        if self.session.is_none() {
            return Err(NavError::NoSession);
        }
        self.wants_role_change = true;
        Ok(())
    }

    /// Stores `role` on the session and advances to Workspace.
    ///
    /// Calling it again overwrites the stored role.
    ///
    /// # Errors
    ///
    /// `NoSession` if nobody is signed in; `Session` if the write fails.
    pub fn select_role(&mut self, role: Role) -> Result<(), NavError> {
        let Some(current) = self.session.as_ref() else {
            return Err(NavError::NoSession);
        };
        let updated = UserSession { role: Some(role), ..current.clone() };
        self.store.save(&updated)?;
        tracing::info!(role = ?role, "role selected");
        self.session = Some(updated);
        self.wants_role_change = false;
        Ok(())
    }

    /// Signs out from any screen and deletes the stored record.
    ///
    /// In-memory state is always cleared. A failed delete is returned so the
    /// caller can report it; the next restore may then find the old record.
    pub fn logout(&mut self) -> Result<(), NavError> {
        self.session = None;
        self.wants_login = false;
        self.wants_signup = false;
        self.wants_role_change = false;
        let cleared = self.store.clear();
        tracing::info!(ok = cleared.is_ok(), "signed out");
        cleared.map_err(NavError::from)
    }

    /// Consumes the navigator and returns its backend, e.g. to simulate a restart.
    pub fn into_backend(self) -> S {
        self.store.into_backend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SESSION_KEY;
    use crate::store::{MemoryStore, StoreError};

    /// Backend whose writes always fail; reads return whatever it was seeded with.
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.get(key)
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("read-only".to_owned()))
        }
        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("read-only".to_owned()))
        }
    }

    fn signed_in_with(role: Option<Role>) -> Navigator<MemoryStore> {
        let mut nav = Navigator::restore(MemoryStore::new());
        nav.submit_credentials("a@b.com", "x").unwrap();
        if let Some(role) = role {
            nav.select_role(role).unwrap();
        }
        nav
    }

    #[test]
    fn startup_screen_follows_stored_record() {
        let cases = [
            (None, Screen::Home),
            (Some(r#"{"id":"1","email":"a@b.com","role":"tester"}"#), Screen::Workspace),
            (Some(r#"{"id":"1","email":"a@b.com"}"#), Screen::RoleSelect),
            (Some("not json at all"), Screen::Home),
            (Some(r#"{"id":"1","email":"a@b.com","role":"manager"}"#), Screen::Home),
        ];
        for (raw, expected) in cases {
            let backend = match raw {
                Some(raw) => MemoryStore::with_entry(SESSION_KEY, raw),
                None => MemoryStore::new(),
            };
            assert_eq!(Navigator::restore(backend).screen(), expected, "raw = {raw:?}");
        }
    }

    #[test]
    fn home_login_cancel_cycle() {
        let mut nav = Navigator::restore(MemoryStore::new());
        assert_eq!(nav.screen(), Screen::Home);

        nav.request_login();
        assert_eq!(nav.screen(), Screen::Login);
        nav.toggle_credentials_mode();
        assert_eq!(nav.screen(), Screen::Signup);
        nav.toggle_credentials_mode();
        assert_eq!(nav.screen(), Screen::Login);

        nav.cancel();
        assert_eq!(nav.screen(), Screen::Home);

        nav.request_signup();
        assert_eq!(nav.screen(), Screen::Signup);
    }

    #[test]
    fn any_non_empty_credentials_lead_to_role_select() {
        let mut nav = Navigator::restore(MemoryStore::new());
        nav.request_login();
        nav.submit_credentials("a@b.com", "x").unwrap();

        assert_eq!(nav.screen(), Screen::RoleSelect);
        let session = nav.session().unwrap();
        assert_eq!(session.email, "a@b.com");
        assert_eq!(session.role, None);
        assert!(!session.id.is_empty());
    }

    #[test]
    fn blank_credentials_are_rejected_without_state_change() {
        let mut nav = Navigator::restore(MemoryStore::new());
        nav.request_signup();
        for (email, password) in [("", "x"), ("   ", "x"), ("a@b.com", "")] {
            assert!(matches!(
                nav.submit_credentials(email, password),
                Err(NavError::EmptyCredentials)
            ));
        }
        assert_eq!(nav.screen(), Screen::Signup);
        assert!(nav.into_backend().is_empty());
    }

    #[test]
    fn selected_role_survives_restart() {
        let mut nav = signed_in_with(None);
        nav.select_role(Role::Tester).unwrap();
        assert_eq!(nav.screen(), Screen::Workspace);

        let restarted = Navigator::restore(nav.into_backend());
        assert_eq!(restarted.role(), Some(Role::Tester));
        assert_eq!(restarted.screen(), Screen::Workspace);
    }

    #[test]
    fn select_role_overwrites_existing_role() {
        let mut nav = signed_in_with(Some(Role::Developer));
        nav.change_role().unwrap();
        assert_eq!(nav.screen(), Screen::RoleSelect);
        assert!(nav.is_changing_role());

        nav.select_role(Role::ProductOwner).unwrap();
        assert_eq!(nav.screen(), Screen::Workspace);

        let restarted = Navigator::restore(nav.into_backend());
        assert_eq!(restarted.role(), Some(Role::ProductOwner));
    }

    #[test]
    fn cancelling_role_change_keeps_old_role() {
        let mut nav = signed_in_with(Some(Role::Developer));
        nav.change_role().unwrap();
        nav.cancel();
        assert_eq!(nav.screen(), Screen::Workspace);
        assert_eq!(nav.role(), Some(Role::Developer));
    }

    #[test]
    fn select_role_without_session_is_rejected() {
        let mut nav = Navigator::restore(MemoryStore::new());
        assert!(matches!(nav.select_role(Role::Tester), Err(NavError::NoSession)));
        assert!(matches!(nav.change_role(), Err(NavError::NoSession)));
        assert_eq!(nav.screen(), Screen::Home);
    }

    #[test]
    fn logout_from_every_state_clears_storage() {
        let states: Vec<Navigator<MemoryStore>> = vec![
            Navigator::restore(MemoryStore::new()),
            {
                let mut nav = Navigator::restore(MemoryStore::new());
                nav.request_login();
                nav
            },
            signed_in_with(None),
            signed_in_with(Some(Role::Tester)),
            {
                let mut nav = signed_in_with(Some(Role::Tester));
                nav.change_role().unwrap();
                nav
            },
        ];
        for mut nav in states {
            nav.logout().unwrap();
            assert_eq!(nav.screen(), Screen::Home);
            let backend = nav.into_backend();
            assert!(backend.is_empty());
            assert_eq!(Navigator::restore(backend).screen(), Screen::Home);
        }
    }

    #[test]
    fn failed_write_leaves_state_unchanged() {
        let mut nav = Navigator::restore(ReadOnlyStore(MemoryStore::new()));
        nav.request_login();
        assert!(matches!(
            nav.submit_credentials("a@b.com", "x"),
            Err(NavError::Session(_))
        ));
        assert_eq!(nav.screen(), Screen::Login);
        assert!(nav.session().is_none());
    }

    #[test]
    fn logout_clears_memory_even_when_delete_fails() {
        let seeded = MemoryStore::with_entry(SESSION_KEY, r#"{"id":"1","email":"a@b.com","role":"po"}"#);
        let mut nav = Navigator::restore(ReadOnlyStore(seeded));
        assert_eq!(nav.screen(), Screen::Workspace);

        assert!(nav.logout().is_err());
        assert_eq!(nav.screen(), Screen::Home);
        assert!(nav.session().is_none());
    }
}
