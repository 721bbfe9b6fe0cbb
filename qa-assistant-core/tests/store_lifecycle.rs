//! Integration tests for the SQLite-backed session lifecycle.
//!
//! Exercises: open_db, migrate, SqliteStore get/set/remove, and Navigator
//! restore across reopened connections.

use qa_assistant_core::db::{self, SqliteStore};
use qa_assistant_core::nav::{Navigator, Screen};
use qa_assistant_core::session::SESSION_KEY;
use qa_assistant_core::store::KeyValueStore;
use qa_assistant_core::types::Role;

fn temp_db_path() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("test.db");
    (dir, path)
}

#[test]
fn open_db_configures_wal_and_schema() {
    let (_dir, path) = temp_db_path();
    let conn = db::open_db(&path).unwrap();

    let version: i64 = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |r| r.get(0))
        .unwrap();
    assert_eq!(version, 1, "schema_version should be 1");

    let journal: String = conn
        .query_row("PRAGMA journal_mode", [], |r| r.get(0))
        .unwrap();
    assert_eq!(journal, "wal", "journal_mode should be wal");

    let key_type: String = conn
        .query_row(
            "SELECT type FROM pragma_table_info('kv') WHERE name = 'key'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(key_type, "TEXT", "kv.key should be TEXT");
}

#[test]
fn reopening_does_not_rerun_migration() {
    let (_dir, path) = temp_db_path();
    drop(db::open_db(&path).unwrap());
    let conn = db::open_db(&path).unwrap();

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |r| r.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn kv_values_persist_across_connections() {
    let (_dir, path) = temp_db_path();
    {
        let mut store = SqliteStore::open(&path).unwrap();
        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        store.set("b", "x").unwrap();
        store.remove("b").unwrap();
        store.remove("missing").unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
    assert_eq!(store.get("b").unwrap(), None);
}

#[test]
fn full_session_lifecycle_across_restarts() {
    let (_dir, path) = temp_db_path();

    // First launch: nothing stored.
    let mut nav = Navigator::restore(SqliteStore::open(&path).unwrap());
    assert_eq!(nav.screen(), Screen::Home);
    nav.request_login();
    nav.submit_credentials("qa@example.com", "hunter2").unwrap();
    assert_eq!(nav.screen(), Screen::RoleSelect);
    drop(nav);

    // Second launch: signed in, no role yet.
    let mut nav = Navigator::restore(SqliteStore::open(&path).unwrap());
    assert_eq!(nav.screen(), Screen::RoleSelect);
    nav.select_role(Role::Tester).unwrap();
    let stored = nav.into_backend().get(SESSION_KEY).unwrap().unwrap();
    assert!(stored.contains(r#""role":"tester""#));
    assert!(!stored.contains("hunter2"), "password must never be stored");

    // Third launch: straight to the workspace, then sign out.
    let mut nav = Navigator::restore(SqliteStore::open(&path).unwrap());
    assert_eq!(nav.screen(), Screen::Workspace);
    assert_eq!(nav.session().unwrap().email, "qa@example.com");
    nav.logout().unwrap();
    drop(nav);

    // Fourth launch: back home.
    let nav = Navigator::restore(SqliteStore::open(&path).unwrap());
    assert_eq!(nav.screen(), Screen::Home);
}

#[test]
fn malformed_stored_session_starts_at_home() {
    let (_dir, path) = temp_db_path();
    {
        let mut store = SqliteStore::open(&path).unwrap();
        store.set(SESSION_KEY, "{\"id\": 1,").unwrap();
    }
    let nav = Navigator::restore(SqliteStore::open(&path).unwrap());
    assert_eq!(nav.screen(), Screen::Home);
}
