//! qa-assistant-core: session, navigation, and analysis state for QA Assistant.
//!
//! Everything here is UI-agnostic and synchronous. The terminal front end in
//! the `qa-assistant` crate owns the event loop and feeds user intents into
//! [`nav::Navigator`] and [`gate::SubmissionGate`].

pub mod db;
pub mod gate;
pub mod mock;
pub mod nav;
pub mod schema;
pub mod sections;
pub mod session;
pub mod store;
pub mod types;
