//! Messages exchanged with the analysis worker thread.
//!
//! All types are fully owned and `Send` so they can cross from the UI task to
//! the worker and back.

use std::time::Duration;

use qa_assistant_core::gate::{AnalysisError, Ticket};
use qa_assistant_core::types::{AnalysisRequest, AnalysisResult, Role};

/// Commands sent from the UI to the worker.
#[derive(Debug)]
pub enum AnalysisJob {
    /// Produce a role-shaped analysis for `request`.
    Analyze {
        ticket: Ticket,
        role: Role,
        request: AnalysisRequest,
    },
    /// Validate an API key.
    CheckKey { ticket: Ticket, key: String },
}

/// Results sent from the worker back to the UI.
///
/// Carried inside `AppEvent::Analysis(Box<AnalysisEvent>)`; the box keeps the
/// event enum small since a result can hold the full submitted code.
#[derive(Debug)]
pub enum AnalysisEvent {
    Completed {
        ticket: Ticket,
        outcome: Result<AnalysisResult, AnalysisError>,
    },
    KeyChecked { ticket: Ticket, valid: bool },
}

/// Simulated latencies, taken from config.
#[derive(Debug, Clone, Copy)]
pub struct WorkerDelays {
    pub analysis: Duration,
    pub key_check: Duration,
}
