//! Background analysis producer for qa-assistant.
//!
//! The workspace never blocks on an analysis. `AnalysisClient` forwards jobs
//! over a crossbeam channel to a dedicated `std::thread` running
//! [`worker::analysis_worker_loop`], which posts completions back onto the
//! unified event bus as `AppEvent::Analysis`.
pub mod types;
pub mod worker;

use crossbeam_channel::Sender;
use qa_assistant_core::gate::{AnalysisProducer, Ticket};
use qa_assistant_core::types::{AnalysisRequest, Role};

use types::AnalysisJob;

/// Sending half of the worker channel; the workspace's [`AnalysisProducer`].
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    tx: Sender<AnalysisJob>,
}

impl AnalysisClient {
    pub fn new(tx: Sender<AnalysisJob>) -> Self {
        Self { tx }
    }

    /// Queues an API-key check; the answer arrives as `AnalysisEvent::KeyChecked`.
    pub fn check_key(&self, ticket: Ticket, key: String) {
        if self.tx.send(AnalysisJob::CheckKey { ticket, key }).is_err() {
            tracing::error!(%ticket, "analysis worker is gone; key check dropped");
        }
    }
}

impl AnalysisProducer for AnalysisClient {
    fn dispatch(&mut self, ticket: Ticket, role: Role, request: AnalysisRequest) {
        // A dead worker means no completion will ever arrive; the gate's
        // timeout returns the workspace to idle.
        if self.tx.send(AnalysisJob::Analyze { ticket, role, request }).is_err() {
            tracing::error!(%ticket, "analysis worker is gone; request dropped");
        }
    }
}
