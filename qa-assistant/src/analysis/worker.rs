//! Background thread that answers analysis jobs.
//!
//! Jobs are handled one at a time in arrival order. The thread exits when every
//! `AnalysisClient` (sender) has been dropped.

use std::time::{SystemTime, UNIX_EPOCH};

use crossbeam_channel::Receiver;
use qa_assistant_core::mock;
use tokio::sync::mpsc::UnboundedSender;

use crate::analysis::types::{AnalysisEvent, AnalysisJob, WorkerDelays};
use crate::event::AppEvent;

/// Entry point for the worker thread.
///
/// Sleeps the configured delay for each job, then sends the mock answer back
/// via `event_tx`. Send failures mean the UI has shut down; the loop keeps
/// draining until the job channel closes.
pub fn analysis_worker_loop(
    rx: Receiver<AnalysisJob>,
    event_tx: UnboundedSender<AppEvent>,
    delays: WorkerDelays,
) {
    for job in rx {
        let event = handle_job(job, delays);
        let _ = event_tx.send(AppEvent::Analysis(Box::new(event)));
    }
    tracing::debug!("analysis worker exiting");
}

fn handle_job(job: AnalysisJob, delays: WorkerDelays) -> AnalysisEvent {
    match job {
        AnalysisJob::Analyze { ticket, role, request } => {
            std::thread::sleep(delays.analysis);
            let result = mock::analyze(role, &request, now_secs());
            AnalysisEvent::Completed { ticket, outcome: Ok(result) }
        }
        AnalysisJob::CheckKey { ticket, key } => {
            std::thread::sleep(delays.key_check);
            AnalysisEvent::KeyChecked { ticket, valid: mock::check_api_key(&key) }
        }
    }
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use qa_assistant_core::gate::{AnalysisProducer, Ticket};
    use qa_assistant_core::types::{AnalysisRequest, Findings, InputMethod, Language, Role};

    use crate::analysis::AnalysisClient;

    fn instant_delays() -> WorkerDelays {
        WorkerDelays { analysis: Duration::ZERO, key_check: Duration::ZERO }
    }

    #[test]
    fn worker_answers_each_job_in_order() {
        let (job_tx, job_rx) = crossbeam_channel::unbounded();
        let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel();
        let handle = std::thread::spawn(move || analysis_worker_loop(job_rx, event_tx, instant_delays()));

        let mut client = AnalysisClient::new(job_tx);
        let analyze_ticket = Ticket::new();
        let key_ticket = Ticket::new();
        client.dispatch(
            analyze_ticket,
            Role::Developer,
            AnalysisRequest {
                input_method: InputMethod::Paste,
                code: "x = 1".into(),
                prompt: "assign".into(),
                language: Language::Python,
                api_key: None,
            },
        );
        client.check_key(key_ticket, "short".into());
        drop(client);
        handle.join().unwrap();

        match event_rx.try_recv().unwrap() {
            AppEvent::Analysis(ev) => match *ev {
                AnalysisEvent::Completed { ticket, outcome } => {
                    assert_eq!(ticket, analyze_ticket);
                    let result = outcome.unwrap();
                    assert!(matches!(result.findings, Findings::Developer { .. }));
                    assert_eq!(result.summary.code, "x = 1");
                }
                other => panic!("unexpected event {other:?}"),
            },
            other => panic!("unexpected event {other:?}"),
        }
        match event_rx.try_recv().unwrap() {
            AppEvent::Analysis(ev) => {
                assert!(matches!(*ev, AnalysisEvent::KeyChecked { ticket, valid: false } if ticket == key_ticket));
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(event_rx.try_recv().is_err());
    }
}
