//! Submission gate between the workspace input panel and the analysis producer.
//!
//! The gate validates a request, allows a single in-flight analysis at a time,
//! and applies exactly one completion per accepted submission. Completions are
//! matched by [`Ticket`]: anything carrying a ticket other than the in-flight
//! one (stale, cancelled, or timed out) is discarded.

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::types::{AnalysisRequest, AnalysisResult, Role};

/// Identity of one dispatched analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(uuid::Uuid);

impl Ticket {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for Ticket {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reasons a submission is refused before it reaches the producer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Please provide code or GitHub URL")]
    MissingSource,

    #[error("Please describe what your code should do")]
    MissingPrompt,

    #[error("an analysis is already running")]
    Busy,
}

/// Failures a producer may report for an accepted submission.
///
/// The mock producer never fails; a networked producer maps its transport and
/// API errors onto these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("analysis timed out after {0:?}")]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(String),

    #[error("the API key was rejected")]
    InvalidApiKey,

    #[error("rate limited; try again later")]
    RateLimited,
}

/// Something that can start an analysis and later report back with the ticket.
pub trait AnalysisProducer {
    /// Starts an analysis. Must eventually deliver exactly one completion for
    /// `ticket` to [`SubmissionGate::complete`], unless the gate has since
    /// dropped the ticket.
    fn dispatch(&mut self, ticket: Ticket, role: Role, request: AnalysisRequest);
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    ticket: Ticket,
    started: Instant,
}

/// Per-workspace submission state.
#[derive(Debug)]
pub struct SubmissionGate {
    timeout: Duration,
    in_flight: Option<InFlight>,
    result: Option<AnalysisResult>,
    error: Option<String>,
}

/// Checks the request fields the gate requires.
///
/// # Errors
///
/// `MissingSource` if the code/URL is blank, `MissingPrompt` if the prompt is
/// blank. Source is checked first.
pub fn validate(request: &AnalysisRequest) -> Result<(), SubmitError> {
    if request.code.trim().is_empty() {
        return Err(SubmitError::MissingSource);
    }
    if request.prompt.trim().is_empty() {
        return Err(SubmitError::MissingPrompt);
    }
    Ok(())
}

impl SubmissionGate {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout, in_flight: None, result: None, error: None }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Last user-visible error from validation or the producer.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Validates `request` and, if accepted, dispatches it to `producer`.
    ///
    /// While busy, returns `Busy` without touching state or the producer.
    /// Validation failures are also stored as the current error.
    pub fn submit<P: AnalysisProducer + ?Sized>(
        &mut self,
        role: Role,
        request: AnalysisRequest,
        producer: &mut P,
    ) -> Result<Ticket, SubmitError> {
        if self.is_busy() {
            return Err(SubmitError::Busy);
        }
        if let Err(e) = validate(&request) {
            self.error = Some(e.to_string());
            return Err(e);
        }
        let ticket = Ticket::new();
        self.error = None;
        self.in_flight = Some(InFlight { ticket, started: Instant::now() });
        tracing::info!(%ticket, ?role, method = ?request.input_method, "analysis dispatched");
        producer.dispatch(ticket, role, request);
        Ok(ticket)
    }

    /// Records a submission-side error that never reached the gate, e.g. an
    /// unreadable upload path.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Applies a producer completion.
    ///
    /// Returns `false` (and changes nothing) if `ticket` is not the in-flight
    /// ticket. On success the result replaces the previous one wholesale; on
    /// failure the previous result is kept and the error is recorded.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<AnalysisResult, AnalysisError>) -> bool {
        match self.in_flight {
            Some(f) if f.ticket == ticket => {}
            _ => {
                tracing::debug!(%ticket, "discarding stale analysis completion");
                return false;
            }
        }
        self.in_flight = None;
        match outcome {
            Ok(result) => {
                tracing::info!(%ticket, "analysis completed");
                self.result = Some(result);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(%ticket, error = %e, "analysis failed");
                self.error = Some(e.to_string());
            }
        }
        true
    }

    /// Fails the in-flight request if it has run longer than the timeout.
    ///
    /// Returns `true` if a timeout fired.
    pub fn poll_timeout(&mut self, now: Instant) -> bool {
        let Some(f) = self.in_flight else {
            return false;
        };
        if now.saturating_duration_since(f.started) < self.timeout {
            return false;
        }
        self.complete(f.ticket, Err(AnalysisError::Timeout(self.timeout)))
    }

    /// Drops the in-flight ticket so its completion is ignored.
    pub fn cancel(&mut self) {
        if let Some(f) = self.in_flight.take() {
            tracing::info!(ticket = %f.ticket, "analysis cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;
    use crate::types::{InputMethod, Language};

    #[derive(Default)]
    struct RecordingProducer {
        dispatched: Vec<(Ticket, Role, AnalysisRequest)>,
    }

    impl AnalysisProducer for RecordingProducer {
        fn dispatch(&mut self, ticket: Ticket, role: Role, request: AnalysisRequest) {
            self.dispatched.push((ticket, role, request));
        }
    }

    fn request(code: &str, prompt: &str) -> AnalysisRequest {
        AnalysisRequest {
            input_method: InputMethod::Paste,
            code: code.to_owned(),
            prompt: prompt.to_owned(),
            language: Language::Rust,
            api_key: None,
        }
    }

    fn gate() -> SubmissionGate {
        SubmissionGate::new(Duration::from_secs(30))
    }

    #[test]
    fn rejects_missing_fields() {
        let mut gate = gate();
        let mut producer = RecordingProducer::default();

        let err = gate.submit(Role::Tester, request("", ""), &mut producer).unwrap_err();
        assert_eq!(err, SubmitError::MissingSource);
        let err = gate.submit(Role::Tester, request("x", ""), &mut producer).unwrap_err();
        assert_eq!(err, SubmitError::MissingPrompt);
        let err = gate.submit(Role::Tester, request("  \n", "y"), &mut producer).unwrap_err();
        assert_eq!(err, SubmitError::MissingSource);

        assert!(producer.dispatched.is_empty());
        assert!(!gate.is_busy());
        assert_eq!(gate.error(), Some("Please provide code or GitHub URL"));
    }

    #[test]
    fn accepted_submission_completes_once() {
        let mut gate = gate();
        let mut producer = RecordingProducer::default();

        let ticket = gate.submit(Role::Tester, request("x", "y"), &mut producer).unwrap();
        assert!(gate.is_busy());
        assert_eq!(producer.dispatched.len(), 1);

        let (_, role, req) = &producer.dispatched[0];
        let result = mock::analyze(*role, req, 0);
        assert!(gate.complete(ticket, Ok(result.clone())));
        assert!(!gate.is_busy());
        assert_eq!(gate.result(), Some(&result));

        // A duplicate completion for the same ticket is ignored.
        assert!(!gate.complete(ticket, Ok(mock::analyze(Role::Developer, req, 1))));
        assert_eq!(gate.result(), Some(&result));
    }

    #[test]
    fn second_submit_while_busy_has_no_effect() {
        let mut gate = gate();
        let mut producer = RecordingProducer::default();

        gate.submit(Role::Developer, request("x", "y"), &mut producer).unwrap();
        let err = gate.submit(Role::Developer, request("a", "b"), &mut producer).unwrap_err();
        assert_eq!(err, SubmitError::Busy);
        assert_eq!(producer.dispatched.len(), 1);
        assert_eq!(gate.error(), None);
    }

    #[test]
    fn new_result_replaces_prior_result() {
        let mut gate = gate();
        let mut producer = RecordingProducer::default();

        let first = gate.submit(Role::Tester, request("one", "p"), &mut producer).unwrap();
        gate.complete(first, Ok(mock::analyze(Role::Tester, &request("one", "p"), 1)));
        let second = gate.submit(Role::Tester, request("two", "p"), &mut producer).unwrap();
        gate.complete(second, Ok(mock::analyze(Role::Tester, &request("two", "p"), 2)));

        assert_eq!(gate.result().unwrap().summary.code, "two");
    }

    #[test]
    fn cancelled_ticket_completion_is_discarded() {
        let mut gate = gate();
        let mut producer = RecordingProducer::default();

        let ticket = gate.submit(Role::Tester, request("x", "y"), &mut producer).unwrap();
        gate.cancel();
        assert!(!gate.is_busy());
        assert!(!gate.complete(ticket, Ok(mock::analyze(Role::Tester, &request("x", "y"), 0))));
        assert!(gate.result().is_none());
    }

    #[test]
    fn producer_error_keeps_prior_result_and_returns_to_idle() {
        let mut gate = gate();
        let mut producer = RecordingProducer::default();

        let first = gate.submit(Role::Tester, request("x", "y"), &mut producer).unwrap();
        gate.complete(first, Ok(mock::analyze(Role::Tester, &request("x", "y"), 0)));

        let second = gate.submit(Role::Tester, request("x2", "y"), &mut producer).unwrap();
        assert!(gate.complete(second, Err(AnalysisError::RateLimited)));
        assert!(!gate.is_busy());
        assert_eq!(gate.result().unwrap().summary.code, "x");
        assert_eq!(gate.error(), Some("rate limited; try again later"));
    }

    #[test]
    fn timeout_returns_gate_to_idle() {
        let mut gate = SubmissionGate::new(Duration::from_secs(10));
        let mut producer = RecordingProducer::default();

        let ticket = gate.submit(Role::Tester, request("x", "y"), &mut producer).unwrap();
        assert!(!gate.poll_timeout(Instant::now()));
        assert!(gate.poll_timeout(Instant::now() + Duration::from_secs(60)));
        assert!(!gate.is_busy());
        assert!(gate.error().unwrap().contains("timed out"));

        // The late completion no longer applies.
        assert!(!gate.complete(ticket, Ok(mock::analyze(Role::Tester, &request("x", "y"), 0))));
    }
}
