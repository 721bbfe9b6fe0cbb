//! Local stand-in for the analysis backend.
//!
//! Produces fixed, role-shaped sample data. Timing is the caller's concern:
//! the binary's worker thread sleeps [`ANALYSIS_DELAY`] before calling
//! [`analyze`], which itself is instantaneous and infallible.

use std::time::Duration;

use crate::types::{
    AnalysisRequest, AnalysisResult, AnalysisSummary, BugReport, BugStats, FeatureValidation,
    Findings, FunctionalTest, PerformanceTest, Role, SecurityTest, Severity, TestStatus,
    TimelineEntry,
};

/// Simulated analysis latency.
pub const ANALYSIS_DELAY: Duration = Duration::from_millis(3000);

/// Simulated API-key round trip.
pub const KEY_CHECK_DELAY: Duration = Duration::from_millis(1000);

/// Keys longer than this many characters are accepted by [`check_api_key`].
pub const MIN_KEY_LEN: usize = 10;

/// Builds the sample result for `role`, echoing the request's code, prompt, and
/// language into the summary.
pub fn analyze(role: Role, request: &AnalysisRequest, timestamp: i64) -> AnalysisResult {
    let summary = AnalysisSummary {
        timestamp,
        code: request.code.clone(),
        prompt: request.prompt.clone(),
        language: request.language,
    };
    let findings = match role {
        Role::Tester => tester_findings(),
        Role::Developer => developer_findings(request),
        Role::ProductOwner => product_owner_findings(),
    };
    AnalysisResult { summary, findings }
}

/// Length-only key validation. A blank key is never valid.
pub fn check_api_key(key: &str) -> bool {
    key.trim().chars().count() > MIN_KEY_LEN
}

fn tester_findings() -> Findings {
    Findings::Tester {
        functional: vec![
            FunctionalTest { id: 1, name: "Valid input handling".into(), status: TestStatus::Pass, coverage: 85 },
            FunctionalTest { id: 2, name: "Edge case: empty input".into(), status: TestStatus::Fail, coverage: 90 },
            FunctionalTest { id: 3, name: "Error handling".into(), status: TestStatus::Pass, coverage: 75 },
        ],
        security: vec![
            SecurityTest { id: 1, name: "SQL injection check".into(), status: TestStatus::Pass, severity: Severity::High },
            SecurityTest { id: 2, name: "XSS vulnerability".into(), status: TestStatus::Warning, severity: Severity::Medium },
        ],
        performance: vec![
            PerformanceTest { id: 1, name: "Load time analysis".into(), result: "120ms".into(), status: "good".into() },
            PerformanceTest { id: 2, name: "Memory usage".into(), result: "45MB".into(), status: "optimal".into() },
        ],
    }
}

fn developer_findings(request: &AnalysisRequest) -> Findings {
    let c = request.language.comment_prefix();
    let corrected_code = format!(
        "{c} Optimized version\n{}\n{c} Added error handling and performance improvements",
        request.code.trim_end()
    );
    Findings::Developer {
        corrected_code,
        bugs: vec![
            BugReport { line: 15, severity: Severity::High, message: "Potential null pointer exception".into() },
            BugReport { line: 23, severity: Severity::Medium, message: "Inefficient loop structure".into() },
        ],
        suggestions: vec![
            "Add input validation".into(),
            "Implement proper error handling".into(),
            "Consider using async/await pattern".into(),
        ],
    }
}

fn product_owner_findings() -> Findings {
    Findings::ProductOwner {
        bug_stats: BugStats { total: 12, high: 3, medium: 5, low: 4 },
        feature_validation: FeatureValidation { implemented: 8, missing: 2, score: 80 },
        timeline: vec![
            TimelineEntry { date: "2024-01-15".into(), bugs: 15, fixed: 12 },
            TimelineEntry { date: "2024-01-16".into(), bugs: 12, fixed: 8 },
        ],
    }
}
