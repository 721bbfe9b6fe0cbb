use serde::{Deserialize, Serialize};

/// The user's primary role, chosen once after login.
///
/// Serialized as `"developer"`, `"tester"`, or `"po"` so stored session
/// records keep the same shape across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Developer,
    Tester,
    #[serde(rename = "po")]
    ProductOwner,
}

impl Role {
    /// All roles in the order the role selector presents them.
    pub const ALL: [Role; 3] = [Role::Developer, Role::Tester, Role::ProductOwner];

    /// Human-readable name for headers and the role selector.
    pub fn label(self) -> &'static str {
        match self {
            Role::Developer => "Developer",
            Role::Tester => "Tester",
            Role::ProductOwner => "Product Owner",
        }
    }

    /// One-line pitch shown under the role name in the selector.
    pub fn description(self) -> &'static str {
        match self {
            Role::Developer => "Get code analysis, bug fixes, and optimization suggestions",
            Role::Tester => "Generate comprehensive test cases and validation strategies",
            Role::ProductOwner => "View project insights, bug analytics, and feature validation",
        }
    }

    /// Feature bullets listed on the role card.
    pub fn features(self) -> [&'static str; 4] {
        match self {
            Role::Developer => [
                "Code review",
                "Bug detection",
                "Performance analysis",
                "Security scan",
            ],
            Role::Tester => [
                "Test case generation",
                "Edge case detection",
                "API testing",
                "Coverage analysis",
            ],
            Role::ProductOwner => [
                "Bug analytics",
                "Feature validation",
                "Progress tracking",
                "Quality metrics",
            ],
        }
    }
}

/// The persisted identity + role record for the current user.
///
/// `role` is `None` until the user picks one on the role selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub id: String,    // UUID v4 text
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Where the code under analysis comes from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMethod {
    /// Code typed or pasted into the editor.
    #[default]
    Paste,
    /// A repository URL; carried in `AnalysisRequest::code`.
    Github,
    /// A local file path whose contents become `AnalysisRequest::code`.
    Upload,
}

impl InputMethod {
    pub const ALL: [InputMethod; 3] = [InputMethod::Paste, InputMethod::Github, InputMethod::Upload];

    pub fn label(self) -> &'static str {
        match self {
            InputMethod::Paste => "Paste Code",
            InputMethod::Github => "GitHub URL",
            InputMethod::Upload => "Upload",
        }
    }

    /// Next tab in the cycle Paste → Github → Upload → Paste.
    pub fn next(self) -> Self {
        match self {
            InputMethod::Paste => InputMethod::Github,
            InputMethod::Github => InputMethod::Upload,
            InputMethod::Upload => InputMethod::Paste,
        }
    }
}

/// Programming language of the submitted code.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    JavaScript,
    Python,
    Java,
    CSharp,
    Go,
    Rust,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::JavaScript,
        Language::Python,
        Language::Java,
        Language::CSharp,
        Language::Go,
        Language::Rust,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::CSharp => "C#",
            Language::Go => "Go",
            Language::Rust => "Rust",
        }
    }

    /// File extension used to pick a syntax definition for highlighting.
    pub fn extension(self) -> &'static str {
        match self {
            Language::JavaScript => "js",
            Language::Python => "py",
            Language::Java => "java",
            Language::CSharp => "cs",
            Language::Go => "go",
            Language::Rust => "rs",
        }
    }

    /// Line-comment prefix, used when annotating corrected code.
    pub fn comment_prefix(self) -> &'static str {
        match self {
            Language::Python => "#",
            _ => "//",
        }
    }

    /// Next language in selector order, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// One analysis submission as it leaves the workspace input panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub input_method: InputMethod,
    /// Source code, repository URL, or uploaded file contents depending on
    /// `input_method`.
    pub code: String,
    pub prompt: String,
    pub language: Language,
    pub api_key: Option<String>,
}

/// Outcome of a single generated test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pass,
    Fail,
    Warning,
}

impl TestStatus {
    pub fn label(self) -> &'static str {
        match self {
            TestStatus::Pass => "pass",
            TestStatus::Fail => "fail",
            TestStatus::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionalTest {
    pub id: u32,
    pub name: String,
    pub status: TestStatus,
    pub coverage: u8, // percent
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityTest {
    pub id: u32,
    pub name: String,
    pub status: TestStatus,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceTest {
    pub id: u32,
    pub name: String,
    /// Measured value as displayed, e.g. `"120ms"`.
    pub result: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugReport {
    pub line: u32,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugStats {
    pub total: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureValidation {
    pub implemented: u32,
    pub missing: u32,
    pub score: u8, // percent
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub date: String,
    pub bugs: u32,
    pub fixed: u32,
}

/// Fields shared by every result regardless of role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub timestamp: i64, // Unix timestamp seconds
    pub code: String,
    pub prompt: String,
    pub language: Language,
}

/// Role-specific payload of an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Findings {
    Tester {
        functional: Vec<FunctionalTest>,
        security: Vec<SecurityTest>,
        performance: Vec<PerformanceTest>,
    },
    Developer {
        corrected_code: String,
        bugs: Vec<BugReport>,
        suggestions: Vec<String>,
    },
    #[serde(rename = "po")]
    ProductOwner {
        bug_stats: BugStats,
        feature_validation: FeatureValidation,
        timeline: Vec<TimelineEntry>,
    },
}

impl Findings {
    /// The role this payload was shaped for.
    pub fn role(&self) -> Role {
        match self {
            Findings::Tester { .. } => Role::Tester,
            Findings::Developer { .. } => Role::Developer,
            Findings::ProductOwner { .. } => Role::ProductOwner,
        }
    }
}

/// A complete analysis as displayed in the workspace output panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: AnalysisSummary,
    pub findings: Findings,
}
