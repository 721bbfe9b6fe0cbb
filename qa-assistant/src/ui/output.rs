//! Output panel: progress indicator, empty state, or the role-shaped result.
//!
//! A result is rendered as a stack of collapsible sections. Each header shows
//! `▾` when open and `▸` when closed; the header under the section cursor is
//! highlighted while the output pane has focus.

use qa_assistant_core::sections::Section;
use qa_assistant_core::types::{AnalysisResult, Findings, Role, Severity, TestStatus};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::app::{App, Pane, Workspace};
use crate::theme::Theme;
use super::layout::{panel_block, spinner};

/// Width of the feature-validation score bar, in cells.
const SCORE_BAR_WIDTH: usize = 20;

pub fn render_output(frame: &mut Frame, area: Rect, app: &App, ws: &Workspace) {
    let theme = &app.theme;
    let focused = ws.pane == Pane::Output;
    let title = match ws.gate.result().map(|r| r.findings.role()) {
        Some(Role::Tester) => "Test Analysis Results",
        Some(Role::Developer) => "Code Analysis Results",
        Some(Role::ProductOwner) => "Project Analytics",
        None => "Output",
    };
    let block = panel_block(title, focused, theme);

    let lines = if ws.gate.is_busy() {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{} Analyzing your code...", spinner(app.spinner_frame)),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("AI is processing your request", Style::default().fg(theme.muted))),
        ]
    } else {
        match ws.gate.result() {
            Some(result) => result_lines(result, ws, focused, theme),
            None => vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Ready to analyze",
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Submit your code to get AI-powered insights",
                    Style::default().fg(theme.muted),
                )),
            ],
        }
    };

    let centered = ws.gate.result().is_none() || ws.gate.is_busy();
    let mut paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    if centered {
        paragraph = paragraph.centered();
    } else {
        paragraph = paragraph.scroll((ws.output_scroll, 0));
    }
    frame.render_widget(paragraph, area);
}

/// All lines of a result view, honoring which sections are open.
///
/// Sections come from the findings variant itself, so every section shown has
/// a body. Corrected code is taken from `ws.code_lines`, highlighted once when
/// the result arrived.
pub fn result_lines(
    result: &AnalysisResult,
    ws: &Workspace,
    focused: bool,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut view = SectionView { ws, focused, theme, lines: Vec::new() };
    let muted = Style::default().fg(theme.muted);
    match &result.findings {
        Findings::Tester { functional, security, performance } => {
            view.section(Section::Functional, |lines| {
                for test in functional {
                    lines.push(Line::from(vec![
                        Span::raw(format!("  {} ", test.name)),
                        Span::styled(format!("[{}]", test.status.label()), status_style(test.status, theme)),
                    ]));
                    lines.push(Line::from(Span::styled(format!("    Coverage: {}%", test.coverage), muted)));
                }
            });
            view.section(Section::Security, |lines| {
                for test in security {
                    lines.push(Line::from(vec![
                        Span::raw(format!("  {} ", test.name)),
                        Span::styled(format!("[{}]", test.status.label()), status_style(test.status, theme)),
                        Span::raw(" "),
                        Span::styled(test.severity.label(), severity_style(test.severity, theme)),
                    ]));
                }
            });
            view.section(Section::Performance, |lines| {
                for test in performance {
                    lines.push(Line::from(vec![
                        Span::raw(format!("  {} ", test.name)),
                        Span::styled(format!("[{}]", test.status), Style::default().fg(theme.status_pass)),
                    ]));
                    lines.push(Line::from(Span::styled(format!("    Result: {}", test.result), muted)));
                }
            });
        }
        Findings::Developer { bugs, suggestions, .. } => {
            view.section(Section::CorrectedCode, |lines| {
                for line in &ws.code_lines {
                    let mut spans = vec![Span::raw("  ")];
                    spans.extend(line.spans.iter().cloned());
                    lines.push(Line::from(spans));
                }
            });
            view.section(Section::Bugs, |lines| {
                for bug in bugs {
                    lines.push(Line::from(vec![
                        Span::raw(format!("  Line {} ", bug.line)),
                        Span::styled(bug.severity.label(), severity_style(bug.severity, theme)),
                    ]));
                    lines.push(Line::from(Span::styled(format!("    {}", bug.message), muted)));
                }
            });
            view.section(Section::Suggestions, |lines| {
                for suggestion in suggestions {
                    lines.push(Line::from(vec![
                        Span::styled("  • ", Style::default().fg(theme.accent)),
                        Span::raw(suggestion.clone()),
                    ]));
                }
            });
        }
        Findings::ProductOwner { bug_stats, feature_validation: fv, timeline } => {
            view.section(Section::BugStats, |lines| {
                lines.push(Line::from(format!("  Total Bugs       {}", bug_stats.total)));
                lines.push(Line::from(Span::styled(
                    format!("  High Priority    {}", bug_stats.high),
                    severity_style(Severity::High, theme),
                )));
                lines.push(Line::from(Span::styled(
                    format!("  Medium Priority  {}", bug_stats.medium),
                    severity_style(Severity::Medium, theme),
                )));
                lines.push(Line::from(Span::styled(
                    format!("  Low Priority     {}", bug_stats.low),
                    severity_style(Severity::Low, theme),
                )));
            });
            view.section(Section::FeatureValidation, |lines| {
                lines.push(Line::from(vec![
                    Span::raw("  Implementation Score "),
                    Span::styled(format!("{}%", fv.score), Style::default().fg(theme.accent)),
                ]));
                lines.push(Line::from(Span::styled(
                    format!("  {}", score_bar(fv.score)),
                    Style::default().fg(theme.status_pass),
                )));
                lines.push(Line::from(format!("  Implemented {}   Missing {}", fv.implemented, fv.missing)));
            });
            view.section(Section::Timeline, |lines| {
                for entry in timeline {
                    lines.push(Line::from(vec![
                        Span::raw(format!("  {}  ", entry.date)),
                        Span::styled(format!("{} bugs", entry.bugs), severity_style(Severity::Medium, theme)),
                        Span::raw("  "),
                        Span::styled(format!("{} fixed", entry.fixed), Style::default().fg(theme.status_pass)),
                    ]));
                }
            });
        }
    }
    view.lines
}

/// Accumulates section headers and, for open sections, their bodies.
struct SectionView<'a> {
    ws: &'a Workspace,
    focused: bool,
    theme: &'a Theme,
    lines: Vec<Line<'static>>,
}

impl SectionView<'_> {
    fn section(&mut self, section: Section, body: impl FnOnce(&mut Vec<Line<'static>>)) {
        let open = self.ws.sections.is_open(section);
        let marker = if open { "▾" } else { "▸" };
        let mut style = Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD);
        if self.focused && self.ws.sections.selected() == section {
            style = style.add_modifier(Modifier::REVERSED);
        }
        self.lines.push(Line::from(Span::styled(format!("{marker} {}", section.title()), style)));
        if open {
            body(&mut self.lines);
        }
        self.lines.push(Line::from(""));
    }
}

fn status_style(status: TestStatus, theme: &Theme) -> Style {
    let fg = match status {
        TestStatus::Pass => theme.status_pass,
        TestStatus::Fail => theme.status_fail,
        TestStatus::Warning => theme.status_warning,
    };
    Style::default().fg(fg)
}

fn severity_style(severity: Severity, theme: &Theme) -> Style {
    let fg = match severity {
        Severity::High => theme.severity_high,
        Severity::Medium => theme.severity_medium,
        Severity::Low => theme.severity_low,
    };
    Style::default().fg(fg)
}

/// `score` percent rendered as a fixed-width bar.
fn score_bar(score: u8) -> String {
    let filled = (usize::from(score.min(100)) * SCORE_BAR_WIDTH).div_ceil(100);
    format!("{}{}", "█".repeat(filled), "░".repeat(SCORE_BAR_WIDTH - filled))
}
