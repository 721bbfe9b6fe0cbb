//! Collapsible result sections for the workspace output panel.

use std::collections::BTreeSet;

use crate::types::Role;

/// One collapsible block of a role's result view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    // Tester
    Functional,
    Security,
    Performance,
    // Developer
    CorrectedCode,
    Bugs,
    Suggestions,
    // Product owner
    BugStats,
    FeatureValidation,
    Timeline,
}

impl Section {
    /// Sections shown for `role`, top to bottom.
    pub fn for_role(role: Role) -> &'static [Section] {
        match role {
            Role::Tester => &[Section::Functional, Section::Security, Section::Performance],
            Role::Developer => &[Section::CorrectedCode, Section::Bugs, Section::Suggestions],
            Role::ProductOwner => &[Section::BugStats, Section::FeatureValidation, Section::Timeline],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Functional => "Functional Test Cases",
            Section::Security => "Security Test Cases",
            Section::Performance => "Performance Test Cases",
            Section::CorrectedCode => "Corrected Code",
            Section::Bugs => "Bug Analysis",
            Section::Suggestions => "Suggestions",
            Section::BugStats => "Bug Statistics",
            Section::FeatureValidation => "Feature Validation",
            Section::Timeline => "Timeline",
        }
    }
}

/// Open/closed state for one role's sections, plus a header cursor.
///
/// Toggling is a plain membership flip with no coupling between sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSet {
    role: Role,
    open: BTreeSet<Section>,
    cursor: usize,
}

impl SectionSet {
    /// Starts with the role's first section open and the cursor on it.
    pub fn for_role(role: Role) -> Self {
        let open = Section::for_role(role).iter().copied().take(1).collect();
        Self { role, open, cursor: 0 }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn sections(&self) -> &'static [Section] {
        Section::for_role(self.role)
    }

    pub fn is_open(&self, section: Section) -> bool {
        self.open.contains(&section)
    }

    /// Flips `section`. Sections that do not belong to this role are ignored.
    pub fn toggle(&mut self, section: Section) {
        if !self.sections().contains(&section) {
            return;
        }
        if !self.open.remove(&section) {
            self.open.insert(section);
        }
    }

    /// Section under the cursor.
    pub fn selected(&self) -> Section {
        let sections = self.sections();
        sections[self.cursor.min(sections.len() - 1)]
    }

    pub fn toggle_selected(&mut self) {
        self.toggle(self.selected());
    }

    pub fn select_next(&mut self) {
        self.cursor = (self.cursor + 1).min(self.sections().len() - 1);
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_section_starts_open() {
        for role in Role::ALL {
            let set = SectionSet::for_role(role);
            let sections = set.sections();
            assert!(set.is_open(sections[0]));
            assert!(sections[1..].iter().all(|s| !set.is_open(*s)));
        }
    }

    #[test]
    fn toggle_twice_restores_state() {
        for role in Role::ALL {
            for &section in Section::for_role(role) {
                let mut set = SectionSet::for_role(role);
                let before = set.clone();
                set.toggle(section);
                assert_ne!(set.is_open(section), before.is_open(section));
                set.toggle(section);
                assert_eq!(set, before);
            }
        }
    }

    #[test]
    fn toggle_does_not_touch_other_sections() {
        let mut set = SectionSet::for_role(Role::Developer);
        set.toggle(Section::Bugs);
        assert!(set.is_open(Section::CorrectedCode));
        assert!(set.is_open(Section::Bugs));
        assert!(!set.is_open(Section::Suggestions));
    }

    #[test]
    fn foreign_sections_are_ignored() {
        let mut set = SectionSet::for_role(Role::Tester);
        set.toggle(Section::Timeline);
        assert!(!set.is_open(Section::Timeline));
    }

    #[test]
    fn cursor_clamps_at_both_ends() {
        let mut set = SectionSet::for_role(Role::ProductOwner);
        set.select_prev();
        assert_eq!(set.selected(), Section::BugStats);
        for _ in 0..5 {
            set.select_next();
        }
        assert_eq!(set.selected(), Section::Timeline);
        set.toggle_selected();
        assert!(set.is_open(Section::Timeline));
    }
}
