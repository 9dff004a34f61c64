// src/domain/wizard.rs

use std::collections::BTreeSet;

use crate::domain::draft::{DraftPatch, ListingDraft};

/// The authoring wizard's steps, in the order a host walks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    General,
    Location,
    Photos,
    Pricing,
    Availability,
    Calendar,
    Bedrooms,
    Description,
    StayDetails,
    Sustainability,
    HouseRules,
}

impl Step {
    pub const ALL: [Step; 11] = [
        Step::General,
        Step::Location,
        Step::Photos,
        Step::Pricing,
        Step::Availability,
        Step::Calendar,
        Step::Bedrooms,
        Step::Description,
        Step::StayDetails,
        Step::Sustainability,
        Step::HouseRules,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Step::General => "general",
            Step::Location => "location",
            Step::Photos => "photos",
            Step::Pricing => "pricing",
            Step::Availability => "availability",
            Step::Calendar => "calendar",
            Step::Bedrooms => "bedrooms",
            Step::Description => "description",
            Step::StayDetails => "stay_details",
            Step::Sustainability => "sustainability",
            Step::HouseRules => "house_rules",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::General => "General",
            Step::Location => "Location",
            Step::Photos => "Photos",
            Step::Pricing => "Pricing",
            Step::Availability => "Availability",
            Step::Calendar => "Calendar",
            Step::Bedrooms => "Bedrooms",
            Step::Description => "Description",
            Step::StayDetails => "Stay details",
            Step::Sustainability => "Sustainability",
            Step::HouseRules => "House rules",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Step> {
        Step::ALL.iter().copied().find(|s| s.slug() == slug)
    }

    /// The step after this one in the fixed order; `None` on the last step.
    pub fn next(self) -> Option<Step> {
        let idx = Step::ALL.iter().position(|s| *s == self)?;
        Step::ALL.get(idx + 1).copied()
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }
}

/// One host's wizard session: the draft, where they are, and which steps
/// they've been through. Completion is advisory: any step is reachable
/// from the sidebar and no step gates on filled-in fields.
#[derive(Debug, Clone)]
pub struct WizardState {
    pub current: Step,
    completed: BTreeSet<Step>,
    pub draft: ListingDraft,
    /// Bumped on every draft change so views can tell stale snapshots apart.
    pub version: u64,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            current: Step::General,
            completed: BTreeSet::new(),
            draft: ListingDraft::default(),
            version: 0,
        }
    }

    /// Sidebar navigation: jump anywhere, unconditionally. Does not touch
    /// the completed set.
    pub fn visit(&mut self, step: Step) {
        self.current = step;
    }

    /// Apply a section patch to the draft.
    pub fn update(&mut self, patch: DraftPatch) {
        self.draft.apply(patch);
        self.version += 1;
    }

    /// The "Next" action: mark the current step done and move to the next
    /// one in order. On the last step there is nowhere to go; publishing is
    /// a separate action, not a step.
    pub fn advance(&mut self) {
        self.completed.insert(self.current);
        if let Some(next) = self.current.next() {
            self.current = next;
        }
    }

    pub fn is_completed(&self, step: Step) -> bool {
        self.completed.contains(&step)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::{DraftPatch, GeneralFacts};

    #[test]
    fn steps_are_eleven_in_fixed_order() {
        assert_eq!(Step::ALL.len(), 11);
        assert_eq!(Step::ALL[0], Step::General);
        assert_eq!(Step::ALL[10], Step::HouseRules);
        // slug round-trip over the whole order
        for step in Step::ALL {
            assert_eq!(Step::from_slug(step.slug()), Some(step));
        }
        assert_eq!(Step::from_slug("payment"), None);
    }

    #[test]
    fn advance_always_lands_on_the_next_step_in_order() {
        let mut state = WizardState::new();
        for (i, step) in Step::ALL.iter().enumerate() {
            assert_eq!(state.current, *step);
            state.advance();
            match Step::ALL.get(i + 1) {
                Some(next) => assert_eq!(state.current, *next),
                None => assert_eq!(state.current, Step::HouseRules), // stays put
            }
        }
        assert_eq!(state.completed_count(), 11);
    }

    #[test]
    fn advance_marks_only_the_current_step() {
        let mut state = WizardState::new();
        state.advance(); // completes General
        assert!(state.is_completed(Step::General));
        for step in &Step::ALL[1..] {
            assert!(!state.is_completed(*step));
        }
    }

    #[test]
    fn visiting_does_not_alter_the_completed_set() {
        let mut state = WizardState::new();
        state.advance();
        state.advance(); // General, Location done; now on Photos

        state.visit(Step::Sustainability);
        assert_eq!(state.current, Step::Sustainability);
        assert!(state.is_completed(Step::General));
        assert!(state.is_completed(Step::Location));
        assert_eq!(state.completed_count(), 2);

        // Jumping backward doesn't un-complete anything either.
        state.visit(Step::General);
        assert_eq!(state.completed_count(), 2);
    }

    #[test]
    fn completing_a_later_step_keeps_earlier_completions() {
        let mut state = WizardState::new();
        state.advance(); // General done
        state.visit(Step::HouseRules);
        state.advance(); // HouseRules done, no next step
        assert!(state.is_completed(Step::General));
        assert!(state.is_completed(Step::HouseRules));
        assert_eq!(state.current, Step::HouseRules);
    }

    #[test]
    fn update_bumps_version() {
        let mut state = WizardState::new();
        assert_eq!(state.version, 0);
        state.update(DraftPatch::General(GeneralFacts {
            name: "Alder Creek Hut".into(),
            property_type: "cabin".into(),
            summary: String::new(),
        }));
        assert_eq!(state.version, 1);
        assert_eq!(state.draft.general.name, "Alder Creek Hut");
    }
}
