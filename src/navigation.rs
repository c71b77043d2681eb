//! Step navigation gated by an injected completeness check.

use assist_core::{CompletenessCheck, FormStore};
use assist_domain::StepIndex;
use tracing::debug;

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Moved { from: StepIndex, to: StepIndex },
    /// The current step failed validation or is not complete.
    Blocked { step: StepIndex },
    /// Already on the first (retreat) or last (advance) step.
    AtBoundary { step: StepIndex },
}

impl NavOutcome {
    pub fn moved(self) -> bool {
        matches!(self, NavOutcome::Moved { .. })
    }
}

#[derive(Clone)]
pub struct Navigator {
    current: StepIndex,
    is_complete: CompletenessCheck,
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl Navigator {
    pub fn new(is_complete: CompletenessCheck) -> Self {
        Self {
            current: StepIndex::FIRST,
            is_complete,
        }
    }

    pub fn current(&self) -> StepIndex {
        self.current
    }

    /// Jumps straight to `step`. Only used when restoring a saved session.
    pub fn set_current(&mut self, step: StepIndex) {
        self.current = step;
    }

    pub fn reset(&mut self) {
        self.current = StepIndex::FIRST;
    }

    pub fn is_current_complete(&self, store: &FormStore) -> bool {
        self.is_step_complete(self.current, store)
    }

    pub fn is_step_complete(&self, step: StepIndex, store: &FormStore) -> bool {
        (self.is_complete)(step, store.record(), store.errors())
    }

    /// Force-validates the current step, then moves forward if it is complete.
    pub fn advance(&mut self, store: &mut FormStore) -> NavOutcome {
        let from = self.current;
        let Some(to) = from.next() else {
            return NavOutcome::AtBoundary { step: from };
        };

        store.validate_step(from);
        if !self.is_step_complete(from, store) {
            debug!(step = %from, "advance blocked by incomplete step");
            return NavOutcome::Blocked { step: from };
        }

        self.current = to;
        debug!(from = %from, to = %to, "advanced");
        NavOutcome::Moved { from, to }
    }

    /// Earliest step the injected check reports as incomplete.
    pub fn first_incomplete_step(&self, store: &FormStore) -> Option<StepIndex> {
        StepIndex::all()
            .into_iter()
            .find(|step| !self.is_step_complete(*step, store))
    }

    /// Moves back one step; never validates.
    pub fn retreat(&mut self) -> NavOutcome {
        let from = self.current;
        match from.previous() {
            Some(to) => {
                self.current = to;
                debug!(from = %from, to = %to, "retreated");
                NavOutcome::Moved { from, to }
            }
            None => NavOutcome::AtBoundary { step: from },
        }
    }
}
