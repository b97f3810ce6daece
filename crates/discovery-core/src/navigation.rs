//! Step Navigation Controller
//!
//! Linear state machine over the wizard steps. Continue is the only way
//! forward and is blocked while the current step has missing fields. Back is
//! never blocked. Sidebar jumps may only target completed steps or the
//! current one.

use crate::case::CaseRegistry;
use crate::error::NavigationError;
use crate::report::DiscoveryReport;
use crate::storage::KeyValueStore;
use crate::store::DiscoveryStore;
use crate::sync::CaseSyncBridge;
use chrono::{Local, NaiveDate};
use discovery_model::StepId;
use discovery_rules::{risk_label, seed_recommendation, MissingField, RiskLabel};
use std::collections::BTreeSet;

/// Step whose completion produces the client's risk label
pub const RISK_PROFILE_STEP: StepId = StepId(6);

/// Step on entry to which the recommendation narrative is seeded
pub const RECOMMENDATION_STEP: StepId = StepId(8);

/// Result of pressing Continue
#[derive(Debug, Clone, PartialEq)]
pub enum ContinueOutcome {
    /// Required fields are missing; nothing but the highlight flag changed
    Blocked {
        /// Step that was validated
        step: StepId,
        /// Unmet requirements in catalog order
        missing: Vec<MissingField>,
        /// Key of the first missing field, for scroll-to-focus
        focus: &'static str,
    },
    /// Step completed and the wizard moved on
    Advanced {
        /// Step just completed
        completed: StepId,
        /// Step now current
        next: StepId,
        /// Risk label, when the risk profile step was completed
        risk_label: Option<RiskLabel>,
    },
    /// Final step completed and the case handed off
    Finished {
        /// Read-only snapshot for export
        report: Box<DiscoveryReport>,
    },
}

impl ContinueOutcome {
    /// Whether Continue was refused
    #[inline]
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }
}

/// Steps the sidebar may jump to from `current`
#[must_use]
pub fn allowed_jumps(current: StepId, completed: &BTreeSet<StepId>) -> Vec<StepId> {
    StepId::all()
        .filter(|s| *s == current || completed.contains(s))
        .collect()
}

/// Validate a sidebar jump
///
/// # Errors
/// - [`NavigationError::StepOutOfRange`] for ids outside the catalog
/// - [`NavigationError::StepLocked`] for steps neither completed nor current
pub fn validate_jump(
    target: StepId,
    current: StepId,
    completed: &BTreeSet<StepId>,
) -> Result<(), NavigationError> {
    if !target.is_valid() {
        return Err(NavigationError::StepOutOfRange(target));
    }
    if allowed_jumps(current, completed).contains(&target) {
        Ok(())
    } else {
        Err(NavigationError::StepLocked { target, current })
    }
}

/// Drives a [`DiscoveryStore`] through the wizard and keeps the case in sync
#[derive(Debug)]
pub struct StepNavigator<R> {
    bridge: CaseSyncBridge<R>,
    as_of: Option<NaiveDate>,
}

impl<R: CaseRegistry> StepNavigator<R> {
    /// Navigator syncing to `registry`
    #[must_use]
    pub fn new(registry: R) -> Self {
        Self {
            bridge: CaseSyncBridge::new(registry),
            as_of: None,
        }
    }

    /// Pin the date used for ages, timeline dates and the report
    #[must_use]
    pub fn with_as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Case sync bridge
    #[inline]
    #[must_use]
    pub fn bridge(&self) -> &CaseSyncBridge<R> {
        &self.bridge
    }

    fn today(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Press Continue on the current step
    ///
    /// # Errors
    /// Returns [`NavigationError::StepOutOfRange`] if the store points at a
    /// step outside the catalog.
    pub fn continue_step<S: KeyValueStore>(
        &self,
        store: &mut DiscoveryStore<S>,
    ) -> Result<ContinueOutcome, NavigationError> {
        let step = store.current_step();
        if !step.is_valid() {
            return Err(NavigationError::StepOutOfRange(step));
        }

        let missing = store.missing_fields(step);
        if let Some(first) = missing.first() {
            let focus = first.key;
            store.set_highlight_missing(true);
            tracing::info!(step = %step, missing = missing.len(), focus, "continue blocked");
            return Ok(ContinueOutcome::Blocked {
                step,
                missing,
                focus,
            });
        }

        store.set_highlight_missing(false);
        store.mark_step_complete(step);
        let today = self.today();
        self.bridge
            .on_step_complete(step, store.data(), store.completed_steps(), today);
        let risk_label = (step == RISK_PROFILE_STEP).then(|| risk_label(store.data()));

        let Some(next) = step.next() else {
            self.bridge.complete_handoff(store.data(), today);
            tracing::info!(step = %step, "discovery finished");
            return Ok(ContinueOutcome::Finished {
                report: Box::new(DiscoveryReport::from_data(store.data(), today)),
            });
        };

        if next == RECOMMENDATION_STEP && !store.data().narrative_seeded {
            store.update_data(|data| {
                seed_recommendation(data);
            });
        }
        store.set_current_step(next);
        tracing::info!(completed = %step, next = %next, "step advanced");
        Ok(ContinueOutcome::Advanced {
            completed: step,
            next,
            risk_label,
        })
    }

    /// Go back one step (floored at the first); never blocked
    pub fn back<S: KeyValueStore>(&self, store: &mut DiscoveryStore<S>) -> StepId {
        let previous = store.current_step().previous();
        store.set_current_step(previous);
        previous
    }

    /// Jump to a completed step or the current one
    ///
    /// # Errors
    /// See [`validate_jump`].
    pub fn jump_to<S: KeyValueStore>(
        &self,
        store: &mut DiscoveryStore<S>,
        target: StepId,
    ) -> Result<(), NavigationError> {
        validate_jump(target, store.current_step(), store.completed_steps())?;
        store.set_current_step(target);
        Ok(())
    }
}
