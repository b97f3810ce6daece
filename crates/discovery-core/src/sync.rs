//! Case Synchronization Bridge
//!
//! Projects discovery progress onto the active case after every completed
//! step. Running without an active case is a normal practice run, so every
//! lookup miss is a silent no-op.

use crate::case::{Case, CaseId, CaseRegistry, CaseStatus, CaseUpdate, TimelineEvent, HANDOFF_EVENT};
use chrono::{Datelike, NaiveDate};
use discovery_model::{catalog, DiscoveryData, StepId};
use discovery_rules::risk_label;
use std::collections::BTreeSet;

/// Step whose completion moves a case to In Progress
const IN_PROGRESS_STEP: StepId = StepId(5);

/// Last step that must be complete for a handoff-ready case
const HANDOFF_READY_THROUGH: StepId = StepId(8);

/// Compliance reason for each step that feeds the compliance file
const COMPLIANCE_REASONS: [(StepId, &str); 7] = [
    (StepId(1), "Client profile incomplete"),
    (StepId(2), "Financial profile incomplete"),
    (StepId(3), "Current coverage not reviewed"),
    (StepId(4), "Goals & objectives not documented"),
    (StepId(5), "Lifestyle & health questions unanswered"),
    (StepId(6), "Risk profile not assessed"),
    (StepId(7), "Suitability determination pending"),
];

/// Status implied by the completed steps
#[must_use]
pub fn case_status(completed: &BTreeSet<StepId>) -> CaseStatus {
    let through_handoff = (StepId::FIRST.get()..=HANDOFF_READY_THROUGH.get())
        .all(|n| completed.contains(&StepId(n)));
    if through_handoff {
        CaseStatus::ReadyForHandoff
    } else if completed.contains(&IN_PROGRESS_STEP) {
        CaseStatus::InProgress
    } else {
        CaseStatus::Discovery
    }
}

/// One reason per compliance step not yet completed, in step order
#[must_use]
pub fn compliance_missing(completed: &BTreeSet<StepId>) -> Vec<String> {
    COMPLIANCE_REASONS
        .iter()
        .filter(|(step, _)| !completed.contains(step))
        .map(|(_, reason)| (*reason).to_string())
        .collect()
}

/// Age on `today` for a `YYYY-MM-DD` birth date, birthday-aware
#[must_use]
pub fn display_age(date_of_birth: &str, today: NaiveDate) -> Option<u32> {
    let dob = NaiveDate::parse_from_str(date_of_birth.trim(), "%Y-%m-%d").ok()?;
    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

fn timeline_label(step: StepId) -> Option<&'static str> {
    match step.get() {
        1 => Some("Client profile captured"),
        2 => Some("Financial review"),
        4 => Some("Needs analysis"),
        6 => Some("Risk assessment"),
        7 => Some("Suitability review"),
        8 => Some("Product recommendation"),
        _ => None,
    }
}

/// Timeline with `label` marked complete, or `None` if there is nothing to mark
fn mark_timeline(timeline: &[TimelineEvent], label: &str, today: NaiveDate) -> Option<Vec<TimelineEvent>> {
    let index = timeline.iter().position(|e| e.label == label && !e.complete)?;
    let mut marked = timeline.to_vec();
    marked[index].complete = true;
    marked[index].date = Some(today);
    Some(marked)
}

/// Case fields collected by `step`
fn projection(step: StepId, data: &DiscoveryData, today: NaiveDate) -> CaseUpdate {
    match step.get() {
        1 => CaseUpdate {
            client: Some(data.full_name()),
            email: Some(data.email.clone()),
            phone: Some(data.phone.clone()),
            dob: Some(data.date_of_birth.clone()),
            age: Some(display_age(&data.date_of_birth, today)),
            occupation: Some(data.occupation.clone()),
            income: Some(data.annual_income.clone()),
            ..CaseUpdate::default()
        },
        4 => CaseUpdate {
            goals: Some(
                data.primary_goals
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            ..CaseUpdate::default()
        },
        6 => CaseUpdate {
            risk_profile: Some(risk_label(data).to_string()),
            ..CaseUpdate::default()
        },
        7 => CaseUpdate {
            suitability_narrative: Some(data.suitability_notes.clone()),
            ..CaseUpdate::default()
        },
        8 => CaseUpdate {
            carrier: Some(data.selected_carrier.clone()),
            ..CaseUpdate::default()
        },
        _ => CaseUpdate::default(),
    }
}

/// Pushes discovery progress to the active case
#[derive(Debug)]
pub struct CaseSyncBridge<R> {
    registry: R,
}

impl<R: CaseRegistry> CaseSyncBridge<R> {
    /// Bridge over `registry`
    #[inline]
    #[must_use]
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Case collaborator
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    fn active_case(&self) -> Option<(CaseId, Case)> {
        let Some(id) = self.registry.active_case_id() else {
            tracing::debug!("no active case; skipping case sync");
            return None;
        };
        match self.registry.case_by_id(&id) {
            Some(case) => Some((id, case)),
            None => {
                tracing::debug!(case_id = %id, "active case not found; skipping case sync");
                None
            }
        }
    }

    /// Sync after `step` completed; `completed` already contains `step`
    ///
    /// Returns the updated case, or `None` when there is no active case.
    pub fn on_step_complete(
        &self,
        step: StepId,
        data: &DiscoveryData,
        completed: &BTreeSet<StepId>,
        today: NaiveDate,
    ) -> Option<Case> {
        let (id, case) = self.active_case()?;
        let missing = compliance_missing(completed);
        let status = case_status(completed);

        let mut update = projection(step, data, today);
        update.status = Some(status);
        update.compliance_complete = Some(missing.is_empty());
        update.compliance_missing = Some(missing);
        if let Some(label) = timeline_label(step) {
            update.timeline = mark_timeline(&case.timeline, label, today);
        }

        let updated = self.registry.update_case(&id, update);
        self.registry.add_case_activity(
            &id,
            &format!("Discovery step {step} completed: {}", catalog::step_name(step)),
        );
        tracing::info!(case_id = %id, step = %step, status = %status, "case synchronized");
        updated
    }

    /// Hand the case to new business after the final step
    pub fn complete_handoff(&self, data: &DiscoveryData, today: NaiveDate) -> Option<Case> {
        let (id, case) = self.active_case()?;
        let narrative = data.recommendation_narrative.trim();
        let update = CaseUpdate {
            status: Some(CaseStatus::ReadyForHandoff),
            compliance_complete: Some(true),
            compliance_missing: Some(Vec::new()),
            timeline: mark_timeline(&case.timeline, HANDOFF_EVENT, today),
            notes: (!narrative.is_empty()).then(|| narrative.to_string()),
            ..CaseUpdate::default()
        };
        let updated = self.registry.update_case(&id, update);
        self.registry.add_case_activity(&id, "Discovery complete; handed off to new business");
        tracing::info!(case_id = %id, "case handed off");
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::{InMemoryCaseRegistry, MockCaseRegistry};
    use pretty_assertions::assert_eq;

    fn steps(ids: &[u8]) -> BTreeSet<StepId> {
        ids.iter().copied().map(StepId).collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    #[test]
    fn status_follows_completed_steps() {
        assert_eq!(case_status(&steps(&[])), CaseStatus::Discovery);
        assert_eq!(case_status(&steps(&[1, 2, 3, 4])), CaseStatus::Discovery);
        assert_eq!(case_status(&steps(&[1, 5])), CaseStatus::InProgress);
        assert_eq!(
            case_status(&steps(&[1, 2, 3, 4, 5, 6, 7, 8])),
            CaseStatus::ReadyForHandoff
        );
        assert_eq!(
            case_status(&steps(&[1, 2, 3, 4, 5, 6, 7, 9])),
            CaseStatus::InProgress
        );
    }

    #[test]
    fn missing_reasons_cover_incomplete_steps() {
        assert_eq!(compliance_missing(&steps(&[1, 2, 3, 4, 5, 6, 7])), Vec::<String>::new());
        assert_eq!(
            compliance_missing(&steps(&[1, 3, 4, 5, 6])),
            vec![
                "Financial profile incomplete".to_string(),
                "Suitability determination pending".to_string(),
            ]
        );
        assert_eq!(compliance_missing(&steps(&[])).len(), 7);
    }

    #[test]
    fn display_age_respects_birthday() {
        assert_eq!(display_age("1980-06-15", today()), Some(46));
        assert_eq!(display_age("1980-06-16", today()), Some(45));
        assert_eq!(display_age("not a date", today()), None);
        assert_eq!(display_age("2030-01-01", today()), None);
    }

    #[test]
    fn no_active_case_is_a_no_op() {
        let mut registry = MockCaseRegistry::new();
        registry.expect_active_case_id().returning(|| None);
        registry.expect_update_case().never();
        registry.expect_add_case_activity().never();

        let bridge = CaseSyncBridge::new(registry);
        let data = DiscoveryData::default();
        assert!(bridge.on_step_complete(StepId(1), &data, &steps(&[1]), today()).is_none());
        assert!(bridge.complete_handoff(&data, today()).is_none());
    }

    #[test]
    fn missing_case_is_a_no_op() {
        let mut registry = MockCaseRegistry::new();
        registry
            .expect_active_case_id()
            .return_const(Some(CaseId::new("gone")));
        registry.expect_case_by_id().returning(|_| None);
        registry.expect_update_case().never();
        registry.expect_add_case_activity().never();

        let bridge = CaseSyncBridge::new(registry);
        let data = DiscoveryData::default();
        assert!(bridge.on_step_complete(StepId(2), &data, &steps(&[2]), today()).is_none());
    }

    #[test]
    fn step_one_projects_client_profile() {
        let registry = InMemoryCaseRegistry::new();
        let id = registry.create_case("Prospect");
        let bridge = CaseSyncBridge::new(registry);

        let mut data = DiscoveryData::default();
        data.first_name = "Jane".into();
        data.last_name = "Doe".into();
        data.email = "j@x.com".into();
        data.date_of_birth = "1980-01-01".into();
        data.annual_income = "100000".into();

        let case = bridge
            .on_step_complete(StepId(1), &data, &steps(&[1]), today())
            .unwrap();
        assert_eq!(case.client, "Jane Doe");
        assert_eq!(case.email, "j@x.com");
        assert_eq!(case.age, Some(46));
        assert_eq!(case.income, "100000");
        assert_eq!(case.status, CaseStatus::Discovery);
        assert_eq!(case.compliance_missing.len(), 6);
        assert!(!case.compliance_complete);

        let event = case.timeline_event("Client profile captured").unwrap();
        assert!(event.complete);
        assert_eq!(event.date, Some(today()));

        let case = bridge.registry().case_by_id(&id).unwrap();
        assert_eq!(case.activity.len(), 1);
        assert_eq!(case.activity[0].text, "Discovery step 1 completed: Client Profile");
    }

    #[test]
    fn completed_timeline_events_keep_their_date() {
        let registry = InMemoryCaseRegistry::new();
        registry.create_case("Jane Doe");
        let bridge = CaseSyncBridge::new(registry);
        let data = DiscoveryData::default();

        bridge.on_step_complete(StepId(2), &data, &steps(&[2]), today());
        let later = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let case = bridge
            .on_step_complete(StepId(2), &data, &steps(&[2]), later)
            .unwrap();
        assert_eq!(case.timeline_event("Financial review").unwrap().date, Some(today()));
    }

    #[test]
    fn handoff_forces_ready_status() {
        let registry = InMemoryCaseRegistry::new();
        registry.create_case("Jane Doe");
        let bridge = CaseSyncBridge::new(registry);

        let mut data = DiscoveryData::default();
        data.recommendation_narrative = "Par WL recommended.".into();
        let case = bridge.complete_handoff(&data, today()).unwrap();
        assert_eq!(case.status, CaseStatus::ReadyForHandoff);
        assert!(case.compliance_missing.is_empty());
        assert!(case.compliance_complete);
        assert_eq!(case.notes, "Par WL recommended.");
        assert!(case.timeline_event(HANDOFF_EVENT).unwrap().complete);
    }
}
