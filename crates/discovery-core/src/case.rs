//! Case records and the case registry collaborator
//!
//! The discovery core only writes the case fields listed on [`CaseUpdate`].
//! Everything else about a case belongs to the surrounding application.

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Timeline label marked when the case is handed to new business
pub const HANDOFF_EVENT: &str = "Handoff to new business";

/// Timeline labels a new case starts with, in order
pub const DEFAULT_TIMELINE: [&str; 7] = [
    "Client profile captured",
    "Financial review",
    "Needs analysis",
    "Risk assessment",
    "Suitability review",
    "Product recommendation",
    HANDOFF_EVENT,
];

/// Case identifier (ULID string)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(String);

impl CaseId {
    /// Generate a fresh id
    #[must_use]
    pub fn generate() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    /// Wrap an existing id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pipeline status of a case
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseStatus {
    /// Discovery under way
    #[default]
    Discovery,
    /// Health and lifestyle captured
    #[serde(rename = "In Progress")]
    InProgress,
    /// Ready for new business
    #[serde(rename = "Ready for Handoff")]
    ReadyForHandoff,
}

impl CaseStatus {
    /// Display string
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Discovery => "Discovery",
            Self::InProgress => "In Progress",
            Self::ReadyForHandoff => "Ready for Handoff",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One milestone on the case timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Milestone label
    pub label: String,
    /// Whether the milestone has been reached
    pub complete: bool,
    /// Date it was reached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl TimelineEvent {
    /// Pending milestone
    #[must_use]
    pub fn pending(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            complete: false,
            date: None,
        }
    }
}

/// Audit-log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Entry text
    pub text: String,
    /// When it was recorded
    pub at: DateTime<Utc>,
}

/// Case record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Case {
    pub id: CaseId,
    pub status: CaseStatus,
    pub compliance_complete: bool,
    pub compliance_missing: Vec<String>,
    pub client: String,
    pub email: String,
    pub phone: String,
    pub dob: String,
    pub occupation: String,
    pub income: String,
    pub age: Option<u32>,
    pub goals: String,
    pub risk_profile: String,
    pub suitability_narrative: String,
    pub carrier: String,
    pub timeline: Vec<TimelineEvent>,
    pub notes: String,
    pub activity: Vec<ActivityEntry>,
}

impl Case {
    /// New case in Discovery with the default timeline
    #[must_use]
    pub fn new(id: CaseId, client: impl Into<String>) -> Self {
        Self {
            id,
            status: CaseStatus::Discovery,
            compliance_complete: false,
            compliance_missing: Vec::new(),
            client: client.into(),
            email: String::new(),
            phone: String::new(),
            dob: String::new(),
            occupation: String::new(),
            income: String::new(),
            age: None,
            goals: String::new(),
            risk_profile: String::new(),
            suitability_narrative: String::new(),
            carrier: String::new(),
            timeline: DEFAULT_TIMELINE.iter().map(|l| TimelineEvent::pending(*l)).collect(),
            notes: String::new(),
            activity: Vec::new(),
        }
    }

    /// Timeline entry with `label`
    #[must_use]
    pub fn timeline_event(&self, label: &str) -> Option<&TimelineEvent> {
        self.timeline.iter().find(|e| e.label == label)
    }
}

/// Partial case update; `None` leaves a field as it is
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct CaseUpdate {
    pub status: Option<CaseStatus>,
    pub compliance_complete: Option<bool>,
    pub compliance_missing: Option<Vec<String>>,
    pub client: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub dob: Option<String>,
    pub occupation: Option<String>,
    pub income: Option<String>,
    pub age: Option<Option<u32>>,
    pub goals: Option<String>,
    pub risk_profile: Option<String>,
    pub suitability_narrative: Option<String>,
    pub carrier: Option<String>,
    pub timeline: Option<Vec<TimelineEvent>>,
    pub notes: Option<String>,
}

impl CaseUpdate {
    /// Write the set fields onto `case`
    pub fn apply_to(self, case: &mut Case) {
        macro_rules! set {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = self.$field { case.$field = value; })*
            };
        }
        set!(
            status,
            compliance_complete,
            compliance_missing,
            client,
            email,
            phone,
            dob,
            occupation,
            income,
            age,
            goals,
            risk_profile,
            suitability_narrative,
            carrier,
            timeline,
            notes,
        );
    }
}

/// Access to the case the advisor is working on
#[cfg_attr(test, mockall::automock)]
pub trait CaseRegistry {
    /// Id of the active case, if one is selected
    fn active_case_id(&self) -> Option<CaseId>;

    /// Snapshot of a case
    fn case_by_id(&self, id: &CaseId) -> Option<Case>;

    /// Apply `update`; returns the updated case, or `None` if it is unknown
    fn update_case(&self, id: &CaseId, update: CaseUpdate) -> Option<Case>;

    /// Append an audit-log line
    fn add_case_activity(&self, id: &CaseId, text: &str);
}

impl<T: CaseRegistry + ?Sized> CaseRegistry for Arc<T> {
    fn active_case_id(&self) -> Option<CaseId> {
        (**self).active_case_id()
    }

    fn case_by_id(&self, id: &CaseId) -> Option<Case> {
        (**self).case_by_id(id)
    }

    fn update_case(&self, id: &CaseId, update: CaseUpdate) -> Option<Case> {
        (**self).update_case(id, update)
    }

    fn add_case_activity(&self, id: &CaseId, text: &str) {
        (**self).add_case_activity(id, text);
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    cases: HashMap<CaseId, Case>,
    active: Option<CaseId>,
}

/// In-process case registry
#[derive(Debug, Default)]
pub struct InMemoryCaseRegistry {
    state: Mutex<RegistryState>,
}

impl InMemoryCaseRegistry {
    /// Empty registry with no active case
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a case for `client` and make it active
    pub fn create_case(&self, client: impl Into<String>) -> CaseId {
        let id = CaseId::generate();
        let mut state = self.state.lock();
        state.cases.insert(id.clone(), Case::new(id.clone(), client));
        state.active = Some(id.clone());
        tracing::debug!(case_id = %id, "case created");
        id
    }

    /// Add or replace a case without changing the active selection
    pub fn insert_case(&self, case: Case) {
        self.state.lock().cases.insert(case.id.clone(), case);
    }

    /// Select the active case (`None` for a practice run)
    pub fn set_active(&self, id: Option<CaseId>) {
        self.state.lock().active = id;
    }

    /// Number of cases
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().cases.len()
    }

    /// Whether the registry holds no cases
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().cases.is_empty()
    }
}

impl CaseRegistry for InMemoryCaseRegistry {
    fn active_case_id(&self) -> Option<CaseId> {
        self.state.lock().active.clone()
    }

    fn case_by_id(&self, id: &CaseId) -> Option<Case> {
        self.state.lock().cases.get(id).cloned()
    }

    fn update_case(&self, id: &CaseId, update: CaseUpdate) -> Option<Case> {
        let mut state = self.state.lock();
        let case = state.cases.get_mut(id)?;
        update.apply_to(case);
        Some(case.clone())
    }

    fn add_case_activity(&self, id: &CaseId, text: &str) {
        if let Some(case) = self.state.lock().cases.get_mut(id) {
            case.activity.push(ActivityEntry {
                text: text.to_string(),
                at: Utc::now(),
            });
        }
    }
}
