//! Discovery Rules
//!
//! Pure functions over a [`DiscoveryData`](discovery_model::DiscoveryData)
//! snapshot:
//! - field presence ([`resolver`]) and unmet requirements ([`missing`])
//! - progress display estimates ([`completion`])
//! - risk labeling ([`risk`]), product suitability ([`suitability`]) and the
//!   compliance checklist ([`compliance`])
//! - recommendation narrative seeding ([`narrative`])
//!
//! Nothing here is cached; callers recompute on demand.
//!
//! # Example
//!
//! ```rust,ignore
//! use discovery_rules::{missing_fields, risk_label};
//!
//! let missing = missing_fields(&data, StepId(1));
//! println!("{} fields left, risk profile {}", missing.len(), risk_label(&data));
//! ```

#![warn(unreachable_pub)]

pub mod completion;
pub mod compliance;
pub mod missing;
pub mod narrative;
pub mod resolver;
pub mod risk;
pub mod suitability;

pub use completion::completion_percent;
pub use compliance::{compliance_checklist, ComplianceCheck, ComplianceChecklist};
pub use missing::{is_step_satisfied, missing_count, missing_fields, MissingField};
pub use narrative::{render_recommendation, seed_recommendation};
pub use resolver::{is_field_present, FieldSnapshot};
pub use risk::{label_for_score, risk_label, risk_score, RiskLabel};
pub use suitability::{product_suitability, suitability_age, time_horizon_years, SuitabilityVerdict};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for evaluating discovery records
    pub use crate::{
        completion_percent, compliance_checklist, missing_fields, product_suitability,
        risk_label, ComplianceChecklist, MissingField, RiskLabel, SuitabilityVerdict,
    };
}
