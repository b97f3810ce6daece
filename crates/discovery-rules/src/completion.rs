//! Step Completion Engine
//!
//! Display heuristic for progress indicators. It never gates navigation;
//! only the missing-field evaluator does that.

use crate::resolver::{has_text, FieldSnapshot};
use discovery_model::{catalog, DiscoveryData, RiskQuestion, StepId};
use std::collections::BTreeSet;

/// Completion estimate for `step`, 0 to 100
///
/// Completed steps report 100 regardless of the current data.
#[must_use]
pub fn completion_percent(
    data: &DiscoveryData,
    step: StepId,
    completed: &BTreeSet<StepId>,
) -> u8 {
    if completed.contains(&step) {
        return 100;
    }
    match step.get() {
        1 | 2 | 4 | 5 => {
            let fields = catalog::step(step).map_or(&[][..], |s| s.progress_fields);
            let snapshot = FieldSnapshot::new(data);
            let filled = fields.iter().filter(|key| snapshot.is_present(key)).count();
            percent(filled, fields.len())
        }
        3 => {
            if has_text(&data.prior_application_declined)
                && has_text(&data.other_applications_pending)
            {
                50
            } else {
                0
            }
        }
        6 => percent(data.risk_answer_count(), RiskQuestion::ALL.len()),
        7 => {
            if has_text(&data.suitability_notes) {
                50
            } else {
                0
            }
        }
        8 => {
            if has_text(&data.selected_carrier) && has_text(&data.selected_product) {
                100
            } else {
                0
            }
        }
        _ => 0,
    }
}

/// `part / whole` as a rounded percentage; an empty whole is 0%
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let ratio = (part.min(whole) as f64) / (whole as f64);
    (ratio * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use discovery_model::RiskChoice;
    use proptest::prelude::*;

    fn none() -> BTreeSet<StepId> {
        BTreeSet::new()
    }

    #[test]
    fn step1_counts_progress_fields() {
        let mut data = DiscoveryData::new();
        assert_eq!(completion_percent(&data, StepId(1), &none()), 0);
        data.first_name = "Jane".into();
        data.last_name = "Doe".into();
        // 2 of 14
        assert_eq!(completion_percent(&data, StepId(1), &none()), 14);
    }

    #[test]
    fn step3_is_binary() {
        let mut data = DiscoveryData::new();
        data.prior_application_declined = "No".into();
        assert_eq!(completion_percent(&data, StepId(3), &none()), 0);
        data.other_applications_pending = "No".into();
        assert_eq!(completion_percent(&data, StepId(3), &none()), 50);
    }

    #[test]
    fn step6_counts_out_of_five() {
        let mut data = DiscoveryData::new();
        data.answer_risk_question(RiskQuestion::Q1, RiskChoice::A);
        data.answer_risk_question(RiskQuestion::Q4, RiskChoice::D);
        assert_eq!(completion_percent(&data, StepId(6), &none()), 40);
    }

    #[test]
    fn steps_7_8_9_fixed_values() {
        let mut data = DiscoveryData::new();
        data.suitability_notes = "Client prefers guarantees".into();
        assert_eq!(completion_percent(&data, StepId(7), &none()), 50);

        data.selected_carrier = "Sun Life".into();
        assert_eq!(completion_percent(&data, StepId(8), &none()), 0);
        data.selected_product = "Sun Term".into();
        assert_eq!(completion_percent(&data, StepId(8), &none()), 100);

        assert_eq!(completion_percent(&data, StepId(9), &none()), 0);
        assert_eq!(completion_percent(&data, StepId(0), &none()), 0);
        assert_eq!(completion_percent(&data, StepId(77), &none()), 0);
    }

    #[test]
    fn completed_step_is_always_full() {
        let data = DiscoveryData::new();
        let completed: BTreeSet<_> = [StepId(9)].into_iter().collect();
        assert_eq!(completion_percent(&data, StepId(9), &completed), 100);
    }

    proptest! {
        #[test]
        fn completion_is_sticky_once_marked(step in 1u8..=9, wipe_names in any::<bool>()) {
            let mut data = DiscoveryData::new();
            data.first_name = "Jane".into();
            if wipe_names {
                data.first_name.clear();
            }
            let completed: BTreeSet<_> = [StepId(step)].into_iter().collect();
            prop_assert_eq!(completion_percent(&data, StepId(step), &completed), 100);
        }

        #[test]
        fn completion_never_exceeds_hundred(step in 0u8..=12) {
            let data = DiscoveryData::new();
            prop_assert!(completion_percent(&data, StepId(step), &BTreeSet::new()) <= 100);
        }
    }
}
