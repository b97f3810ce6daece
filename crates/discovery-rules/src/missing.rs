//! Missing-Field Evaluator
//!
//! Applies the field resolver across a step's required fields. Gates are read
//! from the record as it is now, so changing a gate can make an already
//! completed step report missing fields again.

use crate::resolver::FieldSnapshot;
use discovery_model::{catalog, DiscoveryData, StepId};
use serde::Serialize;

/// An unmet requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MissingField {
    /// Record key
    pub key: &'static str,
    /// Human label
    pub label: &'static str,
}

/// Unmet requirements of `step`, in catalog order
///
/// Unknown step ids have no requirements.
#[must_use]
pub fn missing_fields(data: &DiscoveryData, step: StepId) -> Vec<MissingField> {
    let snapshot = FieldSnapshot::new(data);
    catalog::required_fields(step)
        .iter()
        .filter(|req| req.gate.is_open(data))
        .filter(|req| !snapshot.is_present(req.key))
        .map(|req| MissingField {
            key: req.key,
            label: req.label,
        })
        .collect()
}

/// Number of unmet requirements of `step`
#[inline]
#[must_use]
pub fn missing_count(data: &DiscoveryData, step: StepId) -> usize {
    missing_fields(data, step).len()
}

/// Whether every requirement of `step` is met
#[inline]
#[must_use]
pub fn is_step_satisfied(data: &DiscoveryData, step: StepId) -> bool {
    missing_fields(data, step).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use discovery_model::{OwnerType, ProductCategory};
    use pretty_assertions::assert_eq;

    fn keys(missing: &[MissingField]) -> Vec<&'static str> {
        missing.iter().map(|m| m.key).collect()
    }

    #[test]
    fn blank_record_misses_every_step1_field_in_order() {
        let data = DiscoveryData::new();
        let missing = missing_fields(&data, StepId(1));
        assert_eq!(
            keys(&missing),
            vec![
                "firstName",
                "lastName",
                "dateOfBirth",
                "gender",
                "smokerStatus",
                "phone",
                "email",
                "maritalStatus",
                "annualIncome",
                "ownerType",
            ]
        );
        assert_eq!(missing_count(&data, StepId(1)), 10);
    }

    #[test]
    fn corporate_owner_adds_corporate_requirements() {
        let mut data = DiscoveryData::new();
        data.owner_type = Some(OwnerType::Corporate);
        let missing = keys(&missing_fields(&data, StepId(1)));
        assert!(missing.contains(&"corporateName"));
        assert!(missing.contains(&"thirdPartyPayor"));
        assert!(!missing.contains(&"ownerType"));

        let step2 = keys(&missing_fields(&data, StepId(2)));
        assert!(step2.contains(&"natureOfBusiness"));
        assert!(step2.contains(&"netProfitYear2"));
    }

    #[test]
    fn exchange_block_follows_source_of_funds() {
        let mut data = DiscoveryData::new();
        data.source_of_funds = "Savings".to_string();
        assert!(!keys(&missing_fields(&data, StepId(2))).contains(&"exchangeCarrier"));
        data.source_of_funds = "Annuity Transfer".to_string();
        assert!(keys(&missing_fields(&data, StepId(2))).contains(&"exchangeCarrier"));
    }

    #[test]
    fn product_step_requirements_follow_category() {
        let mut data = DiscoveryData::new();
        data.selected_carrier = "Sun Life".to_string();
        data.selected_product = "Sun Universal Life".to_string();
        assert!(is_step_satisfied(&data, StepId(8)));

        data.product_category = Some(ProductCategory::UniversalLife);
        assert_eq!(
            keys(&missing_fields(&data, StepId(8))),
            vec!["ulDeathBenefitOption", "ulCoiStructure", "ulPlannedPremium"]
        );

        data.product_category = Some(ProductCategory::Ifa);
        assert_eq!(
            keys(&missing_fields(&data, StepId(8))),
            vec!["parPlanDesign", "dividendOption"]
        );
    }

    #[test]
    fn vitality_required_only_for_its_carrier() {
        let mut data = DiscoveryData::new();
        data.product_category = Some(ProductCategory::TermLife);
        data.selected_carrier = "Manulife".to_string();
        data.selected_product = "Manulife Family Term".to_string();
        data.term_period = "20".to_string();
        assert_eq!(keys(&missing_fields(&data, StepId(8))), vec!["vitalityEnrollment"]);
    }

    #[test]
    fn steps_without_requirements_are_satisfied() {
        let data = DiscoveryData::new();
        assert!(is_step_satisfied(&data, StepId(7)));
        assert!(is_step_satisfied(&data, StepId(9)));
        assert!(missing_fields(&data, StepId(12)).is_empty());
    }
}
