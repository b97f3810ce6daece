//! Compliance checklist
//!
//! Universal checks come first, followed by blocks that only appear when
//! their gate is open (corporate owner, IFA, par chassis, UL, term). A check
//! with `warn` set failed on an advisor acknowledgement rather than on
//! missing data.

use crate::resolver::{has_text, parse_leading_float, FieldSnapshot};
use discovery_model::{DiscoveryData, ProductCategory, RiskQuestion};
use serde::{Deserialize, Serialize};

/// Label of the UL allocation check
pub const UL_ALLOCATION_CHECK: &str = "UL: Investment allocations total 100%";

/// One pass/fail assertion over the record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    /// Check name
    pub label: String,
    /// Whether the check passed
    pub pass: bool,
    /// Set when the failure needs an advisor action (an acknowledgement)
    #[serde(default)]
    pub warn: bool,
    /// Optional detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ComplianceCheck {
    fn new(label: &str, pass: bool) -> Self {
        Self {
            label: label.to_string(),
            pass,
            warn: false,
            note: None,
        }
    }

    /// Acknowledgement check: failing sets `warn`
    fn acknowledgement(label: &str, acknowledged: bool) -> Self {
        Self {
            warn: !acknowledged,
            ..Self::new(label, acknowledged)
        }
    }

    fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Ordered list of compliance checks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceChecklist {
    /// Checks in display order
    pub checks: Vec<ComplianceCheck>,
}

impl ComplianceChecklist {
    /// Number of passing checks
    #[must_use]
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.pass).count()
    }

    /// Number of checks
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.checks.len()
    }

    /// Whether every check passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.pass)
    }

    /// Failing checks that need an advisor action
    pub fn warnings(&self) -> impl Iterator<Item = &ComplianceCheck> {
        self.checks.iter().filter(|c| c.warn)
    }

    /// Look up a check by label
    #[must_use]
    pub fn find(&self, label: &str) -> Option<&ComplianceCheck> {
        self.checks.iter().find(|c| c.label == label)
    }
}

/// Sum of UL allocation percentages; unreadable entries count as 0
#[must_use]
pub fn allocation_total(data: &DiscoveryData) -> f64 {
    data.investment_allocations
        .iter()
        .map(|a| parse_leading_float(&a.percentage).unwrap_or(0.0))
        .sum()
}

/// Build the checklist for a record
#[must_use]
pub fn compliance_checklist(data: &DiscoveryData) -> ComplianceChecklist {
    let snapshot = FieldSnapshot::new(data);
    let present = |key: &str| snapshot.is_present(key);

    let mut checks = universal_checks(data, &present);

    if data.is_corporate() {
        checks.extend(corporate_checks(data));
    }
    if data.is_category(ProductCategory::Ifa) {
        checks.extend(ifa_checks(data, &present));
    }
    if data.product_category.is_some_and(ProductCategory::is_par_based) {
        checks.extend(par_checks(data, &present));
    }
    if data.is_category(ProductCategory::UniversalLife) {
        checks.extend(ul_checks(data, &present));
    }
    if data.is_category(ProductCategory::TermLife) {
        checks.extend(term_checks(&present));
    }

    tracing::debug!(
        total = checks.len(),
        passed = checks.iter().filter(|c| c.pass).count(),
        "compliance checklist evaluated"
    );
    ComplianceChecklist { checks }
}

fn universal_checks(data: &DiscoveryData, present: &dyn Fn(&str) -> bool) -> Vec<ComplianceCheck> {
    let answered = data.risk_answer_count();
    let liquidity_ok = present("liquidityNeed")
        && (data.liquidity_need.trim() != "Yes" || present("liquidityExplanation"));
    let replacement_ok = !data.replacing_existing_coverage || data.replacement_disclosure_provided;

    let mut replacement = ComplianceCheck::new("Replacement disclosure provided", replacement_ok);
    if !replacement_ok {
        replacement.warn = true;
        replacement.note = Some("Client is replacing coverage; disclosure required".to_string());
    } else if !data.replacing_existing_coverage {
        replacement.note = Some("No replacement".to_string());
    }

    vec![
        ComplianceCheck::new(
            "Client identity verified",
            ["firstName", "lastName", "dateOfBirth", "governmentIdNumber"]
                .into_iter()
                .all(present),
        ),
        ComplianceCheck::new("Source of funds documented", present("sourceOfFunds")),
        ComplianceCheck::new("Face amount specified", present("faceAmountRequested")),
        ComplianceCheck::new("Reason for purchase documented", present("reasonForPurchase")),
        ComplianceCheck::new(
            "Risk questionnaire complete",
            answered == RiskQuestion::ALL.len(),
        )
        .with_note(format!("{answered}/{} answered", RiskQuestion::ALL.len())),
        ComplianceCheck::new("Liquidity needs addressed", liquidity_ok),
        replacement,
        ComplianceCheck::new(
            "Application history disclosed",
            present("priorApplicationDeclined") && present("otherApplicationsPending"),
        ),
    ]
}

fn corporate_checks(data: &DiscoveryData) -> Vec<ComplianceCheck> {
    let pep_declared = !data.ubo_declarations.is_empty()
        && data
            .ubo_declarations
            .iter()
            .all(|u| has_text(&u.pep_hio_status));
    vec![
        ComplianceCheck::new(
            "Corporate: UBO declarations on file",
            !data.ubo_declarations.is_empty(),
        ),
        ComplianceCheck::new("Corporate: PEP/HIO status declared", pep_declared),
        ComplianceCheck::new(
            "Corporate: Third-party payor declared",
            has_text(&data.third_party_payor),
        ),
        ComplianceCheck::new(
            "Corporate: Corporate owners listed",
            !data.corporate_owners.is_empty(),
        ),
    ]
}

fn ifa_checks(data: &DiscoveryData, present: &dyn Fn(&str) -> bool) -> Vec<ComplianceCheck> {
    vec![
        ComplianceCheck::new("IFA: Corporate ownership confirmed", data.is_corporate()),
        ComplianceCheck::new("IFA: Lender identified", present("ifaLenderName")),
        ComplianceCheck::new("IFA: Loan amount documented", present("ifaLoanAmount")),
        ComplianceCheck::new("IFA: Key person valuation documented", present("keyPersonValue")),
        ComplianceCheck::acknowledgement(
            "IFA: Collateral risk acknowledged",
            data.ifa_collateral_risk_ack,
        ),
        ComplianceCheck::acknowledgement(
            "IFA: Interest deductibility reviewed",
            data.ifa_interest_deductibility_ack,
        ),
    ]
}

fn par_checks(data: &DiscoveryData, present: &dyn Fn(&str) -> bool) -> Vec<ComplianceCheck> {
    vec![
        ComplianceCheck::new("Par: Plan design selected", present("parPlanDesign")),
        ComplianceCheck::new("Par: Dividend option selected", present("dividendOption")),
        ComplianceCheck::acknowledgement(
            "Par: Illustration acknowledged",
            data.par_illustration_ack,
        ),
    ]
}

fn ul_checks(data: &DiscoveryData, present: &dyn Fn(&str) -> bool) -> Vec<ComplianceCheck> {
    let total = allocation_total(data);
    vec![
        ComplianceCheck::new("UL: Death benefit option selected", present("ulDeathBenefitOption")),
        ComplianceCheck::new(UL_ALLOCATION_CHECK, (total - 100.0).abs() < 1e-9)
            .with_note(format!("Total: {total}%")),
        ComplianceCheck::new("UL: Planned premium documented", present("ulPlannedPremium")),
        ComplianceCheck::acknowledgement("UL: Exempt test acknowledged", data.ul_exempt_test_ack),
    ]
}

fn term_checks(present: &dyn Fn(&str) -> bool) -> Vec<ComplianceCheck> {
    vec![
        ComplianceCheck::new("Term: Term period selected", present("termPeriod")),
        ComplianceCheck::new("Term: Conversion option reviewed", present("termConversion")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use discovery_model::{InvestmentAllocation, OwnerType, UboDeclaration};
    use pretty_assertions::assert_eq;

    fn labels(list: &ComplianceChecklist) -> Vec<&str> {
        list.checks.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn blank_record_has_only_universal_checks() {
        let list = compliance_checklist(&DiscoveryData::new());
        assert_eq!(list.total(), 8);
        // replacement passes when nothing is being replaced
        assert_eq!(list.passed(), 1);
        assert!(list.find("Replacement disclosure provided").unwrap().pass);
    }

    #[test]
    fn block_sizes_per_gate() {
        let mut data = DiscoveryData::new();
        data.owner_type = Some(OwnerType::Corporate);
        data.product_category = Some(ProductCategory::Ifa);
        // 8 universal + 4 corporate + 6 IFA + 3 par
        assert_eq!(compliance_checklist(&data).total(), 21);

        data.product_category = Some(ProductCategory::UniversalLife);
        assert_eq!(compliance_checklist(&data).total(), 16);

        data.owner_type = Some(OwnerType::Individual);
        data.product_category = Some(ProductCategory::TermLife);
        assert_eq!(compliance_checklist(&data).total(), 10);

        data.product_category = Some(ProductCategory::ParticipatingWholeLife);
        assert_eq!(compliance_checklist(&data).total(), 11);
    }

    #[test]
    fn corporate_checks_vanish_without_touching_data() {
        let mut data = DiscoveryData::new();
        data.owner_type = Some(OwnerType::Corporate);
        data.add_ubo_declaration(UboDeclaration {
            name: "A. Holder".into(),
            ownership_percent: "60".into(),
            pep_hio_status: "No".into(),
        });
        let list = compliance_checklist(&data);
        assert!(list.find("Corporate: UBO declarations on file").unwrap().pass);
        assert!(list.find("Corporate: PEP/HIO status declared").unwrap().pass);

        data.owner_type = Some(OwnerType::Individual);
        let list = compliance_checklist(&data);
        assert!(labels(&list).iter().all(|l| !l.starts_with("Corporate:")));
        assert_eq!(data.ubo_declarations.len(), 1);
    }

    #[test]
    fn ul_allocations_must_total_exactly_100() {
        let mut data = DiscoveryData::new();
        data.product_category = Some(ProductCategory::UniversalLife);
        data.investment_allocations = vec![
            InvestmentAllocation::new("A", "60"),
            InvestmentAllocation::new("B", "30"),
        ];
        let check = compliance_checklist(&data).find(UL_ALLOCATION_CHECK).cloned().unwrap();
        assert!(!check.pass);
        assert_eq!(check.note.as_deref(), Some("Total: 90%"));

        data.add_investment_allocation(InvestmentAllocation::new("C", "10"));
        assert!(compliance_checklist(&data).find(UL_ALLOCATION_CHECK).unwrap().pass);
    }

    #[test]
    fn unreadable_allocations_count_as_zero() {
        let mut data = DiscoveryData::new();
        data.investment_allocations = vec![
            InvestmentAllocation::new("A", "100"),
            InvestmentAllocation::new("B", "n/a"),
        ];
        assert!((allocation_total(&data) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn acknowledgements_warn_when_missing() {
        let mut data = DiscoveryData::new();
        data.product_category = Some(ProductCategory::ParticipatingWholeLife);
        let list = compliance_checklist(&data);
        let ack = list.find("Par: Illustration acknowledged").unwrap();
        assert!(!ack.pass && ack.warn);
        let plain = list.find("Par: Plan design selected").unwrap();
        assert!(!plain.pass && !plain.warn);

        data.par_illustration_ack = true;
        let list = compliance_checklist(&data);
        let ack = list.find("Par: Illustration acknowledged").unwrap();
        assert!(ack.pass && !ack.warn);
    }

    #[test]
    fn replacement_without_disclosure_warns() {
        let mut data = DiscoveryData::new();
        data.replacing_existing_coverage = true;
        let list = compliance_checklist(&data);
        let check = list.find("Replacement disclosure provided").unwrap();
        assert!(!check.pass);
        assert!(check.warn);
        assert_eq!(list.warnings().count(), 1);
    }

    #[test]
    fn liquidity_yes_needs_explanation() {
        let mut data = DiscoveryData::new();
        data.liquidity_need = "Yes".into();
        assert!(!compliance_checklist(&data).find("Liquidity needs addressed").unwrap().pass);
        data.liquidity_explanation = "Cottage purchase in 3 years".into();
        assert!(compliance_checklist(&data).find("Liquidity needs addressed").unwrap().pass);
        data.liquidity_need = "No".into();
        data.liquidity_explanation.clear();
        assert!(compliance_checklist(&data).find("Liquidity needs addressed").unwrap().pass);
    }
}
