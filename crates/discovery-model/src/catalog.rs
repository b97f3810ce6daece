//! Field Requirement Catalog
//!
//! Static table of wizard steps: display metadata, the required fields of
//! each step (with the gate that makes them relevant), the fields counted by
//! the completion indicator, and the risk questionnaire.

use crate::data::DiscoveryData;
use crate::products::VITALITY_CARRIER;
use crate::types::{ProductCategory, RiskQuestion, StepId};

/// Sources of funds that require the policy exchange sub-block
pub const EXCHANGE_SOURCES: [&str; 3] = ["Policy Surrender", "Policy Exchange", "Annuity Transfer"];

/// Condition under which a requirement applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Always required
    Always,
    /// Required when the owner is a corporation
    Corporate,
    /// Required when the product category is one of the listed ones
    Category(&'static [ProductCategory]),
    /// Required when the source of funds is one of the listed values
    SourceOfFunds(&'static [&'static str]),
    /// Required when the selected carrier matches
    Carrier(&'static str),
}

impl Gate {
    /// Evaluate against the current record
    #[must_use]
    pub fn is_open(&self, data: &DiscoveryData) -> bool {
        match self {
            Gate::Always => true,
            Gate::Corporate => data.is_corporate(),
            Gate::Category(categories) => data
                .product_category
                .is_some_and(|c| categories.contains(&c)),
            Gate::SourceOfFunds(sources) => sources.contains(&data.source_of_funds.trim()),
            Gate::Carrier(carrier) => data.selected_carrier.trim() == *carrier,
        }
    }
}

/// A field that must be filled before its step can be completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRequirement {
    /// Record key (camelCase, or `riskQ<N>`)
    pub key: &'static str,
    /// Human label shown in the missing-field list
    pub label: &'static str,
    /// When the requirement applies
    pub gate: Gate,
}

const fn always(key: &'static str, label: &'static str) -> FieldRequirement {
    FieldRequirement {
        key,
        label,
        gate: Gate::Always,
    }
}

const fn gated(key: &'static str, label: &'static str, gate: Gate) -> FieldRequirement {
    FieldRequirement { key, label, gate }
}

const PAR_BASED: &[ProductCategory] = &[ProductCategory::ParticipatingWholeLife, ProductCategory::Ifa];
const IFA: &[ProductCategory] = &[ProductCategory::Ifa];
const UL: &[ProductCategory] = &[ProductCategory::UniversalLife];
const TERM: &[ProductCategory] = &[ProductCategory::TermLife];
const EXCHANGE: Gate = Gate::SourceOfFunds(&EXCHANGE_SOURCES);

/// Step display metadata and requirement lists
#[derive(Debug, Clone, Copy)]
pub struct StepDefinition {
    /// Step id
    pub id: StepId,
    /// Display name
    pub name: &'static str,
    /// Estimated minutes to complete
    pub estimated_minutes: u8,
    /// Coaching text shown alongside the form
    pub coaching: &'static str,
    /// Required fields in display order
    pub required: &'static [FieldRequirement],
    /// Fields counted by the completion indicator (steps 1, 2, 4, 5 only)
    pub progress_fields: &'static [&'static str],
}

const STEP1_REQUIRED: &[FieldRequirement] = &[
    always("firstName", "First name"),
    always("lastName", "Last name"),
    always("dateOfBirth", "Date of birth"),
    always("gender", "Gender"),
    always("smokerStatus", "Smoker status"),
    always("phone", "Phone number"),
    always("email", "Email address"),
    always("maritalStatus", "Marital status"),
    always("annualIncome", "Annual income"),
    always("ownerType", "Policy owner type"),
    gated("corporateName", "Corporation legal name", Gate::Corporate),
    gated("businessNumber", "Business number", Gate::Corporate),
    gated("incorporationJurisdiction", "Jurisdiction of incorporation", Gate::Corporate),
    gated("thirdPartyPayor", "Third-party payor declaration", Gate::Corporate),
];

const STEP2_REQUIRED: &[FieldRequirement] = &[
    always("totalAssets", "Total assets"),
    always("totalLiabilities", "Total liabilities"),
    always("taxBracket", "Marginal tax bracket"),
    always("taxProvince", "Province of taxation"),
    always("sourceOfFunds", "Source of funds"),
    always("reasonForPurchase", "Reason for purchase"),
    gated("exchangeCarrier", "Exchanging carrier", EXCHANGE),
    gated("exchangePolicyNumber", "Exchanging policy number", EXCHANGE),
    gated("exchangeAmount", "Exchange amount", EXCHANGE),
    gated("ifaLenderName", "IFA lender", Gate::Category(IFA)),
    gated("ifaLoanAmount", "IFA loan amount", Gate::Category(IFA)),
    gated("keyPersonValue", "Key person valuation", Gate::Category(IFA)),
    gated("natureOfBusiness", "Nature of business", Gate::Corporate),
    gated("corporateAssets", "Corporate assets", Gate::Corporate),
    gated("corporateLiabilities", "Corporate liabilities", Gate::Corporate),
    gated("netProfitYear1", "Net profit (most recent year)", Gate::Corporate),
    gated("netProfitYear2", "Net profit (prior year)", Gate::Corporate),
];

const STEP3_REQUIRED: &[FieldRequirement] = &[
    always("priorApplicationDeclined", "Prior declined or rated application"),
    always("otherApplicationsPending", "Other applications pending"),
];

const STEP4_REQUIRED: &[FieldRequirement] = &[
    always("productCategory", "Product category"),
    always("primaryGoals", "Primary goals"),
    always("faceAmountRequested", "Face amount requested"),
    always("investmentTimeHorizon", "Time horizon"),
    always("liquidityNeed", "Liquidity need"),
];

const STEP5_REQUIRED: &[FieldRequirement] = &[
    always("hazardousActivities", "Hazardous activities"),
    always("aviationActivity", "Aviation"),
    always("foreignTravel", "Foreign travel"),
    always("alcoholUse", "Alcohol use"),
    always("drugUse", "Drug use"),
    always("drivingViolations", "Driving violations"),
    always("criminalRecord", "Criminal record"),
    always("bankruptcyHistory", "Bankruptcy history"),
    always("familyMedicalHistory", "Family medical history"),
    always("currentMedicalTreatment", "Current medical treatment"),
];

const STEP6_REQUIRED: &[FieldRequirement] = &[
    always("riskQ1", "Investment experience"),
    always("riskQ2", "Reaction to a market decline"),
    always("riskQ3", "Primary investment objective"),
    always("riskQ4", "Time before funds are needed"),
    always("riskQ5", "Comfort with volatility"),
];

const STEP8_REQUIRED: &[FieldRequirement] = &[
    always("selectedCarrier", "Carrier"),
    always("selectedProduct", "Product"),
    gated("parPlanDesign", "Par plan design", Gate::Category(PAR_BASED)),
    gated("dividendOption", "Dividend option", Gate::Category(PAR_BASED)),
    gated("ulDeathBenefitOption", "UL death benefit option", Gate::Category(UL)),
    gated("ulCoiStructure", "UL cost of insurance structure", Gate::Category(UL)),
    gated("ulPlannedPremium", "UL planned premium", Gate::Category(UL)),
    gated("termPeriod", "Term period", Gate::Category(TERM)),
    gated("vitalityEnrollment", "Vitality enrollment", Gate::Carrier(VITALITY_CARRIER)),
];

const STEP1_PROGRESS: &[&str] = &[
    "firstName",
    "lastName",
    "dateOfBirth",
    "gender",
    "smokerStatus",
    "phone",
    "email",
    "address",
    "city",
    "postalCode",
    "maritalStatus",
    "occupation",
    "employer",
    "annualIncome",
];

const STEP2_PROGRESS: &[&str] = &[
    "totalAssets",
    "totalLiabilities",
    "netWorth",
    "taxBracket",
    "taxProvince",
    "sourceOfFunds",
    "reasonForPurchase",
];

const STEP4_PROGRESS: &[&str] = &[
    "productCategory",
    "primaryGoals",
    "faceAmountRequested",
    "investmentTimeHorizon",
    "liquidityNeed",
];

const STEP5_PROGRESS: &[&str] = &[
    "hazardousActivities",
    "aviationActivity",
    "foreignTravel",
    "alcoholUse",
    "drugUse",
    "drivingViolations",
    "criminalRecord",
    "bankruptcyHistory",
    "familyMedicalHistory",
    "currentMedicalTreatment",
];

/// The nine wizard steps
pub const STEPS: [StepDefinition; 9] = [
    StepDefinition {
        id: StepId(1),
        name: "Client Profile",
        estimated_minutes: 5,
        coaching: "Confirm legal names exactly as they appear on government ID.",
        required: STEP1_REQUIRED,
        progress_fields: STEP1_PROGRESS,
    },
    StepDefinition {
        id: StepId(2),
        name: "Financial Profile",
        estimated_minutes: 6,
        coaching: "Document where premium dollars come from before discussing product.",
        required: STEP2_REQUIRED,
        progress_fields: STEP2_PROGRESS,
    },
    StepDefinition {
        id: StepId(3),
        name: "Current Coverage",
        estimated_minutes: 4,
        coaching: "Any replacement needs a disclosure discussion on record.",
        required: STEP3_REQUIRED,
        progress_fields: &[],
    },
    StepDefinition {
        id: StepId(4),
        name: "Goals & Objectives",
        estimated_minutes: 4,
        coaching: "Let the client rank goals in their own words.",
        required: STEP4_REQUIRED,
        progress_fields: STEP4_PROGRESS,
    },
    StepDefinition {
        id: StepId(5),
        name: "Lifestyle & Health",
        estimated_minutes: 3,
        coaching: "Underwriting surprises start here; ask every question.",
        required: STEP5_REQUIRED,
        progress_fields: STEP5_PROGRESS,
    },
    StepDefinition {
        id: StepId(6),
        name: "Risk Profile",
        estimated_minutes: 3,
        coaching: "Read each option aloud; do not lead the answer.",
        required: STEP6_REQUIRED,
        progress_fields: &[],
    },
    StepDefinition {
        id: StepId(7),
        name: "Suitability Determination",
        estimated_minutes: 3,
        coaching: "Explain why the recommendation fits, not only what it is.",
        required: &[],
        progress_fields: &[],
    },
    StepDefinition {
        id: StepId(8),
        name: "Product Recommendation",
        estimated_minutes: 6,
        coaching: "Match plan design to the goals and horizon captured earlier.",
        required: STEP8_REQUIRED,
        progress_fields: &[],
    },
    StepDefinition {
        id: StepId(9),
        name: "Review & Summary",
        estimated_minutes: 2,
        coaching: "Walk the client through the compliance checklist before handoff.",
        required: &[],
        progress_fields: &[],
    },
];

/// Look up a step definition
#[must_use]
pub fn step(id: StepId) -> Option<&'static StepDefinition> {
    STEPS.iter().find(|s| s.id == id)
}

/// Required fields for a step, or an empty slice for unknown ids
#[must_use]
pub fn required_fields(id: StepId) -> &'static [FieldRequirement] {
    step(id).map_or(&[], |s| s.required)
}

/// Display name for a step
#[must_use]
pub fn step_name(id: StepId) -> &'static str {
    step(id).map_or("Unknown step", |s| s.name)
}

/// One questionnaire item
#[derive(Debug, Clone, Copy)]
pub struct RiskQuestionDefinition {
    /// Answer key
    pub question: RiskQuestion,
    /// Prompt read to the client
    pub prompt: &'static str,
    /// Options A through D
    pub options: [&'static str; 4],
}

/// The five-question risk questionnaire
pub const RISK_QUESTIONNAIRE: [RiskQuestionDefinition; 5] = [
    RiskQuestionDefinition {
        question: RiskQuestion::Q1,
        prompt: "How would you describe your investment experience?",
        options: ["None", "Limited", "Moderate", "Extensive"],
    },
    RiskQuestionDefinition {
        question: RiskQuestion::Q2,
        prompt: "If your investments dropped 20% in a year, what would you do?",
        options: ["Sell everything", "Sell some", "Hold", "Buy more"],
    },
    RiskQuestionDefinition {
        question: RiskQuestion::Q3,
        prompt: "What is your primary investment objective?",
        options: ["Preserve capital", "Income", "Balanced growth", "Maximum growth"],
    },
    RiskQuestionDefinition {
        question: RiskQuestion::Q4,
        prompt: "When will you need access to these funds?",
        options: ["Under 3 years", "3 to 5 years", "5 to 10 years", "Over 10 years"],
    },
    RiskQuestionDefinition {
        question: RiskQuestion::Q5,
        prompt: "How comfortable are you with short-term swings in value?",
        options: [
            "Very uncomfortable",
            "Somewhat uncomfortable",
            "Somewhat comfortable",
            "Very comfortable",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_every_step_in_order() {
        let ids: Vec<_> = STEPS.iter().map(|s| s.id).collect();
        assert_eq!(ids, StepId::all().collect::<Vec<_>>());
    }

    #[test]
    fn suitability_and_review_have_no_requirements() {
        assert!(required_fields(StepId(7)).is_empty());
        assert!(required_fields(StepId(9)).is_empty());
        assert!(required_fields(StepId(0)).is_empty());
        assert!(required_fields(StepId(42)).is_empty());
    }

    #[test]
    fn gates_follow_current_values() {
        let mut data = DiscoveryData::new();
        assert!(!Gate::Corporate.is_open(&data));
        data.owner_type = Some(crate::OwnerType::Corporate);
        assert!(Gate::Corporate.is_open(&data));

        assert!(!EXCHANGE.is_open(&data));
        data.source_of_funds = "Policy Surrender".to_string();
        assert!(EXCHANGE.is_open(&data));

        assert!(!Gate::Category(PAR_BASED).is_open(&data));
        data.product_category = Some(ProductCategory::Ifa);
        assert!(Gate::Category(PAR_BASED).is_open(&data));
    }

    #[test]
    fn requirement_keys_are_record_keys() {
        let known = DiscoveryData::field_keys();
        for step in &STEPS {
            for req in step.required {
                if req.key.starts_with("riskQ") {
                    continue;
                }
                assert!(known.iter().any(|k| k == req.key), "unknown key {}", req.key);
            }
            for key in step.progress_fields {
                assert!(known.iter().any(|k| k == key), "unknown key {key}");
            }
        }
    }
}
