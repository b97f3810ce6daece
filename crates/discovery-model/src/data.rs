//! The discovery record
//!
//! [`DiscoveryData`] is a flat record covering the whole client intake. It is
//! serialized with camelCase keys, which are also the keys the requirement
//! catalog and the field resolver use.

use crate::products;
use crate::types::{OwnerType, ProductCategory, RiskChoice, RiskQuestion};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named beneficiary with a percentage share
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Beneficiary {
    pub name: String,
    pub relationship: String,
    pub percentage: String,
}

/// Person authorized to sign for a corporate owner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SigningAuthority {
    pub name: String,
    pub email: String,
}

/// Ultimate beneficial owner declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UboDeclaration {
    pub name: String,
    pub ownership_percent: String,
    /// Politically exposed person / head of international organization ("Yes"/"No")
    pub pep_hio_status: String,
}

/// Shareholder of a corporate owner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CorporateOwner {
    pub name: String,
    pub title: String,
    pub ownership_percent: String,
    pub insurance_in_force: String,
    pub insurance_applied_for: String,
}

/// Policy already held by the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExistingPolicy {
    pub carrier: String,
    pub policy_type: String,
    pub face_amount: String,
    pub issue_year: String,
}

/// Annuity already held by the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExistingAnnuity {
    pub carrier: String,
    pub annuity_type: String,
    pub value: String,
}

/// Alcohol consumption detail (revealed when alcohol use is disclosed)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlcoholDetail {
    pub beverage_type: String,
    pub quantity: String,
    pub frequency: String,
}

/// UL investment account allocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvestmentAllocation {
    pub account_name: String,
    pub percentage: String,
}

impl InvestmentAllocation {
    /// Create an allocation line
    #[must_use]
    pub fn new(account_name: impl Into<String>, percentage: impl Into<String>) -> Self {
        Self {
            account_name: account_name.into(),
            percentage: percentage.into(),
        }
    }
}

/// Complete client intake record
///
/// Text fields use the empty string for "unset". Lists that carry a floor
/// (beneficiaries, signing authorities, alcohol details, investment
/// allocations) start with one blank entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct DiscoveryData {
    // Identity & contact
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub smoker_status: String,
    pub government_id_type: String,
    pub government_id_number: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub phone: String,
    pub email: String,

    // Household & employment
    pub marital_status: String,
    pub dependents: String,
    pub employment_status: String,
    pub occupation: String,
    pub employer: String,
    pub annual_income: String,

    pub beneficiaries: Vec<Beneficiary>,

    // Owner
    pub owner_type: Option<OwnerType>,
    pub corporate_name: String,
    pub business_number: String,
    pub incorporation_date: String,
    pub incorporation_jurisdiction: String,
    pub signing_authorities: Vec<SigningAuthority>,
    pub ubo_declarations: Vec<UboDeclaration>,
    pub third_party_payor: String,
    pub third_party_payor_details: String,

    // Financial profile
    pub total_assets: String,
    pub total_liabilities: String,
    pub net_worth: String,
    pub tax_bracket: String,
    pub tax_province: String,
    pub source_of_funds: String,
    pub exchange_carrier: String,
    pub exchange_policy_number: String,
    pub exchange_amount: String,
    pub reason_for_purchase: String,

    // IFA financing
    pub ifa_lender_name: String,
    pub ifa_loan_amount: String,
    pub ifa_loan_interest_rate: String,
    pub key_person_value: String,
    pub ifa_collateral_risk_ack: bool,
    pub ifa_interest_deductibility_ack: bool,

    // Corporate financials
    pub nature_of_business: String,
    pub corporate_assets: String,
    pub corporate_liabilities: String,
    pub net_profit_year1: String,
    pub net_profit_year2: String,
    pub corporate_owners: Vec<CorporateOwner>,

    // Current coverage
    pub existing_policies: Vec<ExistingPolicy>,
    pub existing_annuities: Vec<ExistingAnnuity>,
    pub replacing_existing_coverage: bool,
    pub replacement_disclosure_provided: bool,
    pub prior_application_declined: String,
    pub other_applications_pending: String,

    // Goals
    pub product_category: Option<ProductCategory>,
    pub primary_goals: IndexSet<String>,
    pub face_amount_requested: String,
    pub investment_time_horizon: String,
    pub liquidity_need: String,
    pub liquidity_explanation: String,

    // Lifestyle & underwriting
    pub hazardous_activities: String,
    pub aviation_activity: String,
    pub foreign_travel: String,
    pub alcohol_use: String,
    pub drug_use: String,
    pub driving_violations: String,
    pub criminal_record: String,
    pub bankruptcy_history: String,
    pub family_medical_history: String,
    pub current_medical_treatment: String,
    pub alcohol_details: Vec<AlcoholDetail>,

    pub risk_answers: BTreeMap<RiskQuestion, RiskChoice>,

    pub suitability_notes: String,

    // Product recommendation
    pub selected_carrier: String,
    pub selected_product: String,
    pub rider_disability_waiver: bool,
    pub rider_critical_illness: bool,
    pub rider_child_term: bool,
    pub par_plan_design: String,
    pub dividend_option: String,
    pub edo_amount: String,
    pub premium_offset_intent: String,
    pub par_illustration_ack: bool,
    pub ul_death_benefit_option: String,
    pub ul_coi_structure: String,
    pub investment_allocations: Vec<InvestmentAllocation>,
    pub ul_planned_premium: String,
    pub ul_exempt_test_ack: bool,
    pub term_period: String,
    pub term_conversion: String,
    pub term_rop: bool,
    pub vitality_enrollment: String,
    pub vitality_consent: bool,
    pub recommendation_narrative: String,
    pub narrative_seeded: bool,
}

impl Default for DiscoveryData {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            middle_name: String::new(),
            last_name: String::new(),
            date_of_birth: String::new(),
            gender: String::new(),
            smoker_status: String::new(),
            government_id_type: String::new(),
            government_id_number: String::new(),
            address: String::new(),
            city: String::new(),
            postal_code: String::new(),
            phone: String::new(),
            email: String::new(),
            marital_status: String::new(),
            dependents: String::new(),
            employment_status: String::new(),
            occupation: String::new(),
            employer: String::new(),
            annual_income: String::new(),
            beneficiaries: vec![Beneficiary::default()],
            owner_type: None,
            corporate_name: String::new(),
            business_number: String::new(),
            incorporation_date: String::new(),
            incorporation_jurisdiction: String::new(),
            signing_authorities: vec![SigningAuthority::default()],
            ubo_declarations: Vec::new(),
            third_party_payor: String::new(),
            third_party_payor_details: String::new(),
            total_assets: String::new(),
            total_liabilities: String::new(),
            net_worth: String::new(),
            tax_bracket: String::new(),
            tax_province: String::new(),
            source_of_funds: String::new(),
            exchange_carrier: String::new(),
            exchange_policy_number: String::new(),
            exchange_amount: String::new(),
            reason_for_purchase: String::new(),
            ifa_lender_name: String::new(),
            ifa_loan_amount: String::new(),
            ifa_loan_interest_rate: String::new(),
            key_person_value: String::new(),
            ifa_collateral_risk_ack: false,
            ifa_interest_deductibility_ack: false,
            nature_of_business: String::new(),
            corporate_assets: String::new(),
            corporate_liabilities: String::new(),
            net_profit_year1: String::new(),
            net_profit_year2: String::new(),
            corporate_owners: Vec::new(),
            existing_policies: Vec::new(),
            existing_annuities: Vec::new(),
            replacing_existing_coverage: false,
            replacement_disclosure_provided: false,
            prior_application_declined: String::new(),
            other_applications_pending: String::new(),
            product_category: None,
            primary_goals: IndexSet::new(),
            face_amount_requested: String::new(),
            investment_time_horizon: String::new(),
            liquidity_need: String::new(),
            liquidity_explanation: String::new(),
            hazardous_activities: String::new(),
            aviation_activity: String::new(),
            foreign_travel: String::new(),
            alcohol_use: String::new(),
            drug_use: String::new(),
            driving_violations: String::new(),
            criminal_record: String::new(),
            bankruptcy_history: String::new(),
            family_medical_history: String::new(),
            current_medical_treatment: String::new(),
            alcohol_details: vec![AlcoholDetail::default()],
            risk_answers: BTreeMap::new(),
            suitability_notes: String::new(),
            selected_carrier: String::new(),
            selected_product: String::new(),
            rider_disability_waiver: false,
            rider_critical_illness: false,
            rider_child_term: false,
            par_plan_design: String::new(),
            dividend_option: String::new(),
            edo_amount: String::new(),
            premium_offset_intent: String::new(),
            par_illustration_ack: false,
            ul_death_benefit_option: String::new(),
            ul_coi_structure: String::new(),
            investment_allocations: vec![InvestmentAllocation::default()],
            ul_planned_premium: String::new(),
            ul_exempt_test_ack: false,
            term_period: String::new(),
            term_conversion: String::new(),
            term_rop: false,
            vitality_enrollment: String::new(),
            vitality_consent: false,
            recommendation_narrative: String::new(),
            narrative_seeded: false,
        }
    }
}

/// Remove `index` from `list` unless that would leave fewer than `floor` items
fn remove_with_floor<T>(list: &mut Vec<T>, index: usize, floor: usize) -> bool {
    if index >= list.len() || list.len() <= floor {
        return false;
    }
    list.remove(index);
    true
}

fn restore_floor<T: Default>(list: &mut Vec<T>) -> bool {
    if list.is_empty() {
        list.push(T::default());
        true
    } else {
        false
    }
}

impl DiscoveryData {
    /// Create a blank record
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the policy owner is a corporation
    #[inline]
    #[must_use]
    pub fn is_corporate(&self) -> bool {
        self.owner_type == Some(OwnerType::Corporate)
    }

    /// Whether the selected category matches `category`
    #[inline]
    #[must_use]
    pub fn is_category(&self, category: ProductCategory) -> bool {
        self.product_category == Some(category)
    }

    /// Client name as "First Last", skipping empty parts
    #[must_use]
    pub fn full_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Number of risk questions answered
    #[inline]
    #[must_use]
    pub fn risk_answer_count(&self) -> usize {
        self.risk_answers.len()
    }

    /// Record a questionnaire answer
    pub fn answer_risk_question(&mut self, question: RiskQuestion, choice: RiskChoice) {
        self.risk_answers.insert(question, choice);
    }

    /// Add the goal if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle_primary_goal(&mut self, goal: &str) -> bool {
        if self.primary_goals.shift_remove(goal) {
            false
        } else {
            self.primary_goals.insert(goal.to_string());
            true
        }
    }

    /// Select a carrier, clearing the product when the new carrier does not offer it
    pub fn select_carrier(&mut self, carrier: &str) {
        self.selected_carrier = carrier.to_string();
        if self.selected_product.is_empty() {
            return;
        }
        let offered = self.product_category.is_some_and(|category| {
            products::products_for(carrier, category)
                .iter()
                .any(|p| p.name == self.selected_product)
        });
        if !offered {
            self.selected_product.clear();
        }
    }

    /// Append a blank beneficiary
    pub fn add_beneficiary(&mut self) {
        self.beneficiaries.push(Beneficiary::default());
    }

    /// Remove a beneficiary; the last one is kept
    pub fn remove_beneficiary(&mut self, index: usize) -> bool {
        remove_with_floor(&mut self.beneficiaries, index, 1)
    }

    /// Append a blank signing authority
    pub fn add_signing_authority(&mut self) {
        self.signing_authorities.push(SigningAuthority::default());
    }

    /// Remove a signing authority; the last one is kept
    pub fn remove_signing_authority(&mut self, index: usize) -> bool {
        remove_with_floor(&mut self.signing_authorities, index, 1)
    }

    /// Append a blank alcohol detail row
    pub fn add_alcohol_detail(&mut self) {
        self.alcohol_details.push(AlcoholDetail::default());
    }

    /// Remove an alcohol detail row; the last one is kept
    pub fn remove_alcohol_detail(&mut self, index: usize) -> bool {
        remove_with_floor(&mut self.alcohol_details, index, 1)
    }

    /// Append an investment allocation line
    pub fn add_investment_allocation(&mut self, allocation: InvestmentAllocation) {
        self.investment_allocations.push(allocation);
    }

    /// Remove an allocation line; the last one is kept
    pub fn remove_investment_allocation(&mut self, index: usize) -> bool {
        remove_with_floor(&mut self.investment_allocations, index, 1)
    }

    /// Append a UBO declaration
    pub fn add_ubo_declaration(&mut self, declaration: UboDeclaration) {
        self.ubo_declarations.push(declaration);
    }

    /// Remove a UBO declaration (may empty the list)
    pub fn remove_ubo_declaration(&mut self, index: usize) -> bool {
        remove_with_floor(&mut self.ubo_declarations, index, 0)
    }

    /// Append a corporate owner
    pub fn add_corporate_owner(&mut self, owner: CorporateOwner) {
        self.corporate_owners.push(owner);
    }

    /// Remove a corporate owner (may empty the list)
    pub fn remove_corporate_owner(&mut self, index: usize) -> bool {
        remove_with_floor(&mut self.corporate_owners, index, 0)
    }

    /// Append an existing policy
    pub fn add_existing_policy(&mut self, policy: ExistingPolicy) {
        self.existing_policies.push(policy);
    }

    /// Remove an existing policy (may empty the list)
    pub fn remove_existing_policy(&mut self, index: usize) -> bool {
        remove_with_floor(&mut self.existing_policies, index, 0)
    }

    /// Append an existing annuity
    pub fn add_existing_annuity(&mut self, annuity: ExistingAnnuity) {
        self.existing_annuities.push(annuity);
    }

    /// Remove an existing annuity (may empty the list)
    pub fn remove_existing_annuity(&mut self, index: usize) -> bool {
        remove_with_floor(&mut self.existing_annuities, index, 0)
    }

    /// Put one blank entry back into every floored list that is empty
    ///
    /// Returns whether anything was restored. Lists replaced wholesale (a JSON
    /// patch or a stored record) bypass the `remove_*` floor, so callers that
    /// accept whole lists run this afterwards.
    pub fn restore_list_floors(&mut self) -> bool {
        let mut restored = false;
        restored |= restore_floor(&mut self.beneficiaries);
        restored |= restore_floor(&mut self.signing_authorities);
        restored |= restore_floor(&mut self.alcohol_details);
        restored |= restore_floor(&mut self.investment_allocations);
        restored
    }

    /// Serialize to a JSON value keyed by field key
    ///
    /// # Errors
    /// Only fails if serialization itself fails, which a plain record never does
    /// in practice.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Field keys known to the record, in declaration order
    #[must_use]
    pub fn field_keys() -> Vec<String> {
        match serde_json::to_value(Self::default()) {
            Ok(serde_json::Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }
}
