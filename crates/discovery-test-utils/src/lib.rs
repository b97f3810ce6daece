//! Testing utilities for the discovery workspace
//!
//! Shared record fixtures and a storage backend that can be told to fail.

#![allow(missing_docs)]

use chrono::NaiveDate;
use discovery_core::{KeyValueStore, MemoryStore, StorageError};
use discovery_model::{
    DiscoveryData, InvestmentAllocation, OwnerType, ProductCategory, RiskChoice, RiskQuestion,
};
use std::sync::atomic::{AtomicBool, Ordering};

/// Fixed "today" used by fixtures that derive ages
pub fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

/// Individual client with exactly the step 1 requirements filled
pub fn minimal_step1() -> DiscoveryData {
    let mut data = DiscoveryData::default();
    data.first_name = "Jane".into();
    data.last_name = "Doe".into();
    data.date_of_birth = "1980-01-01".into();
    data.gender = "Female".into();
    data.smoker_status = "Non-Smoker".into();
    data.phone = "6045550100".into();
    data.email = "j@x.com".into();
    data.marital_status = "Single".into();
    data.annual_income = "100000".into();
    data.owner_type = Some(OwnerType::Individual);
    data
}

/// Individual Term Life record satisfying every step through the recommendation
pub fn completed_record() -> DiscoveryData {
    let mut data = minimal_step1();
    data.occupation = "Engineer".into();

    data.total_assets = "500000".into();
    data.total_liabilities = "200000".into();
    data.tax_bracket = "40%".into();
    data.tax_province = "BC".into();
    data.source_of_funds = "Employment Income".into();
    data.reason_for_purchase = "Income replacement".into();

    data.prior_application_declined = "No".into();
    data.other_applications_pending = "No".into();

    data.product_category = Some(ProductCategory::TermLife);
    data.toggle_primary_goal("Income replacement");
    data.face_amount_requested = "1000000".into();
    data.investment_time_horizon = "20 years".into();
    data.liquidity_need = "Low".into();

    for field in [
        &mut data.hazardous_activities,
        &mut data.aviation_activity,
        &mut data.foreign_travel,
        &mut data.alcohol_use,
        &mut data.drug_use,
        &mut data.driving_violations,
        &mut data.criminal_record,
        &mut data.bankruptcy_history,
        &mut data.family_medical_history,
        &mut data.current_medical_treatment,
    ] {
        *field = "No".into();
    }

    for question in RiskQuestion::ALL {
        data.answer_risk_question(question, RiskChoice::B);
    }
    data.suitability_notes = "Young family; needs income replacement for 20 years.".into();

    data.selected_carrier = "Sun Life".into();
    data.selected_product = "Sun Term".into();
    data.term_period = "20".into();
    data
}

/// Corporate IFA record with financing and corporate details captured
pub fn corporate_ifa_record() -> DiscoveryData {
    let mut data = minimal_step1();
    data.owner_type = Some(OwnerType::Corporate);
    data.corporate_name = "Doe Holdings Ltd.".into();
    data.business_number = "123456789".into();
    data.incorporation_jurisdiction = "BC".into();
    data.third_party_payor = "No".into();
    data.product_category = Some(ProductCategory::Ifa);
    data.face_amount_requested = "2000000".into();
    data.investment_time_horizon = "25".into();
    data.ifa_lender_name = "Big Bank".into();
    data.ifa_loan_amount = "1500000".into();
    data.key_person_value = "3000000".into();
    data
}

/// Universal Life record with the given allocation percentages
pub fn ul_record_with_allocations(percentages: &[&str]) -> DiscoveryData {
    let mut data = minimal_step1();
    data.product_category = Some(ProductCategory::UniversalLife);
    data.investment_allocations = percentages
        .iter()
        .enumerate()
        .map(|(i, p)| InvestmentAllocation::new(format!("Fund {}", i + 1), *p))
        .collect();
    data
}

/// In-memory store whose writes can be switched to fail
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `set` and `remove` calls fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// The backing store, bypassing failure injection
    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StorageError::Unavailable("quota exceeded".into()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.inner.remove(key)
    }
}
