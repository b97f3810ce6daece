use discovery_core::{
    DiscoveryConfig, DiscoveryReport, DiscoveryStore, FileStore, InMemoryCaseRegistry,
    KeyValueStore, StepNavigator,
};
use discovery_model::{DiscoveryData, OwnerType, StepId};
use discovery_rules::compliance::UL_ALLOCATION_CHECK;
use discovery_rules::suitability::IFA_OPTION;
use discovery_test_utils::{
    completed_record, corporate_ifa_record, fixed_date, minimal_step1, ul_record_with_allocations,
    FlakyStore,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;

#[test]
fn reset_round_trip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = DiscoveryConfig::new()
        .with_namespace("practice")
        .with_data_dir(dir.path());
    let files = FileStore::open(dir.path()).unwrap();
    files.set("advisor.settings", "{}").unwrap();

    let mut store = DiscoveryStore::load(files.clone(), &config.storage);
    store.update_data(|d| *d = completed_record());
    store.set_current_step(StepId(6));
    store.mark_step_complete(StepId(1));
    assert!(dir.path().join("practice.data").exists());

    let reopened = DiscoveryStore::load(files.clone(), &config.storage);
    assert_eq!(reopened.data(), &completed_record());
    assert_eq!(reopened.current_step(), StepId(6));

    store.reset_discovery();
    let reopened = DiscoveryStore::load(files.clone(), &config.storage);
    assert_eq!(reopened.data(), &DiscoveryData::default());
    assert_eq!(reopened.current_step(), StepId::FIRST);
    assert!(reopened.completed_steps().is_empty());
    assert_eq!(files.get("advisor.settings").unwrap().as_deref(), Some("{}"));
}

#[test]
fn storage_failures_never_corrupt_memory() {
    let backing = Arc::new(FlakyStore::new());
    let navigator = StepNavigator::new(InMemoryCaseRegistry::new()).with_as_of(fixed_date());
    let mut store = DiscoveryStore::open(Arc::clone(&backing));
    store.update_data(|d| *d = minimal_step1());

    backing.set_fail_writes(true);
    store.update_data(|d| d.occupation = "Pilot".into());
    navigator.continue_step(&mut store).unwrap();

    assert_eq!(store.data().occupation, "Pilot");
    assert_eq!(store.current_step(), StepId(2));
    assert!(store.is_step_completed(StepId(1)));

    // Only the writes made before the failure survive a reload.
    let reloaded = DiscoveryStore::open(Arc::clone(&backing));
    assert_eq!(reloaded.data(), &minimal_step1());
    assert_eq!(reloaded.current_step(), StepId(1));

    store.reset_discovery();
    assert_eq!(store.current_step(), StepId(1));
    backing.set_fail_writes(false);
    assert!(backing.inner().contains("discovery.data"));
}

#[test]
fn changing_a_gate_reopens_a_completed_step() {
    let mut store = DiscoveryStore::open(discovery_core::MemoryStore::new());
    store.update_data(|d| *d = minimal_step1());
    store.mark_step_complete(StepId(1));
    assert_eq!(store.missing_count(StepId(1)), 0);

    store.update_data(|d| d.owner_type = Some(OwnerType::Corporate));
    assert_eq!(store.missing_count(StepId(1)), 4);
    assert_eq!(store.step_completion(StepId(1)), 100);
}

#[test]
fn ul_allocations_must_total_one_hundred() {
    let report = DiscoveryReport::from_data(&ul_record_with_allocations(&["60", "40"]), fixed_date());
    assert!(report.compliance.find(UL_ALLOCATION_CHECK).unwrap().pass);

    let report = DiscoveryReport::from_data(&ul_record_with_allocations(&["60", "30"]), fixed_date());
    assert!(!report.compliance.find(UL_ALLOCATION_CHECK).unwrap().pass);
}

#[test]
fn ifa_requires_corporate_owner() {
    let corporate = DiscoveryReport::from_data(&corporate_ifa_record(), fixed_date());
    assert_eq!(corporate.suitability[0].option, IFA_OPTION);
    assert!(corporate.suitability[0].suitable);

    let mut individual = corporate_ifa_record();
    individual.owner_type = Some(OwnerType::Individual);
    let report = DiscoveryReport::from_data(&individual, fixed_date());
    assert!(!report.suitability[0].suitable);
    assert_eq!(
        report.suitability[0].reason.as_deref(),
        Some("IFA requires corporate ownership")
    );
}

proptest! {
    #[test]
    fn completion_stays_full_after_edits(step in 1u8..=9, wipe in any::<bool>()) {
        let mut store = DiscoveryStore::open(discovery_core::MemoryStore::new());
        store.update_data(|d| *d = completed_record());
        store.mark_step_complete(StepId(step));
        if wipe {
            store.update_data(|d| *d = DiscoveryData::default());
        }
        prop_assert_eq!(store.step_completion(StepId(step)), 100);
    }
}
