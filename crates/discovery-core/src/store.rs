//! Discovery State Store
//!
//! Authoritative owner of the wizard state: the record, the current step, the
//! set of completed steps, and the transient "show missing fields" flag.
//!
//! Every mutation of the record, the step pointer or the completed set is
//! written through to storage immediately. Storage failures are logged and
//! otherwise ignored; in-memory state is never rolled back because of them.

use crate::config::StorageConfig;
use crate::error::DiscoveryError;
use crate::storage::KeyValueStore;
use discovery_model::{DiscoveryData, StepId};
use discovery_rules::{completion_percent, missing_fields, MissingField};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Wizard state with write-through persistence
#[derive(Debug)]
pub struct DiscoveryStore<S> {
    storage: S,
    keys: StorageConfig,
    data: DiscoveryData,
    current_step: StepId,
    completed_steps: BTreeSet<StepId>,
    highlight_missing: bool,
}

impl<S: KeyValueStore> DiscoveryStore<S> {
    /// Load state from `storage` using the default namespace
    #[must_use]
    pub fn open(storage: S) -> Self {
        Self::load(storage, &StorageConfig::default())
    }

    /// Load state from `storage`
    ///
    /// Missing or unreadable values fall back to defaults. The stored record
    /// is merged over the default record so fields added since it was written
    /// get their defaults.
    #[must_use]
    pub fn load(storage: S, config: &StorageConfig) -> Self {
        let keys = config.clone();
        let data = load_data(&storage, &keys.data_key());
        let current_step = load_step(&storage, &keys.step_key());
        let completed_steps = load_completed(&storage, &keys.completed_key());
        tracing::debug!(
            step = %current_step,
            completed = completed_steps.len(),
            "discovery state loaded"
        );
        Self {
            storage,
            keys,
            data,
            current_step,
            completed_steps,
            highlight_missing: false,
        }
    }

    /// Current record
    #[inline]
    #[must_use]
    pub fn data(&self) -> &DiscoveryData {
        &self.data
    }

    /// Step the wizard is on
    #[inline]
    #[must_use]
    pub fn current_step(&self) -> StepId {
        self.current_step
    }

    /// Steps marked complete
    #[inline]
    #[must_use]
    pub fn completed_steps(&self) -> &BTreeSet<StepId> {
        &self.completed_steps
    }

    /// Whether `step` has been marked complete
    #[inline]
    #[must_use]
    pub fn is_step_completed(&self, step: StepId) -> bool {
        self.completed_steps.contains(&step)
    }

    /// Whether the UI should highlight missing fields
    #[inline]
    #[must_use]
    pub fn highlight_missing(&self) -> bool {
        self.highlight_missing
    }

    /// Backing storage
    #[inline]
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Apply a partial update to the record
    ///
    /// No validation happens here; the navigation controller validates when
    /// the advisor tries to continue.
    pub fn update_data(&mut self, update: impl FnOnce(&mut DiscoveryData)) {
        update(&mut self.data);
        self.persist_data();
    }

    /// Apply a JSON partial update (camelCase keys) to the record
    ///
    /// # Errors
    /// - [`DiscoveryError::InvalidPatch`] if `patch` is not an object or a
    ///   value has the wrong shape
    /// - [`DiscoveryError::UnknownField`] if a key is not a record field
    ///
    /// The record is unchanged when an error is returned. A floored list
    /// patched to `[]` comes back with one blank entry.
    pub fn apply_patch(&mut self, patch: &Value) -> Result<(), DiscoveryError> {
        let Value::Object(fields) = patch else {
            return Err(DiscoveryError::InvalidPatch(
                "patch must be a JSON object".to_string(),
            ));
        };
        let mut current = match serde_json::to_value(&self.data) {
            Ok(Value::Object(map)) => map,
            Ok(_) => Map::new(),
            Err(e) => return Err(DiscoveryError::InvalidPatch(e.to_string())),
        };
        for (key, value) in fields {
            if !current.contains_key(key) {
                return Err(DiscoveryError::UnknownField(key.clone()));
            }
            current.insert(key.clone(), value.clone());
        }
        let mut merged: DiscoveryData = serde_json::from_value(Value::Object(current))
            .map_err(|e| DiscoveryError::InvalidPatch(e.to_string()))?;
        if merged.restore_list_floors() {
            tracing::debug!("patch emptied a floored list; blank entry restored");
        }
        self.data = merged;
        self.persist_data();
        Ok(())
    }

    /// Move the step pointer; always dismisses the missing-field highlight
    pub fn set_current_step(&mut self, step: StepId) {
        self.current_step = step;
        self.highlight_missing = false;
        tracing::debug!(step = %step, "current step changed");
        self.persist_step();
    }

    /// Mark `step` complete. Returns whether it was newly added.
    pub fn mark_step_complete(&mut self, step: StepId) -> bool {
        let added = self.completed_steps.insert(step);
        if added {
            tracing::debug!(step = %step, "step marked complete");
            self.persist_completed();
        }
        added
    }

    /// Show or dismiss the missing-field highlight (never persisted)
    pub fn set_highlight_missing(&mut self, on: bool) {
        self.highlight_missing = on;
    }

    /// Start a new case: defaults in memory and the discovery keys purged
    ///
    /// Keys outside the discovery namespace are left alone.
    pub fn reset_discovery(&mut self) {
        self.data = DiscoveryData::default();
        self.current_step = StepId::FIRST;
        self.completed_steps.clear();
        self.highlight_missing = false;
        for key in [
            self.keys.data_key(),
            self.keys.step_key(),
            self.keys.completed_key(),
        ] {
            if let Err(e) = self.storage.remove(&key) {
                tracing::warn!(key = %key, error = %e, "failed to purge discovery key");
            }
        }
        tracing::info!(namespace = %self.keys.namespace, "discovery reset");
    }

    /// Progress estimate for `step` (display only)
    #[must_use]
    pub fn step_completion(&self, step: StepId) -> u8 {
        completion_percent(&self.data, step, &self.completed_steps)
    }

    /// Unmet requirements of `step`
    #[must_use]
    pub fn missing_fields(&self, step: StepId) -> Vec<MissingField> {
        missing_fields(&self.data, step)
    }

    /// Number of unmet requirements of `step`
    #[must_use]
    pub fn missing_count(&self, step: StepId) -> usize {
        self.missing_fields(step).len()
    }

    fn persist_data(&self) {
        match serde_json::to_string(&self.data) {
            Ok(text) => self.write(&self.keys.data_key(), &text),
            Err(e) => tracing::warn!(error = %e, "failed to serialize discovery record"),
        }
    }

    fn persist_step(&self) {
        self.write(&self.keys.step_key(), &self.current_step.to_string());
    }

    fn persist_completed(&self) {
        match serde_json::to_string(&self.completed_steps) {
            Ok(text) => self.write(&self.keys.completed_key(), &text),
            Err(e) => tracing::warn!(error = %e, "failed to serialize completed steps"),
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            tracing::warn!(key = %key, error = %e, "discovery state not persisted");
        }
    }
}

fn read(storage: &impl KeyValueStore, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "failed to read discovery state");
            None
        }
    }
}

fn load_data(storage: &impl KeyValueStore, key: &str) -> DiscoveryData {
    let Some(text) = read(storage, key) else {
        return DiscoveryData::default();
    };
    merge_over_defaults(&text).unwrap_or_else(|e| {
        tracing::warn!(key = %key, error = %e, "stored discovery record unreadable; using defaults");
        DiscoveryData::default()
    })
}

/// Overlay a stored JSON object onto the default record
///
/// Keys are applied one at a time; a key the current record shape cannot read
/// is dropped with a warning and the rest of the record survives. Only a blob
/// that is not a JSON object fails as a whole.
fn merge_over_defaults(text: &str) -> Result<DiscoveryData, serde_json::Error> {
    let stored: Value = serde_json::from_str(text)?;
    let Value::Object(stored) = stored else {
        return Err(<serde_json::Error as serde::de::Error>::custom(
            "stored record is not an object",
        ));
    };
    let defaults = match serde_json::to_value(DiscoveryData::default())? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let mut merged = defaults.clone();
    for (key, value) in stored {
        if !defaults.contains_key(&key) {
            continue;
        }
        let mut single = defaults.clone();
        single.insert(key.clone(), value.clone());
        match serde_json::from_value::<DiscoveryData>(Value::Object(single)) {
            Ok(_) => {
                merged.insert(key, value);
            }
            Err(e) => {
                tracing::warn!(field = %key, error = %e, "dropping unreadable stored field");
            }
        }
    }
    let mut data: DiscoveryData = serde_json::from_value(Value::Object(merged))?;
    if data.restore_list_floors() {
        tracing::debug!("stored record had an empty floored list; blank entry restored");
    }
    Ok(data)
}

fn load_step(storage: &impl KeyValueStore, key: &str) -> StepId {
    read(storage, key)
        .and_then(|text| text.trim().parse::<u8>().ok())
        .map(StepId)
        .filter(|s| s.is_valid())
        .unwrap_or(StepId::FIRST)
}

fn load_completed(storage: &impl KeyValueStore, key: &str) -> BTreeSet<StepId> {
    let Some(text) = read(storage, key) else {
        return BTreeSet::new();
    };
    match serde_json::from_str::<Vec<StepId>>(&text) {
        Ok(steps) => steps.into_iter().filter(|s| s.is_valid()).collect(),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "stored completed steps unreadable");
            BTreeSet::new()
        }
    }
}
