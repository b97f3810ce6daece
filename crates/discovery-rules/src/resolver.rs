//! Field Resolver
//!
//! Decides whether a field counts as "filled". Two key shapes are special:
//! `riskQ<N>` reads the questionnaire map, and `primaryGoals` needs at least
//! one selection. Everything else is read from the serialized record.

use discovery_model::{DiscoveryData, RiskQuestion};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static RISK_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^riskQ(\d+)$").expect("risk key pattern is valid"));

static LEADING_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("float pattern is valid")
});

static LEADING_INT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+").expect("integer pattern is valid"));

/// Serialized view of a record for repeated key lookups
#[derive(Debug, Clone)]
pub struct FieldSnapshot<'a> {
    data: &'a DiscoveryData,
    value: Value,
}

impl<'a> FieldSnapshot<'a> {
    /// Capture a record
    #[must_use]
    pub fn new(data: &'a DiscoveryData) -> Self {
        let value = data.to_value().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "discovery record failed to serialize");
            Value::Null
        });
        Self { data, value }
    }

    /// Underlying record
    #[inline]
    #[must_use]
    pub fn data(&self) -> &'a DiscoveryData {
        self.data
    }

    /// Whether `key` holds a value that counts as filled
    #[must_use]
    pub fn is_present(&self, key: &str) -> bool {
        if let Some(caps) = RISK_KEY.captures(key) {
            return caps[1]
                .parse::<u32>()
                .ok()
                .and_then(RiskQuestion::from_number)
                .is_some_and(|q| self.data.risk_answers.contains_key(&q));
        }
        if key == "primaryGoals" {
            return !self.data.primary_goals.is_empty();
        }
        self.value.get(key).is_some_and(value_present)
    }
}

/// Presence rule for a raw JSON value
fn value_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f > 0.0),
        Value::Bool(b) => *b,
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Whether `key` is filled in `data`
///
/// Prefer [`FieldSnapshot`] when checking many keys against one record.
#[must_use]
pub fn is_field_present(data: &DiscoveryData, key: &str) -> bool {
    FieldSnapshot::new(data).is_present(key)
}

/// Whether a free-text field holds anything besides whitespace
#[inline]
#[must_use]
pub fn has_text(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Leading numeric prefix of `text` (e.g. `"60%"` reads as 60), or `None`
#[must_use]
pub fn parse_leading_float(text: &str) -> Option<f64> {
    LEADING_FLOAT
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Leading signed integer in `text`, or `None`
///
/// Values beyond the `i64` range saturate toward their sign.
#[must_use]
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let found = LEADING_INT.find(text.trim_start())?.as_str();
    match found.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) if found.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}
