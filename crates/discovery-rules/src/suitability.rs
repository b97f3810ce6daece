//! Product suitability
//!
//! Each product category yields a short ranked list of verdicts built from
//! simple thresholds on ownership, time horizon, age and selected riders.
//! Age here is plain year subtraction; no birthday correction is applied.

use crate::resolver::{has_text, parse_leading_int};
use chrono::{Datelike, NaiveDate};
use discovery_model::{DiscoveryData, ProductCategory};
use serde::{Deserialize, Serialize};

/// Horizon assumed when none (or an unreadable one) was captured
pub const DEFAULT_TIME_HORIZON_YEARS: i64 = 10;

/// A named product option with a fitness judgment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuitabilityVerdict {
    /// Product option name
    pub option: String,
    /// Whether the option fits the client
    pub suitable: bool,
    /// Explanation shown to the advisor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SuitabilityVerdict {
    fn new(option: &str, suitable: bool, reason: Option<&str>) -> Self {
        Self {
            option: option.to_string(),
            suitable,
            reason: reason.map(str::to_string),
        }
    }

    fn fit(option: &str, reason: &str) -> Self {
        Self::new(option, true, Some(reason))
    }

    /// Suitable unless `failure` carries a reason
    fn unless(option: &str, failure: Option<&str>) -> Self {
        match failure {
            Some(reason) => Self::new(option, false, Some(reason)),
            None => Self::new(option, true, None),
        }
    }
}

/// Option name of the IFA verdict
pub const IFA_OPTION: &str = "IFA — Immediate Financing Arrangement";

/// Time horizon in whole years (leading integer, default 10)
#[must_use]
pub fn time_horizon_years(data: &DiscoveryData) -> i64 {
    parse_leading_int(&data.investment_time_horizon).unwrap_or(DEFAULT_TIME_HORIZON_YEARS)
}

/// Age as `as_of` year minus birth year, when the birth date starts with a year
#[must_use]
pub fn suitability_age(data: &DiscoveryData, as_of: NaiveDate) -> Option<i32> {
    let dob = data.date_of_birth.trim();
    let year = dob.get(..4)?;
    if !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    year.parse::<i32>().ok().map(|y| as_of.year() - y)
}

/// Suitability verdicts for the selected product category
#[must_use]
pub fn product_suitability(data: &DiscoveryData, as_of: NaiveDate) -> Vec<SuitabilityVerdict> {
    let horizon = time_horizon_years(data);
    let age = suitability_age(data, as_of);
    let age_over = |limit: i32| age.is_some_and(|a| a > limit);

    let Some(category) = data.product_category else {
        return vec![SuitabilityVerdict::new(
            "Product category not yet selected",
            false,
            Some("Select a product category in Goals & Objectives"),
        )];
    };

    match category {
        ProductCategory::Ifa => {
            let failure = if !data.is_corporate() {
                Some("IFA requires corporate ownership")
            } else if horizon < 10 {
                Some("IFA requires a time horizon of at least 10 years")
            } else if !has_text(&data.face_amount_requested) {
                Some("IFA requires a face amount for collateral assignment")
            } else if age_over(65) {
                Some("IFA collateral lending is rarely approved past age 65")
            } else {
                None
            };
            vec![
                SuitabilityVerdict::unless(IFA_OPTION, failure),
                SuitabilityVerdict::fit(
                    "Alternative: Par WL without collateral lending",
                    "Retains tax-advantaged growth without leverage risk",
                ),
            ]
        }
        ProductCategory::ParticipatingWholeLife => vec![
            SuitabilityVerdict::unless(
                "Participating Whole Life",
                (horizon < 10).then_some("Par WL needs a 10+ year horizon to build cash value"),
            ),
            SuitabilityVerdict::unless(
                "Par WL with premium offset",
                (horizon < 20).then_some("Premium offset typically needs 20+ years of dividends"),
            ),
            SuitabilityVerdict::unless(
                "Alternative: Term Life",
                (horizon >= 20).then_some("Long-term need identified; permanent coverage preferred"),
            ),
        ],
        ProductCategory::UniversalLife => vec![
            SuitabilityVerdict::unless(
                "Universal Life",
                (horizon < 10).then_some("UL needs a 10+ year horizon for tax-sheltered growth"),
            ),
            SuitabilityVerdict::unless(
                "UL with level COI",
                age_over(60).then_some("Level COI is costly at issue ages over 60"),
            ),
            SuitabilityVerdict::fit(
                "Alternative: Participating Whole Life",
                "Guaranteed values with less investment risk",
            ),
        ],
        ProductCategory::TermLife => {
            let waiver_failure = if !data.rider_disability_waiver {
                Some("Disability waiver rider not selected")
            } else if age_over(55) {
                Some("Disability waiver is generally unavailable past age 55")
            } else {
                None
            };
            vec![
                SuitabilityVerdict::unless(
                    "Term Life",
                    age_over(65).then_some("Term premiums escalate sharply past age 65"),
                ),
                SuitabilityVerdict::unless("Term with disability waiver", waiver_failure),
            ]
        }
    }
}
