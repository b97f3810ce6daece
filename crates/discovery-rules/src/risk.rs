//! Risk labeling
//!
//! Answers map to ordinals (A=0 .. D=3) and are averaged over the questions
//! answered so far. [`label_for_score`] is the single bucketing function;
//! every caller that shows a risk label goes through it.

use discovery_model::{DiscoveryData, RiskChoice, RiskQuestion};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Risk tolerance bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    /// No questions answered yet
    #[serde(rename = "Not assessed")]
    NotAssessed,
    /// Average below 1
    Conservative,
    /// Average in [1, 2)
    #[serde(rename = "Moderately Conservative")]
    ModeratelyConservative,
    /// Average in [2, 3)
    Moderate,
    /// Average in [3, 4)
    #[serde(rename = "Moderately Aggressive")]
    ModeratelyAggressive,
    /// Average of 4 or more
    Aggressive,
}

impl RiskLabel {
    /// Display string
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLabel::NotAssessed => "Not assessed",
            RiskLabel::Conservative => "Conservative",
            RiskLabel::ModeratelyConservative => "Moderately Conservative",
            RiskLabel::Moderate => "Moderate",
            RiskLabel::ModeratelyAggressive => "Moderately Aggressive",
            RiskLabel::Aggressive => "Aggressive",
        }
    }

    /// Whether any answers contributed to the label
    #[inline]
    #[must_use]
    pub fn is_assessed(self) -> bool {
        self != RiskLabel::NotAssessed
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mean answer ordinal, or `None` when nothing is answered
#[must_use]
pub fn risk_score(answers: &BTreeMap<RiskQuestion, RiskChoice>) -> Option<f64> {
    if answers.is_empty() {
        return None;
    }
    let total: u32 = answers.values().map(|c| u32::from(c.ordinal())).sum();
    #[allow(clippy::cast_precision_loss)]
    let count = answers.len() as f64;
    Some(f64::from(total) / count)
}

/// Canonical bucketing of a mean score
#[must_use]
pub fn label_for_score(score: Option<f64>) -> RiskLabel {
    match score {
        None => RiskLabel::NotAssessed,
        Some(s) if s < 1.0 => RiskLabel::Conservative,
        Some(s) if s < 2.0 => RiskLabel::ModeratelyConservative,
        Some(s) if s < 3.0 => RiskLabel::Moderate,
        Some(s) if s < 4.0 => RiskLabel::ModeratelyAggressive,
        Some(_) => RiskLabel::Aggressive,
    }
}

/// Risk label for a record
#[inline]
#[must_use]
pub fn risk_label(data: &DiscoveryData) -> RiskLabel {
    label_for_score(risk_score(&data.risk_answers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn answers(choices: &[RiskChoice]) -> BTreeMap<RiskQuestion, RiskChoice> {
        RiskQuestion::ALL.into_iter().zip(choices.iter().copied()).collect()
    }

    #[test]
    fn empty_answers_are_not_assessed() {
        assert_eq!(risk_score(&BTreeMap::new()), None);
        assert_eq!(label_for_score(None), RiskLabel::NotAssessed);
        assert_eq!(risk_label(&DiscoveryData::new()), RiskLabel::NotAssessed);
    }

    #[test]
    fn lower_bounds_are_inclusive() {
        assert_eq!(label_for_score(Some(0.0)), RiskLabel::Conservative);
        assert_eq!(label_for_score(Some(1.0)), RiskLabel::ModeratelyConservative);
        assert_eq!(label_for_score(Some(2.0)), RiskLabel::Moderate);
        assert_eq!(label_for_score(Some(2.999)), RiskLabel::Moderate);
        assert_eq!(label_for_score(Some(3.0)), RiskLabel::ModeratelyAggressive);
        assert_eq!(label_for_score(Some(4.0)), RiskLabel::Aggressive);
    }

    #[test]
    fn all_b_answers_average_exactly_one() {
        let a = answers(&[RiskChoice::B; 5]);
        assert_eq!(risk_score(&a), Some(1.0));
        assert_eq!(label_for_score(risk_score(&a)), RiskLabel::ModeratelyConservative);
    }

    #[test]
    fn partial_answers_average_over_answered_only() {
        let a = answers(&[RiskChoice::D, RiskChoice::B]);
        assert_eq!(risk_score(&a), Some(2.0));
        assert_eq!(label_for_score(risk_score(&a)), RiskLabel::Moderate);
    }

    #[test]
    fn label_serializes_as_display_text() {
        let json = serde_json::to_string(&RiskLabel::ModeratelyConservative).unwrap();
        assert_eq!(json, "\"Moderately Conservative\"");
    }

    fn choice() -> impl Strategy<Value = RiskChoice> {
        prop_oneof![
            Just(RiskChoice::A),
            Just(RiskChoice::B),
            Just(RiskChoice::C),
            Just(RiskChoice::D),
        ]
    }

    proptest! {
        #[test]
        fn any_answered_set_is_assessed(choices in proptest::collection::vec(choice(), 1..=5)) {
            let a = answers(&choices);
            let score = risk_score(&a).unwrap();
            prop_assert!((0.0..=3.0).contains(&score));
            prop_assert!(label_for_score(Some(score)).is_assessed());
        }

        #[test]
        fn bucketing_is_monotonic(x in 0.0f64..5.0, y in 0.0f64..5.0) {
            let (lo, hi) = if x <= y { (x, y) } else { (y, x) };
            let rank = |l: RiskLabel| match l {
                RiskLabel::NotAssessed => 0,
                RiskLabel::Conservative => 1,
                RiskLabel::ModeratelyConservative => 2,
                RiskLabel::Moderate => 3,
                RiskLabel::ModeratelyAggressive => 4,
                RiskLabel::Aggressive => 5,
            };
            prop_assert!(rank(label_for_score(Some(lo))) <= rank(label_for_score(Some(hi))));
        }
    }
}
