//! Identifiers and enumerated gate values
//!
//! Every value here is serialized with the exact display string the advisor
//! sees, so persisted records stay readable and stable across releases.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wizard step identifier (1-indexed)
///
/// Step ids are generated internally, but callers may still hand in ids that
/// are not part of the catalog. Lookups treat those as empty steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub u8);

impl StepId {
    /// First wizard step
    pub const FIRST: StepId = StepId(1);
    /// Final wizard step (Review & Summary)
    pub const LAST: StepId = StepId(9);

    /// Raw numeric value
    #[inline]
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Whether the id names a catalog step
    #[inline]
    #[must_use]
    pub fn is_valid(self) -> bool {
        (Self::FIRST.0..=Self::LAST.0).contains(&self.0)
    }

    /// Following step, or `None` past the end
    #[inline]
    #[must_use]
    pub fn next(self) -> Option<StepId> {
        (self.0 < Self::LAST.0).then(|| StepId(self.0 + 1))
    }

    /// Preceding step, floored at the first step
    #[inline]
    #[must_use]
    pub fn previous(self) -> StepId {
        if self.0 <= Self::FIRST.0 {
            Self::FIRST
        } else {
            StepId(self.0 - 1)
        }
    }

    /// Iterate over all catalog steps in order
    pub fn all() -> impl Iterator<Item = StepId> {
        (Self::FIRST.0..=Self::LAST.0).map(StepId)
    }
}

impl Default for StepId {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for StepId {
    fn from(value: u8) -> Self {
        StepId(value)
    }
}

/// Error returned when parsing an enumerated value fails
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind}: '{value}'")]
pub struct ParseEnumError {
    /// Which enumeration was being parsed
    pub kind: &'static str,
    /// Offending input
    pub value: String,
}

/// Who owns the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnerType {
    /// Natural person
    Individual,
    /// Corporation (unlocks corporate identity, UBO and financial blocks)
    Corporate,
}

impl OwnerType {
    /// Display string
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OwnerType::Individual => "Individual",
            OwnerType::Corporate => "Corporate",
        }
    }
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OwnerType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Individual" => Ok(OwnerType::Individual),
            "Corporate" => Ok(OwnerType::Corporate),
            other => Err(ParseEnumError {
                kind: "owner type",
                value: other.to_string(),
            }),
        }
    }
}

/// Product family; acts as the global mode switch for the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    /// Participating whole life
    #[serde(rename = "Participating Whole Life")]
    ParticipatingWholeLife,
    /// Universal life
    #[serde(rename = "Universal Life")]
    UniversalLife,
    /// Term life
    #[serde(rename = "Term Life")]
    TermLife,
    /// Immediate Financing Arrangement (corporate-owned par with collateral loan)
    #[serde(rename = "IFA")]
    Ifa,
}

impl ProductCategory {
    /// All categories in menu order
    pub const ALL: [ProductCategory; 4] = [
        ProductCategory::ParticipatingWholeLife,
        ProductCategory::UniversalLife,
        ProductCategory::TermLife,
        ProductCategory::Ifa,
    ];

    /// Display string
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProductCategory::ParticipatingWholeLife => "Participating Whole Life",
            ProductCategory::UniversalLife => "Universal Life",
            ProductCategory::TermLife => "Term Life",
            ProductCategory::Ifa => "IFA",
        }
    }

    /// Categories built on a participating whole life chassis
    #[inline]
    #[must_use]
    pub fn is_par_based(self) -> bool {
        matches!(self, ProductCategory::ParticipatingWholeLife | ProductCategory::Ifa)
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ProductCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "product category",
                value: s.to_string(),
            })
    }
}

/// Risk questionnaire key (`q1`..`q5`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskQuestion {
    /// Investment experience
    Q1,
    /// Reaction to a market decline
    Q2,
    /// Primary objective
    Q3,
    /// Time before funds are needed
    Q4,
    /// Comfort with volatility
    Q5,
}

impl RiskQuestion {
    /// All questions in order
    pub const ALL: [RiskQuestion; 5] = [
        RiskQuestion::Q1,
        RiskQuestion::Q2,
        RiskQuestion::Q3,
        RiskQuestion::Q4,
        RiskQuestion::Q5,
    ];

    /// Question for a 1-based number
    #[must_use]
    pub fn from_number(n: u32) -> Option<RiskQuestion> {
        match n {
            1 => Some(RiskQuestion::Q1),
            2 => Some(RiskQuestion::Q2),
            3 => Some(RiskQuestion::Q3),
            4 => Some(RiskQuestion::Q4),
            5 => Some(RiskQuestion::Q5),
            _ => None,
        }
    }

    /// 1-based question number
    #[must_use]
    pub fn number(self) -> u32 {
        match self {
            RiskQuestion::Q1 => 1,
            RiskQuestion::Q2 => 2,
            RiskQuestion::Q3 => 3,
            RiskQuestion::Q4 => 4,
            RiskQuestion::Q5 => 5,
        }
    }
}

/// Single-letter questionnaire answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskChoice {
    /// Most conservative
    A,
    /// Somewhat conservative
    B,
    /// Somewhat aggressive
    C,
    /// Most aggressive
    D,
}

impl RiskChoice {
    /// Ordinal used for scoring (A=0 .. D=3)
    #[inline]
    #[must_use]
    pub fn ordinal(self) -> u8 {
        match self {
            RiskChoice::A => 0,
            RiskChoice::B => 1,
            RiskChoice::C => 2,
            RiskChoice::D => 3,
        }
    }

    /// Letter as shown on the questionnaire
    #[must_use]
    pub fn letter(self) -> &'static str {
        match self {
            RiskChoice::A => "A",
            RiskChoice::B => "B",
            RiskChoice::C => "C",
            RiskChoice::D => "D",
        }
    }
}

impl FromStr for RiskChoice {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" => Ok(RiskChoice::A),
            "B" => Ok(RiskChoice::B),
            "C" => Ok(RiskChoice::C),
            "D" => Ok(RiskChoice::D),
            other => Err(ParseEnumError {
                kind: "risk choice",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_navigation_bounds() {
        assert_eq!(StepId::FIRST.previous(), StepId::FIRST);
        assert_eq!(StepId(4).previous(), StepId(3));
        assert_eq!(StepId(8).next(), Some(StepId::LAST));
        assert_eq!(StepId::LAST.next(), None);
        assert!(!StepId(0).is_valid());
        assert!(!StepId(10).is_valid());
        assert_eq!(StepId::all().count(), 9);
    }

    #[test]
    fn category_serializes_as_display_string() {
        let json = serde_json::to_string(&ProductCategory::ParticipatingWholeLife).unwrap();
        assert_eq!(json, "\"Participating Whole Life\"");
        let back: ProductCategory = serde_json::from_str("\"IFA\"").unwrap();
        assert_eq!(back, ProductCategory::Ifa);
        assert_eq!("Term Life".parse::<ProductCategory>().unwrap(), ProductCategory::TermLife);
        assert!("Annuity".parse::<ProductCategory>().is_err());
    }

    #[test]
    fn risk_keys_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&RiskQuestion::Q3).unwrap(), "\"q3\"");
        assert_eq!(RiskQuestion::from_number(6), None);
        assert_eq!(RiskChoice::D.ordinal(), 3);
    }
}
