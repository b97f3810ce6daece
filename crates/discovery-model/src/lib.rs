//! Discovery Model
//!
//! Data types shared by the discovery wizard:
//! - [`DiscoveryData`], the flat client intake record
//! - typed gate values ([`OwnerType`], [`ProductCategory`]) and risk answers
//! - the Field Requirement Catalog ([`catalog`])
//! - carrier and product offerings ([`products`])
//!
//! The crate is pure data. Behaviour over the record lives in
//! `discovery-rules`; state and persistence live in `discovery-core`.

#![warn(unreachable_pub)]

pub mod catalog;
pub mod data;
pub mod products;
pub mod types;

pub use catalog::{FieldRequirement, Gate, StepDefinition, RISK_QUESTIONNAIRE, STEPS};
pub use data::{
    AlcoholDetail, Beneficiary, CorporateOwner, DiscoveryData, ExistingAnnuity, ExistingPolicy,
    InvestmentAllocation, SigningAuthority, UboDeclaration,
};
pub use products::{ProductOffering, CARRIERS};
pub use types::{OwnerType, ParseEnumError, ProductCategory, RiskChoice, RiskQuestion, StepId};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
