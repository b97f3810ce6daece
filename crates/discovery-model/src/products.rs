//! Carrier and product offerings
//!
//! The product list depends on both the carrier and the product category.
//! IFA is written on a participating whole life chassis, so it draws from the
//! par shelf of each carrier.

use crate::types::ProductCategory;

/// A product a carrier files under one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductOffering {
    /// Carrier name
    pub carrier: &'static str,
    /// Category the product is filed under
    pub category: ProductCategory,
    /// Product name shown to the advisor
    pub name: &'static str,
}

const fn offering(
    carrier: &'static str,
    category: ProductCategory,
    name: &'static str,
) -> ProductOffering {
    ProductOffering {
        carrier,
        category,
        name,
    }
}

use ProductCategory::{ParticipatingWholeLife as Par, TermLife as Term, UniversalLife as Ul};

/// Carrier whose products carry the Vitality wellness program
pub const VITALITY_CARRIER: &str = "Manulife";

/// Carriers in menu order
pub const CARRIERS: [&str; 5] = [
    "Canada Life",
    "Equitable Life",
    "Manulife",
    "RBC Insurance",
    "Sun Life",
];

/// Full product shelf
pub const OFFERINGS: &[ProductOffering] = &[
    offering("Canada Life", Par, "Canada Life Par"),
    offering("Canada Life", Par, "Canada Life Par Estate"),
    offering("Canada Life", Ul, "Canada Life Universal Life"),
    offering("Canada Life", Term, "Canada Life Term 10"),
    offering("Canada Life", Term, "Canada Life Term 20"),
    offering("Equitable Life", Par, "Equitable Par"),
    offering("Equitable Life", Ul, "Equitable Estate UL"),
    offering("Equitable Life", Term, "Equitable Term"),
    offering("Manulife", Par, "Manulife Par"),
    offering("Manulife", Ul, "Manulife UL"),
    offering("Manulife", Term, "Manulife Family Term"),
    offering("Manulife", Term, "Manulife Term with Vitality"),
    offering("RBC Insurance", Ul, "RBC Universal Life"),
    offering("RBC Insurance", Term, "RBC YourTerm"),
    offering("Sun Life", Par, "Sun Par Protector"),
    offering("Sun Life", Par, "Sun Par Accumulator"),
    offering("Sun Life", Ul, "Sun Universal Life"),
    offering("Sun Life", Term, "Sun Term"),
];

/// Shelf category a product category draws from
#[inline]
fn shelf(category: ProductCategory) -> ProductCategory {
    match category {
        ProductCategory::Ifa => ProductCategory::ParticipatingWholeLife,
        other => other,
    }
}

/// Products `carrier` offers for `category`
#[must_use]
pub fn products_for(carrier: &str, category: ProductCategory) -> Vec<ProductOffering> {
    let wanted = shelf(category);
    OFFERINGS
        .iter()
        .filter(|p| p.carrier == carrier && p.category == wanted)
        .copied()
        .collect()
}

/// Carriers with at least one product for `category`
#[must_use]
pub fn carriers_for(category: ProductCategory) -> Vec<&'static str> {
    CARRIERS
        .into_iter()
        .filter(|c| !products_for(c, category).is_empty())
        .collect()
}

/// Goal vocabulary offered for a category
#[must_use]
pub fn goal_options(category: ProductCategory) -> &'static [&'static str] {
    match category {
        ProductCategory::ParticipatingWholeLife => &[
            "Estate preservation",
            "Tax-advantaged growth",
            "Final expenses",
            "Legacy planning",
        ],
        ProductCategory::UniversalLife => &[
            "Investment flexibility",
            "Estate preservation",
            "Tax-sheltered accumulation",
            "Estate equalization",
        ],
        ProductCategory::TermLife => &[
            "Income replacement",
            "Mortgage protection",
            "Education funding",
            "Debt coverage",
        ],
        ProductCategory::Ifa => &[
            "Corporate tax efficiency",
            "Leveraged retirement income",
            "Estate preservation",
            "Business succession",
        ],
    }
}
