//! Recommendation narrative
//!
//! The narrative is seeded once from a template. After that it belongs to
//! the advisor and is never regenerated.

use crate::risk::risk_label;
use crate::suitability::time_horizon_years;
use discovery_model::DiscoveryData;

/// Render the template for the current record
#[must_use]
pub fn render_recommendation(data: &DiscoveryData) -> String {
    let client = match data.full_name() {
        name if name.is_empty() => "The client".to_string(),
        name => name,
    };
    let category = data
        .product_category
        .map_or("suitable insurance", |c| c.as_str());
    let goals = if data.primary_goals.is_empty() {
        "their stated objectives".to_string()
    } else {
        data.primary_goals
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let horizon = time_horizon_years(data);
    let risk = risk_label(data);

    let mut text = format!(
        "{client} is seeking coverage to address: {goals}. \
         Based on a {risk} risk profile and a {horizon}-year time horizon, \
         a {category} solution is recommended."
    );
    let face = data.face_amount_requested.trim();
    if !face.is_empty() {
        text.push_str(&format!(" The requested face amount is ${face}."));
    }
    let notes = data.suitability_notes.trim();
    if !notes.is_empty() {
        text.push_str(&format!(" Advisor notes: {notes}"));
    }
    text
}

/// Seed the narrative from the template if it has never been seeded
///
/// Returns whether the narrative was written.
pub fn seed_recommendation(data: &mut DiscoveryData) -> bool {
    if data.narrative_seeded {
        return false;
    }
    data.narrative_seeded = true;
    if !data.recommendation_narrative.trim().is_empty() {
        return false;
    }
    data.recommendation_narrative = render_recommendation(data);
    tracing::debug!("recommendation narrative seeded");
    true
}
