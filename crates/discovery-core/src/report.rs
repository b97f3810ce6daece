//! Read-only discovery report for document and presentation export

use chrono::NaiveDate;
use discovery_model::DiscoveryData;
use discovery_rules::{
    compliance_checklist, product_suitability, risk_label, ComplianceChecklist, RiskLabel,
    SuitabilityVerdict,
};
use serde::Serialize;

/// Final record plus everything derived from it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryReport {
    /// Date the derived values were computed for
    pub as_of: NaiveDate,
    /// Record snapshot
    pub data: DiscoveryData,
    /// Risk tolerance bucket
    pub risk_label: RiskLabel,
    /// Suitability verdicts for the selected category
    pub suitability: Vec<SuitabilityVerdict>,
    /// Compliance checklist
    pub compliance: ComplianceChecklist,
    /// Advisor's recommendation narrative
    pub recommendation_narrative: String,
}

impl DiscoveryReport {
    /// Build a report for `data` as of `as_of`
    #[must_use]
    pub fn from_data(data: &DiscoveryData, as_of: NaiveDate) -> Self {
        Self {
            as_of,
            data: data.clone(),
            risk_label: risk_label(data),
            suitability: product_suitability(data, as_of),
            compliance: compliance_checklist(data),
            recommendation_narrative: data.recommendation_narrative.clone(),
        }
    }

    /// Plain-text summary for terminals and logs
    #[must_use]
    pub fn summary(&self) -> String {
        let name = match self.data.full_name() {
            n if n.is_empty() => "(unnamed client)".to_string(),
            n => n,
        };
        let category = self.data.product_category.map_or("not selected", |c| c.as_str());
        let mut out = format!(
            "Client: {name}\nProduct category: {category}\nRisk profile: {}\n",
            self.risk_label
        );
        out.push_str("Suitability:\n");
        for verdict in &self.suitability {
            let mark = if verdict.suitable { "+" } else { "-" };
            match &verdict.reason {
                Some(reason) => out.push_str(&format!("  {mark} {} ({reason})\n", verdict.option)),
                None => out.push_str(&format!("  {mark} {}\n", verdict.option)),
            }
        }
        out.push_str(&format!(
            "Compliance: {}/{} checks passed\n",
            self.compliance.passed(),
            self.compliance.total()
        ));
        for check in self.compliance.checks.iter().filter(|c| !c.pass) {
            let tag = if check.warn { "warn" } else { "fail" };
            out.push_str(&format!("  [{tag}] {}\n", check.label));
        }
        if !self.recommendation_narrative.trim().is_empty() {
            out.push_str(&format!("Recommendation: {}\n", self.recommendation_narrative.trim()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discovery_model::{ProductCategory, RiskChoice, RiskQuestion};

    #[test]
    fn report_derives_rule_outputs() {
        let mut data = DiscoveryData::default();
        data.first_name = "Jane".into();
        data.last_name = "Doe".into();
        data.product_category = Some(ProductCategory::TermLife);
        data.answer_risk_question(RiskQuestion::Q1, RiskChoice::B);
        data.recommendation_narrative = "Term 20 recommended.".into();

        let as_of = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let report = DiscoveryReport::from_data(&data, as_of);
        assert_eq!(report.risk_label, RiskLabel::ModeratelyConservative);
        assert_eq!(report.suitability[0].option, "Term Life");
        assert!(report.compliance.total() > 0);

        let text = report.summary();
        assert!(text.contains("Client: Jane Doe"));
        assert!(text.contains("Risk profile: Moderately Conservative"));
        assert!(text.contains("Recommendation: Term 20 recommended."));
    }

    #[test]
    fn report_serializes_camel_case() {
        let as_of = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let value = serde_json::to_value(DiscoveryReport::from_data(&DiscoveryData::default(), as_of)).unwrap();
        assert_eq!(value["riskLabel"], "Not assessed");
        assert_eq!(value["asOf"], "2026-01-01");
        assert!(value["data"]["firstName"].is_string());
    }
}
