//! Advisory messages shown under a freshly computed report.

use serde::Serialize;

use crate::model::{ConsumptionReport, HouseholdProfile};

// Above this monthly total the cooling tip is added.
pub const HIGH_CONSUMPTION_KWH: f64 = 100.0;
// Two fewer hours of AC a day.
pub const COOLING_SAVINGS_KWH: f64 = 15.0;
pub const LED_LIGHTING_SAVINGS_PCT: f64 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Warning,
    Success,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub text: String,
}

impl Recommendation {
    fn warning(text: String) -> Self {
        Self {
            kind: RecommendationKind::Warning,
            text,
        }
    }

    fn success(text: String) -> Self {
        Self {
            kind: RecommendationKind::Success,
            text,
        }
    }
}

/// Tips in display order: cooling (if heavy use), lighting (always),
/// budget (if the bill is over budget).
pub fn generate(report: &ConsumptionReport, household: &HouseholdProfile) -> Vec<Recommendation> {
    let mut recommendations = Vec::with_capacity(3);

    if report.consumption_kwh > HIGH_CONSUMPTION_KWH {
        recommendations.push(Recommendation::warning(format!(
            "High consumption detected! Consider reducing AC usage by 2 hours daily to save ~{COOLING_SAVINGS_KWH} kWh"
        )));
    }

    recommendations.push(Recommendation::success(format!(
        "Switch to LED bulbs to reduce lighting costs by up to {LED_LIGHTING_SAVINGS_PCT}%"
    )));

    if report.bill > household.monthly_budget {
        recommendations.push(Recommendation::warning(
            "Budget exceeded! Reduce high-power appliance usage during peak hours".to_owned(),
        ));
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn report(consumption_kwh: f64, bill: f64) -> ConsumptionReport {
        ConsumptionReport {
            id: Uuid::new_v4(),
            consumption_kwh,
            bill,
            tariff_bracket: "50+ kWh".to_owned(),
            appliances: Vec::new(),
            household: None,
            timestamp: Utc::now(),
        }
    }

    fn kinds(recs: &[Recommendation]) -> Vec<RecommendationKind> {
        recs.iter().map(|r| r.kind).collect()
    }

    #[test]
    fn test_all_three_in_order() {
        let recs = generate(&report(150.0, 90_000.0), &HouseholdProfile::default());
        assert_eq!(
            kinds(&recs),
            vec![
                RecommendationKind::Warning,
                RecommendationKind::Success,
                RecommendationKind::Warning
            ]
        );
        assert!(recs[0].text.contains("~15 kWh"));
        assert!(recs[1].text.contains("LED"));
        assert!(recs[1].text.contains("75%"));
        assert!(recs[2].text.starts_with("Budget exceeded"));
    }

    #[test]
    fn test_lighting_tip_only() {
        let recs = generate(&report(100.0, 50_000.0), &HouseholdProfile::default());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, RecommendationKind::Success);
    }

    #[test]
    fn test_budget_tip_follows_lighting() {
        let household = HouseholdProfile {
            monthly_budget: 1_000.0,
            ..HouseholdProfile::default()
        };
        let recs = generate(&report(40.0, 5_640.0), &household);
        assert_eq!(kinds(&recs), vec![RecommendationKind::Success, RecommendationKind::Warning]);
    }

    #[test]
    fn test_high_consumption_precedes_lighting() {
        let recs = generate(&report(100.5, 10.0), &HouseholdProfile::default());
        assert_eq!(kinds(&recs), vec![RecommendationKind::Warning, RecommendationKind::Success]);
        assert!(recs[0].text.starts_with("High consumption"));
    }
}
