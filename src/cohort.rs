//! Fixed consumption bands used to segment saved reports.
//!
//! The bands are independent of the tariff brackets: segmentation uses
//! 30/80 kWh, billing uses 20/50 kWh.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EnergyError, Result};
use crate::model::ConsumptionReport;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CohortBounds {
    /// Reports strictly below this are Low.
    pub low_ceiling: f64,
    /// Reports strictly above this are High.
    pub high_floor: f64,
}

impl Default for CohortBounds {
    fn default() -> Self {
        Self {
            low_ceiling: 30.0,
            high_floor: 80.0,
        }
    }
}

impl CohortBounds {
    pub fn validate(&self) -> Result<()> {
        if !self.low_ceiling.is_finite() || !self.high_floor.is_finite() {
            return Err(EnergyError::Config(
                "cohort bounds must be finite numbers".to_owned(),
            ));
        }
        if self.low_ceiling > self.high_floor {
            return Err(EnergyError::Config(format!(
                "cohort low_ceiling ({}) is above high_floor ({})",
                self.low_ceiling, self.high_floor
            )));
        }
        Ok(())
    }

    pub fn level_for(&self, consumption_kwh: f64) -> CohortLevel {
        if consumption_kwh < self.low_ceiling {
            CohortLevel::Low
        } else if consumption_kwh <= self.high_floor {
            CohortLevel::Medium
        } else {
            // Also catches NaN so every report lands somewhere.
            CohortLevel::High
        }
    }

    pub fn range_for(&self, level: CohortLevel) -> CohortRange {
        match level {
            CohortLevel::Low => CohortRange::Below(self.low_ceiling),
            CohortLevel::Medium => CohortRange::Between(self.low_ceiling, self.high_floor),
            CohortLevel::High => CohortRange::Above(self.high_floor),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CohortLevel {
    Low,
    Medium,
    High,
}

impl CohortLevel {
    pub const ALL: [CohortLevel; 3] = [CohortLevel::Low, CohortLevel::Medium, CohortLevel::High];

    pub fn id(&self) -> u8 {
        match self {
            CohortLevel::Low => 1,
            CohortLevel::Medium => 2,
            CohortLevel::High => 3,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CohortLevel::Low => "Low Consumption Cluster",
            CohortLevel::Medium => "Medium Consumption Cluster",
            CohortLevel::High => "High Consumption Cluster",
        }
    }
}

/// Consumption interval covered by a cohort, in kWh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CohortRange {
    /// `x < bound`
    Below(f64),
    /// `low <= x <= high`
    Between(f64, f64),
    /// `x > bound`
    Above(f64),
}

impl fmt::Display for CohortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CohortRange::Below(bound) => write!(f, "< {bound} kWh"),
            CohortRange::Between(low, high) => write!(f, "{low}-{high} kWh"),
            CohortRange::Above(bound) => write!(f, "> {bound} kWh"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cohort<'a> {
    pub level: CohortLevel,
    pub range: CohortRange,
    pub members: Vec<&'a ConsumptionReport>,
    pub average_consumption: f64,
}

impl Cohort<'_> {
    pub fn id(&self) -> u8 {
        self.level.id()
    }

    pub fn name(&self) -> &'static str {
        self.level.display_name()
    }

    pub fn description(&self) -> String {
        format!("Households with consumption {}", self.range)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Split `reports` into Low, Medium and High, in that order.
///
/// Every report ends up in exactly one cohort. Members keep the input order;
/// an empty cohort averages to 0.
pub fn bucketize<'a>(reports: &'a [ConsumptionReport], bounds: &CohortBounds) -> [Cohort<'a>; 3] {
    let mut cohorts = CohortLevel::ALL.map(|level| Cohort {
        level,
        range: bounds.range_for(level),
        members: Vec::new(),
        average_consumption: 0.0,
    });

    for report in reports {
        let slot = match bounds.level_for(report.consumption_kwh) {
            CohortLevel::Low => 0,
            CohortLevel::Medium => 1,
            CohortLevel::High => 2,
        };
        cohorts[slot].members.push(report);
    }

    for cohort in &mut cohorts {
        let total: f64 = cohort.members.iter().map(|r| r.consumption_kwh).sum();
        cohort.average_consumption = total / cohort.members.len().max(1) as f64;
        debug!(
            "{}: {} reports, avg {:.2} kWh",
            cohort.name(),
            cohort.members.len(),
            cohort.average_consumption
        );
    }

    cohorts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn reports(values: &[f64]) -> Vec<ConsumptionReport> {
        values
            .iter()
            .map(|&kwh| ConsumptionReport {
                id: Uuid::new_v4(),
                consumption_kwh: kwh,
                bill: 0.0,
                tariff_bracket: String::new(),
                appliances: Vec::new(),
                household: None,
                timestamp: Utc::now(),
            })
            .collect()
    }

    fn kwh(cohort: &Cohort<'_>) -> Vec<f64> {
        cohort.members.iter().map(|r| r.consumption_kwh).collect()
    }

    #[test]
    fn test_mixed_reports() {
        let data = reports(&[5.0, 40.0, 45.0, 90.0]);
        let [low, medium, high] = bucketize(&data, &CohortBounds::default());

        assert_eq!(kwh(&low), vec![5.0]);
        assert_eq!(kwh(&medium), vec![40.0, 45.0]);
        assert_eq!(kwh(&high), vec![90.0]);
        assert_eq!(medium.average_consumption, 42.5);
    }

    #[test]
    fn test_boundaries() {
        let data = reports(&[29.99, 30.0, 80.0, 80.01]);
        let [low, medium, high] = bucketize(&data, &CohortBounds::default());

        assert_eq!(kwh(&low), vec![29.99]);
        assert_eq!(kwh(&medium), vec![30.0, 80.0]);
        assert_eq!(kwh(&high), vec![80.01]);
    }

    #[test]
    fn test_empty_input_gives_three_empty_cohorts() {
        let cohorts = bucketize(&[], &CohortBounds::default());
        assert_eq!(cohorts.len(), 3);
        for cohort in &cohorts {
            assert!(cohort.is_empty());
            assert_eq!(cohort.average_consumption, 0.0);
        }
        assert_eq!(cohorts.map(|c| c.id()), [1, 2, 3]);
    }

    #[test]
    fn test_partition_covers_every_report_once() {
        let data = reports(&[0.0, 12.0, 30.0, 55.5, 80.0, 81.0, 400.0, 29.0, 79.9]);
        let cohorts = bucketize(&data, &CohortBounds::default());

        let mut seen: Vec<Uuid> = cohorts
            .iter()
            .flat_map(|c| c.members.iter().map(|r| r.id))
            .collect();
        seen.sort();
        let mut expected: Vec<Uuid> = data.iter().map(|r| r.id).collect();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_order_independent() {
        fn member_ids(data: &[ConsumptionReport]) -> [Vec<Uuid>; 3] {
            bucketize(data, &CohortBounds::default()).map(|c| {
                let mut ids: Vec<Uuid> = c.members.iter().map(|r| r.id).collect();
                ids.sort();
                ids
            })
        }

        let mut data = reports(&[90.0, 5.0, 45.0, 40.0, 12.0, 80.0, 150.0]);
        let first = member_ids(&data);
        data.reverse();
        assert_eq!(member_ids(&data), first);
        data.swap(0, 3);
        data.swap(1, 5);
        assert_eq!(member_ids(&data), first);
        assert_eq!(first.each_ref().map(Vec::len), [2, 3, 2]);
    }

    #[test]
    fn test_descriptions() {
        let cohorts = bucketize(&[], &CohortBounds::default());
        assert_eq!(cohorts[0].description(), "Households with consumption < 30 kWh");
        assert_eq!(cohorts[1].description(), "Households with consumption 30-80 kWh");
        assert_eq!(cohorts[2].description(), "Households with consumption > 80 kWh");
        assert_eq!(cohorts[1].name(), "Medium Consumption Cluster");
    }

    #[test]
    fn test_bounds_validation() {
        assert!(CohortBounds::default().validate().is_ok());
        let inverted = CohortBounds {
            low_ceiling: 90.0,
            high_floor: 80.0,
        };
        assert!(inverted.validate().is_err());
    }
}
