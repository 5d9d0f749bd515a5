//! Flags reports whose consumption sits far above the population.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EnergyError, Result};
use crate::model::ConsumptionReport;

pub const REVIEW_ADVICE: &str = "This household shows significantly higher consumption than \
     the average. Recommend immediate review and energy audit.";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    /// Standard deviations above the mean before a report is flagged.
    pub k_factor: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self { k_factor: 2.0 }
    }
}

impl AnomalyConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.k_factor.is_finite() || self.k_factor < 0.0 {
            return Err(EnergyError::Config(format!(
                "anomaly k_factor must be a non-negative number, got {}",
                self.k_factor
            )));
        }
        Ok(())
    }
}

/// Mean and population standard deviation (divisor N) of consumption.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl PopulationStats {
    pub fn from_reports(reports: &[ConsumptionReport]) -> Option<Self> {
        if reports.is_empty() {
            return None;
        }
        let n = reports.len() as f64;
        let mean = reports.iter().map(|r| r.consumption_kwh).sum::<f64>() / n;
        let variance = reports
            .iter()
            .map(|r| (r.consumption_kwh - mean).powi(2))
            .sum::<f64>()
            / n;
        Some(Self {
            count: reports.len(),
            mean,
            std_dev: variance.sqrt(),
        })
    }

    pub fn threshold(&self, k_factor: f64) -> f64 {
        self.mean + k_factor * self.std_dev
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyFlag<'a> {
    pub report: &'a ConsumptionReport,
    /// consumption - mean
    pub deviation: f64,
    pub z_score: f64,
}

impl AnomalyFlag<'_> {
    pub fn advice(&self) -> &'static str {
        REVIEW_ADVICE
    }
}

/// Reports strictly above `mean + k * std_dev`, in input order.
///
/// Stats are recomputed from `reports` on every call. No reports or zero
/// spread means nothing is flagged.
pub fn detect<'a>(reports: &'a [ConsumptionReport], config: &AnomalyConfig) -> Vec<AnomalyFlag<'a>> {
    let Some(stats) = PopulationStats::from_reports(reports) else {
        return Vec::new();
    };
    if stats.std_dev == 0.0 {
        debug!("All {} reports share one consumption value, nothing to flag", stats.count);
        return Vec::new();
    }

    let threshold = stats.threshold(config.k_factor);
    debug!(
        "Anomaly threshold {:.2} kWh (mean {:.2}, std dev {:.2}, n {})",
        threshold, stats.mean, stats.std_dev, stats.count
    );

    reports
        .iter()
        .filter(|r| r.consumption_kwh > threshold)
        .map(|report| {
            let deviation = report.consumption_kwh - stats.mean;
            AnomalyFlag {
                report,
                deviation,
                z_score: deviation / stats.std_dev,
            }
        })
        .collect()
}
