//! Residential tariff: one flat rate per bracket, picked from the month's total.

use serde::{Deserialize, Serialize};

use crate::error::{EnergyError, Result};

// Upper edge (inclusive) of the first two brackets, in kWh.
pub const TIER1_CEILING_KWH: f64 = 20.0;
pub const TIER2_CEILING_KWH: f64 = 50.0;

pub const TIER1_LABEL: &str = "0-20 kWh";
pub const TIER2_LABEL: &str = "21-50 kWh";
pub const TIER3_LABEL: &str = "50+ kWh";

/// Price per kWh for each bracket, in the configured currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateTable {
    pub tier1_rate: f64,
    pub tier2_rate: f64,
    pub tier3_rate: f64,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            tier1_rate: 103.0,
            tier2_rate: 141.0,
            tier3_rate: 171.0,
        }
    }
}

impl RateTable {
    pub fn validate(&self) -> Result<()> {
        for (field, rate) in [
            ("tariff.tier1_rate", self.tier1_rate),
            ("tariff.tier2_rate", self.tier2_rate),
            ("tariff.tier3_rate", self.tier3_rate),
        ] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(EnergyError::invalid(
                    field,
                    format!("expected a non-negative rate, got {rate}"),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Tier1,
    Tier2,
    Tier3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TariffBracket {
    pub tier: Tier,
    pub label: &'static str,
    pub rate_per_kwh: f64,
}

impl TariffBracket {
    /// Flat-tier bill: the whole consumption at this bracket's rate.
    pub fn bill_for(&self, consumption_kwh: f64) -> f64 {
        consumption_kwh * self.rate_per_kwh
    }
}

// Checked top-down: each bracket excludes its lower edge, so exactly 20 kWh
// stays in tier 1 and exactly 50 kWh stays in tier 2.
pub fn compute_bracket(total_consumption_kwh: f64, rates: &RateTable) -> TariffBracket {
    if total_consumption_kwh > TIER2_CEILING_KWH {
        TariffBracket {
            tier: Tier::Tier3,
            label: TIER3_LABEL,
            rate_per_kwh: rates.tier3_rate,
        }
    } else if total_consumption_kwh > TIER1_CEILING_KWH {
        TariffBracket {
            tier: Tier::Tier2,
            label: TIER2_LABEL,
            rate_per_kwh: rates.tier2_rate,
        }
    } else {
        TariffBracket {
            tier: Tier::Tier1,
            label: TIER1_LABEL,
            rate_per_kwh: rates.tier1_rate,
        }
    }
}
