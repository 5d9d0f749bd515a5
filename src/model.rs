//! Household, appliance and report records exchanged with the application shell.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EnergyError;

// Form defaults for a freshly added appliance.
pub const DEFAULT_QUANTITY: u32 = 1;
pub const DEFAULT_USAGE_DAYS: u32 = 30;

/// One line of the appliance form: what it draws and how long it runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplianceEntry {
    pub name: String,
    pub power_watts: f64,
    pub hours_per_day: f64,
    pub quantity: u32,
    pub usage_days: u32,
}

impl ApplianceEntry {
    /// A single unit used every day of a 30-day month.
    pub fn new(name: impl Into<String>, power_watts: f64, hours_per_day: f64) -> Self {
        Self {
            name: name.into(),
            power_watts,
            hours_per_day,
            quantity: DEFAULT_QUANTITY,
            usage_days: DEFAULT_USAGE_DAYS,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_usage_days(mut self, usage_days: u32) -> Self {
        self.usage_days = usage_days;
        self
    }

    // power (W) * hours * quantity / 1000
    pub fn daily_kwh(&self) -> f64 {
        self.power_watts * self.hours_per_day * f64::from(self.quantity) / 1000.0
    }

    pub fn monthly_kwh(&self) -> f64 {
        self.daily_kwh() * f64::from(self.usage_days)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Kigali,
    Eastern,
    Western,
    Northern,
    Southern,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Kigali,
        Region::Eastern,
        Region::Western,
        Region::Northern,
        Region::Southern,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Kigali => "Kigali",
            Region::Eastern => "Eastern",
            Region::Western => "Western",
            Region::Northern => "Northern",
            Region::Southern => "Southern",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = EnergyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EnergyError::invalid("region", format!("unknown region '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeLevel {
    Low,
    Medium,
    High,
}

impl IncomeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeLevel::Low => "Low",
            IncomeLevel::Medium => "Medium",
            IncomeLevel::High => "High",
        }
    }
}

impl fmt::Display for IncomeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncomeLevel {
    type Err = EnergyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(IncomeLevel::Low),
            "medium" => Ok(IncomeLevel::Medium),
            "high" => Ok(IncomeLevel::High),
            _ => Err(EnergyError::invalid(
                "income_level",
                format!("unknown income level '{s}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdProfile {
    pub region: Region,
    pub income_level: IncomeLevel,
    pub household_size: u32,
    pub monthly_budget: f64,
}

impl Default for HouseholdProfile {
    fn default() -> Self {
        Self {
            region: Region::Kigali,
            income_level: IncomeLevel::Medium,
            household_size: 4,
            monthly_budget: 50_000.0,
        }
    }
}

/// Monthly consumption attributed to one appliance line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplianceUsage {
    pub name: String,
    pub monthly_kwh: f64,
}

impl ApplianceUsage {
    pub fn display_kwh(&self) -> f64 {
        round2(self.monthly_kwh)
    }
}

/// Result of one calculation. Never modified after it is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionReport {
    pub id: Uuid,
    pub consumption_kwh: f64,
    pub bill: f64,
    pub tariff_bracket: String,
    pub appliances: Vec<ApplianceUsage>,
    // Older records may have been saved without a household snapshot.
    #[serde(default)]
    pub household: Option<HouseholdProfile>,
    pub timestamp: DateTime<Utc>,
}

impl ConsumptionReport {
    pub fn region(&self) -> Option<Region> {
        self.household.as_ref().map(|h| h.region)
    }

    pub fn income_level(&self) -> Option<IncomeLevel> {
        self.household.as_ref().map(|h| h.income_level)
    }
}

/// Round to two decimals for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
