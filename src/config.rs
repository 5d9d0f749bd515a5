//! User-editable settings: tariff rates, cohort bounds, anomaly sensitivity.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::anomaly::AnomalyConfig;
use crate::cohort::CohortBounds;
use crate::error::{EnergyError, Result};
use crate::tariff::RateTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub currency: String,
    pub tariff: RateTable,
    pub cohorts: CohortBounds,
    pub anomaly: AnomalyConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "RWF".to_owned(),
            tariff: RateTable::default(),
            cohorts: CohortBounds::default(),
            anomaly: AnomalyConfig::default(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let settings = Self::from_toml(&raw)?;
        info!(
            "Loaded settings from {}: rates {}/{}/{} {}",
            path.display(),
            settings.tariff.tier1_rate,
            settings.tariff.tier2_rate,
            settings.tariff.tier3_rate,
            settings.currency
        );
        Ok(settings)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.currency.trim().is_empty() {
            return Err(EnergyError::Config("currency must not be empty".to_owned()));
        }
        self.tariff.validate()?;
        self.cohorts.validate()?;
        self.anomaly.validate()?;
        Ok(())
    }
}
