//! Appliance list import.
//!
//! Expected headers: `Name,Power,Hours,Quantity,UsageDays`. Quantity and
//! UsageDays may be left out and fall back to the form defaults.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::model::{ApplianceEntry, DEFAULT_QUANTITY, DEFAULT_USAGE_DAYS};

#[derive(Debug, Deserialize)]
struct ApplianceRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Power")]
    power_watts: f64,
    #[serde(rename = "Hours")]
    hours_per_day: f64,
    #[serde(rename = "Quantity", default)]
    quantity: Option<u32>,
    #[serde(rename = "UsageDays", default)]
    usage_days: Option<u32>,
}

impl From<ApplianceRecord> for ApplianceEntry {
    fn from(record: ApplianceRecord) -> Self {
        ApplianceEntry {
            name: record.name,
            power_watts: record.power_watts,
            hours_per_day: record.hours_per_day,
            quantity: record.quantity.unwrap_or(DEFAULT_QUANTITY),
            usage_days: record.usage_days.unwrap_or(DEFAULT_USAGE_DAYS),
        }
    }
}

pub fn load_appliances(path: &Path) -> Result<Vec<ApplianceEntry>> {
    let file = File::open(path)?;
    let appliances = read_appliances(file)?;
    info!("Read {} appliances from {}", appliances.len(), path.display());
    Ok(appliances)
}

/// Rows that do not parse are skipped with a warning; range checks happen
/// later, when the list is computed.
pub fn read_appliances<R: Read>(reader: R) -> Result<Vec<ApplianceEntry>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut appliances = Vec::new();
    for (row, result) in csv_reader.deserialize::<ApplianceRecord>().enumerate() {
        match result {
            Ok(record) => appliances.push(record.into()),
            Err(e) => warn!("Skipping invalid appliance row {}: {}", row + 1, e),
        }
    }
    Ok(appliances)
}
