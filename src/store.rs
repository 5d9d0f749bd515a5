//! Report collection: append-only, insertion ordered.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::Result;
use crate::model::{ConsumptionReport, round2};

/// Where finished reports go. Implementations serialize their own writers.
pub trait ReportStore {
    fn append(&mut self, report: ConsumptionReport);
    fn reports(&self) -> &[ConsumptionReport];
}

#[derive(Debug, Clone, Default)]
pub struct ReportLog {
    reports: Vec<ConsumptionReport>,
}

impl ReportLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a saved log. A file that does not exist yet is an empty log.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No report log at {}, starting empty", path.display());
            return Ok(Self::new());
        }
        let raw = fs::read_to_string(path)?;
        let reports: Vec<ConsumptionReport> = serde_json::from_str(&raw)?;
        info!("Loaded {} reports from {}", reports.len(), path.display());
        Ok(Self { reports })
    }

    /// Written to a temp file next to `path`, then renamed over it, so an
    /// interrupted save leaves the previous log intact.
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };
        let json = serde_json::to_string_pretty(&self.reports)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        debug!("Saved {} reports to {}", self.reports.len(), path.display());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl ReportStore for ReportLog {
    fn append(&mut self, report: ConsumptionReport) {
        self.reports.push(report);
    }

    fn reports(&self) -> &[ConsumptionReport] {
        &self.reports
    }
}

#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "Region")]
    region: &'a str,
    #[serde(rename = "IncomeLevel")]
    income_level: &'a str,
    #[serde(rename = "Consumption")]
    consumption_kwh: f64,
    #[serde(rename = "Bill")]
    bill: f64,
    #[serde(rename = "Bracket")]
    bracket: &'a str,
}

/// One CSV row per report, with household columns left blank when unknown.
pub fn export_summary_csv<W: Write>(reports: &[ConsumptionReport], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for report in reports {
        csv_writer.serialize(SummaryRow {
            timestamp: report.timestamp.to_rfc3339(),
            region: report.region().map_or("", |r| r.as_str()),
            income_level: report.income_level().map_or("", |i| i.as_str()),
            consumption_kwh: round2(report.consumption_kwh),
            bill: round2(report.bill),
            bracket: &report.tariff_bracket,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
