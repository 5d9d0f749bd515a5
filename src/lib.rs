//! Household electricity estimates: monthly consumption and bill from an
//! appliance list, consumption bands over saved reports, outlier flags and
//! saving tips.

pub mod anomaly;
pub mod budget;
pub mod calculator;
pub mod cohort;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod recommend;
pub mod store;
pub mod tariff;
pub mod validation;

pub use anomaly::{AnomalyConfig, AnomalyFlag, PopulationStats, detect};
pub use budget::{BudgetAnalysis, BudgetStatus};
pub use calculator::{compute, compute_at, record};
pub use cohort::{Cohort, CohortBounds, CohortLevel, CohortRange, bucketize};
pub use config::Settings;
pub use error::{EnergyError, Result};
pub use model::{
    ApplianceEntry, ApplianceUsage, ConsumptionReport, HouseholdProfile, IncomeLevel, Region,
};
pub use recommend::{Recommendation, RecommendationKind, generate};
pub use store::{ReportLog, ReportStore, export_summary_csv};
pub use tariff::{RateTable, TariffBracket, Tier, compute_bracket};
