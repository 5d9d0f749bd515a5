//! Monthly consumption and bill for a household's appliance list.

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::error::{EnergyError, Result};
use crate::model::{ApplianceEntry, ApplianceUsage, ConsumptionReport, HouseholdProfile};
use crate::store::ReportStore;
use crate::tariff::{RateTable, compute_bracket};
use crate::validation::{validate_appliance, validate_household};

/// Compute a report stamped with the current time.
pub fn compute(
    appliances: &[ApplianceEntry],
    household: &HouseholdProfile,
    rates: &RateTable,
) -> Result<ConsumptionReport> {
    compute_at(appliances, household, rates, Utc::now())
}

pub fn compute_at(
    appliances: &[ApplianceEntry],
    household: &HouseholdProfile,
    rates: &RateTable,
    timestamp: DateTime<Utc>,
) -> Result<ConsumptionReport> {
    for appliance in appliances {
        validate_appliance(appliance)?;
    }
    validate_household(household)?;
    rates.validate()?;

    // Per-appliance monthly kWh, kept at full precision.
    let breakdown: Vec<ApplianceUsage> = appliances
        .iter()
        .map(|app| ApplianceUsage {
            name: app.name.clone(),
            monthly_kwh: app.monthly_kwh(),
        })
        .collect();
    let total_kwh: f64 = breakdown.iter().map(|u| u.monthly_kwh).sum();

    let bracket = compute_bracket(total_kwh, rates);
    let bill = bracket.bill_for(total_kwh);
    // Each field can be finite while the products overflow.
    if !total_kwh.is_finite() || !bill.is_finite() {
        return Err(EnergyError::invalid(
            "consumption_kwh",
            format!("appliance values overflow: {total_kwh} kWh, bill {bill}"),
        ));
    }
    debug!(
        "Computed {:.2} kWh over {} appliances, bracket {} @ {}/kWh, bill {:.2}",
        total_kwh,
        breakdown.len(),
        bracket.label,
        bracket.rate_per_kwh,
        bill
    );

    Ok(ConsumptionReport {
        id: Uuid::new_v4(),
        consumption_kwh: total_kwh,
        bill,
        tariff_bracket: bracket.label.to_owned(),
        appliances: breakdown,
        household: Some(household.clone()),
        timestamp,
    })
}

/// Compute a report and append it to the store. Nothing is appended on error.
pub fn record<S: ReportStore + ?Sized>(
    store: &mut S,
    appliances: &[ApplianceEntry],
    household: &HouseholdProfile,
    rates: &RateTable,
) -> Result<ConsumptionReport> {
    let report = compute(appliances, household, rates)?;
    store.append(report.clone());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ReportLog;

    #[test]
    fn test_single_heavy_appliance() {
        let heater = ApplianceEntry::new("Water heater", 1000.0, 5.0).with_quantity(2);
        let report = compute(&[heater], &HouseholdProfile::default(), &RateTable::default()).unwrap();

        assert_eq!(report.consumption_kwh, 300.0);
        assert_eq!(report.tariff_bracket, "50+ kWh");
        assert_eq!(report.bill, 51_300.0);
    }

    #[test]
    fn test_empty_list() {
        let report = compute(&[], &HouseholdProfile::default(), &RateTable::default()).unwrap();
        assert_eq!(report.consumption_kwh, 0.0);
        assert_eq!(report.tariff_bracket, "0-20 kWh");
        assert_eq!(report.bill, 0.0);
        assert!(report.appliances.is_empty());
    }

    #[test]
    fn test_breakdown_follows_input_order() {
        let appliances = vec![
            ApplianceEntry::new("Bulb", 10.0, 6.0).with_quantity(5),
            ApplianceEntry::new("Fridge", 150.0, 24.0),
            ApplianceEntry::new("Iron", 1200.0, 0.5).with_usage_days(8),
        ];
        let report =
            compute(&appliances, &HouseholdProfile::default(), &RateTable::default()).unwrap();

        let names: Vec<&str> = report.appliances.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Bulb", "Fridge", "Iron"]);

        // 9 + 108 + 4.8
        assert!((report.consumption_kwh - 121.8).abs() < 1e-9);
        assert!((report.appliances[2].monthly_kwh - 4.8).abs() < 1e-9);
        assert_eq!(report.household, Some(HouseholdProfile::default()));
    }

    #[test]
    fn test_breakdown_keeps_full_precision() {
        let charger = ApplianceEntry::new("Charger", 7.0, 1.0).with_usage_days(31);
        let report = compute(&[charger], &HouseholdProfile::default(), &RateTable::default()).unwrap();
        let usage = &report.appliances[0];
        assert_ne!(usage.monthly_kwh, usage.display_kwh());
        assert_eq!(usage.display_kwh(), 0.22);
    }

    #[test]
    fn test_invalid_appliance_is_rejected_before_arithmetic() {
        let bad = ApplianceEntry::new("Kettle", 2000.0, f64::NAN);
        let err = compute(&[bad], &HouseholdProfile::default(), &RateTable::default()).unwrap_err();
        assert!(matches!(err, EnergyError::InvalidInput { .. }));
    }

    #[test]
    fn test_record_appends_once() {
        let mut log = ReportLog::new();
        let tv = ApplianceEntry::new("TV", 100.0, 4.0);
        let report = record(&mut log, &[tv], &HouseholdProfile::default(), &RateTable::default()).unwrap();

        assert_eq!(log.len(), 1);
        assert_eq!(log.reports()[0], report);

        let bad = ApplianceEntry::new("", 100.0, 4.0);
        assert!(record(&mut log, &[bad], &HouseholdProfile::default(), &RateTable::default()).is_err());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_overflowing_totals_are_rejected() {
        let mut log = ReportLog::new();
        let fine = ApplianceEntry::new("TV", 100.0, 4.0);
        record(&mut log, &[fine], &HouseholdProfile::default(), &RateTable::default()).unwrap();

        // Every field is finite, the monthly total is not.
        let huge = ApplianceEntry::new("X", 1e306, 24.0).with_quantity(1000);
        let free = RateTable {
            tier3_rate: 0.0,
            ..RateTable::default()
        };
        let err = record(&mut log, &[huge], &HouseholdProfile::default(), &free).unwrap_err();
        assert!(matches!(err, EnergyError::InvalidInput { ref field, .. } if field == "consumption_kwh"));
        assert_eq!(log.len(), 1);
        assert!(log.reports()[0].consumption_kwh.is_finite());
    }
}
