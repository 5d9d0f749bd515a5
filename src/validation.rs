//! Input checks run before any arithmetic touches form values.

use crate::error::{EnergyError, Result};
use crate::model::{ApplianceEntry, HouseholdProfile};

pub const MAX_HOURS_PER_DAY: f64 = 24.0;
pub const MAX_USAGE_DAYS: u32 = 31;

pub fn validate_appliance(appliance: &ApplianceEntry) -> Result<()> {
    if appliance.name.trim().is_empty() {
        return Err(EnergyError::invalid("name", "appliance name is empty"));
    }
    let field = |what: &str| format!("{}.{}", appliance.name, what);

    if !appliance.power_watts.is_finite() || appliance.power_watts <= 0.0 {
        return Err(EnergyError::invalid(
            field("power_watts"),
            format!("expected a positive wattage, got {}", appliance.power_watts),
        ));
    }
    if !appliance.hours_per_day.is_finite()
        || !(0.0..=MAX_HOURS_PER_DAY).contains(&appliance.hours_per_day)
    {
        return Err(EnergyError::invalid(
            field("hours_per_day"),
            format!("expected 0-24 hours, got {}", appliance.hours_per_day),
        ));
    }
    if appliance.quantity == 0 {
        return Err(EnergyError::invalid(field("quantity"), "quantity must be at least 1"));
    }
    if appliance.usage_days > MAX_USAGE_DAYS {
        return Err(EnergyError::invalid(
            field("usage_days"),
            format!("expected 0-31 days, got {}", appliance.usage_days),
        ));
    }
    Ok(())
}

pub fn validate_household(household: &HouseholdProfile) -> Result<()> {
    if household.household_size == 0 {
        return Err(EnergyError::invalid(
            "household_size",
            "household size must be at least 1",
        ));
    }
    if !household.monthly_budget.is_finite() || household.monthly_budget < 0.0 {
        return Err(EnergyError::invalid(
            "monthly_budget",
            format!("expected a non-negative amount, got {}", household.monthly_budget),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_appliance_passes() {
        let tv = ApplianceEntry::new("TV", 120.0, 4.0).with_quantity(2);
        assert!(validate_appliance(&tv).is_ok());
    }

    #[test]
    fn test_nan_power_is_invalid_input() {
        let broken = ApplianceEntry::new("Heater", f64::NAN, 2.0);
        let err = validate_appliance(&broken).unwrap_err();
        assert!(matches!(err, EnergyError::InvalidInput { ref field, .. } if field == "Heater.power_watts"));
    }

    #[test]
    fn test_rejects_out_of_range_fields() {
        assert!(validate_appliance(&ApplianceEntry::new("  ", 10.0, 1.0)).is_err());
        assert!(validate_appliance(&ApplianceEntry::new("Fan", 0.0, 1.0)).is_err());
        assert!(validate_appliance(&ApplianceEntry::new("Fan", 60.0, 25.0)).is_err());
        assert!(validate_appliance(&ApplianceEntry::new("Fan", 60.0, -1.0)).is_err());
        assert!(validate_appliance(&ApplianceEntry::new("Fan", 60.0, 2.0).with_quantity(0)).is_err());
        assert!(validate_appliance(&ApplianceEntry::new("Fan", 60.0, 2.0).with_usage_days(32)).is_err());
        assert!(validate_appliance(&ApplianceEntry::new("Fan", 60.0, 0.0).with_usage_days(0)).is_ok());
    }

    #[test]
    fn test_household_checks() {
        assert!(validate_household(&HouseholdProfile::default()).is_ok());

        let mut household = HouseholdProfile::default();
        household.monthly_budget = f64::INFINITY;
        assert!(validate_household(&household).is_err());

        household.monthly_budget = 0.0;
        household.household_size = 0;
        assert!(validate_household(&household).is_err());
    }
}
