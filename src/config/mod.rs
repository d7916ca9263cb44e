//! Configuration for the payroll calculation engine.
//!
//! Statutory rates, formula parameters, and tax bracket schedules live here
//! as versioned, admin-editable data, loaded from a YAML directory and
//! resolved through the [`SettingsRegistry`].

mod loader;
mod registry;
mod types;

pub use loader::ConfigLoader;
pub use registry::{
    ANNUAL_DIVISION_FACTOR, MIN_ATTENDANCE_FACTOR, NHIS_RATE, PAYE_BRACKETS, PENSION_RATE,
    RENT_RELIEF, SettingsRegistry, SettingsSnapshot,
};
pub use types::{
    BracketFile, BracketTier, PayrollSetting, RateBase, SettingType, SettingValue, TaxBracket,
};
