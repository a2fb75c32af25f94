//! # Fluid Property Correlations
//!
//! Closed-form correlations for crude oil, produced water, and associated gas
//! properties used throughout the API-12L sizing calculations. All functions
//! are pure math over US-customary field units:
//!
//! - Temperature: °F
//! - Density: lb/ft³
//! - Specific heat: BTU/(lb·°F)
//! - Pressure: psig (gauge) at the public boundary, psia internally
//!
//! There are no error paths here; NaN/Infinity propagate for pathological
//! inputs. Callers validate upstream (see the input `validate()` methods in
//! [`crate::calculations`]).

/// Universal gas constant in (psia·ft³)/(lb-mol·°R)
pub const GAS_CONSTANT: f64 = 10.7316;

/// Reference temperature for the density/specific-heat correlations (°F)
pub const STANDARD_TEMPERATURE_F: f64 = 60.0;

/// Standard atmospheric pressure (psia), added to gauge readings
pub const STANDARD_PRESSURE_PSIA: f64 = 14.7;

/// Average molecular weight assumed for associated natural gas (lb/lb-mol)
pub const GAS_MOLECULAR_WEIGHT: f64 = 20.0;

/// Cubic feet per barrel
pub const FT3_PER_BBL: f64 = 5.6146;

/// Specific gravity of crude oil from API gravity.
///
/// `sg = 141.5 / (°API + 131.5)`, so 10 °API corresponds to sg = 1.0
/// (the density of water) and sg decreases as API gravity rises.
pub fn oil_specific_gravity(api_gravity: f64) -> f64 {
    141.5 / (api_gravity + 131.5)
}

/// Crude oil density (lb/ft³) at the given temperature, corrected from the
/// 60 °F reference by a linear thermal-expansion term.
pub fn oil_density(specific_gravity: f64, temperature_f: f64) -> f64 {
    (specific_gravity * 62.4) / (1.0 + 0.00065 * (temperature_f - STANDARD_TEMPERATURE_F))
}

/// Produced water density (lb/ft³) at the given temperature.
pub fn water_density(temperature_f: f64) -> f64 {
    62.4 - 0.013 * (temperature_f - STANDARD_TEMPERATURE_F)
}

/// Crude oil specific heat (BTU/(lb·°F)) at the given temperature.
pub fn oil_specific_heat(specific_gravity: f64, temperature_f: f64) -> f64 {
    (0.388 + 0.00045 * temperature_f) / specific_gravity.sqrt()
}

/// Produced water specific heat (BTU/(lb·°F)) at the given temperature.
pub fn water_specific_heat(temperature_f: f64) -> f64 {
    1.0 - 0.000117 * (temperature_f - STANDARD_TEMPERATURE_F)
}

/// Associated gas density (lb/ft³) from the ideal-gas relation
/// `ρ = P·M / (R·T)` with P absolute (gauge + 14.7 psia), T absolute
/// (°F + 459.67 °R), and the fixed average molecular weight of 20 lb/lb-mol.
pub fn gas_density(operating_pressure_psig: f64, temperature_f: f64) -> f64 {
    let absolute_pressure = operating_pressure_psig + STANDARD_PRESSURE_PSIA;
    let absolute_temperature = temperature_f + 459.67;
    (absolute_pressure * GAS_MOLECULAR_WEIGHT) / (GAS_CONSTANT * absolute_temperature)
}
