//! # Thermal Treater Sizing Calculation
//!
//! The full API-12L thermal/hydraulic worksheet: from a single input record
//! it derives fluid properties, vessel phase areas and retention volumes,
//! flow splits, gas-phase sizing, settling behavior, and total heat duty.
//!
//! The evaluation order is fixed because later steps consume earlier derived
//! values (computed densities, phase areas, flow splits) rather than raw
//! inputs. The whole computation is a pure function: identical inputs yield
//! bit-identical results.
//!
//! ## Example
//!
//! ```rust
//! use treater_core::calculations::thermal::{calculate, ThermalInput};
//!
//! let input = ThermalInput {
//!     diameter_ft: 4.0,
//!     length_ft: 10.0,
//!     total_flow_bpd: 500.0,
//!     water_fraction_pct: 20.0,
//!     api_gravity: 18.0,
//!     inlet_temperature_f: 75.0,
//!     ambient_temperature_f: 30.0,
//!     operating_pressure_psig: 50.0,
//!     ..Default::default()
//! };
//! let results = calculate(&input).unwrap();
//! assert!(results.total_heat_required_btu_hr > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::geometry::{self, VesselLevels};
use crate::properties::{self, FT3_PER_BBL, GAS_MOLECULAR_WEIGHT};

/// Vertical clearance reserved for the gas phase at the top of the shell (ft)
const FREE_HEIGHT_FOR_GAS_FT: f64 = 0.5;

/// Mass-flow conversion from bpd and specific gravity to lb/hr
const MASS_FLOW_FACTOR: f64 = 14.58;

/// Input record for the thermal treater worksheet.
///
/// Required fields must be strictly positive where noted; the optional
/// fields default to the standard worksheet assumptions when `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThermalInput {
    /// Vessel outside diameter D (ft, > 0)
    pub diameter_ft: f64,

    /// Vessel shell length L (ft, > 0)
    pub length_ft: f64,

    /// Total emulsion flow (bpd, > 0)
    pub total_flow_bpd: f64,

    /// Water and sediment fraction of the inlet stream (%)
    pub water_fraction_pct: f64,

    /// API gravity of the crude (> 0)
    pub api_gravity: f64,

    /// Inlet temperature T1 (°F)
    pub inlet_temperature_f: f64,

    /// Ambient temperature T3 (°F)
    pub ambient_temperature_f: f64,

    /// Operating pressure (psig)
    pub operating_pressure_psig: f64,

    /// Free water removed upstream of the firebox (%), default 85
    pub free_water_removal_pct: Option<f64>,

    /// Design water drop size (µm), default 150
    pub water_drop_size_um: Option<f64>,

    /// Produced water specific gravity, default 1.0
    pub water_specific_gravity: Option<f64>,

    /// Crude specific heat override (BTU/(lb·°F)), computed when absent
    pub oil_specific_heat: Option<f64>,

    /// Water specific heat override (BTU/(lb·°F)), computed when absent
    pub water_specific_heat: Option<f64>,

    /// Crude density override (lb/ft³), computed when absent
    pub oil_density_lb_ft3: Option<f64>,

    /// Water density override (lb/ft³), computed when absent
    pub water_density_lb_ft3: Option<f64>,

    /// Crude viscosity at treating temperature (cP), default 15.5
    pub oil_viscosity_cp: Option<f64>,

    /// Souders-Brown K factor for gas velocity, default 0.5
    pub factor_k: Option<f64>,

    /// Low-low water level (in), default 2
    pub low_low_water_level_in: Option<f64>,

    /// Water/oil interface level (in), default 12
    pub water_oil_interface_level_in: Option<f64>,

    /// High-high oil level (in), default 24
    pub high_high_oil_level_in: Option<f64>,
}

impl ThermalInput {
    /// Validate input parameters. Runs before any computation; a failed
    /// validation means nothing was computed.
    pub fn validate(&self) -> CalcResult<()> {
        if self.diameter_ft <= 0.0 {
            return Err(CalcError::invalid_input(
                "diameter_ft",
                self.diameter_ft.to_string(),
                "Diameter must be positive",
            ));
        }
        if self.length_ft <= 0.0 {
            return Err(CalcError::invalid_input(
                "length_ft",
                self.length_ft.to_string(),
                "Length must be positive",
            ));
        }
        if self.total_flow_bpd <= 0.0 {
            return Err(CalcError::invalid_input(
                "total_flow_bpd",
                self.total_flow_bpd.to_string(),
                "Total flow must be positive",
            ));
        }
        if self.api_gravity <= 0.0 {
            return Err(CalcError::invalid_input(
                "api_gravity",
                self.api_gravity.to_string(),
                "API gravity must be positive",
            ));
        }
        Ok(())
    }

    /// Internal level markers, with worksheet defaults for absent values.
    pub fn vessel_levels(&self) -> VesselLevels {
        let defaults = VesselLevels::default();
        VesselLevels {
            low_low_water_level_in: self
                .low_low_water_level_in
                .unwrap_or(defaults.low_low_water_level_in),
            water_oil_interface_level_in: self
                .water_oil_interface_level_in
                .unwrap_or(defaults.water_oil_interface_level_in),
            high_high_oil_level_in: self
                .high_high_oil_level_in
                .unwrap_or(defaults.high_high_oil_level_in),
        }
    }
}

/// Complete worksheet output. Fully derived from one [`ThermalInput`]; never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalResults {
    /// Free water and sediment share of the inlet stream (%)
    pub free_water_and_sediment_pct: f64,

    /// Emulsified water share of the inlet stream (%)
    pub emulsified_water_pct: f64,

    /// Total volumetric flow through the treater (bpd)
    pub volumetric_flow_rate_bpd: f64,

    /// Associated gas density (lb/ft³)
    pub gas_density_lb_ft3: f64,

    /// Assumed gas molecular weight (lb/lb-mol)
    pub gas_molecular_weight_lb_mol: f64,

    /// Cross-sectional area occupied by oil (ft²)
    pub oil_area_ft2: f64,

    /// Oil retention volume (ft³)
    pub oil_retention_volume_ft3: f64,

    /// Water flow rate entering the treater (bpd)
    pub water_flow_rate_bpd: f64,

    /// Dry oil flow rate (bpd)
    pub dry_oil_flow_rate_bpd: f64,

    /// Estimated oil retention time (min)
    pub estimated_retention_time_min: f64,

    /// Area from the bottom to the low-low water level (ft²)
    pub low_water_area_ft2: f64,

    /// Total vessel cross-section (ft²)
    pub total_vessel_area_ft2: f64,

    /// Cross-sectional area available to the gas phase (ft²)
    pub gas_area_ft2: f64,

    /// Vertical clearance reserved for gas (ft)
    pub free_height_for_gas_ft: f64,

    /// Water retention volume (ft³)
    pub water_retention_volume_ft3: f64,

    /// Water cut of the oil stream leaving the treater (%)
    pub water_cut_leaving_treater_pct: f64,

    /// Allowable gas velocity per Souders-Brown (ft/s)
    pub allowable_gas_velocity_ft_s: f64,

    /// Required gas-phase area (ft²)
    pub required_gas_area_ft2: f64,

    /// Cross-sectional area occupied by water (ft²)
    pub water_area_ft2: f64,

    /// Water carried over with the treated oil (bpd)
    pub water_leaving_with_oil_bpd: f64,

    /// Dehydration efficiency of the vessel (%)
    pub dehydration_pct: f64,

    /// Oil mass flow (lb/hr)
    pub oil_mass_flow_lb_hr: f64,

    /// Water mass flow (lb/hr)
    pub water_mass_flow_lb_hr: f64,

    /// Heavy-phase (water) settling velocity (ft/min)
    pub heavy_phase_settling_velocity_ft_min: f64,

    /// Heavy-phase settling time (min)
    pub heavy_phase_settling_time_min: f64,

    /// Light-phase settling time (min)
    pub light_phase_settling_time_min: f64,

    /// Total heat duty to raise the stream from ambient to inlet (BTU/hr)
    pub total_heat_required_btu_hr: f64,

    /// Free water entering the treater (bpd)
    pub free_water_flow_entering_bpd: f64,

    /// Emulsified water entering the treater (bpd)
    pub emulsified_water_flow_entering_bpd: f64,

    /// Total water handled by the treater (bpd)
    pub total_water_to_be_handled_bpd: f64,

    /// Volumetric water fraction of the inlet stream (dimensionless)
    pub volumetric_water_fraction: f64,

    /// Crude specific gravity (dimensionless)
    pub oil_specific_gravity: f64,

    /// Effective crude density used by the worksheet (lb/ft³)
    pub calculated_oil_density_lb_ft3: f64,

    /// Effective water density used by the worksheet (lb/ft³)
    pub calculated_water_density_lb_ft3: f64,
}

/// Run the full thermal worksheet.
///
/// Fails with `InvalidInput` when diameter, length, total flow, or API
/// gravity is non-positive, or when a level marker lies outside the shell.
/// Once validation passes, every downstream step completes; extreme inputs
/// may still produce physically meaningless numbers, which is the caller's
/// concern (the worksheet reproduces the standard formulas verbatim).
pub fn calculate(input: &ThermalInput) -> CalcResult<ThermalResults> {
    input.validate()?;

    let free_water_removal_pct = input.free_water_removal_pct.unwrap_or(85.0);
    let water_drop_size_um = input.water_drop_size_um.unwrap_or(150.0);
    let water_specific_gravity = input.water_specific_gravity.unwrap_or(1.0);
    let oil_viscosity_cp = input.oil_viscosity_cp.unwrap_or(15.5);
    let factor_k = input.factor_k.unwrap_or(0.5);
    let levels = input.vessel_levels();

    // Fluid properties, honoring overrides
    let oil_specific_gravity = properties::oil_specific_gravity(input.api_gravity);
    let oil_density = input.oil_density_lb_ft3.unwrap_or_else(|| {
        properties::oil_density(oil_specific_gravity, input.inlet_temperature_f)
    });
    let water_density = input
        .water_density_lb_ft3
        .unwrap_or_else(|| properties::water_density(input.inlet_temperature_f));
    let oil_specific_heat = input.oil_specific_heat.unwrap_or_else(|| {
        properties::oil_specific_heat(oil_specific_gravity, input.inlet_temperature_f)
    });
    let water_specific_heat = input
        .water_specific_heat
        .unwrap_or_else(|| properties::water_specific_heat(input.inlet_temperature_f));

    // Inlet stream split between free and emulsified water
    let free_water_and_sediment_pct = input.water_fraction_pct * free_water_removal_pct / 100.0;
    let emulsified_water_pct = input.water_fraction_pct - free_water_and_sediment_pct;

    let volumetric_flow_rate_bpd = input.total_flow_bpd;
    let gas_density =
        properties::gas_density(input.operating_pressure_psig, input.inlet_temperature_f);

    // Vessel cross-sections from the level markers
    let total_vessel_area_ft2 = geometry::total_vessel_area(input.diameter_ft);
    let areas = geometry::phase_areas(input.diameter_ft, &levels)?;

    let oil_retention_volume_ft3 = areas.oil_area_ft2 * input.length_ft;
    let water_retention_volume_ft3 = areas.water_area_ft2 * input.length_ft;

    // Flow split
    let water_flow_rate_bpd = input.total_flow_bpd * input.water_fraction_pct / 100.0;
    let dry_oil_flow_rate_bpd = input.total_flow_bpd - water_flow_rate_bpd;

    let estimated_retention_time_min =
        (oil_retention_volume_ft3 / FT3_PER_BBL) * 24.0 * 60.0 / dry_oil_flow_rate_bpd;

    // Gas-phase sizing
    let gas_area_ft2 = geometry::segment_area(input.diameter_ft, FREE_HEIGHT_FOR_GAS_FT * 12.0)?;
    let allowable_gas_velocity_ft_s =
        factor_k * ((oil_density - gas_density) / gas_density).sqrt();
    // Simplified form of the required-area equation; the full derivation
    // needs gas-rate parameters this worksheet does not carry
    let required_gas_area_ft2 = 1.7 * 0.994 / (allowable_gas_velocity_ft_s * 24.0 * 3600.0);

    // Carryover and dehydration
    let water_leaving_with_oil_bpd =
        water_flow_rate_bpd * (100.0 - free_water_and_sediment_pct) / 100.0;
    let water_cut_leaving_treater_pct =
        water_leaving_with_oil_bpd / (water_leaving_with_oil_bpd + dry_oil_flow_rate_bpd) * 100.0;
    let dehydration_pct = 100.0 * (water_retention_volume_ft3 / FT3_PER_BBL)
        / (water_flow_rate_bpd * free_water_and_sediment_pct / 100.0);

    // Mass flows
    let oil_mass_flow_lb_hr = MASS_FLOW_FACTOR * dry_oil_flow_rate_bpd * oil_specific_gravity;
    let water_mass_flow_lb_hr = MASS_FLOW_FACTOR * water_flow_rate_bpd * water_specific_gravity;

    // Stokes-law settling of the water phase through the oil pad
    let heavy_phase_settling_velocity_ft_min =
        18.4663 * water_drop_size_um.powi(2) * (water_density - oil_density) / oil_viscosity_cp;
    let heavy_phase_settling_time_min = ((levels.high_high_oil_level_in
        - levels.water_oil_interface_level_in)
        / 12.0)
        / heavy_phase_settling_velocity_ft_min;
    let light_phase_settling_time_min = heavy_phase_settling_time_min / 60.0;

    // Heat duty to raise the full stream from ambient to inlet temperature
    let delta_t = input.inlet_temperature_f - input.ambient_temperature_f;
    let total_heat_required_btu_hr = (dry_oil_flow_rate_bpd * oil_specific_heat
        + water_flow_rate_bpd * water_specific_heat)
        * delta_t;

    // Water accounting at the inlet
    let free_water_flow_entering_bpd = water_flow_rate_bpd
        * (100.0 - free_water_and_sediment_pct)
        * (100.0 - free_water_removal_pct)
        / (100.0 * 100.0);
    let emulsified_water_flow_entering_bpd = water_flow_rate_bpd - free_water_flow_entering_bpd;
    let total_water_to_be_handled_bpd =
        free_water_flow_entering_bpd + emulsified_water_flow_entering_bpd;
    let volumetric_water_fraction = total_water_to_be_handled_bpd / volumetric_flow_rate_bpd;

    Ok(ThermalResults {
        free_water_and_sediment_pct,
        emulsified_water_pct,
        volumetric_flow_rate_bpd,
        gas_density_lb_ft3: gas_density,
        gas_molecular_weight_lb_mol: GAS_MOLECULAR_WEIGHT,
        oil_area_ft2: areas.oil_area_ft2,
        oil_retention_volume_ft3,
        water_flow_rate_bpd,
        dry_oil_flow_rate_bpd,
        estimated_retention_time_min,
        low_water_area_ft2: areas.low_water_area_ft2,
        total_vessel_area_ft2,
        gas_area_ft2,
        free_height_for_gas_ft: FREE_HEIGHT_FOR_GAS_FT,
        water_retention_volume_ft3,
        water_cut_leaving_treater_pct,
        allowable_gas_velocity_ft_s,
        required_gas_area_ft2,
        water_area_ft2: areas.water_area_ft2,
        water_leaving_with_oil_bpd,
        dehydration_pct,
        oil_mass_flow_lb_hr,
        water_mass_flow_lb_hr,
        heavy_phase_settling_velocity_ft_min,
        heavy_phase_settling_time_min,
        light_phase_settling_time_min,
        total_heat_required_btu_hr,
        free_water_flow_entering_bpd,
        emulsified_water_flow_entering_bpd,
        total_water_to_be_handled_bpd,
        volumetric_water_fraction,
        oil_specific_gravity,
        calculated_oil_density_lb_ft3: oil_density,
        calculated_water_density_lb_ft3: water_density,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_input() -> ThermalInput {
        ThermalInput {
            diameter_ft: 4.0,
            length_ft: 10.0,
            total_flow_bpd: 500.0,
            water_fraction_pct: 20.0,
            api_gravity: 18.0,
            inlet_temperature_f: 75.0,
            ambient_temperature_f: 30.0,
            operating_pressure_psig: 50.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_scenario() {
        let results = calculate(&test_input()).unwrap();

        assert_relative_eq!(results.oil_specific_gravity, 141.5 / 149.5, epsilon = 1e-12);
        assert_relative_eq!(results.total_vessel_area_ft2, 12.566, epsilon = 1e-3);

        // Flow split: 20% water of 500 bpd
        assert_relative_eq!(results.water_flow_rate_bpd, 100.0, epsilon = 1e-12);
        assert_relative_eq!(results.dry_oil_flow_rate_bpd, 400.0, epsilon = 1e-12);

        // 85% default free-water removal
        assert_relative_eq!(results.free_water_and_sediment_pct, 17.0, epsilon = 1e-12);
        assert_relative_eq!(results.emulsified_water_pct, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_all_result_fields_are_finite() {
        let results = calculate(&test_input()).unwrap();
        let value = serde_json::to_value(&results).unwrap();

        let object = value.as_object().unwrap();
        assert!(object.len() >= 30);
        for (field, number) in object {
            let number = number.as_f64();
            assert!(
                number.is_some_and(f64::is_finite),
                "field {field} must be a finite number, got {number:?}"
            );
        }
    }

    #[test]
    fn test_calculation_is_pure() {
        let input = test_input();
        let first = calculate(&input).unwrap();
        let second = calculate(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_specific_heat_overrides_change_heat_duty() {
        let mut input = test_input();
        let computed = calculate(&input).unwrap();

        input.oil_specific_heat = Some(0.5);
        input.water_specific_heat = Some(1.0);
        let overridden = calculate(&input).unwrap();

        // Q = (400 * 0.5 + 100 * 1.0) * 45
        assert_relative_eq!(
            overridden.total_heat_required_btu_hr,
            (400.0 * 0.5 + 100.0 * 1.0) * 45.0,
            epsilon = 1e-9
        );
        assert!(overridden.total_heat_required_btu_hr != computed.total_heat_required_btu_hr);
    }

    #[test]
    fn test_water_accounting_balances() {
        let results = calculate(&test_input()).unwrap();
        assert_relative_eq!(
            results.total_water_to_be_handled_bpd,
            results.free_water_flow_entering_bpd + results.emulsified_water_flow_entering_bpd,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            results.volumetric_water_fraction,
            results.total_water_to_be_handled_bpd / 500.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let mut input = test_input();
        input.diameter_ft = 0.0;
        assert!(calculate(&input).is_err());

        let mut input = test_input();
        input.length_ft = -1.0;
        assert!(calculate(&input).is_err());

        let mut input = test_input();
        input.total_flow_bpd = 0.0;
        assert!(calculate(&input).is_err());

        let mut input = test_input();
        input.api_gravity = -5.0;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_level_outside_shell_rejected() {
        let mut input = test_input();
        // 4 ft shell is 48 inches tall
        input.high_high_oil_level_in = Some(60.0);
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_input_serialization() {
        let input = test_input();
        let json = serde_json::to_string_pretty(&input).unwrap();
        let roundtrip: ThermalInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }
}
