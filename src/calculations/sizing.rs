//! # Treatment Sizing Calculation
//!
//! The reduced API-12L sizing path used when creating a treatment design:
//! flow split, retention volumes, required heat, and the catalog search that
//! recommends a standard treater.
//!
//! Two heat-capacity formulas coexist in this system's history: the
//! simplified coefficient form `Q = W·(6.44 + 8.14·X/100)·ΔT` and a detailed
//! form built from the fluid-property correlations. They produce different
//! numbers and are deliberately kept as separate [`SizingMethod`] variants
//! selected by the caller; see DESIGN.md.
//!
//! Envelope heat loss depends on a candidate vessel's own diameter and
//! length, so it is evaluated per catalog candidate during the search, not
//! once up front.

use serde::{Deserialize, Serialize};

use crate::catalog::{self, TreaterCatalog, TreaterSelection};
use crate::errors::{CalcError, CalcResult};
use crate::properties;

/// Input record for the treatment sizing path.
///
/// ## JSON Example
///
/// ```json
/// {
///   "total_flow_bpd": 500.0,
///   "water_fraction_pct": 20.0,
///   "api_gravity": 18.0,
///   "inlet_temperature_f": 75.0,
///   "target_temperature_f": 140.0,
///   "ambient_temperature_f": 30.0,
///   "oil_retention_time_min": 60.0,
///   "water_retention_time_min": 30.0,
///   "wind_speed_mph": 15.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingInput {
    /// Total emulsion flow W (bpd)
    pub total_flow_bpd: f64,

    /// Water and sediment fraction X (%)
    pub water_fraction_pct: f64,

    /// API gravity of the crude
    pub api_gravity: f64,

    /// Inlet temperature T1 (°F)
    pub inlet_temperature_f: f64,

    /// Treating temperature T2 (°F)
    pub target_temperature_f: f64,

    /// Ambient temperature T3 (°F)
    pub ambient_temperature_f: f64,

    /// Oil retention time t_o (min)
    pub oil_retention_time_min: f64,

    /// Water retention time t_w (min)
    pub water_retention_time_min: f64,

    /// Design wind speed (mph)
    pub wind_speed_mph: f64,
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> CalcResult<()> {
    if value < min || value > max {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("Value must be between {min} and {max}"),
        ));
    }
    Ok(())
}

impl SizingInput {
    /// Validate input parameters against the design envelope this sizing
    /// method is published for.
    pub fn validate(&self) -> CalcResult<()> {
        if self.total_flow_bpd < 100.0 {
            return Err(CalcError::invalid_input(
                "total_flow_bpd",
                self.total_flow_bpd.to_string(),
                "Total flow must be at least 100 bpd",
            ));
        }
        check_range("water_fraction_pct", self.water_fraction_pct, 0.0, 100.0)?;
        check_range("inlet_temperature_f", self.inlet_temperature_f, 60.0, 300.0)?;
        check_range("target_temperature_f", self.target_temperature_f, 100.0, 250.0)?;
        check_range("ambient_temperature_f", self.ambient_temperature_f, -40.0, 120.0)?;
        check_range("oil_retention_time_min", self.oil_retention_time_min, 10.0, 300.0)?;
        check_range("water_retention_time_min", self.water_retention_time_min, 5.0, 150.0)?;
        check_range("wind_speed_mph", self.wind_speed_mph, 0.0, 50.0)?;
        check_range("api_gravity", self.api_gravity, 10.0, 50.0)?;

        if self.target_temperature_f <= self.inlet_temperature_f {
            return Err(CalcError::invalid_input(
                "target_temperature_f",
                self.target_temperature_f.to_string(),
                "Treating temperature must exceed the inlet temperature",
            ));
        }
        Ok(())
    }

    /// Oil flow `Wo = W·(100 − X)/100` (bpd)
    pub fn oil_flow_bpd(&self) -> f64 {
        self.total_flow_bpd * (100.0 - self.water_fraction_pct) / 100.0
    }

    /// Water flow `Ww = W·X/100` (bpd)
    pub fn water_flow_bpd(&self) -> f64 {
        self.total_flow_bpd * self.water_fraction_pct / 100.0
    }

    /// Oil retention volume `Vo = Wo·t_o/1440` (bbl)
    pub fn oil_retention_volume_bbl(&self) -> f64 {
        self.oil_flow_bpd() * self.oil_retention_time_min / 1440.0
    }

    /// Water retention volume `Vw = Ww·t_w/1440` (bbl)
    pub fn water_retention_volume_bbl(&self) -> f64 {
        self.water_flow_bpd() * self.water_retention_time_min / 1440.0
    }
}

/// Which historical heat-capacity formula to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizingMethod {
    /// `Q = W·(6.44 + 8.14·X/100)·(T2 − T1)` with fixed coefficients
    #[default]
    Simplified,

    /// `Q = (Wo·Cp_o + Ww·Cp_w)·(T2 − T1)` with specific heats from the
    /// property correlations at the inlet temperature
    Detailed,
}

impl SizingMethod {
    /// Required heat capacity (BTU/hr) for the given design conditions.
    pub fn required_heat_btu_hr(&self, input: &SizingInput) -> f64 {
        let delta_t = input.target_temperature_f - input.inlet_temperature_f;
        match self {
            SizingMethod::Simplified => {
                input.total_flow_bpd
                    * (6.44 + 8.14 * input.water_fraction_pct / 100.0)
                    * delta_t
            }
            SizingMethod::Detailed => {
                let sg = properties::oil_specific_gravity(input.api_gravity);
                let oil_cp = properties::oil_specific_heat(sg, input.inlet_temperature_f);
                let water_cp = properties::water_specific_heat(input.inlet_temperature_f);
                (input.oil_flow_bpd() * oil_cp + input.water_flow_bpd() * water_cp) * delta_t
            }
        }
    }
}

/// Wind constant K for the envelope-loss formula, stepped by wind speed.
pub fn wind_constant(wind_speed_mph: f64) -> f64 {
    if wind_speed_mph <= 5.0 {
        8.5
    } else if wind_speed_mph <= 10.0 {
        10.2
    } else if wind_speed_mph <= 15.0 {
        13.2
    } else if wind_speed_mph <= 20.0 {
        16.8
    } else {
        21.0
    }
}

/// Envelope heat loss `Q_loss = K·D·L·(T2 − T3)` (BTU/hr) for a candidate
/// vessel of the given diameter and length.
pub fn heat_loss_btu_hr(input: &SizingInput, diameter_ft: f64, length_ft: f64) -> f64 {
    wind_constant(input.wind_speed_mph)
        * diameter_ft
        * length_ft
        * (input.target_temperature_f - input.ambient_temperature_f)
}

/// Results of the treatment sizing path, including the catalog
/// recommendation when one is feasible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentCalculations {
    /// Oil flow (bpd)
    pub calculated_oil_flow_bpd: f64,

    /// Water flow (bpd)
    pub calculated_water_flow_bpd: f64,

    /// Oil retention volume (bbl)
    pub oil_retention_volume_bbl: f64,

    /// Water retention volume (bbl)
    pub water_retention_volume_bbl: f64,

    /// Required heat capacity (BTU/hr)
    pub required_heat_capacity_btu_hr: f64,

    /// Governing retention volume, max of oil and water (bbl)
    pub required_retention_volume_bbl: f64,

    /// Estimated residence time at the governing volume (min)
    pub estimated_residence_time_min: f64,

    /// Human-readable descriptions of every feasible candidate, in catalog
    /// order
    pub recommended_treaters: Vec<String>,

    /// Best candidate minimizing total heat, absent when nothing in the
    /// catalog satisfies both heat and volume requirements
    pub recommendation: Option<TreaterSelection>,
}

/// Run the treatment sizing path against a catalog.
///
/// Computes the flow split, retention volumes, and required heat with the
/// selected [`SizingMethod`], queries the catalog for candidates with
/// sufficient heat capacity, filters them by internal volume, and picks the
/// candidate minimizing required heat plus its own envelope loss. An empty
/// `recommendation` means no catalog option is feasible; that is a valid
/// outcome, not an error.
pub fn calculate_treatment_parameters(
    input: &SizingInput,
    method: SizingMethod,
    catalog: &dyn TreaterCatalog,
) -> CalcResult<TreatmentCalculations> {
    input.validate()?;

    let oil_flow = input.oil_flow_bpd();
    let water_flow = input.water_flow_bpd();
    let oil_retention_volume = input.oil_retention_volume_bbl();
    let water_retention_volume = input.water_retention_volume_bbl();
    let required_volume = oil_retention_volume.max(water_retention_volume);

    let required_heat = method.required_heat_btu_hr(input);

    let candidates = catalog.find_candidates(required_heat);
    let feasible = catalog::feasible_candidates(&candidates, required_volume);
    let recommendation = catalog::select_best(&candidates, required_heat, required_volume, |o| {
        heat_loss_btu_hr(input, o.diameter_ft, o.length_ft)
    });

    let estimated_residence_time_min = required_volume * 1440.0 / input.total_flow_bpd;

    Ok(TreatmentCalculations {
        calculated_oil_flow_bpd: oil_flow,
        calculated_water_flow_bpd: water_flow,
        oil_retention_volume_bbl: oil_retention_volume,
        water_retention_volume_bbl: water_retention_volume,
        required_heat_capacity_btu_hr: required_heat,
        required_retention_volume_bbl: required_volume,
        estimated_residence_time_min,
        recommended_treaters: feasible.iter().map(|o| o.describe()).collect(),
        recommendation,
    })
}
