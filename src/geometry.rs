//! # Vessel Geometry
//!
//! Circular-segment geometry for a horizontal cylindrical treater shell.
//! Liquid levels are measured in inches from the vessel bottom; the area
//! occupied by each phase is the difference of stacked circular segments:
//!
//! ```text
//! oil area   = segment(high-high oil) - segment(interface)
//! water area = segment(interface)     - segment(low-low water)
//! ```
//!
//! Levels must lie within `[0, 12 * diameter]` inches (bottom to top of the
//! shell); out-of-range levels are rejected up front rather than letting
//! `acos` return NaN.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::errors::{CalcError, CalcResult};

/// Total cross-sectional area of the vessel shell (ft²): `π·D²/4`.
pub fn total_vessel_area(diameter_ft: f64) -> f64 {
    PI * diameter_ft.powi(2) / 4.0
}

/// Area (ft²) of the circular segment between the vessel bottom and a liquid
/// level `level_in` inches above it.
///
/// For level `h` (in) and diameter `D` (ft):
/// `ratio = 2h / 12D`, `θ = 2·acos(1 - ratio)`,
/// `area = (θ - sin θ) · A_total / 2π`.
///
/// Returns `InvalidInput` when the level is below the bottom or above the top
/// of the shell (`h` outside `[0, 12D]`).
pub fn segment_area(diameter_ft: f64, level_in: f64) -> CalcResult<f64> {
    let shell_height_in = diameter_ft * 12.0;
    if level_in < 0.0 || level_in > shell_height_in {
        return Err(CalcError::invalid_input(
            "level_in",
            level_in.to_string(),
            format!("Level must be between 0 and {shell_height_in} inches"),
        ));
    }

    let ratio = (2.0 * level_in) / shell_height_in;
    let angle = 2.0 * (1.0 - ratio).acos();
    Ok((angle - angle.sin()) * total_vessel_area(diameter_ft) / (2.0 * PI))
}

/// Internal level markers of the treater, in inches from the vessel bottom.
///
/// Defaults follow the standard instrument settings used by the sizing
/// worksheet: low-low water 2", water/oil interface 12", high-high oil 24".
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VesselLevels {
    /// Low-low water shutdown level (in)
    pub low_low_water_level_in: f64,

    /// Water/oil interface level (in)
    pub water_oil_interface_level_in: f64,

    /// High-high oil level (in)
    pub high_high_oil_level_in: f64,
}

impl Default for VesselLevels {
    fn default() -> Self {
        VesselLevels {
            low_low_water_level_in: 2.0,
            water_oil_interface_level_in: 12.0,
            high_high_oil_level_in: 24.0,
        }
    }
}

/// Cross-sectional areas occupied by each phase (ft²).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhaseAreas {
    /// Area from the bottom to the low-low water level (ft²)
    pub low_water_area_ft2: f64,

    /// Area occupied by the water phase (ft²)
    pub water_area_ft2: f64,

    /// Area occupied by the oil phase (ft²)
    pub oil_area_ft2: f64,
}

/// Compute the stacked phase areas for a vessel of the given diameter.
///
/// Each level is converted to a bottom-referenced segment and the areas are
/// obtained by subtraction, so the water area excludes the low-water zone and
/// the oil area excludes both liquid zones below it.
pub fn phase_areas(diameter_ft: f64, levels: &VesselLevels) -> CalcResult<PhaseAreas> {
    let low_water_area_ft2 = segment_area(diameter_ft, levels.low_low_water_level_in)?;
    let interface_area = segment_area(diameter_ft, levels.water_oil_interface_level_in)?;
    let high_oil_area = segment_area(diameter_ft, levels.high_high_oil_level_in)?;

    let water_area_ft2 = interface_area - low_water_area_ft2;
    let oil_area_ft2 = high_oil_area - water_area_ft2 - low_water_area_ft2;

    Ok(PhaseAreas {
        low_water_area_ft2,
        water_area_ft2,
        oil_area_ft2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_area_boundaries() {
        // Empty vessel: zero area
        let empty = segment_area(4.0, 0.0).unwrap();
        assert!(empty.abs() < 1e-12);

        // Full vessel (level = 12 * diameter inches): total area
        let full = segment_area(4.0, 48.0).unwrap();
        assert!((full - total_vessel_area(4.0)).abs() < 1e-9);
    }

    #[test]
    fn test_segment_area_half_full() {
        // Level at the centerline gives exactly half the shell area
        let half = segment_area(4.0, 24.0).unwrap();
        assert!((half - total_vessel_area(4.0) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_segment_area_out_of_range() {
        assert!(segment_area(4.0, -1.0).is_err());
        assert!(segment_area(4.0, 48.1).is_err());
    }

    #[test]
    fn test_total_vessel_area() {
        assert!((total_vessel_area(4.0) - 12.566).abs() < 1e-3);
    }

    #[test]
    fn test_phase_areas_stack_to_high_oil_segment() {
        let levels = VesselLevels::default();
        let areas = phase_areas(4.0, &levels).unwrap();
        let high_oil = segment_area(4.0, levels.high_high_oil_level_in).unwrap();

        let stacked = areas.low_water_area_ft2 + areas.water_area_ft2 + areas.oil_area_ft2;
        assert!((stacked - high_oil).abs() < 1e-9);
        assert!(areas.water_area_ft2 > 0.0);
        assert!(areas.oil_area_ft2 > 0.0);
    }
}
