//! # treater_core - Thermal Treater Design Engine
//!
//! `treater_core` is the calculation heart of a treater-design service:
//! sizing and heat-balance computations for thermal oil/water treaters per
//! the API-12L methodology, plus catalog matching against standard treater
//! geometries and scoring of design evaluations.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results; no
//!   I/O, no shared mutable state, no hidden configuration
//! - **JSON-First**: All public types implement Serialize/Deserialize, so
//!   the surrounding HTTP/persistence layers map them directly
//! - **Rich Errors**: Structured error types with field-level context, not
//!   just strings
//! - **Formulas Preserved**: The API-12L worksheet formulas are reproduced
//!   exactly, including their documented simplifications
//!
//! ## Quick Start
//!
//! ```rust
//! use treater_core::calculations::sizing::{
//!     calculate_treatment_parameters, SizingInput, SizingMethod,
//! };
//! use treater_core::catalog::InMemoryCatalog;
//!
//! let input = SizingInput {
//!     total_flow_bpd: 500.0,
//!     water_fraction_pct: 20.0,
//!     api_gravity: 18.0,
//!     inlet_temperature_f: 75.0,
//!     target_temperature_f: 140.0,
//!     ambient_temperature_f: 30.0,
//!     oil_retention_time_min: 60.0,
//!     water_retention_time_min: 30.0,
//!     wind_speed_mph: 15.0,
//! };
//!
//! let results = calculate_treatment_parameters(
//!     &input,
//!     SizingMethod::Simplified,
//!     InMemoryCatalog::standard(),
//! )
//! .unwrap();
//! assert!(results.recommendation.is_some());
//! ```
//!
//! ## Modules
//!
//! - [`properties`] - Fluid property correlations (specific gravity,
//!   density, specific heat, gas density)
//! - [`geometry`] - Circular-segment vessel geometry
//! - [`catalog`] - Standard treater catalog and candidate matcher
//! - [`calculations`] - Thermal worksheet, treatment sizing, evaluation
//!   scoring
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod errors;
pub mod geometry;
pub mod properties;

// Re-export commonly used types at crate root for convenience
pub use calculations::evaluation::{
    calculate_evaluation_result, compliance_margin, is_criteria_approved, CalculationCriteria,
    ComparisonMode, EvaluationResult,
};
pub use calculations::sizing::{
    calculate_treatment_parameters, SizingInput, SizingMethod, TreatmentCalculations,
};
pub use calculations::thermal::{calculate as calculate_thermal_results, ThermalInput, ThermalResults};
pub use catalog::{InMemoryCatalog, TreaterCatalog, TreaterOption, TreaterSelection, TreaterType};
pub use errors::{CalcError, CalcResult};
