//! # Treater Calculations
//!
//! The domain calculations of the core. Each calculation follows the same
//! pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable) with a `validate()`
//!   method that runs before any computation
//! - `*Results` - Calculation results (JSON-serializable)
//! - `calculate*(input) -> CalcResult<*Results>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`thermal`] - Full API-12L thermal/hydraulic treater worksheet
//! - [`sizing`] - Reduced sizing path with catalog search (treatment
//!   creation flow)
//! - [`evaluation`] - Weighted pass/fail criteria scoring

pub mod evaluation;
pub mod sizing;
pub mod thermal;

// Re-export commonly used types
pub use evaluation::{CalculationCriteria, ComparisonMode, EvaluationResult};
pub use sizing::{SizingInput, SizingMethod, TreatmentCalculations};
pub use thermal::{ThermalInput, ThermalResults};
