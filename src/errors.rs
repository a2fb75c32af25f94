//! # Error Types
//!
//! Structured error types for treater_core. Every failure carries enough
//! context to be reported programmatically by the surrounding service layer
//! (field name, offending value, reason).
//!
//! ## Example
//!
//! ```rust
//! use treater_core::errors::{CalcError, CalcResult};
//!
//! fn validate_diameter(diameter_ft: f64) -> CalcResult<()> {
//!     if diameter_ft <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "diameter_ft",
//!             diameter_ft.to_string(),
//!             "Diameter must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for treater_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// All errors are raised synchronously before (or at the point of) the
/// offending computation; no operation returns a partial result. Retrying is
/// never useful because every calculation is a deterministic pure function.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-positive, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A field required by the requested operation is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// The evaluation scorer was called with an empty criteria list
    #[error("No criteria provided for calculation")]
    EmptyCriteria,
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::EmptyCriteria => "EMPTY_CRITERIA",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("diameter_ft", "-4.0", "Diameter must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("max_value").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::EmptyCriteria.error_code(), "EMPTY_CRITERIA");
    }
}
