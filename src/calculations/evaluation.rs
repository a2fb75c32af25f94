//! # Evaluation Scoring
//!
//! Aggregates weighted pass/fail technical criteria into an overall
//! evaluation result. A failed critical criterion fails the whole evaluation
//! regardless of the weighted score. The aggregation is commutative over the
//! criteria list: ordering never changes the outcome.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// How a criterion's actual value is compared against its requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonMode {
    /// Passes when actual >= required
    #[default]
    Min,
    /// Passes when actual <= required
    Max,
    /// Passes when required <= actual <= max_value
    Range,
}

/// One evaluated criterion, as consumed by the scorer.
///
/// `is_critical` and `weight` are optional on the wire; absent values
/// default to non-critical with weight 1 during aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationCriteria {
    /// Whether this criterion passed its comparison
    pub approved: bool,

    /// Compliance margin, actual/required as a percentage
    pub compliance_margin_pct: f64,

    /// Whether a failure here fails the whole evaluation (default false)
    pub is_critical: Option<bool>,

    /// Relative weight for the overall score, 1-100 (default 1)
    pub weight: Option<f64>,
}

/// Aggregated evaluation outcome. Fully derived, stateless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// True iff no critical criterion failed
    pub approved: bool,

    /// Weighted mean of compliance margins; absent when every weight is zero
    pub score: Option<f64>,

    /// Number of critical criteria that failed
    pub critical_failures: usize,

    /// Unweighted mean of compliance margins (%)
    pub average_compliance_pct: f64,
}

/// Compliance margin of a criterion: `actual/required × 100`.
///
/// A zero requirement is treated as fully met (100%) rather than dividing
/// by zero.
pub fn compliance_margin(actual_value: f64, required_value: f64) -> f64 {
    if required_value == 0.0 {
        return 100.0;
    }
    (actual_value / required_value) * 100.0
}

/// Whether a single criterion passes its comparison.
///
/// `Range` requires `max_value`; requesting a range check without one is a
/// `MissingField` error raised at the point of use.
pub fn is_criteria_approved(
    actual_value: f64,
    required_value: f64,
    mode: ComparisonMode,
    max_value: Option<f64>,
) -> CalcResult<bool> {
    match mode {
        ComparisonMode::Min => Ok(actual_value >= required_value),
        ComparisonMode::Max => Ok(actual_value <= required_value),
        ComparisonMode::Range => {
            let max_value = max_value.ok_or_else(|| CalcError::missing_field("max_value"))?;
            Ok(actual_value >= required_value && actual_value <= max_value)
        }
    }
}

/// Aggregate a list of criteria into an overall result.
///
/// Fails with `EmptyCriteria` when the list is empty. Missing per-criterion
/// fields default to non-critical / weight 1; the weighted score is computed
/// only when at least one (defaulted) weight is positive, and is otherwise
/// absent rather than zero.
pub fn calculate_evaluation_result(
    criteria: &[CalculationCriteria],
) -> CalcResult<EvaluationResult> {
    if criteria.is_empty() {
        return Err(CalcError::EmptyCriteria);
    }

    let critical_failures = criteria
        .iter()
        .filter(|c| c.is_critical.unwrap_or(false) && !c.approved)
        .count();

    let total_compliance: f64 = criteria.iter().map(|c| c.compliance_margin_pct).sum();
    let average_compliance_pct = total_compliance / criteria.len() as f64;

    let weights: Vec<f64> = criteria.iter().map(|c| c.weight.unwrap_or(1.0)).collect();
    let score = if weights.iter().any(|&w| w > 0.0) {
        let total_weight: f64 = weights.iter().sum();
        let weighted_sum: f64 = criteria
            .iter()
            .zip(&weights)
            .map(|(c, w)| c.compliance_margin_pct * w)
            .sum();
        Some(weighted_sum / total_weight)
    } else {
        None
    };

    Ok(EvaluationResult {
        approved: critical_failures == 0,
        score,
        critical_failures,
        average_compliance_pct,
    })
}
