//! # Standard Treater Catalog
//!
//! Standard treater geometries per API-12L (Table 1: vertical, Table 2:
//! horizontal) and the matcher that ranks catalog options against computed
//! heat/volume requirements.
//!
//! The catalog is read-only from the core's perspective. The
//! [`TreaterCatalog`] trait is the seam to external storage: implementations
//! must return candidates ordered ascending by minimum heat capacity, then by
//! diameter, and must not surface soft-deleted rows. [`InMemoryCatalog`]
//! honors that contract and also carries the built-in standard tables.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Barrels per cubic foot of internal shell volume
const BBL_PER_FT3: f64 = 0.1781;

/// Treater vessel orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreaterType {
    Vertical,
    Horizontal,
}

impl fmt::Display for TreaterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreaterType::Vertical => write!(f, "vertical"),
            TreaterType::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// A standard treater configuration from the catalog.
///
/// ## JSON Example
///
/// ```json
/// {
///   "treater_type": "horizontal",
///   "diameter_ft": 4.0,
///   "length_ft": 15.0,
///   "design_pressure_psig": 50.0,
///   "min_heat_capacity_btu_hr": 250000.0,
///   "notes": "LSS 15"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreaterOption {
    /// Vessel orientation (vertical/horizontal)
    pub treater_type: TreaterType,

    /// Outside diameter (ft)
    pub diameter_ft: f64,

    /// Shell length, seam to seam (ft)
    pub length_ft: f64,

    /// Design pressure rating (psig)
    pub design_pressure_psig: f64,

    /// Minimum firebox heat capacity (BTU/hr)
    pub min_heat_capacity_btu_hr: f64,

    /// Free-form catalog notes
    pub notes: Option<String>,
}

impl TreaterOption {
    /// Physical internal volume of the shell in barrels:
    /// `π·(D/2)²·L · 0.1781`.
    pub fn internal_volume_bbl(&self) -> f64 {
        PI * (self.diameter_ft / 2.0).powi(2) * self.length_ft * BBL_PER_FT3
    }

    /// One-line description for recommendation listings, e.g.
    /// `"horizontal treater 4ft - LSS 15 - 250000 BTU/hr"`.
    pub fn describe(&self) -> String {
        format!(
            "{} treater {}ft - LSS {} - {} BTU/hr",
            self.treater_type, self.diameter_ft, self.length_ft, self.min_heat_capacity_btu_hr
        )
    }
}

/// Read-only query interface over the treater catalog.
///
/// Implementations back onto external storage; the core only requires the
/// ordering contract below. No write or lock is ever taken through this
/// trait, so concurrent lookups are unrestricted.
pub trait TreaterCatalog {
    /// All options whose minimum heat capacity meets or exceeds the given
    /// requirement, ordered ascending by minimum heat capacity, then by
    /// diameter. The ordering is load-bearing: the matcher's tie-break
    /// depends on it.
    fn find_candidates(&self, min_heat_capacity_btu_hr: f64) -> Vec<TreaterOption>;
}

/// In-memory catalog, sorted at construction to honor the ordering contract.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    options: Vec<TreaterOption>,
}

impl InMemoryCatalog {
    /// Build a catalog from arbitrary options; sorts by (min heat capacity,
    /// diameter) so that query results are deterministic.
    pub fn new(mut options: Vec<TreaterOption>) -> Self {
        options.sort_by(|a, b| {
            a.min_heat_capacity_btu_hr
                .total_cmp(&b.min_heat_capacity_btu_hr)
                .then(a.diameter_ft.total_cmp(&b.diameter_ft))
        });
        InMemoryCatalog { options }
    }

    /// The built-in API-12L standard tables (vertical and horizontal).
    pub fn standard() -> &'static InMemoryCatalog {
        &STANDARD_CATALOG
    }

    /// All options in catalog order.
    pub fn options(&self) -> &[TreaterOption] {
        &self.options
    }
}

impl TreaterCatalog for InMemoryCatalog {
    fn find_candidates(&self, min_heat_capacity_btu_hr: f64) -> Vec<TreaterOption> {
        self.options
            .iter()
            .filter(|o| o.min_heat_capacity_btu_hr >= min_heat_capacity_btu_hr)
            .cloned()
            .collect()
    }
}

fn option(
    treater_type: TreaterType,
    diameter_ft: f64,
    length_ft: f64,
    design_pressure_psig: f64,
    min_heat_capacity_btu_hr: f64,
    notes: &str,
) -> TreaterOption {
    TreaterOption {
        treater_type,
        diameter_ft,
        length_ft,
        design_pressure_psig,
        min_heat_capacity_btu_hr,
        notes: Some(notes.to_string()),
    }
}

/// Standard treater tables per API-12L.
static STANDARD_CATALOG: Lazy<InMemoryCatalog> = Lazy::new(|| {
    use TreaterType::{Horizontal, Vertical};

    InMemoryCatalog::new(vec![
        // Table 1: vertical treaters
        option(Vertical, 3.0, 10.0, 50.0, 100_000.0, "LSS 10"),
        option(Vertical, 3.0, 12.0, 50.0, 100_000.0, "LSS 12"),
        option(Vertical, 3.0, 15.0, 50.0, 100_000.0, "LSS 15"),
        option(Vertical, 4.0, 10.0, 50.0, 250_000.0, "LSS 10"),
        option(Vertical, 4.0, 12.0, 50.0, 250_000.0, "LSS 12"),
        option(Vertical, 4.0, 20.0, 50.0, 250_000.0, "LSS 20"),
        option(Vertical, 6.0, 12.0, 50.0, 500_000.0, "LSS 12"),
        option(Vertical, 6.0, 20.0, 50.0, 500_000.0, "LSS 20"),
        option(Vertical, 8.0, 20.0, 40.0, 1_000_000.0, "LSS 20"),
        option(Vertical, 10.0, 20.0, 40.0, 1_250_000.0, "LSS 20"),
        // Table 2: horizontal treaters
        option(Horizontal, 3.0, 10.0, 50.0, 150_000.0, "LSS 10"),
        option(Horizontal, 3.0, 12.0, 50.0, 150_000.0, "LSS 12"),
        option(Horizontal, 3.0, 15.0, 50.0, 150_000.0, "LSS 15"),
        option(Horizontal, 4.0, 10.0, 50.0, 250_000.0, "LSS 10"),
        option(Horizontal, 4.0, 12.0, 50.0, 250_000.0, "LSS 12"),
        option(Horizontal, 6.0, 10.0, 50.0, 500_000.0, "LSS 10"),
        option(Horizontal, 6.0, 15.0, 50.0, 500_000.0, "LSS 15"),
        option(Horizontal, 6.0, 20.0, 50.0, 500_000.0, "LSS 20"),
        option(Horizontal, 8.0, 15.0, 50.0, 750_000.0, "LSS 15"),
        option(Horizontal, 8.0, 20.0, 50.0, 750_000.0, "LSS 20"),
        option(Horizontal, 10.0, 20.0, 50.0, 2_000_000.0, "LSS 20"),
        option(Horizontal, 12.0, 30.0, 50.0, 3_200_000.0, "LSS 30"),
    ])
});

/// A winning catalog candidate with its computed heat figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreaterSelection {
    /// The selected catalog option
    pub option: TreaterOption,

    /// Envelope heat loss for this candidate (BTU/hr)
    pub heat_loss_btu_hr: f64,

    /// Required heat plus envelope loss (BTU/hr)
    pub total_heat_btu_hr: f64,
}

/// Candidates whose internal volume can hold the required retention volume.
///
/// Preserves the input (catalog) ordering.
pub fn feasible_candidates(
    candidates: &[TreaterOption],
    required_volume_bbl: f64,
) -> Vec<TreaterOption> {
    candidates
        .iter()
        .filter(|o| o.internal_volume_bbl() >= required_volume_bbl)
        .cloned()
        .collect()
}

/// Select the candidate minimizing total heat (required + envelope loss).
///
/// `candidates` must already be in catalog order (ascending min heat
/// capacity, then diameter); the strict `<` comparison keeps the first of any
/// candidates with equal total heat, which makes the tie-break stable and the
/// selection deterministic. Envelope loss depends on the candidate's own
/// diameter and length, so it is supplied as a per-candidate function.
///
/// Returns `None` when no candidate is feasible; callers decide how to
/// report that.
pub fn select_best<F>(
    candidates: &[TreaterOption],
    heat_required_btu_hr: f64,
    required_volume_bbl: f64,
    heat_loss_btu_hr: F,
) -> Option<TreaterSelection>
where
    F: Fn(&TreaterOption) -> f64,
{
    let mut best: Option<TreaterSelection> = None;

    for option in feasible_candidates(candidates, required_volume_bbl) {
        let heat_loss = heat_loss_btu_hr(&option);
        let total_heat = heat_required_btu_hr + heat_loss;

        let improves = match &best {
            Some(current) => total_heat < current.total_heat_btu_hr,
            None => true,
        };
        if improves {
            best = Some(TreaterSelection {
                option,
                heat_loss_btu_hr: heat_loss,
                total_heat_btu_hr: total_heat,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_ordering() {
        let options = InMemoryCatalog::standard().options();
        assert_eq!(options.len(), 22);

        for pair in options.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.min_heat_capacity_btu_hr < b.min_heat_capacity_btu_hr
                    || (a.min_heat_capacity_btu_hr == b.min_heat_capacity_btu_hr
                        && a.diameter_ft <= b.diameter_ft),
                "catalog must be ordered by (min heat capacity, diameter)"
            );
        }
    }

    #[test]
    fn test_find_candidates_filters_by_heat() {
        let candidates = InMemoryCatalog::standard().find_candidates(600_000.0);
        assert!(!candidates.is_empty());
        assert!(candidates
            .iter()
            .all(|o| o.min_heat_capacity_btu_hr >= 600_000.0));
    }

    #[test]
    fn test_internal_volume() {
        // 4 ft x 15 ft: π * 4 * 15 * 0.1781
        let option = option(TreaterType::Horizontal, 4.0, 15.0, 50.0, 250_000.0, "LSS 15");
        let expected = PI * 4.0 * 15.0 * 0.1781;
        assert!((option.internal_volume_bbl() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_select_best_minimizes_total_heat() {
        let candidates = InMemoryCatalog::standard().find_candidates(250_000.0);
        // Flat per-area loss: smaller envelopes win
        let selection =
            select_best(&candidates, 250_000.0, 5.0, |o| 10.0 * o.diameter_ft * o.length_ft)
                .unwrap();

        let minimum = candidates
            .iter()
            .filter(|o| o.internal_volume_bbl() >= 5.0)
            .map(|o| 250_000.0 + 10.0 * o.diameter_ft * o.length_ft)
            .fold(f64::INFINITY, f64::min);
        assert!((selection.total_heat_btu_hr - minimum).abs() < 1e-9);
    }

    #[test]
    fn test_select_best_is_deterministic() {
        let candidates = InMemoryCatalog::standard().find_candidates(100_000.0);
        let pick = |_: &TreaterOption| 0.0;

        let first = select_best(&candidates, 100_000.0, 1.0, pick).unwrap();
        let second = select_best(&candidates, 100_000.0, 1.0, pick).unwrap();
        assert_eq!(first, second);

        // With identical total heat everywhere, the stable tie-break keeps
        // the lowest (min heat capacity, diameter) candidate
        assert_eq!(first.option.min_heat_capacity_btu_hr, 100_000.0);
        assert_eq!(first.option.diameter_ft, 3.0);
    }

    #[test]
    fn test_select_best_no_feasible_candidate() {
        let candidates = InMemoryCatalog::standard().find_candidates(100_000.0);
        // Require more volume than any shell can hold
        assert!(select_best(&candidates, 100_000.0, 1e9, |_| 0.0).is_none());
    }

    #[test]
    fn test_option_serialization() {
        let option = option(TreaterType::Vertical, 3.0, 10.0, 50.0, 100_000.0, "LSS 10");
        let json = serde_json::to_string(&option).unwrap();
        assert!(json.contains("\"vertical\""));
        let roundtrip: TreaterOption = serde_json::from_str(&json).unwrap();
        assert_eq!(option, roundtrip);
    }
}
