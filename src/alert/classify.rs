/// Flow-rate status classification.
///
/// A buoy's status is a pure function of its latest flow rate and sediment
/// flag: no memory of previous readings, no randomness, and no dependency
/// on any other buoy. Re-running classification on an unchanged reading
/// always yields the same status.

use crate::model::Status;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Flow rate at which a buoy leaves the normal tier, in m/s. The boundary
/// value itself classifies as warning (closed-open intervals).
pub const WARNING_FLOW_MPS: f64 = 2.0;

/// Flow rate at which a buoy enters the flood tier, in m/s. The boundary
/// value itself classifies as flood.
pub const FLOOD_FLOW_MPS: f64 = 3.5;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Derives a buoy status from a flow rate and the sediment flag.
///
/// Tier boundaries:
///   flow < 2.0         → normal
///   2.0 <= flow < 3.5  → warning
///   flow >= 3.5        → flood
///
/// Total over all f64 values. NaN fails both upper-bound comparisons and
/// falls through to the flood tier, the fail-safe direction for a reading
/// that cannot be interpreted. Negative and -inf flow classify normal; +inf
/// classifies flood.
pub fn classify(flow_rate_mps: f64, sediment_present: bool) -> Status {
    let base = if flow_rate_mps < WARNING_FLOW_MPS {
        Status::Normal
    } else if flow_rate_mps < FLOOD_FLOW_MPS {
        Status::Warning
    } else {
        Status::Flood
    };

    if sediment_present { base.with_sediment() } else { base }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- Tier boundaries ----------------------------------------------------

    #[test]
    fn test_low_flow_is_normal() {
        assert_eq!(classify(0.0, false), Status::Normal);
        assert_eq!(classify(1.5, false), Status::Normal);
        assert_eq!(classify(1.999999, false), Status::Normal);
    }

    #[test]
    fn test_warning_boundary_is_exactly_2_0() {
        // 2.0 belongs to the warning tier, not normal.
        assert_eq!(classify(2.0, false), Status::Warning);
    }

    #[test]
    fn test_mid_range_flow_is_warning() {
        assert_eq!(classify(2.5, false), Status::Warning);
        assert_eq!(classify(3.499999, false), Status::Warning);
    }

    #[test]
    fn test_flood_boundary_is_exactly_3_5() {
        // 3.5 belongs to the flood tier, not warning.
        assert_eq!(classify(3.5, false), Status::Flood);
    }

    #[test]
    fn test_high_flow_is_flood() {
        assert_eq!(classify(4.0, false), Status::Flood);
        assert_eq!(classify(100.0, false), Status::Flood);
    }

    // --- Sediment composition -----------------------------------------------

    #[test]
    fn test_sediment_appends_modifier_without_changing_tier() {
        for flow in [0.0, 1.0, 1.999999, 2.0, 2.5, 3.499999, 3.5, 4.0, 10.0] {
            let dry = classify(flow, false);
            let wet = classify(flow, true);
            assert_eq!(
                wet,
                dry.with_sediment(),
                "at flow {} sediment should only add the modifier",
                flow,
            );
            assert_eq!(wet.base_tier(), dry.base_tier());
        }
    }

    #[test]
    fn test_warning_boundary_with_sediment() {
        // Boundary value and modifier compose.
        assert_eq!(classify(2.0, true), Status::WarningWithSediment);
    }

    // --- Degenerate inputs --------------------------------------------------

    #[test]
    fn test_nan_flow_classifies_as_flood() {
        // NaN satisfies neither threshold comparison and falls through to
        // the flood tier (fail-safe).
        assert_eq!(classify(f64::NAN, false), Status::Flood);
        assert_eq!(classify(f64::NAN, true), Status::FloodWithSediment);
    }

    #[test]
    fn test_negative_and_infinite_flow_are_total() {
        assert_eq!(classify(-1.0, false), Status::Normal);
        assert_eq!(classify(f64::NEG_INFINITY, false), Status::Normal);
        assert_eq!(classify(f64::INFINITY, false), Status::Flood);
    }

    #[test]
    fn test_classification_is_deterministic() {
        // Same reading in, same status out, however many times it runs.
        for _ in 0..3 {
            assert_eq!(classify(2.7, true), Status::WarningWithSediment);
        }
    }
}
