//! Visible/hidden classification with hysteresis.
//!
//! Intersection ratios wobble around the threshold while the user scrolls,
//! so entering and leaving use different cut-offs: an element becomes
//! visible when its ratio exceeds the configured threshold, but once
//! visible it stays visible until the ratio drops to half the threshold or
//! below. The gap between the two cut-offs absorbs the wobble.
//!
//! Without a configured threshold there is nothing to reason about and the
//! raw intersecting flag from the platform is used in both directions.

use crate::types::IntersectionRecord;

/// Decide whether an element counts as visible.
///
/// `was_visible` is the classifier's memory: the outcome of the previous
/// classification for the same element.
pub fn should_be_visible(
    record: &IntersectionRecord,
    threshold: Option<f64>,
    was_visible: bool,
) -> bool {
    match threshold {
        Some(threshold) => {
            if was_visible {
                record.ratio > threshold / 2.0
            } else {
                record.ratio > threshold
            }
        }
        None => record.is_intersecting,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ElementId;

    fn record(ratio: f64) -> IntersectionRecord {
        IntersectionRecord::new(ElementId(1), ratio, ratio > 0.0)
    }

    #[test]
    fn test_hysteresis_triple_at_threshold_point_three() {
        assert!(should_be_visible(&record(0.35), Some(0.3), false));
        assert!(should_be_visible(&record(0.2), Some(0.3), true));
        assert!(!should_be_visible(&record(0.1), Some(0.3), true));
    }

    #[test]
    fn test_entry_requires_strictly_above_threshold() {
        assert!(!should_be_visible(&record(0.3), Some(0.3), false));
        assert!(should_be_visible(&record(0.300001), Some(0.3), false));
    }

    #[test]
    fn test_exit_boundary_is_half_threshold_inclusive() {
        // Exactly half the threshold counts as gone.
        assert!(!should_be_visible(&record(0.15), Some(0.3), true));
        assert!(should_be_visible(&record(0.150001), Some(0.3), true));
    }

    #[test]
    fn test_hidden_element_between_cutoffs_stays_hidden() {
        // 0.2 is above the exit cut-off but below the entry cut-off; only
        // an element that was already visible may sit there.
        assert!(!should_be_visible(&record(0.2), Some(0.3), false));
    }

    #[test]
    fn test_zero_threshold_requires_any_overlap() {
        assert!(!should_be_visible(&record(0.0), Some(0.0), false));
        assert!(should_be_visible(&record(0.01), Some(0.0), false));
    }

    #[test]
    fn test_no_threshold_falls_back_to_raw_flag() {
        let mut measurement = IntersectionRecord::new(ElementId(1), 0.0, true);
        assert!(should_be_visible(&measurement, None, false));
        assert!(should_be_visible(&measurement, None, true));

        measurement.is_intersecting = false;
        measurement.ratio = 0.9;
        // The flag wins even when the ratio looks high.
        assert!(!should_be_visible(&measurement, None, true));
    }
}
