//! Float comparisons that behave the same on every run.

use core::cmp::Ordering;

/// Folds `-0.0` into `0.0` and every NaN payload into one NaN.
pub fn canonical_f64(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

/// Total order over canonicalized floats; used to rank overlapping regions by area.
pub fn stable_total_cmp_f64(a: f64, b: f64) -> Ordering {
    canonical_f64(a).total_cmp(&canonical_f64(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_zeros_compare_equal() {
        assert_eq!(stable_total_cmp_f64(-0.0, 0.0), Ordering::Equal);
        assert_eq!(canonical_f64(-0.0).to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn areas_sort_smallest_first() {
        let mut areas = vec![12.5, 0.3, f64::NAN, 4.0];
        areas.sort_by(|a, b| stable_total_cmp_f64(*a, *b));
        assert_eq!(&areas[..3], &[0.3, 4.0, 12.5]);
        assert!(areas[3].is_nan());
    }
}
