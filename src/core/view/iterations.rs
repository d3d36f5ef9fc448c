/// Floor applied to every derived iteration limit.
pub const MIN_MAX_ITER: u32 = 5;

/// Ceiling applied to every derived iteration limit. Double precision runs out
/// long before the depth term gets near it.
pub const MAX_MAX_ITER: u32 = 20_000;

/// Derives the iteration limit from the zoom depth.
///
/// `max_iter = 2 * floor(25 * log10(1 / scale)^1.25) + iter_offset`, clamped
/// to `MIN_MAX_ITER..=MAX_MAX_ITER`. Zoomed-out views (`log10(1 / scale) <= 0`)
/// get no depth contribution.
#[must_use]
pub fn derive_max_iter(scale: f64, iter_offset: i32) -> u32 {
    let depth = (1.0 / scale).log10();
    let base = if depth.is_finite() && depth > 0.0 {
        2.0 * (25.0 * depth.powf(1.25)).floor()
    } else {
        0.0
    };

    let total = base + f64::from(iter_offset);
    if !total.is_finite() || total < f64::from(MIN_MAX_ITER) {
        return MIN_MAX_ITER;
    }

    total.min(f64::from(MAX_MAX_ITER)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_view_scale_gives_expected_limit() {
        // log10(200)^1.25 = 2.834..., 25 * 2.834 = 70.8
        assert_eq!(derive_max_iter(0.005, 0), 140);
    }

    #[test]
    fn limit_grows_monotonically_with_depth() {
        let mut previous = 0;
        for exponent in 1..14 {
            let limit = derive_max_iter(10f64.powi(-exponent), 0);
            assert!(limit >= previous, "depth 1e-{} regressed", exponent);
            previous = limit;
        }
    }

    #[test]
    fn offset_is_added_after_derivation() {
        assert_eq!(derive_max_iter(0.005, 100), 240);
        assert_eq!(derive_max_iter(0.005, -100), 40);
    }

    #[test]
    fn zoomed_out_views_use_the_floor() {
        assert_eq!(derive_max_iter(1.0, 0), MIN_MAX_ITER);
        assert_eq!(derive_max_iter(50.0, 0), MIN_MAX_ITER);
    }

    #[test]
    fn negative_offset_never_goes_below_floor() {
        assert_eq!(derive_max_iter(0.005, -10_000), MIN_MAX_ITER);
    }

    #[test]
    fn huge_offset_is_capped() {
        assert_eq!(derive_max_iter(0.005, i32::MAX), MAX_MAX_ITER);
        assert_eq!(derive_max_iter(1e-300, 100_000_000), MAX_MAX_ITER);
    }

    #[test]
    fn deepest_double_precision_zoom_stays_below_the_cap() {
        assert!(derive_max_iter(1e-16, 0) < MAX_MAX_ITER / 10);
    }

    #[test]
    fn degenerate_scales_use_the_floor() {
        assert_eq!(derive_max_iter(0.0, 0), MIN_MAX_ITER);
        assert_eq!(derive_max_iter(f64::NAN, 0), MIN_MAX_ITER);
        assert_eq!(derive_max_iter(-1.0, 0), MIN_MAX_ITER);
    }
}
