//! Numeric helpers for traversal parameters.
//!
//! Progress along a curve is kept on a fixed precision grid so that boundary
//! comparisons (`eval == 0.0`, `eval == 1.0`) stay exact from tick to tick.
//! Angles are wrapped into `[0, 360)`.

use crate::EVAL_PRECISION;

/// Clamp `value` into `[0, 1]` and snap it onto the [`EVAL_PRECISION`] grid.
///
/// Values closer than one precision step to either end snap exactly onto
/// that end.
///
/// # Examples
/// ```
/// use railwalk::numeric::precise_eval_clamp01;
/// assert_eq!(precise_eval_clamp01(0.0007), 0.0);
/// assert_eq!(precise_eval_clamp01(0.9996), 1.0);
/// assert_eq!(precise_eval_clamp01(1.7), 1.0);
/// ```
#[must_use]
pub fn precise_eval_clamp01(value: f32) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    if value.abs() < EVAL_PRECISION {
        return 0.0;
    }
    if (value - 1.0).abs() < EVAL_PRECISION {
        return 1.0;
    }
    let snapped = (value / EVAL_PRECISION).round() * EVAL_PRECISION;
    snapped.clamp(0.0, 1.0)
}

/// Wrap a parameter into `[0, 1)`.
#[must_use]
pub fn wrap01(value: f32) -> f32 {
    let wrapped = value.rem_euclid(1.0);
    // rem_euclid can round up to the modulus for tiny negative inputs.
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wrap and snap a closed-curve parameter; the result is in `[0, 1)`.
///
/// # Examples
/// ```
/// use railwalk::numeric::precise_eval_wrap01;
/// assert!((precise_eval_wrap01(0.99 + 0.02) - 0.01).abs() < 1e-6);
/// assert_eq!(precise_eval_wrap01(0.9996), 0.0);
/// ```
#[must_use]
pub fn precise_eval_wrap01(value: f32) -> f32 {
    let snapped = precise_eval_clamp01(wrap01(value));
    if snapped >= 1.0 {
        0.0
    } else {
        snapped
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
///
/// # Examples
/// ```
/// use railwalk::numeric::wrap_degrees;
/// assert!((wrap_degrees(350.0 + 20.0) - 10.0).abs() < 1e-4);
/// assert!((wrap_degrees(-90.0) - 270.0).abs() < 1e-4);
/// ```
#[must_use]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Convert a sample index into a parameter fraction `index / count`.
#[expect(
    clippy::cast_precision_loss,
    reason = "Sample counts stay far below the f32 mantissa limit."
)]
#[must_use]
pub const fn index_fraction(index: usize, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    index as f32 / count as f32
}

/// Convert a count into `f32` for scaling parameters.
#[expect(
    clippy::cast_precision_loss,
    reason = "Segment counts stay far below the f32 mantissa limit."
)]
#[must_use]
pub const fn count_as_f32(count: usize) -> f32 {
    count as f32
}

/// Floor a non-negative scaled parameter into a segment index.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The value is clamped to the non-negative segment range first."
)]
#[must_use]
pub fn floor_to_index(value: f32, max_index: usize) -> usize {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let floored = value.floor() as usize;
    floored.min(max_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::near_zero(0.0007, 0.0)]
    #[case::near_one(0.9996, 1.0)]
    #[case::negative(-0.25, 0.0)]
    #[case::above_one(1.5, 1.0)]
    #[case::exact_zero(0.0, 0.0)]
    #[case::exact_one(1.0, 1.0)]
    #[case::nan(f32::NAN, 0.0)]
    fn clamp_snaps_boundaries(#[case] input: f32, #[case] expected: f32) {
        assert_eq!(precise_eval_clamp01(input), expected);
    }

    #[rstest]
    #[case(0.1234, 0.123)]
    #[case(0.5006, 0.501)]
    #[case(0.75, 0.75)]
    fn clamp_rounds_to_precision(#[case] input: f32, #[case] expected: f32) {
        assert_relative_eq!(precise_eval_clamp01(input), expected, epsilon = 1e-6);
    }

    #[test]
    fn clamp_stays_in_unit_range() {
        for step in -200..=200 {
            let value = step as f32 * 0.0137;
            let clamped = precise_eval_clamp01(value);
            assert!((0.0..=1.0).contains(&clamped), "{value} -> {clamped}");
        }
    }

    #[rstest]
    #[case(1.01, 0.01)]
    #[case(-0.25, 0.75)]
    #[case(2.5, 0.5)]
    fn wrap_keeps_fraction(#[case] input: f32, #[case] expected: f32) {
        assert_relative_eq!(precise_eval_wrap01(input), expected, epsilon = 1e-5);
    }

    #[test]
    fn wrap_never_returns_one() {
        assert!(precise_eval_wrap01(0.99995) < 1.0);
        assert!(wrap01(-1e-9) < 1.0);
    }

    #[rstest]
    #[case(370.0, 10.0)]
    #[case(360.0, 0.0)]
    #[case(-10.0, 350.0)]
    #[case(725.0, 5.0)]
    fn degrees_wrap(#[case] input: f32, #[case] expected: f32) {
        assert_relative_eq!(wrap_degrees(input), expected, epsilon = 1e-4);
    }

    #[rstest]
    #[case(2.7, 5, 2)]
    #[case(-1.0, 5, 0)]
    #[case(9.0, 3, 3)]
    fn floor_index_clamps(#[case] value: f32, #[case] max: usize, #[case] expected: usize) {
        assert_eq!(floor_to_index(value, max), expected);
    }
}
