//! Sampled queries over a curve: arc length and nearest point.

use glam::Vec3;
use ordered_float::OrderedFloat;

use super::Curve;
use crate::numeric::index_fraction;
use crate::{NEAREST_POINT_REFINE_ITERATIONS, NEAREST_POINT_SAMPLES_PER_SEGMENT};

impl Curve {
    /// Approximate arc length by summing `samples` uniform linear segments.
    ///
    /// `map` carries each sampled position into the space the length is
    /// measured in (identity for local space).
    #[must_use]
    pub fn arc_length_with(&self, samples: usize, map: impl Fn(Vec3) -> Vec3) -> f32 {
        let count = samples.max(1);
        let mut previous = map(self.evaluate_position(0.0));
        let mut length = 0.0;
        for i in 1..=count {
            let current = map(self.evaluate_position(index_fraction(i, count)));
            length += previous.distance(current);
            previous = current;
        }
        length
    }

    /// Local-space arc length over `samples` uniform subdivisions.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use railwalk::curve::Curve;
    /// let curve = Curve::from_points([Vec3::ZERO, Vec3::new(0.0, 0.0, 8.0)], false).unwrap();
    /// assert!((curve.arc_length(100) - 8.0).abs() < 1e-3);
    /// ```
    #[must_use]
    pub fn arc_length(&self, samples: usize) -> f32 {
        self.arc_length_with(samples, |p| p)
    }

    /// Closest point on the curve to `point`, with its parameter.
    ///
    /// A uniform coarse pass picks the best sample, then a ternary search
    /// refines within the neighbouring sample interval.
    #[must_use]
    pub fn nearest_point(&self, point: Vec3) -> (Vec3, f32) {
        let samples = (self.segment_count() * NEAREST_POINT_SAMPLES_PER_SEGMENT).max(2);
        let best = (0..=samples)
            .map(|i| index_fraction(i, samples))
            .min_by_key(|&t| OrderedFloat(self.evaluate_position(t).distance_squared(point)))
            .unwrap_or(0.0);

        let step = index_fraction(1, samples);
        let (mut low, mut high) = if self.is_closed() {
            (best - step, best + step)
        } else {
            ((best - step).max(0.0), (best + step).min(1.0))
        };
        let distance = |t: f32| self.evaluate_position(t).distance_squared(point);
        for _ in 0..NEAREST_POINT_REFINE_ITERATIONS {
            let third = (high - low) / 3.0;
            let left = low + third;
            let right = high - third;
            if distance(left) <= distance(right) {
                high = right;
            } else {
                low = left;
            }
        }
        let mut refined = 0.5 * (low + high);
        if distance(best) < distance(refined) {
            refined = best;
        }
        let t = if self.is_closed() {
            crate::numeric::wrap01(refined)
        } else {
            refined.clamp(0.0, 1.0)
        };
        (self.evaluate_position(t), t)
    }
}
