//! Curve geometry: position, tangent, up and right fields of a uniform
//! Catmull-Rom spline through authored knots.
//!
//! Open curves clamp the parameter to `[0, 1]` and extrapolate a phantom knot
//! past each end by mirroring its neighbour. Closed curves wrap the parameter
//! modulo one and connect the last knot back to the first.

mod sampling;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::TraversalError;
use crate::numeric::{count_as_f32, floor_to_index, wrap01};
use crate::{SAMPLE_DELTA, TANGENT_EPSILON};

const fn default_up() -> Vec3 {
    Vec3::Y
}

/// Control point of a curve with the up hint used for its normal field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Knot {
    /// Local position the curve passes through.
    pub position: Vec3,
    /// Up hint blended along the adjacent segments.
    #[serde(default = "default_up")]
    pub up: Vec3,
}

impl Knot {
    /// Knot at `position` with a world-up hint.
    #[must_use]
    pub const fn new(position: Vec3) -> Self {
        Self {
            position,
            up: Vec3::Y,
        }
    }

    /// Replace the up hint.
    #[must_use]
    pub const fn with_up(mut self, up: Vec3) -> Self {
        self.up = up;
        self
    }
}

impl From<Vec3> for Knot {
    fn from(position: Vec3) -> Self {
        Self::new(position)
    }
}

/// Immutable parametric curve in its path's local space.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    knots: Vec<Knot>,
    closed: bool,
}

impl Curve {
    /// Build a curve from at least two finite knots.
    ///
    /// # Errors
    /// [`TraversalError::TooFewKnots`] for fewer than two knots and
    /// [`TraversalError::NonFiniteKnot`] for NaN or infinite positions.
    pub fn new(knots: Vec<Knot>, closed: bool) -> Result<Self, TraversalError> {
        if knots.len() < 2 {
            return Err(TraversalError::TooFewKnots { found: knots.len() });
        }
        if let Some(index) = knots.iter().position(|k| !k.position.is_finite()) {
            return Err(TraversalError::NonFiniteKnot { index });
        }
        Ok(Self { knots, closed })
    }

    /// Convenience constructor taking bare positions.
    ///
    /// # Errors
    /// Same as [`Curve::new`].
    pub fn from_points(
        points: impl IntoIterator<Item = Vec3>,
        closed: bool,
    ) -> Result<Self, TraversalError> {
        Self::new(points.into_iter().map(Knot::from).collect(), closed)
    }

    /// Whether the last knot connects back to the first.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Authored knots in order.
    #[must_use]
    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    /// Number of spline segments: one per knot pair, plus the closing segment.
    #[must_use]
    pub const fn segment_count(&self) -> usize {
        if self.closed {
            self.knots.len()
        } else {
            self.knots.len() - 1
        }
    }

    fn normalise_param(&self, t: f32) -> f32 {
        if self.closed {
            wrap01(t)
        } else {
            t.clamp(0.0, 1.0)
        }
    }

    /// Segment index and local parameter `u ∈ [0, 1]` for curve parameter `t`.
    fn locate(&self, t: f32) -> (usize, f32) {
        let segments = self.segment_count();
        let scaled = self.normalise_param(t) * count_as_f32(segments);
        let index = floor_to_index(scaled, segments - 1);
        let local = (scaled - count_as_f32(index)).clamp(0.0, 1.0);
        (index, local)
    }

    fn knot(&self, index: usize) -> Knot {
        let last = self.knots.len() - 1;
        self.knots
            .get(index.min(last))
            .copied()
            .unwrap_or(Knot::new(Vec3::ZERO))
    }

    /// The four control positions of `segment`, extrapolating past open ends.
    fn segment_controls(&self, segment: usize) -> [Vec3; 4] {
        let count = self.knots.len();
        if self.closed {
            return [
                self.knot((segment + count - 1) % count).position,
                self.knot(segment % count).position,
                self.knot((segment + 1) % count).position,
                self.knot((segment + 2) % count).position,
            ];
        }
        let p1 = self.knot(segment).position;
        let p2 = self.knot(segment + 1).position;
        let p0 = if segment == 0 {
            p1 * 2.0 - p2
        } else {
            self.knot(segment - 1).position
        };
        let p3 = if segment + 2 >= count {
            p2 * 2.0 - p1
        } else {
            self.knot(segment + 2).position
        };
        [p0, p1, p2, p3]
    }

    /// Position at parameter `t`.
    #[must_use]
    pub fn evaluate_position(&self, t: f32) -> Vec3 {
        let (segment, u) = self.locate(t);
        let [p0, p1, p2, p3] = self.segment_controls(segment);
        let u2 = u * u;
        let u3 = u2 * u;
        0.5 * ((2.0 * p1)
            + (p2 - p0) * u
            + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u2
            + (3.0 * p1 - p0 - 3.0 * p2 + p3) * u3)
    }

    /// Derivative of the position with respect to `t` (not normalised).
    #[must_use]
    pub fn evaluate_tangent(&self, t: f32) -> Vec3 {
        let (segment, u) = self.locate(t);
        let [p0, p1, p2, p3] = self.segment_controls(segment);
        let per_segment = 0.5
            * ((p2 - p0)
                + 2.0 * (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u
                + 3.0 * (3.0 * p1 - p0 - 3.0 * p2 + p3) * u * u);
        per_segment * count_as_f32(self.segment_count())
    }

    /// Unit direction at `t`, substituting a secant where the tangent vanishes.
    #[must_use]
    pub fn direction(&self, t: f32) -> Vec3 {
        let tangent = self.evaluate_tangent(t);
        if tangent.length() > TANGENT_EPSILON {
            return tangent.normalize();
        }
        let secant = if t < 1.0 {
            self.secant(t, (t + SAMPLE_DELTA).min(1.0))
        } else {
            self.secant(t - SAMPLE_DELTA, t)
        };
        secant.try_normalize().unwrap_or(Vec3::Z)
    }

    /// Vector between the positions at `from` and `to`.
    #[must_use]
    pub fn secant(&self, from: f32, to: f32) -> Vec3 {
        self.evaluate_position(to) - self.evaluate_position(from)
    }

    /// Unit up vector at `t`, orthogonal to the direction.
    ///
    /// Knot up hints are blended across the segment and made perpendicular to
    /// the direction; a degenerate hint falls back to any perpendicular.
    #[must_use]
    pub fn evaluate_up(&self, t: f32) -> Vec3 {
        let (segment, u) = self.locate(t);
        let from = self.knot(segment).up;
        let to = if self.closed && segment + 1 == self.knots.len() {
            self.knot(0).up
        } else {
            self.knot(segment + 1).up
        };
        let hint = from.lerp(to, u);
        let direction = self.direction(t);
        let orthogonal = hint - direction * hint.dot(direction);
        orthogonal
            .try_normalize()
            .unwrap_or_else(|| direction.any_orthonormal_vector())
    }

    /// Unit right vector: `normalize(cross(up, tangent))`.
    #[must_use]
    pub fn evaluate_right(&self, t: f32) -> Vec3 {
        self.evaluate_up(t)
            .cross(self.direction(t))
            .try_normalize()
            .unwrap_or(Vec3::X)
    }
}
