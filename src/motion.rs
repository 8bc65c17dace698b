//! Resumable arc motions used for anchoring onto a path and for hand-offs.

use std::f32::consts::PI;

use glam::Vec3;

use crate::motor::Motor;
use crate::{ANCHOR_DURATION, ANCHOR_PEAK_HEIGHT};

/// Straight-line interpolation lifted by a half-sine bump.
///
/// Advanced one tick at a time with [`ArcMotion::step`]; dropping it mid-way
/// simply leaves the character at the last written position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcMotion {
    from: Vec3,
    to: Vec3,
    duration: f32,
    peak_height: f32,
    elapsed: f32,
}

impl ArcMotion {
    /// Arc from `from` to `to` taking `duration` seconds.
    #[must_use]
    pub const fn new(from: Vec3, to: Vec3, duration: f32, peak_height: f32) -> Self {
        Self {
            from,
            to,
            duration,
            peak_height,
            elapsed: 0.0,
        }
    }

    /// Arc used when first anchoring onto a path.
    #[must_use]
    pub const fn anchor(from: Vec3, to: Vec3) -> Self {
        Self::new(from, to, ANCHOR_DURATION, ANCHOR_PEAK_HEIGHT)
    }

    /// Where the arc lands.
    #[must_use]
    pub const fn target(&self) -> Vec3 {
        self.to
    }

    /// Fraction of the motion completed, in `[0, 1]`.
    #[must_use]
    pub const fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Position at fraction `t` of the motion.
    #[must_use]
    pub fn sample(&self, t: f32) -> Vec3 {
        let fraction = t.clamp(0.0, 1.0);
        let mut position = self.from.lerp(self.to, fraction);
        position.y += (fraction * PI).sin() * self.peak_height;
        position
    }

    /// Advance by `dt` and write the new position; true once the target is
    /// reached.
    pub fn step(&mut self, motor: &mut dyn Motor, dt: f32) -> bool {
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.duration {
            motor.set_position(self.to);
            return true;
        }
        motor.set_position(self.sample(self.progress()));
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motor::KinematicMotor;
    use approx::assert_relative_eq;

    #[test]
    fn arc_peaks_halfway() {
        let motion = ArcMotion::new(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), 1.0, 2.0);
        let middle = motion.sample(0.5);
        assert_relative_eq!(middle.x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(middle.y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(motion.sample(1.0).y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn anchor_completes_after_duration() {
        let mut motor = KinematicMotor::new(Vec3::ZERO, 0.4);
        let target = Vec3::new(0.0, 3.0, 2.0);
        let mut motion = ArcMotion::anchor(Vec3::ZERO, target);
        let mut ticks = 0;
        while !motion.step(&mut motor, 0.1) {
            ticks += 1;
            assert!(ticks < 100);
        }
        // 0.75 s at 0.1 s per tick: seven partial steps, then the eighth lands.
        assert_eq!(ticks, 7);
        assert_eq!(motor.position(), target);
    }

    #[test]
    fn zero_duration_lands_immediately() {
        let mut motor = KinematicMotor::new(Vec3::ZERO, 0.4);
        let mut motion = ArcMotion::new(Vec3::ZERO, Vec3::X, 0.0, 1.0);
        assert!(motion.step(&mut motor, 0.0));
        assert_eq!(motor.position(), Vec3::X);
    }
}
