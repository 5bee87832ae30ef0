//! Per-frame motion of particles along arcs
//!
//! Each particle carries its own curve, a parameter `t` in [0, 1) and a fixed
//! per-frame speed. One call to [`AnimatedParticle::advance`] is one rendered
//! frame.
//!
//! # Wrap policy
//!
//! When `t` runs past the end of the curve the default [`WrapPolicy::Reset`]
//! snaps it back to exactly 0, dropping any overshoot. The particle therefore
//! pauses at the start for a fraction of a frame once per lap, depending on
//! its speed. [`WrapPolicy::Modulo`] keeps the overshoot instead for a
//! seamless loop.

use crate::core_types::Vec3;
use crate::curve::QuadraticBezier;
use serde::{Deserialize, Serialize};

/// How a particle's parameter is brought back into [0, 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapPolicy {
    /// Hard reset to 0 once the end is reached
    #[default]
    Reset,
    /// Continuous loop, `t mod 1`
    Modulo,
}

impl WrapPolicy {
    /// Bring an advanced parameter back into [0, 1).
    #[inline]
    #[must_use]
    pub fn wrap(self, t: f64) -> f64 {
        if (0.0..1.0).contains(&t) {
            return t;
        }
        match self {
            WrapPolicy::Reset => 0.0,
            WrapPolicy::Modulo => {
                let wrapped = t.rem_euclid(1.0);
                // rem_euclid can round up to exactly 1.0 for tiny negatives
                if wrapped >= 1.0 || wrapped.is_nan() {
                    0.0
                } else {
                    wrapped
                }
            }
        }
    }
}

/// A point travelling along a curve
///
/// `speed` is fixed at creation; only `t` changes, and only through
/// [`advance`](Self::advance).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimatedParticle {
    curve: QuadraticBezier,
    t: f64,
    speed: f64,
    wrap: WrapPolicy,
}

impl AnimatedParticle {
    /// Create a particle at parameter `t` with the default reset wrap policy.
    ///
    /// A starting `t` outside [0, 1) is wrapped first.
    #[must_use]
    #[track_caller]
    pub fn new(curve: QuadraticBezier, t: f64, speed: f64) -> Self {
        Self::with_wrap(curve, t, speed, WrapPolicy::Reset)
    }

    /// Create a particle with an explicit wrap policy.
    ///
    /// # Panics
    /// If `speed` is not a finite positive number.
    #[must_use]
    #[track_caller]
    pub fn with_wrap(curve: QuadraticBezier, t: f64, speed: f64, wrap: WrapPolicy) -> Self {
        assert!(
            speed.is_finite() && speed > 0.0,
            "AnimatedParticle: speed must be finite and positive, got {speed}"
        );
        Self {
            curve,
            t: wrap.wrap(t),
            speed,
            wrap,
        }
    }

    #[inline]
    pub fn curve(&self) -> &QuadraticBezier {
        &self.curve
    }

    #[inline]
    pub fn t(&self) -> f64 {
        self.t
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn wrap_policy(&self) -> WrapPolicy {
        self.wrap
    }

    /// Current position on the curve.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.curve.point_at(self.t)
    }

    /// Advance by one frame and return the new position.
    ///
    /// # Arguments
    ///
    /// * `dt_scale` - Multiplier on `speed`; 1.0 for a nominal frame. Hosts
    ///   running at a different refresh rate can pass `elapsed / nominal`.
    pub fn advance(&mut self, dt_scale: f64) -> Vec3 {
        self.t = self.wrap.wrap(self.t + self.speed * dt_scale);
        self.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn straight_curve() -> QuadraticBezier {
        QuadraticBezier::through(Vec3::zeros(), Vec3::x(), Vec3::x() * 2.0)
    }

    #[test]
    fn test_reset_wrap_sequence() {
        let mut p = AnimatedParticle::new(straight_curve(), 0.9, 0.3);

        p.advance(1.0);
        assert_eq!(p.t(), 0.0);

        p.advance(1.0);
        assert_relative_eq!(p.t(), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_reset_returns_curve_start() {
        let mut p = AnimatedParticle::new(straight_curve(), 0.95, 0.1);
        let pos = p.advance(1.0);
        assert_eq!(pos, Vec3::zeros());
    }

    #[test]
    fn test_modulo_keeps_overshoot() {
        let mut p = AnimatedParticle::with_wrap(straight_curve(), 0.9, 0.3, WrapPolicy::Modulo);
        p.advance(1.0);
        assert_relative_eq!(p.t(), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_exact_end_wraps() {
        let mut p = AnimatedParticle::new(straight_curve(), 0.5, 0.5);
        p.advance(1.0);
        assert_eq!(p.t(), 0.0);
    }

    #[test]
    fn test_dt_scale_multiplies_speed() {
        let mut p = AnimatedParticle::new(straight_curve(), 0.0, 0.01);
        let pos = p.advance(2.5);
        assert_relative_eq!(p.t(), 0.025, epsilon = 1e-12);
        assert_relative_eq!(pos, Vec3::x() * 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_t_stays_in_unit_interval() {
        let mut p = AnimatedParticle::new(straight_curve(), 0.0, 0.0137);
        for _ in 0..10_000 {
            p.advance(1.0);
            assert!((0.0..1.0).contains(&p.t()));
        }
        assert_eq!(p.speed(), 0.0137);
    }

    #[test]
    fn test_initial_t_is_wrapped() {
        assert_eq!(AnimatedParticle::new(straight_curve(), 1.0, 0.1).t(), 0.0);
        let p = AnimatedParticle::with_wrap(straight_curve(), 1.25, 0.1, WrapPolicy::Modulo);
        assert_relative_eq!(p.t(), 0.25, epsilon = 1e-12);
    }

    #[test]
    #[should_panic(expected = "speed must be finite and positive")]
    fn test_zero_speed_rejected() {
        let _ = AnimatedParticle::new(straight_curve(), 0.0, 0.0);
    }
}
