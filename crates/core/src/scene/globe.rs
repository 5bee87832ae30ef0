//! The earth sphere, its atmosphere shell, and its slow spin

use crate::config::GlobeConfig;
use crate::core_types::{Fraction, Radians, Rgb};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Renderable description of the globe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Globe {
    pub radius: f64,
    pub segments: u32,
    pub atmosphere_radius: f64,
    pub atmosphere_color: Rgb,
    pub atmosphere_opacity: Fraction,
    /// Current rotation about +Y, kept in [0, 2π)
    rotation: Radians,
    spin_per_frame: f64,
}

impl Globe {
    #[must_use]
    pub fn from_config(config: &GlobeConfig) -> Self {
        Self {
            radius: config.radius,
            segments: config.segments,
            atmosphere_radius: config.atmosphere_radius,
            atmosphere_color: config.atmosphere_color,
            atmosphere_opacity: Fraction::saturating(config.atmosphere_opacity),
            rotation: Radians::new(0.0),
            spin_per_frame: config.spin_per_frame,
        }
    }

    #[must_use]
    pub fn rotation(&self) -> Radians {
        self.rotation
    }

    /// Rotate by one frame's worth of spin (scaled by `dt_scale`).
    pub fn spin(&mut self, dt_scale: f64) {
        let next = *self.rotation + self.spin_per_frame * dt_scale;
        self.rotation = Radians::new(next.rem_euclid(TAU));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_spin_accumulates() {
        let mut globe = Globe::from_config(&GlobeConfig::default());
        for _ in 0..1000 {
            globe.spin(1.0);
        }
        assert_relative_eq!(*globe.rotation(), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_rotation_wraps_full_turn() {
        let config = GlobeConfig {
            spin_per_frame: 1.0,
            ..GlobeConfig::default()
        };
        let mut globe = Globe::from_config(&config);
        for _ in 0..7 {
            globe.spin(1.0);
        }
        assert_relative_eq!(*globe.rotation(), 7.0 - TAU, epsilon = 1e-9);
    }
}
