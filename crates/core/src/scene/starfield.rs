//! Background stars scattered in a cube around the globe

use crate::config::StarfieldConfig;
use crate::core_types::{Rgb, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Point cloud of background stars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Starfield {
    pub positions: Vec<Vec3>,
    pub size: f32,
    pub color: Rgb,
}

impl Starfield {
    /// Scatter `config.count` candidates uniformly in a cube of edge
    /// `config.spread`, keeping only those at least `config.min_distance`
    /// from the centre.
    ///
    /// A negative spread is taken by magnitude; a zero or non-finite one
    /// collapses the cube to the origin.
    pub fn generate<R: Rng + ?Sized>(config: &StarfieldConfig, rng: &mut R) -> Self {
        let half = if config.spread.is_finite() {
            config.spread.abs() * 0.5
        } else {
            0.0
        };
        let mut positions = Vec::with_capacity(config.count);

        for _ in 0..config.count {
            let star = if half > 0.0 {
                Vec3::new(
                    rng.random_range(-half..=half),
                    rng.random_range(-half..=half),
                    rng.random_range(-half..=half),
                )
            } else {
                Vec3::zeros()
            };
            if star.norm() < config.min_distance {
                continue;
            }
            positions.push(star);
        }

        Self {
            positions,
            size: config.size,
            color: config.color,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_stars_inside_cube_and_away_from_globe() {
        let config = StarfieldConfig::default();
        let stars = Starfield::generate(&config, &mut StdRng::seed_from_u64(3));

        assert!(stars.len() <= config.count);
        // The culled sphere is a vanishing fraction of the cube
        assert!(stars.len() > config.count * 99 / 100);
        for s in &stars.positions {
            assert!(s.norm() >= config.min_distance);
            assert!(s.iter().all(|c| c.abs() <= 1000.0));
        }
    }

    #[test]
    fn test_everything_culled_when_cube_is_tiny() {
        let config = StarfieldConfig {
            count: 500,
            spread: 4.0,
            ..StarfieldConfig::default()
        };
        let stars = Starfield::generate(&config, &mut StdRng::seed_from_u64(3));
        assert!(stars.is_empty());
    }

    #[test]
    fn test_negative_or_non_finite_spread() {
        let config = StarfieldConfig {
            count: 200,
            spread: -2000.0,
            ..StarfieldConfig::default()
        };
        let stars = Starfield::generate(&config, &mut StdRng::seed_from_u64(4));
        assert!(!stars.is_empty());
        assert!(stars.positions.iter().all(|s| s.iter().all(|c| c.abs() <= 1000.0)));

        let config = StarfieldConfig {
            count: 200,
            spread: f64::NAN,
            ..StarfieldConfig::default()
        };
        assert!(Starfield::generate(&config, &mut StdRng::seed_from_u64(4)).is_empty());
    }
}
