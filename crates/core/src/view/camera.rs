//! Viewport size and the perspective camera looking at the globe

use crate::config::CameraConfig;
use crate::core_types::{Degrees, Vec3};
use serde::{Deserialize, Serialize};

/// Pixel size of the view's container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; a zero-height container reports 1.0.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        if self.height == 0 {
            1.0
        } else {
            f64::from(self.width) / f64::from(self.height)
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Perspective camera parameters handed to the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub fov: Degrees,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub position: Vec3,
}

impl Camera {
    #[must_use]
    pub fn new(config: &CameraConfig, viewport: Viewport) -> Self {
        Self {
            fov: Degrees::new(config.fov_degrees),
            aspect: viewport.aspect(),
            near: config.near,
            far: config.far,
            position: Vec3::new(0.0, 0.0, config.distance),
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }
}
