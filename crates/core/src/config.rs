//! Scene configuration and detail presets
//!
//! Every number the space view used to hard-code lives here. Defaults
//! reproduce the look of the app's globe view: a globe of radius 2, arcs bulging to 2.2,
//! twenty particles per arc, ten thousand candidate stars.
//!
//! Configurations load from JSON; missing sections and fields fall back to
//! their defaults, so a file only needs to name what it changes:
//!
//! ```
//! use space_view_core::SceneConfig;
//!
//! let config = SceneConfig::from_json_str(r#"{ "particles": { "per_arc": 8 } }"#).unwrap();
//! assert_eq!(config.particles.per_arc, 8);
//! assert_eq!(config.arcs.bulge_radius, 2.2);
//! ```

use crate::animation::WrapPolicy;
use crate::core_types::Rgb;
use crate::error::SceneError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Detail preset trading visual density for per-frame cost
///
/// Medium matches the defaults. Particle count dominates the per-frame
/// cost since every particle is re-evaluated each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailPreset {
    /// 8 particles per arc, coarse curves, 2 500 stars
    Low,
    /// 20 particles per arc, 50-segment curves, 10 000 stars
    #[default]
    Medium,
    /// 32 particles per arc, fine curves, 20 000 stars
    High,
}

impl DetailPreset {
    /// Particles seeded along each solid arc
    #[must_use]
    pub const fn particles_per_arc(&self) -> usize {
        match self {
            Self::Low => 8,
            Self::Medium => 20,
            Self::High => 32,
        }
    }

    /// Polyline segments per arc
    #[must_use]
    pub const fn curve_divisions(&self) -> usize {
        match self {
            Self::Low => 24,
            Self::Medium => 50,
            Self::High => 96,
        }
    }

    /// Width/height segments of the globe and atmosphere spheres
    #[must_use]
    pub const fn sphere_segments(&self) -> u32 {
        match self {
            Self::Low => 32,
            Self::Medium => 64,
            Self::High => 128,
        }
    }

    /// Candidate stars generated before the near-globe cull
    #[must_use]
    pub const fn star_count(&self) -> usize {
        match self {
            Self::Low => 2_500,
            Self::Medium => 10_000,
            Self::High => 20_000,
        }
    }

    /// Parse a preset name as used on the command line.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "default" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Earth sphere and its atmosphere shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub radius: f64,
    pub segments: u32,
    pub atmosphere_radius: f64,
    pub atmosphere_color: Rgb,
    pub atmosphere_opacity: f32,
    /// Rotation about +Y added every frame, radians
    pub spin_per_frame: f64,
    pub color_texture: String,
    pub normal_texture: String,
    pub specular_texture: String,
    pub bump_scale: f32,
    pub specular_color: Rgb,
    pub shininess: f32,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        const TEXTURES: &str =
            "https://raw.githubusercontent.com/mrdoob/three.js/dev/examples/textures/planets";
        Self {
            radius: 2.0,
            segments: 64,
            atmosphere_radius: 2.1,
            atmosphere_color: Rgb::from_u32(0x3388FF),
            atmosphere_opacity: 0.1,
            spin_per_frame: 0.0005,
            color_texture: format!("{TEXTURES}/earth_atmos_2048.jpg"),
            normal_texture: format!("{TEXTURES}/earth_normal_2048.jpg"),
            specular_texture: format!("{TEXTURES}/earth_specular_2048.jpg"),
            bump_scale: 0.05,
            specular_color: Rgb::from_u32(0x333333),
            shininess: 5.0,
        }
    }
}

/// Solid triangle connectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcConfig {
    /// Distance from the globe centre of each arc's midpoint
    pub bulge_radius: f64,
    pub curve_divisions: usize,
    pub opacity: f32,
    pub line_width: f32,
}

impl Default for ArcConfig {
    fn default() -> Self {
        Self {
            bulge_radius: 2.2,
            curve_divisions: DetailPreset::Medium.curve_divisions(),
            opacity: 0.6,
            line_width: 2.0,
        }
    }
}

/// Luminous particles running along solid arcs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub per_arc: usize,
    /// Parameter advance per frame, sampled uniformly in `[speed_min, speed_max)`
    pub speed_min: f64,
    pub speed_max: f64,
    pub opacity_min: f32,
    pub opacity_max: f32,
    pub size: f64,
    pub wrap: WrapPolicy,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            per_arc: DetailPreset::Medium.particles_per_arc(),
            speed_min: 0.003,
            speed_max: 0.013,
            opacity_min: 0.5,
            opacity_max: 1.0,
            size: 0.01,
            wrap: WrapPolicy::Reset,
        }
    }
}

/// Participant markers: a small core sphere inside a fainter glow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub core_radius: f64,
    pub core_opacity: f32,
    pub glow_radius: f64,
    pub glow_opacity: f32,
    pub current_user_color: Rgb,
    pub participant_color: Rgb,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            core_radius: 0.02,
            core_opacity: 0.8,
            glow_radius: 0.03,
            glow_opacity: 0.3,
            current_user_color: Rgb::CURRENT_USER,
            participant_color: Rgb::PARTICIPANT,
        }
    }
}

/// Dashed connector between exactly two waiting participants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendingArcConfig {
    pub color: Rgb,
    pub dash_size: f64,
    pub gap_size: f64,
    pub opacity: f32,
}

impl Default for PendingArcConfig {
    fn default() -> Self {
        Self {
            color: Rgb::PENDING,
            dash_size: 0.1,
            gap_size: 0.1,
            opacity: 0.4,
        }
    }
}

/// Background stars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Edge length of the cube stars are scattered in, centred on the globe
    pub spread: f64,
    /// Candidates closer than this to the centre are dropped
    pub min_distance: f64,
    pub size: f32,
    pub color: Rgb,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: DetailPreset::Medium.star_count(),
            spread: 2000.0,
            min_distance: 10.0,
            size: 0.05,
            color: Rgb::WHITE,
        }
    }
}

/// Perspective camera placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f64,
    pub near: f64,
    pub far: f64,
    /// Camera distance along +Z
    pub distance: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            distance: 5.0,
        }
    }
}

/// Ambient fill plus a directional sun
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_color: Rgb,
    pub sun_color: Rgb,
    pub sun_intensity: f32,
    pub sun_position: [f64; 3],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: Rgb::from_u32(0x333333),
            sun_color: Rgb::WHITE,
            sun_intensity: 1.0,
            sun_position: [5.0, 3.0, 5.0],
        }
    }
}

/// Orbit controls feel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub damping_factor: f32,
    pub rotate_speed: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.05,
            rotate_speed: 0.5,
        }
    }
}

/// Complete configuration of the space view
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub globe: GlobeConfig,
    pub arcs: ArcConfig,
    pub particles: ParticleConfig,
    pub markers: MarkerConfig,
    pub pending: PendingArcConfig,
    pub stars: StarfieldConfig,
    pub camera: CameraConfig,
    pub lights: LightingConfig,
    pub controls: ControlsConfig,
}

impl SceneConfig {
    /// Defaults with the density knobs taken from `preset`.
    #[must_use]
    pub fn with_preset(preset: DetailPreset) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Overwrite the density knobs with those of `preset`.
    pub fn apply_preset(&mut self, preset: DetailPreset) {
        self.particles.per_arc = preset.particles_per_arc();
        self.arcs.curve_divisions = preset.curve_divisions();
        self.globe.segments = preset.sphere_segments();
        self.stars.count = preset.star_count();
    }

    /// Parse a JSON configuration; absent fields take their defaults.
    ///
    /// # Errors
    /// Returns `ParseFailed` for malformed JSON and `InvalidConfig` when the
    /// parsed values fail [`validate`](Self::validate).
    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SceneError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    ///
    /// # Errors
    /// Returns `LoadFailed` if the file can't be read, otherwise as
    /// [`from_json_str`](Self::from_json_str).
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| SceneError::LoadFailed(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&contents)
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    /// Returns `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), SceneError> {
        let result = self.check();
        if let Err(ref e) = result {
            warn!("Rejected scene configuration: {e}");
        }
        result
    }

    fn check(&self) -> Result<(), SceneError> {
        positive("globe.radius", self.globe.radius)?;
        positive("globe.atmosphere_radius", self.globe.atmosphere_radius)?;
        finite("globe.spin_per_frame", self.globe.spin_per_frame)?;
        unit("globe.atmosphere_opacity", self.globe.atmosphere_opacity)?;

        positive("arcs.bulge_radius", self.arcs.bulge_radius)?;
        if self.arcs.curve_divisions == 0 {
            return Err(invalid("arcs.curve_divisions", "must be at least 1"));
        }
        unit("arcs.opacity", self.arcs.opacity)?;

        positive("particles.speed_min", self.particles.speed_min)?;
        positive("particles.speed_max", self.particles.speed_max)?;
        if self.particles.speed_min > self.particles.speed_max {
            return Err(invalid("particles.speed_min", "exceeds particles.speed_max"));
        }
        unit("particles.opacity_min", self.particles.opacity_min)?;
        unit("particles.opacity_max", self.particles.opacity_max)?;
        if self.particles.opacity_min > self.particles.opacity_max {
            return Err(invalid("particles.opacity_min", "exceeds particles.opacity_max"));
        }

        positive("markers.core_radius", self.markers.core_radius)?;
        positive("markers.glow_radius", self.markers.glow_radius)?;
        unit("markers.core_opacity", self.markers.core_opacity)?;
        unit("markers.glow_opacity", self.markers.glow_opacity)?;

        positive("pending.dash_size", self.pending.dash_size)?;
        positive("pending.gap_size", self.pending.gap_size)?;
        unit("pending.opacity", self.pending.opacity)?;

        positive("stars.spread", self.stars.spread)?;
        finite("stars.min_distance", self.stars.min_distance)?;

        positive("camera.fov_degrees", self.camera.fov_degrees)?;
        positive("camera.near", self.camera.near)?;
        if self.camera.far <= self.camera.near {
            return Err(invalid("camera.far", "must be greater than camera.near"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> SceneError {
    SceneError::InvalidConfig(format!("{field}: {message}"))
}

fn positive(field: &str, value: f64) -> Result<(), SceneError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be finite and positive, got {value}")))
    }
}

fn finite(field: &str, value: f64) -> Result<(), SceneError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be finite, got {value}")))
    }
}

fn unit(field: &str, value: f32) -> Result<(), SceneError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be within [0, 1], got {value}")))
    }
}
