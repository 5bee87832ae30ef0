//! Triangle scene assembly
//!
//! Turns participants and triangles into renderable data:
//!
//! 1. **Markers** - one per participant, projected onto the globe
//! 2. **Connectors** - one solid arc per cyclic member pair of each triangle
//! 3. **Particles** - `per_arc` particles per solid arc at `t = i / per_arc`
//! 4. **Pending connector** - one dashed arc, only when exactly two
//!    participants belong to no triangle
//!
//! The builder keeps no state between builds. Rebuilding from the same data
//! with an identically seeded RNG yields an identical scene.

use crate::animation::AnimatedParticle;
use crate::config::SceneConfig;
use crate::core_types::{Fraction, Rgb, Vec3};
use crate::curve::{build_arc, line_distances, QuadraticBezier};
use crate::scene::model::{Participant, ParticipantId, SceneData};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Colour used when a triangle's colour string can't be parsed
pub const FALLBACK_TRIANGLE_COLOR: Rgb = Rgb::PARTICIPANT;

/// Speed given to particles whose configured speed range is unusable
pub const MIN_PARTICLE_SPEED: f64 = 1e-4;

/// A sphere drawn at a marker position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shell {
    pub radius: f64,
    pub opacity: Fraction,
}

/// One participant on the globe: a core sphere wrapped in a glow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub participant_id: ParticipantId,
    pub position: Vec3,
    pub is_current_user: bool,
    pub color: Rgb,
    pub core: Shell,
    pub glow: Shell,
}

/// How a connector line is drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum LineStyle {
    Solid {
        color: Rgb,
        opacity: Fraction,
        line_width: f32,
    },
    Dashed {
        color: Rgb,
        opacity: Fraction,
        dash_size: f64,
        gap_size: f64,
    },
}

impl LineStyle {
    #[must_use]
    pub fn color(&self) -> Rgb {
        match self {
            LineStyle::Solid { color, .. } | LineStyle::Dashed { color, .. } => *color,
        }
    }

    #[must_use]
    pub fn is_dashed(&self) -> bool {
        matches!(self, LineStyle::Dashed { .. })
    }
}

/// Why a connector exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConnectorKind {
    /// Edge of the triangle at this index of [`SceneData::triangles`]
    Triangle { index: usize },
    /// The two waiting participants
    Pending,
}

/// An arc between two participants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub kind: ConnectorKind,
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub curve: QuadraticBezier,
    pub style: LineStyle,
    /// Polyline vertices along the curve
    pub vertices: Vec<Vec3>,
    /// Cumulative length at each vertex; only present for dashed lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_distances: Option<Vec<f64>>,
}

impl Connector {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.kind == ConnectorKind::Pending
    }
}

/// A glowing particle travelling along a solid connector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Index into [`TriangleScene::connectors`]
    pub connector: usize,
    pub motion: AnimatedParticle,
    pub position: Vec3,
    pub color: Rgb,
    pub opacity: Fraction,
    pub size: f64,
}

/// Output of a build: everything the rendering layer draws for triangles
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TriangleScene {
    pub markers: Vec<Marker>,
    pub connectors: Vec<Connector>,
    pub particles: Vec<Particle>,
}

impl TriangleScene {
    /// Advance every particle by one frame.
    pub fn advance_particles(&mut self, dt_scale: f64) {
        for particle in &mut self.particles {
            particle.position = particle.motion.advance(dt_scale);
        }
    }

    /// Solid triangle connectors.
    pub fn triangle_connectors(&self) -> impl Iterator<Item = &Connector> {
        self.connectors.iter().filter(|c| !c.is_pending())
    }

    /// Dashed pending-pairing connectors (zero or one).
    pub fn pending_connectors(&self) -> impl Iterator<Item = &Connector> {
        self.connectors.iter().filter(|c| c.is_pending())
    }

    #[must_use]
    pub fn marker(&self, id: &ParticipantId) -> Option<&Marker> {
        self.markers.iter().find(|m| &m.participant_id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.connectors.is_empty()
    }
}

/// Builds a [`TriangleScene`] from scene data using a configuration
#[derive(Debug, Clone, Copy)]
pub struct TriangleSceneBuilder<'a> {
    config: &'a SceneConfig,
}

impl<'a> TriangleSceneBuilder<'a> {
    #[must_use]
    pub fn new(config: &'a SceneConfig) -> Self {
        Self { config }
    }

    /// Build markers, connectors and particles for `data`.
    ///
    /// `rng` supplies each particle's speed and opacity.
    pub fn build<R: Rng + ?Sized>(&self, data: &SceneData, rng: &mut R) -> TriangleScene {
        let mut scene = TriangleScene {
            markers: data
                .participants
                .iter()
                .map(|p| self.marker(p, data.is_current_user(p)))
                .collect(),
            ..TriangleScene::default()
        };

        for (index, triangle) in data.triangles.iter().enumerate() {
            let color = triangle.color.parse::<Rgb>().unwrap_or_else(|e| {
                warn!(
                    "Triangle {} colour unusable ({}), using {}",
                    index, e, FALLBACK_TRIANGLE_COLOR
                );
                FALLBACK_TRIANGLE_COLOR
            });
            let style = LineStyle::Solid {
                color,
                opacity: Fraction::saturating(self.config.arcs.opacity),
                line_width: self.config.arcs.line_width,
            };

            for (from, to) in triangle.edges() {
                let connector = self.connector(ConnectorKind::Triangle { index }, from, to, style);
                let connector_index = scene.connectors.len();
                self.seed_particles(&mut scene.particles, connector_index, &connector, color, rng);
                scene.connectors.push(connector);
            }
        }

        let waiting = data.waiting_participants();
        if let [first, second] = waiting.as_slice() {
            let pending = &self.config.pending;
            let style = LineStyle::Dashed {
                color: pending.color,
                opacity: Fraction::saturating(pending.opacity),
                dash_size: pending.dash_size,
                gap_size: pending.gap_size,
            };
            scene
                .connectors
                .push(self.connector(ConnectorKind::Pending, first, second, style));
        }

        debug!(
            "Built triangle scene: {} markers, {} connectors ({} waiting participants), {} particles",
            scene.markers.len(),
            scene.connectors.len(),
            waiting.len(),
            scene.particles.len()
        );

        scene
    }

    fn marker(&self, participant: &Participant, is_current_user: bool) -> Marker {
        let markers = &self.config.markers;
        Marker {
            participant_id: participant.id.clone(),
            position: participant.location().to_vector(self.config.globe.radius),
            is_current_user,
            color: if is_current_user {
                markers.current_user_color
            } else {
                markers.participant_color
            },
            core: Shell {
                radius: markers.core_radius,
                opacity: Fraction::saturating(markers.core_opacity),
            },
            glow: Shell {
                radius: markers.glow_radius,
                opacity: Fraction::saturating(markers.glow_opacity),
            },
        }
    }

    fn connector(
        &self,
        kind: ConnectorKind,
        from: &Participant,
        to: &Participant,
        style: LineStyle,
    ) -> Connector {
        let radius = self.config.globe.radius;
        let curve = build_arc(
            from.location().to_vector(radius),
            to.location().to_vector(radius),
            self.config.arcs.bulge_radius,
        );
        let vertices = curve.sample_points(self.config.arcs.curve_divisions);
        let distances = style.is_dashed().then(|| line_distances(&vertices));

        Connector {
            kind,
            from: from.id.clone(),
            to: to.id.clone(),
            curve,
            style,
            vertices,
            line_distances: distances,
        }
    }

    fn seed_particles<R: Rng + ?Sized>(
        &self,
        particles: &mut Vec<Particle>,
        connector_index: usize,
        connector: &Connector,
        color: Rgb,
        rng: &mut R,
    ) {
        let cfg = &self.config.particles;
        let count = cfg.per_arc;
        particles.reserve(count);

        for i in 0..count {
            let t = i as f64 / count as f64;
            let speed = sample_between(rng, cfg.speed_min, cfg.speed_max);
            let speed = if speed.is_finite() && speed > 0.0 {
                speed
            } else {
                MIN_PARTICLE_SPEED
            };
            let opacity = sample_between(
                rng,
                f64::from(cfg.opacity_min),
                f64::from(cfg.opacity_max),
            ) as f32;

            let motion = AnimatedParticle::with_wrap(connector.curve, t, speed, cfg.wrap);
            particles.push(Particle {
                connector: connector_index,
                position: motion.position(),
                motion,
                color,
                opacity: Fraction::saturating(opacity),
                size: cfg.size,
            });
        }
    }
}

/// Uniform sample in `[min, max)`, or `min` when the range is empty or
/// not finite.
fn sample_between<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max > min && (max - min).is_finite() {
        rng.random_range(min..max)
    } else {
        min
    }
}
