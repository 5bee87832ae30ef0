//! Space View Core Library
//!
//! Globe geometry and animation state for a 3D "view from space" of
//! participants and the triangles they form. Participants are placed on a
//! sphere from their latitude and longitude, triangle edges become arcs that
//! bulge above the surface, and particles stream along each arc frame by
//! frame.
//!
//! The crate produces plain data (positions, curves, colours, opacities) and
//! leaves drawing to whatever rendering layer hosts it. Frames are driven
//! through the [`TickScheduler`] trait so the whole loop runs under test with
//! a [`ManualScheduler`].
//!
//! ## Layout
//!
//! - [`geo`]: latitude/longitude to sphere coordinates
//! - [`curve`] and [`animation`]: quadratic arcs and particles moving along them
//! - [`scene`]: input records, scene building, globe and starfield
//! - [`view`]: activation lifecycle, frame loop, events and labels

// Core types and utilities
pub mod core_types;
pub mod error;

// Geometry and motion
pub mod animation;
pub mod curve;
pub mod geo;

// Scene assembly and view lifecycle
pub mod config;
pub mod scene;
pub mod view;

// Re-export core types
pub use core_types::{Degrees, Fraction, Radians, Rgb, Vec3};
pub use error::SceneError;

pub use animation::{AnimatedParticle, WrapPolicy};
pub use config::{DetailPreset, SceneConfig};
pub use curve::{build_arc, QuadraticBezier};
pub use geo::{project, GeoPoint};

pub use scene::{
    Connector, ConnectorKind, Globe, LineStyle, Marker, Participant, ParticipantId, Particle,
    SceneData, Starfield, Triangle, TriangleScene, TriangleSceneBuilder,
};
pub use view::{
    AppEvent, EventDispatcher, FrameClock, ManualScheduler, SpaceView, TickHandle, TickScheduler,
    ToggleLabel, ViewHost, ViewMode,
};
