//! Scene content: input records, the triangle builder, globe and stars
//!
//! Everything here is plain data for a rendering layer to draw. No module in
//! `scene` holds on to rendering-engine objects.

pub mod builder;
pub mod globe;
pub mod model;
pub mod starfield;

pub use builder::{
    Connector, ConnectorKind, LineStyle, Marker, Particle, Shell, TriangleScene,
    TriangleSceneBuilder, FALLBACK_TRIANGLE_COLOR,
};
pub use globe::Globe;
pub use model::{Participant, ParticipantId, SceneData, Triangle};
pub use starfield::Starfield;
