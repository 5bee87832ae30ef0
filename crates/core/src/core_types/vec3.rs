//! Vector type alias for 3D positions.

use nalgebra::Vector3;

/// 3D vector type for globe-space positions.
///
/// This is a simple alias for `nalgebra::Vector3<f64>`, used throughout
/// the crate for projected participant positions, curve control points and
/// particle positions. The globe sits at the origin with +Y through the
/// north pole.
pub type Vec3 = Vector3<f64>;
