//! Geographic to globe-space projection
//!
//! Maps latitude/longitude onto a sphere centred at the origin with +Y
//! through the north pole. Longitude is offset by 180° and X is mirrored so
//! an equirectangular earth texture wrapped by a standard UV sphere lines up
//! with the projected points.
//!
//! ```text
//! phi   = (90 - lat)  · π/180     (colatitude)
//! theta = (long + 180) · π/180
//! x = -r · sin(phi) · cos(theta)
//! y =  r · cos(phi)
//! z =  r · sin(phi) · sin(theta)
//! ```
//!
//! No range checks are done: out-of-range input still lands on the sphere,
//! just at a geographically meaningless spot.

use crate::core_types::{Degrees, Vec3};
use serde::{Deserialize, Serialize};

/// A position on the earth in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: Degrees,
    pub longitude: Degrees,
}

impl GeoPoint {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Degrees::new(latitude),
            longitude: Degrees::new(longitude),
        }
    }

    /// Project onto a sphere of the given radius.
    #[must_use]
    pub fn to_vector(self, radius: f64) -> Vec3 {
        project(*self.latitude, *self.longitude, radius)
    }

    /// Inverse of [`project`]. The radius is discarded; the origin maps to
    /// (0, 0) rather than NaN.
    #[must_use]
    pub fn from_vector(v: &Vec3) -> Self {
        let radius = v.norm();
        if radius == 0.0 {
            return Self::new(0.0, 0.0);
        }

        let phi = (v.y / radius).clamp(-1.0, 1.0).acos();
        let theta = v.z.atan2(-v.x);

        let latitude = 90.0 - phi.to_degrees();
        let mut longitude = theta.to_degrees() - 180.0;
        if longitude < -180.0 {
            longitude += 360.0;
        }

        Self::new(latitude, longitude)
    }

    /// True when both components are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

/// Convert latitude/longitude (degrees) to a point on a sphere of `radius`.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees, nominally [-90, 90]
/// * `long` - Longitude in degrees, nominally [-180, 180]
/// * `radius` - Sphere radius, nominally > 0
#[must_use]
pub fn project(lat: f64, long: f64, radius: f64) -> Vec3 {
    let phi = (Degrees::new(90.0) - Degrees::new(lat)).to_radians();
    let theta = (Degrees::new(long) + Degrees::new(180.0)).to_radians();

    let (sin_phi, cos_phi) = (phi.sin(), phi.cos());

    Vec3::new(
        -radius * sin_phi * theta.cos(),
        radius * cos_phi,
        radius * sin_phi * theta.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_poles_map_to_y_axis() {
        for long in [-180.0, -90.0, 0.0, 45.0, 180.0] {
            let north = project(90.0, long, 2.0);
            assert_relative_eq!(north, Vec3::new(0.0, 2.0, 0.0), epsilon = 1e-12);

            let south = project(-90.0, long, 2.0);
            assert_relative_eq!(south, Vec3::new(0.0, -2.0, 0.0), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_equator_reference_points() {
        // Greenwich on the equator sits on +X, 90°E on -Z
        assert_relative_eq!(project(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(project(0.0, 90.0, 1.0), Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-12);
        assert_relative_eq!(project(0.0, -90.0, 1.0), Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_antimeridian_continuity() {
        let west = project(0.0, -180.0, 3.5);
        let east = project(0.0, 180.0, 3.5);
        assert_relative_eq!(west, east, epsilon = 1e-9);
    }

    #[test]
    fn test_out_of_range_input_still_on_sphere() {
        let v = project(135.0, 400.0, 2.0);
        assert_relative_eq!(v.norm(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_from_vector_inverts_projection() {
        for (lat, long) in [(48.85, 2.35), (-33.87, 151.21), (40.71, -74.0), (0.0, 179.0)] {
            let geo = GeoPoint::from_vector(&project(lat, long, 2.0));
            assert_relative_eq!(*geo.latitude, lat, epsilon = 1e-9);
            assert_relative_eq!(*geo.longitude, long, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_from_vector_origin() {
        assert_eq!(GeoPoint::from_vector(&Vec3::zeros()), GeoPoint::new(0.0, 0.0));
    }

    #[test]
    fn test_geo_point_from_pair() {
        let p: GeoPoint = [10.0, 20.0].into();
        assert_eq!(p, GeoPoint::new(10.0, 20.0));
        assert!(p.is_finite());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_finite());
    }
}
