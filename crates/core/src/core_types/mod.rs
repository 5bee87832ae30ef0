//! Core types and utilities

pub mod color;
pub mod units;
pub mod vec3;

pub use color::Rgb;
pub use units::*;
pub use vec3::Vec3;
