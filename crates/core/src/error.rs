//! Errors raised while ingesting scene data and configuration.
//!
//! Everything downstream of ingestion (projection, arc building, animation)
//! is total and never returns these.

use std::fmt;

/// Errors that can occur while loading or validating scene inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Failed to read a file
    LoadFailed(String),
    /// Failed to parse file or string contents
    ParseFailed(String),
    /// A colour string that is not `#rgb` or `#rrggbb`
    InvalidColor(String),
    /// Scene data that parsed but can't be placed on the globe
    InvalidData(String),
    /// Configuration values outside their usable range
    InvalidConfig(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::LoadFailed(msg) => write!(f, "Failed to load: {msg}"),
            SceneError::ParseFailed(msg) => write!(f, "Failed to parse: {msg}"),
            SceneError::InvalidColor(msg) => write!(f, "Invalid colour: {msg}"),
            SceneError::InvalidData(msg) => write!(f, "Invalid scene data: {msg}"),
            SceneError::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for SceneError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SceneError::InvalidColor("'teal'".to_string());
        assert_eq!(err.to_string(), "Invalid colour: 'teal'");

        let err = SceneError::LoadFailed("missing.json".to_string());
        assert_eq!(err.to_string(), "Failed to load: missing.json");
    }
}
