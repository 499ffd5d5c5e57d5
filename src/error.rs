//! Error types for construction and configuration failures
//!
//! Runtime data problems never surface here: malformed sliders degrade to
//! diagnostics and undefined complex results become NaN. These variants cover
//! programming and setup mistakes that should stop the caller immediately.

use std::fmt;

/// Errors raised while building engines, toolkits, and registries
#[derive(Debug)]
pub enum SyncError {
    /// Zero-test epsilon was negative or not finite
    InvalidEpsilon(f64),
    /// Configuration value failed validation
    InvalidConfig(String),
    /// Node descriptor id was not a usable identifier
    InvalidNodeId(String),
    /// Reading configuration or input from disk failed
    Io(std::io::Error),
    /// JSON input could not be decoded
    Json(serde_json::Error),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::InvalidEpsilon(value) => {
                write!(f, "complex epsilon must be finite and non-negative, got {}", value)
            }
            SyncError::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
            SyncError::InvalidNodeId(id) => write!(f, "invalid node id: {:?}", id),
            SyncError::Io(err) => write!(f, "io error: {}", err),
            SyncError::Json(err) => write!(f, "json error: {}", err),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::Io(err) => Some(err),
            SyncError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::Io(err)
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Json(err)
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SyncError::InvalidEpsilon(-1.0);
        assert!(err.to_string().contains("-1"));

        let err = SyncError::InvalidNodeId("not-a-uuid".to_string());
        assert_eq!(err.to_string(), "invalid node id: \"not-a-uuid\"");
    }

    #[test]
    fn test_json_error_has_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SyncError = json_err.into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
