//! Error types for droid-deps
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for dependency calculation and installation
#[derive(Error, Debug)]
pub enum DepsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A required version could not be determined from build configuration.
    /// Fatal: aborts the whole calculation before any installer invocation.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// License acceptance was not granted but at least one component to
    /// install requires it. Nothing is installed when this is raised.
    #[error("License acceptance required for {0}")]
    LicenseRequired(String),

    /// A single component failed to install. Non-fatal to sibling
    /// installations; aggregated into the install report.
    #[error("Failed to install {component}: {reason}")]
    ComponentInstall { component: String, reason: String },

    /// The external installer is known to be unreliable on the current OS.
    #[error("Installer unsupported on this platform: {0}")]
    UnsupportedPlatform(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cancelled")]
    Cancelled,
}

/// Result type alias for droid-deps operations
pub type Result<T> = std::result::Result<T, DepsError>;

impl DepsError {
    /// True when the caller may gracefully skip rather than fail the build.
    pub fn is_skippable(&self) -> bool {
        matches!(self, DepsError::UnsupportedPlatform(_) | DepsError::Cancelled)
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            DepsError::Io(e) => format!("File operation failed: {}", e),
            DepsError::Configuration(msg) => format!("Configuration error: {}", msg),
            DepsError::LicenseRequired(component) => format!(
                "Cannot install {}: Android SDK licenses have not been accepted",
                component
            ),
            DepsError::ComponentInstall { component, reason } => {
                format!("Installation of {} failed: {}", component, reason)
            }
            DepsError::UnsupportedPlatform(msg) => {
                format!("The SDK component installer is not supported here: {}", msg)
            }
            DepsError::Cancelled => "Installation was cancelled".to_string(),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skippable_errors() {
        assert!(DepsError::UnsupportedPlatform("windows".into()).is_skippable());
        assert!(DepsError::Cancelled.is_skippable());
        assert!(!DepsError::Configuration("missing version".into()).is_skippable());
        assert!(!DepsError::LicenseRequired("platform-tools".into()).is_skippable());
    }

    #[test]
    fn test_license_message_names_component() {
        let err = DepsError::LicenseRequired("build-tools/35.0.0".into());
        assert!(err.user_message().contains("build-tools/35.0.0"));
    }
}
