//! # Configuration Error Types
//!
//! Fatal misconfiguration errors. Recoverable malformations never surface here;
//! they are logged and replaced by defaults inside the resolver.

use thiserror::Error;

/// Fatal configuration error
///
/// Returning one of these means no `ResolvedConfig` was produced. The binary
/// entry point terminates the process; embedding callers may choose otherwise.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("Env var {variable} unset. Aborting")]
    MissingRequired { variable: &'static str },

    /// A JSON-encoded variable (or its default) failed to decode into the expected shape
    #[error("Failed to unmarshal {variable} json: {source}")]
    InvalidJson {
        variable: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Name of the environment variable that caused the failure
    pub fn variable(&self) -> &'static str {
        match self {
            ConfigError::MissingRequired { variable } | ConfigError::InvalidJson { variable, .. } => {
                *variable
            }
        }
    }

    /// Short reason string for metrics labels
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigError::MissingRequired { .. } => "missing_required",
            ConfigError::InvalidJson { .. } => "invalid_json",
        }
    }

    /// Remediation hint shown next to the error at startup
    pub fn remediation(&self) -> String {
        match self {
            ConfigError::MissingRequired { variable } => {
                format!("Set {variable} in the controller deployment environment (ConfigMap or env).")
            }
            ConfigError::InvalidJson { variable, .. } => {
                format!("Ensure {variable} holds valid JSON of the expected shape, or unset it to use the default.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_message() {
        let err = ConfigError::MissingRequired { variable: "IMAGES" };
        assert_eq!(err.to_string(), "Env var IMAGES unset. Aborting");
        assert_eq!(err.variable(), "IMAGES");
        assert_eq!(err.as_str(), "missing_required");
    }

    #[test]
    fn test_invalid_json_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ConfigError::InvalidJson {
            variable: "NODE_SELECTOR",
            source,
        };
        assert!(err.to_string().starts_with("Failed to unmarshal NODE_SELECTOR json:"));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.as_str(), "invalid_json");
        assert!(err.remediation().contains("NODE_SELECTOR"));
    }
}
