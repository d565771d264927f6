//! Error types for role-configuration loading and validation.

use thiserror::Error;

use crate::capability::Capability;
use crate::provider::Provider;

/// Errors raised while turning raw declarative input into a validated
/// [`DerivationConfig`](crate::config::DerivationConfig).
///
/// An unknown capability or provider tag indicates a caller defect, not a
/// transient condition, and is never retried. Derivation itself is total once
/// validation has passed.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A capability tag outside the closed capability set.
    #[error("unknown capability '{value}' (expected one of: {})", Capability::permitted())]
    UnknownCapability { value: String },

    /// A provider tag outside the closed provider set.
    #[error("unknown provider '{value}' (expected one of: {})", Provider::permitted())]
    UnknownProvider { value: String },

    /// The configuration source could not be read.
    #[error("failed to read role configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration source is not valid JSON for the expected shape.
    #[error("failed to parse role configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for configuration and derivation operations.
pub type DerivationResult<T> = Result<T, ConfigurationError>;
