//! Core library for bedrock-irsa:
//! - Closed capability and provider sets for the model-inference role
//! - Role-configuration loading and validation
//! - Policy derivation (validated configuration -> ordered statement list)
//! - IAM policy-document model with wire serialization
//!

mod capability;
mod config;
mod derivation;
mod errors;
mod policy;
mod provider;

// Re-exports for a small, focused public API
pub use capability::Capability;
pub use config::{DerivationConfig, RawRoleConfig};
pub use derivation::Deriver;
pub use errors::{ConfigurationError, DerivationResult};
pub use policy::{Condition, Effect, Operator, PolicyDocument, Statement, POLICY_VERSION};
pub use provider::Provider;
