//! The provisioning-backend contract.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bedrock_irsa_derivation::PolicyDocument;
use serde::Serialize;
use thiserror::Error;

use crate::trust::TrustSpec;

/// Everything a backend needs to materialize one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionRequest {
    /// Name of the role to create or update.
    pub role_name: String,
    /// Who may assume the role.
    pub trust: TrustSpec,
    /// The access policy to attach, in final statement order.
    pub policy: PolicyDocument,
    /// Tags to attach to the role.
    pub tags: BTreeMap<String, String>,
}

/// Identifiers of a provisioned role and its attached policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionedRole {
    pub role_identifier: String,
    pub policy_identifier: String,
}

/// Errors surfaced by a provisioning backend.
#[derive(Debug, Error)]
pub enum ProvisioningError {
    /// The backend rejected or failed the request.
    #[error("provisioning backend error: {0}")]
    Backend(String),
}

/// Result alias for provisioning operations.
pub type ProvisioningResult<T> = Result<T, ProvisioningError>;

/// A backend that binds a finished policy document to an assumable role.
///
/// Implementations own the cloud error taxonomy and retry discipline; the
/// caller hands over a complete request and receives both identifiers or a
/// backend error.
#[async_trait]
pub trait RoleProvisioner {
    /// Provision the role and attach the policy.
    async fn provision(&self, request: ProvisionRequest) -> ProvisioningResult<ProvisionedRole>;
}
