//! Federated-trust parameters for IRSA role assumption.

use serde::{Deserialize, Serialize};

/// Default token audience for web-identity role assumption.
pub const DEFAULT_AUDIENCE: &str = "sts.amazonaws.com";

/// The federated-identity parameters determining which service account may
/// assume the role.
///
/// These are data only. The provisioning backend renders them into its trust
/// document; nothing in this workspace builds that document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustSpec {
    /// ARN of the cluster's OIDC identity provider.
    pub oidc_provider_arn: String,
    /// Namespace of the bound service account.
    pub namespace: String,
    /// Name of the bound service account.
    pub service_account: String,
    /// Expected token audience.
    pub audience: String,
}

impl TrustSpec {
    /// Trust spec for a service account with the standard STS audience.
    pub fn new(
        oidc_provider_arn: impl Into<String>,
        namespace: impl Into<String>,
        service_account: impl Into<String>,
    ) -> Self {
        Self {
            oidc_provider_arn: oidc_provider_arn.into(),
            namespace: namespace.into(),
            service_account: service_account.into(),
            audience: DEFAULT_AUDIENCE.to_string(),
        }
    }

    /// The subject claim the backend should match for this binding.
    pub fn subject(&self) -> String {
        format!(
            "system:serviceaccount:{}:{}",
            self.namespace, self.service_account
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_standard_audience() {
        let trust = TrustSpec::new(
            "arn:aws:iam::123456789012:oidc-provider/oidc.eks.us-east-1.amazonaws.com/id/ABC",
            "ml-serving",
            "inference-sa",
        );
        assert_eq!(trust.audience, "sts.amazonaws.com");
    }

    #[test]
    fn test_subject_claim_format() {
        let trust = TrustSpec::new("arn:aws:iam::123456789012:oidc-provider/x", "ml", "runner");
        assert_eq!(trust.subject(), "system:serviceaccount:ml:runner");
    }
}
