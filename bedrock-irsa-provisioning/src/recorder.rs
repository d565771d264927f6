//! In-memory provisioner for tests and dry runs.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::provisioner::{
    ProvisionRequest, ProvisionedRole, ProvisioningResult, RoleProvisioner,
};

/// A [`RoleProvisioner`] that records every request and fabricates
/// deterministic identifiers instead of calling a cloud backend.
#[derive(Debug, Default)]
pub struct RecordingProvisioner {
    requests: Mutex<Vec<ProvisionRequest>>,
}

impl RecordingProvisioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests seen so far, in arrival order.
    pub fn requests(&self) -> Vec<ProvisionRequest> {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl RoleProvisioner for RecordingProvisioner {
    async fn provision(&self, request: ProvisionRequest) -> ProvisioningResult<ProvisionedRole> {
        let provisioned = ProvisionedRole {
            role_identifier: format!("arn:aws:iam::000000000000:role/{}", request.role_name),
            policy_identifier: format!("{}-access", request.role_name),
        };

        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .push(request);

        Ok(provisioned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trust::TrustSpec;
    use bedrock_irsa_derivation::{Capability, DerivationConfig, Deriver};
    use std::collections::BTreeMap;

    fn sample_request(role_name: &str) -> ProvisionRequest {
        let config = DerivationConfig {
            capabilities: vec![Capability::Invoke],
            ..DerivationConfig::default()
        };

        ProvisionRequest {
            role_name: role_name.to_string(),
            trust: TrustSpec::new(
                "arn:aws:iam::123456789012:oidc-provider/oidc.eks.us-east-1.amazonaws.com/id/ABC",
                "ml-serving",
                "inference-sa",
            ),
            policy: Deriver::new("aws", "*").derive_document(&config),
            tags: BTreeMap::from([("team".to_string(), "ml-platform".to_string())]),
        }
    }

    #[tokio::test]
    async fn test_provision_returns_deterministic_identifiers() {
        let provisioner = RecordingProvisioner::new();

        let provisioned = provisioner
            .provision(sample_request("inference-role"))
            .await
            .unwrap();
        assert_eq!(
            provisioned.role_identifier,
            "arn:aws:iam::000000000000:role/inference-role"
        );
        assert_eq!(provisioned.policy_identifier, "inference-role-access");
    }

    #[tokio::test]
    async fn test_requests_are_recorded_in_order() {
        let provisioner = RecordingProvisioner::new();

        provisioner
            .provision(sample_request("first"))
            .await
            .unwrap();
        provisioner
            .provision(sample_request("second"))
            .await
            .unwrap();

        let requests = provisioner.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].role_name, "first");
        assert_eq!(requests[1].role_name, "second");
        assert_eq!(requests[0].policy.statement.len(), 1);
    }

    #[tokio::test]
    async fn test_request_serializes_with_policy_wire_shape() {
        let request = sample_request("inference-role");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["role_name"], "inference-role");
        assert_eq!(value["trust"]["audience"], "sts.amazonaws.com");
        assert_eq!(value["policy"]["Version"], "2012-10-17");
        assert_eq!(
            value["policy"]["Statement"][0]["Action"][0],
            "bedrock:InvokeModel"
        );
        assert_eq!(value["tags"]["team"], "ml-platform");
    }
}
