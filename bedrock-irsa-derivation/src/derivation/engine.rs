//! Policy derivation engine implementation
//!
//! This module provides the Deriver that maps a validated role configuration
//! to the ordered list of policy statements granting the configured
//! capabilities. Derivation is pure: given the same configuration and AWS
//! context it always produces the same statement list, and it never fails
//! once validation has passed.

use log::debug;

use crate::capability::Capability;
use crate::config::DerivationConfig;
use crate::policy::{Condition, PolicyDocument, Statement};
use crate::provider::Provider;

/// Formats foundation-model ARN patterns for a partition/region context.
#[derive(Debug, Clone)]
struct ModelArnFormatter<'a> {
    partition: &'a str,
    region: &'a str,
}

impl ModelArnFormatter<'_> {
    fn pattern_for(&self, provider: Provider) -> String {
        format!(
            "arn:{}:bedrock:{}::foundation-model/{}*",
            self.partition,
            self.region,
            provider.model_prefix()
        )
    }
}

/// Policy derivation engine for the model-inference role.
#[derive(Debug, Clone)]
pub struct Deriver<'a> {
    /// ARN pattern formatter for model resource scoping
    arn_formatter: ModelArnFormatter<'a>,
}

impl<'a> Deriver<'a> {
    /// Create a deriver for the given partition and region context.
    ///
    /// Use `"*"` as the region to scope model patterns across all regions;
    /// foundation-model ARNs carry no account component.
    pub fn new(partition: &'a str, region: &'a str) -> Self {
        Self {
            arn_formatter: ModelArnFormatter { partition, region },
        }
    }

    /// Derive the ordered statement list for a validated configuration.
    ///
    /// Statements appear in the canonical capability order
    /// ([`Capability::ALL`]) regardless of the order capabilities were
    /// declared; capabilities that are not enabled contribute no statement.
    /// An empty capability set yields an empty list.
    pub fn derive(&self, config: &DerivationConfig) -> Vec<Statement> {
        let model_patterns = self.resolve_model_patterns(config);
        debug!("resolved model resource patterns: {:?}", model_patterns);

        Capability::ALL
            .into_iter()
            .filter_map(|capability| statement_for(capability, config, &model_patterns))
            .collect()
    }

    /// Derive a full policy document, preserving statement order exactly.
    pub fn derive_document(&self, config: &DerivationConfig) -> PolicyDocument {
        PolicyDocument::from_statements(self.derive(config))
    }

    /// Resolve the resource patterns the invoke/streaming statements are
    /// scoped to.
    pub(crate) fn resolve_model_patterns(&self, config: &DerivationConfig) -> Vec<String> {
        if config.use_custom_resources {
            // Override escape hatch: the literal patterns, untouched by
            // provider filtering.
            return config.custom_resource_patterns.clone();
        }

        config
            .effective_providers()
            .into_iter()
            .map(|provider| self.arn_formatter.pattern_for(provider))
            .collect()
    }
}

/// Build the statement for one capability, or `None` if it is not enabled.
fn statement_for(
    capability: Capability,
    config: &DerivationConfig,
    model_patterns: &[String],
) -> Option<Statement> {
    if !config.has_capability(capability) {
        return None;
    }

    let statement = match capability {
        Capability::Invoke => {
            model_invocation_statement("bedrock:InvokeModel", config, model_patterns)
                .with_sid("AllowModelInvocation")
        }
        Capability::Streaming => model_invocation_statement(
            "bedrock:InvokeModelWithResponseStream",
            config,
            model_patterns,
        )
        .with_sid("AllowModelInvocationStreaming"),
        Capability::ModelCatalog => Statement::allow(
            vec![
                "bedrock:GetFoundationModel".to_string(),
                "bedrock:ListFoundationModels".to_string(),
            ],
            vec!["*".to_string()],
        )
        .with_sid("AllowModelCatalogDiscovery"),
        Capability::Agents => Statement::allow(
            vec![
                "bedrock:InvokeAgent".to_string(),
                "bedrock:GetAgent".to_string(),
            ],
            config.agent_resources.clone(),
        )
        .with_sid("AllowAgentInvocation"),
        Capability::KnowledgeBases => Statement::allow(
            vec![
                "bedrock:Retrieve".to_string(),
                "bedrock:RetrieveAndGenerate".to_string(),
            ],
            config.knowledge_base_resources.clone(),
        )
        .with_sid("AllowKnowledgeBaseRetrieval"),
        Capability::Guardrails => Statement::allow(
            vec!["bedrock:ApplyGuardrail".to_string()],
            config.guardrail_resources.clone(),
        )
        .with_sid("AllowGuardrailApplication"),
    };

    Some(statement)
}

/// Allow statement over the model patterns, region-conditioned when the
/// configuration restricts regions.
fn model_invocation_statement(
    action: &str,
    config: &DerivationConfig,
    model_patterns: &[String],
) -> Statement {
    let statement = Statement::allow(vec![action.to_string()], model_patterns.to_vec());

    if config.allowed_regions.is_empty() {
        statement
    } else {
        statement.with_condition(Condition::string_equals(
            "aws:RequestedRegion",
            config.allowed_regions.clone(),
        ))
    }
}
