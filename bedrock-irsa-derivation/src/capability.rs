//! Capability tags for the model-inference role.
//!
//! Each capability activates exactly one statement-generation rule in the
//! derivation engine. The set is closed: unknown tags are rejected when the
//! role configuration is validated, before any derivation logic runs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;

/// A named subset of API actions the model-inference role may be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Synchronous model invocation.
    Invoke,
    /// Model invocation with a streamed response.
    Streaming,
    /// Foundation-model catalog discovery (list/describe).
    ModelCatalog,
    /// Agent invocation and retrieval.
    Agents,
    /// Knowledge-base retrieval.
    KnowledgeBases,
    /// Guardrail application.
    Guardrails,
}

impl Capability {
    /// Every capability, in canonical order.
    ///
    /// Statement order in derived policies follows this order, never the
    /// order capabilities were declared in configuration.
    pub const ALL: [Capability; 6] = [
        Capability::Invoke,
        Capability::Streaming,
        Capability::ModelCatalog,
        Capability::Agents,
        Capability::KnowledgeBases,
        Capability::Guardrails,
    ];

    /// The configuration tag for this capability.
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::Invoke => "invoke",
            Capability::Streaming => "streaming",
            Capability::ModelCatalog => "model_catalog",
            Capability::Agents => "agents",
            Capability::KnowledgeBases => "knowledge_bases",
            Capability::Guardrails => "guardrails",
        }
    }

    /// Comma-separated list of every valid tag, for diagnostics.
    pub fn permitted() -> String {
        Self::ALL
            .iter()
            .map(|capability| capability.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Capability {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|capability| capability.as_str() == s)
            .ok_or_else(|| ConfigurationError::UnknownCapability {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
