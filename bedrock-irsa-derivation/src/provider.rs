//! Model-provider tags and their foundation-model identifier prefixes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;

/// A model-hosting vendor whose foundation models may be included in or
/// excluded from the role's resource scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Anthropic,
    Amazon,
    Ai21,
    Cohere,
    Meta,
    Mistral,
    Stability,
}

impl Provider {
    /// Every provider, in fixed declaration order.
    ///
    /// Generated resource patterns follow this order regardless of the order
    /// providers were listed in configuration, so serialized policies stay
    /// stable across runs.
    pub const ALL: [Provider; 7] = [
        Provider::Anthropic,
        Provider::Amazon,
        Provider::Ai21,
        Provider::Cohere,
        Provider::Meta,
        Provider::Mistral,
        Provider::Stability,
    ];

    /// The configuration tag for this provider.
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::Amazon => "amazon",
            Provider::Ai21 => "ai21",
            Provider::Cohere => "cohere",
            Provider::Meta => "meta",
            Provider::Mistral => "mistral",
            Provider::Stability => "stability",
        }
    }

    /// Fixed prefix of this provider's foundation-model identifiers.
    pub fn model_prefix(self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic.",
            Provider::Amazon => "amazon.",
            Provider::Ai21 => "ai21.",
            Provider::Cohere => "cohere.",
            Provider::Meta => "meta.",
            Provider::Mistral => "mistral.",
            Provider::Stability => "stability.",
        }
    }

    /// Comma-separated list of every valid tag, for diagnostics.
    pub fn permitted() -> String {
        Self::ALL
            .iter()
            .map(|provider| provider.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Provider {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|provider| provider.as_str() == s)
            .ok_or_else(|| ConfigurationError::UnknownProvider {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
