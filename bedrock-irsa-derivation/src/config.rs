//! Declarative role configuration: the raw input shape, closed-set
//! validation, and the validated configuration consumed by the derivation
//! engine.

use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::capability::Capability;
use crate::errors::{ConfigurationError, DerivationResult};
use crate::provider::Provider;

/// Raw declarative input for the model-inference role, as it appears in a
/// configuration file.
///
/// Every field is optional: a missing flag means disabled and a missing list
/// means empty. Capability and provider tags are plain strings here; they are
/// checked against their closed sets by [`RawRoleConfig::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawRoleConfig {
    /// Capability tags to enable.
    pub capabilities: Vec<String>,
    /// Provider allow-list. Empty means every provider is allowed.
    pub allowed_providers: Vec<String>,
    /// Provider deny-list. Exclusion wins over inclusion.
    pub excluded_providers: Vec<String>,
    /// Bypass provider-derived patterns and use `custom_resource_patterns`.
    pub use_custom_resources: bool,
    /// Literal resource patterns used when `use_custom_resources` is set.
    pub custom_resource_patterns: Vec<String>,
    /// Regions the invoke/streaming statements are conditioned on. Empty
    /// means no region restriction.
    pub allowed_regions: Vec<String>,
    /// Resource patterns for the `agents` capability.
    pub agent_resources: Vec<String>,
    /// Resource patterns for the `knowledge_bases` capability.
    pub knowledge_base_resources: Vec<String>,
    /// Resource patterns for the `guardrails` capability.
    pub guardrail_resources: Vec<String>,
}

impl RawRoleConfig {
    /// Load a configuration from a JSON file.
    pub fn load_from_path(path: &Path) -> DerivationResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Load a configuration from any reader producing JSON.
    pub fn load_from_reader(reader: impl Read) -> DerivationResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> DerivationResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check every tag against its closed set and produce the typed
    /// configuration consumed by the derivation engine.
    ///
    /// This is the only error path of the component. The first tag outside
    /// its closed set is reported with the offending value and the permitted
    /// set, and no derivation logic runs. Duplicate tags are deduplicated.
    pub fn validate(self) -> DerivationResult<DerivationConfig> {
        Ok(DerivationConfig {
            capabilities: parse_tags::<Capability>(&self.capabilities)?,
            allowed_providers: parse_tags::<Provider>(&self.allowed_providers)?,
            excluded_providers: parse_tags::<Provider>(&self.excluded_providers)?,
            use_custom_resources: self.use_custom_resources,
            custom_resource_patterns: self.custom_resource_patterns,
            allowed_regions: self.allowed_regions,
            agent_resources: self.agent_resources,
            knowledge_base_resources: self.knowledge_base_resources,
            guardrail_resources: self.guardrail_resources,
        })
    }
}

/// Parse and deduplicate a list of closed-set tags. Input order is
/// irrelevant downstream: consumers iterate the canonical declaration orders,
/// never these lists.
fn parse_tags<T>(raw: &[String]) -> DerivationResult<Vec<T>>
where
    T: FromStr<Err = ConfigurationError> + PartialEq,
{
    let mut parsed = Vec::with_capacity(raw.len());
    for tag in raw {
        let value = tag.parse::<T>()?;
        if !parsed.contains(&value) {
            parsed.push(value);
        }
    }
    Ok(parsed)
}

/// Validated input to one policy derivation.
///
/// Constructed once by [`RawRoleConfig::validate`], consumed by a single
/// derivation call, and discarded. Derivation never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivationConfig {
    pub capabilities: Vec<Capability>,
    pub allowed_providers: Vec<Provider>,
    pub excluded_providers: Vec<Provider>,
    pub use_custom_resources: bool,
    pub custom_resource_patterns: Vec<String>,
    pub allowed_regions: Vec<String>,
    pub agent_resources: Vec<String>,
    pub knowledge_base_resources: Vec<String>,
    pub guardrail_resources: Vec<String>,
}

impl DerivationConfig {
    /// Whether the given capability was enabled in configuration.
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// The providers whose model patterns the role is scoped to.
    ///
    /// An empty allow-list means every provider is allowed. This default-open
    /// behavior is deliberate and consumers depend on it; narrowing an empty
    /// allow-list to mean "none" would silently change every existing role,
    /// so it must not be "fixed". Exclusion always wins over inclusion, even
    /// for a provider listed in both sets. Iteration order is the fixed
    /// declaration order of [`Provider::ALL`], never configuration order.
    pub fn effective_providers(&self) -> Vec<Provider> {
        Provider::ALL
            .into_iter()
            .filter(|provider| {
                self.allowed_providers.is_empty() || self.allowed_providers.contains(provider)
            })
            .filter(|provider| !self.excluded_providers.contains(provider))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_json_is_a_valid_empty_config() {
        let raw = RawRoleConfig::from_json_str("{}").unwrap();
        let config = raw.validate().unwrap();
        assert!(config.capabilities.is_empty());
        assert!(!config.use_custom_resources);
        assert_eq!(config.effective_providers().len(), Provider::ALL.len());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = RawRoleConfig::from_json_str(r#"{"capabilties": ["invoke"]}"#);
        assert!(matches!(result, Err(ConfigurationError::Json(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_capability() {
        let raw = RawRoleConfig {
            capabilities: vec!["invoke".to_string(), "bogus".to_string()],
            ..RawRoleConfig::default()
        };
        let err = raw.validate().unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownCapability { value } if value == "bogus"));
    }

    #[test]
    fn test_validate_rejects_unknown_provider_in_either_list() {
        let raw = RawRoleConfig {
            allowed_providers: vec!["acme".to_string()],
            ..RawRoleConfig::default()
        };
        assert!(matches!(
            raw.validate().unwrap_err(),
            ConfigurationError::UnknownProvider { value } if value == "acme"
        ));

        let raw = RawRoleConfig {
            excluded_providers: vec!["acme".to_string()],
            ..RawRoleConfig::default()
        };
        assert!(matches!(
            raw.validate().unwrap_err(),
            ConfigurationError::UnknownProvider { value } if value == "acme"
        ));
    }

    #[test]
    fn test_validate_deduplicates_tags() {
        let raw = RawRoleConfig {
            capabilities: vec!["invoke".to_string(), "invoke".to_string()],
            excluded_providers: vec!["meta".to_string(), "meta".to_string()],
            ..RawRoleConfig::default()
        };
        let config = raw.validate().unwrap();
        assert_eq!(config.capabilities, vec![Capability::Invoke]);
        assert_eq!(config.excluded_providers, vec![Provider::Meta]);
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"capabilities": ["streaming"], "allowed_regions": ["eu-west-1"]}}"#
        )
        .unwrap();

        let raw = RawRoleConfig::load_from_path(file.path()).unwrap();
        let config = raw.validate().unwrap();
        assert_eq!(config.capabilities, vec![Capability::Streaming]);
        assert_eq!(config.allowed_regions, vec!["eu-west-1"]);
    }

    #[test]
    fn test_load_from_reader() {
        let json = br#"{"capabilities": ["guardrails"]}"#;
        let raw = RawRoleConfig::load_from_reader(&json[..]).unwrap();
        let config = raw.validate().unwrap();
        assert_eq!(config.capabilities, vec![Capability::Guardrails]);
    }

    #[test]
    fn test_load_from_missing_path() {
        let result = RawRoleConfig::load_from_path(Path::new("/nonexistent/role.json"));
        assert!(matches!(result, Err(ConfigurationError::Io(_))));
    }

    #[test]
    fn test_effective_providers_default_open() {
        let config = DerivationConfig::default();
        assert_eq!(config.effective_providers(), Provider::ALL.to_vec());
    }

    #[test]
    fn test_effective_providers_exclusion_from_full_set() {
        let config = DerivationConfig {
            excluded_providers: vec![Provider::Anthropic],
            ..DerivationConfig::default()
        };
        let effective = config.effective_providers();
        assert_eq!(effective.len(), Provider::ALL.len() - 1);
        assert!(!effective.contains(&Provider::Anthropic));
    }

    #[test]
    fn test_effective_providers_exclusion_wins_over_inclusion() {
        let config = DerivationConfig {
            allowed_providers: vec![Provider::Amazon, Provider::Meta],
            excluded_providers: vec![Provider::Meta],
            ..DerivationConfig::default()
        };
        assert_eq!(config.effective_providers(), vec![Provider::Amazon]);
    }

    #[test]
    fn test_effective_providers_follow_declaration_order_not_input_order() {
        let config = DerivationConfig {
            allowed_providers: vec![Provider::Stability, Provider::Anthropic, Provider::Meta],
            ..DerivationConfig::default()
        };
        assert_eq!(
            config.effective_providers(),
            vec![Provider::Anthropic, Provider::Meta, Provider::Stability]
        );
    }
}
