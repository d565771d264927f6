//! bedrock-irsa command-line interface.
//!
//! Derives model-inference access-policy documents from declarative role
//! configuration and plans the provisioning requests that a backend would
//! receive. Nothing here talks to a cloud API; `plan` is a dry run.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bedrock_irsa_derivation::{DerivationConfig, Deriver, RawRoleConfig};
use bedrock_irsa_provisioning::{ProvisionRequest, TrustSpec};
use clap::{Parser, Subcommand};
use log::debug;

#[derive(Parser)]
#[command(
    name = "bedrock-irsa",
    version,
    about = "Derive IAM access policies for model-inference IRSA roles"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the access-policy document for a role configuration
    Derive {
        /// Path to the JSON role configuration, or '-' for stdin
        #[arg(long)]
        config: PathBuf,

        /// AWS partition used in generated model ARN patterns
        #[arg(long, default_value = "aws")]
        partition: String,

        /// AWS region used in generated model ARN patterns ('*' for all)
        #[arg(long, default_value = "*")]
        region: String,
    },

    /// Print the provisioning request that would be sent to the backend
    Plan {
        /// Path to the JSON role configuration, or '-' for stdin
        #[arg(long)]
        config: PathBuf,

        /// AWS partition used in generated model ARN patterns
        #[arg(long, default_value = "aws")]
        partition: String,

        /// AWS region used in generated model ARN patterns ('*' for all)
        #[arg(long, default_value = "*")]
        region: String,

        /// Name of the role to provision
        #[arg(long)]
        role_name: String,

        /// ARN of the cluster OIDC identity provider
        #[arg(long)]
        oidc_provider_arn: String,

        /// Namespace of the bound service account
        #[arg(long, default_value = "default")]
        namespace: String,

        /// Name of the bound service account
        #[arg(long)]
        service_account: String,

        /// Tag to attach to the role, as key=value (repeatable)
        #[arg(long = "tag", value_parser = parse_tag)]
        tags: Vec<(String, String)>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Derive {
            config,
            partition,
            region,
        } => {
            let config = load_config(&config)?;
            let document = Deriver::new(&partition, &region).derive_document(&config);
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        Commands::Plan {
            config,
            partition,
            region,
            role_name,
            oidc_provider_arn,
            namespace,
            service_account,
            tags,
        } => {
            let config = load_config(&config)?;
            let request = ProvisionRequest {
                role_name,
                trust: TrustSpec::new(oidc_provider_arn, namespace, service_account),
                policy: Deriver::new(&partition, &region).derive_document(&config),
                tags: tags.into_iter().collect::<BTreeMap<_, _>>(),
            };
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
    }

    Ok(())
}

/// Read, parse, and validate a role configuration from a file or stdin.
fn load_config(path: &Path) -> anyhow::Result<DerivationConfig> {
    let raw = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read role configuration from stdin")?;
        RawRoleConfig::from_json_str(&buffer)?
    } else {
        RawRoleConfig::load_from_path(path)
            .with_context(|| format!("failed to load role configuration from {}", path.display()))?
    };

    let config = raw.validate()?;
    debug!("validated role configuration: {:?}", config);
    Ok(config)
}

/// Parse a `key=value` tag argument.
fn parse_tag(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("invalid tag '{raw}', expected key=value"))
}
