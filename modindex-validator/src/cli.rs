use clap::Parser;
use modindex_lib::api::{GatewayOptions, DEFAULT_BASE_URL};
use modindex_lib::{FailurePolicy, ValidatorConfig};
use std::time::Duration;

/// Validate the mod index and every manifest it references
#[derive(Parser, Debug)]
#[command(name = "modindex-validator", version, about, long_about = None)]
pub struct Cli {
    /// Base url of the repository (the directory holding index.json)
    #[arg(env = "MODINDEX_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Number of manifests fetched and validated at once
    #[arg(short, long, env = "MODINDEX_CONCURRENCY", default_value_t = 5)]
    pub concurrency: usize,

    /// What happens to other manifests after one fails (fail-fast, drain-in-flight)
    #[arg(long, env = "MODINDEX_POLICY", default_value_t = FailurePolicy::FailFast)]
    pub policy: FailurePolicy,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "MODINDEX_TIMEOUT_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Retries for transient network failures
    #[arg(long, env = "MODINDEX_RETRIES", default_value_t = 3)]
    pub retries: u32,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, env = "MODINDEX_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig::default()
            .with_concurrency(self.concurrency)
            .with_failure_policy(self.policy)
    }

    pub fn gateway_options(&self) -> GatewayOptions {
        GatewayOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            max_retries: self.retries,
            ..GatewayOptions::default()
        }
    }
}
