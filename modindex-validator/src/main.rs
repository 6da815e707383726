mod cli;
mod reporter;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use modindex_lib::{run_validation, RepositoryGateway};
use reporter::ConsoleReporter;
use std::process::ExitCode;
use std::sync::Arc;

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .init();
}

/// Returns `Ok(false)` when validation fails; the reporter has already printed why.
/// `Err` is reserved for failures to set up the run.
async fn run(cli: &Cli) -> Result<bool> {
    let gateway = RepositoryGateway::with_options(&cli.base_url, cli.gateway_options())
        .context("Failed to set up repository gateway")?;
    let config = cli.validator_config();

    log::info!(
        "Validating {} ({} concurrent, {})",
        cli.base_url,
        config.concurrency,
        config.failure_policy
    );

    let result = run_validation(&gateway, &config, Arc::new(ConsoleReporter)).await;
    Ok(result.is_ok())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(&cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
