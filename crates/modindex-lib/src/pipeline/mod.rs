//! Validation run: index, identifier analysis, then every manifest concurrently

pub mod batch;
pub mod types;


pub use batch::{ManifestBatch, ProgressTracker};
pub use types::*;

use crate::api::FetchGateway;
use crate::error::ValidationError;
use crate::validation::{analyze_identifiers, validate_index};
use std::sync::Arc;

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSummary {
    pub index_version: String,
    /// Number of full identifiers in the index
    pub identifiers: usize,
    /// Number of manifests fetched and validated
    pub manifests: usize,
}

/// Validate the whole repository behind `gateway`.
///
/// The index is fetched, validated and checked for hash collisions before any manifest is
/// requested. Manifests are then fetched and validated at most `config.concurrency` at a
/// time. The first failure observed ends the run.
pub async fn run_validation(
    gateway: &dyn FetchGateway,
    config: &ValidatorConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<ValidationSummary, ValidationError> {
    let result = run_stages(gateway, config, reporter.clone()).await;

    match &result {
        Ok(summary) => {
            log::info!(
                "Validated index {} with {} manifests",
                summary.index_version,
                summary.manifests
            );
            reporter.stage(ValidationStage::Done);
            reporter.done(true, None);
        }
        Err(e) => {
            log::debug!("Validation of {} failed", gateway.location());
            reporter.stage(ValidationStage::Failed);
            reporter.done(false, Some(&e.to_string()));
        }
    }

    result
}

async fn run_stages(
    gateway: &dyn FetchGateway,
    config: &ValidatorConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<ValidationSummary, ValidationError> {
    reporter.stage(ValidationStage::FetchingIndex);
    log::info!("Fetching index from {}", gateway.location());
    let index = gateway
        .fetch_index()
        .await
        .map_err(|source| ValidationError::IndexFetch {
            location: gateway.location().to_string(),
            source,
        })?;

    reporter.stage(ValidationStage::ValidatingIndex);
    validate_index(&index)?;

    reporter.stage(ValidationStage::AnalyzingIdentifiers);
    let manifests = analyze_identifiers(&index.identifiers)?;
    log::info!(
        "Index {} validated: {} identifiers, {} manifests",
        index.index_version,
        index.identifiers.len(),
        manifests.len()
    );
    reporter.index_validated(index.identifiers.len(), manifests.len());

    reporter.stage(ValidationStage::FetchingManifests);
    log::debug!(
        "Validating {} manifests, {} at a time ({})",
        manifests.len(),
        config.concurrency,
        config.failure_policy
    );
    let checked = ManifestBatch::new(gateway, config)
        .validate_all(&manifests, reporter)
        .await?;

    Ok(ValidationSummary {
        index_version: index.index_version,
        identifiers: index.identifiers.len(),
        manifests: checked,
    })
}
