use super::types::{cancel_channel, FailurePolicy, ProgressReporter, ValidatorConfig};
use crate::api::FetchGateway;
use crate::error::ValidationError;
use crate::validation::validate_manifest;
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts checked manifests and decides when a progress line is due
pub struct ProgressTracker {
    checked: AtomicUsize,
    total: usize,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            checked: AtomicUsize::new(0),
            total,
        }
    }

    /// Count one checked manifest. Returns the new count if it crossed a 10% boundary;
    /// the final manifest always does.
    pub fn record(&self) -> Option<usize> {
        let checked = self.checked.fetch_add(1, Ordering::SeqCst) + 1;
        crosses_decile(checked, self.total).then_some(checked)
    }

    pub fn checked(&self) -> usize {
        self.checked.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

fn crosses_decile(checked: usize, total: usize) -> bool {
    if total == 0 || checked >= total {
        return true;
    }
    checked * 10 / total > (checked - 1) * 10 / total
}

enum TaskOutcome {
    Checked,
    Skipped,
}

/// Fetches and validates a set of manifests with bounded concurrency
pub struct ManifestBatch<'a> {
    gateway: &'a dyn FetchGateway,
    config: &'a ValidatorConfig,
}

impl<'a> ManifestBatch<'a> {
    pub fn new(gateway: &'a dyn FetchGateway, config: &'a ValidatorConfig) -> Self {
        Self { gateway, config }
    }

    /// Validate every manifest in `generic_identifiers`, returning how many passed.
    ///
    /// Every dispatched task has finished when this returns. The first failure observed
    /// is the one reported.
    pub async fn validate_all(
        &self,
        generic_identifiers: &[String],
        reporter: Arc<dyn ProgressReporter>,
    ) -> Result<usize, ValidationError> {
        let total = generic_identifiers.len();
        if total == 0 {
            return Ok(0);
        }

        let tracker = ProgressTracker::new(total);
        let (cancel, token) = cancel_channel();
        let gateway = self.gateway;
        let location = gateway.location();
        let tracker = &tracker;
        let token = &token;
        let reporter = &reporter;

        let mut results = stream::iter(generic_identifiers)
            .map(move |identifier| {
                let mut token = token.clone();

                async move {
                    if token.is_cancelled() {
                        return Ok::<_, ValidationError>(TaskOutcome::Skipped);
                    }

                    let fetched = tokio::select! {
                        biased;
                        _ = token.cancelled() => {
                            log::debug!(
                                "Abandoned fetch of {} after an earlier failure",
                                identifier
                            );
                            return Ok(TaskOutcome::Skipped);
                        }
                        fetched = gateway.fetch_manifest(identifier) => fetched,
                    };

                    let manifest = fetched.map_err(|source| ValidationError::ManifestFetch {
                        identifier: identifier.clone(),
                        location: location.to_string(),
                        source,
                    })?;
                    validate_manifest(&manifest)?;

                    if let Some(checked) = tracker.record() {
                        log::info!("Manifest validation progress: {}/{}", checked, tracker.total());
                        reporter.manifests_checked(checked, tracker.total());
                    }
                    Ok(TaskOutcome::Checked)
                }
            })
            .buffer_unordered(self.config.concurrency.max(1));

        let mut first_error: Option<ValidationError> = None;
        let mut skipped = 0usize;
        while let Some(result) = results.next().await {
            match result {
                Ok(TaskOutcome::Checked) => {}
                Ok(TaskOutcome::Skipped) => skipped += 1,
                Err(e) if first_error.is_none() => {
                    log::debug!(
                        "First manifest failure observed, policy {}",
                        self.config.failure_policy
                    );
                    if self.config.failure_policy == FailurePolicy::FailFast {
                        cancel.cancel();
                    }
                    first_error = Some(e);
                }
                Err(e) => log::warn!("Additional manifest failure: {}", e),
            }
        }

        if skipped > 0 {
            log::info!("Skipped {} manifests after the first failure", skipped);
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(tracker.checked()),
        }
    }
}
