use std::fmt;
use std::str::FromStr;
use tokio::sync::watch;

/// Default number of manifests fetched and validated at once
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Stages of a validation run, in the order they are entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStage {
    FetchingIndex,
    ValidatingIndex,
    AnalyzingIdentifiers,
    FetchingManifests,
    Done,
    Failed,
}

impl ValidationStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ValidationStage::Done | ValidationStage::Failed)
    }
}

impl fmt::Display for ValidationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationStage::FetchingIndex => "fetching index",
            ValidationStage::ValidatingIndex => "validating index",
            ValidationStage::AnalyzingIdentifiers => "analyzing identifiers",
            ValidationStage::FetchingManifests => "fetching manifests",
            ValidationStage::Done => "done",
            ValidationStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Progress reporter for validation runs.
/// Implementations forward updates to the console, logs or tests.
pub trait ProgressReporter: Send + Sync {
    /// A new stage was entered
    fn stage(&self, stage: ValidationStage);

    /// The index passed its grammar and collision checks
    fn index_validated(&self, identifiers: usize, manifests: usize);

    /// `checked` manifests out of `total` have passed validation.
    /// Called when a 10% boundary is crossed and always for the last manifest.
    fn manifests_checked(&self, checked: usize, total: usize);

    /// The run finished
    fn done(&self, success: bool, message: Option<&str>);
}

/// A progress reporter that does nothing (silent).
/// Useful for library callers and tests.
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn stage(&self, _stage: ValidationStage) {}
    fn index_validated(&self, _identifiers: usize, _manifests: usize) {}
    fn manifests_checked(&self, _checked: usize, _total: usize) {}
    fn done(&self, _success: bool, _message: Option<&str>) {}
}

/// What happens to the remaining manifests once one of them has failed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Cancel: queued manifests are skipped and in-flight fetches abandoned
    #[default]
    FailFast,
    /// Let every manifest finish, then report the first failure
    DrainInFlight,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::FailFast => "fail-fast",
            FailurePolicy::DrainInFlight => "drain-in-flight",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail-fast" | "failfast" => Ok(FailurePolicy::FailFast),
            "drain-in-flight" | "drain" => Ok(FailurePolicy::DrainInFlight),
            _ => Err(anyhow::anyhow!(
                "Unknown failure policy: {} (expected fail-fast or drain-in-flight)",
                s
            )),
        }
    }
}

/// Settings of a validation run
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Maximum number of manifest fetch-and-validate tasks in flight
    pub concurrency: usize,

    pub failure_policy: FailurePolicy,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl ValidatorConfig {
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }
}

/// Sending half of a cancellation signal
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        // send_replace stores the value even when every token is gone
        self.tx.send_replace(true);
    }
}

/// Cancellation token wrapper, observed cooperatively by manifest tasks
#[derive(Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation is signalled. Never resolves if the handle is
    /// dropped without cancelling.
    pub async fn cancelled(&mut self) {
        while !*self.rx.borrow_and_update() {
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

pub fn cancel_channel() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}
