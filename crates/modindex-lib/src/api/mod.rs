//! Access to index and manifest documents of a repository

use crate::models::{IndexDocument, ManifestDocument};
use async_trait::async_trait;

pub mod repository;

pub use repository::{GatewayOptions, RepositoryGateway, DEFAULT_BASE_URL};

/// Failure to obtain a document. Every variant is fatal to a validation run; the split
/// only exists to give better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid repository url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("malformed document at {url}: {source}")]
    Deserialize {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Network hiccups and server-side failures, worth another attempt
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Transport { .. } => true,
            FetchError::Status { status, .. } => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }

    pub fn is_deserialize(&self) -> bool {
        matches!(self, FetchError::Deserialize { .. })
    }
}

/// Supplies parsed documents from a repository
#[async_trait]
pub trait FetchGateway: Send + Sync {
    /// Human readable location of the repository, used in error messages
    fn location(&self) -> &str;

    async fn fetch_index(&self) -> Result<IndexDocument, FetchError>;

    /// Fetch the manifest for a `modloader:modname` identifier
    async fn fetch_manifest(
        &self,
        generic_identifier: &str,
    ) -> Result<ManifestDocument, FetchError>;
}
