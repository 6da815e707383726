use crate::api::FetchError;

/// Every way a validation run can fail. None of them is recoverable: the first one
/// observed ends the run.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("could not fetch \"index.json\" at repository {location}")]
    IndexFetch {
        location: String,
        #[source]
        source: FetchError,
    },

    #[error("could not fetch manifest \"{identifier}\" at repository {location}")]
    ManifestFetch {
        identifier: String,
        location: String,
        #[source]
        source: FetchError,
    },

    #[error("invalid {field}: {value:?}{}", manifest_context(.identifier))]
    FormatViolation {
        field: String,
        value: String,
        /// Generic identifier of the enclosing manifest, `None` for index fields
        identifier: Option<String>,
    },

    #[error(
        "hash collision on {hash} between different projects: {}",
        .identifiers.join(", ")
    )]
    HashCollisionDetected { hash: String, identifiers: Vec<String> },

    #[error("identifier {identifier:?} is not three lowercase segments (modloader:modname:hash)")]
    IdentifierShape { identifier: String },
}

fn manifest_context(identifier: &Option<String>) -> String {
    identifier
        .as_deref()
        .map(|id| format!(" in {}", id))
        .unwrap_or_default()
}

impl ValidationError {
    /// Whether this failure came from the gateway rather than from document content
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::IndexFetch { .. } | Self::ManifestFetch { .. })
    }
}
