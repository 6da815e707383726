use serde::{Deserialize, Serialize};

/// Root document of the repository, `index.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDocument {
    /// Format version of the index (e.g., "3.1.0")
    pub index_version: String,

    /// Every known build, as `modloader:modname:hash`
    pub identifiers: Vec<String>,
}
