use serde::{Deserialize, Serialize};

/// Per-project manifest, stored at `<modloader>/<modname>.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestDocument {
    pub index_version: String,

    /// `modloader:modname` this manifest describes
    pub generic_identifier: String,

    /// Display name of the project
    pub fancy_name: String,

    pub author: String,

    #[serde(default)]
    pub license: Option<String>,

    /// CurseForge project id. Numeric, so it carries no grammar.
    #[serde(default)]
    pub curse_forge_id: Option<i64>,

    #[serde(default)]
    pub modrinth_id: Option<String>,

    pub links: ManifestLinks,

    #[serde(default)]
    pub files: Vec<VersionFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestLinks {
    #[serde(default)]
    pub issue: Option<String>,

    #[serde(default)]
    pub source_control: Option<String>,

    #[serde(default)]
    pub others: Vec<OtherLink>,
}

/// A named link that is neither the issue tracker nor source control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherLink {
    pub link_name: String,
    pub url: String,
}

/// A single released file of a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionFile {
    pub file_name: String,

    /// Supported game versions (e.g., "1.20.1", "1.19.4-rc1")
    #[serde(default)]
    pub mc_versions: Vec<String>,

    /// First 15 characters of the file's SHA-512, lowercase
    pub short_sha512_hash: String,

    #[serde(default)]
    pub download_urls: Vec<String>,

    #[serde(default)]
    pub curse_download_available: bool,

    #[serde(default)]
    pub relations_to_other_mods: RelationsToOtherMods,
}

/// Generic identifiers this file depends on or conflicts with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationsToOtherMods {
    #[serde(default)]
    pub required: Vec<String>,

    #[serde(default)]
    pub incompatible: Vec<String>,
}
