//! Field grammar tables for index and manifest documents.
//!
//! Each document kind is flattened into an ordered list of [`FieldCheck`]s; validation
//! walks the list and stops at the first value that does not match its grammar.

use super::grammar::Grammar;
use crate::error::ValidationError;
use crate::models::{FullIdentifier, IndexDocument, ManifestDocument};

/// One value of a document paired with the grammar it must match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck<'a> {
    /// JSON path of the value, e.g. `files[0].mcVersions[2]`
    pub field: String,
    pub value: &'a str,
    pub grammar: Grammar,
}

impl<'a> FieldCheck<'a> {
    fn new(field: impl Into<String>, value: &'a str, grammar: Grammar) -> Self {
        Self {
            field: field.into(),
            value,
            grammar,
        }
    }

    pub fn passes(&self) -> bool {
        self.grammar.matches(self.value)
    }
}

/// Checks for the index document, in evaluation order
pub fn index_rules(index: &IndexDocument) -> Vec<FieldCheck<'_>> {
    let mut checks = Vec::with_capacity(index.identifiers.len() + 1);
    checks.push(FieldCheck::new("indexVersion", &index.index_version, Grammar::SemanticVersion));
    for (i, identifier) in index.identifiers.iter().enumerate() {
        checks.push(FieldCheck::new(
            format!("identifiers[{}]", i),
            identifier,
            Grammar::FullIdentifier,
        ));
    }
    checks
}

/// Checks for a manifest document, in evaluation order.
///
/// Optional fields only produce a check when present. `curseForgeId` is numeric and has
/// no grammar.
pub fn manifest_rules(manifest: &ManifestDocument) -> Vec<FieldCheck<'_>> {
    let mut checks = vec![
        FieldCheck::new("indexVersion", &manifest.index_version, Grammar::SemanticVersion),
        FieldCheck::new(
            "genericIdentifier",
            &manifest.generic_identifier,
            Grammar::GenericIdentifier,
        ),
        FieldCheck::new("fancyName", &manifest.fancy_name, Grammar::HumanName),
        FieldCheck::new("author", &manifest.author, Grammar::HumanName),
    ];

    if let Some(license) = &manifest.license {
        checks.push(FieldCheck::new("license", license, Grammar::HumanName));
    }
    if let Some(modrinth_id) = &manifest.modrinth_id {
        checks.push(FieldCheck::new("modrinthId", modrinth_id, Grammar::Alphanumeric));
    }
    if let Some(issue) = &manifest.links.issue {
        checks.push(FieldCheck::new("links.issue", issue, Grammar::UrlToken));
    }
    if let Some(source_control) = &manifest.links.source_control {
        checks.push(FieldCheck::new("links.sourceControl", source_control, Grammar::UrlToken));
    }

    for (i, link) in manifest.links.others.iter().enumerate() {
        checks.push(FieldCheck::new(
            format!("links.others[{}].linkName", i),
            &link.link_name,
            Grammar::HumanName,
        ));
        checks.push(FieldCheck::new(
            format!("links.others[{}].url", i),
            &link.url,
            Grammar::UrlToken,
        ));
    }

    for (i, file) in manifest.files.iter().enumerate() {
        let prefix = format!("files[{}]", i);
        checks.push(FieldCheck::new(
            format!("{}.fileName", prefix),
            &file.file_name,
            Grammar::HumanName,
        ));
        for (j, mc_version) in file.mc_versions.iter().enumerate() {
            checks.push(FieldCheck::new(
                format!("{}.mcVersions[{}]", prefix, j),
                mc_version,
                Grammar::LooseSemanticVersion,
            ));
        }
        checks.push(FieldCheck::new(
            format!("{}.shortSha512Hash", prefix),
            &file.short_sha512_hash,
            Grammar::ShortHash,
        ));
        for (j, url) in file.download_urls.iter().enumerate() {
            checks.push(FieldCheck::new(
                format!("{}.downloadUrls[{}]", prefix, j),
                url,
                Grammar::UrlToken,
            ));
        }
        let relations = &file.relations_to_other_mods;
        for (j, required) in relations.required.iter().enumerate() {
            checks.push(FieldCheck::new(
                format!("{}.relationsToOtherMods.required[{}]", prefix, j),
                required,
                Grammar::GenericIdentifier,
            ));
        }
        for (j, incompatible) in relations.incompatible.iter().enumerate() {
            checks.push(FieldCheck::new(
                format!("{}.relationsToOtherMods.incompatible[{}]", prefix, j),
                incompatible,
                Grammar::GenericIdentifier,
            ));
        }
    }

    checks
}

/// Validate the index document against its field grammars
pub fn validate_index(index: &IndexDocument) -> Result<(), ValidationError> {
    for check in index_rules(index) {
        if check.passes() {
            continue;
        }
        if check.grammar == Grammar::FullIdentifier {
            // A value that cannot even be split into three lowercase segments is reported
            // as a shape error rather than a plain format violation.
            FullIdentifier::parse(check.value)?;
        }
        return Err(ValidationError::FormatViolation {
            field: check.field,
            value: check.value.to_string(),
            identifier: None,
        });
    }
    Ok(())
}

/// Validate a manifest document against its field grammars.
///
/// Violations name the manifest's generic identifier, since manifests are validated
/// concurrently and the message has to be attributable on its own.
pub fn validate_manifest(manifest: &ManifestDocument) -> Result<(), ValidationError> {
    match manifest_rules(manifest).into_iter().find(|check| !check.passes()) {
        Some(check) => Err(ValidationError::FormatViolation {
            field: check.field,
            value: check.value.to_string(),
            identifier: Some(manifest.generic_identifier.clone()),
        }),
        None => Ok(()),
    }
}
