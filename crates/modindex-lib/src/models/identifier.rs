use crate::error::ValidationError;
use std::fmt;
use std::str::FromStr;

/// A `modloader:modname:hash` identifier naming one specific build.
///
/// Parsing only checks the shape (three non-empty, lowercase segments); the full grammar
/// lives in [`crate::validation::grammar::Grammar::FullIdentifier`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FullIdentifier {
    raw: String,
    loader_end: usize,
    name_end: usize,
}

impl FullIdentifier {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let shape_error = || ValidationError::IdentifierShape {
            identifier: raw.to_string(),
        };

        let mut segments = raw.split(':');
        let (loader, name, hash) = match (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) {
            (Some(loader), Some(name), Some(hash), None) => (loader, name, hash),
            _ => return Err(shape_error()),
        };

        let lowercase = |s: &str| !s.is_empty() && !s.chars().any(char::is_uppercase);
        if !(lowercase(loader) && lowercase(name) && lowercase(hash)) {
            return Err(shape_error());
        }

        Ok(Self {
            raw: raw.to_string(),
            loader_end: loader.len(),
            name_end: loader.len() + 1 + name.len(),
        })
    }

    pub fn modloader(&self) -> &str {
        &self.raw[..self.loader_end]
    }

    pub fn modname(&self) -> &str {
        &self.raw[self.loader_end + 1..self.name_end]
    }

    pub fn hash(&self) -> &str {
        &self.raw[self.name_end + 1..]
    }

    /// The `modloader:modname` prefix, which names the manifest to fetch
    pub fn generic(&self) -> &str {
        &self.raw[..self.name_end]
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for FullIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for FullIdentifier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Path of a manifest relative to the repository root: `fabric:sodium` -> `fabric/sodium.json`
pub fn manifest_path(generic_identifier: &str) -> String {
    format!("{}.json", generic_identifier.replace(':', "/"))
}
