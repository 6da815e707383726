use crate::error::ValidationError;
use crate::models::FullIdentifier;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Full identifiers from different projects that share one hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashCollision {
    pub hash: String,
    /// Sorted, so the report does not depend on index order
    pub identifiers: Vec<String>,
}

impl From<HashCollision> for ValidationError {
    fn from(collision: HashCollision) -> Self {
        ValidationError::HashCollisionDetected {
            hash: collision.hash,
            identifiers: collision.identifiers,
        }
    }
}

fn parse_all(identifiers: &[String]) -> Result<Vec<FullIdentifier>, ValidationError> {
    identifiers.iter().map(|raw| FullIdentifier::parse(raw)).collect()
}

/// Distinct `modloader:modname` prefixes, in order of first appearance
pub fn generic_identifiers(identifiers: &[String]) -> Result<Vec<String>, ValidationError> {
    let mut seen = HashSet::new();
    let mut generics = Vec::new();
    for id in parse_all(identifiers)? {
        if seen.insert(id.generic().to_string()) {
            generics.push(id.generic().to_string());
        }
    }
    Ok(generics)
}

/// Find hashes shared by more than one project.
///
/// A hash appearing under several mod loaders for the same modname is the same build
/// published for each loader and is not a collision.
pub fn find_hash_collisions(identifiers: &[String]) -> Result<Vec<HashCollision>, ValidationError> {
    let mut by_hash: BTreeMap<String, BTreeSet<FullIdentifier>> = BTreeMap::new();
    for id in parse_all(identifiers)? {
        by_hash.entry(id.hash().to_string()).or_default().insert(id);
    }

    let collisions = by_hash
        .into_iter()
        .filter(|(_, group)| {
            let modnames: HashSet<&str> = group.iter().map(FullIdentifier::modname).collect();
            modnames.len() > 1
        })
        .map(|(hash, group)| HashCollision {
            hash,
            identifiers: group.iter().map(|id| id.as_str().to_string()).collect(),
        })
        .collect();

    Ok(collisions)
}

/// Reject hash collisions and return the manifests to fetch.
///
/// Needs nothing but the index, so it runs before any manifest is requested.
pub fn analyze_identifiers(identifiers: &[String]) -> Result<Vec<String>, ValidationError> {
    let collisions = find_hash_collisions(identifiers)?;
    if let Some(collision) = collisions.into_iter().next() {
        log::error!(
            "Hash collision on {} between {}",
            collision.hash,
            collision.identifiers.join(", ")
        );
        return Err(collision.into());
    }

    let generics = generic_identifiers(identifiers)?;
    log::debug!(
        "{} identifiers map to {} manifests",
        identifiers.len(),
        generics.len()
    );
    Ok(generics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_same_project_other_loader_is_benign() {
        let identifiers = ids(&[
            "forge:examplemod:abc123def456789",
            "fabric:examplemod:abc123def456789",
        ]);
        assert!(find_hash_collisions(&identifiers).unwrap().is_empty());
        assert_eq!(
            analyze_identifiers(&identifiers).unwrap(),
            vec!["forge:examplemod", "fabric:examplemod"]
        );
    }

    #[test]
    fn test_different_projects_collide() {
        let identifiers = ids(&[
            "forge:modone:abc123def456789",
            "forge:modtwo:abc123def456789",
        ]);
        match analyze_identifiers(&identifiers) {
            Err(ValidationError::HashCollisionDetected { hash, identifiers }) => {
                assert_eq!(hash, "abc123def456789");
                assert_eq!(
                    identifiers,
                    vec!["forge:modone:abc123def456789", "forge:modtwo:abc123def456789"]
                );
            }
            other => panic!("expected a collision, got {other:?}"),
        }
    }

    #[test]
    fn test_collision_found_when_first_entries_agree() {
        // Two loaders of the same project, then an unrelated project with the same hash.
        let identifiers = ids(&[
            "forge:examplemod:abc123def456789",
            "fabric:examplemod:abc123def456789",
            "quilt:othermod:abc123def456789",
        ]);
        let collisions = find_hash_collisions(&identifiers).unwrap();
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].identifiers.len(), 3);
    }

    #[test]
    fn test_verdict_is_order_independent() {
        let base = [
            "fabric:sodium:0123456789abcde",
            "forge:modone:abc123def456789",
            "fabric:lithium:zzzzzzzzzzzzzzz",
            "forge:modtwo:abc123def456789",
            "quilt:modone:abc123def456789",
        ];
        let expected = find_hash_collisions(&ids(&base)).unwrap();
        assert_eq!(expected.len(), 1);

        // Every rotation and the reversal give the same report
        for shift in 0..base.len() {
            let mut rotated = base.to_vec();
            rotated.rotate_left(shift);
            assert_eq!(find_hash_collisions(&ids(&rotated)).unwrap(), expected);
            rotated.reverse();
            assert_eq!(find_hash_collisions(&ids(&rotated)).unwrap(), expected);
        }
    }

    #[test]
    fn test_generics_are_distinct_and_stable() {
        let identifiers = ids(&[
            "fabric:sodium:0123456789abcde",
            "fabric:sodium:111111111111111",
            "forge:jei:abc123def456789",
            "fabric:sodium:222222222222222",
        ]);
        assert_eq!(
            generic_identifiers(&identifiers).unwrap(),
            vec!["fabric:sodium", "forge:jei"]
        );
        assert_eq!(
            generic_identifiers(&identifiers).unwrap(),
            generic_identifiers(&identifiers).unwrap()
        );
    }

    #[test]
    fn test_malformed_identifier_is_shape_error() {
        let identifiers = ids(&["fabric:sodium"]);
        assert!(matches!(
            analyze_identifiers(&identifiers),
            Err(ValidationError::IdentifierShape { .. })
        ));
    }

    #[test]
    fn test_empty_index() {
        assert!(analyze_identifiers(&[]).unwrap().is_empty());
    }
}
