pub mod grammar;
pub mod identifiers;
pub mod rules;

pub use grammar::Grammar;
pub use identifiers::{
    analyze_identifiers, find_hash_collisions, generic_identifiers, HashCollision,
};
pub use rules::{index_rules, manifest_rules, validate_index, validate_manifest, FieldCheck};
