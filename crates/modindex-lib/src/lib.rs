//! Validation of the mod index repository.
//!
//! The index document lists every known build as a `modloader:modname:hash` identifier;
//! each distinct `modloader:modname` pair has its own manifest document. This crate checks
//! both kinds of document against their field grammars, rejects hash collisions between
//! unrelated projects, and fetches and validates every manifest under a concurrency bound.

pub mod api;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod validation;

pub use api::{FetchError, FetchGateway, RepositoryGateway};
pub use error::ValidationError;
pub use models::{FullIdentifier, IndexDocument, ManifestDocument};
pub use pipeline::{
    run_validation, FailurePolicy, ProgressReporter, SilentProgressReporter, ValidationStage,
    ValidationSummary, ValidatorConfig,
};
