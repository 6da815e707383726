pub mod identifier;
pub mod index;
pub mod manifest;

pub use identifier::*;
pub use index::*;
pub use manifest::*;
