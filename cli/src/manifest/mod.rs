//! Project manifest access and in-place patching.

pub mod document;
pub mod error;
pub mod patch;

pub use document::{DependencySection, Manifest};
pub use error::ManifestError;
pub use patch::patch_string_field;
