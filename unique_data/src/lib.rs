//! Shared data model for ruleset and content files.

pub mod defs;
pub mod validate;

pub use defs::*;
pub use validate::{ValidationError, validate_content, validate_ruleset};
