//! Loader utilities for reading ruleset and content files.
//!
//! The ruleset is TOML-backed, content objects and their uniques are RON-backed.
//! Both are validated after deserialization and all problems are reported together.

pub mod content;
pub mod ruleset;

pub use content::{build_uniques, load_content, load_content_def};
pub use ruleset::load_ruleset;

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use unique_data::ValidationError;

/// Reasons a ruleset or content file could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parsing TOML from '{path}'")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("parsing RON from '{path}'")]
    Ron {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("validation of '{path}' failed:\n{details}")]
    Invalid { path: PathBuf, details: String },
}

/// Fold validation errors into a single `LoadError`, or pass if there are none.
fn check_validation(path: PathBuf, errors: Vec<ValidationError>) -> Result<(), LoadError> {
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    Err(LoadError::Invalid { path, details })
}
