//! Ruleset loader.
//!
//! Reads `ruleset.toml` into a [`RulesetDef`], validates it and converts it into the
//! runtime [`Ruleset`] used for era lookups.

use std::fs;
use std::path::Path;

use log::info;
use unique_data::{RulesetDef, validate_ruleset};

use super::{LoadError, check_validation};
use crate::ruleset::Ruleset;

/// Load and validate a ruleset from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid TOML, or fails validation.
pub fn load_ruleset(toml_path: &Path) -> Result<Ruleset, LoadError> {
    let text = fs::read_to_string(toml_path).map_err(|source| LoadError::Read {
        path: toml_path.to_path_buf(),
        source,
    })?;
    let def = parse_ruleset(&text, toml_path)?;
    let ruleset = Ruleset::from(&def);
    info!(
        "ruleset '{}' loaded from '{}' ({} eras, {} techs, {} policies)",
        ruleset.name,
        toml_path.display(),
        ruleset.eras.len(),
        ruleset.techs.len(),
        ruleset.policies.len()
    );
    Ok(ruleset)
}

fn parse_ruleset(text: &str, toml_path: &Path) -> Result<RulesetDef, LoadError> {
    let def: RulesetDef = toml::from_str(text).map_err(|source| LoadError::Toml {
        path: toml_path.to_path_buf(),
        source,
    })?;
    check_validation(toml_path.to_path_buf(), validate_ruleset(&def))?;
    Ok(def)
}
