//! Content loader.
//!
//! Reads `content.ron` (a [`ContentDef`]) and parses every declared unique string
//! into a [`Unique`] that remembers which object declared it. The returned vector is
//! the backing store the unique maps borrow from.

use std::fs;
use std::path::Path;

use log::{info, warn};
use unique_data::{ContentDef, validate_content};

use super::{LoadError, check_validation};
use crate::unique::Unique;
use crate::unique_type::UniqueTarget;

/// Load and validate a content definition from a RON file.
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid RON, or fails validation.
pub fn load_content_def(ron_path: &Path) -> Result<ContentDef, LoadError> {
    let text = fs::read_to_string(ron_path).map_err(|source| LoadError::Read {
        path: ron_path.to_path_buf(),
        source,
    })?;
    parse_content(&text, ron_path)
}

/// Load a content file and parse all of its uniques.
///
/// # Errors
/// See [`load_content_def`]. Unique parsing itself never fails.
pub fn load_content(ron_path: &Path) -> Result<Vec<Unique>, LoadError> {
    let def = load_content_def(ron_path)?;
    let uniques = build_uniques(&def);
    info!(
        "{} uniques parsed from {} objects in '{}'",
        uniques.len(),
        def.objects.len(),
        ron_path.display()
    );
    Ok(uniques)
}

/// Parse every unique declared in `def`, in object then declaration order.
pub fn build_uniques(def: &ContentDef) -> Vec<Unique> {
    let mut uniques = Vec::new();
    for object in &def.objects {
        let kind = UniqueTarget::from_key(&object.kind);
        if kind.is_none() {
            warn!(
                "unknown object kind '{}' for '{}'; its uniques keep no source kind",
                object.kind, object.name
            );
        }
        for text in &object.uniques {
            uniques.push(Unique::from_source(text.as_str(), kind, Some(object.name.clone())));
        }
    }
    uniques
}

fn parse_content(text: &str, ron_path: &Path) -> Result<ContentDef, LoadError> {
    let def: ContentDef = ron::from_str(text).map_err(|source| LoadError::Ron {
        path: ron_path.to_path_buf(),
        source,
    })?;
    check_validation(ron_path.to_path_buf(), validate_content(&def))?;
    Ok(def)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unique_type::UniqueType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONTENT: &str = r#"(
    objects: [
        (
            kind: "Building",
            name: "Market",
            uniques: ["[+2 Gold] [in this city]", "[+25]% [Gold] [in this city]"],
        ),
        (
            kind: "Wonder",
            name: "Colossus",
            uniques: ["Does something mysterious <when at war>"],
        ),
    ],
)"#;

    #[test]
    fn loads_and_parses_content() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CONTENT.as_bytes()).unwrap();
        let uniques = load_content(file.path()).unwrap();
        assert_eq!(uniques.len(), 3);
        assert!(uniques[0].is_of_type(UniqueType::StatsPerCity));
        assert!(uniques[1].is_of_type(UniqueType::StatPercentBonusCities));
        let source = uniques[0].source().unwrap();
        assert_eq!(source.kind, Some(UniqueTarget::Building));
        assert_eq!(source.name.as_deref(), Some("Market"));
    }

    #[test]
    fn unknown_kind_keeps_name_only() {
        let def = parse_content(CONTENT, Path::new("content.ron")).unwrap();
        let uniques = build_uniques(&def);
        let source = uniques[2].source().unwrap();
        assert_eq!(source.kind, None);
        assert_eq!(source.name.as_deref(), Some("Colossus"));
        assert_eq!(uniques[2].unique_type(), None);
    }

    #[test]
    fn blank_unique_fails_validation() {
        let text = r#"(objects: [(kind: "Policy", name: "Honor", uniques: [" "])])"#;
        let err = parse_content(text, Path::new("content.ron")).unwrap_err();
        assert!(matches!(err, LoadError::Invalid { .. }));
    }

    #[test]
    fn malformed_ron_is_a_parse_error() {
        let err = parse_content("(objects: [", Path::new("content.ron")).unwrap_err();
        assert!(matches!(err, LoadError::Ron { .. }));
    }
}
