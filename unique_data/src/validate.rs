use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::*;

/// Validation error for malformed ruleset or content definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateName { kind: &'static str, name: String },
    DuplicateEraNumber { number: i32, first: String, second: String },
    EmptyName { kind: &'static str, context: String },
    EmptyUnique { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateName { kind, name } => {
                write!(f, "duplicate {kind} '{name}'")
            },
            ValidationError::DuplicateEraNumber { number, first, second } => {
                write!(f, "eras '{first}' and '{second}' share era number {number}")
            },
            ValidationError::EmptyName { kind, context } => {
                write!(f, "empty {kind} name ({context})")
            },
            ValidationError::EmptyUnique { context } => {
                write!(f, "empty unique text ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate names and era ordinals in a `RulesetDef`.
///
/// ```
/// use unique_data::{EraDef, RulesetDef, validate_ruleset};
///
/// let ruleset = RulesetDef {
///     name: "Demo".into(),
///     eras: vec![
///         EraDef { name: "Ancient era".into(), era_number: 0 },
///         EraDef { name: "Classical era".into(), era_number: 1 },
///     ],
///     techs: vec!["Bronze Working".into()],
///     policies: Vec::new(),
/// };
/// assert!(validate_ruleset(&ruleset).is_empty());
/// ```
pub fn validate_ruleset(ruleset: &RulesetDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut era_names = HashSet::new();
    let mut era_numbers: HashMap<i32, &str> = HashMap::new();
    for era in &ruleset.eras {
        if era.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName {
                kind: "era",
                context: format!("era number {}", era.era_number),
            });
            continue;
        }
        if !era_names.insert(era.name.as_str()) {
            errors.push(ValidationError::DuplicateName {
                kind: "era",
                name: era.name.clone(),
            });
        }
        if let Some(first) = era_numbers.insert(era.era_number, era.name.as_str()) {
            errors.push(ValidationError::DuplicateEraNumber {
                number: era.era_number,
                first: first.to_string(),
                second: era.name.clone(),
            });
        }
    }

    track_names("tech", ruleset.techs.iter().map(String::as_str), &mut errors);
    track_names("policy", ruleset.policies.iter().map(String::as_str), &mut errors);

    errors
}

/// Validate object names and unique strings in a `ContentDef`.
///
/// Unknown object kinds are not an error here; the engine decides what it recognizes.
///
/// ```
/// use unique_data::{ContentDef, ContentObjectDef, validate_content};
///
/// let content = ContentDef {
///     objects: vec![ContentObjectDef::new("Building", "Granary", vec!["[+2 Food]".into()])],
/// };
/// assert!(validate_content(&content).is_empty());
/// ```
pub fn validate_content(content: &ContentDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for object in &content.objects {
        if object.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName {
                kind: "object",
                context: format!("kind '{}'", object.kind),
            });
            continue;
        }
        if !seen.insert((object.kind.as_str(), object.name.as_str())) {
            errors.push(ValidationError::DuplicateName {
                kind: "object",
                name: format!("{}:{}", object.kind, object.name),
            });
        }
        for (index, unique) in object.uniques.iter().enumerate() {
            if unique.trim().is_empty() {
                errors.push(ValidationError::EmptyUnique {
                    context: format!("{} '{}' unique #{index}", object.kind, object.name),
                });
            }
        }
    }

    errors
}

fn track_names<'a>(kind: &'static str, names: impl Iterator<Item = &'a str>, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyName {
                kind,
                context: format!("{kind} list"),
            });
        } else if !seen.insert(name) {
            errors.push(ValidationError::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn era(name: &str, era_number: i32) -> EraDef {
        EraDef {
            name: name.into(),
            era_number,
        }
    }

    #[test]
    fn duplicate_era_names_and_numbers_are_reported() {
        let ruleset = RulesetDef {
            name: "r".into(),
            eras: vec![era("Ancient era", 0), era("Ancient era", 1), era("Classical era", 1)],
            ..RulesetDef::default()
        };
        let errors = validate_ruleset(&ruleset);
        assert!(errors.contains(&ValidationError::DuplicateName {
            kind: "era",
            name: "Ancient era".into()
        }));
        assert!(errors.contains(&ValidationError::DuplicateEraNumber {
            number: 1,
            first: "Ancient era".into(),
            second: "Classical era".into()
        }));
    }

    #[test]
    fn duplicate_techs_are_reported() {
        let ruleset = RulesetDef {
            name: "r".into(),
            techs: vec!["Writing".into(), "Writing".into(), " ".into()],
            ..RulesetDef::default()
        };
        let errors = validate_ruleset(&ruleset);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn content_with_blank_unique_is_reported() {
        let content = ContentDef {
            objects: vec![
                ContentObjectDef::new("Policy", "Tradition", vec!["[+3 Culture]".into(), "  ".into()]),
                ContentObjectDef::new("Policy", "Tradition", Vec::new()),
            ],
        };
        let errors = validate_content(&content);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].to_string().contains("unique #1"));
        assert!(matches!(errors[1], ValidationError::DuplicateName { kind: "object", .. }));
    }
}
