use serde::{Deserialize, Serialize};

/// Ruleset-level data loaded before any content is parsed.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RulesetDef {
    pub name: String,
    #[serde(default)]
    pub eras: Vec<EraDef>,
    #[serde(default)]
    pub techs: Vec<String>,
    #[serde(default)]
    pub policies: Vec<String>,
}

/// A named era and its ordinal rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EraDef {
    pub name: String,
    pub era_number: i32,
}

/// Top-level content file: every object that declares uniques.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContentDef {
    #[serde(default)]
    pub objects: Vec<ContentObjectDef>,
}

/// A single game object (building, policy, unit...) and its raw unique strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentObjectDef {
    /// Kind of object, e.g. "Building" or "Policy".
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub uniques: Vec<String>,
}

impl ContentObjectDef {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, uniques: Vec<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            uniques,
        }
    }
}
