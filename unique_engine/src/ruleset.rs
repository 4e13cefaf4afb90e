//! Runtime ruleset lookups used while evaluating conditionals.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use unique_data::RulesetDef;

/// A named era and its ordinal rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Era {
    pub name: String,
    pub era_number: i32,
}

/// The slice of the ruleset the conditional evaluator reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ruleset {
    pub name: String,
    pub eras: HashMap<String, Era>,
    pub techs: HashSet<String>,
    pub policies: HashSet<String>,
}

impl Ruleset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style era registration, mostly for tests and tools.
    #[must_use]
    pub fn with_era(mut self, name: &str, era_number: i32) -> Self {
        self.add_era(name, era_number);
        self
    }

    pub fn add_era(&mut self, name: &str, era_number: i32) {
        self.eras.insert(
            name.to_string(),
            Era {
                name: name.to_string(),
                era_number,
            },
        );
    }

    /// Ordinal rank of the named era, if the ruleset knows it.
    pub fn era_number(&self, name: &str) -> Option<i32> {
        self.eras.get(name).map(|era| era.era_number)
    }

    pub fn has_tech(&self, name: &str) -> bool {
        self.techs.contains(name)
    }

    pub fn has_policy(&self, name: &str) -> bool {
        self.policies.contains(name)
    }
}

impl From<&RulesetDef> for Ruleset {
    fn from(def: &RulesetDef) -> Self {
        let mut ruleset = Ruleset::new(def.name.clone());
        for era in &def.eras {
            ruleset.add_era(&era.name, era.era_number);
        }
        ruleset.techs = def.techs.iter().cloned().collect();
        ruleset.policies = def.policies.iter().cloned().collect();
        ruleset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unique_data::EraDef;

    #[test]
    fn converts_from_definition() {
        let def = RulesetDef {
            name: "Civ V".into(),
            eras: vec![
                EraDef {
                    name: "Ancient era".into(),
                    era_number: 0,
                },
                EraDef {
                    name: "Medieval era".into(),
                    era_number: 2,
                },
            ],
            techs: vec!["Currency".into()],
            policies: vec!["Tradition".into()],
        };
        let ruleset = Ruleset::from(&def);
        assert_eq!(ruleset.era_number("Medieval era"), Some(2));
        assert_eq!(ruleset.era_number("Future era"), None);
        assert!(ruleset.has_tech("Currency"));
        assert!(ruleset.has_policy("Tradition"));
        assert!(!ruleset.has_policy("Honor"));
    }
}
