//! Time-boxed uniques.
//!
//! A `TemporaryUnique` only stores the unique text and a turn counter. The turn
//! loop that owns it decrements `turns_left` and drops it at zero; the parsed
//! unique is rebuilt from the text on first use and is never serialized.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::unique::Unique;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemporaryUnique {
    pub unique: String,
    pub turns_left: i32,
    #[serde(skip)]
    parsed: OnceLock<Unique>,
}

impl TemporaryUnique {
    pub fn new(unique: &Unique, turns: i32) -> Self {
        Self {
            unique: unique.text().to_string(),
            turns_left: turns,
            parsed: OnceLock::new(),
        }
    }

    /// The wrapped unique, parsed from the stored text on first access.
    pub fn unique_object(&self) -> &Unique {
        self.parsed.get_or_init(|| Unique::new(self.unique.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unique_type::UniqueType;

    #[test]
    fn stores_text_and_turns() {
        let source = Unique::new("[+10]% Strength <when attacking>");
        let mut temporary = TemporaryUnique::new(&source, 3);
        assert_eq!(temporary.unique, "[+10]% Strength <when attacking>");
        temporary.turns_left -= 1;
        assert_eq!(temporary.turns_left, 2);
        assert!(temporary.unique_object().is_of_type(UniqueType::Strength));
        assert_eq!(temporary.unique_object().conditionals().len(), 1);
    }

    #[test]
    fn reparses_after_deserialization() {
        let temporary = TemporaryUnique::new(&Unique::new("[+2 Food]"), 5);
        let json = serde_json::to_string(&temporary).expect("serialize");
        assert!(!json.contains("parsed"));
        let restored: TemporaryUnique = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored.turns_left, 5);
        assert_eq!(restored.unique_object().stats().food, 2.0);
    }
}
