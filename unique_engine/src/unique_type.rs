//! unique_type.rs -- the effect catalog
//!
//! Every unique the engine understands is a `UniqueType`. Each type declares its
//! authoring text (with named slots such as `[amount]`), where it may be declared,
//! and a small set of behavior flags. The placeholder pattern used for matching is
//! derived from the authoring text, so `"[stats] [cityFilter]"` matches `"[] []"`.

use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::placeholder::placeholder_text;

/// Kinds of game object that can declare a unique.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UniqueTarget {
    Global,
    Nation,
    Era,
    Tech,
    Policy,
    Belief,
    Building,
    Unit,
    UnitType,
    Promotion,
    Terrain,
    Improvement,
    Resource,
    Ruins,
    Triggerable,
    Conditional,
}

impl UniqueTarget {
    pub const ALL: [UniqueTarget; 16] = [
        UniqueTarget::Global,
        UniqueTarget::Nation,
        UniqueTarget::Era,
        UniqueTarget::Tech,
        UniqueTarget::Policy,
        UniqueTarget::Belief,
        UniqueTarget::Building,
        UniqueTarget::Unit,
        UniqueTarget::UnitType,
        UniqueTarget::Promotion,
        UniqueTarget::Terrain,
        UniqueTarget::Improvement,
        UniqueTarget::Resource,
        UniqueTarget::Ruins,
        UniqueTarget::Triggerable,
        UniqueTarget::Conditional,
    ];

    pub fn as_key(self) -> &'static str {
        match self {
            UniqueTarget::Global => "Global",
            UniqueTarget::Nation => "Nation",
            UniqueTarget::Era => "Era",
            UniqueTarget::Tech => "Tech",
            UniqueTarget::Policy => "Policy",
            UniqueTarget::Belief => "Belief",
            UniqueTarget::Building => "Building",
            UniqueTarget::Unit => "Unit",
            UniqueTarget::UnitType => "UnitType",
            UniqueTarget::Promotion => "Promotion",
            UniqueTarget::Terrain => "Terrain",
            UniqueTarget::Improvement => "Improvement",
            UniqueTarget::Resource => "Resource",
            UniqueTarget::Ruins => "Ruins",
            UniqueTarget::Triggerable => "Triggerable",
            UniqueTarget::Conditional => "Conditional",
        }
    }

    /// Case-insensitive lookup of a content object kind.
    pub fn from_key(key: &str) -> Option<UniqueTarget> {
        let key = key.trim();
        Self::ALL.into_iter().find(|t| t.as_key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for UniqueTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Behavior flags attached to catalog entries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UniqueFlag {
    /// Never shown in player-facing descriptions.
    HiddenToUsers,
    /// Contributes on every turn while it applies (yields, healing).
    AppliesPerTurn,
    /// Fires once when triggered rather than applying continuously.
    TriggeredAction,
}

/// Which half of the catalog a text is matched against.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UniqueContext {
    Effect,
    Conditional,
}

/// Static description of one catalog entry.
#[derive(Copy, Clone, Debug)]
pub struct UniqueDefinition {
    pub text: &'static str,
    pub targets: &'static [UniqueTarget],
    pub flags: &'static [UniqueFlag],
}

const fn def(
    text: &'static str,
    targets: &'static [UniqueTarget],
    flags: &'static [UniqueFlag],
) -> UniqueDefinition {
    UniqueDefinition { text, targets, flags }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UniqueType {
    // Yields
    Stats,
    StatsPerCity,
    StatsFromTiles,
    StatsPerPopulation,
    StatPercentBonus,
    StatPercentBonusCities,

    // Units and combat
    Strength,
    Movement,
    Sight,
    HealInTiles,
    HealAdjacentUnits,
    FreeUnitMaintenance,

    // Civilization-wide
    GoldenAgeLength,
    HiddenFromCivilopedia,
    Unbuildable,

    // One-time triggered
    OneTimeFreeUnit,
    OneTimeAmountFreeUnits,
    OneTimeFreeTech,
    OneTimeFreePolicy,
    OneTimeEnterGoldenAge,
    OneTimeGainStat,
    OneTimeRevealEntireMap,

    // Conditionals
    ConditionalWar,
    ConditionalNotWar,
    ConditionalHappy,
    ConditionalBetweenHappiness,
    ConditionalBelowHappiness,
    ConditionalGoldenAge,
    ConditionalBeforeEra,
    ConditionalStartingFromEra,
    ConditionalDuringEra,
    ConditionalTech,
    ConditionalNoTech,
    ConditionalPolicy,
    ConditionalNoPolicy,
    ConditionalSpecialistCount,
    ConditionalFollowerCount,
    ConditionalWhenGarrisoned,
    ConditionalVsCity,
    ConditionalVsUnits,
    ConditionalOurUnit,
    ConditionalVsLargerCiv,
    ConditionalAttacking,
    ConditionalDefending,
    ConditionalAboveHP,
    ConditionalBelowHP,
    ConditionalInTiles,
    ConditionalInTilesAnd,
    ConditionalFightingInTiles,
    ConditionalForeignContinent,
    ConditionalAdjacentUnit,
    ConditionalNeighborTiles,
    ConditionalNeighborTilesAnd,
    ConditionalOnWaterMaps,
    ConditionalInRegionOfType,
    ConditionalInRegionExceptOfType,
}

impl UniqueType {
    pub const ALL: [UniqueType; 56] = [
        UniqueType::Stats,
        UniqueType::StatsPerCity,
        UniqueType::StatsFromTiles,
        UniqueType::StatsPerPopulation,
        UniqueType::StatPercentBonus,
        UniqueType::StatPercentBonusCities,
        UniqueType::Strength,
        UniqueType::Movement,
        UniqueType::Sight,
        UniqueType::HealInTiles,
        UniqueType::HealAdjacentUnits,
        UniqueType::FreeUnitMaintenance,
        UniqueType::GoldenAgeLength,
        UniqueType::HiddenFromCivilopedia,
        UniqueType::Unbuildable,
        UniqueType::OneTimeFreeUnit,
        UniqueType::OneTimeAmountFreeUnits,
        UniqueType::OneTimeFreeTech,
        UniqueType::OneTimeFreePolicy,
        UniqueType::OneTimeEnterGoldenAge,
        UniqueType::OneTimeGainStat,
        UniqueType::OneTimeRevealEntireMap,
        UniqueType::ConditionalWar,
        UniqueType::ConditionalNotWar,
        UniqueType::ConditionalHappy,
        UniqueType::ConditionalBetweenHappiness,
        UniqueType::ConditionalBelowHappiness,
        UniqueType::ConditionalGoldenAge,
        UniqueType::ConditionalBeforeEra,
        UniqueType::ConditionalStartingFromEra,
        UniqueType::ConditionalDuringEra,
        UniqueType::ConditionalTech,
        UniqueType::ConditionalNoTech,
        UniqueType::ConditionalPolicy,
        UniqueType::ConditionalNoPolicy,
        UniqueType::ConditionalSpecialistCount,
        UniqueType::ConditionalFollowerCount,
        UniqueType::ConditionalWhenGarrisoned,
        UniqueType::ConditionalVsCity,
        UniqueType::ConditionalVsUnits,
        UniqueType::ConditionalOurUnit,
        UniqueType::ConditionalVsLargerCiv,
        UniqueType::ConditionalAttacking,
        UniqueType::ConditionalDefending,
        UniqueType::ConditionalAboveHP,
        UniqueType::ConditionalBelowHP,
        UniqueType::ConditionalInTiles,
        UniqueType::ConditionalInTilesAnd,
        UniqueType::ConditionalFightingInTiles,
        UniqueType::ConditionalForeignContinent,
        UniqueType::ConditionalAdjacentUnit,
        UniqueType::ConditionalNeighborTiles,
        UniqueType::ConditionalNeighborTilesAnd,
        UniqueType::ConditionalOnWaterMaps,
        UniqueType::ConditionalInRegionOfType,
        UniqueType::ConditionalInRegionExceptOfType,
    ];

    #[rustfmt::skip]
    pub fn definition(self) -> UniqueDefinition {
        use UniqueFlag::{AppliesPerTurn, HiddenToUsers, TriggeredAction};
        use UniqueTarget::{
            Belief, Building, Conditional, Global, Improvement, Nation, Policy, Promotion, Resource, Ruins, Terrain,
            Triggerable, Unit, UnitType,
        };
        const COND: &[UniqueTarget] = &[Conditional];
        const ONE_TIME: &[UniqueTarget] = &[Triggerable, Ruins];

        match self {
            Self::Stats => def("[stats]", &[Global, Building, Policy, Belief, Terrain, Improvement, Resource], &[AppliesPerTurn]),
            Self::StatsPerCity => def("[stats] [cityFilter]", &[Global, Nation, Building, Policy, Belief], &[AppliesPerTurn]),
            Self::StatsFromTiles => def("[stats] from [tileFilter] tiles [cityFilter]", &[Global, Building, Policy], &[AppliesPerTurn]),
            Self::StatsPerPopulation => def("[stats] per [amount] population [cityFilter]", &[Global, Building, Policy], &[AppliesPerTurn]),
            Self::StatPercentBonus => def("[amount]% [stat]", &[Global, Building, Policy], &[]),
            Self::StatPercentBonusCities => def("[amount]% [stat] [cityFilter]", &[Global, Building, Policy], &[]),

            Self::Strength => def("[amount]% Strength", &[Global, Nation, Unit, UnitType, Promotion], &[]),
            Self::Movement => def("[amount] Movement", &[Global, Unit, UnitType, Promotion], &[]),
            Self::Sight => def("[amount] Sight", &[Global, Unit, UnitType, Promotion, Terrain], &[]),
            Self::HealInTiles => def("[amount] HP when healing in [tileFilter] tiles", &[Unit, Promotion], &[AppliesPerTurn]),
            Self::HealAdjacentUnits => def("All adjacent units heal [amount] HP when healing", &[Unit, Promotion], &[AppliesPerTurn]),
            Self::FreeUnitMaintenance => def("[amount] units cost no maintenance", &[Global, Policy], &[]),

            Self::GoldenAgeLength => def("[amount]% Golden Age length", &[Global, Nation, Policy], &[]),
            Self::HiddenFromCivilopedia => def("Will not be displayed in Civilopedia", &[Building, Unit, Terrain, Improvement, Resource], &[HiddenToUsers]),
            Self::Unbuildable => def("Unbuildable", &[Building, Unit, Improvement], &[]),

            Self::OneTimeFreeUnit => def("Free [baseUnitFilter] appears", ONE_TIME, &[TriggeredAction]),
            Self::OneTimeAmountFreeUnits => def("[amount] free [baseUnitFilter] units appear", ONE_TIME, &[TriggeredAction]),
            Self::OneTimeFreeTech => def("Free Technology", ONE_TIME, &[TriggeredAction]),
            Self::OneTimeFreePolicy => def("Free Social Policy", ONE_TIME, &[TriggeredAction]),
            Self::OneTimeEnterGoldenAge => def("Empire enters golden age", ONE_TIME, &[TriggeredAction]),
            Self::OneTimeGainStat => def("Gain [amount] [stat]", ONE_TIME, &[TriggeredAction]),
            Self::OneTimeRevealEntireMap => def("Reveals the entire map", ONE_TIME, &[TriggeredAction]),

            Self::ConditionalWar => def("when at war", COND, &[]),
            Self::ConditionalNotWar => def("when not at war", COND, &[]),
            Self::ConditionalHappy => def("while the empire is happy", COND, &[]),
            Self::ConditionalBetweenHappiness => def("when between [amount] and [amount] Happiness", COND, &[]),
            Self::ConditionalBelowHappiness => def("when below [amount] Happiness", COND, &[]),
            Self::ConditionalGoldenAge => def("during a Golden Age", COND, &[]),
            Self::ConditionalBeforeEra => def("before the [era]", COND, &[]),
            Self::ConditionalStartingFromEra => def("starting from the [era]", COND, &[]),
            Self::ConditionalDuringEra => def("during the [era]", COND, &[]),
            Self::ConditionalTech => def("after discovering [tech]", COND, &[]),
            Self::ConditionalNoTech => def("before discovering [tech]", COND, &[]),
            Self::ConditionalPolicy => def("after adopting [policy]", COND, &[]),
            Self::ConditionalNoPolicy => def("before adopting [policy]", COND, &[]),
            Self::ConditionalSpecialistCount => def("if this city has at least [amount] specialists", COND, &[]),
            Self::ConditionalFollowerCount => def("in cities where this religion has at least [amount] followers", COND, &[]),
            Self::ConditionalWhenGarrisoned => def("with a garrison", COND, &[]),
            Self::ConditionalVsCity => def("vs cities", COND, &[]),
            Self::ConditionalVsUnits => def("vs [mapUnitFilter] units", COND, &[]),
            Self::ConditionalOurUnit => def("for [mapUnitFilter] units", COND, &[]),
            Self::ConditionalVsLargerCiv => def("when fighting units from a Civilization with more Cities than you", COND, &[]),
            Self::ConditionalAttacking => def("when attacking", COND, &[]),
            Self::ConditionalDefending => def("when defending", COND, &[]),
            Self::ConditionalAboveHP => def("when above [amount] HP", COND, &[]),
            Self::ConditionalBelowHP => def("when below [amount] HP", COND, &[]),
            Self::ConditionalInTiles => def("in [tileFilter] tiles", COND, &[]),
            Self::ConditionalInTilesAnd => def("in [tileFilter] [tileFilter] tiles", COND, &[]),
            Self::ConditionalFightingInTiles => def("when fighting in [tileFilter] tiles", COND, &[]),
            Self::ConditionalForeignContinent => def("on a foreign continent", COND, &[]),
            Self::ConditionalAdjacentUnit => def("when adjacent to a [mapUnitFilter] unit", COND, &[]),
            Self::ConditionalNeighborTiles => def("with [amount] to [amount] neighboring [tileFilter] tiles", COND, &[]),
            Self::ConditionalNeighborTilesAnd => def("with [amount] to [amount] neighboring [tileFilter] [tileFilter] tiles", COND, &[]),
            Self::ConditionalOnWaterMaps => def("on water maps", COND, &[]),
            Self::ConditionalInRegionOfType => def("in [regionType] Regions", COND, &[]),
            Self::ConditionalInRegionExceptOfType => def("in all except [regionType] Regions", COND, &[]),
        }
    }

    /// Authoring text with named slots, e.g. `"[stats] [cityFilter]"`.
    pub fn text(self) -> &'static str {
        self.definition().text
    }

    /// Canonical placeholder pattern this type is matched by, e.g. `"[] []"`.
    pub fn placeholder_text(self) -> String {
        placeholder_text(self.text())
    }

    pub fn targets(self) -> &'static [UniqueTarget] {
        self.definition().targets
    }

    pub fn flags(self) -> &'static [UniqueFlag] {
        self.definition().flags
    }

    pub fn has_flag(self, flag: UniqueFlag) -> bool {
        self.flags().contains(&flag)
    }

    pub fn is_conditional(self) -> bool {
        self.targets().contains(&UniqueTarget::Conditional)
    }

    /// Look up the type whose placeholder pattern is exactly `pattern` within one half of the catalog.
    pub fn from_placeholder(pattern: &str, context: UniqueContext) -> Option<UniqueType> {
        let table = match context {
            UniqueContext::Effect => &*EFFECT_PATTERNS,
            UniqueContext::Conditional => &*CONDITIONAL_PATTERNS,
        };
        table.get(pattern).copied()
    }
}

impl fmt::Display for UniqueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

lazy_static! {
    static ref EFFECT_PATTERNS: HashMap<String, UniqueType> = pattern_table(false);
    static ref CONDITIONAL_PATTERNS: HashMap<String, UniqueType> = pattern_table(true);
}

// first declared type wins on a duplicate pattern
fn pattern_table(conditional: bool) -> HashMap<String, UniqueType> {
    let mut table = HashMap::new();
    for unique_type in UniqueType::ALL {
        if unique_type.is_conditional() == conditional {
            table.entry(unique_type.placeholder_text()).or_insert(unique_type);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_type_is_found_by_its_own_pattern() {
        for unique_type in UniqueType::ALL {
            let context = if unique_type.is_conditional() {
                UniqueContext::Conditional
            } else {
                UniqueContext::Effect
            };
            assert_eq!(
                UniqueType::from_placeholder(&unique_type.placeholder_text(), context),
                Some(unique_type),
                "pattern collision for {unique_type}"
            );
        }
    }

    #[test]
    fn all_lists_each_variant_once() {
        let distinct: HashSet<_> = UniqueType::ALL.iter().collect();
        assert_eq!(distinct.len(), UniqueType::ALL.len());
    }

    #[test]
    fn effect_and_conditional_halves_do_not_overlap() {
        assert_eq!(UniqueType::from_placeholder("when at war", UniqueContext::Effect), None);
        assert_eq!(UniqueType::from_placeholder("[]", UniqueContext::Conditional), None);
        assert_eq!(
            UniqueType::from_placeholder("[]", UniqueContext::Effect),
            Some(UniqueType::Stats)
        );
    }

    #[test]
    fn derived_patterns_blank_named_slots() {
        assert_eq!(UniqueType::StatsPerCity.placeholder_text(), "[] []");
        assert_eq!(
            UniqueType::ConditionalNeighborTiles.placeholder_text(),
            "with [] to [] neighboring [] tiles"
        );
    }

    #[test]
    fn flags_and_target_keys() {
        assert!(UniqueType::OneTimeFreeTech.has_flag(UniqueFlag::TriggeredAction));
        assert!(!UniqueType::Strength.has_flag(UniqueFlag::AppliesPerTurn));
        assert_eq!(UniqueTarget::from_key("building"), Some(UniqueTarget::Building));
        assert_eq!(UniqueTarget::from_key("Spaceship"), None);
    }
}
