//! state.rs -- the context a conditional is evaluated in
//!
//! The engine does not own any game simulation. Civilizations, cities, units,
//! combatants and tiles are reached through the narrow traits below, and a
//! [`StateForConditionals`] bundles whichever of them are relevant to one query.
//! Every field is optional and no field implies another is present.

use std::fmt;

use serde::{Deserialize, Serialize};
use variantly::Variantly;

use crate::ruleset::Ruleset;

/// Continent id carried by a region on a map that is all water.
pub const WATER_MAP_CONTINENT: i32 = -1;

/// Which side of a fight the evaluation is for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Variantly)]
pub enum CombatAction {
    Attack,
    Defend,
}

/// A map region as described by map generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub region_type: String,
    pub continent_id: i32,
}

impl Region {
    pub fn new(region_type: impl Into<String>, continent_id: i32) -> Self {
        Self {
            region_type: region_type.into(),
            continent_id,
        }
    }
}

/// Read access to a civilization.
pub trait Civilization {
    fn name(&self) -> &str;
    fn ruleset(&self) -> &Ruleset;
    fn is_at_war(&self) -> bool;
    /// Happiness projected for next turn.
    fn happiness(&self) -> i32;
    fn is_golden_age(&self) -> bool;
    fn era_number(&self) -> i32;
    fn is_researched(&self, tech: &str) -> bool;
    fn is_adopted(&self, policy: &str) -> bool;
    fn city_count(&self) -> usize;
    /// Continent of the capital's center tile, `None` without a capital.
    fn capital_continent(&self) -> Option<i32>;
}

/// Read access to a city.
pub trait City {
    fn name(&self) -> &str;
    fn specialist_count(&self) -> i32;
    fn majority_religion_followers(&self) -> i32;
    fn center_tile(&self) -> &dyn Tile;
}

/// Read access to a map tile.
pub trait Tile {
    fn matches_filter(&self, filter: &str, civ: Option<&dyn Civilization>) -> bool;
    fn continent(&self) -> i32;
    fn neighbors(&self) -> Vec<&dyn Tile>;
    fn military_unit(&self) -> Option<&dyn MapUnit>;
}

/// Read access to a unit on the map.
pub trait MapUnit {
    /// Name of the owning civilization.
    fn owner(&self) -> &str;
    fn matches_filter(&self, filter: &str) -> bool;
    fn can_garrison(&self) -> bool;
    fn tile(&self) -> &dyn Tile;
}

/// One side of a fight: a unit or a city.
pub trait Combatant {
    fn matches_category(&self, category: &str) -> bool;
    fn health(&self) -> i32;
    fn civ(&self) -> &dyn Civilization;
}

/// Read-only snapshot of "whose and what" an evaluation is about.
#[derive(Clone, Copy, Default)]
pub struct StateForConditionals<'a> {
    pub civ: Option<&'a dyn Civilization>,
    pub city: Option<&'a dyn City>,
    pub our_combatant: Option<&'a dyn Combatant>,
    pub their_combatant: Option<&'a dyn Combatant>,
    pub unit: Option<&'a dyn MapUnit>,
    pub attacked_tile: Option<&'a dyn Tile>,
    pub combat_action: Option<CombatAction>,
    pub region: Option<&'a Region>,
}

impl<'a> StateForConditionals<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_civ_and_city(civ: Option<&'a dyn Civilization>, city: Option<&'a dyn City>) -> Self {
        Self {
            civ,
            city,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_civ(mut self, civ: &'a dyn Civilization) -> Self {
        self.civ = Some(civ);
        self
    }

    #[must_use]
    pub fn with_city(mut self, city: &'a dyn City) -> Self {
        self.city = Some(city);
        self
    }

    /// Set both combatants and the side we are on.
    #[must_use]
    pub fn with_combat(
        mut self,
        ours: &'a dyn Combatant,
        theirs: Option<&'a dyn Combatant>,
        action: CombatAction,
    ) -> Self {
        self.our_combatant = Some(ours);
        self.their_combatant = theirs;
        self.combat_action = Some(action);
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: &'a dyn MapUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    #[must_use]
    pub fn with_attacked_tile(mut self, tile: &'a dyn Tile) -> Self {
        self.attacked_tile = Some(tile);
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: &'a Region) -> Self {
        self.region = Some(region);
        self
    }

    /// The tile under attack if there is one, else the tile the unit stands on.
    pub fn relevant_tile(&self) -> Option<&'a dyn Tile> {
        self.attacked_tile.or_else(|| self.unit.map(MapUnit::tile))
    }
}

impl fmt::Debug for StateForConditionals<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateForConditionals")
            .field("civ", &self.civ.map(Civilization::name))
            .field("city", &self.city.map(City::name))
            .field("our_combatant", &self.our_combatant.is_some())
            .field("their_combatant", &self.their_combatant.is_some())
            .field("unit", &self.unit.map(MapUnit::owner))
            .field("attacked_tile", &self.attacked_tile.is_some())
            .field("combat_action", &self.combat_action)
            .field("region", &self.region)
            .finish()
    }
}
