//! conditionals.rs -- evaluating `<conditional>` clauses
//!
//! Each condition kind maps to a plain predicate `fn(&Unique, &StateForConditionals) -> bool`
//! held in a [`ConditionalRegistry`]. A predicate reads only the snapshot fields it needs
//! and returns false whenever one of them is missing, a parameter does not parse, or a
//! named era is unknown. Kinds without a registered predicate, and conditionals that
//! matched no kind at all, are false.

use std::collections::HashMap;

use lazy_static::lazy_static;
use log::debug;

use crate::state::{City, Civilization, StateForConditionals, Tile, WATER_MAP_CONTINENT};
use crate::unique::Unique;
use crate::unique_type::UniqueType;

/// Predicate deciding one condition kind.
pub type ConditionPredicate = fn(&Unique, &StateForConditionals<'_>) -> bool;

lazy_static! {
    static ref STANDARD: ConditionalRegistry = ConditionalRegistry::standard();
}

/// The registry holding every built-in condition kind.
pub fn standard_registry() -> &'static ConditionalRegistry {
    &STANDARD
}

/// Condition kind -> predicate table.
#[derive(Debug, Clone, Default)]
pub struct ConditionalRegistry {
    predicates: HashMap<UniqueType, ConditionPredicate>,
}

impl ConditionalRegistry {
    /// A registry with no predicates; every condition evaluates false.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry with every built-in condition kind registered.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(UniqueType::ConditionalWar, at_war);
        registry.register(UniqueType::ConditionalNotWar, not_at_war);
        registry.register(UniqueType::ConditionalHappy, happy);
        registry.register(UniqueType::ConditionalBetweenHappiness, between_happiness);
        registry.register(UniqueType::ConditionalBelowHappiness, below_happiness);
        registry.register(UniqueType::ConditionalGoldenAge, golden_age);
        registry.register(UniqueType::ConditionalBeforeEra, before_era);
        registry.register(UniqueType::ConditionalStartingFromEra, starting_from_era);
        registry.register(UniqueType::ConditionalDuringEra, during_era);
        registry.register(UniqueType::ConditionalTech, has_tech);
        registry.register(UniqueType::ConditionalNoTech, lacks_tech);
        registry.register(UniqueType::ConditionalPolicy, has_policy);
        registry.register(UniqueType::ConditionalNoPolicy, lacks_policy);
        registry.register(UniqueType::ConditionalSpecialistCount, specialist_count);
        registry.register(UniqueType::ConditionalFollowerCount, follower_count);
        registry.register(UniqueType::ConditionalWhenGarrisoned, garrisoned);
        registry.register(UniqueType::ConditionalVsCity, vs_city);
        registry.register(UniqueType::ConditionalVsUnits, vs_units);
        registry.register(UniqueType::ConditionalOurUnit, our_unit);
        registry.register(UniqueType::ConditionalVsLargerCiv, vs_larger_civ);
        registry.register(UniqueType::ConditionalAttacking, attacking);
        registry.register(UniqueType::ConditionalDefending, defending);
        registry.register(UniqueType::ConditionalAboveHP, above_hp);
        registry.register(UniqueType::ConditionalBelowHP, below_hp);
        registry.register(UniqueType::ConditionalInTiles, in_tiles);
        registry.register(UniqueType::ConditionalInTilesAnd, in_tiles_and);
        registry.register(UniqueType::ConditionalFightingInTiles, fighting_in_tiles);
        registry.register(UniqueType::ConditionalForeignContinent, foreign_continent);
        registry.register(UniqueType::ConditionalAdjacentUnit, adjacent_unit);
        registry.register(UniqueType::ConditionalNeighborTiles, neighbor_tiles);
        registry.register(UniqueType::ConditionalNeighborTilesAnd, neighbor_tiles_and);
        registry.register(UniqueType::ConditionalOnWaterMaps, on_water_maps);
        registry.register(UniqueType::ConditionalInRegionOfType, in_region_of_type);
        registry.register(UniqueType::ConditionalInRegionExceptOfType, in_region_except_of_type);
        registry
    }

    /// Register (or replace) the predicate for a condition kind.
    pub fn register(&mut self, kind: UniqueType, predicate: ConditionPredicate) {
        self.predicates.insert(kind, predicate);
    }

    pub fn is_registered(&self, kind: UniqueType) -> bool {
        self.predicates.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Decide a single conditional against `state`.
    pub fn evaluate(&self, condition: &Unique, state: &StateForConditionals<'_>) -> bool {
        let Some(kind) = condition.unique_type() else {
            return false;
        };
        match self.predicates.get(&kind) {
            Some(predicate) => predicate(condition, state),
            None => {
                debug!("no predicate registered for condition kind {kind}");
                false
            },
        }
    }
}

//
// Parameter and snapshot helpers
//

fn int_param(condition: &Unique, index: usize) -> Option<i32> {
    condition.params().get(index)?.trim().parse().ok()
}

fn str_param(condition: &Unique, index: usize) -> Option<&str> {
    condition.params().get(index).map(String::as_str)
}

fn check_civ(state: &StateForConditionals<'_>, predicate: impl FnOnce(&dyn Civilization) -> bool) -> bool {
    state.civ.is_some_and(predicate)
}

fn check_city(state: &StateForConditionals<'_>, predicate: impl FnOnce(&dyn City) -> bool) -> bool {
    state.city.is_some_and(predicate)
}

/// Compare the civ's era ordinal with the ordinal of the era named by the first parameter.
fn compare_era(condition: &Unique, state: &StateForConditionals<'_>, compare: fn(i32, i32) -> bool) -> bool {
    check_civ(state, |civ| {
        str_param(condition, 0)
            .and_then(|era| civ.ruleset().era_number(era))
            .is_some_and(|era_number| compare(civ.era_number(), era_number))
    })
}

fn count_neighbors_in_range(
    condition: &Unique,
    state: &StateForConditionals<'_>,
    matches: impl Fn(&dyn Tile, Option<&dyn Civilization>) -> bool,
) -> bool {
    let (Some(low), Some(high)) = (int_param(condition, 0), int_param(condition, 1)) else {
        return false;
    };
    check_city(state, |city| {
        let count = city
            .center_tile()
            .neighbors()
            .into_iter()
            .filter(|tile| matches(*tile, state.civ))
            .count();
        i32::try_from(count).is_ok_and(|count| (low..=high).contains(&count))
    })
}

//
// Civilization state
//

fn at_war(_: &Unique, state: &StateForConditionals<'_>) -> bool {
    check_civ(state, |civ| civ.is_at_war())
}

fn not_at_war(_: &Unique, state: &StateForConditionals<'_>) -> bool {
    check_civ(state, |civ| !civ.is_at_war())
}

fn happy(_: &Unique, state: &StateForConditionals<'_>) -> bool {
    check_civ(state, |civ| civ.happiness() >= 0)
}

fn between_happiness(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    let (Some(low), Some(high)) = (int_param(condition, 0), int_param(condition, 1)) else {
        return false;
    };
    check_civ(state, |civ| (low..high).contains(&civ.happiness()))
}

fn below_happiness(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    int_param(condition, 0).is_some_and(|limit| check_civ(state, |civ| civ.happiness() < limit))
}

fn golden_age(_: &Unique, state: &StateForConditionals<'_>) -> bool {
    check_civ(state, |civ| civ.is_golden_age())
}

fn before_era(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    compare_era(condition, state, |ours, era| ours < era)
}

fn starting_from_era(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    compare_era(condition, state, |ours, era| ours >= era)
}

fn during_era(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    compare_era(condition, state, |ours, era| ours == era)
}

fn has_tech(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    str_param(condition, 0).is_some_and(|tech| check_civ(state, |civ| civ.is_researched(tech)))
}

fn lacks_tech(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    str_param(condition, 0).is_some_and(|tech| check_civ(state, |civ| !civ.is_researched(tech)))
}

fn has_policy(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    str_param(condition, 0).is_some_and(|policy| check_civ(state, |civ| civ.is_adopted(policy)))
}

fn lacks_policy(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    str_param(condition, 0).is_some_and(|policy| check_civ(state, |civ| !civ.is_adopted(policy)))
}

//
// City state
//

fn specialist_count(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    int_param(condition, 0).is_some_and(|min| check_city(state, |city| city.specialist_count() >= min))
}

fn follower_count(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    int_param(condition, 0).is_some_and(|min| check_city(state, |city| city.majority_religion_followers() >= min))
}

fn garrisoned(_: &Unique, state: &StateForConditionals<'_>) -> bool {
    check_city(state, |city| {
        city.center_tile()
            .military_unit()
            .is_some_and(|unit| unit.can_garrison())
    })
}

//
// Combat
//

fn vs_city(_: &Unique, state: &StateForConditionals<'_>) -> bool {
    state
        .their_combatant
        .is_some_and(|theirs| theirs.matches_category("City"))
}

fn vs_units(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    str_param(condition, 0).is_some_and(|filter| {
        state
            .their_combatant
            .is_some_and(|theirs| theirs.matches_category(filter))
    })
}

fn our_unit(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    str_param(condition, 0).is_some_and(|filter| {
        state.our_combatant.is_some_and(|ours| ours.matches_category(filter))
            || state.unit.is_some_and(|unit| unit.matches_filter(filter))
    })
}

fn vs_larger_civ(_: &Unique, state: &StateForConditionals<'_>) -> bool {
    let Some(theirs) = state.their_combatant else {
        return false;
    };
    check_civ(state, |civ| civ.city_count() < theirs.civ().city_count())
}

fn attacking(_: &Unique, state: &StateForConditionals<'_>) -> bool {
    state.combat_action.is_some_and(|action| action.is_attack())
}

fn defending(_: &Unique, state: &StateForConditionals<'_>) -> bool {
    state.combat_action.is_some_and(|action| action.is_defend())
}

fn above_hp(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    int_param(condition, 0).is_some_and(|hp| state.our_combatant.is_some_and(|ours| ours.health() > hp))
}

fn below_hp(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    int_param(condition, 0).is_some_and(|hp| state.our_combatant.is_some_and(|ours| ours.health() < hp))
}

//
// Tiles and terrain
//

fn in_tiles(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    str_param(condition, 0).is_some_and(|filter| {
        state
            .relevant_tile()
            .is_some_and(|tile| tile.matches_filter(filter, state.civ))
    })
}

fn in_tiles_and(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    let (Some(first), Some(second)) = (str_param(condition, 0), str_param(condition, 1)) else {
        return false;
    };
    state
        .relevant_tile()
        .is_some_and(|tile| tile.matches_filter(first, state.civ) && tile.matches_filter(second, state.civ))
}

fn fighting_in_tiles(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    str_param(condition, 0).is_some_and(|filter| {
        state
            .attacked_tile
            .is_some_and(|tile| tile.matches_filter(filter, state.civ))
    })
}

// A civ without cities counts every continent as foreign; one with cities but no capital has no home continent.
fn foreign_continent(_: &Unique, state: &StateForConditionals<'_>) -> bool {
    let Some(unit) = state.unit else {
        return false;
    };
    check_civ(state, |civ| {
        civ.city_count() == 0
            || civ
                .capital_continent()
                .is_some_and(|home| home != unit.tile().continent())
    })
}

fn adjacent_unit(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    let (Some(filter), Some(civ), Some(tile)) = (str_param(condition, 0), state.civ, state.relevant_tile()) else {
        return false;
    };
    tile.neighbors().into_iter().any(|neighbor| {
        neighbor
            .military_unit()
            .is_some_and(|unit| unit.owner() == civ.name() && unit.matches_filter(filter))
    })
}

fn neighbor_tiles(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    let Some(filter) = str_param(condition, 2) else {
        return false;
    };
    count_neighbors_in_range(condition, state, |tile, civ| tile.matches_filter(filter, civ))
}

fn neighbor_tiles_and(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    let (Some(first), Some(second)) = (str_param(condition, 2), str_param(condition, 3)) else {
        return false;
    };
    count_neighbors_in_range(condition, state, |tile, civ| {
        tile.matches_filter(first, civ) && tile.matches_filter(second, civ)
    })
}

//
// Map regions
//

fn on_water_maps(_: &Unique, state: &StateForConditionals<'_>) -> bool {
    state
        .region
        .is_some_and(|region| region.continent_id == WATER_MAP_CONTINENT)
}

fn in_region_of_type(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    str_param(condition, 0).is_some_and(|region_type| state.region.is_some_and(|r| r.region_type == region_type))
}

fn in_region_except_of_type(condition: &Unique, state: &StateForConditionals<'_>) -> bool {
    str_param(condition, 0).is_some_and(|region_type| state.region.is_some_and(|r| r.region_type != region_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CombatAction, Region};

    fn condition(text: &str) -> Unique {
        Unique::conditional(text)
    }

    #[test]
    fn standard_registry_covers_every_condition_kind() {
        let registry = standard_registry();
        for kind in UniqueType::ALL {
            assert_eq!(registry.is_registered(kind), kind.is_conditional(), "{kind}");
        }
    }

    #[test]
    fn unmatched_condition_is_false() {
        let state = StateForConditionals::new();
        assert!(!standard_registry().evaluate(&condition("when the moon is full"), &state));
    }

    #[test]
    fn empty_registry_rejects_everything() {
        let registry = ConditionalRegistry::empty();
        let state = StateForConditionals {
            combat_action: Some(CombatAction::Attack),
            ..StateForConditionals::new()
        };
        assert!(!registry.evaluate(&condition("when attacking"), &state));
        assert!(standard_registry().evaluate(&condition("when attacking"), &state));
    }

    #[test]
    fn custom_predicate_can_replace_builtin() {
        let mut registry = ConditionalRegistry::standard();
        registry.register(UniqueType::ConditionalOnWaterMaps, |_, _| true);
        let state = StateForConditionals::new();
        assert!(registry.evaluate(&condition("on water maps"), &state));
        assert!(!standard_registry().evaluate(&condition("on water maps"), &state));
    }

    #[test]
    fn combat_phase_conditions() {
        let attack = StateForConditionals {
            combat_action: Some(CombatAction::Attack),
            ..StateForConditionals::new()
        };
        let defend = StateForConditionals {
            combat_action: Some(CombatAction::Defend),
            ..StateForConditionals::new()
        };
        let none = StateForConditionals::new();
        let attacking = condition("when attacking");
        let defending = condition("when defending");
        assert!(standard_registry().evaluate(&attacking, &attack));
        assert!(!standard_registry().evaluate(&attacking, &defend));
        assert!(!standard_registry().evaluate(&attacking, &none));
        assert!(standard_registry().evaluate(&defending, &defend));
        assert!(!standard_registry().evaluate(&defending, &none));
    }

    #[test]
    fn region_conditions() {
        let water = Region::new("Jungle", WATER_MAP_CONTINENT);
        let land = Region::new("Desert", 3);
        let registry = standard_registry();
        let on_water = condition("on water maps");
        let in_desert = condition("in [Desert] Regions");
        let not_desert = condition("in all except [Desert] Regions");

        let state = StateForConditionals::new().with_region(&water);
        assert!(registry.evaluate(&on_water, &state));
        assert!(!registry.evaluate(&in_desert, &state));
        assert!(registry.evaluate(&not_desert, &state));

        let state = StateForConditionals::new().with_region(&land);
        assert!(!registry.evaluate(&on_water, &state));
        assert!(registry.evaluate(&in_desert, &state));
        assert!(!registry.evaluate(&not_desert, &state));

        let state = StateForConditionals::new();
        assert!(!registry.evaluate(&on_water, &state));
        assert!(!registry.evaluate(&in_desert, &state));
        assert!(!registry.evaluate(&not_desert, &state));
    }

    #[test]
    fn unparsable_amounts_fail_closed() {
        assert_eq!(int_param(&condition("when below [+5] HP"), 0), Some(5));
        assert_eq!(int_param(&condition("when below [five] HP"), 0), None);
        assert_eq!(int_param(&condition("when below [5] HP"), 3), None);
    }
}
