//! Unique Module
//!
//! A `Unique` is one parsed effect statement such as
//! `"[+1 Gold] [in this city] <after discovering [Currency]>"`.
//!
//! Parsing happens once, at construction:
//! - the main clause (conditionals stripped) gives the placeholder pattern and parameters
//! - the pattern is looked up in the effect half of the catalog
//! - each `<conditional>` is parsed the same way into a nested `Unique`, looked up in
//!   the conditional half of the catalog
//!
//! Construction never fails. Text that matches nothing is kept with no type and does nothing.

use std::fmt;
use std::sync::OnceLock;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::conditionals::{ConditionalRegistry, standard_registry};
use crate::placeholder::{clause_parts, split_conditionals};
use crate::state::{City, Civilization, StateForConditionals};
use crate::stats::Stats;
use crate::unique_type::{UniqueContext, UniqueFlag, UniqueTarget, UniqueType};

/// Parameter marking an effect that applies only to the declaring city.
pub const LOCAL_EFFECT_PARAM: &str = "in this city";
/// Parameter marking an effect that applies to every city except the declaring one.
pub const ANTI_LOCAL_EFFECT_PARAM: &str = "in other cities";

/// Which game object declared a unique. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePlacement {
    pub kind: Option<UniqueTarget>,
    pub name: Option<String>,
}

impl fmt::Display for SourcePlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.name) {
            (Some(kind), Some(name)) => write!(f, "{kind} '{name}'"),
            (Some(kind), None) => write!(f, "{kind}"),
            (None, Some(name)) => write!(f, "'{name}'"),
            (None, None) => write!(f, "unknown source"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Unique {
    text: String,
    source: Option<SourcePlacement>,
    placeholder_text: String,
    params: Vec<String>,
    unique_type: Option<UniqueType>,
    conditionals: Vec<Unique>,
    all_params: Vec<String>,
    is_local_effect: bool,
    is_anti_local_effect: bool,
    stats: OnceLock<Stats>,
}

impl Unique {
    /// Parse an effect unique with no recorded source.
    pub fn new(text: impl Into<String>) -> Self {
        Self::parse(text.into(), None, UniqueContext::Effect)
    }

    /// Parse an effect unique declared by a named game object.
    pub fn from_source(text: impl Into<String>, kind: Option<UniqueTarget>, name: Option<String>) -> Self {
        let source = (kind.is_some() || name.is_some()).then_some(SourcePlacement { kind, name });
        Self::parse(text.into(), source, UniqueContext::Effect)
    }

    /// Parse text as a conditional clause (without its angle brackets).
    pub fn conditional(text: impl Into<String>) -> Self {
        Self::parse(text.into(), None, UniqueContext::Conditional)
    }

    fn parse(text: String, source: Option<SourcePlacement>, context: UniqueContext) -> Self {
        let (main_clause, condition_texts) = split_conditionals(&text);
        let (placeholder_text, params) = clause_parts(&main_clause);
        let unique_type = UniqueType::from_placeholder(&placeholder_text, context);
        if unique_type.is_none() {
            debug!("unrecognized {context:?} unique \"{text}\" (pattern \"{placeholder_text}\")");
        }

        let conditionals: Vec<Unique> = condition_texts
            .into_iter()
            .map(|condition| Self::parse(condition, None, UniqueContext::Conditional))
            .collect();

        let all_params = params
            .iter()
            .chain(conditionals.iter().flat_map(|c| c.params.iter()))
            .cloned()
            .collect();
        let is_local_effect = params.iter().any(|p| p == LOCAL_EFFECT_PARAM);
        let is_anti_local_effect = params.iter().any(|p| p == ANTI_LOCAL_EFFECT_PARAM);

        Self {
            text,
            source,
            placeholder_text,
            params,
            unique_type,
            conditionals,
            all_params,
            is_local_effect,
            is_anti_local_effect,
            stats: OnceLock::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> Option<&SourcePlacement> {
        self.source.as_ref()
    }

    pub fn placeholder_text(&self) -> &str {
        &self.placeholder_text
    }

    /// Parameters of the main clause, in order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Main parameters followed by the parameters of every conditional.
    pub fn all_params(&self) -> &[String] {
        &self.all_params
    }

    pub fn unique_type(&self) -> Option<UniqueType> {
        self.unique_type
    }

    pub fn conditionals(&self) -> &[Unique] {
        &self.conditionals
    }

    pub fn is_local_effect(&self) -> bool {
        self.is_local_effect
    }

    pub fn is_anti_local_effect(&self) -> bool {
        self.is_anti_local_effect
    }

    /// Stats from the first stats-shaped parameter, or an empty bundle if there is none.
    pub fn stats(&self) -> &Stats {
        self.stats.get_or_init(|| {
            self.params
                .iter()
                .find(|param| Stats::is_stats(param))
                .map_or_else(Stats::new, |param| Stats::parse(param))
        })
    }

    pub fn has_flag(&self, flag: UniqueFlag) -> bool {
        self.unique_type.is_some_and(|t| t.has_flag(flag))
    }

    pub fn is_of_type(&self, unique_type: UniqueType) -> bool {
        self.unique_type == Some(unique_type)
    }

    /// True when every conditional holds in `state`.
    ///
    /// `None` means no context is available at all: only a unique without
    /// conditionals applies then.
    pub fn conditionals_apply(&self, state: Option<&StateForConditionals<'_>>) -> bool {
        self.conditionals_apply_with(standard_registry(), state)
    }

    /// Same as [`Unique::conditionals_apply`], evaluating against a caller-supplied registry.
    pub fn conditionals_apply_with(
        &self,
        registry: &ConditionalRegistry,
        state: Option<&StateForConditionals<'_>>,
    ) -> bool {
        let Some(state) = state else {
            return self.conditionals.is_empty();
        };
        self.conditionals
            .iter()
            .all(|condition| registry.evaluate(condition, state))
    }

    /// Shorthand for evaluating with only a civilization and city known.
    pub fn conditionals_apply_for(&self, civ: Option<&dyn Civilization>, city: Option<&dyn City>) -> bool {
        self.conditionals_apply(Some(&StateForConditionals::for_civ_and_city(civ, city)))
    }
}

impl fmt::Display for Unique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unique_type {
            Some(unique_type) => write!(f, "{unique_type} (\"{}\")", self.text),
            None => write!(f, "\"{}\"", self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_type_params_and_conditionals() {
        let unique = Unique::new("[+1 Gold] [in this city] <after discovering [Currency]> <when at war>");
        assert_eq!(unique.placeholder_text(), "[] []");
        assert_eq!(unique.params(), ["+1 Gold", "in this city"]);
        assert_eq!(unique.unique_type(), Some(UniqueType::StatsPerCity));
        assert_eq!(unique.conditionals().len(), 2);
        assert!(unique.conditionals()[0].is_of_type(UniqueType::ConditionalTech));
        assert_eq!(unique.conditionals()[0].params(), ["Currency"]);
        assert!(unique.conditionals()[1].is_of_type(UniqueType::ConditionalWar));
        assert_eq!(unique.all_params(), ["+1 Gold", "in this city", "Currency"]);
    }

    #[test]
    fn local_effect_flags_come_from_main_params() {
        let local = Unique::new("[+1 Gold] [in this city]");
        assert!(local.is_local_effect());
        assert!(!local.is_anti_local_effect());

        let anti = Unique::new("[+1 Gold] [in other cities]");
        assert!(!anti.is_local_effect());
        assert!(anti.is_anti_local_effect());

        // a conditional parameter does not make the effect local
        let conditional_only = Unique::new("[+1 Gold] <in [in this city] tiles>");
        assert!(!conditional_only.is_local_effect());
    }

    #[test]
    fn unrecognized_text_is_inert() {
        let unique = Unique::new("Makes the tea [hot]");
        assert_eq!(unique.unique_type(), None);
        assert!(!unique.has_flag(UniqueFlag::HiddenToUsers));
        assert!(!unique.has_flag(UniqueFlag::AppliesPerTurn));
        assert!(!unique.has_flag(UniqueFlag::TriggeredAction));
        assert!(unique.conditionals_apply(Some(&StateForConditionals::new())));
        assert!(unique.stats().is_empty());
        assert_eq!(unique.to_string(), "\"Makes the tea [hot]\"");
    }

    #[test]
    fn conditional_text_does_not_match_effects() {
        // "[+10]% Strength" as a conditional is not a condition kind
        let unique = Unique::new("[+1 Gold] <[+10]% Strength>");
        assert_eq!(unique.conditionals()[0].unique_type(), None);
        assert!(!unique.conditionals_apply(Some(&StateForConditionals::new())));
    }

    #[test]
    fn stats_come_from_first_stats_param() {
        let unique = Unique::new("[+2 Food, +1 Production] from [Grassland] tiles [in all cities]");
        assert_eq!(unique.stats().food, 2.0);
        assert_eq!(unique.stats().production, 1.0);
        // cached
        assert!(std::ptr::eq(unique.stats(), unique.stats()));
    }

    #[test]
    fn null_state_passes_only_without_conditionals() {
        assert!(Unique::new("[+1 Gold]").conditionals_apply(None));
        assert!(!Unique::new("[+1 Gold] <when at war>").conditionals_apply(None));
        assert!(!Unique::new("[+1 Gold] <nonsense condition>").conditionals_apply(None));
    }

    #[test]
    fn source_placement_is_recorded() {
        let unique = Unique::from_source("[+1 Culture]", Some(UniqueTarget::Building), Some("Monument".into()));
        let source = unique.source().expect("source recorded");
        assert_eq!(source.to_string(), "Building 'Monument'");
        assert!(Unique::from_source("[+1 Culture]", None, None).source().is_none());
        assert_eq!(unique.to_string(), "Stats (\"[+1 Culture]\")");
    }
}
