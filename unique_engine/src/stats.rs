//! Stats Module
//!
//! Yield bundles declared inline in unique parameters, e.g. `+1 Gold, +2 Food`.

use std::fmt;
use std::ops::{Add, AddAssign};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

const STAT_NAMES: &str = "Production|Food|Gold|Science|Culture|Happiness|Faith";

lazy_static! {
    static ref STAT_TERM: Regex =
        Regex::new(&format!(r"([+-])(\d+(?:\.\d+)?) ({STAT_NAMES})")).expect("static regex");
    static ref ENTIRE_STATS: Regex = Regex::new(&format!(
        r"^[+-]\d+(?:\.\d+)? (?:{STAT_NAMES})(?:, [+-]\d+(?:\.\d+)? (?:{STAT_NAMES}))*$"
    ))
    .expect("static regex");
}

/// One of the seven yields a stats token can name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Production,
    Food,
    Gold,
    Science,
    Culture,
    Happiness,
    Faith,
}

impl Stat {
    pub const ALL: [Stat; 7] = [
        Stat::Production,
        Stat::Food,
        Stat::Gold,
        Stat::Science,
        Stat::Culture,
        Stat::Happiness,
        Stat::Faith,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stat::Production => "Production",
            Stat::Food => "Food",
            Stat::Gold => "Gold",
            Stat::Science => "Science",
            Stat::Culture => "Culture",
            Stat::Happiness => "Happiness",
            Stat::Faith => "Faith",
        }
    }

    pub fn from_name(name: &str) -> Option<Stat> {
        Self::ALL.into_iter().find(|stat| stat.as_str() == name)
    }
}

/// A bundle of yields. The default bundle is all zeroes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub production: f32,
    pub food: f32,
    pub gold: f32,
    pub science: f32,
    pub culture: f32,
    pub happiness: f32,
    pub faith: f32,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `text` is a complete stats token such as `+1 Gold, -2 Food`.
    pub fn is_stats(text: &str) -> bool {
        ENTIRE_STATS.is_match(text)
    }

    /// Parse a stats token. Terms that do not look like `+N Stat` are skipped,
    /// so text rejected by [`Stats::is_stats`] yields whatever terms it did contain.
    pub fn parse(text: &str) -> Stats {
        let mut stats = Stats::new();
        for caps in STAT_TERM.captures_iter(text) {
            let Ok(amount) = caps[2].parse::<f32>() else {
                continue;
            };
            let amount = if &caps[1] == "-" { -amount } else { amount };
            if let Some(stat) = Stat::from_name(&caps[3]) {
                stats.add_stat(stat, amount);
            }
        }
        stats
    }

    pub fn get(&self, stat: Stat) -> f32 {
        match stat {
            Stat::Production => self.production,
            Stat::Food => self.food,
            Stat::Gold => self.gold,
            Stat::Science => self.science,
            Stat::Culture => self.culture,
            Stat::Happiness => self.happiness,
            Stat::Faith => self.faith,
        }
    }

    pub fn add_stat(&mut self, stat: Stat, amount: f32) {
        let slot = match stat {
            Stat::Production => &mut self.production,
            Stat::Food => &mut self.food,
            Stat::Gold => &mut self.gold,
            Stat::Science => &mut self.science,
            Stat::Culture => &mut self.culture,
            Stat::Happiness => &mut self.happiness,
            Stat::Faith => &mut self.faith,
        };
        *slot += amount;
    }

    /// Multiply every yield by `factor`.
    pub fn times(&self, factor: f32) -> Stats {
        let mut scaled = Stats::new();
        for stat in Stat::ALL {
            scaled.add_stat(stat, self.get(stat) * factor);
        }
        scaled
    }

    pub fn is_empty(&self) -> bool {
        Stat::ALL.iter().all(|stat| self.get(*stat) == 0.0)
    }

    /// Non-zero yields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Stat, f32)> + '_ {
        Stat::ALL
            .into_iter()
            .map(|stat| (stat, self.get(stat)))
            .filter(|(_, amount)| *amount != 0.0)
    }
}

impl Add for Stats {
    type Output = Stats;

    fn add(mut self, rhs: Stats) -> Stats {
        self += rhs;
        self
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, rhs: Stats) {
        for stat in Stat::ALL {
            self.add_stat(stat, rhs.get(stat));
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<String> = self
            .iter()
            .map(|(stat, amount)| {
                let sign = if amount > 0.0 { "+" } else { "-" };
                format!("{sign}{} {}", amount.abs(), stat.as_str())
            })
            .collect();
        write!(f, "{}", terms.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_stats_tokens() {
        assert!(Stats::is_stats("+1 Gold"));
        assert!(Stats::is_stats("+1 Gold, -2 Food, +0.5 Science"));
        assert!(!Stats::is_stats("1 Gold"));
        assert!(!Stats::is_stats("+1 Gold,+2 Food"));
        assert!(!Stats::is_stats("+1 Mana"));
        assert!(!Stats::is_stats("in this city"));
    }

    #[test]
    fn parses_signed_amounts() {
        let stats = Stats::parse("+3 Culture, -1 Happiness, +1 Culture");
        assert_eq!(stats.culture, 4.0);
        assert_eq!(stats.happiness, -1.0);
        assert_eq!(stats.gold, 0.0);
    }

    #[test]
    fn garbage_parses_to_empty_bundle() {
        assert!(Stats::parse("lots of gold").is_empty());
    }

    #[test]
    fn display_lists_nonzero_yields() {
        let stats = Stats::parse("+2 Food, -1 Gold");
        assert_eq!(stats.to_string(), "+2 Food, -1 Gold");
        assert_eq!((stats + stats.times(2.0)).food, 6.0);
    }
}
