#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const UNIQUE_ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod conditionals;
pub mod data_paths;
pub mod loader;
pub mod placeholder;
pub mod report;
pub mod ruleset;
pub mod state;
pub mod stats;
pub mod temporary;
pub mod unique;
pub mod unique_map;
pub mod unique_type;

// Re-exports for convenience
pub use conditionals::{ConditionalRegistry, standard_registry};
pub use loader::{LoadError, load_content, load_ruleset};
pub use ruleset::Ruleset;
pub use state::{CombatAction, Region, StateForConditionals};
pub use stats::Stats;
pub use temporary::TemporaryUnique;
pub use unique::Unique;
pub use unique_map::{UniqueMap, UniqueMapTyped};
pub use unique_type::{UniqueFlag, UniqueTarget, UniqueType};
