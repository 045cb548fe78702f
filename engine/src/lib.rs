//! Two-combatant battle resolution: score both staged records, draw once,
//! pick a winner weighted by the score gap, and record wins and losses.

pub mod combatant;
pub mod error;
pub mod random;
pub mod resolver;
pub mod roster;
pub mod scoring;
pub mod session;
pub mod stats;

pub use combatant::{Combatant, CombatantId, Difficulty};
pub use error::BattleError;
pub use random::{FixedDraw, RandomOrgClient, RandomOrgConfig, RandomnessSource, SeededDraws};
pub use resolver::{decide, win_probability, BattleOutcome, BattleResolver, Side, SCALING_CONSTANT};
pub use roster::{Roster, RosterState, MAX_COMBATANTS};
pub use scoring::{difficulty_modifier, score};
pub use session::BattleSession;
pub use stats::{InMemoryStats, SqliteMealStore, StatRecord, StatsRecorder};
