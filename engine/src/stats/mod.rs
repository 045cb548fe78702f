//! Win/loss bookkeeping collaborators.

mod memory;
mod sqlite;

pub use memory::InMemoryStats;
pub use sqlite::SqliteMealStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::combatant::CombatantId;
use crate::error::BattleError;

/// Cumulative per-combatant counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRecord {
    pub battles: u64,
    pub wins: u64,
}

impl StatRecord {
    pub fn win_pct(&self) -> f64 {
        if self.battles == 0 {
            0.0
        } else {
            self.wins as f64 / self.battles as f64 * 100.0
        }
    }
}

/// Persists the outcome of a battle for each participant.
///
/// The resolver calls each method exactly once per participant per resolved
/// battle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRecorder: Send + Sync {
    /// battles += 1, wins += 1
    async fn record_win(&self, id: CombatantId) -> Result<(), BattleError>;
    /// battles += 1
    async fn record_loss(&self, id: CombatantId) -> Result<(), BattleError>;
}
