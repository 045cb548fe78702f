use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use super::{StatRecord, StatsRecorder};
use crate::combatant::CombatantId;
use crate::error::BattleError;

/// Process-local stats, for tests and offline CLI runs.
#[derive(Default)]
pub struct InMemoryStats {
    records: Mutex<HashMap<CombatantId, StatRecord>>,
    failing: Mutex<HashSet<CombatantId>>,
}

impl InMemoryStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: CombatantId) -> StatRecord {
        self.records.lock().await.get(&id).copied().unwrap_or_default()
    }

    /// Make every subsequent write for `id` fail with `StatsPersistence`.
    pub async fn fail_for(&self, id: CombatantId) {
        self.failing.lock().await.insert(id);
    }

    async fn bump(&self, id: CombatantId, won: bool) -> Result<(), BattleError> {
        if self.failing.lock().await.contains(&id) {
            return Err(BattleError::StatsPersistence(format!(
                "stats store rejected write for {}",
                id
            )));
        }
        let mut records = self.records.lock().await;
        let record = records.entry(id).or_default();
        record.battles += 1;
        if won {
            record.wins += 1;
        }
        info!(
            "Updated stats for combatant {}: battles={} wins={}",
            id, record.battles, record.wins
        );
        Ok(())
    }
}

#[async_trait]
impl StatsRecorder for InMemoryStats {
    async fn record_win(&self, id: CombatantId) -> Result<(), BattleError> {
        self.bump(id, true).await
    }

    async fn record_loss(&self, id: CombatantId) -> Result<(), BattleError> {
        self.bump(id, false).await
    }
}
