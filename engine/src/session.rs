use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::combatant::Combatant;
use crate::error::BattleError;
use crate::roster::{Roster, RosterSnapshot, RosterState};

/// One logical battle table. Independent sessions never contend; calls on
/// the same session are serialized through its roster lock.
#[derive(Debug, Default)]
pub struct BattleSession {
    roster: Mutex<Roster>,
}

impl BattleSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn stage(&self, combatant: impl Into<Arc<Combatant>>) -> Result<(), BattleError> {
        self.roster.lock().await.stage(combatant.into())
    }

    pub async fn combatants(&self) -> Vec<Arc<Combatant>> {
        self.roster.lock().await.combatants().to_vec()
    }

    pub async fn clear(&self) {
        self.roster.lock().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.roster.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.roster.lock().await.is_empty()
    }

    pub async fn state(&self) -> RosterState {
        self.roster.lock().await.state()
    }

    /// Copy out both combatants and release the lock straight away.
    pub(crate) async fn snapshot(&self) -> Result<RosterSnapshot, BattleError> {
        self.roster.lock().await.snapshot()
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, Roster> {
        self.roster.lock().await
    }
}
