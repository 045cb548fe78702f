use std::sync::Arc;

use tracing::{info, warn};

use crate::combatant::{Combatant, CombatantId};
use crate::error::BattleError;

pub const MAX_COMBATANTS: usize = 2;

/// Where a roster sits in the battle lifecycle, derived from its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterState {
    Empty,
    Staging,
    Ready,
}

/// Bounded, ordered holding area for at most two staged combatants.
///
/// Every mutation bumps `generation`, which lets a resolver detect that the
/// roster changed between its snapshot and the moment it applies the result.
#[derive(Debug, Default)]
pub struct Roster {
    combatants: Vec<Arc<Combatant>>,
    generation: u64,
}

/// The two combatants read for a resolution, tagged with the roster
/// generation they were read at.
#[derive(Debug, Clone)]
pub struct RosterSnapshot {
    pub first: Arc<Combatant>,
    pub second: Arc<Combatant>,
    pub generation: u64,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&mut self, combatant: Arc<Combatant>) -> Result<(), BattleError> {
        if self.combatants.len() >= MAX_COMBATANTS {
            warn!("Attempted to add combatant '{}' but list is full", combatant.name());
            return Err(BattleError::RosterFull);
        }
        if self.contains(combatant.id()) {
            warn!("Combatant {} is already staged", combatant.id());
            return Err(BattleError::DuplicateCombatant(combatant.id()));
        }
        info!("Adding combatant '{}' to combatants list", combatant.name());
        self.combatants.push(combatant);
        self.generation += 1;
        Ok(())
    }

    pub fn combatants(&self) -> &[Arc<Combatant>] {
        &self.combatants
    }

    pub fn clear(&mut self) {
        info!("Clearing the combatants list");
        self.combatants.clear();
        self.generation += 1;
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    pub fn contains(&self, id: CombatantId) -> bool {
        self.combatants.iter().any(|c| c.id() == id)
    }

    pub fn state(&self) -> RosterState {
        match self.combatants.len() {
            0 => RosterState::Empty,
            1 => RosterState::Staging,
            _ => RosterState::Ready,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Both staged combatants, or `InsufficientCombatants` outside `Ready`.
    pub fn snapshot(&self) -> Result<RosterSnapshot, BattleError> {
        match self.combatants.as_slice() {
            [first, second] => Ok(RosterSnapshot {
                first: Arc::clone(first),
                second: Arc::clone(second),
                generation: self.generation,
            }),
            _ => Err(BattleError::InsufficientCombatants),
        }
    }

    /// Keep only `id`. Used after a battle to drop the loser.
    pub(crate) fn retain(&mut self, id: CombatantId) {
        self.combatants.retain(|c| c.id() == id);
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::Difficulty;

    fn meal(id: i64) -> Arc<Combatant> {
        Arc::new(Combatant::new(id, format!("meal {id}"), "cuisine", 10.0, Difficulty::Med).unwrap())
    }

    #[test]
    fn lifecycle_follows_size() {
        let mut roster = Roster::new();
        assert_eq!(roster.state(), RosterState::Empty);
        roster.stage(meal(1)).unwrap();
        assert_eq!(roster.state(), RosterState::Staging);
        roster.stage(meal(2)).unwrap();
        assert_eq!(roster.state(), RosterState::Ready);
    }

    #[test]
    fn third_combatant_is_rejected() {
        let mut roster = Roster::new();
        roster.stage(meal(1)).unwrap();
        roster.stage(meal(2)).unwrap();
        assert_eq!(roster.stage(meal(3)), Err(BattleError::RosterFull));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn duplicate_identifier_is_rejected() {
        let mut roster = Roster::new();
        roster.stage(meal(1)).unwrap();
        assert_eq!(
            roster.stage(meal(1)),
            Err(BattleError::DuplicateCombatant(CombatantId(1)))
        );
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn snapshot_requires_two() {
        let mut roster = Roster::new();
        assert!(matches!(roster.snapshot(), Err(BattleError::InsufficientCombatants)));
        roster.stage(meal(1)).unwrap();
        assert!(matches!(roster.snapshot(), Err(BattleError::InsufficientCombatants)));
        roster.stage(meal(2)).unwrap();
        let snap = roster.snapshot().unwrap();
        assert_eq!(snap.first.id(), CombatantId(1));
        assert_eq!(snap.second.id(), CombatantId(2));
        assert_eq!(snap.generation, roster.generation());
    }

    #[test]
    fn retain_keeps_only_winner() {
        let mut roster = Roster::new();
        roster.stage(meal(1)).unwrap();
        roster.stage(meal(2)).unwrap();
        roster.retain(CombatantId(2));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.combatants()[0].id(), CombatantId(2));
    }

    #[test]
    fn clear_is_idempotent_and_bumps_generation() {
        let mut roster = Roster::new();
        roster.clear();
        assert!(roster.is_empty());
        roster.stage(meal(1)).unwrap();
        let before = roster.generation();
        roster.clear();
        roster.clear();
        assert!(roster.is_empty());
        assert!(roster.generation() > before);
    }
}
