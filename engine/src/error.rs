use thiserror::Error;

use crate::combatant::CombatantId;

/// Everything that can go wrong while staging or resolving a battle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BattleError {
    /// Combatant attributes rejected at construction.
    #[error("{0}")]
    Validation(String),

    #[error("Combatant list is full, cannot add more combatants.")]
    RosterFull,

    #[error("Combatant {0} is already staged.")]
    DuplicateCombatant(CombatantId),

    #[error("Two combatants must be prepped for a battle.")]
    InsufficientCombatants,

    /// The roster was restaged or cleared while a draw was in flight.
    #[error("Roster changed while the battle was being resolved.")]
    RosterChanged,

    /// Randomness provider timed out or the transport failed.
    #[error("randomness unavailable: {0}")]
    Unavailable(String),

    #[error("invalid response from randomness provider: {0}")]
    MalformedResponse(String),

    #[error("failed to record battle stats: {0}")]
    StatsPersistence(String),

    /// Reading a record back from storage failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl BattleError {
    /// Only transport failures are worth retrying; the caller decides.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BattleError::Unavailable(_))
    }
}
