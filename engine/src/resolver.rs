use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::combatant::CombatantId;
use crate::error::BattleError;
use crate::random::{check_fraction, RandomnessSource};
use crate::scoring::score;
use crate::session::BattleSession;
use crate::stats::StatsRecorder;

/// Divisor turning a raw score gap into a win probability.
pub const SCALING_CONSTANT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

/// Probability that the higher scorer wins: `|a - b| / 100`, clamped to `[0, 1]`.
pub fn win_probability(first: f64, second: f64) -> f64 {
    ((first - second).abs() / SCALING_CONSTANT).clamp(0.0, 1.0)
}

/// Pick the winning side for a draw in `[0, 1]`.
///
/// The higher scorer wins iff `draw < delta`; a saturated delta wins outright
/// even for a draw of exactly 1. On equal scores the first side counts as
/// "higher", and since `draw < 0` never holds the second side always wins.
pub fn decide(first: f64, second: f64, draw: f64) -> Side {
    let delta = win_probability(first, second);
    let (higher, lower) = if second > first {
        (Side::Second, Side::First)
    } else {
        (Side::First, Side::Second)
    };
    if delta >= 1.0 || draw < delta {
        higher
    } else {
        lower
    }
}

/// What happened in one resolved battle. Only the stat writes persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub winner: CombatantId,
    pub loser: CombatantId,
    pub winner_score: f64,
    pub loser_score: f64,
    pub delta: f64,
    pub draw: f64,
}

pub struct BattleResolver {
    randomness: Arc<dyn RandomnessSource>,
    stats: Arc<dyn StatsRecorder>,
}

impl BattleResolver {
    pub fn new(randomness: Arc<dyn RandomnessSource>, stats: Arc<dyn StatsRecorder>) -> Self {
        Self { randomness, stats }
    }

    /// Resolve the two combatants staged on `session`.
    ///
    /// All-or-nothing from the caller's side: on any error the roster keeps
    /// both combatants. On success it keeps only the winner.
    pub async fn resolve(&self, session: &BattleSession) -> Result<BattleOutcome, BattleError> {
        let snap = session.snapshot().await.inspect_err(|_| {
            error!("Not enough combatants to start a battle.");
        })?;
        info!(
            "Two meals enter, one meal leaves! '{}' vs '{}'",
            snap.first.name(),
            snap.second.name()
        );

        let first_score = score(&snap.first);
        let second_score = score(&snap.second);
        let delta = win_probability(first_score, second_score);
        debug!(
            "Score for {}: {:.3}, score for {}: {:.3}, delta: {:.3}",
            snap.first.name(),
            first_score,
            snap.second.name(),
            second_score,
            delta
        );

        let draw = check_fraction(self.randomness.draw().await?)?;
        debug!("Random draw: {:.3}", draw);

        let (winner, loser, winner_score, loser_score) =
            match decide(first_score, second_score, draw) {
                Side::First => (&snap.first, &snap.second, first_score, second_score),
                Side::Second => (&snap.second, &snap.first, second_score, first_score),
            };

        let mut roster = session.lock().await;
        if roster.generation() != snap.generation {
            warn!("Roster changed during battle; discarding result");
            return Err(BattleError::RosterChanged);
        }

        let (won, lost) = tokio::join!(
            self.stats.record_win(winner.id()),
            self.stats.record_loss(loser.id()),
        );
        if let Err(e) = won.and(lost) {
            error!("Failed to record battle stats: {}", e);
            return Err(match e {
                BattleError::StatsPersistence(_) => e,
                other => BattleError::StatsPersistence(other.to_string()),
            });
        }

        roster.retain(winner.id());
        drop(roster);

        info!("The winner is: {}", winner.name());
        Ok(BattleOutcome {
            winner: winner.id(),
            loser: loser.id(),
            winner_score,
            loser_score,
            delta,
            draw,
        })
    }
}
