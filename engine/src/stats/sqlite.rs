use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::{error, info};

use super::{StatRecord, StatsRecorder};
use crate::combatant::{Combatant, CombatantId};
use crate::error::BattleError;

const CREATE_MEALS: &str = r#"
    CREATE TABLE IF NOT EXISTS meals (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        meal TEXT NOT NULL UNIQUE,
        cuisine TEXT NOT NULL,
        price REAL NOT NULL,
        difficulty TEXT CHECK(difficulty IN ('HIGH', 'MED', 'LOW')),
        battles INTEGER DEFAULT 0,
        wins INTEGER DEFAULT 0,
        deleted BOOLEAN DEFAULT FALSE
    )
"#;

/// SQLite-backed meal table: reads combatants and records battle stats.
///
/// Rows are created and deleted elsewhere; this store only reads them and
/// bumps their counters.
#[derive(Clone)]
pub struct SqliteMealStore {
    pool: SqlitePool,
}

fn storage(e: sqlx::Error) -> BattleError {
    BattleError::Storage(e.to_string())
}

fn persistence(e: sqlx::Error) -> BattleError {
    BattleError::StatsPersistence(e.to_string())
}

impl SqliteMealStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str) -> Result<Self, BattleError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(url)
            .await
            .map_err(storage)?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the `meals` table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), BattleError> {
        sqlx::query(CREATE_MEALS)
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        Ok(())
    }

    /// Load a live (not soft-deleted) meal as a combatant.
    pub async fn load_combatant(&self, id: CombatantId) -> Result<Option<Combatant>, BattleError> {
        let row = sqlx::query_as::<_, (i64, String, String, f64, String, bool)>(
            "SELECT id, meal, cuisine, price, difficulty, deleted FROM meals WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        match row {
            None => {
                info!("Meal with ID {} not found", id);
                Ok(None)
            }
            Some((.., true)) => {
                info!("Meal with ID {} has been deleted", id);
                Ok(None)
            }
            Some((id, meal, cuisine, price, difficulty, false)) => {
                Combatant::parse(id, meal, cuisine, price, &difficulty).map(Some)
            }
        }
    }

    pub async fn stats(&self, id: CombatantId) -> Result<Option<StatRecord>, BattleError> {
        let row = sqlx::query_as::<_, (i64, i64)>(
            "SELECT battles, wins FROM meals WHERE id = ? AND deleted = FALSE",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;
        Ok(row.map(|(battles, wins)| StatRecord {
            battles: battles.max(0) as u64,
            wins: wins.max(0) as u64,
        }))
    }

    async fn bump(&self, id: CombatantId, won: bool) -> Result<(), BattleError> {
        let sql = if won {
            "UPDATE meals SET battles = battles + 1, wins = wins + 1 WHERE id = ? AND deleted = FALSE"
        } else {
            "UPDATE meals SET battles = battles + 1 WHERE id = ? AND deleted = FALSE"
        };
        let updated = sqlx::query(sql)
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(persistence)?
            .rows_affected();

        if updated == 0 {
            return Err(self.missing_reason(id).await);
        }
        info!(
            "Updated stats for meal {}: {}",
            id,
            if won { "win" } else { "loss" }
        );
        Ok(())
    }

    async fn missing_reason(&self, id: CombatantId) -> BattleError {
        let deleted = sqlx::query_as::<_, (bool,)>("SELECT deleted FROM meals WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await;
        let msg = match deleted {
            Ok(Some(_)) => format!("Meal with ID {} has been deleted", id),
            Ok(None) => format!("Meal with ID {} not found", id),
            Err(e) => e.to_string(),
        };
        error!("{}", msg);
        BattleError::StatsPersistence(msg)
    }
}

#[async_trait]
impl StatsRecorder for SqliteMealStore {
    async fn record_win(&self, id: CombatantId) -> Result<(), BattleError> {
        self.bump(id, true).await
    }

    async fn record_loss(&self, id: CombatantId) -> Result<(), BattleError> {
        self.bump(id, false).await
    }
}
