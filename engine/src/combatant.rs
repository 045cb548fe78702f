use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::BattleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombatantId(pub i64);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CombatantId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Low,
    Med,
    High,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Low => "LOW",
            Difficulty::Med => "MED",
            Difficulty::High => "HIGH",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = BattleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Difficulty::Low),
            "MED" => Ok(Difficulty::Med),
            "HIGH" => Ok(Difficulty::High),
            _ => Err(BattleError::Validation(
                "Difficulty must be 'LOW', 'MED', or 'HIGH'.".to_string(),
            )),
        }
    }
}

/// A validated record eligible for battle. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCombatant")]
pub struct Combatant {
    id: CombatantId,
    name: String,
    category: String,
    price: f64,
    difficulty: Difficulty,
}

impl Combatant {
    pub fn new(
        id: impl Into<CombatantId>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        difficulty: Difficulty,
    ) -> Result<Self, BattleError> {
        // NaN is not finite, so this also rejects it.
        if !price.is_finite() || price <= 0.0 {
            return Err(BattleError::Validation(
                "Price must be a positive value.".to_string(),
            ));
        }
        let combatant = Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
            difficulty,
        };
        if !crate::scoring::score(&combatant).is_finite() {
            return Err(BattleError::Validation(
                "Price is too large to score.".to_string(),
            ));
        }
        Ok(combatant)
    }

    /// Build from untyped storage/text values, parsing the difficulty tier.
    pub fn parse(
        id: impl Into<CombatantId>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        difficulty: &str,
    ) -> Result<Self, BattleError> {
        Self::new(id, name, category, price, difficulty.parse()?)
    }

    pub fn id(&self) -> CombatantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

#[derive(Deserialize)]
struct RawCombatant {
    id: CombatantId,
    name: String,
    category: String,
    price: f64,
    difficulty: String,
}

impl TryFrom<RawCombatant> for Combatant {
    type Error = BattleError;

    fn try_from(raw: RawCombatant) -> Result<Self, Self::Error> {
        Combatant::parse(raw.id, raw.name, raw.category, raw.price, &raw.difficulty)
    }
}
