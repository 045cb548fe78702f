use crate::combatant::{Combatant, Difficulty};

/// Fixed subtractive constant per tier. Harder dishes lose less.
pub fn difficulty_modifier(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::High => 1.0,
        Difficulty::Med => 2.0,
        Difficulty::Low => 3.0,
    }
}

/// score = price * chars(category) - modifier(difficulty)
pub fn score(combatant: &Combatant) -> f64 {
    let len = combatant.category().chars().count() as f64;
    combatant.price() * len - difficulty_modifier(combatant.difficulty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_difficulty_subtracts_one() {
        let c = Combatant::new(1, "meal 1", "cuisine A", 20.0, Difficulty::High).unwrap();
        assert_eq!(score(&c), 179.0);
    }

    #[test]
    fn low_difficulty_subtracts_three() {
        let c = Combatant::new(3, "meal 3", "French", 8.0, Difficulty::Low).unwrap();
        assert_eq!(score(&c), 45.0);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let c = Combatant::new(4, "Crêpe", "Crêperie", 1.0, Difficulty::Med).unwrap();
        assert_eq!(score(&c), 8.0 - 2.0);
    }
}
