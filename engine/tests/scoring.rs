use battle_engine::{decide, score, win_probability, Combatant, Difficulty, Side};
use proptest::prelude::*;

fn tier(i: usize) -> (Difficulty, f64) {
    [
        (Difficulty::High, 1.0),
        (Difficulty::Med, 2.0),
        (Difficulty::Low, 3.0),
    ][i]
}

#[test]
fn score_examples() {
    let a = Combatant::new(1, "meal 1", "cuisine A", 20.0, Difficulty::High).unwrap();
    let b = Combatant::new(2, "meal 2", "cuisine B", 5.0, Difficulty::Low).unwrap();
    let c = Combatant::new(3, "meal 3", "French", 8.0, Difficulty::Low).unwrap();
    assert_eq!(score(&a), 179.0);
    assert_eq!(score(&b), 42.0);
    assert_eq!(score(&c), 45.0);
}

proptest! {
    #[test]
    fn score_matches_formula(
        price in 0.01f64..10_000.0,
        category in "[a-zA-Z ]{0,24}",
        idx in 0usize..3,
    ) {
        let (difficulty, modifier) = tier(idx);
        let c = Combatant::new(7, "any", category.clone(), price, difficulty).unwrap();
        prop_assert_eq!(score(&c), price * category.len() as f64 - modifier);
    }

    #[test]
    fn gap_of_a_hundred_always_favors_higher(
        low in -1_000i32..1_000,
        gap in 100i32..2_000,
        draw in 0f64..=1.0,
    ) {
        let (low, high) = (f64::from(low), f64::from(low + gap));
        prop_assert_eq!(decide(high, low, draw), Side::First);
        prop_assert_eq!(decide(low, high, draw), Side::Second);
    }

    #[test]
    fn equal_scores_pick_the_second_side(s in -1_000f64..1_000.0, draw in 0f64..=1.0) {
        prop_assert_eq!(decide(s, s, draw), Side::Second);
    }

    #[test]
    fn delta_stays_in_unit_interval(a in -1e6f64..1e6, b in -1e6f64..1e6) {
        let delta = win_probability(a, b);
        prop_assert!((0.0..=1.0).contains(&delta));
    }
}
