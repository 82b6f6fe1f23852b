//! Unit progression integration tests: stats, levels, promotion

use proptest::prelude::*;

use squad_tactics::core::dice::{GameRng, ScriptedDice};
use squad_tactics::units::*;

fn ready(archetype: Archetype, level: u32) -> Unit {
    let mut unit = Unit::from_base_stats(archetype, level, BaseStats::baseline(&archetype.profile()));
    unit.add_future_points(MAX_FUTURE_POINTS);
    unit
}

#[test]
fn test_single_successor_promotion() {
    let mut rng = GameRng::seed_from_u64(21);
    let mut unit = ready(Archetype::Mage, 6);
    unit.take_damage(unit.max_hp() - 2);

    assert!(unit.promote(Archetype::Wizard, &mut rng));
    assert_eq!(unit.archetype(), Archetype::Wizard);
    assert_eq!(unit.future_points(), 0);
    assert!(unit.current_hp() >= unit.max_hp() / 2);
    assert_eq!(unit.abilities(), &["Fireball", "Mana Shield", "Teleport"]);
}

#[test]
fn test_full_line_to_terminal() {
    let mut rng = GameRng::seed_from_u64(5);
    let mut unit = ready(Archetype::Scout, 3);

    for next in [Archetype::Rogue, Archetype::Assassin, Archetype::Ninja] {
        assert!(unit.promote(next, &mut rng), "promotion to {}", next);
        assert!(!unit.is_promotion_ready());
        unit.add_future_points(MAX_FUTURE_POINTS);
    }

    assert_eq!(unit.archetype(), Archetype::Ninja);
    assert!(!unit.can_promote());
    assert_eq!(unit.future_points(), 0);
    assert!(unit.promotion_options().is_empty());
    assert_eq!(unit.fp_percentage(), 100.0);
}

#[test]
fn test_experience_drives_promotion_readiness() {
    let mut rng = GameRng::seed_from_u64(8);
    let mut unit = Unit::create(Archetype::Recruit, 1, &mut rng);

    // Ten kills of level-5 enemies: 100 xp each, 10 future points each
    for _ in 0..10 {
        unit.add_experience(100);
    }
    assert!(unit.is_promotion_ready());
    assert_eq!(unit.promotion_options(), &[Archetype::Soldier, Archetype::Knight]);
    assert!(unit.level() > 1);
}

#[test]
fn test_scripted_promotion_rolls() {
    // Lowest possible rolls for every stat
    let mut dice = ScriptedDice::new([i32::MIN]);
    let mut unit = ready(Archetype::Recruit, 1);

    assert!(unit.promote(Archetype::Knight, &mut dice));
    let base = unit.base_stats();
    assert_eq!(base.max_hp, 36);
    assert_eq!(base.strength, 18);
    assert_eq!(base.agility, 9);
    assert_eq!(base.intelligence, 5);
    assert_eq!(unit.current_hp(), 20);
}

fn any_archetype() -> impl Strategy<Value = Archetype> {
    (0..Archetype::ALL.len()).prop_map(|i| Archetype::ALL[i])
}

proptest! {
    #[test]
    fn prop_hp_and_stats_stay_in_bounds(
        archetype in any_archetype(),
        level in 1u32..30,
        seed in any::<u64>(),
        hits in prop::collection::vec(0i32..40, 0..10),
        xp in prop::collection::vec(0u32..300, 0..10),
    ) {
        let mut rng = GameRng::seed_from_u64(seed);
        let mut unit = Unit::create(archetype, level, &mut rng);

        for (damage, gain) in hits.iter().zip(xp.iter()) {
            unit.take_damage(*damage);
            unit.add_experience(*gain);
            unit.heal(*damage / 2);

            prop_assert!(unit.current_hp() >= 0);
            prop_assert!(unit.current_hp() <= unit.max_hp());
            prop_assert!(unit.strength() >= 1);
            prop_assert!(unit.agility() >= 1);
            prop_assert!(unit.intelligence() >= 1);
            prop_assert!(unit.max_hp() >= 1);
            prop_assert!(unit.future_points() <= MAX_FUTURE_POINTS);
        }
    }

    #[test]
    fn prop_recompute_idempotent(archetype in any_archetype(), level in 1u32..50, seed in any::<u64>()) {
        let mut rng = GameRng::seed_from_u64(seed);
        let mut unit = Unit::create(archetype, level, &mut rng);
        unit.recompute_stats();
        let once = *unit.stats();
        let hp = unit.current_hp();
        unit.recompute_stats();
        prop_assert_eq!(once, *unit.stats());
        prop_assert_eq!(hp, unit.current_hp());
    }

    #[test]
    fn prop_failed_promotion_changes_nothing(
        archetype in any_archetype(),
        points in 0u32..100,
        target in any_archetype(),
        seed in any::<u64>(),
    ) {
        let mut rng = GameRng::seed_from_u64(seed);
        let mut unit = Unit::create(archetype, 2, &mut rng);
        unit.add_future_points(points);
        let before = unit.clone();

        prop_assert!(!unit.promote(target, &mut rng));
        prop_assert_eq!(unit, before);
    }

    #[test]
    fn prop_terminal_never_gains_points(amount in 0u32..500) {
        for archetype in Archetype::ALL.iter().filter(|a| a.is_terminal()) {
            let mut unit = Unit::from_base_stats(*archetype, 1, BaseStats::baseline(&archetype.profile()));
            prop_assert!(!unit.add_future_points(amount));
            prop_assert_eq!(unit.future_points(), 0);
        }
    }
}
