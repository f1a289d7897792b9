use pokemon_btc_arena::battle::Battle;
use pokemon_btc_arena::config::{BattleRules, Difficulty};
use pokemon_btc_arena::creature::{Creature, IndividualValues, MAX_IV};
use pokemon_btc_arena::damage::compute_damage;
use pokemon_btc_arena::model::Catalog;
use pokemon_btc_arena::rng::ScriptedRng;
use proptest::prelude::*;

fn any_ivs() -> impl Strategy<Value = IndividualValues> {
    (0..=MAX_IV, 0..=MAX_IV, 0..=MAX_IV, 0..=MAX_IV).prop_map(|(health, attack, defense, speed)| {
        IndividualValues {
            health,
            attack,
            defense,
            speed,
        }
    })
}

fn creature(index: usize, level: u32, ivs: IndividualValues) -> Creature {
    let entries = Catalog::global().entries();
    Creature::with_ivs(&entries[index % entries.len()], level, ivs)
}

proptest! {
    #[test]
    fn damage_is_at_least_one(
        a in 0usize..64,
        d in 0usize..64,
        move_idx in 0usize..4,
        level_a in 1u32..=100,
        level_d in 1u32..=100,
        ivs_a in any_ivs(),
        ivs_d in any_ivs(),
        crit in 0.0f64..1.0,
        variance in 0.0f64..1.0,
    ) {
        let attacker = creature(a, level_a, ivs_a);
        let defender = creature(d, level_d, ivs_d);
        let move_def = &attacker.moves()[move_idx % attacker.moves().len()];
        let mut rng = ScriptedRng::new(vec![crit, variance]);
        let out = compute_damage(&attacker, &defender, move_def, &BattleRules::default(), &mut rng);
        prop_assert!(out.damage >= 1);
    }

    #[test]
    fn health_only_falls_and_faint_tracks_zero(
        index in 0usize..64,
        level in 1u32..=100,
        hits in proptest::collection::vec(0u32..200, 1..20),
    ) {
        let mut mon = creature(index, level, IndividualValues::default());
        let max = mon.max_health();
        for hit in hits {
            let before = mon.current_health();
            let dealt = mon.take_damage(hit);
            prop_assert!(mon.current_health() <= before);
            prop_assert_eq!(before - mon.current_health(), dealt);
            prop_assert!(mon.current_health() <= max);
            prop_assert_eq!(mon.is_fainted(), mon.current_health() == 0);
        }
    }

    #[test]
    fn heal_never_exceeds_max(
        index in 0usize..64,
        damage in 0u32..100,
        amount in 0u32..1000,
    ) {
        let mut mon = creature(index, 50, IndividualValues::default());
        let max = mon.max_health();
        mon.take_damage(damage.min(max - 1));
        let missing = max - mon.current_health();
        prop_assert_eq!(mon.heal(amount), amount.min(missing));
        prop_assert!(mon.current_health() <= max);
    }

    #[test]
    fn fainted_creature_cannot_be_healed(index in 0usize..64, amount in 0u32..500) {
        let mut mon = creature(index, 20, IndividualValues::default());
        let max = mon.max_health();
        mon.take_damage(max);
        prop_assert!(mon.is_fainted());
        prop_assert_eq!(mon.heal(amount), 0);
        prop_assert_eq!(mon.current_health(), 0);
        mon.full_heal();
        prop_assert!(mon.is_alive());
        prop_assert_eq!(mon.current_health(), max);
    }

    #[test]
    fn concluded_battle_has_exactly_one_fainted_side(
        a in 0usize..64,
        b in 0usize..64,
        seed in any::<u64>(),
    ) {
        let mut battle = Battle::seeded(
            creature(a, 10, IndividualValues::default()),
            creature(b, 10, IndividualValues::default()),
            Difficulty::Easy,
            BattleRules::default(),
            seed,
        );
        let mut steps = 0;
        while !battle.is_concluded() && steps < 10_000 {
            let side = battle.whose_turn();
            let attacker = battle.creature(side);
            let idx = attacker.moves().iter().position(|m| m.power > 0).unwrap_or(0);
            let before = battle.creature(side.opponent()).current_health();
            battle.use_move(side, idx).expect("in-turn move");
            prop_assert!(battle.creature(side.opponent()).current_health() < before);
            steps += 1;
        }
        let winner = battle.winner().expect("battle concludes");
        prop_assert!(battle.creature(winner).is_alive());
        prop_assert!(battle.creature(winner.opponent()).is_fainted());
    }
}
