use pokemon_btc_arena::ai::TieredAI;
use pokemon_btc_arena::config::{BattleRules, Difficulty};
use pokemon_btc_arena::creature::{Creature, IndividualValues, MAX_IV};
use pokemon_btc_arena::error::TournamentError;
use pokemon_btc_arena::model::Catalog;
use pokemon_btc_arena::rng::ScriptedRng;
use pokemon_btc_arena::simulate::play_tournament;
use pokemon_btc_arena::stats::BattleStats;
use pokemon_btc_arena::tournament::{Match, ParticipantId, Tournament, HUMAN};
use pokemon_btc_arena::Side;
use std::collections::HashSet;

fn starter(id: u32, level: u32, iv: u8) -> Creature {
    let entry = Catalog::global().get(id).expect("catalog id should exist");
    let ivs = IndividualValues {
        health: iv,
        attack: iv,
        defense: iv,
        speed: iv,
    };
    Creature::with_ivs(entry, level, ivs)
}

fn tournament(human: Creature, difficulty: Difficulty, seed: u64) -> Tournament {
    Tournament::seeded(
        human,
        difficulty,
        Catalog::global(),
        BattleRules::default(),
        seed,
    )
}

#[test]
fn bracket_is_seeded_with_human_first() {
    let t = tournament(starter(25, 5, 0), Difficulty::Medium, 7);
    assert_eq!(t.participants().len(), 8);
    let rounds = t.bracket();
    assert_eq!(rounds.len(), 3);
    assert_eq!(rounds[0].name, "Quarterfinals");
    assert_eq!(rounds[0].matches.len(), 4);
    assert!(rounds[1].matches.is_empty());
    assert_eq!(rounds[0].matches[0].first, HUMAN);
    assert_eq!(rounds[0].matches[0].second, ParticipantId(1));
    assert_eq!(rounds[0].matches[3].second, ParticipantId(7));
    assert!(t.is_player_match());
    for bot in &t.participants()[1..] {
        assert_eq!(bot.level(), 5);
    }

    let status = t.status();
    assert_eq!(status.current_round, 1);
    assert_eq!(status.round_name, "Quarterfinals");
    assert_eq!(status.total_rounds, 3);
    assert_eq!(status.matches_in_round, 4);
    assert_eq!(status.current_match, 1);
    assert!(!status.is_complete);
    assert_eq!(status.winner, None);
}

#[test]
fn easy_bots_are_scaled_down() {
    let t = tournament(starter(25, 5, 0), Difficulty::Easy, 3);
    for bot in &t.participants()[1..] {
        let entry = Catalog::global().get(bot.id()).expect("bot comes from the catalog");
        let unscaled = Creature::with_ivs(entry, 5, *bot.ivs());
        assert_eq!(
            bot.max_health(),
            (unscaled.max_health() as f64 * 0.7).floor().max(1.0) as u32
        );
        assert_eq!(bot.current_health(), bot.max_health());
    }
}

#[test]
fn human_loss_fast_forwards_bracket() {
    let mut t = tournament(starter(1, 5, 0), Difficulty::Hard, 11);
    t.record_match_result(ParticipantId(1)).expect("bot 1 wins");

    assert!(t.is_complete());
    assert!(t.current_match().is_none());
    let champion = t.winner().expect("champion decided");
    assert_ne!(champion, HUMAN);
    assert_eq!(t.history().len(), 7);

    let sizes: Vec<usize> = t.bracket().iter().map(|r| r.matches.len()).collect();
    assert_eq!(sizes, vec![4, 2, 1]);
    assert!(t.bracket().iter().all(|r| r.matches.iter().all(|m| m.is_resolved())));
    assert_eq!(t.bracket()[2].matches[0].winner, Some(champion));

    let outcome = t.outcome().expect("outcome");
    assert!(!outcome.human_won);
    assert_eq!(outcome.difficulty, Difficulty::Hard);
    assert_eq!(outcome.champion, t.participant(champion).expect("known").name());

    assert_eq!(
        t.record_match_result(champion),
        Err(TournamentError::Complete)
    );
    assert!(t.claim_reward(Catalog::global()).is_none());
}

#[test]
fn result_must_name_a_match_participant() {
    let mut t = tournament(starter(1, 5, 0), Difficulty::Medium, 5);
    assert_eq!(
        t.record_match_result(ParticipantId(4)),
        Err(TournamentError::NotInMatch(4))
    );
    assert!(t.history().is_empty());
    assert_eq!(t.current_match_index(), 0);
}

#[test]
fn bot_matches_play_until_human_is_up() {
    let mut t = tournament(starter(4, 5, 0), Difficulty::Medium, 21);
    assert_eq!(t.play_bot_matches(), Ok(0));
    t.record_match_result(HUMAN).expect("human wins quarterfinal");

    assert!(!t.is_player_match());
    assert_eq!(
        t.start_player_match(ScriptedRng::constant(0.5)).err(),
        Some(TournamentError::NotPlayerMatch)
    );
    assert_eq!(t.play_bot_matches(), Ok(3));

    assert_eq!(t.current_round_index(), 1);
    let semis = &t.bracket()[1].matches;
    assert_eq!(semis.len(), 2);
    assert_eq!(semis[0].first, HUMAN);
    assert!(t.is_player_match());
    assert_eq!(t.status().round_name, "Semifinals");
    assert_eq!(t.history().len(), 4);
}

#[test]
fn strong_human_wins_the_bracket() {
    let human = starter(151, 100, MAX_IV);
    let mut t = tournament(human, Difficulty::Hard, 42);
    let mut pilot = TieredAI::new(Difficulty::Hard);
    let mut bot = TieredAI::new(Difficulty::Hard);
    let mut battles = 0;

    while !t.is_complete() {
        t.play_bot_matches().expect("bot matches");
        if t.is_complete() {
            break;
        }
        let mut battle = t.start_player_match(t_seed(battles)).expect("player match");
        assert_eq!(
            battle.creature(Side::A).current_health(),
            battle.creature(Side::A).max_health()
        );
        battle.run_to_completion(&mut pilot, &mut bot).expect("battle ends");
        assert_eq!(t.finish_player_match(battle), Ok(HUMAN));
        battles += 1;
    }

    assert_eq!(battles, 3);
    assert_eq!(t.winner(), Some(HUMAN));
    assert_eq!(t.history().len(), 7);
    let status = t.status();
    assert_eq!(status.round_name, "Complete");
    assert_eq!(status.current_round, 4);
    assert_eq!(status.winner.as_deref(), Some("Mew"));

    let outcome = t.outcome().expect("outcome");
    assert!(outcome.human_won);
    let reward = t.claim_reward(Catalog::global()).expect("champion reward");
    assert!((9..=12).contains(&reward.level));
    assert!(Catalog::global().get(reward.creature_id).expect("id").reward_only);
    assert!(t.claim_reward(Catalog::global()).is_none());
}

fn t_seed(n: u64) -> rand::rngs::SmallRng {
    rand::SeedableRng::seed_from_u64(1000 + n)
}

#[test]
fn unfinished_battle_is_rejected() {
    let mut t = tournament(starter(25, 5, 0), Difficulty::Easy, 9);
    let battle = t.start_player_match(t_seed(0)).expect("player match");
    assert_eq!(
        t.finish_player_match(battle),
        Err(TournamentError::BattleInProgress)
    );
    assert!(t.history().is_empty());
}

#[test]
fn every_tournament_produces_one_champion() {
    let catalog = Catalog::global();
    let rules = BattleRules::default();
    let mut stats = BattleStats::new();
    for seed in 0..40u64 {
        let difficulty = Difficulty::ALL[(seed % 3) as usize];
        let human = starter(7, 5, 15);
        let run = play_tournament(human, difficulty, Difficulty::Hard, catalog, &rules, seed)
            .expect("tournament completes");
        if run.outcome.human_won {
            assert!(run.reward.is_some());
        } else {
            assert!(run.reward.is_none());
        }
        assert!((1..=3).contains(&run.player_battles));
        stats.record(&run.outcome);
    }
    assert_eq!(stats.total_wins() + stats.total_losses(), 40);
}

#[test]
fn bracket_never_repeats_a_participant_within_a_round() {
    for seed in 0..25u64 {
        let mut t = tournament(starter(133, 5, 10), Difficulty::Medium, seed);
        t.record_match_result(ParticipantId(1)).expect("human eliminated");
        for round in t.bracket() {
            let mut seen = HashSet::new();
            for m in &round.matches {
                assert!(seen.insert(m.first));
                assert!(seen.insert(m.second));
                let w = m.winner.expect("resolved");
                assert!(m.involves(w));
            }
        }
        let names: Vec<&str> = t.history().iter().map(|r| r.winner.as_str()).collect();
        assert_eq!(names.len(), 7);
    }
}

/// Wins every human match before `losing_round`, then loses there.
fn eliminate_in_round(seed: u64, losing_round: usize) -> Tournament {
    let mut t = tournament(starter(133, 5, 10), Difficulty::Medium, seed);
    loop {
        t.play_bot_matches().expect("bot matches");
        let m = t.current_match().cloned().expect("human match pending");
        assert!(m.involves(HUMAN));
        if t.current_round_index() == losing_round {
            let opponent = if m.first == HUMAN { m.second } else { m.first };
            t.record_match_result(opponent).expect("human loses");
            return t;
        }
        t.record_match_result(HUMAN).expect("human wins");
    }
}

#[test]
fn late_elimination_still_crowns_one_champion() {
    for losing_round in [1, 2] {
        for seed in 0..30u64 {
            let t = eliminate_in_round(seed, losing_round);
            assert!(t.is_complete());
            assert!(t.current_match().is_none());
            let champion = t.winner().expect("champion decided");
            assert_ne!(champion, HUMAN);
            assert_eq!(t.history().len(), 7);

            let sizes: Vec<usize> = t.bracket().iter().map(|r| r.matches.len()).collect();
            assert_eq!(sizes, vec![4, 2, 1]);
            assert!(t.bracket().iter().all(|r| r.matches.iter().all(|m| m.is_resolved())));
            let last = &t.bracket()[2].matches[0];
            assert_eq!(last.winner, Some(champion));
            assert_eq!(last.involves(HUMAN), losing_round == 2);
            assert_eq!(t.history().last().map(|r| r.round), Some(3));

            let outcome = t.outcome().expect("outcome");
            assert!(!outcome.human_won);
        }
    }
}

#[test]
fn simulated_match_rejects_unknown_participants() {
    let mut t = tournament(starter(25, 5, 0), Difficulty::Medium, 4);
    let bogus = Match {
        first: ParticipantId(2),
        second: ParticipantId(99),
        winner: None,
    };
    assert_eq!(
        t.simulate_bot_match(&bogus),
        Err(TournamentError::UnknownParticipant(99))
    );

    let real = t.bracket()[0].matches[1].clone();
    let winner = t.simulate_bot_match(&real).expect("known participants");
    assert!(real.involves(winner));
    assert!(t.history().is_empty());
}
