//! Eight-participant single-elimination bracket.
//!
//! Participant 0 is the human's creature; 1..=7 are synthesized bots. The
//! quarterfinals are seeded at construction, later rounds are filled by
//! pairing the previous round's winners in match order. When the human is
//! knocked out the rest of the bracket is resolved with the bot-vs-bot
//! proxy so a champion can still be reported.

use crate::battle::{Battle, Side};
use crate::config::{BattleRules, Difficulty};
use crate::creature::Creature;
use crate::error::{TournamentError, TournamentResult};
use crate::model::Catalog;
use crate::reward::{roll_reward, Reward};
use crate::rng::RandomSource;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

pub const ROUND_NAMES: [&str; 3] = ["Quarterfinals", "Semifinals", "Finals"];
pub const BOT_COUNT: usize = 7;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
pub struct ParticipantId(pub usize);

/// The human's creature always sits in slot 0.
pub const HUMAN: ParticipantId = ParticipantId(0);

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Match {
    pub first: ParticipantId,
    pub second: ParticipantId,
    pub winner: Option<ParticipantId>,
}

impl Match {
    fn new(first: ParticipantId, second: ParticipantId) -> Self {
        Self {
            first,
            second,
            winner: None,
        }
    }

    pub fn involves(&self, id: ParticipantId) -> bool {
        self.first == id || self.second == id
    }

    pub fn is_resolved(&self) -> bool {
        self.winner.is_some()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Round {
    pub number: usize,
    pub name: &'static str,
    pub matches: Vec<Match>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub round: usize,
    pub match_number: usize,
    pub first: String,
    pub second: String,
    pub winner: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchView {
    pub first: String,
    pub second: String,
    pub winner: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RoundView {
    pub number: usize,
    pub name: String,
    pub matches: Vec<MatchView>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentStatus {
    pub current_round: usize,
    pub round_name: String,
    pub total_rounds: usize,
    pub matches_in_round: usize,
    pub current_match: usize,
    pub is_complete: bool,
    pub winner: Option<String>,
    pub bracket: Vec<RoundView>,
    pub history: Vec<MatchRecord>,
}

/// Reported to the persistence layer once the bracket is decided.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentOutcome {
    pub difficulty: Difficulty,
    pub human_won: bool,
    pub champion: String,
}

/// Synthesizes one opponent: a random catalog entry at the bot level with
/// every stat scaled by the difficulty multiplier.
pub fn generate_bot(
    catalog: &Catalog,
    difficulty: Difficulty,
    rules: &BattleRules,
    rng: &mut impl RandomSource,
) -> Creature {
    let entry = catalog.random_entry(rng);
    let mut bot = Creature::new(entry, rules.bot_level, rng);
    bot.scale_stats(rules.bot_scaling.for_difficulty(difficulty));
    bot
}

pub struct Tournament<R = SmallRng> {
    participants: Vec<Creature>,
    difficulty: Difficulty,
    rules: BattleRules,
    bracket: Vec<Round>,
    history: Vec<MatchRecord>,
    current_round: usize,
    current_match: usize,
    complete: bool,
    winner: Option<ParticipantId>,
    reward_claimed: bool,
    rng: R,
}

impl Tournament<SmallRng> {
    pub fn seeded(
        human: Creature,
        difficulty: Difficulty,
        catalog: &Catalog,
        rules: BattleRules,
        seed: u64,
    ) -> Self {
        Tournament::new(
            human,
            difficulty,
            catalog,
            rules,
            SmallRng::seed_from_u64(seed),
        )
    }
}

impl<R: RandomSource> Tournament<R> {
    pub fn new(
        human: Creature,
        difficulty: Difficulty,
        catalog: &Catalog,
        rules: BattleRules,
        mut rng: R,
    ) -> Self {
        let mut participants = Vec::with_capacity(BOT_COUNT + 1);
        participants.push(human);
        for _ in 0..BOT_COUNT {
            participants.push(generate_bot(catalog, difficulty, &rules, &mut rng));
        }

        let id = ParticipantId;
        let quarterfinals = vec![
            Match::new(HUMAN, id(1)),
            Match::new(id(2), id(3)),
            Match::new(id(4), id(5)),
            Match::new(id(6), id(7)),
        ];
        let bracket = ROUND_NAMES
            .iter()
            .enumerate()
            .map(|(idx, &name)| Round {
                number: idx + 1,
                name,
                matches: if idx == 0 {
                    quarterfinals.clone()
                } else {
                    Vec::new()
                },
            })
            .collect();

        Tournament {
            participants,
            difficulty,
            rules,
            bracket,
            history: Vec::new(),
            current_round: 0,
            current_match: 0,
            complete: false,
            winner: None,
            reward_claimed: false,
            rng,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn rules(&self) -> &BattleRules {
        &self.rules
    }

    pub fn human(&self) -> &Creature {
        &self.participants[HUMAN.0]
    }

    pub fn participant(&self, id: ParticipantId) -> TournamentResult<&Creature> {
        self.participants
            .get(id.0)
            .ok_or(TournamentError::UnknownParticipant(id.0))
    }

    pub fn participants(&self) -> &[Creature] {
        &self.participants
    }

    pub fn bracket(&self) -> &[Round] {
        &self.bracket
    }

    pub fn history(&self) -> &[MatchRecord] {
        &self.history
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The champion, once decided. Never the human after an elimination.
    pub fn winner(&self) -> Option<ParticipantId> {
        self.winner
    }

    pub fn current_round_index(&self) -> usize {
        self.current_round
    }

    pub fn current_match_index(&self) -> usize {
        self.current_match
    }

    pub fn current_match(&self) -> Option<&Match> {
        if self.complete {
            return None;
        }
        self.bracket
            .get(self.current_round)?
            .matches
            .get(self.current_match)
    }

    pub fn is_player_match(&self) -> bool {
        self.current_match().is_some_and(|m| m.involves(HUMAN))
    }

    fn name_of(&self, id: ParticipantId) -> String {
        self.participants
            .get(id.0)
            .map(|c| c.name().to_string())
            .unwrap_or_default()
    }

    /// Cheap bot-vs-bot proxy: each side wins with probability proportional
    /// to its attack + health.
    pub fn simulate_bot_match(&mut self, m: &Match) -> TournamentResult<ParticipantId> {
        let p1 = self.participant(m.first)?.power_score() as f64;
        let p2 = self.participant(m.second)?.power_score() as f64;
        let total = p1 + p2;
        let p1_chance = if total > 0.0 { p1 / total } else { 0.5 };
        Ok(if self.rng.chance(p1_chance) {
            m.first
        } else {
            m.second
        })
    }

    /// Records the current match's winner and advances the cursor. Finishing
    /// a round pairs its winners into the next one; a human loss ends the
    /// tournament and fast-forwards the remaining bracket.
    pub fn record_match_result(&mut self, winner: ParticipantId) -> TournamentResult<()> {
        let m = self.current_match().ok_or(TournamentError::Complete)?.clone();
        if !m.involves(winner) {
            return Err(TournamentError::NotInMatch(winner.0));
        }
        self.resolve_current(winner, &m);

        if m.involves(HUMAN) && winner != HUMAN {
            self.eliminate_human()?;
        } else if self.current_match >= self.bracket[self.current_round].matches.len() {
            self.advance_round()?;
        }
        Ok(())
    }

    fn resolve_current(&mut self, winner: ParticipantId, m: &Match) {
        let round = self.current_round;
        let idx = self.current_match;
        self.bracket[round].matches[idx].winner = Some(winner);
        self.push_history(round, idx, m, winner);
        self.current_match += 1;
    }

    fn push_history(&mut self, round: usize, idx: usize, m: &Match, winner: ParticipantId) {
        let record = MatchRecord {
            round: round + 1,
            match_number: idx + 1,
            first: self.name_of(m.first),
            second: self.name_of(m.second),
            winner: self.name_of(winner),
        };
        self.history.push(record);
    }

    fn advance_round(&mut self) -> TournamentResult<()> {
        let round = &self.bracket[self.current_round];
        let winners: Vec<ParticipantId> = round.matches.iter().filter_map(|m| m.winner).collect();
        if winners.len() < round.matches.len() {
            return Ok(());
        }
        if !winners.contains(&HUMAN) {
            return self.eliminate_human();
        }

        self.current_round += 1;
        self.current_match = 0;
        if self.current_round >= self.bracket.len() {
            self.complete = true;
            self.winner = Some(HUMAN);
            return Ok(());
        }
        self.bracket[self.current_round].matches = winners
            .chunks_exact(2)
            .map(|pair| Match::new(pair[0], pair[1]))
            .collect();
        Ok(())
    }

    fn eliminate_human(&mut self) -> TournamentResult<()> {
        self.complete = true;
        self.winner = None;
        self.complete_remaining_matches()
    }

    /// Resolves every undecided match of the current round and then every
    /// later round until a single competitor is left.
    fn complete_remaining_matches(&mut self) -> TournamentResult<()> {
        let round = self.current_round;
        for idx in 0..self.bracket[round].matches.len() {
            let m = self.bracket[round].matches[idx].clone();
            if m.is_resolved() {
                continue;
            }
            let winner = self.simulate_bot_match(&m)?;
            self.bracket[round].matches[idx].winner = Some(winner);
            self.push_history(round, idx, &m, winner);
        }
        self.current_match = self.bracket[round].matches.len();

        let mut remaining: Vec<ParticipantId> = self.bracket[round]
            .matches
            .iter()
            .filter_map(|m| m.winner)
            .collect();
        let mut next = round + 1;
        while remaining.len() > 1 && next < self.bracket.len() {
            let pairs: Vec<Match> = remaining
                .chunks_exact(2)
                .map(|pair| Match::new(pair[0], pair[1]))
                .collect();
            let mut winners = Vec::with_capacity(pairs.len());
            let mut resolved = Vec::with_capacity(pairs.len());
            for (idx, mut m) in pairs.into_iter().enumerate() {
                let winner = self.simulate_bot_match(&m)?;
                m.winner = Some(winner);
                self.push_history(next, idx, &m, winner);
                winners.push(winner);
                resolved.push(m);
            }
            self.bracket[next].matches = resolved;
            remaining = winners;
            next += 1;
        }

        if remaining.len() == 1 {
            self.winner = Some(remaining[0]);
        }
        Ok(())
    }

    /// Auto-resolves bot-vs-bot matches until the human's next match or the
    /// end of the bracket. Returns how many matches were simulated.
    pub fn play_bot_matches(&mut self) -> TournamentResult<usize> {
        let mut simulated = 0;
        while let Some(m) = self.current_match().cloned() {
            if m.involves(HUMAN) {
                break;
            }
            let winner = self.simulate_bot_match(&m)?;
            self.record_match_result(winner)?;
            simulated += 1;
        }
        Ok(simulated)
    }

    fn current_opponent(&self) -> TournamentResult<ParticipantId> {
        let m = self.current_match().ok_or(TournamentError::Complete)?;
        if !m.involves(HUMAN) {
            return Err(TournamentError::NotPlayerMatch);
        }
        Ok(if m.first == HUMAN { m.second } else { m.first })
    }

    /// Full-heals the human and opens the battle for the current match, with
    /// the human on side A.
    pub fn start_player_match<B: RandomSource>(&mut self, rng: B) -> TournamentResult<Battle<B>> {
        let opponent = self.current_opponent()?;
        self.participants[HUMAN.0].full_heal();
        Ok(Battle::new(
            self.participants[HUMAN.0].clone(),
            self.participants[opponent.0].clone(),
            self.difficulty,
            self.rules.clone(),
            rng,
        ))
    }

    /// Takes back a concluded battle from [`Tournament::start_player_match`],
    /// keeps both creatures' post-battle state and records the winner.
    pub fn finish_player_match<B: RandomSource>(
        &mut self,
        battle: Battle<B>,
    ) -> TournamentResult<ParticipantId> {
        let opponent = self.current_opponent()?;
        let side = battle.winner().ok_or(TournamentError::BattleInProgress)?;
        let (human, foe) = battle.into_creatures();
        self.participants[HUMAN.0] = human;
        self.participants[opponent.0] = foe;
        let winner = match side {
            Side::A => HUMAN,
            Side::B => opponent,
        };
        self.record_match_result(winner)?;
        Ok(winner)
    }

    pub fn bracket_display(&self) -> Vec<RoundView> {
        self.bracket
            .iter()
            .map(|round| RoundView {
                number: round.number,
                name: round.name.to_string(),
                matches: round
                    .matches
                    .iter()
                    .map(|m| MatchView {
                        first: self.name_of(m.first),
                        second: self.name_of(m.second),
                        winner: m.winner.map(|w| self.name_of(w)),
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn status(&self) -> TournamentStatus {
        let round = self.bracket.get(self.current_round);
        TournamentStatus {
            current_round: self.current_round + 1,
            round_name: round.map_or("Complete", |r| r.name).to_string(),
            total_rounds: self.bracket.len(),
            matches_in_round: round.map_or(0, |r| r.matches.len()),
            current_match: self.current_match + 1,
            is_complete: self.complete,
            winner: self.winner.map(|w| self.name_of(w)),
            bracket: self.bracket_display(),
            history: self.history.clone(),
        }
    }

    pub fn outcome(&self) -> Option<TournamentOutcome> {
        if !self.complete {
            return None;
        }
        let champion = self.winner?;
        Some(TournamentOutcome {
            difficulty: self.difficulty,
            human_won: champion == HUMAN,
            champion: self.name_of(champion),
        })
    }

    /// Rolls the champion's prize. Only the human's first claim after a
    /// tournament win yields anything.
    pub fn claim_reward(&mut self, catalog: &Catalog) -> Option<Reward> {
        if self.reward_claimed || self.winner != Some(HUMAN) {
            return None;
        }
        self.reward_claimed = true;
        roll_reward(catalog, self.difficulty, &mut self.rng)
    }
}
