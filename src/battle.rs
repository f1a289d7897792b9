use crate::ai::{BattleAI, TieredAI};
use crate::battle_logger::BattleLogger;
use crate::config::{BattleRules, Difficulty};
use crate::creature::{Creature, HealthBand};
use crate::damage::{compute_damage, DamageOutcome};
use crate::error::{BattleError, BattleResult};
use crate::rng::RandomSource;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Side A is the human-facing party, side B the AI-driven opponent.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Everything the presentation layer needs about one resolved move.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveReport {
    pub side: Side,
    pub move_index: usize,
    pub move_name: String,
    pub outcome: DamageOutcome,
    /// Health actually removed, at most the defender's remaining health.
    pub damage_dealt: u32,
    pub defender_health: u32,
    pub defender_max_health: u32,
    pub defender_fainted: bool,
    pub winner: Option<Side>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatantView {
    pub name: String,
    pub level: u32,
    pub current_health: u32,
    pub max_health: u32,
    pub health_fraction: f64,
    pub health_band: HealthBand,
}

impl CombatantView {
    fn of(creature: &Creature) -> Self {
        Self {
            name: creature.name().to_string(),
            level: creature.level(),
            current_health: creature.current_health(),
            max_health: creature.max_health(),
            health_fraction: creature.health_fraction(),
            health_band: creature.health_band(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleSnapshot {
    pub turn: u32,
    pub whose_turn: Side,
    pub side_a: CombatantView,
    pub side_b: CombatantView,
    pub winner: Option<Side>,
    pub log: String,
}

/// One contest between two creatures.
///
/// Turn order is fixed at construction (faster side first, coin flip on a
/// tie) and then alternates until one side faints. Once a winner is set every
/// further move is refused.
pub struct Battle<R = SmallRng> {
    side_a: Creature,
    side_b: Creature,
    difficulty: Difficulty,
    rules: BattleRules,
    turn: u32,
    to_move: Side,
    winner: Option<Side>,
    logger: BattleLogger,
    rng: R,
}

impl Battle<SmallRng> {
    pub fn seeded(
        side_a: Creature,
        side_b: Creature,
        difficulty: Difficulty,
        rules: BattleRules,
        seed: u64,
    ) -> Self {
        Battle::new(side_a, side_b, difficulty, rules, SmallRng::seed_from_u64(seed))
    }
}

impl<R: RandomSource> Battle<R> {
    pub fn new(
        side_a: Creature,
        side_b: Creature,
        difficulty: Difficulty,
        rules: BattleRules,
        mut rng: R,
    ) -> Self {
        let speed_a = side_a.stats().speed;
        let speed_b = side_b.stats().speed;
        let first = if speed_b > speed_a {
            Side::B
        } else if speed_b == speed_a && !rng.chance(0.5) {
            Side::B
        } else {
            Side::A
        };
        let mut logger = BattleLogger::new();
        logger.log_start(side_a.name(), side_b.name(), first);
        Battle {
            side_a,
            side_b,
            difficulty,
            rules,
            turn: 0,
            to_move: first,
            winner: None,
            logger,
            rng,
        }
    }

    pub fn creature(&self, side: Side) -> &Creature {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        }
    }

    fn pair_mut(&mut self, attacker: Side) -> (&mut Creature, &mut Creature) {
        match attacker {
            Side::A => (&mut self.side_a, &mut self.side_b),
            Side::B => (&mut self.side_b, &mut self.side_a),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn rules(&self) -> &BattleRules {
        &self.rules
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn whose_turn(&self) -> Side {
        self.to_move
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_concluded(&self) -> bool {
        self.winner.is_some()
    }

    pub fn logger(&self) -> &BattleLogger {
        &self.logger
    }

    pub fn log_text(&self) -> String {
        self.logger.text()
    }

    fn ensure_can_act(&self, side: Side) -> BattleResult<()> {
        if self.winner.is_some() {
            return Err(BattleError::AlreadyConcluded);
        }
        if side != self.to_move {
            return Err(BattleError::OutOfTurn { side });
        }
        Ok(())
    }

    /// Resolves `side` using its move at `move_index` against the other side.
    pub fn use_move(&mut self, side: Side, move_index: usize) -> BattleResult<MoveReport> {
        self.ensure_can_act(side)?;
        let available = self.creature(side).moves().len();
        if move_index >= available {
            return Err(BattleError::InvalidMoveSelection {
                index: move_index,
                available,
            });
        }

        if side == Side::A || self.turn == 0 {
            self.turn += 1;
            self.logger.log_turn(self.turn);
        }

        let move_def = self.creature(side).moves()[move_index].clone();
        let outcome = {
            let (attacker, defender) = match side {
                Side::A => (&self.side_a, &self.side_b),
                Side::B => (&self.side_b, &self.side_a),
            };
            compute_damage(attacker, defender, &move_def, &self.rules, &mut self.rng)
        };

        let (attacker, defender) = self.pair_mut(side);
        let attacker_name = attacker.name().to_string();
        let damage_dealt = defender.take_damage(outcome.damage);
        let defender_name = defender.name().to_string();
        let defender_health = defender.current_health();
        let defender_max_health = defender.max_health();
        let defender_fainted = !defender.is_alive();

        self.logger.log_move(
            side,
            &attacker_name,
            &move_def.name,
            outcome.critical,
            outcome.effectiveness_class(),
            outcome.same_type_bonus,
        );
        self.logger.log_damage(
            side.opponent(),
            &defender_name,
            damage_dealt,
            defender_health,
            defender_max_health,
        );

        if defender_fainted {
            self.logger.log_faint(side.opponent(), &defender_name);
            self.logger.log_win(side, &attacker_name);
            self.winner = Some(side);
        } else {
            self.to_move = side.opponent();
        }

        Ok(MoveReport {
            side,
            move_index,
            move_name: move_def.name,
            outcome,
            damage_dealt,
            defender_health,
            defender_max_health,
            defender_fainted,
            winner: self.winner,
        })
    }

    /// The human side's move.
    pub fn player_turn(&mut self, move_index: usize) -> BattleResult<MoveReport> {
        self.use_move(Side::A, move_index)
    }

    /// The opponent's move, chosen by the difficulty-tiered AI.
    pub fn opponent_turn(&mut self) -> BattleResult<MoveReport> {
        let mut ai = TieredAI::new(self.difficulty);
        self.ai_turn(Side::B, &mut ai)
    }

    /// Lets `ai` pick and resolve the move for `side`.
    pub fn ai_turn(&mut self, side: Side, ai: &mut dyn BattleAI) -> BattleResult<MoveReport> {
        self.ensure_can_act(side)?;
        let move_index = {
            let (attacker, defender) = match side {
                Side::A => (&self.side_a, &self.side_b),
                Side::B => (&self.side_b, &self.side_a),
            };
            ai.choose_move(attacker, defender, &self.rules, &mut self.rng)?
        };
        self.use_move(side, move_index)
    }

    /// What the opponent AI would pick right now. Consumes random draws.
    pub fn select_opponent_move(&mut self) -> BattleResult<usize> {
        let mut ai = TieredAI::new(self.difficulty);
        ai.choose_move(&self.side_b, &self.side_a, &self.rules, &mut self.rng)
    }

    /// Drives both sides with AIs until someone faints.
    pub fn run_to_completion(
        &mut self,
        ai_a: &mut dyn BattleAI,
        ai_b: &mut dyn BattleAI,
    ) -> BattleResult<Side> {
        while self.winner.is_none() {
            let side = self.to_move;
            match side {
                Side::A => self.ai_turn(side, ai_a)?,
                Side::B => self.ai_turn(side, ai_b)?,
            };
        }
        self.winner.ok_or(BattleError::AlreadyConcluded)
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            turn: self.turn,
            whose_turn: self.to_move,
            side_a: CombatantView::of(&self.side_a),
            side_b: CombatantView::of(&self.side_b),
            winner: self.winner,
            log: self.logger.text(),
        }
    }

    /// Hands both creatures back, side A first.
    pub fn into_creatures(self) -> (Creature, Creature) {
        (self.side_a, self.side_b)
    }
}
