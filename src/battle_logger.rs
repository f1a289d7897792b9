use crate::battle::Side;
use crate::types::Effectiveness;
use serde::Serialize;
use serde_json::json;

/// Structured counterpart of each log line, for the presentation layer
/// (sound cues, animations) to react to without parsing text.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum BattleEvent {
    Start {
        side_a: String,
        side_b: String,
        first: Side,
    },
    Turn {
        turn: u32,
    },
    Move {
        side: Side,
        attacker: String,
        move_name: String,
        critical: bool,
        effectiveness: Effectiveness,
        same_type_bonus: bool,
    },
    Damage {
        side: Side,
        target: String,
        amount: u32,
        health: u32,
        max_health: u32,
    },
    Faint {
        side: Side,
        target: String,
    },
    Win {
        side: Side,
        winner: String,
    },
}

#[derive(Clone, Debug, Default)]
pub struct BattleLogger {
    lines: Vec<String>,
    events: Vec<BattleEvent>,
}

impl BattleLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_start(&mut self, side_a: &str, side_b: &str, first: Side) {
        self.lines.push(format!("Battle Start! {side_a} vs {side_b}!"));
        if first == Side::B {
            self.lines.push(format!("{side_b} is faster and goes first!"));
        }
        self.events.push(BattleEvent::Start {
            side_a: side_a.to_string(),
            side_b: side_b.to_string(),
            first,
        });
    }

    pub fn log_turn(&mut self, turn: u32) {
        self.lines.push(format!("--- Turn {turn} ---"));
        self.events.push(BattleEvent::Turn { turn });
    }

    pub fn log_move(
        &mut self,
        side: Side,
        attacker: &str,
        move_name: &str,
        critical: bool,
        effectiveness: Effectiveness,
        same_type_bonus: bool,
    ) {
        let mut message = format!("{attacker} used {move_name}!");
        if critical {
            message.push_str(" Critical hit!");
        }
        match effectiveness {
            Effectiveness::NoEffect => message.push_str(" It doesn't affect the opponent..."),
            Effectiveness::NotVeryEffective => message.push_str(" It's not very effective..."),
            Effectiveness::SuperEffective => message.push_str(" It's super effective!"),
            Effectiveness::Neutral => {}
        }
        if same_type_bonus {
            message.push_str(" (STAB!)");
        }
        self.lines.push(message);
        self.events.push(BattleEvent::Move {
            side,
            attacker: attacker.to_string(),
            move_name: move_name.to_string(),
            critical,
            effectiveness,
            same_type_bonus,
        });
    }

    pub fn log_damage(&mut self, side: Side, target: &str, amount: u32, hp: u32, max_hp: u32) {
        self.lines
            .push(format!("{target} took {amount} damage! ({hp}/{max_hp} HP)"));
        self.events.push(BattleEvent::Damage {
            side,
            target: target.to_string(),
            amount,
            health: hp,
            max_health: max_hp,
        });
    }

    pub fn log_faint(&mut self, side: Side, target: &str) {
        self.lines.push(format!("{target} fainted!"));
        self.events.push(BattleEvent::Faint {
            side,
            target: target.to_string(),
        });
    }

    pub fn log_win(&mut self, side: Side, winner: &str) {
        self.events.push(BattleEvent::Win {
            side,
            winner: winner.to_string(),
        });
    }

    pub fn log_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "log": self.lines,
            "events": self.events,
        })
    }
}
