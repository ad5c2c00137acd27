use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combat::fleet::Fleet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Attacker,
    Defender,
    Draw,
}

impl Winner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attacker => "attacker",
            Self::Defender => "defender",
            Self::Draw => "draw",
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Both sides' counts before any combat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub attacker: Fleet,
    pub defender: Fleet,
}

/// Counts of both sides after one round of combat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRound {
    /// 1-based.
    pub round: u32,
    pub attacker: Fleet,
    pub defender: Fleet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    pub winner: Winner,
    pub start: FleetSnapshot,
    /// One entry per round actually fought, in order.
    pub rounds: Vec<BattleRound>,
}

impl BattleReport {
    pub fn rounds_fought(&self) -> usize {
        self.rounds.len()
    }

    /// Counts after the last round, or the start snapshot if no round was fought.
    pub fn final_fleets(&self) -> (&Fleet, &Fleet) {
        match self.rounds.last() {
            Some(last) => (&last.attacker, &last.defender),
            None => (&self.start.attacker, &self.start.defender),
        }
    }
}
