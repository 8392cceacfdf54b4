//! End-of-round scoreboard data.

use crate::arena::round::RoundState;
use crate::arena::types::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerLine {
    pub player: usize,
    pub color: Rgb,
    pub kills: usize,
    pub length: usize,
    pub alive: bool,
}

/// A player index paired with the value they led with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leader {
    pub player: usize,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    /// `None` is a draw: nobody survived.
    pub survivor: Option<usize>,
    pub players: Vec<PlayerLine>,
    pub most_kills: Option<Leader>,
    pub longest: Option<Leader>,
    pub death_order: Vec<usize>,
}

impl RoundSummary {
    pub fn from_round(round: &RoundState) -> Self {
        let players: Vec<PlayerLine> = round
            .snakes
            .iter()
            .enumerate()
            .map(|(player, snake)| PlayerLine {
                player,
                color: snake.color,
                kills: snake.kills.len(),
                length: snake.len(),
                alive: snake.alive,
            })
            .collect();

        Self {
            survivor: round.last_survivor,
            most_kills: leader(&players, |line| line.kills),
            longest: leader(&players, |line| line.length),
            players,
            death_order: round.death_order.clone(),
        }
    }

    pub fn is_draw(&self) -> bool {
        self.survivor.is_none()
    }

    pub fn headline(&self) -> String {
        match self.survivor {
            Some(player) => format!("Player {} wins!", player + 1),
            None => "Game over!".to_string(),
        }
    }

    pub fn most_kills_text(&self) -> Option<String> {
        self.most_kills.map(|leader| {
            format!(
                "Most kills: Player {} with {} {}.",
                leader.player + 1,
                leader.value,
                if leader.value == 1 { "kill" } else { "kills" }
            )
        })
    }

    pub fn longest_text(&self) -> Option<String> {
        self.longest.map(|leader| {
            format!(
                "Longest snake: Player {} with a length of {}.",
                leader.player + 1,
                leader.value
            )
        })
    }

    pub fn death_order_text(&self) -> String {
        if self.death_order.is_empty() {
            return "Nobody died.".to_string();
        }
        let players: Vec<String> = self
            .death_order
            .iter()
            .map(|player| (player + 1).to_string())
            .collect();
        format!("The order of death was Players {}.", players.join(", "))
    }
}

/// First player with the strictly highest value; earlier players win ties.
fn leader(players: &[PlayerLine], value: impl Fn(&PlayerLine) -> usize) -> Option<Leader> {
    players.iter().fold(None, |best: Option<Leader>, line| {
        let candidate = Leader {
            player: line.player,
            value: value(line),
        };
        match best {
            Some(b) if b.value >= candidate.value => Some(b),
            _ => Some(candidate),
        }
    })
}
