//! Per-player win/loss/tie counters

use serde::{Deserialize, Serialize};

use crate::game::{GameResult, PlayerId};

pub const LEVEL_WIN_WEIGHT: f64 = 6.0;
pub const LEVEL_LOSS_WEIGHT: f64 = 10.0;
pub const LEVEL_TIE_WEIGHT: f64 = 2.0;

/// Accumulated results of one player.
///
/// The system keeps one of these per registered player, and the ranking
/// builds fresh ones per tournament from that tournament's games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: PlayerId,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    /// Total seconds spent in games
    pub play_time: u64,
}

impl Participant {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// Tournament score: 2 points per win, 1 per tie, averaged over games.
    /// `None` for a player without games.
    pub fn score(&self) -> Option<f64> {
        let games = self.games_played();
        if games == 0 {
            return None;
        }
        Some(f64::from(2 * self.wins + self.ties) / f64::from(games))
    }

    /// System-wide level: `(6W - 10L + 2D) / games`. `None` without games.
    pub fn level(&self) -> Option<f64> {
        let games = self.games_played();
        if games == 0 {
            return None;
        }
        let weighted = LEVEL_WIN_WEIGHT * f64::from(self.wins)
            - LEVEL_LOSS_WEIGHT * f64::from(self.losses)
            + LEVEL_TIE_WEIGHT * f64::from(self.ties);
        Some(weighted / f64::from(games))
    }

    pub fn average_play_time(&self) -> f64 {
        match self.games_played() {
            0 => 0.0,
            games => self.play_time as f64 / f64::from(games),
        }
    }

    pub fn record(&mut self, result: GameResult, play_time: u32) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.ties += 1,
        }
        self.play_time += u64::from(play_time);
    }

    /// Undo a previous [`record`](Self::record).
    pub fn unrecord(&mut self, result: GameResult, play_time: u32) {
        match result {
            GameResult::Win => take_one(&mut self.wins, "wins"),
            GameResult::Loss => take_one(&mut self.losses, "losses"),
            GameResult::Draw => take_one(&mut self.ties, "ties"),
        }
        debug_assert!(
            self.play_time >= u64::from(play_time),
            "player {} has less play time than a game being undone",
            self.id
        );
        self.play_time = self.play_time.saturating_sub(u64::from(play_time));
    }

    /// Turn an earlier loss or draw into a win, keeping the game count.
    pub fn award_win(&mut self, previous: GameResult) {
        match previous {
            GameResult::Win => return,
            GameResult::Loss => take_one(&mut self.losses, "losses"),
            GameResult::Draw => take_one(&mut self.ties, "ties"),
        }
        self.wins += 1;
    }
}

/// Counters only drop for games they were raised for; an empty counter here
/// means the records are out of step with the games.
fn take_one(count: &mut u32, what: &str) {
    debug_assert!(*count > 0, "no {what} left to take back");
    *count = count.saturating_sub(1);
}

#[cfg(test)]
#[path = "participant_tests.rs"]
mod participant_tests;
