//! Games played inside a tournament

use serde::{Deserialize, Serialize};

pub type PlayerId = i32;
pub type TournamentId = i32;
/// Sequence number of a game within its tournament, starting at 1.
pub type GameId = u32;

/// Outcome of a game as recorded by the organizer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    FirstPlayer,
    SecondPlayer,
    Draw,
}

/// Result of a single game from one player's perspective
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl Winner {
    pub fn for_first(self) -> GameResult {
        match self {
            Winner::FirstPlayer => GameResult::Win,
            Winner::SecondPlayer => GameResult::Loss,
            Winner::Draw => GameResult::Draw,
        }
    }

    pub fn for_second(self) -> GameResult {
        match self {
            Winner::FirstPlayer => GameResult::Loss,
            Winner::SecondPlayer => GameResult::Win,
            Winner::Draw => GameResult::Draw,
        }
    }
}

/// A recorded game. A side is `None` once its player has been removed
/// from the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    pub first: Option<PlayerId>,
    pub second: Option<PlayerId>,
    pub winner: Winner,
    /// Duration in seconds
    pub play_time: u32,
}

/// A technical win handed to the opponent of a removed player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forfeit {
    pub opponent: PlayerId,
    /// What the opponent had before the game was awarded to them
    pub previous: GameResult,
}

impl Game {
    pub fn new(first: PlayerId, second: PlayerId, winner: Winner, play_time: u32) -> Self {
        Self {
            first: Some(first),
            second: Some(second),
            winner,
            play_time,
        }
    }

    /// True if both players are still present and they are `a` and `b`, in
    /// either order.
    pub fn is_between(&self, a: PlayerId, b: PlayerId) -> bool {
        matches!(
            (self.first, self.second),
            (Some(x), Some(y)) if (x == a && y == b) || (x == b && y == a)
        )
    }

    /// The result `player` got from this game, if they played it.
    pub fn result_for(&self, player: PlayerId) -> Option<GameResult> {
        if self.first == Some(player) {
            Some(self.winner.for_first())
        } else if self.second == Some(player) {
            Some(self.winner.for_second())
        } else {
            None
        }
    }

    /// Vacate `player`'s side without touching the recorded outcome.
    pub fn vacate(&mut self, player: PlayerId) {
        if self.first == Some(player) {
            self.first = None;
        } else if self.second == Some(player) {
            self.second = None;
        }
    }

    /// Vacate `player`'s side and award the game to the opponent.
    ///
    /// Returns the opponent's previous result when the award changed it;
    /// `None` if the opponent is gone too or already won.
    pub fn forfeit(&mut self, player: PlayerId) -> Option<Forfeit> {
        let (opponent, award) = if self.first == Some(player) {
            self.first = None;
            (self.second, Winner::SecondPlayer)
        } else if self.second == Some(player) {
            self.second = None;
            (self.first, Winner::FirstPlayer)
        } else {
            return None;
        };

        let opponent = opponent?;
        let previous = match award {
            Winner::FirstPlayer => self.winner.for_first(),
            _ => self.winner.for_second(),
        };
        self.winner = award;
        (previous != GameResult::Win).then_some(Forfeit { opponent, previous })
    }
}
