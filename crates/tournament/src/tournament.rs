//! A single tournament: its settings, game log and outcome

use std::cmp::Ordering;

use ordered_map::{EntryOps, MapError, OrderedMap};

use crate::game::{Forfeit, Game, GameId, PlayerId, TournamentId};
use crate::participant::Participant;
use crate::ranking::RankingResolver;

#[derive(Debug)]
pub struct Tournament {
    location: String,
    max_games_per_player: u32,
    /// Game log keyed by sequence number
    games: OrderedMap<GameId, Game>,
    /// Games played here by each player still registered
    games_per_player: OrderedMap<PlayerId, u32>,
    winner: Option<PlayerId>,
}

impl Tournament {
    pub fn new(location: &str, max_games_per_player: u32) -> Self {
        Self {
            location: location.to_string(),
            max_games_per_player,
            games: OrderedMap::new(),
            games_per_player: OrderedMap::new(),
            winner: None,
        }
    }

    /// Deep copy, failing if either nested map fails to copy.
    pub fn try_copy(&self) -> Result<Self, MapError> {
        Ok(Self {
            location: self.location.clone(),
            max_games_per_player: self.max_games_per_player,
            games: self.games.copy()?,
            games_per_player: self.games_per_player.copy()?,
            winner: self.winner,
        })
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn max_games_per_player(&self) -> u32 {
        self.max_games_per_player
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn has_ended(&self) -> bool {
        self.winner.is_some()
    }

    pub fn games(&self) -> &OrderedMap<GameId, Game> {
        &self.games
    }

    pub fn game_count(&self) -> usize {
        self.games.size()
    }

    pub fn player_count(&self) -> usize {
        self.games_per_player.size()
    }

    pub fn games_played_by(&self, player: PlayerId) -> u32 {
        self.games_per_player.get(&player).copied().unwrap_or(0)
    }

    pub fn has_reached_limit(&self, player: PlayerId) -> bool {
        self.games_played_by(player) >= self.max_games_per_player
    }

    pub fn has_game_between(&self, a: PlayerId, b: PlayerId) -> bool {
        self.games.values().any(|game| game.is_between(a, b))
    }

    /// Append a game under the next sequence number and return that number.
    pub fn add_game(&mut self, game: Game) -> Result<GameId, MapError> {
        let id = self.games.last_key().map_or(1, |last| last + 1);
        let mut counts = self.games_per_player.copy()?;
        for player in [game.first, game.second].into_iter().flatten() {
            let played = counts.get(&player).copied().unwrap_or(0);
            counts.insert_or_update(&player, &(played + 1))?;
        }
        self.games.insert_or_update(&id, &game)?;
        self.games_per_player = counts;
        Ok(id)
    }

    /// Per-player results of this tournament's games. Vacated sides are
    /// skipped.
    pub fn participants(&self) -> Result<OrderedMap<PlayerId, Participant>, MapError> {
        let mut participants: OrderedMap<PlayerId, Participant> = OrderedMap::new();
        for game in self.games.values() {
            for player in [game.first, game.second].into_iter().flatten() {
                let mut participant = participants
                    .get(&player)
                    .copied()
                    .unwrap_or_else(|| Participant::new(player));
                if let Some(result) = game.result_for(player) {
                    participant.record(result, game.play_time);
                }
                participants.insert_or_update(&player, &participant)?;
            }
        }
        Ok(participants)
    }

    /// Resolve and store the winner. `Ok(None)` if no registered player
    /// remains in any game, in which case the tournament stays open.
    pub fn end(&mut self) -> Result<Option<PlayerId>, MapError> {
        let participants = self.participants()?;
        self.winner = RankingResolver::resolve(&participants)?;
        Ok(self.winner)
    }

    /// Award every game `player` took part in to their opponent and forget
    /// the player. Returns the opponents whose results changed.
    pub fn forfeit_player(&mut self, player: PlayerId) -> Result<Vec<Forfeit>, MapError> {
        let mut forfeits = Vec::new();
        for id in self.games.key_snapshot()? {
            if let Some(game) = self.games.get_mut(&id) {
                if let Some(forfeit) = game.forfeit(player) {
                    forfeits.push(forfeit);
                }
            }
        }
        if self.games_per_player.contains(&player) {
            self.games_per_player.remove(&player)?;
        }
        Ok(forfeits)
    }

    /// Clear `player` out of every game of a finished tournament. Results,
    /// the winner and the per-player counts used by statistics stay as they
    /// were.
    pub fn vacate_player(&mut self, player: PlayerId) -> Result<(), MapError> {
        for id in self.games.key_snapshot()? {
            if let Some(game) = self.games.get_mut(&id) {
                game.vacate(player);
            }
        }
        Ok(())
    }

    pub fn longest_game_time(&self) -> u32 {
        self.games.values().map(|game| game.play_time).max().unwrap_or(0)
    }

    pub fn average_game_time(&self) -> f64 {
        if self.games.is_empty() {
            return 0.0;
        }
        let total: u64 = self.games.values().map(|game| u64::from(game.play_time)).sum();
        total as f64 / self.games.size() as f64
    }
}

/// Entry operations for the tournament registry: ids compare as integers and
/// tournaments are deep-copied, reporting a failed nested copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct TournamentOps;

impl EntryOps<TournamentId, Tournament> for TournamentOps {
    fn copy_key(&self, key: &TournamentId) -> Option<TournamentId> {
        Some(*key)
    }

    fn copy_value(&self, tournament: &Tournament) -> Option<Tournament> {
        tournament.try_copy().ok()
    }

    fn compare_keys(&self, a: &TournamentId, b: &TournamentId) -> Ordering {
        a.cmp(b)
    }
}

#[cfg(test)]
#[path = "tournament_tests.rs"]
mod tournament_tests;
