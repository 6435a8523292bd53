//! The chess system: every tournament and every player
//!
//! Player records here are system-wide; each tournament additionally keeps
//! its own game log from which its winner is resolved.

use ordered_map::OrderedMap;
use tracing::{debug, info};

use crate::error::ChessError;
use crate::game::{Game, PlayerId, TournamentId, Winner};
use crate::participant::Participant;
use crate::results::{PlayerLevel, TournamentStatistics};
use crate::tournament::{Tournament, TournamentOps};

#[derive(Debug)]
pub struct ChessSystem {
    tournaments: OrderedMap<TournamentId, Tournament, TournamentOps>,
    players: OrderedMap<PlayerId, Participant>,
}

impl Default for ChessSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Locations start with a capital letter followed by lowercase letters and
/// spaces only.
pub fn is_valid_location(location: &str) -> bool {
    let mut chars = location.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            chars.all(|c| c.is_ascii_lowercase() || c == ' ')
        }
        _ => false,
    }
}

fn check_id(id: i32) -> Result<(), ChessError> {
    if id <= 0 {
        return Err(ChessError::InvalidId);
    }
    Ok(())
}

impl ChessSystem {
    pub fn new() -> Self {
        Self {
            tournaments: OrderedMap::with_ops(TournamentOps),
            players: OrderedMap::new(),
        }
    }

    pub fn tournament(&self, id: TournamentId) -> Option<&Tournament> {
        self.tournaments.get(&id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Participant> {
        self.players.get(&id)
    }

    pub fn tournament_count(&self) -> usize {
        self.tournaments.size()
    }

    pub fn player_count(&self) -> usize {
        self.players.size()
    }

    pub fn add_tournament(
        &mut self,
        id: TournamentId,
        max_games_per_player: i32,
        location: &str,
    ) -> Result<(), ChessError> {
        check_id(id)?;
        if !is_valid_location(location) {
            return Err(ChessError::InvalidLocation);
        }
        let max_games = u32::try_from(max_games_per_player)
            .ok()
            .filter(|&max| max > 0)
            .ok_or(ChessError::InvalidMaxGames)?;
        if self.tournaments.contains(&id) {
            return Err(ChessError::TournamentAlreadyExists);
        }

        self.tournaments
            .insert_or_update(&id, &Tournament::new(location, max_games))?;
        info!(tournament = id, location, max_games, "tournament added");
        Ok(())
    }

    pub fn add_game(
        &mut self,
        tournament_id: TournamentId,
        first: PlayerId,
        second: PlayerId,
        winner: Winner,
        play_time: i32,
    ) -> Result<(), ChessError> {
        check_id(tournament_id)?;
        check_id(first)?;
        check_id(second)?;
        if first == second {
            return Err(ChessError::InvalidId);
        }
        let tournament = self
            .tournaments
            .get(&tournament_id)
            .ok_or(ChessError::TournamentNotExist)?;
        if tournament.has_ended() {
            return Err(ChessError::TournamentEnded);
        }
        if tournament.has_game_between(first, second) {
            return Err(ChessError::GameAlreadyExists);
        }
        let play_time = u32::try_from(play_time).map_err(|_| ChessError::InvalidPlayTime)?;
        if tournament.has_reached_limit(first) || tournament.has_reached_limit(second) {
            return Err(ChessError::ExceededGames);
        }

        // Update copies first so a failure leaves every record untouched.
        let mut first_record = self.record_or_new(first);
        let mut second_record = self.record_or_new(second);
        first_record.record(winner.for_first(), play_time);
        second_record.record(winner.for_second(), play_time);

        let mut players = self.players.copy()?;
        players.insert_or_update(&first, &first_record)?;
        players.insert_or_update(&second, &second_record)?;

        let tournament = self
            .tournaments
            .get_mut(&tournament_id)
            .ok_or(ChessError::TournamentNotExist)?;
        let game_id = tournament.add_game(Game::new(first, second, winner, play_time))?;
        self.players = players;

        debug!(
            tournament = tournament_id,
            game = game_id,
            first,
            second,
            ?winner,
            play_time,
            "game added"
        );
        Ok(())
    }

    fn record_or_new(&self, id: PlayerId) -> Participant {
        self.players
            .get(&id)
            .copied()
            .unwrap_or_else(|| Participant::new(id))
    }

    /// Remove a tournament with all its games. Results those games
    /// contributed are taken back out of the player records.
    pub fn remove_tournament(&mut self, id: TournamentId) -> Result<(), ChessError> {
        check_id(id)?;
        let tournament = self
            .tournaments
            .get(&id)
            .ok_or(ChessError::TournamentNotExist)?;

        let mut players = self.players.copy()?;
        for game in tournament.games().values() {
            for player in [game.first, game.second].into_iter().flatten() {
                let (Some(result), Some(record)) =
                    (game.result_for(player), players.get_mut(&player))
                else {
                    continue;
                };
                record.unrecord(result, game.play_time);
            }
        }

        self.tournaments.remove(&id)?;
        self.players = players;
        info!(tournament = id, "tournament removed");
        Ok(())
    }

    /// Remove a player. Their games in tournaments that are still running
    /// become technical wins for the opponents. In finished tournaments their
    /// side is vacated but results and winners are kept, so the id can be
    /// reused without inheriting those games.
    ///
    /// Works on copies of both registries, so a failure changes nothing.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<(), ChessError> {
        check_id(id)?;
        if !self.players.contains(&id) {
            return Err(ChessError::PlayerNotExist);
        }

        let mut tournaments = self.tournaments.copy()?;
        let mut players = self.players.copy()?;

        let mut forfeits = Vec::new();
        for tournament_id in tournaments.key_snapshot()? {
            let Some(tournament) = tournaments.get_mut(&tournament_id) else {
                continue;
            };
            if tournament.has_ended() {
                tournament.vacate_player(id)?;
            } else {
                forfeits.extend(tournament.forfeit_player(id)?);
            }
        }

        for forfeit in &forfeits {
            if let Some(record) = players.get_mut(&forfeit.opponent) {
                record.award_win(forfeit.previous);
            }
        }
        players.remove(&id)?;

        self.tournaments = tournaments;
        self.players = players;
        info!(player = id, technical_wins = forfeits.len(), "player removed");
        Ok(())
    }

    /// End a tournament and return its winner.
    pub fn end_tournament(&mut self, id: TournamentId) -> Result<PlayerId, ChessError> {
        check_id(id)?;
        let tournament = self
            .tournaments
            .get_mut(&id)
            .ok_or(ChessError::TournamentNotExist)?;
        if tournament.has_ended() {
            return Err(ChessError::TournamentEnded);
        }
        if tournament.game_count() == 0 {
            return Err(ChessError::NoGames);
        }

        // Every game may have lost both its players to removal.
        let winner = tournament.end()?.ok_or(ChessError::NoGames)?;
        info!(tournament = id, winner, "tournament ended");
        Ok(winner)
    }

    /// Average duration of the player's games across all tournaments.
    pub fn average_play_time(&self, player: PlayerId) -> Result<f64, ChessError> {
        check_id(player)?;
        self.players
            .get(&player)
            .map(Participant::average_play_time)
            .ok_or(ChessError::PlayerNotExist)
    }

    /// Levels of every player with at least one game, best first; equal
    /// levels are listed by ascending id.
    pub fn player_levels(&self) -> Vec<PlayerLevel> {
        let mut levels: Vec<PlayerLevel> = self
            .players
            .values()
            .filter_map(|p| p.level().map(|level| PlayerLevel { id: p.id, level }))
            .collect();
        // Stable sort keeps ascending ids among equal levels.
        levels.sort_by(|a, b| b.level.total_cmp(&a.level));
        levels
    }

    /// Statistics of every ended tournament, by ascending tournament id.
    pub fn tournament_statistics(&self) -> Result<Vec<TournamentStatistics>, ChessError> {
        let stats: Vec<TournamentStatistics> = self
            .tournaments
            .iter()
            .filter_map(|(&id, tournament)| {
                tournament.winner().map(|winner| TournamentStatistics {
                    tournament: id,
                    winner,
                    longest_game_time: tournament.longest_game_time(),
                    average_game_time: tournament.average_game_time(),
                    location: tournament.location().to_string(),
                    games: tournament.game_count(),
                    players: tournament.player_count(),
                })
            })
            .collect();

        if stats.is_empty() {
            return Err(ChessError::NoTournamentsEnded);
        }
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod system_tests;
