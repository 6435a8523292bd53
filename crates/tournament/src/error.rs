//! Errors reported by the chess system

use ordered_map::MapError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("invalid id")]
    InvalidId,
    #[error("invalid tournament location")]
    InvalidLocation,
    #[error("invalid max games per player")]
    InvalidMaxGames,
    #[error("tournament already exists")]
    TournamentAlreadyExists,
    #[error("tournament does not exist")]
    TournamentNotExist,
    #[error("game already exists")]
    GameAlreadyExists,
    #[error("invalid play time")]
    InvalidPlayTime,
    #[error("player exceeded the tournament's games limit")]
    ExceededGames,
    #[error("player does not exist")]
    PlayerNotExist,
    #[error("tournament already ended")]
    TournamentEnded,
    #[error("tournament has no games")]
    NoGames,
    #[error("no tournament has ended")]
    NoTournamentsEnded,
    #[error("out of memory")]
    OutOfMemory,
    /// A map operation failed where the system's own bookkeeping guarantees
    /// it cannot.
    #[error("inconsistent records: {0}")]
    Inconsistent(MapError),
}

impl From<MapError> for ChessError {
    fn from(err: MapError) -> Self {
        match err {
            MapError::OutOfMemory => ChessError::OutOfMemory,
            other => ChessError::Inconsistent(other),
        }
    }
}
