//! Player levels and tournament statistics reporting

use serde::{Deserialize, Serialize};

use crate::error::ChessError;
use crate::game::{PlayerId, TournamentId};
use crate::system::ChessSystem;

/// A player's system-wide level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerLevel {
    pub id: PlayerId,
    pub level: f64,
}

/// Summary of one ended tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentStatistics {
    pub tournament: TournamentId,
    pub winner: PlayerId,
    /// Seconds
    pub longest_game_time: u32,
    /// Seconds
    pub average_game_time: f64,
    pub location: String,
    pub games: usize,
    pub players: usize,
}

/// Complete report of a chess system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemReport {
    /// Name/description of the run
    pub name: String,
    pub levels: Vec<PlayerLevel>,
    /// Empty when no tournament has ended
    pub tournaments: Vec<TournamentStatistics>,
}

impl SystemReport {
    /// Collect the current levels and statistics of `system`.
    pub fn collect(name: &str, system: &ChessSystem) -> Result<Self, ChessError> {
        let tournaments = match system.tournament_statistics() {
            Ok(stats) => stats,
            Err(ChessError::NoTournamentsEnded) => Vec::new(),
            Err(e) => return Err(e),
        };
        Ok(Self {
            name: name.to_string(),
            levels: system.player_levels(),
            tournaments,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// One `<id> <level>` line per player
    pub fn levels_report(&self) -> String {
        let mut report = String::new();
        for entry in &self.levels {
            report.push_str(&format!("{} {:.2}\n", entry.id, entry.level));
        }
        report
    }

    /// Six lines per ended tournament: winner, longest game, average game,
    /// location, number of games, number of players
    pub fn statistics_report(&self) -> String {
        let mut report = String::new();
        for stats in &self.tournaments {
            report.push_str(&format!("{}\n", stats.winner));
            report.push_str(&format!("{}\n", stats.longest_game_time));
            report.push_str(&format!("{:.2}\n", stats.average_game_time));
            report.push_str(&format!("{}\n", stats.location));
            report.push_str(&format!("{}\n", stats.games));
            report.push_str(&format!("{}\n", stats.players));
        }
        report
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Chess system: {} ===\n\n", self.name));

        report.push_str("Player levels:\n");
        report.push_str(&format!("{:<10} {:>8}\n", "Player", "Level"));
        report.push_str(&"-".repeat(19));
        report.push('\n');
        for entry in &self.levels {
            report.push_str(&format!("{:<10} {:>8.2}\n", entry.id, entry.level));
        }

        report.push_str("\nEnded tournaments:\n");
        if self.tournaments.is_empty() {
            report.push_str("(none)\n");
            return report;
        }
        report.push_str(&format!(
            "{:<6} {:<16} {:>7} {:>8} {:>9} {:>6} {:>8}\n",
            "Id", "Location", "Winner", "Longest", "Average", "Games", "Players"
        ));
        report.push_str(&"-".repeat(66));
        report.push('\n');
        for stats in &self.tournaments {
            report.push_str(&format!(
                "{:<6} {:<16} {:>7} {:>8} {:>9.2} {:>6} {:>8}\n",
                stats.tournament,
                stats.location,
                stats.winner,
                stats.longest_game_time,
                stats.average_game_time,
                stats.games,
                stats.players
            ));
        }

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
