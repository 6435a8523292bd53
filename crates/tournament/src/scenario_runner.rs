//! Scenario runner for replaying operations against a chess system

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{ScenarioConfig, Step};
use crate::error::ChessError;
use crate::game::{PlayerId, TournamentId};
use crate::system::ChessSystem;

/// Configuration for a scenario run
#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    /// Abort on the first rejected step instead of recording it
    pub stop_on_rejection: bool,
}

/// A step the system refused, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Position of the step in the scenario, starting at 1
    pub step: usize,
    pub action: String,
    pub reason: String,
}

/// A tournament ended during the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentWinner {
    pub tournament: TournamentId,
    pub winner: PlayerId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub applied: usize,
    pub rejections: Vec<Rejection>,
    pub winners: Vec<TournamentWinner>,
}

/// Replays scenarios step by step
pub struct ScenarioRunner {
    config: RunnerConfig,
}

impl ScenarioRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Apply every step of `scenario` to `system` in order.
    ///
    /// Rejected steps are logged and recorded in the outcome. Running out of
    /// memory always aborts the run, as does any rejection under
    /// `stop_on_rejection`.
    pub fn run(
        &self,
        scenario: &ScenarioConfig,
        system: &mut ChessSystem,
    ) -> Result<ScenarioOutcome, ChessError> {
        let mut outcome = ScenarioOutcome::default();
        info!(
            scenario = %scenario.name,
            steps = scenario.steps.len(),
            "replaying scenario"
        );

        for (index, step) in scenario.steps.iter().enumerate() {
            match Self::apply(step, system) {
                Ok(winner) => {
                    outcome.applied += 1;
                    outcome.winners.extend(winner);
                }
                Err(ChessError::OutOfMemory) => return Err(ChessError::OutOfMemory),
                Err(err) => {
                    warn!(step = index + 1, action = step.action(), %err, "step rejected");
                    if self.config.stop_on_rejection {
                        return Err(err);
                    }
                    outcome.rejections.push(Rejection {
                        step: index + 1,
                        action: step.action().to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            applied = outcome.applied,
            rejected = outcome.rejections.len(),
            "scenario finished"
        );
        Ok(outcome)
    }

    fn apply(step: &Step, system: &mut ChessSystem) -> Result<Option<TournamentWinner>, ChessError> {
        match step {
            Step::AddTournament {
                id,
                max_games_per_player,
                location,
            } => system.add_tournament(*id, *max_games_per_player, location)?,
            Step::AddGame {
                tournament,
                first,
                second,
                winner,
                play_time,
            } => system.add_game(*tournament, *first, *second, *winner, *play_time)?,
            Step::RemoveTournament { id } => system.remove_tournament(*id)?,
            Step::RemovePlayer { id } => system.remove_player(*id)?,
            Step::EndTournament { id } => {
                let winner = system.end_tournament(*id)?;
                return Ok(Some(TournamentWinner {
                    tournament: *id,
                    winner,
                }));
            }
        }
        Ok(None)
    }
}

impl Step {
    pub fn action(&self) -> &'static str {
        match self {
            Step::AddTournament { .. } => "add_tournament",
            Step::AddGame { .. } => "add_game",
            Step::RemoveTournament { .. } => "remove_tournament",
            Step::RemovePlayer { .. } => "remove_player",
            Step::EndTournament { .. } => "end_tournament",
        }
    }
}

/// Quick utility to replay a scenario on a fresh system
pub fn replay(scenario: &ScenarioConfig) -> Result<(ChessSystem, ScenarioOutcome), ChessError> {
    let mut system = ChessSystem::new();
    let outcome = ScenarioRunner::new(RunnerConfig::default()).run(scenario, &mut system)?;
    Ok((system, outcome))
}

#[cfg(test)]
#[path = "scenario_runner_tests.rs"]
mod scenario_runner_tests;
