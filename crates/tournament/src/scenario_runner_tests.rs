use super::*;
use crate::game::Winner;

fn game(first: PlayerId, second: PlayerId, winner: Winner, play_time: i32) -> Step {
    Step::AddGame {
        tournament: 1,
        first,
        second,
        winner,
        play_time,
    }
}

fn london_scenario() -> ScenarioConfig {
    ScenarioConfig {
        name: "london".to_string(),
        steps: vec![
            Step::AddTournament {
                id: 1,
                max_games_per_player: 4,
                location: "London".to_string(),
            },
            game(1, 2, Winner::FirstPlayer, 2000),
            game(1, 3, Winner::FirstPlayer, 3000),
            game(3, 2, Winner::SecondPlayer, 3000),
            game(4, 1, Winner::SecondPlayer, 1000),
            game(2, 4, Winner::FirstPlayer, 3500),
            game(3, 4, Winner::Draw, 400),
            Step::EndTournament { id: 1 },
        ],
    }
}

#[test]
fn test_replay_records_winner() {
    let (system, outcome) = replay(&london_scenario()).unwrap();
    assert_eq!(outcome.applied, 8);
    assert!(outcome.rejections.is_empty());
    assert_eq!(
        outcome.winners,
        vec![TournamentWinner {
            tournament: 1,
            winner: 1
        }]
    );
    assert_eq!(system.player_count(), 4);
}

#[test]
fn test_rejections_are_recorded_and_skipped() {
    let mut scenario = london_scenario();
    scenario.steps.insert(1, game(1, 1, Winner::Draw, 10));
    scenario.steps.push(Step::EndTournament { id: 1 });

    let (_, outcome) = replay(&scenario).unwrap();
    assert_eq!(outcome.applied, 8);
    assert_eq!(
        outcome.rejections,
        vec![
            Rejection {
                step: 2,
                action: "add_game".to_string(),
                reason: ChessError::InvalidId.to_string(),
            },
            Rejection {
                step: 10,
                action: "end_tournament".to_string(),
                reason: ChessError::TournamentEnded.to_string(),
            },
        ]
    );
}

#[test]
fn test_stop_on_rejection() {
    let mut scenario = london_scenario();
    scenario.steps.insert(2, Step::RemovePlayer { id: 9 });

    let runner = ScenarioRunner::new(RunnerConfig {
        stop_on_rejection: true,
    });
    let mut system = ChessSystem::new();
    assert_eq!(
        runner.run(&scenario, &mut system),
        Err(ChessError::PlayerNotExist)
    );
    // Steps before the rejection stay applied
    assert_eq!(system.tournament(1).map(|t| t.game_count()), Some(1));
}

#[test]
fn test_empty_scenario() {
    let (system, outcome) = replay(&ScenarioConfig::default()).unwrap();
    assert_eq!(outcome, ScenarioOutcome::default());
    assert_eq!(system.tournament_count(), 0);
}
