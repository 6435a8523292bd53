//! Chess tournament bookkeeping
//!
//! This crate provides:
//! - A registry of tournaments, players and games built on [`ordered_map`]
//! - Winner resolution by score, losses, wins and id
//! - Player levels and per-tournament statistics reports
//! - A scenario runner that replays TOML scenario files
//!
//! # Usage
//!
//! ```bash
//! # Replay a scenario and print the reports
//! cargo run -p tournament -- run crates/tournament/scenarios/london.toml
//!
//! # Same, as JSON
//! cargo run -p tournament -- run crates/tournament/scenarios/london.toml --json
//! ```

mod config;
mod error;
mod game;
mod participant;
mod ranking;
mod results;
mod scenario_runner;
mod system;
mod tournament;

pub use config::*;
pub use error::*;
pub use game::*;
pub use participant::*;
pub use ranking::*;
pub use results::*;
pub use scenario_runner::*;
pub use system::*;
pub use tournament::*;
