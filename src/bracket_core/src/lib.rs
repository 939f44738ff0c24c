//! Bracket Core - Monte Carlo championship odds for the 64-team NCAA bracket.
//!
//! Each trial plays the fixed bracket from the round of 64 to a champion,
//! drawing every game from a normal model of the rating difference. Repeating
//! the trial many times gives each team's probability of winning the title.
//!
//! Python bindings are available behind the `python` feature.

pub mod bracket;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod field;
pub mod round;
pub mod simulation;
pub mod tally;
pub mod team;
pub mod topology;
pub mod win_prob;

#[cfg(feature = "python")]
mod python;

pub use bracket::{simulate_bracket, simulate_bracket_observed};
pub use config::SimulationConfig;
pub use constants::{DEFAULT_SPREAD, DEFAULT_TRIALS, FIELD_SIZE, ROUND_COUNT, SEED_GROUPS};
pub use dataset::{read_field, read_field_from_path, results_file_name, write_results, write_results_to_path};
pub use error::SimulationError;
pub use field::Field;
pub use round::{advance_round, pair_round, Matchup, RoundState};
pub use simulation::{aggregate, run_trials, run_trials_parallel, CompetitorResult, Simulation, SimulationResults};
pub use tally::WinTally;
pub use team::Competitor;
pub use topology::{BracketTopology, PairingRule, RegionPairing, Round};
pub use win_prob::{simulate_game, win_probability};
