use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::config::SimulationConfig;
use crate::constants::{DEFAULT_SPREAD, DEFAULT_TRIALS};
use crate::error::SimulationError;
use crate::simulation::Simulation;
use crate::team::Competitor;
use crate::topology::RegionPairing;
use crate::win_prob;

impl From<SimulationError> for PyErr {
    fn from(err: SimulationError) -> PyErr {
        match err {
            SimulationError::Io(_) => PyIOError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Probability that a team rated `rating1` beats a team rated `rating2`.
#[pyfunction]
#[pyo3(signature = (rating1, rating2, spread = DEFAULT_SPREAD))]
pub fn win_probability(rating1: f64, rating2: f64, spread: f64) -> PyResult<f64> {
    if !(spread.is_finite() && spread > 0.0) {
        return Err(SimulationError::InvalidSpread(spread).into());
    }
    Ok(win_prob::win_probability(rating1, rating2, spread))
}

/// Simulate the bracket and return championship percentages.
///
/// `rows` are `(region, seed, team, rating)` tuples; the result repeats each
/// row with its win percentage appended.
#[pyfunction]
#[pyo3(signature = (rows, spread = DEFAULT_SPREAD, trials = DEFAULT_TRIALS, seed = None, final_four = None, parallel = false))]
pub fn simulate_tournament(
    py: Python<'_>,
    rows: Vec<(String, u8, String, f64)>,
    spread: f64,
    trials: u64,
    seed: Option<u64>,
    final_four: Option<([String; 2], [String; 2])>,
    parallel: bool,
) -> PyResult<Vec<(String, u8, String, f64, f64)>> {
    let competitors = rows
        .into_iter()
        .map(|(region, seed, team, rating)| Competitor::new(team, region, seed, rating))
        .collect();
    let config = SimulationConfig {
        spread,
        trials,
        seed,
        final_four: final_four
            .map(|(first, second)| RegionPairing { pairs: [first, second] })
            .unwrap_or_default(),
        parallel,
    };

    let simulation = Simulation::new(competitors, config)?;
    let results = py.allow_threads(|| simulation.run())?;

    Ok(results
        .rows
        .into_iter()
        .map(|row| (row.region, row.seed, row.name, row.rating, row.win_percentage))
        .collect())
}

/// Python module definition
#[pymodule]
fn bracket_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(win_probability, m)?)?;
    m.add_function(wrap_pyfunction!(simulate_tournament, m)?)?;

    m.add("DEFAULT_SPREAD", DEFAULT_SPREAD)?;
    m.add("DEFAULT_TRIALS", DEFAULT_TRIALS)?;
    m.add(
        "DEFAULT_FINAL_FOUR",
        RegionPairing::default().pairs.to_vec(),
    )?;

    Ok(())
}
