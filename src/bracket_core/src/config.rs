use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SPREAD, DEFAULT_TRIALS};
use crate::error::SimulationError;
use crate::topology::RegionPairing;

/// Parameters of one simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Standard deviation of a game's margin around the rating difference
    pub spread: f64,

    /// Number of brackets to simulate
    pub trials: u64,

    /// Generator seed; `None` draws one from the OS
    pub seed: Option<u64>,

    /// Regions that meet in the Final Four
    pub final_four: RegionPairing,

    /// Spread trials over the rayon thread pool
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            spread: DEFAULT_SPREAD,
            trials: DEFAULT_TRIALS,
            seed: None,
            final_four: RegionPairing::default(),
            parallel: false,
        }
    }
}

impl SimulationConfig {
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_final_four(mut self, final_four: RegionPairing) -> Self {
        self.final_four = final_four;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Reject configurations that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.trials == 0 {
            return Err(SimulationError::InvalidTrialCount);
        }
        if !(self.spread.is_finite() && self.spread > 0.0) {
            return Err(SimulationError::InvalidSpread(self.spread));
        }
        self.final_four.validate()
    }
}
