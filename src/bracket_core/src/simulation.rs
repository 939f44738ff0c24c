use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::bracket::simulate_bracket_observed;
use crate::config::SimulationConfig;
use crate::constants::{ROUND_COUNT, TRIALS_PER_CHUNK};
use crate::error::SimulationError;
use crate::field::Field;
use crate::tally::WinTally;
use crate::team::Competitor;

/// One output row: the input row plus its championship percentage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompetitorResult {
    pub region: String,
    pub seed: u8,
    #[serde(rename = "team")]
    pub name: String,
    pub rating: f64,
    pub win_percentage: f64,
}

/// Outcome of a full run.
#[derive(Clone, Debug)]
pub struct SimulationResults {
    pub trials: u64,
    pub spread: f64,
    /// Seed the run was generated from, including one drawn from the OS
    pub seed: u64,
    /// Rows in field order
    pub rows: Vec<CompetitorResult>,
    pub tally: WinTally,
}

impl SimulationResults {
    fn new(field: &Field, config: &SimulationConfig, seed: u64, tally: WinTally) -> Self {
        let percentages = tally.percentages();
        let rows = field
            .competitors()
            .iter()
            .map(|c| CompetitorResult {
                region: c.region.clone(),
                seed: c.seed,
                name: c.name.clone(),
                rating: c.rating,
                win_percentage: percentages.get(&c.name).copied().unwrap_or(0.0),
            })
            .collect();
        SimulationResults {
            trials: tally.trials(),
            spread: config.spread,
            seed,
            rows,
            tally,
        }
    }

    pub fn get(&self, name: &str) -> Option<&CompetitorResult> {
        self.rows.iter().find(|row| row.name == name)
    }

    /// The row with the highest championship percentage.
    pub fn favorite(&self) -> Option<&CompetitorResult> {
        self.rows
            .iter()
            .max_by(|a, b| a.win_percentage.total_cmp(&b.win_percentage))
    }

    /// Percentage of trials in which `name` won a game in each round.
    pub fn advancement(&self, name: &str) -> [f64; ROUND_COUNT] {
        self.tally.advancement(name)
    }
}

/// A validated field paired with the parameters to simulate it with.
#[derive(Clone, Debug)]
pub struct Simulation {
    field: Field,
    config: SimulationConfig,
}

impl Simulation {
    /// Validate `config`, then build the field using its Final Four pairing.
    pub fn new(competitors: Vec<Competitor>, config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let field = Field::new(competitors, &config.final_four)?;
        Ok(Simulation { field, config })
    }

    /// Use an already validated field. Its pairing must match `config`.
    pub fn with_field(field: Field, config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        if !field.topology().regions().iter().map(String::as_str).eq(config.final_four.regions()) {
            return Err(SimulationError::InvalidRegionPairing(
                "field was built with a different Final Four pairing".to_string(),
            ));
        }
        Ok(Simulation { field, config })
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run every trial and convert the tally to percentages.
    pub fn run(&self) -> Result<SimulationResults, SimulationError> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        info!(
            trials = self.config.trials,
            spread = self.config.spread,
            seed,
            parallel = self.config.parallel,
            "starting bracket simulation"
        );

        let tally = if self.config.parallel {
            run_trials_parallel(&self.field, self.config.spread, self.config.trials, seed)?
        } else {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            run_trials(&self.field, self.config.spread, self.config.trials, &mut rng)?
        };

        let results = SimulationResults::new(&self.field, &self.config, seed, tally);
        if let Some(favorite) = results.favorite() {
            info!(
                trials = results.trials,
                favorite = %favorite.name,
                win_percentage = favorite.win_percentage,
                "bracket simulation finished"
            );
        }
        Ok(results)
    }
}

fn check_run(spread: f64, trials: u64) -> Result<(), SimulationError> {
    if trials == 0 {
        return Err(SimulationError::InvalidTrialCount);
    }
    if !(spread.is_finite() && spread > 0.0) {
        return Err(SimulationError::InvalidSpread(spread));
    }
    Ok(())
}

/// Simulate `trials` brackets on one thread, drawing from `rng`.
pub fn run_trials<R: Rng + ?Sized>(
    field: &Field,
    spread: f64,
    trials: u64,
    rng: &mut R,
) -> Result<WinTally, SimulationError> {
    check_run(spread, trials)?;
    let mut tally = WinTally::new(field);
    for _ in 0..trials {
        let champion =
            simulate_bracket_observed(field, spread, rng, |round, winners| tally.record_round(round, winners))?;
        tally.record_champion(champion);
    }
    Ok(tally)
}

/// Simulate `trials` brackets across the rayon pool.
///
/// Trials are split into chunks of `TRIALS_PER_CHUNK`; chunk `k` draws from
/// stream `k` of a ChaCha8 generator seeded with `seed`, so the result depends
/// only on `seed` and not on the number of threads.
pub fn run_trials_parallel(
    field: &Field,
    spread: f64,
    trials: u64,
    seed: u64,
) -> Result<WinTally, SimulationError> {
    check_run(spread, trials)?;
    let chunks = trials.div_ceil(TRIALS_PER_CHUNK);

    (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let start = chunk * TRIALS_PER_CHUNK;
            let len = TRIALS_PER_CHUNK.min(trials - start);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rng.set_stream(chunk);
            debug!(chunk, trials = len, "simulating chunk");
            run_trials(field, spread, len, &mut rng)
        })
        .try_reduce(
            || WinTally::new(field),
            |mut total, part| {
                total.merge(part);
                Ok(total)
            },
        )
}

/// Championship percentage for every competitor over `trials` brackets.
///
/// Percentages sum to 100. Zero trials or a non-positive spread is rejected
/// before anything is simulated.
pub fn aggregate<R: Rng + ?Sized>(
    field: &Field,
    spread: f64,
    trials: u64,
    rng: &mut R,
) -> Result<HashMap<String, f64>, SimulationError> {
    Ok(run_trials(field, spread, trials, rng)?.percentages())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::tests::{make_competitors, make_field};

    #[test]
    fn test_percentages_sum_to_100() {
        let field = make_field();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for trials in [1, 7, 500] {
            let pct = aggregate(&field, 10.0, trials, &mut rng).unwrap();
            assert_eq!(pct.len(), 64);
            let total: f64 = pct.values().sum();
            assert!((total - 100.0).abs() < 1e-9, "total was {}", total);
        }
    }

    #[test]
    fn test_zero_trials_rejected() {
        let field = make_field();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            aggregate(&field, 10.0, 0, &mut rng),
            Err(SimulationError::InvalidTrialCount)
        ));
        assert!(matches!(
            run_trials_parallel(&field, 10.0, 0, 1),
            Err(SimulationError::InvalidTrialCount)
        ));
    }

    #[test]
    fn test_bad_spread_rejected() {
        let field = make_field();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            aggregate(&field, 0.0, 10, &mut rng),
            Err(SimulationError::InvalidSpread(_))
        ));
    }

    #[test]
    fn test_deterministic_with_seed() {
        let field = make_field();
        let mut rng1 = ChaCha8Rng::seed_from_u64(2023);
        let mut rng2 = ChaCha8Rng::seed_from_u64(2023);
        let a = run_trials(&field, 10.0, 300, &mut rng1).unwrap();
        let b = run_trials(&field, 10.0, 300, &mut rng2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_deterministic_with_seed() {
        let field = make_field();
        let a = run_trials_parallel(&field, 10.0, 1_100, 99).unwrap();
        let b = run_trials_parallel(&field, 10.0, 1_100, 99).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.trials(), 1_100);
    }

    #[test]
    fn test_parallel_single_chunk_matches_sequential() {
        let field = make_field();
        let parallel = run_trials_parallel(&field, 10.0, 100, 5).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        rng.set_stream(0);
        let sequential = run_trials(&field, 10.0, 100, &mut rng).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_round_wins_are_consistent() {
        let field = make_field();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let tally = run_trials(&field, 10.0, 200, &mut rng).unwrap();
        for round in 0..ROUND_COUNT {
            let total: u64 = field
                .competitors()
                .iter()
                .map(|c| tally.round_wins(&c.name)[round])
                .sum();
            assert_eq!(total, 200 * (32 >> round));
        }
        for c in field.competitors() {
            assert_eq!(tally.round_wins(&c.name)[ROUND_COUNT - 1], tally.championships(&c.name));
        }
    }

    #[test]
    fn test_simulation_run() {
        let config = SimulationConfig::default().with_trials(400).with_seed(11);
        let sim = Simulation::new(make_competitors(), config.clone()).unwrap();
        let results = sim.run().unwrap();
        assert_eq!(results.trials, 400);
        assert_eq!(results.seed, 11);
        assert_eq!(results.rows.len(), 64);
        assert_eq!(results.rows[0].name, "East 1");
        let total: f64 = results.rows.iter().map(|r| r.win_percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert!(results.favorite().unwrap().seed <= 4);

        let again = Simulation::new(make_competitors(), config).unwrap().run().unwrap();
        assert_eq!(results.rows, again.rows);
    }

    #[test]
    fn test_simulation_parallel_run() {
        let config = SimulationConfig::default()
            .with_trials(1_000)
            .with_seed(3)
            .with_parallel(true);
        let results = Simulation::with_field(make_field(), config).unwrap().run().unwrap();
        assert_eq!(results.trials, 1_000);
        let adv = results.advancement("East 1");
        assert!(adv[0] > 95.0, "1 seeds rarely lose in the first round: {:?}", adv);
    }

    #[test]
    fn test_with_field_rejects_other_pairing() {
        let config = SimulationConfig::default()
            .with_final_four(crate::topology::RegionPairing::new(["East", "West"], ["South", "Midwest"]));
        assert!(matches!(
            Simulation::with_field(make_field(), config),
            Err(SimulationError::InvalidRegionPairing(_))
        ));
    }

    #[test]
    fn test_invalid_config_rejected_before_field() {
        let config = SimulationConfig::default().with_trials(0);
        let mut competitors = make_competitors();
        competitors.truncate(10);
        assert!(matches!(
            Simulation::new(competitors, config),
            Err(SimulationError::InvalidTrialCount)
        ));
    }
}
