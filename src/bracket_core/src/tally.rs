use std::collections::HashMap;

use crate::constants::ROUND_COUNT;
use crate::field::Field;
use crate::team::Competitor;
use crate::topology::Round;

/// Championship and per-round win counts, keyed by team name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WinTally {
    trials: u64,
    championships: HashMap<String, u64>,
    round_wins: HashMap<String, [u64; ROUND_COUNT]>,
}

impl WinTally {
    /// Empty tally with a zero entry for every competitor in `field`.
    pub fn new(field: &Field) -> Self {
        let names = field.competitors().iter().map(|c| c.name.clone());
        WinTally {
            trials: 0,
            championships: names.clone().map(|name| (name, 0)).collect(),
            round_wins: names.map(|name| (name, [0; ROUND_COUNT])).collect(),
        }
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Count the winners of one round of a trial.
    pub fn record_round(&mut self, round: Round, winners: &[&Competitor]) {
        for winner in winners {
            let counts = self
                .round_wins
                .entry(winner.name.clone())
                .or_insert([0; ROUND_COUNT]);
            counts[round.index()] += 1;
        }
    }

    /// Count a finished trial.
    pub fn record_champion(&mut self, champion: &Competitor) {
        self.trials += 1;
        *self.championships.entry(champion.name.clone()).or_insert(0) += 1;
    }

    /// Fold another tally into this one. Addition only, so the result does
    /// not depend on merge order.
    pub fn merge(&mut self, other: WinTally) {
        self.trials += other.trials;
        for (name, count) in other.championships {
            *self.championships.entry(name).or_insert(0) += count;
        }
        for (name, counts) in other.round_wins {
            let entry = self.round_wins.entry(name).or_insert([0; ROUND_COUNT]);
            for (total, count) in entry.iter_mut().zip(counts) {
                *total += count;
            }
        }
    }

    pub fn championships(&self, name: &str) -> u64 {
        self.championships.get(name).copied().unwrap_or(0)
    }

    pub fn round_wins(&self, name: &str) -> [u64; ROUND_COUNT] {
        self.round_wins.get(name).copied().unwrap_or([0; ROUND_COUNT])
    }

    /// Championship percentage per team: `100 * count / trials`.
    ///
    /// Empty if no trial has been recorded.
    pub fn percentages(&self) -> HashMap<String, f64> {
        if self.trials == 0 {
            return HashMap::new();
        }
        let trials = self.trials as f64;
        self.championships
            .iter()
            .map(|(name, &count)| (name.clone(), 100.0 * count as f64 / trials))
            .collect()
    }

    /// Percentage of trials in which `name` won its game in each round.
    pub fn advancement(&self, name: &str) -> [f64; ROUND_COUNT] {
        if self.trials == 0 {
            return [0.0; ROUND_COUNT];
        }
        let trials = self.trials as f64;
        self.round_wins(name).map(|count| 100.0 * count as f64 / trials)
    }
}
