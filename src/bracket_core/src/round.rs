use rand::Rng;

use crate::error::SimulationError;
use crate::team::Competitor;
use crate::topology::{BracketTopology, Round};
use crate::win_prob::{simulate_game, win_probability};

/// Competitors still alive entering a round, borrowed from the field.
pub type RoundState<'a> = Vec<&'a Competitor>;

/// Two competitors scheduled to meet in a round.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matchup<'a> {
    pub round: Round,
    pub top: &'a Competitor,
    pub bottom: &'a Competitor,
}

impl<'a> Matchup<'a> {
    /// Probability that `top` wins.
    pub fn win_probability(&self, spread: f64) -> f64 {
        win_probability(self.top.rating, self.bottom.rating, spread)
    }

    /// Play the game and return the winner.
    pub fn resolve<R: Rng + ?Sized>(&self, spread: f64, rng: &mut R) -> &'a Competitor {
        if simulate_game(self.top.rating, self.bottom.rating, spread, rng) {
            self.top
        } else {
            self.bottom
        }
    }
}

/// Partition `survivors` into the matchups of the round they are entering.
///
/// The round is determined by the number of survivors. Within a matchup the
/// competitor that appears first in `survivors` is `top`.
pub fn pair_round<'a>(
    survivors: &[&'a Competitor],
    topology: &BracketTopology,
) -> Result<Vec<Matchup<'a>>, SimulationError> {
    let round = Round::from_entrants(survivors.len())
        .ok_or(SimulationError::UnexpectedRoundSize(survivors.len()))?;

    let mut cells: Vec<Vec<&'a Competitor>> = vec![Vec::with_capacity(2); topology.cell_count(round)];
    for &competitor in survivors {
        let cell = topology.cell_of(round, competitor)?;
        cells[cell].push(competitor);
    }

    cells
        .into_iter()
        .enumerate()
        .map(|(cell, members)| match members.as_slice() {
            &[top, bottom] => Ok(Matchup {
                round,
                top,
                bottom,
            }),
            _ => Err(SimulationError::MalformedCell {
                round,
                cell,
                found: members.len(),
            }),
        })
        .collect()
}

/// Play one round and return the winners, in matchup order.
///
/// The output is always half the size of the input.
pub fn advance_round<'a, R: Rng + ?Sized>(
    survivors: &[&'a Competitor],
    topology: &BracketTopology,
    spread: f64,
    rng: &mut R,
) -> Result<RoundState<'a>, SimulationError> {
    let matchups = pair_round(survivors, topology)?;
    Ok(matchups
        .iter()
        .map(|matchup| matchup.resolve(spread, rng))
        .collect())
}
