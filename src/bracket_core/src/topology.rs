//! Static pairing structure of the 64-team bracket.
//!
//! Every round partitions its survivors into cells of exactly two. The cell a
//! competitor lands in depends only on its region and seed, so the tables
//! below fully describe who can meet whom in each round.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::constants::{DEFAULT_FINAL_FOUR, FIELD_SIZE, REGION_COUNT, SEEDS_PER_REGION};
use crate::error::SimulationError;
use crate::team::Competitor;

/// Seed to cell table for the round of 64: seed `s` meets seed `17 - s`.
static ROUND_OF_64_CELLS: [usize; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 7, 6, 5, 4, 3, 2, 1, 0];

/// Seed to group table for the round of 32 (see `SEED_GROUPS`).
static ROUND_OF_32_GROUPS: [usize; 16] = [0, 1, 2, 3, 3, 2, 1, 0, 0, 1, 2, 3, 3, 2, 1, 0];

/// Groups {1,8,9,16} + {4,5,12,13} and {2,7,10,15} + {3,6,11,14}.
static SWEET_SIXTEEN_GROUPS: [usize; 16] = [0, 1, 1, 0, 0, 1, 1, 0, 0, 1, 1, 0, 0, 1, 1, 0];

/// One group per region.
static ELITE_EIGHT_GROUPS: [usize; 16] = [0; 16];

/// One elimination stage of the bracket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Round {
    RoundOf64,
    RoundOf32,
    SweetSixteen,
    EliteEight,
    FinalFour,
    Championship,
}

/// How a round partitions its survivors into two-competitor cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairingRule {
    /// Within each region, seed `s` plays seed `17 - s`.
    SeedComplement,
    /// Within each region, the two survivors of the same seed group play.
    SeedGroups {
        table: &'static [usize; 16],
        groups_per_region: usize,
    },
    /// Survivors of paired regions play each other.
    RegionPairs,
    /// The last two survivors play.
    Direct,
}

impl Round {
    pub const ALL: [Round; 6] = [
        Round::RoundOf64,
        Round::RoundOf32,
        Round::SweetSixteen,
        Round::EliteEight,
        Round::FinalFour,
        Round::Championship,
    ];

    /// Zero-based position of the round in the bracket.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of competitors entering the round.
    pub fn entrants(self) -> usize {
        FIELD_SIZE >> self.index()
    }

    /// The round that starts with `entrants` competitors, if any.
    pub fn from_entrants(entrants: usize) -> Option<Round> {
        Round::ALL.into_iter().find(|round| round.entrants() == entrants)
    }

    pub fn next(self) -> Option<Round> {
        Round::ALL.get(self.index() + 1).copied()
    }

    pub fn rule(self) -> PairingRule {
        match self {
            Round::RoundOf64 => PairingRule::SeedComplement,
            Round::RoundOf32 => PairingRule::SeedGroups {
                table: &ROUND_OF_32_GROUPS,
                groups_per_region: 4,
            },
            Round::SweetSixteen => PairingRule::SeedGroups {
                table: &SWEET_SIXTEEN_GROUPS,
                groups_per_region: 2,
            },
            Round::EliteEight => PairingRule::SeedGroups {
                table: &ELITE_EIGHT_GROUPS,
                groups_per_region: 1,
            },
            Round::FinalFour => PairingRule::RegionPairs,
            Round::Championship => PairingRule::Direct,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Round::RoundOf64 => "Round of 64",
            Round::RoundOf32 => "Round of 32",
            Round::SweetSixteen => "Sweet Sixteen",
            Round::EliteEight => "Elite Eight",
            Round::FinalFour => "Final Four",
            Round::Championship => "Championship",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which regions meet in the Final Four.
///
/// The two pairs also fix the canonical region order used by the bracket:
/// `pairs[0][0], pairs[0][1], pairs[1][0], pairs[1][1]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionPairing {
    pub pairs: [[String; 2]; 2],
}

impl Default for RegionPairing {
    fn default() -> Self {
        RegionPairing {
            pairs: DEFAULT_FINAL_FOUR.map(|pair| pair.map(String::from)),
        }
    }
}

impl RegionPairing {
    pub fn new(first: [&str; 2], second: [&str; 2]) -> Self {
        RegionPairing {
            pairs: [first.map(String::from), second.map(String::from)],
        }
    }

    /// Regions in bracket order.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().flatten().map(String::as_str)
    }

    /// Check that the pairing names four distinct, non-empty regions.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let mut seen = HashSet::new();
        for region in self.regions() {
            if region.trim().is_empty() {
                return Err(SimulationError::InvalidRegionPairing("empty region name".to_string()));
            }
            if !seen.insert(region) {
                return Err(SimulationError::InvalidRegionPairing(format!(
                    "region {:?} listed twice",
                    region
                )));
            }
        }
        Ok(())
    }
}

/// Resolved bracket structure for one run.
#[derive(Clone, Debug)]
pub struct BracketTopology {
    regions: [String; REGION_COUNT],
}

impl BracketTopology {
    pub fn new(pairing: &RegionPairing) -> Result<Self, SimulationError> {
        pairing.validate()?;
        let [[a, b], [c, d]] = pairing.pairs.clone();
        Ok(BracketTopology { regions: [a, b, c, d] })
    }

    /// Regions in bracket order.
    pub fn regions(&self) -> &[String; REGION_COUNT] {
        &self.regions
    }

    pub fn region_index(&self, region: &str) -> Option<usize> {
        self.regions.iter().position(|r| r == region)
    }

    /// Number of two-competitor cells in `round`.
    pub fn cell_count(&self, round: Round) -> usize {
        round.entrants() / 2
    }

    /// The cell `competitor` plays in during `round`.
    ///
    /// Cells are numbered region-major in bracket order, so cell order is
    /// stable from one trial to the next.
    pub fn cell_of(&self, round: Round, competitor: &Competitor) -> Result<usize, SimulationError> {
        let region = self
            .region_index(&competitor.region)
            .ok_or_else(|| SimulationError::UnknownRegion(competitor.region.clone()))?;
        if competitor.seed == 0 || competitor.seed > SEEDS_PER_REGION {
            return Err(SimulationError::SeedOutOfRange {
                team: competitor.name.clone(),
                seed: competitor.seed,
                max: SEEDS_PER_REGION,
            });
        }
        let seed_slot = usize::from(competitor.seed - 1);

        let cell = match round.rule() {
            PairingRule::SeedComplement => region * 8 + ROUND_OF_64_CELLS[seed_slot],
            PairingRule::SeedGroups {
                table,
                groups_per_region,
            } => region * groups_per_region + table[seed_slot],
            PairingRule::RegionPairs => region / 2,
            PairingRule::Direct => 0,
        };
        Ok(cell)
    }
}
