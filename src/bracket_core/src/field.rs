use std::collections::HashSet;

use tracing::debug;

use crate::constants::{FIELD_SIZE, REGION_COUNT, SEEDS_PER_REGION};
use crate::error::SimulationError;
use crate::team::Competitor;
use crate::topology::{BracketTopology, RegionPairing};

/// The 64 competitors of a run, validated against the bracket structure.
///
/// Row order is preserved from the input so results can be written back in
/// the same order they were read.
#[derive(Clone, Debug)]
pub struct Field {
    competitors: Vec<Competitor>,
    topology: BracketTopology,
}

impl Field {
    /// Build a field, checking every (region, seed) slot is filled exactly once
    /// and every region appears in the Final Four pairing.
    pub fn new(competitors: Vec<Competitor>, pairing: &RegionPairing) -> Result<Self, SimulationError> {
        let topology = BracketTopology::new(pairing)?;

        if competitors.len() != FIELD_SIZE {
            return Err(SimulationError::FieldSize {
                expected: FIELD_SIZE,
                found: competitors.len(),
            });
        }

        let regions: HashSet<&str> = competitors.iter().map(|c| c.region.as_str()).collect();
        if regions.len() != REGION_COUNT {
            return Err(SimulationError::RegionCount {
                expected: REGION_COUNT,
                found: regions.len(),
            });
        }

        let mut names = HashSet::new();
        let mut slots = [[false; SEEDS_PER_REGION as usize]; REGION_COUNT];
        for competitor in &competitors {
            let region = topology
                .region_index(&competitor.region)
                .ok_or_else(|| SimulationError::UnknownRegion(competitor.region.clone()))?;
            if competitor.seed == 0 || competitor.seed > SEEDS_PER_REGION {
                return Err(SimulationError::SeedOutOfRange {
                    team: competitor.name.clone(),
                    seed: competitor.seed,
                    max: SEEDS_PER_REGION,
                });
            }
            if !competitor.rating.is_finite() {
                return Err(SimulationError::InvalidRating {
                    team: competitor.name.clone(),
                    rating: competitor.rating,
                });
            }
            let slot = &mut slots[region][usize::from(competitor.seed - 1)];
            if *slot {
                return Err(SimulationError::DuplicateSlot {
                    region: competitor.region.clone(),
                    seed: competitor.seed,
                });
            }
            *slot = true;
            if !names.insert(competitor.name.as_str()) {
                return Err(SimulationError::DuplicateTeam(competitor.name.clone()));
            }
        }

        for (region, seeds) in topology.regions().iter().zip(slots.iter()) {
            if let Some(missing) = seeds.iter().position(|filled| !filled) {
                return Err(SimulationError::MissingSlot {
                    region: region.clone(),
                    seed: missing as u8 + 1,
                });
            }
        }

        debug!(
            competitors = competitors.len(),
            regions = ?topology.regions(),
            "validated field"
        );

        Ok(Field { competitors, topology })
    }

    pub fn competitors(&self) -> &[Competitor] {
        &self.competitors
    }

    pub fn topology(&self) -> &BracketTopology {
        &self.topology
    }

    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Competitor> {
        self.competitors.iter().find(|c| c.name == name)
    }

    /// Look up the competitor holding `seed` in `region`.
    pub fn slot(&self, region: &str, seed: u8) -> Option<&Competitor> {
        self.competitors
            .iter()
            .find(|c| c.region == region && c.seed == seed)
    }
}
