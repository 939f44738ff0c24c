use thiserror::Error;

use crate::topology::Round;

/// Faults raised while configuring or running a bracket simulation.
///
/// None of these are transient: a run that hits one is aborted and no partial
/// results are produced.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SimulationError {
    /// A run must simulate at least one bracket.
    #[error("trial count must be at least 1")]
    InvalidTrialCount,

    #[error("spread must be a positive finite number, got {0}")]
    InvalidSpread(f64),

    #[error("invalid Final Four region pairing: {0}")]
    InvalidRegionPairing(String),

    #[error("field must contain {expected} competitors, found {found}")]
    FieldSize { expected: usize, found: usize },

    #[error("field must contain {expected} regions, found {found}")]
    RegionCount { expected: usize, found: usize },

    /// A competitor's region is not one of the configured Final Four regions.
    #[error("region {0:?} is not part of the Final Four pairing")]
    UnknownRegion(String),

    #[error("seed {seed} of {team:?} is outside 1..={max}")]
    SeedOutOfRange { team: String, seed: u8, max: u8 },

    #[error("rating {rating} of {team:?} is not a finite number")]
    InvalidRating { team: String, rating: f64 },

    #[error("region {region:?} has more than one seed {seed}")]
    DuplicateSlot { region: String, seed: u8 },

    #[error("region {region:?} has no seed {seed}")]
    MissingSlot { region: String, seed: u8 },

    #[error("team {0:?} appears more than once")]
    DuplicateTeam(String),

    /// The number of survivors does not match any round of the bracket.
    #[error("no round starts with {0} competitors")]
    UnexpectedRoundSize(usize),

    /// A pairing cell did not hold exactly two competitors.
    #[error("{round}: cell {cell} holds {found} competitors instead of 2")]
    MalformedCell { round: Round, cell: usize, found: usize },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
