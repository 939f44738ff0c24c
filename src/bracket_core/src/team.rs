use serde::{Deserialize, Serialize};
use std::fmt;

/// A team entered in the bracket.
///
/// Competitors are immutable for the duration of a run; round state and
/// matchups borrow them from the [`Field`](crate::field::Field).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    #[serde(alias = "Region")]
    pub region: String,

    /// Rank within the region, 1 (strongest) to 16
    #[serde(alias = "Seed")]
    pub seed: u8,

    #[serde(rename = "team", alias = "Team")]
    pub name: String,

    /// Strength rating on a points scale (e.g. Sagarin)
    #[serde(alias = "Sagarin rating")]
    pub rating: f64,
}

impl Competitor {
    pub fn new(name: impl Into<String>, region: impl Into<String>, seed: u8, rating: f64) -> Self {
        Competitor {
            region: region.into(),
            seed,
            name: name.into(),
            rating,
        }
    }
}

impl fmt::Display for Competitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {} [{}] {:.2}", self.seed, self.name, self.region, self.rating)
    }
}
