use rand::Rng;
use statrs::distribution::{ContinuousCDF, Normal};

/// Calculate the probability of the first competitor beating the second.
///
/// The game margin is modelled as normally distributed around the rating
/// difference with standard deviation `spread`, so the result is
/// `P(N(rating2 - rating1, spread) < 0)`.
///
/// # Arguments
/// * `rating1` - Rating of the first competitor
/// * `rating2` - Rating of the second competitor
/// * `spread` - Standard deviation of the margin; must be positive
///
/// # Returns
/// Probability of the first competitor winning (0.0-1.0)
pub fn win_probability(rating1: f64, rating2: f64, spread: f64) -> f64 {
    debug_assert!(spread > 0.0, "spread must be positive");
    Normal::standard().cdf((rating1 - rating2) / spread)
}

/// Simulate one game, consuming a single uniform draw from `rng`.
///
/// Returns `true` if the first competitor wins.
pub fn simulate_game<R: Rng + ?Sized>(rating1: f64, rating2: f64, spread: f64, rng: &mut R) -> bool {
    rng.gen::<f64>() < win_probability(rating1, rating2, spread)
}
