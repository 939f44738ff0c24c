/// Default standard deviation of the rating differential in a single game
pub const DEFAULT_SPREAD: f64 = 10.0;

/// Default number of simulated brackets per run
pub const DEFAULT_TRIALS: u64 = 1000;

/// Number of regions in the bracket
pub const REGION_COUNT: usize = 4;

/// Number of seeds per region
pub const SEEDS_PER_REGION: u8 = 16;

/// Number of competitors in a full field
pub const FIELD_SIZE: usize = REGION_COUNT * SEEDS_PER_REGION as usize;

/// Number of elimination rounds from the full field to a champion
pub const ROUND_COUNT: usize = 6;

/// Trials simulated by one parallel work unit
pub const TRIALS_PER_CHUNK: u64 = 250;

/// Default Final Four pairing: the first two regions meet, as do the last two
pub const DEFAULT_FINAL_FOUR: [[&str; 2]; 2] = [["East", "South"], ["Midwest", "West"]];

/// Round of 32 seed groups. Each group is one quarter of a region's bracket;
/// later rounds merge these groups.
pub const SEED_GROUPS: [[u8; 4]; 4] = [[1, 8, 9, 16], [2, 7, 10, 15], [3, 6, 11, 14], [4, 5, 12, 13]];
