/// Levels at which a disc gains an upgrade (every 3 levels).
pub const CHECKPOINT_LEVELS: [u8; 6] = [0, 3, 6, 9, 12, 15];

/// Highest level a disc can reach.
pub const MAX_LEVEL: u8 = 15;

/// Levels between two upgrade checkpoints.
pub const LEVELS_PER_UPGRADE: u8 = 3;

/// Number of secondary roll positions on a disc.
pub const ROLL_COUNT: usize = 4;

/// A single roll starts at 1 hit and can take at most 5 upgrades.
pub const MAX_HITS_PER_ROLL: u8 = 6;

/// Number of disc slots (1..=6).
pub const SLOT_COUNT: u8 = 6;

/// Denominators at or below this are treated as "nothing to score against".
pub const SCORE_EPSILON: f64 = 0.001;

/// Tolerance for `initial + sum(increments) == max` in growth curves.
pub const CURVE_TOLERANCE: f64 = 0.01;

/// Number of recommendations shown when no explicit limit is given.
pub const DEFAULT_RECOMMEND_LIMIT: usize = 5;
