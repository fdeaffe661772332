

pub mod stats;

pub use stats::{FnCalculator, SimulatedStatsCalculator, StatsCalculator, StatsResult};
