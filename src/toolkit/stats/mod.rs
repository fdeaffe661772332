

mod calculator;
mod models;

pub use calculator::{
    FnCalculator, SIMULATED_TOTAL_COMMENTS, SIMULATED_TOTAL_POSTS, SimulatedStatsCalculator,
    StatsCalculator,
};
pub use models::StatsResult;
