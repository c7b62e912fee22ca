//! Total duration estimate.
//!
//! A stage of `g` games on `a` areas counts as `g / a + g % a` sequential
//! game slots. This is deliberately not `ceil(g / a)`: six games on four
//! areas count three slots, not two.

use serde::{Deserialize, Serialize};

/// Game count and per-game timing of one stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTiming {
    pub games: usize,
    /// Minutes per game
    pub game_time: u32,
    /// Minutes of rest after each game
    pub rest_time: u32,
}

/// Sequential game slots for `games` spread over `areas`.
///
/// Zero areas are treated as one.
pub fn stage_length(games: usize, areas: usize) -> usize {
    let areas = areas.max(1);
    games / areas + games % areas
}

/// Minutes for a single stage
pub fn stage_minutes(stage: &StageTiming, areas: usize) -> u64 {
    let slot = u64::from(stage.game_time) + u64::from(stage.rest_time);
    stage_length(stage.games, areas) as u64 * slot
}

/// Minutes for all stages run back to back on the same areas
pub fn estimate_minutes(stages: &[StageTiming], areas: usize) -> u64 {
    stages
        .iter()
        .map(|stage| stage_minutes(stage, areas))
        .sum()
}
