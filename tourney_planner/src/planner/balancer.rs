//! Packs stage schedules into blocks of concurrent games.
//!
//! A block is one time slot across all areas. Games keep their input
//! order; a new block opens when the current one is full, when the next
//! game shares a team with a game already in the block, or when its round
//! differs from the round of the game that opened the block.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::{PlannerError, PlannerResult};
use crate::schedule::{Game, ScheduleFormat, Team};

/// Stage schedules after balancing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlannedSchedule {
    /// Single area: stages concatenated, no blocks
    Flat(Vec<Game>),
    /// One inner list per block
    Blocked(Vec<Vec<Game>>),
}

impl PlannedSchedule {
    /// Every slot in order
    pub fn games(&self) -> Vec<&Game> {
        match self {
            PlannedSchedule::Flat(games) => games.iter().collect(),
            PlannedSchedule::Blocked(blocks) => blocks.iter().flatten().collect(),
        }
    }

    /// Number of blocks; a flat schedule has one slot per game
    pub fn slots(&self) -> usize {
        match self {
            PlannedSchedule::Flat(games) => games.len(),
            PlannedSchedule::Blocked(blocks) => blocks.len(),
        }
    }
}

/// Splits one stage into blocks of at most `areas` games.
pub fn balance_stage(games: &[Game], areas: usize) -> Vec<Vec<Game>> {
    let areas = areas.max(1);
    let mut blocks: Vec<Vec<Game>> = Vec::new();
    let mut current: Vec<Game> = Vec::new();
    let mut opening_round: Option<u32> = None;

    for game in games {
        let full = current.len() >= areas;
        let clash = current.iter().any(|placed| placed.shares_team(game));
        let new_round = opening_round != Some(game.round);

        if full || clash || new_round {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            opening_round = Some(game.round);
        }
        current.push(game.clone());
    }

    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// Balances each stage on its own and concatenates the results.
///
/// No block spans two stages. With a single area the stages are simply
/// concatenated.
pub fn balance_stages(stages: &[&[Game]], areas: usize) -> PlannedSchedule {
    if areas <= 1 {
        return PlannedSchedule::Flat(
            stages
                .iter()
                .flat_map(|stage| stage.iter().cloned())
                .collect(),
        );
    }

    let blocks: Vec<Vec<Game>> = stages
        .iter()
        .flat_map(|stage| balance_stage(stage, areas))
        .collect();
    log::debug!(
        "Balanced {} stage(s) over {} areas into {} blocks",
        stages.len(),
        areas,
        blocks.len()
    );
    PlannedSchedule::Blocked(blocks)
}

/// Copy of `blocks` where every game from the second block on lists the
/// teams it shares with the previous block.
///
/// Purely informational; the input is left untouched.
pub fn annotate_back_to_back(blocks: &[Vec<Game>]) -> Vec<Vec<Game>> {
    let mut annotated = Vec::with_capacity(blocks.len());
    let mut previous: Option<HashSet<&Team>> = None;

    for block in blocks {
        let annotated_block = block
            .iter()
            .map(|game| {
                let mut game = game.clone();
                if let Some(previous) = &previous {
                    game.back_to_back_teams = Some(
                        game.teams
                            .iter()
                            .filter(|team| previous.contains(team))
                            .cloned()
                            .collect(),
                    );
                }
                game
            })
            .collect();
        annotated.push(annotated_block);
        previous = Some(block.iter().flat_map(|game| game.teams.iter()).collect());
    }

    annotated
}

/// A stage read back from JSON, e.g. a saved generator result
#[derive(Debug, Clone, Deserialize)]
pub struct StoredStage {
    #[serde(rename = "type", default)]
    pub format: Option<ScheduleFormat>,
    #[serde(default)]
    pub schedule: Option<Vec<Game>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredStages {
    Many(Vec<StoredStage>),
    One(StoredStage),
}

/// Balances and annotates stages stored as JSON: one stage object or an
/// array of them, each carrying a `schedule` list.
///
/// # Errors
///
/// `MissingSchedule` when a stage has no `schedule`; `Json` for malformed input.
pub fn balance_document(json: &str, areas: usize) -> PlannerResult<PlannedSchedule> {
    let stages = match serde_json::from_str::<StoredStages>(json)? {
        StoredStages::Many(stages) => stages,
        StoredStages::One(stage) => vec![stage],
    };

    let mut schedules = Vec::with_capacity(stages.len());
    for (i, stage) in stages.into_iter().enumerate() {
        let label = stage
            .format
            .map(|format| format.to_string())
            .unwrap_or_else(|| format!("stage {}", i + 1));
        let schedule = stage
            .schedule
            .ok_or_else(|| PlannerError::MissingSchedule(format!("{label} has no schedule")))?;
        schedules.push(schedule);
    }

    let views: Vec<&[Game]> = schedules.iter().map(Vec::as_slice).collect();
    Ok(match balance_stages(&views, areas) {
        PlannedSchedule::Blocked(blocks) => {
            PlannedSchedule::Blocked(annotate_back_to_back(&blocks))
        }
        flat => flat,
    })
}
