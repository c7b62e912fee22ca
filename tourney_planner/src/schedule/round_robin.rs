//! Round-robin schedules using the circle method.
//!
//! The first team stays fixed while every other position rotates one step
//! per round. With an odd field a phantom position is added; whoever is
//! paired with it sits out that round and gets a bye slot.

use super::models::{Game, GameId, Schedule, ScheduleFormat, Team};
use crate::errors::PlannerResult;

/// Round robin over `count` numbered teams.
pub fn round_robin(count: usize) -> Schedule {
    round_robin_for(Team::roster(count))
}

/// Round robin over a list of team names.
///
/// # Errors
///
/// Returns `InvalidArgument` for blank or duplicate names.
pub fn round_robin_named<S: AsRef<str>>(names: &[S]) -> PlannerResult<Schedule> {
    Ok(round_robin_for(Team::checked_names(names)?))
}

/// Round robin over an explicit roster.
///
/// Even fields get `n - 1` rounds, odd fields `n` rounds with exactly one
/// bye each. Ids are numbered from 1 across all slots, byes included.
pub fn round_robin_for(teams: Vec<Team>) -> Schedule {
    if teams.len() < 2 {
        return Schedule::empty(ScheduleFormat::RoundRobin, teams);
    }

    let mut positions: Vec<Option<Team>> = teams.iter().cloned().map(Some).collect();
    if positions.len() % 2 == 1 {
        positions.push(None);
    }
    let size = positions.len();

    let mut schedule = Vec::with_capacity(size / 2 * (size - 1));
    let mut next_id = 1;
    for round in 1..size as u32 {
        for i in 0..size / 2 {
            let game = match (positions[i].clone(), positions[size - 1 - i].clone()) {
                (Some(home), Some(away)) => Game::new(GameId::Number(next_id), round, home, away),
                (Some(team), None) | (None, Some(team)) => {
                    Game::bye(GameId::Number(next_id), round, team)
                }
                (None, None) => continue,
            };
            next_id += 1;
            schedule.push(game);
        }
        positions[1..].rotate_right(1);
    }

    let n = teams.len();
    log::debug!(
        "Round robin for {} teams: {} games over {} rounds",
        n,
        n * (n - 1) / 2,
        size - 1
    );

    Schedule {
        format: ScheduleFormat::RoundRobin,
        games: n * (n - 1) / 2,
        schedule,
        teams,
    }
}
