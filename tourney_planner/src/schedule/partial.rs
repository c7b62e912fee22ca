//! Partial round robin: every team plays about `games_per_team` games.
//!
//! The full round-robin pairing universe is shuffled and accepted greedily,
//! then packed into rounds. Balance is heuristic: each team ends up within
//! one game of the target, but exact balance is not guaranteed.

use std::collections::{HashMap, HashSet};

use super::{
    models::{Game, GameId, Schedule, ScheduleFormat, Team},
    round_robin::round_robin_for,
    shuffle::{Pairing, ShuffleSource},
};
use crate::errors::PlannerResult;

/// Partial round robin over `count` numbered teams.
pub fn partial_round_robin<S>(count: usize, games_per_team: usize, source: &mut S) -> Schedule
where
    S: ShuffleSource + ?Sized,
{
    partial_round_robin_for(Team::roster(count), games_per_team, source)
}

/// Partial round robin over a list of team names.
///
/// # Errors
///
/// Returns `InvalidArgument` for blank or duplicate names.
pub fn partial_round_robin_named<N, S>(
    names: &[N],
    games_per_team: usize,
    source: &mut S,
) -> PlannerResult<Schedule>
where
    N: AsRef<str>,
    S: ShuffleSource + ?Sized,
{
    Ok(partial_round_robin_for(
        Team::checked_names(names)?,
        games_per_team,
        source,
    ))
}

/// Partial round robin over an explicit roster.
///
/// `games_per_team` is clamped to `0..=teams - 1`. No pair is ever
/// scheduled twice and no team plays more than `games_per_team + 1` games.
pub fn partial_round_robin_for<S>(
    teams: Vec<Team>,
    games_per_team: usize,
    source: &mut S,
) -> Schedule
where
    S: ShuffleSource + ?Sized,
{
    if teams.len() < 2 {
        return Schedule::empty(ScheduleFormat::PartialRoundRobin, teams);
    }
    let target = games_per_team.min(teams.len() - 1);

    let mut universe: Vec<Pairing> = round_robin_for(teams.clone())
        .schedule
        .into_iter()
        .filter(|game| !game.is_bye_match)
        .filter_map(|game| {
            let mut sides = game.teams.into_iter();
            Some((sides.next()?, sides.next()?))
        })
        .collect();
    source.shuffle_pairings(&mut universe);

    let accepted = accept_pairings(universe, target);
    let schedule = assign_rounds(accepted);

    log::debug!(
        "Partial round robin for {} teams: {} games, target {} per team",
        teams.len(),
        schedule.len(),
        target
    );

    Schedule {
        format: ScheduleFormat::PartialRoundRobin,
        games: schedule.len(),
        schedule,
        teams,
    }
}

/// Accepts a pairing while one side is under target and neither side would
/// exceed `target + 1`.
fn accept_pairings(universe: Vec<Pairing>, target: usize) -> Vec<Pairing> {
    let mut played: HashMap<Team, usize> = HashMap::new();
    let mut accepted = Vec::new();

    for (home, away) in universe {
        let home_games = played.get(&home).copied().unwrap_or(0);
        let away_games = played.get(&away).copied().unwrap_or(0);
        let wanted = home_games < target || away_games < target;
        if wanted && home_games <= target && away_games <= target {
            *played.entry(home.clone()).or_default() += 1;
            *played.entry(away.clone()).or_default() += 1;
            accepted.push((home, away));
        }
    }

    accepted
}

/// Fills round 1 greedily in pairing order, then round 2 from what is
/// left, and so on until every pairing has a round.
fn assign_rounds(pairings: Vec<Pairing>) -> Vec<Game> {
    let mut remaining = pairings;
    let mut games = Vec::with_capacity(remaining.len());
    let mut round = 0;

    while !remaining.is_empty() {
        round += 1;
        let mut busy: HashSet<Team> = HashSet::new();
        let mut deferred = Vec::new();

        for (home, away) in remaining {
            if busy.contains(&home) || busy.contains(&away) {
                deferred.push((home, away));
                continue;
            }
            busy.insert(home.clone());
            busy.insert(away.clone());
            let id = GameId::Number(games.len() as u32 + 1);
            games.push(Game::new(id, round, home, away));
        }

        remaining = deferred;
    }

    games
}
