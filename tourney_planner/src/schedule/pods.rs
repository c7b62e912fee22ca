//! Pods, divisions and crossovers for large fields.
//!
//! Teams are dealt into pods of about four that each play a round robin.
//! Finishers of equal pod rank are then regrouped into divisions for a
//! second round robin, and adjacent divisions meet in crossover games to
//! settle the overall order.

use serde::{Deserialize, Serialize};

use super::{
    models::{Game, GameId, Schedule, ScheduleFormat, Team, ordinal},
    round_robin::round_robin_for,
};
use crate::errors::PlannerResult;

/// Target pod size
pub const POD_SIZE: usize = 4;

/// A pod or division: its 1-based index and members in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub index: usize,
    pub teams: Vec<Team>,
}

/// Pod and division membership
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodLayout {
    pub pods: Vec<Group>,
    pub divisions: Vec<Group>,
}

/// Output of the pods generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodsSchedule {
    pub schedule: Schedule,
    pub layout: PodLayout,
}

/// Pods over `count` numbered teams.
pub fn pods(count: usize) -> PodsSchedule {
    pods_for(Team::roster(count))
}

/// Pods over a list of team names.
///
/// # Errors
///
/// Returns `InvalidArgument` for blank or duplicate names.
pub fn pods_named<S: AsRef<str>>(names: &[S]) -> PlannerResult<PodsSchedule> {
    Ok(pods_for(Team::checked_names(names)?))
}

/// Pods over an explicit roster.
///
/// `schedule.games` is the number of slots across the three stages,
/// division byes included. Pod games come first sorted by round, then
/// division games sorted by round, then crossovers; later stages continue
/// the round numbering of earlier ones.
pub fn pods_for(teams: Vec<Team>) -> PodsSchedule {
    let pods = assign_pods(&teams);
    let divisions = if teams.len() < 2 {
        Vec::new()
    } else {
        assign_divisions(&pods)
    };

    let pod_games = group_games(&pods, "P", 0);
    let pod_rounds = last_round(&pod_games);
    let division_games = group_games(&divisions, "D", pod_rounds);
    let division_rounds = last_round(&division_games).max(pod_rounds);
    let crossover_games = crossovers(&divisions, division_rounds + 1);

    log::debug!(
        "Pods for {} teams: {} pods, {} divisions, {} + {} + {} slots",
        teams.len(),
        pods.len(),
        divisions.len(),
        pod_games.len(),
        division_games.len(),
        crossover_games.len()
    );

    let mut schedule = pod_games;
    schedule.extend(division_games);
    schedule.extend(crossover_games);

    PodsSchedule {
        schedule: Schedule {
            format: ScheduleFormat::Pods,
            games: schedule.len(),
            schedule,
            teams,
        },
        layout: PodLayout { pods, divisions },
    }
}

/// Deals teams into pods.
///
/// With `p = n / 4` pods and a remainder, team `i` goes to pod
/// `i % (p + 1)`; without a remainder to pod `i % p`.
pub fn assign_pods(teams: &[Team]) -> Vec<Group> {
    if teams.is_empty() {
        return Vec::new();
    }
    let full_pods = teams.len() / POD_SIZE;
    let pod_count = if teams.len() % POD_SIZE > 0 {
        full_pods + 1
    } else {
        full_pods
    };

    let mut pods: Vec<Group> = (1..=pod_count)
        .map(|index| Group {
            index,
            teams: Vec::new(),
        })
        .collect();
    for (i, team) in teams.iter().enumerate() {
        pods[i % pod_count].teams.push(team.clone());
    }
    pods
}

/// Regroups pod finishers by rank.
///
/// Division `k` holds the `k`-th finisher of every pod large enough to
/// have one. A trailing division with a single entry joins the one before.
pub fn assign_divisions(pods: &[Group]) -> Vec<Group> {
    let largest = pods.iter().map(|pod| pod.teams.len()).max().unwrap_or(0);

    let mut divisions: Vec<Group> = (1..=largest)
        .map(|rank| Group {
            index: rank,
            teams: pods
                .iter()
                .filter(|pod| pod.teams.len() >= rank)
                .map(|pod| Team::Label(format!("{} Pod {}", ordinal(rank), pod.index)))
                .collect(),
        })
        .collect();

    if divisions.len() > 1 && divisions.last().is_some_and(|d| d.teams.len() == 1) {
        if let Some(single) = divisions.pop() {
            if let Some(previous) = divisions.last_mut() {
                previous.teams.extend(single.teams);
            }
        }
    }
    divisions
}

/// Round robin per group, ids prefixed with the group label and rounds
/// shifted by `round_offset`, sorted by round.
fn group_games(groups: &[Group], prefix: &str, round_offset: u32) -> Vec<Game> {
    let mut games: Vec<Game> = groups
        .iter()
        .flat_map(|group| {
            let label = format!("{prefix}{}", group.index);
            round_robin_for(group.teams.clone())
                .schedule
                .into_iter()
                .map(move |mut game| {
                    game.id = game.id.prefixed(&label);
                    game.round += round_offset;
                    game
                })
        })
        .collect();
    games.sort_by_key(|game| game.round);
    games
}

/// Two games per adjacent division pair `(d, d + 1)`: second-to-last of
/// `d` against 2nd of `d + 1`, then last of `d` against 1st of `d + 1`.
fn crossovers(divisions: &[Group], round: u32) -> Vec<Game> {
    let mut games = Vec::new();
    for pair in divisions.windows(2) {
        let (upper, lower) = (&pair[0], &pair[1]);
        let last = upper.teams.len();
        let second_last = last.saturating_sub(1).max(1);
        let second = lower.teams.len().min(2);

        let mut push = |home: Team, away: Team| {
            let id = GameId::Number(games.len() as u32 + 1).prefixed("X");
            games.push(Game::new(id, round, home, away));
        };
        push(standing(second_last, upper), standing(second, lower));
        push(standing(last, upper), standing(1, lower));
    }
    games
}

/// Placeholder for the team finishing `rank` in a division
fn standing(rank: usize, division: &Group) -> Team {
    Team::Label(format!("{} Division {}", ordinal(rank), division.index))
}

fn last_round(games: &[Game]) -> u32 {
    games.iter().map(|game| game.round).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(groups: &[Group]) -> Vec<usize> {
        groups.iter().map(|g| g.teams.len()).collect()
    }

    #[test]
    fn test_eight_teams() {
        let result = pods(8);
        assert_eq!(sizes(&result.layout.pods), vec![4, 4]);
        assert_eq!(sizes(&result.layout.divisions), vec![2, 2, 2, 2]);
        assert_eq!(result.schedule.games, 22);
        assert_eq!(result.schedule.format, ScheduleFormat::Pods);
    }

    #[test]
    fn test_pod_dealing_order() {
        let result = pods(8);
        assert_eq!(
            result.layout.pods[0].teams,
            vec![Team::Seed(1), Team::Seed(3), Team::Seed(5), Team::Seed(7)]
        );
        assert_eq!(result.layout.pods[1].index, 2);
    }

    #[test]
    fn test_remainder_adds_a_pod() {
        assert_eq!(sizes(&assign_pods(&Team::roster(9))), vec![3, 3, 3]);
        assert_eq!(sizes(&assign_pods(&Team::roster(10))), vec![4, 3, 3]);
        assert_eq!(sizes(&assign_pods(&Team::roster(13))), vec![4, 3, 3, 3]);
    }

    #[test]
    fn test_single_trailing_division_is_merged() {
        let pods = assign_pods(&Team::roster(10));
        let divisions = assign_divisions(&pods);
        assert_eq!(sizes(&divisions), vec![3, 3, 4]);
        assert_eq!(
            divisions[2].teams.last(),
            Some(&Team::from("4th Pod 1"))
        );
    }

    #[test]
    fn test_division_placeholders() {
        let result = pods(8);
        assert_eq!(
            result.layout.divisions[0].teams,
            vec![Team::from("1st Pod 1"), Team::from("1st Pod 2")]
        );
    }

    #[test]
    fn test_stage_order_and_ids() {
        let result = pods(8);
        let games = &result.schedule.schedule;
        assert_eq!(games[0].id, GameId::Label("P1-1".to_string()));
        assert_eq!(games[1].id, GameId::Label("P1-2".to_string()));
        assert_eq!(games[2].id, GameId::Label("P2-1".to_string()));
        assert_eq!(games[12].id, GameId::Label("D1-1".to_string()));
        assert_eq!(games[12].round, 4);
        assert_eq!(games[16].id, GameId::Label("X-1".to_string()));
        assert_eq!(games[16].round, 5);
        let rounds: Vec<u32> = games.iter().map(|g| g.round).collect();
        let mut sorted = rounds.clone();
        sorted.sort();
        assert_eq!(rounds, sorted);
    }

    #[test]
    fn test_crossover_pairings() {
        let result = pods(8);
        let crossovers: Vec<Vec<Team>> = result
            .schedule
            .schedule
            .iter()
            .filter(|g| g.id.to_string().starts_with("X-"))
            .map(|g| g.teams.clone())
            .collect();
        assert_eq!(crossovers.len(), 6);
        assert_eq!(
            crossovers[0],
            vec![Team::from("1st Division 1"), Team::from("2nd Division 2")]
        );
        assert_eq!(
            crossovers[1],
            vec![Team::from("2nd Division 1"), Team::from("1st Division 2")]
        );
    }

    #[test]
    fn test_concrete_totals() {
        assert_eq!(pods(12).schedule.games, 48);
        assert_eq!(pods(20).schedule.games, 96);
    }

    #[test]
    fn test_degenerate_fields() {
        let empty = pods(0);
        assert_eq!(empty.schedule.games, 0);
        assert!(empty.layout.pods.is_empty());
        assert!(empty.layout.divisions.is_empty());

        let single = pods_named(&["Solo"]).unwrap();
        assert_eq!(single.schedule.games, 0);
        assert_eq!(single.layout.pods.len(), 1);
        assert_eq!(single.layout.pods[0].teams, vec![Team::from("Solo")]);
        assert!(single.layout.divisions.is_empty());
    }

    #[test]
    fn test_one_division_has_no_crossovers() {
        let result = pods(2);
        assert_eq!(sizes(&result.layout.divisions), vec![2]);
        assert!(
            !result
                .schedule
                .schedule
                .iter()
                .any(|g| g.id.to_string().starts_with("X-"))
        );
    }
}
