//! Main-stage format selection.

use crate::schedule::{
    PodLayout, Schedule, ShuffleSource, Team, partial_round_robin_for, pods_for, round_robin_for,
};

/// Fields above this size may be split into pods
pub const POD_THRESHOLD: usize = 8;

/// The generated main stage and the areas it runs on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainStage {
    pub schedule: Schedule,
    /// Areas actually used, after capping
    pub areas: usize,
    /// Pod and division membership when pods were chosen
    pub layout: Option<PodLayout>,
}

/// Pods are used for more than eight teams when the requested areas do
/// not exceed one area per four teams.
pub fn uses_pods(teams: usize, areas: usize) -> bool {
    teams > POD_THRESHOLD && areas <= teams / 4
}

/// Areas a round robin can keep busy: at most one game per pair of teams,
/// and never fewer than one.
pub fn round_robin_areas(teams: usize, requested: usize) -> usize {
    requested.min(teams / 2).max(1)
}

/// Picks round robin or pods and generates the main stage.
///
/// With `games_per_team` set, a round-robin main stage is generated as a
/// partial round robin using `source` for the pairing order.
pub fn select_format<S>(
    teams: Vec<Team>,
    requested_areas: usize,
    games_per_team: Option<usize>,
    source: &mut S,
) -> MainStage
where
    S: ShuffleSource + ?Sized,
{
    let count = teams.len();

    if uses_pods(count, requested_areas) {
        let pods = pods_for(teams);
        return MainStage {
            schedule: pods.schedule,
            areas: requested_areas,
            layout: Some(pods.layout),
        };
    }

    let areas = round_robin_areas(count, requested_areas);
    if areas < requested_areas {
        log::warn!(
            "Capping areas from {} to {} for a round robin of {} teams",
            requested_areas,
            areas,
            count
        );
    }

    let schedule = match games_per_team {
        Some(target) => partial_round_robin_for(teams, target, source),
        None => round_robin_for(teams),
    };

    MainStage {
        schedule,
        areas,
        layout: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{KeepOrder, ScheduleFormat};

    #[test]
    fn test_pod_threshold() {
        assert!(!uses_pods(8, 1));
        assert!(uses_pods(9, 1));
        assert!(uses_pods(12, 3));
        assert!(!uses_pods(12, 4));
        assert!(uses_pods(20, 5));
        assert!(!uses_pods(20, 6));
    }

    #[test]
    fn test_round_robin_area_cap() {
        assert_eq!(round_robin_areas(6, 10), 3);
        assert_eq!(round_robin_areas(7, 2), 2);
        assert_eq!(round_robin_areas(1, 4), 1);
        assert_eq!(round_robin_areas(0, 4), 1);
    }

    #[test]
    fn test_small_field_is_round_robin() {
        let stage = select_format(Team::roster(6), 5, None, &mut KeepOrder);
        assert_eq!(stage.schedule.format, ScheduleFormat::RoundRobin);
        assert_eq!(stage.schedule.games, 15);
        assert_eq!(stage.areas, 3);
        assert!(stage.layout.is_none());
    }

    #[test]
    fn test_many_areas_keep_round_robin() {
        let stage = select_format(Team::roster(12), 4, None, &mut KeepOrder);
        assert_eq!(stage.schedule.format, ScheduleFormat::RoundRobin);
        assert_eq!(stage.schedule.games, 66);
        assert_eq!(stage.areas, 4);
    }

    #[test]
    fn test_large_field_uses_pods() {
        let stage = select_format(Team::roster(12), 2, None, &mut KeepOrder);
        assert_eq!(stage.schedule.format, ScheduleFormat::Pods);
        assert_eq!(stage.schedule.games, 48);
        assert_eq!(stage.areas, 2);
        assert_eq!(stage.layout.map(|l| l.pods.len()), Some(3));
    }

    #[test]
    fn test_games_per_team_switches_to_partial() {
        let stage = select_format(Team::roster(6), 3, Some(3), &mut KeepOrder);
        assert_eq!(stage.schedule.format, ScheduleFormat::PartialRoundRobin);
        assert_eq!(stage.schedule.games, 9);
    }

    #[test]
    fn test_games_per_team_ignored_for_pods() {
        let stage = select_format(Team::roster(16), 1, Some(2), &mut KeepOrder);
        assert_eq!(stage.schedule.format, ScheduleFormat::Pods);
    }
}
