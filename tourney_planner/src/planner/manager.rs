//! Tournament planner: runs every stage and assembles the plan.

use serde::{Deserialize, Serialize};

use super::{
    balancer::{PlannedSchedule, annotate_back_to_back, balance_stages},
    config::TournamentOptions,
    duration::{StageTiming, estimate_minutes},
    format::select_format,
};
use crate::errors::PlannerResult;
use crate::schedule::{
    Game, PairingShuffler, PodLayout, ScheduleFormat, ShuffleSource, Team, knockout_for, ordinal,
};

/// Format and size of one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSummary {
    #[serde(rename = "type")]
    pub format: ScheduleFormat,
    pub games: usize,
    /// Areas in use; reported for the main stage only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub areas: Option<usize>,
}

/// Complete tournament plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentPlan {
    pub main_stage: StageSummary,
    pub knockout_stage: StageSummary,
    /// Estimated minutes for both stages
    pub total_minutes: u64,
    /// Flat for a single area, blocks of concurrent games otherwise
    pub schedule: PlannedSchedule,
    /// Pod and division membership when the main stage uses pods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<PodLayout>,
}

/// Plans tournaments with a given shuffle source
pub struct TournamentPlanner<S: ShuffleSource> {
    source: S,
}

impl TournamentPlanner<PairingShuffler> {
    /// Planner with an entropy-seeded shuffler
    pub fn new() -> Self {
        Self::with_source(PairingShuffler::new())
    }

    /// Planner whose partial round robins are reproducible
    pub fn seeded(seed: u64) -> Self {
        Self::with_source(PairingShuffler::seeded(seed))
    }
}

impl Default for TournamentPlanner<PairingShuffler> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ShuffleSource> TournamentPlanner<S> {
    /// Planner using `source` for pairing order
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Runs the main stage, the knockout, the duration estimate and the
    /// area balancer.
    ///
    /// # Errors
    ///
    /// `InsufficientTeams` for fewer than two teams and `InvalidArgument`
    /// for any other invalid option.
    pub fn plan(&mut self, options: &TournamentOptions) -> PlannerResult<TournamentPlan> {
        options.validate()?;
        let teams = options.teams.roster()?;
        let team_count = teams.len();

        let main = select_format(
            teams,
            options.areas,
            options.games_per_team,
            &mut self.source,
        );
        let knockout = knockout_for(
            knockout_seeds(options.knockout_field()),
            &options.knockout_options(),
        )?;
        let areas = main.areas;

        let total_minutes = estimate_minutes(
            &[
                StageTiming {
                    games: main.schedule.games,
                    game_time: options.game_time,
                    rest_time: options.rest_time,
                },
                StageTiming {
                    games: knockout.games,
                    game_time: options.knockout_game_time,
                    rest_time: options.knockout_rest_time,
                },
            ],
            areas,
        );

        let stages: [&[Game]; 2] = [&main.schedule.schedule, &knockout.schedule];
        let schedule = match balance_stages(&stages, areas) {
            PlannedSchedule::Blocked(blocks) => {
                PlannedSchedule::Blocked(annotate_back_to_back(&blocks))
            }
            flat => flat,
        };

        log::info!(
            "Planned {} teams: {} ({} games) + knockout ({} games) on {} area(s), {} minutes",
            team_count,
            main.schedule.format,
            main.schedule.games,
            knockout.games,
            areas,
            total_minutes
        );

        Ok(TournamentPlan {
            main_stage: StageSummary {
                format: main.schedule.format,
                games: main.schedule.games,
                areas: Some(areas),
            },
            knockout_stage: StageSummary {
                format: knockout.format,
                games: knockout.games,
                areas: None,
            },
            total_minutes,
            schedule,
            layout: main.layout,
        })
    }
}

/// Plans a tournament; the partial round-robin shuffle follows
/// `options.seed` when set.
///
/// # Errors
///
/// See [`TournamentPlanner::plan`].
pub fn compute_tournament(options: &TournamentOptions) -> PlannerResult<TournamentPlan> {
    match options.seed {
        Some(seed) => TournamentPlanner::seeded(seed).plan(options),
        None => TournamentPlanner::new().plan(options),
    }
}

/// Knockout entrants by main-stage finish: "1st Seed", "2nd Seed", ...
fn knockout_seeds(field: usize) -> Vec<Team> {
    (1..=field)
        .map(|rank| Team::Label(format!("{} Seed", ordinal(rank))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PlannerError;
    use crate::planner::config::TeamsInput;
    use crate::schedule::KeepOrder;

    #[test]
    fn test_two_teams_end_to_end() {
        let options = TournamentOptions::for_teams(2)
            .with_areas(1)
            .with_timing(20, 5)
            .with_knockout_timing(20, 5);
        let plan = compute_tournament(&options).unwrap();
        assert_eq!(plan.total_minutes, 50);
        assert_eq!(plan.main_stage.games, 1);
        assert_eq!(plan.knockout_stage.games, 1);
        assert_eq!(plan.main_stage.format, ScheduleFormat::RoundRobin);
        assert_eq!(plan.knockout_stage.format, ScheduleFormat::Knockout);
        assert!(matches!(plan.schedule, PlannedSchedule::Flat(ref games) if games.len() == 2));
    }

    #[test]
    fn test_rejects_single_team() {
        let err = compute_tournament(&TournamentOptions::for_teams(1)).unwrap_err();
        assert!(matches!(err, PlannerError::InsufficientTeams { teams: 1 }));
    }

    #[test]
    fn test_knockout_seeds_are_placeholders() {
        assert_eq!(
            knockout_seeds(3),
            vec![
                Team::from("1st Seed"),
                Team::from("2nd Seed"),
                Team::from("3rd Seed")
            ]
        );
    }

    #[test]
    fn test_area_cap_reported() {
        let plan = compute_tournament(&TournamentOptions::for_teams(4).with_areas(8)).unwrap();
        assert_eq!(plan.main_stage.areas, Some(2));
        // 6 games on 2 areas: 3 + 0 slots; knockout 4 games: 2 + 0 slots
        assert_eq!(plan.total_minutes, (3 + 2) * 25);
    }

    #[test]
    fn test_pods_plan_has_layout() {
        let plan = compute_tournament(&TournamentOptions::for_teams(12).with_areas(2)).unwrap();
        assert_eq!(plan.main_stage.format, ScheduleFormat::Pods);
        assert_eq!(plan.main_stage.games, 48);
        assert!(plan.layout.is_some());
        // 12 seeds: bracket of 16 with a loser final
        assert_eq!(plan.knockout_stage.games, 12);
    }

    #[test]
    fn test_blocked_schedule_is_annotated() {
        let plan = compute_tournament(&TournamentOptions::for_teams(6).with_areas(3)).unwrap();
        let PlannedSchedule::Blocked(blocks) = &plan.schedule else {
            panic!("expected blocks");
        };
        assert!(blocks[0].iter().all(|g| g.back_to_back_teams.is_none()));
        assert!(blocks[1].iter().all(|g| g.back_to_back_teams.is_some()));
    }

    #[test]
    fn test_partial_round_robin_with_fixed_source() {
        let mut options = TournamentOptions::for_teams(6);
        options.games_per_team = Some(3);
        let plan = TournamentPlanner::with_source(KeepOrder)
            .plan(&options)
            .unwrap();
        assert_eq!(plan.main_stage.format, ScheduleFormat::PartialRoundRobin);
        assert_eq!(plan.main_stage.games, 9);
    }

    #[test]
    fn test_smaller_knockout_field() {
        let mut options = TournamentOptions::for_teams(10).with_areas(5);
        options.knockout_teams = Some(4);
        options.third_place_final = false;
        let plan = compute_tournament(&options).unwrap();
        assert_eq!(plan.knockout_stage.games, 3);
    }

    #[test]
    fn test_named_teams() {
        let options = TournamentOptions::new(TeamsInput::Names(vec![
            "Owls".to_string(),
            "Bats".to_string(),
            "Cats".to_string(),
        ]));
        let plan = compute_tournament(&options).unwrap();
        assert_eq!(plan.main_stage.games, 3);
        let first = plan.schedule.games()[0];
        assert_eq!(first.teams, vec![Team::from("Owls")]);
        assert!(first.is_bye_match);
    }

    #[test]
    fn test_plan_serializes_like_result_object() {
        let plan = compute_tournament(&TournamentOptions::for_teams(2)).unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["mainStage"]["type"], "round robin");
        assert_eq!(json["mainStage"]["areas"], 1);
        assert_eq!(json["knockoutStage"]["type"], "knockout");
        assert!(json["knockoutStage"].get("areas").is_none());
        assert_eq!(json["totalMinutes"], 50);
        assert!(json["schedule"].is_array());
        assert!(json.get("layout").is_none());
    }
}
