//! Schedule data models shared by every generator.

use crate::errors::{PlannerError, PlannerResult};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

/// A competing entity: a 1-based seed index or a free-form label.
///
/// Placeholders for teams that are only known once earlier games are
/// played ("Winner 5", "2nd Pod 3") are labels too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Team {
    /// Numbered team
    Seed(usize),
    /// Named team or placeholder
    Label(String),
}

impl Team {
    /// Numbered roster `1..=count`
    pub fn roster(count: usize) -> Vec<Team> {
        (1..=count).map(Team::Seed).collect()
    }

    /// Roster from a list of names, in the given order
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Vec<Team> {
        names
            .iter()
            .map(|name| Team::Label(name.as_ref().to_string()))
            .collect()
    }

    /// Like [`Team::from_names`], but rejects blank and duplicate names.
    pub fn checked_names<S: AsRef<str>>(names: &[S]) -> PlannerResult<Vec<Team>> {
        let mut seen = HashSet::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(PlannerError::invalid("team names must not be blank"));
            }
            if !seen.insert(name) {
                return Err(PlannerError::invalid(format!(
                    "team name '{name}' is listed more than once"
                )));
            }
        }
        Ok(names
            .iter()
            .map(|name| Team::Label(name.as_ref().trim().to_string()))
            .collect())
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Seed(seed) => write!(f, "{seed}"),
            Team::Label(label) => write!(f, "{label}"),
        }
    }
}

impl From<&str> for Team {
    fn from(label: &str) -> Self {
        Team::Label(label.to_string())
    }
}

/// Game identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GameId {
    Number(u32),
    Label(String),
}

impl GameId {
    /// Prefixes the id with a group label, e.g. `P2` + `3` → `P2-3`.
    pub fn prefixed(&self, prefix: &str) -> GameId {
        GameId::Label(format!("{prefix}-{self}"))
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameId::Number(id) => write!(f, "{id}"),
            GameId::Label(id) => write!(f, "{id}"),
        }
    }
}

/// A scheduled slot.
///
/// A slot with a single team is a bye: the team sits out the round (round
/// robin) or advances without playing (knockout).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: GameId,
    /// Round number (1-indexed)
    pub round: u32,
    pub teams: Vec<Team>,
    #[serde(default)]
    pub is_bye_match: bool,
    /// Teams that also played in the previous block, set by
    /// [`annotate_back_to_back`](crate::planner::balancer::annotate_back_to_back)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_to_back_teams: Option<Vec<Team>>,
}

impl Game {
    /// A contested game between two teams
    pub fn new(id: GameId, round: u32, home: Team, away: Team) -> Self {
        Self {
            id,
            round,
            teams: vec![home, away],
            is_bye_match: false,
            back_to_back_teams: None,
        }
    }

    /// A bye slot for a single team
    pub fn bye(id: GameId, round: u32, team: Team) -> Self {
        Self {
            id,
            round,
            teams: vec![team],
            is_bye_match: true,
            back_to_back_teams: None,
        }
    }

    /// Whether `team` takes part in this slot
    pub fn involves(&self, team: &Team) -> bool {
        self.teams.contains(team)
    }

    /// Whether both slots have at least one team in common
    pub fn shares_team(&self, other: &Game) -> bool {
        self.teams.iter().any(|team| other.involves(team))
    }
}

/// Tournament format of a generated schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleFormat {
    #[serde(rename = "round robin")]
    RoundRobin,
    #[serde(rename = "partial round robin")]
    PartialRoundRobin,
    #[serde(rename = "knockout")]
    Knockout,
    #[serde(rename = "pods")]
    Pods,
}

impl fmt::Display for ScheduleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleFormat::RoundRobin => write!(f, "round robin"),
            ScheduleFormat::PartialRoundRobin => write!(f, "partial round robin"),
            ScheduleFormat::Knockout => write!(f, "knockout"),
            ScheduleFormat::Pods => write!(f, "pods"),
        }
    }
}

/// Output of a single generator run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(rename = "type")]
    pub format: ScheduleFormat,
    /// Number of games counted towards this stage's total
    pub games: usize,
    /// Ordered slots, byes included
    pub schedule: Vec<Game>,
    /// Teams the schedule was generated for
    pub teams: Vec<Team>,
}

impl Schedule {
    /// An empty schedule of the given format
    pub fn empty(format: ScheduleFormat, teams: Vec<Team>) -> Self {
        Self {
            format,
            games: 0,
            schedule: Vec::new(),
            teams,
        }
    }

    /// Number of bye slots
    pub fn byes(&self) -> usize {
        self.schedule.iter().filter(|game| game.is_bye_match).count()
    }

    /// Highest round number, 0 for an empty schedule
    pub fn rounds(&self) -> u32 {
        self.schedule.iter().map(|game| game.round).max().unwrap_or(0)
    }
}

/// English ordinal for ranks: 1st, 2nd, 3rd, 4th, ... 11th, 12th, 13th, 21st.
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
