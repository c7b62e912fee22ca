//! Tournament options.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{PlannerError, PlannerResult};
use crate::schedule::{KnockoutOptions, Team};

/// Default minutes per main-stage game
pub const DEFAULT_GAME_TIME: u32 = 20;
/// Default minutes of rest after a main-stage game
pub const DEFAULT_REST_TIME: u32 = 5;
/// Default minutes per knockout game
pub const DEFAULT_KNOCKOUT_GAME_TIME: u32 = 20;
/// Default minutes of rest after a knockout game
pub const DEFAULT_KNOCKOUT_REST_TIME: u32 = 5;
/// Default number of playing areas
pub const DEFAULT_AREAS: usize = 1;

/// The field: a team count or the team names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamsInput {
    Count(usize),
    Names(Vec<String>),
}

impl TeamsInput {
    /// Number of teams in the field
    pub fn len(&self) -> usize {
        match self {
            TeamsInput::Count(count) => *count,
            TeamsInput::Names(names) => names.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Roster for the generators
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for blank or duplicate names.
    pub fn roster(&self) -> PlannerResult<Vec<Team>> {
        match self {
            TeamsInput::Count(count) => Ok(Team::roster(*count)),
            TeamsInput::Names(names) => Team::checked_names(names),
        }
    }
}

/// Every option the planner understands.
///
/// Loaded from JSON with camelCase keys; unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TournamentOptions {
    /// Team count or names
    pub teams: TeamsInput,

    /// Minutes per main-stage game (default: 20)
    #[serde(default = "default_game_time")]
    pub game_time: u32,

    /// Minutes of rest after each main-stage game (default: 5)
    #[serde(default = "default_rest_time")]
    pub rest_time: u32,

    /// Requested concurrent playing areas (default: 1)
    #[serde(default = "default_areas")]
    pub areas: usize,

    /// Minutes per knockout game (default: 20)
    #[serde(default = "default_knockout_game_time")]
    pub knockout_game_time: u32,

    /// Minutes of rest after each knockout game (default: 5)
    #[serde(default = "default_knockout_rest_time")]
    pub knockout_rest_time: u32,

    /// Cap on games per team; turns a round-robin main stage into a
    /// partial round robin
    #[serde(default)]
    pub games_per_team: Option<usize>,

    /// Loser final in the knockout (default: true)
    #[serde(default = "default_third_place_final")]
    pub third_place_final: bool,

    /// Number of main-stage finishers entering the knockout (default: all)
    #[serde(default)]
    pub knockout_teams: Option<usize>,

    /// Seed for the partial round-robin shuffle
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_game_time() -> u32 {
    DEFAULT_GAME_TIME
}

fn default_rest_time() -> u32 {
    DEFAULT_REST_TIME
}

fn default_areas() -> usize {
    DEFAULT_AREAS
}

fn default_knockout_game_time() -> u32 {
    DEFAULT_KNOCKOUT_GAME_TIME
}

fn default_knockout_rest_time() -> u32 {
    DEFAULT_KNOCKOUT_REST_TIME
}

fn default_third_place_final() -> bool {
    true
}

impl TournamentOptions {
    /// Options with every default for the given field
    pub fn new(teams: TeamsInput) -> Self {
        Self {
            teams,
            game_time: DEFAULT_GAME_TIME,
            rest_time: DEFAULT_REST_TIME,
            areas: DEFAULT_AREAS,
            knockout_game_time: DEFAULT_KNOCKOUT_GAME_TIME,
            knockout_rest_time: DEFAULT_KNOCKOUT_REST_TIME,
            games_per_team: None,
            third_place_final: true,
            knockout_teams: None,
            seed: None,
        }
    }

    /// Options for `count` numbered teams
    pub fn for_teams(count: usize) -> Self {
        Self::new(TeamsInput::Count(count))
    }

    /// Set the number of playing areas
    pub fn with_areas(mut self, areas: usize) -> Self {
        self.areas = areas;
        self
    }

    /// Set main-stage game and rest minutes
    pub fn with_timing(mut self, game_time: u32, rest_time: u32) -> Self {
        self.game_time = game_time;
        self.rest_time = rest_time;
        self
    }

    /// Set knockout game and rest minutes
    pub fn with_knockout_timing(mut self, game_time: u32, rest_time: u32) -> Self {
        self.knockout_game_time = game_time;
        self.knockout_rest_time = rest_time;
        self
    }

    /// Parse options from JSON.
    ///
    /// # Errors
    ///
    /// Unknown keys, missing `teams` and wrongly typed values give
    /// `InvalidArgument`; syntax errors give `Json`.
    pub fn from_json(json: &str) -> PlannerResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            if e.is_data() {
                PlannerError::invalid(e.to_string())
            } else {
                PlannerError::Json(e)
            }
        })
    }

    /// Read options from a JSON file
    ///
    /// # Errors
    ///
    /// As [`TournamentOptions::from_json`], plus `Io` when the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> PlannerResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Number of teams entering the knockout
    pub fn knockout_field(&self) -> usize {
        self.knockout_teams.unwrap_or_else(|| self.teams.len())
    }

    /// Knockout generator options
    pub fn knockout_options(&self) -> KnockoutOptions {
        KnockoutOptions {
            third_place_final: self.third_place_final,
        }
    }

    /// Validate before planning
    ///
    /// # Errors
    ///
    /// `InsufficientTeams` for fewer than two teams, `InvalidArgument` for
    /// bad names, zero areas or an out-of-range knockout field.
    pub fn validate(&self) -> PlannerResult<()> {
        let teams = self.teams.len();
        if teams < 2 {
            return Err(PlannerError::InsufficientTeams { teams });
        }

        if let TeamsInput::Names(names) = &self.teams {
            Team::checked_names(names)?;
        }

        if self.areas == 0 {
            return Err(PlannerError::invalid("areas must be at least 1"));
        }

        if let Some(field) = self.knockout_teams {
            if field < 2 || field > teams {
                return Err(PlannerError::invalid(format!(
                    "knockout teams must be between 2 and {teams}, got {field}"
                )));
            }
        }

        Ok(())
    }
}
