//! # Tourney Planner
//!
//! Plans small sports tournaments: picks a main-stage format for the
//! field, adds a seeded knockout, estimates how long everything takes and
//! spreads the games over the available playing areas.
//!
//! ## Formats
//!
//! - **Round robin**: everyone plays everyone, circle method
//! - **Partial round robin**: capped number of games per team
//! - **Pods**: groups of four, then rank divisions and crossover games
//! - **Knockout**: single elimination with byes and a loser final
//!
//! ## Core Modules
//!
//! - [`schedule`]: the pure schedule generators
//! - [`planner`]: format selection, duration, area balancing
//!
//! ## Example
//!
//! ```
//! use tourney_planner::{TournamentOptions, compute_tournament};
//!
//! let options = TournamentOptions::for_teams(6).with_areas(2);
//! let plan = compute_tournament(&options).unwrap();
//! assert_eq!(plan.main_stage.games, 15);
//! ```

/// Error type shared by every module.
pub mod errors;
pub use errors::{PlannerError, PlannerResult};

/// Schedule generators.
pub mod schedule;
pub use schedule::{Game, GameId, Schedule, ScheduleFormat, Team};

/// Format selection, duration estimate and area balancing.
pub mod planner;
pub use planner::{
    PlannedSchedule, TeamsInput, TournamentOptions, TournamentPlan, balance_document,
    compute_tournament,
};
