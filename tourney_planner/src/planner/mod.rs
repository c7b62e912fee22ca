//! Tournament planning on top of the schedule generators.
//!
//! - [`config`]: options, defaults and JSON loading
//! - [`format`]: round robin or pods for the main stage
//! - [`duration`]: total minutes across stages
//! - [`balancer`]: blocks of concurrent games and back-to-back notes
//! - [`manager`]: the planner that ties the stages together
//!
//! ## Example
//!
//! ```
//! use tourney_planner::planner::{TournamentOptions, compute_tournament};
//!
//! let options = TournamentOptions::for_teams(2);
//! let plan = compute_tournament(&options).unwrap();
//! assert_eq!(plan.total_minutes, 50);
//! ```

pub mod balancer;
pub mod config;
pub mod duration;
pub mod format;
pub mod manager;

pub use balancer::{
    PlannedSchedule, StoredStage, annotate_back_to_back, balance_document, balance_stage,
    balance_stages,
};
pub use config::{
    DEFAULT_AREAS, DEFAULT_GAME_TIME, DEFAULT_KNOCKOUT_GAME_TIME, DEFAULT_KNOCKOUT_REST_TIME,
    DEFAULT_REST_TIME, TeamsInput, TournamentOptions,
};
pub use duration::{StageTiming, estimate_minutes, stage_length, stage_minutes};
pub use format::{MainStage, POD_THRESHOLD, round_robin_areas, select_format, uses_pods};
pub use manager::{StageSummary, TournamentPlan, TournamentPlanner, compute_tournament};
