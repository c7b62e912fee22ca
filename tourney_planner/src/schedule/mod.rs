//! Schedule generators.
//!
//! Every generator is a pure function of its roster (and, for the partial
//! round robin, of its [`ShuffleSource`]):
//! - [`round_robin`]: circle-method round robin with byes for odd fields
//! - [`partial`]: round robin capped at a number of games per team
//! - [`knockout`]: seeded single-elimination bracket with byes
//! - [`pods`]: pods, rank divisions and crossover games
//!
//! ## Example
//!
//! ```
//! use tourney_planner::schedule::{knockout::knockout, round_robin::round_robin};
//!
//! let league = round_robin(6);
//! assert_eq!(league.games, 15);
//!
//! let playoff = knockout(6).unwrap();
//! assert_eq!(playoff.byes(), 2);
//! ```

pub mod knockout;
pub mod models;
pub mod partial;
pub mod pods;
pub mod round_robin;
pub mod shuffle;

pub use knockout::{KnockoutOptions, knockout, knockout_for, knockout_named, seeds};
pub use models::{Game, GameId, Schedule, ScheduleFormat, Team, ordinal};
pub use partial::{partial_round_robin, partial_round_robin_for, partial_round_robin_named};
pub use pods::{Group, PodLayout, PodsSchedule, pods, pods_for, pods_named};
pub use round_robin::{round_robin, round_robin_for, round_robin_named};
pub use shuffle::{KeepOrder, Pairing, PairingShuffler, ShuffleSource};
