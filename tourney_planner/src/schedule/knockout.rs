//! Single-elimination ("duel") brackets with seeding and byes.
//!
//! The bracket is padded to the next power of two. Seeds beyond the field
//! are phantoms: their round-1 opponent gets a bye. Since seed `s` always
//! meets seed `size + 1 - s` in round 1, byes land on the top seeds.

use serde::{Deserialize, Serialize};

use super::models::{Game, GameId, Schedule, ScheduleFormat, Team};
use crate::errors::{PlannerError, PlannerResult};

/// Knockout configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnockoutOptions {
    /// Play a loser final before the championship final when both
    /// semifinals are contested
    pub third_place_final: bool,
}

impl Default for KnockoutOptions {
    fn default() -> Self {
        Self {
            third_place_final: true,
        }
    }
}

/// What enters a later-round slot
enum Advancing {
    /// Known team, carried through a bye
    Team(Team),
    /// Winner of a contested game
    Winner(u32),
}

impl Advancing {
    fn into_team(self) -> Team {
        match self {
            Advancing::Team(team) => team,
            Advancing::Winner(id) => Team::Label(format!("Winner {id}")),
        }
    }
}

/// Knockout over `count` numbered teams, loser final included.
///
/// # Errors
///
/// Returns `InvalidArgument` for fewer than two teams.
pub fn knockout(count: usize) -> PlannerResult<Schedule> {
    knockout_for(Team::roster(count), &KnockoutOptions::default())
}

/// Knockout over a list of team names, strongest first.
///
/// # Errors
///
/// Returns `InvalidArgument` for fewer than two, blank or duplicate names.
pub fn knockout_named<S: AsRef<str>>(
    names: &[S],
    options: &KnockoutOptions,
) -> PlannerResult<Schedule> {
    knockout_for(Team::checked_names(names)?, options)
}

/// Knockout over an explicit roster; `teams[0]` is seed 1.
///
/// `games` counts contested matches only: `n - 1`, plus one for the loser
/// final. Byes stay in `schedule` flagged as bye matches.
///
/// # Errors
///
/// Returns `InvalidArgument` for fewer than two teams.
pub fn knockout_for(teams: Vec<Team>, options: &KnockoutOptions) -> PlannerResult<Schedule> {
    let n = teams.len();
    if n < 2 {
        return Err(PlannerError::invalid(format!(
            "a knockout needs at least 2 teams, got {n}"
        )));
    }

    let power = n.next_power_of_two().trailing_zeros();
    let size = 1usize << power;
    let mut schedule = Vec::with_capacity(size);
    let mut next_id: u32 = 1;

    let mut previous = Vec::with_capacity(size / 2);
    for m in 1..=size / 2 {
        let (a, b) = seeds(m, power);
        let id = GameId::Number(next_id);
        if a > n || b > n {
            let seed = a.min(b);
            let team = teams[seed - 1].clone();
            schedule.push(Game::bye(id, 1, team.clone()));
            previous.push(Advancing::Team(team));
        } else {
            schedule.push(Game::new(id, 1, teams[a - 1].clone(), teams[b - 1].clone()));
            previous.push(Advancing::Winner(next_id));
        }
        next_id += 1;
    }

    for round in 2..=power {
        let mut current = Vec::with_capacity(previous.len() / 2);
        let mut feeders = previous.into_iter();
        while let (Some(home), Some(away)) = (feeders.next(), feeders.next()) {
            if round == power && options.third_place_final {
                if let (Advancing::Winner(left), Advancing::Winner(right)) = (&home, &away) {
                    schedule.push(Game::new(
                        GameId::Number(next_id),
                        round,
                        Team::Label(format!("Loser {left}")),
                        Team::Label(format!("Loser {right}")),
                    ));
                    next_id += 1;
                }
            }
            schedule.push(Game::new(
                GameId::Number(next_id),
                round,
                home.into_team(),
                away.into_team(),
            ));
            current.push(Advancing::Winner(next_id));
            next_id += 1;
        }
        previous = current;
    }

    let games = schedule.iter().filter(|game| !game.is_bye_match).count();
    log::debug!(
        "Knockout for {} teams: bracket of {}, {} byes, {} games",
        n,
        size,
        size - n,
        games
    );

    Ok(Schedule {
        format: ScheduleFormat::Knockout,
        games,
        schedule,
        teams,
    })
}

/// Seeds meeting in round-1 match `m` (1-indexed) of a bracket of
/// `2^power` slots.
///
/// Match `m` with `k = floor(log2 m)` and `r = m - 2^k` gets companion seed
/// `2^(power - k)` when `r == 0`; otherwise the bits of `m - 2r` are
/// reversed and shifted into the upper half of the companion, offset by
/// `2^(power - k - 1)`. The pair is `(2^power + 1 - companion, companion)`.
pub fn seeds(m: usize, power: u32) -> (usize, usize) {
    let k = m.ilog2();
    let r = m - (1 << k);
    let companion = if r == 0 {
        1 << (power - k)
    } else {
        let rest = m - 2 * r;
        let bits = rest.ilog2() + 1;
        let reversed = rest.reverse_bits() >> (usize::BITS - bits);
        (reversed << (power - bits)) + (1 << (power - k - 1))
    };
    ((1 << power) + 1 - companion, companion)
}
