//! Raw round-robin pairing lists from the Berger table formula.
//!
//! For `n` teams (rounded up to even) round `r` pairs slot `i` as
//! `home = (r + i) mod (n - 1)` and `away = (n - 1 - i + r) mod (n - 1)`,
//! except slot 0 whose away side is always team `n - 1`. Team numbers are
//! 0-based in the formula and 1-based in the output. No seeding, no byes
//! beyond the phantom team of an odd field.

use std::fmt;

/// One slot of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Match { home: usize, away: usize },
    /// Paired with the phantom team of an odd field
    Bye(usize),
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Match { home, away } => write!(f, "{home}-{away}"),
            Slot::Bye(team) => write!(f, "{team}(bye)"),
        }
    }
}

/// Rounds of slots for `teams` teams; empty below two teams.
pub fn raw_pairings(teams: usize) -> Vec<Vec<Slot>> {
    if teams < 2 {
        return Vec::new();
    }
    let n = teams + teams % 2;
    let last = n - 1;

    (0..last)
        .map(|round| {
            (0..n / 2)
                .map(|i| {
                    let home = (round + i) % last;
                    let away = if i == 0 {
                        last
                    } else {
                        (last - i + round) % last
                    };
                    slot(home + 1, away + 1, teams)
                })
                .collect()
        })
        .collect()
}

fn slot(home: usize, away: usize, teams: usize) -> Slot {
    match (home > teams, away > teams) {
        (false, true) => Slot::Bye(home),
        (true, false) => Slot::Bye(away),
        _ => Slot::Match { home, away },
    }
}

/// `Round 1: 1-4 2-3` style listing
pub fn render(rounds: &[Vec<Slot>]) -> String {
    rounds
        .iter()
        .enumerate()
        .map(|(r, slots)| {
            let slots: Vec<String> = slots.iter().map(ToString::to_string).collect();
            format!("Round {}: {}\n", r + 1, slots.join(" "))
        })
        .collect()
}
