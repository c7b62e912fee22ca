//! Plain-text rendering of plans and schedules.

use std::fmt::Write;

use chrono::{NaiveTime, TimeDelta};
use tourney_planner::{Game, PlannedSchedule, TournamentPlan};

const MINUTES_PER_DAY: u64 = 24 * 60;

/// One line per game: id, round, teams and back-to-back notes
pub fn describe_game(game: &Game) -> String {
    let teams: Vec<String> = game.teams.iter().map(ToString::to_string).collect();
    let id = game.id.to_string();
    let mut line = if game.is_bye_match {
        format!("#{id:<5} round {:<3} {} (bye)", game.round, teams.join(" "))
    } else {
        format!("#{id:<5} round {:<3} {}", game.round, teams.join(" vs "))
    };

    if let Some(repeat) = game.back_to_back_teams.as_ref().filter(|t| !t.is_empty()) {
        let repeat: Vec<String> = repeat.iter().map(ToString::to_string).collect();
        let _ = write!(line, "  [back-to-back: {}]", repeat.join(", "));
    }
    line
}

/// Flat list or numbered blocks
pub fn render_schedule(schedule: &PlannedSchedule) -> String {
    let mut out = String::new();
    match schedule {
        PlannedSchedule::Flat(games) => {
            for game in games {
                let _ = writeln!(out, "  {}", describe_game(game));
            }
        }
        PlannedSchedule::Blocked(blocks) => {
            for (i, block) in blocks.iter().enumerate() {
                let _ = writeln!(out, "Block {}", i + 1);
                for game in block {
                    let _ = writeln!(out, "  {}", describe_game(game));
                }
            }
        }
    }
    out
}

/// `3h 05m` style duration
pub fn format_minutes(minutes: u64) -> String {
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

/// Clock time `minutes` after `start` and the number of midnights passed
pub fn finish_time(start: NaiveTime, minutes: u64) -> (NaiveTime, u64) {
    let days = minutes / MINUTES_PER_DAY;
    let rest = TimeDelta::minutes((minutes % MINUTES_PER_DAY) as i64);
    let (finish, wrapped) = start.overflowing_add_signed(rest);
    (finish, days + u64::from(wrapped != 0))
}

/// Summary of the plan followed by the schedule
pub fn render_plan(plan: &TournamentPlan, start: Option<NaiveTime>) -> String {
    let mut out = String::new();
    let main = &plan.main_stage;
    let _ = writeln!(
        out,
        "Main stage:     {} ({} games on {} area{})",
        main.format,
        main.games,
        main.areas.unwrap_or(1),
        if main.areas == Some(1) { "" } else { "s" }
    );
    let _ = writeln!(
        out,
        "Knockout stage: {} ({} games)",
        plan.knockout_stage.format, plan.knockout_stage.games
    );
    let _ = writeln!(
        out,
        "Total time:     {} minutes ({})",
        plan.total_minutes,
        format_minutes(plan.total_minutes)
    );

    if let Some(start) = start {
        let (finish, days) = finish_time(start, plan.total_minutes);
        let _ = match days {
            0 => writeln!(out, "Finishes at:    {}", finish.format("%H:%M")),
            _ => writeln!(out, "Finishes at:    {} (+{days}d)", finish.format("%H:%M")),
        };
    }

    if let Some(layout) = &plan.layout {
        for pod in &layout.pods {
            let teams: Vec<String> = pod.teams.iter().map(ToString::to_string).collect();
            let _ = writeln!(out, "Pod {}: {}", pod.index, teams.join(", "));
        }
    }

    let _ = writeln!(out, "\nSchedule:");
    out.push_str(&render_schedule(&plan.schedule));
    out
}
