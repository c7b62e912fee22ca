//! Command-line tournament planner.
//!
//! Plans a tournament from flags, environment or a JSON config file and
//! prints a summary plus the game list. `balance` re-balances a stored
//! schedule document over a number of areas.

mod config;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveTime;
use log::info;
use pico_args::Arguments;
use tourney_planner::{balance_document, compute_tournament};

use config::PlanFlags;

const HELP: &str = "\
Plan a tournament: format, duration and schedule

USAGE:
  tp_cli [plan] [OPTIONS]
  tp_cli balance --file FILE [--areas N]

PLAN OPTIONS:
  --teams N                 Number of teams             [default: env TP_TEAMS]
  --names A,B,C             Team names, strongest first (overrides --teams)
  --areas N                 Concurrent playing areas    [default: env TP_AREAS or 1]
  --game-time MIN           Minutes per game            [default: env TP_GAME_TIME or 20]
  --rest-time MIN           Minutes of rest per game    [default: env TP_REST_TIME or 5]
  --knockout-game-time MIN  Minutes per knockout game   [default: env TP_KNOCKOUT_GAME_TIME or 20]
  --knockout-rest-time MIN  Knockout rest minutes       [default: env TP_KNOCKOUT_REST_TIME or 5]
  --games-per-team N        Cap games per team (partial round robin)
  --knockout-teams N        Finishers entering the knockout [default: all]
  --no-third-place          Skip the loser final
  --seed N                  Shuffle seed                [default: env TP_SEED or random]
  --config FILE             JSON options file (flags and env override it)
  --start HH:MM             Print the estimated finish time
  --json                    Print the whole plan as JSON

BALANCE OPTIONS:
  --file FILE               JSON stage or array of stages with a schedule
  --areas N                 Concurrent playing areas    [default: 1]

FLAGS:
  -h, --help                Print help information

ENVIRONMENT:
  RUST_LOG                  Log level (e.g. info, debug)
  (A .env file in the working directory is loaded when present)
";

struct PlanArgs {
    flags: PlanFlags,
    start: Option<NaiveTime>,
    json: bool,
}

struct BalanceArgs {
    file: PathBuf,
    areas: usize,
}

enum Command {
    Plan(PlanArgs),
    Balance(BalanceArgs),
}

fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    env_logger::builder().format_target(false).init();

    match parse_command(pargs)? {
        Command::Plan(args) => plan(args),
        Command::Balance(args) => balance(args),
    }
}

fn parse_command(mut pargs: Arguments) -> Result<Command> {
    let command = match pargs.subcommand()?.as_deref() {
        None | Some("plan") => Command::Plan(PlanArgs {
            flags: PlanFlags {
                teams: pargs.opt_value_from_str("--teams")?,
                names: pargs.opt_value_from_fn("--names", config::parse_names)?,
                areas: pargs.opt_value_from_str("--areas")?,
                game_time: pargs.opt_value_from_str("--game-time")?,
                rest_time: pargs.opt_value_from_str("--rest-time")?,
                knockout_game_time: pargs.opt_value_from_str("--knockout-game-time")?,
                knockout_rest_time: pargs.opt_value_from_str("--knockout-rest-time")?,
                games_per_team: pargs.opt_value_from_str("--games-per-team")?,
                knockout_teams: pargs.opt_value_from_str("--knockout-teams")?,
                no_third_place: pargs.contains("--no-third-place"),
                seed: pargs.opt_value_from_str("--seed")?,
                config: pargs.opt_value_from_os_str("--config", parse_path)?,
            },
            start: pargs.opt_value_from_fn("--start", parse_clock)?,
            json: pargs.contains("--json"),
        }),
        Some("balance") => Command::Balance(BalanceArgs {
            file: pargs.value_from_os_str("--file", parse_path)?,
            areas: pargs.opt_value_from_str("--areas")?.unwrap_or(1),
        }),
        Some(other) => bail!("Unknown command '{other}', see --help"),
    };

    let rest = pargs.finish();
    if !rest.is_empty() {
        bail!("Unexpected arguments: {rest:?}");
    }
    Ok(command)
}

fn plan(args: PlanArgs) -> Result<()> {
    let options = config::resolve(args.flags)?;
    info!(
        "Planning for {} teams on {} area(s)",
        options.teams.len(),
        options.areas
    );

    let plan = compute_tournament(&options).context("Failed to plan tournament")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", output::render_plan(&plan, args.start));
    }
    Ok(())
}

fn balance(args: BalanceArgs) -> Result<()> {
    if args.areas == 0 {
        bail!("--areas must be at least 1");
    }

    let json = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let schedule = balance_document(&json, args.areas)
        .with_context(|| format!("Failed to balance {}", args.file.display()))?;

    info!(
        "Balanced {} games into {} slots",
        schedule.games().len(),
        schedule.slots()
    );
    print!("{}", output::render_schedule(&schedule));
    Ok(())
}

fn parse_path(raw: &std::ffi::OsStr) -> Result<PathBuf, &'static str> {
    Ok(PathBuf::from(raw))
}

fn parse_clock(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn args(list: &[&str]) -> Arguments {
        Arguments::from_vec(list.iter().map(OsString::from).collect())
    }

    #[test]
    fn test_plan_is_default_command() {
        let Command::Plan(plan) = parse_command(args(&["--teams", "6", "--areas", "2"])).unwrap()
        else {
            panic!("expected plan");
        };
        assert_eq!(plan.flags.teams, Some(6));
        assert_eq!(plan.flags.areas, Some(2));
        assert!(!plan.json);
    }

    #[test]
    fn test_plan_flags() {
        let Command::Plan(plan) = parse_command(args(&[
            "plan",
            "--names",
            "Owls,Bats,Cats",
            "--no-third-place",
            "--start",
            "09:30",
            "--json",
        ]))
        .unwrap() else {
            panic!("expected plan");
        };
        assert_eq!(plan.flags.names.map(|n| n.len()), Some(3));
        assert!(plan.flags.no_third_place);
        assert_eq!(plan.start, NaiveTime::from_hms_opt(9, 30, 0));
        assert!(plan.json);
    }

    #[test]
    fn test_balance_command() {
        let Command::Balance(balance) =
            parse_command(args(&["balance", "--file", "stages.json", "--areas", "3"])).unwrap()
        else {
            panic!("expected balance");
        };
        assert_eq!(balance.file, PathBuf::from("stages.json"));
        assert_eq!(balance.areas, 3);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(parse_command(args(&["--teams", "many"])).is_err());
        assert!(parse_command(args(&["--start", "9h"])).is_err());
        assert!(parse_command(args(&["schedule"])).is_err());
        assert!(parse_command(args(&["--teams", "4", "--courts", "2"])).is_err());
        assert!(parse_command(args(&["balance"])).is_err());
    }
}
