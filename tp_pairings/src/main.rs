//! Prints the raw Berger-table pairing list for a team count.

use anyhow::{Result, bail};
use pico_args::Arguments;
use tp_pairings::{raw_pairings, render};

const HELP: &str = "\
Print raw round-robin pairings (Berger tables, no seeding)

USAGE:
  tp_pairings --teams N

OPTIONS:
  --teams N             Number of teams (at least 2)

FLAGS:
  -h, --help            Print help information
";

struct Args {
    teams: usize,
}

fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        teams: pargs.value_from_str("--teams")?,
    };

    if args.teams < 2 {
        bail!("Need at least 2 teams, got {}", args.teams);
    }

    print!("{}", render(&raw_pairings(args.teams)));
    Ok(())
}
