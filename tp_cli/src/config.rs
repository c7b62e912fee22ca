//! Planner configuration resolution.
//!
//! A value is taken from the command-line flag when given, then from the
//! matching `TP_*` environment variable, then from the `--config` JSON file,
//! and finally from the library defaults.

use std::{path::PathBuf, str::FromStr};

use tourney_planner::{PlannerError, TeamsInput, TournamentOptions};

pub const ENV_TEAMS: &str = "TP_TEAMS";
pub const ENV_AREAS: &str = "TP_AREAS";
pub const ENV_GAME_TIME: &str = "TP_GAME_TIME";
pub const ENV_REST_TIME: &str = "TP_REST_TIME";
pub const ENV_KNOCKOUT_GAME_TIME: &str = "TP_KNOCKOUT_GAME_TIME";
pub const ENV_KNOCKOUT_REST_TIME: &str = "TP_KNOCKOUT_REST_TIME";
pub const ENV_SEED: &str = "TP_SEED";

/// Options given on the command line for the `plan` command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanFlags {
    pub teams: Option<usize>,
    pub names: Option<Vec<String>>,
    pub areas: Option<usize>,
    pub game_time: Option<u32>,
    pub rest_time: Option<u32>,
    pub knockout_game_time: Option<u32>,
    pub knockout_rest_time: Option<u32>,
    pub games_per_team: Option<usize>,
    pub knockout_teams: Option<usize>,
    pub no_third_place: bool,
    pub seed: Option<u64>,
    pub config: Option<PathBuf>,
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required setting: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid config file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: PlannerError,
    },
}

/// Resolve options using the process environment
///
/// # Errors
///
/// See [`resolve_with`].
pub fn resolve(flags: PlanFlags) -> Result<TournamentOptions, ConfigError> {
    resolve_with(flags, |key| std::env::var(key).ok())
}

/// Resolve options with `lookup` standing in for the environment.
///
/// # Errors
///
/// `MissingRequired` when no source names the teams, `File` when the
/// config file cannot be read or parsed.
pub fn resolve_with<F>(flags: PlanFlags, lookup: F) -> Result<TournamentOptions, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let file = match &flags.config {
        Some(path) => Some(
            TournamentOptions::from_file(path).map_err(|source| ConfigError::File {
                path: path.clone(),
                source,
            })?,
        ),
        None => None,
    };

    let teams = match (flags.names, flags.teams) {
        (Some(names), _) => Some(TeamsInput::Names(names)),
        (None, Some(count)) => Some(TeamsInput::Count(count)),
        (None, None) => parse_env(&lookup, ENV_TEAMS).map(TeamsInput::Count),
    };

    let mut options = match (file, teams) {
        (Some(mut options), Some(teams)) => {
            options.teams = teams;
            options
        }
        (Some(options), None) => options,
        (None, Some(teams)) => TournamentOptions::new(teams),
        (None, None) => {
            return Err(ConfigError::MissingRequired {
                var: ENV_TEAMS.to_string(),
                hint: "Pass --teams N, --names a,b,c or a --config file".to_string(),
            });
        }
    };

    options.areas = pick(flags.areas, &lookup, ENV_AREAS, options.areas);
    options.game_time = pick(flags.game_time, &lookup, ENV_GAME_TIME, options.game_time);
    options.rest_time = pick(flags.rest_time, &lookup, ENV_REST_TIME, options.rest_time);
    options.knockout_game_time = pick(
        flags.knockout_game_time,
        &lookup,
        ENV_KNOCKOUT_GAME_TIME,
        options.knockout_game_time,
    );
    options.knockout_rest_time = pick(
        flags.knockout_rest_time,
        &lookup,
        ENV_KNOCKOUT_REST_TIME,
        options.knockout_rest_time,
    );
    options.seed = flags
        .seed
        .or_else(|| parse_env(&lookup, ENV_SEED))
        .or(options.seed);

    if flags.games_per_team.is_some() {
        options.games_per_team = flags.games_per_team;
    }
    if flags.knockout_teams.is_some() {
        options.knockout_teams = flags.knockout_teams;
    }
    if flags.no_third_place {
        options.third_place_final = false;
    }

    Ok(options)
}

/// Flag, then environment, then `fallback`
fn pick<T, F>(flag: Option<T>, lookup: &F, key: &str, fallback: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    flag.or_else(|| parse_env(lookup, key)).unwrap_or(fallback)
}

/// Helper to parse an environment variable, ignoring unparsable values
fn parse_env<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {key}={raw}: not a valid value");
            None
        }
    }
}

/// Split a comma-separated `--names` value
pub fn parse_names(raw: &str) -> Result<Vec<String>, String> {
    let names: Vec<String> = raw.split(',').map(|name| name.trim().to_string()).collect();
    if names.iter().any(String::is_empty) {
        return Err(format!("empty team name in '{raw}'"));
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_flags_only() {
        let flags = PlanFlags {
            teams: Some(6),
            areas: Some(2),
            ..Default::default()
        };
        let options = resolve_with(flags, env(&[])).unwrap();
        assert_eq!(options.teams, TeamsInput::Count(6));
        assert_eq!(options.areas, 2);
        assert_eq!(options.game_time, 20);
    }

    #[test]
    fn test_env_fallback() {
        let options = resolve_with(
            PlanFlags::default(),
            env(&[(ENV_TEAMS, "10"), (ENV_AREAS, "3"), (ENV_REST_TIME, "2")]),
        )
        .unwrap();
        assert_eq!(options.teams, TeamsInput::Count(10));
        assert_eq!(options.areas, 3);
        assert_eq!(options.rest_time, 2);
    }

    #[test]
    fn test_flag_beats_env() {
        let flags = PlanFlags {
            teams: Some(4),
            areas: Some(1),
            ..Default::default()
        };
        let options = resolve_with(flags, env(&[(ENV_TEAMS, "10"), (ENV_AREAS, "3")])).unwrap();
        assert_eq!(options.teams, TeamsInput::Count(4));
        assert_eq!(options.areas, 1);
    }

    #[test]
    fn test_names_beat_count() {
        let flags = PlanFlags {
            teams: Some(8),
            names: Some(vec!["Owls".to_string(), "Bats".to_string()]),
            ..Default::default()
        };
        let options = resolve_with(flags, env(&[])).unwrap();
        assert_eq!(options.teams.len(), 2);
    }

    #[test]
    fn test_invalid_env_is_ignored() {
        let flags = PlanFlags {
            teams: Some(4),
            ..Default::default()
        };
        let options = resolve_with(flags, env(&[(ENV_GAME_TIME, "soon")])).unwrap();
        assert_eq!(options.game_time, 20);
    }

    #[test]
    fn test_missing_teams() {
        let err = resolve_with(PlanFlags::default(), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired { .. }));
        assert!(err.to_string().contains(ENV_TEAMS));
    }

    #[test]
    fn test_playoff_flags() {
        let flags = PlanFlags {
            teams: Some(8),
            knockout_teams: Some(4),
            games_per_team: Some(3),
            no_third_place: true,
            seed: Some(9),
            ..Default::default()
        };
        let options = resolve_with(flags, env(&[(ENV_SEED, "1")])).unwrap();
        assert_eq!(options.knockout_teams, Some(4));
        assert_eq!(options.games_per_team, Some(3));
        assert!(!options.third_place_final);
        assert_eq!(options.seed, Some(9));
    }

    #[test]
    fn test_config_file_below_env() {
        let path = std::env::temp_dir().join(format!("tp_cli_config_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"teams": 12, "areas": 4, "gameTime": 15}"#).unwrap();

        let flags = PlanFlags {
            config: Some(path.clone()),
            ..Default::default()
        };
        let options = resolve_with(flags, env(&[(ENV_AREAS, "2")])).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(options.teams, TeamsInput::Count(12));
        assert_eq!(options.areas, 2);
        assert_eq!(options.game_time, 15);
    }

    #[test]
    fn test_missing_config_file() {
        let flags = PlanFlags {
            config: Some(PathBuf::from("/nonexistent/tp_cli.json")),
            ..Default::default()
        };
        let err = resolve_with(flags, env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::File { .. }));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            parse_names("Owls, Bats ,Cats").unwrap(),
            vec!["Owls", "Bats", "Cats"]
        );
        assert!(parse_names("Owls,,Cats").is_err());
    }
}
