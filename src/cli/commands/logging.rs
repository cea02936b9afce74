use clap::{builder::ValueParser, Arg, ArgAction, Command};
use tracing::Level;

pub const ARG_VERBOSITY: &str = "verbosity";

const LEVEL_NAMES: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Accepts `0..=5` or a level name, so `BORABOND_LOG_LEVEL=debug` works too.
#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> Result<u8, String> {
        if let Some(parsed) = level.parse::<u8>().ok().filter(|n| *n <= 5) {
            return Ok(parsed);
        }
        let lower = level.to_lowercase();
        LEVEL_NAMES
            .iter()
            .position(|name| *name == lower)
            .and_then(|index| u8::try_from(index).ok())
            .ok_or_else(|| format!("invalid log level: {level}"))
    })
}

/// `-v` count to tracing level; no flag keeps the subscriber at its default.
#[must_use]
pub const fn level_for(verbosity: u8) -> Option<Level> {
    match verbosity {
        0 => None,
        1 => Some(Level::WARN),
        2 => Some(Level::INFO),
        3 => Some(Level::DEBUG),
        _ => Some(Level::TRACE),
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
            .env("BORABOND_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_counts() {
        let matches = with_args(Command::new("t")).get_matches_from(["t", "-vvv"]);
        assert_eq!(matches.get_one::<u8>(ARG_VERBOSITY).copied(), Some(3));
    }

    #[test]
    fn test_level_names() {
        let parse = |raw: &str| {
            Command::new("t")
                .arg(Arg::new("level").value_parser(validator_log_level()))
                .try_get_matches_from(["t", raw])
                .map(|m| m.get_one::<u8>("level").copied())
        };
        assert_eq!(parse("DEBUG").ok(), Some(Some(3)));
        assert_eq!(parse("4").ok(), Some(Some(4)));
        assert!(parse("9").is_err());
        assert!(parse("loud").is_err());
    }

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0), None);
        assert_eq!(level_for(1), Some(Level::WARN));
        assert_eq!(level_for(3), Some(Level::DEBUG));
        assert_eq!(level_for(9), Some(Level::TRACE));
    }
}
