use clap::{builder::BoolishValueParser, Arg, ArgAction, ArgMatches, Command};
use std::{path::PathBuf, time::Duration};

pub const ARG_ASSETS_DIR: &str = "assets-dir";
pub const ARG_API_URL: &str = "api-url";
pub const ARG_EDGE_REVALIDATE: &str = "edge-revalidate";
pub const ARG_REVALIDATE_TIMEOUT: &str = "revalidate-timeout-seconds";

/// Name the web bundle also reads the API base URL from.
pub const LEGACY_API_URL_ENV: &str = "NEXT_PUBLIC_API_URL";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_ASSETS_DIR)
                .long(ARG_ASSETS_DIR)
                .help("Directory holding the compiled dashboard bundle (index.html, pkg/)")
                .env("BORABOND_ASSETS_DIR")
                .default_value("apps/web/dist")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Backend API base URL")
                .long_help(format!(
                    "Backend API base URL. `{LEGACY_API_URL_ENV}` is read when BORABOND_API_URL is unset."
                ))
                .env("BORABOND_API_URL")
                .default_value(admin_session::api::DEFAULT_API_URL),
        )
        .arg(
            Arg::new(ARG_EDGE_REVALIDATE)
                .long(ARG_EDGE_REVALIDATE)
                .help("Ask the backend to validate the session token before serving protected pages")
                .env("BORABOND_EDGE_REVALIDATE")
                .action(ArgAction::SetTrue)
                .value_parser(BoolishValueParser::new()),
        )
        .arg(
            Arg::new(ARG_REVALIDATE_TIMEOUT)
                .long(ARG_REVALIDATE_TIMEOUT)
                .help("Timeout for the revalidation request")
                .env("BORABOND_REVALIDATE_TIMEOUT_SECONDS")
                .default_value("5")
                .value_parser(clap::value_parser!(u64).range(1..=60)),
        )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub assets_dir: PathBuf,
    pub api_url: String,
    pub edge_revalidate: bool,
    pub revalidate_timeout: Duration,
}

impl Options {
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        let api_url = match matches.value_source(ARG_API_URL) {
            Some(clap::parser::ValueSource::DefaultValue) | None => {
                std::env::var(LEGACY_API_URL_ENV)
                    .ok()
                    .filter(|value| !value.trim().is_empty())
                    .or_else(|| matches.get_one::<String>(ARG_API_URL).cloned())
                    .unwrap_or_else(|| admin_session::api::DEFAULT_API_URL.to_string())
            }
            Some(_) => matches
                .get_one::<String>(ARG_API_URL)
                .cloned()
                .unwrap_or_else(|| admin_session::api::DEFAULT_API_URL.to_string()),
        };

        Self {
            assets_dir: matches
                .get_one::<PathBuf>(ARG_ASSETS_DIR)
                .cloned()
                .unwrap_or_else(|| PathBuf::from("apps/web/dist")),
            api_url,
            edge_revalidate: matches.get_flag(ARG_EDGE_REVALIDATE),
            revalidate_timeout: Duration::from_secs(
                matches
                    .get_one::<u64>(ARG_REVALIDATE_TIMEOUT)
                    .copied()
                    .unwrap_or(5),
            ),
        }
    }
}
