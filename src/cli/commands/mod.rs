mod edge;
pub mod logging;

pub use edge::{Options as EdgeOptions, LEGACY_API_URL_ENV};

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("borabond-admin")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("BORABOND_PORT")
                .value_parser(clap::value_parser!(u16)),
        );

    let command = edge::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{path::PathBuf, time::Duration};

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "borabond-admin");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some(env!("CARGO_PKG_DESCRIPTION").to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars_unset(
            [
                "BORABOND_PORT",
                "BORABOND_API_URL",
                "BORABOND_ASSETS_DIR",
                "BORABOND_EDGE_REVALIDATE",
                "BORABOND_REVALIDATE_TIMEOUT_SECONDS",
                LEGACY_API_URL_ENV,
            ],
            || {
                let matches = new().get_matches_from(vec!["borabond-admin"]);
                assert_eq!(matches.get_one::<u16>("port").copied(), Some(8080));

                let options = EdgeOptions::parse(&matches);
                assert_eq!(options.assets_dir, PathBuf::from("apps/web/dist"));
                assert_eq!(options.api_url, "http://localhost:9000");
                assert!(!options.edge_revalidate);
                assert_eq!(options.revalidate_timeout, Duration::from_secs(5));
            },
        );
    }

    #[test]
    fn test_check_args() {
        let matches = new().get_matches_from(vec![
            "borabond-admin",
            "--port",
            "3000",
            "--assets-dir",
            "/srv/borabond/dist",
            "--api-url",
            "https://api.borabond.com",
            "--edge-revalidate",
            "--revalidate-timeout-seconds",
            "2",
        ]);
        assert_eq!(matches.get_one::<u16>("port").copied(), Some(3000));

        let options = EdgeOptions::parse(&matches);
        assert_eq!(options.assets_dir, PathBuf::from("/srv/borabond/dist"));
        assert_eq!(options.api_url, "https://api.borabond.com");
        assert!(options.edge_revalidate);
        assert_eq!(options.revalidate_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("BORABOND_PORT", Some("443")),
                ("BORABOND_API_URL", Some("https://api.borabond.com")),
                ("BORABOND_EDGE_REVALIDATE", Some("true")),
                (LEGACY_API_URL_ENV, Some("http://ignored:9000")),
            ],
            || {
                let matches = new().get_matches_from(vec!["borabond-admin"]);
                assert_eq!(matches.get_one::<u16>("port").copied(), Some(443));

                let options = EdgeOptions::parse(&matches);
                assert_eq!(options.api_url, "https://api.borabond.com");
                assert!(options.edge_revalidate);
            },
        );
    }

    #[test]
    fn test_legacy_api_url_env_is_a_fallback() {
        temp_env::with_vars(
            [
                ("BORABOND_API_URL", None),
                (LEGACY_API_URL_ENV, Some("http://10.0.0.5:9000")),
            ],
            || {
                let matches = new().get_matches_from(vec!["borabond-admin"]);
                let options = EdgeOptions::parse(&matches);
                assert_eq!(options.api_url, "http://10.0.0.5:9000");
            },
        );
    }

    #[test]
    fn test_rejects_out_of_range_timeout() {
        let result = new().try_get_matches_from(vec![
            "borabond-admin",
            "--revalidate-timeout-seconds",
            "0",
        ]);
        assert!(result.is_err());
    }
}
