use crate::cli::{
    actions::{serve::Args, Action},
    commands::EdgeOptions,
};
use anyhow::{Context, Result};

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches
        .get_one::<u16>("port")
        .copied()
        .context("missing required argument: --port")?;

    let options = EdgeOptions::parse(matches);

    let api_url = admin_session::api::normalize_base_url(&options.api_url)
        .with_context(|| format!("invalid --api-url: {}", options.api_url))?;

    Ok(Action::Serve(Args {
        port,
        assets_dir: options.assets_dir,
        api_url,
        edge_revalidate: options.edge_revalidate,
        revalidate_timeout: options.revalidate_timeout,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn test_handler_builds_serve_action() {
        temp_env::with_vars_unset(["BORABOND_API_URL", commands::LEGACY_API_URL_ENV], || {
            let matches = commands::new().get_matches_from(vec![
                "borabond-admin",
                "--port",
                "9090",
                "--api-url",
                "https://api.borabond.com/",
            ]);
            let Action::Serve(args) = handler(&matches).unwrap();
            assert_eq!(args.port, 9090);
            assert_eq!(args.api_url, "https://api.borabond.com");
            assert!(!args.edge_revalidate);
        });
    }

    #[test]
    fn test_handler_rejects_bad_api_url() {
        let matches = commands::new().get_matches_from(vec![
            "borabond-admin",
            "--api-url",
            "localhost:9000",
        ]);
        let err = handler(&matches).unwrap_err();
        assert!(err.to_string().contains("invalid --api-url"));
    }
}
