//! # BoraBond Admin (edge server)
//!
//! Serves the compiled admin dashboard bundle and gates every `/dashboard`
//! page on a shallow session check before anything is rendered.
//!
//! ## Session Gate
//!
//! Requests for protected pages must carry both the `adminToken` and the
//! `adminUser` cookies. The token only has to *look* like a JWT and the user
//! cookie has to decode to a complete identity; nothing is verified
//! cryptographically. Failing requests get a `307` to
//! `/login?redirect=<path>`, passing ones are forwarded with `x-user-id`,
//! `x-user-email` and `x-user-role` headers.
//!
//! The backend stays the authority: with `--edge-revalidate` the gate also
//! asks `GET /api/admin/validate-token` before letting a request through.
//!
//! Static assets, `/api/*` and the public pages are never inspected.

pub mod cli;
pub mod edge;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(GIT_COMMIT_HASH.len() >= 7);
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
