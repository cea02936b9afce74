pub fn git_commit_hash() -> &'static str {
    match option_env!("BORABOND_WEB_GIT_SHA") {
        Some(value) if !value.is_empty() => value,
        _ => "unknown",
    }
}

/// First seven characters of the commit, for the sidebar footer.
pub fn short_commit() -> &'static str {
    let hash = git_commit_hash();
    hash.get(..7).unwrap_or(hash)
}
