use std::{env, process::Command};

const SHA_ENV: &str = "BORABOND_WEB_GIT_SHA";

/// CI images often build without `.git`; they pass the commit in explicitly.
fn git_sha() -> Option<String> {
    if let Some(sha) = env::var(SHA_ENV).ok().filter(|sha| !sha.trim().is_empty()) {
        return Some(sha.trim().to_string());
    }
    let output = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let sha = String::from_utf8(output.stdout).ok()?;
    let sha = sha.trim();
    (!sha.is_empty()).then(|| sha.to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
    println!("cargo:rerun-if-env-changed={SHA_ENV}");

    let sha = git_sha().unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env={SHA_ENV}={sha}");
}
