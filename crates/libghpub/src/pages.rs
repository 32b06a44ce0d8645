use std::sync::LazyLock;

use regex::Regex;

/// Recognized hosting address shape: a github.com remote in either SSH
/// (`git@github.com:owner/repo.git`) or HTTPS
/// (`https://github.com/owner/repo.git`) form.
static GITHUB_REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)github\.com[:/]([0-9a-z_-]+)/([0-9a-z_-]+)\.git").expect("valid pattern")
});

/// Derive the published-site URL for a remote URL.
///
/// Returns `https://<owner>.github.io/<repository>/` when the remote matches
/// the recognized github.com shape, and `None` otherwise. A non-matching
/// remote is not an error: the deploy itself still happened, there is just
/// no URL to report.
pub fn pages_url(remote: &str) -> Option<String> {
    let caps = GITHUB_REMOTE.captures(remote)?;
    Some(format!("https://{}.github.io/{}/", &caps[1], &caps[2]))
}
