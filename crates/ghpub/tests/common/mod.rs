use anyhow::{Context, Result, ensure};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Return the path to the compiled `ghpub` binary for integration-style tests.
pub fn ghpub_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ghpub"))
}

/// Run a git command inside `repo_path`, ensuring it succeeds.
pub fn git(repo_path: &Path, args: &[&str]) -> Result<Output> {
    let output = Command::new("git")
        .current_dir(repo_path)
        .args(args)
        .output()
        .with_context(|| format!("failed to run git {}", args.join(" ")))?;

    ensure!(
        output.status.success(),
        "git command failed: git {}\nstdout: {}\nstderr: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    Ok(output)
}

/// Initialise a repository at `repo_path` with a committed page.
pub fn init_repository(repo_path: &Path) -> Result<()> {
    if !repo_path.exists() {
        fs::create_dir_all(repo_path)?;
    }

    git(repo_path, &["init", "-b", "main"])?;
    git(repo_path, &["config", "user.email", "test@example.com"])?;
    git(repo_path, &["config", "user.name", "Test User"])?;

    fs::write(repo_path.join("index.html"), "<html>site</html>")?;
    git(repo_path, &["add", "index.html"])?;
    git(repo_path, &["commit", "-m", "Initial commit"])?;

    Ok(())
}

/// Create a temporary site repository wired to a bare origin it can push to.
pub fn create_site_with_origin() -> Result<(TempDir, PathBuf, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let repo_path = temp_dir.path().join("site");
    init_repository(&repo_path)?;

    let origin = temp_dir.path().join("origin.git");
    fs::create_dir_all(&origin)?;
    git(&origin, &["init", "--bare"])?;
    git(
        &repo_path,
        &["remote", "add", "origin", origin.to_str().unwrap()],
    )?;

    Ok((temp_dir, repo_path, origin))
}

/// Prepare a `Command` configured to run `ghpub` from inside `repo_path`.
///
/// The deploy commits inside a cache repository that has no per-repo git
/// identity, so one is provided through the environment.
pub fn ghpub_command(repo_path: &Path) -> Command {
    let mut cmd = Command::new(ghpub_binary());
    cmd.current_dir(repo_path);
    cmd.env("GIT_AUTHOR_NAME", "ghpub tests");
    cmd.env("GIT_AUTHOR_EMAIL", "tests@example.com");
    cmd.env("GIT_COMMITTER_NAME", "ghpub tests");
    cmd.env("GIT_COMMITTER_EMAIL", "tests@example.com");
    cmd
}

/// Run `ghpub` with the provided arguments, returning the command output.
pub fn run_ghpub(repo_path: &Path, args: &[&str]) -> Result<Output> {
    let mut cmd = ghpub_command(repo_path);
    cmd.args(args);
    cmd.output()
        .with_context(|| format!("failed to run ghpub {}", args.join(" ")))
}
