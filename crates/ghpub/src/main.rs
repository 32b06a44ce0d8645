#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
//! Command-line interface for publishing a directory to a gh-pages branch
//! via the libghpub crate.

use std::{
    env,
    io::{self, IsTerminal, Write},
    path::PathBuf,
    process,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use ghpub_term::{Output, Quiet, Terminal};
use libghpub::{DeployError, DeployOptions, Deployer};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("color_mode")
        .args(["color", "no_color"])
))]
/// Top-level CLI options for ghpub.
struct Cli {
    /// Directory whose contents are published (defaults to the current directory)
    #[arg(value_name = "DIR")]
    dir: Option<String>,

    /// Override the cache directory used as the scratch repository
    #[arg(long, value_name = "DIR")]
    cache: Option<String>,

    /// Commit message for the published snapshot
    #[arg(long, short = 'm', value_name = "MSG")]
    message: Option<String>,

    /// Source working tree to validate and read the remote from
    #[arg(long, value_name = "DIR")]
    cwd: Option<String>,

    /// Skip the uncommitted-changes check
    #[arg(long)]
    force: bool,

    /// Enable colored output
    #[arg(long)]
    color: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    no_color: bool,

    /// Suppress progress output
    #[arg(long)]
    quiet: bool,
}

/// Expand a leading `~` in a filesystem path using the `HOME` environment variable.
fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~")
        && let Ok(home) = env::var("HOME")
    {
        return PathBuf::from(path.replacen("~", &home, 1));
    }
    PathBuf::from(path)
}

/// CLI entrypoint.
fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine color output preference early for error handling
    let color = if cli.color {
        true
    } else if cli.no_color {
        false
    } else {
        // Auto-detect based on terminal
        io::stdout().is_terminal()
    };

    // Create output handler for progress and potential error messages
    let output: Arc<dyn Output> = if cli.quiet {
        Arc::new(Quiet)
    } else {
        Arc::new(Terminal::new(color))
    };

    // Handle errors with custom formatting
    if let Err(e) = run(cli, &output) {
        // Reset any existing colors only if color was enabled and stdout is a TTY
        if color && io::stdout().is_terminal() {
            print!("\x1b[0m");
            if let Err(flush_err) = io::stdout().flush() {
                eprintln!("Failed to flush stdout while resetting colors: {flush_err}");
            }
        }

        if let Err(display_err) = output.fail(&format!("{e:#}")) {
            eprintln!("Failed to report error via output handler: {display_err:#}");
        }
        if let Err(finish_err) = output.finish() {
            eprintln!("Failed to flush output handler: {finish_err:#}");
        }

        let exit_code = match e.downcast_ref::<DeployError>() {
            Some(err) => err.exit_code(),
            None => 1,
        };
        process::exit(exit_code);
    }
    Ok(())
}

/// Execute the deploy using the provided output implementation.
fn run(cli: Cli, output: &Arc<dyn Output>) -> Result<()> {
    let invocation_dir = env::current_dir().context("Failed to get current directory")?;

    let cwd = cli
        .cwd
        .as_deref()
        .map_or_else(|| invocation_dir.clone(), expand_tilde);
    let source = cli
        .dir
        .as_deref()
        .map_or_else(|| invocation_dir.clone(), expand_tilde);

    let mut options = DeployOptions::new(cwd);
    if let Some(cache) = cli.cache.as_deref() {
        options.cache = expand_tilde(cache);
    }
    if let Some(message) = cli.message {
        options.message = message;
    }
    options.force = cli.force;

    let deployer = Deployer::new(source, options, Arc::clone(output));
    match deployer.deploy()? {
        Some(url) => output.success(&format!("Published at {url}"))?,
        None => output.success("Pushed to gh-pages (remote is not a github.com repository)")?,
    }

    output.finish()?;
    Ok(())
}
