use std::{
    io::{self, Write},
    result::Result as StdResult,
    time::Duration,
};

use indicatif::ProgressBar;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use thiserror::Error;

/// Interval between spinner redraws.
const TICK: Duration = Duration::from_millis(80);

/// Errors produced by [`Output`] implementations when writing to the terminal.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Underlying I/O error while writing to the terminal.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Convenience alias for output-related fallible operations.
pub type Result<T> = StdResult<T, OutputError>;

/// Abstraction over how user-facing messages and progress are produced.
///
/// Implementations can render to a terminal, suppress output, or emit to
/// other formats (e.g. files or JSON) in the future.
pub trait Output: Send + Sync {
    /// Print an informational message.
    fn message(&self, msg: &str) -> Result<()>;
    /// Print a success message.
    fn success(&self, msg: &str) -> Result<()>;
    /// Print a warning message.
    fn warn(&self, msg: &str) -> Result<()>;
    /// Print an error/failure message.
    fn fail(&self, msg: &str) -> Result<()>;
    /// Report an ordered progress step, rendered as `[index/total] msg`.
    fn step(&self, index: usize, total: usize, msg: &str) -> Result<()>;
    /// Start a spinner for a long-running operation.
    fn spinner(&self, msg: &str) -> Spinner;
    /// Flush any buffered output.
    fn finish(&self) -> Result<()>;
}

/// Handle for an in-progress spinner started via [`Output::spinner`].
pub struct Spinner {
    /// Underlying indicatif progress bar (hidden for quiet backends).
    bar: ProgressBar,
}

impl Spinner {
    /// Create a ticking spinner with the given message.
    fn new(msg: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_message(msg.to_string());
        bar.enable_steady_tick(TICK);
        Self { bar }
    }

    /// Create a spinner that renders nothing.
    fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Stop the spinner, replacing it with a success message.
    pub fn finish_success(&self, msg: &str) {
        self.bar.finish_with_message(format!("✓ {msg}"));
    }

    /// Stop the spinner, replacing it with a failure message.
    pub fn finish_fail(&self, msg: &str) {
        self.bar.finish_with_message(format!("✗ {msg}"));
    }
}

/// Output implementation that suppresses all messages and progress. Useful
/// for non-interactive or test environments.
pub struct Quiet;

impl Output for Quiet {
    fn message(&self, _msg: &str) -> Result<()> {
        Ok(())
    }

    fn success(&self, _msg: &str) -> Result<()> {
        Ok(())
    }

    fn warn(&self, _msg: &str) -> Result<()> {
        Ok(())
    }

    fn fail(&self, _msg: &str) -> Result<()> {
        Ok(())
    }

    fn step(&self, _index: usize, _total: usize, _msg: &str) -> Result<()> {
        Ok(())
    }

    fn spinner(&self, _msg: &str) -> Spinner {
        Spinner::hidden()
    }

    fn finish(&self) -> Result<()> {
        Ok(())
    }
}

/// Color-capable terminal renderer for user messages and progress.
pub struct Terminal {
    /// Whether to emit ANSI color sequences when writing to stdout.
    color_choice: ColorChoice,
}

impl Terminal {
    /// Create a new terminal output.
    ///
    /// - `color`: when `true`, always render colored output; when `false`,
    ///   disable ANSI colors.
    pub fn new(color: bool) -> Self {
        let color_choice = if color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        Self { color_choice }
    }

    /// Write `msg` to stdout using `color`.
    fn write_colored(&self, msg: &str, color: Color) -> Result<()> {
        let mut stdout = StandardStream::stdout(self.color_choice);
        stdout.set_color(ColorSpec::new().set_fg(Some(color)))?;
        writeln!(stdout, "{msg}")?;
        stdout.reset()?;
        stdout.flush()?;
        Ok(())
    }
}

impl Output for Terminal {
    fn message(&self, msg: &str) -> Result<()> {
        self.write_colored(msg, Color::Cyan)
    }

    fn success(&self, msg: &str) -> Result<()> {
        self.write_colored(msg, Color::Green)
    }

    fn warn(&self, msg: &str) -> Result<()> {
        self.write_colored(msg, Color::Rgb(255, 165, 0)) // Orange
    }

    fn fail(&self, msg: &str) -> Result<()> {
        self.write_colored(msg, Color::Red)
    }

    fn step(&self, index: usize, total: usize, msg: &str) -> Result<()> {
        let mut stdout = StandardStream::stdout(self.color_choice);
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(stdout, "[{index}/{total}] ")?;
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        writeln!(stdout, "{msg}")?;
        stdout.reset()?;
        stdout.flush()?;
        Ok(())
    }

    fn spinner(&self, msg: &str) -> Spinner {
        Spinner::new(msg)
    }

    fn finish(&self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_swallows_everything() {
        let quiet = Quiet;
        quiet.message("msg").expect("quiet message succeeds");
        quiet.success("msg").expect("quiet success succeeds");
        quiet.warn("msg").expect("quiet warn succeeds");
        quiet.fail("msg").expect("quiet fail succeeds");
        quiet.step(1, 5, "msg").expect("quiet step succeeds");
        quiet.finish().expect("quiet finish succeeds");
    }

    #[test]
    fn test_quiet_spinner_is_hidden() {
        let quiet = Quiet;
        let spinner = quiet.spinner("working");
        assert!(spinner.bar.is_hidden());
        spinner.finish_success("done");
    }

    #[test]
    fn test_terminal_step_renders_without_color() {
        let terminal = Terminal::new(false);
        terminal
            .step(2, 5, "Init git and gh-pages branch...")
            .expect("step renders");
    }

    #[test]
    fn test_spinner_finish_variants() {
        let spinner = Spinner::hidden();
        spinner.finish_success("pushed");

        let spinner = Spinner::hidden();
        spinner.finish_fail("push failed");
    }
}
