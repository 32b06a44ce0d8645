#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
//! Core library for publishing a directory to the `gh-pages` branch of a Git
//! remote.
//!
//! The crate exposes a small API surface: build a [`DeployOptions`], hand it
//! to a [`Deployer`] together with an output channel, and call
//! [`Deployer::deploy`]. The deploy runs a fixed sequence of git and
//! filesystem operations against a disposable cache directory and resolves
//! with the published-site URL when the remote is a recognized github.com
//! repository. The CLI binary in `crates/ghpub` builds on top of this
//! library.

/// Filtered recursive copy into the cache directory.
mod copy;
/// High-level orchestration of the publish sequence.
mod deploy;
/// Error and stage types shared across the crate.
mod error;
/// Helper routines for interacting with Git repositories.
mod git;
/// Published-site URL derivation from a remote URL.
mod pages;

pub use deploy::{DEFAULT_CACHE_DIR, DEFAULT_MESSAGE, DeployOptions, Deployer, GH_PAGES_BRANCH};
pub use error::{DeployError, Result, Stage};
pub use pages::pages_url;
