use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use ghpub_term::Output;

use crate::{
    copy,
    error::{DeployError, Result, Stage},
    git,
    pages,
};

/// Branch that hosts the published output.
pub const GH_PAGES_BRANCH: &str = "gh-pages";

/// Name of the default cache directory, created under the source working tree.
pub const DEFAULT_CACHE_DIR: &str = ".gh-pages-cache";

/// Default commit message for published snapshots.
pub const DEFAULT_MESSAGE: &str = ":package: Update gh-pages";

/// Number of user-visible progress steps in one deploy.
const STEPS: usize = 5;

/// Configuration for one deploy invocation.
///
/// Constructed once by merging caller overrides onto the defaults derived
/// from the source working tree, and immutable thereafter.
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Source working tree: validated for uncommitted changes and queried
    /// for its origin remote. Always explicit; there is no process-wide
    /// default.
    pub cwd: PathBuf,
    /// Disposable working directory used as the scratch repository for the
    /// publish. At most one deploy may use a given cache path at a time;
    /// concurrent deploys must be given distinct cache paths.
    pub cache: PathBuf,
    /// Commit message for the published snapshot.
    pub message: String,
    /// Skip the uncommitted-changes check.
    pub force: bool,
}

impl DeployOptions {
    /// Create options for the given source working tree, with the cache
    /// directory, commit message, and force mode at their defaults.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        let cache = cwd.join(DEFAULT_CACHE_DIR);
        Self {
            cwd,
            cache,
            message: DEFAULT_MESSAGE.to_string(),
            force: false,
        }
    }
}

/// Convert a git helper failure into a stage-tagged deploy error.
fn git_err(stage: Stage) -> impl FnOnce(git::GitError) -> DeployError {
    move |e| DeployError::Git {
        stage,
        message: e.to_string(),
    }
}

/// Remove a directory tree, treating an already-absent path as success.
fn remove_tree(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Orchestrates the publish sequence for one directory.
pub struct Deployer {
    /// Directory whose contents are published.
    source: PathBuf,
    /// Deploy configuration.
    options: DeployOptions,
    /// Channel for progress reporting.
    output: Arc<dyn Output>,
}

impl Deployer {
    /// Create a deployer that publishes `source` using `options`, reporting
    /// progress through `output`.
    pub fn new(source: impl Into<PathBuf>, options: DeployOptions, output: Arc<dyn Output>) -> Self {
        Self {
            source: source.into(),
            options,
            output,
        }
    }

    /// Run the publish sequence.
    ///
    /// Verifies the source tree is clean (unless forced), reads its origin
    /// remote, rebuilds the cache directory as a fresh repository pointed at
    /// that remote, switches to the gh-pages branch (creating it when
    /// absent), copies the source contents in (excluding the cache itself
    /// and hidden files), commits, and force-pushes. The cache directory is
    /// removed on every exit path; a stage failure takes precedence over a
    /// cleanup failure when both occur.
    ///
    /// Resolves with the published-site URL when the remote matches the
    /// recognized github.com shape, `Ok(None)` otherwise.
    pub fn deploy(&self) -> Result<Option<String>> {
        self.ensure_clean_tree()?;
        // Fail fast on a missing remote before the cache is touched.
        self.read_remote()?;

        let published = self.publish();
        let cleanup = self.remove_cache();

        let remote = published?;
        cleanup?;

        Ok(pages::pages_url(&remote))
    }

    /// Reject a dirty source tree unless force mode is on.
    fn ensure_clean_tree(&self) -> Result<()> {
        if self.options.force {
            return Ok(());
        }

        let dirty = git::has_uncommitted_changes(&self.options.cwd)
            .map_err(git_err(Stage::Precondition))?;
        if dirty {
            return Err(DeployError::UncommittedChanges {
                repo_dir: self.options.cwd.clone(),
            });
        }
        Ok(())
    }

    /// Read the origin URL of the source tree. A failing query reports the
    /// same way as a missing remote.
    fn read_remote(&self) -> Result<String> {
        match git::remote_origin_url(&self.options.cwd) {
            Ok(Some(url)) => Ok(url),
            Ok(None) | Err(_) => Err(DeployError::MissingRemote {
                repo_dir: self.options.cwd.clone(),
            }),
        }
    }

    /// Stages two through eight: everything that runs while the cache
    /// directory exists. Returns the remote URL the push went to.
    fn publish(&self) -> Result<String> {
        let cache = &self.options.cache;

        // Progress is informational; a broken pipe must not abort a deploy.
        self.output.step(1, STEPS, "Rebuilding cache folder...").ok();
        self.reset_cache()?;

        // Defensive re-read; this value is the one registered and reported.
        let remote = self.read_remote()?;

        self.output
            .step(2, STEPS, "Init git and gh-pages branch...")
            .ok();
        git::init(cache).map_err(git_err(Stage::InitRepo))?;
        git::add_remote_origin(cache, &remote).map_err(git_err(Stage::InitRepo))?;
        self.checkout_pages(cache)?;

        self.output.step(3, STEPS, "Copying site files...").ok();
        copy::copy_tree(&self.source, cache).map_err(|source| DeployError::Io {
            stage: Stage::Copy,
            source,
        })?;

        self.output.step(4, STEPS, "Adding files and commit...").ok();
        git::add_all(cache).map_err(git_err(Stage::Commit))?;
        // A content-less commit is not an error; everything else is.
        if let Err(e) = git::commit(cache, &self.options.message) {
            return Err(git_err(Stage::Commit)(e));
        }

        self.output
            .step(5, STEPS, "Pushing files - this may take a moment...")
            .ok();
        let spinner = self.output.spinner("Pushing to origin/gh-pages");
        match git::push_force(cache, GH_PAGES_BRANCH) {
            Ok(()) => spinner.finish_success("Pushed to origin/gh-pages"),
            Err(e) => {
                spinner.finish_fail("Push failed");
                return Err(git_err(Stage::Push)(e));
            }
        }

        Ok(remote)
    }

    /// Delete and recreate the cache directory.
    fn reset_cache(&self) -> Result<()> {
        let cache = &self.options.cache;
        remove_tree(cache).map_err(|source| DeployError::Io {
            stage: Stage::ResetCache,
            source,
        })?;
        fs::create_dir_all(cache).map_err(|source| DeployError::Io {
            stage: Stage::ResetCache,
            source,
        })?;
        Ok(())
    }

    /// Switch the cache repository to the gh-pages branch, creating it when
    /// the ref does not exist. Ref absence is the expected case on a fresh
    /// cache, not an error path.
    fn checkout_pages(&self, cache: &Path) -> Result<()> {
        if git::branch_exists(cache, GH_PAGES_BRANCH).map_err(git_err(Stage::Checkout))? {
            git::checkout(cache, GH_PAGES_BRANCH).map_err(git_err(Stage::Checkout))?;
        } else {
            git::checkout_new(cache, GH_PAGES_BRANCH).map_err(git_err(Stage::Checkout))?;
        }
        Ok(())
    }

    /// Remove the cache directory after the run, on both exit paths.
    fn remove_cache(&self) -> Result<()> {
        remove_tree(&self.options.cache).map_err(|source| DeployError::Cleanup {
            path: self.options.cache.clone(),
            source,
        })
    }
}
