//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the four git queries
//! commit-chef needs, so the workflow can run against the real `git` binary
//! or an in-memory mock in tests.
//!
//! - [cli::GitCli]: runs the `git` executable in an explicit directory
//! - [mock::MockRepository]: canned tags and history for testing
//!
//! ```rust,no_run
//! # use commit_chef::git::{GitCli, Repository};
//! # fn example() -> commit_chef::Result<()> {
//! let repo = GitCli::new("path/to/project");
//! repo.fetch_all_tags()?;
//! let tags = repo.list_tags()?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod mock;

pub use cli::GitCli;
pub use mock::MockRepository;

use crate::error::Result;

/// Version-control queries used by the bump workflow
///
/// ## Error Handling
///
/// Implementations treat any non-empty error output of the underlying tool
/// as fatal and return [crate::error::ChefError::ExternalTool]. There is no
/// partial-result handling and no retry.
pub trait Repository {
    /// Synchronize all tags from every remote
    fn fetch_all_tags(&self) -> Result<()>;

    /// List local tag names, one per entry, blank lines removed
    ///
    /// Ordering is whatever the underlying listing produces.
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Full descriptive text of a tag object (header lines, message, commit)
    fn show_tag(&self, tag: &str) -> Result<String>;

    /// One-line summaries (`<short-hash> <subject>`) of commits on the
    /// current branch at or after `date`, newest first
    ///
    /// `None` lists the whole history.
    fn commits_since(&self, date: Option<&str>) -> Result<Vec<String>>;
}

/// Split tool output into non-blank lines
pub(crate) fn non_blank_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
