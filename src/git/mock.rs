use std::cell::Cell;
use std::collections::HashMap;

use crate::error::{ChefError, Result};
use crate::git::Repository;

/// Mock repository for testing without actual git operations
#[derive(Debug, Default)]
pub struct MockRepository {
    tags: Vec<String>,
    tag_texts: HashMap<String, String>,
    commits: Vec<String>,
    since_filter: HashMap<String, Vec<String>>,
    fetch_error: Option<String>,
    fetch_calls: Cell<usize>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an annotated tag with the text `git show` would print for it
    pub fn add_tag(&mut self, name: impl Into<String>, show_text: impl Into<String>) {
        let name = name.into();
        self.tag_texts.insert(name.clone(), show_text.into());
        self.tags.push(name);
    }

    /// Add an annotated tag built from its header fields
    pub fn add_annotated_tag(&mut self, name: &str, tagger: &str, date: &str) {
        let text = format!(
            "tag {}\nTagger: {}\nDate:   {}\n\nRelease {}\n\ncommit 0000000\n",
            name, tagger, date, name
        );
        self.add_tag(name, text);
    }

    /// Append a commit line; commits are stored newest first, as git prints them
    pub fn add_commit(&mut self, line: impl Into<String>) {
        self.commits.insert(0, line.into());
    }

    /// Commits returned for `commits_since(Some(date))`; defaults to all commits
    pub fn set_commits_since(&mut self, date: impl Into<String>, newest_first: Vec<String>) {
        self.since_filter.insert(date.into(), newest_first);
    }

    /// Make `fetch_all_tags` fail with the given stderr text
    pub fn fail_fetch(&mut self, stderr: impl Into<String>) {
        self.fetch_error = Some(stderr.into());
    }

    /// How many times `fetch_all_tags` was called
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.get()
    }
}

impl Repository for MockRepository {
    fn fetch_all_tags(&self) -> Result<()> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        match &self.fetch_error {
            Some(stderr) => Err(ChefError::external_tool("git fetch --all --tags", stderr)),
            None => Ok(()),
        }
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.clone())
    }

    fn show_tag(&self, tag: &str) -> Result<String> {
        self.tag_texts.get(tag).cloned().ok_or_else(|| {
            ChefError::external_tool(
                format!("git show {}", tag),
                format!("fatal: ambiguous argument '{}': unknown revision", tag),
            )
        })
    }

    fn commits_since(&self, date: Option<&str>) -> Result<Vec<String>> {
        let commits = date
            .and_then(|date| self.since_filter.get(date))
            .unwrap_or(&self.commits);
        Ok(commits.clone())
    }
}
