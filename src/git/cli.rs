use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{ChefError, Result};
use crate::git::{non_blank_lines, Repository};

/// Runs the `git` executable inside a fixed working directory
#[derive(Debug, Clone)]
pub struct GitCli {
    dir: PathBuf,
    program: String,
}

impl GitCli {
    /// Create a runner for the repository containing `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        GitCli {
            dir: dir.into(),
            program: "git".to_string(),
        }
    }

    /// Use a different executable in place of `git`
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Run a git command and return its standard output.
    ///
    /// Anything written to stderr is an error, whatever the exit status.
    fn run(&self, args: &[&str]) -> Result<String> {
        let command_line = format!("{} {}", self.program, args.join(" "));
        debug!(command = %command_line, dir = %self.dir.display(), "running git");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.dir)
            .output()?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!(command = %command_line, status = ?output.status.code(), "git wrote to stderr");
            return Err(ChefError::external_tool(command_line, stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Repository for GitCli {
    fn fetch_all_tags(&self) -> Result<()> {
        self.run(&["fetch", "--all", "--tags"])?;
        Ok(())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let stdout = self.run(&["tag", "-l"])?;
        Ok(non_blank_lines(&stdout))
    }

    fn show_tag(&self, tag: &str) -> Result<String> {
        self.run(&["show", "--no-color", tag])
    }

    fn commits_since(&self, date: Option<&str>) -> Result<Vec<String>> {
        let since = date.map(|date| format!("--since={}", date));
        let mut args = vec!["log", "--oneline", "--no-decorate", "--no-color"];
        if let Some(since) = since.as_deref() {
            args.push(since);
        }

        let stdout = self.run(&args)?;
        Ok(non_blank_lines(&stdout)
            .into_iter()
            .filter(|line| line != "None")
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_io_error() {
        let repo = GitCli::new(".").with_program("commit-chef-no-such-git-binary");
        let err = repo.list_tags().unwrap_err();
        assert!(matches!(err, ChefError::Io(_)));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let repo = GitCli::new("/definitely/not/a/real/dir/for/commit-chef");
        assert!(matches!(repo.list_tags(), Err(ChefError::Io(_))));
    }

    #[test]
    fn test_dir_is_kept() {
        let repo = GitCli::new("/tmp/project");
        assert_eq!(repo.dir(), Path::new("/tmp/project"));
    }
}
