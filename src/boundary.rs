use std::fmt;
use std::path::PathBuf;

use crate::domain::Version;

/// Non-fatal conditions met while preparing a version bump.
/// These are reported to the user but do not stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The repository has no tags; all history is folded from the initial version
    NoTags { initial_version: Version },
    /// The last tag's version string is not X.Y.Z
    UnparsableTag { tag: String, reason: String },
    /// More than one file matched the descriptor suffix
    MultipleDescriptors { used: PathBuf, ignored: Vec<PathBuf> },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoTags { initial_version } => {
                write!(
                    f,
                    "No tags found; folding all commits from {}",
                    initial_version
                )
            }
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Cannot parse tag '{}': {}", tag, reason)
            }
            BoundaryWarning::MultipleDescriptors { used, ignored } => {
                let ignored: Vec<String> =
                    ignored.iter().map(|p| p.display().to_string()).collect();
                write!(
                    f,
                    "Using {} and ignoring {}",
                    used.display(),
                    ignored.join(", ")
                )
            }
        }
    }
}
