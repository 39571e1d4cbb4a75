use super::version::VersionBump;

/// Bump markers found in a single `<short-hash> <subject>` history line.
///
/// The three flags are independent substring tests on the stem (the text
/// before the first colon), not a parsed conventional-commit grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitClass {
    /// Stem contains `!`
    pub major: bool,
    /// Stem contains `feat`
    pub minor: bool,
    /// Stem contains `fix`
    pub patch: bool,
}

impl CommitClass {
    /// Classify a one-line commit summary
    pub fn classify(commit_line: &str) -> Self {
        let stem = stem(commit_line);

        CommitClass {
            major: stem.contains('!'),
            minor: stem.contains("feat"),
            patch: stem.contains("fix"),
        }
    }

    /// The single bump this commit applies, breaking > feature > fix
    pub fn bump(&self) -> Option<VersionBump> {
        if self.major {
            Some(VersionBump::Major)
        } else if self.minor {
            Some(VersionBump::Minor)
        } else if self.patch {
            Some(VersionBump::Patch)
        } else {
            None
        }
    }
}

/// Text of the line before its first colon, or the whole line
pub fn stem(commit_line: &str) -> &str {
    commit_line
        .split_once(':')
        .map(|(stem, _)| stem)
        .unwrap_or(commit_line)
}
