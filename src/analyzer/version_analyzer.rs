use crate::domain::{CommitClass, Version, VersionBump};
use crate::error::Result;

/// Fold commit lines, oldest first, into a new version starting at `seed`.
///
/// Each commit applies at most one bump (breaking > feature > fix). The fold
/// is order-dependent: a later major bump zeroes minor and patch increments
/// made by earlier commits. Fails if a component would overflow.
pub fn bump<S: AsRef<str>>(commits: &[S], seed: Version) -> Result<Version> {
    commits.iter().try_fold(seed, |version, commit| {
        match CommitClass::classify(commit.as_ref()).bump() {
            Some(bump_type) => version.bump(bump_type),
            None => Ok(version),
        }
    })
}

/// Counts of commits per applied bump kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BumpSummary {
    pub breaking: usize,
    pub features: usize,
    pub fixes: usize,
    pub other: usize,
}

/// Analyzes commit history to determine the next version
pub struct VersionAnalyzer {
    seed: Version,
}

impl VersionAnalyzer {
    /// Create an analyzer folding from `seed`
    pub fn new(seed: Version) -> Self {
        VersionAnalyzer { seed }
    }

    pub fn seed(&self) -> Version {
        self.seed
    }

    /// Fold oldest-first commit lines into the next version
    pub fn next_version<S: AsRef<str>>(&self, commits: &[S]) -> Result<Version> {
        bump(commits, self.seed)
    }

    /// Count which bump each commit contributes
    pub fn summarize<S: AsRef<str>>(&self, commits: &[S]) -> BumpSummary {
        let mut summary = BumpSummary::default();

        for commit in commits {
            match CommitClass::classify(commit.as_ref()).bump() {
                Some(VersionBump::Major) => summary.breaking += 1,
                Some(VersionBump::Minor) => summary.features += 1,
                Some(VersionBump::Patch) => summary.fixes += 1,
                None => summary.other += 1,
            }
        }

        summary
    }
}

impl Default for VersionAnalyzer {
    fn default() -> Self {
        Self::new(Version::BASELINE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_fix() {
        assert_eq!(bump(&["abc123 fix: x"], Version::BASELINE).unwrap(), Version::new(0, 1, 1));
    }

    #[test]
    fn test_feature_then_fix() {
        let commits = ["abc feat: x", "def fix: y"];
        assert_eq!(bump(&commits, Version::BASELINE).unwrap(), Version::new(0, 2, 1));
    }

    #[test]
    fn test_fix_then_feature() {
        let commits = ["def fix: y", "abc feat: x"];
        assert_eq!(bump(&commits, Version::BASELINE).unwrap(), Version::new(0, 2, 0));
    }

    #[test]
    fn test_breaking_feature_is_major_only() {
        assert_eq!(bump(&["abc feat!: x"], Version::BASELINE).unwrap(), Version::new(1, 0, 0));
    }

    #[test]
    fn test_breaking_erases_earlier_feature() {
        let commits = ["a feat: x", "b fix: y", "c refactor!: z"];
        assert_eq!(bump(&commits, Version::BASELINE).unwrap(), Version::new(1, 0, 0));
    }

    #[test]
    fn test_unmarked_commits_leave_seed() {
        let commits = ["a docs: readme", "b chore: deps"];
        assert_eq!(bump(&commits, Version::new(3, 4, 5)).unwrap(), Version::new(3, 4, 5));
    }

    #[test]
    fn test_empty_history_returns_seed() {
        let commits: [&str; 0] = [];
        assert_eq!(bump(&commits, Version::BASELINE).unwrap(), Version::BASELINE);
    }

    #[test]
    fn test_deterministic() {
        let commits = vec![
            "a fix: one".to_string(),
            "b feat: two".to_string(),
            "c fix: three".to_string(),
        ];
        let seed = Version::new(1, 0, 0);
        assert_eq!(bump(&commits, seed).unwrap(), bump(&commits, seed).unwrap());
    }

    #[test]
    fn test_breaking_always_zeroes_minor_and_patch() {
        for seed in [Version::new(0, 7, 9), Version::new(2, 0, 3), Version::new(5, 5, 0)] {
            let result = bump(&["x fix: a", "y feat: b", "z fix!: c"], seed).unwrap();
            assert_eq!(result, Version::new(seed.major + 1, 0, 0));
        }
    }

    #[test]
    fn test_major_never_decreases() {
        let commits = ["a feat!: x", "b fix: y", "c feat: z", "d chore!: w", "e fix: v"];
        let mut previous = Version::BASELINE;
        for end in 1..=commits.len() {
            let current = bump(&commits[..end], Version::BASELINE).unwrap();
            assert!(current.major >= previous.major);
            if current.major > previous.major {
                assert_eq!((current.minor, current.patch), (0, 0));
            }
            previous = current;
        }
        assert_eq!(previous, Version::new(2, 0, 1));
    }

    #[test]
    fn test_analyzer_uses_seed() {
        let analyzer = VersionAnalyzer::new(Version::new(2, 3, 4));
        assert_eq!(analyzer.next_version(&["a fix: x"]).unwrap(), Version::new(2, 3, 5));
        assert_eq!(VersionAnalyzer::default().seed(), Version::BASELINE);
    }

    #[test]
    fn test_overflowing_major_is_an_error() {
        let seed = Version::new(u32::MAX, 0, 0);
        assert!(matches!(
            bump(&["abc feat!: x"], seed),
            Err(crate::ChefError::Version(_))
        ));
        assert_eq!(bump(&["abc fix: x"], seed).unwrap(), Version::new(u32::MAX, 0, 1));
    }

    #[test]
    fn test_summarize_counts_applied_bumps() {
        let analyzer = VersionAnalyzer::default();
        let summary = analyzer.summarize(&[
            "a feat!: x",
            "b feat: y",
            "c fix: z",
            "d fix: w",
            "e docs: v",
        ]);
        assert_eq!(
            summary,
            BumpSummary {
                breaking: 1,
                features: 1,
                fixes: 2,
                other: 1,
            }
        );
    }
}
