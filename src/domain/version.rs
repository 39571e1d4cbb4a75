use crate::error::{ChefError, Result};
use std::fmt;

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Fixed starting point used when folding commits from scratch.
    pub const BASELINE: Version = Version::new(0, 1, 0);

    /// Create a new version
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Split a tag string into its three dotted components, `v` prefix removed.
    ///
    /// Components are not checked to be numeric.
    pub fn components(tag: &str) -> Result<[&str; 3]> {
        let trimmed = tag.trim();
        let clean_tag = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);

        let mut parts = clean_tag.split('.');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(major), Some(minor), Some(patch), None) => Ok([major, minor, patch]),
            _ => Err(ChefError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                tag
            ))),
        }
    }

    /// Parse version from a tag string (e.g., "v1.2.3" -> Version(1,2,3))
    pub fn parse(tag: &str) -> Result<Self> {
        let parts = Self::components(tag)?;

        let major = parts[0]
            .parse::<u32>()
            .map_err(|_| ChefError::version(format!("Invalid major version: {}", parts[0])))?;
        let minor = parts[1]
            .parse::<u32>()
            .map_err(|_| ChefError::version(format!("Invalid minor version: {}", parts[1])))?;
        let patch = parts[2]
            .parse::<u32>()
            .map_err(|_| ChefError::version(format!("Invalid patch version: {}", parts[2])))?;

        Ok(Version::new(major, minor, patch))
    }

    /// Bump version according to bump type
    ///
    /// Fails instead of wrapping when the bumped component is already `u32::MAX`.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let overflow =
            || ChefError::version(format!("{} cannot be bumped ({:?})", self, bump_type));

        let next = match bump_type {
            VersionBump::Major => {
                Version::new(self.major.checked_add(1).ok_or_else(overflow)?, 0, 0)
            }
            VersionBump::Minor => {
                Version::new(self.major, self.minor.checked_add(1).ok_or_else(overflow)?, 0)
            }
            VersionBump::Patch => Version::new(
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(overflow)?,
            ),
        };
        Ok(next)
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::BASELINE
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl std::str::FromStr for Version {
    type Err = ChefError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}
