use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::Version;
use crate::error::{ChefError, Result};

/// File name looked up in the project directory
pub const PROJECT_CONFIG_FILE: &str = "commitchef.toml";

/// File name looked up in the user configuration directory
pub const USER_CONFIG_FILE: &str = ".commitchef.toml";

/// Represents the complete configuration for commit-chef.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub descriptor: DescriptorConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub versioning: VersioningConfig,
}

fn default_descriptor_suffix() -> String {
    ".csproj".to_string()
}

fn default_true() -> bool {
    true
}

fn default_version() -> String {
    Version::BASELINE.to_string()
}

/// Which project file to rewrite
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DescriptorConfig {
    /// File name suffix identifying the descriptor
    #[serde(default = "default_descriptor_suffix")]
    pub suffix: String,
}

impl Default for DescriptorConfig {
    fn default() -> Self {
        DescriptorConfig {
            suffix: default_descriptor_suffix(),
        }
    }
}

/// How the last release tag is chosen
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TagSelection {
    /// Last entry of the tag listing, as git prints it
    #[default]
    LastListed,
    /// Highest semantic version among tags that parse as one
    HighestSemver,
}

/// Repository query behavior
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    /// Run `git fetch --all --tags` before listing tags
    #[serde(default = "default_true")]
    pub fetch_tags: bool,

    #[serde(default)]
    pub tag_selection: TagSelection,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            fetch_tags: true,
            tag_selection: TagSelection::default(),
        }
    }
}

/// Where the commit fold starts
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SeedStrategy {
    /// Always fold from the configured baseline
    #[default]
    Baseline,
    /// Fold from the version in the last tag
    LastTag,
}

/// Version arithmetic settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersioningConfig {
    #[serde(default)]
    pub seed: SeedStrategy,

    /// Seed used by the `baseline` strategy
    #[serde(default = "default_version")]
    pub baseline: String,

    /// Seed used when the repository has no tags
    #[serde(default = "default_version")]
    pub initial_version: String,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        VersioningConfig {
            seed: SeedStrategy::default(),
            baseline: default_version(),
            initial_version: default_version(),
        }
    }
}

impl VersioningConfig {
    pub fn baseline_version(&self) -> Result<Version> {
        Version::parse(&self.baseline)
            .map_err(|e| ChefError::config(format!("versioning.baseline: {}", e)))
    }

    pub fn initial(&self) -> Result<Version> {
        Version::parse(&self.initial_version)
            .map_err(|e| ChefError::config(format!("versioning.initial_version: {}", e)))
    }
}

impl Config {
    /// Check values that serde alone cannot validate
    pub fn validate(&self) -> Result<()> {
        if self.descriptor.suffix.is_empty() {
            return Err(ChefError::config("descriptor.suffix must not be empty"));
        }
        self.versioning.baseline_version()?;
        self.versioning.initial()?;
        Ok(())
    }

    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).map_err(|e| ChefError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `commitchef.toml` in the project directory
/// 3. `.commitchef.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>, project_dir: &Path) -> Result<Config> {
    let project_config = project_dir.join(PROJECT_CONFIG_FILE);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if project_config.exists() {
        fs::read_to_string(project_config)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(USER_CONFIG_FILE);
        if user_config.exists() {
            fs::read_to_string(user_config)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    Config::from_toml(&config_str)
}
