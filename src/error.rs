use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for commit-chef operations
#[derive(Error, Debug)]
pub enum ChefError {
    #[error("No file ending in '{suffix}' found in {}", .dir.display())]
    DescriptorNotFound { dir: PathBuf, suffix: String },

    #[error("`{command}` reported an error: {stderr}")]
    ExternalTool { command: String, stderr: String },

    #[error("Tag parsing error: {0}")]
    TagParse(String),

    #[error("Malformed project descriptor: {0}")]
    MalformedDocument(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in commit-chef
pub type Result<T> = std::result::Result<T, ChefError>;

impl ChefError {
    /// Create an external tool error from the command line and its stderr
    pub fn external_tool(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        ChefError::ExternalTool {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Create a tag parsing error with context
    pub fn tag_parse(msg: impl Into<String>) -> Self {
        ChefError::TagParse(msg.into())
    }

    /// Create a malformed document error with context
    pub fn malformed(msg: impl Into<String>) -> Self {
        ChefError::MalformedDocument(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ChefError::Version(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChefError::Config(msg.into())
    }
}
