//! Commit analysis for version bumping

pub mod version_analyzer;

pub use version_analyzer::{bump, BumpSummary, VersionAnalyzer};
