//! Main workflow orchestration logic
//!
//! Sequences descriptor discovery, tag and commit queries, the version fold
//! and the descriptor rewrite. Every step returns a typed error; collapsing
//! them into a single user-facing message is left to the binary.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::analyzer::VersionAnalyzer;
use crate::boundary::BoundaryWarning;
use crate::config::{Config, SeedStrategy, TagSelection, VersioningConfig};
use crate::descriptor::{self, FieldUpdate};
use crate::domain::{TagBlock, Version};
use crate::error::Result;
use crate::git::Repository;

/// Arguments for the bump workflow
///
/// Mirrors the CLI Args in a form that does not depend on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpWorkflowArgs {
    /// Directory holding the project descriptor and the git checkout
    pub dir: PathBuf,

    /// Compute the new version without writing the descriptor
    pub dry_run: bool,
}

impl Default for BumpWorkflowArgs {
    fn default() -> Self {
        BumpWorkflowArgs {
            dir: PathBuf::from("."),
            dry_run: false,
        }
    }
}

/// How a successful run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Nothing was committed since the last tag; the descriptor is untouched
    NoNewCommits,
    /// Commits exist but none of them bumps the version
    Unchanged { version: Version },
    /// The descriptor was rewritten (or would be, in a dry run)
    Updated {
        descriptor: PathBuf,
        previous: Version,
        version: Version,
        updates: Vec<FieldUpdate>,
        written: bool,
    },
}

/// Result of a successful bump workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub outcome: RunOutcome,
    pub warnings: Vec<BoundaryWarning>,
}

impl WorkflowResult {
    /// Warnings worth showing the user; a run with no new commits stays silent
    pub fn reported_warnings(&self) -> &[BoundaryWarning] {
        match self.outcome {
            RunOutcome::NoNewCommits => &[],
            _ => &self.warnings,
        }
    }
}

/// Pick the tag that marks the last release.
pub fn select_tag(tags: &[String], selection: TagSelection) -> Option<&str> {
    let last_listed = tags.last().map(String::as_str);

    match selection {
        TagSelection::LastListed => last_listed,
        TagSelection::HighestSemver => tags
            .iter()
            .filter_map(|tag| {
                semver::Version::parse(tag.trim_start_matches(['v', 'V']))
                    .ok()
                    .map(|version| (version, tag.as_str()))
            })
            .max_by(|a, b| a.0.cmp(&b.0))
            .map(|(_, tag)| tag)
            .or(last_listed),
    }
}

/// Version the fold starts from, given the last tag's header block.
///
/// Both strategies require the tag version to have three dotted components.
/// Only `last-tag` requires them to be numeric.
fn seed_for_tag(
    tag: &str,
    block: &TagBlock,
    versioning: &VersioningConfig,
    warnings: &mut Vec<BoundaryWarning>,
) -> Result<Version> {
    Version::components(&block.version)?;
    let parsed = Version::parse(&block.version);

    match versioning.seed {
        SeedStrategy::LastTag => parsed,
        SeedStrategy::Baseline => {
            if let Err(e) = parsed {
                warnings.push(BoundaryWarning::UnparsableTag {
                    tag: tag.to_string(),
                    reason: e.to_string(),
                });
            }
            versioning.baseline_version()
        }
    }
}

/// Main bump workflow
///
/// 1. Locate the descriptor in `args.dir`
/// 2. Fetch and list tags
/// 3. Parse the last tag's header block
/// 4. Collect commits since the tag date, oldest first
/// 5. Seed from the tag (or the initial version) and fold the commits
/// 6. Rewrite the descriptor if the version moved
pub fn run_bump_workflow<R: Repository>(
    repo: &R,
    args: &BumpWorkflowArgs,
    config: &Config,
) -> Result<WorkflowResult> {
    let mut warnings = Vec::new();

    let located = descriptor::locate(&args.dir, &config.descriptor.suffix)?;
    if !located.ignored.is_empty() {
        warnings.push(BoundaryWarning::MultipleDescriptors {
            used: located.path.clone(),
            ignored: located.ignored.clone(),
        });
    }

    if config.git.fetch_tags {
        repo.fetch_all_tags()?;
    }
    let tags = repo.list_tags()?;
    debug!(count = tags.len(), "listed tags");

    let last_tag = match select_tag(&tags, config.git.tag_selection) {
        Some(tag) => {
            let block = TagBlock::parse(&repo.show_tag(tag)?)?;
            info!(tag, version = %block.version, date = %block.date, "last release tag");
            Some((tag, block))
        }
        None => None,
    };

    let since = last_tag.as_ref().map(|(_, block)| block.date.as_str());
    let mut commits = repo.commits_since(since)?;
    if commits.is_empty() {
        info!("no commits since the last tag");
        return Ok(WorkflowResult {
            outcome: RunOutcome::NoNewCommits,
            warnings,
        });
    }
    commits.reverse();

    let seed = match &last_tag {
        Some((tag, block)) => seed_for_tag(tag, block, &config.versioning, &mut warnings)?,
        None => {
            let initial_version = config.versioning.initial()?;
            warnings.push(BoundaryWarning::NoTags { initial_version });
            initial_version
        }
    };

    let analyzer = VersionAnalyzer::new(seed);
    let summary = analyzer.summarize(&commits);
    let version = analyzer.next_version(&commits)?;
    debug!(?summary, %seed, %version, "folded commit history");

    if version == seed {
        return Ok(WorkflowResult {
            outcome: RunOutcome::Unchanged { version },
            warnings,
        });
    }

    let text = fs::read_to_string(&located.path)?;
    let (rewritten, updates) = descriptor::update_version_fields(&text, version)?;

    if !args.dry_run {
        descriptor::persist(&rewritten, &located.path)?;
    }

    Ok(WorkflowResult {
        outcome: RunOutcome::Updated {
            descriptor: located.path,
            previous: seed,
            version,
            updates,
            written: !args.dry_run,
        },
        warnings,
    })
}
