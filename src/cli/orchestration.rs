//! Main release workflow
//!
//! Keeps the release steps out of main.rs so they can run against any
//! [VersionControl] and [StructuredFileEditor], including test doubles.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::boundary::ReleaseWarning;
use crate::config::{Config, MissingFilePolicy};
use crate::domain::{Increment, Version};
use crate::editor::StructuredFileEditor;
use crate::error::{ReleaseError, Result};
use crate::git::VersionControl;

/// Arguments for the release workflow
///
/// Mirrors the CLI arguments without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseArgs {
    /// Component to increment
    pub increment: Increment,

    /// Files whose version field is updated
    pub files: Vec<PathBuf>,

    /// Preview mode - edit in memory only, no writes, commit or tag
    pub dry_run: bool,
}

/// Result of a successful release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOutcome {
    /// Version described from the repository before the increment
    pub previous: Version,

    /// Version after the increment
    pub version: Version,

    /// Tag that was (or would be) created
    pub tag: String,

    /// Commit message that was (or would be) used
    pub commit_message: String,

    /// Id of the release commit; `None` in dry-run
    pub commit: Option<String>,

    /// Absolute paths of files that were (or would be) rewritten
    pub updated_files: Vec<PathBuf>,

    /// Non-fatal conditions met on the way
    pub warnings: Vec<ReleaseWarning>,

    pub dry_run: bool,
}

/// Main release workflow
///
/// 1. Refuse to run on a dirty working tree
/// 2. Describe HEAD and parse the current version
/// 3. Apply the requested increment
/// 4. Set the version key in every target file
/// 5. Commit all changes
/// 6. Tag the release commit
///
/// Any failure aborts the remaining steps. Steps already completed are not
/// rolled back.
pub fn run_release<R, E>(
    repo: &R,
    editor: &E,
    config: &Config,
    args: &ReleaseArgs,
) -> Result<ReleaseOutcome>
where
    R: VersionControl + ?Sized,
    E: StructuredFileEditor + ?Sized,
{
    let status = repo.status()?;
    if !status.is_empty() {
        return Err(ReleaseError::DirtyWorkingTree(status));
    }

    let describe = repo.describe()?;
    debug!("git describe: {}", describe.trim());
    let previous = Version::parse_describe(&describe)?;
    info!("Retrieved version {} from git", previous);

    let mut warnings = Vec::new();
    if previous.build == 0 {
        let warning = ReleaseWarning::NoNewCommits {
            version: previous.long(),
        };
        warn!("{}", warning);
        warnings.push(warning);
    }

    let mut version = previous.clone();
    version.increment(args.increment)?;
    info!("New version {} ({} increment)", version, args.increment);

    let short = version.short();
    let targets = resolve_targets(&args.files, config.behavior.missing_file, &mut warnings)?;

    let mut updated_files = Vec::with_capacity(targets.len());
    for path in targets {
        let contents = editor.set_value(&path, &config.version_key, &short)?;
        if args.dry_run {
            info!("Would set {} = \"{}\" in {}", config.version_key, short, path.display());
        } else {
            fs::write(&path, contents)?;
            info!("Set {} = \"{}\" in {}", config.version_key, short, path.display());
        }
        updated_files.push(path);
    }

    let commit_message = config.commit_message(&short);
    let tag = config.tag_name(&short);

    let commit = if args.dry_run {
        info!("Would commit \"{}\" and tag {}", commit_message, tag);
        None
    } else {
        let commit = repo.commit_all(&commit_message)?;
        info!("Committed {} \"{}\"", short_id(&commit), commit_message);
        repo.create_tag(&tag)?;
        info!("Created tag {}", tag);
        Some(commit)
    };

    Ok(ReleaseOutcome {
        previous,
        version,
        tag,
        commit_message,
        commit,
        updated_files,
        warnings,
        dry_run: args.dry_run,
    })
}

/// Make every target absolute and apply the missing-file policy before any
/// file is touched.
fn resolve_targets(
    files: &[PathBuf],
    policy: MissingFilePolicy,
    warnings: &mut Vec<ReleaseWarning>,
) -> Result<Vec<PathBuf>> {
    let cwd = std::env::current_dir()?;
    let mut targets = Vec::with_capacity(files.len());

    for file in files {
        let path = absolute(&cwd, file);
        if path.exists() {
            targets.push(path);
            continue;
        }

        match policy {
            MissingFilePolicy::Skip => {
                let warning = ReleaseWarning::MissingTargetFile { path };
                warn!("{}", warning);
                warnings.push(warning);
            }
            MissingFilePolicy::Fail => return Err(ReleaseError::MissingTargetFile(path)),
        }
    }

    Ok(targets)
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

fn short_id(commit: &str) -> &str {
    commit.get(..7).unwrap_or(commit)
}
