use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions met while preparing a release.
/// These are reported to the user but do not stop the release.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseWarning {
    /// A target file does not exist and was left out
    MissingTargetFile { path: PathBuf },
    /// HEAD is the tagged commit itself; the release contains no new commits
    NoNewCommits { version: String },
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::MissingTargetFile { path } => {
                write!(f, "{} does not exist, skipping", path.display())
            }
            ReleaseWarning::NoNewCommits { version } => {
                write!(f, "No new commits since {} (build number is 0)", version)
            }
        }
    }
}
