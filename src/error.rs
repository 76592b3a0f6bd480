use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for release-bump operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Invalid describe output: {0}")]
    Format(String),

    #[error("Invalid {component} version component: '{value}'")]
    Parse {
        component: &'static str,
        value: String,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Cannot increment {component} version component past {value}")]
    Overflow {
        component: &'static str,
        value: u32,
    },

    #[error("Command `{command}` failed with exit code {}: {stderr}", exit_code_text(.code))]
    ExternalCommand {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Working directory has uncommitted changes:\n{}", .0.join("\n"))]
    DirtyWorkingTree(Vec<String>),

    #[error("Target file does not exist: {}", .0.display())]
    MissingTargetFile(PathBuf),

    #[error("Cannot edit {}: {reason}", .path.display())]
    Edit { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_code_text(code: &Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

/// Convenience type alias for Results in release-bump
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Exit status used when the working tree is dirty (`-1` as seen by the shell).
pub const DIRTY_TREE_EXIT_CODE: u8 = 255;

impl ReleaseError {
    /// Create a describe-format error with context
    pub fn format(msg: impl Into<String>) -> Self {
        ReleaseError::Format(msg.into())
    }

    /// Create an invalid-argument error with context
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        ReleaseError::InvalidArgument(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create an edit error for a structured file
    pub fn edit(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ReleaseError::Edit {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Process exit status the binary should terminate with for this error.
    ///
    /// A failing external command propagates its own status when it has one
    /// in the `1..=255` range; everything else maps to `1`.
    pub fn exit_code(&self) -> u8 {
        match self {
            ReleaseError::DirtyWorkingTree(_) => DIRTY_TREE_EXIT_CODE,
            ReleaseError::ExternalCommand {
                code: Some(code), ..
            } => u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }
}
