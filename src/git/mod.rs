//! Version-control abstraction layer
//!
//! The release driver never talks to git directly. It goes through the
//! [VersionControl] trait so the workflow can run against a real repository
//! or an in-memory double.
//!
//! - [repository::Git2Repository]: real implementation using the `git2` crate
//! - [mock::MockRepository]: scripted implementation for tests
//!
//! ```rust,no_run
//! # use release_bump::git::{Git2Repository, VersionControl};
//! # fn example() -> release_bump::Result<()> {
//! let repo = Git2Repository::open(".")?;
//! if repo.status()?.is_empty() {
//!     println!("nearest tag: {}", repo.describe()?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Operations the release workflow needs from version control
pub trait VersionControl {
    /// Working-tree status in porcelain form, one entry per changed path
    /// (e.g. `" M Cargo.toml"`, `"?? notes.txt"`).
    ///
    /// An empty list means the working tree is clean.
    fn status(&self) -> Result<Vec<String>>;

    /// Describe HEAD relative to the nearest tag, equivalent to
    /// `git describe --tags --long` (e.g. `"v1.2.3-4-gabcdef0"`).
    fn describe(&self) -> Result<String>;

    /// Commit every modified tracked file with `message`, equivalent to
    /// `git commit -a -m <message>`.
    ///
    /// Returns the id of the new commit.
    fn commit_all(&self, message: &str) -> Result<String>;

    /// Create a lightweight tag named `name` at HEAD.
    ///
    /// Fails if the tag already exists.
    fn create_tag(&self, name: &str) -> Result<()>;
}
