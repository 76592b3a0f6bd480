use crate::error::{ReleaseError, Result};
use crate::git::VersionControl;
use std::cell::RefCell;

/// Mock repository for testing without actual git operations
///
/// Answers `status` and `describe` from scripted values and records every
/// commit and tag so tests can assert on the side effects.
pub struct MockRepository {
    describe: String,
    status: Vec<String>,
    fail_tag: bool,
    commits: RefCell<Vec<String>>,
    tags: RefCell<Vec<String>>,
}

impl MockRepository {
    /// Create a clean mock repository whose HEAD describes as `describe`
    pub fn new(describe: impl Into<String>) -> Self {
        MockRepository {
            describe: describe.into(),
            status: Vec::new(),
            fail_tag: false,
            commits: RefCell::new(Vec::new()),
            tags: RefCell::new(Vec::new()),
        }
    }

    /// Add a porcelain status entry, making the working tree dirty
    pub fn add_status_entry(&mut self, entry: impl Into<String>) {
        self.status.push(entry.into());
    }

    /// Make `create_tag` fail after the commit has been recorded
    pub fn fail_on_tag(&mut self) {
        self.fail_tag = true;
    }

    /// Commit messages recorded so far, oldest first
    pub fn commits(&self) -> Vec<String> {
        self.commits.borrow().clone()
    }

    /// Tag names recorded so far, oldest first
    pub fn tags(&self) -> Vec<String> {
        self.tags.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new("v0.1.0-0-g0000000")
    }
}

impl VersionControl for MockRepository {
    fn status(&self) -> Result<Vec<String>> {
        Ok(self.status.clone())
    }

    fn describe(&self) -> Result<String> {
        Ok(self.describe.clone())
    }

    fn commit_all(&self, message: &str) -> Result<String> {
        let mut commits = self.commits.borrow_mut();
        commits.push(message.to_string());
        Ok(format!("{:040x}", commits.len()))
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        if self.fail_tag {
            return Err(ReleaseError::Git(git2::Error::from_str(&format!(
                "'refs/tags/{}' - a reference with that name already exists",
                name
            ))));
        }
        self.tags.borrow_mut().push(name.to_string());
        Ok(())
    }
}
