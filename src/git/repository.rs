use crate::error::Result;
use crate::git::VersionControl;
use git2::{
    DescribeFormatOptions, DescribeOptions, Repository as Git2Repo, Status, StatusOptions,
};
use std::path::Path;
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        debug!("Using repository at {}", repo.path().display());

        Ok(Git2Repository { repo })
    }
}

impl VersionControl for Git2Repository {
    fn status(&self) -> Result<Vec<String>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;

        Ok(statuses
            .iter()
            .filter(|entry| entry.status() != Status::CURRENT)
            .map(|entry| {
                format!(
                    "{} {}",
                    porcelain_code(entry.status()),
                    entry.path().unwrap_or("(non-utf8 path)")
                )
            })
            .collect())
    }

    fn describe(&self) -> Result<String> {
        let mut options = DescribeOptions::new();
        options.describe_tags();
        let describe = self.repo.describe(&options)?;

        let mut format = DescribeFormatOptions::new();
        format.always_use_long_format(true);

        Ok(describe.format(Some(&format))?)
    }

    fn commit_all(&self, message: &str) -> Result<String> {
        // `commit -a`: stage modifications and deletions of tracked files only
        let mut index = self.repo.index()?;
        index.update_all(["*"], None)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;
        let parent = self.repo.head()?.peel_to_commit()?;

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;

        Ok(oid.to_string())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo.tag_lightweight(name, head.as_object(), false)?;
        Ok(())
    }
}

/// Two-letter `git status --porcelain` code for a status entry
fn porcelain_code(status: Status) -> &'static str {
    if status.contains(Status::CONFLICTED) {
        return "UU";
    }

    let index = if status.contains(Status::INDEX_NEW) {
        'A'
    } else if status.contains(Status::INDEX_MODIFIED) {
        'M'
    } else if status.contains(Status::INDEX_DELETED) {
        'D'
    } else if status.contains(Status::INDEX_RENAMED) {
        'R'
    } else if status.contains(Status::INDEX_TYPECHANGE) {
        'T'
    } else {
        ' '
    };

    let worktree = if status.contains(Status::WT_NEW) {
        '?'
    } else if status.contains(Status::WT_MODIFIED) {
        'M'
    } else if status.contains(Status::WT_DELETED) {
        'D'
    } else if status.contains(Status::WT_RENAMED) {
        'R'
    } else if status.contains(Status::WT_TYPECHANGE) {
        'T'
    } else {
        ' '
    };

    match (index, worktree) {
        (' ', '?') => "??",
        ('A', ' ') => "A ",
        ('A', 'M') => "AM",
        ('A', 'D') => "AD",
        ('M', ' ') => "M ",
        ('M', 'M') => "MM",
        ('M', 'D') => "MD",
        ('D', ' ') => "D ",
        ('R', ' ') => "R ",
        ('R', 'M') => "RM",
        ('T', ' ') => "T ",
        (' ', 'M') => " M",
        (' ', 'D') => " D",
        (' ', 'R') => " R",
        (' ', 'T') => " T",
        _ => "XX",
    }
}
