// tests/cli_test.rs
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use git2::{Repository, Signature};

const BIN: &str = env!("CARGO_BIN_EXE_release-bump");

fn release_bump(dir: &Path, args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute release-bump")
}

/// Repository with a tagged initial commit and one commit after the tag
fn tagged_repo(version: &str) -> (tempfile::TempDir, Repository) {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    let signature = Signature::now("Release Bot", "release@example.com").unwrap();
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Release Bot").unwrap();
        config.set_str("user.email", "release@example.com").unwrap();
    }

    let mut parent = None;
    for (name, contents) in [
        (
            "Cargo.toml",
            format!("[package]\nname = \"demo\"\nversion = \"{}\"\n", version),
        ),
        ("lib.rs", "pub fn demo() {}\n".to_string()),
    ] {
        fs::write(dir.path().join(name), contents).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let parents: Vec<git2::Commit> = parent
            .map(|oid| repo.find_commit(oid).unwrap())
            .into_iter()
            .collect();
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
        let oid = repo
            .commit(Some("HEAD"), &signature, &signature, name, &tree, &parent_refs)
            .unwrap();
        if parent.is_none() {
            let commit = repo.find_object(oid, None).unwrap();
            repo.tag_lightweight(&format!("v{}", version), &commit, false)
                .unwrap();
        }
        parent = Some(oid);
    }

    (dir, repo)
}

#[test]
fn test_help() {
    let dir = tempfile::tempdir().unwrap();
    let output = release_bump(dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("release-bump"));
    assert!(stdout.contains("--increment"));
    assert!(stdout.contains("--dry-run"));
}

#[test]
fn test_increment_is_required() {
    let dir = tempfile::tempdir().unwrap();
    let output = release_bump(dir.path(), &["Cargo.toml"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_filenames_are_required() {
    let dir = tempfile::tempdir().unwrap();
    let output = release_bump(dir.path(), &["-i", "minor"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unknown_increment_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = release_bump(dir.path(), &["--increment", "patch", "Cargo.toml"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bugfix"));
}

#[test]
fn test_release_end_to_end() {
    let (dir, repo) = tagged_repo("1.4.9");
    let output = release_bump(dir.path(), &["-i", "minor", "Cargo.toml"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Released v1.5.0"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Retrieved version 1.4.9.1-"));

    let manifest = fs::read_to_string(dir.path().join("Cargo.toml")).unwrap();
    assert!(manifest.contains("version = \"1.5.0\""));
    assert!(repo.find_reference("refs/tags/v1.5.0").is_ok());
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message(), Some("Release v1.5.0"));
}

#[test]
fn test_quiet_run_prints_nothing_on_success() {
    let (dir, _repo) = tagged_repo("0.3.0");
    let output = release_bump(dir.path(), &["-q", "-v", "-i", "major", "Cargo.toml"]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[test]
fn test_dirty_tree_exits_with_255() {
    let (dir, repo) = tagged_repo("0.3.0");
    fs::write(dir.path().join("lib.rs"), "pub fn demo() { todo!() }\n").unwrap();

    let output = release_bump(dir.path(), &["-i", "bugfix", "Cargo.toml"]);

    assert_eq!(output.status.code(), Some(255));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("uncommitted changes"));
    assert_eq!(stderr.matches("uncommitted changes").count(), 1);
    assert_eq!(stderr.matches("lib.rs").count(), 1);
    assert!(repo.find_reference("refs/tags/v0.3.1").is_err());
}

#[test]
fn test_dry_run_leaves_repository_untouched() {
    let (dir, repo) = tagged_repo("2.0.0");
    let head_before = repo.head().unwrap().target().unwrap();

    let output = release_bump(dir.path(), &["--dry-run", "-i", "bugfix", "Cargo.toml"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Dry run"));
    assert!(stdout.contains("Tag v2.0.1"));
    assert_eq!(repo.head().unwrap().target().unwrap(), head_before);
    assert!(repo.find_reference("refs/tags/v2.0.1").is_err());
    let manifest = fs::read_to_string(dir.path().join("Cargo.toml")).unwrap();
    assert!(manifest.contains("version = \"2.0.0\""));
}

#[test]
fn test_missing_file_is_skipped_with_warning() {
    let (dir, repo) = tagged_repo("0.1.0");
    let output = release_bump(
        dir.path(),
        &["-i", "bugfix", "crates/missing/Cargo.toml", "Cargo.toml"],
    );

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist, skipping"));
    assert!(repo.find_reference("refs/tags/v0.1.1").is_ok());
}

#[test]
fn test_failing_command_editor_propagates_exit_code() {
    let (dir, repo) = tagged_repo("0.1.0");
    // Kept outside the repository so the working tree stays clean
    let config_dir = tempfile::tempdir().unwrap();
    let config = config_dir.path().join("release.toml");
    fs::write(
        &config,
        "[editor]\nkind = \"command\"\nprogram = \"sh\"\nargs = [\"-c\", \"exit 7\"]\n",
    )
    .unwrap();

    let output = release_bump(
        dir.path(),
        &["-c", config.to_str().unwrap(), "-i", "bugfix", "Cargo.toml"],
    );

    if cfg!(unix) {
        assert_eq!(output.status.code(), Some(7));
    } else {
        assert!(!output.status.success());
    }
    assert!(repo.find_reference("refs/tags/v0.1.1").is_err());
}
