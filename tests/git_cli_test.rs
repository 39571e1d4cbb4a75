// tests/git_cli_test.rs
//
// Runs against the real `git` executable. Repositories are built with git2 so
// commit and tag timestamps are fixed.
use std::fs;
use std::path::Path;
use std::process::Command;

use commit_chef::domain::TagBlock;
use commit_chef::git::{GitCli, Repository as _};
use git2::{Oid, Repository, Signature, Time};
use tempfile::TempDir;

/// Thu Jan 4 10:00:00 2024 UTC
const TAG_TIME: i64 = 1_704_362_400;
const HOUR: i64 = 3_600;

const PROJECT: &str = "<Project Sdk=\"Microsoft.NET.Sdk\">\n  <PropertyGroup>\n    <ApplicationDisplayVersion>1.0.0</ApplicationDisplayVersion>\n    <ApplicationVersion>1</ApplicationVersion>\n  </PropertyGroup>\n</Project>\n";

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn signature(time: i64) -> Signature<'static> {
    Signature::new("Test User", "test@example.com", &Time::new(time, 0))
        .expect("Could not create signature")
}

fn commit(repo: &Repository, message: &str, time: i64) -> Oid {
    let path = repo.workdir().unwrap().join("CHANGELOG.md");
    let mut content = fs::read_to_string(&path).unwrap_or_default();
    content.push_str(message);
    content.push('\n');
    fs::write(&path, content).expect("Could not write file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new("CHANGELOG.md"))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");
    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");

    let parent = repo
        .head()
        .ok()
        .and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    let sig = signature(time);
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("Could not create commit")
}

fn annotated_tag(repo: &Repository, name: &str, target: Oid, time: i64) {
    let object = repo.find_object(target, None).unwrap();
    repo.tag(name, &object, &signature(time), &format!("Release {}", name), false)
        .expect("Could not create tag");
}

/// Repository with `v1.0.0` at TAG_TIME and the given commits an hour apart after it
fn setup_repo(after_tag: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(dir.path()).expect("Could not init git repo");

    let tagged = commit(&repo, "chore: initial commit", TAG_TIME - HOUR);
    annotated_tag(&repo, "v1.0.0", tagged, TAG_TIME);

    for (i, message) in after_tag.iter().enumerate() {
        commit(&repo, message, TAG_TIME + HOUR * (i as i64 + 1));
    }

    fs::write(dir.path().join("App.csproj"), PROJECT).unwrap();
    fs::write(
        dir.path().join("commitchef.toml"),
        "[git]\nfetch_tags = false\n",
    )
    .unwrap();
    dir
}

fn run_binary(dir: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_commit-chef"))
        .args(["--dir", dir.to_str().unwrap()])
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute commit-chef")
}

#[test]
fn test_git_cli_queries() {
    if !git_available() {
        return;
    }
    let dir = setup_repo(&["feat: add login", "fix: crash on start"]);
    let git = GitCli::new(dir.path());

    let tags = git.list_tags().unwrap();
    assert_eq!(tags, vec!["v1.0.0"]);

    let block = TagBlock::parse(&git.show_tag("v1.0.0").unwrap()).unwrap();
    assert_eq!(block.version, "v1.0.0");
    assert_eq!(block.tagger, "Test User <test@example.com>");

    let commits = git.commits_since(Some(&block.date)).unwrap();
    assert_eq!(commits.len(), 2);
    assert!(commits[0].ends_with(" fix: crash on start"));
    assert!(commits[1].ends_with(" feat: add login"));

    assert_eq!(git.commits_since(None).unwrap().len(), 3);
}

#[test]
fn test_git_cli_unknown_tag_is_external_tool_error() {
    if !git_available() {
        return;
    }
    let dir = setup_repo(&[]);
    let git = GitCli::new(dir.path());

    let err = git.show_tag("v9.9.9").unwrap_err();
    assert!(matches!(err, commit_chef::ChefError::ExternalTool { .. }));
}

#[test]
fn test_binary_rewrites_descriptor() {
    if !git_available() {
        return;
    }
    let dir = setup_repo(&["feat: add login", "fix: crash on start"]);

    let output = run_binary(dir.path());

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("App.csproj set to 0.2.1"), "stdout: {}", stdout);

    let text = fs::read_to_string(dir.path().join("App.csproj")).unwrap();
    assert_eq!(
        text,
        PROJECT
            .replace(">1.0.0<", ">0.2.1<")
            .replace("<ApplicationVersion>1<", "<ApplicationVersion>0<")
    );
}

#[test]
fn test_binary_no_commits_is_silent_success() {
    if !git_available() {
        return;
    }
    let dir = setup_repo(&[]);

    let output = run_binary(dir.path());

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(
        fs::read_to_string(dir.path().join("App.csproj")).unwrap(),
        PROJECT
    );
}

#[test]
fn test_binary_no_commits_hides_warnings() {
    if !git_available() {
        return;
    }
    let dir = setup_repo(&[]);
    fs::write(dir.path().join("Other.csproj"), PROJECT).unwrap();

    let output = run_binary(dir.path());

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("WARNING"), "stderr: {}", stderr);
}

#[test]
fn test_binary_failure_prints_fixed_message() {
    let dir = TempDir::new().unwrap();

    let output = run_binary(dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to run commit chef"), "stderr: {}", stderr);
}
