use crate::common::command::{
    commit_file, committed_repository_dir, gitlet_commit, head_commit_id, run_gitlet_command,
};
use crate::common::file::{FileSpec, delete_file, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn restore_a_file_from_head(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "scribbles".to_string()));

    run_gitlet_command(dir, &["checkout", "--", "1.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("1.txt")), "one");
}

#[rstest]
fn restore_a_file_from_an_older_commit_by_abbreviated_id(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    let old = head_commit_id(dir);
    commit_file(dir, "1.txt", "uno", "translate one");
    let head = head_commit_id(dir);

    run_gitlet_command(dir, &["checkout", &old[..8], "--", "1.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("1.txt")), "one");
    assert_eq!(head_commit_id(dir), head);
}

#[rstest]
fn restore_a_file_through_a_relative_revision(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    commit_file(dir, "1.txt", "uno", "translate one");

    run_gitlet_command(dir, &["checkout", "HEAD^", "--", "1.txt"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.join("1.txt")), "one");

    run_gitlet_command(dir, &["checkout", "master~0", "--", "1.txt"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.join("1.txt")), "uno");
}

#[rstest]
fn restoring_a_file_leaves_the_staging_area_alone(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    write_file(FileSpec::new(dir.join("new.txt"), "new".to_string()));
    run_gitlet_command(dir, &["add", "new.txt"]).assert().success();

    run_gitlet_command(dir, &["checkout", "--", "1.txt"])
        .assert()
        .success();

    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\nnew.txt\n"));
}

#[rstest]
fn bare_file_name_falls_back_to_the_current_commit(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    delete_file(&dir.join("1.txt"));

    run_gitlet_command(dir, &["checkout", "1.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("1.txt")), "one");
}

#[rstest]
fn file_missing_from_the_commit_fails(committed_repository_dir: TempDir) {
    run_gitlet_command(committed_repository_dir.path(), &["checkout", "--", "nope.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "File does not exist in that commit.",
        ));
}

#[rstest]
fn unknown_commit_id_fails(committed_repository_dir: TempDir) {
    run_gitlet_command(
        committed_repository_dir.path(),
        &["checkout", "deadbeef", "--", "1.txt"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("No commit with that id exists."));
}

#[rstest]
fn committed_content_wins_over_the_pre_add_version(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    commit_file(dir, "foo", "old", "add foo");

    write_file(FileSpec::new(dir.join("foo"), "new".to_string()));
    run_gitlet_command(dir, &["add", "foo"]).assert().success();
    gitlet_commit(dir, "update").assert().success();
    delete_file(&dir.join("foo"));

    let tip = head_commit_id(dir);
    run_gitlet_command(dir, &["checkout", &tip, "--", "foo"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("foo")), "new");
}
