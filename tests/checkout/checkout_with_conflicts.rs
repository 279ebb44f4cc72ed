use crate::common::command::{
    commit_file, committed_repository_dir, head_commit_id, run_gitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn untracked_file_in_the_way_blocks_the_switch(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success();
    commit_file(dir, "f", "theirs", "other adds f");
    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();
    let master_tip = head_commit_id(dir);

    write_file(FileSpec::new(dir.join("f"), "mine".to_string()));

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "There is an untracked file in the way; delete it or add it first.",
        ))
        .stderr(predicate::str::contains("f"));

    assert_eq!(read_file(&dir.join("f")), "mine");
    assert_eq!(head_commit_id(dir), master_tip);
    assert_eq!(
        std::fs::read_to_string(dir.join(".gitlet").join("HEAD")).unwrap(),
        "ref: refs/heads/master\n"
    );
}

#[rstest]
fn untracked_file_with_identical_content_does_not_block(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success();
    commit_file(dir, "f", "same", "other adds f");
    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.join("f"), "same".to_string()));

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.join("f")), "same");
}

#[rstest]
fn untracked_files_not_in_the_target_survive_the_switch(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    write_file(FileSpec::new(dir.join("scratch.txt"), "keep me".to_string()));

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("scratch.txt")), "keep me");
}
