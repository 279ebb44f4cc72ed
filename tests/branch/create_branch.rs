use crate::common::command::{
    branch_commit_id, commit_file, committed_repository_dir, head_commit_id, init_repository_dir,
    run_gitlet_command,
};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn new_branch_points_at_head_without_switching(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    let head = head_commit_id(dir);

    run_gitlet_command(dir, &["branch", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(branch_commit_id(dir, "feature"), head);
    assert_eq!(
        std::fs::read_to_string(dir.join(".gitlet").join("HEAD")).unwrap(),
        "ref: refs/heads/master\n"
    );
}

#[rstest]
fn commits_after_branching_only_move_the_current_branch(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    let base = head_commit_id(dir);
    run_gitlet_command(dir, &["branch", "feature"])
        .assert()
        .success();

    commit_file(dir, "next.txt", "next", "next");

    assert_eq!(branch_commit_id(dir, "feature"), base);
    assert_ne!(branch_commit_id(dir, "master"), base);
}

#[rstest]
#[case("feature/login")]
#[case("release-1.0")]
#[case("fix_123")]
fn create_branch_with_valid_name(init_repository_dir: TempDir, #[case] name: &str) {
    run_gitlet_command(init_repository_dir.path(), &["branch", name])
        .assert()
        .success();

    assert_eq!(
        branch_commit_id(init_repository_dir.path(), name),
        head_commit_id(init_repository_dir.path())
    );
}

#[rstest]
#[case("bad name")]
#[case(".hidden")]
#[case("ends.lock")]
#[case("a..b")]
#[case("HEAD")]
fn create_branch_with_invalid_name(init_repository_dir: TempDir, #[case] name: &str) {
    run_gitlet_command(init_repository_dir.path(), &["branch", name])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a valid branch name."));
}

#[rstest]
fn create_duplicate_branch(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["branch", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A branch with that name already exists.",
        ));
}
