use crate::common::command::{
    block_ref_update, branch_commit_id, commit_file, committed_repository_dir, head_commit_id,
    index_bytes, run_gitlet_command, status_output, stray_index_files,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn failed_head_update_keeps_the_current_branch_and_the_index(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    run_gitlet_command(dir, &["branch", "dev"]).assert().success();
    commit_file(dir, "3.txt", "three", "Third file");
    write_file(FileSpec::new(dir.join("4.txt"), "four".to_string()));
    run_gitlet_command(dir, &["add", "4.txt"]).assert().success();
    let head_before = std::fs::read_to_string(dir.join(".gitlet").join("HEAD"))?;
    let index_before = index_bytes(dir);
    let blocker = block_ref_update(dir, "HEAD");

    run_gitlet_command(dir, &["checkout", "dev"])
        .assert()
        .failure();

    assert_eq!(
        std::fs::read_to_string(dir.join(".gitlet").join("HEAD"))?,
        head_before
    );
    assert_eq!(index_bytes(dir), index_before);
    assert!(status_output(dir).contains("=== Staged Files ===\n4.txt\n\n"));
    assert!(stray_index_files(dir).is_empty());

    std::fs::remove_dir(&blocker)?;
    run_gitlet_command(dir, &["checkout", "dev"])
        .assert()
        .success();

    assert_eq!(head_commit_id(dir), branch_commit_id(dir, "dev"));
    assert!(status_output(dir).starts_with("=== Branches ===\n*dev\nmaster\n\n"));
    assert!(status_output(dir).contains("=== Staged Files ===\n\n"));
    assert!(!dir.join("3.txt").exists());

    Ok(())
}
