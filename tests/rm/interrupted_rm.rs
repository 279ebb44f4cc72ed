use crate::common::command::{
    committed_repository_dir, index_bytes, run_gitlet_command, status_output, stray_index_files,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn failed_delete_does_not_stage_the_removal(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    let index_before = index_bytes(dir);
    std::fs::remove_file(dir.join("1.txt"))?;
    std::fs::create_dir(dir.join("1.txt"))?;

    run_gitlet_command(dir, &["rm", "1.txt"]).assert().failure();

    assert_eq!(index_bytes(dir), index_before);
    assert!(status_output(dir).contains("=== Files Marked for Removal ===\n\n"));
    assert!(stray_index_files(dir).is_empty());

    std::fs::remove_dir(dir.join("1.txt"))?;
    run_gitlet_command(dir, &["rm", "1.txt"]).assert().success();

    assert!(status_output(dir).contains("=== Files Marked for Removal ===\n1.txt\n\n"));

    Ok(())
}
