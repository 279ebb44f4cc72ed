use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Fixed commit date so ids stay stable between runs
pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A fresh repository holding just the initial commit
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// A repository whose `master` tracks `1.txt` ("one") and `a/2.txt` ("two")
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(dir.join("a").join("2.txt"), "two".to_string()));

    run_gitlet_command(dir, &["add", "1.txt"]).assert().success();
    run_gitlet_command(dir, &["add", "a/2.txt"]).assert().success();
    gitlet_commit(dir, "Initial files").assert().success();

    init_repository_dir
}

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.arg("-C").arg(dir);
    cmd.env_remove("GITLET_LOG");
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn gitlet_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_gitlet_command(dir, &["commit", "-m", message]);
    cmd.env("GITLET_COMMIT_DATE", COMMIT_DATE);
    cmd
}

pub fn gitlet_commit_at(dir: &Path, message: &str, date: &str) -> Command {
    let mut cmd = run_gitlet_command(dir, &["commit", "-m", message]);
    cmd.env("GITLET_COMMIT_DATE", date);
    cmd
}

/// Stage `path` with `content` and commit it
pub fn commit_file(dir: &Path, path: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(path), content.to_string()));
    run_gitlet_command(dir, &["add", path]).assert().success();
    gitlet_commit(dir, message).assert().success();
}

/// Id of the commit HEAD resolves to, read straight from the metadata files
pub fn head_commit_id(dir: &Path) -> String {
    let metadata_dir = dir.join(".gitlet");
    let head = std::fs::read_to_string(metadata_dir.join("HEAD")).expect("Failed to read HEAD");

    match head.trim().strip_prefix("ref: ") {
        Some(ref_path) => std::fs::read_to_string(metadata_dir.join(ref_path))
            .expect("Failed to read branch")
            .trim()
            .to_string(),
        None => head.trim().to_string(),
    }
}

pub fn branch_commit_id(dir: &Path, branch: &str) -> String {
    std::fs::read_to_string(dir.join(".gitlet").join("refs").join("heads").join(branch))
        .expect("Failed to read branch")
        .trim()
        .to_string()
}

/// Commit ids printed by `log`, in the order shown
pub fn logged_commit_ids(dir: &Path) -> Vec<String> {
    let output = run_gitlet_command(dir, &["log"])
        .output()
        .expect("Failed to run log");

    crate::common::stdout_lines(&output)
        .into_iter()
        .filter_map(|line| line.strip_prefix("Commit ").map(str::to_string))
        .collect()
}

pub fn status_output(dir: &Path) -> String {
    let output = run_gitlet_command(dir, &["status"])
        .output()
        .expect("Failed to run status");
    assert!(output.status.success());

    String::from_utf8(output.stdout).expect("Invalid utf-8 in status")
}

/// Raw bytes of the staging index, `None` when it was never written
pub fn index_bytes(dir: &Path) -> Option<Vec<u8>> {
    std::fs::read(dir.join(".gitlet").join("index")).ok()
}

/// Turn the temp path a ref update writes through into a directory, so the update fails
pub fn block_ref_update(dir: &Path, ref_path: &str) -> std::path::PathBuf {
    let ref_path = Path::new(ref_path);
    let file_name = ref_path
        .file_name()
        .expect("ref path has a file name")
        .to_string_lossy();
    let blocker = dir
        .join(".gitlet")
        .join(ref_path.parent().unwrap_or(Path::new("")))
        .join(format!(".{file_name}.tmp"));
    std::fs::create_dir_all(&blocker).expect("Failed to create blocker dir");

    blocker
}

/// Leftover files in the metadata directory that are not part of the repository
pub fn stray_index_files(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir.join(".gitlet"))
        .expect("Failed to list metadata dir")
        .map(|entry| entry.expect("Failed to read entry").file_name())
        .map(|name| name.to_string_lossy().to_string())
        .filter(|name| name.starts_with("index.tmp"))
        .collect()
}
