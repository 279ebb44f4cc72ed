use crate::common::command::{init_repository_dir, run_gitlet_command};
use crate::common::file::{FileSpec, random_content, random_file_name, write_file};
use crate::common::stdout_lines;
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn staged_files(dir: &std::path::Path) -> Vec<String> {
    let output = run_gitlet_command(dir, &["status"])
        .output()
        .expect("Failed to run status");

    stdout_lines(&output)
        .into_iter()
        .skip_while(|line| line != "=== Staged Files ===")
        .skip(1)
        .take_while(|line| !line.is_empty())
        .collect()
}

#[rstest]
fn add_single_file_to_index_successfully(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let file_name = random_file_name();
    write_file(FileSpec::new(dir.join(&file_name), random_content()));

    run_gitlet_command(dir, &["add", &file_name])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(staged_files(dir), vec![file_name]);
    assert!(dir.join(".gitlet").join("index").is_file());

    Ok(())
}

#[rstest]
fn add_files_from_nested_directories(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("z.txt"), random_content()));
    write_file(FileSpec::new(dir.join("a").join("b").join("c.txt"), random_content()));

    run_gitlet_command(dir, &["add", "z.txt"]).assert().success();
    run_gitlet_command(dir, &["add", "./a/b/c.txt"])
        .assert()
        .success();

    assert_eq!(staged_files(dir), vec!["a/b/c.txt", "z.txt"]);

    Ok(())
}

#[rstest]
fn adding_a_missing_file_fails(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["add", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File does not exist."));

    assert!(staged_files(init_repository_dir.path()).is_empty());
}

#[rstest]
fn paths_outside_the_working_tree_cannot_be_added(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["add", ".gitlet/HEAD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File does not exist."));
}

#[rstest]
fn re_adding_a_modified_file_restages_the_new_content(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("notes.txt"), "draft".to_string()));
    run_gitlet_command(dir, &["add", "notes.txt"]).assert().success();

    write_file(FileSpec::new(dir.join("notes.txt"), "final".to_string()));
    run_gitlet_command(dir, &["add", "notes.txt"]).assert().success();
    crate::common::command::gitlet_commit(dir, "notes")
        .assert()
        .success();

    std::fs::remove_file(dir.join("notes.txt"))?;
    run_gitlet_command(dir, &["checkout", "--", "notes.txt"])
        .assert()
        .success();

    assert_eq!(std::fs::read_to_string(dir.join("notes.txt"))?, "final");

    Ok(())
}

#[rstest]
fn re_adding_identical_content_is_silent(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("same.txt"), random_content()));

    run_gitlet_command(dir, &["add", "same.txt"]).assert().success();
    run_gitlet_command(dir, &["add", "same.txt"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    assert_eq!(staged_files(dir), vec!["same.txt"]);
}

#[rstest]
#[case("line\nbreak.txt")]
#[case("carriage\rreturn.txt")]
fn names_with_control_characters_are_refused(init_repository_dir: TempDir, #[case] name: &str) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join(name), random_content()));

    run_gitlet_command(dir, &["add", name])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "File names must be UTF-8 and free of control characters.",
        ));

    assert!(staged_files(dir).is_empty());
    assert!(!dir.join(".gitlet").join("index").exists());
}

#[cfg(unix)]
#[rstest]
fn names_that_are_not_utf8_are_refused(init_repository_dir: TempDir) {
    use std::os::unix::ffi::OsStrExt;

    let dir = init_repository_dir.path();
    let name = std::ffi::OsStr::from_bytes(b"caf\xE9.txt");
    write_file(FileSpec::new(dir.join(name), random_content()));

    let mut cmd = run_gitlet_command(dir, &["add"]);
    cmd.arg(name)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "File names must be UTF-8 and free of control characters.",
        ));

    assert!(staged_files(dir).is_empty());
    assert!(!dir.join(".gitlet").join("index").exists());
}
