use crate::common::command::{
    commit_file, gitlet_commit_at, head_commit_id, init_repository_dir, logged_commit_ids,
    run_gitlet_command,
};
use crate::common::file::{FileSpec, write_file};
use crate::common::stdout_lines;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn show_linear_history_most_recent_first(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let initial = head_commit_id(dir);

    let mut expected = vec![initial];
    for n in 1..=3 {
        write_file(FileSpec::new(dir.join("f.txt"), format!("version {n}")));
        run_gitlet_command(dir, &["add", "f.txt"]).assert().success();
        gitlet_commit_at(
            dir,
            &format!("commit {n}"),
            &format!("2023-01-01 1{n}:00:00 +0000"),
        )
        .assert()
        .success();
        expected.insert(0, head_commit_id(dir));
    }

    let output = run_gitlet_command(dir, &["log"]).output()?;
    let lines = stdout_lines(&output);

    assert_eq!(logged_commit_ids(dir), expected);
    assert_eq!(
        lines[..5].to_vec(),
        vec![
            "===".to_string(),
            format!("Commit {}", expected[0]),
            "2023-01-01 13:00:00".to_string(),
            "commit 3".to_string(),
            String::new(),
        ]
    );

    Ok(())
}

#[rstest]
fn diverged_branches_show_only_their_own_history(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    commit_file(dir, "shared.txt", "shared", "shared work");
    let shared = head_commit_id(dir);
    run_gitlet_command(dir, &["branch", "dev"]).assert().success();

    commit_file(dir, "master.txt", "master", "master work");
    let master_tip = head_commit_id(dir);

    run_gitlet_command(dir, &["checkout", "dev"])
        .assert()
        .success();
    commit_file(dir, "dev.txt", "dev", "dev work");
    let dev_tip = head_commit_id(dir);

    let dev_log = logged_commit_ids(dir);
    assert_eq!(dev_log.len(), 3);
    assert_eq!(dev_log[..2].to_vec(), vec![dev_tip.clone(), shared.clone()]);
    assert!(!dev_log.contains(&master_tip));

    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();
    let master_log = logged_commit_ids(dir);
    assert_eq!(master_log[..2].to_vec(), vec![master_tip, shared]);
    assert!(!master_log.contains(&dev_tip));
}
