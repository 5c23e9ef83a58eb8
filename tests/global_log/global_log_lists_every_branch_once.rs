use crate::common::command::{
    bitlet_checkout, commit_file, init_repository_dir, run_bitlet_command,
};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn global_log_lists_every_branch_once(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_bitlet_command(dir.path(), &["branch", "other"])
        .assert()
        .success();
    commit_file(dir.path(), "master.txt", "master", "on master");

    bitlet_checkout(dir.path(), "other").assert().success();
    commit_file(dir.path(), "other.txt", "other", "on other");

    let output = run_bitlet_command(dir.path(), &["global-log"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let mut commit_ids = stdout
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .collect::<Vec<_>>();

    for message in ["initial commit", "two files", "on master", "on other"] {
        assert_eq!(
            stdout.lines().filter(|line| *line == message).count(),
            1,
            "{message} should be listed once"
        );
    }

    assert_eq!(commit_ids.len(), 4);
    commit_ids.sort();
    commit_ids.dedup();
    assert_eq!(commit_ids.len(), 4);
}
