use crate::common::command::{bitlet_commit, init_repository_dir, run_bitlet_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn commit_removes_files_staged_for_removal(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_bitlet_command(dir.path(), &["rm", "wug.txt"])
        .assert()
        .success();
    bitlet_commit(dir.path(), "remove wug").assert().success();

    run_bitlet_command(dir.path(), &["checkout", "--", "wug.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File does not exist in that commit."));

    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Removed Files ===\n\n"));
}
