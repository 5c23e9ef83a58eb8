use crate::common::command::{bitlet_add, init_repository_dir, run_bitlet_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn restoring_the_committed_content_unstages_the_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("wug.txt"), "changed".to_string()));
    bitlet_add(dir.path(), "wug.txt").assert().success();

    write_file(FileSpec::new(dir.path().join("wug.txt"), "wug".to_string()));
    bitlet_add(dir.path(), "wug.txt").assert().success();

    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"));

    run_bitlet_command(dir.path(), &["commit", "nothing new"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No changes added to the commit."));
}

#[rstest]
fn adding_a_removed_file_back_cancels_the_removal(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_bitlet_command(dir.path(), &["rm", "wug.txt"])
        .assert()
        .success();
    assert!(!dir.path().join("wug.txt").exists());

    write_file(FileSpec::new(dir.path().join("wug.txt"), "wug".to_string()));
    bitlet_add(dir.path(), "wug.txt").assert().success();

    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Staged Files ===\n\n=== Removed Files ===\n\n",
        ))
        .stdout(predicate::str::contains("=== Untracked Files ===\n\n"));
}
