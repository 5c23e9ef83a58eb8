use crate::common::command::{bitlet_add, init_repository_dir, run_bitlet_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn rm_stages_a_tracked_file_for_removal(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_bitlet_command(dir.path(), &["rm", "wug.txt"])
        .assert()
        .success();

    assert!(!dir.path().join("wug.txt").exists());
    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Removed Files ===\nwug.txt\n\n"))
        .stdout(predicate::str::contains(
            "=== Modifications Not Staged For Commit ===\n\n",
        ));
}

#[rstest]
fn rm_unstages_a_new_file_and_keeps_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("new.txt"), "new".to_string()));
    bitlet_add(dir.path(), "new.txt").assert().success();

    run_bitlet_command(dir.path(), &["rm", "new.txt"])
        .assert()
        .success();

    assert!(dir.path().join("new.txt").is_file());
    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"))
        .stdout(predicate::str::contains("=== Removed Files ===\n\n"))
        .stdout(predicate::str::contains("=== Untracked Files ===\nnew.txt\n\n"));
}

#[rstest]
fn rm_of_an_unknown_file_has_nothing_to_do(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("loose.txt"), "loose".to_string()));

    run_bitlet_command(dir.path(), &["rm", "loose.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No reason to remove the file."));

    assert!(dir.path().join("loose.txt").is_file());
}

#[rstest]
fn a_removed_file_recreated_by_hand_is_untracked(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_bitlet_command(dir.path(), &["rm", "wug.txt"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("wug.txt"), "back".to_string()));

    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Removed Files ===\nwug.txt\n\n"))
        .stdout(predicate::str::contains("=== Untracked Files ===\nwug.txt\n\n"));
}
