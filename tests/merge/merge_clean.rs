use crate::common::command::{
    bitlet_checkout, bitlet_merge, commit_file, init_repository_dir, log_commit_ids,
    run_bitlet_command,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

/// History:
///       A (two files)
///      / \
///     B   C
///     |   |
///  master other
///
/// master edits wug.txt; other edits notwug.txt, adds other.txt and deletes extra.txt
#[rstest]
fn merge_of_disjoint_changes_creates_a_merge_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    commit_file(dir.path(), "extra.txt", "extra", "add extra");
    run_bitlet_command(dir.path(), &["branch", "other"])
        .assert()
        .success();

    commit_file(dir.path(), "wug.txt", "master wug", "B");
    let master_tip = log_commit_ids(dir.path())[0].clone();

    bitlet_checkout(dir.path(), "other").assert().success();
    commit_file(dir.path(), "notwug.txt", "other notwug", "C");
    commit_file(dir.path(), "other.txt", "other", "C2");
    run_bitlet_command(dir.path(), &["rm", "extra.txt"])
        .assert()
        .success();
    run_bitlet_command(dir.path(), &["commit", "C3"])
        .assert()
        .success();
    let other_tip = log_commit_ids(dir.path())[0].clone();

    bitlet_checkout(dir.path(), "master").assert().success();
    bitlet_merge(dir.path(), "other").assert().success();

    assert_eq!(read_file(&dir.path().join("wug.txt")), "master wug");
    assert_eq!(read_file(&dir.path().join("notwug.txt")), "other notwug");
    assert_eq!(read_file(&dir.path().join("other.txt")), "other");
    assert!(!dir.path().join("extra.txt").exists());

    let commit_ids = log_commit_ids(dir.path());
    assert_eq!(commit_ids[1], master_tip);
    run_bitlet_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "===\ncommit {}\nMerge: {} {}\n",
            commit_ids[0],
            &master_tip[..7],
            &other_tip[..7]
        )))
        .stdout(predicate::str::contains("Merged other into master.\n"));

    // the merge left nothing staged
    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Staged Files ===\n\n=== Removed Files ===\n\n",
        ));
}

/// History:
///       A
///      / \
///     B   C
///     |\ /|
///     | X |
///     |/ \|
///     D   E
///
/// D merges C into B, E merges B into C; both B and C are best common ancestors
#[rstest]
fn merge_with_criss_cross_history_uses_a_single_split_point(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_bitlet_command(dir.path(), &["branch", "right"])
        .assert()
        .success();
    commit_file(dir.path(), "left.txt", "B", "B");

    bitlet_checkout(dir.path(), "right").assert().success();
    commit_file(dir.path(), "right.txt", "C", "C");
    run_bitlet_command(dir.path(), &["branch", "right-snapshot"])
        .assert()
        .success();

    bitlet_checkout(dir.path(), "master").assert().success();
    run_bitlet_command(dir.path(), &["branch", "left-snapshot"])
        .assert()
        .success();
    bitlet_merge(dir.path(), "right-snapshot").assert().success();
    commit_file(dir.path(), "d.txt", "D", "D");

    bitlet_checkout(dir.path(), "right").assert().success();
    bitlet_merge(dir.path(), "left-snapshot").assert().success();
    commit_file(dir.path(), "e.txt", "E", "E");

    bitlet_checkout(dir.path(), "master").assert().success();
    bitlet_merge(dir.path(), "right").assert().success();

    assert_eq!(read_file(&dir.path().join("left.txt")), "B");
    assert_eq!(read_file(&dir.path().join("right.txt")), "C");
    assert_eq!(read_file(&dir.path().join("d.txt")), "D");
    assert_eq!(read_file(&dir.path().join("e.txt")), "E");
}
