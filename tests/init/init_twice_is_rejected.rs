use crate::common::command::{init_repository_dir, run_bitlet_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn init_twice_is_rejected(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_bitlet_command(dir.path(), &["init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "A Bitlet version-control system already exists in the current directory.",
        ));

    // the existing history survives
    run_bitlet_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("two files"));
}
