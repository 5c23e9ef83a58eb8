use crate::common::command::{repository_dir, run_bitlet_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case(&["status"])]
#[case(&["log"])]
#[case(&["add", "wug.txt"])]
#[case(&["commit", "message"])]
#[case(&["branch", "other"])]
#[case(&["merge", "other"])]
fn commands_require_an_initialized_repository(repository_dir: TempDir, #[case] args: &[&str]) {
    run_bitlet_command(repository_dir.path(), args)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Not in an initialized Bitlet directory.",
        ));

    assert!(!repository_dir.path().join(".bitlet").exists());
}
