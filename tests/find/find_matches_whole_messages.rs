use crate::common::command::{
    bitlet_checkout, commit_file, init_repository_dir, log_commit_ids, run_bitlet_command,
};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn find_prints_every_commit_with_the_message(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_bitlet_command(dir.path(), &["branch", "other"])
        .assert()
        .success();
    commit_file(dir.path(), "wug.txt", "master wug", "same message");
    let master_commit = log_commit_ids(dir.path())[0].clone();

    bitlet_checkout(dir.path(), "other").assert().success();
    commit_file(dir.path(), "wug.txt", "other wug", "same message");
    let other_commit = log_commit_ids(dir.path())[0].clone();

    run_bitlet_command(dir.path(), &["find", "same message"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{}\n", master_commit)))
        .stdout(predicate::str::contains(format!("{}\n", other_commit)))
        .stdout(predicate::function(|stdout: &str| stdout.lines().count() == 2));
}

#[rstest]
#[case("same")]
#[case("two files ")]
#[case("Two files")]
fn find_requires_the_exact_message(init_repository_dir: TempDir, #[case] message: &str) {
    run_bitlet_command(init_repository_dir.path(), &["find", message])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Found no commit with that message."));
}

#[rstest]
fn find_sees_the_initial_commit(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["find", "initial commit"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9a-f]{40}\n$").unwrap());
}
