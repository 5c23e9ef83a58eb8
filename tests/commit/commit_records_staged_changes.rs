use crate::common::command::{
    bitlet_add, bitlet_commit, head_commit_id, init_repository_dir, log_commit_ids,
    run_bitlet_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn commit_records_staged_changes(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let parent_id = head_commit_id(dir.path());

    write_file(FileSpec::new(dir.path().join("wug.txt"), "wug v2".to_string()));
    bitlet_add(dir.path(), "wug.txt").assert().success();

    bitlet_commit(dir.path(), "update wug")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[master [0-9a-f]{7}\] update wug\n$").unwrap());

    let commit_ids = log_commit_ids(dir.path());
    assert_eq!(commit_ids.len(), 3);
    assert_eq!(commit_ids[1], parent_id);

    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(
            "=== Branches ===\n*master\n\n\
             === Staged Files ===\n\n\
             === Removed Files ===\n\n\
             === Modifications Not Staged For Commit ===\n\n\
             === Untracked Files ===\n\n",
        );
}

#[rstest]
fn committed_content_survives_working_directory_edits(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("wug.txt"), "edited".to_string()));

    run_bitlet_command(dir.path(), &["checkout", "--", "wug.txt"])
        .assert()
        .success();

    assert_eq!(std::fs::read_to_string(dir.path().join("wug.txt")).unwrap(), "wug");
}

#[rstest]
fn commit_messages_keep_their_lines(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("wug.txt"), "wug v2".to_string()));
    bitlet_add(dir.path(), "wug.txt").assert().success();

    bitlet_commit(dir.path(), "subject\n\nbody")
        .assert()
        .success()
        .stdout(predicate::str::ends_with("] subject\n"));

    run_bitlet_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("subject\n\nbody\n\n==="));
}
