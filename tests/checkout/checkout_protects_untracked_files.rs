use crate::common::command::{
    bitlet_checkout, commit_file, head_commit_id, init_repository_dir, run_bitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

/// `other` tracks `new.txt`, master does not
fn branch_with_new_file(dir: &TempDir) {
    run_bitlet_command(dir.path(), &["branch", "other"])
        .assert()
        .success();
    bitlet_checkout(dir.path(), "other").assert().success();
    commit_file(dir.path(), "new.txt", "from other", "add new");
    bitlet_checkout(dir.path(), "master").assert().success();
    assert!(!dir.path().join("new.txt").exists());
}

#[rstest]
fn checkout_refuses_to_overwrite_an_untracked_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    branch_with_new_file(&dir);

    write_file(FileSpec::new(dir.path().join("new.txt"), "mine".to_string()));
    write_file(FileSpec::new(dir.path().join("wug.txt"), "edited".to_string()));

    bitlet_checkout(dir.path(), "other")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "There is an untracked file in the way; delete it, or add and commit it first.",
        ));

    // nothing moved
    assert_eq!(read_file(&dir.path().join("new.txt")), "mine");
    assert_eq!(read_file(&dir.path().join("wug.txt")), "edited");
    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("*master"));
}

#[rstest]
fn an_untracked_file_with_identical_content_is_not_in_the_way(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    branch_with_new_file(&dir);

    write_file(FileSpec::new(
        dir.path().join("new.txt"),
        "from other".to_string(),
    ));

    bitlet_checkout(dir.path(), "other").assert().success();
    assert_eq!(read_file(&dir.path().join("new.txt")), "from other");
}

#[rstest]
fn reset_refuses_to_overwrite_an_untracked_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    branch_with_new_file(&dir);
    let master_head = head_commit_id(dir.path());

    bitlet_checkout(dir.path(), "other").assert().success();
    let other_head = head_commit_id(dir.path());
    bitlet_checkout(dir.path(), "master").assert().success();

    write_file(FileSpec::new(dir.path().join("new.txt"), "mine".to_string()));

    run_bitlet_command(dir.path(), &["reset", &other_head])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("untracked file in the way"));

    assert_eq!(head_commit_id(dir.path()), master_head);
    assert_eq!(read_file(&dir.path().join("new.txt")), "mine");
}

#[rstest]
fn checkout_refuses_to_replace_a_directory_holding_untracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_bitlet_command(dir.path(), &["branch", "other"])
        .assert()
        .success();
    bitlet_checkout(dir.path(), "other").assert().success();
    commit_file(dir.path(), "a", "a file named a", "add a");
    bitlet_checkout(dir.path(), "master").assert().success();

    write_file(FileSpec::new(dir.path().join("a/mine.txt"), "mine".to_string()));

    bitlet_checkout(dir.path(), "other")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("untracked file in the way"));

    assert_eq!(read_file(&dir.path().join("a/mine.txt")), "mine");
    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("*master"));
}

#[rstest]
fn checkout_refuses_to_replace_an_untracked_file_with_a_directory(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_bitlet_command(dir.path(), &["branch", "other"])
        .assert()
        .success();
    bitlet_checkout(dir.path(), "other").assert().success();
    commit_file(dir.path(), "d/x.txt", "nested", "add d/x.txt");
    bitlet_checkout(dir.path(), "master").assert().success();
    assert!(!dir.path().join("d").exists());

    write_file(FileSpec::new(dir.path().join("d"), "mine".to_string()));

    bitlet_checkout(dir.path(), "other")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("untracked file in the way"));

    assert_eq!(read_file(&dir.path().join("d")), "mine");
}

#[rstest]
fn merge_refuses_to_replace_a_directory_holding_untracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_bitlet_command(dir.path(), &["branch", "other"])
        .assert()
        .success();
    commit_file(dir.path(), "master.txt", "master side", "master change");
    bitlet_checkout(dir.path(), "other").assert().success();
    commit_file(dir.path(), "a", "a file named a", "add a");
    bitlet_checkout(dir.path(), "master").assert().success();
    let master_head = head_commit_id(dir.path());

    write_file(FileSpec::new(dir.path().join("a/mine.txt"), "mine".to_string()));

    run_bitlet_command(dir.path(), &["merge", "other"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("untracked file in the way"));

    assert_eq!(head_commit_id(dir.path()), master_head);
    assert_eq!(read_file(&dir.path().join("a/mine.txt")), "mine");
}
