use crate::common::command::{repository_dir, run_bitlet_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn init_creates_the_initial_commit(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_bitlet_command(dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Initialized empty Bitlet repository in",
        ))
        .stdout(predicate::str::contains(".bitlet"));

    assert!(dir.path().join(".bitlet").is_dir());

    run_bitlet_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^===\ncommit [0-9a-f]{40}\nDate: Thu Jan 1 00:00:00 1970 \+0000\ninitial commit\n\n$",
        )?);

    run_bitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("=== Branches ===\n*master\n\n"));

    Ok(())
}

#[rstest]
fn init_accepts_a_repository_path(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    let nested = dir.path().join("nested").join("project");

    run_bitlet_command(dir.path(), &["init", &nested.to_string_lossy()])
        .assert()
        .success();

    assert!(nested.join(".bitlet").is_dir());
    assert!(!dir.path().join(".bitlet").exists());

    Ok(())
}

#[rstest]
fn every_repository_starts_from_the_same_initial_commit(
    #[from(repository_dir)] first: TempDir,
    #[from(repository_dir)] second: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    for dir in [&first, &second] {
        run_bitlet_command(dir.path(), &["init"]).assert().success();
    }

    let first_log = run_bitlet_command(first.path(), &["log"]).output()?;
    let second_log = run_bitlet_command(second.path(), &["log"]).output()?;

    pretty_assertions::assert_eq!(
        String::from_utf8(first_log.stdout)?,
        String::from_utf8(second_log.stdout)?
    );

    Ok(())
}
