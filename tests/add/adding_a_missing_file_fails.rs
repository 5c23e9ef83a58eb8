use crate::common::command::{bitlet_add, init_repository_dir};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case("missing.txt")]
#[case("nested/missing.txt")]
fn adding_a_missing_file_fails(init_repository_dir: TempDir, #[case] file: &str) {
    bitlet_add(init_repository_dir.path(), file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File does not exist."));
}
