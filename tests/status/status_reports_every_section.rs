use crate::common::command::{bitlet_add, init_repository_dir, run_bitlet_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn status_reports_every_section(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_bitlet_command(dir.path(), &["branch", "other-branch"])
        .assert()
        .success();

    // staged
    write_file(FileSpec::new(dir.path().join("staged.txt"), "staged".to_string()));
    bitlet_add(dir.path(), "staged.txt").assert().success();

    // staged, then edited
    write_file(FileSpec::new(dir.path().join("edited.txt"), "first".to_string()));
    bitlet_add(dir.path(), "edited.txt").assert().success();
    write_file(FileSpec::new(dir.path().join("edited.txt"), "second".to_string()));

    // staged, then deleted
    write_file(FileSpec::new(dir.path().join("gone.txt"), "gone".to_string()));
    bitlet_add(dir.path(), "gone.txt").assert().success();
    std::fs::remove_file(dir.path().join("gone.txt")).unwrap();

    // tracked, then edited and deleted without staging
    write_file(FileSpec::new(dir.path().join("wug.txt"), "changed".to_string()));
    std::fs::remove_file(dir.path().join("notwug.txt")).unwrap();

    write_file(FileSpec::new(dir.path().join("random.stuff"), "??".to_string()));

    let output = run_bitlet_command(dir.path(), &["status"]).output().unwrap();
    assert!(output.status.success());

    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "=== Branches ===\n\
         *master\n\
         other-branch\n\
         \n\
         === Staged Files ===\n\
         edited.txt\n\
         gone.txt\n\
         staged.txt\n\
         \n\
         === Removed Files ===\n\
         \n\
         === Modifications Not Staged For Commit ===\n\
         edited.txt (modified)\n\
         gone.txt (deleted)\n\
         notwug.txt (deleted)\n\
         wug.txt (modified)\n\
         \n\
         === Untracked Files ===\n\
         random.stuff\n\
         \n"
    );
}

#[rstest]
fn status_marks_the_checked_out_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_bitlet_command(dir.path(), &["branch", "alpha"])
        .assert()
        .success();
    run_bitlet_command(dir.path(), &["checkout", "alpha"])
        .assert()
        .success();

    let output = run_bitlet_command(dir.path(), &["status"]).output().unwrap();

    assert!(
        String::from_utf8(output.stdout)
            .unwrap()
            .starts_with("=== Branches ===\n*alpha\nmaster\n\n")
    );
}
