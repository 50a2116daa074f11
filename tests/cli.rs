// E2E tests for the nefsort CLI
use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

mod common;
use common::setup_source;

#[test]
fn test_missing_source_fails() {
    let temp_dir = assert_fs::TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("nefsort").unwrap();
    cmd.arg(temp_dir.child("nope").path())
        .arg(temp_dir.child("target").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));

    temp_dir.child("target").assert(predicate::path::missing());
}

#[test]
fn test_missing_target_is_created() {
    let temp_dir = assert_fs::TempDir::new().unwrap();
    let source = setup_source(&temp_dir, &["notes.txt"]);
    let target = temp_dir.child("nested/target");

    let mut cmd = Command::cargo_bin("nefsort").unwrap();
    cmd.arg("--source")
        .arg(source.path())
        .arg("--target")
        .arg(target.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Creating it..."))
        .stdout(predicate::str::contains("Organize complete!"));

    target.assert(predicate::path::is_dir());
    source.child("notes.txt").assert("notes.txt");
}

#[test]
fn test_rejects_empty_extension_sets() {
    let temp_dir = assert_fs::TempDir::new().unwrap();
    let source = setup_source(&temp_dir, &[]);

    let mut cmd = Command::cargo_bin("nefsort").unwrap();
    cmd.arg(source.path())
        .arg(temp_dir.child("target").path())
        .arg("--raw-ext=")
        .arg("--preview-ext=")
        .assert()
        .failure()
        .stderr(predicate::str::contains("extension"));
}

#[cfg(unix)]
mod with_fake_exiftool {
    use super::*;
    use crate::common::{setup_fake_exiftool, setup_fake_stay_open_exiftool};

    #[test]
    fn test_raw_and_preview_move_together() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let exiftool = setup_fake_exiftool(&temp_dir, "2022:06:15 00:00:00");
        let source = setup_source(&temp_dir, &["IMG001.NEF", "IMG001.JPG", "OTHER.txt"]);
        let target = temp_dir.child("target");
        target.create_dir_all().unwrap();

        let mut cmd = Command::cargo_bin("nefsort").unwrap();
        cmd.arg(source.path())
            .arg(target.path())
            .arg("--exiftool")
            .arg(exiftool.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("1 groups moved (2 files)"));

        target.child("2022/2022-06-15/IMG001.NEF").assert("IMG001.NEF");
        target.child("2022/2022-06-15/IMG001.JPG").assert("IMG001.JPG");
        source.child("IMG001.NEF").assert(predicate::path::missing());
        source.child("IMG001.JPG").assert(predicate::path::missing());
        source.child("OTHER.txt").assert("OTHER.txt");
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let exiftool = setup_fake_exiftool(&temp_dir, "2022:06:15 00:00:00");
        let source = setup_source(&temp_dir, &["DSC_0042.NEF", "IMG001.MOV"]);
        let target = temp_dir.child("target");
        target.create_dir_all().unwrap();

        let mut cmd = Command::cargo_bin("nefsort").unwrap();
        cmd.arg(source.path())
            .arg(target.path())
            .arg("--exiftool")
            .arg(exiftool.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("1 files skipped"));

        source.child("DSC_0042.NEF").assert("DSC_0042.NEF");
        target.child("2022/2022-06-15/IMG001.MOV").assert("IMG001.MOV");
    }

    #[test]
    fn test_bad_date_leaves_file_in_place() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let exiftool = setup_fake_exiftool(&temp_dir, "2022-06-15 00:00:00");
        let source = setup_source(&temp_dir, &["IMG001.NEF"]);
        let target = temp_dir.child("target");
        target.create_dir_all().unwrap();

        let mut cmd = Command::cargo_bin("nefsort").unwrap();
        cmd.arg(source.path())
            .arg(target.path())
            .arg("--exiftool")
            .arg(exiftool.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("1 files failed"));

        source.child("IMG001.NEF").assert("IMG001.NEF");
        target.child("2022").assert(predicate::path::missing());
    }

    #[test]
    fn test_custom_raw_extensions() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let exiftool = setup_fake_exiftool(&temp_dir, "2023:01:15 10:30:00");
        let source = setup_source(&temp_dir, &["IMG001.CR3", "IMG001.NEF"]);
        let target = temp_dir.child("target");
        target.create_dir_all().unwrap();

        let mut cmd = Command::cargo_bin("nefsort").unwrap();
        cmd.arg(source.path())
            .arg(target.path())
            .arg("--exiftool")
            .arg(exiftool.path())
            .arg("--raw-ext")
            .arg("cr3")
            .assert()
            .success();

        target.child("2023/2023-01-15/IMG001.CR3").assert("IMG001.CR3");
        source.child("IMG001.NEF").assert("IMG001.NEF");
    }

    #[test]
    fn test_stay_open_uses_given_exiftool() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let exiftool = setup_fake_stay_open_exiftool(&temp_dir, "2022:06:15 00:00:00", 0);
        let source = setup_source(&temp_dir, &["IMG001.NEF", "IMG001.JPG"]);
        let target = temp_dir.child("target");
        target.create_dir_all().unwrap();

        let mut cmd = Command::cargo_bin("nefsort").unwrap();
        cmd.arg(source.path())
            .arg(target.path())
            .arg("--exiftool")
            .arg(exiftool.path())
            .arg("--stay-open")
            .env("PATH", "/usr/bin:/bin")
            .assert()
            .success()
            .stdout(predicate::str::contains("1 groups moved (2 files)"));

        target.child("2022/2022-06-15/IMG001.NEF").assert("IMG001.NEF");
        target.child("2022/2022-06-15/IMG001.JPG").assert("IMG001.JPG");
    }

    #[test]
    fn test_stay_open_restarts_after_exiftool_exits() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let exiftool = setup_fake_stay_open_exiftool(&temp_dir, "2022:06:15 00:00:00", 1);
        let source = setup_source(
            &temp_dir,
            &["IMG001.NEF", "IMG001_2.NEF", "IMG001_3.NEF"],
        );
        let target = temp_dir.child("target");
        target.create_dir_all().unwrap();

        let mut cmd = Command::cargo_bin("nefsort").unwrap();
        cmd.arg(source.path())
            .arg(target.path())
            .arg("--exiftool")
            .arg(exiftool.path())
            .arg("--stay-open")
            .assert()
            .success();

        target.child("2022/2022-06-15/IMG001.NEF").assert("IMG001.NEF");
        target.child("2022/2022-06-15/IMG001_3.NEF").assert("IMG001_3.NEF");
    }

    #[test]
    fn test_sorts_in_place_when_target_is_source() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let exiftool = setup_fake_exiftool(&temp_dir, "2022:06:15 00:00:00");
        let source = setup_source(&temp_dir, &["IMG001.NEF"]);

        let mut cmd = Command::cargo_bin("nefsort").unwrap();
        cmd.arg(source.path())
            .arg(source.path())
            .arg("--exiftool")
            .arg(exiftool.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("1 groups moved (1 files)"));

        source.child("2022/2022-06-15/IMG001.NEF").assert("IMG001.NEF");
    }
}
