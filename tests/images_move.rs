use assert_fs::prelude::*;
use std::time::Duration;

use taskmate::TaskError;
use taskmate::relocate::RetryPolicy;
use taskmate::tasks::images::move_images;

fn exts() -> Vec<String> {
    vec!["jpg".into(), "jpeg".into(), "png".into()]
}

#[test]
fn moves_only_images_and_counts_by_kind() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("camera");
    src.create_dir_all().unwrap();
    src.child("one.JPG").write_str("1").unwrap();
    src.child("two.jpeg").write_str("2").unwrap();
    src.child("three.png").write_str("3").unwrap();
    src.child("readme.txt").write_str("keep").unwrap();
    let dest = temp.child("Images");

    let report = move_images(
        src.path(),
        dest.path(),
        &exts(),
        &RetryPolicy::new(3, Duration::ZERO),
    )
    .unwrap();

    assert_eq!(report.found, 3);
    assert_eq!(report.jpg_count, 2);
    assert_eq!(report.png_count, 1);
    assert_eq!(report.moved_count(), 3);
    assert!(report.failed.is_empty());
    assert!(!report.interrupted);

    dest.child("one.JPG").assert("1");
    dest.child("three.png").assert("3");
    src.child("readme.txt").assert("keep");
    assert!(!src.child("one.JPG").path().exists());
}

#[test]
fn name_clash_in_destination_is_suffixed() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("in");
    src.create_dir_all().unwrap();
    src.child("cat.png").write_str("new").unwrap();
    let dest = temp.child("out");
    dest.create_dir_all().unwrap();
    dest.child("cat.png").write_str("old").unwrap();

    let report = move_images(
        src.path(),
        dest.path(),
        &exts(),
        &RetryPolicy::new(1, Duration::ZERO),
    )
    .unwrap();

    assert_eq!(report.moved[0].1, dest.path().join("cat_1.png"));
    dest.child("cat.png").assert("old");
    dest.child("cat_1.png").assert("new");
}

#[test]
fn empty_folder_reports_nothing_found() {
    let temp = assert_fs::TempDir::new().unwrap();
    let report = move_images(
        temp.path(),
        &temp.path().join("out"),
        &exts(),
        &RetryPolicy::default(),
    )
    .unwrap();
    assert_eq!(report.found, 0);
    assert!(report.failure_lines().is_empty());
}

#[test]
fn missing_source_folder_is_typed() {
    let temp = assert_fs::TempDir::new().unwrap();
    let err = move_images(
        &temp.path().join("missing"),
        &temp.path().join("out"),
        &exts(),
        &RetryPolicy::default(),
    )
    .unwrap_err();
    let typed = err.downcast_ref::<TaskError>().expect("TaskError");
    assert_eq!(typed.code(), 10);
}
