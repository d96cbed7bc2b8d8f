//! End-to-end runs of the datascrub binary

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn cleans_a_dirty_csv_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dirty.csv");
    let output = dir.path().join("clean.csv");

    let mut file = std::fs::File::create(&input).unwrap();
    writeln!(file, "Nombre ,Edad,Fecha Registro,Score").unwrap();
    writeln!(file, "Juan,25,2023-01-01,10.5").unwrap();
    writeln!(file, "Ana,30,2023-02-01,").unwrap();
    writeln!(file, "Juan,25,2023-01-01,10.5").unwrap();
    writeln!(file, " Pedro ,28,,5.0").unwrap();
    writeln!(file, "OutlierMan,1500,2023-05-01,9.0").unwrap();
    drop(file);

    Command::cargo_bin("datascrub")
        .unwrap()
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--report")
        .assert()
        .success()
        .stdout(predicate::str::contains("handle_garbage"));

    let cleaned = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        cleaned.lines().next(),
        Some("nombre,edad,fecha_registro,score")
    );
    // One duplicate row dropped; capping keeps the rest
    assert_eq!(cleaned.lines().count(), 5);
    // The 1500 outlier was winsorized away
    assert!(!cleaned.contains("1500"));
    // Cell whitespace trimmed, missing date filled by the mode
    assert!(cleaned.contains("Pedro,"));
    assert!(!cleaned.contains(" Pedro "));
}

#[test]
fn remove_method_drops_outlier_rows() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dirty.csv");
    let output = dir.path().join("clean.csv");

    let mut file = std::fs::File::create(&input).unwrap();
    writeln!(file, "name,value").unwrap();
    for v in [1, 2, 3, 4, 5] {
        writeln!(file, "row{},{}", v, v).unwrap();
    }
    writeln!(file, "spike,100").unwrap();
    drop(file);

    Command::cargo_bin("datascrub")
        .unwrap()
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--method", "remove"])
        .assert()
        .success();

    let cleaned = std::fs::read_to_string(&output).unwrap();
    assert_eq!(cleaned.lines().count(), 6);
    assert!(!cleaned.contains("spike"));
}

#[test]
fn rejects_unknown_outlier_method() {
    Command::cargo_bin("datascrub")
        .unwrap()
        .args(["whatever.csv", "--output", "out.csv"])
        .args(["--method", "drop_everything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("method"));
}

#[test]
fn rejects_unsupported_input_format() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("data.zzz");
    std::fs::write(&input, "not a table").unwrap();

    Command::cargo_bin("datascrub")
        .unwrap()
        .arg(&input)
        .args(["--output", "out.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported source"));
}
