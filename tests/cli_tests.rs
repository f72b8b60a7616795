//! End-to-end tests of the genome-strips binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::TempDir;

const DATASET: &str = r#"{
    "version": "1.0.0",
    "genomes": [
        {"name": "A", "taxon_id": 10090, "chromosomes": [
            {"name": "1", "length": 50000000}, {"name": "2", "length": 40000000}
        ]},
        {"name": "B", "index": "b.fa.fai"}
    ],
    "features": [
        {"id": "pax", "genome": "A", "chr": "1", "start": 10000, "end": 10999,
         "strand": "+", "symbol": "Pax6", "homology_group": "pax6"},
        {"id": "pax-b", "genome": "B", "chr": "1", "start": 100000, "end": 100999,
         "strand": "-", "homology_group": "pax6"}
    ],
    "synteny": [
        {"a_genome": "A", "a_chr": "1", "a_start": 1, "a_end": 1000000,
         "b_genome": "B", "b_chr": "1", "b_start": 1000001, "b_end": 2000000}
    ]
}"#;

fn dataset_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("dataset.json"), DATASET).unwrap();
    let mut fai = std::fs::File::create(dir.path().join("b.fa.fai")).unwrap();
    writeln!(fai, "1\t30000000\t3\t60\t61").unwrap();
    writeln!(fai, "X\t20000000\t30500003\t60\t61").unwrap();
    dir
}

fn cmd() -> Command {
    Command::cargo_bin("genome-strips").unwrap()
}

#[test]
fn test_genomes_text() {
    let dir = dataset_dir();
    cmd()
        .arg("genomes")
        .arg(dir.path().join("dataset.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Genomes (2)"))
        .stdout(predicate::str::contains("10090"));
}

#[test]
fn test_genomes_tsv_reads_index() {
    let dir = dataset_dir();
    cmd()
        .args(["--format", "tsv", "genomes"])
        .arg(dir.path().join("dataset.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("B\t\t2\t50000000"));
}

#[test]
fn test_genomes_write_inline() {
    let dir = dataset_dir();
    let inline = dir.path().join("inline.json");
    cmd()
        .arg("genomes")
        .arg(dir.path().join("dataset.json"))
        .arg("--write-inline")
        .arg(&inline)
        .assert()
        .success();

    // The written dataset no longer needs the index file
    std::fs::remove_file(dir.path().join("b.fa.fai")).unwrap();
    cmd()
        .args(["--format", "tsv", "genomes"])
        .arg(&inline)
        .assert()
        .success()
        .stdout(predicate::str::contains("B\t\t2\t50000000"));
}

#[test]
fn test_view_locked_zoom() {
    let dir = dataset_dir();
    cmd()
        .arg("view")
        .arg(dir.path().join("dataset.json"))
        .args(["--genomes", "A,B", "-e", "lock on", "-e", "zoom r1 0.5", "--regions-only"])
        .assert()
        .success()
        .stdout(
            "regions=A::1:2500001..7500000/1188|B::1:2500001..7500000/1188\n",
        );
}

#[test]
fn test_view_landmark_json() {
    let dir = dataset_dir();
    cmd()
        .args(["--format", "json", "view"])
        .arg(dir.path().join("dataset.json"))
        .args(["-e", "landmark Pax6 1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"landmark\""))
        .stdout(predicate::str::contains("\"start\": 9500"))
        // Minus-strand copy anchors on its end
        .stdout(predicate::str::contains("\"start\": 100499"));
}

#[test]
fn test_view_reference_script() {
    let dir = dataset_dir();
    let script = dir.path().join("session.txt");
    std::fs::write(
        &script,
        "# map a window of A into B\ngoto A 1:101..200\nreference A#0\n",
    )
    .unwrap();

    cmd()
        .arg("view")
        .arg(dir.path().join("dataset.json"))
        .arg("--script")
        .arg(&script)
        .arg("--regions-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("B::1:1000101..1000200/"));
}

#[test]
fn test_view_restore_tsv() {
    let dir = dataset_dir();
    cmd()
        .args(["--format", "tsv", "view"])
        .arg(dir.path().join("dataset.json"))
        .args(["-e", "restore regions=B::X:100..200/1,1:1..50/3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("genome\tid\tchr"))
        .stdout(predicate::str::contains("B\tr3\tX\t100\t200\tfalse"))
        .stdout(predicate::str::contains("A\t").not());
}

#[test]
fn test_view_unknown_command_fails() {
    let dir = dataset_dir();
    cmd()
        .arg("view")
        .arg(dir.path().join("dataset.json"))
        .args(["-e", "teleport r1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown command"));
}

#[test]
fn test_view_unknown_genome_fails() {
    let dir = dataset_dir();
    cmd()
        .arg("view")
        .arg(dir.path().join("dataset.json"))
        .args(["--genomes", "A,Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown genome: Z"));
}

#[test]
fn test_missing_dataset_fails() {
    cmd()
        .args(["genomes", "/nonexistent/dataset.json"])
        .assert()
        .failure();
}
