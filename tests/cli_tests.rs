//! Tests of the fullerene-clusters binary.
#![allow(deprecated)] // assert_cmd::Command::cargo_bin

mod common;

use std::io::Write;

use assert_cmd::Command;
use common::*;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("fullerene-clusters").unwrap()
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_lists_all_partitions() {
    cmd()
        .arg("partitions")
        .assert()
        .success()
        .stdout(predicate::str::contains("partition  0: 12\n"))
        .stdout(predicate::str::contains("partition  1: 11 1\n"))
        .stdout(predicate::str::contains("partition 76: 1 1 1 1 1 1 1 1 1 1 1 1\n"));
}

#[test]
fn test_partitions_as_json() {
    let output = cmd()
        .args(["partitions", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let list = parsed.as_array().unwrap();
    assert_eq!(list.len(), 77);
    assert_eq!(list[0]["parts"], serde_json::json!([12]));
}

#[test]
fn test_appearances_prints_matching_graph_numbers() {
    let input = stream(&[
        short_record(&isolated()),
        short_record(&triangle()),
        short_record(&isolated()),
    ]);
    cmd()
        .args(["appearances", "76"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("1 3\n")
        .stderr(predicate::str::contains("Looking for appearances of partition 76: 1 1 1"))
        .stderr(predicate::str::contains("Read 3 graphs."))
        .stderr(predicate::str::contains("Found 2 appearances of partition 76."));
}

#[test]
fn test_appearances_rejects_unknown_partition() {
    cmd()
        .args(["appearances", "77"])
        .write_stdin(stream(&[]))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no partition with number 77"));
}

#[test]
fn test_valid_clusters_counts() {
    let mut path = isolated();
    path[0] = vec![2];
    path[1] = vec![1, 3];
    path[2] = vec![2];
    let input = stream(&[
        short_record(&triangle()),
        short_record(&path),
        short_record(&isolated()),
        short_record(&triangle()),
    ]);
    cmd()
        .args(["valid-clusters", "--count"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("9,0,1,0,0: 2\n12,0,0,0,0: 1\n")
        .stderr(predicate::str::contains("Read 4 graphs."))
        .stderr(predicate::str::contains("Found 3 valid clusters."));
}

#[test]
fn test_valid_clusters_requires_twelve_vertices() {
    cmd()
        .arg("valid-clusters")
        .write_stdin(stream(&[short_record(&adjacency(3, &[(1, 2)]))]))
        .assert()
        .failure()
        .stderr(predicate::str::contains("only pentagonal adjacency graphs of fullerenes"));
}

#[test]
fn test_six_cluster_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&stream(&[
        short_record(&triangle()),
        short_record(&hexagon()),
        long_record(&hexagon()),
    ]))
    .unwrap();
    file.flush().unwrap();

    cmd()
        .arg("six-cluster")
        .arg("--input")
        .arg(file.path())
        .assert()
        .success()
        .stdout("2 3\n")
        .stderr(predicate::str::contains("Found 2 graphs with a 6-cluster."));
}

#[test]
fn test_six_cluster_json_report() {
    let output = cmd()
        .args(["six-cluster", "--format", "json"])
        .write_stdin(stream(&[short_record(&hexagon())]))
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["graphs_read"], 1);
    assert_eq!(parsed["matches"], serde_json::json!([1]));
}

#[test]
fn test_clusters_listing() {
    cmd()
        .arg("clusters")
        .write_stdin(stream(&[short_record(&twelve_cycle())]))
        .assert()
        .success()
        .stdout(predicate::str::contains("graph 1: 12 vertices"))
        .stdout(predicate::str::contains("partition 0: 12"))
        .stdout(predicate::str::contains(" invalid"));
}

#[test]
fn test_missing_header_fails() {
    cmd()
        .arg("six-cluster")
        .write_stdin(b"not planar code at all".to_vec())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no planar code header detected"));
}

#[test]
fn test_too_many_vertices_fails() {
    let mut input = stream(&[]);
    input.push(13);
    cmd()
        .arg("six-cluster")
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("vertex count 13 is outside 1..=12"));
}
