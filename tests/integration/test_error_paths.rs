//! Error path integration tests.
//!
//! These tests verify that fatal conditions stop the run with a non-zero exit status and a
//! message naming the failing file.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

use crate::helpers::bam_generator::{
    create_minimal_header, create_read_group_records, write_bam, write_mapping,
};

fn rewrite(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_rgremap"))
        .arg("rewrite")
        .args(args)
        .output()
        .expect("Failed to run rewrite command")
}

#[test]
fn test_missing_mapping_file_reported() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.bam");
    write_bam(&input, &create_minimal_header("chr1", 1_000, &[]), &[]);

    let output = rewrite(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        temp_dir.path().join("out.bam").to_str().unwrap(),
        "-c",
        "/nonexistent/mapping.csv",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Mapping file"), "unexpected stderr: {stderr}");
}

#[test]
fn test_input_that_is_not_bam_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.bam");
    let mapping = temp_dir.path().join("mapping.csv");
    fs::write(&input, "this is not a BAM file").unwrap();
    write_mapping(&mapping, &[("lane1", "sampleA")]);

    let output = rewrite(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        temp_dir.path().join("out.bam").to_str().unwrap(),
        "-c",
        mapping.to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to open input BAM"), "unexpected stderr: {stderr}");
}

#[test]
fn test_unwritable_output_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.bam");
    let mapping = temp_dir.path().join("mapping.csv");
    write_bam(
        &input,
        &create_minimal_header("chr1", 1_000, &[]),
        &create_read_group_records("a", "lane1", 2),
    );
    write_mapping(&mapping, &[("lane1", "sampleA")]);

    let output = rewrite(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        "/nonexistent/dir/out.bam",
        "-c",
        mapping.to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to open output BAM"), "unexpected stderr: {stderr}");
}

#[test]
fn test_missing_input_file_fails_validation() {
    let temp_dir = TempDir::new().unwrap();
    let mapping = temp_dir.path().join("mapping.csv");
    write_mapping(&mapping, &[("lane1", "sampleA")]);

    let output = rewrite(&[
        "-i",
        "/nonexistent/input.bam",
        "-o",
        temp_dir.path().join("out.bam").to_str().unwrap(),
        "-c",
        mapping.to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Input BAM"), "unexpected stderr: {stderr}");
}

#[test]
fn test_unknown_subcommand_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_rgremap"))
        .arg("nonsense")
        .output()
        .expect("Failed to run rgremap");
    assert!(!output.status.success());
}
