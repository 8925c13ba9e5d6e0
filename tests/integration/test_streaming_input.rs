//! Integration tests for streaming input and output (stdin/stdout pipes).
//!
//! These tests spawn cat processes whose stdout is piped to rgremap.
//! The child processes are properly cleaned up when their stdout is consumed.
#![allow(clippy::zombie_processes)]

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::TempDir;

use crate::helpers::assertions::assert_rg_tag;
use crate::helpers::bam_generator::{
    create_minimal_header, create_read_group_records, read_bam, write_bam, write_mapping,
};

fn create_test_inputs(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let input = dir.join("input.bam");
    let mapping = dir.join("mapping.csv");

    let header = create_minimal_header("chr1", 10_000, &["lane1"]);
    let mut records = create_read_group_records("a", "lane1", 10);
    records.extend(create_read_group_records("b", "lane9", 2));
    write_bam(&input, &header, &records);
    write_mapping(&mapping, &[("lane1", "sampleA")]);

    (input, mapping)
}

/// Piped input must produce the same records as file input.
#[test]
fn test_rewrite_with_piped_input() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (input, mapping) = create_test_inputs(temp_dir.path());
    let output_from_file = temp_dir.path().join("output_file.bam");
    let output_from_pipe = temp_dir.path().join("output_pipe.bam");

    let status = Command::new(env!("CARGO_BIN_EXE_rgremap"))
        .args([
            "rewrite",
            "--input",
            input.to_str().unwrap(),
            "--output",
            output_from_file.to_str().unwrap(),
            "--csv",
            mapping.to_str().unwrap(),
        ])
        .status()
        .expect("Failed to run rewrite with file input");
    assert!(status.success(), "rewrite with file input failed");

    let cat_child = Command::new("cat")
        .arg(input.to_str().unwrap())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn cat");

    let status = Command::new(env!("CARGO_BIN_EXE_rgremap"))
        .args([
            "rewrite",
            "--output",
            output_from_pipe.to_str().unwrap(),
            "--csv",
            mapping.to_str().unwrap(),
        ])
        .stdin(cat_child.stdout.unwrap())
        .status()
        .expect("Failed to run rewrite with piped input");
    assert!(status.success(), "rewrite with piped input failed");

    assert_eq!(fs::read(&output_from_file).unwrap(), fs::read(&output_from_pipe).unwrap());
}

/// Output written to stdout must be a complete BAM.
#[test]
fn test_rewrite_to_stdout() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (input, mapping) = create_test_inputs(temp_dir.path());

    let output = Command::new(env!("CARGO_BIN_EXE_rgremap"))
        .args([
            "rewrite",
            "-i",
            input.to_str().unwrap(),
            "-o",
            "-",
            "-c",
            mapping.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to run rewrite to stdout");
    assert!(output.status.success(), "rewrite to stdout failed");

    let output_bam = temp_dir.path().join("stdout.bam");
    fs::write(&output_bam, &output.stdout).unwrap();

    let (_, records) = read_bam(&output_bam);
    assert_eq!(records.len(), 12);
    assert_rg_tag(&records[0], "sampleA");
    assert_rg_tag(&records[11], "Unrecognized");
}

/// Reading from `/dev/stdin` behaves like `-`.
#[test]
fn test_rewrite_with_dev_stdin_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (input, mapping) = create_test_inputs(temp_dir.path());
    let output_bam = temp_dir.path().join("output.bam");

    let cat_child = Command::new("cat")
        .arg(input.to_str().unwrap())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn cat");

    let status = Command::new(env!("CARGO_BIN_EXE_rgremap"))
        .args([
            "rewrite",
            "--input",
            "/dev/stdin",
            "--output",
            output_bam.to_str().unwrap(),
            "--csv",
            mapping.to_str().unwrap(),
            "--threads",
            "2",
        ])
        .stdin(cat_child.stdout.unwrap())
        .status()
        .expect("Failed to run rewrite with /dev/stdin");
    assert!(status.success(), "rewrite with /dev/stdin failed");

    let (_, records) = read_bam(&output_bam);
    assert_eq!(records.len(), 12);
}
