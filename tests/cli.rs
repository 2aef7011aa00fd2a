use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_owned()
}

fn path(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_str().unwrap().to_owned()
}

fn seqsmith(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_seqsmith"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

const LOW_QUALITY: &str = "@low\nACGT\n+\n!!!!\n@high\nACGT\n+\nIIII\n";

#[test]
fn non_numeric_bounds_fail_without_output() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "reads.fastq", LOW_QUALITY);
    let output = path(&dir, "out.fastq");

    for bounds in ["low,high", "abc", "1,2,3"] {
        let res = seqsmith(&["filter-fastq", &input, "-o", &output, "--gc-bounds", bounds]);
        assert!(!res.status.success(), "{bounds} was accepted");
        assert!(!Path::new(&output).exists());
    }
}

#[test]
fn flags_override_config_file() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "reads.fastq", LOW_QUALITY);
    let config = write(&dir, "filter.yaml", "quality_threshold: 30\ngc_bounds: 10\n");

    let from_config = path(&dir, "config.fastq");
    let res = seqsmith(&["filter-fastq", &input, "-o", &from_config, "-c", &config, "--gc-bounds", "100"]);
    assert!(res.status.success());
    assert_eq!(fs::read_to_string(&from_config).unwrap(), "@high\nACGT\n+high\nIIII\n");

    let overridden = path(&dir, "overridden.fastq");
    let res = seqsmith(&[
        "filter-fastq",
        &input,
        "-o",
        &overridden,
        "-c",
        &config,
        "-q",
        "0",
        "--gc-bounds",
        "0,100",
    ]);
    assert!(res.status.success());
    let out = fs::read_to_string(&overridden).unwrap();
    assert!(out.starts_with("@low\nACGT\n+low\n!!!!\n"));
    assert_eq!(out.lines().count(), 8);
}

#[test]
fn existing_destination_exits_with_failure() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "seqs.fasta", ">x\nAC\n");
    let existing = write(&dir, "existing.fasta", "already exists");

    let res = seqsmith(&["merge-fasta", &input, "-o", &existing]);
    assert!(!res.status.success());
    assert!(String::from_utf8_lossy(&res.stderr).contains("error:"));
    assert_eq!(fs::read_to_string(&existing).unwrap(), "already exists");
}

#[test]
fn merge_fasta_keeps_sequence_before_first_header() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "seqs.fasta", "ACGT\n>x\nAC\n");

    let res = seqsmith(&["merge-fasta", &input]);
    assert!(res.status.success());
    assert_eq!(
        fs::read_to_string(path(&dir, "seqs_one_line.fasta")).unwrap(),
        "ACGT\n>x\nAC\n"
    );
}
