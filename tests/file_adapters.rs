//! End-to-end runs through the file loader and trace writer.

use std::fs;
use std::io::Write;

use tempfile::{tempdir, NamedTempFile};

use u_mlfq::io::{load_jobs, write_trace, TraceWriter};
use u_mlfq::models::{MlfqConfig, Tick};
use u_mlfq::scheduler::{Dispatcher, SimulationKpi};
use u_mlfq::workload::{write_jobs, WorkloadSpec};
use u_mlfq::MlfqError;

fn job_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn run_file(input: &std::path::Path, output: &std::path::Path) -> u_mlfq::Result<()> {
    let mut writer = TraceWriter::create(output)?;
    let jobs = load_jobs(input)?;
    Dispatcher::new(jobs, MlfqConfig::default())?.run(&mut writer)?;
    Ok(())
}

#[test]
fn test_trace_file_for_mixed_workload() {
    // A runs its first 8 ticks, B (arrived at 1) takes the arrival queue,
    // then A resumes from level 0.
    let input = job_file("A 0 0 10\nB 1 1 2\n");
    let dir = tempdir().unwrap();
    let output = dir.path().join("trace.txt");

    run_file(input.path(), &output).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    let ids: Vec<&str> = text
        .lines()
        .map(|line| line.split_once(' ').unwrap().1)
        .collect();
    let mut expected = vec!["0"; 8];
    expected.extend(["1", "1", "0", "0", "-1"]);
    assert_eq!(ids, expected);
    assert!(text.starts_with("0 0\n"));
    assert!(text.ends_with("12 -1\n"));
}

#[test]
fn test_records_may_span_lines() {
    let input = job_file("A 0\n0 3 B\n1 0\n1\n");
    let jobs = load_jobs(input.path()).unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[1].name, "B");
    assert_eq!(jobs[1].priority_class, 1);
    assert_eq!(jobs[1].service, 1);
}

#[test]
fn test_missing_input_file() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.txt");
    let err = load_jobs(&missing).unwrap_err();
    match err {
        MlfqError::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_unwritable_output_path() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("no-such-dir").join("trace.txt");
    let err = TraceWriter::create(&output).unwrap_err();
    assert!(matches!(err, MlfqError::Io { .. }));
}

#[test]
fn test_malformed_file_is_input_error() {
    let input = job_file("A 0 0 5\nB zero 1 2\n");
    let err = load_jobs(input.path()).unwrap_err();
    assert!(err.is_input_error());
    assert!(matches!(err, MlfqError::Parse { line: 2, field: "priority", .. }));
}

#[test]
fn test_truncated_file_is_input_error() {
    let input = job_file("A 0 0 5\nB 1 1\n");
    let err = load_jobs(input.path()).unwrap_err();
    assert!(matches!(err, MlfqError::TruncatedRecord { line: 2, found: 3 }));
}

#[test]
fn test_non_utf8_file_is_input_error() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"A 0 0 5\n\xc3\x28 0 1 2\n").unwrap();
    let err = load_jobs(file.path()).unwrap_err();
    assert!(matches!(err, MlfqError::Encoding { line: 2 }));
    assert!(err.is_input_error());
}

#[test]
fn test_unknown_priority_class_rejected() {
    let input = job_file("A 5 0 5\n");
    let jobs = load_jobs(input.path()).unwrap();
    let err = Dispatcher::new(jobs, MlfqConfig::default()).unwrap_err();
    assert!(matches!(err, MlfqError::Invalid(_)));
    assert!(err.is_input_error());
}

#[test]
fn test_empty_file_produces_single_idle_tick() {
    let input = job_file("");
    let dir = tempdir().unwrap();
    let output = dir.path().join("trace.txt");

    run_file(input.path(), &output).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), "0 -1\n");
}

#[test]
fn test_generated_workload_round_trip() {
    let jobs = WorkloadSpec::default().generate(11);
    let dir = tempdir().unwrap();
    let input = dir.path().join("jobs.txt");
    write_jobs(&jobs, fs::File::create(&input).unwrap()).unwrap();

    let loaded = load_jobs(&input).unwrap();
    assert_eq!(loaded, jobs);

    let trace = Dispatcher::new(loaded, MlfqConfig::default())
        .unwrap()
        .run_to_end();
    let kpi = SimulationKpi::calculate(&jobs, &trace);
    assert_eq!(kpi.completed_jobs, jobs.len());
    assert_eq!(
        trace.busy_ticks() as Tick,
        jobs.iter().map(|j| j.service).sum::<Tick>()
    );

    let output = dir.path().join("trace.txt");
    write_trace(&trace, fs::File::create(&output).unwrap()).unwrap();
    let lines = fs::read_to_string(&output).unwrap().lines().count();
    assert_eq!(lines, trace.len());
}
