//! Job list loader.
//!
//! Input is a stream of whitespace-separated tokens, four per job:
//! `name priority arrival_time slots_requested`. Line breaks carry no
//! meaning; a job may span lines. Job ids follow input order.
//!
//! Any malformed token or trailing partial record fails the whole load.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::error::{MlfqError, Result};
use crate::models::Job;

const FIELDS_PER_RECORD: usize = 4;

/// Opens and parses a job file.
pub fn load_jobs(path: impl AsRef<Path>) -> Result<Vec<Job>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| MlfqError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let jobs = parse_jobs(BufReader::new(file))?;
    info!(path = %path.display(), jobs = jobs.len(), "job list loaded");
    Ok(jobs)
}

/// Parses a job list from any buffered reader.
pub fn parse_jobs<R: BufRead>(reader: R) -> Result<Vec<Job>> {
    let mut jobs = Vec::new();
    // (line number, token) of the record being assembled
    let mut pending: Vec<(usize, String)> = Vec::with_capacity(FIELDS_PER_RECORD);

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| match e.kind() {
            ErrorKind::InvalidData => MlfqError::Encoding { line: index + 1 },
            _ => MlfqError::Read(e),
        })?;
        for token in line.split_whitespace() {
            pending.push((index + 1, token.to_string()));
            if pending.len() == FIELDS_PER_RECORD {
                jobs.push(build_job(jobs.len(), &pending)?);
                pending.clear();
            }
        }
    }

    if let Some(&(line, _)) = pending.first() {
        return Err(MlfqError::TruncatedRecord {
            line,
            found: pending.len(),
        });
    }
    Ok(jobs)
}

fn build_job(id: usize, fields: &[(usize, String)]) -> Result<Job> {
    let (_, name) = &fields[0];
    Ok(Job::new(id, name.as_str())
        .with_priority_class(parse_field(&fields[1], "priority")?)
        .with_arrival(parse_field(&fields[2], "arrival_time")?)
        .with_service(parse_field(&fields[3], "slots_requested")?))
}

fn parse_field<T: FromStr>((line, value): &(usize, String), field: &'static str) -> Result<T> {
    value.parse().map_err(|_| MlfqError::Parse {
        line: *line,
        field,
        value: value.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Vec<Job>> {
        parse_jobs(input.as_bytes())
    }

    #[test]
    fn test_parse_records() {
        let jobs = parse("c00 0 0 5\nc01 1 3 20\n").unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(
            jobs[1],
            Job::new(1, "c01")
                .with_priority_class(1)
                .with_arrival(3)
                .with_service(20)
        );
    }

    #[test]
    fn test_whitespace_is_free_form() {
        let jobs = parse("  A 0\n0 5   B\t1 2\n\n 7").unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].service, 5);
        assert_eq!(jobs[1].name, "B");
        assert_eq!(jobs[1].service, 7);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n  \n").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_field() {
        let err = parse("A 0 0 5\nB 0 x 5\n").unwrap_err();
        match err {
            MlfqError::Parse { line, field, value } => {
                assert_eq!(line, 2);
                assert_eq!(field, "arrival_time");
                assert_eq!(value, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_values_rejected() {
        let err = parse("A -1 0 5").unwrap_err();
        assert!(matches!(err, MlfqError::Parse { field: "priority", .. }));
    }

    #[test]
    fn test_truncated_record() {
        let err = parse("A 0 0 5\nB 1\n").unwrap_err();
        match err {
            MlfqError::TruncatedRecord { line, found } => {
                assert_eq!(line, 2);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_utf8_is_input_error() {
        let bytes: &[u8] = b"A 0 0 5\nB\xff\xfe 1 1 2\n";
        let err = parse_jobs(bytes).unwrap_err();
        assert!(matches!(err, MlfqError::Encoding { line: 2 }));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_missing_file() {
        let err = load_jobs("/nonexistent/jobs.txt").unwrap_err();
        assert!(matches!(err, MlfqError::Io { .. }));
        assert!(!err.is_input_error());
    }
}
