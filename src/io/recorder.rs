//! Trace recorders.
//!
//! [`TraceWriter`] produces the primary output: one `tick job_id` line per
//! tick, `-1` for idle. [`VerboseDump`] is the optional human-readable
//! diagnostic stream; it never touches the primary output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{MlfqError, Result};
use crate::models::Trace;
use crate::scheduler::{TickSnapshot, TraceSink};

/// Writes the primary trace format.
#[derive(Debug)]
pub struct TraceWriter<W: Write> {
    out: W,
}

impl<W: Write> TraceWriter<W> {
    /// Wraps a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TraceWriter<BufWriter<File>> {
    /// Creates (or truncates) the output file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| MlfqError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TraceSink for TraceWriter<W> {
    fn record(&mut self, snapshot: &TickSnapshot<'_>) -> Result<()> {
        writeln!(self.out, "{}", snapshot.record)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Writes a finished trace in the primary format.
pub fn write_trace<W: Write>(trace: &Trace, mut out: W) -> Result<()> {
    for record in &trace.records {
        writeln!(out, "{record}")?;
    }
    out.flush()?;
    Ok(())
}

/// Mirrors each tick plus pending arrivals and the active queue.
///
/// ```text
/// tick 9: job 1
///     calendar: (12, 3) (15, 4)
///     level 0: [0, 2]
/// ```
#[derive(Debug)]
pub struct VerboseDump<W: Write> {
    out: W,
}

impl<W: Write> VerboseDump<W> {
    /// Wraps a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TraceSink for VerboseDump<W> {
    fn record(&mut self, snapshot: &TickSnapshot<'_>) -> Result<()> {
        let record = &snapshot.record;
        match record.job {
            Some(job) => writeln!(self.out, "tick {}: job {job}", record.tick)?,
            None => writeln!(self.out, "tick {}: idle", record.tick)?,
        }

        write!(self.out, "    calendar:")?;
        for event in snapshot.pending {
            write!(self.out, " ({}, {})", event.tick, event.job)?;
        }
        writeln!(self.out)?;

        let queue: Vec<String> = snapshot.active_queue.iter().map(ToString::to_string).collect();
        writeln!(self.out, "    {}: [{}]", snapshot.active, queue.join(", "))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, MlfqConfig};
    use crate::scheduler::Dispatcher;

    fn sample_jobs() -> Vec<Job> {
        vec![
            Job::new(0, "A").with_service(3),
            Job::new(1, "B").with_arrival(1).with_service(1),
        ]
    }

    #[test]
    fn test_trace_writer_format() {
        let mut writer = TraceWriter::new(Vec::new());
        Dispatcher::new(sample_jobs(), MlfqConfig::default())
            .unwrap()
            .run(&mut writer)
            .unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text, "0 0\n1 0\n2 0\n3 1\n4 -1\n");
    }

    #[test]
    fn test_write_trace_matches_streaming() {
        let trace = Dispatcher::new(sample_jobs(), MlfqConfig::default())
            .unwrap()
            .run_to_end();
        let mut buf = Vec::new();
        write_trace(&trace, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "0 0\n1 0\n2 0\n3 1\n4 -1\n");
    }

    #[test]
    fn test_verbose_dump_mirrors_queues() {
        let mut dump = VerboseDump::new(Vec::new());
        Dispatcher::new(sample_jobs(), MlfqConfig::default())
            .unwrap()
            .run(&mut dump)
            .unwrap();
        let text = String::from_utf8(dump.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "tick 0: job 0");
        assert_eq!(lines[1], "    calendar: (1, 1)");
        assert_eq!(lines[2], "    arrival: []");
        // Tick 1: B admitted while A keeps running.
        assert_eq!(lines[3], "tick 1: job 0");
        assert_eq!(lines[4], "    calendar:");
        assert_eq!(lines[5], "    arrival: [1]");
        assert!(text.ends_with("tick 4: idle\n    calendar:\n    arrival: []\n"));
    }

    #[test]
    fn test_tee_sinks() {
        let mut sinks = (TraceWriter::new(Vec::new()), VerboseDump::new(Vec::new()));
        Dispatcher::new(sample_jobs(), MlfqConfig::default())
            .unwrap()
            .run(&mut sinks)
            .unwrap();
        let (writer, dump) = sinks;
        assert_eq!(writer.into_inner().iter().filter(|&&b| b == b'\n').count(), 5);
        assert!(!dump.into_inner().is_empty());
    }
}
