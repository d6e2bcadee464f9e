//! File adapters around the simulation core.
//!
//! - **`loader`**: parses the whitespace-separated job list
//! - **`recorder`**: writes the tick trace and the optional verbose dump
//!
//! Neither adapter makes scheduling decisions.

mod loader;
mod recorder;

pub use loader::{load_jobs, parse_jobs};
pub use recorder::{write_trace, TraceWriter, VerboseDump};
