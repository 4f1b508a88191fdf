//! errscan Library
//!
//! Thin application layer behind the `errscan` and `errscan-gen` binaries.
//! Scanning, reporting and generation live in `errscan-core`.

// Module declarations
pub mod app;

pub use errscan_core as core;

// Re-export main entry points
pub use app::{read_log_lines, run, scan_file, split_lines};
