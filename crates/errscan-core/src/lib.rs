//! # errscan-core - Log Error Scanning
//!
//! Scans plain text logs for `ERROR` / `ERR` lines, collects their messages and
//! indented stack traces, and renders the two-block text report. Also ships the
//! synthetic trading-log generator used to produce sample input.
//!
//! ## Public API
//!
//! ### Scanning (`scanner`)
//! - [`scan()`] - Pure single-pass scan over a sequence of lines
//! - [`ErrorScanner`] - Line-by-line state machine behind [`scan()`]
//! - [`ScanResult`], [`ErrorRecord`], [`ErrorLevel`], [`LineKind`]
//!
//! ### Reporting (`report`)
//! - [`write_report()`] - Write the counts and messages blocks to any writer
//!
//! ### Sample Logs (`generator`, `settings`)
//! - [`LogGenerator`] - Weighted random trading-log writer
//! - [`GeneratorSettings`] - TOML settings with defaults
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum covering file access and configuration
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! ```rust
//! use errscan_core::prelude::*;
//! ```

pub mod error;
pub mod generator;
pub mod logging;
pub mod prelude;
pub mod report;
pub mod scanner;
pub mod settings;

pub use error::{Error, Result, ResultExt};
pub use generator::{generate_file, GenLevel, GenerationSummary, LogGenerator, TIMESTAMP_FORMAT};
pub use report::{render_report, write_report};
pub use scanner::{
    extract_message, is_candidate_line, is_indented_line, resolve_level, scan, ErrorLevel,
    ErrorRecord, ErrorScanner, LineKind, ScanResult,
};
pub use settings::{
    init_settings_file, load_settings, read_settings, GeneratorSection, GeneratorSettings, LevelWeights,
};
