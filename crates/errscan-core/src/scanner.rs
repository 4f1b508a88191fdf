//! Error-line scanner for plain text logs.
//!
//! Provides a line-by-line state machine that counts lines carrying an `ERROR` or `ERR`
//! marker, extracts the message after the last `-`, and attaches the run of indented
//! lines that follows a trigger as its stack trace.
//!
//! `ERROR` is matched by plain containment. `ERR` only yields a record when it stands as
//! a word (`" ERR "`, a leading `"ERR "` or a trailing `" ERR"`); other lines that merely
//! contain `ERR` (e.g. `TERRIBLE`) are still counted but produce no record.

use std::fmt;

use tracing::{debug, trace};

/// Marker for full-length error lines
pub const ERROR_MARKER: &str = "ERROR";

/// Short marker, also matched as a plain substring when counting
pub const ERR_MARKER: &str = "ERR";

/// Header line placed between a message and its stack trace
const STACK_TRACE_HEADER: &str = "  Stack Trace:";

/// Indentation of each rendered stack trace line
const STACK_TRACE_INDENT: &str = "    ";

// ─────────────────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────────────────

/// Tag of a resolved error line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorLevel {
    /// Line contains `ERROR` anywhere
    Error,

    /// Line contains `ERR` as a space-delimited word
    Err,
}

impl ErrorLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorLevel::Error => ERROR_MARKER,
            ErrorLevel::Err => ERR_MARKER,
        }
    }
}

impl fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected error event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub level: ErrorLevel,

    /// Trimmed text after the last `-`, or the whole trimmed line
    pub message: String,

    /// Trimmed indented lines that followed the trigger, in order
    pub stack_trace: Vec<String>,
}

impl ErrorRecord {
    pub fn new(level: ErrorLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            stack_trace: Vec::new(),
        }
    }

    pub fn has_stack_trace(&self) -> bool {
        !self.stack_trace.is_empty()
    }
}

/// Renders as `LEVEL: message`, followed by the stack trace block when present
impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;

        if self.has_stack_trace() {
            write!(f, "\n{}", STACK_TRACE_HEADER)?;
            for line in &self.stack_trace {
                write!(f, "\n{}{}", STACK_TRACE_INDENT, line)?;
            }
        }

        Ok(())
    }
}

/// Outcome of scanning a full sequence of lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Number of lines containing `ERROR` or `ERR`
    pub total_errors: usize,

    /// Resolved records in file order
    pub records: Vec<ErrorRecord>,
}

impl ScanResult {
    /// Rendered records, in file order
    pub fn messages(&self) -> Vec<String> {
        self.records.iter().map(ToString::to_string).collect()
    }

    /// Candidate lines that were counted but produced no record
    pub fn unresolved(&self) -> usize {
        self.total_errors - self.records.len()
    }
}

/// How a single fed line was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// No error marker, nothing recorded
    Plain,

    /// Contains `ERR` but not as a word; counted only
    Unresolved,

    /// Counted and opened a new record
    Trigger(ErrorLevel),

    /// Indented continuation appended to the open record's stack trace
    TraceLine,
}

/// Scanner states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Looking for the next trigger line
    Scanning,

    /// A record is open and indented lines are appended to it
    CollectingTrace,
}

// ─────────────────────────────────────────────────────────────────────────────
// Scanner
// ─────────────────────────────────────────────────────────────────────────────

/// Line-by-line state machine scanner
#[derive(Debug)]
pub struct ErrorScanner {
    state: ScanState,

    /// Record whose stack trace is still being collected
    pending: Option<ErrorRecord>,

    total_errors: usize,

    records: Vec<ErrorRecord>,
}

impl ErrorScanner {
    /// Create a new scanner in Scanning state
    pub fn new() -> Self {
        Self {
            state: ScanState::Scanning,
            pending: None,
            total_errors: 0,
            records: Vec::new(),
        }
    }

    /// Feed the next line (without its line terminator)
    pub fn feed_line(&mut self, line: &str) -> LineKind {
        match self.state {
            ScanState::Scanning => self.handle_scanning(line),
            ScanState::CollectingTrace => self.handle_collecting_trace(line),
        }
    }

    /// Lines counted so far
    pub fn total_errors(&self) -> usize {
        self.total_errors
    }

    /// Close the open record, if any, and return the result
    pub fn finish(mut self) -> ScanResult {
        self.complete_pending();

        ScanResult {
            total_errors: self.total_errors,
            records: self.records,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // State Handlers
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_scanning(&mut self, line: &str) -> LineKind {
        if !is_candidate_line(line) {
            return LineKind::Plain;
        }

        self.total_errors += 1;

        let Some(level) = resolve_level(line) else {
            trace!("Counted unresolved ERR line: {:?}", line);
            return LineKind::Unresolved;
        };

        trace!("{} trigger: {:?}", level, line);
        self.pending = Some(ErrorRecord::new(level, extract_message(line)));
        self.state = ScanState::CollectingTrace;
        LineKind::Trigger(level)
    }

    fn handle_collecting_trace(&mut self, line: &str) -> LineKind {
        if is_indented_line(line) {
            if let Some(record) = self.pending.as_mut() {
                record.stack_trace.push(line.trim().to_string());
            }
            return LineKind::TraceLine;
        }

        // First flush-left line ends the trace and is evaluated fresh
        self.complete_pending();
        self.handle_scanning(line)
    }

    fn complete_pending(&mut self) {
        if let Some(record) = self.pending.take() {
            self.records.push(record);
        }
        self.state = ScanState::Scanning;
    }
}

impl Default for ErrorScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan a full sequence of lines in one pass
pub fn scan<I, S>(lines: I) -> ScanResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = ErrorScanner::new();
    for line in lines {
        scanner.feed_line(line.as_ref());
    }

    let result = scanner.finish();
    debug!(
        total_errors = result.total_errors,
        records = result.records.len(),
        "Scan complete"
    );
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Detection Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Check if a line contains `ERROR` or `ERR` anywhere
pub fn is_candidate_line(line: &str) -> bool {
    line.contains(ERROR_MARKER) || line.contains(ERR_MARKER)
}

/// Resolve the tag of a candidate line, or `None` if `ERR` is not word-bounded
pub fn resolve_level(line: &str) -> Option<ErrorLevel> {
    if line.contains(ERROR_MARKER) {
        Some(ErrorLevel::Error)
    } else if line.contains(" ERR ") || line.starts_with("ERR ") || line.ends_with(" ERR") {
        Some(ErrorLevel::Err)
    } else {
        None
    }
}

/// Trimmed text after the last `-`, or the whole trimmed line
pub fn extract_message(line: &str) -> String {
    match line.rfind('-') {
        Some(idx) => line[idx + 1..].trim().to_string(),
        None => line.trim().to_string(),
    }
}

/// Check if a line starts with a space or a tab
pub fn is_indented_line(line: &str) -> bool {
    line.starts_with(' ') || line.starts_with('\t')
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
