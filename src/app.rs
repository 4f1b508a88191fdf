//! Application layer - reads the log file and drives the scanner

use std::io::Write;
use std::path::Path;

use errscan_core::prelude::*;
use errscan_core::{scan, write_report, ScanResult};

/// Read a log file as UTF-8 and split it into lines
///
/// Leading whitespace is kept so indentation can still be detected.
pub fn read_log_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| Error::read(path, e))?;
    let content = String::from_utf8(bytes).map_err(|_| Error::decode(path))?;

    Ok(split_lines(&content))
}

/// Split on `\r\n`, `\n` or a lone `\r`, dropping the terminators
///
/// A trailing terminator does not produce an empty final line.
pub fn split_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = content;

    while !rest.is_empty() {
        let Some(idx) = rest.find(|c: char| c == '\r' || c == '\n') else {
            lines.push(rest.to_string());
            break;
        };

        lines.push(rest[..idx].to_string());
        let terminator = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[idx + terminator..];
    }

    lines
}

/// Read and scan a log file
pub fn scan_file(path: &Path) -> Result<ScanResult> {
    let lines = read_log_lines(path)?;
    debug!("Read {} lines from {}", lines.len(), path.display());

    let result = scan(&lines);
    info!(
        "Scanned {}: {} error lines, {} messages",
        path.display(),
        result.total_errors,
        result.records.len()
    );
    Ok(result)
}

/// Scan a log file and write the report to `out`
pub fn run<W: Write>(path: &Path, out: &mut W) -> Result<ScanResult> {
    let result = scan_file(path)?;
    write_report(out, &result).context("writing report")?;
    Ok(result)
}
