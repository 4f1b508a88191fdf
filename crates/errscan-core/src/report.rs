//! Plain-text report for a scan result

use std::io::{self, Write};

use crate::scanner::ScanResult;

const COUNTS_HEADER: &str = "===== Error Log Counts =====";
const MESSAGES_HEADER: &str = "===== Error Messages =====";

/// Write the counts block followed by every rendered message
pub fn write_report<W: Write>(out: &mut W, result: &ScanResult) -> io::Result<()> {
    writeln!(out, "{}", COUNTS_HEADER)?;
    writeln!(out, "Total ERROR logs: {}", result.total_errors)?;
    writeln!(out)?;
    writeln!(out, "{}", MESSAGES_HEADER)?;
    for record in &result.records {
        writeln!(out, "{}", record)?;
    }
    out.flush()
}

/// Render the report into a string
pub fn render_report(result: &ScanResult) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_report(&mut buf, result);
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan;
    use insta::assert_snapshot;

    #[test]
    fn test_report_with_stack_trace() {
        let result = scan([
            "INFO start",
            "ERROR - disk failure",
            "    at module.load",
            "    at main",
            "2024-05-01 [main] ERR db - timeout",
            "TERRIBLE",
        ]);

        assert_snapshot!(render_report(&result), @r"
        ===== Error Log Counts =====
        Total ERROR logs: 3

        ===== Error Messages =====
        ERROR: disk failure
          Stack Trace:
            at module.load
            at main
        ERR: timeout
        ");
    }

    #[test]
    fn test_report_empty_scan() {
        let report = render_report(&ScanResult::default());
        assert_eq!(
            report,
            "===== Error Log Counts =====\nTotal ERROR logs: 0\n\n===== Error Messages =====\n"
        );
    }

    #[test]
    fn test_write_report_propagates_io_errors() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = write_report(&mut Broken, &ScanResult::default()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
