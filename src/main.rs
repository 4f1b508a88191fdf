//! errscan - count ERROR/ERR lines in a log file and show their messages
//!
//! This is the binary entry point. All logic lives in the library.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;

/// errscan - count ERROR/ERR lines in a log file and show their messages
#[derive(Parser, Debug)]
#[command(name = "errscan", version)]
#[command(about = "Count ERROR/ERR log lines and collect their stack traces", long_about = None)]
struct Args {
    /// Log file to scan (exactly one)
    #[arg(value_name = "LOGFILE", allow_hyphen_values = true)]
    logfiles: Vec<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // File logging is optional; the report goes to stdout either way
    let _ = errscan::core::logging::init();

    let args = Args::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let [path] = args.logfiles.as_slice() else {
        tracing::debug!("Expected one log file, got {}", args.logfiles.len());
        writeln!(out, "Usage: {} <logfile>", program_name())?;
        return Ok(());
    };

    match errscan::run(path, &mut out) {
        Ok(_) => Ok(()),
        Err(e) if e.is_file_access() => {
            tracing::warn!("Could not process {}: {}", path.display(), e);
            writeln!(out, "Error processing log file: {}", e)?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Name the binary was invoked as
fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|arg| Path::new(arg).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "errscan".to_string())
}
