//! errscan-gen - write a synthetic trading-application log for errscan

use std::path::PathBuf;

use clap::Parser;
use errscan::core::{generate_file, init_settings_file, load_settings, GeneratorSettings};

/// errscan-gen - write a synthetic trading-application log
#[derive(Parser, Debug)]
#[command(name = "errscan-gen", version)]
#[command(about = "Write a synthetic trading-application log for errscan", long_about = None)]
struct Args {
    /// TOML settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a default settings file and exit
    #[arg(long, value_name = "FILE", conflicts_with = "config")]
    init_config: Option<PathBuf>,

    /// Output log file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Number of entries to write
    #[arg(short = 'n', long)]
    lines: Option<usize>,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    /// Settings file (or defaults) with command-line overrides applied
    fn settings(&self) -> GeneratorSettings {
        let mut settings = self
            .config
            .as_deref()
            .map(load_settings)
            .unwrap_or_default();

        if let Some(output) = &self.output {
            settings.generator.output = output.clone();
        }
        if let Some(lines) = self.lines {
            settings.generator.lines = lines;
        }
        if self.seed.is_some() {
            settings.generator.seed = self.seed;
        }
        settings
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let _ = errscan::core::logging::init();

    let args = Args::parse();

    if let Some(path) = &args.init_config {
        init_settings_file(path)?;
        println!("Settings file: {}", path.display());
        return Ok(());
    }

    let settings = args.settings();
    let output = &settings.generator.output;
    let summary = generate_file(output, &settings, None)?;

    println!(
        "Wrote {} entries ({} ERROR/ERR, {} with stack traces) to {}",
        summary.entries(),
        summary.error_entries(),
        summary.with_stack_trace,
        output.display()
    );
    Ok(())
}
