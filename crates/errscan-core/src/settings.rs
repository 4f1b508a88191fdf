//! Settings for the sample-log generator (TOML)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Default output file name for generated logs
pub const DEFAULT_OUTPUT: &str = "trading_application.log";

/// Generator settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneratorSettings {
    #[serde(default)]
    pub generator: GeneratorSection,

    #[serde(default)]
    pub weights: LevelWeights,
}

/// `[generator]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneratorSection {
    /// Number of log entries to write (the config dump takes one slot)
    #[serde(default = "default_lines")]
    pub lines: usize,

    /// Fixed RNG seed for reproducible output
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            lines: default_lines(),
            seed: None,
            output: default_output(),
        }
    }
}

fn default_lines() -> usize {
    1000
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

/// `[weights]` section: relative probability of each level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LevelWeights {
    pub info: u32,
    pub debug: u32,
    pub warn: u32,
    pub error: u32,
    pub err: u32,
}

impl Default for LevelWeights {
    fn default() -> Self {
        Self {
            info: 40,
            debug: 30,
            warn: 20,
            error: 7,
            err: 3,
        }
    }
}

impl LevelWeights {
    /// Weights in `GenLevel::ALL` order
    pub fn as_array(&self) -> [u32; 5] {
        [self.info, self.debug, self.warn, self.error, self.err]
    }

    pub fn validate(&self) -> Result<()> {
        if self.as_array().iter().all(|w| *w == 0) {
            return Err(Error::config_invalid("at least one level weight must be non-zero"));
        }
        Ok(())
    }
}

/// Load generator settings from a TOML file
///
/// Returns default settings if the file doesn't exist or can't be read or parsed.
pub fn load_settings(path: &Path) -> GeneratorSettings {
    if !path.exists() {
        debug!("No settings file at {:?}, using defaults", path);
        return GeneratorSettings::default();
    }

    match read_settings(path) {
        Ok(settings) => {
            debug!("Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            warn!("Ignoring settings file {:?}: {}", path, e);
            GeneratorSettings::default()
        }
    }
}

/// Read and parse a settings file, without falling back to defaults
pub fn read_settings(path: &Path) -> Result<GeneratorSettings> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read {:?}: {}", path, e)))?;
    Ok(toml::from_str(&content)?)
}

/// Write a commented default settings file, leaving an existing one untouched
pub fn init_settings_file(path: &Path) -> Result<()> {
    if path.exists() {
        debug!("Settings file {:?} already exists", path);
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::config(format!("Failed to create {:?}: {}", parent, e)))?;
    }

    let default_content = r#"# errscan-gen settings

[generator]
lines = 1000                          # Entries to write
# seed = 42                           # Uncomment for reproducible output
output = "trading_application.log"

[weights]                             # Relative level probabilities
info = 40
debug = 30
warn = 20
error = 7
err = 3
"#;
    std::fs::write(path, default_content)
        .map_err(|e| Error::config(format!("Failed to write {:?}: {}", path, e)))?;

    info!("Wrote default settings to {:?}", path);
    Ok(())
}
