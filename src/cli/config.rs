// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::status::FabricError;

/// Settings either tool may read from a TOML file.
/// Command line arguments take precedence over every value here.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub input: Option<String>,
    pub output: Option<String>,
    pub description: Option<String>,

    // Logging
    pub log_folder: Option<String>,
    pub suppress: Option<bool>,
    pub no_log: Option<bool>,
    pub verbose: Option<bool>,

    // Restore script generation
    pub user_id: Option<String>,
    pub password: Option<String>,
    pub params: Option<String>,
    pub fm_params: Option<String>,
    pub restore_cmd: Option<String>,

    // Flags
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FabricError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            FabricError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            FabricError::Config(format!("Failed to parse config file '{}': {}", path.display(), e))
        })?;

        log::info!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# fabric-tools.toml - Configuration file for combine and restore_all
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# combine: folder holding the capture files
# restore_all: combined project file (.json is appended if missing)
input = "captures"

# combine: project file name written into the input folder
# restore_all: batch file to write (.bat is appended if missing)
output = "combined"

# combine: description stored in the project
# description = "Production fabrics"

# =============================================================================
# LOGGING
# =============================================================================

# Folder for the log file (default: current folder)
# log_folder = "logs"

# Suppress console output
suppress = false

# Do not write a log file
no_log = false

# Also log debug detail
verbose = false

# =============================================================================
# RESTORE SCRIPT (restore_all only)
# =============================================================================

# Credentials copied into every generated command
# user_id = "admin"
# password = "password"

# Restore parameters (-p), forwarded verbatim
params = "*"

# Best practice parameters (-fm), forwarded verbatim
# fm_params = "bp"

# Program invoked by every generated line
restore_cmd = "py restore.py"

# =============================================================================
# FLAGS
# =============================================================================

# combine: merge and report without writing the output file
dry_run = false
"#
        .to_string()
    }
}
