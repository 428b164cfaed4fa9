// mod.rs - Restore script generation: one restore command per chassis

use serde_json::Value;
use std::fmt;
use std::net::Ipv4Addr;
use std::path::PathBuf;

use crate::cli::validation::log_config;
use crate::logging::LogConfig;
use crate::output::write_script;
use crate::project::{load_project, AggregateRecord, ChassisEntry, MGMT_IP_PATH};
use crate::status::{ExitStatus, FabricError};

/// Program every generated line invokes unless configured otherwise
pub const DEFAULT_RESTORE_CMD: &str = "py restore.py";

/// Written in place of an unknown management IP address
pub const SENTINEL_IP: &str = "xxx.xxx.xxx.xxx";

/// Settings for one restore_all run
#[derive(Debug, Clone)]
pub struct RestoreConfig {
    pub user_id: String,
    pub password: String,
    /// Project file reference exactly as given on the command line
    pub input_ref: String,
    /// Project file to load, with its `.json` extension
    pub project_file: PathBuf,
    /// Batch file to write, with its `.bat` extension
    pub output_file: PathBuf,
    pub params: String,
    pub fm_params: Option<String>,
    pub log_folder: Option<String>,
    pub suppress: bool,
    pub no_log: bool,
    /// Debug detail in this tool's own log; not forwarded
    pub verbose: bool,
    pub restore_cmd: String,
}

impl RestoreConfig {
    /// Logging options for this tool's own log
    pub fn log_config(&self) -> LogConfig {
        log_config(
            "restore_all",
            self.log_folder.as_deref(),
            self.suppress,
            self.no_log,
            self.verbose,
        )
    }
}

/// One invocation of the restore program. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    pub fn render(&self) -> String {
        self.tokens.join(" ")
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Result of reading a chassis management IP
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpLookup {
    Found(String),
    /// The field exists but holds no address
    Empty,
    /// The field path does not exist
    Missing,
}

/// Read the management IP. The field may hold a string or a list of strings;
/// the first non-empty string wins.
pub fn management_ip(entry: &ChassisEntry<'_>) -> IpLookup {
    let first = match entry.lookup(MGMT_IP_PATH) {
        None => return IpLookup::Missing,
        Some(Value::String(s)) => Some(s.trim()),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .find(|s| !s.is_empty()),
        Some(_) => None,
    };

    match first {
        Some(ip) if !ip.is_empty() => IpLookup::Found(ip.to_string()),
        _ => IpLookup::Empty,
    }
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value)
}

fn quote_if_needed(value: &str) -> String {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        quoted(value)
    } else {
        value.to_string()
    }
}

/// Compose the restore command for one chassis
pub fn build_command(config: &RestoreConfig, chassis_key: &str, ip: &str) -> CommandLine {
    let mut tokens = vec![
        config.restore_cmd.clone(),
        "-ip".to_string(),
        ip.to_string(),
        "-id".to_string(),
        quote_if_needed(&config.user_id),
        "-pw".to_string(),
        quote_if_needed(&config.password),
        "-i".to_string(),
        quote_if_needed(&config.input_ref),
        "-p".to_string(),
        quoted(&config.params),
        "-wwn".to_string(),
        quote_if_needed(chassis_key),
    ];

    if let Some(fm) = &config.fm_params {
        tokens.push("-fm".to_string());
        tokens.push(quoted(fm));
    }
    if let Some(folder) = &config.log_folder {
        tokens.push("-log".to_string());
        tokens.push(quote_if_needed(folder));
    }
    if config.suppress {
        tokens.push("-sup".to_string());
    }
    if config.no_log {
        tokens.push("-nl".to_string());
    }

    CommandLine { tokens }
}

#[derive(Debug, Clone, Default)]
pub struct GenerateOutcome {
    pub lines: Vec<CommandLine>,
    pub status: ExitStatus,
}

/// Build one command per chassis entry. A chassis without the management IP
/// field still gets a line (with the sentinel IP) and marks the run as failed.
pub fn generate(project: &dyn AggregateRecord, config: &RestoreConfig) -> GenerateOutcome {
    let mut outcome = GenerateOutcome::default();

    for entry in project.chassis() {
        let ip = match management_ip(&entry) {
            IpLookup::Found(ip) => {
                if ip.parse::<Ipv4Addr>().is_err() {
                    log::warn!("Chassis {}: '{}' is not an IPv4 address", entry.key(), ip);
                }
                ip
            }
            IpLookup::Empty => {
                log::warn!(
                    "Chassis {}: no management IP address, using {}",
                    entry.key(),
                    SENTINEL_IP
                );
                SENTINEL_IP.to_string()
            }
            IpLookup::Missing => {
                let e = FabricError::FieldLookupFailure {
                    chassis: entry.key().to_string(),
                    field: MGMT_IP_PATH.to_string(),
                };
                log::error!("{}", e);
                outcome.status = outcome.status.worst(e.status());
                SENTINEL_IP.to_string()
            }
        };

        log::debug!("Chassis {} -> {}", entry.key(), ip);
        outcome.lines.push(build_command(config, entry.key(), &ip));
    }

    outcome
}

/// Load the project, generate the restore commands and write the batch file
pub fn restore_all(config: &RestoreConfig) -> ExitStatus {
    let project = match load_project(&config.project_file) {
        Ok(project) => project,
        Err(e) => {
            log::error!("{}", e);
            return ExitStatus::InputError;
        }
    };
    log::info!(
        "📂 Loaded project '{}' from {}",
        project.name(),
        config.project_file.display()
    );

    let outcome = generate(&project, config);
    if outcome.lines.is_empty() {
        log::warn!("No chassis found in {}", config.project_file.display());
    }

    let rendered: Vec<String> = outcome.lines.iter().map(CommandLine::render).collect();
    if let Err(e) = write_script(&config.output_file, &rendered) {
        log::error!("{}", e);
        return ExitStatus::InputError;
    }

    log::info!(
        "✅ {} restore commands written to: {}",
        rendered.len(),
        config.output_file.display()
    );
    outcome.status
}
