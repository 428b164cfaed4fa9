// logging.rs - Log sink for the `log` facade: timestamped file plus console echo

use chrono::{DateTime, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Logging options shared by both tools (`-log`, `-sup`, `-nl`)
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Tool name used in the log file name
    pub tool: String,
    /// Folder for the log file; current directory when unset
    pub folder: Option<PathBuf>,
    /// Do not echo to the console
    pub suppress: bool,
    /// Do not write a log file
    pub no_log: bool,
    pub level: LevelFilter,
}

impl LogConfig {
    pub fn new(tool: &str) -> Self {
        Self {
            tool: tool.to_string(),
            folder: None,
            suppress: false,
            no_log: false,
            level: LevelFilter::Info,
        }
    }
}

/// Log file name for a run started at `started`
pub fn log_file_name(tool: &str, started: DateTime<Utc>) -> String {
    format!("Log_{}_{}.txt", tool, started.format("%Y_%m_%d_%H_%M_%S"))
}

pub struct FileLogger {
    file: Option<Mutex<File>>,
    echo: bool,
    level: LevelFilter,
}

impl FileLogger {
    /// Build the logger, creating the log folder and file when file logging is on.
    /// Returns the logger and the path of the log file, if any.
    pub fn new(config: &LogConfig) -> Result<(Self, Option<PathBuf>), String> {
        let mut path = None;
        let file = if config.no_log {
            None
        } else {
            let folder = config
                .folder
                .clone()
                .unwrap_or_else(|| PathBuf::from("."));
            create_dir_all(&folder).map_err(|e| {
                format!("Failed to create log folder '{}': {}", folder.display(), e)
            })?;
            let log_path = folder.join(log_file_name(&config.tool, Utc::now()));
            let f = File::create(&log_path).map_err(|e| {
                format!("Failed to create log file '{}': {}", log_path.display(), e)
            })?;
            path = Some(log_path);
            Some(Mutex::new(f))
        };

        Ok((
            Self {
                file,
                echo: !config.suppress,
                level: config.level,
            },
            path,
        ))
    }

    /// Console-only logger, used when the log file cannot be created
    pub fn console(config: &LogConfig) -> Self {
        Self {
            file: None,
            echo: !config.suppress,
            level: config.level,
        }
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = writeln!(
                    f,
                    "{} {:<5} {}",
                    Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
                    record.level(),
                    record.args()
                );
            }
        }

        if self.echo {
            match record.level() {
                Level::Error | Level::Warn => eprintln!("{}", record.args()),
                _ => println!("{}", record.args()),
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = f.flush();
            }
        }
    }
}

/// Install the process-wide logger. Call once from `main`.
/// Returns the log file path when one was created.
pub fn init(config: &LogConfig) -> Option<PathBuf> {
    let (logger, path) = match FileLogger::new(config) {
        Ok(built) => built,
        Err(e) => {
            eprintln!("⚠️  {} - logging to console only", e);
            (FileLogger::console(config), None)
        }
    };

    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(config.level);
    }
    path
}

/// Flush the installed logger before the process exits
pub fn finish(log_path: Option<&Path>) {
    if let Some(path) = log_path {
        log::debug!("Log file: {}", path.display());
    }
    log::logger().flush();
}
