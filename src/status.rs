// status.rs - Exit status codes and error taxonomy

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Process exit status shared by both tools
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExitStatus {
    #[default]
    Ok,
    Error,
    InputError,
}

impl ExitStatus {
    /// Numeric process exit code
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Ok => 0,
            ExitStatus::Error => 1,
            ExitStatus::InputError => 2,
        }
    }

    pub fn is_ok(self) -> bool {
        self == ExitStatus::Ok
    }

    /// Keep the more severe of two statuses
    pub fn worst(self, other: ExitStatus) -> ExitStatus {
        self.max(other)
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExitStatus::Ok => "OK",
            ExitStatus::Error => "ERROR",
            ExitStatus::InputError => "INPUT_ERROR",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Error)]
pub enum FabricError {
    #[error("input path not found: {}", .path.display())]
    InputPathMissing { path: PathBuf },

    #[error("output file '{name}' already exists among the input files")]
    OutputAlreadyExists { name: String },

    #[error("output folder does not exist: {}", .path.display())]
    OutputPathError { path: PathBuf },

    #[error("failed to write '{}': {source}", .path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("chassis {chassis}: field '{field}' not found")]
    FieldLookupFailure { chassis: String, field: String },

    #[error("failed to parse '{}': {reason}", .path.display())]
    DocumentParse { path: PathBuf, reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl FabricError {
    /// Exit status a run reports when it ends on this error
    pub fn status(&self) -> ExitStatus {
        match self {
            FabricError::InputPathMissing { .. }
            | FabricError::OutputPathError { .. }
            | FabricError::Config(_) => ExitStatus::InputError,
            FabricError::OutputAlreadyExists { .. }
            | FabricError::FieldLookupFailure { .. }
            | FabricError::DocumentParse { .. } => ExitStatus::Error,
            FabricError::OutputWriteFailure { .. } => ExitStatus::Error,
        }
    }
}

pub type Result<T> = std::result::Result<T, FabricError>;
