// lib.rs - fabric-tools library root

//! # fabric-tools - Combine fabric captures and script chassis restores
//!
//! Two command line tools share this library:
//!
//! - **combine** merges every `.json` capture or combine file in a folder into
//!   a single project file.
//! - **restore_all** reads a combined project and writes a batch file that runs
//!   the restore tool once per chassis.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use fabric_tools::prelude::*;
//! use std::path::PathBuf;
//!
//! let config = CombineConfig {
//!     input_dir: PathBuf::from("captures"),
//!     output_name: "combined.json".to_string(),
//!     description: String::new(),
//!     dry_run: false,
//!     log: LogConfig::new("combine"),
//! };
//! let outcome = combine(&config);
//! println!("{} chassis", outcome.project.chassis().len());
//! ```

pub mod batch;
pub mod cli;
pub mod combine;
pub mod logging;
pub mod output;
pub mod project;
pub mod status;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::batch::{build_command, generate, restore_all, CommandLine, RestoreConfig};
    pub use crate::cli::{validate_combine, validate_restore, CombineArgs, RestoreArgs};
    pub use crate::combine::{combine, combine_into, CombineConfig, CombineOutcome};
    pub use crate::logging::LogConfig;
    pub use crate::project::{AggregateRecord, ChassisEntry, JsonProject};
    pub use crate::status::{ExitStatus, FabricError};
}

// Re-export main types at the root level for convenience
pub use project::{AggregateRecord, JsonProject};
pub use status::{ExitStatus, FabricError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
