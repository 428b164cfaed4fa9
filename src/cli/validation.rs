// validation.rs - Turn parsed arguments into run configurations

use log::LevelFilter;
use std::path::PathBuf;

use crate::batch::{RestoreConfig, DEFAULT_RESTORE_CMD};
use crate::cli::{CombineArgs, RestoreArgs};
use crate::combine::CombineConfig;
use crate::logging::LogConfig;
use crate::status::FabricError;

/// Append `ext` (e.g. ".json") unless `name` already ends with it, ignoring case
pub fn ensure_extension(name: &str, ext: &str) -> String {
    if name.to_lowercase().ends_with(&ext.to_lowercase()) {
        name.to_string()
    } else {
        format!("{}{}", name, ext)
    }
}

/// Build the logging options shared by both tools
pub fn log_config(
    tool: &str,
    folder: Option<&str>,
    suppress: bool,
    no_log: bool,
    verbose: bool,
) -> LogConfig {
    LogConfig {
        folder: folder.map(PathBuf::from),
        suppress,
        no_log,
        level: if verbose { LevelFilter::Debug } else { LevelFilter::Info },
        ..LogConfig::new(tool)
    }
}

fn required<'a>(value: &'a Option<String>, flag: &str) -> Result<&'a str, FabricError> {
    value
        .as_deref()
        .ok_or_else(|| FabricError::Config(format!("{} is required", flag)))
}

/// Validate combine arguments
pub fn validate_combine(args: &CombineArgs) -> Result<CombineConfig, FabricError> {
    let input = required(&args.input, "-i")?;
    let output = required(&args.output, "-o")?;

    Ok(CombineConfig {
        input_dir: PathBuf::from(input),
        output_name: ensure_extension(output, ".json"),
        description: args.description.clone().unwrap_or_default(),
        dry_run: args.dry_run,
        log: log_config(
            "combine",
            args.log.as_deref(),
            args.sup,
            args.nl,
            args.verbose,
        ),
    })
}

/// Validate restore_all arguments
pub fn validate_restore(
    args: &RestoreArgs,
    restore_cmd: Option<String>,
) -> Result<RestoreConfig, FabricError> {
    let user_id = required(&args.id, "-id")?;
    let password = required(&args.pw, "-pw")?;
    let input = required(&args.input, "-i")?;
    let output = required(&args.output, "-o")?;
    let params = required(&args.params, "-p")?;

    Ok(RestoreConfig {
        user_id: user_id.to_string(),
        password: password.to_string(),
        input_ref: input.to_string(),
        project_file: PathBuf::from(ensure_extension(input, ".json")),
        output_file: PathBuf::from(ensure_extension(output, ".bat")),
        params: params.to_string(),
        fm_params: args.fm.clone(),
        log_folder: args.log.clone(),
        suppress: args.sup,
        no_log: args.nl,
        verbose: args.verbose,
        restore_cmd: restore_cmd.unwrap_or_else(|| DEFAULT_RESTORE_CMD.to_string()),
    })
}
