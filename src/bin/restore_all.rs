// restore_all.rs - Generate a batch file restoring every chassis in a combined project

use fabric_tools::cli::{self, Config, RestoreArgs, RESTORE_FLAGS};
use fabric_tools::logging;
use fabric_tools::prelude::*;

fn main() {
    let status = match run_main() {
        Ok(status) => status,
        Err(e) => {
            eprintln!("❌ ERROR: {}", e);
            e.status()
        }
    };
    std::process::exit(status.code());
}

fn run_main() -> Result<ExitStatus, FabricError> {
    let mut args: RestoreArgs = cli::from_env(&RESTORE_FLAGS);

    if args.generate_config {
        println!("{}", Config::generate_sample());
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(ExitStatus::Ok);
    }

    let mut restore_cmd = None;
    if let Some(config_path) = args.config.clone() {
        let (merged, cmd) = args.with_config_file(&config_path)?;
        args = merged;
        restore_cmd = cmd;
    }

    let config = validate_restore(&args, restore_cmd)?;
    let log_path = logging::init(&config.log_config());

    log::info!("🚀 restore_all v{}", fabric_tools::VERSION);
    let status = restore_all(&config);
    log::info!("Exit status: {}", status);

    logging::finish(log_path.as_deref());
    Ok(status)
}
