// main.rs - combine CLI entry point

use fabric_tools::cli::{self, CombineArgs, Config, COMBINE_FLAGS};
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
    let mut args: CombineArgs = cli::from_env(&COMBINE_FLAGS);

    // Handle generate config first
    if args.generate_config {
        println!("{}", Config::generate_sample());
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(ExitStatus::Ok);
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    let config = validate_combine(&args)?;
    let log_path = logging::init(&config.log);

    log::info!("🚀 combine v{}", fabric_tools::VERSION);
    let outcome = combine(&config);
    log::info!("Exit status: {}", outcome.report.status);

    logging::finish(log_path.as_deref());
    Ok(outcome.report.status)
}
