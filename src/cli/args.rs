// args.rs - Command line arguments definition

use argh::{EarlyExit, FromArgs};

use crate::status::ExitStatus;

#[derive(FromArgs, Debug, Default)]
/// combine - Merge every .json capture file in a folder into one project file
pub struct CombineArgs {
    /// folder containing the capture and combine files to merge
    #[argh(option, short = 'i')]
    pub input: Option<String>,

    /// name of the combined project file written into the input folder (.json is appended if missing)
    #[argh(option, short = 'o')]
    pub output: Option<String>,

    /// project description stored in the combined file
    #[argh(option)]
    pub description: Option<String>,

    /// suppress console output
    #[argh(switch)]
    pub sup: bool,

    /// folder for the log file (default: current folder)
    #[argh(option)]
    pub log: Option<String>,

    /// do not write a log file
    #[argh(switch)]
    pub nl: bool,

    /// also log debug detail (skipped files, per-chassis addresses)
    #[argh(switch, short = 'v')]
    pub verbose: bool,

    /// merge in memory and report, without writing the output file
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}

#[derive(FromArgs, Debug, Default)]
/// restore_all - Generate a batch file running the restore tool once per chassis in a project
pub struct RestoreArgs {
    /// user ID passed to every restore command
    #[argh(option)]
    pub id: Option<String>,

    /// password passed to every restore command
    #[argh(option)]
    pub pw: Option<String>,

    /// combined project file to read (.json is appended if missing)
    #[argh(option, short = 'i')]
    pub input: Option<String>,

    /// batch file to write (.bat is appended if missing)
    #[argh(option, short = 'o')]
    pub output: Option<String>,

    /// restore parameters forwarded verbatim to every command (-p)
    #[argh(option, short = 'p')]
    pub params: Option<String>,

    /// best practice parameters forwarded to every command (-fm)
    #[argh(option)]
    pub fm: Option<String>,

    /// suppress console output; also forwarded to every command
    #[argh(switch)]
    pub sup: bool,

    /// folder for the log file; also forwarded to every command
    #[argh(option)]
    pub log: Option<String>,

    /// do not write a log file; also forwarded to every command
    #[argh(switch)]
    pub nl: bool,

    /// also log debug detail (skipped files, per-chassis addresses)
    #[argh(switch, short = 'v')]
    pub verbose: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}

/// Flags a tool accepts in the single-dash long form (`-sup`), and the
/// options that consume the following argument as their value.
pub struct FlagSpec {
    pub legacy: &'static [&'static str],
    pub with_value: &'static [&'static str],
}

pub const COMBINE_FLAGS: FlagSpec = FlagSpec {
    legacy: &["sup", "log", "nl"],
    with_value: &["i", "input", "o", "output", "description", "log", "config"],
};

pub const RESTORE_FLAGS: FlagSpec = FlagSpec {
    legacy: &["id", "pw", "fm", "sup", "log", "nl"],
    with_value: &[
        "id", "pw", "i", "input", "o", "output", "p", "params", "fm", "log", "config",
    ],
};

/// Rewrite single-dash long flags (`-sup`) to the `--sup` form argh expects.
/// Option values are copied untouched, so `-p -nl` keeps `-nl` as the value.
pub fn normalize_legacy_flags(args: &[String], spec: &FlagSpec) -> Vec<String> {
    let mut normalized = Vec::with_capacity(args.len());
    let mut expect_value = false;

    for arg in args {
        if expect_value {
            normalized.push(arg.clone());
            expect_value = false;
            continue;
        }
        if arg == "--" {
            normalized.push(arg.clone());
            expect_value = false;
            continue;
        }

        let name = arg.trim_start_matches('-');
        let dashes = arg.len() - name.len();

        if dashes == 1 && spec.legacy.contains(&name) {
            normalized.push(format!("--{}", name));
        } else {
            normalized.push(arg.clone());
        }

        if (dashes == 1 || dashes == 2) && spec.with_value.contains(&name) {
            expect_value = true;
        }
    }

    normalized
}

/// Parse arguments (without the program name) for one tool
pub fn parse_args<T: FromArgs>(command: &str, args: &[String], spec: &FlagSpec) -> Result<T, EarlyExit> {
    let normalized = normalize_legacy_flags(args, spec);
    let refs: Vec<&str> = normalized.iter().map(String::as_str).collect();
    T::from_args(&[command], &refs)
}

/// Parse the process arguments, printing usage and exiting on `--help` or a parse error
pub fn from_env<T: FromArgs>(spec: &FlagSpec) -> T {
    let mut raw = std::env::args();
    let command = raw.next().unwrap_or_default();
    let command = std::path::Path::new(&command)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("fabric-tools")
        .to_string();
    let rest: Vec<String> = raw.collect();

    match parse_args(&command, &rest, spec) {
        Ok(args) => args,
        Err(early_exit) => match early_exit.status {
            Ok(()) => {
                println!("{}", early_exit.output);
                std::process::exit(ExitStatus::Ok.code());
            }
            Err(()) => {
                eprintln!("{}\nRun {} --help for more information.", early_exit.output, command);
                std::process::exit(ExitStatus::InputError.code());
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_rewrites_legacy_flags() {
        let raw = strings(&["-i", "captures", "-o", "combined", "-sup", "-log", "logs", "-nl"]);
        assert_eq!(
            normalize_legacy_flags(&raw, &COMBINE_FLAGS),
            strings(&["-i", "captures", "-o", "combined", "--sup", "--log", "logs", "--nl"])
        );
    }

    #[test]
    fn test_normalize_leaves_values_alone() {
        let raw = strings(&["-p", "-nl", "-id", "-sup", "-nl"]);
        assert_eq!(
            normalize_legacy_flags(&raw, &RESTORE_FLAGS),
            strings(&["-p", "-nl", "--id", "-sup", "--nl"])
        );
    }

    #[test]
    fn test_parse_combine_args() {
        let raw = strings(&["-i", "captures", "-o", "combined", "-sup", "--dry-run", "-v"]);
        let args: CombineArgs = parse_args("combine", &raw, &COMBINE_FLAGS).unwrap();
        assert!(args.verbose);
        assert_eq!(args.input.as_deref(), Some("captures"));
        assert_eq!(args.output.as_deref(), Some("combined"));
        assert!(args.sup);
        assert!(args.dry_run);
        assert!(!args.nl);
        assert!(args.log.is_none());
    }

    #[test]
    fn test_parse_restore_args() {
        let raw = strings(&[
            "-id", "admin", "-pw", "secret", "-i", "combined", "-o", "restore", "-p", "*",
            "-fm", "bp", "-log", "logs", "-nl",
        ]);
        let args: RestoreArgs = parse_args("restore_all", &raw, &RESTORE_FLAGS).unwrap();
        assert_eq!(args.id.as_deref(), Some("admin"));
        assert_eq!(args.pw.as_deref(), Some("secret"));
        assert_eq!(args.params.as_deref(), Some("*"));
        assert_eq!(args.fm.as_deref(), Some("bp"));
        assert_eq!(args.log.as_deref(), Some("logs"));
        assert!(args.nl);
        assert!(!args.sup);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let raw = strings(&["-i", "captures", "-bogus"]);
        let result: Result<CombineArgs, EarlyExit> = parse_args("combine", &raw, &COMBINE_FLAGS);
        let early_exit = result.unwrap_err();
        assert!(early_exit.status.is_err());
    }
}
