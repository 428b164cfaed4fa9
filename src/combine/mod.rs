// mod.rs - Merge every capture document in a folder into one project

use std::fs;
use std::path::{Path, PathBuf};

use crate::logging::LogConfig;
use crate::output::write_project;
use crate::project::{read_document, AggregateRecord, JsonProject};
use crate::status::{ExitStatus, FabricError, Result};

/// Settings for one combine run
#[derive(Debug, Clone)]
pub struct CombineConfig {
    pub input_dir: PathBuf,
    /// Output file name, already carrying its `.json` extension
    pub output_name: String,
    pub description: String,
    pub dry_run: bool,
    pub log: LogConfig,
}

/// Files found in the input folder, each list sorted by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    pub json_files: Vec<String>,
    pub skipped: Vec<String>,
}

/// What a run did, alongside the project it built
#[derive(Debug, Clone, Default)]
pub struct CombineReport {
    pub status: ExitStatus,
    pub merged: Vec<String>,
    pub failed: Vec<String>,
    pub output_path: Option<PathBuf>,
}

#[derive(Debug)]
pub struct CombineOutcome {
    pub project: JsonProject,
    pub report: CombineReport,
}

/// True for names ending in `.json`, ignoring case
pub fn is_json_file(name: &str) -> bool {
    name.to_lowercase().ends_with(".json")
}

/// List the files in `dir`, split into `.json` inputs and everything else.
///
/// Symlinks are followed. Entries resolving to anything other than a regular
/// file are left out, except dangling links: those stay in the manifest so a
/// link named like the output still counts as a collision.
pub fn scan_manifest(dir: &Path) -> Result<Manifest> {
    let entries = fs::read_dir(dir).map_err(|_| FabricError::InputPathMissing {
        path: dir.to_path_buf(),
    })?;

    let mut manifest = Manifest::default();
    for entry in entries.flatten() {
        match fs::metadata(entry.path()) {
            Ok(metadata) if !metadata.is_file() => continue,
            _ => {}
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_json_file(&name) {
            manifest.json_files.push(name);
        } else {
            manifest.skipped.push(name);
        }
    }
    manifest.json_files.sort();
    manifest.skipped.sort();
    Ok(manifest)
}

/// Fold every `.json` file of the input folder into `project` and write the result.
///
/// A missing input folder ends the run with `InputError`. An output name that
/// collides with an input file sets the project error flag and ends the run
/// before anything is read or written. Unreadable documents are skipped and
/// recorded as errors while the remaining files are still merged.
pub fn combine_into(project: &mut dyn AggregateRecord, config: &CombineConfig) -> CombineReport {
    let mut report = CombineReport::default();

    log::info!("📂 Scanning {}", config.input_dir.display());
    let manifest = match scan_manifest(&config.input_dir) {
        Ok(manifest) => manifest,
        Err(e) => {
            project.set_error(&e.to_string());
            report.status = e.status();
            return report;
        }
    };

    for name in &manifest.skipped {
        log::debug!("Skipping {} (not a .json file)", name);
    }

    if manifest.json_files.iter().any(|name| *name == config.output_name) {
        let e = FabricError::OutputAlreadyExists {
            name: config.output_name.clone(),
        };
        project.set_error(&format!("{}. Nothing was combined.", e));
        report.status = e.status();
        return report;
    }

    if manifest.json_files.is_empty() {
        project.set_warning(&format!(
            "No .json files found in {}",
            config.input_dir.display()
        ));
    }

    let total = manifest.json_files.len();
    for (i, name) in manifest.json_files.iter().enumerate() {
        log::info!("Processing file {}/{}: {}", i + 1, total, name);
        match read_document(&config.input_dir.join(name)) {
            Ok(document) => {
                project.merge_into(name, document);
                report.merged.push(name.clone());
            }
            Err(e) => {
                project.set_error(&e.to_string());
                report.status = report.status.worst(e.status());
                report.failed.push(name.clone());
            }
        }
    }

    let chassis_count = project.chassis().len();
    log::info!(
        "📊 Merged {} of {} files ({} failed, {} non-JSON skipped), {} chassis",
        report.merged.len(),
        total,
        report.failed.len(),
        manifest.skipped.len(),
        chassis_count
    );

    if config.dry_run {
        log::info!("✅ Dry run completed, {} not written", config.output_name);
        return report;
    }

    let output_path = config.input_dir.join(&config.output_name);
    match write_project(&output_path, &project.serialize()) {
        Ok(()) => {
            log::info!("✅ Combined project written to: {}", output_path.display());
            report.output_path = Some(output_path);
        }
        Err(e) => {
            // Any failure to write the combined file ends the run as ERROR
            project.set_error(&e.to_string());
            report.status = report.status.worst(ExitStatus::Error);
        }
    }

    report
}

/// Combine into a fresh project named after the output file
pub fn combine(config: &CombineConfig) -> CombineOutcome {
    let name = Path::new(&config.output_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(&config.output_name);
    let mut project = JsonProject::new(name, &config.description);
    let report = combine_into(&mut project, config);
    CombineOutcome { project, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_for(dir: &Path, output_name: &str) -> CombineConfig {
        CombineConfig {
            input_dir: dir.to_path_buf(),
            output_name: output_name.to_string(),
            description: String::new(),
            dry_run: false,
            log: LogConfig::new("combine"),
        }
    }

    #[test]
    fn test_is_json_file() {
        assert!(is_json_file("a.json"));
        assert!(is_json_file("DATA.JSON"));
        assert!(!is_json_file("notes.txt"));
        assert!(!is_json_file("json"));
        assert!(!is_json_file("a.json.bak"));
    }

    #[test]
    fn test_scan_manifest_filters_and_sorts() {
        let td = TempDir::new().unwrap();
        fs::write(td.path().join("b.json"), "{}").unwrap();
        fs::write(td.path().join("DATA.JSON"), "{}").unwrap();
        fs::write(td.path().join("notes.txt"), "hello").unwrap();
        fs::create_dir(td.path().join("nested.json")).unwrap();

        let manifest = scan_manifest(td.path()).unwrap();
        assert_eq!(manifest.json_files, vec!["DATA.JSON", "b.json"]);
        assert_eq!(manifest.skipped, vec!["notes.txt"]);
    }

    #[test]
    fn test_non_json_files_are_never_read() {
        let td = TempDir::new().unwrap();
        fs::write(td.path().join("a.json"), r#"{"zones": ["z1"]}"#).unwrap();
        // Would fail to parse if it were read
        fs::write(td.path().join("notes.txt"), "not json at all").unwrap();

        let outcome = combine(&config_for(td.path(), "combined.json"));
        assert_eq!(outcome.report.status, ExitStatus::Ok);
        assert_eq!(outcome.report.merged, vec!["a.json"]);
        assert!(!outcome.project.has_error());
    }

    #[test]
    fn test_output_collision_aborts_before_write() {
        let td = TempDir::new().unwrap();
        fs::write(td.path().join("a.json"), r#"{"zones": ["z1"]}"#).unwrap();
        fs::write(td.path().join("combined.json"), r#"{"old": true}"#).unwrap();

        let outcome = combine(&config_for(td.path(), "combined.json"));
        assert_eq!(outcome.report.status, ExitStatus::Error);
        assert!(outcome.project.has_error());
        assert!(outcome.report.merged.is_empty());
        assert!(outcome.report.output_path.is_none());

        let untouched = fs::read_to_string(td.path().join("combined.json")).unwrap();
        assert_eq!(untouched, r#"{"old": true}"#);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_output_counts_as_collision() {
        let td = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let precious = elsewhere.path().join("precious.json");
        fs::write(&precious, r#"{"keep": true}"#).unwrap();
        fs::write(td.path().join("a.json"), r#"{"zones": ["z1"]}"#).unwrap();
        std::os::unix::fs::symlink(&precious, td.path().join("combined.json")).unwrap();

        let outcome = combine(&config_for(td.path(), "combined.json"));
        assert_eq!(outcome.report.status, ExitStatus::Error);
        assert!(outcome.project.has_error());
        assert!(outcome.report.output_path.is_none());
        assert_eq!(fs::read_to_string(&precious).unwrap(), r#"{"keep": true}"#);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_capture_is_merged() {
        let td = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let capture = elsewhere.path().join("capture.json");
        fs::write(&capture, r#"{"zones": ["z1"]}"#).unwrap();
        std::os::unix::fs::symlink(&capture, td.path().join("a.json")).unwrap();
        std::os::unix::fs::symlink(elsewhere.path(), td.path().join("linked_dir.json")).unwrap();

        let manifest = scan_manifest(td.path()).unwrap();
        assert_eq!(manifest.json_files, vec!["a.json"]);

        let outcome = combine(&config_for(td.path(), "combined.json"));
        assert_eq!(outcome.report.status, ExitStatus::Ok);
        assert_eq!(outcome.report.merged, vec!["a.json"]);
        assert_eq!(outcome.project.data()["zones"], serde_json::json!(["z1"]));
    }

    #[cfg(unix)]
    #[test]
    fn test_vanished_capture_is_an_error_not_an_input_error() {
        let td = TempDir::new().unwrap();
        fs::write(td.path().join("a.json"), r#"{"zones": ["z1"]}"#).unwrap();
        std::os::unix::fs::symlink(td.path().join("gone.json"), td.path().join("b.json")).unwrap();

        let outcome = combine(&config_for(td.path(), "combined.json"));
        assert_eq!(outcome.report.status, ExitStatus::Error);
        assert_eq!(outcome.report.merged, vec!["a.json"]);
        assert_eq!(outcome.report.failed, vec!["b.json"]);
    }

    #[test]
    fn test_output_in_missing_subfolder_is_an_error() {
        let td = TempDir::new().unwrap();
        fs::write(td.path().join("a.json"), r#"{"zones": ["z1"]}"#).unwrap();

        let outcome = combine(&config_for(td.path(), "sub/combined.json"));
        assert_eq!(outcome.report.status, ExitStatus::Error);
        assert!(outcome.project.has_error());
        assert!(outcome.report.output_path.is_none());
    }

    #[test]
    fn test_missing_input_folder() {
        let td = TempDir::new().unwrap();
        let outcome = combine(&config_for(&td.path().join("missing"), "combined.json"));
        assert_eq!(outcome.report.status, ExitStatus::InputError);
        assert!(outcome.project.has_error());
    }

    #[test]
    fn test_bad_document_is_skipped() {
        let td = TempDir::new().unwrap();
        fs::write(td.path().join("a.json"), r#"{"zones": ["z1"]}"#).unwrap();
        fs::write(td.path().join("b.json"), "{ broken").unwrap();

        let outcome = combine(&config_for(td.path(), "combined.json"));
        assert_eq!(outcome.report.status, ExitStatus::Error);
        assert_eq!(outcome.report.merged, vec!["a.json"]);
        assert_eq!(outcome.report.failed, vec!["b.json"]);

        let written = crate::project::load_project(&td.path().join("combined.json")).unwrap();
        assert!(written.has_error());
        assert_eq!(written.data()["zones"], serde_json::json!(["z1"]));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let td = TempDir::new().unwrap();
        fs::write(td.path().join("a.json"), r#"{"zones": ["z1"]}"#).unwrap();

        let mut config = config_for(td.path(), "combined.json");
        config.dry_run = true;
        let outcome = combine(&config);

        assert_eq!(outcome.report.status, ExitStatus::Ok);
        assert_eq!(outcome.report.merged, vec!["a.json"]);
        assert!(!td.path().join("combined.json").exists());
    }

    #[test]
    fn test_empty_folder_writes_empty_project() {
        let td = TempDir::new().unwrap();
        let outcome = combine(&config_for(td.path(), "combined.json"));

        assert_eq!(outcome.report.status, ExitStatus::Ok);
        assert!(outcome.project.has_warning());
        assert!(td.path().join("combined.json").is_file());
        assert_eq!(outcome.project.name(), "combined");
    }
}
