// mod.rs - Output writers for project files and restore scripts

use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::status::{FabricError, Result};

/// The output folder must already exist; it is never created here
fn check_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(FabricError::OutputPathError {
                path: parent.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Write text to a file, replacing any previous content
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    check_parent_dir(path)?;

    let write_failure = |source: std::io::Error| FabricError::OutputWriteFailure {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_failure)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes()).map_err(write_failure)?;
    writer.flush().map_err(write_failure)?;
    Ok(())
}

/// Write a serialized project as pretty-printed JSON
pub fn write_project(path: &Path, document: &Value) -> Result<()> {
    let mut content = serde_json::to_string_pretty(document).map_err(|e| {
        FabricError::OutputWriteFailure {
            path: path.to_path_buf(),
            source: e.into(),
        }
    })?;
    content.push('\n');
    write_text(path, &content)
}

/// Render script lines: newline separated, newline terminated.
/// No lines renders as an empty file.
pub fn render_script<S: AsRef<str>>(lines: &[S]) -> String {
    let mut content = String::new();
    for line in lines {
        content.push_str(line.as_ref());
        content.push('\n');
    }
    content
}

/// Write a batch script with one command per line
pub fn write_script<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    write_text(path, &render_script(lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_render_script_trailing_newline() {
        assert_eq!(render_script(&["a", "b"]), "a\nb\n");
        assert_eq!(render_script::<&str>(&[]), "");
    }

    #[test]
    fn test_write_script_missing_folder() {
        let td = TempDir::new().unwrap();
        let path = td.path().join("missing").join("restore.bat");

        match write_script(&path, &["line"]) {
            Err(FabricError::OutputPathError { path: p }) => assert_eq!(p, td.path().join("missing")),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_write_project_pretty_json() {
        let td = TempDir::new().unwrap();
        let path = td.path().join("combined.json");
        write_project(&path, &json!({"switches": [{"wwn": "10:00:00"}]})).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("}\n"));
        let reparsed: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(reparsed["switches"][0]["wwn"], json!("10:00:00"));
    }

    #[test]
    fn test_write_into_directory_path_fails() {
        let td = TempDir::new().unwrap();
        assert!(matches!(
            write_text(td.path(), "x"),
            Err(FabricError::OutputWriteFailure { .. })
        ));
    }
}
