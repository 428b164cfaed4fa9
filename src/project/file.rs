// file.rs - Reading capture documents and project files from disk

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use super::json::JsonProject;
use crate::status::{FabricError, Result};

/// Read one JSON document whose top level must be an object
pub fn read_document(path: &Path) -> Result<Map<String, Value>> {
    let content = fs::read_to_string(path).map_err(|e| FabricError::DocumentParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(FabricError::DocumentParse {
            path: path.to_path_buf(),
            reason: "top level is not a JSON object".to_string(),
        }),
        Err(e) => Err(FabricError::DocumentParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

/// Load a project file written by the combine tool.
/// The parent folder and the file itself must exist.
pub fn load_project(path: &Path) -> Result<JsonProject> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(FabricError::InputPathMissing {
                path: parent.to_path_buf(),
            });
        }
    }
    if !path.is_file() {
        return Err(FabricError::InputPathMissing {
            path: path.to_path_buf(),
        });
    }

    let document = read_document(path)?;
    Ok(JsonProject::from_document(document))
}
