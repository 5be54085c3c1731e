//! Target layout document.
//!
//! Handles loading and saving the JSON file that describes where each
//! monitor should sit:
//!
//! ```json
//! { "Monitors": [ { "DeviceId": "...", "X": 0, "Y": 0, "Orientation": 0 } ] }
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{
    AppError, Geometry, MonitorIdentity, Result, Rotation, TargetEntry, TargetMap,
};

/// Default document location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Serialize, Deserialize)]
struct LayoutDocument {
    #[serde(rename = "Monitors")]
    monitors: Vec<MonitorEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct MonitorEntry {
    #[serde(rename = "DeviceId")]
    device_id: String,
    #[serde(rename = "X")]
    x: i32,
    #[serde(rename = "Y")]
    y: i32,
    #[serde(rename = "Orientation")]
    orientation: Rotation,
}

/// Loads the target layout from `path`.
///
/// Entries with a blank `DeviceId` are skipped with a warning.
///
/// # Errors
/// Returns error if the file is missing or malformed, declares the same
/// monitor twice, or has no usable entries.
pub fn load_targets(path: &Path) -> Result<TargetMap> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::ConfigNotFound {
            path: path.to_path_buf(),
        },
        _ => AppError::io(format!("Failed to read config file: {}", path.display()), e),
    })?;

    let document: LayoutDocument =
        serde_json::from_str(&content).map_err(|e| AppError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
            source: Some(e),
        })?;

    let entries = document.monitors.into_iter().filter_map(|entry| {
        let identity = MonitorIdentity::new(entry.device_id);
        if identity.is_blank() {
            tracing::warn!(path = %path.display(), "Skipping monitor entry with empty DeviceId");
            return None;
        }
        Some(TargetEntry {
            identity,
            geometry: Geometry::new(entry.x, entry.y, entry.orientation),
        })
    });

    let targets = TargetMap::from_entries(entries)?;
    if targets.is_empty() {
        return Err(AppError::ConfigEmpty {
            path: path.to_path_buf(),
        });
    }

    tracing::info!(path = %path.display(), monitors = targets.len(), "Loaded target layout");

    Ok(targets)
}

/// Writes `entries` to `path` as a layout document, replacing any existing file.
///
/// # Errors
/// Returns error if the document cannot be serialized or written.
pub fn save_targets(path: &Path, entries: &[TargetEntry]) -> Result<()> {
    let document = LayoutDocument {
        monitors: entries
            .iter()
            .map(|entry| MonitorEntry {
                device_id: entry.identity.to_string(),
                x: entry.geometry.x,
                y: entry.geometry.y,
                orientation: entry.geometry.rotation,
            })
            .collect(),
    };

    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::io("Failed to create config directory", e))?;
    }

    let content = serde_json::to_string_pretty(&document).map_err(AppError::json_parse)?;

    fs::write(path, content)
        .map_err(|e| AppError::io(format!("Failed to write config file: {}", path.display()), e))?;

    tracing::info!(path = %path.display(), monitors = entries.len(), "Target layout saved");

    Ok(())
}
