// ABOUTME: Persistence of the container record between CLI invocations.
// ABOUTME: A JSON file written atomically via a sibling temp file.

use berth::error::Result;
use berth::reconcile::ContainerRecord;
use std::path::{Path, PathBuf};

/// Load the record, or `None` when no state file exists yet.
pub fn load(path: &Path) -> Result<Option<ContainerRecord>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn save(path: &Path, record: &ContainerRecord) -> Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    let tmp = temp_path(path);
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), "saved state");
    Ok(())
}

pub fn remove(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
