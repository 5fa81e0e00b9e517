// ABOUTME: Legacy volume entries to binds, volumes-from and anonymous volumes.
// ABOUTME: Each entry needs exactly one of a container path or a source container.

use super::error::TranslateError;
use crate::config::VolumeSpec;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeTranslation {
    /// Container paths declared on the image config.
    pub anonymous: Vec<String>,
    /// `source:target:rw|ro` strings.
    pub binds: Vec<String>,
    pub from_containers: Vec<String>,
}

pub fn translate_volumes(volumes: &[VolumeSpec]) -> Result<VolumeTranslation, TranslateError> {
    let mut out = VolumeTranslation::default();

    for volume in volumes {
        let from_container = volume.from_container.as_deref().filter(|s| !s.is_empty());
        let container_path = volume.container_path.as_deref().filter(|s| !s.is_empty());
        let source = volume
            .volume_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| volume.host_path.as_deref().filter(|s| !s.is_empty()));

        match (from_container, container_path) {
            (None, None) => return Err(TranslateError::VolumeWithoutTarget),
            (Some(_), Some(_)) => return Err(TranslateError::VolumeWithBothTargets),
            (Some(container), None) => out.from_containers.push(container.to_string()),
            (None, Some(path)) => {
                push_unique(&mut out.anonymous, path);
                if let Some(source) = source {
                    let mode = if volume.read_only { "ro" } else { "rw" };
                    out.binds.push(format!("{}:{}:{}", source, path, mode));
                }
            }
        }
    }

    Ok(out)
}

fn push_unique(paths: &mut Vec<String>, path: &str) {
    if !paths.iter().any(|p| p == path) {
        paths.push(path.to_string());
    }
}
