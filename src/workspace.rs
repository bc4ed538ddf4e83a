//! Files of the tracked repository checkout that record the upstream version

use crate::config::ManifestConfig;
use crate::error::{BotBumpError, Result};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The tracked repository's working tree
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Workspace { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Raw content of the version marker file
    pub fn read_marker(&self, marker_file: &str) -> Result<String> {
        Ok(fs::read_to_string(self.root.join(marker_file))?)
    }

    /// Overwrite the marker file with `content`, verbatim
    pub fn write_marker(&self, marker_file: &str, content: &str) -> Result<()> {
        fs::write(self.root.join(marker_file), content)?;
        debug!(marker_file, content, "marker written");
        Ok(())
    }

    /// Point the manifest's dependency entry at `version`.
    ///
    /// Returns `false` without touching anything when the manifest or the
    /// dependency key is absent.
    pub fn update_manifest(&self, manifest: &ManifestConfig, version: &str) -> Result<bool> {
        let path = self.root.join(&manifest.path);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        let mut document: Value = serde_json::from_str(&text).map_err(|e| {
            BotBumpError::format(format!("{} is not valid JSON: {}", manifest.path, e))
        })?;

        let Some(entry) = document.get_mut(&manifest.dependency_key) else {
            return Ok(false);
        };
        let entry = entry.as_object_mut().ok_or_else(|| {
            BotBumpError::format(format!(
                "{}: entry '{}' is not an object",
                manifest.path, manifest.dependency_key
            ))
        })?;

        entry.insert(
            manifest.version_field.clone(),
            Value::String(format!("{}{}", manifest.version_prefix, version)),
        );

        fs::write(&path, serde_json::to_string_pretty(&document)?)?;
        debug!(path = %path.display(), version, "manifest updated");
        Ok(true)
    }
}
