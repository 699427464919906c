use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SddError};
use crate::utils::fs::read_text;

/// File name of the project settings file.
pub const SETTINGS_FILE: &str = "sdd-settings.yaml";

/// Manifest file name inside a tech pack directory.
pub const MANIFEST_FILE: &str = "techpack.yaml";

/// A registered tech pack in `sdd-settings.yaml`.
///
/// The install mode is a tagged variant: exactly one location scheme is
/// populated per mode, discriminated by the `mode` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechPackEntry {
    pub name: String,
    pub namespace: String,
    pub version: String,
    #[serde(flatten)]
    pub source: InstallSource,
}

/// Where an installed tech pack lives on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum InstallSource {
    /// Bundled with the plugin; `path` is relative to the plugin root.
    Internal { path: String },
    /// Local directory outside the plugin; absolute or process-relative.
    External { path: String },
    /// Cloned into the project; `install_path` is relative to the project root.
    Git {
        repo: String,
        #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
        reference: Option<String>,
        install_path: String,
    },
}

impl InstallSource {
    /// Short mode label as it appears in the settings file.
    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self {
            Self::Internal { .. } => "internal",
            Self::External { .. } => "external",
            Self::Git { .. } => "git",
        }
    }
}

/// The subset of the project settings file this CLI consumes (read-only).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub techpacks: BTreeMap<String, TechPackEntry>,
}

impl Settings {
    /// Load settings from a project root, checking the `sdd/` location
    /// first and falling back to the legacy `.sdd/` directory.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = settings_path(project_root).ok_or_else(|| {
            SddError::Settings(format!(
                "{SETTINGS_FILE} not found under {}",
                project_root.display()
            ))
        })?;
        let raw = read_text(&path)?;
        serde_yaml::from_str(&raw)
            .map_err(|err| SddError::Settings(format!("parse {}: {err}", path.display())))
    }

    /// Look up a namespace, failing with `NamespaceNotFound` if absent.
    pub fn techpack(&self, namespace: &str) -> Result<&TechPackEntry> {
        self.techpacks
            .get(namespace)
            .ok_or_else(|| SddError::NamespaceNotFound(namespace.to_string()))
    }
}

/// Locate the settings file under a project root, if present.
#[must_use]
pub fn settings_path(project_root: &Path) -> Option<PathBuf> {
    let candidates = [
        project_root.join("sdd").join(SETTINGS_FILE),
        project_root.join(".sdd").join(SETTINGS_FILE),
        project_root.join(SETTINGS_FILE),
    ];
    candidates.into_iter().find(|p| p.exists())
}

/// Find the project root by walking upward from `start` until a directory
/// containing a settings file is found.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if settings_path(dir).is_some() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

/// Resolve the plugin root directory.
///
/// `CLAUDE_PLUGIN_ROOT` takes precedence; otherwise the plugin is assumed
/// to live under the user's data directory.
#[must_use]
pub fn plugin_root() -> PathBuf {
    if let Ok(root) = std::env::var("CLAUDE_PLUGIN_ROOT") {
        return PathBuf::from(root);
    }
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("sdd-system")
}
