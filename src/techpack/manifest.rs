//! Typed tech pack manifest and its loader.
//!
//! Loading performs no structural validation beyond YAML parsing; missing
//! optional maps and lists default to empty. The validator works from the
//! raw document instead (see [`super::validate`]) so that partially
//! invalid manifests still produce a full error report.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::MANIFEST_FILE;
use crate::error::{Result, SddError};
use crate::utils::fs::read_text;

/// A parsed `techpack.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub techpack: Identity,
    /// Skill name → manifest-relative file path.
    #[serde(default)]
    pub skills: BTreeMap<String, String>,
    /// Agent name → manifest-relative file path.
    #[serde(default)]
    pub agents: BTreeMap<String, String>,
    #[serde(default)]
    pub components: BTreeMap<String, Component>,
    #[serde(default)]
    pub phases: BTreeMap<String, Phase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<Help>,
    #[serde(default)]
    pub commands: BTreeMap<String, CommandNamespace>,
}

/// Identity block of a manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub namespace: String,
    pub description: String,
    pub version: String,
    pub min_sdd_version: String,
    pub system_path: String,
}

/// A component type the tech pack can scaffold and manage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub description: String,
    pub directory_pattern: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// Skill that scaffolds this component type.
    pub scaffolding: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singleton: Option<bool>,
}

/// A lifecycle phase contribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase {
    #[serde(default)]
    pub orchestrator_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents: Option<Vec<String>>,
}

/// Help skill references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Help {
    pub capabilities: String,
    pub content: String,
}

/// A command namespace contributed by the tech pack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandNamespace {
    pub handler: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    #[serde(default)]
    pub actions: BTreeMap<String, CommandAction>,
}

/// A single action within a command namespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandAction {
    pub description: String,
    pub public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destructive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<BTreeMap<String, CommandArg>>,
}

/// Declared argument schema for an action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandArg {
    #[serde(rename = "type")]
    pub arg_type: String,
    pub mandatory: bool,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_yaml::Value>,
}

/// Path of the manifest file inside a tech pack directory.
#[must_use]
pub fn manifest_path(techpack_dir: &Path) -> PathBuf {
    techpack_dir.join(MANIFEST_FILE)
}

/// Load and parse the manifest in `techpack_dir`.
pub fn load(techpack_dir: &Path) -> Result<Manifest> {
    let raw = read_raw_text(techpack_dir)?;
    serde_yaml::from_str(&raw).map_err(|err| {
        SddError::Parse(format!(
            "failed to parse {}: {err}",
            manifest_path(techpack_dir).display()
        ))
    })
}

/// Load the manifest as an untyped YAML document.
///
/// The validator consumes this form so a manifest that fails the typed
/// shape still gets schema/path/reference checks instead of one parse
/// error.
pub fn load_raw(techpack_dir: &Path) -> Result<serde_yaml::Value> {
    let raw = read_raw_text(techpack_dir)?;
    serde_yaml::from_str(&raw).map_err(|err| {
        SddError::Parse(format!(
            "failed to parse {}: {err}",
            manifest_path(techpack_dir).display()
        ))
    })
}

fn read_raw_text(techpack_dir: &Path) -> Result<String> {
    let path = manifest_path(techpack_dir);
    if !path.exists() {
        return Err(SddError::ManifestNotFound(path.display().to_string()));
    }
    read_text(&path)
}
