use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::config::{self, Settings, TechPackEntry};
use crate::error::{Result, SddError};
use crate::techpack::manifest::{self, Manifest};
use crate::techpack::resolve::techpack_dir;

pub struct AppContext {
    /// Present when the invocation runs inside an SDD project.
    pub project_root: Option<PathBuf>,
    pub plugin_root: PathBuf,
    settings: Option<Settings>,
    pub output_format: OutputFormat,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let project_root = match cli.project_root.clone() {
            Some(root) => Some(root),
            None => config::find_project_root(&std::env::current_dir()?),
        };

        // Absence of a project is tolerated until a command needs the
        // settings; a present-but-broken settings file surfaces now.
        let settings = match &project_root {
            Some(root) if config::settings_path(root).is_some() => Some(Settings::load(root)?),
            _ => None,
        };

        Ok(Self {
            project_root,
            plugin_root: config::plugin_root(),
            settings,
            output_format: cli.output_format(),
            verbosity: cli.verbose,
        })
    }

    pub fn project_root(&self) -> Result<&Path> {
        self.project_root.as_deref().ok_or_else(not_in_project)
    }

    pub fn settings(&self) -> Result<&Settings> {
        self.settings.as_ref().ok_or_else(not_in_project)
    }

    /// Resolve a namespace to its settings entry and absolute directory.
    pub fn resolve_techpack(&self, namespace: &str) -> Result<(&TechPackEntry, PathBuf)> {
        let entry = self.settings()?.techpack(namespace)?;
        let dir = techpack_dir(entry, self.project_root()?, &self.plugin_root)?;
        Ok((entry, dir))
    }

    /// Resolve a namespace and load its manifest.
    pub fn load_manifest(&self, namespace: &str) -> Result<(Manifest, PathBuf)> {
        let (_, dir) = self.resolve_techpack(namespace)?;
        let loaded = manifest::load(&dir)?;
        Ok((loaded, dir))
    }
}

fn not_in_project() -> SddError {
    SddError::Settings("not in an SDD project (no sdd-settings.yaml found)".to_string())
}
