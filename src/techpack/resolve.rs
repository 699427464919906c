//! Tech pack directory resolution.
//!
//! Computes the absolute filesystem directory of a tech pack from its
//! settings entry. Pure with respect to the filesystem: existence of the
//! resolved directory is checked later by the loader and validator.

use std::path::{Path, PathBuf};

use crate::config::{InstallSource, TechPackEntry};
use crate::error::Result;

/// Resolve the absolute directory of a tech pack.
///
/// - `internal`: joined onto the plugin root.
/// - `git`: the clone's `install_path`, joined onto the project root.
/// - `external`: taken as-is if absolute, otherwise resolved against the
///   current working directory.
pub fn techpack_dir(
    entry: &TechPackEntry,
    project_root: &Path,
    plugin_root: &Path,
) -> Result<PathBuf> {
    match &entry.source {
        InstallSource::Internal { path } => Ok(plugin_root.join(path)),
        InstallSource::Git { install_path, .. } => Ok(project_root.join(install_path)),
        InstallSource::External { path } => Ok(std::path::absolute(path)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InstallSource;

    fn entry(source: InstallSource) -> TechPackEntry {
        TechPackEntry {
            name: "Web Stack".to_string(),
            namespace: "web".to_string(),
            version: "1.0.0".to_string(),
            source,
        }
    }

    #[test]
    fn internal_joins_plugin_root() {
        let e = entry(InstallSource::Internal {
            path: "techpacks/web".to_string(),
        });
        let dir = techpack_dir(&e, Path::new("/project"), Path::new("/plugin")).unwrap();
        assert_eq!(dir, PathBuf::from("/plugin/techpacks/web"));
    }

    #[test]
    fn git_joins_project_root() {
        let e = entry(InstallSource::Git {
            repo: "https://example.com/web.git".to_string(),
            reference: None,
            install_path: "sdd/techpacks/web".to_string(),
        });
        let dir = techpack_dir(&e, Path::new("/project"), Path::new("/plugin")).unwrap();
        assert_eq!(dir, PathBuf::from("/project/sdd/techpacks/web"));
    }

    #[test]
    fn external_absolute_path_is_kept() {
        let e = entry(InstallSource::External {
            path: "/opt/packs/web".to_string(),
        });
        let dir = techpack_dir(&e, Path::new("/project"), Path::new("/plugin")).unwrap();
        assert_eq!(dir, PathBuf::from("/opt/packs/web"));
    }

    #[test]
    fn external_relative_path_resolves_against_cwd() {
        let e = entry(InstallSource::External {
            path: "packs/web".to_string(),
        });
        let dir = techpack_dir(&e, Path::new("/project"), Path::new("/plugin")).unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("packs/web"));
    }
}
