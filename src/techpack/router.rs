//! Routing queries over a loaded manifest.
//!
//! Registry lookups fail closed: a declared-but-broken reference is
//! always an error, never silently dropped. A phase absent from the
//! manifest is not an error — the tech pack simply contributes nothing
//! to that phase.

use std::path::{Path, PathBuf};

use itertools::Itertools;
use serde::Serialize;

use crate::error::{Result, SddError};
use crate::techpack::manifest::{CommandArg, Manifest};

/// A skill name resolved to its absolute file path.
#[derive(Debug, Clone, Serialize)]
pub struct SkillRef {
    pub name: String,
    pub path: PathBuf,
}

/// Result of a `route-skills` query.
#[derive(Debug, Serialize)]
pub struct RoutedSkills {
    pub orchestrator_skills: Vec<SkillRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agents: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_skills: Option<Vec<SkillRef>>,
}

/// Result of a `route-command` query.
#[derive(Debug, Serialize)]
pub struct RoutedCommand {
    pub handler: String,
    pub description: String,
    pub public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destructive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<std::collections::BTreeMap<String, CommandArg>>,
}

/// Flat projection of one `components` entry.
#[derive(Debug, Serialize)]
pub struct ComponentInfo {
    pub name: String,
    pub description: String,
    pub singleton: bool,
    pub directory_pattern: String,
    pub depends_on: Vec<String>,
    pub skills: Vec<String>,
    pub scaffolding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
}

/// Resolve each name through the skills registry, failing closed with one
/// error listing every missing name.
pub fn resolve_skill_names(
    manifest: &Manifest,
    techpack_dir: &Path,
    names: &[String],
    context: &str,
) -> Result<Vec<SkillRef>> {
    let missing: Vec<&String> = names
        .iter()
        .filter(|name| !manifest.skills.contains_key(*name))
        .collect();
    if !missing.is_empty() {
        return Err(SddError::UnresolvedSkillReference(format!(
            "{context} references unknown skills: {}",
            missing.iter().join(", ")
        )));
    }

    Ok(names
        .iter()
        .filter_map(|name| {
            manifest.skills.get(name).map(|rel| SkillRef {
                name: name.clone(),
                path: techpack_dir.join(rel),
            })
        })
        .collect())
}

/// Skills (and agents) a tech pack contributes to a lifecycle phase,
/// optionally including one component type's skill list.
pub fn route_skills(
    manifest: &Manifest,
    techpack_dir: &Path,
    phase: &str,
    component: Option<&str>,
) -> Result<RoutedSkills> {
    let mut routed = match manifest.phases.get(phase) {
        Some(entry) => RoutedSkills {
            orchestrator_skills: resolve_skill_names(
                manifest,
                techpack_dir,
                &entry.orchestrator_skills,
                &format!("phase \"{phase}\""),
            )?,
            agents: entry.agents.clone().filter(|agents| !agents.is_empty()),
            component_skills: None,
        },
        // Absent phase: the pack contributes nothing, which is fine.
        None => RoutedSkills {
            orchestrator_skills: Vec::new(),
            agents: None,
            component_skills: None,
        },
    };

    if let Some(type_name) = component {
        let entry = manifest
            .components
            .get(type_name)
            .ok_or_else(|| SddError::UnknownComponent(type_name.to_string()))?;
        routed.component_skills = Some(resolve_skill_names(
            manifest,
            techpack_dir,
            &entry.skills,
            &format!("component \"{type_name}\""),
        )?);
    }

    Ok(routed)
}

/// Handler and action metadata for a command-namespace action.
pub fn route_command(manifest: &Manifest, command: &str, action: &str) -> Result<RoutedCommand> {
    let namespace = manifest
        .commands
        .get(command)
        .ok_or_else(|| SddError::UnknownCommandNamespace(command.to_string()))?;
    let entry = namespace
        .actions
        .get(action)
        .ok_or_else(|| SddError::UnknownAction {
            command: command.to_string(),
            action: action.to_string(),
        })?;

    Ok(RoutedCommand {
        handler: namespace.handler.clone(),
        description: entry.description.clone(),
        public: entry.public,
        skill: namespace.skill.clone(),
        destructive: entry.destructive,
        args: entry.args.clone(),
    })
}

/// Flat projection of the `components` map, no filtering.
#[must_use]
pub fn list_components(manifest: &Manifest) -> Vec<ComponentInfo> {
    manifest
        .components
        .iter()
        .map(|(name, component)| ComponentInfo {
            name: name.clone(),
            description: component.description.clone(),
            singleton: component.singleton.unwrap_or(false),
            directory_pattern: component.directory_pattern.clone(),
            depends_on: component.depends_on.clone(),
            skills: component.skills.clone(),
            scaffolding: component.scaffolding.clone(),
            agent: component.agent.clone(),
        })
        .collect()
}
