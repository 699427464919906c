//! Skill and agent content loading.
//!
//! Skills are read as text with `<techpack-root>` expanded to the pack's
//! resolved directory. Agents are read as frontmatter metadata plus their
//! declared skill dependencies, resolved through the skills registry.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, SddError};
use crate::techpack::frontmatter;
use crate::techpack::manifest::Manifest;
use crate::techpack::router::{SkillRef, resolve_skill_names};
use crate::utils::fs::read_text;

/// Placeholder replaced with the absolute tech pack directory.
pub const ROOT_PLACEHOLDER: &str = "<techpack-root>";

/// A skill file resolved and read.
#[derive(Debug, Serialize)]
pub struct LoadedSkill {
    pub name: String,
    pub path: PathBuf,
    pub content: String,
}

/// An agent's frontmatter metadata with resolved skill dependencies.
#[derive(Debug, Serialize)]
pub struct LoadedAgent {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<serde_yaml::Value>,
    pub skills: Vec<SkillRef>,
    /// Absolute path to the agent's own prompt file.
    pub prompt: PathBuf,
}

/// Read a skill's content with placeholder substitution.
///
/// Substitution is a single literal pass: no escaping, no recursive
/// expansion, no other placeholders.
pub fn load_skill(manifest: &Manifest, techpack_dir: &Path, skill_name: &str) -> Result<LoadedSkill> {
    let rel = manifest.skills.get(skill_name).ok_or_else(|| {
        SddError::UnresolvedSkillReference(format!(
            "skill \"{skill_name}\" not found in skills registry"
        ))
    })?;

    let path = techpack_dir.join(rel);
    if !path.is_file() {
        return Err(SddError::PathNotFound(
            format!("skills.{skill_name}"),
            path.display().to_string(),
        ));
    }

    let content = read_text(&path)?.replace(ROOT_PLACEHOLDER, &techpack_dir.display().to_string());

    Ok(LoadedSkill {
        name: skill_name.to_string(),
        path,
        content,
    })
}

/// Read an agent's frontmatter and resolve its skill dependencies.
pub fn load_agent(manifest: &Manifest, techpack_dir: &Path, agent_name: &str) -> Result<LoadedAgent> {
    let rel = manifest.agents.get(agent_name).ok_or_else(|| {
        SddError::UnresolvedAgentReference(format!(
            "agent \"{agent_name}\" not found in agents registry"
        ))
    })?;

    let prompt = techpack_dir.join(rel);
    let meta = frontmatter::load(&prompt)?;

    let skill_names = meta.skills.unwrap_or_default();
    let skills = resolve_skill_names(
        manifest,
        techpack_dir,
        &skill_names,
        &format!("agent \"{agent_name}\""),
    )?;

    Ok(LoadedAgent {
        name: meta.name.unwrap_or_else(|| agent_name.to_string()),
        description: meta.description,
        model: meta.model,
        tools: meta.tools,
        skills,
        prompt,
    })
}
