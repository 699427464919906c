//! Agent frontmatter extraction.
//!
//! Agents are markdown files whose leading `---`-delimited YAML block
//! carries the structured metadata. The markdown body is never
//! interpreted here.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SddError};
use crate::utils::fs::read_text;

static FRONTMATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\n(.*?)\n---").expect("frontmatter pattern is valid")
});

/// Structured metadata from an agent file's frontmatter block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentFrontmatter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Passed through untouched; agent files declare tools as either a
    /// list or a comma-separated string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<serde_yaml::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}

/// Extract the raw frontmatter block from markdown content.
#[must_use]
pub fn extract_block(content: &str) -> Option<&str> {
    FRONTMATTER
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Read an agent file and parse its frontmatter metadata.
pub fn load(path: &Path) -> Result<AgentFrontmatter> {
    if !path.is_file() {
        return Err(SddError::PathNotFound(
            "agent".to_string(),
            path.display().to_string(),
        ));
    }
    let content = read_text(path)?;
    let block = extract_block(&content)
        .ok_or_else(|| SddError::FrontmatterMissing(path.display().to_string()))?;
    serde_yaml::from_str(block)
        .map_err(|err| SddError::Parse(format!("frontmatter in {}: {err}", path.display())))
}
