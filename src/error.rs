//! Error types for the sdd-system CLI.
//!
//! Every failure carries a stable machine-readable code (for `--robot`
//! output) alongside the human-readable message. Validation is the only
//! operation that aggregates; everything else fails on the first unmet
//! precondition.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SddError>;

#[derive(Debug, Error)]
pub enum SddError {
    #[error("tech pack \"{0}\" not found in settings")]
    NamespaceNotFound(String),

    #[error("techpack.yaml not found at {0}")]
    ManifestNotFound(String),

    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    SchemaViolation(String),

    #[error("{0}: path does not exist — {1}")]
    PathNotFound(String, String),

    #[error("{0}")]
    UnresolvedSkillReference(String),

    #[error("{0}")]
    UnresolvedAgentReference(String),

    #[error("component \"{0}\" not found in manifest")]
    UnknownComponent(String),

    #[error("{0}")]
    UnknownDependency(String),

    #[error("dependency cycle detected involving: {0}")]
    DependencyCycle(String),

    #[error("command namespace \"{0}\" not found in manifest")]
    UnknownCommandNamespace(String),

    #[error("action \"{action}\" not found in command namespace \"{command}\"")]
    UnknownAction { command: String, action: String },

    #[error(
        "validation failed for tech pack \"{name}\" ({namespace}):\n{}",
        render_issues(.issues)
    )]
    ValidationFailed {
        name: String,
        namespace: String,
        issues: Vec<SddError>,
    },

    #[error("no YAML frontmatter found in {0}")]
    FrontmatterMissing(String),

    #[error("{0}")]
    Settings(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SddError {
    /// Stable code for robot-mode output and per-issue reporting.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NamespaceNotFound(_) => "namespace_not_found",
            Self::ManifestNotFound(_) => "manifest_not_found",
            Self::Parse(_) => "parse_error",
            Self::SchemaViolation(_) => "schema_violation",
            Self::PathNotFound(..) => "path_not_found",
            Self::UnresolvedSkillReference(_) => "unresolved_skill_reference",
            Self::UnresolvedAgentReference(_) => "unresolved_agent_reference",
            Self::UnknownComponent(_) => "unknown_component",
            Self::UnknownDependency(_) => "unknown_dependency",
            Self::DependencyCycle(_) => "dependency_cycle",
            Self::UnknownCommandNamespace(_) => "unknown_command_namespace",
            Self::UnknownAction { .. } => "unknown_action",
            Self::ValidationFailed { .. } => "validation_failed",
            Self::FrontmatterMissing(_) => "frontmatter_missing",
            Self::Settings(_) => "settings_error",
            Self::Io(_) => "io_error",
        }
    }
}

fn render_issues(issues: &[SddError]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {issue}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failed_lists_every_issue() {
        let err = SddError::ValidationFailed {
            name: "Web Stack".to_string(),
            namespace: "web".to_string(),
            issues: vec![
                SddError::SchemaViolation("techpack.version: expected string".to_string()),
                SddError::PathNotFound("skills.build".to_string(), "skills/build.md".to_string()),
            ],
        };
        let rendered = err.to_string();
        assert!(rendered.contains("Web Stack"));
        assert!(rendered.contains("  - techpack.version: expected string"));
        assert!(rendered.contains("  - skills.build: path does not exist — skills/build.md"));
    }

    #[test]
    fn codes_are_snake_case() {
        assert_eq!(
            SddError::NamespaceNotFound("x".into()).code(),
            "namespace_not_found"
        );
        assert_eq!(
            SddError::UnknownAction {
                command: "db".into(),
                action: "drop".into()
            }
            .code(),
            "unknown_action"
        );
    }
}
