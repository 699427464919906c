//! Structural schema for `techpack.yaml`.
//!
//! Checks the raw YAML document against the fixed manifest shape:
//! required fields, value types, and semver-formatted version fields.
//! Each violation is tagged with its document path so a report line reads
//! like `components.api.scaffolding: expected string`.

use semver::Version;
use serde_yaml::Value;

use crate::error::SddError;

/// Check a raw manifest document, returning every violation found.
#[must_use]
pub fn check_manifest(doc: &Value) -> Vec<SddError> {
    let mut issues = Vec::new();

    if doc.as_mapping().is_none() {
        issues.push(violation("(root)", "manifest must be a mapping"));
        return issues;
    }

    check_identity(doc, &mut issues);
    check_registry(doc, "skills", &mut issues);
    check_registry(doc, "agents", &mut issues);
    check_components(doc, &mut issues);
    check_phases(doc, &mut issues);
    check_help(doc, &mut issues);
    check_commands(doc, &mut issues);

    issues
}

fn violation(path: &str, message: &str) -> SddError {
    SddError::SchemaViolation(format!("{path}: {message}"))
}

fn require_str(map: &Value, path: &str, key: &str, issues: &mut Vec<SddError>) {
    match map.get(key) {
        None => issues.push(violation(&format!("{path}.{key}"), "required field missing")),
        Some(value) if !value.is_string() => {
            issues.push(violation(&format!("{path}.{key}"), "expected string"));
        }
        Some(_) => {}
    }
}

fn optional_str(map: &Value, path: &str, key: &str, issues: &mut Vec<SddError>) {
    if let Some(value) = map.get(key) {
        if !value.is_string() {
            issues.push(violation(&format!("{path}.{key}"), "expected string"));
        }
    }
}

fn optional_bool(map: &Value, path: &str, key: &str, issues: &mut Vec<SddError>) {
    if let Some(value) = map.get(key) {
        if !value.is_bool() {
            issues.push(violation(&format!("{path}.{key}"), "expected boolean"));
        }
    }
}

fn require_bool(map: &Value, path: &str, key: &str, issues: &mut Vec<SddError>) {
    match map.get(key) {
        None => issues.push(violation(&format!("{path}.{key}"), "required field missing")),
        Some(value) if !value.is_bool() => {
            issues.push(violation(&format!("{path}.{key}"), "expected boolean"));
        }
        Some(_) => {}
    }
}

fn check_string_list(value: &Value, path: &str, issues: &mut Vec<SddError>) {
    match value.as_sequence() {
        None => issues.push(violation(path, "expected list of strings")),
        Some(items) => {
            for (idx, item) in items.iter().enumerate() {
                if !item.is_string() {
                    issues.push(violation(&format!("{path}[{idx}]"), "expected string"));
                }
            }
        }
    }
}

fn optional_string_list(map: &Value, path: &str, key: &str, issues: &mut Vec<SddError>) {
    if let Some(value) = map.get(key) {
        check_string_list(value, &format!("{path}.{key}"), issues);
    }
}

fn check_semver(map: &Value, path: &str, key: &str, issues: &mut Vec<SddError>) {
    if let Some(raw) = map.get(key).and_then(Value::as_str) {
        if Version::parse(raw).is_err() {
            issues.push(violation(
                &format!("{path}.{key}"),
                &format!("\"{raw}\" is not a valid semantic version"),
            ));
        }
    }
}

fn check_identity(doc: &Value, issues: &mut Vec<SddError>) {
    let Some(identity) = doc.get("techpack") else {
        issues.push(violation("techpack", "required field missing"));
        return;
    };
    if identity.as_mapping().is_none() {
        issues.push(violation("techpack", "expected mapping"));
        return;
    }

    for key in [
        "name",
        "namespace",
        "description",
        "version",
        "min_sdd_version",
        "system_path",
    ] {
        require_str(identity, "techpack", key, issues);
    }
    check_semver(identity, "techpack", "version", issues);
    check_semver(identity, "techpack", "min_sdd_version", issues);
}

/// Registries are flat name → relative path string maps.
fn check_registry(doc: &Value, key: &str, issues: &mut Vec<SddError>) {
    let Some(value) = doc.get(key) else {
        return;
    };
    let Some(entries) = value.as_mapping() else {
        issues.push(violation(key, "expected mapping of name to path"));
        return;
    };
    for (name, path) in entries {
        let Some(label) = name.as_str() else {
            issues.push(violation(key, "entry names must be strings"));
            continue;
        };
        if !path.is_string() {
            issues.push(violation(&format!("{key}.{label}"), "expected string path"));
        }
    }
}

fn check_components(doc: &Value, issues: &mut Vec<SddError>) {
    let Some(value) = doc.get("components") else {
        return;
    };
    let Some(components) = value.as_mapping() else {
        issues.push(violation("components", "expected mapping"));
        return;
    };

    for (name, component) in components {
        let Some(type_name) = name.as_str() else {
            issues.push(violation(
                "components",
                "component type names must be strings",
            ));
            continue;
        };
        let path = format!("components.{type_name}");
        if component.as_mapping().is_none() {
            issues.push(violation(&path, "expected mapping"));
            continue;
        }

        require_str(component, &path, "description", issues);
        require_str(component, &path, "directory_pattern", issues);
        require_str(component, &path, "scaffolding", issues);
        optional_string_list(component, &path, "depends_on", issues);
        optional_string_list(component, &path, "skills", issues);
        optional_str(component, &path, "agent", issues);
        optional_bool(component, &path, "singleton", issues);
    }
}

fn check_phases(doc: &Value, issues: &mut Vec<SddError>) {
    let Some(value) = doc.get("phases") else {
        return;
    };
    let Some(phases) = value.as_mapping() else {
        issues.push(violation("phases", "expected mapping"));
        return;
    };

    for (name, phase) in phases {
        let Some(phase_name) = name.as_str() else {
            issues.push(violation("phases", "phase names must be strings"));
            continue;
        };
        let path = format!("phases.{phase_name}");
        if phase.as_mapping().is_none() {
            issues.push(violation(&path, "expected mapping"));
            continue;
        }

        match phase.get("orchestrator_skills") {
            None => issues.push(violation(
                &format!("{path}.orchestrator_skills"),
                "required field missing",
            )),
            Some(value) => {
                check_string_list(value, &format!("{path}.orchestrator_skills"), issues);
            }
        }
        optional_string_list(phase, &path, "agents", issues);
    }
}

fn check_help(doc: &Value, issues: &mut Vec<SddError>) {
    let Some(help) = doc.get("help") else {
        return;
    };
    if help.as_mapping().is_none() {
        issues.push(violation("help", "expected mapping"));
        return;
    }
    require_str(help, "help", "capabilities", issues);
    require_str(help, "help", "content", issues);
}

fn check_commands(doc: &Value, issues: &mut Vec<SddError>) {
    let Some(value) = doc.get("commands") else {
        return;
    };
    let Some(commands) = value.as_mapping() else {
        issues.push(violation("commands", "expected mapping"));
        return;
    };

    for (name, namespace) in commands {
        let Some(ns_name) = name.as_str() else {
            issues.push(violation("commands", "namespace names must be strings"));
            continue;
        };
        let path = format!("commands.{ns_name}");
        if namespace.as_mapping().is_none() {
            issues.push(violation(&path, "expected mapping"));
            continue;
        }

        require_str(namespace, &path, "handler", issues);
        optional_str(namespace, &path, "skill", issues);

        let Some(actions) = namespace.get("actions") else {
            issues.push(violation(
                &format!("{path}.actions"),
                "required field missing",
            ));
            continue;
        };
        let Some(actions) = actions.as_mapping() else {
            issues.push(violation(&format!("{path}.actions"), "expected mapping"));
            continue;
        };

        for (action_name, action) in actions {
            let Some(action_label) = action_name.as_str() else {
                issues.push(violation(
                    &format!("{path}.actions"),
                    "action names must be strings",
                ));
                continue;
            };
            let action_path = format!("{path}.actions.{action_label}");
            if action.as_mapping().is_none() {
                issues.push(violation(&action_path, "expected mapping"));
                continue;
            }

            require_str(action, &action_path, "description", issues);
            require_bool(action, &action_path, "public", issues);
            optional_bool(action, &action_path, "destructive", issues);
            if let Some(args) = action.get("args") {
                if !args.is_mapping() {
                    issues.push(violation(&format!("{action_path}.args"), "expected mapping"));
                }
            }
        }
    }
}
