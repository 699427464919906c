//! Tech pack validation.
//!
//! Four independent passes over the raw manifest document — structural
//! schema, path existence, registry cross-references, dependency DAG —
//! none short-circuiting on another's failure. Every discovered problem
//! lands in one ordered report so a broken pack surfaces all of its
//! defects in a single run.

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::Value;

use crate::error::{Result, SddError};
use crate::techpack::graph::DependencyGraph;
use crate::techpack::{manifest, schema};

/// Aggregated validation outcome for one tech pack directory.
#[derive(Debug)]
pub struct ValidationReport {
    pub name: String,
    pub namespace: String,
    pub issues: Vec<SddError>,
    pub component_types: usize,
    pub command_namespaces: usize,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Convert a failed report into the aggregate error, consuming it.
    pub fn into_result(self) -> Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(SddError::ValidationFailed {
                name: self.name,
                namespace: self.namespace,
                issues: self.issues,
            })
        }
    }
}

/// Validate the tech pack at `dir`.
///
/// Fails fast only when the manifest cannot be read at all
/// (`ManifestNotFound`, `Parse`); everything after that accumulates.
pub fn validate_dir(dir: &Path) -> Result<ValidationReport> {
    let doc = manifest::load_raw(dir)?;

    let mut issues = schema::check_manifest(&doc);
    issues.extend(check_paths(dir, &doc));
    issues.extend(check_references(&doc));
    issues.extend(check_dag(&doc));

    let identity = doc.get("techpack");
    let name = identity
        .and_then(|t| t.get("name"))
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();
    let namespace = identity
        .and_then(|t| t.get("namespace"))
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();

    Ok(ValidationReport {
        name,
        namespace,
        issues,
        component_types: mapping_len(&doc, "components"),
        command_namespaces: mapping_len(&doc, "commands"),
    })
}

fn mapping_len(doc: &Value, key: &str) -> usize {
    doc.get(key)
        .and_then(Value::as_mapping)
        .map_or(0, serde_yaml::Mapping::len)
}

/// Strip a single leading `./` before joining, as manifest authors write
/// `./skills/x.md` and bare `skills/x.md` interchangeably.
fn normalize_rel(path: &str) -> &str {
    path.strip_prefix("./").unwrap_or(path)
}

/// Pass 2: every declared relative path must resolve to an existing file
/// under the tech pack directory.
fn check_paths(dir: &Path, doc: &Value) -> Vec<SddError> {
    let mut declared: Vec<(String, String)> = Vec::new();

    if let Some(system_path) = doc
        .get("techpack")
        .and_then(|t| t.get("system_path"))
        .and_then(Value::as_str)
    {
        declared.push(("techpack.system_path".to_string(), system_path.to_string()));
    }

    for registry in ["skills", "agents"] {
        for (name, rel) in string_map(doc, registry) {
            declared.push((format!("{registry}.{name}"), rel));
        }
    }

    declared
        .into_iter()
        .filter_map(|(field, rel)| {
            let clean = normalize_rel(&rel);
            let full = dir.join(clean);
            if full.is_file() {
                None
            } else {
                Some(SddError::PathNotFound(field, clean.to_string()))
            }
        })
        .collect()
}

/// Pass 3: every skill/agent name used anywhere in the manifest must
/// exist as a key of the corresponding registry.
fn check_references(doc: &Value) -> Vec<SddError> {
    let skills = string_map(doc, "skills");
    let agents = string_map(doc, "agents");
    let mut issues = Vec::new();

    let mut check_skill = |field: String, name: &str| {
        if !skills.contains_key(name) {
            issues.push(SddError::UnresolvedSkillReference(format!(
                "{field}: \"{name}\" not in skills registry"
            )));
        }
    };

    for (type_name, component) in mapping_entries(doc, "components") {
        if let Some(scaffolding) = component.get("scaffolding").and_then(Value::as_str) {
            check_skill(format!("components.{type_name}.scaffolding"), scaffolding);
        }
        for (idx, skill) in string_items(component.get("skills")) {
            check_skill(format!("components.{type_name}.skills[{idx}]"), skill);
        }
    }

    for (phase_name, phase) in mapping_entries(doc, "phases") {
        for (idx, skill) in string_items(phase.get("orchestrator_skills")) {
            check_skill(format!("phases.{phase_name}.orchestrator_skills[{idx}]"), skill);
        }
    }

    if let Some(help) = doc.get("help") {
        for key in ["capabilities", "content"] {
            if let Some(name) = help.get(key).and_then(Value::as_str) {
                check_skill(format!("help.{key}"), name);
            }
        }
    }

    for (ns_name, namespace) in mapping_entries(doc, "commands") {
        if let Some(skill) = namespace.get("skill").and_then(Value::as_str) {
            check_skill(format!("commands.{ns_name}.skill"), skill);
        }
    }

    for (type_name, component) in mapping_entries(doc, "components") {
        if let Some(agent) = component.get("agent").and_then(Value::as_str) {
            if !agents.contains_key(agent) {
                issues.push(SddError::UnresolvedAgentReference(format!(
                    "components.{type_name}.agent: \"{agent}\" not in agents registry"
                )));
            }
        }
    }

    for (phase_name, phase) in mapping_entries(doc, "phases") {
        for (idx, agent) in string_items(phase.get("agents")) {
            if !agents.contains_key(agent) {
                issues.push(SddError::UnresolvedAgentReference(format!(
                    "phases.{phase_name}.agents[{idx}]: \"{agent}\" not in agents registry"
                )));
            }
        }
    }

    issues
}

/// Pass 4: `depends_on` targets must be declared component types and the
/// induced graph must be acyclic.
fn check_dag(doc: &Value) -> Vec<SddError> {
    let mut depends_on: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (type_name, component) in mapping_entries(doc, "components") {
        let deps = string_items(component.get("depends_on"))
            .map(|(_, dep)| dep.to_string())
            .collect();
        depends_on.insert(type_name.to_string(), deps);
    }

    let (graph, mut issues) = DependencyGraph::build(&depends_on);
    if let Err(cycle) = graph.topological_order() {
        issues.push(cycle);
    }
    issues
}

// ── Raw document accessors ──────────────────────────────────────────

/// String-keyed, string-valued entries of a top-level mapping; non-string
/// entries are skipped (the schema pass reports them).
fn string_map(doc: &Value, key: &str) -> BTreeMap<String, String> {
    doc.get(key)
        .and_then(Value::as_mapping)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|(name, value)| {
                    Some((name.as_str()?.to_string(), value.as_str()?.to_string()))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// String-keyed entries of a top-level mapping, values left raw.
fn mapping_entries<'a>(doc: &'a Value, key: &str) -> impl Iterator<Item = (&'a str, &'a Value)> {
    doc.get(key)
        .and_then(Value::as_mapping)
        .into_iter()
        .flatten()
        .filter_map(|(name, value)| Some((name.as_str()?, value)))
}

/// Enumerated string items of an optional list value.
fn string_items(value: Option<&Value>) -> impl Iterator<Item = (usize, &str)> {
    value
        .and_then(Value::as_sequence)
        .into_iter()
        .flatten()
        .enumerate()
        .filter_map(|(idx, item)| Some((idx, item.as_str()?)))
}
