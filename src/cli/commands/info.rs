//! sdd-system tech-pack info - Manifest summary for one namespace

use clap::Args;
use semver::Version;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, outcome_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Tech pack namespace
    #[arg(long)]
    pub namespace: String,
}

#[derive(Serialize)]
struct Counts {
    skills: usize,
    agents: usize,
    components: usize,
    phases: usize,
    commands: usize,
}

#[derive(Serialize)]
struct InfoData {
    name: String,
    namespace: String,
    version: String,
    description: String,
    system_path: String,
    path: String,
    counts: Counts,
    component_types: Vec<String>,
    phases: Vec<String>,
    /// Whether this binary satisfies the manifest's `min_sdd_version`.
    compatible: bool,
}

pub fn run(ctx: &AppContext, args: &InfoArgs) -> Result<()> {
    let (manifest, dir) = ctx.load_manifest(&args.namespace)?;
    debug!(target: "tech_pack", namespace = %args.namespace, "loaded manifest");

    let identity = &manifest.techpack;
    let data = InfoData {
        name: identity.name.clone(),
        namespace: identity.namespace.clone(),
        version: identity.version.clone(),
        description: identity.description.clone(),
        system_path: identity.system_path.clone(),
        path: dir.display().to_string(),
        counts: Counts {
            skills: manifest.skills.len(),
            agents: manifest.agents.len(),
            components: manifest.components.len(),
            phases: manifest.phases.len(),
            commands: manifest.commands.len(),
        },
        component_types: manifest.components.keys().cloned().collect(),
        phases: manifest.phases.keys().cloned().collect(),
        compatible: is_compatible(&identity.min_sdd_version),
    };

    if ctx.output_format == OutputFormat::Json {
        return emit_json(&outcome_ok(data));
    }

    let mut layout = HumanLayout::new();
    layout.title(&format!("{} ({}) v{}", data.name, data.namespace, data.version));
    layout.kv("Description", &data.description);
    layout.kv("Directory", &data.path);
    layout.kv("System prompt", &data.system_path);
    layout.kv("Compatible", if data.compatible { "yes" } else { "no" });
    layout.blank();
    layout.section("Contents");
    layout.kv("Skills", &data.counts.skills.to_string());
    layout.kv("Agents", &data.counts.agents.to_string());
    layout.kv("Components", &data.component_types.join(", "));
    layout.kv("Phases", &data.phases.join(", "));
    layout.kv("Commands", &data.counts.commands.to_string());
    emit_human(layout);
    Ok(())
}

/// A pack is compatible when its `min_sdd_version` is not newer than this
/// binary. Unparseable versions read as incompatible; the validator
/// reports them separately.
fn is_compatible(min_sdd_version: &str) -> bool {
    let Ok(minimum) = Version::parse(min_sdd_version) else {
        return false;
    };
    let Ok(own) = Version::parse(env!("CARGO_PKG_VERSION")) else {
        return false;
    };
    own >= minimum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn older_minimum_is_compatible() {
        assert!(is_compatible("0.1.0"));
    }

    #[test]
    fn future_minimum_is_not() {
        assert!(!is_compatible("99.0.0"));
    }

    #[test]
    fn garbage_minimum_is_not() {
        assert!(!is_compatible("latest"));
    }
}
