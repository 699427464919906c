//! sdd-system tech-pack route-skills - Phase and component skill lookup

use clap::Args;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, outcome_ok};
use crate::error::Result;
use crate::techpack::router;

#[derive(Args, Debug)]
pub struct RouteSkillsArgs {
    /// Tech pack namespace
    #[arg(long)]
    pub namespace: String,

    /// Lifecycle phase name
    #[arg(long)]
    pub phase: String,

    /// Component type to include skills for
    #[arg(long)]
    pub component: Option<String>,
}

pub fn run(ctx: &AppContext, args: &RouteSkillsArgs) -> Result<()> {
    let (manifest, dir) = ctx.load_manifest(&args.namespace)?;
    let routed = router::route_skills(&manifest, &dir, &args.phase, args.component.as_deref())?;
    debug!(
        target: "tech_pack",
        phase = %args.phase,
        orchestrator_skills = routed.orchestrator_skills.len(),
        "routed skills"
    );

    if ctx.output_format == OutputFormat::Json {
        return emit_json(&outcome_ok(routed));
    }

    let mut layout = HumanLayout::new();
    layout.section(&format!("Phase \"{}\"", args.phase));
    if routed.orchestrator_skills.is_empty() {
        layout.push_line("(no orchestrator skills)");
    }
    for skill in &routed.orchestrator_skills {
        layout.bullet(&format!("{} — {}", skill.name, skill.path.display()));
    }
    if let Some(agents) = &routed.agents {
        layout.blank();
        layout.kv("Agents", &agents.join(", "));
    }
    if let Some(skills) = &routed.component_skills {
        layout.blank();
        layout.section(&format!(
            "Component \"{}\"",
            args.component.as_deref().unwrap_or_default()
        ));
        for skill in skills {
            layout.bullet(&format!("{} — {}", skill.name, skill.path.display()));
        }
    }
    emit_human(layout);
    Ok(())
}
