//! sdd-system tech-pack load-agent - Agent metadata and skill resolution

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, outcome_ok};
use crate::error::Result;
use crate::techpack::loader;

#[derive(Args, Debug)]
pub struct LoadAgentArgs {
    /// Tech pack namespace
    #[arg(long)]
    pub namespace: String,

    /// Agent name from the agents registry
    #[arg(long)]
    pub agent: String,
}

pub fn run(ctx: &AppContext, args: &LoadAgentArgs) -> Result<()> {
    let (manifest, dir) = ctx.load_manifest(&args.namespace)?;
    let loaded = loader::load_agent(&manifest, &dir, &args.agent)?;

    if ctx.output_format == OutputFormat::Json {
        return emit_json(&outcome_ok(loaded));
    }

    let mut layout = HumanLayout::new();
    layout.title(&loaded.name);
    if let Some(description) = &loaded.description {
        layout.kv("Description", description);
    }
    if let Some(model) = &loaded.model {
        layout.kv("Model", model);
    }
    layout.kv("Prompt", &loaded.prompt.display().to_string());
    if !loaded.skills.is_empty() {
        layout.blank();
        layout.section("Skills");
        for skill in &loaded.skills {
            layout.bullet(&format!("{} — {}", skill.name, skill.path.display()));
        }
    }
    emit_human(layout);
    Ok(())
}
