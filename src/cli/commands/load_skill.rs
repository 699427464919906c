//! sdd-system tech-pack load-skill - Read a skill with placeholder resolution

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, outcome_ok};
use crate::error::Result;
use crate::techpack::loader;

#[derive(Args, Debug)]
pub struct LoadSkillArgs {
    /// Tech pack namespace
    #[arg(long)]
    pub namespace: String,

    /// Skill name from the skills registry
    #[arg(long)]
    pub skill: String,
}

pub fn run(ctx: &AppContext, args: &LoadSkillArgs) -> Result<()> {
    let (manifest, dir) = ctx.load_manifest(&args.namespace)?;
    let loaded = loader::load_skill(&manifest, &dir, &args.skill)?;

    if ctx.output_format == OutputFormat::Json {
        return emit_json(&outcome_ok(loaded));
    }

    let mut layout = HumanLayout::new();
    layout.kv("Skill", &loaded.name);
    layout.kv("Path", &loaded.path.display().to_string());
    layout.blank();
    layout.push_line(loaded.content);
    emit_human(layout);
    Ok(())
}
