//! sdd-system agent frontmatter - Extract agent metadata

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, outcome_ok};
use crate::error::Result;
use crate::techpack::frontmatter;

#[derive(Args, Debug)]
pub struct FrontmatterArgs {
    /// Path to the agent markdown file
    #[arg(long)]
    pub path: PathBuf,
}

pub fn run(ctx: &AppContext, args: &FrontmatterArgs) -> Result<()> {
    let path = std::path::absolute(&args.path)?;
    let meta = frontmatter::load(&path)?;

    if ctx.output_format == OutputFormat::Json {
        return emit_json(&outcome_ok(meta));
    }

    let mut layout = HumanLayout::new();
    if let Some(name) = &meta.name {
        layout.kv("Name", name);
    }
    if let Some(description) = &meta.description {
        layout.kv("Description", description);
    }
    if let Some(model) = &meta.model {
        layout.kv("Model", model);
    }
    if let Some(skills) = &meta.skills {
        layout.kv("Skills", &skills.join(", "));
    }
    emit_human(layout);
    Ok(())
}
