//! sdd-system tech-pack resolve-path - Join the resolved directory with a relative path

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, outcome_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ResolvePathArgs {
    /// Tech pack namespace
    #[arg(long)]
    pub namespace: String,

    /// Manifest-relative path to resolve
    #[arg(long)]
    pub path: String,
}

#[derive(Serialize)]
struct ResolvedPath {
    resolved_path: String,
}

pub fn run(ctx: &AppContext, args: &ResolvePathArgs) -> Result<()> {
    let (_, dir) = ctx.resolve_techpack(&args.namespace)?;
    let resolved = dir.join(&args.path);

    if ctx.output_format == OutputFormat::Json {
        return emit_json(&outcome_ok(ResolvedPath {
            resolved_path: resolved.display().to_string(),
        }));
    }

    let mut layout = HumanLayout::new();
    layout.kv("Resolved path", &resolved.display().to_string());
    emit_human(layout);
    Ok(())
}
