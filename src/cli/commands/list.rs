//! sdd-system tech-pack list - List installed tech packs

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, outcome_ok};
use crate::config::TechPackEntry;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ListArgs {}

#[derive(Serialize)]
struct ListData<'a> {
    techpacks: Vec<&'a TechPackEntry>,
}

pub fn run(ctx: &AppContext, _args: &ListArgs) -> Result<()> {
    let settings = ctx.settings()?;
    let entries: Vec<&TechPackEntry> = settings.techpacks.values().collect();
    debug!(target: "tech_pack", count = entries.len(), "listing tech packs");

    if ctx.output_format == OutputFormat::Json {
        return emit_json(&outcome_ok(ListData { techpacks: entries }));
    }

    let mut layout = HumanLayout::new();
    if entries.is_empty() {
        layout.push_line("No tech packs installed");
    } else {
        layout.section("Installed tech packs");
        for entry in entries {
            layout.bullet(&format!(
                "{} — {} v{} ({})",
                entry.namespace,
                entry.name,
                entry.version,
                entry.source.mode()
            ));
        }
    }
    emit_human(layout);
    Ok(())
}
