//! sdd-system tech-pack dependency-order - Topological component order

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, outcome_ok};
use crate::error::Result;
use crate::techpack::DependencyGraph;

#[derive(Args, Debug)]
pub struct DependencyOrderArgs {
    /// Tech pack namespace
    #[arg(long)]
    pub namespace: String,
}

#[derive(Serialize)]
struct OrderData {
    order: Vec<String>,
}

pub fn run(ctx: &AppContext, args: &DependencyOrderArgs) -> Result<()> {
    let (manifest, _) = ctx.load_manifest(&args.namespace)?;
    let order = DependencyGraph::from_components(&manifest.components)?.topological_order()?;
    debug!(target: "tech_pack", components = order.len(), "computed dependency order");

    if ctx.output_format == OutputFormat::Json {
        return emit_json(&outcome_ok(OrderData { order }));
    }

    let mut layout = HumanLayout::new();
    layout.section("Scaffolding order");
    for (idx, name) in order.iter().enumerate() {
        layout.push_line(format!("{:>3}. {name}", idx + 1));
    }
    emit_human(layout);
    Ok(())
}
