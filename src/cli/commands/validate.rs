//! sdd-system tech-pack validate - Validate a tech pack directory

use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, outcome_ok};
use crate::error::Result;
use crate::techpack::validate::validate_dir;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the tech pack directory
    #[arg(long)]
    pub path: PathBuf,
}

pub fn run(ctx: &AppContext, args: &ValidateArgs) -> Result<()> {
    let dir = std::path::absolute(&args.path)?;
    debug!(target: "tech_pack", dir = %dir.display(), "validating tech pack");

    let report = validate_dir(&dir)?.into_result()?;

    let message = format!(
        "Tech pack \"{}\" ({}) is valid — {} component types, {} command namespaces",
        report.name, report.namespace, report.component_types, report.command_namespaces
    );

    if ctx.output_format == OutputFormat::Json {
        let mut outcome = outcome_ok(serde_json::json!({
            "name": report.name,
            "namespace": report.namespace,
            "component_types": report.component_types,
            "command_namespaces": report.command_namespaces,
        }));
        outcome.message = Some(message);
        return emit_json(&outcome);
    }

    let mut layout = HumanLayout::new();
    layout.title("Validation");
    layout.kv("Tech pack", &format!("{} ({})", report.name, report.namespace));
    layout.kv("Directory", &dir.display().to_string());
    layout.kv("Components", &report.component_types.to_string());
    layout.kv("Commands", &report.command_namespaces.to_string());
    layout.blank();
    layout.push_line("OK");
    emit_human(layout);
    Ok(())
}
