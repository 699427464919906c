//! sdd-system tech-pack route-command - Command handler lookup

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, outcome_ok};
use crate::error::Result;
use crate::techpack::router;

#[derive(Args, Debug)]
pub struct RouteCommandArgs {
    /// Tech pack namespace
    #[arg(long)]
    pub namespace: String,

    /// Command namespace key from the manifest
    #[arg(long)]
    pub command: String,

    /// Action name within the command namespace
    #[arg(long)]
    pub action: String,
}

pub fn run(ctx: &AppContext, args: &RouteCommandArgs) -> Result<()> {
    let (manifest, _) = ctx.load_manifest(&args.namespace)?;
    let routed = router::route_command(&manifest, &args.command, &args.action)?;

    if ctx.output_format == OutputFormat::Json {
        return emit_json(&outcome_ok(routed));
    }

    let mut layout = HumanLayout::new();
    layout.title(&format!("{} {}", args.command, args.action));
    layout.kv("Handler", &routed.handler);
    layout.kv("Description", &routed.description);
    layout.kv("Public", if routed.public { "yes" } else { "no" });
    if let Some(destructive) = routed.destructive {
        layout.kv("Destructive", if destructive { "yes" } else { "no" });
    }
    if let Some(skill) = &routed.skill {
        layout.kv("Skill", skill);
    }
    if let Some(args_schema) = &routed.args {
        layout.blank();
        layout.section("Arguments");
        for (name, arg) in args_schema {
            let required = if arg.mandatory { "required" } else { "optional" };
            layout.bullet(&format!("{name} ({}, {required}) — {}", arg.arg_type, arg.description));
        }
    }
    emit_human(layout);
    Ok(())
}
