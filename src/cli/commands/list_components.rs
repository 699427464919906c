//! sdd-system tech-pack list-components - Component type metadata

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, outcome_ok};
use crate::error::Result;
use crate::techpack::router::{self, ComponentInfo};

#[derive(Args, Debug)]
pub struct ListComponentsArgs {
    /// Tech pack namespace
    #[arg(long)]
    pub namespace: String,
}

#[derive(Serialize)]
struct ComponentsData {
    components: Vec<ComponentInfo>,
}

pub fn run(ctx: &AppContext, args: &ListComponentsArgs) -> Result<()> {
    let (manifest, _) = ctx.load_manifest(&args.namespace)?;
    let components = router::list_components(&manifest);

    if ctx.output_format == OutputFormat::Json {
        return emit_json(&outcome_ok(ComponentsData { components }));
    }

    let mut layout = HumanLayout::new();
    if components.is_empty() {
        layout.push_line("No component types declared");
    } else {
        layout.section("Component types");
        for component in &components {
            let mut line = format!("{} — {}", component.name, component.description);
            if component.singleton {
                line.push_str(" [singleton]");
            }
            layout.bullet(&line);
            if !component.depends_on.is_empty() {
                layout.push_line(format!("    depends on: {}", component.depends_on.join(", ")));
            }
        }
    }
    emit_human(layout);
    Ok(())
}
