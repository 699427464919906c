//! CLI command implementations
//!
//! Each action has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod dependency_order;
pub mod frontmatter;
pub mod info;
pub mod list;
pub mod list_components;
pub mod load_agent;
pub mod load_skill;
pub mod resolve_path;
pub mod route_command;
pub mod route_skills;
pub mod validate;

use crate::app::AppContext;
use crate::error::Result;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::TechPack(action) => match action {
            TechPackCommand::Validate(args) => validate::run(ctx, args),
            TechPackCommand::List(args) => list::run(ctx, args),
            TechPackCommand::Info(args) => info::run(ctx, args),
            TechPackCommand::ResolvePath(args) => resolve_path::run(ctx, args),
            TechPackCommand::ListComponents(args) => list_components::run(ctx, args),
            TechPackCommand::DependencyOrder(args) => dependency_order::run(ctx, args),
            TechPackCommand::RouteSkills(args) => route_skills::run(ctx, args),
            TechPackCommand::RouteCommand(args) => route_command::run(ctx, args),
            TechPackCommand::LoadSkill(args) => load_skill::run(ctx, args),
            TechPackCommand::LoadAgent(args) => load_agent::run(ctx, args),
        },
        Commands::Agent(action) => match action {
            AgentCommand::Frontmatter(args) => frontmatter::run(ctx, args),
        },
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Tech pack resolution, validation, and routing
    #[command(subcommand, name = "tech-pack")]
    TechPack(TechPackCommand),

    /// Agent file utilities
    #[command(subcommand)]
    Agent(AgentCommand),
}

#[derive(Subcommand, Debug)]
pub enum TechPackCommand {
    /// Validate a tech pack manifest (pre-install)
    Validate(validate::ValidateArgs),

    /// List installed tech packs
    List(list::ListArgs),

    /// Show tech pack details
    Info(info::InfoArgs),

    /// Resolve a manifest-relative path to an absolute path
    ResolvePath(resolve_path::ResolvePathArgs),

    /// List component type metadata
    ListComponents(list_components::ListComponentsArgs),

    /// Topological sort of component dependencies
    DependencyOrder(dependency_order::DependencyOrderArgs),

    /// Look up phase and component skills
    RouteSkills(route_skills::RouteSkillsArgs),

    /// Look up command handler and action info
    RouteCommand(route_command::RouteCommandArgs),

    /// Read a skill file with placeholder resolution
    LoadSkill(load_skill::LoadSkillArgs),

    /// Agent metadata and skill resolution
    LoadAgent(load_agent::LoadAgentArgs),
}

#[derive(Subcommand, Debug)]
pub enum AgentCommand {
    /// Extract YAML frontmatter metadata from an agent file
    Frontmatter(frontmatter::FrontmatterArgs),
}
