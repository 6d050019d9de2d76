//! Command-line interface.

pub mod completions;
pub mod engine;
pub mod env;
pub mod output;
pub mod status;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Kiln - resolve deployment credentials, then run dbt.
#[derive(Parser)]
#[command(
    name = "kiln",
    about = "Resolve deployment credentials and run dbt against the right target",
    version,
    after_help = "Load the kiln. Fire the models. 🔥"
)]
pub struct Cli {
    /// Deployment environment (dev, staging, prod)
    #[arg(long = "env", global = true, value_name = "ENVIRONMENT")]
    pub environment: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Arguments shared by the engine subcommands.
#[derive(Args)]
pub struct EngineArgs {
    /// Rebuild incremental models from scratch
    #[arg(long)]
    pub full_refresh: bool,

    /// Select specific models
    #[arg(long)]
    pub select: Option<String>,

    /// Exclude specific models
    #[arg(long)]
    pub exclude: Option<String>,

    /// Extra arguments passed through to the engine
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Run the transformation models
    Run(EngineArgs),

    /// Run the model tests
    Test(EngineArgs),

    /// Load seed data
    Seed(EngineArgs),

    /// Execute snapshots
    Snapshot(EngineArgs),

    /// Build models and tests together
    Build(EngineArgs),

    /// Compile models without running them
    Compile(EngineArgs),

    /// Run an arbitrary engine subcommand (e.g. `kiln exec docs generate`)
    Exec {
        /// Engine subcommand and arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print the resolved connection contract as shell exports
    Env,

    /// Show what would resolve, without fetching secrets
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Execute a command.
pub fn execute(command: Command, env_override: Option<String>) -> crate::error::Result<()> {
    use Command::*;

    let env_override = env_override.as_deref();
    match command {
        Run(args) => engine::execute("run", args, env_override),
        Test(args) => engine::execute("test", args, env_override),
        Seed(args) => engine::execute("seed", args, env_override),
        Snapshot(args) => engine::execute("snapshot", args, env_override),
        Build(args) => engine::execute("build", args, env_override),
        Compile(args) => engine::execute("compile", args, env_override),
        Exec { args } => engine::exec(&args, env_override),
        Env => env::execute(env_override),
        Status => status::execute(env_override),
        Completions { shell } => completions::execute(shell),
    }
}
