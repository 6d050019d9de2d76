//! Engine subcommands.
//!
//! Resolves credentials, then delegates to the external engine with the
//! resolved target and profiles directory appended. The engine's exit code
//! becomes the process exit code.

use crate::cli::EngineArgs;
use crate::core::config::Project;
use crate::core::resolver;
use crate::core::runner;
use crate::error::Result;

/// Run a named engine subcommand with the shared flag set.
pub fn execute(subcommand: &str, args: EngineArgs, env_override: Option<&str>) -> Result<()> {
    let mut full = vec![subcommand.to_string()];
    if args.full_refresh {
        full.push("--full-refresh".to_string());
    }
    if let Some(select) = args.select {
        full.push("--select".to_string());
        full.push(select);
    }
    if let Some(exclude) = args.exclude {
        full.push("--exclude".to_string());
        full.push(exclude);
    }
    full.extend(args.args);

    exec(&full, env_override)
}

/// Run an arbitrary engine invocation with resolved credentials.
pub fn exec(args: &[String], env_override: Option<&str>) -> Result<()> {
    if args.is_empty() {
        return Err(crate::error::Error::Other(
            "no engine subcommand specified".to_string(),
        ));
    }

    let project = Project::discover()?;
    let resolved = resolver::resolve(&project, env_override)?;
    let code = runner::exec_streaming(&project, &resolved, args)?;

    // Pass the engine's exit code through verbatim
    std::process::exit(code);
}
