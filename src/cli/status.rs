//! Quick status overview command.
//!
//! Shows everything resolution would decide — environment, target, context,
//! secret name, directories — without touching the secret store.

use crate::cli::output;
use crate::core::config::Project;
use crate::core::environment::{Environment, ExecutionContext};
use crate::core::resolver::{self, SecretSource};
use crate::error::Result;

/// Show what would resolve for the current invocation.
pub fn execute(env_override: Option<&str>) -> Result<()> {
    let project = Project::discover()?;
    let environment = Environment::resolve(env_override);
    let target = environment.target();
    let context = ExecutionContext::detect();
    let source = SecretSource::select(environment);
    let (profiles_dir, project_dir) = resolver::resolve_dirs(&project, context);

    output::section("Kiln Status");
    output::kv("project", project.name());
    output::kv("environment", environment);
    output::kv("target", target);
    output::kv("context", context);
    output::kv("source", source.as_str());
    if source == SecretSource::Aws {
        output::kv("secret", project.secret_name(environment));
        output::kv("region", project.region());
    }
    output::kv("engine", project.engine_bin());
    output::kv("profiles dir", profiles_dir.display());
    output::kv("project dir", project_dir.display());

    println!();
    output::hint(&format!(
        "inspect the full contract with {}",
        output::cmd("kiln env")
    ));

    Ok(())
}
