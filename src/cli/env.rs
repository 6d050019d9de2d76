//! Env command.
//!
//! Resolves credentials and prints the full connection contract as shell
//! `export` lines, for `eval $(kiln env)` style use. Values go to stdout in
//! the clear; that is the point of the command.

use crate::core::config::Project;
use crate::core::envfile;
use crate::core::resolver;
use crate::error::Result;

/// Print the resolved contract as shell exports.
pub fn execute(env_override: Option<&str>) -> Result<()> {
    let project = Project::discover()?;
    let resolved = resolver::resolve(&project, env_override)?;

    for (key, value) in resolved.env_pairs() {
        println!("{}", envfile::export_line(key, &value));
    }

    Ok(())
}
