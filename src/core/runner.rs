//! External engine invocation.
//!
//! Wraps an arbitrary engine subcommand, appending `--target` and
//! `--profiles-dir`, and injects the connection contract into the child
//! process environment. Engine exit codes pass through verbatim; this layer
//! never reinterprets them.

use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::config::Project;
use crate::core::environment::ExecutionContext;
use crate::core::resolver::ResolvedConfig;
use crate::error::{EngineError, Result};

/// Captured result of an engine invocation.
#[derive(Debug)]
pub struct EngineOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Run the engine inheriting stdio; returns its exit code.
pub fn exec_streaming(
    project: &Project,
    resolved: &ResolvedConfig,
    args: &[String],
) -> Result<i32> {
    let mut cmd = command(project, resolved, args)?;
    let status = cmd.status().map_err(EngineError::Spawn)?;
    // Signal-terminated children report as 1
    Ok(status.code().unwrap_or(1))
}

/// Run the engine capturing output, for the serverless path.
pub fn exec_captured(
    project: &Project,
    resolved: &ResolvedConfig,
    args: &[String],
) -> Result<EngineOutput> {
    let mut cmd = command(project, resolved, args)?;
    let output = cmd.output().map_err(EngineError::Spawn)?;
    Ok(EngineOutput {
        code: output.status.code().unwrap_or(1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

fn command(project: &Project, resolved: &ResolvedConfig, args: &[String]) -> Result<Command> {
    let bin = engine_path(project)?;
    let full = full_args(resolved, args);

    info!(
        engine = %bin.display(),
        args = %full.join(" "),
        target = %resolved.target,
        "invoking engine"
    );

    let mut cmd = Command::new(bin);
    cmd.args(&full);
    cmd.current_dir(&resolved.project_dir);

    // Inject the connection contract into the child environment only;
    // secret values are wiped from memory after the handoff
    for (key, value) in resolved.env_pairs() {
        let value = Zeroizing::new(value);
        cmd.env(key, value.as_str());
    }

    Ok(cmd)
}

/// Caller-supplied arguments plus the resolved target and profiles dir.
fn full_args(resolved: &ResolvedConfig, args: &[String]) -> Vec<String> {
    let mut full = args.to_vec();
    full.push("--target".to_string());
    full.push(resolved.target.to_string());
    full.push("--profiles-dir".to_string());
    full.push(resolved.profiles_dir.display().to_string());
    full
}

/// Resolve the engine binary.
///
/// Containers invoke by bare name; locally the binary must exist on PATH.
fn engine_path(project: &Project) -> Result<PathBuf> {
    let bin = project.engine_bin();
    if ExecutionContext::detect().in_container() {
        return Ok(PathBuf::from(bin));
    }
    match which::which(bin) {
        Ok(path) => {
            debug!(bin, path = %path.display(), "engine binary located");
            Ok(path)
        }
        Err(_) => Err(EngineError::NotFound(bin.to_string()).into()),
    }
}
