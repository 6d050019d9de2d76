//! Serverless entry point.
//!
//! Translates a function payload into the equivalent engine invocation and
//! returns the captured result. The `lambda_runtime` crate provides the
//! tokio runtime; the `bootstrap` binary wires this module into it.
//!
//! The payload's `target` field is a dbt target profile name, passed through
//! to the engine as-is in the original deployment. Profile names map back to
//! environments before resolution, so `test` fetches the staging bundle and
//! runs `--target test`.

use lambda_runtime::{service_fn, Error as LambdaError, LambdaEvent};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::core::config::Project;
use crate::core::environment::Environment;
use crate::core::resolver;
use crate::core::runner;

/// Function payload: the serverless equivalent of the CLI surface.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunRequest {
    /// Deployment environment selector.
    pub target: String,
    /// Engine subcommand.
    pub command: String,
    pub full_refresh: bool,
    pub select: Option<String>,
    pub exclude: Option<String>,
}

impl Default for RunRequest {
    fn default() -> Self {
        Self {
            target: "prod".to_string(),
            command: "run".to_string(),
            full_refresh: false,
            select: None,
            exclude: None,
        }
    }
}

impl RunRequest {
    /// Environment this payload deploys to, derived from the target profile
    /// name. `test` is the staging profile.
    fn environment(&self) -> Environment {
        Environment::from_target_token(&self.target)
    }

    /// The engine argument list this payload stands for.
    fn to_args(&self) -> Vec<String> {
        let mut args = vec![self.command.clone()];
        if self.full_refresh {
            args.push("--full-refresh".to_string());
        }
        if let Some(select) = &self.select {
            args.push("--select".to_string());
            args.push(select.clone());
        }
        if let Some(exclude) = &self.exclude {
            args.push("--exclude".to_string());
            args.push(exclude.clone());
        }
        args
    }
}

struct Outcome {
    command: String,
    target: String,
    code: i32,
    stdout: String,
    stderr: String,
}

/// Execute one request. Failures become a 500 response, never a runtime
/// error, so the platform does not retry a doomed invocation.
pub async fn run_request(request: RunRequest) -> Value {
    match try_run(request).await {
        Ok(outcome) => {
            if outcome.code != 0 {
                error!(code = outcome.code, "engine invocation failed");
            }
            json!({
                "statusCode": if outcome.code == 0 { 200 } else { 500 },
                "body": {
                    "command": outcome.command,
                    "returncode": outcome.code,
                    "stdout": outcome.stdout,
                    "stderr": outcome.stderr,
                    "target": outcome.target,
                    "success": outcome.code == 0,
                }
            })
        }
        Err(e) => {
            error!(error = %e, "resolution failed before engine invocation");
            json!({
                "statusCode": 500,
                "body": {
                    "error": e.to_string(),
                    "success": false,
                }
            })
        }
    }
}

async fn try_run(request: RunRequest) -> crate::error::Result<Outcome> {
    let project = Project::discover()?;
    let resolved = resolver::resolve_async(&project, Some(request.environment().as_str())).await?;
    let args = request.to_args();

    info!(command = %args.join(" "), target = %resolved.target, "running engine");

    let target = resolved.target.to_string();
    let command = args.join(" ");
    let output = tokio::task::spawn_blocking(move || {
        runner::exec_captured(&project, &resolved, &args)
    })
    .await
    .map_err(|e| crate::error::Error::Other(format!("engine task panicked: {}", e)))??;

    Ok(Outcome {
        command,
        target,
        code: output.code,
        stdout: output.stdout,
        stderr: output.stderr,
    })
}

async fn handle(event: LambdaEvent<RunRequest>) -> Result<Value, LambdaError> {
    let (request, _context) = event.into_parts();
    Ok(run_request(request).await)
}

/// Lambda runtime entry point.
pub async fn run() -> Result<(), LambdaError> {
    let filter = EnvFilter::try_from_env("KILN_LOG").unwrap_or_else(|_| EnvFilter::new("kiln=info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .without_time()
        .init();

    lambda_runtime::run(service_fn(handle)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_defaults_match_the_original_handler() {
        let request: RunRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.target, "prod");
        assert_eq!(request.command, "run");
        assert!(!request.full_refresh);
    }

    #[test]
    fn test_target_payload_selects_the_staging_environment() {
        let request: RunRequest = serde_json::from_str(r#"{"target":"test"}"#).unwrap();
        assert_eq!(request.environment(), Environment::Staging);
        assert_eq!(request.environment().target().as_str(), "test");
    }

    #[test]
    fn default_payload_deploys_to_prod() {
        let request = RunRequest::default();
        assert_eq!(request.environment(), Environment::Prod);
    }

    #[test]
    fn payload_translates_to_engine_args() {
        let request: RunRequest = serde_json::from_str(
            r#"{"target":"staging","command":"test","full_refresh":true,"select":"orders","exclude":"legacy"}"#,
        )
        .unwrap();
        assert_eq!(
            request.to_args(),
            vec![
                "test",
                "--full-refresh",
                "--select",
                "orders",
                "--exclude",
                "legacy"
            ]
        );
    }
}
