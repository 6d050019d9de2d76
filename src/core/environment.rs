//! Deployment environment and execution target model.
//!
//! The environment selector chooses which credential bundle to fetch; the
//! execution target chooses which engine connection profile to use. The two
//! are related by a fixed table: staging deploys against the `test` target.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::core::constants;

/// Supported deployment environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    /// Parse a selector token. Unrecognized values fall back to `Dev`.
    pub fn parse(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "staging" => Self::Staging,
            "prod" => Self::Prod,
            _ => Self::Dev,
        }
    }

    /// Parse a target profile token back to its environment.
    ///
    /// The `test` profile belongs to staging; every other token reads as a
    /// plain environment selector.
    pub fn from_target_token(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case("test") {
            Self::Staging
        } else {
            Self::parse(token)
        }
    }

    /// Determine the environment from an explicit override, the
    /// `ENVIRONMENT` variable, or CI branch mapping, in that order.
    pub fn resolve(override_token: Option<&str>) -> Self {
        if let Some(token) = override_token {
            return Self::parse(token);
        }

        if let Ok(token) = std::env::var(constants::ENV_ENVIRONMENT) {
            if !token.trim().is_empty() {
                return Self::parse(&token);
            }
        }

        if ExecutionContext::detect() == ExecutionContext::GithubActions {
            let environment = Self::from_ci_branch();
            debug!(environment = %environment, "environment derived from CI branch");
            return environment;
        }

        Self::Dev
    }

    /// Map the CI branch to an environment.
    ///
    /// Pull requests resolve against their base branch; pushes against the
    /// current branch. `main`/`prod` deploy to prod, `staging`/`test` to
    /// staging, anything else to dev.
    fn from_ci_branch() -> Self {
        let branch = std::env::var("GITHUB_BASE_REF")
            .ok()
            .filter(|b| !b.is_empty())
            .or_else(|| std::env::var("GITHUB_REF_NAME").ok())
            .unwrap_or_default();

        match branch.as_str() {
            "main" | "prod" => Self::Prod,
            "staging" | "test" => Self::Staging,
            _ => Self::Dev,
        }
    }

    /// Execution target for this environment.
    pub fn target(self) -> Target {
        match self {
            Self::Dev => Target::Dev,
            Self::Staging => Target::Test,
            Self::Prod => Target::Prod,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Staging => "staging",
            Self::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named engine connection profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Dev,
    Test,
    Prod,
}

impl Target {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Test => "test",
            Self::Prod => "prod",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the process is running.
///
/// Containerized contexts mount the project at `/var/task`, which changes
/// how the profiles and project directories are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    Local,
    Docker,
    Lambda,
    GithubActions,
}

impl ExecutionContext {
    /// Detect the current execution context from ambient process state.
    pub fn detect() -> Self {
        if std::env::var("AWS_LAMBDA_FUNCTION_NAME").is_ok()
            || std::env::var("AWS_EXECUTION_ENV")
                .map(|v| v.starts_with("AWS_Lambda"))
                .unwrap_or(false)
        {
            return Self::Lambda;
        }

        if std::env::var("GITHUB_ACTIONS").as_deref() == Ok("true") {
            return Self::GithubActions;
        }

        if Path::new("/.dockerenv").exists()
            || std::env::var("DOCKER_CONTAINER").as_deref() == Ok("true")
        {
            return Self::Docker;
        }

        Self::Local
    }

    /// Whether the project is mounted at the container task directory.
    pub fn in_container(self) -> bool {
        matches!(self, Self::Docker | Self::Lambda)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Docker => "docker",
            Self::Lambda => "lambda",
            Self::GithubActions => "github-actions",
        }
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
