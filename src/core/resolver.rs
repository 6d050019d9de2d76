//! Credential and target resolution.
//!
//! The heart of kiln: given a deployment environment, produce a validated
//! [`ResolvedConfig`] that the runner hands to the engine. The resolved
//! configuration is an explicit value; the process-global environment is
//! never mutated. Connection variables reach the engine through its child
//! process only.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::core::bundle::{AuthMaterial, SecretBundle};
use crate::core::config::Project;
use crate::core::constants;
use crate::core::environment::{Environment, ExecutionContext, Target};
use crate::core::envfile;
use crate::core::store;
use crate::error::Result;

/// Where the credential bundle comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    /// AWS Secrets Manager.
    Aws,
    /// Process environment, overlaid with the project `.env` file.
    Env,
}

impl SecretSource {
    /// Select the source for an environment.
    ///
    /// `KILN_SECRETS_SOURCE` forces either source. Otherwise dev resolves
    /// locally unless `USE_AWS_SECRETS=true`; staging and prod always use
    /// the secret store.
    pub fn select(environment: Environment) -> Self {
        match std::env::var(constants::ENV_SECRETS_SOURCE).ok().as_deref() {
            Some("aws") => return Self::Aws,
            Some("env") => return Self::Env,
            _ => {}
        }

        let use_aws = std::env::var(constants::ENV_USE_AWS_SECRETS)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        if environment == Environment::Dev && !use_aws {
            Self::Env
        } else {
            Self::Aws
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aws => "secrets-manager",
            Self::Env => "local environment",
        }
    }
}

/// Fully resolved configuration for one engine invocation.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub environment: Environment,
    pub target: Target,
    pub bundle: SecretBundle,
    pub profiles_dir: PathBuf,
    pub project_dir: PathBuf,
}

impl ResolvedConfig {
    /// The child-process environment contract handed to the engine.
    pub fn env_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            (constants::VAR_ACCOUNT, self.bundle.account.clone()),
            (constants::VAR_USER, self.bundle.user.clone()),
        ];

        match self.bundle.auth() {
            Some(AuthMaterial::Password(password)) => {
                pairs.push((constants::VAR_PASSWORD, password));
            }
            Some(AuthMaterial::PrivateKey { key, passphrase }) => {
                pairs.push((constants::VAR_PRIVATE_KEY, key));
                if let Some(passphrase) = passphrase {
                    pairs.push((constants::VAR_PRIVATE_KEY_PASSPHRASE, passphrase));
                }
            }
            None => {}
        }

        pairs.push((constants::VAR_ROLE, self.bundle.role().to_string()));
        pairs.push((constants::VAR_DATABASE, self.bundle.database.clone()));
        pairs.push((constants::VAR_WAREHOUSE, self.bundle.warehouse.clone()));
        pairs.push((constants::VAR_SCHEMA, self.bundle.schema().to_string()));
        pairs.push((
            constants::VAR_PROFILES_DIR,
            self.profiles_dir.display().to_string(),
        ));
        pairs.push((
            constants::VAR_PROJECT_DIR,
            self.project_dir.display().to_string(),
        ));
        pairs.push((constants::VAR_TARGET, self.target.to_string()));

        pairs
    }
}

/// Resolve credentials and target for an environment (blocking).
pub fn resolve(project: &Project, env_override: Option<&str>) -> Result<ResolvedConfig> {
    let environment = Environment::resolve(env_override);
    let bundle = match SecretSource::select(environment) {
        SecretSource::Aws => {
            store::fetch_blocking(&project.secret_name(environment), &project.region())?
        }
        SecretSource::Env => local_bundle(project)?,
    };
    finish(project, environment, bundle)
}

/// Async variant for the Lambda runtime.
pub async fn resolve_async(project: &Project, env_override: Option<&str>) -> Result<ResolvedConfig> {
    let environment = Environment::resolve(env_override);
    let bundle = match SecretSource::select(environment) {
        SecretSource::Aws => {
            store::fetch(&project.secret_name(environment), &project.region()).await?
        }
        SecretSource::Env => local_bundle(project)?,
    };
    finish(project, environment, bundle)
}

/// Profiles and project directories for a context, before environment
/// overrides are applied.
pub fn resolve_dirs(project: &Project, context: ExecutionContext) -> (PathBuf, PathBuf) {
    resolve_dirs_with(
        project,
        context,
        std::env::var_os(constants::VAR_PROFILES_DIR).map(PathBuf::from),
        std::env::var_os(constants::VAR_PROJECT_DIR).map(PathBuf::from),
    )
}

fn resolve_dirs_with(
    project: &Project,
    context: ExecutionContext,
    profiles_override: Option<PathBuf>,
    project_override: Option<PathBuf>,
) -> (PathBuf, PathBuf) {
    let profiles_dir = profiles_override
        .or_else(|| {
            project
                .config
                .engine
                .profiles_dir
                .clone()
                .map(|dir| absolutize(project, dir))
        })
        .unwrap_or_else(|| {
            if context.in_container() {
                PathBuf::from(constants::TASK_PROFILES_DIR)
            } else {
                project.root.join(constants::PROFILES_SUBDIR)
            }
        });

    let project_dir = project_override
        .or_else(|| {
            project
                .config
                .engine
                .project_dir
                .clone()
                .map(|dir| absolutize(project, dir))
        })
        .unwrap_or_else(|| {
            if context.in_container() {
                PathBuf::from(constants::TASK_DIR)
            } else {
                project.root.clone()
            }
        });

    (profiles_dir, project_dir)
}

fn absolutize(project: &Project, dir: PathBuf) -> PathBuf {
    if dir.is_absolute() {
        dir
    } else {
        project.root.join(dir)
    }
}

fn local_bundle(project: &Project) -> Result<SecretBundle> {
    let env_file = project.root.join(constants::ENV_FILE);
    let overlay = if env_file.exists() {
        envfile::load(&env_file)?
    } else {
        Default::default()
    };
    Ok(SecretBundle::from_local(&overlay))
}

fn finish(
    project: &Project,
    environment: Environment,
    bundle: SecretBundle,
) -> Result<ResolvedConfig> {
    bundle.validate()?;

    let target = environment.target();
    let context = ExecutionContext::detect();
    let (profiles_dir, project_dir) = resolve_dirs(project, context);

    debug!(
        environment = %environment,
        target = %target,
        context = %context,
        profiles_dir = %profiles_dir.display(),
        "resolution complete"
    );
    info!(environment = %environment, target = %target, "credentials resolved");

    Ok(ResolvedConfig {
        environment,
        target,
        bundle,
        profiles_dir,
        project_dir,
    })
}
