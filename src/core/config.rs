//! Project configuration (`.kiln.toml`).
//!
//! Everything is optional: a project with no configuration file resolves
//! with defaults derived from the project directory itself.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::environment::Environment;
use crate::error::{ConfigError, Result};

/// Contents of `.kiln.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project identity used in the secret name template.
    pub project: ProjectSection,
    /// Secret store settings.
    pub aws: AwsSection,
    /// External engine settings.
    pub engine: EngineSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    /// Project name. Defaults to the project directory name.
    pub name: Option<String>,
    /// Service segment of the secret name. Defaults to "snowflake".
    pub service: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsSection {
    /// Secrets Manager region. Falls back to `AWS_REGION`, then us-east-2.
    pub region: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    /// Engine binary name. Defaults to "dbt".
    pub bin: Option<String>,
    /// Profiles directory, relative to the project root if not absolute.
    pub profiles_dir: Option<PathBuf>,
    /// Project directory handed to the engine, relative to the root.
    pub project_dir: Option<PathBuf>,
}

impl Config {
    /// Parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse`.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        Ok(config)
    }
}

/// A discovered project: its configuration plus the directory it lives in.
#[derive(Debug)]
pub struct Project {
    pub config: Config,
    pub root: PathBuf,
}

impl Project {
    /// Discover the project from the current directory.
    ///
    /// Walks up looking for `.kiln.toml`; failing that, for the directory
    /// carrying `dbt_project.yml`; failing that, uses the current directory
    /// with defaults.
    pub fn discover() -> Result<Self> {
        let cwd = std::env::current_dir()?;

        for dir in cwd.ancestors() {
            let path = dir.join(constants::CONFIG_FILE);
            if path.exists() {
                return Ok(Self {
                    config: Config::load_from(&path)?,
                    root: dir.to_path_buf(),
                });
            }
        }

        for dir in cwd.ancestors() {
            if dir.join(constants::PROJECT_MARKER).exists() {
                debug!(root = %dir.display(), "project root from dbt_project.yml");
                return Ok(Self {
                    config: Config::default(),
                    root: dir.to_path_buf(),
                });
            }
        }

        Ok(Self {
            config: Config::default(),
            root: cwd,
        })
    }

    /// Project name used in the secret name template.
    pub fn name(&self) -> String {
        if let Some(name) = &self.config.project.name {
            return name.clone();
        }
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "default".to_string())
    }

    /// Service segment of the secret name template.
    pub fn service(&self) -> &str {
        self.config
            .project
            .service
            .as_deref()
            .unwrap_or(constants::DEFAULT_SERVICE)
    }

    /// Secret store region.
    pub fn region(&self) -> String {
        if let Some(region) = &self.config.aws.region {
            return region.clone();
        }
        std::env::var("AWS_REGION").unwrap_or_else(|_| constants::DEFAULT_REGION.to_string())
    }

    /// Engine binary name.
    pub fn engine_bin(&self) -> &str {
        self.config
            .engine
            .bin
            .as_deref()
            .unwrap_or(constants::DEFAULT_ENGINE_BIN)
    }

    /// Secret identifier for an environment:
    /// `{project}/{environment}/{service}/credentials`.
    pub fn secret_name(&self, environment: Environment) -> String {
        format!(
            "{}/{}/{}/credentials",
            self.name(),
            environment,
            self.service()
        )
    }
}
