//! Constants used throughout kiln.
//!
//! Centralizes magic strings and default values.

/// Configuration file name (.kiln.toml).
pub const CONFIG_FILE: &str = ".kiln.toml";

/// Local environment file name (.env).
pub const ENV_FILE: &str = ".env";

/// File that marks a dbt project root.
pub const PROJECT_MARKER: &str = "dbt_project.yml";

/// Secret store service segment in the secret name template.
pub const DEFAULT_SERVICE: &str = "snowflake";

/// Secrets Manager region used when nothing else is configured.
pub const DEFAULT_REGION: &str = "us-east-2";

/// External engine binary name.
pub const DEFAULT_ENGINE_BIN: &str = "dbt";

/// Authorization role applied when the bundle omits one.
pub const DEFAULT_ROLE: &str = "ACCOUNTADMIN";

/// Default namespace applied when the bundle omits one.
pub const DEFAULT_SCHEMA: &str = "PUBLIC";

/// Project mount point inside containers.
pub const TASK_DIR: &str = "/var/task";

/// Profiles directory inside containers.
pub const TASK_PROFILES_DIR: &str = "/var/task/profiles";

/// Profiles directory relative to the project root in local contexts.
pub const PROFILES_SUBDIR: &str = "profiles";

// Process environment variables read by kiln.

/// Deployment environment selector.
pub const ENV_ENVIRONMENT: &str = "ENVIRONMENT";

/// Forces the secret store for dev environments when set to "true".
pub const ENV_USE_AWS_SECRETS: &str = "USE_AWS_SECRETS";

/// Forces the credential source ("aws" or "env") regardless of environment.
pub const ENV_SECRETS_SOURCE: &str = "KILN_SECRETS_SOURCE";

/// Secrets Manager endpoint override, for localstack-style testing.
pub const ENV_SM_ENDPOINT: &str = "KILN_SM_ENDPOINT";

// Connection contract handed to the engine's child process.

pub const VAR_ACCOUNT: &str = "SNOWFLAKE_ACCOUNT";
pub const VAR_USER: &str = "SNOWFLAKE_USER";
pub const VAR_PASSWORD: &str = "SNOWFLAKE_PASSWORD";
pub const VAR_PRIVATE_KEY: &str = "SNOWFLAKE_PRIVATE_KEY";
pub const VAR_PRIVATE_KEY_PASSPHRASE: &str = "SNOWFLAKE_PRIVATE_KEY_PASSPHRASE";
pub const VAR_ROLE: &str = "SNOWFLAKE_ROLE";
pub const VAR_DATABASE: &str = "SNOWFLAKE_DATABASE";
pub const VAR_WAREHOUSE: &str = "SNOWFLAKE_WAREHOUSE";
pub const VAR_SCHEMA: &str = "SNOWFLAKE_SCHEMA";
pub const VAR_PROFILES_DIR: &str = "DBT_PROFILES_DIR";
pub const VAR_PROJECT_DIR: &str = "DBT_PROJECT_DIR";
pub const VAR_TARGET: &str = "DBT_TARGET";
