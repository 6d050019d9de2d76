//! Error types for kiln.
//!
//! Layered by concern: secret store access, credential validation, project
//! configuration, and engine invocation. Every pre-flight failure is fatal;
//! there is no retry and no fallback credential source.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// The secret store was unreachable or returned nothing usable.
///
/// A malformed (non-JSON) payload lands here as well: the store answered,
/// but not with anything resolution can proceed on.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("secret not found: {0}")]
    NotFound(String),

    #[error("secret {0} is empty")]
    Empty(String),

    #[error("secret {name} is not valid JSON: {source}")]
    Malformed {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to fetch secret {name}: {message}")]
    Fetch { name: String, message: String },

    #[error("failed to start secret store runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// A required connection field was absent after the bundle was parsed.
#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("missing required credential field: {0}")]
    MissingField(&'static str),

    #[error("missing authentication material: set password or private_key")]
    NoAuthMaterial,
}

/// Problems reading or parsing `.kiln.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid .kiln.toml: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Problems locating or starting the external engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("engine binary not found: {0}")]
    NotFound(String),

    #[error("failed to start engine: {0}")]
    Spawn(#[source] std::io::Error),
}
