//! Kiln - environment-aware credential resolver and dbt runner.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── engine        # run/test/seed/... + exec passthrough
//! │   ├── env           # Print the resolved contract as exports
//! │   ├── status        # Resolution overview, no secret fetch
//! │   └── completions   # Shell completions
//! ├── core/             # Core library components
//! │   ├── environment   # Environment/Target mapping, context detection
//! │   ├── config        # .kiln.toml and project discovery
//! │   ├── bundle        # Credential bundle parsing and validation
//! │   ├── store         # AWS Secrets Manager access
//! │   ├── resolver      # Resolution pipeline → ResolvedConfig
//! │   ├── runner        # Engine invocation with injected contract
//! │   └── envfile       # .env parsing for local dev
//! └── lambda            # Serverless entry point (feature "lambda")
//! ```
//!
//! # Behavior
//!
//! - Environment selectors `dev`/`staging`/`prod` map to targets
//!   `dev`/`test`/`prod`; unrecognized selectors fall back to `dev`
//! - Credentials resolve from AWS Secrets Manager
//!   (`{project}/{env}/{service}/credentials`) or, for dev, the local
//!   environment
//! - Resolution fails closed before the engine is ever invoked
//! - Engine exit codes pass through verbatim; pre-flight failures exit 2

pub mod cli;
pub mod core;
pub mod error;

#[cfg(feature = "lambda")]
pub mod lambda;
