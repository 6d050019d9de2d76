//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a kiln command with a controlled environment.
    ///
    /// Returns a Command configured with:
    /// - Current directory set to the test project directory
    /// - The fake engine bin directory prepended to PATH
    /// - Ambient selector/context variables removed for determinism
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("kiln").expect("failed to find kiln binary");
        cmd.current_dir(self.dir.path());

        let path = format!(
            "{}:{}",
            self.bin.path().display(),
            std::env::var("PATH").unwrap_or_default()
        );
        cmd.env("PATH", path);

        for var in [
            "ENVIRONMENT",
            "USE_AWS_SECRETS",
            "KILN_SECRETS_SOURCE",
            "GITHUB_ACTIONS",
            "GITHUB_REF_NAME",
            "GITHUB_BASE_REF",
            "DOCKER_CONTAINER",
            "AWS_LAMBDA_FUNCTION_NAME",
            "AWS_EXECUTION_ENV",
            "AWS_REGION",
            "DBT_PROFILES_DIR",
            "DBT_PROJECT_DIR",
            "SNOWFLAKE_ACCOUNT",
            "SNOWFLAKE_USER",
            "SNOWFLAKE_PASSWORD",
            "SNOWFLAKE_PRIVATE_KEY",
            "SNOWFLAKE_PRIVATE_KEY_PASSPHRASE",
            "SNOWFLAKE_ROLE",
            "SNOWFLAKE_DATABASE",
            "SNOWFLAKE_WAREHOUSE",
            "SNOWFLAKE_SCHEMA",
        ] {
            cmd.env_remove(var);
        }

        cmd
    }

    /// A kiln command with the standard dev credentials exported.
    pub fn cmd_with_creds(&self) -> Command {
        let mut cmd = self.cmd();
        for (key, value) in super::fixtures::PASSWORD_CREDS {
            cmd.env(key, value);
        }
        cmd
    }

    /// Shortcut for `kiln status`.
    pub fn status(&self) -> Output {
        self.cmd()
            .arg("status")
            .output()
            .expect("failed to run kiln status")
    }

    /// Shortcut for `kiln env` with credentials present.
    pub fn env_exports(&self) -> Output {
        self.cmd_with_creds()
            .arg("env")
            .output()
            .expect("failed to run kiln env")
    }
}
