//! Snowflake credential bundle.
//!
//! A bundle is fetched once per invocation, validated, and handed to the
//! engine as child-process environment variables. It is never persisted and
//! never mutated.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::core::constants;
use crate::error::{CredentialsError, Result, SecretError};

/// Authentication material carried by a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMaterial {
    Password(String),
    PrivateKey {
        key: String,
        passphrase: Option<String>,
    },
}

/// Connection fields for the transformation engine.
///
/// All fields deserialize defaulted so a sparse secret payload parses; the
/// required-field policy is enforced by [`SecretBundle::validate`], not by
/// the deserializer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SecretBundle {
    pub account: String,
    pub user: String,
    password: String,
    private_key: String,
    private_key_passphrase: String,
    role: String,
    pub database: String,
    pub warehouse: String,
    schema: String,
}

impl SecretBundle {
    /// Parse a bundle from a secret store payload.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::Malformed` for non-JSON payloads.
    pub fn from_json(name: &str, payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|source| {
            SecretError::Malformed {
                name: name.to_string(),
                source,
            }
            .into()
        })
    }

    /// Build a bundle from the process environment, overlaid with values
    /// from a `.env` file. Process variables win over file entries.
    pub fn from_local(overlay: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| -> String {
            std::env::var(key)
                .ok()
                .filter(|v| !v.is_empty())
                .or_else(|| overlay.get(key).cloned())
                .unwrap_or_default()
        };

        Self {
            account: get(constants::VAR_ACCOUNT),
            user: get(constants::VAR_USER),
            password: get(constants::VAR_PASSWORD),
            private_key: get(constants::VAR_PRIVATE_KEY),
            private_key_passphrase: get(constants::VAR_PRIVATE_KEY_PASSPHRASE),
            role: get(constants::VAR_ROLE),
            database: get(constants::VAR_DATABASE),
            warehouse: get(constants::VAR_WAREHOUSE),
            schema: get(constants::VAR_SCHEMA),
        }
    }

    /// Authorization role, defaulting to ACCOUNTADMIN.
    pub fn role(&self) -> &str {
        if self.role.trim().is_empty() {
            constants::DEFAULT_ROLE
        } else {
            &self.role
        }
    }

    /// Default namespace, defaulting to PUBLIC.
    pub fn schema(&self) -> &str {
        if self.schema.trim().is_empty() {
            constants::DEFAULT_SCHEMA
        } else {
            &self.schema
        }
    }

    /// Authentication material, preferring a password when both are set.
    pub fn auth(&self) -> Option<AuthMaterial> {
        if !self.password.trim().is_empty() {
            return Some(AuthMaterial::Password(self.password.clone()));
        }
        if !self.private_key.trim().is_empty() {
            let passphrase = if self.private_key_passphrase.is_empty() {
                None
            } else {
                Some(self.private_key_passphrase.clone())
            };
            return Some(AuthMaterial::PrivateKey {
                key: self.private_key.clone(),
                passphrase,
            });
        }
        None
    }

    /// Enforce the required-field policy: account, user, and authentication
    /// material must be non-empty. Resolution fails closed otherwise, before
    /// any engine work begins.
    pub fn validate(&self) -> Result<()> {
        if self.account.trim().is_empty() {
            return Err(CredentialsError::MissingField("account").into());
        }
        if self.user.trim().is_empty() {
            return Err(CredentialsError::MissingField("user").into());
        }
        if self.auth().is_none() {
            return Err(CredentialsError::NoAuthMaterial.into());
        }
        Ok(())
    }
}
