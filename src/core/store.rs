//! AWS Secrets Manager access.
//!
//! One fetch per invocation. The CLI bridges the async SDK through a
//! current-thread runtime; the Lambda runtime calls the async path directly.
//!
//! Credentials for the store itself come from the default provider chain
//! (IAM role, `AWS_ACCESS_KEY_ID`, credentials file).

use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata};
use tracing::{debug, trace};

use crate::core::bundle::SecretBundle;
use crate::core::constants;
use crate::error::{Result, SecretError};

/// Fetch and parse a secret bundle.
///
/// # Errors
///
/// Returns `SecretError` when the secret is missing, empty, malformed, or
/// the store cannot be reached.
pub async fn fetch(name: &str, region: &str) -> Result<SecretBundle> {
    debug!(secret = name, region, "fetching secret bundle");

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()));
    if let Some(endpoint) = endpoint_override() {
        loader = loader.endpoint_url(endpoint);
    }
    let config = loader.load().await;
    let client = aws_sdk_secretsmanager::Client::new(&config);

    let output = client
        .get_secret_value()
        .secret_id(name)
        .send()
        .await
        .map_err(|err| classify(name, err))?;

    parse_payload(name, output.secret_string())
}

/// Turn a raw store response into a bundle.
///
/// A missing or blank secret string fails closed, same as an unreachable
/// secret.
fn parse_payload(name: &str, payload: Option<&str>) -> Result<SecretBundle> {
    let payload = payload.unwrap_or_default();
    if payload.trim().is_empty() {
        return Err(SecretError::Empty(name.to_string()).into());
    }

    trace!(payload_len = payload.len(), "secret payload received");
    SecretBundle::from_json(name, payload)
}

/// Fetch a secret bundle from synchronous callers.
pub fn fetch_blocking(name: &str, region: &str) -> Result<SecretBundle> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(SecretError::Runtime)?;
    rt.block_on(fetch(name, region))
}

fn endpoint_override() -> Option<String> {
    std::env::var(constants::ENV_SM_ENDPOINT)
        .ok()
        .filter(|s| !s.trim().is_empty())
}

fn classify(
    name: &str,
    err: aws_sdk_secretsmanager::error::SdkError<
        aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError,
    >,
) -> crate::error::Error {
    let code = err.as_service_error().and_then(|e| e.code()).map(str::to_owned);
    let message = DisplayErrorContext(&err).to_string();
    classify_code(name, code.as_deref(), message)
}

fn classify_code(name: &str, code: Option<&str>, message: String) -> crate::error::Error {
    if code == Some("ResourceNotFoundException") {
        SecretError::NotFound(name.to_string()).into()
    } else {
        SecretError::Fetch {
            name: name.to_string(),
            message,
        }
        .into()
    }
}
