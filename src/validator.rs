use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::{ProbeConfig, PING_PATH};
use crate::error::ContractError;
use crate::schema::PluginSchema;

/// Checks a backend's observable surface against the plugin contracts.
///
/// Each call is one blocking request-then-assert unit: it owns its own
/// response buffer and shares no mutable state with sibling checks.
pub struct ContractChecker {
    client: Client,
    base_url: Url,
    require_non_empty: bool,
}

impl ContractChecker {
    pub fn new(
        base_url: Url,
        timeout_secs: u64,
        require_non_empty: bool,
    ) -> Result<Self, ContractError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            require_non_empty,
        })
    }

    pub fn from_config(config: &ProbeConfig) -> Result<Self, ContractError> {
        Self::new(
            config.base_url.clone(),
            config.timeout_secs,
            config.require_sources,
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// GET /ping checks liveness only, no body contract.
    pub async fn ping(&self) -> Result<(), ContractError> {
        let url = self.endpoint(PING_PATH);
        let response = self.client.get(&url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(ContractError::StatusMismatch(response.status()));
        }
        Ok(())
    }

    /// GET /plugins/{plugin}/sources and run the contract chain: status,
    /// content-type, array shape, required fields, pinned values. Fail-fast.
    /// Returns the number of records on success.
    pub async fn check_sources(&self, schema: &PluginSchema) -> Result<usize, ContractError> {
        let url = self.endpoint(&schema.sources_path());
        debug!(plugin = schema.plugin, url = %url, "Checking sources contract");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ContractError::StatusMismatch(status));
        }

        // Exact match, charset included; "application/json" alone fails
        let actual = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if actual != schema.content_type {
            return Err(ContractError::ContentTypeMismatch {
                expected: schema.content_type.to_string(),
                actual,
            });
        }

        let raw = response.text().await?;
        let body: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                return Err(ContractError::ShapeMismatch(format!("invalid JSON: {}", e)));
            }
        };

        check_records(&body, schema, self.require_non_empty)
    }
}

/// Body half of the contract chain, kept pure so the field assertions run
/// without a live backend.
pub fn check_records(
    body: &Value,
    schema: &PluginSchema,
    require_non_empty: bool,
) -> Result<usize, ContractError> {
    let records = match body.as_array() {
        Some(records) => records,
        None => {
            return Err(ContractError::ShapeMismatch(format!(
                "got {}",
                json_kind(body)
            )));
        }
    };

    let first = match records.first() {
        Some(first) => first,
        None => {
            // No record to inspect, so the field checks are skipped, not failed
            if require_non_empty {
                return Err(ContractError::EmptySources);
            }
            return Ok(0);
        }
    };

    for field in schema.required_fields {
        if first.get(*field).is_none() {
            return Err(ContractError::MissingField((*field).to_string()));
        }
    }

    for (field, pinned) in schema.pinned_values {
        let expected = pinned.to_value();
        let actual = first.get(*field).cloned().unwrap_or(Value::Null);
        // Strict equality: no numeric coercion, no case folding
        if actual != expected {
            return Err(ContractError::ValueMismatch {
                field: (*field).to_string(),
                expected,
                actual,
            });
        }
    }

    Ok(records.len())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
