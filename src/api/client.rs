use super::constants::{self, headers};
use super::entity::EntityType;
use super::error::CreateError;
use super::logging::{ApiLogger, MonitoringConfig};
use super::models::ApiEnvelope;
use crate::config::{ApiConfig, Settings};
use anyhow::Context;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// HTTP client for the tuition backend with connection pooling
#[derive(Clone)]
pub struct TuitionClient {
    base_url: String,
    http_client: reqwest::Client,
    token: Option<String>,
    api_logger: ApiLogger,
}

impl TuitionClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> anyhow::Result<Self> {
        let http_client = build_http_client(Duration::from_secs(30))?;
        Ok(Self::with_custom_client(base_url, token, http_client))
    }

    /// Create a new client with custom HTTP client configuration
    pub fn with_custom_client(base_url: impl Into<String>, token: Option<String>, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http_client,
            token,
            api_logger: ApiLogger::new(MonitoringConfig::default()),
        }
    }

    /// Build a client for a configured environment
    pub fn from_config(api: &ApiConfig, settings: &Settings) -> anyhow::Result<Self> {
        let http_client = build_http_client(Duration::from_secs(settings.request_timeout_secs))?;
        Ok(Self::with_custom_client(api.base_url.clone(), api.token.clone(), http_client))
    }

    /// Replace the monitoring configuration used for request logging
    pub fn with_monitoring(mut self, monitoring: MonitoringConfig) -> Self {
        self.api_logger = ApiLogger::new(monitoring);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn logger(&self) -> &ApiLogger {
        &self.api_logger
    }

    /// POST a record to a creation endpoint and return the created record
    pub async fn create_record(&self, endpoint: &str, data: &Value) -> Result<Value, CreateError> {
        let url = constants::collection_url(&self.base_url, endpoint);
        let context = self.api_logger.start_operation("create", endpoint);

        let mut request_headers = HashMap::new();
        request_headers.insert("Content-Type".to_string(), headers::CONTENT_TYPE_JSON.to_string());
        request_headers.insert(headers::X_CORRELATION_ID.to_string(), context.correlation_id.clone());
        if self.token.is_some() {
            request_headers.insert("Authorization".to_string(), "Bearer".to_string());
        }
        self.api_logger.log_request(&context, "POST", &url, &request_headers);

        let mut request = self
            .http_client
            .post(&url)
            .header("Content-Type", headers::CONTENT_TYPE_JSON)
            .header(headers::X_CORRELATION_ID, &context.correlation_id)
            .json(data);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let request_start = std::time::Instant::now();
        let result = match request.send().await {
            Ok(response) => {
                let status_code = response.status().as_u16();
                self.api_logger.log_response(&context, status_code, request_start.elapsed());
                parse_create_response(response).await
            }
            Err(e) => Err(CreateError::from_reqwest_error(&e)),
        };

        let error_message = result.as_ref().err().map(|e| e.to_string());
        self.api_logger.complete_operation(&context, 1, error_message.as_deref());

        result
    }

    /// GET a single record by id
    pub async fn fetch_record(&self, entity: EntityType, id: &str) -> anyhow::Result<Value> {
        let url = constants::record_url(&self.base_url, entity.endpoint(), id);
        log::debug!("Fetching {} record from {}", entity, url);

        let mut request = self
            .http_client
            .get(&url)
            .header("Accept", headers::CONTENT_TYPE_JSON);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))?;
        if !status.is_success() {
            let error = CreateError::from_response(status.as_u16(), &text);
            anyhow::bail!("Fetching {} '{}' failed with status {}: {}", entity, id, status, error);
        }

        let body: Value = serde_json::from_str(&text)
            .with_context(|| format!("Invalid JSON response from {}", url))?;
        match unwrap_envelope(body) {
            Ok(Some(record)) => Ok(record),
            Ok(None) => anyhow::bail!("{} '{}' not found", entity, id),
            Err(envelope) => {
                let error = CreateError::from_envelope(Some(status.as_u16()), &envelope);
                anyhow::bail!("Fetching {} '{}' failed: {}", entity, id, error)
            }
        }
    }
}

fn build_http_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .user_agent(constants::USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

/// Parse the response of a creation request into the created record
async fn parse_create_response(response: reqwest::Response) -> Result<Value, CreateError> {
    let status = response.status();
    let status_code = status.as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| CreateError::from_reqwest_error(&e))?;

    if !status.is_success() {
        return Err(CreateError::from_response(status_code, &text));
    }

    let body: Value = serde_json::from_str(&text).map_err(|e| CreateError::Rejected {
        status: Some(status_code),
        message: format!("Invalid JSON response: {}", e),
    })?;

    match unwrap_envelope(body) {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(CreateError::Rejected {
            status: Some(status_code),
            message: "Created record missing from response".to_string(),
        }),
        Err(envelope) => Err(CreateError::from_envelope(Some(status_code), &envelope)),
    }
}

/// Split a body into its record (`Ok`) or a failed envelope (`Err`).
///
/// Bodies without a boolean `success` field are taken as the bare record.
fn unwrap_envelope(body: Value) -> Result<Option<Value>, ApiEnvelope> {
    let is_envelope = body.get("success").is_some_and(Value::is_boolean);
    if !is_envelope {
        return Ok(Some(body).filter(|b| !b.is_null()));
    }

    let envelope = ApiEnvelope::from_value(&body);
    if envelope.success {
        Ok(envelope.data.filter(|d| !d.is_null()))
    } else {
        Err(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_envelope_success() {
        let record = unwrap_envelope(json!({"success": true, "data": {"_id": "1"}})).unwrap();
        assert_eq!(record, Some(json!({"_id": "1"})));
    }

    #[test]
    fn test_unwrap_envelope_bare_record() {
        let record = unwrap_envelope(json!({"_id": "1", "name": "Acme"})).unwrap();
        assert_eq!(record, Some(json!({"_id": "1", "name": "Acme"})));
    }

    #[test]
    fn test_unwrap_envelope_failure() {
        let envelope = unwrap_envelope(json!({"success": false, "error": "Email already exists"})).unwrap_err();
        assert_eq!(envelope.error.as_deref(), Some("Email already exists"));
    }

    #[test]
    fn test_unwrap_envelope_success_with_extra_fields() {
        let record = unwrap_envelope(json!({
            "success": true,
            "data": {"_id": "n1"},
            "code": 201,
            "meta": ["anything"]
        }))
        .unwrap();
        assert_eq!(record, Some(json!({"_id": "n1"})));
    }

    #[test]
    fn test_unwrap_envelope_without_data() {
        assert_eq!(unwrap_envelope(json!({"success": true})).unwrap(), None);
    }
}
