//! Structured logging with correlation tracking for backend calls
//!
//! Every creation request and every duplication run gets a correlation id.
//! Events are emitted as single-line JSON objects through the `log` facade so
//! a run can be followed in the log file with a plain grep.

use serde_json::json;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use log::{debug, error, info, warn};

/// Monitoring and logging configuration
#[derive(Debug, Clone)]
pub struct MonitoringConfig {
    pub request_logging: bool,
    pub correlation_ids: bool,
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            request_logging: true,
            correlation_ids: true,
            log_level: LogLevel::Info,
        }
    }
}

impl MonitoringConfig {
    /// Only failures are logged
    pub fn quiet() -> Self {
        Self {
            request_logging: false,
            correlation_ids: false,
            log_level: LogLevel::Error,
        }
    }

    /// Request and response details included
    pub fn verbose() -> Self {
        Self {
            request_logging: true,
            correlation_ids: true,
            log_level: LogLevel::Debug,
        }
    }
}

/// Structured logger for backend operations
#[derive(Debug, Clone)]
pub struct ApiLogger {
    config: MonitoringConfig,
}

/// Context for one logical operation (a create call or a duplication run)
#[derive(Debug, Clone)]
pub struct OperationContext {
    pub correlation_id: String,
    pub operation_type: String,
    pub entity: String,
    pub start_time: Instant,
}

impl ApiLogger {
    pub fn new(config: MonitoringConfig) -> Self {
        Self { config }
    }

    /// Start tracking a new operation; a fresh correlation id is generated
    /// unless correlation ids are disabled
    pub fn start_operation(&self, operation_type: &str, entity: &str) -> OperationContext {
        let correlation_id = if self.config.correlation_ids {
            uuid::Uuid::new_v4().to_string()
        } else {
            String::new()
        };

        let context = OperationContext {
            correlation_id,
            operation_type: operation_type.to_string(),
            entity: entity.to_string(),
            start_time: Instant::now(),
        };

        if self.config.request_logging && self.should_log(LogLevel::Info) {
            let log_data = json!({
                "event": "operation_started",
                "correlation_id": context.correlation_id,
                "operation_type": context.operation_type,
                "entity": context.entity,
                "timestamp": chrono::Utc::now().to_rfc3339()
            });

            info!("Operation Started: {}", log_data);
        }

        context
    }

    /// Log HTTP request details
    pub fn log_request(&self, context: &OperationContext, method: &str, url: &str, headers: &HashMap<String, String>) {
        if !self.config.request_logging || !self.should_log(LogLevel::Debug) {
            return;
        }

        let log_data = json!({
            "event": "http_request",
            "correlation_id": context.correlation_id,
            "entity": context.entity,
            "method": method,
            "url": url,
            "headers": sanitize_headers(headers),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        debug!("HTTP Request: {}", log_data);
    }

    /// Log HTTP response status and latency
    pub fn log_response(&self, context: &OperationContext, status_code: u16, duration: Duration) {
        if !self.config.request_logging || !self.should_log(LogLevel::Debug) {
            return;
        }

        let log_data = json!({
            "event": "http_response",
            "correlation_id": context.correlation_id,
            "entity": context.entity,
            "status_code": status_code,
            "duration_ms": duration.as_millis(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if status_code >= 400 {
            warn!("HTTP Response (Error): {}", log_data);
        } else {
            debug!("HTTP Response: {}", log_data);
        }
    }

    /// Log a conflict retry with the email about to be submitted
    pub fn log_conflict_retry(&self, context: &OperationContext, attempt: u32, next_email: Option<&str>, error: &str) {
        if !self.should_log(LogLevel::Warn) {
            return;
        }

        let log_data = json!({
            "event": "duplicate_retry",
            "correlation_id": context.correlation_id,
            "entity": context.entity,
            "attempt": attempt,
            "next_email": next_email,
            "error": error,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        warn!("Conflict Retry: {}", log_data);
    }

    /// Complete an operation
    pub fn complete_operation(&self, context: &OperationContext, attempts: u32, error_message: Option<&str>) {
        let success = error_message.is_none();
        let level = if success { LogLevel::Info } else { LogLevel::Error };
        if !self.should_log(level) {
            return;
        }

        let log_data = json!({
            "event": "operation_completed",
            "correlation_id": context.correlation_id,
            "operation_type": context.operation_type,
            "entity": context.entity,
            "duration_ms": context.elapsed().as_millis(),
            "attempts": attempts,
            "success": success,
            "error_message": error_message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if success {
            info!("Operation Completed: {}", log_data);
        } else {
            error!("Operation Failed: {}", log_data);
        }
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level <= self.config.log_level
    }
}

impl OperationContext {
    /// Elapsed time since the operation started
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Redact credentials from headers before they reach the log
fn sanitize_headers(headers: &HashMap<String, String>) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(key, value)| {
            let key_lower = key.to_lowercase();
            if key_lower.contains("authorization") || key_lower.contains("token") || key_lower.contains("key") {
                (key.clone(), "[REDACTED]".to_string())
            } else {
                (key.clone(), value.clone())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_context_creation() {
        let logger = ApiLogger::new(MonitoringConfig::verbose());
        let context = logger.start_operation("duplicate", "Student");

        assert_eq!(context.operation_type, "duplicate");
        assert_eq!(context.entity, "Student");
        assert!(uuid::Uuid::parse_str(&context.correlation_id).is_ok());
    }

    #[test]
    fn test_correlation_ids_disabled() {
        let logger = ApiLogger::new(MonitoringConfig::quiet());
        let context = logger.start_operation("create", "/api/fees");
        assert!(context.correlation_id.is_empty());
    }

    #[test]
    fn test_header_sanitization() {
        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), "Bearer secret-token".to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("X-API-Key".to_string(), "secret-key".to_string());

        let sanitized = sanitize_headers(&headers);

        assert_eq!(sanitized.get("Authorization"), Some(&"[REDACTED]".to_string()));
        assert_eq!(sanitized.get("Content-Type"), Some(&"application/json".to_string()));
        assert_eq!(sanitized.get("X-API-Key"), Some(&"[REDACTED]".to_string()));
    }

    #[test]
    fn test_log_level_filtering() {
        let logger = ApiLogger::new(MonitoringConfig {
            request_logging: true,
            correlation_ids: true,
            log_level: LogLevel::Warn,
        });

        assert!(logger.should_log(LogLevel::Error));
        assert!(logger.should_log(LogLevel::Warn));
        assert!(!logger.should_log(LogLevel::Info));
        assert!(!logger.should_log(LogLevel::Debug));
    }
}
