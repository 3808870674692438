//! Error kinds for record creation and duplication
//!
//! The backend reports failures as a JSON envelope with a free-form `error`
//! string. Those responses are classified into [`CreateError`] once, at the
//! HTTP boundary, so the duplication logic only ever matches on kinds.

use super::models::ApiEnvelope;

/// Message used when the backend gives no usable error text
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to duplicate record";

/// Wording the backend uses for an email uniqueness violation
const EMAIL_EXISTS_MESSAGE: &str = "email already exists";

/// Structured error codes that also identify an email uniqueness violation
const EMAIL_CONFLICT_CODES: &[&str] = &["DUPLICATE_EMAIL", "EMAIL_EXISTS"];

/// Failure of a single creation call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CreateError {
    /// A uniqueness constraint on `field` was violated
    #[error("{message}")]
    Conflict { field: String, message: String },
    /// One or more fields failed validation
    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<(String, String)>,
    },
    /// The request never produced a response (connect, timeout, DNS)
    #[error("Network error: {0}")]
    Transport(String),
    /// Any other non-success or unparseable response
    #[error("{message}")]
    Rejected { status: Option<u16>, message: String },
}

impl CreateError {
    /// Whether this is the one conflict class the duplicator recovers from
    pub fn is_email_conflict(&self) -> bool {
        matches!(self, CreateError::Conflict { field, .. } if field == "email")
    }

    /// Classify a transport-level reqwest failure
    pub fn from_reqwest_error(error: &reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            CreateError::Rejected {
                status: Some(status.as_u16()),
                message: error.to_string(),
            }
        } else {
            CreateError::Transport(error.to_string())
        }
    }

    /// Classify a non-success response from its status code and raw body
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) if value.is_object() => Self::from_envelope(Some(status), &ApiEnvelope::from_value(&value)),
            _ => {
                let text = body.trim();
                let message = if text.is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_string()
                } else {
                    text.to_string()
                };
                CreateError::Rejected {
                    status: Some(status),
                    message,
                }
            }
        }
    }

    /// Classify a failed envelope
    pub fn from_envelope(status: Option<u16>, envelope: &ApiEnvelope) -> Self {
        let details = envelope.field_errors();
        let error_text = envelope
            .error
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        if is_email_conflict(status, envelope, error_text, &details) {
            return CreateError::Conflict {
                field: "email".to_string(),
                message: error_text.unwrap_or("Email already exists").to_string(),
            };
        }

        if status == Some(409) {
            let field = details
                .first()
                .map(|(field, _)| field.clone())
                .unwrap_or_else(|| "unknown".to_string());
            return CreateError::Conflict {
                field,
                message: error_text.unwrap_or(GENERIC_FAILURE_MESSAGE).to_string(),
            };
        }

        if !details.is_empty() {
            let message = details
                .iter()
                .map(|(field, message)| format!("{}: {}", field, message))
                .collect::<Vec<_>>()
                .join(", ");
            return CreateError::Validation { message, details };
        }

        if matches!(status, Some(400) | Some(422)) {
            if let Some(text) = error_text {
                return CreateError::Validation {
                    message: text.to_string(),
                    details,
                };
            }
        }

        CreateError::Rejected {
            status,
            message: error_text.unwrap_or(GENERIC_FAILURE_MESSAGE).to_string(),
        }
    }
}

fn is_email_conflict(
    status: Option<u16>,
    envelope: &ApiEnvelope,
    error_text: Option<&str>,
    details: &[(String, String)],
) -> bool {
    if let Some(code) = envelope.code_text() {
        if EMAIL_CONFLICT_CODES.iter().any(|c| c.eq_ignore_ascii_case(&code)) {
            return true;
        }
    }

    if error_text.is_some_and(|text| text.eq_ignore_ascii_case(EMAIL_EXISTS_MESSAGE)) {
        return true;
    }

    let email_detail = details.iter().find(|(field, _)| field == "email");
    match email_detail {
        Some((_, message)) => {
            status == Some(409) || message.trim().eq_ignore_ascii_case(EMAIL_EXISTS_MESSAGE)
        }
        None => false,
    }
}

/// Terminal failure of a duplication call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DuplicateError {
    /// A failure that is never retried (validation, transport, unknown)
    #[error("{source}")]
    Failed { attempts: u32, source: CreateError },
    /// Every attempt hit an email conflict
    #[error("{last} (gave up after {attempts} attempts)")]
    Exhausted { attempts: u32, last: CreateError },
}

impl DuplicateError {
    /// Human-readable error for display next to the failed action
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Number of creation requests submitted before giving up
    pub fn attempts(&self) -> u32 {
        match self {
            DuplicateError::Failed { attempts, .. } => *attempts,
            DuplicateError::Exhausted { attempts, .. } => *attempts,
        }
    }

    /// The last creation error observed
    pub fn last_error(&self) -> &CreateError {
        match self {
            DuplicateError::Failed { source, .. } => source,
            DuplicateError::Exhausted { last, .. } => last,
        }
    }
}
