//! Retry state for duplication
//!
//! Only the email uniqueness conflict is recoverable: the record is resent
//! with a fresh copy suffix. Every other failure ends the run immediately.

use crate::api::{CreateError, DuplicateError};
use serde_json::Value;

/// Default ceiling on creation requests per duplication
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Attempt counter for one duplication run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    /// Zero-based number of the attempt about to be (or just) submitted
    pub attempt: u32,
    pub max_attempts: u32,
}

/// Outcome of feeding one creation result into [`RetryState::advance`]
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Created(Value),
    Retry(RetryState),
    Failed(DuplicateError),
}

impl RetryState {
    /// A ceiling of zero is treated as one attempt
    pub fn new(max_attempts: u32) -> Self {
        Self {
            attempt: 0,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Number of submissions made once the current attempt has run
    pub fn submissions(&self) -> u32 {
        self.attempt + 1
    }

    pub fn has_next(&self) -> bool {
        self.attempt + 1 < self.max_attempts
    }

    /// Decide what follows the result of the current attempt
    pub fn advance(self, outcome: Result<Value, CreateError>) -> Step {
        match outcome {
            Ok(record) => Step::Created(record),
            Err(error) if error.is_email_conflict() => {
                if self.has_next() {
                    Step::Retry(RetryState {
                        attempt: self.attempt + 1,
                        ..self
                    })
                } else {
                    Step::Failed(DuplicateError::Exhausted {
                        attempts: self.submissions(),
                        last: error,
                    })
                }
            }
            Err(error) => Step::Failed(DuplicateError::Failed {
                attempts: self.submissions(),
                source: error,
            }),
        }
    }
}

impl Default for RetryState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn email_conflict() -> CreateError {
        CreateError::Conflict {
            field: "email".to_string(),
            message: "Email already exists".to_string(),
        }
    }

    #[test]
    fn test_success_terminates() {
        let step = RetryState::default().advance(Ok(json!({"_id": "new"})));
        assert_eq!(step, Step::Created(json!({"_id": "new"})));
    }

    #[test]
    fn test_email_conflict_retries() {
        let step = RetryState::default().advance(Err(email_conflict()));
        assert_eq!(
            step,
            Step::Retry(RetryState {
                attempt: 1,
                max_attempts: DEFAULT_MAX_ATTEMPTS
            })
        );
    }

    #[test]
    fn test_last_attempt_conflict_exhausts() {
        let state = RetryState {
            attempt: 4,
            max_attempts: 5,
        };
        match state.advance(Err(email_conflict())) {
            Step::Failed(DuplicateError::Exhausted { attempts, .. }) => assert_eq!(attempts, 5),
            other => panic!("unexpected step: {:?}", other),
        }
    }

    #[test]
    fn test_other_errors_fail_fast() {
        let errors = [
            CreateError::Validation {
                message: "phone: Invalid".to_string(),
                details: vec![("phone".to_string(), "Invalid".to_string())],
            },
            CreateError::Conflict {
                field: "phone".to_string(),
                message: "Phone already exists".to_string(),
            },
            CreateError::Transport("connection refused".to_string()),
            CreateError::Rejected {
                status: Some(500),
                message: "boom".to_string(),
            },
        ];

        for error in errors {
            match RetryState::default().advance(Err(error.clone())) {
                Step::Failed(DuplicateError::Failed { attempts, source }) => {
                    assert_eq!(attempts, 1);
                    assert_eq!(source, error);
                }
                other => panic!("unexpected step: {:?}", other),
            }
        }
    }

    #[test]
    fn test_zero_ceiling_allows_one_attempt() {
        let state = RetryState::new(0);
        assert_eq!(state.max_attempts, 1);
        assert!(!state.has_next());
        assert!(matches!(
            state.advance(Err(email_conflict())),
            Step::Failed(DuplicateError::Exhausted { attempts: 1, .. })
        ));
    }
}
