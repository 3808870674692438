use super::retry::{RetryState, Step, DEFAULT_MAX_ATTEMPTS};
use super::sanitizer::sanitize_for_attempt;
use crate::api::{ApiLogger, CreateError, DuplicateError, EntityType, MonitoringConfig, TuitionClient};
use async_trait::async_trait;
use serde_json::Value;

/// Anything that can create a record at a resource path
#[async_trait]
pub trait RecordCreator: Send + Sync {
    /// Submit `record` to `endpoint`, returning the created record
    async fn create(&self, endpoint: &str, record: &Value) -> Result<Value, CreateError>;
}

#[async_trait]
impl RecordCreator for TuitionClient {
    async fn create(&self, endpoint: &str, record: &Value) -> Result<Value, CreateError> {
        self.create_record(endpoint, record).await
    }
}

#[async_trait]
impl<T: RecordCreator + ?Sized> RecordCreator for std::sync::Arc<T> {
    async fn create(&self, endpoint: &str, record: &Value) -> Result<Value, CreateError> {
        (**self).create(endpoint, record).await
    }
}

/// A successful duplication
#[derive(Debug, Clone, PartialEq)]
pub struct Duplicated {
    /// The record returned by the creation endpoint
    pub record: Value,
    /// Number of creation requests submitted
    pub attempts: u32,
    /// The payload of the request that succeeded
    pub submitted: Value,
}

/// Duplicates records through a [`RecordCreator`], retrying email conflicts
pub struct Duplicator<C> {
    creator: C,
    max_attempts: u32,
    logger: ApiLogger,
}

impl<C: RecordCreator> Duplicator<C> {
    pub fn new(creator: C) -> Self {
        Self {
            creator,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            logger: ApiLogger::new(MonitoringConfig::default()),
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_logger(mut self, logger: ApiLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn creator(&self) -> &C {
        &self.creator
    }

    /// Create a copy of `record` as a new `entity` record.
    ///
    /// At most one record is created per call. Only an email uniqueness
    /// conflict is retried; any other failure is returned after the attempt
    /// that produced it.
    pub async fn duplicate(&self, record: &Value, entity: EntityType) -> Result<Duplicated, DuplicateError> {
        let endpoint = entity.endpoint();
        let context = self.logger.start_operation("duplicate", entity.tag());
        let mut state = RetryState::new(self.max_attempts);

        loop {
            let candidate = sanitize_for_attempt(record, entity, state.attempt);
            log::debug!(
                "Submitting {} copy to {} (attempt {}/{})",
                entity,
                endpoint,
                state.submissions(),
                state.max_attempts
            );

            let outcome = self.creator.create(endpoint, &candidate).await;
            let conflict_message = outcome.as_ref().err().map(|e| e.to_string());

            match state.advance(outcome) {
                Step::Created(created) => {
                    self.logger.complete_operation(&context, state.submissions(), None);
                    return Ok(Duplicated {
                        record: created,
                        attempts: state.submissions(),
                        submitted: candidate,
                    });
                }
                Step::Retry(next) => {
                    let next_candidate = sanitize_for_attempt(record, entity, next.attempt);
                    self.logger.log_conflict_retry(
                        &context,
                        next.submissions(),
                        next_candidate.get("email").and_then(Value::as_str),
                        conflict_message.as_deref().unwrap_or_default(),
                    );
                    state = next;
                }
                Step::Failed(error) => {
                    self.logger
                        .complete_operation(&context, error.attempts(), Some(error.message().as_str()));
                    return Err(error);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Creator that replays scripted outcomes and records every request
    struct ScriptedCreator {
        outcomes: Mutex<VecDeque<Result<Value, CreateError>>>,
        requests: Mutex<Vec<(String, Value)>>,
    }

    impl ScriptedCreator {
        fn new(outcomes: Vec<Result<Value, CreateError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<(String, Value)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RecordCreator for ScriptedCreator {
        async fn create(&self, endpoint: &str, record: &Value) -> Result<Value, CreateError> {
            self.requests
                .lock()
                .unwrap()
                .push((endpoint.to_string(), record.clone()));
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(email_conflict()))
        }
    }

    fn email_conflict() -> CreateError {
        CreateError::Conflict {
            field: "email".to_string(),
            message: "Email already exists".to_string(),
        }
    }

    fn teacher() -> Value {
        json!({
            "_id": "t1",
            "teacherCode": "TCH-0042",
            "firstName": "Maria",
            "email": "maria@school.edu",
            "createdAt": "2024-01-01T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_first_attempt_success() {
        let creator = ScriptedCreator::new(vec![Ok(json!({"_id": "t2", "teacherCode": "TCH-0043"}))]);
        let duplicator = Duplicator::new(creator);

        let result = duplicator.duplicate(&teacher(), EntityType::Teacher).await.unwrap();

        assert_eq!(result.attempts, 1);
        assert_eq!(result.record["_id"], "t2");
        let requests = duplicator.creator().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "/api/teachers");
        assert_eq!(requests[0].1["email"], "maria_copy@school.edu");
        assert_eq!(requests[0].1["firstName"], "Maria (Copy)");
        assert!(requests[0].1.get("teacherCode").is_none());
        assert!(requests[0].1.get("_id").is_none());
    }

    #[tokio::test]
    async fn test_two_conflicts_then_success() {
        let creator = ScriptedCreator::new(vec![
            Err(email_conflict()),
            Err(email_conflict()),
            Ok(json!({"_id": "t3"})),
        ]);
        let duplicator = Duplicator::new(creator);

        let result = duplicator.duplicate(&teacher(), EntityType::Teacher).await.unwrap();

        assert_eq!(result.record, json!({"_id": "t3"}));
        assert_eq!(result.attempts, 3);
        assert_eq!(result.submitted["email"], "maria_copy2@school.edu");

        let emails: Vec<Value> = duplicator
            .creator()
            .requests()
            .into_iter()
            .map(|(_, body)| body["email"].clone())
            .collect();
        assert_eq!(
            emails,
            vec![
                json!("maria_copy@school.edu"),
                json!("maria_copy1@school.edu"),
                json!("maria_copy2@school.edu"),
            ]
        );
    }

    #[tokio::test]
    async fn test_validation_error_is_not_retried() {
        let creator = ScriptedCreator::new(vec![Err(CreateError::Validation {
            message: "phone: Invalid phone number".to_string(),
            details: vec![("phone".to_string(), "Invalid phone number".to_string())],
        })]);
        let duplicator = Duplicator::new(creator);

        let err = duplicator.duplicate(&teacher(), EntityType::Teacher).await.unwrap_err();

        assert_eq!(duplicator.creator().requests().len(), 1);
        assert_eq!(err.attempts(), 1);
        assert_eq!(err.message(), "phone: Invalid phone number");
    }

    #[tokio::test]
    async fn test_transport_error_is_not_retried() {
        let creator = ScriptedCreator::new(vec![Err(CreateError::Transport("connection refused".to_string()))]);
        let duplicator = Duplicator::new(creator);

        let err = duplicator.duplicate(&teacher(), EntityType::Teacher).await.unwrap_err();

        assert_eq!(duplicator.creator().requests().len(), 1);
        assert!(matches!(err, DuplicateError::Failed { .. }));
    }

    #[tokio::test]
    async fn test_persistent_conflict_exhausts_after_five() {
        let creator = ScriptedCreator::new(Vec::new());
        let duplicator = Duplicator::new(creator);

        let err = duplicator.duplicate(&teacher(), EntityType::Teacher).await.unwrap_err();

        let requests = duplicator.creator().requests();
        assert_eq!(requests.len(), 5);
        assert_eq!(requests[4].1["email"], "maria_copy4@school.edu");
        assert!(matches!(err, DuplicateError::Exhausted { attempts: 5, .. }));
        assert!(err.last_error().is_email_conflict());
    }

    #[tokio::test]
    async fn test_custom_ceiling() {
        let duplicator = Duplicator::new(ScriptedCreator::new(Vec::new())).with_max_attempts(2);

        let err = duplicator.duplicate(&teacher(), EntityType::Teacher).await.unwrap_err();

        assert_eq!(duplicator.creator().requests().len(), 2);
        assert_eq!(err.attempts(), 2);
    }

    #[tokio::test]
    async fn test_record_without_email_conflict_still_bounded() {
        let creator = ScriptedCreator::new(Vec::new());
        let duplicator = Duplicator::new(creator);
        let policy = json!({"_id": "p1", "policyNumber": "POL-1", "name": "Home"});

        let err = duplicator.duplicate(&policy, EntityType::Policy).await.unwrap_err();

        let requests = duplicator.creator().requests();
        assert_eq!(requests.len(), 5);
        assert!(requests.iter().all(|(endpoint, _)| endpoint == "/api/policies"));
        assert!(requests.iter().all(|(_, body)| body.get("policyNumber").is_none()));
        assert_eq!(err.attempts(), 5);
    }
}
