//! Integration tests for the backend client against a mock HTTP server

use mockito::{Matcher, Server};
use serde_json::json;
use tuition_cli::api::{CreateError, EntityType, TuitionClient};

#[tokio::test]
async fn test_create_record_unwraps_envelope() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/customer-policies")
        .match_header("content-type", "application/json")
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::PartialJson(json!({"reference": "CP-9 (Copy)"})))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "data": {"_id": "cp2", "reference": "CP-9 (Copy)"}}"#)
        .create_async()
        .await;

    let client = TuitionClient::new(server.url(), Some("test-token".to_string())).unwrap();
    let created = client
        .create_record("/api/customer-policies", &json!({"reference": "CP-9 (Copy)"}))
        .await
        .unwrap();

    assert_eq!(created["_id"], "cp2");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_record_email_conflict() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/users")
        .with_status(400)
        .with_body(r#"{"success": false, "error": "Email already exists"}"#)
        .create_async()
        .await;

    let client = TuitionClient::new(server.url(), None).unwrap();
    let err = client
        .create_record("/api/users", &json!({"email": "a_copy@b.com"}))
        .await
        .unwrap_err();

    assert!(err.is_email_conflict());
}

#[tokio::test]
async fn test_create_record_validation_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/fees")
        .with_status(400)
        .with_body(r#"{"success": false, "error": "Validation failed", "details": {"amount": "Must be positive"}}"#)
        .create_async()
        .await;

    let client = TuitionClient::new(server.url(), None).unwrap();
    let err = client
        .create_record("/api/fees", &json!({"amount": -1}))
        .await
        .unwrap_err();

    assert!(matches!(err, CreateError::Validation { .. }));
    assert_eq!(err.to_string(), "amount: Must be positive");
}

#[tokio::test]
async fn test_create_record_success_false_with_ok_status() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/claims")
        .with_status(200)
        .with_body(r#"{"success": false}"#)
        .create_async()
        .await;

    let client = TuitionClient::new(server.url(), None).unwrap();
    let err = client.create_record("/api/claims", &json!({})).await.unwrap_err();

    assert_eq!(
        err,
        CreateError::Rejected {
            status: Some(200),
            message: "Failed to duplicate record".to_string()
        }
    );
}

#[tokio::test]
async fn test_create_record_unreachable_backend() {
    let client = TuitionClient::new("http://127.0.0.1:1", None).unwrap();
    let err = client.create_record("/api/students", &json!({})).await.unwrap_err();

    assert!(matches!(err, CreateError::Transport(_)));
}

#[tokio::test]
async fn test_fetch_record() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/students/s1")
        .with_status(200)
        .with_body(r#"{"success": true, "data": {"_id": "s1", "firstName": "Lee"}}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/students/missing")
        .with_status(404)
        .with_body(r#"{"success": false, "error": "Student not found"}"#)
        .create_async()
        .await;

    let client = TuitionClient::new(server.url(), None).unwrap();

    let record = client.fetch_record(EntityType::Student, "s1").await.unwrap();
    assert_eq!(record["firstName"], "Lee");

    let err = client.fetch_record(EntityType::Student, "missing").await.unwrap_err();
    assert!(err.to_string().contains("Student not found"));
}

#[tokio::test]
async fn test_create_record_success_with_numeric_code() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/students")
        .with_status(201)
        .with_body(r#"{"success": true, "data": {"_id": "n1"}, "code": 201}"#)
        .create_async()
        .await;

    let client = TuitionClient::new(server.url(), None).unwrap();
    let created = client.create_record("/api/students", &json!({})).await.unwrap();

    assert_eq!(created, json!({"_id": "n1"}));
}

#[tokio::test]
async fn test_create_record_email_conflict_with_numeric_code() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/teachers")
        .with_status(400)
        .with_body(r#"{"success": false, "error": "Email already exists", "code": 11000}"#)
        .create_async()
        .await;

    let client = TuitionClient::new(server.url(), None).unwrap();
    let err = client
        .create_record("/api/teachers", &json!({"email": "t_copy@school.edu"}))
        .await
        .unwrap_err();

    assert!(err.is_email_conflict());
}
