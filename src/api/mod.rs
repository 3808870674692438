//! Tuition backend API module
//!
//! Entity resource mapping, the HTTP client for the backend's REST
//! endpoints, response envelope parsing, error classification and
//! structured request logging.

pub mod client;
pub mod constants;
pub mod entity;
pub mod error;
pub mod logging;
pub mod models;

pub use client::TuitionClient;
pub use entity::{EntityType, UnknownEntityType};
pub use error::{CreateError, DuplicateError};
pub use logging::{ApiLogger, LogLevel, MonitoringConfig, OperationContext};
pub use models::ApiEnvelope;
