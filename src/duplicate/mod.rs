//! Record duplication
//!
//! A duplication sanitizes a source record and submits it to the entity's
//! creation endpoint, retrying only when the backend reports that the
//! record's email already exists.

pub mod inserter;
pub mod retry;
pub mod sanitizer;

pub use inserter::{Duplicated, Duplicator, RecordCreator};
pub use retry::{RetryState, Step, DEFAULT_MAX_ATTEMPTS};
pub use sanitizer::{copy_email, sanitize, sanitize_for_attempt};
