//! Field sanitizer for record duplication
//!
//! Produces a candidate record for re-insertion: identity and audit fields
//! are stripped, the display field gets a copy marker, server-generated
//! business keys are removed and the email is rewritten to a copy address.

use crate::api::EntityType;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Fields the backend assigns on every record and that must never be resubmitted
pub const SYSTEM_FIELDS: &[&str] = &[
    "_id",
    "id",
    "createdAt",
    "updatedAt",
    "createdBy",
    "updatedBy",
    "__v",
];

/// Marker appended to the display field of a copy
pub const COPY_MARKER: &str = " (Copy)";

/// Trailing `_copy` / `_copyN` on an email local part
static COPY_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"_copy\d*$").expect("valid regex"));

/// Sanitize a record for its first creation attempt
pub fn sanitize(record: &Value, entity: EntityType) -> Value {
    sanitize_for_attempt(record, entity, 0)
}

/// Sanitize a record for a given attempt number.
///
/// Always starts from the source record, so repeated attempts never
/// compound suffixes. Attempt 0 uses `local_copy@domain`, attempt N uses
/// `local_copyN@domain`.
pub fn sanitize_for_attempt(record: &Value, entity: EntityType, attempt: u32) -> Value {
    let mut data = record.clone();

    if let Value::Object(map) = &mut data {
        for field in SYSTEM_FIELDS {
            map.remove(*field);
        }

        if let Some(key) = entity.generated_key() {
            map.remove(key);
        }

        if let Some(Value::String(display)) = map.get_mut(entity.display_field()) {
            display.push_str(COPY_MARKER);
        }

        if let Some(Value::String(email)) = map.get_mut("email") {
            *email = copy_email(email, attempt);
        }
    }

    data
}

/// Rewrite an email to its copy form for the given attempt.
///
/// Any existing `_copy`/`_copyN` suffix is stripped first. Values without
/// an `@` are returned unchanged.
pub fn copy_email(email: &str, attempt: u32) -> String {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return email.to_string();
    };

    let base = COPY_SUFFIX.replace(local, "");
    if attempt == 0 {
        format!("{}_copy@{}", base, domain)
    } else {
        format!("{}_copy{}@{}", base, attempt, domain)
    }
}
