//! API constants for the tuition backend

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("tuition-cli/", env!("CARGO_PKG_VERSION"));

/// Standard headers for backend requests
pub mod headers {
    /// Content type for JSON requests
    pub const CONTENT_TYPE_JSON: &str = "application/json";

    /// Correlation header echoed into the backend's request log
    pub const X_CORRELATION_ID: &str = "X-Correlation-Id";
}

/// Build full collection endpoint URL (`endpoint` is a resource path such as "/api/students")
pub fn collection_url(base_url: &str, endpoint: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), endpoint)
}

/// Build single record endpoint URL
pub fn record_url(base_url: &str, endpoint: &str, id: &str) -> String {
    format!("{}/{}", collection_url(base_url, endpoint), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        assert_eq!(
            collection_url("http://localhost:3000/", "/api/customer-policies"),
            "http://localhost:3000/api/customer-policies"
        );
        assert_eq!(
            record_url("http://localhost:3000", "/api/students", "abc123"),
            "http://localhost:3000/api/students/abc123"
        );
    }
}
