use chrono::Utc;

/// One audited call to the rectangle search.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiLog {
    pub id: i64,
    /// Serialized request, `{"matrix": [[...]]}`.
    pub request_data: String,
    /// Serialized response, `{"number": [...], "area": n}`.
    pub response_data: String,
    pub execution_time_ms: f64,
    pub timestamp: i64,
}

impl ApiLog {
    /// Builds an entry that has not been stored yet (`id` is 0).
    pub fn new(request_data: String, response_data: String, execution_time_ms: f64) -> Self {
        Self {
            id: 0,
            request_data,
            response_data,
            execution_time_ms,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}
