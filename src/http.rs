//! Shared HTTP client, auth headers and status mapping.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::ChatError;

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(4)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    })
}

/// Build default headers for a Bearer-token API.
///
/// A token that is not a valid header value is a configuration error.
pub fn bearer_headers(token: &str) -> Result<HeaderMap, ChatError> {
    let auth = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
        ChatError::Configuration("API token contains characters not allowed in a header".into())
    })?;
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(AUTHORIZATION, auth);
    Ok(headers)
}

/// Map a non-success HTTP status and body to an error.
pub fn status_to_error(status: u16, body: &str) -> ChatError {
    let message = extract_error_message(body).unwrap_or_else(|| body.to_string());
    match status {
        401 | 403 => ChatError::Authentication(message),
        429 => ChatError::RateLimited {
            retry_after_ms: extract_retry_after(body),
        },
        _ => ChatError::api(status, message),
    }
}

fn parse_body(body: &str) -> Option<serde_json::Value> {
    serde_json::from_str::<serde_json::Value>(body).ok()
}

fn extract_error_message(body: &str) -> Option<String> {
    // Inference endpoints report `{"error": "..."}` or `{"error": {"message": "..."}}`.
    let value = parse_body(body)?;
    let error = value.get("error")?;
    error
        .as_str()
        .or_else(|| error.get("message").and_then(|m| m.as_str()))
        .map(str::to_string)
}

fn extract_retry_after(body: &str) -> Option<u64> {
    parse_body(body).and_then(|v| {
        v.get("estimated_time")
            .or_else(|| v.get("error").and_then(|e| e.get("retry_after")))
            .and_then(|r| r.as_f64())
            .map(|s| (s * 1000.0) as u64)
    })
}
