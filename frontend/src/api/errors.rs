use serde_json::Value;

use super::{
    normalize::server_message,
    transport::TransportError,
    types::{ApiError, CIVIL_ID_FIELD},
};

pub const MSG_NETWORK: &str =
    "Unable to reach the server. Please check your connection and try again.";
pub const MSG_TIMEOUT: &str = "The server took too long to respond. Please try again.";
pub const MSG_SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";
pub const MSG_NOT_REGISTERED: &str = "This civil ID is not registered. Please register first.";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials.";
pub const MSG_DUPLICATE_CIVIL_ID: &str = "This civil ID is already registered.";
pub const MSG_DUPLICATE: &str = "A record with the same identifier already exists.";
pub const MSG_NOT_FOUND: &str = "The requested record was not found.";
pub const MSG_SERVER: &str = "Server error, please try again later.";
pub const MSG_INVALID_INPUT: &str = "The submitted data is invalid.";
pub const MSG_LOGIN_FAILED: &str = "Login failed.";
pub const MSG_REGISTER_FAILED: &str = "Registration failed.";
pub const MSG_MISSING_TOKEN: &str = "The server did not return an access token.";

const NOT_FOUND_MARKERS: &[&str] = &["not found", "not exist", "غير موجود", "لا يوجد"];
const DUPLICATE_MARKERS: &[&str] = &[
    "duplicate",
    "exists",
    "already",
    "allready exist",
    "موجود",
    "مسجل",
    "مكرر",
];

fn contains_any(message: &str, markers: &[&str]) -> bool {
    let lower = message.to_lowercase();
    markers.iter().any(|m| lower.contains(m))
}

pub fn from_transport(err: TransportError) -> ApiError {
    match err {
        TransportError::Timeout(_) => ApiError::timeout(MSG_TIMEOUT),
        TransportError::Network(_) => ApiError::request_failed(MSG_NETWORK),
    }
}

/// Generic status mapping for every non-auth endpoint.
pub fn from_status(status: u16, body: &Value) -> ApiError {
    let message = match status {
        401 => MSG_SESSION_EXPIRED.to_string(),
        404 => MSG_NOT_FOUND.to_string(),
        409 => MSG_DUPLICATE.to_string(),
        500..=599 => MSG_SERVER.to_string(),
        _ => server_message(body).unwrap_or_else(|| format!("Request failed ({})", status)),
    };
    ApiError::http(status, message).with_details(body.clone())
}

pub fn login_error(status: u16, body: &Value) -> ApiError {
    let msg = server_message(body).unwrap_or_default();
    let message = match status {
        404 => MSG_NOT_REGISTERED.to_string(),
        401 if contains_any(&msg, NOT_FOUND_MARKERS) => MSG_NOT_REGISTERED.to_string(),
        401 => MSG_INVALID_CREDENTIALS.to_string(),
        400 if contains_any(&msg, NOT_FOUND_MARKERS) => MSG_NOT_REGISTERED.to_string(),
        400 if msg.is_empty() => MSG_INVALID_INPUT.to_string(),
        500 => MSG_SERVER.to_string(),
        _ if !msg.is_empty() => msg,
        _ => MSG_LOGIN_FAILED.to_string(),
    };
    ApiError::http(status, message)
}

pub fn duplicate_civil_id() -> ApiError {
    ApiError::http(409, MSG_DUPLICATE_CIVIL_ID).on_field(CIVIL_ID_FIELD)
}

/// A 2xx registration reply can still carry an "already exists" message.
pub fn register_success_conflict(body: &Value) -> Option<ApiError> {
    let msg = server_message(body)?.to_lowercase();
    (msg.contains("allready exist") || msg.contains("already exists")).then(duplicate_civil_id)
}

pub fn register_error(status: u16, body: &Value) -> ApiError {
    if status == 409 {
        return duplicate_civil_id();
    }
    let msg = server_message(body).unwrap_or_default();
    match status {
        400 => {
            if contains_any(&msg, DUPLICATE_MARKERS) {
                return ApiError::http(400, MSG_DUPLICATE_CIVIL_ID).on_field(CIVIL_ID_FIELD);
            }
            if let Some((field, first)) = first_validation_error(body) {
                return ApiError::http(400, first)
                    .on_field(field)
                    .with_details(body.clone());
            }
            let message = if msg.is_empty() {
                MSG_INVALID_INPUT.to_string()
            } else {
                msg
            };
            ApiError::http(400, message)
        }
        500 => ApiError::http(500, MSG_SERVER),
        _ if !msg.is_empty() => ApiError::http(status, msg),
        _ => ApiError::http(status, MSG_REGISTER_FAILED),
    }
}

/// First entry of an ASP.NET-style `errors: { Field: ["message"] }` map.
fn first_validation_error(body: &Value) -> Option<(String, String)> {
    let errors = body.get("errors")?.as_object()?;
    errors.iter().find_map(|(key, value)| {
        let message = match value {
            Value::Array(items) => items.first()?.as_str()?.to_string(),
            Value::String(s) => s.clone(),
            _ => return None,
        };
        Some((camel_case_field(key), message))
    })
}

fn camel_case_field(key: &str) -> String {
    let key = key.trim_start_matches("$.");
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
