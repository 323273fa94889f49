//! Field lookup for the backend's inconsistent response shapes.
//!
//! Every alias list is ordered by priority; the first key holding a usable
//! value wins. Login responses are resolved in [`normalize_login_response`]
//! and nowhere else.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::UserProfile;

pub const ENVELOPE_KEYS: &[&str] = &["Data", "data"];
pub const TOKEN_KEYS: &[&str] = &["token", "accessToken", "Token", "access_token", "jwt"];
/// Checked on the outer body when the envelope carries no token.
pub const ROOT_TOKEN_KEYS: &[&str] = &["token", "Token"];
pub const USER_KEYS: &[&str] = &["user", "userData", "User"];
pub const MESSAGE_KEYS: &[&str] = &["message", "Message", "title"];

fn is_usable(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

pub fn pick<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find(|candidate| is_usable(candidate))
}

pub fn pick_str<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

/// Like [`pick_str`] but renders numbers and booleans too.
pub fn pick_display(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match value.get(*key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

pub fn unwrap_envelope(body: &Value) -> &Value {
    pick(body, ENVELOPE_KEYS).unwrap_or(body)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPayload {
    pub token: String,
    pub user: UserProfile,
}

pub fn normalize_login_response(body: &Value) -> Option<LoginPayload> {
    let data = unwrap_envelope(body);
    let token = pick_str(data, TOKEN_KEYS).or_else(|| pick_str(body, ROOT_TOKEN_KEYS))?;
    let user = USER_KEYS
        .iter()
        .filter_map(|key| data.get(*key))
        .find(|candidate| candidate.is_object())
        .unwrap_or(data)
        .clone();
    Some(LoginPayload {
        token: token.to_string(),
        user: UserProfile::new(user),
    })
}

pub fn server_message(body: &Value) -> Option<String> {
    match body {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(_) => pick_str(body, MESSAGE_KEYS)
            .or_else(|| pick_str(unwrap_envelope(body), MESSAGE_KEYS))
            .map(str::to_string),
        _ => None,
    }
}

/// Decodes list endpoints that answer either with a bare array or an envelope.
pub fn envelope_list<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, serde_json::Error> {
    let items = match body {
        Value::Array(_) => body,
        Value::Object(ref map) => ENVELOPE_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find(|v| v.is_array())
            .cloned()
            .unwrap_or(Value::Array(Vec::new())),
        _ => Value::Array(Vec::new()),
    };
    serde_json::from_value(items)
}

/// Decodes single-record endpoints, unwrapping an envelope when present.
pub fn envelope_record<T: DeserializeOwned>(body: Value) -> Result<T, serde_json::Error> {
    let inner = unwrap_envelope(&body).clone();
    serde_json::from_value(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_found_under_each_alias() {
        for key in TOKEN_KEYS {
            let mut body = json!({ "user": { "fullName": "Sara" } });
            body[*key] = json!("tok");
            let payload = normalize_login_response(&body).expect(key);
            assert_eq!(payload.token, "tok");
            assert_eq!(payload.user.full_name().as_deref(), Some("Sara"));
        }
    }

    #[test]
    fn envelope_is_unwrapped_before_lookup() {
        let body = json!({ "Data": { "accessToken": "inner", "User": { "Id": 1 } } });
        let payload = normalize_login_response(&body).unwrap();
        assert_eq!(payload.token, "inner");
        assert_eq!(payload.user.id().as_deref(), Some("1"));
    }

    #[test]
    fn alias_priority_is_respected() {
        let body = json!({ "data": { "jwt": "last", "token": "first" } });
        assert_eq!(normalize_login_response(&body).unwrap().token, "first");
    }

    #[test]
    fn root_token_used_when_envelope_has_none() {
        let body = json!({ "Token": "outer", "data": { "fullName": "Sara" } });
        let payload = normalize_login_response(&body).unwrap();
        assert_eq!(payload.token, "outer");
        // No user key: the envelope itself is the profile.
        assert_eq!(payload.user.full_name().as_deref(), Some("Sara"));
    }

    #[test]
    fn missing_or_empty_token_yields_none() {
        assert!(normalize_login_response(&json!({ "user": {} })).is_none());
        assert!(normalize_login_response(&json!({ "token": "" })).is_none());
        assert!(normalize_login_response(&json!({ "token": 42 })).is_none());
        assert!(normalize_login_response(&Value::Null).is_none());
    }

    #[test]
    fn server_message_checks_all_casings() {
        assert_eq!(server_message(&json!({ "Message": "x" })).as_deref(), Some("x"));
        assert_eq!(server_message(&json!({ "title": "t" })).as_deref(), Some("t"));
        assert_eq!(server_message(&json!("plain")).as_deref(), Some("plain"));
        assert_eq!(server_message(&json!({})), None);
    }

    #[test]
    fn envelope_list_accepts_bare_and_wrapped_arrays() {
        let bare: Vec<i32> = envelope_list(json!([1, 2])).unwrap();
        let wrapped: Vec<i32> = envelope_list(json!({ "Data": [3] })).unwrap();
        let empty: Vec<i32> = envelope_list(json!({ "Success": true })).unwrap();
        assert_eq!(bare, vec![1, 2]);
        assert_eq!(wrapped, vec![3]);
        assert!(empty.is_empty());
    }
}
