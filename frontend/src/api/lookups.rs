use reqwest::Method;
use serde_json::Value;

use super::{
    client::{ensure_success, ApiClient, RequestOptions},
    normalize::{envelope_list, unwrap_envelope},
    types::{ApiError, Lookups, Notification},
};

pub const LOOKUPS_PATH: &str = "/getAllLookups";
pub const NOTIFICATIONS_PATH: &str = "/api/Notification/GetNotifications";
pub const MARK_NOTIFICATION_READ_PATH: &str = "/api/Notification/MarkAsRead";

impl ApiClient {
    pub async fn all_lookups(&self) -> Result<Lookups, ApiError> {
        let response = self
            .send(Method::GET, LOOKUPS_PATH, None, RequestOptions::default())
            .await?;
        let body = ensure_success(response)?;
        serde_json::from_value(unwrap_envelope(&body).clone())
            .map_err(|err| ApiError::parse(format!("Unexpected lookups payload: {}", err)))
    }

    pub async fn list_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let response = self
            .send(Method::GET, NOTIFICATIONS_PATH, None, RequestOptions::default())
            .await?;
        let body = ensure_success(response)?;
        // {"notifications": [...], "unreadCount": n}
        let body = match body.get("notifications") {
            Some(list) => list.clone(),
            None => body,
        };
        envelope_list(body)
            .map_err(|err| ApiError::parse(format!("Unexpected notifications payload: {}", err)))
    }

    pub async fn mark_notification_read(&self, id: &str) -> Result<Value, ApiError> {
        let response = self
            .send(
                Method::POST,
                MARK_NOTIFICATION_READ_PATH,
                None,
                RequestOptions::default().query("id", id),
            )
            .await?;
        ensure_success(response)
    }
}
