use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::rc::Rc;

use super::{
    errors,
    events::{UnauthorizedEvent, UnauthorizedEvents},
    transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport},
    types::ApiError,
};
use crate::{config, state::session::SessionStore};

/// Login answers 401 for unknown civil IDs; that must not look like an expired session.
pub const LOGIN_PATH: &str = "/Login";

pub fn is_login_path(path: &str) -> bool {
    path.contains(LOGIN_PATH)
}

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub skip_auth: bool,
}

impl RequestOptions {
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn anonymous(mut self) -> Self {
        self.skip_auth = true;
        self
    }
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn HttpTransport>,
    base_url: Option<String>,
    session: SessionStore,
    events: UnauthorizedEvents,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_transport(Rc::new(ReqwestTransport::new()), None, SessionStore::browser())
    }

    pub fn with_transport(
        transport: Rc<dyn HttpTransport>,
        base_url: Option<String>,
        session: SessionStore,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.map(|url| config::normalize_base_url(&url)),
            session,
            events: UnauthorizedEvents::new(),
        }
    }

    pub fn session_store(&self) -> &SessionStore {
        &self.session
    }

    pub fn unauthorized_events(&self) -> &UnauthorizedEvents {
        &self.events
    }

    async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    /// Sends one request and hands back the raw response regardless of status,
    /// after applying the 401 side effects.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<HttpResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let timeout = config::request_timeout();
        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if !options.skip_auth {
            if let Some(token) = self.session.token() {
                headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
            }
        }
        let request = HttpRequest {
            method,
            url: format!("{}{}", base_url, path),
            headers,
            query: options.query,
            body,
        };

        log::debug!("{} {}", request.method, request.url);
        let response = self
            .transport
            .execute(request, timeout)
            .await
            .map_err(|err| {
                log::warn!("{} failed: {}", path, err);
                errors::from_transport(err)
            })?;

        if response.status == 401 {
            self.handle_unauthorized(path);
        }
        Ok(response)
    }

    /// Sends a request and decodes a 2xx body, mapping any other status through
    /// the generic error table.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let response = self.send(method, path, body, options).await?;
        decode(path, response)
    }

    fn handle_unauthorized(&self, path: &str) {
        if is_login_path(path) {
            return;
        }
        log::info!("{} rejected the session; signing out", path);
        self.session.clear();
        self.events.emit(&UnauthorizedEvent {
            path: path.to_string(),
        });
    }
}

pub(crate) fn decode<T: DeserializeOwned>(path: &str, response: HttpResponse) -> Result<T, ApiError> {
    if !response.is_success() {
        return Err(errors::from_status(response.status, &response.body));
    }
    serde_json::from_value(response.body).map_err(|err| {
        log::error!("unexpected response from {}: {}", path, err);
        ApiError::parse(format!("Unexpected response from server: {}", err))
    })
}

pub(crate) fn ensure_success(response: HttpResponse) -> Result<Value, ApiError> {
    if response.is_success() {
        Ok(response.body)
    } else {
        Err(errors::from_status(response.status, &response.body))
    }
}

pub(crate) fn to_body<T: serde::Serialize>(payload: &T) -> Result<Value, ApiError> {
    serde_json::to_value(payload)
        .map_err(|err| ApiError::unknown(format!("Failed to encode request: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_paths_are_recognized() {
        assert!(is_login_path("/Login"));
        assert!(is_login_path("/Login?Patient=true"));
        assert!(!is_login_path("/auth/logout"));
        assert!(!is_login_path("/login"));
    }

    #[test]
    fn request_options_builder_accumulates() {
        let opts = RequestOptions::default()
            .query("id", 5)
            .anonymous();
        assert_eq!(opts.query, vec![("id".to_string(), "5".to_string())]);
        assert!(opts.skip_auth);
    }

    #[test]
    fn decode_maps_failures_and_garbage() {
        let not_found = decode::<Vec<i32>>(
            "/x",
            HttpResponse {
                status: 404,
                body: Value::Null,
            },
        )
        .unwrap_err();
        assert_eq!(not_found.status, Some(404));

        let garbage = decode::<Vec<i32>>(
            "/x",
            HttpResponse {
                status: 200,
                body: Value::String("oops".into()),
            },
        )
        .unwrap_err();
        assert_eq!(garbage.code, crate::api::CODE_PARSE);
    }
}
