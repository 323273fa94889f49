use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Value,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("request failed: {0}")]
    Network(String),
}

/// Moves one request over the wire. Responses of any status are `Ok`;
/// only failures to get a response at all are errors.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn execute(
        &self,
        request: HttpRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError>;
}

#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

fn map_reqwest_error(err: reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(timeout)
    } else {
        TransportError::Network(err.to_string())
    }
}

fn parse_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

#[async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn execute(
        &self,
        request: HttpRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout);
        }

        let exchange = async move {
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, text))
        };

        #[cfg(target_arch = "wasm32")]
        let outcome = {
            use futures::future::{select, Either};
            let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
            let deadline = gloo_timers::future::TimeoutFuture::new(millis);
            futures::pin_mut!(exchange, deadline);
            match select(exchange, deadline).await {
                Either::Left((result, _)) => result,
                Either::Right(_) => return Err(TransportError::Timeout(timeout)),
            }
        };
        #[cfg(not(target_arch = "wasm32"))]
        let outcome = exchange.await;

        let (status, text) = outcome.map_err(|err| map_reqwest_error(err, timeout))?;
        Ok(HttpResponse {
            status,
            body: parse_body(text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_parsing_tolerates_text_and_empty() {
        assert_eq!(parse_body(String::new()), Value::Null);
        assert_eq!(parse_body("{\"a\":1}".into()), json!({ "a": 1 }));
        assert_eq!(parse_body("Created".into()), json!("Created"));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = HttpRequest {
            method: Method::GET,
            url: "http://x".into(),
            headers: vec![("Authorization".into(), "Bearer t".into())],
            query: Vec::new(),
            body: None,
        };
        assert_eq!(req.header("authorization"), Some("Bearer t"));
        assert_eq!(req.header("accept"), None);
    }
}
