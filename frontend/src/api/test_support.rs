#[cfg(test)]
pub mod mock {
    use crate::api::{
        transport::{HttpRequest, HttpResponse, HttpTransport, TransportError},
        ApiClient,
    };
    use crate::state::session::SessionStore;
    use crate::utils::storage::MemoryStorage;
    use async_trait::async_trait;
    use reqwest::Method;
    use serde_json::Value;
    use std::{cell::RefCell, rc::Rc, time::Duration};

    pub const GET: Method = Method::GET;
    pub const POST: Method = Method::POST;
    pub const PUT: Method = Method::PUT;
    pub const DELETE: Method = Method::DELETE;

    const BASE: &str = "http://mock.local";

    #[derive(Clone, Default)]
    pub struct MockServer {
        inner: Rc<RefCell<Inner>>,
    }

    #[derive(Default)]
    struct Inner {
        routes: Vec<Route>,
        received: Vec<HttpRequest>,
    }

    #[derive(Clone)]
    struct Route {
        method: Method,
        path: String,
        query: Vec<(String, String)>,
        reply: Reply,
    }

    #[derive(Clone)]
    enum Reply {
        Respond(HttpResponse),
        Fail(TransportError),
    }

    impl MockServer {
        pub fn start() -> Self {
            Self::default()
        }

        pub fn base_url(&self) -> String {
            BASE.to_string()
        }

        /// Client backed by this server and the given session storage.
        pub fn client(&self, sessions: SessionStore) -> ApiClient {
            ApiClient::with_transport(Rc::new(self.clone()), Some(self.base_url()), sessions)
        }

        /// Client with fresh in-memory storage; the storage handle is returned for assertions.
        pub fn client_with_memory(&self) -> (ApiClient, MemoryStorage) {
            let memory = MemoryStorage::new();
            let client = self.client(SessionStore::new(Rc::new(memory.clone())));
            (client, memory)
        }

        pub fn mock<F>(&self, f: F)
        where
            F: FnOnce(&mut When, &mut Then),
        {
            let mut when = When::default();
            let mut then = Then::default();
            f(&mut when, &mut then);

            let method = when.method.clone().expect("mock requires method");
            let path = when.path.clone().expect("mock requires path");
            let reply = match then.failure.take() {
                Some(err) => Reply::Fail(err),
                None => Reply::Respond(HttpResponse {
                    status: then.status.unwrap_or(200),
                    body: then.body.take().unwrap_or_else(|| serde_json::json!({})),
                }),
            };

            self.inner.borrow_mut().routes.push(Route {
                method,
                path,
                query: when.query,
                reply,
            });
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.inner.borrow().received.clone()
        }

        pub fn last_request(&self) -> Option<HttpRequest> {
            self.inner.borrow().received.last().cloned()
        }

        pub fn hits(&self, method: &Method, path: &str) -> usize {
            self.inner
                .borrow()
                .received
                .iter()
                .filter(|req| req.method == *method && path_of(&req.url) == path)
                .count()
        }
    }

    fn path_of(url: &str) -> &str {
        url.strip_prefix(BASE).unwrap_or(url)
    }

    #[async_trait(?Send)]
    impl HttpTransport for MockServer {
        async fn execute(
            &self,
            request: HttpRequest,
            _timeout: Duration,
        ) -> Result<HttpResponse, TransportError> {
            let mut inner = self.inner.borrow_mut();
            inner.received.push(request.clone());
            let path = path_of(&request.url);
            let route = inner
                .routes
                .iter()
                .rev()
                .find(|route| {
                    route.method == request.method
                        && route.path == path
                        && route.query.iter().all(|pair| request.query.contains(pair))
                })
                .cloned();

            match route.map(|route| route.reply) {
                Some(Reply::Respond(response)) => Ok(response),
                Some(Reply::Fail(err)) => Err(err),
                None => Ok(HttpResponse {
                    status: 404,
                    body: serde_json::json!({
                        "message": format!("No mock for {} {}", request.method, path)
                    }),
                }),
            }
        }
    }

    #[derive(Default)]
    pub struct When {
        method: Option<Method>,
        path: Option<String>,
        query: Vec<(String, String)>,
    }

    impl When {
        pub fn method(&mut self, method: Method) -> &mut Self {
            self.method = Some(method);
            self
        }

        pub fn path(&mut self, path: &str) -> &mut Self {
            self.path = Some(path.to_string());
            self
        }

        pub fn query_param(&mut self, key: &str, value: &str) -> &mut Self {
            self.query.push((key.to_string(), value.to_string()));
            self
        }
    }

    #[derive(Default)]
    pub struct Then {
        status: Option<u16>,
        body: Option<Value>,
        failure: Option<TransportError>,
    }

    impl Then {
        pub fn status(&mut self, status: u16) -> &mut Self {
            self.status = Some(status);
            self
        }

        pub fn json_body(&mut self, body: Value) -> &mut Self {
            self.body = Some(body);
            self
        }

        pub fn network_error(&mut self) -> &mut Self {
            self.failure = Some(TransportError::Network("connection refused".into()));
            self
        }

        pub fn timeout(&mut self) -> &mut Self {
            self.failure = Some(TransportError::Timeout(Duration::from_secs(20)));
            self
        }
    }
}
