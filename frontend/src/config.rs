use serde::{Deserialize, Serialize};
use std::{sync::OnceLock, time::Duration};

pub const DEFAULT_API_BASE_URL: &str = "http://213.199.50.15:86";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 20_000;

/// A persisted session is honoured for this long after login.
pub const SESSION_DURATION: Duration = Duration::from_secs(20 * 60);
/// Inactivity window before the idle watcher forces a logout.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(20 * 60);

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuntimeConfig {
    #[serde(default, alias = "API_BASE_URL")]
    pub api_base_url: Option<String>,
    #[serde(default, alias = "REQUEST_TIMEOUT_MS")]
    pub request_timeout_ms: Option<u64>,
}

impl RuntimeConfig {
    fn or(self, fallback: RuntimeConfig) -> RuntimeConfig {
        RuntimeConfig {
            api_base_url: self.api_base_url.or(fallback.api_base_url),
            request_timeout_ms: self.request_timeout_ms.or(fallback.request_timeout_ms),
        }
    }

    fn is_complete(&self) -> bool {
        self.api_base_url.is_some() && self.request_timeout_ms.is_some()
    }
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();
static REQUEST_TIMEOUT_MS: OnceLock<u64> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
fn read_global(name: &str) -> Option<RuntimeConfig> {
    let window = web_sys::window()?;
    let any = js_sys::Reflect::get(&window, &name.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let string_of = |key: &str| {
        js_sys::Reflect::get(&any, &key.into())
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
    };
    let api_base_url = string_of("API_BASE_URL")
        .or_else(|| string_of("api_base_url"))
        .and_then(|v| v.as_string());
    let request_timeout_ms = string_of("REQUEST_TIMEOUT_MS")
        .or_else(|| string_of("request_timeout_ms"))
        .and_then(|v| v.as_f64())
        .filter(|ms| *ms > 0.0)
        .map(|ms| ms as u64);
    Some(RuntimeConfig {
        api_base_url,
        request_timeout_ms,
    })
}

#[cfg(target_arch = "wasm32")]
fn snapshot_from_globals() -> RuntimeConfig {
    let env = read_global("__CAREPORTAL_ENV").unwrap_or_default();
    env.or(read_global("__CAREPORTAL_CONFIG").unwrap_or_default())
}

#[cfg(not(target_arch = "wasm32"))]
fn snapshot_from_globals() -> RuntimeConfig {
    RuntimeConfig::default()
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let origin = web_sys::window()?.location().origin().ok()?;
    let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    None
}

fn cache(cfg: &RuntimeConfig) {
    let base = cfg
        .api_base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    let _ = API_BASE_URL.set(normalize_base_url(&base));
    let _ = REQUEST_TIMEOUT_MS.set(
        cfg.request_timeout_ms
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
    );
}

pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    let mut cfg = snapshot_from_globals();
    if !cfg.is_complete() {
        if let Some(fetched) = fetch_runtime_config().await {
            cfg = cfg.or(fetched);
        }
    }
    cache(&cfg);
    API_BASE_URL
        .get()
        .cloned()
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

pub fn request_timeout() -> Duration {
    Duration::from_millis(
        REQUEST_TIMEOUT_MS
            .get()
            .copied()
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
    )
}

pub async fn init() {
    let base = await_api_base_url().await;
    log::info!(
        "runtime config: api_base_url={} timeout={:?}",
        base,
        request_timeout()
    );
}
