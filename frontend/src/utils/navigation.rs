use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};

pub const LOGIN_ROUTE: &str = "/login";
pub const REGISTER_ROUTE: &str = "/register";
pub const DASHBOARD_ROUTE: &str = "/dashboard";
pub const FROM_PARAM: &str = "from";

/// Builds the login URL that remembers where the visitor was headed.
pub fn login_redirect_target(attempted: &str) -> String {
    if attempted.is_empty() || attempted == "/" || attempted.starts_with(LOGIN_ROUTE) {
        return LOGIN_ROUTE.to_string();
    }
    format!(
        "{}?{}={}",
        LOGIN_ROUTE,
        FROM_PARAM,
        utf8_percent_encode(attempted, NON_ALPHANUMERIC)
    )
}

/// Resolves the post-login destination from a `?from=` query string.
/// Only same-origin absolute paths are honoured.
pub fn post_login_target(search: &str) -> String {
    let search = search.trim_start_matches('?');
    let from = search
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == FROM_PARAM)
        .map(|(_, value)| percent_decode_str(value).decode_utf8_lossy().into_owned());
    match from {
        Some(path) if is_safe_local_path(&path) => path,
        _ => DASHBOARD_ROUTE.to_string(),
    }
}

fn is_safe_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.starts_with(LOGIN_ROUTE)
        && !path.starts_with(REGISTER_ROUTE)
}

#[cfg(target_arch = "wasm32")]
pub fn current_location() -> (String, String) {
    web_sys::window()
        .map(|win| {
            let location = win.location();
            (
                location.pathname().unwrap_or_default(),
                location.search().unwrap_or_default(),
            )
        })
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_location() -> (String, String) {
    (String::from("/"), String::new())
}

/// Replaces the current history entry.
pub fn redirect_to(target: &str) {
    #[cfg(target_arch = "wasm32")]
    if let Some(win) = web_sys::window() {
        let _ = win.location().replace(target);
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        log::debug!("redirect to {} skipped outside the browser", target);
        #[cfg(test)]
        recorded::push(target);
    }
}

/// Redirects issued on the host, per test thread.
#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod recorded {
    use std::cell::RefCell;

    thread_local! {
        static REDIRECTS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    pub fn push(target: &str) {
        REDIRECTS.with(|r| r.borrow_mut().push(target.to_string()));
    }

    pub fn take() -> Vec<String> {
        REDIRECTS.with(|r| r.take())
    }
}
