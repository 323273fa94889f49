use crate::api::{ApiError, CODE_UNKNOWN, CODE_VALIDATION};
use leptos::*;

fn detail_messages(error: &ApiError) -> Vec<String> {
    let Some(errors) = error.details.as_ref().and_then(|d| d.get("errors")) else {
        return Vec::new();
    };
    match errors {
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        // ASP.NET model-state shape: {"Field": ["message", ...]}
        serde_json::Value::Object(map) => map
            .values()
            .filter_map(|v| v.as_array())
            .flatten()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

fn footnote(error: &ApiError) -> Option<String> {
    if error.code.is_empty() || error.code == CODE_UNKNOWN || error.code == CODE_VALIDATION {
        return None;
    }
    Some(match error.status {
        Some(status) => format!("Code: {} ({})", error.code, status),
        None => format!("Code: {}", error.code),
    })
}

#[component]
pub fn InlineErrorMessage(#[prop(into)] error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.with(Option::is_some) fallback=|| ()>
            <div
                role="alert"
                class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2"
            >
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || error.get().map(|e| {
                    let details = detail_messages(&e);
                    let note = footnote(&e);
                    view! {
                        {(!details.is_empty()).then(|| view! {
                            <ul class="list-disc list-inside text-sm">
                                {details.into_iter().map(|msg| view! { <li>{msg}</li> }).collect_view()}
                            </ul>
                        })}
                        {note.map(|note| view! { <div class="text-xs opacity-75">{note}</div> })}
                    }
                })}
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn footnote_skips_unknown_and_validation() {
        assert_eq!(footnote(&ApiError::unknown("x")), None);
        assert_eq!(footnote(&ApiError::validation("x")), None);
        assert_eq!(
            footnote(&ApiError::http(500, "x")).as_deref(),
            Some("Code: HTTP_ERROR (500)")
        );
        assert_eq!(
            footnote(&ApiError::request_failed("x")).as_deref(),
            Some("Code: NETWORK_ERROR")
        );
    }

    #[test]
    fn detail_messages_accepts_model_state_map() {
        let err = ApiError::http(400, "bad").with_details(json!({
            "errors": { "Email": ["Email is invalid"], "Name": ["Name is required"] }
        }));
        let mut msgs = detail_messages(&err);
        msgs.sort();
        assert_eq!(msgs, vec!["Email is invalid", "Name is required"]);
    }
}
