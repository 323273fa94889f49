use super::view_model::use_requests_list_view_model;
use crate::{
    api::MedicalRequest,
    components::{
        empty_state::EmptyState,
        layout::{ErrorMessage, LoadingSpinner},
    },
};
use leptos::*;

pub const NEW_REQUEST_ROUTE: &str = "/requests/new";

pub fn detail_href(request: &MedicalRequest) -> Option<String> {
    request.id().map(|id| format!("/requests/{}", id))
}

#[component]
pub fn RequestsPage() -> impl IntoView {
    let vm = use_requests_list_view_model();
    let count = move || {
        vm.requests
            .get()
            .and_then(Result::ok)
            .map(|list| list.len())
            .unwrap_or(0)
    };

    view! {
        <div class="px-4 sm:px-0 space-y-6">
            <div class="flex justify-between items-center">
                <div>
                    <h1 class="text-3xl font-bold text-fg">"My requests"</h1>
                    <p class="text-fg-muted mt-1">"Submitted requests (" {count} ")"</p>
                </div>
                <a
                    href=NEW_REQUEST_ROUTE
                    class="inline-flex items-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover"
                >
                    "New request"
                </a>
            </div>
            {move || match vm.requests.get() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(Err(err)) => view! {
                    <div class="max-w-md mx-auto">
                        <ErrorMessage message=err.error />
                        <button
                            class="w-full rounded-lg px-4 py-3 font-medium bg-action-danger-bg text-action-danger-text"
                            on:click=move |_| vm.reload.update(|n| *n += 1)
                        >
                            "Try again"
                        </button>
                    </div>
                }.into_view(),
                Some(Ok(list)) if list.is_empty() => view! {
                    <EmptyState
                        title="No requests yet"
                        description="Treatment requests you submit will appear here."
                        action=(NEW_REQUEST_ROUTE, "Create your first request")
                    />
                }.into_view(),
                Some(Ok(list)) => view! { <RequestCards requests=list /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn RequestCards(requests: Vec<MedicalRequest>) -> impl IntoView {
    view! {
        <div class="grid gap-4">
            {requests
                .into_iter()
                .map(|request| {
                    let href = detail_href(&request);
                    view! {
                        <div class="bg-surface-elevated rounded-lg shadow-md p-6">
                            <div class="flex justify-between items-start">
                                <div>
                                    <h3 class="text-xl font-semibold text-fg">{request.number()}</h3>
                                    <p class="text-sm text-fg-muted mt-1">
                                        {request.specialization().unwrap_or_else(|| "Not specified".into())}
                                    </p>
                                </div>
                                <span class="px-3 py-1 rounded-full text-sm bg-status-warning-bg text-status-warning-text">
                                    {request.status()}
                                </span>
                            </div>
                            <dl class="grid grid-cols-2 gap-4 mt-4 text-sm">
                                <div>
                                    <dt class="text-fg-muted">"Hospital"</dt>
                                    <dd class="text-fg">{request.hospital().unwrap_or_else(|| "-".into())}</dd>
                                </div>
                                <div>
                                    <dt class="text-fg-muted">"Requested on"</dt>
                                    <dd class="text-fg">{request.requested_on().unwrap_or_else(|| "-".into())}</dd>
                                </div>
                            </dl>
                            {href.map(|href| view! {
                                <a href=href class="inline-block mt-4 text-action-primary-bg hover:underline">
                                    "View details"
                                </a>
                            })}
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;
    use serde_json::json;

    #[test]
    fn request_cards_link_to_details() {
        let html = render_to_string(move || {
            let requests = vec![
                MedicalRequest(json!({ "id": 5, "requestNumber": "REQ-5", "Hospital": "Amiri" })),
                MedicalRequest(json!({ "Specialization": "ENT" })),
            ];
            view! { <RequestCards requests=requests /> }
        });
        assert!(html.contains("REQ-5"));
        assert!(html.contains("href=\"/requests/5\""));
        assert!(html.contains("Amiri"));
        assert!(html.contains("Under review"));
        assert_eq!(html.matches("View details").count(), 1);
    }
}
