use leptos::*;

/// Placeholder for an empty list, optionally pointing at the page that fills it.
#[component]
pub fn EmptyState(
    #[prop(into)] title: String,
    #[prop(optional, into)] description: Option<String>,
    #[prop(optional)] action: Option<(&'static str, &'static str)>,
) -> impl IntoView {
    view! {
        <div class="text-center py-12 px-4 rounded-lg border-2 border-dashed border-border-strong bg-surface-muted">
            <div class="mx-auto h-12 w-12 text-fg-muted">
                <i class="fas fa-notes-medical text-4xl" aria-hidden="true"></i>
            </div>
            <h3 class="mt-2 text-sm font-semibold text-fg">{title}</h3>
            {description.map(|desc| view! { <p class="mt-1 text-sm text-fg-muted">{desc}</p> })}
            {action.map(|(href, label)| view! {
                <a
                    href=href
                    class="mt-4 inline-flex items-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover"
                >
                    {label}
                </a>
            })}
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn empty_state_renders_action_link() {
        let html = render_to_string(move || {
            view! {
                <EmptyState
                    title="No requests yet"
                    description="Submitted treatment requests appear here."
                    action=("/requests/new", "New request")
                />
            }
        });
        assert!(html.contains("No requests yet"));
        assert!(html.contains("href=\"/requests/new\""));
    }
}
