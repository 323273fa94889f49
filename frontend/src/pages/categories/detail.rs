use super::{
    utils::{edit_href, CATEGORIES_ROUTE},
    view_model::use_category_resource,
};
use crate::{
    api::Category,
    components::layout::{ErrorMessage, LoadingSpinner},
};
use leptos::*;
use leptos_router::use_params_map;

#[component]
pub fn CategoryViewPage() -> impl IntoView {
    let params = use_params_map();
    let raw_id = params.with_untracked(|p| p.get("id").cloned().unwrap_or_default());
    let category = use_category_resource(raw_id);
    view! {
        <div class="px-4 sm:px-0 max-w-4xl mx-auto space-y-6">
            <a href=CATEGORIES_ROUTE class="text-action-primary-bg hover:underline">"← Back to categories"</a>
            {move || match category.get() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(Err(err)) => view! { <ErrorMessage message=err.error /> }.into_view(),
                Some(Ok(found)) => view! { <CategoryCard category=found /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn CategoryCard(category: Category) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated rounded-lg shadow-md p-6 space-y-4">
            <div class="flex justify-between items-center">
                <h1 class="text-3xl font-bold text-fg">{category.name}</h1>
                <a
                    href=edit_href(category.id)
                    class="inline-flex items-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text"
                >
                    "Edit"
                </a>
            </div>
            <dl class="grid grid-cols-1 gap-4">
                <div>
                    <dt class="text-sm text-fg-muted">"Id"</dt>
                    <dd class="font-medium text-fg">{category.id}</dd>
                </div>
                <div>
                    <dt class="text-sm text-fg-muted">"Description"</dt>
                    <dd class="text-fg">{category.description.unwrap_or_else(|| "No description.".to_string())}</dd>
                </div>
            </dl>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn card_shows_fields_and_edit_link() {
        let html = render_to_string(move || {
            let category = Category {
                id: 6,
                name: "Neurology".into(),
                description: None,
            };
            view! { <CategoryCard category=category /> }
        });
        assert!(html.contains("Neurology"));
        assert!(html.contains("No description."));
        assert!(html.contains("href=\"/categories/edit/6\""));
    }
}
