use super::{
    utils::{edit_href, view_href, CREATE_CATEGORY_ROUTE},
    view_model::{use_categories_list_view_model, CategoriesListViewModel},
};
use crate::{
    api::Category,
    components::{
        empty_state::EmptyState,
        error::InlineErrorMessage,
        layout::{ErrorMessage, LoadingSpinner, SuccessMessage},
    },
};
use leptos::{ev::KeyboardEvent, *};

#[component]
pub fn CategoriesPage() -> impl IntoView {
    let vm = use_categories_list_view_model();

    view! {
        <div class="px-4 sm:px-0 max-w-6xl mx-auto space-y-6">
            <div class="flex justify-between items-center">
                <h1 class="text-3xl font-bold text-fg">"Categories"</h1>
                <a
                    href=CREATE_CATEGORY_ROUTE
                    class="inline-flex items-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover"
                >
                    "Add category"
                </a>
            </div>
            {move || vm.notice.get().map(|msg| view! { <SuccessMessage message=msg /> })}
            <InlineErrorMessage error=vm.error />
            {move || match vm.categories.get() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(Err(err)) => view! { <ErrorMessage message=err.error /> }.into_view(),
                Some(Ok(list)) if list.is_empty() => view! {
                    <EmptyState
                        title="No categories yet"
                        action=(CREATE_CATEGORY_ROUTE, "Create the first category")
                    />
                }
                .into_view(),
                Some(Ok(list)) => view! { <CategoryTable categories=list vm=vm /> }.into_view(),
            }}
            <DeleteCategoryDialog vm=vm />
        </div>
    }
}

fn confirm_label(deleting: bool) -> &'static str {
    if deleting {
        "Deleting..."
    } else {
        "Delete"
    }
}

/// Asks before removing `vm.pending_delete`. Both buttons lock while the
/// delete request is in flight.
#[component]
fn DeleteCategoryDialog(vm: CategoriesListViewModel) -> impl IntoView {
    let deleting = vm.delete_action.pending();
    let cancel = move || {
        if !deleting.get_untracked() {
            vm.cancel_delete();
        }
    };

    move || {
        vm.pending_delete.get().map(|category| {
            view! {
                <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                    <div class="absolute inset-0 bg-overlay-backdrop" on:click=move |_| cancel()></div>
                    <div
                        class="relative z-[71] w-full max-w-md rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                        role="dialog"
                        aria-modal="true"
                        aria-labelledby="delete-category-title"
                        tabindex="-1"
                        on:keydown=move |ev: KeyboardEvent| {
                            if ev.key() == "Escape" {
                                ev.prevent_default();
                                cancel();
                            }
                        }
                    >
                        <h2 id="delete-category-title" class="text-lg font-semibold text-fg">
                            "Delete category"
                        </h2>
                        <p class="text-sm text-fg-muted">
                            "Delete the category "
                            <strong class="text-fg">{category.name}</strong>
                            "? This cannot be undone."
                        </p>
                        <div class="flex justify-end gap-2">
                            <button
                                type="button"
                                class="rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated disabled:opacity-50"
                                disabled=move || deleting.get()
                                on:click=move |_| cancel()
                            >
                                "Cancel"
                            </button>
                            <button
                                type="button"
                                class="rounded-md px-4 py-2 text-sm font-semibold bg-action-danger-bg text-action-danger-text hover:bg-action-danger-bg-hover disabled:opacity-50"
                                disabled=move || deleting.get()
                                on:click=move |_| vm.confirm_delete()
                            >
                                {move || confirm_label(deleting.get())}
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}

#[component]
fn CategoryTable(categories: Vec<Category>, vm: CategoriesListViewModel) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated shadow-md rounded-lg overflow-hidden">
            <table class="w-full">
                <thead class="bg-surface-muted">
                    <tr>
                        <th class="px-6 py-3 text-left text-sm font-medium text-fg-muted">"#"</th>
                        <th class="px-6 py-3 text-left text-sm font-medium text-fg-muted">"Name"</th>
                        <th class="px-6 py-3 text-left text-sm font-medium text-fg-muted">"Description"</th>
                        <th class="px-6 py-3 text-center text-sm font-medium text-fg-muted">"Actions"</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-border">
                    {categories
                        .into_iter()
                        .map(|category| {
                            let id = category.id;
                            let description = category.description.clone().unwrap_or_else(|| "-".to_string());
                            let target = category.clone();
                            view! {
                                <tr class="hover:bg-surface-muted">
                                    <td class="px-6 py-4 text-sm text-fg">{id}</td>
                                    <td class="px-6 py-4 text-sm font-medium text-fg">{category.name}</td>
                                    <td class="px-6 py-4 text-sm text-fg-muted">{description}</td>
                                    <td class="px-6 py-4 text-center space-x-3">
                                        <a href=view_href(id) class="text-action-primary-bg hover:underline">"View"</a>
                                        <a href=edit_href(id) class="text-action-primary-bg hover:underline">"Edit"</a>
                                        <button
                                            type="button"
                                            class="text-status-error-text hover:underline"
                                            on:click=move |_| vm.ask_delete(target.clone())
                                        >
                                            "Delete"
                                        </button>
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}
