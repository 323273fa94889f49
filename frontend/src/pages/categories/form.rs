use super::{
    utils::{parse_category_id, CATEGORIES_ROUTE, FIELD_DESCRIPTION, FIELD_NAME},
    view_model::{use_category_form_view_model, use_category_resource, CategoryFormViewModel},
};
use crate::components::{
    common::Button,
    error::InlineErrorMessage,
    forms::{input_class, Field, FieldErrors, TextInput},
    layout::{ErrorMessage, LoadingSpinner},
};
use leptos::{ev::SubmitEvent, *};
use leptos_router::use_params_map;

#[component]
pub fn CategoryCreatePage() -> impl IntoView {
    let vm = use_category_form_view_model(None);
    view! { <CategoryEditor title="New category" vm=vm /> }
}

#[component]
pub fn CategoryEditPage() -> impl IntoView {
    let params = use_params_map();
    let raw_id = params.with_untracked(|p| p.get("id").cloned().unwrap_or_default());
    view! { <CategoryEdit raw_id=raw_id /> }
}

#[component]
fn CategoryEdit(raw_id: String) -> impl IntoView {
    let vm = use_category_form_view_model(parse_category_id(&raw_id));
    let category = use_category_resource(raw_id);
    create_effect(move |_| {
        if let Some(Ok(found)) = category.get() {
            vm.fill(&found);
        }
    });
    move || match category.get() {
        None => view! { <LoadingSpinner /> }.into_view(),
        Some(Err(err)) => view! {
            <div class="max-w-4xl mx-auto">
                <ErrorMessage message=err.error />
                <a href=CATEGORIES_ROUTE class="text-action-primary-bg hover:underline">"← Back to categories"</a>
            </div>
        }
        .into_view(),
        Some(Ok(_)) => view! { <CategoryEditor title="Edit category" vm=vm /> }.into_view(),
    }
}

#[component]
fn CategoryEditor(title: &'static str, vm: CategoryFormViewModel) -> impl IntoView {
    let errors: Signal<FieldErrors> = vm.field_errors.into();
    let pending = vm.save_action.pending();
    let on_edit = Callback::new(move |field: &'static str| vm.clear_field(field));
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <div class="px-4 sm:px-0 max-w-4xl mx-auto">
            <div class="flex justify-between items-center mb-6">
                <h1 class="text-3xl font-bold text-fg">{title}</h1>
                <a href=CATEGORIES_ROUTE class="text-action-primary-bg hover:underline">"← Back to categories"</a>
            </div>
            <InlineErrorMessage error=vm.error />
            <form on:submit=on_submit class="bg-surface-elevated rounded-lg shadow-md p-6">
                <Field label="Name" id=FIELD_NAME required=true errors=errors>
                    <TextInput
                        id=FIELD_NAME
                        value=vm.name
                        errors=errors
                        placeholder="Category name"
                        disabled=pending
                        on_edit=on_edit
                    />
                </Field>
                <Field label="Description" id=FIELD_DESCRIPTION errors=errors>
                    <textarea
                        id=FIELD_DESCRIPTION
                        rows="4"
                        class=move || input_class(errors.with(|e| e.contains(FIELD_DESCRIPTION)))
                        disabled=move || pending.get()
                        prop:value=move || vm.description.get()
                        on:input=move |ev| {
                            vm.description.set(event_target_value(&ev));
                            on_edit.call(FIELD_DESCRIPTION);
                        }
                    ></textarea>
                </Field>
                <div class="flex justify-end gap-3">
                    <a
                        href=CATEGORIES_ROUTE
                        class="inline-flex items-center rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg border border-border"
                    >
                        "Cancel"
                    </a>
                    <Button submit=true loading=pending>"Save"</Button>
                </div>
            </form>
        </div>
    }
}
