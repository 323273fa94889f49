use crate::{api::ApiError, utils::validation::digits_only};
use leptos::*;
use std::collections::BTreeMap;

/// Per-field validation messages keyed by form field id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Splits a server error into a field message when it names one of
    /// `known_fields`, otherwise leaves it for the page banner.
    pub fn absorb(&mut self, error: ApiError, known_fields: &[&str]) -> Option<ApiError> {
        match error.field.as_deref() {
            Some(field) if known_fields.contains(&field) => {
                self.insert(field, error.error);
                None
            }
            _ => Some(error),
        }
    }
}

#[component]
pub fn Field(
    #[prop(into)] label: String,
    id: &'static str,
    #[prop(optional)] required: bool,
    #[prop(into)] errors: Signal<FieldErrors>,
    children: Children,
) -> impl IntoView {
    let message = move || errors.with(|e| e.get(id).map(str::to_string));
    view! {
        <div class="mb-4">
            <label for=id class="block text-sm font-medium text-fg-muted mb-2">
                {label}
                {required.then(|| view! { <span class="text-status-error-text ml-1">"*"</span> })}
            </label>
            {children()}
            {move || message().map(|msg| view! {
                <p class="text-status-error-text text-sm mt-1" data-field-error=id>{msg}</p>
            })}
        </div>
    }
}

pub fn input_class(has_error: bool) -> &'static str {
    if has_error {
        "w-full rounded-lg border border-status-error-border bg-form-control-bg px-4 py-3 text-fg focus:ring-2 focus:ring-action-primary-focus"
    } else {
        "w-full rounded-lg border border-form-control-border bg-form-control-bg px-4 py-3 text-fg focus:ring-2 focus:ring-action-primary-focus"
    }
}

/// Text input bound to `value`. With `numeric`, non-digits are dropped as typed.
#[component]
pub fn TextInput(
    id: &'static str,
    value: RwSignal<String>,
    #[prop(into)] errors: Signal<FieldErrors>,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional)] max_len: Option<usize>,
    #[prop(optional)] numeric: bool,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional)] on_edit: Option<Callback<&'static str>>,
) -> impl IntoView {
    let has_error = move || errors.with(|e| e.contains(id));
    view! {
        <input
            id=id
            type=input_type.unwrap_or("text")
            class=move || input_class(has_error())
            placeholder=placeholder
            maxlength=max_len.map(|n| n.to_string())
            disabled=move || disabled.get()
            prop:value=move || value.get()
            on:input=move |ev| {
                let raw = event_target_value(&ev);
                let mut next = if numeric { digits_only(&raw) } else { raw };
                if let Some(max) = max_len {
                    next = next.chars().take(max).collect();
                }
                value.set(next);
                if let Some(cb) = on_edit {
                    cb.call(id);
                }
            }
        />
    }
}
