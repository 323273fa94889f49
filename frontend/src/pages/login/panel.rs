use super::view_model::use_login_view_model;
use crate::{
    components::{
        common::Button,
        error::InlineErrorMessage,
        forms::{FieldErrors, TextInput},
        guard::RedirectIfAuthenticated,
    },
    utils::{
        navigation::{current_location, post_login_target, REGISTER_ROUTE},
        validation::CIVIL_ID_LEN,
    },
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn LoginPanel() -> impl IntoView {
    let vm = use_login_view_model();
    let (_, search) = current_location();
    let target = post_login_target(&search);
    let pending = vm.login_action.pending();
    let field_errors = Signal::derive(move || {
        let mut errors = FieldErrors::new();
        if let Some(err) = vm.error.get().filter(|e| e.field.is_some()) {
            errors.insert("civilId", err.error);
        }
        errors
    });
    let banner = Signal::derive(move || vm.error.get().filter(|e| e.field.is_none()));
    let field_message = move || field_errors.with(|e| e.get("civilId").map(str::to_string));
    let on_edit = Callback::new(move |_: &'static str| vm.error.set(None));
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <RedirectIfAuthenticated target=target>
            <div class="min-h-screen flex items-center justify-center bg-surface p-4">
                <div class="w-full max-w-md bg-surface-elevated p-8 rounded-2xl shadow-xl">
                    <div class="text-center mb-6">
                        <h2 class="text-3xl font-bold text-fg mb-2">"Sign in"</h2>
                        <p class="text-fg-muted">"Use your civil ID to access your requests."</p>
                    </div>
                    <form class="space-y-4" on:submit=on_submit>
                        <div class="mb-4">
                            <label for="civilId" class="block text-sm font-medium text-fg-muted mb-2">
                                "Civil ID" <span class="text-status-error-text">" *"</span>
                            </label>
                            <TextInput
                                id="civilId"
                                value=vm.civil_id
                                errors=field_errors
                                placeholder="12-digit civil ID"
                                max_len=CIVIL_ID_LEN
                                numeric=true
                                disabled=pending
                                on_edit=on_edit
                            />
                            {move || field_message().map(|msg| view! {
                                <p class="text-status-error-text text-sm mt-1">{msg}</p>
                            })}
                        </div>
                        <InlineErrorMessage error=banner />
                        <Button submit=true class="w-full py-3" loading=pending>
                            {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                        </Button>
                        <p class="text-center text-sm text-fg-muted mt-4">
                            "No account yet? "
                            <a href=REGISTER_ROUTE class="text-action-primary-bg font-semibold hover:underline">
                                "Register"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </RedirectIfAuthenticated>
    }
}
