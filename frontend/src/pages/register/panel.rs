use super::{
    utils::{
        FIELD_CIVIL_ID, FIELD_DATE_OF_BIRTH, FIELD_EMAIL, FIELD_FIRST_NAME, FIELD_GENDER,
        FIELD_LAST_NAME, FIELD_PHONE, GENDER_FEMALE, GENDER_MALE,
    },
    view_model::use_register_view_model,
};
use crate::{
    components::{
        common::Button,
        error::InlineErrorMessage,
        forms::{input_class, Field, TextInput},
        guard::RedirectIfAuthenticated,
        layout::SuccessMessage,
    },
    utils::{
        navigation::{DASHBOARD_ROUTE, LOGIN_ROUTE},
        validation::CIVIL_ID_LEN,
    },
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn RegisterPanel() -> impl IntoView {
    let vm = use_register_view_model();
    let pending = vm.register_action.pending();
    let errors: Signal<_> = vm.field_errors.into();
    let on_edit = Callback::new(move |field: &'static str| vm.clear_field(field));
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };
    let gender_class = move || input_class(errors.with(|e| e.contains(FIELD_GENDER)));

    view! {
        <RedirectIfAuthenticated target=DASHBOARD_ROUTE>
            <div class="min-h-screen flex items-center justify-center bg-surface p-4">
                <div class="w-full max-w-2xl bg-surface-elevated p-8 rounded-2xl shadow-xl">
                    <div class="text-center mb-6">
                        <h2 class="text-3xl font-bold text-fg mb-2">"Create an account"</h2>
                        <p class="text-fg-muted">"Register with your civil ID to submit treatment requests."</p>
                    </div>
                    {move || vm.success.get().map(|msg| view! { <SuccessMessage message=msg /> })}
                    <InlineErrorMessage error=vm.error />
                    <form on:submit=on_submit>
                        <fieldset disabled=move || pending.get() class="grid grid-cols-1 md:grid-cols-2 gap-x-4">
                            <Field label="Civil ID" id=FIELD_CIVIL_ID required=true errors=errors>
                                <TextInput
                                    id=FIELD_CIVIL_ID
                                    value=vm.civil_id
                                    errors=errors
                                    max_len=CIVIL_ID_LEN
                                    numeric=true
                                    on_edit=on_edit
                                />
                            </Field>
                            <Field label="Date of birth" id=FIELD_DATE_OF_BIRTH required=true errors=errors>
                                <TextInput
                                    id=FIELD_DATE_OF_BIRTH
                                    value=vm.date_of_birth
                                    errors=errors
                                    input_type="date"
                                    on_edit=on_edit
                                />
                            </Field>
                            <Field label="First name" id=FIELD_FIRST_NAME required=true errors=errors>
                                <TextInput id=FIELD_FIRST_NAME value=vm.first_name errors=errors on_edit=on_edit />
                            </Field>
                            <Field label="Last name" id=FIELD_LAST_NAME required=true errors=errors>
                                <TextInput id=FIELD_LAST_NAME value=vm.last_name errors=errors on_edit=on_edit />
                            </Field>
                            <Field label="Email" id=FIELD_EMAIL required=true errors=errors>
                                <TextInput
                                    id=FIELD_EMAIL
                                    value=vm.email
                                    errors=errors
                                    input_type="email"
                                    on_edit=on_edit
                                />
                            </Field>
                            <Field label="Phone number" id=FIELD_PHONE required=true errors=errors>
                                <TextInput
                                    id=FIELD_PHONE
                                    value=vm.phone
                                    errors=errors
                                    input_type="tel"
                                    max_len=15
                                    numeric=true
                                    on_edit=on_edit
                                />
                            </Field>
                            <Field label="Gender" id=FIELD_GENDER required=true errors=errors>
                                <select
                                    id=FIELD_GENDER
                                    class=gender_class
                                    on:change=move |ev| {
                                        let value = event_target_value(&ev).parse().unwrap_or(0);
                                        vm.gender.set(value);
                                        vm.clear_field(FIELD_GENDER);
                                    }
                                >
                                    <option value="0" selected=move || vm.gender.get() == 0>"Select..."</option>
                                    <option value=GENDER_MALE.to_string() selected=move || vm.gender.get() == GENDER_MALE>"Male"</option>
                                    <option value=GENDER_FEMALE.to_string() selected=move || vm.gender.get() == GENDER_FEMALE>"Female"</option>
                                </select>
                            </Field>
                        </fieldset>
                        <Button submit=true class="w-full py-3 mt-2" loading=pending>
                            {move || if pending.get() { "Registering..." } else { "Register" }}
                        </Button>
                        <p class="text-center text-sm text-fg-muted mt-4">
                            "Already registered? "
                            <a href=LOGIN_ROUTE class="text-action-primary-bg font-semibold hover:underline">"Sign in"</a>
                        </p>
                    </form>
                </div>
            </div>
        </RedirectIfAuthenticated>
    }
}
