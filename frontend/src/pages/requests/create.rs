use super::{
    utils::{
        CreateRequestForm, FIELD_DIAGNOSIS, FIELD_HOSPITAL, FIELD_NOTES, FIELD_PATIENT_CIVIL_ID,
        FIELD_PATIENT_EMAIL, FIELD_PATIENT_GENDER, FIELD_PATIENT_MOBILE, FIELD_PATIENT_NAME,
        FIELD_RELATIONSHIP, FIELD_SPECIALIZATION, GENDERS, RELATIONSHIPS,
    },
    view_model::{use_create_request_view_model, CreateRequestViewModel, REQUESTS_ROUTE},
};
use crate::{
    api::LookupItem,
    components::{
        common::Button,
        error::InlineErrorMessage,
        forms::{input_class, Field, FieldErrors, TextInput},
    },
    state::auth::use_auth,
    utils::validation::CIVIL_ID_LEN,
};
use leptos::{ev::SubmitEvent, *};

fn labels(items: &[LookupItem]) -> Vec<String> {
    items.iter().map(|item| item.label().to_string()).collect()
}

#[component]
fn SelectInput(
    id: &'static str,
    value: RwSignal<String>,
    #[prop(into)] options: Signal<Vec<String>>,
    #[prop(into)] errors: Signal<FieldErrors>,
    on_edit: Callback<&'static str>,
) -> impl IntoView {
    view! {
        <select
            id=id
            class=move || input_class(errors.with(|e| e.contains(id)))
            on:change=move |ev| {
                value.set(event_target_value(&ev));
                on_edit.call(id);
            }
        >
            <option value="">"Select..."</option>
            {move || {
                options
                    .get()
                    .into_iter()
                    .map(|opt| {
                        let selected = value.get_untracked() == opt;
                        view! { <option value=opt.clone() selected=selected>{opt}</option> }
                    })
                    .collect_view()
            }}
        </select>
    }
}

#[component]
fn TextArea(
    id: &'static str,
    value: RwSignal<String>,
    #[prop(into)] errors: Signal<FieldErrors>,
    on_edit: Callback<&'static str>,
) -> impl IntoView {
    view! {
        <textarea
            id=id
            rows="3"
            class=move || input_class(errors.with(|e| e.contains(id)))
            prop:value=move || value.get()
            on:input=move |ev| {
                value.set(event_target_value(&ev));
                on_edit.call(id);
            }
        ></textarea>
    }
}

#[component]
pub fn CreateRequestPage() -> impl IntoView {
    let user = use_auth().state().with_untracked(|s| s.user.clone());
    let vm = use_create_request_view_model(CreateRequestForm::prefilled(user.as_ref()));
    view! { <RequestForm vm=vm /> }
}

#[component]
fn RequestForm(vm: CreateRequestViewModel) -> impl IntoView {
    let f = vm.fields;
    let errors: Signal<FieldErrors> = vm.field_errors.into();
    let pending = vm.create_action.pending();
    let busy = Signal::derive(move || pending.get() || vm.uploading.get());
    let on_edit = Callback::new(move |field: &'static str| vm.clear_field(field));
    let hospitals = Signal::derive(move || {
        vm.lookups.get().map(|l| labels(&l.hospitals)).unwrap_or_default()
    });
    let specializations = Signal::derive(move || {
        vm.lookups
            .get()
            .map(|l| labels(&l.specializations))
            .unwrap_or_default()
    });
    let genders = Signal::derive(|| GENDERS.iter().map(|g| g.to_string()).collect::<Vec<_>>());
    let relationships =
        Signal::derive(|| RELATIONSHIPS.iter().map(|r| r.to_string()).collect::<Vec<_>>());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <div class="px-4 sm:px-0 max-w-4xl mx-auto">
            <h1 class="text-3xl font-bold text-fg mb-6">"New treatment request"</h1>
            <InlineErrorMessage error=vm.error />
            <form on:submit=on_submit class="bg-surface-elevated rounded-lg shadow-md p-6 space-y-6">
                <fieldset disabled=move || pending.get()>
                    <h2 class="text-lg font-semibold text-fg mb-4">"Treatment"</h2>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-x-4">
                        <Field label="Hospital" id=FIELD_HOSPITAL required=true errors=errors>
                            <SelectInput id=FIELD_HOSPITAL value=f.hospital options=hospitals errors=errors on_edit=on_edit />
                        </Field>
                        <Field label="Specialization" id=FIELD_SPECIALIZATION required=true errors=errors>
                            <SelectInput
                                id=FIELD_SPECIALIZATION
                                value=f.specialization
                                options=specializations
                                errors=errors
                                on_edit=on_edit
                            />
                        </Field>
                    </div>
                    <Field label="Diagnosis" id=FIELD_DIAGNOSIS required=true errors=errors>
                        <TextArea id=FIELD_DIAGNOSIS value=f.diagnosis errors=errors on_edit=on_edit />
                    </Field>
                    <Field label="Notes" id=FIELD_NOTES errors=errors>
                        <TextArea id=FIELD_NOTES value=f.notes errors=errors on_edit=on_edit />
                    </Field>

                    <h2 class="text-lg font-semibold text-fg mb-4">"Patient"</h2>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-x-4">
                        <Field label="Full name" id=FIELD_PATIENT_NAME required=true errors=errors>
                            <TextInput id=FIELD_PATIENT_NAME value=f.patient_full_name errors=errors on_edit=on_edit />
                        </Field>
                        <Field label="Civil ID" id=FIELD_PATIENT_CIVIL_ID required=true errors=errors>
                            <TextInput
                                id=FIELD_PATIENT_CIVIL_ID
                                value=f.patient_civil_id
                                errors=errors
                                max_len=CIVIL_ID_LEN
                                numeric=true
                                on_edit=on_edit
                            />
                        </Field>
                        <Field label="Mobile" id=FIELD_PATIENT_MOBILE required=true errors=errors>
                            <TextInput
                                id=FIELD_PATIENT_MOBILE
                                value=f.patient_mobile
                                errors=errors
                                input_type="tel"
                                max_len=15
                                numeric=true
                                on_edit=on_edit
                            />
                        </Field>
                        <Field label="Email" id=FIELD_PATIENT_EMAIL errors=errors>
                            <TextInput
                                id=FIELD_PATIENT_EMAIL
                                value=f.patient_email
                                errors=errors
                                input_type="email"
                                on_edit=on_edit
                            />
                        </Field>
                        <Field label="Gender" id=FIELD_PATIENT_GENDER required=true errors=errors>
                            <SelectInput id=FIELD_PATIENT_GENDER value=f.patient_gender options=genders errors=errors on_edit=on_edit />
                        </Field>
                        <Field label="Relationship to patient" id=FIELD_RELATIONSHIP required=true errors=errors>
                            <SelectInput
                                id=FIELD_RELATIONSHIP
                                value=f.relationship
                                options=relationships
                                errors=errors
                                on_edit=on_edit
                            />
                        </Field>
                    </div>

                    <AttachmentPicker vm=vm />
                </fieldset>
                <div class="flex justify-end gap-3">
                    <a
                        href=REQUESTS_ROUTE
                        class="inline-flex items-center rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg border border-border"
                    >
                        "Cancel"
                    </a>
                    <Button submit=true loading=busy>"Submit request"</Button>
                </div>
            </form>
        </div>
    }
}

#[component]
fn AttachmentPicker(vm: CreateRequestViewModel) -> impl IntoView {
    let on_files = move |ev: ev::Event| {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(list) = input.files() else {
                return;
            };
            vm.uploading.set(true);
            spawn_local(async move {
                let results = super::attachments::read_files(list).await;
                vm.finish_upload(results);
            });
            input.set_value("");
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = (ev, vm);
    };

    view! {
        <div class="mb-4">
            <label for="attachments" class="block text-sm font-medium text-fg-muted mb-2">"Attachments"</label>
            <input id="attachments" type="file" multiple=true class="text-fg" on:change=on_files />
            <p class="text-xs text-fg-muted mt-1">"Up to 5 MB per file."</p>
            <Show when=move || vm.uploading.get()>
                <p class="text-sm text-fg-muted">"Reading files..."</p>
            </Show>
            {move || {
                vm.file_errors
                    .get()
                    .into_iter()
                    .map(|msg| view! { <p class="text-status-error-text text-sm" data-file-error="">{msg}</p> })
                    .collect_view()
            }}
            <ul class="mt-2 space-y-1">
                {move || {
                    vm.fields
                        .files
                        .get()
                        .into_iter()
                        .enumerate()
                        .map(|(index, file)| view! {
                            <li class="flex justify-between items-center text-sm text-fg">
                                <span>{file.file_name}</span>
                                <button
                                    type="button"
                                    class="text-status-error-text hover:underline"
                                    on:click=move |_| vm.remove_file(index)
                                >
                                    "Remove"
                                </button>
                            </li>
                        })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}
