use super::{
    utils::{
        FIELD_ESCORT_CIVIL_ID, FIELD_ESCORT_MOBILE, FIELD_ESCORT_NAME, FIELD_ESCORT_RELATIONSHIP,
        RELATIONSHIPS,
    },
    view_model::{use_request_detail_view_model, RequestDetailViewModel, REQUESTS_ROUTE},
};
use crate::{
    api::{MedicalRequest, Ticket},
    components::{
        common::{Button, ButtonVariant},
        error::InlineErrorMessage,
        forms::{input_class, Field, TextInput},
        layout::{ErrorMessage, LoadingSpinner, SuccessMessage},
    },
    utils::validation::CIVIL_ID_LEN,
};
use leptos::{ev::SubmitEvent, *};
use leptos_router::use_params_map;

#[component]
pub fn RequestDetailsPage() -> impl IntoView {
    let params = use_params_map();
    let id = params.with_untracked(|p| p.get("id").cloned().unwrap_or_default());
    view! { <RequestDetails request_id=id /> }
}

#[component]
pub fn RequestDetails(#[prop(into)] request_id: String) -> impl IntoView {
    let vm = use_request_detail_view_model(request_id);

    view! {
        <div class="px-4 sm:px-0 max-w-5xl mx-auto space-y-6">
            <a href=REQUESTS_ROUTE class="text-action-primary-bg hover:underline">"← Back to requests"</a>
            {move || vm.notice.get().map(|msg| view! { <SuccessMessage message=msg /> })}
            <InlineErrorMessage error=Signal::derive(move || vm.error.get().filter(|e| !e.is_field("message"))) />
            {move || match vm.request.get() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(Err(err)) => view! { <ErrorMessage message=err.error /> }.into_view(),
                Some(Ok(request)) => view! { <RequestSummary request=request vm=vm /> }.into_view(),
            }}
            {move || {
                let tickets = vm.tickets.get().unwrap_or_default();
                (!tickets.is_empty()).then(|| view! { <TicketList tickets=tickets /> })
            }}
            <MessageForm vm=vm />
            <EscortForm vm=vm />
        </div>
    }
}

fn or_unset(value: Option<String>) -> String {
    value.unwrap_or_else(|| "Not specified".to_string())
}

#[component]
fn RequestSummary(request: MedicalRequest, vm: RequestDetailViewModel) -> impl IntoView {
    let info = [
        ("Specialization", request.specialization()),
        ("Hospital", request.hospital()),
        ("Requested on", request.requested_on()),
        ("Doctor", request.doctor()),
    ];
    let patient = [
        ("Name", request.patient_name()),
        ("Civil ID", request.patient_civil_id()),
        ("Phone", request.patient_phone()),
        ("Email", request.patient_email()),
    ];
    let escorts = request.escorts();
    let messages = request.messages();
    let removing = vm.remove_escort_action.pending();

    view! {
        <h1 class="text-3xl font-bold text-fg">{request.number()}</h1>
        <section class="bg-surface-elevated rounded-lg shadow-md p-6">
            <div class="flex justify-between items-center mb-4">
                <h2 class="text-xl font-semibold text-fg">"Request information"</h2>
                <span class="px-3 py-1 rounded-full text-sm bg-status-warning-bg text-status-warning-text">
                    {request.status()}
                </span>
            </div>
            <dl class="grid grid-cols-2 gap-4">
                {info
                    .into_iter()
                    .map(|(label, value)| view! {
                        <div>
                            <dt class="text-sm text-fg-muted">{label}</dt>
                            <dd class="font-medium text-fg">{or_unset(value)}</dd>
                        </div>
                    })
                    .collect_view()}
            </dl>
            {request.diagnosis().map(|d| view! {
                <div class="mt-4">
                    <p class="text-sm text-fg-muted">"Diagnosis"</p>
                    <p class="mt-1 text-fg">{d}</p>
                </div>
            })}
            {request.treatment_plan().map(|plan| view! {
                <div class="mt-4">
                    <p class="text-sm text-fg-muted">"Treatment plan"</p>
                    <p class="mt-1 text-fg">{plan}</p>
                </div>
            })}
        </section>
        <section class="bg-surface-elevated rounded-lg shadow-md p-6">
            <h2 class="text-xl font-semibold text-fg mb-4">"Patient"</h2>
            <dl class="grid grid-cols-2 gap-4">
                {patient
                    .into_iter()
                    .map(|(label, value)| view! {
                        <div>
                            <dt class="text-sm text-fg-muted">{label}</dt>
                            <dd class="font-medium text-fg">{or_unset(value)}</dd>
                        </div>
                    })
                    .collect_view()}
            </dl>
        </section>
        {(!escorts.is_empty()).then(|| view! {
            <section class="bg-surface-elevated rounded-lg shadow-md p-6">
                <h2 class="text-xl font-semibold text-fg mb-4">"Escorts"</h2>
                <ul class="divide-y divide-border">
                    {escorts
                        .into_iter()
                        .map(|escort| {
                            let id = escort.id();
                            view! {
                                <li class="py-3 flex justify-between items-center">
                                    <span class="text-fg">
                                        {escort.full_name()}
                                        {escort.relationship().map(|r| format!(" ({})", r))}
                                    </span>
                                    {id.map(|id| view! {
                                        <button
                                            type="button"
                                            class=format!("rounded-md px-3 py-1 text-sm {}", ButtonVariant::Danger.classes())
                                            disabled=move || removing.get()
                                            on:click=move |_| vm.remove_escort(id.clone())
                                        >
                                            "Remove"
                                        </button>
                                    })}
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </section>
        })}
        {(!messages.is_empty()).then(|| view! {
            <section class="bg-surface-elevated rounded-lg shadow-md p-6">
                <h2 class="text-xl font-semibold text-fg mb-4">"Messages"</h2>
                <ul class="space-y-2">
                    {messages
                        .into_iter()
                        .map(|m| view! { <li class="p-3 bg-surface-muted rounded text-fg">{m}</li> })
                        .collect_view()}
                </ul>
            </section>
        })}
    }
}

#[component]
fn TicketList(tickets: Vec<Ticket>) -> impl IntoView {
    view! {
        <section class="bg-surface-elevated rounded-lg shadow-md p-6">
            <h2 class="text-xl font-semibold text-fg mb-4">"Tickets"</h2>
            <div class="space-y-3">
                {tickets
                    .into_iter()
                    .map(|ticket| view! {
                        <div class="p-4 bg-surface-muted rounded">
                            <p class="font-medium text-fg">{ticket.title()}</p>
                            {ticket.description().map(|d| view! {
                                <p class="text-sm text-fg-muted mt-1">{d}</p>
                            })}
                        </div>
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn MessageForm(vm: RequestDetailViewModel) -> impl IntoView {
    let pending = vm.message_action.pending();
    let field_error = move || vm.error.get().filter(|e| e.is_field("message")).map(|e| e.error);
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.send_message();
    };
    view! {
        <section class="bg-surface-elevated rounded-lg shadow-md p-6">
            <h2 class="text-xl font-semibold text-fg mb-4">"Send a message"</h2>
            <form on:submit=on_submit class="space-y-3">
                <textarea
                    id="message"
                    rows="3"
                    class=move || input_class(field_error().is_some())
                    prop:value=move || vm.message.get()
                    on:input=move |ev| {
                        vm.message.set(event_target_value(&ev));
                        if field_error().is_some() {
                            vm.error.set(None);
                        }
                    }
                ></textarea>
                {move || field_error().map(|msg| view! {
                    <p class="text-status-error-text text-sm">{msg}</p>
                })}
                <Button submit=true loading=pending>"Send"</Button>
            </form>
        </section>
    }
}

#[component]
fn EscortForm(vm: RequestDetailViewModel) -> impl IntoView {
    let pending = vm.escort_action.pending();
    let errors: Signal<_> = vm.escort_errors.into();
    let on_edit = Callback::new(move |field: &'static str| {
        vm.escort_errors.update(|e| e.remove(field));
    });
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.add_escort();
    };
    view! {
        <section class="bg-surface-elevated rounded-lg shadow-md p-6">
            <h2 class="text-xl font-semibold text-fg mb-4">"Add an escort"</h2>
            <form on:submit=on_submit class="grid grid-cols-1 md:grid-cols-2 gap-x-4">
                <Field label="Full name" id=FIELD_ESCORT_NAME required=true errors=errors>
                    <TextInput id=FIELD_ESCORT_NAME value=vm.escort.full_name errors=errors on_edit=on_edit />
                </Field>
                <Field label="Civil ID" id=FIELD_ESCORT_CIVIL_ID required=true errors=errors>
                    <TextInput
                        id=FIELD_ESCORT_CIVIL_ID
                        value=vm.escort.civil_id
                        errors=errors
                        max_len=CIVIL_ID_LEN
                        numeric=true
                        on_edit=on_edit
                    />
                </Field>
                <Field label="Mobile" id=FIELD_ESCORT_MOBILE required=true errors=errors>
                    <TextInput
                        id=FIELD_ESCORT_MOBILE
                        value=vm.escort.mobile
                        errors=errors
                        input_type="tel"
                        max_len=15
                        numeric=true
                        on_edit=on_edit
                    />
                </Field>
                <Field label="Relationship" id=FIELD_ESCORT_RELATIONSHIP required=true errors=errors>
                    <select
                        id=FIELD_ESCORT_RELATIONSHIP
                        class=move || input_class(errors.with(|e| e.contains(FIELD_ESCORT_RELATIONSHIP)))
                        on:change=move |ev| {
                            vm.escort.relationship.set(event_target_value(&ev));
                            on_edit.call(FIELD_ESCORT_RELATIONSHIP);
                        }
                    >
                        <option value="">"Select..."</option>
                        {RELATIONSHIPS
                            .iter()
                            .map(|rel| view! {
                                <option value=*rel selected=move || vm.escort.relationship.get() == *rel>{*rel}</option>
                            })
                            .collect_view()}
                    </select>
                </Field>
                <div class="md:col-span-2">
                    <Button submit=true loading=pending>"Add escort"</Button>
                </div>
            </form>
        </section>
    }
}
