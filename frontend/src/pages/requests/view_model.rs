use super::{
    repository::RequestsRepository,
    utils::{build_message, numeric_request_id, CreateRequestForm, EscortForm},
};
use crate::{
    api::{
        ApiClient, ApiError, Attachment, CreateRequestPayload, Lookups, MedicalRequest, NewEscort,
        NewMessage, Ticket,
    },
    components::forms::FieldErrors,
    utils::navigation::redirect_to,
};
use leptos::*;

pub const REQUESTS_ROUTE: &str = "/requests";

fn repository() -> RequestsRepository {
    RequestsRepository::new(use_context::<ApiClient>().unwrap_or_else(ApiClient::new))
}

#[derive(Clone, Copy)]
pub struct RequestsListViewModel {
    pub requests: Resource<u32, Result<Vec<MedicalRequest>, ApiError>>,
    pub reload: RwSignal<u32>,
}

pub fn use_requests_list_view_model() -> RequestsListViewModel {
    let repo = repository();
    let reload = create_rw_signal(0u32);
    let requests = create_local_resource(
        move || reload.get(),
        move |_| {
            let repo = repo.clone();
            async move { repo.list().await }
        },
    );
    RequestsListViewModel { requests, reload }
}

/// One signal per input so fields re-render independently.
#[derive(Clone, Copy)]
pub struct CreateRequestFields {
    pub hospital: RwSignal<String>,
    pub specialization: RwSignal<String>,
    pub diagnosis: RwSignal<String>,
    pub notes: RwSignal<String>,
    pub patient_full_name: RwSignal<String>,
    pub patient_civil_id: RwSignal<String>,
    pub patient_mobile: RwSignal<String>,
    pub patient_email: RwSignal<String>,
    pub patient_gender: RwSignal<String>,
    pub relationship: RwSignal<String>,
    pub files: RwSignal<Vec<Attachment>>,
}

impl CreateRequestFields {
    fn new(initial: CreateRequestForm) -> Self {
        Self {
            hospital: create_rw_signal(initial.hospital),
            specialization: create_rw_signal(initial.specialization),
            diagnosis: create_rw_signal(initial.diagnosis),
            notes: create_rw_signal(initial.notes),
            patient_full_name: create_rw_signal(initial.patient_full_name),
            patient_civil_id: create_rw_signal(initial.patient_civil_id),
            patient_mobile: create_rw_signal(initial.patient_mobile),
            patient_email: create_rw_signal(initial.patient_email),
            patient_gender: create_rw_signal(initial.patient_gender),
            relationship: create_rw_signal(initial.relationship),
            files: create_rw_signal(initial.files),
        }
    }

    pub fn snapshot(&self) -> CreateRequestForm {
        CreateRequestForm {
            hospital: self.hospital.get_untracked(),
            specialization: self.specialization.get_untracked(),
            diagnosis: self.diagnosis.get_untracked(),
            notes: self.notes.get_untracked(),
            patient_full_name: self.patient_full_name.get_untracked(),
            patient_civil_id: self.patient_civil_id.get_untracked(),
            patient_mobile: self.patient_mobile.get_untracked(),
            patient_email: self.patient_email.get_untracked(),
            patient_gender: self.patient_gender.get_untracked(),
            relationship: self.relationship.get_untracked(),
            files: self.files.get_untracked(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct CreateRequestViewModel {
    pub fields: CreateRequestFields,
    pub field_errors: RwSignal<FieldErrors>,
    pub error: RwSignal<Option<ApiError>>,
    pub file_errors: RwSignal<Vec<String>>,
    pub uploading: RwSignal<bool>,
    pub lookups: Resource<(), Lookups>,
    pub create_action: Action<CreateRequestPayload, Result<(), ApiError>>,
}

impl CreateRequestViewModel {
    pub fn clear_field(&self, field: &str) {
        if self.field_errors.with_untracked(|e| e.contains(field)) {
            self.field_errors.update(|e| e.remove(field));
        }
    }

    pub fn submit(&self) {
        if self.create_action.pending().get_untracked() || self.uploading.get_untracked() {
            return;
        }
        self.error.set(None);
        match self.fields.snapshot().validate() {
            Ok(payload) => {
                self.field_errors.set(FieldErrors::new());
                self.create_action.dispatch(payload);
            }
            Err(errors) => self.field_errors.set(errors),
        }
    }

    pub fn add_files(&self, results: Vec<Result<Attachment, String>>) {
        let (accepted, rejected): (Vec<_>, Vec<_>) = results.into_iter().partition(Result::is_ok);
        let accepted = accepted.into_iter().filter_map(Result::ok);
        let rejected = rejected.into_iter().filter_map(Result::err).collect();
        let _ = self.fields.files.try_update(|files| files.extend(accepted));
        let _ = self.file_errors.try_set(rejected);
    }

    /// Lands file reads that completed after an await. Returns `false` when
    /// the form was torn down meanwhile; nothing is touched then.
    pub fn finish_upload(&self, results: Vec<Result<Attachment, String>>) -> bool {
        if self.uploading.try_set(false).is_some() {
            log::debug!("attachment reads finished after the form closed");
            return false;
        }
        self.add_files(results);
        true
    }

    pub fn remove_file(&self, index: usize) {
        self.fields.files.update(|files| {
            if index < files.len() {
                files.remove(index);
            }
        });
    }
}

pub fn use_create_request_view_model(initial: CreateRequestForm) -> CreateRequestViewModel {
    let repo = repository();
    let lookups_repo = repo.clone();
    let lookups = create_local_resource(
        || (),
        move |_| {
            let repo = lookups_repo.clone();
            async move { repo.lookups().await }
        },
    );
    let create_action = create_action(move |payload: &CreateRequestPayload| {
        let repo = repo.clone();
        let payload = payload.clone();
        async move { repo.create(payload).await }
    });
    let vm = CreateRequestViewModel {
        fields: CreateRequestFields::new(initial),
        field_errors: create_rw_signal(FieldErrors::new()),
        error: create_rw_signal(None),
        file_errors: create_rw_signal(Vec::new()),
        uploading: create_rw_signal(false),
        lookups,
        create_action,
    };

    create_effect(move |_| {
        if let Some(result) = vm.create_action.value().get() {
            match result {
                Ok(()) => {
                    log::info!("treatment request submitted");
                    redirect_to(REQUESTS_ROUTE);
                }
                Err(err) => vm.error.set(Some(err)),
            }
        }
    });

    vm
}

#[derive(Clone, Copy)]
pub struct RequestDetailViewModel {
    pub request_id: StoredValue<String>,
    pub request: Resource<u32, Result<MedicalRequest, ApiError>>,
    pub tickets: Resource<u32, Vec<Ticket>>,
    pub reload: RwSignal<u32>,
    pub message: RwSignal<String>,
    pub escort: EscortFields,
    pub escort_errors: RwSignal<FieldErrors>,
    pub error: RwSignal<Option<ApiError>>,
    pub notice: RwSignal<Option<String>>,
    pub message_action: Action<NewMessage, Result<(), ApiError>>,
    pub escort_action: Action<NewEscort, Result<(), ApiError>>,
    pub remove_escort_action: Action<String, Result<(), ApiError>>,
}

#[derive(Clone, Copy)]
pub struct EscortFields {
    pub full_name: RwSignal<String>,
    pub civil_id: RwSignal<String>,
    pub mobile: RwSignal<String>,
    pub relationship: RwSignal<String>,
}

impl EscortFields {
    fn new() -> Self {
        Self {
            full_name: create_rw_signal(String::new()),
            civil_id: create_rw_signal(String::new()),
            mobile: create_rw_signal(String::new()),
            relationship: create_rw_signal(String::new()),
        }
    }

    fn snapshot(&self) -> EscortForm {
        EscortForm {
            full_name: self.full_name.get_untracked(),
            civil_id: self.civil_id.get_untracked(),
            mobile: self.mobile.get_untracked(),
            relationship: self.relationship.get_untracked(),
        }
    }

    fn reset(&self) {
        for field in [self.full_name, self.civil_id, self.mobile, self.relationship] {
            field.set(String::new());
        }
    }
}

impl RequestDetailViewModel {
    fn numeric_id(&self) -> Option<i64> {
        self.request_id.with_value(|id| numeric_request_id(id))
    }

    pub fn send_message(&self) {
        if self.message_action.pending().get_untracked() {
            return;
        }
        let Some(id) = self.numeric_id() else {
            self.error.set(Some(ApiError::validation("This request cannot receive messages.")));
            return;
        };
        match build_message(id, &self.message.get_untracked()) {
            Ok(message) => {
                self.error.set(None);
                self.message_action.dispatch(message);
            }
            Err(msg) => self.error.set(Some(ApiError::validation_field("message", msg))),
        }
    }

    pub fn add_escort(&self) {
        if self.escort_action.pending().get_untracked() {
            return;
        }
        let Some(id) = self.numeric_id() else {
            self.error.set(Some(ApiError::validation("Escorts cannot be added to this request.")));
            return;
        };
        match self.escort.snapshot().validate(id) {
            Ok(escort) => {
                self.escort_errors.set(FieldErrors::new());
                self.escort_action.dispatch(escort);
            }
            Err(errors) => self.escort_errors.set(errors),
        }
    }

    pub fn remove_escort(&self, escort_id: String) {
        if !self.remove_escort_action.pending().get_untracked() {
            self.remove_escort_action.dispatch(escort_id);
        }
    }

    fn settle(&self, result: Result<(), ApiError>, notice: &str) -> bool {
        match result {
            Ok(()) => {
                self.error.set(None);
                self.notice.set(Some(notice.to_string()));
                self.reload.update(|n| *n += 1);
                true
            }
            Err(err) => {
                self.notice.set(None);
                self.error.set(Some(err));
                false
            }
        }
    }
}

pub fn use_request_detail_view_model(request_id: String) -> RequestDetailViewModel {
    let repo = repository();
    let reload = create_rw_signal(0u32);
    let id = store_value(request_id);

    let request = {
        let repo = repo.clone();
        create_local_resource(
            move || reload.get(),
            move |_| {
                let repo = repo.clone();
                let id = id.get_value();
                async move { repo.get(&id).await }
            },
        )
    };
    let tickets = {
        let repo = repo.clone();
        create_local_resource(
            move || reload.get(),
            move |_| {
                let repo = repo.clone();
                let id = id.get_value();
                async move { repo.tickets(&id).await }
            },
        )
    };
    let message_action = {
        let repo = repo.clone();
        create_action(move |message: &NewMessage| {
            let repo = repo.clone();
            let message = message.clone();
            async move { repo.add_message(message).await }
        })
    };
    let escort_action = {
        let repo = repo.clone();
        create_action(move |escort: &NewEscort| {
            let repo = repo.clone();
            let escort = escort.clone();
            async move { repo.add_escort(escort).await }
        })
    };
    let remove_escort_action = create_action(move |escort_id: &String| {
        let repo = repo.clone();
        let escort_id = escort_id.clone();
        async move { repo.remove_escort(&escort_id).await }
    });

    let vm = RequestDetailViewModel {
        request_id: id,
        request,
        tickets,
        reload,
        message: create_rw_signal(String::new()),
        escort: EscortFields::new(),
        escort_errors: create_rw_signal(FieldErrors::new()),
        error: create_rw_signal(None),
        notice: create_rw_signal(None),
        message_action,
        escort_action,
        remove_escort_action,
    };

    create_effect(move |_| {
        if let Some(result) = vm.message_action.value().get() {
            if vm.settle(result, "Message sent.") {
                vm.message.set(String::new());
            }
        }
    });
    create_effect(move |_| {
        if let Some(result) = vm.escort_action.value().get() {
            if vm.settle(result, "Escort added.") {
                vm.escort.reset();
            }
        }
    });
    create_effect(move |_| {
        if let Some(result) = vm.remove_escort_action.value().get() {
            vm.settle(result, "Escort removed.");
        }
    });

    vm
}
