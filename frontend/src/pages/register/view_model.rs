use super::utils::{RegisterForm, REGISTER_FIELDS};
use crate::{
    api::{ApiError, RegisterRequest},
    components::forms::FieldErrors,
    state::auth,
    utils::{
        navigation::{redirect_to, LOGIN_ROUTE},
        time::{BrowserScheduler, Scheduler},
    },
};
use leptos::*;
use std::{cell::RefCell, rc::Rc, time::Duration};

pub const MSG_REGISTERED: &str = "Registration complete. You can now sign in with your civil ID.";
pub const LOGIN_REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Copy)]
pub struct RegisterViewModel {
    pub civil_id: RwSignal<String>,
    pub date_of_birth: RwSignal<String>,
    pub first_name: RwSignal<String>,
    pub last_name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub phone: RwSignal<String>,
    pub gender: RwSignal<u8>,
    pub field_errors: RwSignal<FieldErrors>,
    pub error: RwSignal<Option<ApiError>>,
    pub success: RwSignal<Option<String>>,
    pub register_action: Action<RegisterRequest, Result<(), ApiError>>,
}

impl RegisterViewModel {
    pub fn form(&self) -> RegisterForm {
        RegisterForm {
            civil_id: self.civil_id.get_untracked(),
            date_of_birth: self.date_of_birth.get_untracked(),
            first_name: self.first_name.get_untracked(),
            last_name: self.last_name.get_untracked(),
            email: self.email.get_untracked(),
            phone: self.phone.get_untracked(),
            gender: self.gender.get_untracked(),
        }
    }

    /// Editing a field clears only that field's message.
    pub fn clear_field(&self, field: &str) {
        if self.field_errors.with_untracked(|e| e.contains(field)) {
            self.field_errors.update(|e| e.remove(field));
        }
    }

    pub fn submit(&self) {
        if self.register_action.pending().get_untracked() {
            return;
        }
        self.error.set(None);
        self.success.set(None);
        match self.form().validate() {
            Ok(request) => {
                self.field_errors.set(FieldErrors::new());
                self.register_action.dispatch(request);
            }
            Err(errors) => self.field_errors.set(errors),
        }
    }

    fn apply_result(&self, result: Result<(), ApiError>) -> bool {
        match result {
            Ok(()) => {
                self.success.set(Some(MSG_REGISTERED.to_string()));
                true
            }
            Err(err) => {
                let mut errors = self.field_errors.get_untracked();
                let banner = errors.absorb(err, REGISTER_FIELDS);
                self.field_errors.set(errors);
                self.error.set(banner);
                false
            }
        }
    }
}

pub fn use_register_view_model() -> RegisterViewModel {
    let vm = RegisterViewModel {
        civil_id: create_rw_signal(String::new()),
        date_of_birth: create_rw_signal(String::new()),
        first_name: create_rw_signal(String::new()),
        last_name: create_rw_signal(String::new()),
        email: create_rw_signal(String::new()),
        phone: create_rw_signal(String::new()),
        gender: create_rw_signal(0),
        field_errors: create_rw_signal(FieldErrors::new()),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
        register_action: auth::use_register_action(),
    };

    let pending_redirect = Rc::new(RefCell::new(None));
    {
        let pending_redirect = Rc::clone(&pending_redirect);
        create_effect(move |_| {
            if let Some(result) = vm.register_action.value().get() {
                if vm.apply_result(result) {
                    let handle = BrowserScheduler.schedule(
                        LOGIN_REDIRECT_DELAY,
                        Box::new(|| redirect_to(LOGIN_ROUTE)),
                    );
                    *pending_redirect.borrow_mut() = Some(handle);
                }
            }
        });
    }
    on_cleanup(move || drop(pending_redirect.borrow_mut().take()));

    vm
}
