use super::utils::validate_civil_id;
use crate::{
    api::{ApiError, LoginRequest, UserProfile},
    state::auth,
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub civil_id: RwSignal<String>,
    pub error: RwSignal<Option<ApiError>>,
    pub login_action: Action<LoginRequest, Result<UserProfile, ApiError>>,
}

impl LoginViewModel {
    /// Validates locally before anything reaches the network.
    pub fn submit(&self) {
        if self.login_action.pending().get_untracked() {
            return;
        }
        let civil_id = self.civil_id.get_untracked();
        if let Err(msg) = validate_civil_id(&civil_id) {
            self.error.set(Some(ApiError::validation_field("civilId", msg)));
            return;
        }
        self.error.set(None);
        self.login_action.dispatch(LoginRequest { civil_id });
    }
}

pub fn use_login_view_model() -> LoginViewModel {
    let civil_id = create_rw_signal(String::new());
    let error = create_rw_signal(None::<ApiError>);
    let login_action = auth::use_login_action();

    // Navigation after success belongs to the page's RedirectIfAuthenticated.
    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            error.set(result.err());
        }
    });

    LoginViewModel {
        civil_id,
        error,
        login_action,
    }
}
