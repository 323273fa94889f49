use crate::{
    api::{errors, normalize_login_response, ApiClient, ApiError, LoginRequest, RegisterRequest, UserProfile},
    state::{
        idle::IdleLogout,
        session::{Session, SessionStore},
    },
    utils::time::{Clock, SystemClock},
};
use leptos::*;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Unknown,
    Authenticated,
    Unauthenticated,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub status: AuthStatus,
    pub user: Option<UserProfile>,
}

impl AuthState {
    pub fn signed_in(user: UserProfile) -> Self {
        Self {
            status: AuthStatus::Authenticated,
            user: Some(user),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            status: AuthStatus::Unauthenticated,
            user: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.status == AuthStatus::Unknown
    }
}

/// Sole owner of the session. Views read [`AuthCoordinator::state`]; every
/// transition goes through the methods below.
#[derive(Clone)]
pub struct AuthCoordinator {
    api: ApiClient,
    clock: Rc<dyn Clock>,
    state: RwSignal<AuthState>,
}

impl AuthCoordinator {
    pub fn new(api: ApiClient, clock: Rc<dyn Clock>) -> Self {
        let coordinator = Self {
            api,
            clock,
            state: create_rw_signal(AuthState::default()),
        };
        coordinator.listen_for_unauthorized();
        coordinator
    }

    fn listen_for_unauthorized(&self) {
        let state = self.state;
        let events = self.api.unauthorized_events().clone();
        let id = events.subscribe(move |event| {
            log::info!("session rejected by {}; signed out", event.path);
            // The provider may already be gone when a late response lands.
            let _ = state.try_set(AuthState::signed_out());
        });
        on_cleanup(move || events.unsubscribe(id));
    }

    fn sessions(&self) -> &SessionStore {
        self.api.session_store()
    }

    pub fn state(&self) -> RwSignal<AuthState> {
        self.state
    }

    pub fn status(&self) -> AuthStatus {
        self.state.with_untracked(|state| state.status)
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Resolves `Unknown` from persisted storage.
    pub fn initialize(&self) {
        let now = self.clock.now_ms();
        let next = match self.sessions().load() {
            Some(session) if session.is_valid_at(now) => {
                log::info!("session restored");
                AuthState::signed_in(session.user)
            }
            Some(_) => {
                log::info!("stored session expired");
                self.sessions().clear();
                AuthState::signed_out()
            }
            None => {
                self.sessions().clear();
                AuthState::signed_out()
            }
        };
        let _ = self.state.try_set(next);
    }

    pub async fn login(&self, request: LoginRequest) -> Result<UserProfile, ApiError> {
        let body = self.api.login_raw(&request).await?;
        let Some(payload) = normalize_login_response(&body) else {
            log::warn!("login response carried no token");
            return Err(ApiError::parse(errors::MSG_MISSING_TOKEN));
        };
        let session = Session {
            token: payload.token,
            user: payload.user,
            issued_at_ms: self.clock.now_ms(),
        };
        if let Err(err) = self.sessions().save(&session) {
            log::error!("could not persist session: {}", err);
            self.sessions().clear();
            return Err(ApiError::unknown(err.to_string()));
        }
        log::info!("signed in");
        let _ = self.state.try_set(AuthState::signed_in(session.user.clone()));
        Ok(session.user)
    }

    /// Never establishes a session; success only means "go sign in".
    pub async fn register(&self, request: RegisterRequest) -> Result<(), ApiError> {
        self.api.register(&request).await.map(|_| {
            log::info!("registration accepted");
        })
    }

    pub async fn logout(&self) {
        if self.sessions().token().is_some() {
            if let Err(err) = self.api.logout_remote().await {
                log::warn!("server logout failed: {}", err);
            }
        }
        self.sessions().clear();
        log::info!("signed out");
        let _ = self.state.try_set(AuthState::signed_out());
    }
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let auth = AuthCoordinator::new(api, Rc::new(SystemClock));
    auth.initialize();
    provide_context(auth);
    view! {
        <IdleLogout/>
        {children()}
    }
}

pub fn use_auth() -> AuthCoordinator {
    use_context::<AuthCoordinator>().unwrap_or_else(|| {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let auth = AuthCoordinator::new(api, Rc::new(SystemClock));
        auth.initialize();
        auth
    })
}

pub fn use_login_action() -> Action<LoginRequest, Result<UserProfile, ApiError>> {
    let auth = use_auth();
    create_action(move |request: &LoginRequest| {
        let auth = auth.clone();
        let request = request.clone();
        async move { auth.login(request).await }
    })
}

pub fn use_register_action() -> Action<RegisterRequest, Result<(), ApiError>> {
    let auth = use_auth();
    create_action(move |request: &RegisterRequest| {
        let auth = auth.clone();
        let request = request.clone();
        async move { auth.register(request).await }
    })
}

pub fn use_logout_action() -> Action<(), ()> {
    let auth = use_auth();
    create_action(move |_: &()| {
        let auth = auth.clone();
        async move { auth.logout().await }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::create_runtime;

    fn with_runtime<T>(test: impl FnOnce() -> T) -> T {
        let runtime = create_runtime();
        let result = test();
        runtime.dispose();
        result
    }

    #[test]
    fn default_state_is_loading() {
        let state = AuthState::default();
        assert!(state.is_loading());
        assert!(!state.is_authenticated());
        assert!(AuthState::signed_out().user.is_none());
    }

    #[test]
    fn use_auth_without_provider_resolves_immediately() {
        with_runtime(|| {
            let auth = use_auth();
            assert_ne!(auth.status(), AuthStatus::Unknown);
        });
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        api::{test_support::mock::*, CATEGORIES_PATH, CIVIL_ID_FIELD, LOGIN_PATH, LOGOUT_PATH},
        config::SESSION_DURATION,
        state::session::{ACCESS_TOKEN_KEY, LOGIN_TIME_KEY},
        test_support::helpers::{auth_fixture, patient_profile, AuthFixture},
        utils::{storage::KeyValueStore, time::duration_ms},
    };
    use leptos::create_runtime;
    use serde_json::json;

    const T0: i64 = 1_700_000_000_000;

    fn store_session(fixture: &AuthFixture, issued_at_ms: i64) {
        fixture
            .api
            .session_store()
            .save(&Session {
                token: "tok".into(),
                user: patient_profile(),
                issued_at_ms,
            })
            .unwrap();
    }

    fn civil_id() -> LoginRequest {
        LoginRequest {
            civil_id: "123456789012".into(),
        }
    }

    #[test]
    fn fresh_session_restores_authenticated() {
        let runtime = create_runtime();
        let fixture = auth_fixture(T0);
        store_session(&fixture, T0 - 60_000);

        fixture.auth.initialize();

        let state = fixture.auth.state().get_untracked();
        assert!(state.is_authenticated());
        assert_eq!(state.user, Some(patient_profile()));
        assert_eq!(
            fixture.memory.get(LOGIN_TIME_KEY).unwrap(),
            Some((T0 - 60_000).to_string())
        );
        runtime.dispose();
    }

    #[test]
    fn expired_session_initializes_signed_out_and_clears_storage() {
        let runtime = create_runtime();
        for age in [duration_ms(SESSION_DURATION), duration_ms(SESSION_DURATION) * 5] {
            let fixture = auth_fixture(T0);
            store_session(&fixture, T0 - age);

            fixture.auth.initialize();

            assert_eq!(fixture.auth.status(), AuthStatus::Unauthenticated);
            assert!(fixture.memory.is_empty());
        }
        runtime.dispose();
    }

    #[test]
    fn missing_session_initializes_signed_out() {
        let runtime = create_runtime();
        let fixture = auth_fixture(T0);
        fixture.memory.set(ACCESS_TOKEN_KEY, "orphan").unwrap();

        fixture.auth.initialize();

        assert_eq!(fixture.auth.status(), AuthStatus::Unauthenticated);
        assert!(fixture.memory.is_empty());
        runtime.dispose();
    }

    #[tokio::test]
    async fn login_persists_session_issued_now() {
        let runtime = create_runtime();
        let fixture = auth_fixture(T0);
        fixture.auth.initialize();
        fixture.server.mock(|when, then| {
            when.method(POST).path(LOGIN_PATH);
            then.status(200).json_body(json!({
                "Data": { "accessToken": "fresh", "User": { "fullName": "Sara Ali" } }
            }));
        });

        let user = fixture.auth.login(civil_id()).await.unwrap();

        assert_eq!(user.full_name().as_deref(), Some("Sara Ali"));
        assert!(fixture.auth.state().get_untracked().is_authenticated());
        assert_eq!(
            fixture.memory.get(LOGIN_TIME_KEY).unwrap(),
            Some(T0.to_string())
        );
        assert_eq!(
            fixture.memory.get(ACCESS_TOKEN_KEY).unwrap().as_deref(),
            Some("fresh")
        );
        runtime.dispose();
    }

    #[tokio::test]
    async fn login_without_token_fails_and_keeps_state() {
        let runtime = create_runtime();
        let fixture = auth_fixture(T0);
        fixture.auth.initialize();
        fixture.server.mock(|when, then| {
            when.method(POST).path(LOGIN_PATH);
            then.status(200)
                .json_body(json!({ "Success": true, "Data": { "fullName": "Sara" } }));
        });

        let err = fixture.auth.login(civil_id()).await.unwrap_err();

        assert_eq!(err.error, errors::MSG_MISSING_TOKEN);
        assert_eq!(fixture.auth.status(), AuthStatus::Unauthenticated);
        assert!(fixture.memory.is_empty());
        runtime.dispose();
    }

    #[tokio::test]
    async fn login_failures_do_not_touch_state() {
        let runtime = create_runtime();
        let fixture = auth_fixture(T0);
        fixture.server.mock(|when, then| {
            when.method(POST).path(LOGIN_PATH);
            then.network_error();
        });

        let err = fixture.auth.login(civil_id()).await.unwrap_err();

        assert!(err.is_network());
        // Still unresolved: a failed login is not an initialization.
        assert_eq!(fixture.auth.status(), AuthStatus::Unknown);
        runtime.dispose();
    }

    #[tokio::test]
    async fn logout_clears_even_when_server_fails_and_is_idempotent() {
        let runtime = create_runtime();
        let fixture = auth_fixture(T0);
        store_session(&fixture, T0);
        fixture.auth.initialize();
        fixture.server.mock(|when, then| {
            when.method(POST).path(LOGOUT_PATH);
            then.status(500);
        });

        fixture.auth.logout().await;
        let once = (fixture.auth.state().get_untracked(), fixture.memory.len());
        fixture.auth.logout().await;
        let twice = (fixture.auth.state().get_untracked(), fixture.memory.len());

        assert_eq!(once, (AuthState::signed_out(), 0));
        assert_eq!(once, twice);
        assert_eq!(fixture.server.hits(&POST, LOGOUT_PATH), 1);
        runtime.dispose();
    }

    #[tokio::test]
    async fn logout_survives_network_failure() {
        let runtime = create_runtime();
        let fixture = auth_fixture(T0);
        store_session(&fixture, T0);
        fixture.auth.initialize();
        fixture.server.mock(|when, then| {
            when.method(POST).path(LOGOUT_PATH);
            then.network_error();
        });

        fixture.auth.logout().await;

        assert_eq!(fixture.auth.status(), AuthStatus::Unauthenticated);
        assert!(fixture.memory.is_empty());
        runtime.dispose();
    }

    #[tokio::test]
    async fn unauthorized_response_signs_out() {
        let runtime = create_runtime();
        let fixture = auth_fixture(T0);
        store_session(&fixture, T0);
        fixture.auth.initialize();
        assert!(fixture.auth.state().get_untracked().is_authenticated());
        fixture.server.mock(|when, then| {
            when.method(GET).path(CATEGORIES_PATH);
            then.status(401);
        });

        let _ = fixture.api.list_categories().await;

        assert_eq!(fixture.auth.status(), AuthStatus::Unauthenticated);
        assert!(fixture.memory.is_empty());
        runtime.dispose();
    }

    #[tokio::test]
    async fn register_duplicate_reports_civil_id_field() {
        let runtime = create_runtime();
        let fixture = auth_fixture(T0);
        fixture.auth.initialize();
        fixture.server.mock(|when, then| {
            when.method(POST).path(LOGIN_PATH);
            then.status(400)
                .json_body(json!({ "message": "Civil ID already exists" }));
        });

        let err = fixture
            .auth
            .register(RegisterRequest {
                civil_id: "123456789012".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err.field.as_deref(), Some(CIVIL_ID_FIELD));
        assert_eq!(fixture.auth.status(), AuthStatus::Unauthenticated);
        runtime.dispose();
    }
}
