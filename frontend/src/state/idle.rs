use crate::{
    config::IDLE_TIMEOUT,
    state::auth::{use_auth, AuthCoordinator, AuthStatus},
    utils::time::{BrowserScheduler, Scheduler},
};
use leptos::*;
use leptos::leptos_dom::helpers::WindowListenerHandle;
use std::{cell::RefCell, rc::Rc, time::Duration};

/// DOM events that count as user activity.
pub const ACTIVITY_EVENTS: &[&str] = &[
    "mousedown",
    "mousemove",
    "keypress",
    "scroll",
    "touchstart",
    "click",
];

struct Inner<S: Scheduler> {
    scheduler: S,
    timeout: Duration,
    on_expire: Rc<dyn Fn()>,
    pending: RefCell<Option<S::Handle>>,
}

/// A single cancellable deadline. Re-arming replaces the pending task, so at
/// most one is ever scheduled.
pub struct DeadlineTimer<S: Scheduler> {
    inner: Rc<Inner<S>>,
}

impl<S: Scheduler> Clone for DeadlineTimer<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S> DeadlineTimer<S>
where
    S: Scheduler + 'static,
    S::Handle: 'static,
{
    pub fn new(scheduler: S, timeout: Duration, on_expire: impl Fn() + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                scheduler,
                timeout,
                on_expire: Rc::new(on_expire),
                pending: RefCell::new(None),
            }),
        }
    }

    pub fn start(&self) {
        self.arm();
    }

    /// Pushes the deadline out to `now + timeout`.
    pub fn record_activity(&self) {
        self.arm();
    }

    pub fn stop(&self) {
        // Dropping the handle cancels the task.
        let previous = self.inner.pending.borrow_mut().take();
        drop(previous);
    }

    fn arm(&self) {
        let weak = Rc::downgrade(&self.inner);
        let handle = self.inner.scheduler.schedule(
            self.inner.timeout,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let fired = inner.pending.borrow_mut().take();
                drop(fired);
                (inner.on_expire)();
            }),
        );
        let previous = self.inner.pending.borrow_mut().replace(handle);
        drop(previous);
    }
}

/// Forces a logout after [`IDLE_TIMEOUT`] without activity. Listeners and
/// the timer exist only while the user is signed in.
#[component]
pub fn IdleLogout() -> impl IntoView {
    watch_idle(use_auth(), BrowserScheduler);
}

/// Ties an [`IdleWatcher`] to the coordinator's status for the current owner.
pub fn watch_idle<S>(auth: AuthCoordinator, scheduler: S) -> Rc<IdleWatcher<S>>
where
    S: Scheduler + 'static,
    S::Handle: 'static,
{
    let state = auth.state();
    let watcher = Rc::new(IdleWatcher::new(scheduler, auth));
    {
        let watcher = Rc::clone(&watcher);
        create_isomorphic_effect(move |_| watcher.sync(state.with(|s| s.status)));
    }
    {
        let watcher = Rc::clone(&watcher);
        on_cleanup(move || watcher.stop());
    }
    watcher
}

/// The single idle deadline plus the activity listeners that re-arm it.
pub struct IdleWatcher<S: Scheduler> {
    idle: DeadlineTimer<S>,
    listeners: RefCell<Option<Vec<WindowListenerHandle>>>,
}

impl<S> IdleWatcher<S>
where
    S: Scheduler + 'static,
    S::Handle: 'static,
{
    pub fn new(scheduler: S, auth: AuthCoordinator) -> Self {
        let idle = DeadlineTimer::new(scheduler, IDLE_TIMEOUT, move || {
            let auth = auth.clone();
            log::info!("automatic sign-out after inactivity");
            spawn_local(async move { auth.logout().await });
        });
        Self {
            idle,
            listeners: RefCell::new(None),
        }
    }

    /// Starts watching on `Authenticated`, stops on anything else.
    pub fn sync(self: &Rc<Self>, status: AuthStatus) {
        match status {
            AuthStatus::Authenticated => self.start(),
            AuthStatus::Unknown | AuthStatus::Unauthenticated => self.stop(),
        }
    }

    pub fn record_activity(&self) {
        if self.is_watching() {
            self.idle.record_activity();
        }
    }

    pub fn is_watching(&self) -> bool {
        self.listeners.borrow().is_some()
    }

    fn start(self: &Rc<Self>) {
        if self.is_watching() {
            return;
        }
        self.idle.start();
        let listeners = ACTIVITY_EVENTS
            .iter()
            .map(|event| {
                let watcher = Rc::downgrade(self);
                window_event_listener_untyped(event, move |_| {
                    if let Some(watcher) = watcher.upgrade() {
                        watcher.record_activity();
                    }
                })
            })
            .collect();
        *self.listeners.borrow_mut() = Some(listeners);
    }

    pub fn stop(&self) {
        let listeners = self.listeners.borrow_mut().take();
        for listener in listeners.into_iter().flatten() {
            listener.remove();
        }
        self.idle.stop();
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        api::{test_support::mock::*, LOGOUT_PATH},
        state::{
            auth::AuthState,
            session::{Session, ACCESS_TOKEN_KEY},
        },
        test_support::{
            helpers::{auth_fixture, patient_profile, AuthFixture},
            time::ManualScheduler,
        },
        utils::storage::KeyValueStore,
    };
    use leptos::create_runtime;
    use tokio::task::{yield_now, LocalSet};

    const MINUTE: Duration = Duration::from_secs(60);

    fn signed_in_fixture() -> AuthFixture {
        let fixture = auth_fixture(0);
        fixture.server.mock(|when, then| {
            when.method(POST).path(LOGOUT_PATH);
            then.status(200);
        });
        fixture
            .api
            .session_store()
            .save(&Session {
                token: "tok".into(),
                user: patient_profile(),
                issued_at_ms: 0,
            })
            .unwrap();
        fixture.auth.initialize();
        fixture
    }

    async fn until_signed_out(fixture: &AuthFixture) {
        for _ in 0..16 {
            if fixture.auth.status() == AuthStatus::Unauthenticated {
                return;
            }
            yield_now().await;
        }
    }

    #[tokio::test]
    async fn idle_deadline_logs_out_exactly_once() {
        LocalSet::new()
            .run_until(async {
                let runtime = create_runtime();
                let fixture = signed_in_fixture();
                let scheduler = ManualScheduler::default();
                let watcher = watch_idle(fixture.auth.clone(), scheduler.clone());
                assert!(watcher.is_watching());
                assert_eq!(scheduler.pending_count(), 1);

                scheduler.advance(IDLE_TIMEOUT + Duration::from_secs(1));
                until_signed_out(&fixture).await;

                assert_eq!(fixture.server.hits(&POST, LOGOUT_PATH), 1);
                assert_eq!(fixture.auth.status(), AuthStatus::Unauthenticated);
                assert!(fixture.memory.is_empty());
                assert!(!watcher.is_watching());
                assert_eq!(scheduler.pending_count(), 0);

                scheduler.advance(60 * MINUTE);
                yield_now().await;
                assert_eq!(fixture.server.hits(&POST, LOGOUT_PATH), 1);
                runtime.dispose();
            })
            .await;
    }

    #[tokio::test]
    async fn activity_keeps_an_active_user_signed_in_past_session_length() {
        LocalSet::new()
            .run_until(async {
                let runtime = create_runtime();
                let fixture = signed_in_fixture();
                let scheduler = ManualScheduler::default();
                let watcher = watch_idle(fixture.auth.clone(), scheduler.clone());

                for _ in 0..6 {
                    scheduler.advance(19 * MINUTE);
                    watcher.record_activity();
                    assert_eq!(scheduler.pending_count(), 1);
                }
                yield_now().await;

                assert_eq!(fixture.server.hits(&POST, LOGOUT_PATH), 0);
                assert!(fixture.auth.state().get_untracked().is_authenticated());
                runtime.dispose();
            })
            .await;
    }

    #[tokio::test]
    async fn sign_out_tears_down_and_next_sign_in_starts_fresh() {
        LocalSet::new()
            .run_until(async {
                let runtime = create_runtime();
                let fixture = signed_in_fixture();
                let scheduler = ManualScheduler::default();
                let watcher = watch_idle(fixture.auth.clone(), scheduler.clone());

                scheduler.advance(10 * MINUTE);
                fixture.auth.state().set(AuthState::signed_out());
                assert!(!watcher.is_watching());
                assert_eq!(scheduler.pending_count(), 0);

                // Activity while signed out arms nothing.
                watcher.record_activity();
                assert_eq!(scheduler.pending_count(), 0);

                fixture.auth.state().set(AuthState::signed_in(patient_profile()));
                assert_eq!(scheduler.pending_count(), 1);

                // Past where the first period's deadline would have landed.
                scheduler.advance(15 * MINUTE);
                yield_now().await;
                assert_eq!(fixture.server.hits(&POST, LOGOUT_PATH), 0);
                assert!(fixture.memory.get(ACCESS_TOKEN_KEY).unwrap().is_some());

                scheduler.advance(5 * MINUTE + Duration::from_secs(1));
                until_signed_out(&fixture).await;
                assert_eq!(fixture.server.hits(&POST, LOGOUT_PATH), 1);
                runtime.dispose();
            })
            .await;
    }

    #[test]
    fn stop_releases_the_deadline() {
        let runtime = create_runtime();
        let fixture = signed_in_fixture();
        let scheduler = ManualScheduler::default();
        let watcher = watch_idle(fixture.auth.clone(), scheduler.clone());

        watcher.stop();

        assert!(!watcher.is_watching());
        assert_eq!(scheduler.pending_count(), 0);
        runtime.dispose();
    }
}
