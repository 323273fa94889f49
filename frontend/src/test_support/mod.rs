#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod time {
    use crate::utils::time::{Clock, Scheduler};
    use std::{
        cell::{Cell, RefCell},
        rc::{Rc, Weak},
        time::Duration,
    };

    #[derive(Clone, Default)]
    pub struct ManualClock {
        now_ms: Rc<Cell<i64>>,
    }

    impl ManualClock {
        pub fn at(now_ms: i64) -> Self {
            let clock = Self::default();
            clock.set(now_ms);
            clock
        }

        pub fn set(&self, now_ms: i64) {
            self.now_ms.set(now_ms);
        }

        pub fn advance(&self, by: Duration) {
            self.now_ms.set(self.now_ms.get() + by.as_millis() as i64);
        }
    }

    impl Clock for ManualClock {
        fn now_ms(&self) -> i64 {
            self.now_ms.get()
        }
    }

    struct Scheduled {
        id: u64,
        due: Duration,
        task: Box<dyn FnOnce()>,
    }

    #[derive(Default)]
    struct Timeline {
        now: Duration,
        next_id: u64,
        tasks: Vec<Scheduled>,
    }

    /// Virtual-time scheduler. Tasks only run inside [`ManualScheduler::advance`].
    #[derive(Clone, Default)]
    pub struct ManualScheduler {
        timeline: Rc<RefCell<Timeline>>,
    }

    pub struct ManualHandle {
        id: u64,
        timeline: Weak<RefCell<Timeline>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            if let Some(timeline) = self.timeline.upgrade() {
                if let Ok(mut timeline) = timeline.try_borrow_mut() {
                    timeline.tasks.retain(|task| task.id != self.id);
                }
            }
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> ManualHandle {
            let mut timeline = self.timeline.borrow_mut();
            let id = timeline.next_id;
            timeline.next_id += 1;
            let due = timeline.now + delay;
            timeline.tasks.push(Scheduled { id, due, task });
            ManualHandle {
                id,
                timeline: Rc::downgrade(&self.timeline),
            }
        }
    }

    impl ManualScheduler {
        pub fn now(&self) -> Duration {
            self.timeline.borrow().now
        }

        pub fn pending_count(&self) -> usize {
            self.timeline.borrow().tasks.len()
        }

        /// Moves virtual time forward, running due tasks in deadline order.
        pub fn advance(&self, by: Duration) {
            let target = self.now() + by;
            loop {
                let next = {
                    let mut timeline = self.timeline.borrow_mut();
                    let earliest = timeline
                        .tasks
                        .iter()
                        .enumerate()
                        .filter(|(_, task)| task.due <= target)
                        .min_by_key(|(_, task)| (task.due, task.id))
                        .map(|(index, _)| index);
                    earliest.map(|index| {
                        let task = timeline.tasks.remove(index);
                        timeline.now = task.due;
                        task.task
                    })
                };
                match next {
                    Some(task) => task(),
                    None => break,
                }
            }
            self.timeline.borrow_mut().now = target;
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod helpers {
    use super::time::ManualClock;
    use crate::api::{test_support::mock::MockServer, ApiClient, UserProfile};
    use crate::state::auth::{AuthCoordinator, AuthState, AuthStatus};
    use crate::utils::storage::MemoryStorage;
    use leptos::*;
    use serde_json::json;
    use std::rc::Rc;

    pub fn patient_profile() -> UserProfile {
        UserProfile::new(json!({
            "id": 7,
            "fullName": "Sara Ali",
            "email": "sara@example.com",
            "civilId": "123456789012",
            "roles": ["Patient"]
        }))
    }

    pub fn admin_profile() -> UserProfile {
        UserProfile::new(json!({
            "Id": 1,
            "FullName": "Admin User",
            "Email": "admin@example.com",
            "Roles": ["admin"]
        }))
    }

    pub struct AuthFixture {
        pub server: MockServer,
        pub memory: MemoryStorage,
        pub clock: ManualClock,
        pub api: ApiClient,
        pub auth: AuthCoordinator,
    }

    /// Builds a coordinator against a mock backend. Must run inside a reactive runtime.
    pub fn auth_fixture(now_ms: i64) -> AuthFixture {
        let server = MockServer::start();
        let (api, memory) = server.client_with_memory();
        let clock = ManualClock::at(now_ms);
        let auth = AuthCoordinator::new(api.clone(), Rc::new(clock.clone()));
        AuthFixture {
            server,
            memory,
            clock,
            api,
            auth,
        }
    }

    /// Provides an `ApiClient` and an `AuthCoordinator` already in `status`.
    pub fn provide_auth(status: AuthStatus, user: Option<UserProfile>) -> AuthFixture {
        let fixture = auth_fixture(0);
        fixture.auth.state().set(AuthState { status, user });
        provide_context(fixture.api.clone());
        provide_context(fixture.auth.clone());
        fixture
    }
}
