use crate::{
    components::layout::LoadingSpinner,
    state::auth::{use_auth, AuthState, AuthStatus},
    utils::navigation::{current_location, login_redirect_target, redirect_to, DASHBOARD_ROUTE},
};
use leptos::*;
use std::{cell::Cell, rc::Rc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Loading,
    Redirect(String),
    Render,
}

pub fn guard_decision(status: AuthStatus, attempted: &str) -> GuardDecision {
    match status {
        AuthStatus::Unknown => GuardDecision::Loading,
        AuthStatus::Unauthenticated => GuardDecision::Redirect(login_redirect_target(attempted)),
        AuthStatus::Authenticated => GuardDecision::Render,
    }
}

pub fn admin_guard_decision(state: &AuthState, attempted: &str) -> GuardDecision {
    match guard_decision(state.status, attempted) {
        GuardDecision::Render if !state.user.as_ref().is_some_and(|u| u.is_admin()) => {
            GuardDecision::Redirect(DASHBOARD_ROUTE.to_string())
        }
        decision => decision,
    }
}

/// Lets one redirect through per mounted guard.
#[derive(Debug, Default)]
pub struct RedirectLatch {
    fired: Cell<bool>,
}

impl RedirectLatch {
    pub fn take(&self, decision: &GuardDecision) -> Option<String> {
        match decision {
            GuardDecision::Redirect(target) if !self.fired.replace(true) => Some(target.clone()),
            _ => None,
        }
    }
}

fn attempted_path() -> String {
    let (pathname, search) = current_location();
    format!("{}{}", pathname, search)
}

fn guarded_view(decision: Memo<GuardDecision>, children: ChildrenFn) -> impl IntoView {
    let latch = Rc::new(RedirectLatch::default());
    create_effect(move |_| {
        if let Some(target) = latch.take(&decision.get()) {
            redirect_to(&target);
        }
    });
    view! {
        <Show
            when=move || decision.get() == GuardDecision::Render
            fallback=move || {
                if decision.get() == GuardDecision::Loading {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let state = use_auth().state();
    let attempted = attempted_path();
    let decision = create_memo(move |_| state.with(|s| guard_decision(s.status, &attempted)));
    guarded_view(decision, children)
}

#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let state = use_auth().state();
    let attempted = attempted_path();
    let decision = create_memo(move |_| state.with(|s| admin_guard_decision(s, &attempted)));
    guarded_view(decision, children)
}

/// For the login and register pages: signed-in users go straight to `target`.
#[component]
pub fn RedirectIfAuthenticated(#[prop(into)] target: String, children: Children) -> impl IntoView {
    let state = use_auth().state();
    let latch = RedirectLatch::default();
    create_isomorphic_effect(move |_| {
        if state.with(|s| s.is_authenticated()) {
            if let Some(target) = latch.take(&GuardDecision::Redirect(target.clone())) {
                redirect_to(&target);
            }
        }
    });
    children()
}
