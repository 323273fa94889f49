use crate::{
    components::notifications::NotificationBell,
    state::auth::{self, use_auth},
    utils::navigation::{redirect_to, LOGIN_ROUTE},
};
use leptos::*;

const NAV_LINK: &str = "text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";
const MOBILE_NAV_LINK: &str = "block text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";

pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub admin_only: bool,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        href: "/dashboard",
        label: "Dashboard",
        admin_only: false,
    },
    NavItem {
        href: "/requests",
        label: "My requests",
        admin_only: false,
    },
    NavItem {
        href: "/requests/new",
        label: "New request",
        admin_only: false,
    },
    NavItem {
        href: "/profile",
        label: "Profile",
        admin_only: false,
    },
    NavItem {
        href: "/categories",
        label: "Categories",
        admin_only: true,
    },
];

pub fn visible_nav_items(is_admin: bool) -> impl Iterator<Item = &'static NavItem> {
    NAV_ITEMS.iter().filter(move |item| is_admin || !item.admin_only)
}

#[component]
pub fn Header() -> impl IntoView {
    let state = use_auth().state();
    let (menu_open, set_menu_open) = create_signal(false);
    let is_admin = create_memo(move |_| {
        state.with(|s| s.user.as_ref().map(|u| u.is_admin()).unwrap_or(false))
    });
    let display_name = move || {
        state.with(|s| s.user.as_ref().map(|u| u.display_name()).unwrap_or_default())
    };
    let logout_action = auth::use_logout_action();
    let logout_pending = logout_action.pending();
    create_effect(move |_| {
        if logout_action.value().get().is_some() {
            redirect_to(LOGIN_ROUTE);
        }
    });
    let on_logout = move |_| {
        if logout_pending.get_untracked() {
            return;
        }
        set_menu_open.set(false);
        logout_action.dispatch(());
    };
    let toggle_menu = move |_| set_menu_open.update(|open| *open = !*open);

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center gap-3">
                        <h1 class="text-xl font-semibold text-fg">"CarePortal"</h1>
                        <span class="hidden sm:inline text-sm text-fg-muted">{display_name}</span>
                    </div>
                    <div class="flex items-center gap-2">
                        <NotificationBell/>
                        <nav class="hidden lg:flex space-x-4">
                            {move || {
                                visible_nav_items(is_admin.get())
                                    .map(|item| view! { <a href=item.href class=NAV_LINK>{item.label}</a> })
                                    .collect_view()
                            }}
                            <button
                                on:click=on_logout
                                class=format!("{} disabled:opacity-50", NAV_LINK)
                                disabled=move || logout_pending.get()
                            >
                                "Sign out"
                            </button>
                        </nav>
                        <button
                            type="button"
                            class="lg:hidden inline-flex items-center justify-center p-2 rounded-md text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                            on:click=toggle_menu
                            aria-expanded=move || menu_open.get()
                            aria-controls="mobile-nav"
                        >
                            <span class="sr-only">
                                {move || if menu_open.get() { "Close menu" } else { "Open menu" }}
                            </span>
                            <i class=move || if menu_open.get() { "fas fa-times" } else { "fas fa-bars" }></i>
                        </button>
                    </div>
                </div>
                <Show when=move || menu_open.get()>
                    <div id="mobile-nav" class="lg:hidden border-t border-border">
                        <nav class="px-4 py-3 space-y-2">
                            {move || {
                                visible_nav_items(is_admin.get())
                                    .map(|item| view! {
                                        <a
                                            href=item.href
                                            class=MOBILE_NAV_LINK
                                            on:click=move |_| set_menu_open.set(false)
                                        >
                                            {item.label}
                                        </a>
                                    })
                                    .collect_view()
                            }}
                            <button
                                on:click=on_logout
                                class=format!("w-full text-left {} disabled:opacity-50", MOBILE_NAV_LINK)
                                disabled=move || logout_pending.get()
                            >
                                "Sign out"
                            </button>
                        </nav>
                    </div>
                </Show>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <div class="flex">
                <div class="flex-shrink-0">
                    <i class="fas fa-exclamation-circle"></i>
                </div>
                <div class="ml-3">
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <div class="flex">
                <div class="flex-shrink-0">
                    <i class="fas fa-check-circle"></i>
                </div>
                <div class="ml-3">
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::auth::AuthStatus;
    use crate::test_support::helpers::{admin_profile, patient_profile, provide_auth};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn header_renders_admin_links_and_name() {
        let html = render_to_string(move || {
            provide_auth(AuthStatus::Authenticated, Some(admin_profile()));
            view! { <Header /> }
        });
        assert!(html.contains("Categories"));
        assert!(html.contains("Admin User"));
        assert!(html.contains("Sign out"));
    }

    #[test]
    fn header_hides_admin_links_for_patients() {
        let html = render_to_string(move || {
            provide_auth(AuthStatus::Authenticated, Some(patient_profile()));
            view! { <Header /> }
        });
        assert!(!html.contains("Categories"));
        assert!(html.contains("Sara Ali"));
    }

    #[test]
    fn layout_renders_children() {
        let html = render_to_string(move || {
            provide_auth(AuthStatus::Authenticated, Some(patient_profile()));
            view! { <Layout><div>"child"</div></Layout> }
        });
        assert!(html.contains("child"));
    }

    #[test]
    fn renders_feedback_components() {
        let html = render_to_string(move || {
            view! {
                <div>
                    <LoadingSpinner />
                    <ErrorMessage message="error" />
                    <SuccessMessage message="ok" />
                </div>
            }
        });
        assert!(html.contains("error"));
        assert!(html.contains("ok"));
        assert!(html.contains("animate-spin"));
    }
}
