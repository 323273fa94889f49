use super::utils::{initial, short_id};
use crate::{
    api::{ApiClient, UserProfile},
    components::layout::LoadingSpinner,
    state::auth::use_auth,
};
use leptos::*;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let state = use_auth().state();
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    // The server copy wins when it loads; the stored one renders meanwhile.
    let remote = create_local_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move {
                api.current_user()
                    .await
                    .map_err(|err| log::warn!("profile refresh failed: {}", err))
                    .ok()
            }
        },
    );
    let profile = move || {
        remote
            .get()
            .flatten()
            .or_else(|| state.with(|s| s.user.clone()))
    };

    view! {
        <div class="max-w-2xl mx-auto mt-6 px-4 sm:px-0">
            {move || match profile() {
                Some(user) => view! { <ProfileCard user=user /> }.into_view(),
                None => view! { <LoadingSpinner /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn ProfileCard(user: UserProfile) -> impl IntoView {
    let roles = user.roles();
    let rows = [
        ("Full name", user.full_name()),
        ("Email", user.email()),
        ("Civil ID", user.civil_id()),
        ("Phone", user.phone()),
        ("User ID", short_id(&user)),
    ];
    view! {
        <div class="bg-surface-elevated shadow-lg rounded-lg overflow-hidden">
            <div class="bg-action-primary-bg p-6 text-action-primary-text">
                <h2 class="text-3xl font-bold">"Profile"</h2>
                <p class="mt-1 opacity-80">"Account information"</p>
            </div>
            <div class="p-6 space-y-4">
                <div class="flex items-center border-b border-border pb-4 gap-4">
                    <div class="w-16 h-16 bg-action-primary-bg rounded-full flex items-center justify-center text-action-primary-text text-2xl font-bold">
                        {initial(&user)}
                    </div>
                    <div>
                        <h3 class="text-xl font-semibold text-fg">{user.display_name()}</h3>
                        <p class="text-fg-muted">{user.email().unwrap_or_default()}</p>
                    </div>
                </div>
                <dl class="space-y-3">
                    {rows
                        .into_iter()
                        .map(|(label, value)| view! {
                            <div class="flex justify-between items-center py-2">
                                <dt class="text-fg-muted font-medium">{label}</dt>
                                <dd class="text-fg">{value.unwrap_or_else(|| "Not set".to_string())}</dd>
                            </div>
                        })
                        .collect_view()}
                    <div class="flex justify-between items-center py-2">
                        <dt class="text-fg-muted font-medium">"Roles"</dt>
                        <dd class="flex gap-2">
                            {roles
                                .into_iter()
                                .map(|role| {
                                    let class = if role.eq_ignore_ascii_case("admin") {
                                        "px-3 py-1 rounded-full text-sm font-semibold bg-status-error-bg text-status-error-text"
                                    } else {
                                        "px-3 py-1 rounded-full text-sm font-semibold bg-status-success-bg text-status-success-text"
                                    };
                                    view! { <span class=class>{role}</span> }
                                })
                                .collect_view()}
                        </dd>
                    </div>
                </dl>
            </div>
        </div>
    }
}
