use super::{
    repository::{FamilyEntry, RequestSummary},
    view_model::DashboardViewModel,
};
use crate::{
    components::{
        empty_state::EmptyState,
        layout::{ErrorMessage, LoadingSpinner},
    },
    state::auth::use_auth,
};
use leptos::*;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let vm = DashboardViewModel::new();
    let state = use_auth().state();
    let name = move || state.with(|s| s.user.as_ref().map(|u| u.display_name()).unwrap_or_default());

    view! {
        <div class="space-y-6 px-4 sm:px-0">
            <div class="bg-surface-elevated rounded-lg shadow-md p-6">
                <h1 class="text-3xl font-bold text-fg mb-2">"Welcome, " {name}</h1>
                <p class="text-fg-muted">"Track your treatment requests and family records."</p>
            </div>
            {move || match vm.summary_resource.get() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(Ok(summary)) => view! { <SummaryCards summary=summary /> }.into_view(),
                Some(Err(err)) => view! { <ErrorMessage message=err.error /> }.into_view(),
            }}
            <div class="bg-surface-elevated rounded-lg shadow-md p-6">
                <h2 class="text-2xl font-semibold text-fg mb-4">"Family status"</h2>
                {move || match vm.family_resource.get() {
                    None => view! { <LoadingSpinner /> }.into_view(),
                    Some(Ok(entries)) if entries.is_empty() => view! {
                        <EmptyState title="No family records to show" />
                    }.into_view(),
                    Some(Ok(entries)) => view! { <FamilyTable entries=entries /> }.into_view(),
                    Some(Err(err)) => view! {
                        <div>
                            <ErrorMessage message=err.error />
                            <button
                                class="text-sm text-action-primary-bg hover:underline"
                                on:click=move |_| vm.retry()
                            >
                                "Try again"
                            </button>
                        </div>
                    }.into_view(),
                }}
            </div>
        </div>
    }
}

#[component]
fn SummaryCards(summary: RequestSummary) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 sm:grid-cols-3 gap-4">
            <div class="bg-surface-elevated rounded-lg shadow p-4">
                <p class="text-sm text-fg-muted">"Total requests"</p>
                <p class="text-2xl font-bold text-fg">{summary.total}</p>
            </div>
            {summary
                .by_status
                .into_iter()
                .map(|(status, count)| view! {
                    <div class="bg-surface-elevated rounded-lg shadow p-4">
                        <p class="text-sm text-fg-muted">{status}</p>
                        <p class="text-2xl font-bold text-fg">{count}</p>
                    </div>
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn FamilyTable(entries: Vec<FamilyEntry>) -> impl IntoView {
    view! {
        <div class="overflow-x-auto">
            <table class="min-w-full divide-y divide-border">
                <thead class="bg-surface-muted">
                    <tr>
                        <th class="px-6 py-3 text-left text-xs font-medium text-fg-muted uppercase">"#"</th>
                        <th class="px-6 py-3 text-left text-xs font-medium text-fg-muted uppercase">"Details"</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-border">
                    {entries
                        .into_iter()
                        .enumerate()
                        .map(|(index, entry)| view! {
                            <tr>
                                <td class="px-6 py-4 text-sm text-fg">{index + 1}</td>
                                <td class="px-6 py-4 text-sm text-fg-muted">
                                    <dl class="grid grid-cols-2 gap-x-4">
                                        {entry
                                            .rows
                                            .into_iter()
                                            .map(|(label, value)| view! {
                                                <dt class="font-medium">{label}</dt>
                                                <dd>{value}</dd>
                                            })
                                            .collect_view()}
                                    </dl>
                                </td>
                            </tr>
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}
