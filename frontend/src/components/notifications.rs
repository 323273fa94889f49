use crate::api::{ApiClient, Notification};
use leptos::*;

pub fn unread_count(items: &[Notification]) -> usize {
    items.iter().filter(|n| !n.is_read()).count()
}

fn mark_read_locally(items: &mut [Notification], id: &str) {
    for item in items.iter_mut() {
        if item.id().as_deref() == Some(id) {
            if let serde_json::Value::Object(map) = &mut item.0 {
                map.insert("isRead".into(), serde_json::Value::Bool(true));
            }
        }
    }
}

/// Header bell listing the user's notifications. Load failures leave it empty.
#[component]
pub fn NotificationBell() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let items = create_rw_signal(Vec::<Notification>::new());
    let open = create_rw_signal(false);

    let loader = api.clone();
    let loaded = create_local_resource(
        || (),
        move |_| {
            let api = loader.clone();
            async move {
                api.list_notifications().await.unwrap_or_else(|err| {
                    log::warn!("notifications unavailable: {}", err);
                    Vec::new()
                })
            }
        },
    );
    create_effect(move |_| {
        if let Some(list) = loaded.get() {
            items.set(list);
        }
    });

    let mark_action = create_action(move |id: &String| {
        let api = api.clone();
        let id = id.clone();
        async move { api.mark_notification_read(&id).await.map(|_| id) }
    });
    create_effect(move |_| match mark_action.value().get() {
        Some(Ok(id)) => items.update(|list| mark_read_locally(list, &id)),
        Some(Err(err)) => log::warn!("could not mark notification read: {}", err),
        None => {}
    });

    let unread = move || items.with(|list| unread_count(list));

    view! {
        <div class="relative">
            <button
                type="button"
                class="relative p-2 rounded-md text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                aria-label="Notifications"
                on:click=move |_| open.update(|o| *o = !*o)
            >
                <i class="fas fa-bell"></i>
                <Show when=move || { unread() > 0 }>
                    <span class="absolute -top-1 -right-1 rounded-full bg-action-danger-bg text-action-danger-text text-xs px-1">
                        {unread}
                    </span>
                </Show>
            </button>
            <Show when=move || open.get()>
                <div class="absolute right-0 mt-2 w-80 max-h-96 overflow-y-auto rounded-lg bg-surface-elevated shadow-lg border border-border z-50">
                    <div class="p-3 border-b border-border font-semibold text-fg">
                        "Notifications (" {unread} ")"
                    </div>
                    {move || {
                        let list = items.get();
                        if list.is_empty() {
                            return view! { <p class="p-4 text-center text-fg-muted">"No notifications."</p> }.into_view();
                        }
                        list.into_iter()
                            .map(|n| {
                                let read = n.is_read();
                                let id = n.id();
                                let class = if read {
                                    "block w-full text-left p-3 border-b border-border text-fg-muted"
                                } else {
                                    "block w-full text-left p-3 border-b border-border text-fg font-medium bg-surface-muted"
                                };
                                view! {
                                    <button
                                        type="button"
                                        class=class
                                        on:click=move |_| {
                                            if let (false, Some(id)) = (read, id.clone()) {
                                                mark_action.dispatch(id);
                                            }
                                        }
                                    >
                                        {n.text()}
                                    </button>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn marking_read_updates_only_the_match() {
        let mut items = vec![
            Notification(json!({ "id": 1, "message": "Request approved", "isRead": false })),
            Notification(json!({ "id": 2, "message": "New ticket" })),
        ];
        assert_eq!(unread_count(&items), 2);
        mark_read_locally(&mut items, "1");
        assert!(items[0].is_read());
        assert!(!items[1].is_read());
        assert_eq!(unread_count(&items), 1);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{api::test_support::mock::MockServer, test_support::ssr::render_to_string};

    #[test]
    fn bell_renders_closed() {
        let html = render_to_string(move || {
            provide_context(MockServer::start().client_with_memory().0);
            view! { <NotificationBell /> }
        });
        assert!(html.contains("aria-label=\"Notifications\""));
        assert!(!html.contains("No notifications."));
    }
}
