//! Toast stack for transient notifications

use leptos::*;

use crate::state::AppContext;

/// Renders visible notifications, oldest first
#[component]
pub fn Toasts() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let notifications = ctx.notifications;
    let visible = notifications.visible();

    view! {
        <div class="toast-stack" role="log" aria-live="polite">
            <For
                each=move || visible.get()
                key=|n| n.id
                children=move |notification| {
                    let id = notification.id;
                    view! {
                        <div class=notification.kind.class() role="alert">
                            <span class="toast-message">{notification.message}</span>
                            <button
                                class="toast-dismiss"
                                aria-label="Dismiss notification"
                                on:click=move |_| notifications.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
