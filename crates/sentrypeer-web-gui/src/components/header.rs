//! Header component
//!
//! The top bar showing:
//! - Title of the active view
//! - Daemon connection status and version
//! - Manual refresh button

use leptos::*;

use super::primitives::StatusDot;
use crate::state::AppContext;

/// Page header with status and refresh button
#[component]
pub fn Header() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let active = ctx.navigator.active_view();
    let connected = ctx.connected;
    let daemon_version = ctx.daemon_version;

    let refresh = {
        let ctx = ctx.clone();
        move |_| ctx.request_refresh()
    };

    let title = move || active.get().map(|v| v.title()).unwrap_or("SentryPeer");

    view! {
        <header class="header" role="banner">
            <div class="header-left">
                <h1 class="header-title" aria-live="polite">
                    {title}
                </h1>
            </div>
            <div class="header-right">
                <div class="connection-status" role="status" aria-live="polite">
                    <StatusDot connected=connected/>
                    <span>
                        {move || match (connected.get(), daemon_version.get()) {
                            (true, Some(version)) => format!("Connected to SentryPeer {}", version),
                            (true, None) => "Connected".to_string(),
                            (false, _) => "Disconnected".to_string(),
                        }}
                    </span>
                </div>
                <button
                    class="refresh-btn"
                    on:click=refresh
                    title="Refresh data"
                    aria-label="Refresh the current view"
                    disabled=move || active.get().is_none()
                >
                    "Refresh"
                </button>
            </div>
        </header>
    }
}
