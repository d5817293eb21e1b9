//! SentryPeer Web GUI - Leptos-based WebAssembly UI
//!
//! The analytical front-end of the SentryPeer SIP honeypot. It pulls raw
//! telemetry from the daemon's HTTP API and shows it as five aggregated
//! views: source IPs, user agents, SIP methods, countries and called
//! numbers.
//!
//! ## Configuration
//!
//! The daemon can inject configuration into the entry document:
//!
//! ```html
//! <meta name="sentrypeer:api-url" content="http://honeypot.local:8082">
//! <meta name="sentrypeer:event-limit" content="1000">
//! <meta name="sentrypeer:refresh-secs" content="30">
//! ```
//!
//! Or via JavaScript:
//!
//! ```javascript
//! window.__SENTRYPEER_CONFIG__ = {
//!     api_url: "http://honeypot.local:8082",
//!     event_limit: 1000,
//!     refresh_secs: 30
//! };
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Browser                           │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │            sentrypeer-web-gui (WASM)               │  │
//! │  │  ┌────────┐  ┌───────────┐  ┌──────────────────┐   │  │
//! │  │  │ Router │→ │ Views     │→ │ ApiClient        │   │  │
//! │  │  └────────┘  │ aggregate │  │ /ip-addresses    │   │  │
//! │  │              └───────────┘  │ /user-agents ... │   │  │
//! │  │  Notifications (toasts)     └──────────────────┘   │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └───────────────────────────┬──────────────────────────────┘
//!                             │ HTTP, Accept: application/json
//! ┌───────────────────────────▼──────────────────────────────┐
//! │                    sentrypeer daemon                     │
//! │        (serves http_static/ + telemetry REST API)        │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod aggregate;
pub mod api;
pub mod build_info;
pub mod components;
pub mod config;
pub mod notify;
pub mod router;
pub mod state;
pub mod telemetry;
pub mod time;
pub mod view;

use leptos::*;
use leptos_router::Router;

use components::{ActiveView, Header, RouteSync, Sidebar, Toasts};
use config::DashboardConfig;
use state::AppContext;

/// Main dashboard application component
#[component]
pub fn App() -> impl IntoView {
    // Initialize panic hook for better error messages
    console_error_panic_hook::set_once();

    let config = DashboardConfig::load();
    let initial_path = web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string());

    tracing::info!(
        version = build_info::BUILD_INFO.version,
        git_rev = build_info::BUILD_INFO.git_rev,
        api_url = %config.api_url,
        "starting SentryPeer web GUI"
    );

    let ctx = AppContext::new(config, &initial_path);
    provide_context(ctx.clone());

    ctx.start_health_checks();
    ctx.start_auto_refresh();

    view! {
        <Router>
            <RouteSync/>
            <div class="app">
                <Sidebar/>
                <main class="main">
                    <Header/>
                    <div class="content">
                        <ActiveView/>
                    </div>
                </main>
                <Toasts/>
            </div>
        </Router>
    }
}

/// Mount the application to the DOM
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();

    mount_to_body(|| view! { <App/> });
}
