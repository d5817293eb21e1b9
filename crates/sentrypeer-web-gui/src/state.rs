//! Application context shared with every view
//!
//! Created once in [`crate::App`] and handed to components through Leptos
//! context. Views only read from it, except for reporting through the
//! notifier; the route state is written by the [`Navigator`] alone.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{ApiClient, FetchWindow, TelemetrySource};
use crate::build_info::BuildInfo;
use crate::config::DashboardConfig;
use crate::notify::{Notifications, Notifier};
use crate::router::Navigator;

const HEALTH_CHECK_INTERVAL_MS: u32 = 10_000;

/// Process-scoped context injected into each view
#[derive(Clone)]
pub struct AppContext {
    /// Startup configuration
    pub config: Rc<DashboardConfig>,
    /// Compile-time metadata
    pub build: &'static BuildInfo,
    /// Daemon client, used for health checks
    pub client: Rc<ApiClient>,
    /// Telemetry capability handed to views
    pub source: Rc<dyn TelemetrySource>,
    /// Notification capability handed to views
    pub notifier: Rc<dyn Notifier>,
    /// Toast store, for rendering
    pub notifications: Notifications,
    /// Route state owner
    pub navigator: Navigator,
    /// Bumped by the refresh button to re-activate the active view
    pub refresh_tick: RwSignal<u64>,
    /// Bumped by the auto-refresh timer; failed views ignore it
    pub auto_refresh_tick: RwSignal<u64>,
    /// Last health check succeeded
    pub connected: RwSignal<bool>,
    /// Version reported by the daemon
    pub daemon_version: RwSignal<Option<String>>,
}

impl AppContext {
    pub fn new(config: DashboardConfig, initial_path: &str) -> Self {
        let client = Rc::new(ApiClient::from_config(&config));
        let notifications = Notifications::new();

        Self {
            config: Rc::new(config),
            build: BuildInfo::current(),
            source: client.clone(),
            notifier: Rc::new(notifications),
            client,
            notifications,
            navigator: Navigator::new(initial_path),
            refresh_tick: create_rw_signal(0),
            auto_refresh_tick: create_rw_signal(0),
            connected: create_rw_signal(false),
            daemon_version: create_rw_signal(None),
        }
    }

    /// Paging window every view requests with
    pub fn fetch_window(&self) -> FetchWindow {
        FetchWindow {
            limit: Some(self.config.event_limit),
            since: None,
        }
    }

    /// Re-run `activate()` on the active view
    pub fn request_refresh(&self) {
        self.refresh_tick.update(|tick| *tick = tick.wrapping_add(1));
    }

    /// Periodically refresh the active view, if configured
    pub fn start_auto_refresh(&self) {
        let secs = self.config.refresh_secs;
        if secs == 0 {
            return;
        }
        let ctx = self.clone();
        spawn_local(async move {
            loop {
                TimeoutFuture::new(secs.saturating_mul(1_000)).await;
                // Stop once the app is gone
                if ctx
                    .auto_refresh_tick
                    .try_update(|tick| *tick = tick.wrapping_add(1))
                    .is_none()
                {
                    break;
                }
            }
        });
    }

    /// Poll the daemon's health endpoint for the connection indicator
    pub fn start_health_checks(&self) {
        let ctx = self.clone();
        spawn_local(async move {
            loop {
                ctx.check_health().await;
                TimeoutFuture::new(HEALTH_CHECK_INTERVAL_MS).await;
            }
        });
    }

    async fn check_health(&self) {
        match self.client.health().await {
            Ok(health) => {
                self.connected.set(health.is_ok());
                self.daemon_version.set(health.version);
            }
            Err(err) => {
                tracing::debug!(error = %err, "health check failed");
                self.connected.set(false);
            }
        }
    }
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Format a number with K/M suffix
pub fn format_number(num: u64) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}

/// Share of `count` in `total` as a percentage with one decimal
pub fn format_share(count: u64, total: u64) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", count as f64 * 100.0 / total as f64)
}
