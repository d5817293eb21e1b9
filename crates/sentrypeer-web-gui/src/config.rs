//! Dashboard configuration
//!
//! The daemon may inject configuration into the entry document via
//! `<meta>` tags or a `window.__SENTRYPEER_CONFIG__` object. Configuration is
//! read once at startup and never changes afterwards.

use wasm_bindgen::JsCast;

use crate::api::DEFAULT_EVENT_LIMIT;

/// Default auto-refresh period of the active view
pub const DEFAULT_REFRESH_SECS: u32 = 30;

const META_PREFIX: &str = "sentrypeer:";
const JS_CONFIG_GLOBAL: &str = "__SENTRYPEER_CONFIG__";

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// API base URL (e.g., "http://localhost:8082"); empty means current origin
    pub api_url: String,
    /// Most recent events requested per view
    pub event_limit: u32,
    /// Auto-refresh period in seconds, 0 disables
    pub refresh_secs: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            event_limit: DEFAULT_EVENT_LIMIT,
            refresh_secs: DEFAULT_REFRESH_SECS,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the page (priority order):
    /// 1. `<meta name="sentrypeer:...">` tags (server-injected)
    /// 2. `window.__SENTRYPEER_CONFIG__` object
    /// 3. Defaults, with the current window origin as API URL
    pub fn load() -> Self {
        let document = web_sys::window().and_then(|w| w.document());
        let mut config = Self::from_lookup(|key| {
            document
                .as_ref()
                .and_then(|doc| get_meta_content(doc, &format!("{}{}", META_PREFIX, key.replace('_', "-"))))
                .filter(|v| !v.is_empty())
                .or_else(|| get_js_config(key))
        });

        if config.api_url.is_empty() {
            config.api_url = web_sys::window()
                .and_then(|w| w.location().origin().ok())
                .unwrap_or_default();
        }

        config
    }

    /// Build configuration from a key lookup (`api_url`, `event_limit`,
    /// `refresh_secs`). Missing or unparseable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("api_url") {
            config.api_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(limit) = lookup("event_limit").and_then(|v| v.trim().parse::<u32>().ok()) {
            if limit > 0 {
                config.event_limit = limit;
            }
        }
        if let Some(secs) = lookup("refresh_secs").and_then(|v| v.trim().parse::<u32>().ok()) {
            config.refresh_secs = secs;
        }

        config
    }

    /// Get the API base URL
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

/// Get content from a <meta name="..."> tag
fn get_meta_content(document: &web_sys::Document, name: &str) -> Option<String> {
    let selector = format!("meta[name=\"{}\"]", name);
    document
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlMetaElement>().ok())
        .map(|meta| meta.content())
}

/// Get a value from window.__SENTRYPEER_CONFIG__
fn get_js_config(key: &str) -> Option<String> {
    let window = web_sys::window()?;
    let config = js_sys::Reflect::get(&window, &JS_CONFIG_GLOBAL.into()).ok()?;

    if config.is_undefined() || config.is_null() {
        return None;
    }

    let value = js_sys::Reflect::get(&config, &key.into()).ok()?;
    value
        .as_string()
        .or_else(|| value.as_f64().map(|n| (n as u64).to_string()))
}
