//! Navigation: path → view resolution and the active-view state machine
//!
//! The route table is static. A path with no entry is a configuration
//! error: it is logged and the router stays where it was, so the active
//! view keeps rendering.

use leptos::*;

use crate::telemetry::Dimension;

/// The five aggregation views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewName {
    SourceIps,
    UserAgents,
    SipMethods,
    CountryAnalysis,
    NumberAnalysis,
}

impl ViewName {
    pub const ALL: [ViewName; 5] = [
        ViewName::SourceIps,
        ViewName::UserAgents,
        ViewName::SipMethods,
        ViewName::CountryAnalysis,
        ViewName::NumberAnalysis,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            ViewName::SourceIps => "/",
            ViewName::UserAgents => "/user-agents",
            ViewName::SipMethods => "/sip-methods",
            ViewName::CountryAnalysis => "/country-analysis",
            ViewName::NumberAnalysis => "/number-analysis",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ViewName::SourceIps => "Source IPs",
            ViewName::UserAgents => "User Agents",
            ViewName::SipMethods => "SIP Methods",
            ViewName::CountryAnalysis => "Country Analysis",
            ViewName::NumberAnalysis => "Number Analysis",
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            ViewName::SourceIps => Dimension::SourceIp,
            ViewName::UserAgents => Dimension::UserAgent,
            ViewName::SipMethods => Dimension::SipMethod,
            ViewName::CountryAnalysis => Dimension::Country,
            ViewName::NumberAnalysis => Dimension::Number,
        }
    }
}

/// Navigation failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("no view is mapped to path {0:?}")]
    Unmapped(String),
}

/// Strip query and fragment, and a trailing slash except on the root
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

/// Resolve a path to its view
pub fn resolve(path: &str) -> Result<ViewName, RouteError> {
    let normalized = normalize_path(path);
    ViewName::ALL
        .into_iter()
        .find(|view| view.path() == normalized)
        .ok_or_else(|| RouteError::Unmapped(path.to_string()))
}

/// Result of a navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Target is already active
    Unchanged,
    /// Active view changed; `from` is `None` when leaving the unresolved state
    Switched { from: Option<ViewName>, to: ViewName },
    /// Path has no view; state untouched
    Rejected(RouteError),
}

/// Which view is active. `view == None` is the initial unresolved state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteState {
    pub path: String,
    pub view: Option<ViewName>,
}

impl RouteState {
    /// Initial state for the URL the app was loaded with
    pub fn initial(path: &str) -> Self {
        let mut state = Self::default();
        state.navigate(path);
        state
    }

    pub fn navigate(&mut self, path: &str) -> Transition {
        match resolve(path) {
            Ok(view) if self.view == Some(view) => {
                self.path = normalize_path(path).to_string();
                Transition::Unchanged
            }
            Ok(view) => {
                let from = self.view.replace(view);
                self.path = normalize_path(path).to_string();
                Transition::Switched { from, to: view }
            }
            Err(err) => Transition::Rejected(err),
        }
    }

    pub fn is_active(&self, view: ViewName) -> bool {
        self.view == Some(view)
    }
}

/// Sole writer of the reactive [`RouteState`]
#[derive(Clone, Copy)]
pub struct Navigator {
    state: RwSignal<RouteState>,
}

impl Navigator {
    pub fn new(initial_path: &str) -> Self {
        Self {
            state: create_rw_signal(RouteState::initial(initial_path)),
        }
    }

    /// Read-only view of the route state
    pub fn state(&self) -> Signal<RouteState> {
        self.state.into()
    }

    /// Active view, changing only on real transitions
    pub fn active_view(&self) -> Memo<Option<ViewName>> {
        let state = self.state;
        create_memo(move |_| state.with(|s| s.view))
    }

    pub fn navigate(&self, path: &str) -> Transition {
        let transition = self
            .state
            .try_update(|s| s.navigate(path))
            .unwrap_or(Transition::Unchanged);

        match &transition {
            Transition::Switched { from, to } => {
                tracing::debug!(?from, ?to, "navigated");
            }
            Transition::Rejected(err) => {
                tracing::warn!(error = %err, "navigation ignored");
            }
            Transition::Unchanged => {}
        }
        transition
    }
}
