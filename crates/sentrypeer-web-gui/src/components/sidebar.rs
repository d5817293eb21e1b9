//! Sidebar navigation component
//!
//! Provides the main navigation for the dashboard with:
//! - Branding/logo
//! - One link per view; only the active view's link is marked
//! - Build version and revision in the footer

use leptos::*;

use crate::router::ViewName;
use crate::state::AppContext;

/// Sidebar navigation with branding and build footer
#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let active = ctx.navigator.active_view();
    let build = ctx.build;

    view! {
        <aside class="sidebar" role="navigation" aria-label="Main navigation">
            <div class="logo" aria-label="SentryPeer">
                <div class="logo-icon" aria-hidden="true">"S"</div>
                <span class="logo-text">"SentryPeer"</span>
                <span class="logo-version">{format!("v{}", build.version)}</span>
            </div>

            <nav class="nav" aria-label="Primary">
                <div class="nav-section">
                    <div class="nav-section-title" aria-hidden="true">"Analysis"</div>
                    {ViewName::ALL
                        .into_iter()
                        .map(|view_name| {
                            let is_active = move || active.get() == Some(view_name);
                            view! {
                                <a
                                    href=view_name.path()
                                    class="nav-link"
                                    class:active=is_active
                                    aria-current=move || is_active().then(|| "page".to_string())
                                >
                                    <span>{view_name.title()}</span>
                                </a>
                            }
                        })
                        .collect_view()}
                </div>
            </nav>

            <div class="sidebar-footer" role="contentinfo">
                <div class="sidebar-stat">
                    <span class="sidebar-stat-label">"Build"</span>
                    <span class="sidebar-stat-value mono" title=build.description>
                        {build.version_label()}
                    </span>
                </div>
                <div class="sidebar-copyright">{build.copyright}</div>
            </div>
        </aside>
    }
}
