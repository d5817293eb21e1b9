//! Reusable UI primitive components
//!
//! Loading and empty states, badges, the connection dot and table cards.

use leptos::*;

// ============================================================================
// Loading States
// ============================================================================

/// Loading spinner with optional message
#[component]
pub fn LoadingSpinner(#[prop(optional)] message: Option<&'static str>) -> impl IntoView {
    view! {
        <div class="loading-spinner" role="status" aria-live="polite">
            <svg class="spinner" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg">
                <circle class="spinner-track" cx="12" cy="12" r="10" fill="none" stroke-width="3"/>
                <circle class="spinner-head" cx="12" cy="12" r="10" fill="none" stroke-width="3"
                        stroke-dasharray="31.4 31.4" stroke-linecap="round"/>
            </svg>
            {message.map(|msg| view! { <span class="loading-message">{msg}</span> })}
        </div>
    }
}

// ============================================================================
// Empty States
// ============================================================================

/// "No data" state shown instead of an empty table
#[component]
pub fn EmptyState(
    title: &'static str,
    #[prop(optional)] description: Option<&'static str>,
) -> impl IntoView {
    view! {
        <div class="empty-state" role="status">
            <div class="empty-icon" aria-hidden="true">
                <svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke-width="1.5" stroke="currentColor">
                    <path stroke-linecap="round" stroke-linejoin="round" d="M20.25 7.5l-.625 10.632a2.25 2.25 0 0 1-2.247 2.118H6.622a2.25 2.25 0 0 1-2.247-2.118L3.75 7.5m6 4.125 2.25 2.25m0 0 2.25 2.25M12 13.875l2.25-2.25M12 13.875l-2.25 2.25M3.375 7.5h17.25c.621 0 1.125-.504 1.125-1.125v-1.5c0-.621-.504-1.125-1.125-1.125H3.375c-.621 0-1.125.504-1.125 1.125v1.5c0 .621.504 1.125 1.125 1.125Z"/>
                </svg>
            </div>
            <div class="empty-text">{title}</div>
            {description.map(|desc| view! { <p class="empty-description">{desc}</p> })}
        </div>
    }
}

// ============================================================================
// Badges & Indicators
// ============================================================================

/// Badge variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeVariant {
    #[default]
    Default,
    Warning,
    Info,
}

impl BadgeVariant {
    pub fn class(&self) -> &'static str {
        match self {
            BadgeVariant::Default => "badge",
            BadgeVariant::Warning => "badge badge-warning",
            BadgeVariant::Info => "badge badge-info",
        }
    }
}

/// Badge component with text
#[component]
pub fn Badge<T: IntoView + 'static>(
    text: T,
    #[prop(optional)] variant: BadgeVariant,
) -> impl IntoView {
    view! {
        <span class=variant.class()>
            {text}
        </span>
    }
}

/// Connection status dot
#[component]
pub fn StatusDot(#[prop(into)] connected: MaybeSignal<bool>) -> impl IntoView {
    view! {
        <span
            class="status-dot"
            class:connected=move || connected.get()
            class:disconnected=move || !connected.get()
            role="status"
            aria-label=move || if connected.get() { "Connected" } else { "Disconnected" }
        />
    }
}

// ============================================================================
// Cards & Containers
// ============================================================================

/// Table card container
#[component]
pub fn TableCard(
    title: &'static str,
    children: Children,
    #[prop(optional)] badge: Option<View>,
) -> impl IntoView {
    view! {
        <div class="table-card" role="region" aria-label=title>
            <div class="table-header">
                <div class="table-title-group">
                    <div class="table-title">{title}</div>
                    {badge}
                </div>
            </div>
            {children()}
        </div>
    }
}
