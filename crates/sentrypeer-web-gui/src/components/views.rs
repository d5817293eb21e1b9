//! The five aggregation views and the outlet that shows the active one

use leptos::*;
use leptos_router::use_location;

use super::aggregation::AggregationPanel;
use crate::router::ViewName;
use crate::state::AppContext;

/// Scanners grouped by source address
#[component]
pub fn SourceIpsView() -> impl IntoView {
    view! {
        <AggregationPanel
            view_name=ViewName::SourceIps
            description="Addresses that sent unsolicited SIP traffic to the honeypot"
        />
    }
}

/// Scanners grouped by SIP User-Agent
#[component]
pub fn UserAgentsView() -> impl IntoView {
    view! {
        <AggregationPanel
            view_name=ViewName::UserAgents
            description="Tools identified by their User-Agent header; requests without one are listed as unknown"
        />
    }
}

/// Requests grouped by SIP method
#[component]
pub fn SipMethodsView() -> impl IntoView {
    view! {
        <AggregationPanel
            view_name=ViewName::SipMethods
            description="SIP request methods seen by the honeypot"
        />
    }
}

/// Sources grouped by geolocated country
#[component]
pub fn CountryAnalysisView() -> impl IntoView {
    view! {
        <AggregationPanel
            view_name=ViewName::CountryAnalysis
            description="Source countries; addresses that could not be located are grouped as unknown"
        />
    }
}

/// Attempted calls grouped by destination number
#[component]
pub fn NumberAnalysisView() -> impl IntoView {
    view! {
        <AggregationPanel
            view_name=ViewName::NumberAnalysis
            description="Numbers scanners tried to call; requests without a number are not counted here"
        />
    }
}

/// Feeds browser location changes into the navigator
#[component]
pub fn RouteSync() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let location = use_location();
    let navigator = ctx.navigator;

    create_effect(move |_| {
        let path = location.pathname.get();
        navigator.navigate(&path);
    });
}

/// Renders the active view; nothing while unresolved
#[component]
pub fn ActiveView() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let active = ctx.navigator.active_view();

    move || match active.get() {
        Some(ViewName::SourceIps) => view! { <SourceIpsView/> }.into_view(),
        Some(ViewName::UserAgents) => view! { <UserAgentsView/> }.into_view(),
        Some(ViewName::SipMethods) => view! { <SipMethodsView/> }.into_view(),
        Some(ViewName::CountryAnalysis) => view! { <CountryAnalysisView/> }.into_view(),
        Some(ViewName::NumberAnalysis) => view! { <NumberAnalysisView/> }.into_view(),
        None => ().into_view(),
    }
}
