//! Generic aggregation panel
//!
//! Mounting the panel activates its [`AggregationView`]; unmounting (the
//! router switching away) deactivates it, which suppresses any response
//! still in flight. A manual refresh re-activates the view; an auto-refresh
//! tick only refreshes it, which leaves a failed view alone.

use std::rc::Rc;

use chrono::Utc;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

use super::primitives::{Badge, BadgeVariant, EmptyState, LoadingSpinner, TableCard};
use crate::aggregate::{total_count, AggregationResult};
use crate::router::ViewName;
use crate::state::{format_number, format_share, AppContext};
use crate::telemetry::{Dimension, GroupKey};
use crate::time::{format_absolute, RelativeTimeFormatter, TimeAgo};
use crate::view::{AggregationView, ViewState};

/// Fetches, aggregates and renders one dimension
#[component]
pub fn AggregationPanel(
    view_name: ViewName,
    #[prop(optional)] description: Option<&'static str>,
) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let dimension = view_name.dimension();
    let state = create_rw_signal(ViewState::Idle);

    let controller = Rc::new(AggregationView::new(
        dimension,
        ctx.source.clone(),
        ctx.notifier.clone(),
        ctx.fetch_window(),
        state,
    ));

    let refresh_tick = ctx.refresh_tick;
    let activate = controller.clone();
    create_effect(move |_| {
        let _ = refresh_tick.get();
        let controller = activate.clone();
        spawn_local(async move {
            controller.activate().await;
        });
    });

    let auto_refresh_tick = ctx.auto_refresh_tick;
    let refresh = controller.clone();
    create_effect(move |previous: Option<()>| {
        let _ = auto_refresh_tick.get();
        // The mount itself is covered by the activation above
        if previous.is_some() {
            let controller = refresh.clone();
            spawn_local(async move {
                controller.refresh().await;
            });
        }
    });

    on_cleanup(move || controller.deactivate());

    let badge = view! {
        <Badge
            text=Signal::derive(move || {
                let keys = state.with(|s| s.results().len()) as u64;
                format!("{} {}", format_number(keys), dimension.plural())
            })
            variant=BadgeVariant::Default
        />
    }
    .into_view();

    view! {
        <div class="view active" role="main" aria-label=view_name.title()>
            {description.map(|desc| view! { <p class="view-description">{desc}</p> })}
            <TableCard title=view_name.title() badge=badge>
                {move || state.with(|s| match s {
                    ViewState::Idle | ViewState::Loading => view! {
                        <LoadingSpinner message="Loading telemetry..."/>
                    }.into_view(),
                    ViewState::Empty => view! {
                        <EmptyState
                            title="No data"
                            description="The honeypot has not recorded anything for this view yet"
                        />
                    }.into_view(),
                    ViewState::Failed => view! {
                        <EmptyState
                            title="No data"
                            description="Telemetry could not be loaded from the honeypot"
                        />
                    }.into_view(),
                    ViewState::Ready(results) => view! {
                        <AggregationTable dimension=dimension results=results.clone()/>
                    }.into_view(),
                })}
            </TableCard>
        </div>
    }
}

/// Ranked table of aggregation results
#[component]
pub fn AggregationTable(dimension: Dimension, results: Vec<AggregationResult>) -> impl IntoView {
    // Relative times are computed per render, never stored
    let now = Utc::now();
    let total = total_count(&results);

    view! {
        <table role="table" aria-label=dimension.key_heading()>
            <thead>
                <tr>
                    <th scope="col">"#"</th>
                    <th scope="col">{dimension.key_heading()}</th>
                    <th scope="col">"Count"</th>
                    <th scope="col">"Share"</th>
                    <th scope="col">"Last Seen"</th>
                </tr>
            </thead>
            <tbody>
                {results
                    .into_iter()
                    .enumerate()
                    .map(|(rank, row)| {
                        let relative = TimeAgo.format(row.last_seen, now);
                        let absolute = format_absolute(row.last_seen);
                        view! {
                            <tr>
                                <td class="rank">{rank + 1}</td>
                                <td>{key_cell(dimension, row.key)}</td>
                                <td class="mono">{format_number(row.count)}</td>
                                <td class="mono">{format_share(row.count, total)}</td>
                                <td>
                                    <time datetime=row.last_seen.to_rfc3339() title=absolute>
                                        {relative}
                                    </time>
                                </td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

fn key_cell(dimension: Dimension, key: GroupKey) -> View {
    let key = match key {
        GroupKey::Unknown => {
            return view! { <Badge text="Unknown" variant=BadgeVariant::Warning/> }.into_view()
        }
        GroupKey::Value(value) => value,
    };
    match dimension {
        Dimension::SipMethod => view! { <Badge text=key variant=BadgeVariant::Info/> }.into_view(),
        Dimension::Country => view! { <span class="mono country-code">{key}</span> }.into_view(),
        _ => view! { <span class="mono">{key}</span> }.into_view(),
    }
}
