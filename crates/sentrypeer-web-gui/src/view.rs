//! Aggregation view lifecycle
//!
//! An [`AggregationView`] owns one dimension: `activate()` fetches and
//! aggregates, `deactivate()` drops the results. Every activation takes an
//! [`ActivationTicket`]; a fetch whose ticket has been superseded (by a newer
//! activation or by deactivation) publishes nothing when it resolves.
//!
//! `refresh()` is the timer-driven variant of `activate()`: it does nothing
//! while the view shows a failure, so a failed fetch is only repeated when
//! the user asks for it.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use leptos::{RwSignal, SignalSet};

use crate::aggregate::{aggregate, AggregationResult};
use crate::api::{FetchWindow, TelemetrySource};
use crate::notify::{NotificationKind, Notifier};
use crate::telemetry::{Dimension, EventBatch};

/// What a view currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Not active, nothing held
    #[default]
    Idle,
    /// First fetch of this activation in flight
    Loading,
    /// Aggregated rows, never empty
    Ready(Vec<AggregationResult>),
    /// Fetch succeeded with nothing to show
    Empty,
    /// Fetch failed; the user has been notified
    Failed,
}

impl ViewState {
    /// Whether the view shows its "no data" state
    pub fn is_no_data(&self) -> bool {
        matches!(self, ViewState::Empty | ViewState::Failed)
    }

    pub fn results(&self) -> &[AggregationResult] {
        match self {
            ViewState::Ready(results) => results,
            _ => &[],
        }
    }
}

/// Receives the states a view publishes
pub trait ViewSink {
    fn publish(&self, state: ViewState);
}

impl ViewSink for RwSignal<ViewState> {
    fn publish(&self, state: ViewState) {
        // The signal is disposed once the view component unmounts
        let _ = self.try_set(state);
    }
}

/// Identifies one `activate()` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationTicket(u64);

/// Hands out tickets; only the latest one is current
#[derive(Debug, Default)]
pub struct ActivationTracker {
    generation: Cell<u64>,
}

impl ActivationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an activation, superseding any earlier one
    pub fn begin(&self) -> ActivationTicket {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        ActivationTicket(next)
    }

    /// Invalidate the current ticket without issuing a new one
    pub fn cancel(&self) {
        self.generation.set(self.generation.get() + 1);
    }

    pub fn is_current(&self, ticket: ActivationTicket) -> bool {
        self.generation.get() == ticket.0
    }
}

/// What the previous successful fetch of an activation period saw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Baseline {
    newest: Option<DateTime<Utc>>,
    total: Option<u64>,
}

impl Baseline {
    fn of(batch: &EventBatch) -> Self {
        Self {
            newest: batch.newest(),
            total: batch.total(),
        }
    }

    /// Events in `batch` that arrived since this baseline.
    ///
    /// Prefers the daemon's stored-event totals; otherwise counts events
    /// newer than the previous newest one, which keeps working once the
    /// fetch window is full and slides.
    fn new_events(&self, batch: &EventBatch) -> u64 {
        match (self.total, batch.total()) {
            (Some(previous), Some(current)) => current.saturating_sub(previous),
            _ => match self.newest {
                Some(newest) => batch.count_after(newest) as u64,
                None => batch.len() as u64,
            },
        }
    }
}

/// Controller for one aggregation view
pub struct AggregationView<S: ?Sized, N: ?Sized, K> {
    dimension: Dimension,
    source: Rc<S>,
    notifier: Rc<N>,
    window: FetchWindow,
    sink: K,
    tracker: ActivationTracker,
    baseline: Cell<Option<Baseline>>,
    failed: Cell<bool>,
}

impl<S, N, K> AggregationView<S, N, K>
where
    S: TelemetrySource + ?Sized,
    N: Notifier + ?Sized,
    K: ViewSink,
{
    pub fn new(
        dimension: Dimension,
        source: Rc<S>,
        notifier: Rc<N>,
        window: FetchWindow,
        sink: K,
    ) -> Self {
        Self {
            dimension,
            source,
            notifier,
            window,
            sink,
            tracker: ActivationTracker::new(),
            baseline: Cell::new(None),
            failed: Cell::new(false),
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Whether the last completed activation failed
    pub fn has_failed(&self) -> bool {
        self.failed.get()
    }

    /// Re-activate on a timer tick, unless the view shows a failure
    pub async fn refresh(&self) {
        if self.failed.get() {
            tracing::debug!(
                dimension = self.dimension.selector(),
                "skipping refresh of failed view"
            );
            return;
        }
        self.activate().await;
    }

    /// Fetch, aggregate and publish this view's data.
    ///
    /// Errors never escape: they become one error notification and the
    /// "no data" state. Nothing is retried.
    pub async fn activate(&self) {
        let ticket = self.tracker.begin();
        if self.baseline.get().is_none() {
            self.sink.publish(ViewState::Loading);
        }

        tracing::debug!(dimension = self.dimension.selector(), "fetching telemetry");
        let outcome = self.source.fetch(self.dimension, &self.window).await;

        if !self.tracker.is_current(ticket) {
            tracing::debug!(
                dimension = self.dimension.selector(),
                "discarding superseded response"
            );
            return;
        }

        match outcome {
            Ok(batch) => {
                self.failed.set(false);
                if let Some(previous) = self.baseline.replace(Some(Baseline::of(&batch))) {
                    let new_events = previous.new_events(&batch);
                    if new_events > 0 {
                        self.notifier.notify(
                            format!(
                                "{} new event{}",
                                new_events,
                                if new_events == 1 { "" } else { "s" }
                            ),
                            NotificationKind::Info,
                        );
                    }
                }

                let results = aggregate(self.dimension, batch);
                if results.is_empty() {
                    self.sink.publish(ViewState::Empty);
                } else {
                    self.sink.publish(ViewState::Ready(results));
                }
            }
            Err(err) => {
                tracing::warn!(dimension = self.dimension.selector(), error = %err, "fetch failed");
                self.failed.set(true);
                self.notifier.notify(
                    format!("Failed to load {}: {}", self.dimension.plural(), err),
                    NotificationKind::Error,
                );
                self.sink.publish(ViewState::Failed);
            }
        }
    }

    /// Drop results and suppress any in-flight fetch
    pub fn deactivate(&self) {
        self.tracker.cancel();
        self.baseline.set(None);
        self.failed.set(false);
        self.sink.publish(ViewState::Idle);
    }
}
