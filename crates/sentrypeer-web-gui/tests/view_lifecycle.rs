//! Aggregation view lifecycle: supersession, cancellation and error
//! reporting, driven by a scripted telemetry source on a local executor.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;

use sentrypeer_web_gui::aggregate::AggregationResult;
use sentrypeer_web_gui::api::{interpret_response, ClientError, FetchWindow, TelemetrySource};
use sentrypeer_web_gui::notify::{NotificationKind, Notifier};
use sentrypeer_web_gui::telemetry::{Dimension, EventBatch, TelemetryEvent};
use sentrypeer_web_gui::view::{AggregationView, ViewSink, ViewState};

type Reply = Result<EventBatch, ClientError>;

/// Answers each fetch with the next scripted channel
#[derive(Default)]
struct ScriptedSource {
    replies: RefCell<VecDeque<oneshot::Receiver<Reply>>>,
    calls: Cell<usize>,
}

impl ScriptedSource {
    fn expect_fetch(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(rx);
        tx
    }
}

#[async_trait(?Send)]
impl TelemetrySource for ScriptedSource {
    async fn fetch(&self, _dimension: Dimension, _window: &FetchWindow) -> Reply {
        self.calls.set(self.calls.get() + 1);
        let rx = self.replies.borrow_mut().pop_front().expect("unscripted fetch");
        rx.await
            .unwrap_or_else(|_| Err(ClientError::Network("reply dropped".to_string())))
    }
}

#[derive(Default)]
struct RecordingNotifier {
    sent: RefCell<Vec<(String, NotificationKind)>>,
}

impl RecordingNotifier {
    fn of_kind(&self, kind: NotificationKind) -> Vec<String> {
        self.sent
            .borrow()
            .iter()
            .filter(|(_, k)| *k == kind)
            .map(|(m, _)| m.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: String, kind: NotificationKind) {
        self.sent.borrow_mut().push((message, kind));
    }
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<ViewState>>>);

impl Recorder {
    fn last(&self) -> Option<ViewState> {
        self.0.borrow().last().cloned()
    }

    fn history(&self) -> Vec<ViewState> {
        self.0.borrow().clone()
    }
}

impl ViewSink for Recorder {
    fn publish(&self, state: ViewState) {
        self.0.borrow_mut().push(state);
    }
}

type TestView = AggregationView<ScriptedSource, RecordingNotifier, Recorder>;

struct Harness {
    pool: LocalPool,
    source: Rc<ScriptedSource>,
    notifier: Rc<RecordingNotifier>,
    sink: Recorder,
    view: Rc<TestView>,
}

impl Harness {
    fn new(dimension: Dimension) -> Self {
        let source = Rc::new(ScriptedSource::default());
        let notifier = Rc::new(RecordingNotifier::default());
        let sink = Recorder::default();
        let view = Rc::new(AggregationView::new(
            dimension,
            source.clone(),
            notifier.clone(),
            FetchWindow::default(),
            sink.clone(),
        ));
        Self {
            pool: LocalPool::new(),
            source,
            notifier,
            sink,
            view,
        }
    }

    fn activate(&mut self) {
        let view = self.view.clone();
        self.pool
            .spawner()
            .spawn_local(async move { view.activate().await })
            .expect("spawn activation");
        self.pool.run_until_stalled();
    }

    fn refresh(&mut self) {
        let view = self.view.clone();
        self.pool
            .spawner()
            .spawn_local(async move { view.refresh().await })
            .expect("spawn refresh");
        self.pool.run_until_stalled();
    }

    fn settle(&mut self) {
        self.pool.run_until_stalled();
    }
}

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn event(ip: &str, number: &str, secs: i64) -> TelemetryEvent {
    TelemetryEvent {
        source_ip: ip.to_string(),
        user_agent: Some("friendly-scanner".to_string()),
        sip_method: Some("OPTIONS".to_string()),
        called_number: Some(number.to_string()),
        country: Some("NL".to_string()),
        timestamp: at(secs),
    }
}

fn batch(ips: &[&str]) -> EventBatch {
    ips.iter()
        .enumerate()
        .map(|(i, ip)| event(ip, "100", i as i64))
        .collect()
}

/// Events captured at the given offsets, one source address each
fn captured_at(secs: &[i64]) -> EventBatch {
    secs.iter()
        .map(|s| event(&format!("10.0.0.{}", s), "100", *s))
        .collect()
}

fn ready_keys(state: &ViewState) -> Vec<String> {
    state.results().iter().map(|r| r.key.to_string()).collect()
}

#[test]
fn second_activation_wins_when_first_reply_arrives_late() {
    let mut h = Harness::new(Dimension::SourceIp);
    let first = h.source.expect_fetch();
    let second = h.source.expect_fetch();

    h.activate();
    h.activate();

    second.send(Ok(batch(&["5.6.7.8"]))).unwrap();
    h.settle();
    first.send(Ok(batch(&["1.2.3.4", "1.2.3.4"]))).unwrap();
    h.settle();

    let ready: Vec<_> = h
        .sink
        .history()
        .into_iter()
        .filter(|s| matches!(s, ViewState::Ready(_)))
        .collect();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready_keys(&ready[0]), vec!["5.6.7.8"]);
    assert_eq!(ready_keys(&h.sink.last().unwrap()), vec!["5.6.7.8"]);
}

#[test]
fn second_activation_wins_when_first_reply_arrives_early() {
    let mut h = Harness::new(Dimension::SourceIp);
    let first = h.source.expect_fetch();
    let second = h.source.expect_fetch();

    h.activate();
    h.activate();

    first.send(Ok(batch(&["1.2.3.4"]))).unwrap();
    h.settle();
    assert!(
        !h.sink.history().iter().any(|s| matches!(s, ViewState::Ready(_))),
        "superseded reply must not render"
    );

    second.send(Ok(batch(&["5.6.7.8", "9.9.9.9"]))).unwrap();
    h.settle();
    assert_eq!(
        ready_keys(&h.sink.last().unwrap()),
        vec!["9.9.9.9", "5.6.7.8"]
    );
}

#[test]
fn server_error_notifies_once_and_shows_no_data() {
    let mut h = Harness::new(Dimension::UserAgent);
    let reply = h.source.expect_fetch();

    h.activate();
    reply.send(interpret_response(500, "Internal Server Error")).unwrap();
    h.settle();

    let errors = h.notifier.of_kind(NotificationKind::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("user agents"));
    assert_eq!(h.sink.last(), Some(ViewState::Failed));
    assert!(h.sink.last().unwrap().is_no_data());
    // No automatic retry
    assert_eq!(h.source.calls.get(), 1);
}

#[test]
fn malformed_body_is_reported_as_decode_error() {
    let mut h = Harness::new(Dimension::SipMethod);
    let reply = h.source.expect_fetch();

    h.activate();
    reply.send(interpret_response(200, "<html>oops</html>")).unwrap();
    h.settle();

    let errors = h.notifier.of_kind(NotificationKind::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("decode error"));
    assert_eq!(h.sink.last(), Some(ViewState::Failed));
}

#[test]
fn daemon_not_found_renders_empty_without_error() {
    let mut h = Harness::new(Dimension::Number);
    let reply = h.source.expect_fetch();

    h.activate();
    reply
        .send(interpret_response(404, r#"{"message": "No phone numbers found"}"#))
        .unwrap();
    h.settle();

    assert!(h.notifier.sent.borrow().is_empty());
    assert_eq!(h.sink.last(), Some(ViewState::Empty));
}

#[test]
fn deactivation_suppresses_pending_render() {
    let mut h = Harness::new(Dimension::Country);
    let reply = h.source.expect_fetch();

    h.activate();
    h.view.deactivate();
    reply.send(Ok(batch(&["1.2.3.4"]))).unwrap();
    h.settle();

    assert_eq!(h.sink.last(), Some(ViewState::Idle));
    assert!(h.notifier.sent.borrow().is_empty());
}

#[test]
fn blank_numbers_leave_number_view_empty() {
    let mut h = Harness::new(Dimension::Number);
    let reply = h.source.expect_fetch();

    h.activate();
    reply
        .send(Ok(EventBatch::new(vec![
            event("1.2.3.4", "", 0),
            event("5.6.7.8", "  ", 1),
        ])))
        .unwrap();
    h.settle();

    assert_eq!(h.sink.last(), Some(ViewState::Empty));
}

#[test]
fn source_ip_example_ordering() {
    let mut h = Harness::new(Dimension::SourceIp);
    let reply = h.source.expect_fetch();

    h.activate();
    reply
        .send(Ok(EventBatch::new(vec![
            event("1.2.3.4", "", 0),
            event("1.2.3.4", "", 10),
            event("5.6.7.8", "", 0),
        ])))
        .unwrap();
    h.settle();

    assert_eq!(
        h.sink.last(),
        Some(ViewState::Ready(vec![
            AggregationResult {
                key: "1.2.3.4".into(),
                count: 2,
                last_seen: at(10),
            },
            AggregationResult {
                key: "5.6.7.8".into(),
                count: 1,
                last_seen: at(0),
            },
        ]))
    );
}

#[test]
fn refresh_with_more_events_raises_info_alert() {
    let mut h = Harness::new(Dimension::SourceIp);

    let reply = h.source.expect_fetch();
    h.activate();
    reply.send(Ok(batch(&["1.1.1.1", "2.2.2.2"]))).unwrap();
    h.settle();
    assert!(h.notifier.of_kind(NotificationKind::Info).is_empty());

    let reply = h.source.expect_fetch();
    h.activate();
    reply
        .send(Ok(batch(&["1.1.1.1", "2.2.2.2", "3.3.3.3", "4.4.4.4", "5.5.5.5"])))
        .unwrap();
    h.settle();
    assert_eq!(h.notifier.of_kind(NotificationKind::Info), vec!["3 new events"]);

    // A fresh activation after leaving the view has no baseline
    h.view.deactivate();
    let reply = h.source.expect_fetch();
    h.activate();
    reply.send(Ok(batch(&["1.1.1.1"; 7]))).unwrap();
    h.settle();
    assert_eq!(h.notifier.of_kind(NotificationKind::Info).len(), 1);
}

#[test]
fn new_events_announced_when_window_is_full() {
    let mut h = Harness::new(Dimension::SourceIp);

    let reply = h.source.expect_fetch();
    h.activate();
    reply.send(Ok(captured_at(&[0, 1, 2]))).unwrap();
    h.settle();

    // Same window size, two older events slid out
    let reply = h.source.expect_fetch();
    h.refresh();
    reply.send(Ok(captured_at(&[2, 3, 4]))).unwrap();
    h.settle();

    assert_eq!(h.notifier.of_kind(NotificationKind::Info), vec!["2 new events"]);

    // Nothing newer: no alert
    let reply = h.source.expect_fetch();
    h.refresh();
    reply.send(Ok(captured_at(&[2, 3, 4]))).unwrap();
    h.settle();
    assert_eq!(h.notifier.of_kind(NotificationKind::Info).len(), 1);
}

#[test]
fn new_events_follow_daemon_totals_when_reported() {
    let mut h = Harness::new(Dimension::SourceIp);

    let reply = h.source.expect_fetch();
    h.activate();
    reply
        .send(Ok(captured_at(&[0, 1, 2]).with_total(Some(5_000))))
        .unwrap();
    h.settle();

    let reply = h.source.expect_fetch();
    h.refresh();
    reply
        .send(Ok(captured_at(&[1, 2, 3]).with_total(Some(5_001))))
        .unwrap();
    h.settle();

    assert_eq!(h.notifier.of_kind(NotificationKind::Info), vec!["1 new event"]);
}

#[test]
fn timer_refresh_does_not_retry_failed_view() {
    let mut h = Harness::new(Dimension::UserAgent);

    let reply = h.source.expect_fetch();
    h.activate();
    reply.send(interpret_response(500, "Internal Server Error")).unwrap();
    h.settle();
    assert!(h.view.has_failed());

    h.refresh();
    h.refresh();
    assert_eq!(h.source.calls.get(), 1);
    assert_eq!(h.notifier.of_kind(NotificationKind::Error).len(), 1);
    assert_eq!(h.sink.last(), Some(ViewState::Failed));

    // An explicit activation (refresh button, navigation) fetches again
    let reply = h.source.expect_fetch();
    h.activate();
    reply.send(Ok(batch(&["1.2.3.4"]))).unwrap();
    h.settle();
    assert_eq!(h.source.calls.get(), 2);
    assert!(!h.view.has_failed());
    assert_eq!(ready_keys(&h.sink.last().unwrap()), vec!["1.2.3.4"]);

    // Healthy again, so the timer drives it
    let reply = h.source.expect_fetch();
    h.refresh();
    reply.send(Ok(batch(&["1.2.3.4"]))).unwrap();
    h.settle();
    assert_eq!(h.source.calls.get(), 3);
}

#[test]
fn views_fail_independently() {
    let mut failing = Harness::new(Dimension::Country);
    let mut healthy = Harness::new(Dimension::SourceIp);

    let bad = failing.source.expect_fetch();
    let good = healthy.source.expect_fetch();

    failing.activate();
    healthy.activate();

    bad.send(Err(ClientError::Network("connection refused".to_string())))
        .unwrap();
    good.send(Ok(batch(&["1.2.3.4"]))).unwrap();
    failing.settle();
    healthy.settle();

    assert_eq!(failing.sink.last(), Some(ViewState::Failed));
    assert_eq!(ready_keys(&healthy.sink.last().unwrap()), vec!["1.2.3.4"]);
    assert!(healthy.notifier.sent.borrow().is_empty());
}
