//! Transient user notifications (toasts)
//!
//! Notifications stack in arrival order and disappear after
//! [`NOTIFICATION_TTL_MS`] or when dismissed. They never touch view or
//! navigation state.

use gloo_timers::callback::Timeout;
use leptos::*;

/// How long a notification stays on screen
pub const NOTIFICATION_TTL_MS: u32 = 3_000;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

impl NotificationKind {
    pub fn class(&self) -> &'static str {
        match self {
            NotificationKind::Info => "toast toast-info",
            NotificationKind::Error => "toast toast-error",
        }
    }
}

/// Capability the views report through
pub trait Notifier {
    fn notify(&self, message: String, kind: NotificationKind);
}

pub type NotificationId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    /// Milliseconds on the page clock after which it is removed
    pub expires_at_ms: u64,
}

/// Visible notifications in arrival order
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    next_id: NotificationId,
    visible: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notification shown from `now_ms` for [`NOTIFICATION_TTL_MS`]
    pub fn push_at(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now_ms: u64,
    ) -> NotificationId {
        let id = self.next_id;
        self.next_id += 1;
        self.visible.push(Notification {
            id,
            message: message.into(),
            kind,
            expires_at_ms: now_ms.saturating_add(u64::from(NOTIFICATION_TTL_MS)),
        });
        id
    }

    /// Remove every notification whose time is up; returns how many went
    pub fn expire(&mut self, now_ms: u64) -> usize {
        let before = self.visible.len();
        self.visible.retain(|n| n.expires_at_ms > now_ms);
        before - self.visible.len()
    }

    /// Remove one notification; returns false if it was already gone
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.visible.len();
        self.visible.retain(|n| n.id != id);
        self.visible.len() != before
    }

    pub fn visible(&self) -> &[Notification] {
        &self.visible
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

/// Reactive notification store rendered by the toast stack
#[derive(Clone, Copy)]
pub struct Notifications {
    queue: RwSignal<NotificationQueue>,
}

impl Notifications {
    pub fn new() -> Self {
        Self {
            queue: create_rw_signal(NotificationQueue::new()),
        }
    }

    pub fn visible(&self) -> Signal<Vec<Notification>> {
        let queue = self.queue;
        Signal::derive(move || queue.with(|q| q.visible().to_vec()))
    }

    pub fn dismiss(&self, id: NotificationId) {
        self.queue.update(|q| {
            q.dismiss(id);
        });
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for Notifications {
    fn notify(&self, message: String, kind: NotificationKind) {
        match kind {
            NotificationKind::Info => tracing::info!(%message, "notification"),
            NotificationKind::Error => tracing::warn!(%message, "error notification"),
        }

        if self
            .queue
            .try_update(|q| q.push_at(message, kind, now_ms()))
            .is_none()
        {
            return;
        }

        let queue = self.queue;
        Timeout::new(NOTIFICATION_TTL_MS, move || {
            // The store may be gone if the app was unmounted meanwhile
            let _ = queue.try_update(|q| q.expire(now_ms()));
        })
        .forget();
    }
}

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}
