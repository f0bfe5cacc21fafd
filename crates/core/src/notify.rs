//! Success / error notifications.
//!
//! `NotificationCenter` is created once by the application and handed to the
//! services that need it. Services only see the `Notifier` trait, so tests can
//! swap in any recorder.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use finnote_shared::config::NotificationConfig;
use finnote_shared::types::ToastId;
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// How often `spawn_expiry` sweeps expired toasts.
const EXPIRY_TICK: Duration = Duration::from_millis(250);

/// Buffered snapshots per subscriber before it starts lagging.
const CHANNEL_CAPACITY: usize = 64;

/// Kind of toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Error,
    /// Needs attention.
    Warning,
    /// Informational.
    Info,
}

/// A visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Toast ID.
    pub id: ToastId,
    /// Kind.
    pub kind: ToastKind,
    /// Headline.
    pub title: String,
    /// Optional detail.
    pub message: Option<String>,
    /// How long it stays. Zero means until dismissed.
    pub duration: Duration,
    /// When it was pushed.
    pub created_at: Instant,
}

impl Toast {
    /// Returns true once the toast has outlived its duration at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        !self.duration.is_zero() && now.saturating_duration_since(self.created_at) >= self.duration
    }
}

/// Fire-and-forget user notifications.
pub trait Notifier: Send + Sync {
    /// Shows a success toast.
    fn success(&self, title: &str, message: Option<&str>) -> ToastId;

    /// Shows an error toast.
    fn error(&self, title: &str, message: Option<&str>) -> ToastId;
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn success(&self, title: &str, message: Option<&str>) -> ToastId {
        (**self).success(title, message)
    }

    fn error(&self, title: &str, message: Option<&str>) -> ToastId {
        (**self).error(title, message)
    }
}

struct Inner {
    toasts: Mutex<Vec<Toast>>,
    sender: broadcast::Sender<Vec<Toast>>,
    default_duration: Duration,
}

/// Holds the visible toasts and fans out snapshots to subscribers.
///
/// Cloning is cheap and every clone shares the same toasts.
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("toasts", &self.lock().len())
            .field("default_duration", &self.inner.default_duration)
            .finish()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(&NotificationConfig::default())
    }
}

impl NotificationCenter {
    /// Creates an empty center.
    #[must_use]
    pub fn new(config: &NotificationConfig) -> Self {
        let (sender, _receiver) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                toasts: Mutex::new(Vec::new()),
                sender,
                default_duration: Duration::from_millis(config.default_duration_ms),
            }),
        }
    }

    /// Adds a toast. `duration` falls back to the configured default.
    pub fn push(
        &self,
        kind: ToastKind,
        title: &str,
        message: Option<&str>,
        duration: Option<Duration>,
    ) -> ToastId {
        let toast = Toast {
            id: ToastId::new(),
            kind,
            title: title.to_string(),
            message: message.map(str::to_string),
            duration: duration.unwrap_or(self.inner.default_duration),
            created_at: Instant::now(),
        };
        let id = toast.id;

        tracing::debug!(toast_id = %id, kind = ?kind, title, "Toast pushed");

        let mut toasts = self.lock();
        toasts.push(toast);
        self.publish(&toasts);
        id
    }

    /// Removes a toast. Returns false if it was already gone.
    pub fn dismiss(&self, id: ToastId) -> bool {
        let mut toasts = self.lock();
        let before = toasts.len();
        toasts.retain(|toast| toast.id != id);
        let removed = toasts.len() != before;
        if removed {
            self.publish(&toasts);
        }
        removed
    }

    /// Drops every toast expired at `now`. Returns how many were dropped.
    pub fn expire(&self, now: Instant) -> usize {
        let mut toasts = self.lock();
        let before = toasts.len();
        toasts.retain(|toast| !toast.is_expired(now));
        let removed = before - toasts.len();
        if removed > 0 {
            self.publish(&toasts);
        }
        removed
    }

    /// Snapshot of the visible toasts, oldest first.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.lock().clone()
    }

    /// Receives a snapshot after every change.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Vec<Toast>> {
        self.inner.sender.subscribe()
    }

    /// Spawns a task that expires toasts on a fixed tick.
    ///
    /// The task ends when the last other handle to this center is dropped.
    #[must_use]
    pub fn spawn_expiry(&self) -> JoinHandle<()> {
        let weak = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(EXPIRY_TICK);
            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                Self { inner }.expire(Instant::now());
            }
        })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Toast>> {
        self.inner.toasts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, toasts: &[Toast]) {
        // No subscribers is fine.
        let _ = self.inner.sender.send(toasts.to_vec());
    }
}

impl Notifier for NotificationCenter {
    fn success(&self, title: &str, message: Option<&str>) -> ToastId {
        self.push(ToastKind::Success, title, message, None)
    }

    fn error(&self, title: &str, message: Option<&str>) -> ToastId {
        self.push(ToastKind::Error, title, message, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(default_duration_ms: u64) -> NotificationCenter {
        NotificationCenter::new(&NotificationConfig {
            default_duration_ms,
        })
    }

    #[tokio::test]
    async fn test_push_and_dismiss() {
        let center = center(5000);
        let ok = center.success("Goal created", None);
        let err = center.error("Failed to delete goal", Some("Not found"));

        let toasts = center.toasts();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert_eq!(toasts[1].message.as_deref(), Some("Not found"));
        assert_eq!(toasts[0].duration, Duration::from_millis(5000));

        assert!(center.dismiss(ok));
        assert!(!center.dismiss(ok));
        assert_eq!(center.toasts()[0].id, err);
    }

    #[tokio::test]
    async fn test_expire_respects_duration() {
        let center = center(5000);
        center.push(ToastKind::Info, "short", None, Some(Duration::from_millis(100)));
        center.push(ToastKind::Info, "default", None, None);
        center.push(ToastKind::Warning, "sticky", None, Some(Duration::ZERO));

        let now = Instant::now();
        assert_eq!(center.expire(now + Duration::from_millis(200)), 1);
        assert_eq!(center.expire(now + Duration::from_secs(60)), 1);

        let left = center.toasts();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].title, "sticky");
    }

    #[tokio::test]
    async fn test_subscribers_receive_snapshots() {
        let center = center(5000);
        let mut rx = center.subscribe();

        let id = center.success("Saved", None);
        let snapshot = rx.recv().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, id);

        center.dismiss(id);
        assert!(rx.recv().await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_expiry_removes_toasts() {
        let center = center(1000);
        let handle = center.spawn_expiry();
        center.success("Saved", None);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(center.toasts().is_empty());

        drop(center);
        tokio::time::sleep(EXPIRY_TICK * 2).await;
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn test_notifier_through_arc() {
        let center = Arc::new(center(5000));
        let notifier: &dyn Notifier = &center;
        notifier.error("Failed", None);
        assert_eq!(center.toasts()[0].kind, ToastKind::Error);
    }
}
