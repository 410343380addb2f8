//! Notification side channel for save attempts.
//!
//! The controller reports "saving", "saved" and "error" notices through an
//! injected `Notifier`. `TracingNotifier` logs them; `ChannelNotifier`
//! fans them out to UI subscribers over a `tokio::sync::broadcast` channel.

use rendizy_types::notice::{Notice, NoticeLevel};
use tokio::sync::broadcast;

/// Receiver of transient user notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);

    fn notify_info(&self, message: &str) {
        self.notify(Notice::info(message));
    }

    fn notify_success(&self, message: &str) {
        self.notify(Notice::success(message));
    }

    fn notify_error(&self, message: &str) {
        self.notify(Notice::error(message));
    }
}

/// Writes notices to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => tracing::debug!(message = %notice.message, "notice"),
            NoticeLevel::Success => tracing::info!(message = %notice.message, "notice"),
            NoticeLevel::Error => tracing::warn!(message = %notice.message, "notice"),
        }
    }
}

/// Broadcasts notices to any number of subscribers.
///
/// Publishing with no active subscribers is a no-op.
#[derive(Clone)]
pub struct ChannelNotifier {
    sender: broadcast::Sender<Notice>,
}

impl ChannelNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        let _ = self.sender.send(notice);
    }
}

impl std::fmt::Debug for ChannelNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelNotifier")
            .field("receiver_count", &self.sender.receiver_count())
            .finish()
    }
}
