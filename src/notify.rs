//! Transient notifications
//!
//! A bounded queue of timed messages reporting the outcome of user actions.
//! The queue never touches task state; callers pass the current instant so
//! expiry is deterministic under test.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::NotificationsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            title: "Success".to_string(),
            description: description.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.into(),
            severity: Severity::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Fire-and-forget receiver of notifications.
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// Collects notifications in order; used by the command surface.
impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

#[derive(Debug, Clone)]
struct Queued {
    notification: Notification,
    expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct NotificationQueue {
    entries: VecDeque<Queued>,
    limit: usize,
    timeout: Duration,
}

impl NotificationQueue {
    pub fn new(limit: usize, timeout: Duration) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit: limit.max(1),
            timeout,
        }
    }

    pub fn from_config(config: &NotificationsConfig) -> Self {
        Self::new(config.limit, Duration::from_millis(config.timeout_ms))
    }

    /// Enqueue a message; the oldest one is dropped when the queue is full.
    pub fn push(&mut self, notification: Notification, now: Instant) {
        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(Queued {
            notification,
            expires_at: now + self.timeout,
        });
    }

    /// Drop expired messages. Returns true if anything was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.expires_at > now);
        self.entries.len() != before
    }

    /// Visible messages, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().map(|entry| &entry.notification)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sink adapter stamping each message with a fixed instant.
pub struct QueueSink<'a> {
    queue: &'a mut NotificationQueue,
    now: Instant,
}

impl<'a> QueueSink<'a> {
    pub fn new(queue: &'a mut NotificationQueue, now: Instant) -> Self {
        Self { queue, now }
    }
}

impl NotificationSink for QueueSink<'_> {
    fn notify(&mut self, notification: Notification) {
        self.queue.push(notification, self.now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_drops_oldest_at_limit() {
        let mut queue = NotificationQueue::new(2, Duration::from_secs(5));
        let now = Instant::now();
        queue.push(Notification::success("one"), now);
        queue.push(Notification::success("two"), now);
        queue.push(Notification::error("three"), now);

        let descriptions: Vec<_> = queue.visible().map(|n| n.description.as_str()).collect();
        assert_eq!(descriptions, vec!["two", "three"]);
    }

    #[test]
    fn expire_removes_only_stale_messages() {
        let mut queue = NotificationQueue::new(3, Duration::from_millis(100));
        let start = Instant::now();
        queue.push(Notification::success("early"), start);
        queue.push(Notification::success("late"), start + Duration::from_millis(80));

        assert!(!queue.expire(start + Duration::from_millis(50)));
        assert!(queue.expire(start + Duration::from_millis(120)));
        let left: Vec<_> = queue.visible().map(|n| n.description.as_str()).collect();
        assert_eq!(left, vec!["late"]);

        assert!(queue.expire(start + Duration::from_millis(200)));
        assert!(queue.is_empty());
    }

    #[test]
    fn queue_sink_forwards_messages() {
        let mut queue = NotificationQueue::new(3, Duration::from_secs(1));
        let mut sink = QueueSink::new(&mut queue, Instant::now());
        sink.notify(Notification::error("Task description cannot be empty"));
        assert_eq!(queue.len(), 1);
        assert!(queue.visible().all(Notification::is_error));
    }

    #[test]
    fn zero_limit_is_clamped() {
        let mut queue = NotificationQueue::new(0, Duration::from_secs(1));
        queue.push(Notification::success("kept"), Instant::now());
        assert_eq!(queue.len(), 1);
    }
}
