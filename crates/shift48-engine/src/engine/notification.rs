use std::{collections::VecDeque, time::Duration};

/// Transient display event, stamped on the session clock.
///
/// Notifications expire by elapsed time only; nothing removes them
/// explicitly. The renderer reads pending entries through the session
/// snapshot and never mutates the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub created_at: Duration,
    pub duration: Duration,
}

impl Notification {
    #[must_use]
    pub fn is_expired(&self, now: Duration) -> bool {
        now >= self.created_at + self.duration
    }
}

/// FIFO of pending notifications.
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    pending: VecDeque<Notification>,
}

impl NotificationQueue {
    /// How long a notification stays on screen.
    pub const DISPLAY_DURATION: Duration = Duration::from_secs(3);

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, now: Duration) {
        self.pending.push_back(Notification {
            text: text.into(),
            created_at: now,
            duration: Self::DISPLAY_DURATION,
        });
    }

    /// Removes and returns every expired notification. Entries are created
    /// in clock order with a uniform duration, so the expired ones always
    /// form a prefix of the queue.
    pub fn expire(&mut self, now: Duration) -> Vec<Notification> {
        let mut expired = Vec::new();
        while self
            .pending
            .front()
            .is_some_and(|notification| notification.is_expired(now))
        {
            if let Some(notification) = self.pending.pop_front() {
                expired.push(notification);
            }
        }
        expired
    }

    pub fn pending(&self) -> impl Iterator<Item = &Notification> {
        self.pending.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
