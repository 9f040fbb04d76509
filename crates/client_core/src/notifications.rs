//! Transient, self-dismissing error notifications.

use std::time::{Duration, Instant};

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub raised_at: Instant,
}

/// Stack of visible notifications. Identical messages are not merged; each
/// entry expires on its own.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    ttl: Duration,
    next_id: u64,
    active: Vec<Notification>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            next_id: 1,
            active: Vec::new(),
        }
    }

    pub fn push(&mut self, message: impl Into<String>) -> u64 {
        self.push_at(message, Instant::now())
    }

    pub fn push_at(&mut self, message: impl Into<String>, raised_at: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.active.push(Notification {
            id,
            message: message.into(),
            raised_at,
        });
        id
    }

    /// Drops every notification at least `ttl` old; returns how many went.
    pub fn dismiss_expired(&mut self, now: Instant) -> usize {
        let before = self.active.len();
        let ttl = self.ttl;
        self.active
            .retain(|notification| now.saturating_duration_since(notification.raised_at) < ttl);
        before - self.active.len()
    }

    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_messages_stack() {
        let mut center = NotificationCenter::default();
        let first = center.push("Chyba při generování receptů.");
        let second = center.push("Chyba při generování receptů.");
        assert_ne!(first, second);
        assert_eq!(center.len(), 2);
    }

    #[test]
    fn each_notification_expires_independently() {
        let start = Instant::now();
        let mut center = NotificationCenter::new(Duration::from_secs(5));
        center.push_at("first", start);
        center.push_at("second", start + Duration::from_secs(3));

        assert_eq!(center.dismiss_expired(start + Duration::from_millis(4_999)), 0);
        assert_eq!(center.dismiss_expired(start + Duration::from_secs(5)), 1);
        assert_eq!(center.active()[0].message, "second");
        assert_eq!(center.dismiss_expired(start + Duration::from_secs(8)), 1);
        assert!(center.is_empty());
    }
}
