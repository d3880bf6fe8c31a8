use std::time::{Duration, Instant};

pub const NOTIFICATION_TTL: Duration = Duration::from_millis(3500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NotificationKind::Error,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NotificationKind::Info,
        }
    }
}

/// Single-slot transient banner. A new notification replaces the pending one
/// and gets its own full lifetime.
#[derive(Debug, Clone)]
pub struct Toast {
    current: Option<(Notification, Instant)>,
    ttl: Duration,
}

impl Default for Toast {
    fn default() -> Self {
        Self::with_ttl(NOTIFICATION_TTL)
    }
}

impl Toast {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn show(&mut self, notification: Notification, now: Instant) {
        self.current = Some((notification, now));
    }

    pub fn current(&self, now: Instant) -> Option<&Notification> {
        match &self.current {
            Some((notification, shown_at)) if now.saturating_duration_since(*shown_at) < self.ttl => {
                Some(notification)
            }
            _ => None,
        }
    }

    /// Time left before the visible notification disappears.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let (_, shown_at) = self.current.as_ref()?;
        let elapsed = now.saturating_duration_since(*shown_at);
        (elapsed < self.ttl).then(|| self.ttl - elapsed)
    }

    pub fn expire(&mut self, now: Instant) {
        if self.current(now).is_none() {
            self.current = None;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_is_visible_until_ttl_elapses() {
        let start = Instant::now();
        let mut toast = Toast::default();
        toast.show(Notification::error("offline"), start);

        assert_eq!(
            toast.current(start + Duration::from_millis(3499)),
            Some(&Notification::error("offline"))
        );
        assert!(toast.current(start + NOTIFICATION_TTL).is_none());

        toast.expire(start + NOTIFICATION_TTL);
        assert!(toast.is_empty());
    }

    #[test]
    fn replacing_a_notification_restarts_the_timer() {
        let start = Instant::now();
        let mut toast = Toast::default();
        toast.show(Notification::error("first"), start);

        let replaced_at = start + Duration::from_secs(3);
        toast.show(Notification::info("second"), replaced_at);

        let after_first_deadline = start + Duration::from_secs(4);
        assert_eq!(
            toast.current(after_first_deadline).map(|n| n.text.as_str()),
            Some("second")
        );
        assert_eq!(
            toast.remaining(after_first_deadline),
            Some(Duration::from_millis(2500))
        );
        assert!(toast.current(replaced_at + NOTIFICATION_TTL).is_none());
    }

    #[test]
    fn expire_keeps_a_live_notification() {
        let start = Instant::now();
        let mut toast = Toast::with_ttl(Duration::from_secs(1));
        toast.show(Notification::info("saved"), start);

        toast.expire(start + Duration::from_millis(500));
        assert!(!toast.is_empty());
        assert!(toast.remaining(start + Duration::from_secs(2)).is_none());
    }
}
