//src/notification.rs
use std::fmt;
use std::time::{Duration, Instant};

/// How long a notification stays open before it closes itself.
pub const AUTO_HIDE_AFTER: Duration = Duration::from_secs(6);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Notification {
    pub open: bool,
    pub message: String,
    pub severity: Severity,
}

/// Single-slot message area. A new notification always replaces the old one
/// and re-arms the auto-hide deadline.
#[derive(Clone, Debug, Default)]
pub struct NotificationChannel {
    current: Notification,
    hide_at: Option<Instant>,
}

impl NotificationChannel {
    pub fn current(&self) -> &Notification {
        &self.current
    }

    pub fn is_open(&self) -> bool {
        self.current.open
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.current = Notification {
            open: true,
            message: message.into(),
            severity,
        };
        self.hide_at = Some(now + AUTO_HIDE_AFTER);
    }

    /// Closes the notification but keeps its text until the next `notify`.
    pub fn dismiss(&mut self) {
        self.current.open = false;
        self.hide_at = None;
    }

    /// Applies the auto-hide deadline. Returns `true` if the notification
    /// closed on this tick.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.dismiss();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        let channel = NotificationChannel::default();
        assert!(!channel.is_open());
        assert_eq!(channel.current().severity, Severity::Success);
        assert!(channel.current().message.is_empty());
    }

    #[test]
    fn test_auto_hide_after_six_seconds() {
        let start = Instant::now();
        let mut channel = NotificationChannel::default();
        channel.notify("Workout added successfully!", Severity::Success, start);

        assert!(!channel.tick(start + Duration::from_secs(5)));
        assert!(channel.is_open());

        assert!(channel.tick(start + AUTO_HIDE_AFTER));
        assert!(!channel.is_open());
        assert_eq!(channel.current().message, "Workout added successfully!");

        // Already closed, nothing more to fire
        assert!(!channel.tick(start + Duration::from_secs(60)));
    }

    #[test]
    fn test_replacing_rearms_the_deadline() {
        let start = Instant::now();
        let mut channel = NotificationChannel::default();
        channel.notify("first", Severity::Success, start);
        channel.notify("second", Severity::Error, start + Duration::from_secs(4));

        assert!(!channel.tick(start + Duration::from_secs(7)));
        assert_eq!(channel.current().message, "second");
        assert_eq!(channel.current().severity, Severity::Error);
        assert!(channel.tick(start + Duration::from_secs(10)));
    }

    #[test]
    fn test_dismiss_cancels_pending_hide() {
        let start = Instant::now();
        let mut channel = NotificationChannel::default();
        channel.notify("Error deleting workout", Severity::Error, start);
        channel.dismiss();

        assert!(!channel.is_open());
        assert_eq!(channel.current().message, "Error deleting workout");
        assert!(!channel.tick(start + AUTO_HIDE_AFTER));
    }
}
