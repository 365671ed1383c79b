//! Messages that are shown to the user when tasks and events are kept in sync

use std::fmt::{Display, Error, Formatter};

/// How a notification should be displayed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Normal,
    /// Something the user asked for could not be done
    Destructive,
}

impl Default for Severity {
    fn default() -> Self {
        Self::Normal
    }
}

/// A toast-like message
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: &str, description: &str) -> Self {
        Self { title: title.to_string(), description: description.to_string(), severity: Severity::Normal }
    }

    pub fn destructive(title: &str, description: &str) -> Self {
        Self { title: title.to_string(), description: description.to_string(), severity: Severity::Destructive }
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self.severity {
            Severity::Normal => write!(f, "{}: {}", self.title, self.description),
            Severity::Destructive => write!(f, "(!) {}: {}", self.title, self.description),
        }
    }
}



/// Something that is able to show notifications to the user
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// A notifier that only logs notifications
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification.severity {
            Severity::Normal => log::info!("{}", notification),
            Severity::Destructive => log::warn!("{}", notification),
        }
    }
}

/// A notifier that keeps every notification it is given
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    notifications: Vec<Notification>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn last(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    pub fn clear(&mut self) {
        self.notifications.clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        log::info!("{}", notification);
        self.notifications.push(notification);
    }
}



/// See [`feedback_channel`]
pub type FeedbackSender = tokio::sync::watch::Sender<Option<Notification>>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = tokio::sync::watch::Receiver<Option<Notification>>;

/// Create a feeback channel, that can be used by a UI to display the latest notification
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    tokio::sync::watch::channel(None)
}

impl Notifier for FeedbackSender {
    fn notify(&mut self, notification: Notification) {
        log::info!("{}", notification);
        if self.send(Some(notification)).is_err() {
            log::debug!("Nobody is listening to notifications anymore");
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_channel_keeps_the_latest_notification() {
        let (mut sender, receiver) = feedback_channel();
        assert_eq!(*receiver.borrow(), None);

        sender.notify(Notification::new("first", "one"));
        sender.notify(Notification::destructive("second", "two"));

        let latest = receiver.borrow().clone().unwrap();
        assert_eq!(latest.title, "second");
        assert!(latest.is_destructive());
    }

    #[test]
    fn display() {
        assert_eq!(Notification::new("Task Deleted", "gone").to_string(), "Task Deleted: gone");
        assert_eq!(Notification::destructive("Oops", "no").to_string(), "(!) Oops: no");
    }
}
