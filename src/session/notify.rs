//! Notification port: User-visible transient messages.

/// Visual treatment of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotificationVariant {
    /// Informational.
    #[default]
    Default,
    /// Something went wrong.
    Destructive,
}

/// A transient, user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Short headline.
    pub title: String,
    /// Body text.
    pub description: String,
    /// Visual treatment.
    pub variant: NotificationVariant,
}

impl Notification {
    /// Headline used for connection failures.
    pub const ERROR_TITLE: &'static str = "🚨Oops...";

    /// Build the notification shown when the connection fails.
    pub fn connection_error(description: impl Into<String>) -> Self {
        Self {
            title: Self::ERROR_TITLE.to_string(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }
}

/// Receiver of user-visible notifications (a toast area, a status line).
pub trait Notifier {
    /// Surface a notification to the user.
    fn notify(&mut self, notification: Notification);
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, _notification: Notification) {}
}

/// Writes notifications to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification.variant {
            NotificationVariant::Destructive => {
                tracing::error!(title = %notification.title, "{}", notification.description);
            }
            NotificationVariant::Default => {
                tracing::info!(title = %notification.title, "{}", notification.description);
            }
        }
    }
}

impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, notification: Notification) {
        (**self).notify(notification);
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&mut self, notification: Notification) {
        (**self).notify(notification);
    }
}
