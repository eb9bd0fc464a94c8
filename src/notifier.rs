use strum::Display;
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Banners sharing a key replace each other, so at most one banner per key is ever visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum NotificationKey {
    #[strum(to_string = "load-playlists-error")]
    LoadError,
    #[strum(to_string = "auth-error")]
    AuthError,
    #[strum(to_string = "create-playlist-success")]
    CreatePlaylistSuccess,
    #[strum(to_string = "save-playlist-error")]
    SavePlaylistError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub key: NotificationKey,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
}

impl Notification {
    pub fn success(
        key: NotificationKey,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: NotificationKind::Success,
            key,
            title: title.into(),
            message: message.into(),
            link: None,
        }
    }

    pub fn error(
        key: NotificationKey,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: NotificationKind::Error,
            key,
            title: title.into(),
            message: message.into(),
            link: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// Anything that can show a notification to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Forwards notifications to the main loop, which hands them to the notification sink.
pub struct ActionNotifier {
    action_tx: UnboundedSender<Action>,
}

impl ActionNotifier {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self { action_tx }
    }
}

impl Notifier for ActionNotifier {
    fn notify(&self, notification: Notification) {
        if self.action_tx.send(Action::Notify(notification)).is_err() {
            tracing::error!("Action channel closed, dropping notification");
        }
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::{Notification, Notifier};

    /// Keeps every notification it receives.
    #[derive(Default)]
    pub struct RecordingNotifier {
        received: Mutex<Vec<Notification>>,
    }

    impl RecordingNotifier {
        pub fn take(&self) -> Vec<Notification> {
            std::mem::take(&mut *self.received.lock().unwrap())
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.received.lock().unwrap().push(notification);
        }
    }
}
