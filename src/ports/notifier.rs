//! User-visible transient notifications.

use std::fmt;

/// A success or failure signal shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Something the user asked for worked.
    Success(String),
    /// Something failed; carries the best available message.
    Error(String),
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(msg) => write!(f, "✓ {msg}"),
            Self::Error(msg) => write!(f, "✗ {msg}"),
        }
    }
}

/// Receives notifications emitted by the view.
pub trait Notifier: Send + Sync {
    /// Show a notification.
    fn notify(&self, notification: Notification);
}
