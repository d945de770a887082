//! Terminal notifier for the CLI.

use crate::ports::notifier::{Notification, Notifier};

/// Prints notifications to stderr, keeping stdout for the image reference.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        eprintln!("{notification}");
    }
}
