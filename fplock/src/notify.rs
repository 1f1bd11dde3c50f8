//! Operator feedback
//!
//! Workflows narrate what they need from the person at the sensor
//! ("place your finger", "lift your finger") through a [`Notifier`]. The
//! trait is synchronous and must not block; a display that needs IO
//! should queue the notice and render elsewhere.

use std::time::Duration;

use tracing::{info, warn};

use fplock_types::NoticeKind;

/// Sink for user-facing notices (display, buzzer, LED ring).
pub trait Notifier: Send + Sync {
    /// Show `message`. `duration` is a display hint: `Some` asks the sink
    /// to clear the notice after that long, `None` leaves it up until the
    /// next notice or an explicit [`hide`](Self::hide).
    fn show(&self, message: &str, kind: NoticeKind, duration: Option<Duration>);

    /// Clear whatever is currently showing
    fn hide(&self) {}
}

/// Notifier that writes every notice to the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show(&self, message: &str, kind: NoticeKind, _duration: Option<Duration>) {
        match kind {
            NoticeKind::Info | NoticeKind::Success => info!("{message}"),
            NoticeKind::Error => warn!("{message}"),
        }
    }
}

/// Notifier that drops every notice, for headless deployments.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn show(&self, _message: &str, _kind: NoticeKind, _duration: Option<Duration>) {}
}
