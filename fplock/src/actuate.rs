//! Door-side effects
//!
//! The verification workflow reports a granted access through an
//! [`Actuator`]. Actuation is fire-and-forget: by the time the relay is
//! asked to move, the match has already been decided, so hardware trouble
//! is the implementation's to log rather than a workflow error.

use async_trait::async_trait;
use tracing::info;

/// Hardware that grants entry (relay, strike plate, turnstile).
#[async_trait]
pub trait Actuator: Send + Sync {
    /// Fire the unlock action once
    async fn trigger_open(&self, identity: &str);

    /// Record a granted access; the default does nothing
    async fn log_access(&self, identity: &str) {
        let _ = identity;
    }
}

/// Actuator that only logs, for setups without a wired relay.
#[derive(Debug, Default)]
pub struct LogActuator;

#[async_trait]
impl Actuator for LogActuator {
    async fn trigger_open(&self, identity: &str) {
        info!(identity, "Access granted, door open");
    }
}
