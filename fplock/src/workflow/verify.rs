//! Verification loop
//!
//! The steady-state activity of the device: wait for a finger, capture,
//! match against every enrollment, open the door on the first hit. Runs
//! as a background task owning the sensor and hands it back when the
//! cancellation token fires.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use fplock_core::BufferSlot;
use fplock_transport::SensorChannel;
use fplock_types::NoticeKind;

use crate::{
    actuate::Actuator,
    cancel::CancelToken,
    config::VerifyConfig,
    error::Result,
    notify::Notifier,
    sensor::{LoadedSlot, Sensor},
    store::TemplateStore,
    workflow::{idle, matching, wait_for_finger},
};

/// Continuous scan-and-match loop.
pub struct VerificationWorkflow<C> {
    sensor: Sensor<C>,
    store: Arc<dyn TemplateStore>,
    actuator: Arc<dyn Actuator>,
    notifier: Arc<dyn Notifier>,
    config: VerifyConfig,
}

impl<C: SensorChannel> VerificationWorkflow<C> {
    pub fn new(
        sensor: Sensor<C>,
        store: Arc<dyn TemplateStore>,
        actuator: Arc<dyn Actuator>,
        notifier: Arc<dyn Notifier>,
        config: VerifyConfig,
    ) -> Self {
        Self {
            sensor,
            store,
            actuator,
            notifier,
            config,
        }
    }

    /// Run until the token fires, then give the sensor back.
    ///
    /// Faults never end the loop: a failed attempt is logged, reported
    /// through the notifier and retried after a short pause. Only
    /// cancellation exits.
    pub async fn run(mut self, cancel: CancelToken) -> Sensor<C> {
        info!("Verification loop running");

        loop {
            match self.attempt(&cancel).await {
                Ok(Some(_)) => {
                    // settle so the same placement does not re-trigger
                    if idle(&cancel, self.config.settle_after_match).await.is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(error) if error.is_cancelled() => break,
                Err(error) => {
                    warn!(%error, "Verification attempt failed");
                    self.notifier.show(
                        "Try again",
                        NoticeKind::Error,
                        Some(Duration::from_secs(2)),
                    );
                    if idle(&cancel, self.config.finger_poll).await.is_err() {
                        break;
                    }
                }
            }
        }

        info!("Verification loop stopped");
        self.sensor
    }

    /// One pass: fresh placement, capture, candidate scan, actuation.
    ///
    /// `Ok(Some(identity))` means the door was opened for that identity.
    /// An unreadable capture reports to the operator and yields
    /// `Ok(None)`; so does an empty or unreachable store.
    pub(crate) async fn attempt(&mut self, cancel: &CancelToken) -> Result<Option<String>> {
        wait_for_finger(&mut self.sensor, cancel, self.config.finger_poll, false).await?;
        wait_for_finger(&mut self.sensor, cancel, self.config.finger_poll, true).await?;

        let live = match self.capture_live().await {
            Ok(live) => live,
            Err(error) => {
                warn!(%error, "Live capture failed");
                self.notifier.show(
                    "Fingerprint unreadable",
                    NoticeKind::Error,
                    Some(Duration::from_secs(2)),
                );
                return Ok(None);
            }
        };

        let candidates = match self.store.all().await {
            Ok(records) => records,
            Err(error) => {
                warn!(%error, "Store unavailable, matching against nothing");
                Vec::new()
            }
        };
        if candidates.is_empty() {
            debug!("No enrollments to match against");
            return Ok(None);
        }

        match matching::find_first_match(&mut self.sensor, &live, &candidates).await? {
            Some(record) => {
                info!(identity = %record.identity, "Access granted");
                self.actuator.trigger_open(&record.identity).await;
                self.actuator.log_access(&record.identity).await;
                self.notifier.show(
                    &format!("Welcome, {}", record.identity),
                    NoticeKind::Success,
                    Some(Duration::from_secs(5)),
                );
                Ok(Some(record.identity.clone()))
            }
            None => {
                info!("No match for live scan");
                self.notifier.show(
                    "No match found",
                    NoticeKind::Error,
                    Some(Duration::from_secs(2)),
                );
                Ok(None)
            }
        }
    }

    async fn capture_live(&mut self) -> Result<LoadedSlot> {
        self.sensor.capture_image().await?;
        self.sensor.generate(BufferSlot::Primary).await
    }
}
