//! Enrollment workflow
//!
//! Captures three scans of the same finger, merges them into one template,
//! screens it against every stored enrollment and persists the result.
//! The store stays untouched unless every step succeeded and no duplicate
//! was found.

use std::fmt;
use std::time::Duration;

use tracing::{info, warn};

use fplock_core::BufferSlot;
use fplock_transport::SensorChannel;
use fplock_types::{EnrollmentRecord, NoticeKind, Template};

use crate::{
    cancel::CancelToken,
    config::EnrollConfig,
    error::Error,
    notify::Notifier,
    sensor::{LoadedSlot, Sensor},
    store::TemplateStore,
    workflow::{idle, matching, wait_for_finger},
};

/// Where an enrollment session gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentStep {
    /// Capture and generate for scan 1..=3
    Scan(u8),
    /// Merging the three scan buffers
    Merge,
    /// Transferring the merged template off the module
    Upload,
    /// Screening against stored enrollments
    DuplicateCheck,
    /// Writing the record to the store
    Persist,
}

impl EnrollmentStep {
    /// Short operator-facing message for a failure at this step
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Scan(_) => "Fingerprint unreadable",
            Self::Merge | Self::Upload | Self::DuplicateCheck => "Enrollment failed",
            Self::Persist => "Enrollment could not be saved",
        }
    }
}

impl fmt::Display for EnrollmentStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scan(step) => write!(f, "scan {step} of 3"),
            Self::Merge => f.write_str("merge"),
            Self::Upload => f.write_str("upload"),
            Self::DuplicateCheck => f.write_str("duplicate check"),
            Self::Persist => f.write_str("persist"),
        }
    }
}

/// Terminal state of one enrollment session.
#[derive(Debug)]
pub enum EnrollmentOutcome {
    /// Template captured and stored
    Persisted(EnrollmentRecord),
    /// The live finger already belongs to `existing`; nothing was stored
    Duplicate { existing: String },
    /// A step failed; the store is untouched
    Failed { step: EnrollmentStep, error: Error },
    /// Cancelled before completion; the store is untouched
    Cancelled,
}

impl EnrollmentOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted(_))
    }
}

/// One enrollment session over an exclusively borrowed sensor.
///
/// The session is operator-paced: each scan waits for the finger to lift
/// and press again, with no upper bound. Cancel the token to abandon it.
pub struct EnrollmentWorkflow<'a, C> {
    sensor: &'a mut Sensor<C>,
    store: &'a dyn TemplateStore,
    notifier: &'a dyn Notifier,
    config: &'a EnrollConfig,
}

impl<'a, C: SensorChannel> EnrollmentWorkflow<'a, C> {
    pub fn new(
        sensor: &'a mut Sensor<C>,
        store: &'a dyn TemplateStore,
        notifier: &'a dyn Notifier,
        config: &'a EnrollConfig,
    ) -> Self {
        Self {
            sensor,
            store,
            notifier,
            config,
        }
    }

    /// Run the session to its terminal state.
    ///
    /// Never leaves a partial record behind: the insert happens last, and
    /// only after the duplicate screen came back clean.
    pub async fn run(mut self, identity: impl Into<String>, cancel: &CancelToken) -> EnrollmentOutcome {
        let identity = identity.into();
        info!(identity = %identity, "Enrollment started");

        match self.execute(&identity, cancel).await {
            Ok(outcome) => outcome,
            Err((_, error)) if error.is_cancelled() => {
                self.notifier.hide();
                info!(identity = %identity, "Enrollment cancelled");
                EnrollmentOutcome::Cancelled
            }
            Err((step, error)) => {
                self.notifier.show(
                    step.failure_message(),
                    NoticeKind::Error,
                    Some(Duration::from_secs(3)),
                );
                warn!(identity = %identity, step = %step, %error, "Enrollment failed");
                EnrollmentOutcome::Failed { step, error }
            }
        }
    }

    async fn execute(
        &mut self,
        identity: &str,
        cancel: &CancelToken,
    ) -> Result<EnrollmentOutcome, (EnrollmentStep, Error)> {
        let first = self.capture_scan(1, BufferSlot::Primary, cancel).await?;
        let second = self.capture_scan(2, BufferSlot::Secondary, cancel).await?;
        let third = self.capture_scan(3, BufferSlot::Tertiary, cancel).await?;

        let merged = self
            .sensor
            .merge_scans([first, second, third])
            .await
            .map_err(|error| (EnrollmentStep::Merge, error))?;

        let template = self
            .sensor
            .upload(&merged)
            .await
            .map_err(|error| (EnrollmentStep::Upload, error))?;

        if let Some(existing) = self.screen_for_duplicate(&template).await? {
            self.notifier.show(
                "Duplicate fingerprint found",
                NoticeKind::Error,
                Some(Duration::from_secs(3)),
            );
            warn!(identity, existing = %existing, "Enrollment rejected as duplicate");
            return Ok(EnrollmentOutcome::Duplicate { existing });
        }

        let record = EnrollmentRecord::new(identity, template);
        self.store
            .insert(record.clone())
            .await
            .map_err(|error| (EnrollmentStep::Persist, Error::Store(error)))?;

        self.notifier.show(
            "Enrollment complete",
            NoticeKind::Success,
            Some(Duration::from_secs(3)),
        );
        info!(identity, "Enrollment persisted");

        Ok(EnrollmentOutcome::Persisted(record))
    }

    /// One scan: wait for a fresh placement, capture, generate into `slot`.
    async fn capture_scan(
        &mut self,
        step: u8,
        slot: BufferSlot,
        cancel: &CancelToken,
    ) -> Result<LoadedSlot, (EnrollmentStep, Error)> {
        let stage = EnrollmentStep::Scan(step);

        self.notifier.show(
            &format!("Scan {step} of 3: place your finger"),
            NoticeKind::Info,
            None,
        );

        wait_for_finger(self.sensor, cancel, self.config.finger_poll, false)
            .await
            .map_err(|error| (stage, error))?;
        wait_for_finger(self.sensor, cancel, self.config.finger_poll, true)
            .await
            .map_err(|error| (stage, error))?;

        self.sensor
            .capture_image()
            .await
            .map_err(|error| (stage, error))?;
        let loaded = self
            .sensor
            .generate(slot)
            .await
            .map_err(|error| (stage, error))?;

        info!(step, slot = %slot, "Scan captured");
        self.notifier.show(
            &format!("Scan {step} captured, lift your finger"),
            NoticeKind::Success,
            Some(self.config.lift_pause),
        );
        idle(cancel, self.config.lift_pause)
            .await
            .map_err(|error| (stage, error))?;

        Ok(loaded)
    }

    /// Match the freshly captured template against every stored one.
    ///
    /// The upload may have disturbed the module's buffers, so the template
    /// is first downloaded back into the primary slot. An empty store
    /// skips the screen entirely.
    async fn screen_for_duplicate(
        &mut self,
        template: &Template,
    ) -> Result<Option<String>, (EnrollmentStep, Error)> {
        let known = self
            .store
            .all()
            .await
            .map_err(|error| (EnrollmentStep::DuplicateCheck, Error::Store(error)))?;

        if known.is_empty() {
            return Ok(None);
        }

        let live = self
            .sensor
            .download(BufferSlot::Primary, template)
            .await
            .map_err(|error| (EnrollmentStep::DuplicateCheck, error))?;

        let hit = matching::find_first_match(self.sensor, &live, &known)
            .await
            .map_err(|error| (EnrollmentStep::DuplicateCheck, error))?;

        Ok(hit.map(|record| record.identity.clone()))
    }
}
