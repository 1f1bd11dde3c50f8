//! Channel ownership and workflow hand-off
//!
//! One physical channel, one conversation at a time. [`AccessEngine`]
//! keeps the verification loop running as the background owner of the
//! sensor and brokers the hand-off when an enrollment needs the channel:
//! cancel the loop, wait for it to hand the sensor back (bounded by a
//! grace period), run the enrollment exclusively, restart the loop.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use fplock_transport::SensorChannel;

use crate::{
    actuate::Actuator,
    cancel::CancelToken,
    config::EngineConfig,
    error::{Error, Result},
    notify::Notifier,
    sensor::Sensor,
    store::TemplateStore,
    workflow::{EnrollmentOutcome, EnrollmentWorkflow, VerificationWorkflow},
};

struct RunningVerifier<C> {
    cancel: CancelToken,
    handle: JoinHandle<Sensor<C>>,
}

/// Owner of the sensor's background verification task.
///
/// Dropping the engine detaches the verification task without stopping
/// it; call [`shutdown`](Self::shutdown) to stop cleanly and reclaim the
/// sensor.
pub struct AccessEngine<C: SensorChannel + 'static> {
    verifier: Option<RunningVerifier<C>>,
    store: Arc<dyn TemplateStore>,
    actuator: Arc<dyn Actuator>,
    notifier: Arc<dyn Notifier>,
    config: EngineConfig,
}

impl<C: SensorChannel + 'static> AccessEngine<C> {
    /// Spawn the verification loop and hand it the sensor.
    pub fn start(
        sensor: Sensor<C>,
        store: Arc<dyn TemplateStore>,
        actuator: Arc<dyn Actuator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::start_with_config(sensor, store, actuator, notifier, EngineConfig::default())
    }

    /// Spawn the verification loop with explicit configuration.
    pub fn start_with_config(
        sensor: Sensor<C>,
        store: Arc<dyn TemplateStore>,
        actuator: Arc<dyn Actuator>,
        notifier: Arc<dyn Notifier>,
        config: EngineConfig,
    ) -> Self {
        let mut engine = Self {
            verifier: None,
            store,
            actuator,
            notifier,
            config,
        };
        engine.spawn_verifier(sensor);
        engine
    }

    /// Whether the background verification task is alive
    pub fn is_verifying(&self) -> bool {
        self.verifier
            .as_ref()
            .is_some_and(|running| !running.handle.is_finished())
    }

    /// Enroll `identity`, suspending verification for the duration.
    ///
    /// The verification loop is always restarted afterwards, whatever the
    /// session's outcome. Errors here are hand-off failures; everything
    /// that happens inside the session itself is reported through the
    /// returned [`EnrollmentOutcome`].
    pub async fn enroll(&mut self, identity: impl Into<String>) -> Result<EnrollmentOutcome> {
        let identity = identity.into();
        info!(identity = %identity, "Enrollment requested");

        let mut sensor = self.reclaim().await?;

        let cancel = CancelToken::new();
        let outcome = EnrollmentWorkflow::new(
            &mut sensor,
            self.store.as_ref(),
            self.notifier.as_ref(),
            &self.config.enroll,
        )
        .run(identity, &cancel)
        .await;

        self.spawn_verifier(sensor);

        Ok(outcome)
    }

    /// Stop the verification loop and take the sensor back.
    pub async fn shutdown(mut self) -> Result<Sensor<C>> {
        info!("Engine shutting down");
        self.reclaim().await
    }

    /// Cancel the verifier and wait for it to hand the sensor over.
    async fn reclaim(&mut self) -> Result<Sensor<C>> {
        let mut running = self.verifier.take().ok_or(Error::ChannelLost)?;
        running.cancel.cancel();
        debug!("Waiting for the verification loop to release the channel");

        match timeout(self.config.handoff_grace, &mut running.handle).await {
            Ok(Ok(sensor)) => Ok(sensor),
            Ok(Err(join_error)) => {
                warn!(%join_error, "Verification task died; channel is gone");
                Err(Error::ChannelLost)
            }
            Err(_elapsed) => {
                // The loop is stuck mid-read; keep the handle so a later
                // call can collect the sensor once it comes up for air.
                let grace = self.config.handoff_grace;
                self.verifier = Some(running);
                Err(Error::HandoffTimeout { grace })
            }
        }
    }

    fn spawn_verifier(&mut self, sensor: Sensor<C>) {
        let cancel = CancelToken::new();
        let workflow = VerificationWorkflow::new(
            sensor,
            Arc::clone(&self.store),
            Arc::clone(&self.actuator),
            Arc::clone(&self.notifier),
            self.config.verify.clone(),
        );

        let handle = tokio::spawn(workflow.run(cancel.clone()));
        self.verifier = Some(RunningVerifier { cancel, handle });

        debug!("Verification task spawned");
    }
}
