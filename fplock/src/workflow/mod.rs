//! Access workflows
//!
//! Two state machines drive the sensor: [`EnrollmentWorkflow`] captures a
//! new identity, [`VerificationWorkflow`] matches live scans against the
//! store in a continuous loop. Both are operator-paced where they wait on
//! a finger and check cancellation on every polling iteration.

mod enroll;
mod matching;
mod verify;

pub use enroll::{EnrollmentOutcome, EnrollmentStep, EnrollmentWorkflow};
pub use verify::VerificationWorkflow;

use std::time::Duration;

use tokio::time::sleep;

use fplock_transport::SensorChannel;

use crate::{
    cancel::CancelToken,
    error::{Error, Result},
    sensor::Sensor,
};

/// Poll until the finger state matches `want_present`.
///
/// Unbounded on purpose: the operator decides when to place or lift a
/// finger. Cancellation is checked before every poll and during every
/// pause, so a hand-off never waits on a finger.
pub(crate) async fn wait_for_finger<C: SensorChannel>(
    sensor: &mut Sensor<C>,
    cancel: &CancelToken,
    poll: Duration,
    want_present: bool,
) -> Result<()> {
    loop {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        if sensor.finger_present().await? == want_present {
            return Ok(());
        }
        idle(cancel, poll).await?;
    }
}

/// Pause for `pause`, waking early with `Cancelled` if the token fires.
pub(crate) async fn idle(cancel: &CancelToken, pause: Duration) -> Result<()> {
    tokio::select! {
        _ = cancel.cancelled() => Err(Error::Cancelled),
        _ = sleep(pause) => Ok(()),
    }
}
