//! Candidate scanning shared by enrollment and verification

use tracing::{debug, trace};

use fplock_core::BufferSlot;
use fplock_transport::SensorChannel;
use fplock_types::EnrollmentRecord;

use crate::{
    error::Result,
    sensor::{LoadedSlot, Sensor},
};

/// Match the live template against each candidate in order, stopping at
/// the first hit.
///
/// Every candidate costs one template download into the secondary buffer
/// plus one match command, so callers keep the candidate list in priority
/// order. Errors abort the scan; the caller decides whether the attempt
/// or the session ends.
pub(crate) async fn find_first_match<'r, C: SensorChannel>(
    sensor: &mut Sensor<C>,
    live: &LoadedSlot,
    candidates: &'r [EnrollmentRecord],
) -> Result<Option<&'r EnrollmentRecord>> {
    for record in candidates {
        let candidate = sensor
            .download(BufferSlot::Secondary, &record.template)
            .await?;

        if sensor.match_templates(live, &candidate).await? {
            debug!(identity = %record.identity, "Candidate matched");
            return Ok(Some(record));
        }

        trace!(identity = %record.identity, "Candidate did not match");
    }

    Ok(None)
}
