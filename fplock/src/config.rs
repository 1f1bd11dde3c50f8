//! Engine configuration
//!
//! Plain structs with defaults matching the module's observed timing. All
//! durations are overridable; the protocol deadlines live in
//! [`SensorConfig`], the human-paced intervals in the workflow configs.

use std::time::Duration;

use fplock_core::constants::{DEFAULT_POLL_INTERVAL, DEFAULT_READ_DEADLINE};

/// Timing for a single response read.
#[derive(Debug, Clone)]
pub struct SensorConfig {
    /// Hard deadline for one expected frame
    pub read_deadline: Duration,

    /// Interval between byte-availability polls
    pub poll_interval: Duration,
}

impl SensorConfig {
    /// Set the response read deadline
    pub fn with_read_deadline(mut self, deadline: Duration) -> Self {
        self.read_deadline = deadline;
        self
    }

    /// Set the availability poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            read_deadline: DEFAULT_READ_DEADLINE,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Timing for the enrollment workflow.
#[derive(Debug, Clone)]
pub struct EnrollConfig {
    /// Interval between finger-presence polls (operator-paced, unbounded)
    pub finger_poll: Duration,

    /// Pause after a captured scan, giving the operator time to lift
    pub lift_pause: Duration,
}

impl Default for EnrollConfig {
    fn default() -> Self {
        Self {
            finger_poll: Duration::from_millis(100),
            lift_pause: Duration::from_secs(1),
        }
    }
}

/// Timing for the verification loop.
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Interval between finger-presence polls
    pub finger_poll: Duration,

    /// Delay after a successful match before re-arming, so the finger
    /// still resting on the sensor does not re-trigger the door
    pub settle_after_match: Duration,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            finger_poll: Duration::from_millis(500),
            settle_after_match: Duration::from_secs(10),
        }
    }
}

/// Top-level engine configuration.
///
/// Response-read timing travels with the [`Sensor`](crate::sensor::Sensor)
/// itself; this covers everything above it.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// How long an enrollment request waits for the verification loop to
    /// release the channel before giving up
    pub handoff_grace: Duration,

    pub enroll: EnrollConfig,
    pub verify: VerifyConfig,
}

impl EngineConfig {
    /// Set the hand-off grace period
    pub fn with_handoff_grace(mut self, grace: Duration) -> Self {
        self.handoff_grace = grace;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // Generous enough for a verification pass mid-way through a
            // two-phase transfer (two read deadlines) plus polling slack.
            handoff_grace: Duration::from_secs(10),
            enroll: EnrollConfig::default(),
            verify: VerifyConfig::default(),
        }
    }
}
