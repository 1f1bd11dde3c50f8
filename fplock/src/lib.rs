//! # fplock
//!
//! Fingerprint access control over an optical sensor module speaking a
//! checksummed binary frame protocol on a half-duplex serial link.
//!
//! ## Features
//!
//! - Typed sensor operations with compile-time call ordering
//! - Async/await API using Tokio
//! - Enrollment and continuous verification workflows
//! - Scriptable in-memory channel for hardware-free testing
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use fplock::{AccessEngine, LogActuator, LogNotifier, MemoryStore, Sensor, SerialChannel};
//!
//! #[tokio::main]
//! async fn main() -> fplock::Result<()> {
//!     // Open the module and spawn the background verification loop
//!     let channel = SerialChannel::open("/dev/ttyUSB0", 115_200)?;
//!     let mut engine = AccessEngine::start(
//!         Sensor::new(channel),
//!         Arc::new(MemoryStore::new()),
//!         Arc::new(LogActuator),
//!         Arc::new(LogNotifier),
//!     );
//!
//!     // Enroll on demand; verification pauses and resumes around it
//!     let outcome = engine.enroll("alice").await?;
//!     println!("{outcome:?}");
//!
//!     // Stop the loop and reclaim the port
//!     engine.shutdown().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod actuate;
pub mod cancel;
pub mod config;
pub mod engine;
pub mod error;
pub mod notify;
pub mod reader;
pub mod sensor;
pub mod store;
pub mod workflow;

#[cfg(test)]
mod testutil;

// Re-exports
pub use actuate::{Actuator, LogActuator};
pub use cancel::CancelToken;
pub use config::{EngineConfig, EnrollConfig, SensorConfig, VerifyConfig};
pub use engine::AccessEngine;
pub use error::{Error, Result};
pub use notify::{LogNotifier, Notifier, NullNotifier};
pub use sensor::{LoadedSlot, Sensor};
pub use store::{MemoryStore, TemplateStore};
pub use workflow::{EnrollmentOutcome, EnrollmentStep, EnrollmentWorkflow, VerificationWorkflow};

// Re-export types
pub use fplock_core::{BufferSlot, Command, ResultCode};
pub use fplock_transport::{ScriptedChannel, SensorChannel, SerialChannel};
pub use fplock_types::{EnrollmentRecord, NoticeKind, Template};
