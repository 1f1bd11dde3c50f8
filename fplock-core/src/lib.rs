//! # fplock-core
//!
//! Wire protocol for the serial optical fingerprint module.
//!
//! This crate provides the low-level protocol primitives:
//! - Frame encoding/decoding (command, data and response frames)
//! - Checksum calculation
//! - Command and result code definitions
//! - Buffer slot identifiers

pub mod checksum;
pub mod command;
pub mod constants;
pub mod error;
pub mod frame;
pub mod result;
pub mod slot;

pub use command::Command;
pub use error::{Error, Result};
pub use frame::Response;
pub use result::ResultCode;
pub use slot::BufferSlot;
