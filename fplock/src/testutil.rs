//! Script-building helpers and recording doubles shared by the unit tests.
//!
//! The frame helpers return the raw bytes a real module would emit, built
//! with the device-side encoders so the tests exercise the exact wire
//! layout.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use fplock_core::{frame, Command, ResultCode};
use fplock_types::{EnrollmentRecord, NoticeKind, StoreError};

use crate::{actuate::Actuator, notify::Notifier, store::TemplateStore};

/// Successful status frame with an empty payload
pub(crate) fn status_ok(command: Command) -> Vec<u8> {
    status(command, ResultCode::Success)
}

/// Status frame with the given result code
pub(crate) fn status(command: Command, code: ResultCode) -> Vec<u8> {
    frame::encode_status_response(command, code, &[])
        .unwrap()
        .to_vec()
}

/// Successful status frame carrying a payload
pub(crate) fn status_with_payload(command: Command, payload: &[u8]) -> Vec<u8> {
    frame::encode_status_response(command, ResultCode::Success, payload)
        .unwrap()
        .to_vec()
}

/// Finger-detect reply reporting presence or absence
pub(crate) fn finger(present: bool) -> Vec<u8> {
    status_with_payload(Command::FingerDetect, &[u8::from(present)])
}

/// Both frames of a template upload in one burst: the size announcement
/// followed by the data frame carrying the template itself.
pub(crate) fn upload_burst(template: &[u8]) -> Vec<u8> {
    let size = (template.len() as u16).to_le_bytes();
    let mut burst = status_with_payload(Command::UpChar, &size);
    burst.extend_from_slice(
        &frame::encode_data_response(Command::UpChar, ResultCode::Success, template).unwrap(),
    );
    burst
}

/// Empty data response confirming a download
pub(crate) fn confirm_ok(command: Command) -> Vec<u8> {
    confirm(command, ResultCode::Success)
}

/// Empty data response with the given result code
pub(crate) fn confirm(command: Command, code: ResultCode) -> Vec<u8> {
    frame::encode_data_response(command, code, &[])
        .unwrap()
        .to_vec()
}

/// Notifier that records every notice for later assertions.
#[derive(Clone, Default)]
pub(crate) struct RecordingNotifier {
    notices: Arc<Mutex<Vec<(String, NoticeKind)>>>,
}

impl RecordingNotifier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.notices
            .lock()
            .iter()
            .map(|(message, _)| message.clone())
            .collect()
    }

    pub(crate) fn saw(&self, needle: &str) -> bool {
        self.notices
            .lock()
            .iter()
            .any(|(message, _)| message.contains(needle))
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, message: &str, kind: NoticeKind, _duration: Option<Duration>) {
        self.notices.lock().push((message.to_string(), kind));
    }
}

/// Actuator that records who it opened for.
#[derive(Clone, Default)]
pub(crate) struct RecordingActuator {
    opens: Arc<Mutex<Vec<String>>>,
}

impl RecordingActuator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn opens(&self) -> Vec<String> {
        self.opens.lock().clone()
    }
}

#[async_trait]
impl Actuator for RecordingActuator {
    async fn trigger_open(&self, identity: &str) {
        self.opens.lock().push(identity.to_string());
    }
}

/// Store whose every call reports the backend as unavailable.
pub(crate) struct FailingStore;

#[async_trait]
impl TemplateStore for FailingStore {
    async fn all(&self) -> Result<Vec<EnrollmentRecord>, StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }

    async fn insert(&self, _record: EnrollmentRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }
}
