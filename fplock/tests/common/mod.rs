//! Scripting helpers and recording doubles for the scenario tests.
//!
//! Replies are built with the device-side encoders, so every scenario
//! exchanges the exact bytes a real module would produce.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use fplock::{Actuator, Command, Notifier, NoticeKind, ResultCode, ScriptedChannel};
use fplock_core::frame;

/// Successful status frame with an empty payload
pub fn status_ok(command: Command) -> Vec<u8> {
    frame::encode_status_response(command, ResultCode::Success, &[])
        .unwrap()
        .to_vec()
}

/// Finger-detect reply reporting presence or absence
pub fn finger(present: bool) -> Vec<u8> {
    frame::encode_status_response(Command::FingerDetect, ResultCode::Success, &[u8::from(present)])
        .unwrap()
        .to_vec()
}

/// Both frames of a template upload in one burst
pub fn upload_burst(template: &[u8]) -> Vec<u8> {
    let size = (template.len() as u16).to_le_bytes();
    let mut burst = frame::encode_status_response(Command::UpChar, ResultCode::Success, &size)
        .unwrap()
        .to_vec();
    burst.extend_from_slice(
        &frame::encode_data_response(Command::UpChar, ResultCode::Success, template).unwrap(),
    );
    burst
}

/// Replies for one complete scan: absent, present, capture, generate
pub fn script_scan(script: &ScriptedChannel) {
    script.push_reply(finger(false));
    script.push_reply(finger(true));
    script.push_reply(status_ok(Command::GetImage));
    script.push_reply(status_ok(Command::Generate));
}

/// Replies for one template download: announce then confirmation
pub fn script_download_ok(script: &ScriptedChannel) {
    script.push_reply(status_ok(Command::DownChar));
    script.push_reply(
        frame::encode_data_response(Command::DownChar, ResultCode::Success, &[])
            .unwrap()
            .to_vec(),
    );
}

/// Replies for one candidate check with the given verdict
pub fn script_candidate(script: &ScriptedChannel, matches: bool) {
    script_download_ok(script);
    let verdict = if matches {
        ResultCode::Success
    } else {
        ResultCode::VerifyFail
    };
    script.push_reply(
        frame::encode_status_response(Command::Match, verdict, &[])
            .unwrap()
            .to_vec(),
    );
}

/// Actuator that records who it opened for.
#[derive(Clone, Default)]
pub struct CountingActuator {
    opens: Arc<Mutex<Vec<String>>>,
}

impl CountingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opens(&self) -> Vec<String> {
        self.opens.lock().clone()
    }
}

#[async_trait]
impl Actuator for CountingActuator {
    async fn trigger_open(&self, identity: &str) {
        self.opens.lock().push(identity.to_string());
    }
}

/// Notifier that records every message.
#[derive(Clone, Default)]
pub struct CapturingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl CapturingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saw(&self, needle: &str) -> bool {
        self.messages
            .lock()
            .iter()
            .any(|message| message.contains(needle))
    }
}

impl Notifier for CapturingNotifier {
    fn show(&self, message: &str, _kind: NoticeKind, _duration: Option<Duration>) {
        self.messages.lock().push(message.to_string());
    }
}
