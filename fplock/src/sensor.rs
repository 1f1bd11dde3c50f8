//! Typed sensor operations
//!
//! [`Sensor`] owns the channel to the fingerprint module and exposes one
//! method per protocol operation. Every call is a strict request→response
//! round trip; the two template transfers add a second phase with its own
//! read deadline. A failed transfer can leave the module holding half a
//! buffer; nothing here rolls that back, callers re-issue
//! generate/download instead of assuming buffer state.

use bytes::{BufMut, BytesMut};
use tracing::{debug, trace};

use fplock_core::{
    constants::{RESPONSE_FRAME_LEN, RESPONSE_OVERHEAD},
    frame::{self, Response},
    BufferSlot, Command, ResultCode,
};
use fplock_transport::SensorChannel;
use fplock_types::Template;

use crate::{
    config::SensorConfig,
    error::{Error, Result},
    reader,
};

/// Proof that a module buffer holds a complete template.
///
/// Handed out only by [`Sensor::generate`], [`Sensor::download`] and
/// [`Sensor::merge_scans`]; consumed by [`Sensor::match_templates`] and
/// [`Sensor::upload`]. Holding one is the compile-time witness that the
/// buffer was primed, so "match before download" cannot be written.
#[derive(Debug)]
pub struct LoadedSlot {
    slot: BufferSlot,
}

impl LoadedSlot {
    /// Which module buffer this template lives in
    pub fn slot(&self) -> BufferSlot {
        self.slot
    }
}

/// Fingerprint module behind a half-duplex channel.
///
/// # Examples
///
/// ```no_run
/// use fplock::{Sensor, SerialChannel};
///
/// #[tokio::main]
/// async fn main() -> fplock::Result<()> {
///     let channel = SerialChannel::open("/dev/ttyUSB0", 115_200)?;
///     let mut sensor = Sensor::new(channel);
///
///     sensor.test_connection().await?;
///     println!("module is alive");
///     Ok(())
/// }
/// ```
pub struct Sensor<C> {
    channel: C,
    config: SensorConfig,
}

impl<C: SensorChannel> Sensor<C> {
    /// Wrap a channel with default timing
    pub fn new(channel: C) -> Self {
        Self::with_config(channel, SensorConfig::default())
    }

    /// Wrap a channel with explicit timing
    pub fn with_config(channel: C, config: SensorConfig) -> Self {
        Self { channel, config }
    }

    /// Give the channel back (e.g. to close the port)
    pub fn into_channel(self) -> C {
        self.channel
    }

    /// Ping the module
    pub async fn test_connection(&mut self) -> Result<()> {
        debug!("Pinging module...");
        self.status(Command::TestConnection, &[]).await?;
        Ok(())
    }

    /// Capture the image currently on the sensor window
    pub async fn capture_image(&mut self) -> Result<()> {
        debug!("Capturing image...");
        self.status(Command::GetImage, &[]).await?;
        Ok(())
    }

    /// Check whether a finger is resting on the sensor
    pub async fn finger_present(&mut self) -> Result<bool> {
        let response = self.status(Command::FingerDetect, &[]).await?;
        let present = response.payload.first().copied() == Some(1);

        trace!(present, "Finger presence polled");

        Ok(present)
    }

    /// Generate a template from the captured image into `slot`
    pub async fn generate(&mut self, slot: BufferSlot) -> Result<LoadedSlot> {
        self.status(Command::Generate, &[slot.index(), 0]).await?;

        debug!(slot = %slot, "Template generated from captured image");

        Ok(LoadedSlot { slot })
    }

    /// Merge buffers 0..2 into a final template in buffer 0.
    ///
    /// The module always merges RamBuffer0..2 regardless of the tokens
    /// handed in; the three tokens witness that three loads succeeded.
    /// Callers load one scan per slot (see the enrollment workflow).
    pub async fn merge_scans(&mut self, scans: [LoadedSlot; 3]) -> Result<LoadedSlot> {
        let _ = scans;

        self.status(Command::Merge, &[0, 0, 3]).await?;

        debug!("Scan buffers merged");

        Ok(LoadedSlot {
            slot: BufferSlot::Primary,
        })
    }

    /// Transfer the template in `source` from the module to the caller.
    ///
    /// Two phases: the module first answers with a status frame whose
    /// payload carries the template size, then streams a data frame of
    /// exactly that size. Each phase has its own read deadline, and the
    /// transfer only counts once both frames validate.
    pub async fn upload(&mut self, source: &LoadedSlot) -> Result<Template> {
        let announce = self
            .status(Command::UpChar, &[source.slot().index(), 0])
            .await?;
        let size = announce.payload_u16(0)? as usize;

        debug!(size, "Template upload announced");

        let data =
            reader::read_response(&mut self.channel, size + RESPONSE_OVERHEAD, &self.config)
                .await?;
        require_success(Command::UpChar, &data)?;

        debug!(size = data.payload.len(), "Template uploaded");

        Ok(Template::from_bytes(data.payload))
    }

    /// Transfer a template from the caller into module buffer `slot`.
    ///
    /// Mirror image of [`upload`](Self::upload): announce the transfer
    /// size, wait for the readiness status, stream the data frame, then
    /// read the 12-byte confirmation.
    pub async fn download(&mut self, slot: BufferSlot, template: &Template) -> Result<LoadedSlot> {
        // The two buffer-id bytes travel inside the data payload and count
        // toward the announced size.
        let announced = template.len() + 2;
        if announced > u16::MAX as usize {
            return Err(fplock_core::Error::PayloadTooLarge {
                size: template.len(),
                max: u16::MAX as usize - 2,
            }
            .into());
        }

        self.status(Command::DownChar, &(announced as u16).to_le_bytes())
            .await?;

        let mut payload = BytesMut::with_capacity(announced);
        payload.put_u8(slot.index());
        payload.put_u8(0);
        payload.put_slice(template.as_bytes());

        let data = frame::encode_data(Command::DownChar, &payload)?;
        self.channel.write_all(&data).await?;

        let confirm =
            reader::read_response(&mut self.channel, RESPONSE_OVERHEAD, &self.config).await?;
        require_success(Command::DownChar, &confirm)?;

        debug!(slot = %slot, size = template.len(), "Template downloaded into module buffer");

        Ok(LoadedSlot { slot })
    }

    /// Compare the templates in two buffers.
    ///
    /// `Ok(true)` for a match, `Ok(false)` when the module reports
    /// `VERIFY_FAIL`; any other result code is an error.
    pub async fn match_templates(
        &mut self,
        live: &LoadedSlot,
        candidate: &LoadedSlot,
    ) -> Result<bool> {
        let payload = [live.slot().index(), 0, candidate.slot().index(), 0];
        let response = self
            .exchange(Command::Match, &payload, RESPONSE_FRAME_LEN)
            .await?;

        let matched = match response.code {
            ResultCode::Success => true,
            ResultCode::VerifyFail => false,
            code => {
                return Err(fplock_core::Error::Device {
                    command: Command::Match,
                    code,
                }
                .into());
            }
        };

        debug!(
            live = %live.slot(),
            candidate = %candidate.slot(),
            matched,
            "Compared buffers"
        );

        Ok(matched)
    }

    // Helper methods

    async fn exchange(
        &mut self,
        command: Command,
        payload: &[u8],
        expected_len: usize,
    ) -> Result<Response> {
        let request = frame::encode_command(command, payload)?;
        self.channel.write_all(&request).await?;

        reader::read_response(&mut self.channel, expected_len, &self.config).await
    }

    async fn status(&mut self, command: Command, payload: &[u8]) -> Result<Response> {
        let response = self.exchange(command, payload, RESPONSE_FRAME_LEN).await?;
        require_success(command, &response)?;

        Ok(response)
    }
}

fn require_success(command: Command, response: &Response) -> Result<()> {
    if response.code.is_success() {
        Ok(())
    } else {
        Err(Error::Protocol(fplock_core::Error::Device {
            command,
            code: response.code,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::*;
    use fplock_transport::ScriptedChannel;
    use pretty_assertions::assert_eq;

    fn sensor(script: &ScriptedChannel) -> Sensor<ScriptedChannel> {
        Sensor::new(script.clone())
    }

    #[tokio::test]
    async fn test_capture_image_sends_expected_frame() {
        let script = ScriptedChannel::new();
        script.push_reply(status_ok(Command::GetImage));

        sensor(&script).capture_image().await.unwrap();

        let expected = frame::encode_command(Command::GetImage, &[]).unwrap();
        assert_eq!(script.writes(), vec![expected.to_vec()]);
    }

    #[tokio::test]
    async fn test_finger_present_reads_payload_flag() {
        let script = ScriptedChannel::new();
        script.push_reply(finger(true));
        script.push_reply(finger(false));

        let mut sensor = sensor(&script);
        assert!(sensor.finger_present().await.unwrap());
        assert!(!sensor.finger_present().await.unwrap());
    }

    #[tokio::test]
    async fn test_generate_yields_loaded_slot() {
        let script = ScriptedChannel::new();
        script.push_reply(status_ok(Command::Generate));

        let loaded = sensor(&script)
            .generate(BufferSlot::Tertiary)
            .await
            .unwrap();

        assert_eq!(loaded.slot(), BufferSlot::Tertiary);

        // Payload carries [slot, 0]
        let expected = frame::encode_command(Command::Generate, &[2, 0]).unwrap();
        assert_eq!(script.writes(), vec![expected.to_vec()]);
    }

    #[tokio::test]
    async fn test_generate_failure_is_device_error() {
        let script = ScriptedChannel::new();
        script.push_reply(status(Command::Generate, ResultCode::BadQuality));

        let result = sensor(&script).generate(BufferSlot::Primary).await;

        assert!(matches!(
            result,
            Err(Error::Protocol(fplock_core::Error::Device {
                command: Command::Generate,
                code: ResultCode::BadQuality,
            }))
        ));
    }

    #[tokio::test]
    async fn test_upload_two_phase() {
        let template = vec![0xCD; 32];
        let script = ScriptedChannel::new();
        script.push_reply(status_ok(Command::Generate));
        script.push_reply(upload_burst(&template));

        let mut sensor = sensor(&script);
        let primed = sensor.generate(BufferSlot::Primary).await.unwrap();

        let uploaded = sensor.upload(&primed).await.unwrap();

        assert_eq!(uploaded.as_bytes(), template.as_slice());
        // One write for the generate, one for the upload command; the
        // data phase is read without a second request.
        assert_eq!(script.write_count(), 2);
        assert_eq!(script.unread(), 0);
    }

    #[tokio::test]
    async fn test_upload_fails_on_corrupt_data_phase() {
        let template = vec![0xCD; 32];
        let mut burst = upload_burst(&template);
        let last = burst.len() - 1;
        burst[last] ^= 0xFF; // corrupt the data-frame checksum

        let script = ScriptedChannel::new();
        script.push_reply(status_ok(Command::Generate));
        script.push_reply(burst);

        let mut sensor = sensor(&script);
        let primed = sensor.generate(BufferSlot::Primary).await.unwrap();

        let result = sensor.upload(&primed).await;

        assert!(matches!(
            result,
            Err(Error::Protocol(
                fplock_core::Error::ChecksumMismatch { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_download_two_phase() {
        let template = Template::from_bytes(vec![0xEE; 16]);
        let script = ScriptedChannel::new();
        script.push_reply(status_ok(Command::DownChar));
        script.push_reply(confirm_ok(Command::DownChar));

        let loaded = sensor(&script)
            .download(BufferSlot::Secondary, &template)
            .await
            .unwrap();

        assert_eq!(loaded.slot(), BufferSlot::Secondary);

        let writes = script.writes();
        assert_eq!(writes.len(), 2);

        // Announce: template size + 2 as LE payload
        let announce = frame::encode_command(Command::DownChar, &18u16.to_le_bytes()).unwrap();
        assert_eq!(writes[0], announce.to_vec());

        // Data frame: [slot, 0] + template
        let mut payload = vec![1u8, 0];
        payload.extend_from_slice(template.as_bytes());
        let data = frame::encode_data(Command::DownChar, &payload).unwrap();
        assert_eq!(writes[1], data.to_vec());
    }

    #[tokio::test]
    async fn test_download_fails_on_rejected_confirmation() {
        let template = Template::from_bytes(vec![0xEE; 16]);
        let script = ScriptedChannel::new();
        script.push_reply(status_ok(Command::DownChar));
        script.push_reply(confirm(Command::DownChar, ResultCode::Fail));

        let result = sensor(&script)
            .download(BufferSlot::Secondary, &template)
            .await;

        assert!(matches!(
            result,
            Err(Error::Protocol(fplock_core::Error::Device {
                command: Command::DownChar,
                code: ResultCode::Fail,
            }))
        ));
    }

    #[tokio::test]
    async fn test_match_templates_verdicts() {
        let script = ScriptedChannel::new();
        script.push_reply(status_ok(Command::Generate));
        script.push_reply(status_ok(Command::Generate));
        script.push_reply(status_ok(Command::Match));
        script.push_reply(status(Command::Match, ResultCode::VerifyFail));
        script.push_reply(status(Command::Match, ResultCode::BadQuality));

        let mut sensor = sensor(&script);
        let live = sensor.generate(BufferSlot::Primary).await.unwrap();
        let candidate = sensor.generate(BufferSlot::Secondary).await.unwrap();

        assert!(sensor.match_templates(&live, &candidate).await.unwrap());
        assert!(!sensor.match_templates(&live, &candidate).await.unwrap());
        assert!(sensor.match_templates(&live, &candidate).await.is_err());

        // Match payload names both slots
        let match_frame = frame::encode_command(Command::Match, &[0, 0, 1, 0]).unwrap();
        assert_eq!(script.writes()[2], match_frame.to_vec());
    }

    #[tokio::test]
    async fn test_merge_scans_targets_first_buffer() {
        let script = ScriptedChannel::new();
        for _ in 0..3 {
            script.push_reply(status_ok(Command::Generate));
        }
        script.push_reply(status_ok(Command::Merge));

        let mut sensor = sensor(&script);
        let first = sensor.generate(BufferSlot::Primary).await.unwrap();
        let second = sensor.generate(BufferSlot::Secondary).await.unwrap();
        let third = sensor.generate(BufferSlot::Tertiary).await.unwrap();

        let merged = sensor.merge_scans([first, second, third]).await.unwrap();

        assert_eq!(merged.slot(), BufferSlot::Primary);

        let merge_frame = frame::encode_command(Command::Merge, &[0, 0, 3]).unwrap();
        assert_eq!(script.writes()[3], merge_frame.to_vec());
    }

    #[tokio::test]
    async fn test_oversized_template_rejected_before_any_write() {
        let template = Template::from_bytes(vec![0u8; u16::MAX as usize]);
        let script = ScriptedChannel::new();

        let result = sensor(&script).download(BufferSlot::Primary, &template).await;

        assert!(matches!(
            result,
            Err(Error::Protocol(fplock_core::Error::PayloadTooLarge { .. }))
        ));
        assert_eq!(script.write_count(), 0);
    }
}
