//! Scripted in-memory channel
//!
//! Stands in for the module in tests and demos. The conversation is
//! half-duplex request→response, so the script is a queue of reply bursts:
//! each host write releases the next burst into the readable buffer. A
//! burst holds everything the module would send back for that request:
//! possibly several frames (a two-phase upload answers one command with a
//! status frame followed by a data frame), possibly nothing (a module that
//! stays silent until the host gives up).

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{
    error::{Error, Result},
    SensorChannel,
};

/// Scripted channel for driving the engine without hardware.
///
/// Clones share the same state: keep one handle for scripting and
/// assertions while the sensor owns another.
#[derive(Clone, Default)]
pub struct ScriptedChannel {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    script: VecDeque<Vec<u8>>,
    incoming: VecDeque<u8>,
    writes: Vec<Vec<u8>>,
}

impl ScriptedChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply burst, released by the next unanswered host write.
    pub fn push_reply(&self, burst: impl AsRef<[u8]>) {
        self.inner
            .lock()
            .script
            .push_back(burst.as_ref().to_vec());
    }

    /// Queue a silent reply: the write is consumed, nothing comes back.
    pub fn push_silence(&self) {
        self.push_reply([]);
    }

    /// Make bytes readable immediately, without waiting for a write.
    pub fn inject(&self, bytes: impl AsRef<[u8]>) {
        self.inner.lock().incoming.extend(bytes.as_ref());
    }

    /// Frames written by the host so far
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.inner.lock().writes.clone()
    }

    /// Number of host writes so far
    pub fn write_count(&self) -> usize {
        self.inner.lock().writes.len()
    }

    /// Released bytes not yet read by the host
    pub fn unread(&self) -> usize {
        self.inner.lock().incoming.len()
    }

    /// Reply bursts still waiting for a write
    pub fn remaining_replies(&self) -> usize {
        self.inner.lock().script.len()
    }
}

#[async_trait]
impl SensorChannel for ScriptedChannel {
    async fn bytes_available(&mut self) -> Result<usize> {
        Ok(self.inner.lock().incoming.len())
    }

    async fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut inner = self.inner.lock();

        if inner.incoming.len() < buf.len() {
            return Err(Error::Closed);
        }

        for slot in buf.iter_mut() {
            // Length checked above
            *slot = inner.incoming.pop_front().unwrap_or_default();
        }

        Ok(())
    }

    async fn write_all(&mut self, data: &[u8]) -> Result<()> {
        let mut inner = self.inner.lock();

        inner.writes.push(data.to_vec());

        if let Some(burst) = inner.script.pop_front() {
            inner.incoming.extend(burst);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_write_releases_next_reply() {
        let script = ScriptedChannel::new();
        script.push_reply([1, 2, 3]);
        script.push_reply([4, 5]);

        let mut channel = script.clone();
        assert_eq!(channel.bytes_available().await.unwrap(), 0);

        channel.write_all(&[0xAA]).await.unwrap();
        assert_eq!(channel.bytes_available().await.unwrap(), 3);

        channel.write_all(&[0xBB]).await.unwrap();
        assert_eq!(channel.bytes_available().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_read_exact_drains_in_order() {
        let script = ScriptedChannel::new();
        script.push_reply([1, 2, 3, 4]);

        let mut channel = script.clone();
        channel.write_all(&[0]).await.unwrap();

        let mut first = [0u8; 2];
        channel.read_exact(&mut first).await.unwrap();
        assert_eq!(first, [1, 2]);

        let mut second = [0u8; 2];
        channel.read_exact(&mut second).await.unwrap();
        assert_eq!(second, [3, 4]);
    }

    #[tokio::test]
    async fn test_silent_reply_keeps_channel_empty() {
        let script = ScriptedChannel::new();
        script.push_silence();

        let mut channel = script.clone();
        channel.write_all(&[0]).await.unwrap();

        assert_eq!(channel.bytes_available().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_read_beyond_available_fails() {
        let script = ScriptedChannel::new();
        script.inject([1, 2]);

        let mut channel = script.clone();
        let mut buf = [0u8; 3];

        assert!(matches!(
            channel.read_exact(&mut buf).await,
            Err(Error::Closed)
        ));
    }

    #[tokio::test]
    async fn test_writes_are_recorded() {
        let script = ScriptedChannel::new();
        let mut channel = script.clone();

        channel.write_all(&[1, 2]).await.unwrap();
        channel.write_all(&[3]).await.unwrap();

        assert_eq!(script.writes(), vec![vec![1, 2], vec![3]]);
        assert_eq!(script.write_count(), 2);
    }
}
