//! Serial transport
//!
//! The module hangs off a UART; this wraps a [`tokio_serial::SerialStream`]
//! behind [`SensorChannel`]. `bytes_to_read` on the underlying port is what
//! lets the reader poll availability without consuming partial frames.

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::{SerialPort, SerialPortBuilderExt, SerialStream};
use tracing::{debug, trace};

use crate::{error::Result, SensorChannel};

/// Serial channel to the fingerprint module
pub struct SerialChannel {
    stream: SerialStream,
    path: String,
}

impl SerialChannel {
    /// Open the given serial device.
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be opened (missing device,
    /// permissions, busy).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fplock_transport::SerialChannel;
    ///
    /// let channel = SerialChannel::open("/dev/ttyUSB0", 115_200)?;
    /// # Ok::<(), fplock_transport::Error>(())
    /// ```
    pub fn open(path: &str, baud_rate: u32) -> Result<Self> {
        debug!(path, baud_rate, "Opening serial port");

        let stream = tokio_serial::new(path, baud_rate).open_native_async()?;

        Ok(Self {
            stream,
            path: path.to_string(),
        })
    }

    /// Device path this channel was opened on
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl SensorChannel for SerialChannel {
    async fn bytes_available(&mut self) -> Result<usize> {
        let available = self.stream.bytes_to_read()?;
        Ok(available as usize)
    }

    async fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.stream.read_exact(buf).await?;

        trace!("Read {} bytes: {:02X?}", buf.len(), &buf[..buf.len().min(16)]);

        Ok(())
    }

    async fn write_all(&mut self, data: &[u8]) -> Result<()> {
        trace!("Writing {} bytes: {:02X?}", data.len(), &data[..data.len().min(16)]);

        self.stream.write_all(data).await?;
        self.stream.flush().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_missing_device_fails() {
        let result = SerialChannel::open("/dev/nonexistent-fplock-port", 115_200);
        assert!(result.is_err());
    }

    // Note: exercising a real port requires hardware
    // #[tokio::test]
    // #[ignore]
    // async fn test_open_real_port() {
    //     let mut channel = SerialChannel::open("/dev/ttyUSB0", 115_200).unwrap();
    //     assert_eq!(channel.bytes_available().await.unwrap(), 0);
    // }
}
