//! Sensor connectivity check

use fplock::{Sensor, SerialChannel};
use fplock_core::constants::DEFAULT_BAUD_RATE;

#[tokio::main]
async fn main() -> fplock::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let port = std::env::var("FPLOCK_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());
    let baud = std::env::var("FPLOCK_BAUD")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_BAUD_RATE);

    println!("Pinging module on {port} at {baud} baud...");

    let channel = SerialChannel::open(&port, baud)?;
    let mut sensor = Sensor::new(channel);
    sensor.test_connection().await?;

    println!("Module responded.");

    Ok(())
}
