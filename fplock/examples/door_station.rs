//! Complete door station
//!
//! Verification runs in the background; enrollment is triggered from
//! stdin. Type `enroll <name>` to register a fingerprint, `quit` to exit.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use fplock::{
    AccessEngine, EnrollmentOutcome, LogActuator, LogNotifier, MemoryStore, Sensor, SerialChannel,
};
use fplock_core::constants::DEFAULT_BAUD_RATE;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let port = std::env::var("FPLOCK_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());
    let baud = std::env::var("FPLOCK_BAUD")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_BAUD_RATE);

    let channel = SerialChannel::open(&port, baud)?;
    let mut sensor = Sensor::new(channel);
    sensor.test_connection().await?;

    println!("Module on {port} is alive; verification running.");
    println!("Commands: enroll <name> | quit");

    let mut engine = AccessEngine::start(
        sensor,
        Arc::new(MemoryStore::new()),
        Arc::new(LogActuator),
        Arc::new(LogNotifier),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();

        if line == "quit" {
            break;
        }

        if let Some(name) = line.strip_prefix("enroll ") {
            let name = name.trim();
            if name.is_empty() {
                println!("usage: enroll <name>");
                continue;
            }

            match engine.enroll(name).await? {
                EnrollmentOutcome::Persisted(record) => {
                    println!("Enrolled {} at {}", record.identity, record.enrolled_at);
                }
                EnrollmentOutcome::Duplicate { existing } => {
                    println!("That finger is already enrolled as {existing}");
                }
                EnrollmentOutcome::Failed { step, error } => {
                    println!("Enrollment failed at {step}: {error}");
                }
                EnrollmentOutcome::Cancelled => {
                    println!("Enrollment cancelled");
                }
            }
        } else if !line.is_empty() {
            println!("Commands: enroll <name> | quit");
        }
    }

    engine.shutdown().await?;
    println!("Stopped.");

    Ok(())
}
