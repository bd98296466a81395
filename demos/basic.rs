//! Basic example: trigger pairing, read the device name, then wait for a
//! phone to connect or disconnect.
//!
//! Run with the device's address: `cargo run --example basic -- 192.168.1.50:4999`

use std::env;

use und6iobt::transport::tcp::TcpTransport;
use und6iobt::{Connection, Driver};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let addr = env::args()
        .nth(1)
        .unwrap_or_else(|| "192.168.1.50:4999".to_string());

    println!("Talking to unD6IO-BT at {}...", addr);
    let mut driver = Driver::new(TcpTransport::new(addr));

    // Make the device discoverable for pairing
    driver.announce().await?;
    println!("Device is now discoverable");

    let name = driver.name().await?;
    println!("Advertised name: {}", name);

    println!("Waiting for a connection change (Ctrl+C to exit)...");
    let state = driver.connection_changed(Connection::Unknown).await?;
    println!("Connection is now {}", state);

    Ok(())
}
