//! Async driver for the Q-SYS unD6IO-BT Bluetooth control module.
//!
//! The unD6IO-BT speaks a small line protocol: ASCII commands terminated by
//! a single carriage return, and replies of space-separated tokens
//! terminated the same way. This crate encodes the three supported commands
//! (`BTB` announce, `BTS` status, `BTN` name), validates the replies, and
//! exposes them as typed operations over any [`Transport`] implementation.
//!
//! # Example
//!
//! ```no_run
//! use und6iobt::transport::tcp::TcpTransport;
//! use und6iobt::{Connection, Driver};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), und6iobt::Error> {
//!     let transport = TcpTransport::new("192.168.1.50:4999");
//!     let mut driver = Driver::new(transport);
//!
//!     // Make the device discoverable for Bluetooth pairing
//!     driver.announce().await?;
//!
//!     // Read its advertised friendly name
//!     let name = driver.name().await?;
//!     println!("Device name: {name}");
//!
//!     // Block until the connection state changes
//!     let state = driver.connection_changed(Connection::Unknown).await?;
//!     println!("Connection is now {state:?}");
//!
//!     Ok(())
//! }
//! ```

pub mod bluetooth;
pub mod commands;
pub mod driver;
pub mod error;
pub mod frame;
pub mod transport;

pub use bluetooth::{Connection, HasAnnounce, HasConnection, HasName};
pub use driver::Driver;
pub use error::Error;
pub use transport::Transport;

/// Result type alias using the library's Error type
pub type Result<T> = std::result::Result<T, Error>;
