//! Bluetooth capability traits and the connection state type
//!
//! A device driver implements whichever of these capabilities its device
//! supports. The unD6IO-BT supports all three.

use async_trait::async_trait;

use crate::Result;

/// Indicates whether a remote device is connected via Bluetooth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connection {
    /// The connection status is not known. Used as a response under error
    /// conditions, and valid as the `last` seed for
    /// [`HasConnection::connection_changed`].
    #[default]
    Unknown,
    /// No Bluetooth connection is active
    NotConnected,
    /// There is an active Bluetooth connection
    Connected,
}

impl std::fmt::Display for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Connection::Unknown => write!(f, "unknown"),
            Connection::NotConnected => write!(f, "not connected"),
            Connection::Connected => write!(f, "connected"),
        }
    }
}

/// Capability for triggering a device to activate its pairing flow.
///
/// After `announce` returns the device should be discoverable by Bluetooth
/// sources to connect to using their native pairing interfaces.
#[async_trait]
pub trait HasAnnounce {
    /// Make the device discoverable for pairing
    async fn announce(&mut self) -> Result<()>;
}

/// Capability for reading a Bluetooth device's announced name.
#[async_trait]
pub trait HasName {
    /// Return the friendly name the device advertises
    async fn name(&mut self) -> Result<String>;
}

/// Capability for observing the Bluetooth connection status of a device,
/// i.e. whether a phone is connected.
#[async_trait]
pub trait HasConnection {
    /// Block until the connection status differs from `last`, then return
    /// the new status.
    async fn connection_changed(&mut self, last: Connection) -> Result<Connection>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_default_is_unknown() {
        assert_eq!(Connection::default(), Connection::Unknown);
    }

    #[test]
    fn test_connection_display() {
        assert_eq!(Connection::Unknown.to_string(), "unknown");
        assert_eq!(Connection::NotConnected.to_string(), "not connected");
        assert_eq!(Connection::Connected.to_string(), "connected");
    }
}
